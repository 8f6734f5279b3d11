use chrono::{Days, Local, NaiveDate};
use pocket_planner::{
    config::{plans, settings::Settings},
    core::{navigation::Tab, payment::PaymentOption, plan::PlanStore},
    entities::{Currency, Invoice, InvoiceId, InvoiceStatus, Money, Transaction, TransactionId},
    errors::{Error, Result},
    screens::{AppContext, InvoiceDetailScreen, TransactionDetailScreen, WalletScreen},
};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenvy::dotenv().ok();

    // 3. Settings and seed plans
    let settings = Settings::from_env().inspect_err(|e| error!("Invalid settings: {}", e))?;
    let config = match plans::load_config(&settings.config_path) {
        Ok(config) => config,
        Err(Error::Io(e)) => {
            warn!(
                "Could not read {}: {}; starting with no plans",
                settings.config_path.display(),
                e
            );
            plans::Config::default()
        }
        Err(e) => {
            error!("Invalid seed plans: {}", e);
            return Err(e);
        }
    };
    let mut context = AppContext::from_config(settings, config)
        .inspect(|ctx| info!("Loaded {} seed plans", ctx.plans.len()))
        .inspect_err(|e| error!("Failed to seed plans: {}", e))?;

    // 4. Walk through one session
    run_demo_session(&mut context).await
}

async fn run_demo_session(context: &mut AppContext) -> Result<()> {
    let today = Local::now().date_naive();
    let mut tabs = context.tab_bar();
    let mut wallet = WalletScreen::mount(context);

    for raw in [0.0, 40.0, 85.0, -12.0, 140.0] {
        wallet.scroll.report_offset(raw);
        let layout = wallet.scroll.header_layout();
        info!(
            raw,
            progress = layout.progress,
            collapsed = layout.is_collapsed,
            "Wallet header {:?}/{:?}",
            layout.alignment,
            layout.title_style
        );
    }

    // Purchase detail: attach to a brand new plan.
    let purchase = Transaction {
        id: TransactionId(1),
        merchant: "Netonnet".to_string(),
        amount: Money::from_major(1_568, Currency::Sek),
        occurred_at: today.and_hms_opt(14, 32, 0).unwrap_or_default(),
    };
    wallet.open(TransactionDetailScreen::mount(context, purchase));
    if let Some(detail) = wallet.top_transaction_mut() {
        attach_to_new_plan(detail, &mut context.plans)?;
    }

    // Re-tapping the wallet tab pops and dismisses the detail before anything scrolls.
    tabs.tap(Tab::Wallet);
    for reaction in wallet.pump_events() {
        info!(?reaction, "Wallet reacted to scroll-to-top");
    }

    // Invoice detail: pay in full and wait for the simulated processing.
    let invoice = Invoice {
        id: InvoiceId(1),
        merchant: "Netonnet".to_string(),
        invoice_number: "INV-2025-11-001".to_string(),
        amount: Money::from_major(1_568, Currency::Sek),
        issue_date: today - Days::new(4),
        due_date: today + Days::new(3),
        status: InvoiceStatus::Open,
    };
    wallet.open(InvoiceDetailScreen::mount(context, invoice));
    if let Some(screen) = wallet.top_invoice_mut() {
        pay_in_full(screen, today).await?;
    }
    wallet.back();

    let outstanding = context.plans.outstanding_total(Currency::Sek)?;
    info!(
        "Session done: {} plans, {} outstanding",
        context.plans.len(),
        outstanding
    );
    let order: Vec<&str> = context
        .plans
        .plans()
        .iter()
        .map(|plan| plan.name.as_str())
        .collect();
    info!("Plan order: {}", order.join(" | "));

    wallet.unmount();
    Ok(())
}

fn attach_to_new_plan(detail: &mut TransactionDetailScreen, plans: &mut PlanStore) -> Result<()> {
    for plan in detail.plan_choices(plans) {
        info!(
            "Attachable: {} ({} of {}, {:.0}%)",
            plan.name,
            plan.paid_amount,
            plan.total_amount,
            plan.progress() * 100.0
        );
    }

    detail.open_new_plan_sheet();
    if let Some(form) = detail.new_plan_sheet_mut() {
        form.set_name("Home Renovation");
    }
    if let Some(plan) = detail.confirm_new_plan(plans)? {
        info!("Created and selected plan '{}'", plan.name);
    }
    if let Some(summary) = detail.selection_summary(plans) {
        info!("{}: {} ({})", summary.headline, summary.plan_name, summary.caption);
    }
    Ok(())
}

async fn pay_in_full(screen: &mut InvoiceDetailScreen, today: NaiveDate) -> Result<()> {
    info!("Invoice status: {}", screen.status_label(today));
    if screen.open_payment_sheet() {
        screen.confirm_payment(PaymentOption::PayInFull)?;
        while screen.is_processing() {
            if screen.next_event().await.is_none() {
                break;
            }
        }
    }
    info!("Invoice status: {}", screen.status_label(today));
    Ok(())
}
