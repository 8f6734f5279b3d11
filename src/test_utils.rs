//! Shared test utilities for the pocket planner.
//!
//! Fixture builders with sensible defaults, mirroring the prototype's sample
//! data, plus a tracing setup that writes through the test harness.

use crate::{
    config::settings::Settings,
    core::plan::{OrderingPolicy, PlanStore},
    entities::{
        Currency, Invoice, InvoiceId, InvoiceStatus, Money, PlanId, PlanRecord, Tint, Transaction,
        TransactionId,
    },
    screens::AppContext,
};
use chrono::{NaiveDate, Utc};
use tracing_subscriber::EnvFilter;

/// Routes tracing output through the test writer. Safe to call repeatedly.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trace")),
        )
        .with_test_writer()
        .try_init();
}

/// Date helper for fixtures; panics on an invalid date.
#[allow(clippy::expect_used)]
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid fixture date")
}

/// Plan with amounts given in whole SEK.
///
/// # Defaults
/// * `due_label`: "Paid off" when fully paid, otherwise "In progress"
/// * `icon`: "doc.text.fill"
/// * `tint`: blue
pub fn plan_with_amounts(name: &str, total: i64, paid: i64) -> PlanRecord {
    PlanRecord {
        id: PlanId::new(),
        name: name.to_string(),
        total_amount: Money::from_major(total, Currency::Sek),
        paid_amount: Money::from_major(paid, Currency::Sek),
        due_label: if paid >= total && total > 0 {
            "Paid off".to_string()
        } else {
            "In progress".to_string()
        },
        icon: "doc.text.fill".to_string(),
        tint: Tint::Blue,
        created_at: Utc::now(),
    }
}

/// Plan whose derived progress equals `progress` (total 1 000 SEK).
#[allow(clippy::cast_possible_truncation)]
pub fn plan_with_progress(name: &str, progress: f64) -> PlanRecord {
    let total_minor = 100_000_i64;
    let mut plan = plan_with_amounts(name, 1_000, 0);
    plan.paid_amount = Money::new((progress * 100_000.0).round() as i64, Currency::Sek);
    if plan.paid_amount.minor_units >= total_minor {
        plan.due_label = "Paid off".to_string();
    }
    plan
}

/// The three plans the prototype starts with.
pub fn sample_plans() -> Vec<PlanRecord> {
    let mut unbilled = plan_with_amounts("Unbilled - November", 67_800, 8_945);
    unbilled.due_label = "Current billing period".to_string();
    unbilled.icon = "creditcard.fill".to_string();

    let mut office = plan_with_amounts("Home Office Setup", 18_200, 6_000);
    office.due_label = "Paid off in 6 months".to_string();
    office.tint = Tint::Purple;

    let mut kitchen = plan_with_amounts("New Kitchen Appliances", 28_500, 28_500);
    kitchen.tint = Tint::Green;

    vec![unbilled, office, kitchen]
}

/// Store holding [`sample_plans`] with the default ordering.
pub fn seeded_store() -> PlanStore {
    PlanStore::with_plans(sample_plans(), OrderingPolicy::default())
}

/// Context with default settings and the sample plans.
pub fn test_context() -> AppContext {
    init_test_tracing();
    AppContext::new(Settings::default(), sample_plans())
}

/// A purchase of 1 568 SEK at Netonnet.
pub fn sample_transaction() -> Transaction {
    Transaction {
        id: TransactionId(1),
        merchant: "Netonnet".to_string(),
        amount: Money::from_major(1_568, Currency::Sek),
        occurred_at: date(2025, 11, 5).and_hms_opt(14, 32, 0).unwrap_or_default(),
    }
}

/// Netonnet invoice of 1 568 SEK issued Nov 5 and due Nov 12, 2025.
pub fn sample_invoice(status: InvoiceStatus) -> Invoice {
    Invoice {
        id: InvoiceId(1),
        merchant: "Netonnet".to_string(),
        invoice_number: "INV-2025-11-001".to_string(),
        amount: Money::from_major(1_568, Currency::Sek),
        issue_date: date(2025, 11, 5),
        due_date: date(2025, 11, 12),
        status,
    }
}
