//! Invoice detail screen with the payment sheet.
//!
//! Confirming a payment starts a simulated delay. The local `is_paid` flag only
//! flips when a matching completion arrives while the screen is still mounted;
//! dismissing the screen cancels the pending payment.

use super::AppContext;
use crate::{
    core::{
        events::{AppEvent, Subscription},
        payment::{PaymentCommand, PaymentOption, PaymentProcessor, PaymentTarget, PendingPayment},
        scroll::{ScrollCollapseController, ScrollReset},
    },
    entities::Invoice,
    errors::{Error, Result},
};
use chrono::NaiveDate;
use tracing::{debug, info};

/// What the invoice screen did with an event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InvoiceReaction {
    /// Scroll reset, or `None` if already at top
    ScrolledToTop(Option<ScrollReset>),
    /// The invoice on screen is now paid
    MarkedPaid,
    /// Not for this screen
    Ignored,
}

/// Invoice detail state.
#[derive(Debug)]
pub struct InvoiceDetailScreen {
    /// The invoice on screen
    pub invoice: Invoice,
    /// Header collapse state
    pub scroll: ScrollCollapseController,
    payments: PaymentProcessor,
    is_paid: bool,
    payment_sheet_open: bool,
    pending: Option<PendingPayment>,
    subscription: Option<Subscription>,
    stacked: bool,
}

impl InvoiceDetailScreen {
    /// Mounts the screen for `invoice`.
    #[must_use]
    pub fn mount(context: &AppContext, invoice: Invoice) -> Self {
        let owner = format!("invoice:{}", invoice.id);
        Self {
            scroll: context.scroll_controller(),
            payments: context.payments.clone(),
            is_paid: false,
            payment_sheet_open: false,
            pending: None,
            subscription: Some(context.bus.subscribe(owner)),
            stacked: false,
            invoice,
        }
    }

    /// Called when the screen is pushed onto a navigation stack. From then on
    /// scroll-to-top pops it instead of scrolling it.
    pub(crate) const fn mark_stacked(&mut self) {
        self.stacked = true;
    }

    const fn target(&self) -> PaymentTarget {
        PaymentTarget::Invoice(self.invoice.id)
    }

    /// Whether the screen still listens to the bus.
    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        self.subscription.is_some()
    }

    /// Paid during this session.
    #[must_use]
    pub const fn is_paid(&self) -> bool {
        self.is_paid
    }

    /// Paid now or before.
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        self.is_paid || self.invoice.is_paid()
    }

    /// The pay button shows for unpaid, unscheduled invoices only.
    #[must_use]
    pub const fn should_show_pay_button(&self) -> bool {
        !self.invoice.is_paid() && !self.is_paid && !self.invoice.is_scheduled()
    }

    /// Status line: "Paid" once paid here, otherwise the invoice's own label.
    #[must_use]
    pub fn status_label(&self, today: NaiveDate) -> String {
        if self.is_paid {
            "Paid".to_string()
        } else {
            self.invoice.status_label(today)
        }
    }

    /// Whether the payment sheet is showing.
    #[must_use]
    pub const fn is_payment_sheet_open(&self) -> bool {
        self.payment_sheet_open
    }

    /// Opens the payment sheet if paying is possible.
    pub fn open_payment_sheet(&mut self) -> bool {
        if self.should_show_pay_button() {
            self.payment_sheet_open = true;
        }
        self.payment_sheet_open
    }

    /// A payment is being processed.
    #[must_use]
    pub const fn is_processing(&self) -> bool {
        self.pending.is_some()
    }

    /// The sheet's cancel button is disabled while processing.
    #[must_use]
    pub const fn can_cancel_sheet(&self) -> bool {
        !self.is_processing()
    }

    /// Closes the sheet unless a payment is processing.
    pub fn cancel_payment_sheet(&mut self) -> bool {
        if self.can_cancel_sheet() {
            self.payment_sheet_open = false;
        }
        !self.payment_sheet_open
    }

    /// "Confirm Payment". Starts the simulated processing.
    pub fn confirm_payment(&mut self, option: PaymentOption) -> Result<()> {
        if self.is_processing() {
            return Err(Error::PaymentInProgress);
        }
        let amount = option.amount_for(self.invoice.amount)?;
        let pending = self.payments.confirm(PaymentCommand {
            target: self.target(),
            amount,
        })?;
        self.payment_sheet_open = true;
        self.pending = Some(pending);
        Ok(())
    }

    /// Applies one event.
    pub fn handle_event(&mut self, event: &AppEvent) -> InvoiceReaction {
        match event {
            AppEvent::ScrollToTop if self.stacked => InvoiceReaction::Ignored,
            AppEvent::ScrollToTop => InvoiceReaction::ScrolledToTop(self.scroll.scroll_to_top()),
            AppEvent::PaymentCompleted(completed)
                if completed.target == self.target() && self.is_mounted() =>
            {
                info!(
                    invoice = %self.invoice.id,
                    amount = %completed.amount,
                    "Invoice marked paid"
                );
                self.is_paid = true;
                self.pending = None;
                self.payment_sheet_open = false;
                InvoiceReaction::MarkedPaid
            }
            AppEvent::PaymentCompleted(_) => InvoiceReaction::Ignored,
        }
    }

    /// Applies every buffered event in order.
    pub fn pump_events(&mut self) -> Vec<InvoiceReaction> {
        let events = self
            .subscription
            .as_mut()
            .map(Subscription::drain)
            .unwrap_or_default();
        events
            .iter()
            .map(|event| self.handle_event(event))
            .collect()
    }

    /// Waits for the next event and applies it. `None` once unmounted.
    pub async fn next_event(&mut self) -> Option<InvoiceReaction> {
        let event = self.subscription.as_mut()?.next().await?;
        Some(self.handle_event(&event))
    }

    /// Dismisses the screen: cancels any pending payment and unsubscribes.
    pub fn dismiss(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.cancel();
        }
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
        self.payment_sheet_open = false;
        debug!(invoice = %self.invoice.id, "Invoice detail dismissed");
    }
}
