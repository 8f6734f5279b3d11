//! Simulated payment processing.
//!
//! Confirming a payment schedules a `PaymentCompleted` event on the bus after
//! a fixed delay. The returned [`PendingPayment`] cancels the timer when it is
//! cancelled or dropped, so a dismissed screen never receives a late result.

use super::events::{AppEvent, EventBus};
use crate::{
    entities::{InvoiceId, Money, TransactionId},
    errors::{Error, Result},
};
use serde::{Deserialize, Serialize};
use std::{fmt, time::Duration};
use tokio::{runtime::Handle, task::JoinHandle};
use tracing::{info, warn};

/// Default simulated processing time.
pub const DEFAULT_PAYMENT_DELAY: Duration = Duration::from_millis(1_500);

/// What is being paid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum PaymentTarget {
    /// An invoice
    Invoice(InvoiceId),
    /// A single purchase
    Transaction(TransactionId),
}

impl fmt::Display for PaymentTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invoice(id) => id.fmt(f),
            Self::Transaction(id) => id.fmt(f),
        }
    }
}

/// Payment-confirm command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentCommand {
    /// Invoice or purchase being paid
    pub target: PaymentTarget,
    /// Amount paid
    pub amount: Money,
}

/// Emitted on the bus once the simulated delay has elapsed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentCompleted {
    /// Invoice or purchase that was paid
    pub target: PaymentTarget,
    /// Amount paid
    pub amount: Money,
}

/// Payment choice on the payment sheet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaymentOption {
    /// The full invoice amount
    PayInFull,
    /// A partial amount, must be positive and at most the amount due
    PartPayment(Money),
}

impl PaymentOption {
    /// Amount to charge against `due`.
    pub fn amount_for(self, due: Money) -> Result<Money> {
        match self {
            Self::PayInFull => Ok(due),
            Self::PartPayment(amount) => {
                // Same-currency check first, then range.
                let left = due.checked_sub(amount)?;
                if !amount.is_positive() || left.is_negative() {
                    return Err(Error::InvalidAmount {
                        minor_units: amount.minor_units,
                    });
                }
                Ok(amount)
            }
        }
    }
}

/// Schedules simulated payments.
#[derive(Clone, Debug)]
pub struct PaymentProcessor {
    bus: EventBus,
    delay: Duration,
}

impl PaymentProcessor {
    /// Processor publishing completions on `bus` after `delay`.
    #[must_use]
    pub const fn new(bus: EventBus, delay: Duration) -> Self {
        Self { bus, delay }
    }

    /// Configured processing delay.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Starts processing. Must be called from inside a Tokio runtime.
    pub fn confirm(&self, command: PaymentCommand) -> Result<PendingPayment> {
        let handle = Handle::try_current().map_err(|e| Error::Scheduler {
            message: format!("No runtime to schedule payment on: {e}"),
        })?;

        info!(
            target_id = %command.target,
            amount = %command.amount,
            delay = ?self.delay,
            "Payment confirmed, processing"
        );

        let bus = self.bus.clone();
        let delay = self.delay;
        let task = handle.spawn(async move {
            tokio::time::sleep(delay).await;
            info!(target_id = %command.target, "Payment completed");
            bus.publish(AppEvent::PaymentCompleted(PaymentCompleted {
                target: command.target,
                amount: command.amount,
            }));
        });

        Ok(PendingPayment {
            target: command.target,
            task,
        })
    }
}

/// Handle on a payment in flight. Cancels the timer when dropped.
#[derive(Debug)]
pub struct PendingPayment {
    target: PaymentTarget,
    task: JoinHandle<()>,
}

impl PendingPayment {
    /// What is being paid.
    #[must_use]
    pub const fn target(&self) -> PaymentTarget {
        self.target
    }

    /// True once the completion has been published or the timer was cancelled.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Stops the timer; nothing is published if it had not fired yet.
    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for PendingPayment {
    fn drop(&mut self) {
        if !self.task.is_finished() {
            warn!(target_id = %self.target, "Pending payment cancelled");
            self.task.abort();
        }
    }
}
