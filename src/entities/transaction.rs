//! Purchases and invoices shown on the detail screens.

use super::money::Money;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a card purchase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionId(pub u64);

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "txn-{}", self.0)
    }
}

/// Identifier of an invoice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InvoiceId(pub u64);

impl fmt::Display for InvoiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "inv-{}", self.0)
    }
}

/// A single card purchase.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,
    /// Merchant the purchase was made at
    pub merchant: String,
    /// Purchase amount
    pub amount: Money,
    /// Local date and time of the purchase
    pub occurred_at: NaiveDateTime,
}

/// Where an invoice is in its life.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum InvoiceStatus {
    /// Awaiting payment
    Open,
    /// Payment is scheduled (e.g. autogiro)
    Scheduled,
    /// Already settled
    Paid {
        /// Settlement date
        paid_on: NaiveDate,
    },
}

/// A monthly or merchant invoice.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    /// Unique identifier
    pub id: InvoiceId,
    /// Issuing merchant
    pub merchant: String,
    /// Printed invoice number, e.g. `INV-2025-11-001`
    pub invoice_number: String,
    /// Amount due
    pub amount: Money,
    /// Issue date
    pub issue_date: NaiveDate,
    /// Due date
    pub due_date: NaiveDate,
    /// Current status
    pub status: InvoiceStatus,
}

impl Invoice {
    /// Settled before this session.
    #[must_use]
    pub const fn is_paid(&self) -> bool {
        matches!(self.status, InvoiceStatus::Paid { .. })
    }

    /// Has a scheduled payment.
    #[must_use]
    pub const fn is_scheduled(&self) -> bool {
        matches!(self.status, InvoiceStatus::Scheduled)
    }

    /// Status line relative to `today`.
    #[must_use]
    pub fn status_label(&self, today: NaiveDate) -> String {
        match self.status {
            InvoiceStatus::Paid { paid_on } => format!("Paid on {}", paid_on.format("%b %-d, %Y")),
            InvoiceStatus::Scheduled => "Scheduled".to_string(),
            InvoiceStatus::Open => {
                let days = (self.due_date - today).num_days();
                match days {
                    0 => "Due today".to_string(),
                    1 => "Due in 1 day".to_string(),
                    d if d > 1 => format!("Due in {d} days"),
                    -1 => "Overdue by 1 day".to_string(),
                    d => format!("Overdue by {} days", d.unsigned_abs()),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::{date, sample_invoice};

    #[test]
    fn test_open_invoice_labels() {
        let invoice = sample_invoice(InvoiceStatus::Open);
        assert_eq!(invoice.due_date, date(2025, 11, 12));

        assert_eq!(invoice.status_label(date(2025, 11, 9)), "Due in 3 days");
        assert_eq!(invoice.status_label(date(2025, 11, 11)), "Due in 1 day");
        assert_eq!(invoice.status_label(date(2025, 11, 12)), "Due today");
        assert_eq!(invoice.status_label(date(2025, 11, 13)), "Overdue by 1 day");
        assert_eq!(invoice.status_label(date(2025, 11, 20)), "Overdue by 8 days");
    }

    #[test]
    fn test_paid_and_scheduled_labels() {
        let paid = sample_invoice(InvoiceStatus::Paid {
            paid_on: date(2025, 11, 5),
        });
        assert!(paid.is_paid());
        assert_eq!(paid.status_label(date(2025, 11, 9)), "Paid on Nov 5, 2025");

        let scheduled = sample_invoice(InvoiceStatus::Scheduled);
        assert!(scheduled.is_scheduled());
        assert!(!scheduled.is_paid());
        assert_eq!(scheduled.status_label(date(2025, 11, 9)), "Scheduled");
    }
}
