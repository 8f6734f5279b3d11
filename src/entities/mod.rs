//! Value types shared by every screen: money, plans, purchases and invoices.

/// Money in minor units with a currency tag
pub mod money;
/// Payment plans ("pockets")
pub mod plan;
/// Purchases and invoices
pub mod transaction;

pub use money::{Currency, Money};
pub use plan::{PlanId, PlanName, PlanRecord, Tint};
pub use transaction::{Invoice, InvoiceId, InvoiceStatus, Transaction, TransactionId};
