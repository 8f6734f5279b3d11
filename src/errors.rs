//! Unified error types for the pocket planner.
//!
//! Nothing here can fail at a data layer; the errors cover configuration,
//! input validation at the screen boundary and misuse of money values.

use thiserror::Error;

/// Validation failures surfaced as a disabled control rather than a hard error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A plan name was empty or whitespace only
    #[error("Plan name cannot be empty")]
    EmptyName,
}

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description
        message: String,
    },

    /// Input rejected at the screen boundary
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Currency code that is not supported
    #[error("Unknown currency code: {code}")]
    UnknownCurrency {
        /// The code as it was supplied
        code: String,
    },

    /// Arithmetic between two different currencies
    #[error("Currency mismatch: {left} vs {right}")]
    CurrencyMismatch {
        /// Currency of the left operand
        left: String,
        /// Currency of the right operand
        right: String,
    },

    /// Amount outside the accepted range
    #[error("Invalid amount: {minor_units} minor units")]
    InvalidAmount {
        /// The rejected amount in minor units
        minor_units: i64,
    },

    /// No plan with the given id exists in the store
    #[error("Plan not found: {id}")]
    PlanNotFound {
        /// The id that was looked up
        id: String,
    },

    /// Fully paid plans take no new purchases
    #[error("Plan '{name}' is paid off and cannot take new purchases")]
    PlanPaidOff {
        /// Name of the plan
        name: String,
    },

    /// A payment is already being processed for this screen
    #[error("Payment already in progress")]
    PaymentInProgress,

    /// No async runtime available to schedule deferred work on
    #[error("Scheduler error: {message}")]
    Scheduler {
        /// Human-readable description
        message: String,
    },

    /// I/O error while reading configuration files
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
