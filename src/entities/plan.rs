//! Plan entity - a payment plan ("pocket") that purchases can be grouped into.
//!
//! Each plan carries its total and paid amounts; progress is always derived
//! from those two and never stored on its own.

use super::money::Money;
use crate::errors::ValidationError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Due label given to every freshly created plan.
pub const JUST_CREATED_LABEL: &str = "Just created";

/// Icon given to every freshly created plan.
pub const NEW_PLAN_ICON: &str = "tray.fill";

/// Opaque plan identifier, assigned once at creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlanId(Uuid);

impl PlanId {
    /// Generates a fresh random id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PlanId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PlanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A validated, non-blank plan name.
///
/// The store only accepts this type, so an empty name can never reach it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PlanName(String);

impl PlanName {
    /// Trims the input and rejects it if nothing is left.
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Borrow the name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Take the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for PlanName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Presentation tint of a plan card.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tint {
    /// Blue
    Blue,
    /// Purple
    Purple,
    /// Green
    Green,
    /// Cyan, used for new plans
    #[default]
    Cyan,
    /// Orange
    Orange,
    /// Pink
    Pink,
}

/// A payment plan record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlanRecord {
    /// Unique identifier
    pub id: PlanId,
    /// Display name, not required to be unique
    pub name: String,
    /// Total amount billed through this plan
    pub total_amount: Money,
    /// Amount already paid off
    pub paid_amount: Money,
    /// Free-form status such as "Paid off" or "Just created"
    pub due_label: String,
    /// Icon tag
    pub icon: String,
    /// Tint tag
    pub tint: Tint,
    /// When the record was created in this session
    pub created_at: DateTime<Utc>,
}

impl PlanRecord {
    /// Builds a fresh plan: nothing paid yet, "Just created", tray icon, cyan.
    #[must_use]
    pub fn new_unpaid(name: PlanName, starting_amount: Money) -> Self {
        Self {
            id: PlanId::new(),
            name: name.into_inner(),
            total_amount: starting_amount,
            paid_amount: Money::zero(starting_amount.currency),
            due_label: JUST_CREATED_LABEL.to_string(),
            icon: NEW_PLAN_ICON.to_string(),
            tint: Tint::Cyan,
            created_at: Utc::now(),
        }
    }

    /// Fraction paid, clamped to `[0.0, 1.0]`. A zero total counts as no progress.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn progress(&self) -> f64 {
        if self.total_amount.minor_units <= 0 {
            return 0.0;
        }
        let ratio = self.paid_amount.minor_units as f64 / self.total_amount.minor_units as f64;
        ratio.clamp(0.0, 1.0)
    }

    /// Fully paid plans cannot receive new purchases.
    #[must_use]
    pub fn is_paid_off(&self) -> bool {
        self.progress() >= 1.0
    }

    /// True while the plan still carries the label it was created with.
    #[must_use]
    pub fn is_just_created(&self) -> bool {
        self.due_label == JUST_CREATED_LABEL
    }

    /// What is left to pay, never negative.
    #[must_use]
    pub fn remaining(&self) -> Money {
        let left = self
            .total_amount
            .minor_units
            .saturating_sub(self.paid_amount.minor_units)
            .max(0);
        Money::new(left, self.total_amount.currency)
    }
}
