//! Plan store - the session-wide list of payment plans.
//!
//! The store is an explicit context object handed to screens by reference.
//! It only grows: plans are created, never edited or removed.

use crate::{
    entities::{Currency, Money, PlanId, PlanName, PlanRecord},
    errors::{Error, Result},
};
use serde::Deserialize;
use std::str::FromStr;
use tracing::{debug, info};

/// Where a newly created plan lands in display order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OrderingPolicy {
    /// Unfinished plans in creation order, paid-off plans trailing.
    /// A new plan goes right before the first paid-off one.
    #[default]
    UnfinishedFirst,
    /// Insert right before the last element, whatever it is.
    BeforeLast,
}

impl FromStr for OrderingPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unfinished_first" => Ok(Self::UnfinishedFirst),
            "before_last" => Ok(Self::BeforeLast),
            other => Err(Error::Config {
                message: format!("Unknown plan ordering policy: {other}"),
            }),
        }
    }
}

impl OrderingPolicy {
    fn insertion_index(self, plans: &[PlanRecord]) -> usize {
        match self {
            Self::UnfinishedFirst => plans
                .iter()
                .position(PlanRecord::is_paid_off)
                .unwrap_or(plans.len()),
            Self::BeforeLast => plans.len().saturating_sub(1),
        }
    }
}

/// Wire form of the create-plan command.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct CreatePlanCommand {
    /// Requested plan name
    pub name: String,
    /// Starting amount in minor units
    pub starting_amount_minor_units: i64,
    /// ISO currency code
    pub currency: String,
}

/// In-memory, ordered collection of plans.
#[derive(Clone, Debug, Default)]
pub struct PlanStore {
    plans: Vec<PlanRecord>,
    ordering: OrderingPolicy,
}

impl PlanStore {
    /// Empty store with the given ordering policy.
    #[must_use]
    pub const fn new(ordering: OrderingPolicy) -> Self {
        Self {
            plans: Vec::new(),
            ordering,
        }
    }

    /// Store pre-filled with `plans` in the given order.
    #[must_use]
    pub fn with_plans(plans: Vec<PlanRecord>, ordering: OrderingPolicy) -> Self {
        info!("Plan store seeded with {} plans", plans.len());
        Self { plans, ordering }
    }

    /// The ordering policy in force.
    #[must_use]
    pub const fn ordering(&self) -> OrderingPolicy {
        self.ordering
    }

    /// Every plan in display order.
    #[must_use]
    pub fn plans(&self) -> &[PlanRecord] {
        &self.plans
    }

    /// Number of plans.
    #[must_use]
    pub fn len(&self) -> usize {
        self.plans.len()
    }

    /// True if no plans exist.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }

    /// Looks a plan up by id.
    #[must_use]
    pub fn get(&self, id: PlanId) -> Option<&PlanRecord> {
        self.plans.iter().find(|plan| plan.id == id)
    }

    /// First plan carrying this name.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&PlanRecord> {
        self.plans.iter().find(|plan| plan.name == name)
    }

    /// Plans that can still receive purchases, in display order.
    #[must_use]
    pub fn list_attachable(&self) -> Vec<PlanRecord> {
        let attachable: Vec<PlanRecord> = self
            .plans
            .iter()
            .filter(|plan| !plan.is_paid_off())
            .cloned()
            .collect();
        debug!(
            "{} of {} plans attachable",
            attachable.len(),
            self.plans.len()
        );
        attachable
    }

    /// Creates an unpaid plan and places it according to the ordering policy.
    pub fn create_plan(&mut self, name: PlanName, starting_amount: Money) -> PlanRecord {
        let plan = PlanRecord::new_unpaid(name, starting_amount);
        let index = self.ordering.insertion_index(&self.plans);
        self.plans.insert(index, plan.clone());
        info!(
            plan_id = %plan.id,
            index,
            "Created plan '{}' with starting amount {}",
            plan.name,
            plan.total_amount
        );
        plan
    }

    /// Validates and runs a create-plan command.
    pub fn execute(&mut self, command: CreatePlanCommand) -> Result<PlanRecord> {
        let name = PlanName::new(command.name)?;
        let currency: Currency = command.currency.parse()?;
        if command.starting_amount_minor_units < 0 {
            return Err(Error::InvalidAmount {
                minor_units: command.starting_amount_minor_units,
            });
        }
        let amount = Money::new(command.starting_amount_minor_units, currency);
        Ok(self.create_plan(name, amount))
    }

    /// Sum still owed across unfinished plans in one currency.
    pub fn outstanding_total(&self, currency: Currency) -> Result<Money> {
        self.plans
            .iter()
            .filter(|plan| !plan.is_paid_off() && plan.total_amount.currency == currency)
            .try_fold(Money::zero(currency), |acc, plan| {
                acc.checked_add(plan.remaining())
            })
    }
}
