//! Attaching a purchase to a payment plan.
//!
//! The selection is ephemeral: it lives on the transaction detail screen and
//! is dropped with it. Attaching never changes a plan's totals.

use super::plan::PlanStore;
use crate::{
    entities::{Money, PlanId, PlanName, PlanRecord, Tint, TransactionId},
    errors::{Error, Result, ValidationError},
};
use tracing::{debug, info, warn};

/// State of the "create new plan" sheet.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NewPlanForm {
    /// Text currently typed into the name field
    pub name: String,
}

impl NewPlanForm {
    /// Empty form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the typed name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Whether the confirm button is enabled.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        PlanName::new(self.name.as_str()).is_ok()
    }

    /// Validates the name. The store is only touched once this succeeds.
    pub fn validate(&self) -> std::result::Result<PlanName, ValidationError> {
        PlanName::new(self.name.as_str())
    }

    /// Creates the plan with the given starting amount.
    pub fn submit(&self, store: &mut PlanStore, starting_amount: Money) -> Result<PlanRecord> {
        let name = self.validate()?;
        Ok(store.create_plan(name, starting_amount))
    }
}

/// Data for the "selected plan" card.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectionSummary {
    /// Plan name
    pub plan_name: String,
    /// Plan icon, falls back to the new-plan icon if the plan is gone
    pub icon: String,
    /// Plan tint
    pub tint: Tint,
    /// Whether the plan was created from this screen
    pub is_new_plan: bool,
    /// "Payment Plan Created" or "Purchase Added"
    pub headline: &'static str,
    /// "Starting amount: X" or "New total: X"
    pub caption: String,
}

/// Which plan, if any, the purchase on screen is attached to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttachmentSelection {
    transaction: TransactionId,
    amount: Money,
    selected: Option<PlanId>,
}

impl AttachmentSelection {
    /// Nothing selected yet.
    #[must_use]
    pub const fn new(transaction: TransactionId, amount: Money) -> Self {
        Self {
            transaction,
            amount,
            selected: None,
        }
    }

    /// The purchase this selection belongs to.
    #[must_use]
    pub const fn transaction(&self) -> TransactionId {
        self.transaction
    }

    /// Selected plan id.
    #[must_use]
    pub const fn selected(&self) -> Option<PlanId> {
        self.selected
    }

    /// True once a plan has been picked.
    #[must_use]
    pub const fn is_attached(&self) -> bool {
        self.selected.is_some()
    }

    /// Marks the purchase as belonging to the plan `plan_id`. Plan totals are left alone.
    ///
    /// # Errors
    /// [`Error::PlanNotFound`] if the store has no such plan and
    /// [`Error::PlanPaidOff`] if it is fully paid. The selection is unchanged.
    pub fn attach(&mut self, store: &PlanStore, plan_id: PlanId) -> Result<()> {
        let plan = store.get(plan_id).ok_or_else(|| Error::PlanNotFound {
            id: plan_id.to_string(),
        })?;
        if plan.is_paid_off() {
            warn!(
                transaction = %self.transaction,
                %plan_id,
                "Refused to attach purchase to paid-off plan '{}'",
                plan.name
            );
            return Err(Error::PlanPaidOff {
                name: plan.name.clone(),
            });
        }
        info!(
            transaction = %self.transaction,
            %plan_id,
            "Attached purchase to plan '{}'",
            plan.name
        );
        self.selected = Some(plan_id);
        Ok(())
    }

    /// Clears the selection.
    pub fn detach(&mut self) {
        if let Some(plan_id) = self.selected.take() {
            info!(transaction = %self.transaction, %plan_id, "Detached purchase from plan");
        }
    }

    /// Creates a plan from the sheet, seeded with this purchase's amount, and selects it.
    pub fn create_and_attach(
        &mut self,
        form: &NewPlanForm,
        store: &mut PlanStore,
    ) -> Result<PlanRecord> {
        let plan = form.submit(store, self.amount)?;
        self.attach(store, plan.id)?;
        Ok(plan)
    }

    /// Section heading above the plan picker.
    #[must_use]
    pub const fn section_title(&self) -> &'static str {
        if self.is_attached() {
            "Added to Payment Plan"
        } else {
            "Add to Payment Plan"
        }
    }

    /// Card contents for the selected plan, `None` when nothing is selected.
    #[must_use]
    pub fn summary(&self, store: &PlanStore) -> Option<SelectionSummary> {
        let plan_id = self.selected?;
        let plan = store.get(plan_id);
        if plan.is_none() {
            debug!(%plan_id, "Selected plan no longer in store");
        }

        let is_new_plan = plan.is_some_and(PlanRecord::is_just_created);
        let amount = self.amount.format();
        Some(SelectionSummary {
            plan_name: plan.map_or_else(|| plan_id.to_string(), |plan| plan.name.clone()),
            icon: plan.map_or_else(
                || crate::entities::plan::NEW_PLAN_ICON.to_string(),
                |plan| plan.icon.clone(),
            ),
            tint: plan.map_or(Tint::Blue, |plan| plan.tint),
            is_new_plan,
            headline: if is_new_plan {
                "Payment Plan Created"
            } else {
                "Purchase Added"
            },
            caption: if is_new_plan {
                format!("Starting amount: {amount}")
            } else {
                format!("New total: {amount}")
            },
        })
    }
}
