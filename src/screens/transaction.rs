//! Purchase detail screen with the "add to payment plan" picker.

use super::AppContext;
use crate::{
    core::{
        attachment::{AttachmentSelection, NewPlanForm, SelectionSummary},
        events::{AppEvent, Subscription},
        plan::PlanStore,
        scroll::{ScrollCollapseController, ScrollReset},
    },
    entities::{PlanId, PlanRecord, Transaction},
    errors::Result,
};
use tracing::debug;

/// Purchase detail state.
#[derive(Debug)]
pub struct TransactionDetailScreen {
    /// The purchase on screen
    pub transaction: Transaction,
    /// Header collapse state
    pub scroll: ScrollCollapseController,
    selection: AttachmentSelection,
    new_plan_sheet: Option<NewPlanForm>,
    subscription: Option<Subscription>,
    stacked: bool,
}

impl TransactionDetailScreen {
    /// Mounts the screen for `transaction`.
    #[must_use]
    pub fn mount(context: &AppContext, transaction: Transaction) -> Self {
        let selection = AttachmentSelection::new(transaction.id, transaction.amount);
        let owner = format!("transaction:{}", transaction.id);
        Self {
            scroll: context.scroll_controller(),
            selection,
            new_plan_sheet: None,
            subscription: Some(context.bus.subscribe(owner)),
            stacked: false,
            transaction,
        }
    }

    /// Whether the screen still listens to the bus.
    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        self.subscription.is_some()
    }

    /// Called when the screen is pushed onto a navigation stack. From then on
    /// scroll-to-top pops it instead of scrolling it.
    pub(crate) const fn mark_stacked(&mut self) {
        self.stacked = true;
    }

    /// Current plan selection.
    #[must_use]
    pub const fn selection(&self) -> &AttachmentSelection {
        &self.selection
    }

    /// Plans offered in the picker. Paid-off plans are left out.
    #[must_use]
    pub fn plan_choices(&self, store: &PlanStore) -> Vec<PlanRecord> {
        store.list_attachable()
    }

    /// Picks an existing plan. Paid-off or unknown plans are refused.
    pub fn choose_plan(&mut self, store: &PlanStore, plan_id: PlanId) -> Result<()> {
        self.selection.attach(store, plan_id)
    }

    /// "Remove from Payment Plan".
    pub fn remove_from_plan(&mut self) {
        self.selection.detach();
    }

    /// Opens the new-plan sheet with an empty name.
    pub fn open_new_plan_sheet(&mut self) {
        self.new_plan_sheet = Some(NewPlanForm::new());
    }

    /// The open sheet, if any.
    pub fn new_plan_sheet_mut(&mut self) -> Option<&mut NewPlanForm> {
        self.new_plan_sheet.as_mut()
    }

    /// Closes the sheet without creating anything.
    pub fn cancel_new_plan_sheet(&mut self) {
        self.new_plan_sheet = None;
    }

    /// Confirms the sheet. On success the sheet closes and the new plan is selected.
    /// On failure the sheet stays open and the store is unchanged.
    pub fn confirm_new_plan(&mut self, store: &mut PlanStore) -> Result<Option<PlanRecord>> {
        let Some(form) = self.new_plan_sheet.as_ref() else {
            return Ok(None);
        };
        let plan = self.selection.create_and_attach(form, store)?;
        self.new_plan_sheet = None;
        Ok(Some(plan))
    }

    /// Selected-plan card contents.
    #[must_use]
    pub fn selection_summary(&self, store: &PlanStore) -> Option<SelectionSummary> {
        self.selection.summary(store)
    }

    /// Applies buffered events. Returns the scroll resets that happened.
    pub fn pump_events(&mut self) -> Vec<ScrollReset> {
        let events = self
            .subscription
            .as_mut()
            .map(Subscription::drain)
            .unwrap_or_default();
        if self.stacked {
            return Vec::new();
        }
        events
            .into_iter()
            .filter(|event| matches!(event, AppEvent::ScrollToTop))
            .filter_map(|_| self.scroll.scroll_to_top())
            .collect()
    }

    /// Dismisses the screen and unsubscribes. The selection is cleared with it.
    pub fn dismiss(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
            debug!(
                transaction = %self.transaction.id,
                attached = self.selection.is_attached(),
                "Transaction detail dismissed"
            );
        }
        self.new_plan_sheet = None;
        self.selection.detach();
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::errors::{Error, ValidationError};
    use crate::test_utils::{sample_transaction, test_context};

    #[test]
    fn test_picker_hides_paid_off_plans() {
        let context = test_context();
        let screen = TransactionDetailScreen::mount(&context, sample_transaction());

        let names: Vec<String> = screen
            .plan_choices(&context.plans)
            .into_iter()
            .map(|plan| plan.name)
            .collect();
        assert_eq!(names, vec!["Unbilled - November", "Home Office Setup"]);
    }

    #[test]
    fn test_new_plan_flow_creates_and_selects() -> Result<()> {
        let mut context = test_context();
        let mut screen = TransactionDetailScreen::mount(&context, sample_transaction());

        screen.open_new_plan_sheet();
        screen.new_plan_sheet_mut().unwrap().set_name("Home Renovation");
        let plan = screen.confirm_new_plan(&mut context.plans)?.unwrap();

        assert!(screen.new_plan_sheet_mut().is_none());
        assert_eq!(screen.selection().selected(), Some(plan.id));
        assert_eq!(plan.total_amount, screen.transaction.amount);
        let names: Vec<&str> = context
            .plans
            .plans()
            .iter()
            .map(|plan| plan.name.as_str())
            .collect();
        assert_eq!(
            names,
            vec![
                "Unbilled - November",
                "Home Office Setup",
                "Home Renovation",
                "New Kitchen Appliances"
            ]
        );
        assert!(screen.selection_summary(&context.plans).unwrap().is_new_plan);
        Ok(())
    }

    #[test]
    fn test_empty_sheet_stays_open_and_store_unchanged() {
        let mut context = test_context();
        let mut screen = TransactionDetailScreen::mount(&context, sample_transaction());
        let before = context.plans.len();

        screen.open_new_plan_sheet();
        assert!(!screen.new_plan_sheet_mut().unwrap().can_submit());
        let result = screen.confirm_new_plan(&mut context.plans);

        assert!(matches!(
            result,
            Err(Error::Validation(ValidationError::EmptyName))
        ));
        assert!(screen.new_plan_sheet_mut().is_some());
        assert_eq!(context.plans.len(), before);
        assert!(!screen.selection().is_attached());
    }

    #[test]
    fn test_confirm_without_sheet_does_nothing() -> Result<()> {
        let mut context = test_context();
        let mut screen = TransactionDetailScreen::mount(&context, sample_transaction());
        assert_eq!(screen.confirm_new_plan(&mut context.plans)?, None);
        screen.open_new_plan_sheet();
        screen.cancel_new_plan_sheet();
        assert_eq!(screen.confirm_new_plan(&mut context.plans)?, None);
        Ok(())
    }

    #[test]
    fn test_choose_and_remove_existing_plan() -> Result<()> {
        let context = test_context();
        let mut screen = TransactionDetailScreen::mount(&context, sample_transaction());
        let office = screen.plan_choices(&context.plans)[1].clone();

        screen.choose_plan(&context.plans, office.id)?;
        assert_eq!(screen.selection().section_title(), "Added to Payment Plan");
        screen.remove_from_plan();
        assert_eq!(screen.selection().section_title(), "Add to Payment Plan");
        Ok(())
    }

    #[test]
    fn test_choosing_paid_off_plan_is_refused() {
        let context = test_context();
        let mut screen = TransactionDetailScreen::mount(&context, sample_transaction());
        let kitchen = context.plans.find_by_name("New Kitchen Appliances").unwrap();
        assert!(kitchen.is_paid_off());

        let result = screen.choose_plan(&context.plans, kitchen.id);

        assert!(matches!(result, Err(Error::PlanPaidOff { .. })));
        assert!(!screen.selection().is_attached());
        assert_eq!(screen.selection_summary(&context.plans), None);
        assert_eq!(screen.selection().section_title(), "Add to Payment Plan");
    }

    #[test]
    fn test_scroll_to_top_resets_detail_scroll() {
        let context = test_context();
        let mut screen = TransactionDetailScreen::mount(&context, sample_transaction());
        screen.scroll.report_offset(75.0);
        assert!(screen.scroll.is_collapsed());

        context.bus.publish(AppEvent::ScrollToTop);
        assert_eq!(
            screen.pump_events(),
            vec![ScrollReset { from_offset: 75.0 }]
        );
        assert!(!screen.scroll.is_collapsed());

        screen.dismiss();
        assert!(!screen.is_mounted());
        assert_eq!(context.bus.subscriber_count(), 0);
    }

    #[test]
    fn test_stacked_screen_leaves_scroll_to_its_host() {
        let context = test_context();
        let mut screen = TransactionDetailScreen::mount(&context, sample_transaction());
        screen.mark_stacked();
        screen.scroll.report_offset(60.0);

        context.bus.publish(AppEvent::ScrollToTop);
        assert!(screen.pump_events().is_empty());
        assert_eq!(screen.scroll.offset_pixels(), 60.0);
    }
}
