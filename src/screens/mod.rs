//! Screen layer - state holders for the wallet and detail screens.
//!
//! Screens own their scroll controller, navigation and event subscription.
//! Shared state lives in [`AppContext`] and is passed in by reference.

/// Root wallet screen with its navigation stack
pub mod wallet;
/// Purchase detail with the plan picker
pub mod transaction;
/// Invoice detail with the payment sheet
pub mod invoice;

use crate::{
    config::{plans::Config, settings::Settings},
    core::{
        events::EventBus,
        navigation::TabBar,
        payment::PaymentProcessor,
        plan::PlanStore,
        scroll::ScrollCollapseController,
    },
    entities::PlanRecord,
    errors::Result,
};

pub use invoice::InvoiceDetailScreen;
pub use transaction::TransactionDetailScreen;
pub use wallet::{DetailScreen, WalletScreen};

/// Shared state handed to every screen.
#[derive(Debug)]
pub struct AppContext {
    /// Runtime settings
    pub settings: Settings,
    /// Session-wide plan store
    pub plans: PlanStore,
    /// Cross-screen event bus
    pub bus: EventBus,
    /// Simulated payment processor publishing on `bus`
    pub payments: PaymentProcessor,
}

impl AppContext {
    /// Context with an explicit set of seed plans.
    #[must_use]
    pub fn new(settings: Settings, seed: Vec<PlanRecord>) -> Self {
        let bus = EventBus::new();
        let payments = PaymentProcessor::new(bus.clone(), settings.payment_delay);
        let plans = PlanStore::with_plans(seed, settings.plan_ordering);
        Self {
            settings,
            plans,
            bus,
            payments,
        }
    }

    /// Context seeded from a parsed config file.
    pub fn from_config(settings: Settings, config: Config) -> Result<Self> {
        let seed = config.into_records()?;
        Ok(Self::new(settings, seed))
    }

    /// A fresh scroll controller using the configured collapse distance.
    #[must_use]
    pub fn scroll_controller(&self) -> ScrollCollapseController {
        ScrollCollapseController::new(self.settings.collapse_distance)
    }

    /// Tab bar publishing on this context's bus.
    #[must_use]
    pub fn tab_bar(&self) -> TabBar {
        TabBar::new(self.bus.clone())
    }
}
