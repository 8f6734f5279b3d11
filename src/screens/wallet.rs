//! Wallet screen: the root of the wallet tab.
//!
//! The wallet owns the detail screens pushed on top of it. Popping one
//! dismisses it, which cancels any pending payment and unsubscribes it. On a
//! scroll-to-top signal the wallet pops every detail screen first. Only when it
//! is already at the root does it reset its own scroll.

use super::{AppContext, InvoiceDetailScreen, TransactionDetailScreen};
use crate::core::{
    events::{AppEvent, Subscription},
    navigation::{NavigationStack, Route},
    scroll::{ScrollCollapseController, ScrollReset},
};
use tracing::debug;

/// What the wallet did with an event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum WalletReaction {
    /// Detail screens were popped and dismissed; scroll left as is
    PoppedToRoot(usize),
    /// Already at the root; scroll reset, or `None` if it was already at top
    ScrolledToTop(Option<ScrollReset>),
    /// Not relevant to this screen
    Ignored,
}

/// A mounted detail screen pushed above the wallet.
#[derive(Debug)]
pub enum DetailScreen {
    /// Purchase detail
    Transaction(TransactionDetailScreen),
    /// Invoice detail
    Invoice(InvoiceDetailScreen),
}

impl DetailScreen {
    /// Route identifying the screen.
    #[must_use]
    pub const fn route(&self) -> Route {
        match self {
            Self::Transaction(screen) => Route::Transaction(screen.transaction.id),
            Self::Invoice(screen) => Route::Invoice(screen.invoice.id),
        }
    }

    /// Whether the screen still listens to the bus.
    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        match self {
            Self::Transaction(screen) => screen.is_mounted(),
            Self::Invoice(screen) => screen.is_mounted(),
        }
    }

    /// Tears the screen down.
    pub fn dismiss(&mut self) {
        match self {
            Self::Transaction(screen) => screen.dismiss(),
            Self::Invoice(screen) => screen.dismiss(),
        }
    }

    const fn mark_stacked(&mut self) {
        match self {
            Self::Transaction(screen) => screen.mark_stacked(),
            Self::Invoice(screen) => screen.mark_stacked(),
        }
    }
}

impl From<TransactionDetailScreen> for DetailScreen {
    fn from(screen: TransactionDetailScreen) -> Self {
        Self::Transaction(screen)
    }
}

impl From<InvoiceDetailScreen> for DetailScreen {
    fn from(screen: InvoiceDetailScreen) -> Self {
        Self::Invoice(screen)
    }
}

/// Root wallet screen state.
#[derive(Debug)]
pub struct WalletScreen {
    /// Header collapse state of the root list
    pub scroll: ScrollCollapseController,
    navigation: NavigationStack<DetailScreen>,
    subscription: Option<Subscription>,
}

impl WalletScreen {
    /// Mounts the screen and subscribes to the bus.
    #[must_use]
    pub fn mount(context: &AppContext) -> Self {
        Self {
            scroll: context.scroll_controller(),
            navigation: NavigationStack::new(),
            subscription: Some(context.bus.subscribe("wallet")),
        }
    }

    /// Whether the screen still listens to the bus.
    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        self.subscription.is_some()
    }

    /// Detail screens above the root.
    #[must_use]
    pub const fn navigation(&self) -> &NavigationStack<DetailScreen> {
        &self.navigation
    }

    /// Routes of the pushed detail screens, bottom first.
    #[must_use]
    pub fn routes(&self) -> Vec<Route> {
        self.navigation.iter().map(DetailScreen::route).collect()
    }

    /// Pushes a mounted detail screen. The wallet owns it until it is popped.
    pub fn open(&mut self, screen: impl Into<DetailScreen>) {
        let mut screen = screen.into();
        screen.mark_stacked();
        debug!(route = ?screen.route(), "Opening detail screen");
        self.navigation.push(screen);
    }

    /// The purchase detail on top, if that is what is showing.
    pub fn top_transaction_mut(&mut self) -> Option<&mut TransactionDetailScreen> {
        match self.navigation.top_mut() {
            Some(DetailScreen::Transaction(screen)) => Some(screen),
            _ => None,
        }
    }

    /// The invoice detail on top, if that is what is showing.
    pub fn top_invoice_mut(&mut self) -> Option<&mut InvoiceDetailScreen> {
        match self.navigation.top_mut() {
            Some(DetailScreen::Invoice(screen)) => Some(screen),
            _ => None,
        }
    }

    /// Back button on the top detail screen. Returns the dismissed screen.
    pub fn back(&mut self) -> Option<DetailScreen> {
        let mut screen = self.navigation.pop()?;
        screen.dismiss();
        Some(screen)
    }

    /// Pops and dismisses every detail screen, topmost first.
    pub fn pop_to_root(&mut self) -> Vec<DetailScreen> {
        let mut popped = self.navigation.pop_to_root();
        for screen in &mut popped {
            screen.dismiss();
        }
        popped
    }

    /// Applies one event.
    pub fn handle_event(&mut self, event: &AppEvent) -> WalletReaction {
        match event {
            AppEvent::ScrollToTop => {
                let popped = self.pop_to_root();
                if popped.is_empty() {
                    WalletReaction::ScrolledToTop(self.scroll.scroll_to_top())
                } else {
                    WalletReaction::PoppedToRoot(popped.len())
                }
            }
            AppEvent::PaymentCompleted(_) => WalletReaction::Ignored,
        }
    }

    /// Applies every buffered event in order.
    pub fn pump_events(&mut self) -> Vec<WalletReaction> {
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

    /// Dismisses every detail screen and unsubscribes.
    pub fn unmount(&mut self) {
        self.pop_to_root();
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
            debug!("Wallet screen unmounted");
        }
    }
}
