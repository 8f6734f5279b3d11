//! Navigation history and the tab bar's re-tap signal.

use super::events::{AppEvent, EventBus};
use crate::entities::{InvoiceId, TransactionId};
use tracing::debug;

/// A detail screen that can be pushed on top of a root screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    /// Purchase detail
    Transaction(TransactionId),
    /// Invoice detail
    Invoice(InvoiceId),
}

/// Pushed detail screens above a root screen, topmost last.
///
/// Entries are whatever the host keeps per pushed screen: a bare [`Route`] or
/// the mounted screen itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavigationStack<T> {
    entries: Vec<T>,
}

impl<T> Default for NavigationStack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> NavigationStack<T> {
    /// Empty stack, showing the root.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Shows `entry` on top.
    pub fn push(&mut self, entry: T) {
        self.entries.push(entry);
        debug!(depth = self.entries.len(), "Pushed screen");
    }

    /// Removes the top entry.
    pub fn pop(&mut self) -> Option<T> {
        self.entries.pop()
    }

    /// Removes every entry and hands them back, topmost first.
    pub fn pop_to_root(&mut self) -> Vec<T> {
        let popped: Vec<T> = self.entries.drain(..).rev().collect();
        if !popped.is_empty() {
            debug!(popped = popped.len(), "Popped to root");
        }
        popped
    }

    /// Entry currently on screen, `None` at the root.
    #[must_use]
    pub fn top(&self) -> Option<&T> {
        self.entries.last()
    }

    /// Mutable access to the entry on screen.
    pub fn top_mut(&mut self) -> Option<&mut T> {
        self.entries.last_mut()
    }

    /// Entries from the bottom of the stack up.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }

    /// Number of pushed entries.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    /// True when showing the root.
    #[must_use]
    pub fn is_at_root(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Top-level tabs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Tab {
    /// Cards, purchases and invoices
    #[default]
    Wallet,
    /// Accounts overview
    Accounts,
    /// Offers
    Explore,
    /// Support chat bubble
    Chat,
}

impl Tab {
    /// Tab label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Wallet => "Wallet",
            Self::Accounts => "Accounts",
            Self::Explore => "Explore",
            Self::Chat => "Chat",
        }
    }
}

/// Tab selection. Tapping the selected tab again asks its screen to scroll to top.
#[derive(Clone, Debug)]
pub struct TabBar {
    selected: Tab,
    bus: EventBus,
}

impl TabBar {
    /// Tab bar starting on the wallet.
    #[must_use]
    pub fn new(bus: EventBus) -> Self {
        Self {
            selected: Tab::default(),
            bus,
        }
    }

    /// Currently selected tab.
    #[must_use]
    pub const fn selected(&self) -> Tab {
        self.selected
    }

    /// Handles a tap. Returns `true` when a scroll-to-top was published.
    pub fn tap(&mut self, tab: Tab) -> bool {
        let retapped = tab == self.selected;
        if retapped {
            self.bus.publish(AppEvent::ScrollToTop);
        } else {
            debug!(from = self.selected.label(), to = tab.label(), "Switched tab");
        }
        self.selected = tab;
        retapped
    }
}
