//! Core state logic - framework-agnostic scroll, plan, event and payment handling.

/// Purchase-to-plan selection and the new-plan form
pub mod attachment;
/// Typed publish/subscribe bus between screens
pub mod events;
/// Navigation history and tab re-tap handling
pub mod navigation;
/// Simulated, cancellable payment processing
pub mod payment;
/// Session-wide plan store
pub mod plan;
/// Scroll-driven header collapse
pub mod scroll;
