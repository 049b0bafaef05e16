//! Reactive state primitives shared by every store.
//!
//! - [`StateContainer`]: one value, replay-on-subscribe, synchronous in-order
//!   fan-out after each `set`/`update`.
//! - [`Subscription`]: unregister handle; unsubscribes on drop.
//! - [`RequestSequence`]: tickets that let a store ignore out-of-date fetch
//!   responses.
//! - [`optimistic`]: apply a change locally before the remote call and revert
//!   it if the call fails.
//!
//! # Invariants
//!
//! 1. A subscriber receives one replay at subscribe time, then exactly one
//!    notification per later change, in the order changes were applied.
//! 2. Subscribers are notified in registration order.
//! 3. Nothing is delivered to a subscription after `unsubscribe` returns.
//! 4. Readers never see a partially written value.

pub mod container;
pub mod optimistic;
pub mod sequence;

pub use container::{StateContainer, Subscription};
pub use optimistic::optimistic;
pub use sequence::{RequestSequence, Ticket};
