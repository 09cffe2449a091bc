//! Pending actions: mid-resolution decisions that wait on one player.
//!
//! While a pending action is open, only its actor may act, and only by
//! answering it through `Coordinator::accept`.

pub mod action;
pub mod coordinator;

pub use action::{Continuation, PendingAction, PendingInput, PendingKind, PendingTag, SwapPhase};
pub use coordinator::{Coordinator, Step};
