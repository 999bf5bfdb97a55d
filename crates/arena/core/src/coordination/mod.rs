//! Team-wide coordination over the shared integer array.
//!
//! The array is the only channel between agents. It offers no atomicity across
//! cells and no ordering between agents beyond the host's scheduling order, so
//! the protocol relies on two rules instead of locking:
//!
//! - a registered target is only ever replaced by a strictly better one, and
//! - any agent that can see the registered cell and finds it empty clears it.
pub mod evaluator;
pub mod register;
