//! Core engine types.
//!
//! This module contains the pure vocabulary shared by every engine:
//! - The `Outcome` of offering an event to a state
//! - The `State` identity trait
//! - The `Event` trait routing an event to its reaction
//!
//! Nothing in here touches queues or locks; that lives in `context`.

mod event;
mod outcome;
mod state;

pub use event::Event;
pub use outcome::Outcome;
pub use state::State;
