//! Outcome of offering an event to a state.
//!
//! The engine has no separate error channel: this enumeration carries both
//! the normal control values and the two non-fatal misuse conditions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What happened when an event was offered to the active state.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Outcome {
    /// A transition was requested from a state that is not bound to an engine.
    UnknownContext,

    /// The event arrived while the engine had no active state.
    UnknownState,

    /// The state has no reaction for this event type.
    UnconsumedEvent,

    /// The event should be retried later, after other work.
    DeferredEvent,

    /// The event is fully handled and can be dropped.
    DiscardedEvent,

    /// The event must be processed again with high priority.
    PostedEvent,

    /// The active state was replaced while handling the event.
    TransitState,
}

impl Outcome {
    /// All outcomes, in declaration order.
    pub const ALL: [Outcome; 7] = [
        Outcome::UnknownContext,
        Outcome::UnknownState,
        Outcome::UnconsumedEvent,
        Outcome::DeferredEvent,
        Outcome::DiscardedEvent,
        Outcome::PostedEvent,
        Outcome::TransitState,
    ];

    /// Returns `true` for the two misuse conditions.
    ///
    /// Neither is fatal: the event is dropped and processing continues.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::UnknownContext | Self::UnknownState)
    }

    /// Returns `true` if the event goes back into a queue.
    pub fn requeues(&self) -> bool {
        matches!(self, Self::DeferredEvent | Self::PostedEvent)
    }

    /// Returns `true` if this outcome stops the current drain pass.
    pub fn interrupts_drain(&self) -> bool {
        matches!(self, Self::TransitState | Self::PostedEvent)
    }

    /// Stable name of the variant.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnknownContext => "UnknownContext",
            Self::UnknownState => "UnknownState",
            Self::UnconsumedEvent => "UnconsumedEvent",
            Self::DeferredEvent => "DeferredEvent",
            Self::DiscardedEvent => "DiscardedEvent",
            Self::PostedEvent => "PostedEvent",
            Self::TransitState => "TransitState",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Outcome::{}", self.as_str())
    }
}
