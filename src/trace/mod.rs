//! Diagnostic trace records emitted by the engine.
//!
//! The engine reports what it does to an injected [`TraceSink`]. Sinks carry
//! no behavior back into the engine: swapping [`TracingSink`] for
//! [`NoopSink`] changes nothing but the log output.

mod sink;

pub use sink::{NoopSink, TraceSink, TracingSink};

use crate::context::QueueKind;
use crate::core::Outcome;
use serde::Serialize;
use std::fmt;

/// A single diagnostic record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TraceEvent {
    /// First state installed into an empty engine.
    Initialized { state: &'static str },

    /// Active state replaced.
    Transition {
        from: &'static str,
        to: &'static str,
    },

    /// An event is about to be handed to the active state's reaction.
    Delivering {
        state: &'static str,
        event: &'static str,
    },

    /// An event was offered to the active state (or to no state).
    ///
    /// Recorded once the reaction has returned, so records caused by the
    /// reaction (a transition and its drain) come before it. The matching
    /// `Delivering` record marks where the reaction started.
    Dispatched {
        state: Option<&'static str>,
        event: &'static str,
        outcome: Outcome,
    },

    /// A fresh event entered one of the queues.
    Enqueued {
        queue: QueueKind,
        event: &'static str,
        pending: usize,
    },

    /// A queued entry was put back during a drain pass.
    Requeued {
        queue: QueueKind,
        event: &'static str,
        pending: usize,
    },

    /// A queued entry left the engine for good.
    Dropped {
        event: &'static str,
        outcome: Outcome,
        pending: usize,
    },

    /// A drain pass started with this many merged entries.
    DrainPass { working: usize },
}

impl fmt::Display for TraceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Initialized { state } => write!(f, "[{state}] Initialize state"),
            Self::Transition { from, to } => write!(f, "[{from}] => [{to}] transition"),
            Self::Delivering { state, event } => write!(f, "[{state}] deliver {event}"),
            Self::Dispatched {
                state: Some(state),
                event,
                outcome,
            } => write!(f, "[{state}] react {event}: {outcome}"),
            Self::Dispatched {
                state: None,
                event,
                outcome,
            } => write!(f, "[-] react {event}: {outcome}"),
            Self::Enqueued {
                queue,
                event,
                pending,
            } => write!(f, "{queue} {event}. Queue size: {pending}"),
            Self::Requeued {
                queue,
                event,
                pending,
            } => write!(f, "re-{queue} {event}. Queue size: {pending}"),
            Self::Dropped {
                event,
                outcome,
                pending,
            } => write!(f, "drop {event} ({outcome}). Queue size: {pending}"),
            Self::DrainPass { working } => write!(f, "drain pass over {working} entries"),
        }
    }
}
