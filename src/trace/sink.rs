//! Sinks receiving engine trace records.

use super::TraceEvent;

/// Receiver for engine diagnostics.
///
/// Called synchronously while the engine lock is held, so implementations
/// should be quick and must not call back into the engine.
pub trait TraceSink: Send + Sync {
    /// Record one trace event.
    fn record(&self, event: &TraceEvent);
}

/// Forwards trace records to the `tracing` ecosystem.
///
/// State changes are logged at `debug`, queue decisions at `trace`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl TraceSink for TracingSink {
    fn record(&self, event: &TraceEvent) {
        match event {
            TraceEvent::Initialized { state } => {
                tracing::debug!(state = %state, "{event}");
            }
            TraceEvent::Transition { from, to } => {
                tracing::debug!(from = %from, to = %to, "{event}");
            }
            TraceEvent::Delivering { state, event: name } => {
                tracing::trace!(state = %state, event = %name, "{event}");
            }
            TraceEvent::Dispatched {
                state,
                event: name,
                outcome,
            } => {
                tracing::trace!(
                    state = state.unwrap_or("-"),
                    event = %name,
                    outcome = %outcome.as_str(),
                    "{event}"
                );
            }
            TraceEvent::Enqueued { queue, pending, .. }
            | TraceEvent::Requeued { queue, pending, .. } => {
                tracing::trace!(queue = %queue, pending = *pending, "{event}");
            }
            TraceEvent::Dropped {
                outcome, pending, ..
            } => {
                tracing::trace!(outcome = %outcome.as_str(), pending = *pending, "{event}");
            }
            TraceEvent::DrainPass { working } => {
                tracing::trace!(working = *working, "{event}");
            }
        }
    }
}

/// Discards every trace record.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {
    fn record(&self, _event: &TraceEvent) {}
}
