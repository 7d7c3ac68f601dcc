//! The engine: one active state, two priority queues and the drain loop.
//!
//! # Key Concepts
//!
//! - **Context**: owns the active state, the posted/deferred queues and a
//!   domain value the states work on
//! - **Binding**: each state's link back to its context, through which a
//!   reaction transits, defers, discards or posts
//! - **Drain pass**: posted entries first, then deferred ones; any transition
//!   or repost interrupts the pass and starts a fresh one
//!
//! # Locking
//!
//! One reentrant lock serializes everything, including reads of the active
//! state. A reaction runs with the lock held and may call back into the
//! engine on the same thread; another thread blocks until the outermost call
//! has settled.

mod binding;
mod error;
mod queue;
mod shared;

pub use binding::{Binding, Enter};
pub use error::DomainError;
pub use queue::QueueKind;

use crate::builder::ContextBuilder;
use crate::core::{Event, Outcome, State};
use crate::trace::{TraceSink, TracingSink};
use shared::Shared;
use std::fmt;
use std::sync::Arc;

/// Reactive state machine engine.
///
/// `S` is the domain's state interface (usually `dyn SomeTrait`), `D` the
/// domain value reactions reach through [`Binding::with_domain`]. Cloning a
/// `Context` yields another handle to the same engine.
pub struct Context<S: ?Sized, D = ()> {
    shared: Arc<Shared<S, D>>,
}

impl<S: ?Sized + State + 'static, D: 'static> Context<S, D> {
    /// Create an engine with no active state that logs through `tracing`.
    pub fn new(domain: D) -> Self {
        Self::with_sink(domain, Arc::new(TracingSink))
    }

    /// Create an engine reporting to a custom trace sink.
    pub fn with_sink(domain: D, sink: Arc<dyn TraceSink>) -> Self {
        Self {
            shared: Arc::new(Shared::new(domain, sink)),
        }
    }

    /// Start a builder.
    pub fn builder() -> ContextBuilder<S, D> {
        ContextBuilder::new()
    }

    /// Offer `event` to the active state and act on the outcome.
    ///
    /// - `DeferredEvent`: the event is queued as deferred, nothing drains
    /// - `TransitState`: a drain pass runs
    /// - `PostedEvent`: the event is queued as posted, then a drain pass runs
    /// - anything else: no further action
    ///
    /// Without an active state this returns `UnknownState` and the event is
    /// dropped.
    ///
    /// The same happens when this is called from inside a reaction of the
    /// active state: that state is in use by the running reaction, so the
    /// nested call finds no state to deliver to. It returns `UnknownState`
    /// and the event is lost, even though [`current_state_name`] still
    /// reports the state. Reactions should use [`Binding::post_event`] or a
    /// transition instead.
    ///
    /// [`current_state_name`]: Self::current_state_name
    pub fn process_event<E: Event<S>>(&self, event: E) -> Outcome {
        self.shared.process_event(event)
    }

    /// Queue `event` with high priority.
    ///
    /// Nothing is dispatched until the next drain, triggered by a transition
    /// or by a `process_event` that transits or posts.
    pub fn post_event<E: Event<S>>(&self, event: E) {
        self.shared.post_event(event);
    }

    /// Replace the active state (if any) with a fresh `N` and run a drain
    /// pass, even when both queues are empty.
    pub fn transit<N: Enter<S, D>>(&self) {
        self.shared.transit::<N>();
    }

    /// Registered name of the active state.
    pub fn current_state_name(&self) -> Option<&'static str> {
        self.shared.current_state_name()
    }

    /// Inspect the active state.
    ///
    /// Returns `None` before the first transition, and when called from one
    /// of the active state's own reactions (the instance is in use). In the
    /// latter case `current_state_name` still returns the state's name.
    ///
    /// If a reaction panics and the panic is caught, the state it ran on is
    /// gone: both this and `current_state_name` report no state until the
    /// next transition.
    pub fn with_current_state<R>(&self, f: impl FnOnce(&S) -> R) -> Option<R> {
        self.shared.with_current_state(f)
    }

    /// Run `f` against the domain value.
    pub fn with_domain<R>(&self, f: impl FnOnce(&mut D) -> R) -> Result<R, DomainError> {
        self.shared.with_domain(f)
    }

    /// Entries waiting in the posted queue.
    pub fn posted_len(&self) -> usize {
        self.shared.posted_len()
    }

    /// Entries waiting in the deferred queue.
    pub fn deferred_len(&self) -> usize {
        self.shared.deferred_len()
    }

    /// Entries held anywhere in the engine, including those left in the
    /// working queue by an interrupted pass.
    pub fn pending_len(&self) -> usize {
        self.shared.pending_len()
    }
}

impl<S: ?Sized, D> Clone for Context<S, D> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<S: ?Sized + State + 'static, D: 'static> fmt::Debug for Context<S, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("state", &self.current_state_name())
            .field("pending", &self.pending_len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::{NoopSink, TraceEvent};
    use parking_lot::Mutex;
    use std::any::type_name;
    use std::panic::{self, AssertUnwindSafe};

    #[derive(Clone, Copy, Debug, PartialEq)]
    struct Knock(u32);

    #[derive(Clone, Copy, Debug, PartialEq)]
    struct Leave;

    #[derive(Clone, Copy, Debug, PartialEq)]
    struct Slam;

    trait Room: State + Send {
        fn on_knock(&mut self, _knock: &Knock) -> Outcome {
            Outcome::UnconsumedEvent
        }

        fn on_leave(&mut self, _leave: &Leave) -> Outcome {
            Outcome::UnconsumedEvent
        }

        fn on_slam(&mut self, _slam: &Slam) -> Outcome {
            Outcome::UnconsumedEvent
        }
    }

    crate::reactions! {
        dyn Room {
            Knock => on_knock,
            Leave => on_leave,
            Slam => on_slam,
        }
    }

    /// Knocks seen, as (state, knock id).
    type Visits = Vec<(&'static str, u32)>;

    struct Empty {
        binding: Binding<dyn Room, Visits>,
    }

    impl State for Empty {
        fn name(&self) -> &str {
            self.binding.name()
        }
    }

    impl Room for Empty {
        fn on_knock(&mut self, knock: &Knock) -> Outcome {
            let _ = self.binding.with_domain(|v| v.push(("Empty", knock.0)));
            self.binding.defer_event()
        }

        fn on_leave(&mut self, _leave: &Leave) -> Outcome {
            self.binding.transit::<Occupied>()
        }
    }

    impl Enter<dyn Room, Visits> for Empty {
        const NAME: &'static str = "Empty";

        fn enter(binding: Binding<dyn Room, Visits>) -> Box<dyn Room> {
            Box::new(Empty { binding })
        }
    }

    struct Occupied {
        binding: Binding<dyn Room, Visits>,
    }

    impl State for Occupied {
        fn name(&self) -> &str {
            self.binding.name()
        }
    }

    impl Room for Occupied {
        fn on_knock(&mut self, knock: &Knock) -> Outcome {
            let _ = self.binding.with_domain(|v| v.push(("Occupied", knock.0)));
            self.binding.discard_event()
        }

        fn on_leave(&mut self, _leave: &Leave) -> Outcome {
            self.binding.transit::<Empty>()
        }

        fn on_slam(&mut self, _slam: &Slam) -> Outcome {
            panic!("door slammed");
        }
    }

    impl Enter<dyn Room, Visits> for Occupied {
        const NAME: &'static str = "Occupied";

        fn enter(binding: Binding<dyn Room, Visits>) -> Box<dyn Room> {
            Box::new(Occupied { binding })
        }
    }

    #[derive(Default)]
    struct Recorder(Mutex<Vec<TraceEvent>>);

    impl TraceSink for Recorder {
        fn record(&self, event: &TraceEvent) {
            self.0.lock().push(event.clone());
        }
    }

    fn room() -> Context<dyn Room, Visits> {
        Context::with_sink(Vec::new(), Arc::new(NoopSink))
    }

    #[test]
    fn no_state_yields_unknown_state_and_queues_nothing() {
        let ctx = room();
        assert_eq!(ctx.current_state_name(), None);
        assert_eq!(ctx.process_event(Knock(1)), Outcome::UnknownState);
        assert_eq!(ctx.pending_len(), 0);
    }

    #[test]
    fn transit_installs_named_state() {
        let ctx = room();
        ctx.transit::<Empty>();
        assert_eq!(ctx.current_state_name(), Some("Empty"));
        assert_eq!(ctx.with_current_state(|s| s.name().to_string()), Some("Empty".to_string()));

        ctx.transit::<Occupied>();
        assert_eq!(ctx.current_state_name(), Some("Occupied"));
    }

    #[test]
    fn deferred_event_waits_for_transition() {
        let ctx = room();
        ctx.transit::<Empty>();

        assert_eq!(ctx.process_event(Knock(7)), Outcome::DeferredEvent);
        assert_eq!(ctx.deferred_len(), 1);

        assert_eq!(ctx.process_event(Leave), Outcome::TransitState);
        assert_eq!(ctx.current_state_name(), Some("Occupied"));
        assert_eq!(ctx.pending_len(), 0);
        assert_eq!(
            ctx.with_domain(|v| v.clone()).unwrap(),
            vec![("Empty", 7), ("Occupied", 7)]
        );
    }

    #[test]
    fn post_event_alone_does_not_dispatch() {
        let ctx = room();
        ctx.transit::<Occupied>();

        ctx.post_event(Knock(3));
        assert_eq!(ctx.posted_len(), 1);
        assert!(ctx.with_domain(|v| v.is_empty()).unwrap());

        ctx.transit::<Occupied>();
        assert_eq!(ctx.posted_len(), 0);
        assert_eq!(ctx.with_domain(|v| v.clone()).unwrap(), vec![("Occupied", 3)]);
    }

    #[test]
    fn unconsumed_and_discarded_leave_queues_empty() {
        let ctx = room();
        ctx.transit::<Occupied>();
        assert_eq!(ctx.process_event(Knock(1)), Outcome::DiscardedEvent);
        ctx.transit::<Empty>();
        ctx.transit::<Occupied>();
        assert_eq!(ctx.pending_len(), 0);
    }

    #[test]
    fn clones_share_one_engine() {
        let ctx = room();
        let other = ctx.clone();
        ctx.transit::<Empty>();
        assert_eq!(other.current_state_name(), Some("Empty"));
    }

    #[test]
    fn nested_domain_access_is_refused() {
        let ctx = room();
        let inner = ctx.clone();
        let nested = ctx.with_domain(|_| inner.with_domain(|_| ())).unwrap();
        assert_eq!(nested, Err(DomainError::Busy));
    }

    #[test]
    fn sink_sees_initialization_and_transition() {
        let recorder = Arc::new(Recorder::default());
        let ctx: Context<dyn Room, Visits> = Context::with_sink(Vec::new(), recorder.clone());

        ctx.transit::<Empty>();
        ctx.process_event(Leave);

        let events = recorder.0.lock().clone();
        assert!(events.contains(&TraceEvent::Initialized { state: "Empty" }));
        assert!(events.contains(&TraceEvent::Transition {
            from: "Empty",
            to: "Occupied",
        }));
    }

    #[test]
    fn delivery_is_recorded_before_the_transition_it_causes() {
        let recorder = Arc::new(Recorder::default());
        let ctx: Context<dyn Room, Visits> = Context::with_sink(Vec::new(), recorder.clone());

        ctx.transit::<Empty>();
        ctx.process_event(Leave);

        let events = recorder.0.lock().clone();
        let leave = type_name::<Leave>();
        let position = |wanted: TraceEvent| events.iter().position(|e| *e == wanted);

        let delivering = position(TraceEvent::Delivering {
            state: "Empty",
            event: leave,
        });
        let transition = position(TraceEvent::Transition {
            from: "Empty",
            to: "Occupied",
        });
        let dispatched = position(TraceEvent::Dispatched {
            state: Some("Empty"),
            event: leave,
            outcome: Outcome::TransitState,
        });

        assert!(delivering.is_some() && transition.is_some() && dispatched.is_some());
        assert!(delivering < transition);
        assert!(transition < dispatched);
    }

    #[test]
    fn panicking_reaction_leaves_no_active_state() {
        let ctx = room();
        ctx.transit::<Occupied>();

        let caught = panic::catch_unwind(AssertUnwindSafe(|| ctx.process_event(Slam)));
        assert!(caught.is_err());

        assert_eq!(ctx.current_state_name(), None);
        assert!(ctx.with_current_state(|_| ()).is_none());
        assert_eq!(ctx.process_event(Knock(1)), Outcome::UnknownState);

        ctx.transit::<Empty>();
        assert_eq!(ctx.current_state_name(), Some("Empty"));
    }

    #[test]
    fn debug_reports_state_and_pending() {
        let ctx = room();
        ctx.transit::<Empty>();
        ctx.process_event(Knock(1));
        assert_eq!(
            format!("{ctx:?}"),
            "Context { state: Some(\"Empty\"), pending: 1 }"
        );
    }

    #[test]
    fn context_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Context<dyn Room, Visits>>();
    }
}
