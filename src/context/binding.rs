//! The state wrapper: identity plus the primitives a reaction may use.

use super::error::DomainError;
use super::shared::Shared;
use crate::core::{Event, Outcome, State};
use std::fmt;
use std::sync::Weak;

/// Constructor the engine uses when it transitions to a state type.
///
/// `NAME` is the identity the engine reports for the state (its
/// registered name). `enter` receives the binding the new instance must
/// keep to reach its engine.
///
/// ```rust
/// use reactive_fsm::context::{Binding, Enter};
/// use reactive_fsm::core::State;
///
/// trait Lamp: State + Send {}
///
/// struct Off {
///     binding: Binding<dyn Lamp>,
/// }
///
/// impl State for Off {
///     fn name(&self) -> &str {
///         self.binding.name()
///     }
/// }
///
/// impl Lamp for Off {}
///
/// impl Enter<dyn Lamp> for Off {
///     const NAME: &'static str = "Off";
///
///     fn enter(binding: Binding<dyn Lamp>) -> Box<dyn Lamp> {
///         Box::new(Off { binding })
///     }
/// }
/// ```
pub trait Enter<S: ?Sized, D = ()>: 'static {
    /// Registered name of the state.
    const NAME: &'static str;

    /// Build the state around the engine-issued binding.
    fn enter(binding: Binding<S, D>) -> Box<S>;
}

/// A state's link back to the engine that owns it.
///
/// Handed out by the engine when it constructs a state and never reassigned.
/// The link is weak: once the engine is gone, or for a binding made with
/// [`Binding::detached`], every primitive that needs the engine degrades to
/// [`Outcome::UnknownContext`] or a no-op.
pub struct Binding<S: ?Sized, D = ()> {
    name: &'static str,
    context: Weak<Shared<S, D>>,
}

impl<S: ?Sized, D> Binding<S, D> {
    pub(crate) fn bound(name: &'static str, context: Weak<Shared<S, D>>) -> Self {
        Self { name, context }
    }

    /// A binding that belongs to no engine.
    pub fn detached(name: &'static str) -> Self {
        Self {
            name,
            context: Weak::new(),
        }
    }

    /// Name of the state holding this binding.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether the owning engine is still alive.
    pub fn is_bound(&self) -> bool {
        self.context.strong_count() > 0
    }

    /// Mark the current event for retry after the next state change.
    pub fn defer_event(&self) -> Outcome {
        Outcome::DeferredEvent
    }

    /// Mark the current event as fully handled.
    pub fn discard_event(&self) -> Outcome {
        Outcome::DiscardedEvent
    }
}

impl<S: ?Sized + State + 'static, D: 'static> Binding<S, D> {
    /// Replace the engine's active state with a fresh `N`.
    ///
    /// The state calling this is finished: the engine drops it as soon as the
    /// running reaction returns, so the reaction should return the outcome
    /// straight away. Pending events are drained under `N` before this call
    /// returns.
    pub fn transit<N: Enter<S, D>>(&self) -> Outcome {
        self.transit_impl::<N>(false)
    }

    /// Like [`transit`](Self::transit), and additionally asks for the event
    /// being handled to be posted to `N` once the transition settles.
    ///
    /// The engine performs the repost when it sees
    /// [`Outcome::PostedEvent`].
    pub fn transit_posting<N: Enter<S, D>>(&self) -> Outcome {
        self.transit_impl::<N>(true)
    }

    fn transit_impl<N: Enter<S, D>>(&self, post_current: bool) -> Outcome {
        let Some(context) = self.context.upgrade() else {
            return Outcome::UnknownContext;
        };

        context.transit::<N>();

        if post_current {
            Outcome::PostedEvent
        } else {
            Outcome::TransitState
        }
    }

    /// Queue `event` with high priority on the owning engine.
    ///
    /// Does not drain; the event runs at the next transition or drain.
    pub fn post_event<E: Event<S>>(&self, event: E) {
        if let Some(context) = self.context.upgrade() {
            context.post_event(event);
        }
    }

    /// Run `f` against the engine's domain value.
    pub fn with_domain<R>(&self, f: impl FnOnce(&mut D) -> R) -> Result<R, DomainError> {
        let context = self.context.upgrade().ok_or(DomainError::Detached)?;
        context.with_domain(f)
    }
}

impl<S: ?Sized, D> fmt::Debug for Binding<S, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("name", &self.name)
            .field("bound", &self.is_bound())
            .finish()
    }
}
