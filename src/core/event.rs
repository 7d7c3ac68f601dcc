//! Routing of typed events to state reactions.

use super::outcome::Outcome;

/// An event that knows which reaction of `S` handles it.
///
/// `S` is normally a domain trait object such as `dyn Arith`. Each event type
/// forwards to its own method on that trait, so every reaction can be
/// overridden independently and anything not overridden falls back to
/// [`Outcome::UnconsumedEvent`]. The [`reactions!`](crate::reactions) macro
/// writes these impls.
///
/// Spell the parameter of a hand-written impl for `dyn Trait` as
/// `&mut (dyn Trait + 'static)`: `dyn Trait` in the impl header is
/// `'static`, and a bare `&mut dyn Trait` would not match it.
///
/// Events are moved into the engine's queues when they are deferred or
/// posted, hence the `Send + 'static` bound.
///
/// # Example
///
/// ```rust
/// use reactive_fsm::core::{Event, Outcome, State};
///
/// struct Ping;
///
/// trait Link: State + Send {
///     fn on_ping(&mut self, _ping: &Ping) -> Outcome {
///         Outcome::UnconsumedEvent
///     }
/// }
///
/// impl Event<dyn Link> for Ping {
///     fn deliver(&self, state: &mut (dyn Link + 'static)) -> Outcome {
///         state.on_ping(self)
///     }
/// }
/// ```
pub trait Event<S: ?Sized>: Send + 'static {
    /// Offer this event to `state` and report what it did with it.
    fn deliver(&self, state: &mut S) -> Outcome;
}
