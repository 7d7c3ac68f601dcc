//! Core State trait for engine states.
//!
//! A domain declares its own state interface as a trait extending `State`,
//! with one reaction method per event type it cares about.

/// Identity shared by every state an engine can hold.
///
/// Domain state interfaces extend this trait and are used as trait objects
/// (`dyn MyStates`), so it must stay object safe.
///
/// # Example
///
/// ```rust
/// use reactive_fsm::core::{Outcome, State};
///
/// struct Click;
///
/// trait Door: State + Send {
///     fn on_click(&mut self, _click: &Click) -> Outcome {
///         Outcome::UnconsumedEvent
///     }
/// }
///
/// struct Closed;
///
/// impl State for Closed {
///     fn name(&self) -> &str {
///         "Closed"
///     }
/// }
///
/// impl Door for Closed {}
///
/// let mut door: Box<dyn Door> = Box::new(Closed);
/// assert_eq!(door.name(), "Closed");
/// assert_eq!(door.on_click(&Click), Outcome::UnconsumedEvent);
/// ```
pub trait State {
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;
}
