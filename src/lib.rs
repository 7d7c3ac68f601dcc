//! Reactive FSM: an embeddable reactive state machine engine
//!
//! A single active state handles typed events. For each event it may discard
//! it, defer it until the state changes, re-post it with high priority, or
//! transition the engine to a new state. Posted events always run before
//! deferred ones, and any transition restarts queue processing under the new
//! state.
//!
//! # Core Concepts
//!
//! - **Outcome**: what a state did with an event, also the engine's only
//!   error channel
//! - **State / Event**: a domain trait with one reaction per event type, and
//!   the routing from each event type to its reaction
//! - **Binding**: a state's link back to its engine (`transit`, `defer_event`,
//!   `discard_event`, `post_event`)
//! - **Context**: the engine owning the active state and the posted/deferred
//!   queues
//!
//! # Example
//!
//! ```rust
//! use reactive_fsm::context::{Binding, Context, Enter};
//! use reactive_fsm::core::{Outcome, State};
//! use reactive_fsm::reactions;
//!
//! pub struct Coin;
//! pub struct Push;
//!
//! pub trait Turnstile: State + Send {
//!     fn on_coin(&mut self, _ev: &Coin) -> Outcome {
//!         Outcome::UnconsumedEvent
//!     }
//!
//!     fn on_push(&mut self, _ev: &Push) -> Outcome {
//!         Outcome::UnconsumedEvent
//!     }
//! }
//!
//! reactions! {
//!     dyn Turnstile {
//!         Coin => on_coin,
//!         Push => on_push,
//!     }
//! }
//!
//! struct Locked {
//!     binding: Binding<dyn Turnstile, u32>,
//! }
//!
//! struct Unlocked {
//!     binding: Binding<dyn Turnstile, u32>,
//! }
//!
//! impl State for Locked {
//!     fn name(&self) -> &str {
//!         self.binding.name()
//!     }
//! }
//!
//! impl State for Unlocked {
//!     fn name(&self) -> &str {
//!         self.binding.name()
//!     }
//! }
//!
//! impl Turnstile for Locked {
//!     fn on_coin(&mut self, _ev: &Coin) -> Outcome {
//!         self.binding.transit::<Unlocked>()
//!     }
//! }
//!
//! impl Turnstile for Unlocked {
//!     fn on_push(&mut self, _ev: &Push) -> Outcome {
//!         let _ = self.binding.with_domain(|passed| *passed += 1);
//!         self.binding.transit::<Locked>()
//!     }
//! }
//!
//! impl Enter<dyn Turnstile, u32> for Locked {
//!     const NAME: &'static str = "Locked";
//!
//!     fn enter(binding: Binding<dyn Turnstile, u32>) -> Box<dyn Turnstile> {
//!         Box::new(Locked { binding })
//!     }
//! }
//!
//! impl Enter<dyn Turnstile, u32> for Unlocked {
//!     const NAME: &'static str = "Unlocked";
//!
//!     fn enter(binding: Binding<dyn Turnstile, u32>) -> Box<dyn Turnstile> {
//!         Box::new(Unlocked { binding })
//!     }
//! }
//!
//! let gate: Context<dyn Turnstile, u32> = Context::new(0);
//! gate.transit::<Locked>();
//!
//! assert_eq!(gate.process_event(Push), Outcome::UnconsumedEvent);
//! assert_eq!(gate.process_event(Coin), Outcome::TransitState);
//! assert_eq!(gate.process_event(Push), Outcome::TransitState);
//! assert_eq!(gate.current_state_name(), Some("Locked"));
//! assert_eq!(gate.with_domain(|passed| *passed).unwrap(), 1);
//! ```

pub mod builder;
pub mod context;
pub mod core;
pub mod trace;

// Re-export commonly used types
pub use crate::builder::{BuildError, ContextBuilder};
pub use crate::context::{Binding, Context, DomainError, Enter, QueueKind};
pub use crate::core::{Event, Outcome, State};
pub use crate::trace::{NoopSink, TraceEvent, TraceSink, TracingSink};
