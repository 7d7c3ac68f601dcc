//! Builder API for ergonomic context construction.
//!
//! This module provides a fluent builder for engines and the `reactions!`
//! macro that wires event types to state trait methods.

pub mod error;
pub mod macros;

pub use error::BuildError;

use crate::context::{Context, Enter};
use crate::core::State;
use crate::trace::{NoopSink, TraceSink, TracingSink};
use std::sync::Arc;

/// Builder for constructing contexts with a fluent API.
///
/// # Example
///
/// ```
/// use reactive_fsm::builder::ContextBuilder;
/// use reactive_fsm::context::{Binding, Enter};
/// use reactive_fsm::core::State;
///
/// trait Valve: State + Send {}
///
/// struct Shut {
///     binding: Binding<dyn Valve, u32>,
/// }
///
/// impl State for Shut {
///     fn name(&self) -> &str {
///         self.binding.name()
///     }
/// }
///
/// impl Valve for Shut {}
///
/// impl Enter<dyn Valve, u32> for Shut {
///     const NAME: &'static str = "Shut";
///
///     fn enter(binding: Binding<dyn Valve, u32>) -> Box<dyn Valve> {
///         Box::new(Shut { binding })
///     }
/// }
///
/// let ctx = ContextBuilder::<dyn Valve, u32>::new()
///     .domain(0)
///     .silent()
///     .initial::<Shut>()
///     .build()
///     .unwrap();
///
/// assert_eq!(ctx.current_state_name(), Some("Shut"));
/// ```
pub struct ContextBuilder<S: ?Sized, D> {
    domain: Option<D>,
    sink: Option<Arc<dyn TraceSink>>,
    initial: Option<fn(&Context<S, D>)>,
}

impl<S: ?Sized + State + 'static, D: 'static> ContextBuilder<S, D> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            domain: None,
            sink: None,
            initial: None,
        }
    }

    /// Set the domain value (required).
    pub fn domain(mut self, domain: D) -> Self {
        self.domain = Some(domain);
        self
    }

    /// Report trace events to `sink` instead of `tracing`.
    pub fn sink(mut self, sink: Arc<dyn TraceSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Drop all trace events.
    pub fn silent(self) -> Self {
        self.sink(Arc::new(NoopSink))
    }

    /// Transit to `N` as part of `build` (optional).
    pub fn initial<N: Enter<S, D>>(mut self) -> Self {
        self.initial = Some(|ctx: &Context<S, D>| ctx.transit::<N>());
        self
    }

    /// Build the context.
    /// Returns an error if required fields are missing.
    pub fn build(self) -> Result<Context<S, D>, BuildError> {
        let domain = self.domain.ok_or(BuildError::MissingDomain)?;
        let sink: Arc<dyn TraceSink> = match self.sink {
            Some(sink) => sink,
            None => Arc::new(TracingSink),
        };

        let ctx = Context::with_sink(domain, sink);
        if let Some(initial) = self.initial {
            initial(&ctx);
        }

        Ok(ctx)
    }
}

impl<S: ?Sized + State + 'static, D: 'static> Default for ContextBuilder<S, D> {
    fn default() -> Self {
        Self::new()
    }
}
