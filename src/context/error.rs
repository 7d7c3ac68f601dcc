//! Domain access error types.

use thiserror::Error;

/// Errors returned when reaching the engine's domain value
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DomainError {
    /// The state is not bound to a live engine
    #[error("State is not bound to an engine")]
    Detached,

    /// Domain value is already borrowed further up the call stack
    #[error("Domain value is already borrowed by an enclosing call")]
    Busy,
}
