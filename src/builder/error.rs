//! Build errors for the context builder.

use thiserror::Error;

/// Errors that can occur when building a context.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BuildError {
    #[error("Domain value not specified. Call .domain(value) before .build()")]
    MissingDomain,
}
