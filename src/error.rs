//! Crate-wide error type.
//!
//! Most of the failure taxonomy this engine deals with (out-of-support
//! conditioning, a false `condition`, an empty free-variable set, log-space
//! under/overflow) is handled in-band by the kernels as a rejected proposal,
//! not surfaced as a [`Result`] — see the module docs on [`crate::kernel`].
//! The one case that genuinely cannot be resolved that way is rejection
//! initialization never finding a condition-satisfying execution.

use thiserror::Error;

/// Errors raised by the driver and trace machinery.
#[derive(Debug, Error)]
pub enum TraceError {
    /// Rejection initialization exhausted its retry budget without ever
    /// producing an execution with `conditions_satisfied() == true`.
    ///
    /// The source engine this crate is modeled on loops forever here; a
    /// library should not hang silently, so rejection initialization is
    /// bounded by a retry budget instead.
    #[error(
        "rejection initialization did not satisfy conditions within {attempts} attempts"
    )]
    RejectionBudgetExhausted { attempts: u32 },
}

pub type Result<T> = std::result::Result<T, TraceError>;
