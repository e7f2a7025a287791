//! Error taxonomy for the retrieval pipeline.
//!
//! Everything except a single-record normalization skip is fatal to the
//! enclosing pipeline invocation: the caller gets no partial results.
//! Record skips never surface here; the normalizer drops the record and
//! logs it.

use thiserror::Error;

/// Error type for every remote step of the attendance pipeline.
#[derive(Debug, Error)]
pub enum ErpError {
    /// The ERP answered, but refused the supplied credentials.
    #[error("the ERP rejected the supplied credentials")]
    AuthRejected,

    /// Network, timeout, non-2xx or an RPC-level fault at any remote call.
    #[error("request '{step}' failed in transit: {reason}")]
    Transport { step: &'static str, reason: String },

    /// The response arrived but is missing fields the pipeline depends on.
    #[error("response to '{step}' had an unexpected shape: {details}")]
    Shape {
        step: &'static str,
        details: String,
    },
}

impl ErpError {
    pub fn transport(step: &'static str, reason: impl Into<String>) -> Self {
        Self::Transport {
            step,
            reason: reason.into(),
        }
    }

    pub fn shape(step: &'static str, details: impl Into<String>) -> Self {
        Self::Shape {
            step,
            details: details.into(),
        }
    }

    /// One human-readable line distinguishing "fix your input" from
    /// "try again later".
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::AuthRejected => "Incorrect username or password.",
            Self::Transport { .. } | Self::Shape { .. } => {
                "The ERP is unreachable or your session expired. Try again in a bit."
            }
        }
    }
}
