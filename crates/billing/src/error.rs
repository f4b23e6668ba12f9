//! Billing error types

use thiserror::Error;

/// Billing-specific errors
#[derive(Debug, Error)]
pub enum BillingError {
    /// The billing service answered with a status other than the one the
    /// operation expects, or with a body we could not decode. The two are
    /// deliberately not told apart; callers treat either as "the operation
    /// did not happen".
    #[error("{method} {path}: unexpected response (status {status})")]
    UnexpectedStatus {
        method: &'static str,
        path: String,
        status: u16,
    },

    /// Network-layer failure, propagated unmodified
    #[error("billing transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type BillingResult<T> = Result<T, BillingError>;
