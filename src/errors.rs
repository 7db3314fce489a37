//! Error types surfaced by the helpers.
//!
//! Validation and conversion failures are [`InvalidInputError`]s, a guard
//! rejecting the connected endpoint is a [`NotTargetNetworkError`]. Callers
//! mixing both can propagate through [`NetworkHelpersError`] with `?`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Human-readable name of the network the guard accepts.
pub const TARGET_NETWORK_LABEL: &str = "Hardhat Network";

/// A value was rejected before being sent over RPC.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct InvalidInputError {
    message: String,
}

impl InvalidInputError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// The connected endpoint is not (or could not be confirmed to be) the
/// target development network.
///
/// `version` is the client version observed by the call that failed; it is
/// `None` when the transport errored or when the negative answer was
/// already cached.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error(
    "This helper can only be used with {target}. You are connected to '{network_name}', whose identifier is '{}'",
    .version.as_deref().unwrap_or("undefined")
)]
pub struct NotTargetNetworkError {
    pub target: String,
    pub network_name: String,
    pub version: Option<String>,
}

/// Failure of the underlying RPC transport.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("rpc error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetworkHelpersError {
    #[error(transparent)]
    InvalidInput(#[from] InvalidInputError),

    #[error(transparent)]
    NotTargetNetwork(#[from] NotTargetNetworkError),
}
