use crate::errors::TARGET_NETWORK_LABEL;
use serde::{Deserialize, Serialize};

/// Prefix of `web3_clientVersion` reported by Hardhat Network, lowercased.
pub const HARDHAT_CLIENT_VERSION_PREFIX: &str = "hardhatnetwork";

/// Settings for a [`crate::provider::NetworkGuard`].
///
/// Every field is optional when deserializing:
///
/// ```json
/// { "client_version_prefix": "hardhatnetwork" }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardConfig {
    /// Client version prefix identifying the target network. Matched
    /// case-insensitively against the start of `web3_clientVersion`.
    pub client_version_prefix: String,
    /// Name of the target network, used in error messages.
    pub network_label: String,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            client_version_prefix: HARDHAT_CLIENT_VERSION_PREFIX.to_string(),
            network_label: TARGET_NETWORK_LABEL.to_string(),
        }
    }
}

impl GuardConfig {
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Whether `version` identifies the target network.
    pub fn matches(&self, version: &str) -> bool {
        version
            .to_lowercase()
            .starts_with(&self.client_version_prefix.to_lowercase())
    }
}
