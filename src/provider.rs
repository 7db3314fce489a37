//! Access to the node behind the active network, guarded so helpers only
//! ever talk to a local Hardhat Network.
//!
//! The transport and the host tool's network selection are abstracted as
//! [`RpcProvider`] and [`NetworkContext`]. A [`NetworkGuard`] remembers the
//! outcome of its first detection for as long as it lives; share one guard
//! between all helpers of a process.

use crate::config::GuardConfig;
use crate::errors::{NotTargetNetworkError, ProviderError};
use serde_json::Value;
use std::sync::{Arc, OnceLock};

/// JSON-RPC method used to identify the node.
pub const CLIENT_VERSION_METHOD: &str = "web3_clientVersion";

/// A JSON-RPC transport.
pub trait RpcProvider {
    /// Send `method` with `params` and return the `result` member of the
    /// response.
    fn request(&self, method: &str, params: Value) -> Result<Value, ProviderError>;
}

impl<P: RpcProvider + ?Sized> RpcProvider for &P {
    fn request(&self, method: &str, params: Value) -> Result<Value, ProviderError> {
        (**self).request(method, params)
    }
}

impl<P: RpcProvider + ?Sized> RpcProvider for Box<P> {
    fn request(&self, method: &str, params: Value) -> Result<Value, ProviderError> {
        (**self).request(method, params)
    }
}

impl<P: RpcProvider + ?Sized> RpcProvider for Arc<P> {
    fn request(&self, method: &str, params: Value) -> Result<Value, ProviderError> {
        (**self).request(method, params)
    }
}

/// The network the host tool is currently connected to.
pub trait NetworkContext {
    type Provider: RpcProvider;

    fn provider(&self) -> &Self::Provider;

    /// The name the user selected the network by, e.g. `hardhat` or
    /// `localhost`.
    fn network_name(&self) -> &str;
}

/// Caches whether the connected node is the target network.
///
/// The cache is written once, by the first detection to finish. Callers
/// racing on an empty cache may each query the node; only the first answer
/// is kept.
#[derive(Debug, Default)]
pub struct NetworkGuard {
    config: GuardConfig,
    is_target: OnceLock<bool>,
}

impl NetworkGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: GuardConfig) -> Self {
        Self {
            config,
            is_target: OnceLock::new(),
        }
    }

    pub fn config(&self) -> &GuardConfig {
        &self.config
    }

    /// The cached detection result, if any.
    pub fn is_target_network(&self) -> Option<bool> {
        self.is_target.get().copied()
    }

    /// Forget the cached result.
    pub fn reset(&mut self) {
        self.is_target = OnceLock::new();
    }

    /// Succeeds if `provider` is connected to the target network.
    ///
    /// Only the first call queries the node. A failed query counts as a
    /// foreign network and, like any other answer, is never revisited.
    pub fn ensure_target_network<P>(
        &self,
        provider: &P,
        network_name: &str,
    ) -> Result<bool, NotTargetNetworkError>
    where
        P: RpcProvider + ?Sized,
    {
        let mut version = None;

        let is_target = match self.is_target.get() {
            Some(cached) => {
                tracing::trace!(network_name, is_target = *cached, "network type cached");
                *cached
            }
            None => {
                version = self.client_version(provider);
                let detected = version
                    .as_deref()
                    .map(|v| self.config.matches(v))
                    .unwrap_or(false);
                // a concurrent detection may have won; its answer stands
                let is_target = *self.is_target.get_or_init(|| detected);
                tracing::debug!(
                    network_name,
                    version = version.as_deref(),
                    is_target,
                    "detected network type"
                );
                is_target
            }
        };

        if !is_target {
            return Err(NotTargetNetworkError {
                target: self.config.network_label.clone(),
                network_name: network_name.to_string(),
                version,
            });
        }

        Ok(true)
    }

    fn client_version<P>(&self, provider: &P) -> Option<String>
    where
        P: RpcProvider + ?Sized,
    {
        tracing::debug!(method = CLIENT_VERSION_METHOD, "querying client version");
        match provider.request(CLIENT_VERSION_METHOD, Value::Array(vec![])) {
            Ok(Value::String(version)) => Some(version),
            Ok(other) => {
                tracing::debug!(result = %other, "client version is not a string");
                None
            }
            Err(e) => {
                tracing::debug!(error = %e, "client version request failed");
                None
            }
        }
    }
}

/// Returns the provider of the active network once `guard` has confirmed it
/// is the target network.
pub fn get_hardhat_provider<'c, C>(
    context: &'c C,
    guard: &NetworkGuard,
) -> Result<&'c C::Provider, NotTargetNetworkError>
where
    C: NetworkContext,
{
    let provider = context.provider();
    guard.ensure_target_network(provider, context.network_name())?;
    Ok(provider)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    const HARDHAT_VERSION: &str = "HardhatNetwork/2.22.6/@nomicfoundation/edr/0.4.1";

    #[derive(Debug, Default)]
    struct MockProvider {
        version: Option<&'static str>,
        calls: Cell<usize>,
    }

    impl MockProvider {
        fn answering(version: &'static str) -> Self {
            Self {
                version: Some(version),
                calls: Cell::new(0),
            }
        }

        fn failing() -> Self {
            Self::default()
        }
    }

    impl RpcProvider for MockProvider {
        fn request(&self, method: &str, params: Value) -> Result<Value, ProviderError> {
            assert_eq!(method, CLIENT_VERSION_METHOD);
            assert_eq!(params, Value::Array(vec![]));
            self.calls.set(self.calls.get() + 1);
            match self.version {
                Some(v) => Ok(Value::String(v.to_string())),
                None => Err(ProviderError::Transport("connection refused".to_string())),
            }
        }
    }

    struct Context {
        name: &'static str,
        provider: MockProvider,
    }

    impl NetworkContext for Context {
        type Provider = MockProvider;

        fn provider(&self) -> &MockProvider {
            &self.provider
        }

        fn network_name(&self) -> &str {
            self.name
        }
    }

    #[test]
    fn accepts_hardhat_network_and_caches() {
        let guard = NetworkGuard::new();
        let provider = MockProvider::answering(HARDHAT_VERSION);

        assert!(guard.ensure_target_network(&provider, "hardhat").unwrap());
        assert!(guard.ensure_target_network(&provider, "hardhat").unwrap());
        assert_eq!(provider.calls.get(), 1);
        assert_eq!(guard.is_target_network(), Some(true));
    }

    #[test]
    fn rejects_other_clients_with_version() {
        let guard = NetworkGuard::new();
        let provider = MockProvider::answering("Geth/v1.14.0-stable/linux-amd64/go1.22.1");

        let err = guard.ensure_target_network(&provider, "mainnet").unwrap_err();
        assert_eq!(err.network_name, "mainnet");
        assert_eq!(
            err.version.as_deref(),
            Some("Geth/v1.14.0-stable/linux-amd64/go1.22.1")
        );

        // the cached answer carries no version
        let err = guard.ensure_target_network(&provider, "mainnet").unwrap_err();
        assert_eq!(err.version, None);
        assert_eq!(provider.calls.get(), 1);
    }

    #[test]
    fn transport_failure_is_sticky() {
        let guard = NetworkGuard::new();
        let broken = MockProvider::failing();

        let err = guard.ensure_target_network(&broken, "localhost").unwrap_err();
        assert_eq!(err.version, None);
        assert_eq!(guard.is_target_network(), Some(false));

        let working = MockProvider::answering(HARDHAT_VERSION);
        assert!(guard.ensure_target_network(&working, "localhost").is_err());
        assert_eq!(working.calls.get(), 0);
    }

    #[test]
    fn non_string_version_is_rejected() {
        struct NumberProvider;

        impl RpcProvider for NumberProvider {
            fn request(&self, _method: &str, _params: Value) -> Result<Value, ProviderError> {
                Ok(Value::from(1))
            }
        }

        let guard = NetworkGuard::new();
        let err = guard.ensure_target_network(&NumberProvider, "hardhat").unwrap_err();
        assert_eq!(err.version, None);
    }

    #[test]
    fn reset_allows_detection_again() {
        let mut guard = NetworkGuard::new();
        assert!(guard
            .ensure_target_network(&MockProvider::failing(), "hardhat")
            .is_err());

        guard.reset();
        assert_eq!(guard.is_target_network(), None);
        assert!(guard
            .ensure_target_network(&MockProvider::answering(HARDHAT_VERSION), "hardhat")
            .unwrap());
    }

    #[test]
    fn custom_prefix() {
        let guard = NetworkGuard::with_config(GuardConfig {
            client_version_prefix: "anvil".to_string(),
            network_label: "Anvil".to_string(),
        });
        assert!(guard
            .ensure_target_network(&MockProvider::answering("anvil/v0.2.0"), "anvil")
            .unwrap());
    }

    #[test]
    fn error_message_names_network() {
        let guard = NetworkGuard::new();
        let err = guard
            .ensure_target_network(&MockProvider::answering("Geth/v1.14.0"), "sepolia")
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "This helper can only be used with Hardhat Network. You are connected to 'sepolia', whose identifier is 'Geth/v1.14.0'"
        );
    }

    #[test]
    fn provider_from_context() {
        let guard = NetworkGuard::new();
        let context = Context {
            name: "hardhat",
            provider: MockProvider::answering(HARDHAT_VERSION),
        };

        let provider = get_hardhat_provider(&context, &guard).unwrap();
        assert!(std::ptr::eq(provider, &context.provider));
    }

    #[test]
    fn provider_from_wrong_context() {
        let guard = NetworkGuard::new();
        let context = Context {
            name: "localhost",
            provider: MockProvider::failing(),
        };

        let err = get_hardhat_provider(&context, &guard).unwrap_err();
        assert_eq!(err.network_name, "localhost");
    }

    #[test]
    fn boxed_and_shared_providers() {
        let guard = NetworkGuard::new();
        let boxed: Box<dyn RpcProvider> = Box::new(MockProvider::answering(HARDHAT_VERSION));
        assert!(guard.ensure_target_network(&boxed, "hardhat").unwrap());

        let shared = Arc::new(MockProvider::answering(HARDHAT_VERSION));
        assert!(NetworkGuard::new()
            .ensure_target_network(&shared, "hardhat")
            .unwrap());
    }
}
