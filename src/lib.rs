//! Helpers shared by chain-manipulating utilities for Hardhat Network:
//! a guard that makes sure the connected node is a local Hardhat Network,
//! encoding of numbers as JSON-RPC quantities, and validation of addresses,
//! hashes and numbers before they are sent to the node.
//!
//! ```
//! use hardhat_network_helpers::{quantity, validation, NetworkHelpersError};
//!
//! fn mine_params(blocks: u64, interval: u64) -> Result<(String, String), NetworkHelpersError> {
//!     validation::assert_positive_number(blocks)?;
//!     Ok((
//!         quantity::to_rpc_quantity(blocks)?,
//!         quantity::to_rpc_quantity(interval)?,
//!     ))
//! }
//!
//! assert_eq!(
//!     mine_params(256, 12).unwrap(),
//!     ("0x100".to_string(), "0xc".to_string())
//! );
//! ```

pub mod config;
pub mod errors;
#[cfg(feature = "logging")]
pub mod logging;
pub mod provider;
pub mod quantity;
pub mod validation;

pub use config::GuardConfig;
pub use errors::{InvalidInputError, NetworkHelpersError, NotTargetNetworkError, ProviderError};
pub use provider::{get_hardhat_provider, NetworkContext, NetworkGuard, RpcProvider};
pub use quantity::{
    to_big_int, to_number, to_padded_rpc_quantity, to_rpc_quantity, NumberLike, ToHexString,
    ToRadixString,
};
pub use validation::{
    assert_hex_string, assert_larger_than, assert_non_negative_number, assert_positive_number,
    assert_tx_hash, assert_valid_address, assert_valid_target_block,
};
