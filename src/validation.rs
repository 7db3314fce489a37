//! Input checks run before values are sent to the node.
//!
//! Every check returns `Ok(())` or an [`InvalidInputError`] describing the
//! offending value, so they chain with `?`:
//!
//! ```
//! use hardhat_network_helpers::validation::{assert_positive_number, assert_tx_hash};
//!
//! # fn main() -> Result<(), hardhat_network_helpers::InvalidInputError> {
//! assert_tx_hash(&format!("0x{}", "a".repeat(64)))?;
//! assert_positive_number(3u64)?;
//! # Ok(())
//! # }
//! ```

use crate::errors::InvalidInputError;
use alloy_primitives::{Address, BlockNumber};
use regex::Regex;
use std::fmt::Display;
use std::sync::LazyLock;

/// `0x` plus 32 bytes of hex.
pub const TX_HASH_LENGTH: usize = 66;

static HEX_STRING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^0x[0-9a-fA-F]+$").expect("hex string pattern is valid"));

/// Requires `address` to carry an EIP-55 checksum, and the checksum to be
/// correct. All-lowercase addresses are rejected even though they parse.
pub fn assert_valid_address(address: &str) -> Result<(), InvalidInputError> {
    let has_checksum = address != address.to_lowercase();
    if !has_checksum || Address::parse_checksummed(address, None).is_err() {
        return Err(InvalidInputError::new(format!(
            "{} is not a valid address",
            address
        )));
    }
    Ok(())
}

pub fn assert_hex_string(hex_string: &str) -> Result<(), InvalidInputError> {
    if !HEX_STRING.is_match(hex_string) {
        return Err(InvalidInputError::new(format!(
            "{} is not a valid hex string",
            hex_string
        )));
    }
    Ok(())
}

pub fn assert_tx_hash(hex_string: &str) -> Result<(), InvalidInputError> {
    assert_hex_string(hex_string)?;
    if hex_string.len() != TX_HASH_LENGTH {
        return Err(InvalidInputError::new(format!(
            "{} is not a valid transaction hash",
            hex_string
        )));
    }
    Ok(())
}

pub fn assert_valid_target_block(
    target: BlockNumber,
    latest: BlockNumber,
) -> Result<(), InvalidInputError> {
    if target <= latest {
        return Err(InvalidInputError::new(format!(
            "Requested target block {} is not greater than current block height {}.",
            target, latest
        )));
    }
    Ok(())
}

/// Zero is whatever `T::default()` is, which holds for the primitive
/// integers as well as `U256` and `I256`.
pub fn assert_positive_number<T>(n: T) -> Result<(), InvalidInputError>
where
    T: PartialOrd + Default + Display,
{
    if n <= T::default() {
        return Err(InvalidInputError::new(format!(
            "Invalid input: expected a positive number but {} was given.",
            n
        )));
    }
    Ok(())
}

pub fn assert_non_negative_number<T>(n: T) -> Result<(), InvalidInputError>
where
    T: PartialOrd + Default + Display,
{
    if n < T::default() {
        return Err(InvalidInputError::new(format!(
            "Invalid input: expected a non-negative number but {} was given.",
            n
        )));
    }
    Ok(())
}

/// `label` names what is compared, e.g. `"timestamp"` or `"block number"`.
pub fn assert_larger_than<T>(a: T, b: T, label: &str) -> Result<(), InvalidInputError>
where
    T: PartialOrd + Display,
{
    if a <= b {
        return Err(InvalidInputError::new(format!(
            "Invalid {label} {a}. It should be larger than the current {label} {b}"
        )));
    }
    Ok(())
}
