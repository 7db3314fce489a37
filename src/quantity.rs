//! Conversion of number-like values into JSON-RPC quantities.
//!
//! A quantity is the `0x`-prefixed hexadecimal encoding the Ethereum JSON-RPC
//! interface uses for numbers, e.g. `0x0` or `0x1b4`. Helpers that send
//! numeric parameters to the node (block counts, balances, timestamps) run
//! them through [`to_rpc_quantity`] or [`to_padded_rpc_quantity`] first.
//!
//! ```
//! use hardhat_network_helpers::quantity::{to_padded_rpc_quantity, to_rpc_quantity};
//!
//! assert_eq!(to_rpc_quantity(420u64).unwrap(), "0x1a4");
//! assert_eq!(to_padded_rpc_quantity(0xabu64, 4).unwrap(), "0x000000ab");
//! ```

use crate::errors::InvalidInputError;
use alloy_primitives::U256;
use serde_json::Value;
use std::fmt;

/// A value that renders itself as a `0x`-prefixed hex string.
pub trait ToHexString: fmt::Debug {
    fn to_hex_string(&self) -> String;
}

/// A value that renders itself as a string in an arbitrary radix.
///
/// Quantities ask for radix 16; the output may omit the `0x` prefix.
pub trait ToRadixString: fmt::Debug {
    fn to_radix_string(&self, radix: u32) -> String;
}

/// The values accepted wherever the helpers take a number.
#[derive(Debug, Clone)]
pub enum NumberLike<'a> {
    Integer(u64),
    BigInteger(U256),
    /// Must be `0x`-prefixed to convert.
    HexString(String),
    HexConvertible(&'a dyn ToHexString),
    StringConvertible(&'a dyn ToRadixString),
}

impl<'a> NumberLike<'a> {
    /// Maps a JSON value onto a number-like value.
    ///
    /// Unsigned integers and strings are accepted, anything else (floats,
    /// negative numbers, booleans, null, arrays, objects) is rejected.
    pub fn from_json(value: &Value) -> Result<NumberLike<'a>, InvalidInputError> {
        match value {
            Value::Number(n) => n
                .as_u64()
                .map(NumberLike::Integer)
                .ok_or_else(|| unconvertible(value)),
            Value::String(s) => Ok(NumberLike::HexString(s.clone())),
            _ => Err(unconvertible(value)),
        }
    }
}

fn unconvertible(value: impl fmt::Display) -> InvalidInputError {
    InvalidInputError::new(format!("{} cannot be converted to an RPC quantity", value))
}

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {
        $(
            impl From<$t> for NumberLike<'_> {
                fn from(value: $t) -> Self {
                    NumberLike::Integer(value as u64)
                }
            }
        )*
    };
}

impl_from_unsigned!(u8, u16, u32, u64, usize);

impl From<U256> for NumberLike<'_> {
    fn from(value: U256) -> Self {
        NumberLike::BigInteger(value)
    }
}

impl From<&str> for NumberLike<'_> {
    fn from(value: &str) -> Self {
        NumberLike::HexString(value.to_string())
    }
}

impl From<String> for NumberLike<'_> {
    fn from(value: String) -> Self {
        NumberLike::HexString(value)
    }
}

impl<'a, T: ToHexString> From<&'a T> for NumberLike<'a> {
    fn from(value: &'a T) -> Self {
        NumberLike::HexConvertible(value)
    }
}

/// Encode `x` as an RPC quantity.
///
/// Strings pass through as given, so only a single redundant leading zero
/// is dropped: `0x0ab` becomes `0xab` but `0x000ab` becomes `0x00ab`.
pub fn to_rpc_quantity<'a>(x: impl Into<NumberLike<'a>>) -> Result<String, InvalidInputError> {
    let hex = match x.into() {
        NumberLike::Integer(n) => format!("0x{:x}", n),
        NumberLike::BigInteger(n) => format!("0x{:x}", n),
        NumberLike::HexString(s) => {
            if !s.starts_with("0x") {
                return Err(InvalidInputError::new(
                    "Only 0x-prefixed hex-encoded strings are accepted",
                ));
            }
            s
        }
        NumberLike::HexConvertible(v) => v.to_hex_string(),
        NumberLike::StringConvertible(v) => v.to_radix_string(16),
    };

    Ok(normalize(hex))
}

fn normalize(hex: String) -> String {
    if hex == "0x0" {
        hex
    } else if hex.starts_with("0x0") {
        hex.replacen("0x0", "0x", 1)
    } else if hex.starts_with("0x") {
        hex
    } else {
        format!("0x{}", hex)
    }
}

/// Encode `x` as a big integer, going through [`to_rpc_quantity`].
pub fn to_big_int<'a>(x: impl Into<NumberLike<'a>>) -> Result<U256, InvalidInputError> {
    let quantity = to_rpc_quantity(x)?;
    let digits = &quantity[2..];
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(InvalidInputError::new(format!(
            "{} is not a valid RPC quantity",
            quantity
        )));
    }
    U256::from_str_radix(digits, 16).map_err(|e| {
        InvalidInputError::new(format!("{} is not a valid RPC quantity: {}", quantity, e))
    })
}

/// Like [`to_big_int`], narrowed to a native integer.
pub fn to_number<'a>(x: impl Into<NumberLike<'a>>) -> Result<u64, InvalidInputError> {
    let value = to_big_int(x)?;
    u64::try_from(value).map_err(|_| {
        InvalidInputError::new(format!("{} does not fit in a 64-bit integer", value))
    })
}

/// Encode `x` as an RPC quantity left-padded with zeros to `byte_length`
/// bytes. Wider values are returned as is, never truncated.
pub fn to_padded_rpc_quantity<'a>(
    x: impl Into<NumberLike<'a>>,
    byte_length: usize,
) -> Result<String, InvalidInputError> {
    let quantity = to_rpc_quantity(x)?;
    let digits = &quantity[2..];
    let width = byte_length.checked_mul(2).ok_or_else(|| {
        InvalidInputError::new(format!("{} bytes is too wide to pad to", byte_length))
    })?;

    if digits.len() < width {
        Ok(format!("0x{:0>width$}", digits, width = width))
    } else {
        Ok(quantity)
    }
}
