// SPDX-FileCopyrightText: 2025 txforge contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Address validation and normalization
//!
//! Every externally supplied address passes through [`parse_address`] before
//! any other component sees it. Validation is pure; no network access.
//!
//! Accepted inputs are 40 hex characters with or without a `0x` prefix.
//! All-lowercase and all-uppercase inputs are accepted as-is; mixed-case
//! inputs must carry a valid EIP-55 checksum. Invalid input is rejected with
//! [`EncodeError::InvalidAddress`], never silently coerced.

use alloy_primitives::{hex, Address};

use crate::errors::EncodeError;

/// Validate and normalize a hex address string.
///
/// Idempotent with respect to [`checksum`]: parsing the canonical form of an
/// address yields the same address.
///
/// # Examples
///
/// ```
/// use txforge::parse_address;
///
/// let addr = parse_address("0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266").unwrap();
/// assert_eq!(parse_address(&addr.to_checksum(None)).unwrap(), addr);
///
/// assert!(parse_address("0x1234").is_err());
/// assert!(parse_address("not an address").is_err());
/// ```
pub fn parse_address(input: &str) -> Result<Address, EncodeError> {
    let digits = input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
        .unwrap_or(input);

    if digits.len() != 40 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(EncodeError::invalid_address(input));
    }

    let mut raw = [0u8; 20];
    hex::decode_to_slice(digits, &mut raw).map_err(|_| EncodeError::invalid_address(input))?;
    let address = Address::from(raw);

    // Mixed-case input is a checksummed address and must match EIP-55.
    let has_lower = digits.bytes().any(|b| b.is_ascii_lowercase());
    let has_upper = digits.bytes().any(|b| b.is_ascii_uppercase());
    if has_lower && has_upper && address.to_checksum(None)[2..] != *digits {
        return Err(EncodeError::invalid_address(input));
    }

    Ok(address)
}

/// Canonical EIP-55 checksummed representation of an address.
pub fn checksum(address: &Address) -> String {
    address.to_checksum(None)
}
