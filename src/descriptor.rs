// SPDX-FileCopyrightText: 2025 txforge contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Unsigned transaction descriptors
//!
//! [`TxDescriptor`] is the handoff value between fee estimation and signing:
//! target, calldata, value, the locked-in fee quote, and an optional nonce.
//! An absent nonce means "resolve at signing time", which keeps the gap
//! between estimation and signing as small as possible.
//!
//! Assembly is pure (no I/O) and refuses a quote whose
//! `max_fee_per_gas < max_priority_fee_per_gas`; a descriptor violating that
//! invariant must never reach the signer.
//!
//! Serialization follows the boundary rules: every big-integer field is a
//! decimal string, `data` is `0x`-prefixed hex, and `nonce` is `null` while
//! unresolved.

use alloy_primitives::{Address, Bytes, U256};
use serde::{Deserialize, Serialize};

use crate::errors::FeeError;
use crate::fees::FeeQuote;
use crate::wei::WeiAmount;

/// An unsigned, fully priced transaction awaiting a nonce and a signature.
///
/// Serialized form (field names match the wire contract):
///
/// ```json
/// {
///   "to": "0x…",
///   "data": "0x…",
///   "value": "0",
///   "nonce": null,
///   "gas": "110000",
///   "maxFeePerGas": "20000000000",
///   "maxPriorityFeePerGas": "2000000000"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxDescriptor {
    /// Contract or account the transaction is addressed to
    pub to: Address,
    /// ABI-encoded call payload
    pub data: Bytes,
    /// ETH value sent with the transaction, in wei (zero for token calls)
    #[serde(with = "serde_decimal")]
    pub value: U256,
    /// Sender nonce; `None` defers resolution to signing time
    pub nonce: Option<u64>,
    /// Gas limit, margin already applied
    #[serde(rename = "gas", with = "serde_decimal")]
    pub gas_limit: u64,
    /// EIP-1559 absolute fee cap, in wei per gas
    #[serde(with = "serde_decimal")]
    pub max_fee_per_gas: u128,
    /// EIP-1559 priority fee, in wei per gas
    #[serde(with = "serde_decimal")]
    pub max_priority_fee_per_gas: u128,
}

impl TxDescriptor {
    /// Assemble a descriptor from encoded calldata, a target, and a fee quote.
    ///
    /// Pure assembly, no I/O. The nonce is left unresolved. Fails fast with
    /// [`FeeError::InvalidFeeQuote`] if the quote's fee fields are inverted.
    pub fn build(
        to: Address,
        data: Bytes,
        value: U256,
        quote: &FeeQuote,
    ) -> Result<Self, FeeError> {
        quote.validate()?;
        Ok(Self {
            to,
            data,
            value,
            nonce: None,
            gas_limit: quote.gas_limit,
            max_fee_per_gas: quote.max_fee_per_gas,
            max_priority_fee_per_gas: quote.max_priority_fee_per_gas,
        })
    }

    /// Re-check the fee invariant; the signer calls this before signing.
    pub fn validate(&self) -> Result<(), FeeError> {
        if self.max_fee_per_gas < self.max_priority_fee_per_gas {
            return Err(FeeError::InvalidFeeQuote {
                max_fee_per_gas: self.max_fee_per_gas,
                max_priority_fee_per_gas: self.max_priority_fee_per_gas,
            });
        }
        Ok(())
    }

    /// Worst-case cost at this descriptor's pricing:
    /// `gas_limit * max_fee_per_gas + value`.
    pub fn max_cost(&self) -> WeiAmount {
        let fee = U256::from(self.gas_limit) * U256::from(self.max_fee_per_gas);
        WeiAmount::new(fee.saturating_add(self.value))
    }
}

/// Serde adapter rendering integers as decimal strings.
///
/// Big-integer quantities cross the boundary as strings, never as native JSON
/// numbers, to avoid precision loss in consumers.
pub(crate) mod serde_decimal {
    use serde::{de, Deserialize, Deserializer, Serializer};
    use std::fmt::Display;
    use std::str::FromStr;

    pub fn serialize<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Display,
        S: Serializer,
    {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
    where
        T: FromStr,
        T::Err: Display,
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(de::Error::custom)
    }
}
