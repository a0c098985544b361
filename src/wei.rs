// SPDX-FileCopyrightText: 2025 txforge contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Strong type for wei-denominated amounts
//!
//! All monetary quantities in this crate are integers in wei. [`WeiAmount`]
//! wraps `U256` so that costs cannot be confused with gas units or raw token
//! amounts, and provides lossy gwei/ETH conversions for display only.

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};
use std::ops::Add;

/// Number of wei in one gwei.
pub const WEI_PER_GWEI: u128 = 1_000_000_000;

/// An amount of native currency in wei
///
/// # Examples
///
/// ```
/// use alloy_primitives::U256;
/// use txforge::WeiAmount;
///
/// let cost = WeiAmount::new(U256::from(1_000_000_000_000_000u64)); // 0.001 ETH
/// let eth = cost.to_ether();
/// assert!((eth - 0.001).abs() < 0.0000001);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct WeiAmount(U256);

impl WeiAmount {
    /// Zero wei
    pub const ZERO: Self = Self(U256::ZERO);

    /// Create a new wei amount
    pub const fn new(wei: U256) -> Self {
        Self(wei)
    }

    /// Create a wei amount from a whole number of gwei
    ///
    /// ```
    /// use alloy_primitives::U256;
    /// use txforge::WeiAmount;
    ///
    /// assert_eq!(WeiAmount::from_gwei(2).as_u256(), U256::from(2_000_000_000u64));
    /// ```
    pub fn from_gwei(gwei: u64) -> Self {
        Self(U256::from(gwei as u128 * WEI_PER_GWEI))
    }

    /// Get the inner U256 value (in wei)
    pub const fn as_u256(&self) -> U256 {
        self.0
    }

    /// Check if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Convert to gwei (1 gwei = 10^9 wei)
    ///
    /// Returns f64 for display purposes. This is a lossy conversion.
    pub fn to_gwei(&self) -> f64 {
        self.0.to_string().parse::<f64>().unwrap_or(0.0) / WEI_PER_GWEI as f64
    }

    /// Convert to ether (1 ETH = 10^18 wei)
    ///
    /// Returns f64 for display purposes. This is a lossy conversion.
    pub fn to_ether(&self) -> f64 {
        let eth_divisor = 1_000_000_000_000_000_000u128;
        self.0.to_string().parse::<f64>().unwrap_or(0.0) / eth_divisor as f64
    }
}

impl From<u128> for WeiAmount {
    fn from(value: u128) -> Self {
        Self(U256::from(value))
    }
}

impl From<U256> for WeiAmount {
    fn from(value: U256) -> Self {
        Self(value)
    }
}

impl Add for WeiAmount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl std::fmt::Display for WeiAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let eth = self.to_ether();
        if eth < 0.000001 {
            write!(f, "{} wei", self.0)
        } else {
            write!(f, "{:.6} ETH", eth)
        }
    }
}
