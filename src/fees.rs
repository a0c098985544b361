// SPDX-FileCopyrightText: 2025 txforge contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Gas estimation and EIP-1559 fee quoting
//!
//! [`FeeEstimator`] turns a call payload into a gas limit (network estimate
//! plus a fixed 10% margin) and a [`FeeQuote`] carrying the EIP-1559 fee
//! fields. Quotes come from fixed defaults (20 gwei max fee / 2 gwei priority
//! fee, suitable for a local or test network) or from live fee-market data via
//! [`FeeEstimator::market_quote`].
//!
//! A caller-supplied tip does not simply replace the priority fee: the max fee
//! moves by the same delta (`new_max = old_max + new_tip - old_tip`), so the
//! base-fee headroom implied by the original quote is preserved.

use alloy_primitives::{Address, Bytes, U256};
use std::sync::Arc;
use tracing::debug;

use crate::errors::FeeError;
use crate::rpc::ChainRpc;
use crate::wei::{WeiAmount, WEI_PER_GWEI};

/// Default absolute fee cap: 20 gwei per gas.
///
/// A placeholder suitable for local/dev networks. Chain-accurate pricing
/// should come from [`FeeEstimator::market_quote`] instead.
pub const DEFAULT_MAX_FEE_PER_GAS: u128 = 20 * WEI_PER_GWEI;

/// Default priority fee (tip): 2 gwei per gas.
pub const DEFAULT_MAX_PRIORITY_FEE_PER_GAS: u128 = 2 * WEI_PER_GWEI;

/// Gas limit safety margin: estimate plus estimate / 10.
///
/// Absorbs minor state changes between estimation and inclusion. Integer
/// arithmetic; `apply_gas_margin(100_000) == 110_000` exactly.
pub fn apply_gas_margin(estimated: u64) -> u64 {
    estimated.saturating_add(estimated / 10)
}

/// EIP-1559 fee fields plus the gas limit they were quoted against.
///
/// Invariant: `max_fee_per_gas >= max_priority_fee_per_gas`. Constructors
/// uphold it and [`FeeQuote::validate`] re-checks it before a quote is locked
/// into a descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeQuote {
    /// Gas limit, margin already applied
    pub gas_limit: u64,
    /// Absolute cap per gas unit, in wei
    pub max_fee_per_gas: u128,
    /// Tip to the block producer per gas unit, in wei
    pub max_priority_fee_per_gas: u128,
}

impl FeeQuote {
    /// Quote with the fixed default fees for the given gas limit.
    pub fn with_defaults(gas_limit: u64) -> Self {
        Self {
            gas_limit,
            max_fee_per_gas: DEFAULT_MAX_FEE_PER_GAS,
            max_priority_fee_per_gas: DEFAULT_MAX_PRIORITY_FEE_PER_GAS,
        }
    }

    /// Apply a caller-supplied priority fee, preserving base-fee headroom.
    ///
    /// The max fee is adjusted by the same delta as the tip:
    /// `new_max = old_max + new_tip - old_tip`. The prior quote is discarded,
    /// not mutated.
    ///
    /// # Examples
    ///
    /// ```
    /// use txforge::FeeQuote;
    ///
    /// let quote = FeeQuote::with_defaults(21_000); // (20 gwei, 2 gwei)
    /// let bumped = quote.with_tip(5_000_000_000).unwrap();
    /// assert_eq!(bumped.max_fee_per_gas, 23_000_000_000);
    /// assert_eq!(bumped.max_priority_fee_per_gas, 5_000_000_000);
    /// ```
    pub fn with_tip(self, tip_wei: u128) -> Result<Self, FeeError> {
        let max_fee = self
            .max_fee_per_gas
            .checked_add(tip_wei)
            .and_then(|v| v.checked_sub(self.max_priority_fee_per_gas))
            .ok_or(FeeError::InvalidFeeQuote {
                max_fee_per_gas: self.max_fee_per_gas,
                max_priority_fee_per_gas: tip_wei,
            })?;

        let adjusted = Self {
            gas_limit: self.gas_limit,
            max_fee_per_gas: max_fee,
            max_priority_fee_per_gas: tip_wei,
        };
        adjusted.validate()?;
        Ok(adjusted)
    }

    /// Check the `max_fee >= priority_fee` invariant.
    pub fn validate(&self) -> Result<(), FeeError> {
        if self.max_fee_per_gas < self.max_priority_fee_per_gas {
            return Err(FeeError::InvalidFeeQuote {
                max_fee_per_gas: self.max_fee_per_gas,
                max_priority_fee_per_gas: self.max_priority_fee_per_gas,
            });
        }
        Ok(())
    }

    /// Worst-case cost of a transaction at this quote:
    /// `gas_limit * max_fee_per_gas`.
    pub fn estimated_cost(&self) -> WeiAmount {
        WeiAmount::new(U256::from(self.gas_limit) * U256::from(self.max_fee_per_gas))
    }
}

/// Computes gas limits and fee quotes for a transaction payload.
#[derive(Debug, Clone)]
pub struct FeeEstimator<C> {
    rpc: Arc<C>,
}

impl<C: ChainRpc> FeeEstimator<C> {
    /// Create an estimator over the given RPC capability.
    pub fn new(rpc: Arc<C>) -> Self {
        Self { rpc }
    }

    /// Estimate gas for a call, without margin.
    ///
    /// `to = None` estimates a contract deployment. Failure surfaces
    /// [`FeeError::GasEstimationFailed`] with the underlying reason rather
    /// than substituting a default; a guessed gas limit risks an underfunded,
    /// stuck transaction.
    pub async fn estimate_gas(
        &self,
        from: Address,
        to: Option<Address>,
        data: &Bytes,
    ) -> Result<u64, FeeError> {
        let estimated = self
            .rpc
            .estimate_gas(from, to, data)
            .await
            .map_err(FeeError::gas_estimation_failed)?;
        debug!(estimated, ?to, "Gas estimated");
        Ok(estimated)
    }

    /// Estimate gas and apply the safety margin in one step.
    pub async fn gas_limit_for(
        &self,
        from: Address,
        to: Option<Address>,
        data: &Bytes,
    ) -> Result<u64, FeeError> {
        Ok(apply_gas_margin(self.estimate_gas(from, to, data).await?))
    }

    /// Produce a fee quote from the fixed defaults, optionally adjusted by a
    /// caller-supplied tip.
    pub fn quote(&self, gas_limit: u64, tip_wei: Option<u128>) -> Result<FeeQuote, FeeError> {
        let quote = FeeQuote::with_defaults(gas_limit);
        match tip_wei {
            Some(tip) => quote.with_tip(tip),
            None => Ok(quote),
        }
    }

    /// Produce a fee quote from the chain's live fee-market data.
    pub async fn market_quote(&self, gas_limit: u64) -> Result<FeeQuote, FeeError> {
        let market = self.rpc.fee_market().await?;
        let quote = FeeQuote {
            gas_limit,
            max_fee_per_gas: market.max_fee_per_gas,
            max_priority_fee_per_gas: market.max_priority_fee_per_gas,
        };
        quote.validate()?;
        Ok(quote)
    }
}

/// Parse a human-entered gwei string (e.g. `"2"` or `"2.5"`) into wei.
///
/// At most nine fractional digits are meaningful; more is sub-wei precision
/// and is rejected. Returns `None` for anything that is not a non-negative
/// decimal number.
pub fn parse_gwei(input: &str) -> Option<u128> {
    let trimmed = input.trim();
    let (whole, frac) = match trimmed.split_once('.') {
        Some((w, f)) => (w, f),
        None => (trimmed, ""),
    };
    if whole.is_empty() && frac.is_empty() {
        return None;
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if frac.len() > 9 {
        return None;
    }

    let whole_wei = if whole.is_empty() {
        0
    } else {
        whole.parse::<u128>().ok()?.checked_mul(WEI_PER_GWEI)?
    };
    let frac_wei = if frac.is_empty() {
        0
    } else {
        // Right-pad the fraction to nine digits: "5" -> 500_000_000 wei.
        let scale = 10u128.pow(9 - frac.len() as u32);
        frac.parse::<u128>().ok()? * scale
    };
    whole_wei.checked_add(frac_wei)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gas_margin_exact() {
        assert_eq!(apply_gas_margin(100_000), 110_000);
    }

    #[test]
    fn test_gas_margin_integer_division() {
        // 21999 / 10 == 2199, no float drift.
        assert_eq!(apply_gas_margin(21_999), 24_198);
        assert_eq!(apply_gas_margin(0), 0);
        assert_eq!(apply_gas_margin(9), 9);
    }

    #[test]
    fn test_default_quote() {
        let quote = FeeQuote::with_defaults(21_000);
        assert_eq!(quote.max_fee_per_gas, 20_000_000_000);
        assert_eq!(quote.max_priority_fee_per_gas, 2_000_000_000);
        assert!(quote.validate().is_ok());
    }

    #[test]
    fn test_tip_preserves_delta() {
        let quote = FeeQuote::with_defaults(21_000);
        let bumped = quote.with_tip(5 * WEI_PER_GWEI).unwrap();
        assert_eq!(bumped.max_fee_per_gas, 23 * WEI_PER_GWEI);
        assert_eq!(bumped.max_priority_fee_per_gas, 5 * WEI_PER_GWEI);
        // Headroom above the tip is unchanged.
        assert_eq!(
            bumped.max_fee_per_gas - bumped.max_priority_fee_per_gas,
            quote.max_fee_per_gas - quote.max_priority_fee_per_gas
        );
    }

    #[test]
    fn test_lower_tip_lowers_max_fee() {
        let quote = FeeQuote::with_defaults(21_000);
        let reduced = quote.with_tip(WEI_PER_GWEI).unwrap();
        assert_eq!(reduced.max_fee_per_gas, 19 * WEI_PER_GWEI);
        assert_eq!(reduced.max_priority_fee_per_gas, WEI_PER_GWEI);
    }

    #[test]
    fn test_invalid_quote_detected() {
        let quote = FeeQuote {
            gas_limit: 21_000,
            max_fee_per_gas: 1,
            max_priority_fee_per_gas: 2,
        };
        assert!(matches!(
            quote.validate(),
            Err(FeeError::InvalidFeeQuote { .. })
        ));
    }

    #[test]
    fn test_estimated_cost() {
        let quote = FeeQuote::with_defaults(100_000);
        // 100_000 * 20 gwei = 0.002 ETH
        assert_eq!(
            quote.estimated_cost().as_u256(),
            alloy_primitives::U256::from(2_000_000_000_000_000u64)
        );
    }

    #[test]
    fn test_parse_gwei_whole() {
        assert_eq!(parse_gwei("2"), Some(2 * WEI_PER_GWEI));
        assert_eq!(parse_gwei(" 20 "), Some(20 * WEI_PER_GWEI));
        assert_eq!(parse_gwei("0"), Some(0));
    }

    #[test]
    fn test_parse_gwei_fractional() {
        assert_eq!(parse_gwei("2.5"), Some(2_500_000_000));
        assert_eq!(parse_gwei("0.000000001"), Some(1));
        assert_eq!(parse_gwei(".5"), Some(500_000_000));
    }

    #[test]
    fn test_parse_gwei_rejects_garbage() {
        assert_eq!(parse_gwei(""), None);
        assert_eq!(parse_gwei("."), None);
        assert_eq!(parse_gwei("-1"), None);
        assert_eq!(parse_gwei("1.0000000001"), None); // sub-wei
        assert_eq!(parse_gwei("gwei"), None);
        assert_eq!(parse_gwei("1,5"), None);
    }
}
