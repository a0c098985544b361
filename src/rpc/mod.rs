// SPDX-FileCopyrightText: 2025 txforge contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Blockchain RPC capability
//!
//! The pipeline never talks to a JSON-RPC endpoint directly; it consumes the
//! [`ChainRpc`] trait, which models exactly the capability set the pipeline
//! needs: read-only ERC-20 calls, gas estimation, fee-market data, nonce
//! lookup, raw-transaction submission, and receipt queries.
//!
//! [`AlloyRpc`] is the production implementation over an
//! `alloy_provider::Provider`. Tests substitute a mock, so every component is
//! exercisable without a network.
//!
//! A receipt query that finds nothing returns `Ok(None)` — "not found" is a
//! normal answer (the transaction may simply not have propagated yet), not an
//! error.

mod alloy;

pub use alloy::{connect_http, AlloyRpc, RpcConfig};

use alloy_primitives::{Address, TxHash, U256};
use async_trait::async_trait;

use crate::errors::RpcError;

/// Current EIP-1559 fee-market data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeMarket {
    /// Suggested absolute fee cap, in wei per gas
    pub max_fee_per_gas: u128,
    /// Suggested priority fee, in wei per gas
    pub max_priority_fee_per_gas: u128,
}

/// The subset of a transaction receipt this pipeline consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReceiptInfo {
    /// Terminal status: `true` for success, `false` for revert
    pub status: bool,
    /// Gas actually consumed
    pub gas_used: u128,
    /// Effective price paid per gas unit, in wei
    pub effective_gas_price: u128,
    /// Deployed contract address, for creation transactions
    pub contract_address: Option<Address>,
    /// Block the transaction was included in
    pub block_number: Option<u64>,
}

/// The external Ethereum JSON-RPC capability consumed by the pipeline.
///
/// Implementations must not retry internally; retry policy is layered above
/// the pipeline because a blind re-broadcast can double-submit with a stale
/// nonce.
#[async_trait]
pub trait ChainRpc: Send + Sync {
    /// The chain identifier reported by the node.
    async fn chain_id(&self) -> Result<u64, RpcError>;

    /// Estimate gas for a call; `to = None` estimates a deployment.
    async fn estimate_gas(
        &self,
        from: Address,
        to: Option<Address>,
        data: &[u8],
    ) -> Result<u64, RpcError>;

    /// Current EIP-1559 fee-market suggestion.
    async fn fee_market(&self) -> Result<FeeMarket, RpcError>;

    /// The account's pending transaction count (next nonce).
    async fn transaction_count(&self, address: Address) -> Result<u64, RpcError>;

    /// Submit raw signed transaction bytes; returns the transaction hash.
    async fn send_raw_transaction(&self, raw: &[u8]) -> Result<TxHash, RpcError>;

    /// Look up a receipt. `Ok(None)` means not found, which is not an error.
    async fn transaction_receipt(&self, hash: TxHash) -> Result<Option<ReceiptInfo>, RpcError>;

    /// ERC-20 `name()` of the token contract.
    async fn erc20_name(&self, token: Address) -> Result<String, RpcError>;

    /// ERC-20 `symbol()` of the token contract.
    async fn erc20_symbol(&self, token: Address) -> Result<String, RpcError>;

    /// ERC-20 `decimals()` of the token contract.
    async fn erc20_decimals(&self, token: Address) -> Result<u8, RpcError>;

    /// ERC-20 `totalSupply()` in the token's smallest unit.
    async fn erc20_total_supply(&self, token: Address) -> Result<U256, RpcError>;

    /// ERC-20 `balanceOf(holder)` in the token's smallest unit.
    async fn erc20_balance_of(&self, token: Address, holder: Address) -> Result<U256, RpcError>;

    /// ERC-20 `allowance(owner, spender)` in the token's smallest unit.
    async fn erc20_allowance(
        &self,
        token: Address,
        owner: Address,
        spender: Address,
    ) -> Result<U256, RpcError>;
}
