// SPDX-FileCopyrightText: 2025 txforge contributors
//
// SPDX-License-Identifier: Apache-2.0

//! ERC-20 read-only queries
//!
//! Token metadata fields are fetched concurrently with `try_join!`; the
//! queries are independent, so there is no reason to serialize four round
//! trips.

use alloy_primitives::{Address, U256};
use futures::try_join;
use std::sync::Arc;
use tracing::debug;

use crate::errors::RpcError;
use crate::rpc::ChainRpc;

/// ERC-20 metadata for a token contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenInfo {
    /// Token contract address
    pub address: Address,
    /// `name()` of the token
    pub name: String,
    /// `symbol()` of the token
    pub symbol: String,
    /// `decimals()` of the token
    pub decimals: u8,
    /// `totalSupply()` in the token's smallest unit
    pub total_supply: U256,
}

/// Read-only view over an ERC-20 token contract.
#[derive(Debug, Clone)]
pub struct TokenReader<C> {
    rpc: Arc<C>,
}

impl<C: ChainRpc> TokenReader<C> {
    /// Create a reader over the given RPC capability.
    pub fn new(rpc: Arc<C>) -> Self {
        Self { rpc }
    }

    /// Fetch name, symbol, decimals, and total supply in one concurrent
    /// batch.
    pub async fn token_info(&self, token: Address) -> Result<TokenInfo, RpcError> {
        let (name, symbol, decimals, total_supply) = try_join!(
            self.rpc.erc20_name(token),
            self.rpc.erc20_symbol(token),
            self.rpc.erc20_decimals(token),
            self.rpc.erc20_total_supply(token),
        )?;
        debug!(%token, symbol, decimals, "Fetched token metadata");
        Ok(TokenInfo {
            address: token,
            name,
            symbol,
            decimals,
            total_supply,
        })
    }

    /// `balanceOf(holder)` in the token's smallest unit.
    pub async fn balance_of(&self, token: Address, holder: Address) -> Result<U256, RpcError> {
        self.rpc.erc20_balance_of(token, holder).await
    }

    /// `allowance(owner, spender)` in the token's smallest unit.
    pub async fn allowance(
        &self,
        token: Address,
        owner: Address,
        spender: Address,
    ) -> Result<U256, RpcError> {
        self.rpc.erc20_allowance(token, owner, spender).await
    }
}
