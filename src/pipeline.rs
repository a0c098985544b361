// SPDX-FileCopyrightText: 2025 txforge contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Intent-to-descriptor pipeline
//!
//! [`TxPipeline::prepare`] is the composition of the building blocks: encode
//! the intent, estimate gas against the token contract, apply the margin,
//! quote fees (with an optional tip adjustment), and assemble the descriptor.
//! It performs exactly one RPC call, the gas estimation; fees come from the
//! fixed defaults so a prepared descriptor is reproducible on a dev network.

use alloy_primitives::{Address, U256};
use std::sync::Arc;
use tracing::info;

use crate::calldata::TxIntent;
use crate::descriptor::TxDescriptor;
use crate::errors::TxForgeError;
use crate::fees::FeeEstimator;
use crate::rpc::ChainRpc;

/// Builds priced, unsigned transaction descriptors from ERC-20 intents.
#[derive(Debug, Clone)]
pub struct TxPipeline<C> {
    fees: FeeEstimator<C>,
}

impl<C: ChainRpc> TxPipeline<C> {
    /// Create a pipeline over the given RPC capability.
    pub fn new(rpc: Arc<C>) -> Self {
        Self {
            fees: FeeEstimator::new(rpc),
        }
    }

    /// Turn an intent into a fully priced descriptor.
    ///
    /// `sender` is the account the gas estimate is computed for; estimation
    /// runs against its state (balances, allowances), so a sender without the
    /// funds to perform the operation fails here rather than on-chain.
    /// `tip_wei`, when given, replaces the default priority fee with the
    /// max fee shifted by the same delta.
    pub async fn prepare(
        &self,
        token: Address,
        sender: Address,
        intent: &TxIntent,
        tip_wei: Option<u128>,
    ) -> Result<TxDescriptor, TxForgeError> {
        let data = intent.encode();
        let gas_limit = self.fees.gas_limit_for(sender, Some(token), &data).await?;
        let quote = self.fees.quote(gas_limit, tip_wei)?;
        let descriptor = TxDescriptor::build(token, data, U256::ZERO, &quote)?;
        info!(
            function = intent.function_name(),
            %token,
            gas = gas_limit,
            "Prepared transaction descriptor"
        );
        Ok(descriptor)
    }
}
