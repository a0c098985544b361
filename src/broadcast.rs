// SPDX-FileCopyrightText: 2025 txforge contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Raw transaction broadcast
//!
//! Submission is a single attempt: no internal retries. A node that rejects
//! the payload (revert, underpriced, nonce conflict) surfaces as
//! [`SubmitError::BroadcastRejected`] with the node's message; re-broadcasting
//! blindly risks double submission once the original lands, so retry policy
//! belongs to the caller.

use alloy_primitives::TxHash;
use std::sync::Arc;
use tracing::info;

use crate::errors::{RpcError, SubmitError};
use crate::rpc::ChainRpc;
use crate::signer::SignedTransaction;

/// Submits signed transactions to the network.
#[derive(Debug, Clone)]
pub struct Broadcaster<C> {
    rpc: Arc<C>,
}

impl<C: ChainRpc> Broadcaster<C> {
    /// Create a broadcaster over the given RPC capability.
    pub fn new(rpc: Arc<C>) -> Self {
        Self { rpc }
    }

    /// Submit a signed transaction; returns the transaction hash on
    /// acceptance.
    ///
    /// Acceptance means the node took the transaction into its pool, not that
    /// it is mined; track inclusion with
    /// [`StatusTracker`](crate::status::StatusTracker).
    pub async fn submit(&self, signed: &SignedTransaction) -> Result<TxHash, SubmitError> {
        let hash = self
            .rpc
            .send_raw_transaction(signed.as_bytes())
            .await
            .map_err(|e| match e {
                RpcError::Rejected { message, .. } => SubmitError::broadcast_rejected(message),
                other => SubmitError::Rpc(other),
            })?;
        info!(%hash, "Transaction broadcast");
        Ok(hash)
    }
}
