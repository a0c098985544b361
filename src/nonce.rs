// SPDX-FileCopyrightText: 2025 txforge contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Per-account nonce reservation
//!
//! Resolving "next nonce" by querying the network at sign time races under
//! concurrency: two signers for the same account can observe the same
//! transaction count and produce conflicting transactions.
//! [`NonceSequencer`] serializes reservation per process: a monotonic counter
//! per account, seeded from the network on first use and guarded by one lock,
//! so concurrent signing requests each get a distinct nonce.
//!
//! The counter drifts if a reserved nonce is never broadcast (an abandoned
//! signature, a rejected submission). [`NonceSequencer::resync`] drops the
//! counter so the next reservation re-seeds from the network.

use alloy_primitives::Address;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

use crate::errors::RpcError;
use crate::rpc::ChainRpc;

/// Mutex-guarded per-account nonce counters, seeded from the network.
pub struct NonceSequencer<C> {
    rpc: Arc<C>,
    counters: Mutex<HashMap<Address, u64>>,
}

impl<C: ChainRpc> NonceSequencer<C> {
    /// Create a sequencer over the given RPC capability.
    pub fn new(rpc: Arc<C>) -> Self {
        Self {
            rpc,
            counters: Mutex::new(HashMap::new()),
        }
    }

    /// Reserve the next nonce for an account.
    ///
    /// The first reservation for an account seeds the counter from the
    /// network's pending transaction count; the lock is held across the seed
    /// so concurrent callers cannot both observe the network value.
    pub async fn reserve(&self, account: Address) -> Result<u64, RpcError> {
        let mut counters = self.counters.lock().await;
        let next = match counters.get(&account) {
            Some(n) => *n,
            None => {
                let seeded = self.rpc.transaction_count(account).await?;
                debug!(%account, seeded, "Seeded nonce counter from network");
                seeded
            }
        };
        counters.insert(account, next + 1);
        Ok(next)
    }

    /// Drop the account's counter; the next reservation re-seeds from the
    /// network.
    ///
    /// Call after a rejected broadcast or an abandoned signature, when the
    /// local counter may no longer match the chain.
    pub async fn resync(&self, account: Address) {
        self.counters.lock().await.remove(&account);
        debug!(%account, "Nonce counter dropped, will re-seed");
    }
}
