// SPDX-FileCopyrightText: 2025 txforge contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Transaction status tracking
//!
//! Status is a trichotomy on the receipt query: no receipt means
//! [`TransactionStatus::Pending`], a receipt with a success status means
//! [`Success`](TransactionStatus::Success), a receipt with a failure status
//! means [`Failed`](TransactionStatus::Failed). An absent receipt is never an
//! error; the transaction may simply not have been mined yet.

use alloy_primitives::TxHash;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tracing::{debug, info};

use crate::errors::SubmitError;
use crate::rpc::{ChainRpc, ReceiptInfo};

/// Terminal or in-flight state of a submitted transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    /// No receipt yet; the transaction has not been mined (or has not
    /// propagated to the queried node)
    Pending,
    /// Mined and executed successfully
    Success,
    /// Mined, but execution reverted
    Failed,
}

impl TransactionStatus {
    /// Whether the transaction has reached a terminal state.
    pub fn is_final(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Success => write!(f, "success"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// Default polling interval for [`StatusTracker::wait_mined`].
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Default overall deadline for [`StatusTracker::wait_mined`].
pub const DEFAULT_MINED_DEADLINE: Duration = Duration::from_secs(120);

/// Polls receipt state for submitted transactions.
#[derive(Debug, Clone)]
pub struct StatusTracker<C> {
    rpc: Arc<C>,
    poll_interval: Duration,
    deadline: Duration,
}

impl<C: ChainRpc> StatusTracker<C> {
    /// Create a tracker with the default polling cadence.
    pub fn new(rpc: Arc<C>) -> Self {
        Self {
            rpc,
            poll_interval: DEFAULT_POLL_INTERVAL,
            deadline: DEFAULT_MINED_DEADLINE,
        }
    }

    /// Override the polling interval.
    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Override the overall deadline for [`wait_mined`](Self::wait_mined).
    #[must_use]
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    /// Query the current status of a transaction.
    ///
    /// Only a failed receipt *query* is an error; an absent receipt is
    /// [`TransactionStatus::Pending`].
    pub async fn status(&self, hash: TxHash) -> Result<TransactionStatus, SubmitError> {
        let receipt = self
            .rpc
            .transaction_receipt(hash)
            .await
            .map_err(|e| SubmitError::receipt_lookup_failed(hash.to_string(), e))?;
        Ok(match receipt {
            None => TransactionStatus::Pending,
            Some(r) if r.status => TransactionStatus::Success,
            Some(_) => TransactionStatus::Failed,
        })
    }

    /// Poll until the transaction is mined, returning the full receipt.
    ///
    /// Returns the receipt whether execution succeeded or reverted; the
    /// caller inspects [`ReceiptInfo::status`]. Gives up with
    /// [`SubmitError::ConfirmationTimeout`] once the deadline elapses.
    pub async fn wait_mined(&self, hash: TxHash) -> Result<ReceiptInfo, SubmitError> {
        let started = Instant::now();
        loop {
            let receipt = self
                .rpc
                .transaction_receipt(hash)
                .await
                .map_err(|e| SubmitError::receipt_lookup_failed(hash.to_string(), e))?;
            if let Some(receipt) = receipt {
                info!(
                    %hash,
                    status = receipt.status,
                    gas_used = receipt.gas_used,
                    block = receipt.block_number,
                    "Transaction mined"
                );
                return Ok(receipt);
            }
            if started.elapsed() >= self.deadline {
                return Err(SubmitError::ConfirmationTimeout {
                    tx_hash: hash.to_string(),
                    waited_secs: self.deadline.as_secs(),
                });
            }
            debug!(%hash, "No receipt yet, polling again");
            sleep(self.poll_interval).await;
        }
    }
}
