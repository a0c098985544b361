//! Error types for transaction broadcast and receipt tracking.

use super::RpcError;

/// Errors that can occur while submitting a signed transaction or tracking
/// its receipt.
///
/// A receipt lookup that returns "not found" is **not** an error; it maps to
/// [`TransactionStatus::Pending`](crate::status::TransactionStatus). Only
/// transport failures and node-side errors become [`SubmitError`]s.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// The node refused the submitted transaction.
    ///
    /// Underpriced, nonce too low, malformed payload. The node's rejection
    /// reason is preserved verbatim.
    #[error("Broadcast rejected: {reason}")]
    BroadcastRejected {
        /// The rejection reason reported by the node
        reason: String,
    },

    /// A receipt query failed for a reason other than "not found".
    #[error("Receipt lookup failed for {tx_hash}")]
    ReceiptLookupFailed {
        /// The transaction hash whose receipt was queried
        tx_hash: String,
        /// The underlying RPC failure
        #[source]
        source: RpcError,
    },

    /// A blocking wait for a receipt exceeded its deadline.
    ///
    /// Only produced by [`StatusTracker::wait_mined`]; single-shot status
    /// queries never time out on their own.
    ///
    /// [`StatusTracker::wait_mined`]: crate::status::StatusTracker::wait_mined
    #[error("Transaction {tx_hash} not mined within {waited_secs}s")]
    ConfirmationTimeout {
        /// The transaction hash that was being waited on
        tx_hash: String,
        /// How long the caller waited, in seconds
        waited_secs: u64,
    },

    /// Connectivity failure while talking to the node.
    #[error("RPC error: {0}")]
    Rpc(#[from] RpcError),
}

impl SubmitError {
    /// Create a `BroadcastRejected` error with the node's reason.
    pub fn broadcast_rejected(reason: impl Into<String>) -> Self {
        SubmitError::BroadcastRejected {
            reason: reason.into(),
        }
    }

    /// Create a `ReceiptLookupFailed` error for the given hash.
    pub fn receipt_lookup_failed(tx_hash: impl Into<String>, source: RpcError) -> Self {
        SubmitError::ReceiptLookupFailed {
            tx_hash: tx_hash.into(),
            source,
        }
    }
}
