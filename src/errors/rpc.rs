//! Shared RPC error types for blockchain provider operations.
//!
//! These variants keep "the call could not be made" (connectivity) and "the
//! network rejected the call" (revert, underpriced, bad nonce) distinguishable.
//! The node's rejection message is always preserved verbatim so callers can
//! surface it.

/// Errors that can occur during blockchain RPC operations.
///
/// This error type captures common failure modes when interacting with
/// blockchain providers (e.g., via Alloy). It includes context about what
/// operation was being performed to aid in debugging.
#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    /// The RPC call could not be made.
    ///
    /// Network errors, DNS failures, provider downtime, malformed responses.
    /// The node never evaluated the request.
    #[error("RPC connection failed during {operation}")]
    Connection {
        /// Description of the operation that failed (e.g., "eth_estimateGas")
        operation: &'static str,
        /// The underlying transport error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The node received the call and rejected it.
    ///
    /// Reverts, underpriced transactions, nonce conflicts, malformed payloads.
    /// The node's own error message is preserved.
    #[error("Node rejected {operation}: {message}")]
    Rejected {
        /// Description of the operation that was rejected
        operation: &'static str,
        /// The rejection message returned by the node
        message: String,
    },

    /// The RPC call exceeded the configured timeout.
    #[error("RPC call {operation} timed out after {timeout_secs}s")]
    Timeout {
        /// Description of the operation that timed out
        operation: &'static str,
        /// The timeout budget that was exceeded, in seconds
        timeout_secs: u64,
    },

    /// The configured RPC endpoint URL could not be parsed.
    #[error("Invalid RPC endpoint URL: {0}")]
    ProviderUrlInvalid(String),
}

impl RpcError {
    /// Helper to create a `Connection` error from any error type.
    pub fn connection(
        operation: &'static str,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        RpcError::Connection {
            operation,
            source: Box::new(source),
        }
    }

    /// Helper to create a `Rejected` error with the node's message.
    pub fn rejected(operation: &'static str, message: impl Into<String>) -> Self {
        RpcError::Rejected {
            operation,
            message: message.into(),
        }
    }

    /// True if the node itself rejected the call (as opposed to a transport
    /// failure or timeout).
    pub fn is_rejection(&self) -> bool {
        matches!(self, RpcError::Rejected { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_preserves_message() {
        let err = RpcError::rejected("eth_sendRawTransaction", "nonce too low");
        assert!(err.to_string().contains("nonce too low"));
        assert!(err.is_rejection());
    }

    #[test]
    fn test_connection_is_not_rejection() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = RpcError::connection("eth_call", io);
        assert!(!err.is_rejection());
        assert!(err.to_string().contains("eth_call"));
    }
}
