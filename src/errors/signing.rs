//! Error types for transaction signing and signer configuration.

use super::RpcError;

/// Errors that can occur while configuring a signer or signing a transaction.
#[derive(Debug, thiserror::Error)]
pub enum SigningError {
    /// No signing key is configured.
    ///
    /// The signer was constructed without a [`SigningConfig`], or the
    /// environment-based constructor found no key material.
    ///
    /// [`SigningConfig`]: crate::signer::SigningConfig
    #[error("No signing key configured")]
    MissingSigningKey,

    /// The target chain is not a known network.
    #[error("Unknown or unconfigured chain: {chain}")]
    ChainNotConfigured {
        /// The chain name or identifier that failed to resolve
        chain: String,
    },

    /// A lower-level cryptographic signing operation failed.
    ///
    /// Also covers malformed key material supplied at configuration time.
    #[error("Signing failed: {details}")]
    SigningFailed {
        /// Details about the signing failure; never includes key material
        details: String,
    },

    /// RPC error while resolving the account's pending nonce.
    #[error("RPC error: {0}")]
    Rpc(#[from] RpcError),
}

impl SigningError {
    /// Create a `SigningFailed` error with details.
    pub fn signing_failed(details: impl Into<String>) -> Self {
        SigningError::SigningFailed {
            details: details.into(),
        }
    }

    /// Create a `ChainNotConfigured` error for the given chain name.
    pub fn chain_not_configured(chain: impl Into<String>) -> Self {
        SigningError::ChainNotConfigured {
            chain: chain.into(),
        }
    }
}
