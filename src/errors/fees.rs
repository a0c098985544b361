//! Error types for gas estimation and fee quoting.

use super::RpcError;

/// Errors that can occur while estimating gas or assembling a fee quote.
#[derive(Debug, thiserror::Error)]
pub enum FeeError {
    /// The network's gas estimation call failed.
    ///
    /// This usually means the call would revert. The underlying reason is
    /// preserved rather than substituting a default gas limit; guessing gas
    /// limits risks underfunded, stuck transactions.
    #[error("Gas estimation failed")]
    GasEstimationFailed {
        /// The underlying RPC failure, including any revert reason
        #[source]
        source: RpcError,
    },

    /// A fee quote violated `max_fee_per_gas >= max_priority_fee_per_gas`.
    ///
    /// This is a programming-invariant violation rather than a user-facing
    /// condition: the estimator never produces such a quote, and the builder
    /// refuses to let one reach the signer.
    #[error(
        "Invalid fee quote: max fee {max_fee_per_gas} wei is below priority fee {max_priority_fee_per_gas} wei"
    )]
    InvalidFeeQuote {
        /// The quote's absolute fee cap, in wei per gas
        max_fee_per_gas: u128,
        /// The quote's priority fee (tip), in wei per gas
        max_priority_fee_per_gas: u128,
    },

    /// RPC error while reading fee-market data.
    #[error("RPC error: {0}")]
    Rpc(#[from] RpcError),
}

impl FeeError {
    /// Create a `GasEstimationFailed` error wrapping an RPC failure.
    pub fn gas_estimation_failed(source: RpcError) -> Self {
        FeeError::GasEstimationFailed { source }
    }
}
