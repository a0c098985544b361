//! Error types for the txforge library.
//!
//! This module provides strongly-typed errors for all public APIs in txforge.
//! It follows a hybrid approach:
//!
//! - **Module-specific errors** for fine-grained error handling (`EncodeError`,
//!   `FeeError`, `SigningError`, `SubmitError`)
//! - **Unified error type** ([`TxForgeError`]) for convenience when you don't
//!   need to distinguish between error sources
//!
//! Additionally, [`RpcError`] provides shared error variants for blockchain RPC
//! operations. It separates three failure modes that callers must be able to
//! tell apart: the call could not be made (`Connection`), the node rejected the
//! call and said why (`Rejected`), and the call outlived its budget (`Timeout`).
//!
//! Validation errors (`InvalidAddress`, `AmountOutOfRange`) are always raised
//! before any network traffic, so a failed pipeline entry point with one of
//! these kinds is guaranteed to have had no side effects.

mod encode;
mod fees;
mod rpc;
mod signing;
mod submit;

pub use encode::EncodeError;
pub use fees::FeeError;
pub use rpc::RpcError;
pub use signing::SigningError;
pub use submit::SubmitError;

/// Unified error type for all txforge operations.
///
/// This enum wraps all module-specific error types, providing a convenient way
/// to handle errors when you don't need to distinguish between error sources.
///
/// All module-specific error types automatically convert to `TxForgeError` via
/// `From` implementations, so you can use `?` to propagate errors naturally.
#[derive(Debug, thiserror::Error)]
pub enum TxForgeError {
    /// Validation or ABI-encoding error, raised before any network call.
    #[error("Encoding error: {0}")]
    Encode(#[from] EncodeError),

    /// Error from gas estimation or fee quoting.
    #[error("Fee error: {0}")]
    Fee(#[from] FeeError),

    /// Error from transaction signing or signer configuration.
    #[error("Signing error: {0}")]
    Signing(#[from] SigningError),

    /// Error from transaction broadcast or receipt tracking.
    #[error("Submission error: {0}")]
    Submit(#[from] SubmitError),

    /// Error from a blockchain RPC read.
    #[error("RPC error: {0}")]
    Rpc(#[from] RpcError),
}
