//! Error types for address validation and calldata encoding.
//!
//! Every variant here is raised before any network call is made, so these
//! failures never leave side effects behind.

/// Errors from validating externally supplied addresses, amounts, and hex
/// values.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    /// The input is not a well-formed 20-byte hex address.
    ///
    /// Raised for wrong lengths, non-hex characters, and mixed-case inputs
    /// whose EIP-55 checksum does not match.
    #[error("Invalid address: {input}")]
    InvalidAddress {
        /// The rejected input string
        input: String,
    },

    /// The amount string is not a plain decimal integer.
    #[error("Invalid amount: {input}")]
    InvalidAmount {
        /// The rejected input string
        input: String,
    },

    /// The amount does not fit in an unsigned 256-bit integer.
    #[error("Amount out of range for uint256: {input}")]
    AmountOutOfRange {
        /// The rejected input string
        input: String,
    },

    /// A hex-encoded byte sequence could not be decoded.
    ///
    /// The offending input is deliberately not captured; signed transactions
    /// can be large and are opaque to this library.
    #[error("Invalid hex value for {field}")]
    InvalidHex {
        /// Name of the field that failed to decode
        field: &'static str,
    },

    /// The input is not a well-formed 32-byte transaction hash.
    #[error("Invalid transaction hash: {input}")]
    InvalidTxHash {
        /// The rejected input string
        input: String,
    },
}

impl EncodeError {
    /// Create an `InvalidAddress` error for the given input.
    pub fn invalid_address(input: impl Into<String>) -> Self {
        EncodeError::InvalidAddress {
            input: input.into(),
        }
    }

    /// Create an `InvalidAmount` error for the given input.
    pub fn invalid_amount(input: impl Into<String>) -> Self {
        EncodeError::InvalidAmount {
            input: input.into(),
        }
    }

    /// Create an `AmountOutOfRange` error for the given input.
    pub fn amount_out_of_range(input: impl Into<String>) -> Self {
        EncodeError::AmountOutOfRange {
            input: input.into(),
        }
    }
}
