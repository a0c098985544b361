// SPDX-FileCopyrightText: 2025 txforge contributors
//
// SPDX-License-Identifier: Apache-2.0

//! ERC-20 calldata encoding
//!
//! The `sol!`-generated [`IERC20`] interface provides both the typed read
//! bindings used by the RPC layer and the `SolCall` encoders for the three
//! write operations. Encoding is pure: 4-byte selector followed by 32-byte
//! ABI words (addresses left-padded, integers big-endian unsigned).
//!
//! The three write operations share one tagged representation, [`TxIntent`],
//! so the estimate/build pipeline is written once and dispatches encoding by
//! variant.

use alloy_primitives::{Bytes, U256};
use alloy_sol_types::{sol, SolCall};

use crate::errors::EncodeError;

sol! {
    /// Standard ERC-20 token interface.
    #[sol(rpc)]
    #[derive(Debug)]
    interface IERC20 {
        function name() external view returns (string);
        function symbol() external view returns (string);
        function decimals() external view returns (uint8);
        function totalSupply() external view returns (uint256);
        function balanceOf(address account) external view returns (uint256);
        function allowance(address owner, address spender) external view returns (uint256);
        function transfer(address to, uint256 amount) external returns (bool);
        function approve(address spender, uint256 amount) external returns (bool);
        function transferFrom(address from, address to, uint256 amount) external returns (bool);
    }
}

/// A logical ERC-20 write operation, before encoding.
///
/// All three variants flow through the same encode → estimate → build
/// pipeline; only the calldata differs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TxIntent {
    /// `transfer(recipient, amount)` from the transaction sender's balance.
    Transfer {
        /// Recipient of the tokens
        recipient: alloy_primitives::Address,
        /// Amount in the token's smallest unit
        amount: U256,
    },
    /// `approve(spender, amount)` on the transaction sender's balance.
    Approve {
        /// Account being granted the allowance
        spender: alloy_primitives::Address,
        /// Allowance in the token's smallest unit
        amount: U256,
    },
    /// `transferFrom(owner, recipient, amount)` spending a prior allowance.
    TransferFrom {
        /// Account whose balance is debited
        owner: alloy_primitives::Address,
        /// Recipient of the tokens
        recipient: alloy_primitives::Address,
        /// Amount in the token's smallest unit
        amount: U256,
    },
}

impl TxIntent {
    /// ABI-encode this intent into contract calldata.
    pub fn encode(&self) -> Bytes {
        match *self {
            TxIntent::Transfer { recipient, amount } => IERC20::transferCall {
                to: recipient,
                amount,
            }
            .abi_encode()
            .into(),
            TxIntent::Approve { spender, amount } => {
                IERC20::approveCall { spender, amount }.abi_encode().into()
            }
            TxIntent::TransferFrom {
                owner,
                recipient,
                amount,
            } => IERC20::transferFromCall {
                from: owner,
                to: recipient,
                amount,
            }
            .abi_encode()
            .into(),
        }
    }

    /// Name of the underlying ERC-20 function, for logging.
    pub fn function_name(&self) -> &'static str {
        match self {
            TxIntent::Transfer { .. } => "transfer",
            TxIntent::Approve { .. } => "approve",
            TxIntent::TransferFrom { .. } => "transferFrom",
        }
    }
}

/// Parse a decimal amount string into a `U256`.
///
/// Amounts cross the library boundary as decimal strings to avoid precision
/// loss. A value needing more than 256 bits fails with
/// [`EncodeError::AmountOutOfRange`]; anything that is not a plain decimal
/// integer fails with [`EncodeError::InvalidAmount`].
///
/// # Examples
///
/// ```
/// use alloy_primitives::U256;
/// use txforge::parse_amount;
///
/// assert_eq!(parse_amount("1000000000000000000").unwrap(), U256::from(10u128.pow(18)));
/// assert!(parse_amount("-5").is_err());
/// ```
pub fn parse_amount(input: &str) -> Result<U256, EncodeError> {
    let digits = input.trim();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(EncodeError::invalid_amount(input));
    }
    U256::from_str_radix(digits, 10).map_err(|_| EncodeError::amount_out_of_range(input))
}
