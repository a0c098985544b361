// SPDX-FileCopyrightText: 2025 txforge contributors
//
// SPDX-License-Identifier: Apache-2.0

//! ERC-20 transaction pipeline: validate, encode, price, sign, broadcast,
//! track.
//!
//! The stages are independent components composed by [`TxPipeline`] and the
//! string-boundary [`Erc20Service`]; contract deployment with a human
//! confirmation gate lives in [`deploy`]. All network access goes through the
//! [`rpc::ChainRpc`] capability trait, so every stage is testable against a
//! mock.

pub mod address;
pub mod api;
pub mod broadcast;
pub mod calldata;
pub mod deploy;
pub mod descriptor;
pub mod errors;
pub mod fees;
pub mod nonce;
pub mod pipeline;
pub mod rpc;
pub mod signer;
pub mod status;
pub mod token;
pub mod wei;

pub use address::{checksum, parse_address};
pub use api::{Erc20Service, TokenInfoDto};
pub use broadcast::Broadcaster;
pub use calldata::{parse_amount, TxIntent, IERC20};
pub use deploy::{DeployFlow, DeployOutcome, DeployPrompt, DeployQuote, StdinPrompt};
pub use descriptor::TxDescriptor;
pub use errors::TxForgeError;
pub use fees::{apply_gas_margin, parse_gwei, FeeEstimator, FeeQuote};
pub use nonce::NonceSequencer;
pub use pipeline::TxPipeline;
pub use rpc::{connect_http, AlloyRpc, ChainRpc, FeeMarket, ReceiptInfo, RpcConfig};
pub use signer::{SignedTransaction, SigningConfig, TxSigner};
pub use status::{StatusTracker, TransactionStatus};
pub use token::{TokenInfo, TokenReader};
pub use wei::{WeiAmount, WEI_PER_GWEI};
