// SPDX-FileCopyrightText: 2025 txforge contributors
//
// SPDX-License-Identifier: Apache-2.0

//! String-boundary service
//!
//! [`Erc20Service`] is the outermost seam of the library: every input arrives
//! as a string (addresses, decimal amounts, hex payloads) and is validated
//! before any network call. Big integers leave as decimal strings, byte
//! sequences as lowercase `0x` hex. There are no partial results; each entry
//! point either returns a complete value or a [`TxForgeError`].

use alloy_primitives::{hex, TxHash};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::address::{checksum, parse_address};
use crate::broadcast::Broadcaster;
use crate::calldata::{parse_amount, TxIntent};
use crate::descriptor::TxDescriptor;
use crate::errors::{EncodeError, SubmitError, TxForgeError};
use crate::pipeline::TxPipeline;
use crate::rpc::ChainRpc;
use crate::signer::{SignedTransaction, SigningConfig, TxSigner};
use crate::status::{StatusTracker, TransactionStatus};
use crate::token::TokenReader;

/// Token metadata in wire form: checksummed address, decimal-string supply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenInfoDto {
    /// Checksummed token contract address
    pub token_id: String,
    /// `name()` of the token
    pub name: String,
    /// `symbol()` of the token
    pub symbol: String,
    /// `decimals()` of the token
    pub decimals: u8,
    /// `totalSupply()` as a decimal string
    pub total_supply: String,
}

/// ERC-20 read and transaction operations behind a string boundary.
pub struct Erc20Service<C> {
    reader: TokenReader<C>,
    pipeline: TxPipeline<C>,
    signer: TxSigner<C>,
    broadcaster: Broadcaster<C>,
    tracker: StatusTracker<C>,
}

impl<C: ChainRpc> Erc20Service<C> {
    /// Create a service over the given RPC capability.
    ///
    /// `signing` may be `None` for read-only use; signing entry points then
    /// fail with [`SigningError::MissingSigningKey`].
    ///
    /// [`SigningError::MissingSigningKey`]: crate::errors::SigningError::MissingSigningKey
    pub fn new(rpc: Arc<C>, signing: Option<SigningConfig>) -> Self {
        Self {
            reader: TokenReader::new(Arc::clone(&rpc)),
            pipeline: TxPipeline::new(Arc::clone(&rpc)),
            signer: TxSigner::new(Arc::clone(&rpc), signing),
            broadcaster: Broadcaster::new(Arc::clone(&rpc)),
            tracker: StatusTracker::new(rpc),
        }
    }

    /// Fetch token metadata.
    pub async fn token_info(&self, token: &str) -> Result<TokenInfoDto, TxForgeError> {
        let token = parse_address(token)?;
        let info = self.reader.token_info(token).await?;
        Ok(TokenInfoDto {
            token_id: checksum(&info.address),
            name: info.name,
            symbol: info.symbol,
            decimals: info.decimals,
            total_supply: info.total_supply.to_string(),
        })
    }

    /// `balanceOf(holder)` as a decimal string.
    pub async fn balance_of(&self, token: &str, holder: &str) -> Result<String, TxForgeError> {
        let token = parse_address(token)?;
        let holder = parse_address(holder)?;
        Ok(self.reader.balance_of(token, holder).await?.to_string())
    }

    /// `allowance(owner, spender)` as a decimal string.
    pub async fn allowance(
        &self,
        token: &str,
        owner: &str,
        spender: &str,
    ) -> Result<String, TxForgeError> {
        let token = parse_address(token)?;
        let owner = parse_address(owner)?;
        let spender = parse_address(spender)?;
        Ok(self
            .reader
            .allowance(token, owner, spender)
            .await?
            .to_string())
    }

    /// Build a priced `transfer` descriptor.
    ///
    /// `amount` is a decimal string in the token's smallest unit. All inputs
    /// are validated before the gas estimation call.
    pub async fn create_transfer(
        &self,
        token: &str,
        sender: &str,
        recipient: &str,
        amount: &str,
    ) -> Result<TxDescriptor, TxForgeError> {
        let token = parse_address(token)?;
        let sender = parse_address(sender)?;
        let intent = TxIntent::Transfer {
            recipient: parse_address(recipient)?,
            amount: parse_amount(amount)?,
        };
        self.pipeline.prepare(token, sender, &intent, None).await
    }

    /// Build a priced `approve` descriptor.
    pub async fn create_approve(
        &self,
        token: &str,
        sender: &str,
        spender: &str,
        amount: &str,
    ) -> Result<TxDescriptor, TxForgeError> {
        let token = parse_address(token)?;
        let sender = parse_address(sender)?;
        let intent = TxIntent::Approve {
            spender: parse_address(spender)?,
            amount: parse_amount(amount)?,
        };
        self.pipeline.prepare(token, sender, &intent, None).await
    }

    /// Build a priced `transferFrom` descriptor spending a prior allowance.
    pub async fn create_transfer_from(
        &self,
        token: &str,
        sender: &str,
        owner: &str,
        recipient: &str,
        amount: &str,
    ) -> Result<TxDescriptor, TxForgeError> {
        let token = parse_address(token)?;
        let sender = parse_address(sender)?;
        let intent = TxIntent::TransferFrom {
            owner: parse_address(owner)?,
            recipient: parse_address(recipient)?,
            amount: parse_amount(amount)?,
        };
        self.pipeline.prepare(token, sender, &intent, None).await
    }

    /// Sign a descriptor; returns the raw transaction as lowercase `0x` hex.
    ///
    /// A descriptor without a nonce has one resolved from the network first.
    pub async fn sign_transaction(
        &self,
        descriptor: &TxDescriptor,
    ) -> Result<String, TxForgeError> {
        Ok(self.signer.sign(descriptor).await?.to_hex())
    }

    /// Broadcast a hex-encoded signed transaction; returns the transaction
    /// hash as lowercase `0x` hex. The `0x` prefix on input is optional.
    ///
    /// A node rejection drops the signing account's nonce counter, since a
    /// rejection usually means the reserved nonce no longer matches the
    /// chain.
    pub async fn send_signed_transaction(&self, raw_hex: &str) -> Result<String, TxForgeError> {
        let signed = SignedTransaction::from_hex(raw_hex)?;
        match self.broadcaster.submit(&signed).await {
            Ok(hash) => Ok(format!("{hash:#x}")),
            Err(err) => {
                if matches!(err, SubmitError::BroadcastRejected { .. }) {
                    self.signer.resync().await;
                }
                Err(err.into())
            }
        }
    }

    /// Current status of a transaction by hash. The `0x` prefix is optional.
    pub async fn transaction_status(
        &self,
        tx_hash: &str,
    ) -> Result<TransactionStatus, TxForgeError> {
        let hash = parse_tx_hash(tx_hash)?;
        Ok(self.tracker.status(hash).await?)
    }
}

fn parse_tx_hash(input: &str) -> Result<TxHash, EncodeError> {
    let digits = input.strip_prefix("0x").unwrap_or(input);
    if digits.len() != 64 {
        return Err(EncodeError::InvalidTxHash {
            input: input.to_string(),
        });
    }
    let mut raw = [0u8; 32];
    hex::decode_to_slice(digits, &mut raw).map_err(|_| EncodeError::InvalidTxHash {
        input: input.to_string(),
    })?;
    Ok(TxHash::from(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tx_hash_with_and_without_prefix() {
        let hex64 = "11".repeat(32);
        let a = parse_tx_hash(&format!("0x{hex64}")).unwrap();
        let b = parse_tx_hash(&hex64).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.as_slice(), [0x11u8; 32]);
    }

    #[test]
    fn test_parse_tx_hash_rejects_malformed() {
        for bad in ["", "0x", "0x1234", "zz".repeat(32).as_str()] {
            assert!(
                matches!(parse_tx_hash(bad), Err(EncodeError::InvalidTxHash { .. })),
                "expected InvalidTxHash for {bad:?}"
            );
        }
    }
}
