// SPDX-FileCopyrightText: 2025 txforge contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Transaction signing
//!
//! [`SigningConfig`] is an explicitly injected value: key material and target
//! chain are supplied at construction, never read from ambient process state
//! inside the signer. The `from_env` constructor exists as a convenience for
//! binaries and lives on the config type, not in the signing path, so tests
//! can use fixture keys.
//!
//! [`TxSigner`] resolves a missing nonce at signing time through a
//! per-account [`NonceSequencer`], builds an EIP-1559 transaction, and
//! returns the EIP-2718 encoded bytes as an opaque [`SignedTransaction`].
//! Concurrent signing requests for the same account therefore get distinct
//! nonces; a signature that is never broadcast leaves the sequencer ahead of
//! the chain until [`TxSigner::resync`] is called.
//!
//! # Security
//!
//! Private keys are never logged, never serialized, and redacted from `Debug`
//! output.

use alloy_chains::{Chain, NamedChain};
use alloy_consensus::{SignableTransaction, TxEip1559, TxEnvelope};
use alloy_eips::eip2718::Encodable2718;
use alloy_primitives::{hex, Address, Bytes, TxKind, U256};
use alloy_signer::SignerSync;
use alloy_signer_local::PrivateKeySigner;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

use crate::descriptor::TxDescriptor;
use crate::errors::{EncodeError, SigningError};
use crate::fees::FeeQuote;
use crate::nonce::NonceSequencer;
use crate::rpc::ChainRpc;

/// Environment variable holding the hex-encoded signing key.
pub const PRIVATE_KEY_ENV_VAR: &str = "PRIVATE_KEY";

/// Environment variable naming the target chain (e.g. `mainnet`, `sepolia`).
pub const CHAIN_ENV_VAR: &str = "CHAIN";

/// Injected signer configuration: a private key and the chain it signs for.
#[derive(Clone)]
pub struct SigningConfig {
    signer: PrivateKeySigner,
    chain_id: u64,
}

impl SigningConfig {
    /// Create a configuration from a hex private key (with or without `0x`)
    /// and a named chain.
    pub fn new(private_key_hex: &str, chain: NamedChain) -> Result<Self, SigningError> {
        let key_hex = private_key_hex
            .strip_prefix("0x")
            .unwrap_or(private_key_hex);
        let signer: PrivateKeySigner = key_hex
            .parse()
            .map_err(|_| SigningError::signing_failed("invalid private key format"))?;

        let config = Self {
            signer,
            chain_id: Chain::from_named(chain).id(),
        };
        info!(
            address = %config.address(),
            chain_id = config.chain_id,
            "Signer configured"
        );
        Ok(config)
    }

    /// Create a configuration resolving the chain by name.
    ///
    /// Unknown names fail with [`SigningError::ChainNotConfigured`].
    pub fn for_chain_name(private_key_hex: &str, chain_name: &str) -> Result<Self, SigningError> {
        let chain: NamedChain = chain_name
            .parse()
            .map_err(|_| SigningError::chain_not_configured(chain_name))?;
        Self::new(private_key_hex, chain)
    }

    /// Load a configuration from `PRIVATE_KEY` and `CHAIN` environment
    /// variables.
    ///
    /// A missing key is [`SigningError::MissingSigningKey`]; a missing or
    /// unknown chain name is [`SigningError::ChainNotConfigured`].
    pub fn from_env() -> Result<Self, SigningError> {
        let key =
            std::env::var(PRIVATE_KEY_ENV_VAR).map_err(|_| SigningError::MissingSigningKey)?;
        let chain = std::env::var(CHAIN_ENV_VAR)
            .map_err(|_| SigningError::chain_not_configured(format!("{CHAIN_ENV_VAR} not set")))?;
        Self::for_chain_name(&key, &chain)
    }

    /// The signing account's address.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// The chain identifier transactions are signed for.
    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }
}

impl std::fmt::Debug for SigningConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningConfig")
            .field("address", &self.signer.address())
            .field("chain_id", &self.chain_id)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

/// An opaque signed transaction: hex-encoded EIP-2718 bytes.
///
/// Produced by [`TxSigner`], consumed by
/// [`Broadcaster`](crate::broadcast::Broadcaster). Never inspected
/// structurally once produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignedTransaction(Bytes);

impl SignedTransaction {
    /// Wrap raw signed transaction bytes.
    pub fn new(raw: Bytes) -> Self {
        Self(raw)
    }

    /// Parse from a hex string, `0x` prefix optional.
    pub fn from_hex(input: &str) -> Result<Self, EncodeError> {
        let digits = input.strip_prefix("0x").unwrap_or(input);
        let raw = hex::decode(digits).map_err(|_| EncodeError::InvalidHex {
            field: "signed transaction",
        })?;
        Ok(Self(raw.into()))
    }

    /// The raw signed bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Lowercase `0x`-prefixed hex rendering.
    pub fn to_hex(&self) -> String {
        hex::encode_prefixed(&self.0)
    }
}

/// Signs transaction descriptors for a configured account and chain.
pub struct TxSigner<C> {
    nonces: NonceSequencer<C>,
    config: Option<SigningConfig>,
}

impl<C: ChainRpc> TxSigner<C> {
    /// Create a signer. `config = None` defers the [`MissingSigningKey`]
    /// failure to the first signing attempt, so read-only deployments can
    /// still construct the full pipeline.
    ///
    /// [`MissingSigningKey`]: SigningError::MissingSigningKey
    pub fn new(rpc: Arc<C>, config: Option<SigningConfig>) -> Self {
        Self {
            nonces: NonceSequencer::new(rpc),
            config,
        }
    }

    /// The configured signing address, if any.
    pub fn address(&self) -> Option<Address> {
        self.config.as_ref().map(|c| c.address())
    }

    /// Drop the signing account's nonce counter so the next resolution
    /// re-seeds from the network.
    pub async fn resync(&self) {
        if let Some(config) = &self.config {
            self.nonces.resync(config.address()).await;
        }
    }

    /// Sign a descriptor, reserving a nonce per account if absent.
    ///
    /// The descriptor's fee invariant is re-validated before signing; an
    /// inverted quote never reaches the key.
    pub async fn sign(&self, descriptor: &TxDescriptor) -> Result<SignedTransaction, SigningError> {
        let config = self.config.as_ref().ok_or(SigningError::MissingSigningKey)?;
        descriptor
            .validate()
            .map_err(|e| SigningError::signing_failed(e.to_string()))?;

        let nonce = match descriptor.nonce {
            Some(nonce) => nonce,
            None => {
                let nonce = self.nonces.reserve(config.address()).await?;
                debug!(nonce, address = %config.address(), "Reserved nonce");
                nonce
            }
        };

        let tx = TxEip1559 {
            chain_id: config.chain_id(),
            nonce,
            gas_limit: descriptor.gas_limit,
            max_fee_per_gas: descriptor.max_fee_per_gas,
            max_priority_fee_per_gas: descriptor.max_priority_fee_per_gas,
            to: TxKind::Call(descriptor.to),
            value: descriptor.value,
            access_list: Default::default(),
            input: descriptor.data.clone(),
        };
        sign_eip1559(config, tx)
    }

    /// Sign a contract-creation transaction with an already resolved nonce.
    ///
    /// Used by the deploy flow, which fetches the nonce up front to predict
    /// the contract address.
    pub fn sign_create(
        &self,
        init_code: &Bytes,
        value: U256,
        quote: &FeeQuote,
        nonce: u64,
    ) -> Result<SignedTransaction, SigningError> {
        let config = self.config.as_ref().ok_or(SigningError::MissingSigningKey)?;
        quote
            .validate()
            .map_err(|e| SigningError::signing_failed(e.to_string()))?;

        let tx = TxEip1559 {
            chain_id: config.chain_id(),
            nonce,
            gas_limit: quote.gas_limit,
            max_fee_per_gas: quote.max_fee_per_gas,
            max_priority_fee_per_gas: quote.max_priority_fee_per_gas,
            to: TxKind::Create,
            value,
            access_list: Default::default(),
            input: init_code.clone(),
        };
        sign_eip1559(config, tx)
    }
}

fn sign_eip1559(config: &SigningConfig, tx: TxEip1559) -> Result<SignedTransaction, SigningError> {
    let signature = config
        .signer
        .sign_hash_sync(&tx.signature_hash())
        .map_err(|e| SigningError::signing_failed(e.to_string()))?;
    let envelope: TxEnvelope = tx.into_signed(signature).into();
    Ok(SignedTransaction::new(envelope.encoded_2718().into()))
}
