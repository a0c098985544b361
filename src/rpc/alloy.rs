// SPDX-FileCopyrightText: 2025 txforge contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Alloy-backed [`ChainRpc`] implementation
//!
//! Every call is wrapped in a `tokio` timeout so a slow or unresponsive
//! endpoint cannot hang a caller indefinitely. Node-side rejections (reverts,
//! underpriced transactions, bad nonces) map to [`RpcError::Rejected`] with
//! the node's message preserved; transport failures map to
//! [`RpcError::Connection`].

use alloy_network::TransactionBuilder;
use alloy_primitives::{Address, Bytes, TxHash, TxKind, U256};
use alloy_provider::{Provider, ProviderBuilder, RootProvider};
use alloy_rpc_types::TransactionRequest;
use async_trait::async_trait;
use std::future::Future;
use std::time::Duration;
use tokio::time::timeout;
use tracing::debug;

use super::{ChainRpc, FeeMarket, ReceiptInfo};
use crate::calldata::IERC20;
use crate::errors::RpcError;

/// Default per-call timeout for RPC operations.
pub const DEFAULT_RPC_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the HTTP RPC connection.
///
/// # Example
///
/// ```rust,ignore
/// use txforge::rpc::{connect_http, RpcConfig};
/// use std::time::Duration;
///
/// let rpc = connect_http(
///     RpcConfig::new("http://127.0.0.1:8545").with_timeout(Duration::from_secs(10)),
/// )?;
/// ```
#[derive(Debug, Clone)]
pub struct RpcConfig {
    /// RPC endpoint URL
    pub url: String,
    /// Per-call timeout
    pub timeout: Duration,
}

impl RpcConfig {
    /// Create a configuration for the given endpoint URL.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: DEFAULT_RPC_TIMEOUT,
        }
    }

    /// Set the per-call timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Connect an [`AlloyRpc`] over HTTP.
///
/// # Errors
///
/// Returns [`RpcError::ProviderUrlInvalid`] if the URL cannot be parsed. No
/// network traffic happens at construction time.
pub fn connect_http(config: RpcConfig) -> Result<AlloyRpc<RootProvider>, RpcError> {
    let url: url::Url = config
        .url
        .parse()
        .map_err(|e| RpcError::ProviderUrlInvalid(format!("{}: {e}", config.url)))?;
    let provider = ProviderBuilder::new()
        .disable_recommended_fillers()
        .connect_http(url);
    Ok(AlloyRpc::new(provider, config.timeout))
}

/// [`ChainRpc`] implementation over an alloy provider.
#[derive(Clone)]
pub struct AlloyRpc<P> {
    provider: P,
    timeout: Duration,
}

impl<P> AlloyRpc<P> {
    /// Wrap a provider with the given per-call timeout.
    pub fn new(provider: P, timeout: Duration) -> Self {
        Self { provider, timeout }
    }

    /// Access the underlying provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }
}

impl<P> AlloyRpc<P> {
    async fn bounded<T, F>(&self, operation: &'static str, fut: F) -> Result<T, RpcError>
    where
        F: Future<Output = Result<T, RpcError>>,
    {
        match timeout(self.timeout, fut).await {
            Ok(result) => result,
            Err(_) => Err(RpcError::Timeout {
                operation,
                timeout_secs: self.timeout.as_secs(),
            }),
        }
    }
}

fn classify_transport(operation: &'static str, err: alloy_transport::TransportError) -> RpcError {
    match err {
        alloy_json_rpc::RpcError::ErrorResp(payload) => {
            RpcError::rejected(operation, payload.to_string())
        }
        other => RpcError::connection(operation, other),
    }
}

fn classify_contract(operation: &'static str, err: alloy_contract::Error) -> RpcError {
    match err {
        alloy_contract::Error::TransportError(transport) => {
            classify_transport(operation, transport)
        }
        other => RpcError::connection(operation, other),
    }
}

impl<P: Provider + Clone + 'static> AlloyRpc<P> {
    fn erc20(&self, token: Address) -> IERC20::IERC20Instance<P> {
        IERC20::new(token, self.provider.clone())
    }
}

#[async_trait]
impl<P: Provider + Clone + 'static> ChainRpc for AlloyRpc<P> {
    async fn chain_id(&self) -> Result<u64, RpcError> {
        const OP: &str = "eth_chainId";
        self.bounded(OP, async {
            self.provider
                .get_chain_id()
                .await
                .map_err(|e| classify_transport(OP, e))
        })
        .await
    }

    async fn estimate_gas(
        &self,
        from: Address,
        to: Option<Address>,
        data: &[u8],
    ) -> Result<u64, RpcError> {
        const OP: &str = "eth_estimateGas";
        let request = TransactionRequest::default()
            .with_from(from)
            .with_kind(match to {
                Some(address) => TxKind::Call(address),
                None => TxKind::Create,
            })
            .with_input(Bytes::copy_from_slice(data));
        self.bounded(OP, async {
            self.provider
                .estimate_gas(request)
                .await
                .map_err(|e| classify_transport(OP, e))
        })
        .await
    }

    async fn fee_market(&self) -> Result<FeeMarket, RpcError> {
        const OP: &str = "eth_feeHistory";
        let estimation = self
            .bounded(OP, async {
                self.provider
                    .estimate_eip1559_fees()
                    .await
                    .map_err(|e| classify_transport(OP, e))
            })
            .await?;
        Ok(FeeMarket {
            max_fee_per_gas: estimation.max_fee_per_gas,
            max_priority_fee_per_gas: estimation.max_priority_fee_per_gas,
        })
    }

    async fn transaction_count(&self, address: Address) -> Result<u64, RpcError> {
        const OP: &str = "eth_getTransactionCount";
        self.bounded(OP, async {
            self.provider
                .get_transaction_count(address)
                .pending()
                .await
                .map_err(|e| classify_transport(OP, e))
        })
        .await
    }

    async fn send_raw_transaction(&self, raw: &[u8]) -> Result<TxHash, RpcError> {
        const OP: &str = "eth_sendRawTransaction";
        let pending = self
            .bounded(OP, async {
                self.provider
                    .send_raw_transaction(raw)
                    .await
                    .map_err(|e| classify_transport(OP, e))
            })
            .await?;
        let hash = *pending.tx_hash();
        debug!(%hash, "Raw transaction accepted by node");
        Ok(hash)
    }

    async fn transaction_receipt(&self, hash: TxHash) -> Result<Option<ReceiptInfo>, RpcError> {
        const OP: &str = "eth_getTransactionReceipt";
        let receipt = self
            .bounded(OP, async {
                self.provider
                    .get_transaction_receipt(hash)
                    .await
                    .map_err(|e| classify_transport(OP, e))
            })
            .await?;
        Ok(receipt.map(|r| ReceiptInfo {
            status: r.status(),
            gas_used: r.gas_used.into(),
            effective_gas_price: r.effective_gas_price,
            contract_address: r.contract_address,
            block_number: r.block_number,
        }))
    }

    async fn erc20_name(&self, token: Address) -> Result<String, RpcError> {
        const OP: &str = "erc20 name()";
        self.bounded(OP, async {
            self.erc20(token)
                .name()
                .call()
                .await
                .map_err(|e| classify_contract(OP, e))
        })
        .await
    }

    async fn erc20_symbol(&self, token: Address) -> Result<String, RpcError> {
        const OP: &str = "erc20 symbol()";
        self.bounded(OP, async {
            self.erc20(token)
                .symbol()
                .call()
                .await
                .map_err(|e| classify_contract(OP, e))
        })
        .await
    }

    async fn erc20_decimals(&self, token: Address) -> Result<u8, RpcError> {
        const OP: &str = "erc20 decimals()";
        self.bounded(OP, async {
            self.erc20(token)
                .decimals()
                .call()
                .await
                .map_err(|e| classify_contract(OP, e))
        })
        .await
    }

    async fn erc20_total_supply(&self, token: Address) -> Result<U256, RpcError> {
        const OP: &str = "erc20 totalSupply()";
        self.bounded(OP, async {
            self.erc20(token)
                .totalSupply()
                .call()
                .await
                .map_err(|e| classify_contract(OP, e))
        })
        .await
    }

    async fn erc20_balance_of(&self, token: Address, holder: Address) -> Result<U256, RpcError> {
        const OP: &str = "erc20 balanceOf()";
        self.bounded(OP, async {
            self.erc20(token)
                .balanceOf(holder)
                .call()
                .await
                .map_err(|e| classify_contract(OP, e))
        })
        .await
    }

    async fn erc20_allowance(
        &self,
        token: Address,
        owner: Address,
        spender: Address,
    ) -> Result<U256, RpcError> {
        const OP: &str = "erc20 allowance()";
        self.bounded(OP, async {
            self.erc20(token)
                .allowance(owner, spender)
                .call()
                .await
                .map_err(|e| classify_contract(OP, e))
        })
        .await
    }
}
