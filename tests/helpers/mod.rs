// SPDX-FileCopyrightText: 2025 txforge contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Shared test doubles: an in-memory [`ChainRpc`] and a scripted
//! [`DeployPrompt`].

#![allow(dead_code)]

use alloy_primitives::{keccak256, Address, TxHash, U256};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use txforge::deploy::{DeployPrompt, DeployQuote};
use txforge::errors::RpcError;
use txforge::rpc::{ChainRpc, FeeMarket, ReceiptInfo};
use txforge::WEI_PER_GWEI;

/// Well-known Anvil test key; never used outside local test networks.
pub const TEST_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

/// Install a test subscriber so `RUST_LOG` controls test output.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// In-memory [`ChainRpc`] with configurable answers and recorded submissions.
///
/// `auto_mine` makes every submitted transaction immediately have a receipt,
/// so `wait_mined` returns on the first poll.
pub struct MockChainRpc {
    pub chain_id: u64,
    pub gas_estimate: u64,
    pub nonce: u64,
    pub fee_market: FeeMarket,
    pub auto_mine: bool,
    /// Status and pricing for auto-mined receipts.
    pub mined_status: bool,
    pub mined_gas_used: u128,
    pub mined_gas_price: u128,
    pub deployed_address: Option<Address>,
    /// When set, `send_raw_transaction` is rejected with this message.
    pub reject_send: Option<String>,
    /// When set, receipt lookups fail with a connection error.
    pub fail_receipt_lookup: bool,
    sent: Mutex<Vec<Vec<u8>>>,
    receipts: Mutex<HashMap<TxHash, ReceiptInfo>>,
}

impl Default for MockChainRpc {
    fn default() -> Self {
        Self {
            chain_id: 31337,
            gas_estimate: 100_000,
            nonce: 0,
            fee_market: FeeMarket {
                max_fee_per_gas: 20 * WEI_PER_GWEI,
                max_priority_fee_per_gas: 2 * WEI_PER_GWEI,
            },
            auto_mine: true,
            mined_status: true,
            mined_gas_used: 95_000,
            mined_gas_price: 3 * WEI_PER_GWEI,
            deployed_address: None,
            reject_send: None,
            fail_receipt_lookup: false,
            sent: Mutex::new(Vec::new()),
            receipts: Mutex::new(HashMap::new()),
        }
    }
}

impl MockChainRpc {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_gas_estimate(mut self, gas_estimate: u64) -> Self {
        self.gas_estimate = gas_estimate;
        self
    }

    pub fn with_nonce(mut self, nonce: u64) -> Self {
        self.nonce = nonce;
        self
    }

    pub fn with_fee_market(mut self, fee_market: FeeMarket) -> Self {
        self.fee_market = fee_market;
        self
    }

    /// Raw payloads accepted by `send_raw_transaction`, in order.
    pub fn sent(&self) -> Vec<Vec<u8>> {
        self.sent.lock().unwrap().clone()
    }

    /// Install a receipt for a known hash.
    pub fn insert_receipt(&self, hash: TxHash, receipt: ReceiptInfo) {
        self.receipts.lock().unwrap().insert(hash, receipt);
    }
}

#[async_trait]
impl ChainRpc for MockChainRpc {
    async fn chain_id(&self) -> Result<u64, RpcError> {
        Ok(self.chain_id)
    }

    async fn estimate_gas(
        &self,
        _from: Address,
        _to: Option<Address>,
        _data: &[u8],
    ) -> Result<u64, RpcError> {
        Ok(self.gas_estimate)
    }

    async fn fee_market(&self) -> Result<FeeMarket, RpcError> {
        Ok(self.fee_market)
    }

    async fn transaction_count(&self, _address: Address) -> Result<u64, RpcError> {
        Ok(self.nonce)
    }

    async fn send_raw_transaction(&self, raw: &[u8]) -> Result<TxHash, RpcError> {
        if let Some(reason) = &self.reject_send {
            return Err(RpcError::rejected("eth_sendRawTransaction", reason.clone()));
        }
        self.sent.lock().unwrap().push(raw.to_vec());
        let hash = TxHash::from(keccak256(raw));
        if self.auto_mine {
            self.insert_receipt(
                hash,
                ReceiptInfo {
                    status: self.mined_status,
                    gas_used: self.mined_gas_used,
                    effective_gas_price: self.mined_gas_price,
                    contract_address: self.deployed_address,
                    block_number: Some(1),
                },
            );
        }
        Ok(hash)
    }

    async fn transaction_receipt(&self, hash: TxHash) -> Result<Option<ReceiptInfo>, RpcError> {
        if self.fail_receipt_lookup {
            return Err(RpcError::connection(
                "eth_getTransactionReceipt",
                std::io::Error::new(std::io::ErrorKind::ConnectionReset, "connection reset"),
            ));
        }
        Ok(self.receipts.lock().unwrap().get(&hash).copied())
    }

    async fn erc20_name(&self, _token: Address) -> Result<String, RpcError> {
        Ok("Mock Token".to_string())
    }

    async fn erc20_symbol(&self, _token: Address) -> Result<String, RpcError> {
        Ok("MOCK".to_string())
    }

    async fn erc20_decimals(&self, _token: Address) -> Result<u8, RpcError> {
        Ok(18)
    }

    async fn erc20_total_supply(&self, _token: Address) -> Result<U256, RpcError> {
        Ok(U256::from(10u128.pow(24)))
    }

    async fn erc20_balance_of(&self, _token: Address, _holder: Address) -> Result<U256, RpcError> {
        Ok(U256::from(1_000u64) * U256::from(10u128.pow(18)))
    }

    async fn erc20_allowance(
        &self,
        _token: Address,
        _owner: Address,
        _spender: Address,
    ) -> Result<U256, RpcError> {
        Ok(U256::from(500u64))
    }
}

/// [`DeployPrompt`] answering from a script instead of a terminal.
pub struct ScriptedPrompt {
    /// Answer to the priority-fee question; `None` keeps the quote.
    pub tip: Option<String>,
    /// Answer to the confirmation question.
    pub answer: String,
    /// Quotes shown at the confirmation step.
    pub confirmed_quotes: Vec<DeployQuote>,
}

impl ScriptedPrompt {
    pub fn accepting() -> Self {
        Self {
            tip: None,
            answer: "y".to_string(),
            confirmed_quotes: Vec::new(),
        }
    }

    pub fn declining() -> Self {
        Self {
            tip: None,
            answer: "n".to_string(),
            confirmed_quotes: Vec::new(),
        }
    }

    pub fn with_tip(mut self, tip: &str) -> Self {
        self.tip = Some(tip.to_string());
        self
    }
}

impl DeployPrompt for ScriptedPrompt {
    fn priority_fee_gwei(&mut self, _quote: &DeployQuote) -> Option<String> {
        self.tip.clone()
    }

    fn confirm(&mut self, quote: &DeployQuote) -> String {
        self.confirmed_quotes.push(quote.clone());
        self.answer.clone()
    }
}
