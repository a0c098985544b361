// SPDX-FileCopyrightText: 2025 txforge contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Interactive contract deployment
//!
//! [`DeployFlow`] runs the deployment state machine: quote (gas estimate with
//! margin, live fee-market pricing, predicted contract address), an optional
//! priority-fee override, an explicit confirmation gate, then sign, submit,
//! and wait for the receipt. Declining the confirmation aborts with zero
//! network mutation.
//!
//! The human decision source is the [`DeployPrompt`] trait; [`StdinPrompt`]
//! talks to a terminal and tests script answers without one.

use alloy_primitives::{Address, Bytes, TxHash, U256};
use std::io::{BufRead, Write as _};
use std::sync::Arc;
use tracing::{info, warn};

use crate::address::checksum;
use crate::broadcast::Broadcaster;
use crate::errors::TxForgeError;
use crate::fees::{parse_gwei, FeeEstimator, FeeQuote};
use crate::rpc::ChainRpc;
use crate::signer::{SigningConfig, TxSigner};
use crate::status::StatusTracker;
use crate::wei::{WeiAmount, WEI_PER_GWEI};

/// States of the deployment flow, in order of progression.
///
/// `Aborted` is reachable from any state before `Submitted`; once a
/// transaction is broadcast the flow only moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployState {
    /// Gas estimated, fees quoted, contract address predicted
    Quoted,
    /// A caller-supplied priority fee replaced the market tip
    Overridden,
    /// The operator accepted the quote
    Confirmed,
    /// Signed transaction broadcast, hash known
    Submitted,
    /// Receipt obtained
    Mined,
    /// Final cost reported
    Reported,
    /// Declined before submission; nothing was broadcast
    Aborted,
}

impl std::fmt::Display for DeployState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Quoted => "quoted",
            Self::Overridden => "overridden",
            Self::Confirmed => "confirmed",
            Self::Submitted => "submitted",
            Self::Mined => "mined",
            Self::Reported => "reported",
            Self::Aborted => "aborted",
        };
        f.write_str(name)
    }
}

/// Everything the operator sees before deciding whether to deploy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployQuote {
    /// Deploying account
    pub sender: Address,
    /// Nonce the deployment will consume
    pub nonce: u64,
    /// Contract address the deployment will create
    pub predicted_address: Address,
    /// Fee quote, gas margin already applied
    pub fees: FeeQuote,
}

impl DeployQuote {
    /// Worst-case deployment cost at the quoted pricing.
    pub fn estimated_cost(&self) -> WeiAmount {
        self.fees.estimated_cost()
    }
}

/// Result of a deployment run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployOutcome {
    /// Mined successfully.
    Deployed {
        /// Address of the deployed contract
        contract_address: Address,
        /// Hash of the deployment transaction
        tx_hash: TxHash,
        /// Gas actually consumed
        gas_used: u128,
        /// Actual cost: `gas_used * effective_gas_price`
        cost: WeiAmount,
    },
    /// The operator declined; nothing was broadcast.
    Aborted,
    /// Mined, but the deployment reverted.
    Failed {
        /// Hash of the reverted transaction
        tx_hash: TxHash,
    },
}

/// Source of the human decisions in the deploy flow.
///
/// Kept synchronous: answers come from a terminal (or a test script), not
/// from the network.
pub trait DeployPrompt {
    /// Ask for an optional priority-fee override in gwei.
    ///
    /// `None` or an empty answer keeps the quoted tip.
    fn priority_fee_gwei(&mut self, quote: &DeployQuote) -> Option<String>;

    /// Present the final quote and ask for confirmation.
    ///
    /// Any answer other than `n`/`no` (case-insensitive) proceeds.
    fn confirm(&mut self, quote: &DeployQuote) -> String;
}

/// [`DeployPrompt`] over a terminal: quote on stdout, answers from stdin.
#[derive(Debug, Default)]
pub struct StdinPrompt;

impl StdinPrompt {
    fn read_answer(prompt: &str) -> Option<String> {
        print!("{prompt}");
        std::io::stdout().flush().ok()?;
        let mut answer = String::new();
        std::io::stdin().lock().read_line(&mut answer).ok()?;
        Some(answer.trim().to_string())
    }

    fn print_quote(quote: &DeployQuote) {
        println!("Deploying from {}", checksum(&quote.sender));
        println!(
            "Predicted contract address: {}",
            checksum(&quote.predicted_address)
        );
        println!("Gas limit: {}", quote.fees.gas_limit);
        println!(
            "Max fee: {} gwei, priority fee: {} gwei",
            quote.fees.max_fee_per_gas / WEI_PER_GWEI,
            quote.fees.max_priority_fee_per_gas / WEI_PER_GWEI,
        );
        println!("Estimated max cost: {}", quote.estimated_cost());
    }
}

impl DeployPrompt for StdinPrompt {
    fn priority_fee_gwei(&mut self, quote: &DeployQuote) -> Option<String> {
        Self::print_quote(quote);
        Self::read_answer("Priority fee override in gwei (empty keeps the quote): ")
    }

    fn confirm(&mut self, quote: &DeployQuote) -> String {
        Self::print_quote(quote);
        Self::read_answer("Deploy? [Y/n]: ").unwrap_or_default()
    }
}

fn is_decline(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "n" | "no")
}

/// Runs the interactive deployment state machine.
pub struct DeployFlow<C> {
    rpc: Arc<C>,
    fees: FeeEstimator<C>,
    signer: TxSigner<C>,
    broadcaster: Broadcaster<C>,
    tracker: StatusTracker<C>,
    sender: Address,
}

impl<C: ChainRpc> DeployFlow<C> {
    /// Create a flow for the given signing account.
    pub fn new(rpc: Arc<C>, signing: SigningConfig) -> Self {
        let sender = signing.address();
        Self {
            fees: FeeEstimator::new(Arc::clone(&rpc)),
            signer: TxSigner::new(Arc::clone(&rpc), Some(signing)),
            broadcaster: Broadcaster::new(Arc::clone(&rpc)),
            tracker: StatusTracker::new(Arc::clone(&rpc)),
            rpc,
            sender,
        }
    }

    /// Override the receipt tracker (polling interval, deadline).
    #[must_use]
    pub fn with_tracker(mut self, tracker: StatusTracker<C>) -> Self {
        self.tracker = tracker;
        self
    }

    /// Quote a deployment: fetch the nonce, predict the contract address,
    /// estimate gas with margin, and price against the live fee market.
    pub async fn quote(&self, init_code: &Bytes) -> Result<DeployQuote, TxForgeError> {
        let nonce = self.rpc.transaction_count(self.sender).await?;
        let predicted_address = self.sender.create(nonce);
        let gas_limit = self.fees.gas_limit_for(self.sender, None, init_code).await?;
        let fees = self.fees.market_quote(gas_limit).await?;
        let quote = DeployQuote {
            sender: self.sender,
            nonce,
            predicted_address,
            fees,
        };
        info!(
            state = %DeployState::Quoted,
            nonce,
            gas = gas_limit,
            predicted = %quote.predicted_address,
            "Deployment quoted"
        );
        Ok(quote)
    }

    /// Run the full flow: quote, optional tip override, confirmation gate,
    /// sign, submit, wait for the receipt, report the actual cost.
    ///
    /// Declining the confirmation returns [`DeployOutcome::Aborted`] without
    /// broadcasting anything. An unparseable tip override is ignored with a
    /// warning rather than failing the run.
    pub async fn run(
        &self,
        init_code: &Bytes,
        value: U256,
        prompt: &mut dyn DeployPrompt,
    ) -> Result<DeployOutcome, TxForgeError> {
        let mut quote = self.quote(init_code).await?;

        if let Some(answer) = prompt.priority_fee_gwei(&quote) {
            let trimmed = answer.trim();
            if !trimmed.is_empty() {
                match parse_gwei(trimmed) {
                    Some(tip_wei) => {
                        quote.fees = quote.fees.with_tip(tip_wei)?;
                        info!(
                            state = %DeployState::Overridden,
                            tip_wei,
                            max_fee = quote.fees.max_fee_per_gas,
                            "Priority fee overridden"
                        );
                    }
                    None => {
                        warn!(input = trimmed, "Unparseable gwei value, keeping quote");
                    }
                }
            }
        }

        if is_decline(&prompt.confirm(&quote)) {
            info!(state = %DeployState::Aborted, "Deployment declined");
            return Ok(DeployOutcome::Aborted);
        }
        info!(state = %DeployState::Confirmed, "Deployment confirmed");

        let signed = self
            .signer
            .sign_create(init_code, value, &quote.fees, quote.nonce)?;
        let tx_hash = self.broadcaster.submit(&signed).await?;
        info!(state = %DeployState::Submitted, %tx_hash, "Deployment submitted");

        let receipt = self.tracker.wait_mined(tx_hash).await?;
        info!(state = %DeployState::Mined, status = receipt.status, "Deployment mined");

        if !receipt.status {
            warn!(%tx_hash, "Deployment reverted");
            return Ok(DeployOutcome::Failed { tx_hash });
        }

        let cost = WeiAmount::new(
            U256::from(receipt.gas_used) * U256::from(receipt.effective_gas_price),
        );
        let contract_address = receipt.contract_address.unwrap_or(quote.predicted_address);
        info!(
            state = %DeployState::Reported,
            contract = %contract_address,
            gas_used = receipt.gas_used,
            %cost,
            "Deployment complete"
        );
        Ok(DeployOutcome::Deployed {
            contract_address,
            tx_hash,
            gas_used: receipt.gas_used,
            cost,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decline_detection() {
        for answer in ["n", "N", "no", "No", " NO "] {
            assert!(is_decline(answer), "expected decline for {answer:?}");
        }
        for answer in ["", "y", "Y", "yes", "deploy", "nope"] {
            assert!(!is_decline(answer), "expected proceed for {answer:?}");
        }
    }

    #[test]
    fn test_state_display() {
        assert_eq!(DeployState::Quoted.to_string(), "quoted");
        assert_eq!(DeployState::Aborted.to_string(), "aborted");
    }
}
