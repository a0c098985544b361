// SPDX-FileCopyrightText: 2025 txforge contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Interactive deployment flow over a mock chain and a scripted prompt.

mod helpers;

use std::sync::Arc;

use alloy_chains::NamedChain;
use alloy_primitives::{Bytes, U256};
use helpers::{MockChainRpc, ScriptedPrompt, TEST_KEY};
use txforge::{DeployFlow, DeployOutcome, SigningConfig, WeiAmount, WEI_PER_GWEI};

fn flow(rpc: Arc<MockChainRpc>) -> DeployFlow<MockChainRpc> {
    let signing = SigningConfig::new(TEST_KEY, NamedChain::AnvilHardhat).unwrap();
    DeployFlow::new(rpc, signing)
}

fn init_code() -> Bytes {
    // Minimal constructor bytecode; the mock never executes it.
    Bytes::from(vec![0x60, 0x80, 0x60, 0x40, 0x52])
}

#[tokio::test]
async fn test_decline_aborts_with_no_submission() {
    helpers::init_tracing();
    let rpc = Arc::new(MockChainRpc::new());
    let flow = flow(Arc::clone(&rpc));
    let mut prompt = ScriptedPrompt::declining();

    let outcome = flow
        .run(&init_code(), U256::ZERO, &mut prompt)
        .await
        .unwrap();

    assert_eq!(outcome, DeployOutcome::Aborted);
    assert!(rpc.sent().is_empty(), "decline must not broadcast anything");
}

#[tokio::test]
async fn test_happy_path_reports_actual_cost() {
    let rpc = Arc::new(MockChainRpc::new().with_nonce(3));
    let flow = flow(Arc::clone(&rpc));
    let signing = SigningConfig::new(TEST_KEY, NamedChain::AnvilHardhat).unwrap();
    let mut prompt = ScriptedPrompt::accepting();

    let outcome = flow
        .run(&init_code(), U256::ZERO, &mut prompt)
        .await
        .unwrap();

    match outcome {
        DeployOutcome::Deployed {
            contract_address,
            gas_used,
            cost,
            ..
        } => {
            // The mock receipt carries no contract address, so the
            // nonce-predicted one is reported.
            assert_eq!(contract_address, signing.address().create(3));
            assert_eq!(gas_used, 95_000);
            // 95_000 gas at 3 gwei effective price.
            assert_eq!(
                cost,
                WeiAmount::new(U256::from(95_000u64) * U256::from(3 * WEI_PER_GWEI))
            );
        }
        other => panic!("expected Deployed, got {other:?}"),
    }
    assert_eq!(rpc.sent().len(), 1);
    // The broadcast payload is an EIP-1559 envelope.
    assert_eq!(rpc.sent()[0][0], 0x02);
}

#[tokio::test]
async fn test_quote_uses_market_fees_and_gas_margin() {
    let rpc = Arc::new(MockChainRpc::new().with_gas_estimate(200_000).with_nonce(9));
    let flow = flow(Arc::clone(&rpc));

    let quote = flow.quote(&init_code()).await.unwrap();
    assert_eq!(quote.nonce, 9);
    assert_eq!(quote.fees.gas_limit, 220_000);
    assert_eq!(quote.fees.max_fee_per_gas, 20 * WEI_PER_GWEI);
    assert_eq!(quote.fees.max_priority_fee_per_gas, 2 * WEI_PER_GWEI);
    assert_eq!(
        quote.estimated_cost(),
        WeiAmount::new(U256::from(220_000u64) * U256::from(20 * WEI_PER_GWEI))
    );
}

#[tokio::test]
async fn test_tip_override_shifts_max_fee_by_delta() {
    let rpc = Arc::new(MockChainRpc::new());
    let flow = flow(Arc::clone(&rpc));
    let mut prompt = ScriptedPrompt::accepting().with_tip("5");

    flow.run(&init_code(), U256::ZERO, &mut prompt)
        .await
        .unwrap();

    // The quote presented at confirmation carries the adjusted fees.
    let confirmed = &prompt.confirmed_quotes[0];
    assert_eq!(confirmed.fees.max_priority_fee_per_gas, 5 * WEI_PER_GWEI);
    assert_eq!(confirmed.fees.max_fee_per_gas, 23 * WEI_PER_GWEI);
}

#[tokio::test]
async fn test_unparseable_tip_keeps_quote() {
    let rpc = Arc::new(MockChainRpc::new());
    let flow = flow(Arc::clone(&rpc));
    let mut prompt = ScriptedPrompt::accepting().with_tip("cheap please");

    flow.run(&init_code(), U256::ZERO, &mut prompt)
        .await
        .unwrap();

    let confirmed = &prompt.confirmed_quotes[0];
    assert_eq!(confirmed.fees.max_priority_fee_per_gas, 2 * WEI_PER_GWEI);
    assert_eq!(confirmed.fees.max_fee_per_gas, 20 * WEI_PER_GWEI);
}

#[tokio::test]
async fn test_reverted_deployment_is_failed_not_error() {
    let mut rpc = MockChainRpc::new();
    rpc.mined_status = false;
    let flow = flow(Arc::new(rpc));
    let mut prompt = ScriptedPrompt::accepting();

    let outcome = flow
        .run(&init_code(), U256::ZERO, &mut prompt)
        .await
        .unwrap();
    assert!(matches!(outcome, DeployOutcome::Failed { .. }));
}

#[tokio::test]
async fn test_node_rejection_surfaces_reason() {
    let mut rpc = MockChainRpc::new();
    rpc.reject_send = Some("replacement transaction underpriced".to_string());
    let flow = flow(Arc::new(rpc));
    let mut prompt = ScriptedPrompt::accepting();

    let err = flow
        .run(&init_code(), U256::ZERO, &mut prompt)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("underpriced"));
}
