// SPDX-FileCopyrightText: 2025 txforge contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Receipt status mapping and the blocking wait.

mod helpers;

use std::sync::Arc;
use std::time::Duration;

use alloy_primitives::TxHash;
use helpers::MockChainRpc;
use txforge::errors::SubmitError;
use txforge::rpc::ReceiptInfo;
use txforge::{StatusTracker, TransactionStatus};

fn receipt(status: bool) -> ReceiptInfo {
    ReceiptInfo {
        status,
        gas_used: 21_000,
        effective_gas_price: 1_000_000_000,
        contract_address: None,
        block_number: Some(5),
    }
}

#[tokio::test]
async fn test_missing_receipt_is_pending_not_error() {
    let rpc = Arc::new(MockChainRpc::new());
    let tracker = StatusTracker::new(Arc::clone(&rpc));
    let status = tracker.status(TxHash::with_last_byte(1)).await.unwrap();
    assert_eq!(status, TransactionStatus::Pending);
    assert!(!status.is_final());
}

#[tokio::test]
async fn test_success_receipt() {
    let rpc = Arc::new(MockChainRpc::new());
    let hash = TxHash::with_last_byte(2);
    rpc.insert_receipt(hash, receipt(true));
    let tracker = StatusTracker::new(Arc::clone(&rpc));
    assert_eq!(
        tracker.status(hash).await.unwrap(),
        TransactionStatus::Success
    );
}

#[tokio::test]
async fn test_reverted_receipt_is_failed() {
    let rpc = Arc::new(MockChainRpc::new());
    let hash = TxHash::with_last_byte(3);
    rpc.insert_receipt(hash, receipt(false));
    let tracker = StatusTracker::new(Arc::clone(&rpc));
    let status = tracker.status(hash).await.unwrap();
    assert_eq!(status, TransactionStatus::Failed);
    assert!(status.is_final());
}

#[tokio::test]
async fn test_lookup_failure_is_an_error() {
    let mut rpc = MockChainRpc::new();
    rpc.fail_receipt_lookup = true;
    let tracker = StatusTracker::new(Arc::new(rpc));
    let result = tracker.status(TxHash::with_last_byte(4)).await;
    assert!(matches!(
        result,
        Err(SubmitError::ReceiptLookupFailed { .. })
    ));
}

#[tokio::test]
async fn test_wait_mined_returns_reverted_receipt() {
    let rpc = Arc::new(MockChainRpc::new());
    let hash = TxHash::with_last_byte(5);
    rpc.insert_receipt(hash, receipt(false));
    let tracker = StatusTracker::new(Arc::clone(&rpc));
    // A reverted receipt is still a mined receipt; the caller decides.
    let mined = tracker.wait_mined(hash).await.unwrap();
    assert!(!mined.status);
}

#[tokio::test]
async fn test_wait_mined_times_out() {
    let rpc = Arc::new(MockChainRpc::new());
    let tracker = StatusTracker::new(Arc::clone(&rpc))
        .with_poll_interval(Duration::from_millis(5))
        .with_deadline(Duration::from_millis(20));
    let result = tracker.wait_mined(TxHash::with_last_byte(6)).await;
    assert!(matches!(
        result,
        Err(SubmitError::ConfirmationTimeout { .. })
    ));
}

#[test]
fn test_status_serde_wire_form() {
    assert_eq!(
        serde_json::to_string(&TransactionStatus::Pending).unwrap(),
        "\"pending\""
    );
    assert_eq!(
        serde_json::to_string(&TransactionStatus::Success).unwrap(),
        "\"success\""
    );
    assert_eq!(
        serde_json::to_string(&TransactionStatus::Failed).unwrap(),
        "\"failed\""
    );
}
