//! Trade executor integration tests.
//!
//! The invariant under test throughout: at most one submission per
//! request, and nothing is broadcast once preflight or gas estimation
//! fails.

mod support;

use std::sync::Arc;

use alloy_primitives::{Address, TxHash, B256};
use rust_decimal_macros::dec;

use rampscout::app::gas_limit_with_margin;
use rampscout::domain::{Direction, TradeRequest, TradeResult};
use rampscout::error::{Error, ExecutionError};
use rampscout::testkit::chain::{confirmed_receipt, reverted_receipt, ScriptedChain};
use rampscout::testkit::domain::opportunity;

use support::fixtures::executor;

fn request(amount: rust_decimal::Decimal) -> TradeRequest {
    TradeRequest::new(opportunity("42", dec!(500), dec!(0.95), Direction::Buy), amount).unwrap()
}

#[tokio::test]
async fn trading_disabled_fails_preflight() {
    let result = executor(None).execute(request(dec!(100))).await;

    match result {
        TradeResult::FailedBeforeSubmission { reason } => {
            assert!(reason.contains("trading disabled"), "{reason}");
        }
        other => panic!("expected preflight failure, got {other:?}"),
    }
}

#[tokio::test]
async fn confirmed_trade_reports_intent_hash() {
    let tx = TxHash::repeat_byte(0xab);
    let intent = B256::repeat_byte(0xcd);
    let chain = Arc::new(
        ScriptedChain::new()
            .with_estimate(Ok(200_000))
            .with_submission(Ok(tx))
            .with_receipt(Ok(Some(confirmed_receipt(tx, Some(intent))))),
    );

    let result = executor(Some(chain.clone()))
        .execute(request(dec!(100)))
        .await;

    assert_eq!(
        result,
        TradeResult::Confirmed {
            tx_hash: tx,
            block_number: Some(1_000),
            gas_used: 85_000,
            intent_hash: Some(intent),
        }
    );
    let counts = chain.counts();
    assert_eq!((counts.estimates, counts.submissions, counts.receipt_waits), (1, 1, 1));
}

#[tokio::test]
async fn gas_limit_includes_margin() {
    let chain = Arc::new(ScriptedChain::new().with_estimate(Ok(150_000)));

    executor(Some(chain.clone())).execute(request(dec!(100))).await;

    let (_, gas_limit) = chain.submitted()[0];
    assert_eq!(gas_limit, 180_000);
    assert_eq!(gas_limit, gas_limit_with_margin(150_000, 20));
}

#[tokio::test]
async fn claim_call_uses_base_units_and_operator_address() {
    let operator = Address::repeat_byte(0x22);
    let chain = Arc::new(ScriptedChain::new().with_operator(operator));

    executor(Some(chain.clone()))
        .execute(request(dec!(12.3456789)))
        .await;

    let (call, _) = &chain.submitted()[0];
    assert_eq!(call.deposit_id.to::<u64>(), 42);
    // Truncated to the asset's six decimals.
    assert_eq!(call.amount.to::<u64>(), 12_345_678);
    assert_eq!(call.recipient, operator);
}

#[tokio::test]
async fn explicit_recipient_overrides_operator() {
    let recipient = Address::repeat_byte(0x33);
    let chain = Arc::new(ScriptedChain::new());

    executor(Some(chain.clone()))
        .execute(request(dec!(10)).with_recipient(recipient))
        .await;

    assert_eq!(chain.submitted()[0].0.recipient, recipient);
}

#[tokio::test]
async fn gas_estimation_failure_never_submits() {
    let chain = Arc::new(ScriptedChain::new().with_gas_failure("execution reverted: deposit not active"));

    let result = executor(Some(chain.clone()))
        .execute(request(dec!(100)))
        .await;

    match result {
        TradeResult::FailedBeforeSubmission { reason } => {
            assert!(reason.contains("gas estimation failed"), "{reason}");
        }
        other => panic!("expected failure, got {other:?}"),
    }
    assert_eq!(chain.counts().submissions, 0);
    assert_eq!(chain.counts().receipt_waits, 0);
}

#[tokio::test]
async fn submission_failure_is_reported_before_receipt() {
    let chain = Arc::new(ScriptedChain::new().with_submission(Err(Error::Execution(
        ExecutionError::Submission("nonce too low".into()),
    ))));

    let result = executor(Some(chain.clone()))
        .execute(request(dec!(100)))
        .await;

    assert!(matches!(result, TradeResult::FailedBeforeSubmission { .. }));
    assert_eq!(chain.counts().submissions, 1);
    assert_eq!(chain.counts().receipt_waits, 0);
}

#[tokio::test]
async fn receipt_timeout_is_pending_with_single_submission() {
    let tx = TxHash::repeat_byte(0x01);
    let chain = Arc::new(
        ScriptedChain::new()
            .with_submission(Ok(tx))
            .with_receipt_timeout(),
    );

    let result = executor(Some(chain.clone()))
        .execute(request(dec!(100)))
        .await;

    assert_eq!(result, TradeResult::Pending { tx_hash: tx });
    assert!(!result.is_terminal());
    assert_eq!(chain.counts().submissions, 1);
}

#[tokio::test]
async fn receipt_lookup_error_is_pending_not_retried() {
    let tx = TxHash::repeat_byte(0x02);
    let chain = Arc::new(
        ScriptedChain::new()
            .with_submission(Ok(tx))
            .with_receipt(Err(Error::Connection("rpc reset".into()))),
    );

    let result = executor(Some(chain.clone()))
        .execute(request(dec!(100)))
        .await;

    assert_eq!(result, TradeResult::Pending { tx_hash: tx });
    assert_eq!(chain.counts().submissions, 1);
}

#[tokio::test]
async fn reverted_receipt_is_reported() {
    let tx = TxHash::repeat_byte(0x03);
    let chain = Arc::new(
        ScriptedChain::new()
            .with_submission(Ok(tx))
            .with_receipt(Ok(Some(reverted_receipt(tx)))),
    );

    let result = executor(Some(chain.clone()))
        .execute(request(dec!(100)))
        .await;

    assert_eq!(
        result,
        TradeResult::Reverted {
            tx_hash: tx,
            block_number: Some(1_000),
        }
    );
    assert!(result.is_terminal());
}

#[tokio::test]
async fn non_numeric_deposit_id_fails_before_estimation() {
    let chain = Arc::new(ScriptedChain::new());
    let request = TradeRequest::new(
        opportunity("dep-abc", dec!(500), dec!(0.95), Direction::Buy),
        dec!(10),
    )
    .unwrap();

    let result = executor(Some(chain.clone())).execute(request).await;

    match result {
        TradeResult::FailedBeforeSubmission { reason } => {
            assert!(reason.contains("invalid deposit id"), "{reason}");
        }
        other => panic!("expected failure, got {other:?}"),
    }
    assert_eq!(chain.counts().estimates, 0);
}

#[tokio::test]
async fn dust_amount_below_asset_precision_fails_preflight() {
    let chain = Arc::new(ScriptedChain::new());

    let result = executor(Some(chain.clone()))
        .execute(request(dec!(0.0000001)))
        .await;

    assert!(matches!(result, TradeResult::FailedBeforeSubmission { .. }));
    assert_eq!(chain.counts().estimates, 0);
}

#[test]
fn request_rejects_out_of_range_amounts() {
    let opp = opportunity("1", dec!(500), dec!(0.95), Direction::Buy);
    assert!(TradeRequest::new(opp.clone(), dec!(0)).is_err());
    assert!(TradeRequest::new(opp.clone(), dec!(-5)).is_err());
    assert!(TradeRequest::new(opp.clone(), dec!(500.01)).is_err());
    assert!(TradeRequest::new(opp, dec!(500)).is_ok());
}
