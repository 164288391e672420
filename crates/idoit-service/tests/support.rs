//! Donation (support) flow integration tests.

mod common;

use common::TestHarness;
use futures::future::join_all;
use serde_json::json;

// ============================================================================
// Submission
// ============================================================================

#[tokio::test]
async fn submit_support_returns_fresh_totals() {
    let harness = TestHarness::new();
    let challenge_id = harness.create_challenge(100).await;

    let response = harness
        .server
        .post("/support")
        .json(&json!({ "challengeId": challenge_id, "amount": 40 }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["raisedAmount"], 40);
    assert_eq!(body["progressPercent"], 40);
    assert_eq!(body["totalsStale"], false);
    assert_eq!(body["donation"]["amount"], 40);
    assert_eq!(body["donation"]["challengeId"], challenge_id);
}

#[tokio::test]
async fn two_donations_accumulate() {
    let harness = TestHarness::new();
    let challenge_id = harness.create_challenge(100).await;

    for _ in 0..2 {
        harness
            .server
            .post("/support")
            .json(&json!({ "challengeId": challenge_id, "amount": 40 }))
            .await
            .assert_status_ok();
    }

    // Ledger total
    let response = harness
        .server
        .get(&format!("/support/total?challengeId={challenge_id}"))
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["total"], 80);

    // Cached challenge fields
    let response = harness
        .server
        .get(&format!("/challenges/{challenge_id}"))
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["raisedAmount"], 80);
    assert_eq!(body["progressPercent"], 80);
}

#[tokio::test]
async fn goalless_challenge_reads_fully_funded() {
    let harness = TestHarness::new();
    let challenge_id = harness.create_challenge(0).await;

    let response = harness
        .server
        .post("/support")
        .json(&json!({ "challengeId": challenge_id, "amount": 5 }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["raisedAmount"], 5);
    assert_eq!(body["progressPercent"], 100);
}

#[tokio::test]
async fn overfunding_is_uncapped() {
    let harness = TestHarness::new();
    let challenge_id = harness.create_challenge(50).await;

    let response = harness
        .server
        .post("/support")
        .json(&json!({ "challengeId": challenge_id, "amount": 60 }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["raisedAmount"], 60);
    assert_eq!(body["progressPercent"], 120);
}

#[tokio::test]
async fn amount_as_numeric_string_is_accepted() {
    let harness = TestHarness::new();
    let challenge_id = harness.create_challenge(100).await;

    let response = harness
        .server
        .post("/support")
        .json(&json!({ "challengeId": challenge_id, "amount": "25" }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["raisedAmount"], 25);
}

// ============================================================================
// Validation
// ============================================================================

#[tokio::test]
async fn negative_amount_is_rejected_without_writing() {
    let harness = TestHarness::new();
    let challenge_id = harness.create_challenge(100).await;

    let response = harness
        .server
        .post("/support")
        .json(&json!({ "challengeId": challenge_id, "amount": -5 }))
        .await;

    response.assert_status_bad_request();

    // Ledger unchanged
    let response = harness
        .server
        .get(&format!("/support/total?challengeId={challenge_id}"))
        .await;
    let body: serde_json::Value = response.json();
    assert_eq!(body["total"], 0);
}

#[tokio::test]
async fn zero_amount_is_rejected() {
    let harness = TestHarness::new();
    let challenge_id = harness.create_challenge(100).await;

    let response = harness
        .server
        .post("/support")
        .json(&json!({ "challengeId": challenge_id, "amount": 0 }))
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn unparseable_amount_is_rejected() {
    let harness = TestHarness::new();
    let challenge_id = harness.create_challenge(100).await;

    let response = harness
        .server
        .post("/support")
        .json(&json!({ "challengeId": challenge_id, "amount": "a-lot" }))
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn unknown_challenge_is_not_found() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .post("/support")
        .json(&json!({
            "challengeId": "00000000-0000-4000-8000-000000000000",
            "amount": 10
        }))
        .await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn malformed_challenge_id_is_bad_request() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .post("/support")
        .json(&json!({ "challengeId": "not-a-uuid", "amount": 10 }))
        .await;

    response.assert_status_bad_request();
}

// ============================================================================
// Totals
// ============================================================================

#[tokio::test]
async fn total_for_challenge_without_donations_is_zero() {
    let harness = TestHarness::new();
    let challenge_id = harness.create_challenge(100).await;

    let response = harness
        .server
        .get(&format!("/support/total?challengeId={challenge_id}"))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["total"], 0);
}

#[tokio::test]
async fn total_for_unknown_challenge_is_zero() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .get("/support/total?challengeId=00000000-0000-4000-8000-000000000000")
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["total"], 0);
}

#[tokio::test]
async fn total_requires_challenge_id() {
    let harness = TestHarness::new();

    let response = harness.server.get("/support/total").await;
    response.assert_status_bad_request();
}

// ============================================================================
// Reconciliation
// ============================================================================

#[tokio::test]
async fn reconcile_recomputes_from_the_ledger() {
    let harness = TestHarness::new();
    let challenge_id = harness.create_challenge(100).await;

    for amount in [30, 30] {
        harness
            .server
            .post("/support")
            .json(&json!({ "challengeId": challenge_id, "amount": amount }))
            .await
            .assert_status_ok();
    }

    let response = harness
        .server
        .post("/support/reconcile")
        .json(&json!({ "challengeId": challenge_id }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["raisedAmount"], 60);
    assert_eq!(body["progressPercent"], 60);
}

#[tokio::test]
async fn reconcile_unknown_challenge_is_not_found() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .post("/support/reconcile")
        .json(&json!({ "challengeId": "00000000-0000-4000-8000-000000000000" }))
        .await;

    response.assert_status_not_found();
}

// ============================================================================
// Concurrency
// ============================================================================

#[tokio::test]
async fn concurrent_donations_are_never_lost() {
    let harness = TestHarness::new();
    let challenge_id = harness.create_challenge(700).await;

    const DONORS: usize = 10;
    const AMOUNT: i64 = 7;

    let submissions = (0..DONORS).map(|_| async {
        harness
            .server
            .post("/support")
            .json(&json!({ "challengeId": challenge_id, "amount": AMOUNT }))
            .await
    });

    for response in join_all(submissions).await {
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["success"], true);
    }

    // The ledger never loses a pledge, regardless of interleaving.
    let response = harness
        .server
        .get(&format!("/support/total?challengeId={challenge_id}"))
        .await;
    let body: serde_json::Value = response.json();
    let expected = i64::try_from(DONORS).unwrap() * AMOUNT;
    assert_eq!(body["total"], expected);

    // A final aggregation pass settles the cached fields to the ledger sum.
    harness
        .server
        .post("/support/reconcile")
        .json(&json!({ "challengeId": challenge_id }))
        .await
        .assert_status_ok();

    let response = harness
        .server
        .get(&format!("/challenges/{challenge_id}"))
        .await;
    let body: serde_json::Value = response.json();
    assert_eq!(body["raisedAmount"], expected);
    assert_eq!(body["progressPercent"], 10); // 70 of 700
}
