//! Integration tests for lead intake, listing, and lifecycle transitions.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, post_json, sample_intake};
use leadpipe_core::store::LeadStore;

// ---------------------------------------------------------------------------
// Intake
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_lead_returns_201_with_generated_fields() {
    let (app, _store) = common::build_test_app();

    let response = post_json(app, "/api/v1/leads", sample_intake()).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    let lead = &json["data"];

    let id = lead["id"].as_str().unwrap();
    assert!(id.starts_with("LEAD-"), "got id: {id}");
    assert_eq!(lead["name"], "Ada Prospect");
    assert_eq!(lead["source"], "Media Alpha");
    assert_eq!(lead["lead_status"], "Hot");
    assert_eq!(lead["status"], "Active");
    assert!(lead["created_at"].is_string());
    assert!(lead["next_followup"].is_string());
}

#[tokio::test]
async fn create_lead_rejects_unknown_source() {
    let (app, store) = common::build_test_app();

    let mut intake = sample_intake();
    intake["source"] = "Billboard".into();

    let response = post_json(app, "/api/v1/leads", intake).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(
        json["error"].as_str().unwrap().contains("source"),
        "error should name the field, got: {}",
        json["error"]
    );

    // Nothing was persisted.
    assert!(store.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn create_lead_rejects_blank_name() {
    let (app, _store) = common::build_test_app();

    let mut intake = sample_intake();
    intake["name"] = "   ".into();

    let response = post_json(app, "/api/v1/leads", intake).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn create_lead_rejects_negative_quoted_price() {
    let (app, _store) = common::build_test_app();

    let mut intake = sample_intake();
    intake["quoted_price"] = serde_json::json!(-5.0);

    let response = post_json(app, "/api/v1/leads", intake).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_filters_by_source() {
    let (app, _store) = common::build_test_app();

    post_json(app.clone(), "/api/v1/leads", sample_intake()).await;

    let mut other = sample_intake();
    other["source"] = "Website".into();
    post_json(app.clone(), "/api/v1/leads", other).await;

    let response = get(app, "/api/v1/leads?source=Media%20Alpha").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let leads = json["data"].as_array().unwrap();
    assert_eq!(leads.len(), 1);
    assert_eq!(leads[0]["source"], "Media Alpha");
}

#[tokio::test]
async fn list_rejects_unknown_filter_value() {
    let (app, _store) = common::build_test_app();

    let response = get(app, "/api/v1/leads?status=Pending").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Lifecycle transitions
// ---------------------------------------------------------------------------

#[tokio::test]
async fn close_then_reclose_is_a_conflict() {
    let (app, _store) = common::build_test_app();

    let created = post_json(app.clone(), "/api/v1/leads", sample_intake()).await;
    let id = body_json(created).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = post_json(
        app.clone(),
        &format!("/api/v1/leads/{id}/status"),
        serde_json::json!({ "status": "Closed" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["status"], "Closed");

    // A second terminal transition is rejected.
    let response = post_json(
        app,
        &format!("/api/v1/leads/{id}/status"),
        serde_json::json!({ "status": "Lost" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "CONFLICT");
}

#[tokio::test]
async fn transition_unknown_lead_is_404() {
    let (app, _store) = common::build_test_app();

    let response = post_json(
        app,
        "/api/v1/leads/LEAD-nope/status",
        serde_json::json!({ "status": "Closed" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

#[tokio::test]
async fn transition_to_unknown_status_is_rejected() {
    let (app, _store) = common::build_test_app();

    let created = post_json(app.clone(), "/api/v1/leads", sample_intake()).await;
    let id = body_json(created).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = post_json(
        app,
        &format!("/api/v1/leads/{id}/status"),
        serde_json::json!({ "status": "Archived" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Follow-ups
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fresh_lead_is_not_due_yet() {
    let (app, _store) = common::build_test_app();

    post_json(app.clone(), "/api/v1/leads", sample_intake()).await;

    let response = get(app, "/api/v1/leads/followups/due").await;
    assert_eq!(response.status(), StatusCode::OK);

    // A Hot lead created just now is not due for another three hours.
    let json = body_json(response).await;
    assert!(json["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn reminder_digest_reports_nothing_due() {
    let (app, _store) = common::build_test_app();

    let response = get(app, "/api/v1/leads/followups/reminder").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["due_count"], 0);
    assert_eq!(
        json["data"]["message"],
        "No leads need follow-up at this time."
    );
}
