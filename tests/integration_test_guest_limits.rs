mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{parse_body, TestApp};
use serde_json::json;

fn capped_event(cap: i64) -> serde_json::Value {
    json!({
        "title": "Dinner Party",
        "host_name": "Sam",
        "location": "Home",
        "starts_at": (Utc::now() + Duration::days(10)).to_rfc3339(),
        "max_guests_per_invitee": cap
    })
}

#[tokio::test]
async fn test_party_over_event_cap_is_rejected() {
    let app = TestApp::new().await;
    // Cap 2 = the invitee plus one additional guest
    let event_id = app.create_event(capped_event(2)).await;

    let response = app
        .public_post(
            &format!("/api/v1/events/{}/rsvp", event_id),
            json!({
                "email": "jane@example.com",
                "status": "ATTENDING",
                "additional_guests": ["Tom", "Lea"]
            }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let data = parse_body(response).await;
    assert!(data["error"]
        .as_str()
        .unwrap()
        .contains("Only 1 additional guest allowed"));

    // The rejected RSVP created nothing
    let response = app
        .host_get(&format!("/api/v1/events/{}/guests", event_id))
        .await;
    let guests = parse_body(response).await;
    assert_eq!(guests.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_party_at_event_cap_is_accepted() {
    let app = TestApp::new().await;
    let event_id = app.create_event(capped_event(2)).await;

    let response = app
        .public_post(
            &format!("/api/v1/events/{}/rsvp", event_id),
            json!({
                "email": "jane@example.com",
                "status": "ATTENDING",
                "additional_guests": ["Tom"]
            }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_per_guest_override_beats_event_default() {
    let app = TestApp::new().await;
    let event_id = app.create_event(capped_event(2)).await;

    // VIP gets a bigger allowance than the event default
    app.create_guest(
        &event_id,
        json!({"email": "vip@example.com", "max_guests": 4}),
    )
    .await;

    let response = app
        .public_post(
            &format!("/api/v1/events/{}/rsvp", event_id),
            json!({
                "email": "vip@example.com",
                "status": "ATTENDING",
                "additional_guests": ["A", "B", "C"]
            }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    // The override also wins when it is stricter than the default
    app.create_guest(
        &event_id,
        json!({"email": "solo@example.com", "max_guests": 1}),
    )
    .await;

    let response = app
        .public_post(
            &format!("/api/v1/events/{}/rsvp", event_id),
            json!({
                "email": "solo@example.com",
                "status": "ATTENDING",
                "additional_guests": ["Plus One"]
            }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let data = parse_body(response).await;
    assert!(data["error"]
        .as_str()
        .unwrap()
        .contains("Only 0 additional guests allowed"));
}

#[tokio::test]
async fn test_no_cap_means_unlimited() {
    let app = TestApp::new().await;
    let event_id = app
        .create_event(json!({
            "title": "Open House",
            "host_name": "Sam",
            "location": "Home",
            "starts_at": (Utc::now() + Duration::days(10)).to_rfc3339()
        }))
        .await;

    let names: Vec<String> = (0..10).map(|i| format!("Guest {}", i)).collect();
    let response = app
        .public_post(
            &format!("/api/v1/events/{}/rsvp", event_id),
            json!({
                "email": "jane@example.com",
                "status": "ATTENDING",
                "additional_guests": names
            }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_rejected_resubmission_keeps_previous_party() {
    let app = TestApp::new().await;
    let event_id = app.create_event(capped_event(2)).await;

    app.public_post(
        &format!("/api/v1/events/{}/rsvp", event_id),
        json!({
            "email": "jane@example.com",
            "status": "ATTENDING",
            "additional_guests": ["Tom"]
        }),
    )
    .await;

    let response = app
        .public_post(
            &format!("/api/v1/events/{}/rsvp", event_id),
            json!({
                "email": "jane@example.com",
                "status": "ATTENDING",
                "additional_guests": ["A", "B", "C", "D"]
            }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = app
        .host_get(&format!("/api/v1/events/{}/guests", event_id))
        .await;
    let guests = parse_body(response).await;
    let guest = &guests.as_array().unwrap()[0];
    assert_eq!(guest["status"], "ATTENDING");
    let names: Vec<&str> = guest["additional_guests"]
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Tom"]);
}

#[tokio::test]
async fn test_non_attending_rsvp_ignores_cap() {
    let app = TestApp::new().await;
    let event_id = app.create_event(capped_event(2)).await;

    // Additional guests are dropped for a declining RSVP, not rejected
    let response = app
        .public_post(
            &format!("/api/v1/events/{}/rsvp", event_id),
            json!({
                "email": "jane@example.com",
                "status": "NOT_ATTENDING",
                "additional_guests": ["A", "B", "C"]
            }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let data = parse_body(response).await;
    assert_eq!(data["additional_guests"].as_array().unwrap().len(), 0);
}
