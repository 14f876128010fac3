//! API integration tests
//!
//! These run against a live server on localhost:8080 whose database was
//! bootstrapped with an admin account (config/default.toml):
//!   bootstrap_admin_email = "admin@campus.test"
//!   bootstrap_admin_password = "admin123"

use reqwest::Client;
use serde_json::{json, Value};
use std::time::{SystemTime, UNIX_EPOCH};

const BASE_URL: &str = "http://localhost:8080/api/v1";

fn unique_email(prefix: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock before epoch")
        .as_nanos();
    format!("{}-{}@campus.test", prefix, nanos)
}

/// Helper to get an admin token
async fn get_admin_token(client: &Client) -> String {
    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "email": "admin@campus.test",
            "password": "admin123"
        }))
        .send()
        .await
        .expect("Failed to send login request");

    let body: Value = response.json().await.expect("Failed to parse login response");
    body["token"].as_str().expect("No token in response").to_string()
}

/// Helper to sign up a fresh student and return their token
async fn signup_student(client: &Client) -> String {
    let response = client
        .post(format!("{}/auth/signup", BASE_URL))
        .json(&json!({
            "name": "Test Student",
            "email": unique_email("student"),
            "password": "hunter22"
        }))
        .send()
        .await
        .expect("Failed to send signup request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse signup response");
    body["token"].as_str().expect("No token in response").to_string()
}

/// Helper to create a piece of equipment as admin, returning its id
async fn create_equipment(client: &Client, admin_token: &str, name: &str) -> i64 {
    let response = client
        .post(format!("{}/equipment", BASE_URL))
        .header("Authorization", format!("Bearer {}", admin_token))
        .json(&json!({
            "name": name,
            "category": "Lab",
            "quantity": 1
        }))
        .send()
        .await
        .expect("Failed to send create equipment request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse equipment response");
    body["id"].as_i64().expect("No equipment id")
}

/// Helper to submit a booking, returning the raw response
async fn book(
    client: &Client,
    token: &str,
    equipment_id: i64,
    start: &str,
    end: &str,
    priority: Option<&str>,
) -> reqwest::Response {
    let mut payload = json!({
        "equipment_id": equipment_id,
        "start_time": start,
        "end_time": end,
        "purpose": "lab session"
    });
    if let Some(priority) = priority {
        payload["priority"] = json!(priority);
    }

    client
        .post(format!("{}/bookings", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send booking request")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_unauthorized_access() {
    let client = Client::new();

    let response = client
        .get(format!("{}/equipment", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_signup_and_login() {
    let client = Client::new();
    let email = unique_email("login");

    let response = client
        .post(format!("{}/auth/signup", BASE_URL))
        .json(&json!({
            "name": "Login Test",
            "email": email,
            "password": "hunter22"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "email": email,
            "password": "hunter22"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["token"].is_string());
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["user"]["role"], "student");
}

#[tokio::test]
#[ignore]
async fn test_login_invalid_credentials() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "email": "admin@campus.test",
            "password": "wrong"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_signup_unknown_role_becomes_student() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/signup", BASE_URL))
        .json(&json!({
            "name": "Role Test",
            "email": unique_email("role"),
            "password": "hunter22",
            "role": "superuser"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["user"]["role"], "student");
}

#[tokio::test]
#[ignore]
async fn test_student_cannot_create_equipment() {
    let client = Client::new();
    let token = signup_student(&client).await;

    let response = client
        .post(format!("{}/equipment", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "name": "Forbidden Projector",
            "category": "AV",
            "quantity": 1
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 403);
}

#[tokio::test]
#[ignore]
async fn test_equipment_quantity_must_be_positive() {
    let client = Client::new();
    let admin_token = get_admin_token(&client).await;

    let response = client
        .post(format!("{}/equipment", BASE_URL))
        .header("Authorization", format!("Bearer {}", admin_token))
        .json(&json!({
            "name": "Zero Projector",
            "category": "AV",
            "quantity": 0
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_overlapping_booking_rejected_adjoining_accepted() {
    let client = Client::new();
    let admin_token = get_admin_token(&client).await;
    let student_token = signup_student(&client).await;
    let equipment_id = create_equipment(&client, &admin_token, "Overlap Oscilloscope").await;

    // Request A: 09:00-17:00 succeeds as PENDING
    let response = book(
        &client,
        &student_token,
        equipment_id,
        "2030-05-01T09:00:00Z",
        "2030-05-01T17:00:00Z",
        None,
    )
    .await;
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "PENDING");

    // Request B: 12:00-13:00 overlaps and must fail
    let response = book(
        &client,
        &student_token,
        equipment_id,
        "2030-05-01T12:00:00Z",
        "2030-05-01T13:00:00Z",
        None,
    )
    .await;
    assert_eq!(response.status(), 400);

    // Request C: 17:00-18:00 adjoins and must succeed
    let response = book(
        &client,
        &student_token,
        equipment_id,
        "2030-05-01T17:00:00Z",
        "2030-05-01T18:00:00Z",
        None,
    )
    .await;
    assert_eq!(response.status(), 201);
}

#[tokio::test]
#[ignore]
async fn test_unavailable_equipment_rejects_bookings() {
    let client = Client::new();
    let admin_token = get_admin_token(&client).await;
    let student_token = signup_student(&client).await;
    let equipment_id = create_equipment(&client, &admin_token, "Broken Centrifuge").await;

    // Mark unavailable through the dedicated toggle
    let response = client
        .put(format!("{}/equipment/{}/availability", BASE_URL, equipment_id))
        .header("Authorization", format!("Bearer {}", admin_token))
        .json(&json!({ "is_available": false }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let response = book(
        &client,
        &student_token,
        equipment_id,
        "2030-06-01T09:00:00Z",
        "2030-06-01T10:00:00Z",
        None,
    )
    .await;
    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_pending_queue_priority_ordering() {
    let client = Client::new();
    let admin_token = get_admin_token(&client).await;
    let student_token = signup_student(&client).await;
    let equipment_id = create_equipment(&client, &admin_token, "Priority Printer").await;

    // Submitted in order low, high, medium on disjoint days
    for (day, priority) in [(1, "low"), (2, "high"), (3, "medium")] {
        let response = book(
            &client,
            &student_token,
            equipment_id,
            &format!("2030-07-0{}T09:00:00Z", day),
            &format!("2030-07-0{}T10:00:00Z", day),
            Some(priority),
        )
        .await;
        assert_eq!(response.status(), 201);
    }

    let response = client
        .get(format!("{}/bookings/pending", BASE_URL))
        .header("Authorization", format!("Bearer {}", admin_token))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    let priorities: Vec<&str> = body
        .as_array()
        .expect("Expected array")
        .iter()
        .filter(|b| b["equipment_id"].as_i64() == Some(equipment_id))
        .map(|b| b["priority"].as_str().unwrap())
        .collect();

    assert_eq!(priorities, vec!["high", "medium", "low"]);
}

#[tokio::test]
#[ignore]
async fn test_approve_booking_writes_audit_entry() {
    let client = Client::new();
    let admin_token = get_admin_token(&client).await;
    let student_token = signup_student(&client).await;
    let equipment_id = create_equipment(&client, &admin_token, "Approval Spectrometer").await;

    let response = book(
        &client,
        &student_token,
        equipment_id,
        "2030-08-01T09:00:00Z",
        "2030-08-01T12:00:00Z",
        None,
    )
    .await;
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    let booking_id = body["id"].as_i64().expect("No booking id");

    let response = client
        .put(format!("{}/bookings/{}/status", BASE_URL, booking_id))
        .header("Authorization", format!("Bearer {}", admin_token))
        .json(&json!({ "status": "APPROVED" }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "APPROVED");

    // Exactly one BOOKING_APPROVED entry for this booking
    let response = client
        .get(format!("{}/audit-log?limit=50", BASE_URL))
        .header("Authorization", format!("Bearer {}", admin_token))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    let matching: Vec<&Value> = body["logs"]
        .as_array()
        .expect("Expected logs array")
        .iter()
        .filter(|log| {
            log["action"] == "BOOKING_APPROVED"
                && log["details"]
                    .as_str()
                    .map(|d| d.contains(&format!("\"booking_id\":{}", booking_id)))
                    .unwrap_or(false)
        })
        .collect();
    assert_eq!(matching.len(), 1);
}

#[tokio::test]
#[ignore]
async fn test_reject_booking_frees_the_slot() {
    let client = Client::new();
    let admin_token = get_admin_token(&client).await;
    let student_token = signup_student(&client).await;
    let equipment_id = create_equipment(&client, &admin_token, "Rejection Router").await;

    let response = book(
        &client,
        &student_token,
        equipment_id,
        "2030-09-01T09:00:00Z",
        "2030-09-01T17:00:00Z",
        None,
    )
    .await;
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    let booking_id = body["id"].as_i64().expect("No booking id");

    // Reject with admin notes
    let response = client
        .put(format!("{}/bookings/{}/status", BASE_URL, booking_id))
        .header("Authorization", format!("Bearer {}", admin_token))
        .json(&json!({
            "status": "REJECTED",
            "admin_notes": "schedule conflict"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "REJECTED");
    assert_eq!(body["admin_notes"], "schedule conflict");

    // The rejection is audited with the notes
    let response = client
        .get(format!("{}/audit-log?limit=50", BASE_URL))
        .header("Authorization", format!("Bearer {}", admin_token))
        .send()
        .await
        .expect("Failed to send request");
    let logs: Value = response.json().await.expect("Failed to parse response");
    let rejected = logs["logs"]
        .as_array()
        .expect("Expected logs array")
        .iter()
        .find(|log| {
            log["action"] == "BOOKING_REJECTED"
                && log["details"]
                    .as_str()
                    .map(|d| d.contains(&format!("\"booking_id\":{}", booking_id)))
                    .unwrap_or(false)
        })
        .expect("No BOOKING_REJECTED entry");
    assert!(rejected["details"].as_str().unwrap().contains("schedule conflict"));

    // Rejected bookings no longer block the interval
    let response = book(
        &client,
        &student_token,
        equipment_id,
        "2030-09-01T10:00:00Z",
        "2030-09-01T12:00:00Z",
        None,
    )
    .await;
    assert_eq!(response.status(), 201);
}

#[tokio::test]
#[ignore]
async fn test_pending_not_a_settable_status() {
    let client = Client::new();
    let admin_token = get_admin_token(&client).await;
    let student_token = signup_student(&client).await;
    let equipment_id = create_equipment(&client, &admin_token, "Status Scanner").await;

    let response = book(
        &client,
        &student_token,
        equipment_id,
        "2030-10-01T09:00:00Z",
        "2030-10-01T10:00:00Z",
        None,
    )
    .await;
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    let booking_id = body["id"].as_i64().expect("No booking id");

    let response = client
        .put(format!("{}/bookings/{}/status", BASE_URL, booking_id))
        .header("Authorization", format!("Bearer {}", admin_token))
        .json(&json!({ "status": "PENDING" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_my_bookings_only_lists_own() {
    let client = Client::new();
    let admin_token = get_admin_token(&client).await;
    let first_token = signup_student(&client).await;
    let second_token = signup_student(&client).await;
    let equipment_id = create_equipment(&client, &admin_token, "Shared Soldering Iron").await;

    let response = book(
        &client,
        &first_token,
        equipment_id,
        "2030-11-01T09:00:00Z",
        "2030-11-01T10:00:00Z",
        None,
    )
    .await;
    assert_eq!(response.status(), 201);

    let response = client
        .get(format!("{}/bookings/my", BASE_URL))
        .header("Authorization", format!("Bearer {}", second_token))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    let mine = body
        .as_array()
        .expect("Expected array")
        .iter()
        .filter(|b| b["equipment_id"].as_i64() == Some(equipment_id))
        .count();
    assert_eq!(mine, 0);
}
