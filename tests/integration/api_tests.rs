//! API integration tests
//!
//! Run against a live server with a migrated database:
//! `cargo test -- --ignored`

use chrono::{Duration, Utc};
use reqwest::Client;
use serde_json::{json, Value};
use uuid::Uuid;

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Register a fresh vehicle and return its id
async fn create_vehicle(client: &Client, price_per_day: i64, price_per_km: i64) -> i64 {
    let response = client
        .post(format!("{}/vehicles", BASE_URL))
        .json(&json!({
            "owner_id": 7,
            "name": "Maruti Swift VXI",
            "registration_no": format!("KA-01-{}", Uuid::new_v4()),
            "price_per_day": price_per_day.to_string(),
            "price_per_km": price_per_km.to_string()
        }))
        .send()
        .await
        .expect("Failed to register vehicle");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse vehicle");
    body["id"].as_i64().expect("No vehicle id")
}

/// ISO date `days` days from today
fn day(days: i64) -> String {
    (Utc::now().date_naive() + Duration::days(days)).to_string()
}

/// Amounts serialize as decimal strings ("3300.00"); compare numerically
fn dec(v: &Value) -> f64 {
    v.as_str()
        .map(|s| s.parse::<f64>().expect("bad decimal string"))
        .or_else(|| v.as_f64())
        .expect("not a decimal value")
}

fn booking_payload(vehicle_id: i64, start: &str, end: &str) -> Value {
    json!({
        "vehicle_id": vehicle_id,
        "customer_id": 42,
        "start_date": start,
        "end_date": end,
        "booking_type": "per_day",
        "is_ac": true,
        "cancellation_fine": "400"
    })
}

async fn create_booking(client: &Client, payload: &Value) -> reqwest::Response {
    client
        .post(format!("{}/bookings", BASE_URL))
        .json(payload)
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
async fn test_booking_end_to_end_fare() {
    let client = Client::new();
    let vehicle_id = create_vehicle(&client, 1000, 15).await;

    // 3 inclusive days, AC: estimate = 3000 + 300
    let response = create_booking(
        &client,
        &booking_payload(vehicle_id, &day(10), &day(12)),
    )
    .await;
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse booking");
    let booking_id = body["booking"]["id"].as_i64().expect("No booking id");
    assert_eq!(body["status"], "upcoming");
    assert_eq!(dec(&body["fare_estimate"]["base"]), 3000.0);
    assert_eq!(dec(&body["fare_estimate"]["ac_surcharge"]), 300.0);
    assert_eq!(dec(&body["fare_estimate"]["chargeable"]), 3300.0);

    // Pickup
    let response = client
        .post(format!("{}/bookings/{}/start", BASE_URL, booking_id))
        .send()
        .await
        .expect("Failed to start ride");
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("Failed to parse start");
    assert_eq!(body["status"], "active");

    // Drop-off: per-day booking, km ignored for the base, no late fine
    let response = client
        .post(format!("{}/bookings/{}/complete", BASE_URL, booking_id))
        .json(&json!({
            "km_travelled": "50",
            "actual_return_date": day(12)
        }))
        .send()
        .await
        .expect("Failed to complete ride");
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("Failed to parse completion");
    assert_eq!(dec(&body["final_amount"]), 3300.0);
    assert_eq!(dec(&body["booking"]["total_amount"]), 3300.0);
}

#[tokio::test]
#[ignore]
async fn test_shared_boundary_day_conflicts() {
    let client = Client::new();
    let vehicle_id = create_vehicle(&client, 800, 12).await;

    let response = create_booking(
        &client,
        &booking_payload(vehicle_id, &day(10), &day(15)),
    )
    .await;
    assert_eq!(response.status(), 201);

    // Same boundary day: conflict
    let response = create_booking(
        &client,
        &booking_payload(vehicle_id, &day(15), &day(20)),
    )
    .await;
    assert_eq!(response.status(), 409);

    // Day after: free
    let response = create_booking(
        &client,
        &booking_payload(vehicle_id, &day(16), &day(20)),
    )
    .await;
    assert_eq!(response.status(), 201);
}

#[tokio::test]
#[ignore]
async fn test_cancelled_booking_frees_the_calendar() {
    let client = Client::new();
    let vehicle_id = create_vehicle(&client, 800, 12).await;

    let response = create_booking(
        &client,
        &booking_payload(vehicle_id, &day(5), &day(8)),
    )
    .await;
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse booking");
    let booking_id = body["booking"]["id"].as_i64().unwrap();

    let response = client
        .post(format!("{}/bookings/{}/cancel", BASE_URL, booking_id))
        .send()
        .await
        .expect("Failed to cancel");
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("Failed to parse cancel");
    assert_eq!(dec(&body["cancellation_fine"]), 400.0);
    assert_eq!(dec(&body["fare"]["chargeable"]), 400.0);

    // The identical interval is bookable again
    let response = create_booking(
        &client,
        &booking_payload(vehicle_id, &day(5), &day(8)),
    )
    .await;
    assert_eq!(response.status(), 201);
}

#[tokio::test]
#[ignore]
async fn test_date_range_validation() {
    let client = Client::new();
    let vehicle_id = create_vehicle(&client, 800, 12).await;

    // End before start
    let response = create_booking(
        &client,
        &booking_payload(vehicle_id, &day(10), &day(5)),
    )
    .await;
    assert_eq!(response.status(), 400);

    // Start in the past
    let response = create_booking(
        &client,
        &booking_payload(vehicle_id, &day(-1), &day(5)),
    )
    .await;
    assert_eq!(response.status(), 400);

    // 31 inclusive days exceeds the window
    let response = create_booking(
        &client,
        &booking_payload(vehicle_id, &day(1), &day(31)),
    )
    .await;
    assert_eq!(response.status(), 400);

    // 30 inclusive days is the longest legal window
    let response = create_booking(
        &client,
        &booking_payload(vehicle_id, &day(1), &day(30)),
    )
    .await;
    assert_eq!(response.status(), 201);
}

#[tokio::test]
#[ignore]
async fn test_cancel_after_complete_is_rejected() {
    let client = Client::new();
    let vehicle_id = create_vehicle(&client, 800, 12).await;

    let response = create_booking(
        &client,
        &booking_payload(vehicle_id, &day(1), &day(2)),
    )
    .await;
    let body: Value = response.json().await.expect("Failed to parse booking");
    let booking_id = body["booking"]["id"].as_i64().unwrap();

    client
        .post(format!("{}/bookings/{}/start", BASE_URL, booking_id))
        .send()
        .await
        .expect("Failed to start ride");

    let response = client
        .post(format!("{}/bookings/{}/complete", BASE_URL, booking_id))
        .json(&json!({
            "km_travelled": "30",
            "actual_return_date": day(2)
        }))
        .send()
        .await
        .expect("Failed to complete ride");
    assert_eq!(response.status(), 200);

    // Terminal state refuses the transition and nothing changes
    let response = client
        .post(format!("{}/bookings/{}/cancel", BASE_URL, booking_id))
        .send()
        .await
        .expect("Failed to send cancel");
    assert_eq!(response.status(), 422);

    let response = client
        .get(format!("{}/bookings/{}", BASE_URL, booking_id))
        .send()
        .await
        .expect("Failed to fetch booking");
    let body: Value = response.json().await.expect("Failed to parse booking");
    assert_eq!(body["status"], "completed");
    assert_eq!(body["booking"]["is_cancelled"], false);
}

#[tokio::test]
#[ignore]
async fn test_concurrent_creation_has_one_winner() {
    let client = Client::new();
    let vehicle_id = create_vehicle(&client, 800, 12).await;

    let payload_a = booking_payload(vehicle_id, &day(3), &day(6));
    let payload_b = booking_payload(vehicle_id, &day(4), &day(7));

    let (a, b) = tokio::join!(
        create_booking(&client, &payload_a),
        create_booking(&client, &payload_b)
    );

    let statuses = [a.status().as_u16(), b.status().as_u16()];
    assert!(
        statuses.contains(&201) && statuses.contains(&409),
        "expected exactly one winner, got {:?}",
        statuses
    );
}

#[tokio::test]
#[ignore]
async fn test_per_km_fare_floor() {
    let client = Client::new();
    let vehicle_id = create_vehicle(&client, 800, 12).await;

    let mut payload = booking_payload(vehicle_id, &day(1), &day(1));
    payload["booking_type"] = json!("per_km");
    payload["is_ac"] = json!(false);

    let response = create_booking(&client, &payload).await;
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse booking");
    let booking_id = body["booking"]["id"].as_i64().unwrap();
    // No distance yet: the estimate falls back to the day floor
    assert_eq!(dec(&body["fare_estimate"]["base"]), 800.0);

    client
        .post(format!("{}/bookings/{}/start", BASE_URL, booking_id))
        .send()
        .await
        .expect("Failed to start ride");

    // 40 km x 12 = 480 < 800: the day floor still wins
    let response = client
        .post(format!("{}/bookings/{}/complete", BASE_URL, booking_id))
        .json(&json!({
            "km_travelled": "40",
            "actual_return_date": day(1)
        }))
        .send()
        .await
        .expect("Failed to complete ride");
    let body: Value = response.json().await.expect("Failed to parse completion");
    assert_eq!(dec(&body["final_amount"]), 800.0);
}

#[tokio::test]
#[ignore]
async fn test_customer_dashboard_counts() {
    let client = Client::new();
    let vehicle_id = create_vehicle(&client, 800, 12).await;
    let customer_id = 9000 + (Uuid::new_v4().as_u128() % 100000) as i64;

    let mut payload = booking_payload(vehicle_id, &day(5), &day(8));
    payload["customer_id"] = json!(customer_id);
    let response = create_booking(&client, &payload).await;
    assert_eq!(response.status(), 201);

    let response = client
        .get(format!(
            "{}/bookings?role=customer&actor_id={}&filter=upcoming",
            BASE_URL, customer_id
        ))
        .send()
        .await
        .expect("Failed to list bookings");
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("Failed to parse listing");
    assert_eq!(body["items"].as_array().unwrap().len(), 1);
    assert_eq!(body["counts"]["upcoming"], 1);
    assert_eq!(body["counts"]["all"], 1);

    // The assigned bucket belongs to drivers, not customers
    let response = client
        .get(format!(
            "{}/bookings?role=customer&actor_id={}&filter=assigned",
            BASE_URL, customer_id
        ))
        .send()
        .await
        .expect("Failed to list bookings");
    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_availability_endpoint() {
    let client = Client::new();
    let vehicle_id = create_vehicle(&client, 800, 12).await;

    let response = create_booking(
        &client,
        &booking_payload(vehicle_id, &day(10), &day(12)),
    )
    .await;
    assert_eq!(response.status(), 201);

    let response = client
        .get(format!(
            "{}/vehicles/{}/availability?start_date={}&end_date={}",
            BASE_URL,
            vehicle_id,
            day(12),
            day(14)
        ))
        .send()
        .await
        .expect("Failed to check availability");
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("Failed to parse availability");
    assert_eq!(body["is_available"], false);
    assert_eq!(body["conflicting_bookings"].as_array().unwrap().len(), 1);

    let response = client
        .get(format!(
            "{}/vehicles/{}/availability?start_date={}&end_date={}",
            BASE_URL,
            vehicle_id,
            day(13),
            day(14)
        ))
        .send()
        .await
        .expect("Failed to check availability");
    let body: Value = response.json().await.expect("Failed to parse availability");
    assert_eq!(body["is_available"], true);
}
