use std::sync::Arc;
use std::time::Duration;

use assert_matches::assert_matches;
use chrono::NaiveDate;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use auth_cell::SessionStore;
use booking_cell::models::AppointmentDraft;
use booking_cell::services::availability::AvailabilityService;
use booking_cell::services::booking::{BookingService, BOOKED_MESSAGE, POST_BOOKING_DELAY};
use booking_cell::BookingController;
use shared_config::AppConfig;
use shared_models::auth::{Session, UserRole};
use shared_models::error::ClientError;
use shared_models::navigation::pages;

fn test_config(server: &MockServer) -> AppConfig {
    AppConfig {
        api_base_url: server.uri(),
    }
}

fn logged_in_store(token: &str) -> Arc<SessionStore> {
    let store = Arc::new(SessionStore::new());
    store.set(Session::new(token, UserRole::Patient));
    store
}

fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, 24).unwrap()
}

#[tokio::test]
async fn availability_is_fetched_with_the_bearer_token() {
    let mock_server = MockServer::start().await;
    let sessions = logged_in_store("tok-123");

    Mock::given(method("GET"))
        .and(path("/appointments/doctors/7/availability"))
        .and(header("Authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "available_days": ["Monday", "Wednesday"],
            "available_times": ["9:00", "11:00"]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = AvailabilityService::new(&test_config(&mock_server), sessions);
    let response = service.doctor_availability(7).await.unwrap();

    assert_eq!(response.available_days, ["Monday", "Wednesday"]);
    assert_eq!(response.available_times, ["9:00", "11:00"]);
}

#[tokio::test]
async fn time_slot_fetch_passes_the_date_query() {
    let mock_server = MockServer::start().await;
    let sessions = logged_in_store("tok-123");

    Mock::given(method("GET"))
        .and(path("/appointments/doctors/7/availability"))
        .and(query_param("date", "2026-08-24"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "available_days": ["Monday"],
            "available_times": ["14:00", "09:00"]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = AvailabilityService::new(&test_config(&mock_server), sessions);
    let times = service.time_slots_for_date(7, monday()).await.unwrap();

    assert_eq!(times, ["14:00", "09:00"]);
}

#[tokio::test]
async fn unauthorized_availability_fetch_clears_the_session() {
    let mock_server = MockServer::start().await;
    let sessions = logged_in_store("expired");

    Mock::given(method("GET"))
        .and(path("/appointments/doctors/7/availability"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"detail": "Token expired"})),
        )
        .mount(&mock_server)
        .await;

    let service = AvailabilityService::new(&test_config(&mock_server), Arc::clone(&sessions));
    let err = service.doctor_availability(7).await.unwrap_err();

    assert_matches!(err, ClientError::Auth(_));
    assert!(!sessions.is_authenticated());
}

#[tokio::test]
async fn booking_posts_the_request_and_schedules_the_redirect() {
    let mock_server = MockServer::start().await;
    let sessions = logged_in_store("tok-123");

    Mock::given(method("POST"))
        .and(path("/appointments/"))
        .and(header("Authorization", "Bearer tok-123"))
        .and(body_json(json!({
            "doctor_id": 7,
            "appointment_date": "2026-08-24",
            "appointment_time": "09:00",
            "description": "Follow-up"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "appointment_id": 42,
            "doctor_id": 7,
            "patient_id": 3,
            "appointment_date": "2026-08-24T09:00:00"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = BookingService::new(&test_config(&mock_server), sessions);
    let draft = AppointmentDraft {
        doctor_id: Some(7),
        appointment_date: Some(monday()),
        appointment_time: Some("09:00".to_string()),
        description: "Follow-up".to_string(),
    };

    let receipt = service.submit(&draft).await.unwrap();

    assert_eq!(receipt.confirmation.appointment_id, 42);
    assert_eq!(receipt.status.text, BOOKED_MESSAGE);
    assert_eq!(receipt.redirect.location, pages::ALL_APPOINTMENTS);
    assert_eq!(receipt.redirect.delay, POST_BOOKING_DELAY);
    assert_eq!(receipt.redirect.delay, Duration::from_secs(2));
}

#[tokio::test]
async fn invalid_draft_never_reaches_the_network() {
    let mock_server = MockServer::start().await;
    let sessions = logged_in_store("tok-123");

    // Any request at all fails the test.
    Mock::given(method("POST"))
        .and(path("/appointments/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let service = BookingService::new(&test_config(&mock_server), sessions);
    let draft = AppointmentDraft {
        doctor_id: Some(0),
        appointment_date: Some(monday()),
        appointment_time: Some("09:00".to_string()),
        description: String::new(),
    };

    let err = service.submit(&draft).await.unwrap_err();
    assert_matches!(
        err,
        ClientError::Validation(msg) if msg == "Please select doctor, date and time"
    );
}

#[tokio::test]
async fn booking_failure_carries_the_service_detail() {
    let mock_server = MockServer::start().await;
    let sessions = logged_in_store("tok-123");

    Mock::given(method("POST"))
        .and(path("/appointments/"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "detail": "This time slot is already booked"
        })))
        .mount(&mock_server)
        .await;

    let service = BookingService::new(&test_config(&mock_server), sessions);
    let draft = AppointmentDraft {
        doctor_id: Some(7),
        appointment_date: Some(monday()),
        appointment_time: Some("09:00".to_string()),
        description: String::new(),
    };

    let err = service.submit(&draft).await.unwrap_err();
    assert_matches!(
        err,
        ClientError::Api { status: 400, detail } if detail == "This time slot is already booked"
    );
}

#[tokio::test]
async fn my_appointments_lists_the_bookings() {
    let mock_server = MockServer::start().await;
    let sessions = logged_in_store("tok-123");

    Mock::given(method("GET"))
        .and(path("/appointments/my-appointments"))
        .and(header("Authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "appointment_id": 1,
                "doctor_id": 7,
                "patient_id": 3,
                "appointment_date": "2026-08-24T09:00:00",
                "prescription": "rest"
            },
            {
                "appointment_id": 2,
                "doctor_id": 8,
                "patient_id": 3,
                "appointment_date": "2026-08-26T11:00:00"
            }
        ])))
        .mount(&mock_server)
        .await;

    let service = BookingService::new(&test_config(&mock_server), sessions);
    let appointments = service.my_appointments().await.unwrap();

    assert_eq!(appointments.len(), 2);
    assert_eq!(appointments[0].prescription.as_deref(), Some("rest"));
    assert_eq!(appointments[1].doctor_id, 8);
}

#[tokio::test]
async fn controller_walks_the_full_flow_end_to_end() {
    let mock_server = MockServer::start().await;
    let sessions = logged_in_store("tok-123");

    Mock::given(method("GET"))
        .and(path("/appointments/doctors/7/availability"))
        .and(query_param("date", "2026-08-24"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "available_days": ["Monday"],
            "available_times": ["14:00", "09:00", "09:00"]
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/appointments/doctors/7/availability"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "available_days": ["Monday", "Wednesday"],
            "available_times": []
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/appointments/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "appointment_id": 42,
            "doctor_id": 7,
            "patient_id": 3,
            "appointment_date": "2026-08-24T09:00:00"
        })))
        .mount(&mock_server)
        .await;

    let mut controller = BookingController::new(&test_config(&mock_server), sessions, monday());

    controller.doctor_changed(Some(7)).await.unwrap();
    assert!(controller.workflow().calendar().unwrap().is_selectable(monday()));

    controller.date_picked(monday()).await.unwrap();
    assert_eq!(
        controller.workflow().slots().unwrap().options(),
        ["09:00", "14:00"]
    );

    controller.time_picked("09:00").unwrap();

    let redirect = controller.submit("Follow-up").await.unwrap();
    assert_eq!(redirect.location, pages::ALL_APPOINTMENTS);
    assert_eq!(controller.workflow().redirect(), Some(&redirect));
}
