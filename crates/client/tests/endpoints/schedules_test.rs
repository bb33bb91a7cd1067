use axum::http::{Method, StatusCode};
use chrono::NaiveDate;
use clinicdesk_client::ClinicApi;
use clinicdesk_core::models::schedule::{CustomScheduleInput, Day, ScheduleWindow};
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::test_utils::FakeBackend;

fn window() -> ScheduleWindow {
    ScheduleWindow {
        start_time: "09:00".into(),
        end_time: "13:00".into(),
        status: true,
        duration: 30,
    }
}

#[tokio::test]
async fn test_schedule_lists_are_split_by_type() {
    let backend = FakeBackend::start().await;
    backend.on(
        Method::GET,
        "/api/v1/admin/schedules",
        StatusCode::OK,
        json!({
            "data": [{
                "id": 1, "day": "monday", "start_time": "09:00", "end_time": "17:00",
                "status": true, "duration": 30
            }],
            "current_page": 1,
            "per_page": 7,
            "total_count": 1,
            "total_pages": 1
        }),
    );
    let (api, _session) = backend.signed_in_client().await;

    let page = api.list_general_schedules(1, 7).await.unwrap();

    assert_eq!(page.data[0].day, Day::Monday);
    assert_eq!(
        backend.last_request().query.as_deref(),
        Some("type=general&page=1&per_page=7")
    );
}

#[tokio::test]
async fn test_general_schedule_updates_by_day_name() {
    let backend = FakeBackend::start().await;
    backend.on(
        Method::PUT,
        "/api/v1/admin/schedules/general/tuesday",
        StatusCode::OK,
        json!({
            "id": 2, "day": "tuesday", "start_time": "09:00", "end_time": "13:00",
            "status": true, "duration": 30
        }),
    );
    let (api, _session) = backend.signed_in_client().await;

    let schedule = api
        .update_general_schedule(Day::Tuesday, &window())
        .await
        .unwrap();

    assert_eq!(schedule.end_time, "13:00");
    assert_eq!(
        backend.last_request().body,
        Some(json!({"schedule": {
            "start_time": "09:00", "end_time": "13:00", "status": true, "duration": 30
        }}))
    );
}

#[tokio::test]
async fn test_custom_schedule_status_toggle_and_delete() {
    let backend = FakeBackend::start().await;
    backend.on(
        Method::PATCH,
        "/api/v1/admin/schedules/9/toggle_status",
        StatusCode::OK,
        json!({
            "id": 9, "scheduled_date": "2026-12-24", "start_time": "09:00",
            "end_time": "12:00", "status": false, "duration": 30
        }),
    );
    backend.on(
        Method::DELETE,
        "/api/v1/admin/schedules/9",
        StatusCode::OK,
        json!({"message": "Deleted"}),
    );
    let (api, _session) = backend.signed_in_client().await;

    let schedule = api.set_custom_schedule_status(9, false).await.unwrap();
    assert!(!schedule.status);
    assert_eq!(backend.last_request().body, Some(json!({"status": false})));

    api.delete_custom_schedule(9).await.unwrap();
    assert_eq!(backend.requests().len(), 2);
}

#[tokio::test]
async fn test_create_custom_schedule_body() {
    let backend = FakeBackend::start().await;
    backend.on(
        Method::POST,
        "/api/v1/admin/schedules",
        StatusCode::CREATED,
        json!({
            "id": 10, "scheduled_date": "2026-12-31", "start_time": "09:00",
            "end_time": "13:00", "status": true, "duration": 30
        }),
    );
    let (api, _session) = backend.signed_in_client().await;

    let input = CustomScheduleInput {
        scheduled_date: NaiveDate::from_ymd_opt(2026, 12, 31).unwrap(),
        window: window(),
    };
    let created = api.create_custom_schedule(&input).await.unwrap();

    assert_eq!(created.id, 10);
    assert_eq!(
        backend.last_request().body,
        Some(json!({"schedule": {
            "scheduled_date": "2026-12-31",
            "start_time": "09:00",
            "end_time": "13:00",
            "status": true,
            "duration": 30
        }}))
    );
}
