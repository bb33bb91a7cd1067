use clinicdesk_client::mock::MockClinicApi;
use clinicdesk_core::errors::ClinicError;
use clinicdesk_core::models::schedule::{CustomSchedule, Day, ScheduleWindow};
use clinicdesk_store::mutation::MutationState;
use clinicdesk_store::schedules::ScheduleStore;
use pretty_assertions::assert_eq;

use crate::test_utils::{api, custom_schedule, date, general_schedule, page};

fn custom_page() -> Vec<CustomSchedule> {
    vec![
        custom_schedule(1, date(2026, 12, 24)),
        custom_schedule(2, date(2026, 12, 26)),
        custom_schedule(3, date(2026, 12, 31)),
    ]
}

fn ids(schedules: &[CustomSchedule]) -> Vec<i64> {
    schedules.iter().map(|s| s.id).collect()
}

#[tokio::test]
async fn test_delete_removes_immediately_and_commits() {
    let mut mock = MockClinicApi::new();
    mock.expect_list_custom_schedules()
        .returning(|_, _| Ok(page(custom_page(), 1, 1, 3)));
    mock.expect_delete_custom_schedule()
        .withf(|id| *id == 2)
        .times(1)
        .returning(|_| Ok(()));

    let store = ScheduleStore::new(api(mock), 10);
    store.load_custom(1).await.unwrap();

    store.delete_custom(2).await.unwrap();

    assert_eq!(ids(&store.custom().await), vec![1, 3]);
    assert_eq!(store.custom_pagination().await.total_count(), 2);
    assert_eq!(
        store.ledger().last().await.unwrap().state,
        MutationState::Committed
    );
}

#[test_log::test(tokio::test)]
async fn test_failed_delete_restores_schedule_in_place() {
    let mut mock = MockClinicApi::new();
    mock.expect_list_custom_schedules()
        .returning(|_, _| Ok(page(custom_page(), 1, 1, 3)));
    mock.expect_delete_custom_schedule()
        .times(1)
        .returning(|_| Err(ClinicError::Conflict("Schedule has booked slots".into())));

    let store = ScheduleStore::new(api(mock), 10);
    store.load_custom(1).await.unwrap();

    let err = store.delete_custom(2).await.unwrap_err();

    assert!(matches!(err, ClinicError::Conflict(_)));
    assert_eq!(ids(&store.custom().await), vec![1, 2, 3]);
    assert_eq!(store.custom_pagination().await.total_count(), 3);

    let mutation = store.ledger().last().await.unwrap();
    assert_eq!(mutation.state, MutationState::RolledBack);
    assert_eq!(mutation.error.as_deref(), Some("Schedule has booked slots"));
}

#[tokio::test]
async fn test_failed_toggle_restores_status() {
    let mut mock = MockClinicApi::new();
    mock.expect_list_custom_schedules()
        .returning(|_, _| Ok(page(custom_page(), 1, 1, 3)));
    mock.expect_set_custom_schedule_status()
        .withf(|id, status| *id == 3 && !*status)
        .times(1)
        .returning(|_, _| {
            Err(ClinicError::Api {
                status: 500,
                message: "Internal Server Error".into(),
            })
        });

    let store = ScheduleStore::new(api(mock), 10);
    store.load_custom(1).await.unwrap();

    assert!(store.toggle_custom(3).await.is_err());
    assert!(store.custom().await[2].status);
}

#[tokio::test]
async fn test_toggle_takes_server_copy() {
    let mut mock = MockClinicApi::new();
    mock.expect_list_custom_schedules()
        .returning(|_, _| Ok(page(custom_page(), 1, 1, 3)));
    mock.expect_set_custom_schedule_status()
        .times(1)
        .returning(|id, status| {
            let mut schedule = custom_schedule(id, date(2026, 12, 24));
            schedule.status = status;
            Ok(schedule)
        });

    let store = ScheduleStore::new(api(mock), 10);
    store.load_custom(1).await.unwrap();

    let toggled = store.toggle_custom(1).await.unwrap();

    assert!(!toggled.status);
    assert!(!store.custom().await[0].status);
}

#[tokio::test]
async fn test_pagination_is_tracked_per_kind() {
    let mut mock = MockClinicApi::new();
    mock.expect_list_general_schedules()
        .withf(|page, per_page| *page == 1 && *per_page == 10)
        .returning(|_, _| Ok(page(vec![general_schedule(1, Day::Monday)], 1, 1, 7)));
    mock.expect_list_custom_schedules()
        .withf(|page, _| *page == 1)
        .returning(|_, _| Ok(page(custom_page(), 1, 4, 32)));
    mock.expect_list_custom_schedules()
        .withf(|page, _| *page == 4)
        .times(1)
        .returning(|_, _| Ok(page(vec![custom_schedule(30, date(2027, 3, 1))], 4, 4, 32)));

    let store = ScheduleStore::new(api(mock), 10);
    store.load_general(1).await.unwrap();
    store.load_custom(1).await.unwrap();
    store.load_custom(12).await.unwrap();

    assert_eq!(store.general_pagination().await.total_pages(), 1);
    assert_eq!(store.custom_pagination().await.current_page(), 4);
    assert_eq!(store.custom_pagination().await.total_count(), 32);
}

#[tokio::test]
async fn test_fresh_store_requests_the_asked_page() {
    let mut mock = MockClinicApi::new();
    mock.expect_list_custom_schedules()
        .withf(|page, _| *page == 4)
        .times(1)
        .returning(|_, _| Ok(page(vec![custom_schedule(30, date(2027, 3, 1))], 4, 5, 45)));

    let store = ScheduleStore::new(api(mock), 10);
    let loaded = store.load_custom(4).await.unwrap();

    assert_eq!(loaded.current_page, 4);
    assert_eq!(store.custom_pagination().await.current_page(), 4);
}

#[tokio::test]
async fn test_invalid_general_window_is_rejected_before_request() {
    let mut mock = MockClinicApi::new();
    mock.expect_update_general_schedule().times(0);

    let store = ScheduleStore::new(api(mock), 10);
    let window = ScheduleWindow {
        start_time: "17:00".into(),
        end_time: "09:00".into(),
        status: true,
        duration: 30,
    };

    assert!(matches!(
        store.update_general(Day::Friday, &window).await,
        Err(ClinicError::Fields(_))
    ));
}

#[tokio::test]
async fn test_custom_schedule_overrides_general_for_its_date() {
    let mut mock = MockClinicApi::new();
    mock.expect_list_general_schedules()
        .returning(|_, _| Ok(page(vec![general_schedule(1, Day::Thursday)], 1, 1, 1)));
    mock.expect_list_custom_schedules()
        .returning(|_, _| Ok(page(custom_page(), 1, 1, 3)));

    let store = ScheduleStore::new(api(mock), 10);
    store.load_general(1).await.unwrap();
    store.load_custom(1).await.unwrap();

    // 2026-12-24 and 2026-12-31 are both Thursdays.
    let override_window = store.effective_window(date(2026, 12, 24)).await.unwrap();
    assert_eq!(override_window.start_time, "10:00");

    let regular = store.effective_window(date(2026, 12, 17)).await.unwrap();
    assert_eq!(regular.start_time, "09:00");

    assert!(store.effective_window(date(2026, 12, 18)).await.is_none());
}
