use std::time::Duration;

use clinicdesk_client::mock::MockClinicApi;
use clinicdesk_core::errors::ClinicError;
use clinicdesk_core::models::patient::{NewPatient, PatientStatus};
use clinicdesk_store::mutation::MutationState;
use clinicdesk_store::patients::PatientStore;
use pretty_assertions::assert_eq;

use crate::test_utils::{api, date, page, patient};

#[tokio::test(start_paused = true)]
async fn test_search_burst_sends_one_request() {
    let mut mock = MockClinicApi::new();
    mock.expect_list_patients()
        .withf(|query| query.search.as_deref() == Some("curie") && query.page == 1)
        .times(1)
        .returning(|_| Ok(page(vec![patient(1, PatientStatus::Active)], 1, 1, 1)));

    let store = PatientStore::new(api(mock), 10, Duration::from_millis(400));

    let (first, second, last) = tokio::join!(
        store.search("c"),
        async {
            tokio::time::sleep(Duration::from_millis(120)).await;
            store.search("cur").await
        },
        async {
            tokio::time::sleep(Duration::from_millis(250)).await;
            store.search("curie").await
        },
    );

    assert!(first.unwrap().is_none());
    assert!(second.unwrap().is_none());
    assert_eq!(last.unwrap().unwrap().data.len(), 1);
    assert_eq!(store.search_term().await.as_deref(), Some("curie"));
}

#[tokio::test(start_paused = true)]
async fn test_searches_in_separate_windows_each_send() {
    let mut mock = MockClinicApi::new();
    mock.expect_list_patients()
        .times(2)
        .returning(|_| Ok(page(Vec::new(), 1, 0, 0)));

    let store = PatientStore::new(api(mock), 10, Duration::from_millis(400));

    assert!(store.search("ada").await.unwrap().is_some());
    assert!(store.search("grace").await.unwrap().is_some());
}

#[tokio::test]
async fn test_page_requests_stay_in_range() {
    let mut mock = MockClinicApi::new();
    mock.expect_list_patients()
        .withf(|query| query.page == 1)
        .times(1)
        .returning(|_| Ok(page(vec![patient(1, PatientStatus::Active)], 1, 3, 25)));
    mock.expect_list_patients()
        .withf(|query| query.page == 3)
        .times(1)
        .returning(|_| Ok(page(vec![patient(21, PatientStatus::Active)], 3, 3, 25)));

    let store = PatientStore::new(api(mock), 10, Duration::ZERO);

    store.load(0).await.unwrap();
    store.load(10).await.unwrap();

    let pagination = store.pagination().await;
    assert_eq!(pagination.current_page(), 3);
    assert!(!pagination.has_next());
    assert!(store.next_page().await.unwrap().is_none());
}

#[tokio::test]
async fn test_toggle_status_rolls_back_on_failure() {
    let mut mock = MockClinicApi::new();
    mock.expect_list_patients()
        .returning(|_| Ok(page(vec![patient(7, PatientStatus::Active)], 1, 1, 1)));
    mock.expect_update_patient()
        .withf(|id, update| *id == 7 && update.status == Some(PatientStatus::Inactive))
        .times(1)
        .returning(|_, _| {
            Err(ClinicError::Api {
                status: 500,
                message: "Internal Server Error".into(),
            })
        });

    let store = PatientStore::new(api(mock), 10, Duration::ZERO);
    store.load(1).await.unwrap();

    let result = store.toggle_status(7).await;

    assert!(result.is_err());
    assert_eq!(store.rows().await[0].status, PatientStatus::Active);
    let mutation = store.ledger().last().await.unwrap();
    assert_eq!(mutation.state, MutationState::RolledBack);
    assert_eq!(mutation.target, 7);
}

#[tokio::test]
async fn test_toggle_status_keeps_server_copy() {
    let mut mock = MockClinicApi::new();
    mock.expect_list_patients()
        .returning(|_| Ok(page(vec![patient(7, PatientStatus::Active)], 1, 1, 1)));
    mock.expect_update_patient()
        .times(1)
        .returning(|id, _| Ok(patient(id, PatientStatus::Inactive)));

    let store = PatientStore::new(api(mock), 10, Duration::ZERO);
    store.load(1).await.unwrap();

    let updated = store.toggle_status(7).await.unwrap();

    assert_eq!(updated.status, PatientStatus::Inactive);
    assert_eq!(store.rows().await[0].status, PatientStatus::Inactive);
    assert_eq!(
        store.ledger().last().await.unwrap().state,
        MutationState::Committed
    );
}

#[tokio::test]
async fn test_toggle_unknown_patient_is_not_found() {
    let store = PatientStore::new(api(MockClinicApi::new()), 10, Duration::ZERO);
    assert!(matches!(
        store.toggle_status(99).await,
        Err(ClinicError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_invalid_patient_is_rejected_before_request() {
    let mut mock = MockClinicApi::new();
    mock.expect_create_patient().times(0);

    let store = PatientStore::new(api(mock), 10, Duration::ZERO);
    let input = NewPatient {
        first_name: "Ada".into(),
        last_name: String::new(),
        email: "ada-at-example".into(),
        phone: "12".into(),
        ..NewPatient::default()
    };

    let err = store.create(&input, date(2026, 10, 16)).await.unwrap_err();

    match err {
        ClinicError::Fields(fields) => {
            assert_eq!(fields.fields().collect::<Vec<_>>(), vec!["email", "last_name", "phone"]);
        }
        other => panic!("expected field errors, got {other:?}"),
    }
}

#[tokio::test]
async fn test_create_refetches_current_page() {
    let mut mock = MockClinicApi::new();
    mock.expect_list_patients()
        .times(2)
        .returning(|_| Ok(page(vec![patient(1, PatientStatus::Active)], 1, 1, 1)));
    mock.expect_create_patient()
        .times(1)
        .returning(|_| Ok(patient(2, PatientStatus::Active)));

    let store = PatientStore::new(api(mock), 10, Duration::ZERO);
    store.load(1).await.unwrap();

    let input = NewPatient {
        first_name: "Grace".into(),
        last_name: "Hopper".into(),
        email: "grace@navy.mil".into(),
        phone: "+1 202 555 0114".into(),
        ..NewPatient::default()
    };
    let created = store.create(&input, date(2026, 10, 16)).await.unwrap();

    assert_eq!(created.id, 2);
}
