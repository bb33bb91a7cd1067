use clinicdesk_client::mock::MockClinicApi;
use clinicdesk_core::errors::ClinicError;
use clinicdesk_core::models::prescription::{NoteInput, PrescriptionNote};
use clinicdesk_store::PrescriptionStore;
use clinicdesk_store::mutation::MutationState;
use pretty_assertions::assert_eq;

use crate::test_utils::api;

fn note(id: i64, key: &str) -> PrescriptionNote {
    PrescriptionNote {
        id,
        consultation_id: 31,
        key: key.into(),
        value: "once daily".into(),
        created_at: None,
    }
}

fn notes_mock() -> MockClinicApi {
    let mut mock = MockClinicApi::new();
    mock.expect_list_notes()
        .withf(|consultation_id| *consultation_id == 31)
        .returning(|_| Ok(vec![note(1, "Metformin"), note(2, "Lisinopril"), note(3, "Atorvastatin")]));
    mock
}

#[tokio::test]
async fn test_failed_delete_puts_note_back() {
    let mut mock = notes_mock();
    mock.expect_delete_note()
        .times(1)
        .returning(|_, _| Err(ClinicError::Authorization("Forbidden".into())));

    let store = PrescriptionStore::new(api(mock));
    store.load(31).await.unwrap();

    assert!(store.delete(31, 2).await.is_err());

    let keys: Vec<_> = store.notes(31).await.into_iter().map(|n| n.key).collect();
    assert_eq!(keys, vec!["Metformin", "Lisinopril", "Atorvastatin"]);
    assert_eq!(
        store.ledger().last().await.unwrap().state,
        MutationState::RolledBack
    );
}

#[tokio::test]
async fn test_delete_commits() {
    let mut mock = notes_mock();
    mock.expect_delete_note()
        .withf(|consultation_id, note_id| *consultation_id == 31 && *note_id == 2)
        .times(1)
        .returning(|_, _| Ok(()));

    let store = PrescriptionStore::new(api(mock));
    store.load(31).await.unwrap();
    store.delete(31, 2).await.unwrap();

    let ids: Vec<_> = store.notes(31).await.into_iter().map(|n| n.id).collect();
    assert_eq!(ids, vec![1, 3]);
}

#[tokio::test]
async fn test_empty_key_is_rejected_before_request() {
    let mut mock = MockClinicApi::new();
    mock.expect_create_note().times(0);

    let store = PrescriptionStore::new(api(mock));
    let result = store.create(31, &NoteInput::new("  ", "twice daily")).await;

    assert!(matches!(result, Err(ClinicError::Fields(_))));
}

#[tokio::test]
async fn test_update_replaces_with_server_copy() {
    let mut mock = notes_mock();
    mock.expect_update_note()
        .times(1)
        .returning(|_, note_id, input| {
            let mut updated = note(note_id, &input.key);
            updated.value = input.value.clone();
            Ok(updated)
        });

    let store = PrescriptionStore::new(api(mock));
    store.load(31).await.unwrap();
    store
        .update(31, 3, &NoteInput::new("Atorvastatin", "20mg at night"))
        .await
        .unwrap();

    assert_eq!(store.notes(31).await[2].value, "20mg at night");
}
