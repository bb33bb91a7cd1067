use std::sync::Arc;
use std::time::Duration;

use clinicdesk_client::mock::MockClinicApi;
use clinicdesk_core::errors::ClinicError;
use clinicdesk_store::{AppointmentStore, BookingFlow, PatientStore, SlotPicker};
use pretty_assertions::assert_eq;

use crate::test_utils::{api, appointment, date, slot};

fn availability_mock() -> MockClinicApi {
    let mut mock = MockClinicApi::new();
    mock.expect_available_slots()
        .withf(|query| query.patient_id == 12 && !query.registered)
        .returning(|query| {
            if query.date == date(2026, 10, 20) {
                Ok(vec![slot("09:00", "09:30", true), slot("09:30", "10:00", false)])
            } else {
                Ok(vec![slot("14:00", "14:30", true)])
            }
        });
    mock
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_newer_date_wins_over_an_unfinished_lookup() {
    let (entered_tx, entered_rx) = std::sync::mpsc::channel::<()>();
    let (release_tx, release_rx) = std::sync::mpsc::channel::<()>();

    let mut mock = MockClinicApi::new();
    mock.expect_available_slots()
        .withf(|query| query.date == date(2026, 10, 20))
        .times(1)
        .returning(move |_| {
            entered_tx.send(()).unwrap();
            release_rx.recv().unwrap();
            Ok(vec![slot("09:00", "09:30", true)])
        });
    mock.expect_available_slots()
        .withf(|query| query.date == date(2026, 10, 21))
        .times(1)
        .returning(|_| Ok(vec![slot("14:00", "14:30", true)]));

    let picker = Arc::new(SlotPicker::new(api(mock), 12, false));
    let older = tokio::spawn({
        let picker = Arc::clone(&picker);
        async move { picker.select_date(date(2026, 10, 20)).await }
    });
    tokio::task::spawn_blocking(move || entered_rx.recv())
        .await
        .unwrap()
        .unwrap();

    let newer = picker.select_date(date(2026, 10, 21)).await.unwrap();
    release_tx.send(()).unwrap();
    let older = older.await.unwrap();

    assert!(matches!(older, Err(ClinicError::Cancelled)));
    let state = picker.state().await;
    assert_eq!(state.date, Some(date(2026, 10, 21)));
    assert_eq!(state.slots, newer);
    assert!(!state.loading);
}

#[tokio::test]
async fn test_selecting_a_date_clears_the_slot() {
    let picker = SlotPicker::new(api(availability_mock()), 12, false);

    picker.select_date(date(2026, 10, 20)).await.unwrap();
    picker.select_slot("09:00 - 09:30").await.unwrap();
    assert!(picker.state().await.selected.is_some());

    let slots = picker.select_date(date(2026, 10, 21)).await.unwrap();

    let state = picker.state().await;
    assert_eq!(state.date, Some(date(2026, 10, 21)));
    assert_eq!(state.selected, None);
    assert_eq!(state.slots, slots);
    assert!(!state.loading);
}

#[tokio::test]
async fn test_reselecting_the_same_date_also_clears_the_slot() {
    let picker = SlotPicker::new(api(availability_mock()), 12, false);

    picker.select_date(date(2026, 10, 20)).await.unwrap();
    picker.select_slot("09:00 - 09:30").await.unwrap();
    picker.select_date(date(2026, 10, 20)).await.unwrap();

    assert_eq!(picker.state().await.selected, None);
}

#[tokio::test]
async fn test_taken_or_unknown_slot_keeps_selection() {
    let picker = SlotPicker::new(api(availability_mock()), 12, false);
    picker.select_date(date(2026, 10, 20)).await.unwrap();
    let chosen = picker.select_slot("09:00 - 09:30").await.unwrap();

    assert!(matches!(
        picker.select_slot("09:30 - 10:00").await,
        Err(ClinicError::Validation(_))
    ));
    assert!(matches!(
        picker.select_slot("23:00 - 23:30").await,
        Err(ClinicError::Validation(_))
    ));
    assert_eq!(picker.state().await.selected, Some(chosen));
}

#[tokio::test]
async fn test_failed_lookup_sets_inline_error() {
    let mut mock = MockClinicApi::new();
    mock.expect_available_slots()
        .times(1)
        .returning(|_| Err(ClinicError::NotFound("No schedule for this date".into())));

    let picker = SlotPicker::new(api(mock), 12, true);
    assert!(picker.select_date(date(2026, 10, 25)).await.is_err());

    let state = picker.state().await;
    assert_eq!(state.error.as_deref(), Some("No schedule for this date"));
    assert!(state.slots.is_empty());
    assert!(!state.loading);
}

#[tokio::test]
async fn test_booking_requires_a_selected_slot() {
    let mut mock = availability_mock();
    mock.expect_book_consultation().times(0);

    let api = api(mock);
    let appointments = Arc::new(AppointmentStore::new(api.clone(), 10));
    let patients = Arc::new(PatientStore::new(api.clone(), 10, Duration::ZERO));
    let booking = BookingFlow::new(api.clone(), appointments, patients);
    let picker = SlotPicker::new(api, 12, false);

    assert!(matches!(
        booking.book(&picker, None).await,
        Err(ClinicError::Validation(_))
    ));

    picker.select_date(date(2026, 10, 20)).await.unwrap();
    let err = booking.book(&picker, None).await.unwrap_err();
    assert_eq!(err.user_message(), "Select a time slot");
}

#[tokio::test]
async fn test_booking_sends_selected_slot_and_resets_picker() {
    let mut mock = availability_mock();
    mock.expect_book_consultation()
        .withf(|consultation| {
            consultation.patient_id == 12
                && consultation.schedule_id == Some(4)
                && consultation.slot_date == date(2026, 10, 20)
                && consultation.slot_time == "09:00 - 09:30"
                && consultation.reason.as_deref() == Some("Follow-up")
        })
        .times(1)
        .returning(|consultation| Ok(appointment(40, consultation.patient_id, "booked")));
    mock.expect_overview()
        .times(2)
        .returning(|| Ok(Default::default()));

    let api = api(mock);
    let appointments = Arc::new(AppointmentStore::new(api.clone(), 10));
    let patients = Arc::new(PatientStore::new(api.clone(), 10, Duration::ZERO));
    let booking = BookingFlow::new(api.clone(), appointments.clone(), patients);
    let picker = SlotPicker::new(api, 12, false);

    appointments.overview().await.unwrap();
    picker.select_date(date(2026, 10, 20)).await.unwrap();
    picker.select_slot("09:00 - 09:30").await.unwrap();

    let booked = booking.book(&picker, Some("Follow-up".into())).await.unwrap();

    assert_eq!(booked.id, 40);
    assert_eq!(picker.state().await, Default::default());
    // The dashboard counters are fetched again after booking.
    appointments.overview().await.unwrap();
}
