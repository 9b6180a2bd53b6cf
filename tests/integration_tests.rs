use chrono::{Duration, NaiveDate};
use clinic_ledger::{
    AppointmentListing, AppointmentStatus, FixedClock, LedgerError, Registry, SystemClock,
};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
}

fn future_date() -> String {
    (today() + Duration::days(30)).format("%Y-%m-%d").to_string()
}

fn clinic() -> Registry<FixedClock> {
    let mut registry = Registry::new(FixedClock::new(today()));
    assert_eq!(
        registry.add_doctor("Dr. A", 40, "F", "Dentist", &["9:00 AM", "10:00 AM"]),
        "D001"
    );
    assert_eq!(registry.add_patient("Bob", 30, "M"), "P001");
    registry
}

#[test]
fn test_end_to_end_booking_scenario() {
    let mut registry = clinic();
    let date = future_date();

    let id = registry
        .book_appointment("P001", "D001", &date, "9:00 AM")
        .unwrap();
    assert_eq!(id, "A001");
    assert_eq!(
        registry.appointment("A001").unwrap().status,
        AppointmentStatus::Confirmed
    );

    let second = registry.book_appointment("P001", "D001", &date, "9:00 AM");
    assert!(matches!(second, Err(LedgerError::SlotAlreadyBooked { .. })));

    registry.cancel_appointment("A001").unwrap();
    assert_eq!(
        registry.appointment("A001").unwrap().status,
        AppointmentStatus::Cancelled
    );

    assert_eq!(
        registry.compute_bill("A001", 500.0),
        Err(LedgerError::InvalidAppointmentState {
            appointment_id: "A001".to_string(),
            status: AppointmentStatus::Cancelled,
        })
    );
}

#[test]
fn test_patient_ids_have_no_gaps() {
    let mut registry = Registry::new(FixedClock::new(today()));
    let mut previous = String::new();
    for n in 1..=25 {
        let id = registry.add_patient("Patient", 20, "F");
        assert_eq!(id, format!("P{:03}", n));
        assert!(id > previous);
        previous = id;
    }
}

#[test]
fn test_booking_outside_schedule_creates_nothing() {
    let mut registry = clinic();
    for time in ["8:00 AM", "9:00", "", "10:00 am"] {
        let result = registry.book_appointment("P001", "D001", &future_date(), time);
        assert!(matches!(result, Err(LedgerError::SlotNotAvailable { .. })));
    }
    assert_eq!(registry.appointment_count(), 0);
    assert!(registry.patient("P001").unwrap().appointments.is_empty());
    assert_eq!(registry.list_appointments(), AppointmentListing::Empty);
}

#[test]
fn test_doctor_with_empty_schedule_is_never_available() {
    let mut registry = clinic();
    let empty: [&str; 0] = [];
    let doctor_id = registry.add_doctor("Dr. Empty", 60, "M", "GP", &empty);
    assert_eq!(doctor_id, "D002");

    let result = registry.book_appointment("P001", "D002", &future_date(), "9:00 AM");
    assert!(matches!(result, Err(LedgerError::SlotNotAvailable { .. })));
}

#[test]
fn test_slot_rebooks_after_cancel() {
    let mut registry = clinic();
    let date = future_date();

    registry
        .book_appointment("P001", "D001", &date, "10:00 AM")
        .unwrap();
    registry.cancel_appointment("A001").unwrap();

    let rebooked = registry
        .book_appointment("P001", "D001", &date, "10:00 AM")
        .unwrap();
    assert_eq!(rebooked, "A002");

    // 同一時段的其他醫師或日期互不影響
    let other_day = (today() + Duration::days(31)).format("%Y-%m-%d").to_string();
    assert!(registry
        .book_appointment("P001", "D001", &other_day, "10:00 AM")
        .is_ok());
}

#[test]
fn test_recancel_is_silent() {
    let mut registry = clinic();
    registry
        .book_appointment("P001", "D001", &future_date(), "9:00 AM")
        .unwrap();

    assert_eq!(registry.cancel_appointment("A001"), Ok(()));
    assert_eq!(registry.cancel_appointment("A001"), Ok(()));
    assert_eq!(
        registry.appointment("A001").unwrap().status,
        AppointmentStatus::Cancelled
    );
    assert_eq!(
        registry.cancel_appointment("A002"),
        Err(LedgerError::AppointmentNotFound("A002".to_string()))
    );
}

#[test]
fn test_bill_on_cancelled_fails_for_any_fee() {
    let mut registry = clinic();
    registry
        .book_appointment("P001", "D001", &future_date(), "9:00 AM")
        .unwrap();
    registry.cancel_appointment("A001").unwrap();

    for fee in [0.0, 500.0, -50.0, f64::NAN] {
        assert!(matches!(
            registry.compute_bill("A001", fee),
            Err(LedgerError::InvalidAppointmentState { .. })
        ));
    }
}

#[test]
fn test_negative_extra_fee_is_clamped() {
    let mut registry = clinic();
    registry
        .book_appointment("P001", "D001", &future_date(), "9:00 AM")
        .unwrap();

    let bill = registry.compute_bill("A001", -50.0).unwrap();
    assert_eq!(bill.consultation_fee, 3000.0);
    assert_eq!(bill.extra_fee, 0.0);
    assert_eq!(bill.total, 3000.0);
    assert!(bill.extra_fee_clamped);

    let bill = registry.compute_bill("A001", 250.75).unwrap();
    assert_eq!(bill.total, 3250.75);
    assert!(!bill.extra_fee_clamped);
}

#[test]
fn test_date_validation() {
    let mut registry = clinic();
    assert_eq!(
        registry.book_appointment("P001", "D001", "2020-01-01", "9:00 AM"),
        Err(LedgerError::PastDate(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()))
    );
    // 過去日期即使時段無效也先回報 PastDate
    assert!(matches!(
        registry.book_appointment("P001", "D001", "2020-01-01", "midnight"),
        Err(LedgerError::PastDate(_))
    ));
    for bad in [
        "not-a-date",
        "2030/01/01",
        "2030-13-01",
        "2030-02-30",
        "",
        " 2030-01-05",
        "+2030-01-05",
        "2030-01-05 ",
    ] {
        assert_eq!(
            registry.book_appointment("P001", "D001", bad, "9:00 AM"),
            Err(LedgerError::InvalidDateFormat(bad.to_string()))
        );
    }
    assert_eq!(registry.appointment_count(), 0);

    // 月、日可省略前導零
    assert_eq!(
        registry.book_appointment("P001", "D001", "2030-1-5", "9:00 AM"),
        Ok("A001".to_string())
    );
}

#[test]
fn test_system_clock_rejects_yesterday() {
    let mut registry = Registry::new(SystemClock);
    registry.add_doctor("Dr. A", 40, "F", "Dentist", &["9:00 AM"]);
    registry.add_patient("Bob", 30, "M");

    // 一年前必然是過去
    let past = (chrono::Local::now().date_naive() - Duration::days(365))
        .format("%Y-%m-%d")
        .to_string();
    assert!(matches!(
        registry.book_appointment("P001", "D001", &past, "9:00 AM"),
        Err(LedgerError::PastDate(_))
    ));
}

#[test]
fn test_listing_preserves_insertion_order() {
    let mut registry = clinic();
    registry.add_patient("Cara", 41, "F");
    let date = future_date();

    registry
        .book_appointment("P002", "D001", &date, "10:00 AM")
        .unwrap();
    registry
        .book_appointment("P001", "D001", &date, "9:00 AM")
        .unwrap();
    registry.cancel_appointment("A001").unwrap();

    let AppointmentListing::Appointments(views) = registry.list_appointments() else {
        panic!("expected appointments");
    };
    let ids: Vec<&str> = views.iter().map(|v| v.appointment_id.as_str()).collect();
    assert_eq!(ids, vec!["A001", "A002"]);
    assert_eq!(views[0].patient_name, "Cara");
    assert_eq!(views[0].status, AppointmentStatus::Cancelled);
    assert_eq!(views[1].status, AppointmentStatus::Confirmed);
}
