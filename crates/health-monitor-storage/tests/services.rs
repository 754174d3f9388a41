//! End-to-end tests: services over a temporary sled store

use chrono::NaiveDate;
use health_monitor_core::engine::rules::{ALL_CLEAR_ADVICE, HIGH_HEART_RATE_ADVICE, STEPS_ADVICE};
use health_monitor_core::repository::{
    DoctorRepository, HealthDataRepository, RecommendationHistory, ReminderRepository, UserRepository,
};
use health_monitor_core::{
    DoctorProfile, HealthMetrics, HealthMonitor, NewReminder, NewUser, ProfileUpdate, RecordId,
    Repositories, Schedule, ServiceError, Session, StoreError, StoreResult,
};
use health_monitor_storage::SledStore;
use std::sync::Arc;

fn monitor() -> HealthMonitor {
    let store = Arc::new(SledStore::temporary().unwrap());
    HealthMonitor::new(Repositories::from_store(store))
}

fn date(m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, m, d).unwrap()
}

fn metrics(heart_rate: i32, steps: i32, water: f64, sleep: f64, day: NaiveDate) -> HealthMetrics {
    HealthMetrics {
        weight_kg: 80.0,
        height_cm: 180.0,
        steps,
        heart_rate,
        water_intake_oz: water,
        hours_of_sleep: sleep,
        date: day,
    }
}

fn signup(monitor: &HealthMonitor, email: &str, doctor: bool) -> Session {
    let mut user = NewUser::new("Test", "User", email, "s3cret");
    if doctor {
        user = user.doctor();
    }
    monitor.accounts().register(user).unwrap();
    monitor.accounts().login(email, "s3cret").unwrap()
}

fn reminder(name: &str) -> NewReminder {
    NewReminder {
        medicine_name: name.into(),
        dosage: "1 tablet".into(),
        schedule: Schedule::Every12Hours,
        start_date: date(1, 1),
        end_date: date(1, 31),
    }
}

#[test]
fn test_register_and_login() {
    let monitor = monitor();
    monitor
        .accounts()
        .register(NewUser::new("Jane", "Doe", "Jane@Example.com", "pw"))
        .unwrap();

    let session = monitor.accounts().login("  jane@example.com ", "pw").unwrap();
    assert_eq!(session.user().full_name(), "Jane Doe");
    assert!(!session.is_doctor());

    let wrong_password = monitor.accounts().login("jane@example.com", "nope").unwrap_err();
    let unknown_email = monitor.accounts().login("nobody@example.com", "pw").unwrap_err();
    assert!(matches!(wrong_password, ServiceError::InvalidCredentials));
    assert!(matches!(unknown_email, ServiceError::InvalidCredentials));
}

#[test]
fn test_duplicate_registration_rejected() {
    let monitor = monitor();
    signup(&monitor, "dup@example.com", false);

    let err = monitor
        .accounts()
        .register(NewUser::new("Other", "Person", "DUP@example.com", "pw"))
        .unwrap_err();
    assert!(err.is_user_error());
}

#[test]
fn test_recommendation_uses_most_recent_record() {
    let monitor = monitor();
    let session = signup(&monitor, "r@example.com", false);

    let err = monitor.recommendations().recommend(&session).unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(
        err.to_string(),
        "Not found: No health data found for the current user. Please add health data first."
    );

    monitor
        .health_data()
        .add(&session, metrics(110, 5_000, 70.0, 8.0, date(3, 1)))
        .unwrap();
    let first = monitor.recommendations().recommend(&session).unwrap();
    assert_eq!(first.date, date(3, 1));
    assert_eq!(first.advisories.messages(), vec![HIGH_HEART_RATE_ADVICE, STEPS_ADVICE]);

    // an older date added later still counts as the most recent record
    monitor
        .health_data()
        .add(&session, metrics(70, 12_000, 70.0, 8.0, date(1, 1)))
        .unwrap();
    let second = monitor.recommendations().recommend(&session).unwrap();
    assert_eq!(second.date, date(1, 1));
    assert_eq!(second.advisories.messages(), vec![ALL_CLEAR_ADVICE]);

    let history = monitor.recommendations().history(&session).unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].text, format!("{}, {}", HIGH_HEART_RATE_ADVICE, STEPS_ADVICE));
    assert_eq!(history[1].text, ALL_CLEAR_ADVICE);
    assert_eq!(history[1].date, date(1, 1));
}

#[test]
fn test_health_records_are_private() {
    let monitor = monitor();
    let alice = signup(&monitor, "alice@example.com", false);
    let bob = signup(&monitor, "bob@example.com", false);

    let record = monitor
        .health_data()
        .add(&alice, metrics(70, 12_000, 70.0, 8.0, date(2, 1)))
        .unwrap();

    assert!(monitor.health_data().list(&bob).unwrap().is_empty());
    let err = monitor.health_data().delete(&bob, record.id).unwrap_err();
    assert!(matches!(err, ServiceError::AccessDenied(_)));

    let mut changed = record.clone();
    changed.metrics.steps = 1;
    assert!(monitor.health_data().update(&bob, &changed).is_err());

    monitor.health_data().update(&alice, &changed).unwrap();
    assert_eq!(monitor.health_data().list(&alice).unwrap()[0].metrics.steps, 1);
}

#[test]
fn test_reminder_lifecycle() {
    let monitor = monitor();
    let session = signup(&monitor, "meds@example.com", false);

    let mut created = monitor.reminders().add(&session, reminder(" Ibuprofen ")).unwrap();
    assert_eq!(created.medicine_name, "Ibuprofen");

    let overdue = monitor.reminders().overdue(&session, date(2, 1)).unwrap();
    assert_eq!(overdue.len(), 1);
    assert!(monitor.reminders().overdue(&session, date(1, 31)).unwrap().is_empty());

    created.end_date = date(3, 1);
    monitor.reminders().update(&session, &created).unwrap();
    assert!(monitor.reminders().overdue(&session, date(2, 1)).unwrap().is_empty());

    created.end_date = date(1, 1);
    created.start_date = date(1, 2);
    assert!(matches!(
        monitor.reminders().update(&session, &created),
        Err(ServiceError::InvalidInput(_))
    ));

    monitor.reminders().delete(&session, created.id).unwrap();
    assert!(monitor.reminders().list(&session).unwrap().is_empty());
}

#[test]
fn test_doctor_portal() {
    let monitor = monitor();
    let doctor = signup(&monitor, "house@example.com", true);
    let patient = signup(&monitor, "patient@example.com", false);
    let stranger = signup(&monitor, "stranger@example.com", false);

    monitor
        .health_data()
        .add(&patient, metrics(55, 3_000, 20.0, 4.0, date(5, 5)))
        .unwrap();

    // not yet assigned
    let err = monitor
        .doctors()
        .patient_health_data(&doctor, patient.user_id())
        .unwrap_err();
    assert!(matches!(err, ServiceError::AccessDenied(_)));

    monitor
        .doctors()
        .assign("house@example.com", "patient@example.com")
        .unwrap();

    let patients = monitor.doctors().patients(&doctor).unwrap();
    assert_eq!(patients.len(), 1);
    assert_eq!(patients[0].email, "patient@example.com");

    let records = monitor
        .doctors()
        .patient_health_data(&doctor, patient.user_id())
        .unwrap();
    assert_eq!(records.len(), 1);

    let prescribed = monitor
        .doctors()
        .prescribe(&doctor, patient.user_id(), reminder("Lisinopril"))
        .unwrap();
    assert_eq!(prescribed.user_id, patient.user_id());
    assert_eq!(prescribed.prescribed_by, Some(doctor.user_id()));
    assert_eq!(monitor.reminders().list(&patient).unwrap(), vec![prescribed]);

    assert!(monitor
        .doctors()
        .patient_reminders(&doctor, stranger.user_id())
        .is_err());

    let err = monitor.doctors().patients(&patient).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Access denied: You are not authorized to access the doctor portal."
    );

    let err = monitor
        .doctors()
        .assign("patient@example.com", "stranger@example.com")
        .unwrap_err();
    assert!(matches!(err, ServiceError::InvalidInput(_)));
}

#[test]
fn test_register_doctor_stores_profile() {
    let monitor = monitor();
    let (user, profile) = monitor
        .accounts()
        .register_doctor(
            NewUser::new("Gregory", "House", "house@example.com", "s3cret"),
            " MD-1234 ",
            "Diagnostics",
        )
        .unwrap();
    assert!(user.is_doctor);
    assert_eq!(profile.medical_license_number, "MD-1234");

    let session = monitor.accounts().login("house@example.com", "s3cret").unwrap();
    assert_eq!(monitor.doctors().profile(&session).unwrap(), Some(profile));
}

#[test]
fn test_register_doctor_with_blank_license_creates_nothing() {
    let monitor = monitor();
    let err = monitor
        .accounts()
        .register_doctor(
            NewUser::new("Gregory", "House", "house@example.com", "s3cret"),
            "   ",
            "Diagnostics",
        )
        .unwrap_err();

    assert!(matches!(err, ServiceError::InvalidInput(_)));
    assert!(monitor.accounts().login("house@example.com", "s3cret").is_err());
}

struct ReadOnlyProfiles;

impl DoctorRepository for ReadOnlyProfiles {
    fn save_profile(&self, _: &DoctorProfile) -> StoreResult<()> {
        Err(StoreError::unavailable("profiles are read-only"))
    }
    fn profile(&self, _: RecordId) -> StoreResult<Option<DoctorProfile>> {
        Ok(None)
    }
    fn assign_patient(&self, _: RecordId, _: RecordId) -> StoreResult<()> {
        Ok(())
    }
    fn is_assigned(&self, _: RecordId, _: RecordId) -> StoreResult<bool> {
        Ok(false)
    }
    fn patient_ids(&self, _: RecordId) -> StoreResult<Vec<RecordId>> {
        Ok(Vec::new())
    }
    fn remove_user(&self, _: RecordId) -> StoreResult<()> {
        Ok(())
    }
}

#[test]
fn test_register_doctor_rolls_back_when_profile_fails() {
    let store = Arc::new(SledStore::temporary().unwrap());
    let repos = Repositories {
        doctors: Arc::new(ReadOnlyProfiles),
        ..Repositories::from_store(store)
    };
    let monitor = HealthMonitor::new(repos.clone());

    let err = monitor
        .accounts()
        .register_doctor(
            NewUser::new("Gregory", "House", "house@example.com", "s3cret"),
            "MD-1234",
            "Diagnostics",
        )
        .unwrap_err();

    assert!(matches!(err, ServiceError::Store(StoreError::Unavailable(_))));
    assert!(repos.users.find_by_email("house@example.com").unwrap().is_none());
}

#[test]
fn test_profile_update_changes_login() {
    let monitor = monitor();
    let mut session = signup(&monitor, "before@example.com", false);

    monitor
        .accounts()
        .update_profile(&mut session, ProfileUpdate::Email("After@Example.com".into()))
        .unwrap();
    monitor
        .accounts()
        .update_profile(&mut session, ProfileUpdate::Password("n3w".into()))
        .unwrap();
    monitor
        .accounts()
        .update_profile(&mut session, ProfileUpdate::FirstName("   ".into()))
        .unwrap();

    assert_eq!(session.user().email, "after@example.com");
    assert_eq!(session.user().first_name, "Test");
    assert!(monitor.accounts().login("before@example.com", "s3cret").is_err());
    assert!(monitor.accounts().login("after@example.com", "n3w").is_ok());
}

#[test]
fn test_delete_account_removes_owned_data_but_keeps_audit() {
    let store = Arc::new(SledStore::temporary().unwrap());
    let repos = Repositories::from_store(store);
    let monitor = HealthMonitor::new(repos.clone());

    let doctor = signup(&monitor, "doc@example.com", true);
    let session = signup(&monitor, "leaving@example.com", false);
    let user_id = session.user_id();
    monitor.doctors().assign("doc@example.com", "leaving@example.com").unwrap();

    monitor
        .health_data()
        .add(&session, metrics(70, 12_000, 70.0, 8.0, date(4, 4)))
        .unwrap();
    monitor.reminders().add(&session, reminder("Vitamin D")).unwrap();
    monitor.recommendations().recommend(&session).unwrap();

    monitor.accounts().delete_account(session).unwrap();

    assert!(monitor.accounts().login("leaving@example.com", "s3cret").is_err());
    assert!(repos.health.list_for_user(user_id).unwrap().is_empty());
    assert!(repos.reminders.list_for_user(user_id).unwrap().is_empty());
    assert!(monitor.doctors().patients(&doctor).unwrap().is_empty());
    assert_eq!(repos.history.list_for_user(user_id).unwrap().len(), 1);

    // the email is free again
    signup(&monitor, "leaving@example.com", false);
}
