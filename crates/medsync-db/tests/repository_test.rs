//! Integration tests for the SurrealDB repositories using an
//! in-memory instance.

use medsync_core::error::MedsyncError;
use medsync_core::models::patient::{CreatePatient, PatientStatus, UpdatePatient};
use medsync_core::models::staff::{CreateStaff, StaffStatus};
use medsync_core::models::user::{CreateUser, UpdateUser, UserRole};
use medsync_core::repository::{
    Pagination, PatientRepository, StaffRepository, UserRepository,
};
use medsync_db::repository::{
    SurrealPatientRepository, SurrealStaffRepository, SurrealUserRepository,
};
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;

/// Helper: spin up in-memory DB and run migrations.
async fn setup() -> Surreal<surrealdb::engine::local::Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    medsync_db::run_migrations(&db).await.unwrap();
    db
}

fn create_user(email: &str, phone: Option<&str>, role: UserRole) -> CreateUser {
    CreateUser {
        email: email.into(),
        phone: phone.map(String::from),
        role,
        password: "correct-horse-battery".into(),
        patient_id: None,
        first_name: "Test".into(),
        last_name: "User".into(),
        address: None,
    }
}

fn create_patient(email: Option<&str>, phone: Option<&str>) -> CreatePatient {
    CreatePatient {
        email: email.map(String::from),
        phone: phone.map(String::from),
        status: PatientStatus::Active,
        name: "Test".into(),
        last_name: "Patient".into(),
        address: None,
    }
}

#[tokio::test]
async fn create_and_get_user() {
    let db = setup().await;
    let repo = SurrealUserRepository::new(db);

    let user = repo
        .create(create_user("Alice@Example.com", Some("555-0100"), UserRole::Doctor))
        .await
        .unwrap();

    // Email is lowercased at the write boundary.
    assert_eq!(user.email, "alice@example.com");
    assert_eq!(user.role, UserRole::Doctor);
    assert!(user.is_active);
    assert_eq!(user.patient_id, None);

    // Password should be hashed, not stored in plaintext.
    assert_ne!(user.password_hash, "correct-horse-battery");
    assert!(user.password_hash.starts_with("$argon2id$"));

    let fetched = repo.get_by_id(user.id).await.unwrap();
    assert_eq!(fetched.id, user.id);
    assert_eq!(fetched.email, "alice@example.com");
}

#[tokio::test]
async fn find_by_email_is_case_insensitive() {
    let db = setup().await;
    let repo = SurrealUserRepository::new(db);

    let user = repo
        .create(create_user("bob@example.com", None, UserRole::Admin))
        .await
        .unwrap();

    let found = repo.find_by_email("BOB@Example.COM").await.unwrap();
    assert_eq!(found.unwrap().id, user.id);

    let missing = repo.find_by_email("nobody@example.com").await.unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn duplicate_email_is_a_conflict() {
    let db = setup().await;
    let repo = SurrealUserRepository::new(db);

    repo.create(create_user("same@example.com", None, UserRole::Patient))
        .await
        .unwrap();

    let err = repo
        .create(create_user("Same@Example.com", None, UserRole::Patient))
        .await
        .unwrap_err();

    assert!(
        matches!(err, MedsyncError::AlreadyExists { .. }),
        "expected AlreadyExists, got: {err:?}"
    );
}

#[tokio::test]
async fn set_and_find_by_patient_id() {
    let db = setup().await;
    let users = SurrealUserRepository::new(db.clone());
    let patients = SurrealPatientRepository::new(db);

    let patient = patients
        .create(create_patient(Some("p@example.com"), None))
        .await
        .unwrap();
    let user = users
        .create(create_user("u@example.com", None, UserRole::Patient))
        .await
        .unwrap();

    assert!(
        users
            .find_by_patient_id(patient.id)
            .await
            .unwrap()
            .is_none()
    );

    let linked = users.set_patient_id(user.id, patient.id).await.unwrap();
    assert_eq!(linked.patient_id, Some(patient.id));

    let found = users.find_by_patient_id(patient.id).await.unwrap();
    assert_eq!(found.unwrap().id, user.id);

    assert_eq!(users.linked_patient_ids().await.unwrap(), vec![patient.id]);
}

#[tokio::test]
async fn update_user_partial_and_clear() {
    let db = setup().await;
    let repo = SurrealUserRepository::new(db);

    let user = repo
        .create(create_user("carol@example.com", Some("555-0101"), UserRole::Receptionist))
        .await
        .unwrap();

    let updated = repo
        .update(
            user.id,
            UpdateUser {
                is_active: Some(false),
                phone: Some(None), // clear
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert!(!updated.is_active);
    assert_eq!(updated.phone, None);
    assert_eq!(updated.email, "carol@example.com"); // unchanged
}

#[tokio::test]
async fn list_users_by_role_with_pagination() {
    let db = setup().await;
    let repo = SurrealUserRepository::new(db);

    for i in 0..4 {
        repo.create(create_user(
            &format!("patient-{i}@example.com"),
            None,
            UserRole::Patient,
        ))
        .await
        .unwrap();
    }
    repo.create(create_user("doc@example.com", None, UserRole::Doctor))
        .await
        .unwrap();

    let page1 = repo
        .list_by_role(
            UserRole::Patient,
            Pagination {
                offset: 0,
                limit: 3,
            },
        )
        .await
        .unwrap();
    assert_eq!(page1.items.len(), 3);
    assert_eq!(page1.total, 4);

    let page2 = repo
        .list_by_role(
            UserRole::Patient,
            Pagination {
                offset: 3,
                limit: 3,
            },
        )
        .await
        .unwrap();
    assert_eq!(page2.items.len(), 1);

    let all = repo.list(Pagination::default()).await.unwrap();
    assert_eq!(all.total, 5);
}

#[tokio::test]
async fn update_patient_merges_fields() {
    let db = setup().await;
    let repo = SurrealPatientRepository::new(db);

    let patient = repo
        .create(create_patient(Some("p@example.com"), Some("555-0102")))
        .await
        .unwrap();

    let updated = repo
        .update(
            patient.id,
            UpdatePatient {
                phone: Some(Some("555-9999".into())),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.phone.as_deref(), Some("555-9999"));
    assert_eq!(updated.email.as_deref(), Some("p@example.com"));
    assert_eq!(updated.name, "Test");
    assert_eq!(updated.status, PatientStatus::Active);
}

#[tokio::test]
async fn staff_link_lifecycle() {
    let db = setup().await;
    let users = SurrealUserRepository::new(db.clone());
    let staff = SurrealStaffRepository::new(db);

    let user = users
        .create(create_user("nurse@example.com", Some("555-0103"), UserRole::Receptionist))
        .await
        .unwrap();

    let a = staff
        .create(CreateStaff {
            name: "Nurse A".into(),
            phone: Some("555-0103".into()),
            email: None,
            user_id: None,
            status: StaffStatus::Active,
        })
        .await
        .unwrap();
    let b = staff
        .create(CreateStaff {
            name: "Nurse B".into(),
            phone: None,
            email: None,
            user_id: Some(user.id),
            status: StaffStatus::Active,
        })
        .await
        .unwrap();
    assert_eq!(b.user_id, Some(user.id));

    let linked = staff.set_user_link(a.id, Some(user.id)).await.unwrap();
    assert_eq!(linked.user_id, Some(user.id));

    let cleared = staff.clear_user_links().await.unwrap();
    assert_eq!(cleared, 2);

    assert_eq!(staff.get_by_id(a.id).await.unwrap().user_id, None);
    assert_eq!(staff.get_by_id(b.id).await.unwrap().user_id, None);

    // Nothing left to clear on a second pass.
    assert_eq!(staff.clear_user_links().await.unwrap(), 0);
}
