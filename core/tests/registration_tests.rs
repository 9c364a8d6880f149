/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

mod common;

use chrono::Duration;
use common::*;
use entity::user::Role;
use scholar_core::consts::INVALID_OTP_MESSAGE;
use scholar_core::error::ServiceError;
use scholar_core::registration::{self, RegistrationStart};
use scholar_core::types::*;
use sea_orm::{DatabaseBackend, MockDatabase};
use uuid::Uuid;

const MATRICULE: &str = "CE/2020/001";

fn entry() -> MClasslist {
    MClasslist {
        id: Uuid::new_v4(),
        matricule: MATRICULE.to_string(),
        name: "Ada Obi".to_string(),
        email: "ada.obi@uni.test".to_string(),
    }
}

fn start_input() -> RegistrationStart {
    RegistrationStart {
        name: "Ada Obi".to_string(),
        matricule: MATRICULE.to_string(),
        password: "secret-pass".to_string(),
    }
}

fn pending(otp: &str, expires_in: Duration) -> MPendingRegistration {
    MPendingRegistration {
        matricule: MATRICULE.to_string(),
        name: "Ada Obi".to_string(),
        password: password_hash(),
        otp: otp.to_string(),
        expires_at: now() + expires_in,
        created_at: now(),
    }
}

#[tokio::test]
async fn test_start_requires_classlist_entry() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<MClasslist>::new()])
        .into_connection();
    let t = create_state(db);

    let err = registration::start(&t.state, start_input()).await.unwrap_err();

    assert!(matches!(err, ServiceError::Forbidden(_)));
    assert_eq!(err.to_string(), "Matricule not found or not authorized.");
    assert!(t.mailer.sent().is_empty());
    assert_eq!(
        count_statements(&t.into_log(), "INSERT INTO", "pending_registration"),
        0
    );
}

#[tokio::test]
async fn test_start_rejects_existing_account() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![entry()]])
        .append_query_results([vec![user(Role::Student, "Ada Obi", MATRICULE)]])
        .into_connection();
    let t = create_state(db);

    let err = registration::start(&t.state, start_input()).await.unwrap_err();
    assert!(matches!(err, ServiceError::Conflict(_)));
}

#[tokio::test]
async fn test_start_emails_code_to_classlist_address() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![entry()]])
        .append_query_results([Vec::<MUser>::new()])
        .append_exec_results([rows(1)])
        .into_connection();
    let t = create_state(db);

    let issued = registration::start(&t.state, start_input()).await.unwrap();
    assert_eq!(issued.matricule, MATRICULE);
    assert!(issued.expires_at > now() + Duration::minutes(9));

    let sent = t.mailer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "ada.obi@uni.test");

    let log = t.into_log();
    assert_eq!(count_statements(&log, "INSERT INTO", "pending_registration"), 1);
    assert!(log_contains(&log, "ON CONFLICT"));
}

#[tokio::test]
async fn test_start_disabled() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let t = create_state_with(db, &["--disable-registration"]);

    let err = registration::start(&t.state, start_input()).await.unwrap_err();
    assert_eq!(err.to_string(), "Registration is disabled");
}

#[tokio::test]
async fn test_start_validates_input() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let t = create_state(db);

    let mut input = start_input();
    input.password = "12345".to_string();

    let err = registration::start(&t.state, input).await.unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
    assert!(t.into_log().is_empty());
}

#[tokio::test]
async fn test_verify_wrong_code_keeps_pending_record() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![pending("123456", Duration::minutes(5))]])
        .into_connection();
    let t = create_state(db);

    let err = registration::verify(&t.state, MATRICULE, "654321")
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), INVALID_OTP_MESSAGE);
    assert_eq!(
        count_statements(&t.into_log(), "DELETE FROM", "pending_registration"),
        0
    );
}

#[tokio::test]
async fn test_verify_expired_code() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![pending("123456", Duration::minutes(-1))]])
        .into_connection();
    let t = create_state(db);

    let err = registration::verify(&t.state, MATRICULE, "123456")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), INVALID_OTP_MESSAGE);
}

#[tokio::test]
async fn test_verify_malformed_code_skips_lookup() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let t = create_state(db);

    let err = registration::verify(&t.state, MATRICULE, "12ab56")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), INVALID_OTP_MESSAGE);
    assert!(t.into_log().is_empty());
}

#[tokio::test]
async fn test_verify_creates_student_once() {
    let record = pending("123456", Duration::minutes(5));
    let mut created = user(Role::Student, "Ada Obi", MATRICULE);
    created.email = Some("ada.obi@uni.test".to_string());

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![record]])
        .append_query_results([vec![entry()]])
        .append_query_results([Vec::<MUser>::new()])
        .append_query_results([vec![created.clone()]])
        .append_exec_results([rows(1)])
        // second attempt: the pending record is gone
        .append_query_results([Vec::<MPendingRegistration>::new()])
        .into_connection();
    let t = create_state(db);

    let user = registration::verify(&t.state, MATRICULE, "123456")
        .await
        .unwrap();
    assert_eq!(user.role, Role::Student);
    assert_eq!(user.email.as_deref(), Some("ada.obi@uni.test"));

    let err = registration::verify(&t.state, MATRICULE, "123456")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), INVALID_OTP_MESSAGE);

    let log = t.into_log();
    assert_eq!(count_statements(&log, "INSERT INTO", "user"), 1);
    assert_eq!(count_statements(&log, "DELETE FROM", "pending_registration"), 1);
}

#[tokio::test]
async fn test_verify_conflicting_account() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![pending("123456", Duration::minutes(5))]])
        .append_query_results([vec![entry()]])
        .append_query_results([vec![user(Role::Student, "Ada Obi", MATRICULE)]])
        .into_connection();
    let t = create_state(db);

    let err = registration::verify(&t.state, MATRICULE, "123456")
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Conflict(_)));
    assert_eq!(count_statements(&t.into_log(), "INSERT INTO", "user"), 0);
}

#[tokio::test]
async fn test_start_survives_mail_failure() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![entry()]])
        .append_query_results([Vec::<MUser>::new()])
        .append_exec_results([rows(1)])
        .into_connection();
    let t = create_state_with_failing_mail(db);

    let issued = registration::start(&t.state, start_input()).await.unwrap();
    assert_eq!(issued.matricule, MATRICULE);
    assert_eq!(t.mailer.sent().len(), 1);

    assert_eq!(
        count_statements(&t.into_log(), "INSERT INTO", "pending_registration"),
        1
    );
}
