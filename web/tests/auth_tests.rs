/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

mod common;

use axum::http::StatusCode;
use common::*;
use entity::user::Role;
use scholar_core::types::*;
use sea_orm::{DatabaseBackend, MockDatabase};
use serde_json::{Value, json};
use web::authorization::decode_jwt;
use web::requests::*;

#[test]
fn test_login_request_serialization() {
    let request = LoginRequest {
        matricule: "CE/2020/001".to_string(),
        password: "password123".to_string(),
    };

    let json = serde_json::to_string(&request).unwrap();
    assert!(json.contains("CE/2020/001"));
    assert!(json.contains("password123"));
}

#[test]
fn test_token_round_trip_carries_role() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let state = create_mock_state(db, &[]);
    let supervisor = user(Role::Supervisor, "Dr Musa");

    let token = token_for(&state, &supervisor);
    let claims = decode_jwt(&state, &token).unwrap().claims;

    assert_eq!(claims.id, supervisor.id);
    assert_eq!(claims.role, Role::Supervisor);
    assert!(decode_jwt(&state, "not.a.token").is_err());
}

#[tokio::test]
async fn test_protected_route_requires_token() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let server = create_server(create_mock_state(db, &[]));

    let response = server.get("/api/v1/user").await;
    response.assert_status(StatusCode::UNAUTHORIZED);

    let body: Value = response.json();
    assert_eq!(body["error"], json!(true));

    let response = server
        .get("/api/v1/user")
        .authorization_bearer("garbage")
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_session_and_navigation() {
    let student = user(Role::Student, "Ada Obi");
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![student.clone()]])
        .append_query_results([vec![student.clone()]])
        .into_connection();
    let state = create_mock_state(db, &[]);
    let token = token_for(&state, &student);
    let server = create_server(state);

    let response = server
        .get("/api/v1/user")
        .authorization_bearer(&token)
        .await;
    response.assert_status_ok();
    let body: BaseResponse<Session> = response.json();
    assert_eq!(body.message, Session::from(&student));

    let response = server
        .get("/api/v1/user/navigation")
        .authorization_bearer(&token)
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["message"][0]["route"], json!("/dashboard"));
    assert_eq!(body["message"][2]["label"], json!("Submit Project"));
}

#[tokio::test]
async fn test_deleted_user_token_rejected() {
    let student = user(Role::Student, "Ada Obi");
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<MUser>::new()])
        .into_connection();
    let state = create_mock_state(db, &[]);
    let token = token_for(&state, &student);
    let server = create_server(state);

    let response = server
        .get("/api/v1/user")
        .authorization_bearer(&token)
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_unknown_user() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<MUser>::new()])
        .into_connection();
    let server = create_server(create_mock_state(db, &[]));

    let response = server
        .post("/api/v1/auth/login")
        .json(&json!({ "matricule": "CE/2020/404", "password": "whatever" }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    response.assert_json(&json!({ "error": true, "message": "Invalid credentials" }));
}

#[tokio::test]
async fn test_logout_always_succeeds() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let server = create_server(create_mock_state(db, &[]));

    server.post("/api/v1/auth/logout").await.assert_status_ok();
}

#[tokio::test]
async fn test_registration_disabled() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let server = create_server(create_mock_state(db, &["--disable-registration"]));

    let response = server
        .post("/api/v1/auth/register/start")
        .json(&json!({
            "name": "Ada Obi",
            "matricule": "CE/2020/001",
            "password": "secret-pass"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({ "error": true, "message": "Registration is disabled" }));
}

#[tokio::test]
async fn test_register_verify_invalid_code() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<MPendingRegistration>::new()])
        .into_connection();
    let server = create_server(create_mock_state(db, &[]));

    let response = server
        .post("/api/v1/auth/register/verify")
        .json(&json!({ "matricule": "CE/2020/001", "otp": "123456" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({ "error": true, "message": "Invalid or expired OTP." }));
}
