/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Tests for user entity

use chrono::NaiveDate;
use entity::*;
use sea_orm::{DatabaseBackend, MockDatabase, entity::prelude::*};
use uuid::Uuid;

#[tokio::test]
async fn test_user_entity_basic() -> Result<(), DbErr> {
    let user_id = Uuid::new_v4();
    let naive_date = NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![user::Model {
            id: user_id,
            matricule: "CE/2020/001".to_owned(),
            name: "Test User".to_owned(),
            email: Some("test@example.com".to_owned()),
            password: "hashed_password".to_owned(),
            role: user::Role::Student,
            last_login_at: None,
            created_at: naive_date,
        }]])
        .into_connection();

    let result = user::Entity::find_by_id(user_id).one(&db).await?;

    assert!(result.is_some());
    let user = result.unwrap();
    assert_eq!(user.matricule, "CE/2020/001");
    assert_eq!(user.role, user::Role::Student);

    Ok(())
}

#[test]
fn test_user_password_not_serialized() {
    let naive_date = NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();

    let user = user::Model {
        id: Uuid::new_v4(),
        matricule: "STAFF/01".to_owned(),
        name: "Dr. Musa".to_owned(),
        email: None,
        password: "hashed_password".to_owned(),
        role: user::Role::Supervisor,
        last_login_at: None,
        created_at: naive_date,
    };

    let json = serde_json::to_value(&user).unwrap();
    assert!(json.get("password").is_none());
    assert_eq!(json["role"], "SUPERVISOR");
}
