/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use chrono::Utc;
use entity::user::Role;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder, sea_query::Expr,
};
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use super::error::{ServiceError, ServiceResult};
use super::input::{
    non_blank, validate_email, validate_matricule, validate_password, validate_person_name,
};
use super::types::*;

/// Verifies a matricule and password. Unknown matricules and wrong passwords give
/// the same error.
pub async fn authenticate(
    state: &ServerState,
    matricule: &str,
    password: &str,
) -> ServiceResult<Session> {
    let user = EUser::find()
        .filter(CUser::Matricule.eq(matricule.trim()))
        .one(&state.db)
        .await?
        .ok_or_else(ServiceError::invalid_credentials)?;

    if password_auth::verify_password(password, &user.password).is_err() {
        return Err(ServiceError::invalid_credentials());
    }

    let result = EUser::update_many()
        .col_expr(CUser::LastLoginAt, Expr::value(Some(Utc::now().naive_utc())))
        .filter(CUser::Id.eq(user.id))
        .exec(&state.db)
        .await;

    if let Err(e) = result {
        warn!(error = %e, user = %user.id, "Failed to record login time");
    }

    info!(user = %user.id, "User logged in");
    Ok(Session::from(&user))
}

pub async fn find_session(state: &ServerState, id: Uuid) -> ServiceResult<Option<Session>> {
    Ok(EUser::find_by_id(id)
        .one(&state.db)
        .await?
        .map(|u| Session::from(&u)))
}

pub async fn supervisors(state: &ServerState) -> ServiceResult<ListResponse> {
    Ok(EUser::find()
        .filter(CUser::Role.eq(Role::Supervisor))
        .order_by_asc(CUser::Name)
        .all(&state.db)
        .await?
        .into_iter()
        .map(|u| ListItem {
            id: u.id,
            name: u.name,
        })
        .collect())
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub matricule: String,
    pub role: Role,
    pub password: String,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub role: Option<Role>,
    pub email: Option<String>,
}

fn checked_email(email: Option<String>) -> ServiceResult<Option<String>> {
    let email = non_blank(email);
    if let Some(email) = &email {
        validate_email(email).map_err(ServiceError::Validation)?;
    }

    Ok(email)
}

async fn load_user(state: &ServerState, id: Uuid) -> ServiceResult<MUser> {
    EUser::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| ServiceError::not_found("User"))
}

pub async fn list_users(state: &ServerState, session: &Session) -> ServiceResult<Vec<MUser>> {
    session.require(Role::Admin)?;

    Ok(EUser::find()
        .order_by_asc(CUser::Name)
        .all(&state.db)
        .await?)
}

pub async fn create_user(
    state: &ServerState,
    session: &Session,
    input: NewUser,
) -> ServiceResult<MUser> {
    session.require(Role::Admin)?;

    let name = input.name.trim().to_string();
    let matricule = input.matricule.trim().to_string();
    validate_person_name(&name).map_err(ServiceError::Validation)?;
    validate_matricule(&matricule).map_err(ServiceError::Validation)?;
    validate_password(&input.password).map_err(ServiceError::Validation)?;
    let email = checked_email(input.email)?;

    let existing = EUser::find()
        .filter(CUser::Matricule.eq(matricule.as_str()))
        .one(&state.db)
        .await?;

    if existing.is_some() {
        return Err(ServiceError::already_exists("An account with this matricule"));
    }

    let auser = AUser {
        id: Set(Uuid::new_v4()),
        matricule: Set(matricule),
        name: Set(name),
        email: Set(email),
        password: Set(password_auth::generate_hash(&input.password)),
        role: Set(input.role),
        last_login_at: Set(None),
        created_at: Set(Utc::now().naive_utc()),
    };

    let user = auser.insert(&state.db).await?;
    info!(user = %user.id, role = %user.role, admin = %session.id, "User created");
    Ok(user)
}

pub async fn update_user(
    state: &ServerState,
    session: &Session,
    id: Uuid,
    input: UserUpdate,
) -> ServiceResult<MUser> {
    session.require(Role::Admin)?;

    if id == session.id && input.role.is_some_and(|r| r != Role::Admin) {
        return Err(ServiceError::Validation(
            "You cannot change your own role".to_string(),
        ));
    }

    let name = input.name.map(|n| n.trim().to_string());
    if let Some(name) = &name {
        validate_person_name(name).map_err(ServiceError::Validation)?;
    }
    let email = checked_email(input.email)?;

    let user = load_user(state, id).await?;
    let mut auser = user.into_active_model();

    if let Some(name) = name {
        auser.name = Set(name);
    }

    if let Some(role) = input.role {
        auser.role = Set(role);
    }

    if email.is_some() {
        auser.email = Set(email);
    }

    let user = auser.update(&state.db).await?;
    info!(user = %user.id, admin = %session.id, "User updated");
    Ok(user)
}

pub async fn delete_user(state: &ServerState, session: &Session, id: Uuid) -> ServiceResult<()> {
    session.require(Role::Admin)?;

    if id == session.id {
        return Err(ServiceError::Validation(
            "You cannot delete your own account".to_string(),
        ));
    }

    let result = EUser::delete_by_id(id).exec(&state.db).await?;
    if result.rows_affected == 0 {
        return Err(ServiceError::not_found("User"));
    }

    info!(user = %id, admin = %session.id, "User deleted");
    Ok(())
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClasslistInput {
    pub name: String,
    pub matricule: String,
    pub email: String,
}

fn checked_entry(input: ClasslistInput) -> ServiceResult<ClasslistInput> {
    let entry = ClasslistInput {
        name: input.name.trim().to_string(),
        matricule: input.matricule.trim().to_string(),
        email: input.email.trim().to_string(),
    };

    validate_person_name(&entry.name).map_err(ServiceError::Validation)?;
    validate_matricule(&entry.matricule).map_err(ServiceError::Validation)?;
    validate_email(&entry.email).map_err(ServiceError::Validation)?;
    Ok(entry)
}

pub async fn list_classlist(
    state: &ServerState,
    session: &Session,
) -> ServiceResult<Vec<MClasslist>> {
    session.require(Role::Admin)?;

    Ok(EClasslist::find()
        .order_by_asc(CClasslist::Name)
        .all(&state.db)
        .await?)
}

pub async fn create_classlist_entry(
    state: &ServerState,
    session: &Session,
    input: ClasslistInput,
) -> ServiceResult<MClasslist> {
    session.require(Role::Admin)?;
    let input = checked_entry(input)?;

    let aentry = AClasslist {
        id: Set(Uuid::new_v4()),
        matricule: Set(input.matricule),
        name: Set(input.name),
        email: Set(input.email),
    };

    // Duplicate matricule or email surfaces as a unique constraint violation.
    let entry = aentry.insert(&state.db).await?;
    info!(entry = %entry.id, admin = %session.id, "Classlist entry created");
    Ok(entry)
}

pub async fn update_classlist_entry(
    state: &ServerState,
    session: &Session,
    id: Uuid,
    input: ClasslistInput,
) -> ServiceResult<MClasslist> {
    session.require(Role::Admin)?;
    let input = checked_entry(input)?;

    let entry = EClasslist::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Classlist entry"))?;

    let mut aentry = entry.into_active_model();
    aentry.name = Set(input.name);
    aentry.matricule = Set(input.matricule);
    aentry.email = Set(input.email);

    Ok(aentry.update(&state.db).await?)
}

pub async fn delete_classlist_entry(
    state: &ServerState,
    session: &Session,
    id: Uuid,
) -> ServiceResult<()> {
    session.require(Role::Admin)?;

    let result = EClasslist::delete_by_id(id).exec(&state.db).await?;
    if result.rows_affected == 0 {
        return Err(ServiceError::not_found("Classlist entry"));
    }

    Ok(())
}
