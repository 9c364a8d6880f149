/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use chrono::{Duration, NaiveDateTime, Utc};
use entity::user::Role;
use rand::Rng;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, QueryFilter, TransactionTrait,
    sea_query::OnConflict,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use super::consts::{INVALID_OTP_MESSAGE, OTP_RANGE};
use super::email::{deliver, otp_notice};
use super::error::{ServiceError, ServiceResult};
use super::input::{is_otp_format, validate_matricule, validate_password, validate_person_name};
use super::types::*;

#[derive(Debug, Clone, Deserialize)]
pub struct RegistrationStart {
    pub name: String,
    pub matricule: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegistrationPending {
    pub matricule: String,
    pub expires_at: NaiveDateTime,
}

pub fn generate_otp() -> String {
    rand::rng().random_range(OTP_RANGE).to_string()
}

fn invalid_otp() -> ServiceError {
    ServiceError::Validation(INVALID_OTP_MESSAGE.to_string())
}

fn ensure_enabled(state: &ServerState) -> ServiceResult<()> {
    if state.cli.disable_registration {
        return Err(ServiceError::Validation(
            "Registration is disabled".to_string(),
        ));
    }

    Ok(())
}

async fn classlist_entry(state: &ServerState, matricule: &str) -> ServiceResult<MClasslist> {
    EClasslist::find()
        .filter(CClasslist::Matricule.eq(matricule))
        .one(&state.db)
        .await?
        .ok_or_else(|| {
            ServiceError::Forbidden("Matricule not found or not authorized.".to_string())
        })
}

/// Issues a fresh one-time code for an allowlisted matricule. Starting again
/// replaces the previous code.
#[instrument(skip(state, input), fields(matricule = %input.matricule))]
pub async fn start(
    state: &ServerState,
    input: RegistrationStart,
) -> ServiceResult<RegistrationPending> {
    ensure_enabled(state)?;

    let name = input.name.trim().to_string();
    let matricule = input.matricule.trim().to_string();
    validate_person_name(&name).map_err(ServiceError::Validation)?;
    validate_matricule(&matricule).map_err(ServiceError::Validation)?;
    validate_password(&input.password).map_err(ServiceError::Validation)?;

    let entry = classlist_entry(state, &matricule).await?;

    let existing = EUser::find()
        .filter(CUser::Matricule.eq(matricule.as_str()))
        .one(&state.db)
        .await?;

    if existing.is_some() {
        return Err(ServiceError::already_exists("An account with this matricule"));
    }

    let otp = generate_otp();
    let now = Utc::now().naive_utc();
    let expires_at = now + Duration::minutes(state.cli.otp_ttl_minutes);

    let apending = APendingRegistration {
        matricule: Set(matricule.clone()),
        name: Set(name.clone()),
        password: Set(password_auth::generate_hash(&input.password)),
        otp: Set(otp.clone()),
        expires_at: Set(expires_at),
        created_at: Set(now),
    };

    EPendingRegistration::insert(apending)
        .on_conflict(
            OnConflict::column(CPendingRegistration::Matricule)
                .update_columns([
                    CPendingRegistration::Name,
                    CPendingRegistration::Password,
                    CPendingRegistration::Otp,
                    CPendingRegistration::ExpiresAt,
                    CPendingRegistration::CreatedAt,
                ])
                .to_owned(),
        )
        .exec_without_returning(&state.db)
        .await?;

    deliver(
        state.mailer.as_ref(),
        Some(entry.email.as_str()),
        otp_notice(&name, &otp, state.cli.otp_ttl_minutes),
    )
    .await;

    info!("Registration code issued");
    Ok(RegistrationPending {
        matricule,
        expires_at,
    })
}

/// Consumes a one-time code and creates the student account. Every failure of
/// the code check gives the same message.
#[instrument(skip(state, otp))]
pub async fn verify(state: &ServerState, matricule: &str, otp: &str) -> ServiceResult<MUser> {
    ensure_enabled(state)?;

    let matricule = matricule.trim();
    let otp = otp.trim();

    if !is_otp_format(otp) {
        return Err(invalid_otp());
    }

    let pending = EPendingRegistration::find_by_id(matricule.to_string())
        .one(&state.db)
        .await?
        .ok_or_else(invalid_otp)?;

    if pending.otp != otp || pending.is_expired(Utc::now().naive_utc()) {
        return Err(invalid_otp());
    }

    let entry = classlist_entry(state, matricule).await?;

    let txn = state.db.begin().await?;

    let existing = EUser::find()
        .filter(CUser::Matricule.eq(matricule))
        .one(&txn)
        .await?;

    if existing.is_some() {
        return Err(ServiceError::already_exists("An account with this matricule"));
    }

    let auser = AUser {
        id: Set(Uuid::new_v4()),
        matricule: Set(pending.matricule.clone()),
        name: Set(pending.name.clone()),
        email: Set(Some(entry.email)),
        password: Set(pending.password.clone()),
        role: Set(Role::Student),
        last_login_at: Set(None),
        created_at: Set(Utc::now().naive_utc()),
    };

    let user = auser.insert(&txn).await?;

    EPendingRegistration::delete_by_id(pending.matricule)
        .exec(&txn)
        .await?;

    txn.commit().await?;

    info!(user = %user.id, "Registration completed");
    Ok(user)
}
