/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use crate::authorization::encode_jwt;
use crate::error::{WebError, WebResult};
use crate::requests::*;
use axum::Json;
use axum::extract::State;
use scholar_core::accounts;
use scholar_core::registration::{self, RegistrationPending, RegistrationStart};
use scholar_core::types::*;
use std::sync::Arc;

pub async fn post_login(
    state: State<Arc<ServerState>>,
    Json(body): Json<LoginRequest>,
) -> WebResult<Json<BaseResponse<LoginResponse>>> {
    let session = accounts::authenticate(&state, &body.matricule, &body.password).await?;
    let token = encode_jwt(&state, &session).map_err(|_| WebError::failed_to_generate_token())?;

    let res = BaseResponse {
        error: false,
        message: LoginResponse {
            token,
            user: session,
        },
    };

    Ok(Json(res))
}

/// Tokens are stateless; the client discards its copy.
pub async fn post_logout() -> WebResult<Json<BaseResponse<String>>> {
    let res = BaseResponse {
        error: false,
        message: "Logged out".to_string(),
    };

    Ok(Json(res))
}

pub async fn post_register_start(
    state: State<Arc<ServerState>>,
    Json(body): Json<RegisterStartRequest>,
) -> WebResult<Json<BaseResponse<RegistrationPending>>> {
    let pending = registration::start(
        &state,
        RegistrationStart {
            name: body.name,
            matricule: body.matricule,
            password: body.password,
        },
    )
    .await?;

    let res = BaseResponse {
        error: false,
        message: pending,
    };

    Ok(Json(res))
}

pub async fn post_register_verify(
    state: State<Arc<ServerState>>,
    Json(body): Json<RegisterVerifyRequest>,
) -> WebResult<Json<BaseResponse<Session>>> {
    let user = registration::verify(&state, &body.matricule, &body.otp).await?;

    let res = BaseResponse {
        error: false,
        message: Session::from(&user),
    };

    Ok(Json(res))
}
