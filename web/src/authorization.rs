/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{Json, Response};
use chrono::{Duration, Utc};
use entity::user::Role;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, TokenData, Validation, decode, encode};
use scholar_core::accounts::find_session;
use scholar_core::input::load_secret;
use scholar_core::types::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Claims {
    pub exp: usize,
    pub iat: usize,
    pub id: Uuid,
    pub name: String,
    pub role: Role,
}

type AuthRejection = (StatusCode, Json<BaseResponse<String>>);

fn reject(status: StatusCode, message: &str) -> AuthRejection {
    (
        status,
        Json(BaseResponse {
            error: true,
            message: message.to_string(),
        }),
    )
}

/// Resolves the bearer token into a [`Session`] extension. The user is reloaded so
/// that deleted accounts and role changes take effect before the token expires.
pub async fn authorize(
    state: State<Arc<ServerState>>,
    mut req: Request,
    next: Next,
) -> Result<Response<Body>, AuthRejection> {
    let auth_header = match req.headers().get(axum::http::header::AUTHORIZATION) {
        Some(header) => header
            .to_str()
            .map_err(|_| reject(StatusCode::UNAUTHORIZED, "Authorization header empty"))?,
        None => {
            return Err(reject(
                StatusCode::UNAUTHORIZED,
                "Authorization header not found",
            ));
        }
    };

    let mut header = auth_header.split_whitespace();

    let token = match (header.next(), header.next()) {
        (Some("Bearer"), Some(token)) => token.to_string(),
        _ => {
            return Err(reject(
                StatusCode::UNAUTHORIZED,
                "Invalid Authorization header",
            ));
        }
    };

    let token_data = decode_jwt(&state, &token)
        .map_err(|_| reject(StatusCode::UNAUTHORIZED, "Unable to decode token"))?;

    let session = match find_session(&state, token_data.claims.id).await {
        Ok(Some(session)) => session,
        Ok(None) => return Err(reject(StatusCode::UNAUTHORIZED, "User not found")),
        Err(e) => {
            tracing::error!("Failed to load session user: {}", e);
            return Err(reject(StatusCode::INTERNAL_SERVER_ERROR, "Database error"));
        }
    };

    req.extensions_mut().insert(session);
    Ok(next.run(req).await)
}

pub fn encode_jwt(state: &ServerState, session: &Session) -> Result<String, StatusCode> {
    let now = Utc::now();
    let expire = Duration::hours(state.cli.session_ttl_hours);
    let exp: usize = (now + expire).timestamp() as usize;
    let iat: usize = now.timestamp() as usize;

    let claims = Claims {
        exp,
        iat,
        id: session.id,
        name: session.name.clone(),
        role: session.role,
    };
    let secret = load_secret(&state.cli.jwt_secret_file);

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )
    .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

pub fn decode_jwt(state: &ServerState, jwt: &str) -> Result<TokenData<Claims>, StatusCode> {
    let secret = load_secret(&state.cli.jwt_secret_file);

    if secret.is_empty() {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }

    decode(
        jwt,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::default(),
    )
    .map_err(|_| StatusCode::UNAUTHORIZED)
}
