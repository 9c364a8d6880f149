/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use crate::error::WebResult;
use axum::extract::State;
use axum::{Extension, Json};
use scholar_core::accounts;
use scholar_core::navigation::{NavLink, navigation};
use scholar_core::types::*;
use std::sync::Arc;

pub async fn get(
    Extension(session): Extension<Session>,
) -> WebResult<Json<BaseResponse<Session>>> {
    let res = BaseResponse {
        error: false,
        message: session,
    };

    Ok(Json(res))
}

pub async fn get_navigation(
    Extension(session): Extension<Session>,
) -> WebResult<Json<BaseResponse<Vec<NavLink>>>> {
    let res = BaseResponse {
        error: false,
        message: navigation(session.role),
    };

    Ok(Json(res))
}

pub async fn get_supervisors(
    state: State<Arc<ServerState>>,
) -> WebResult<Json<BaseResponse<ListResponse>>> {
    let res = BaseResponse {
        error: false,
        message: accounts::supervisors(&state).await?,
    };

    Ok(Json(res))
}
