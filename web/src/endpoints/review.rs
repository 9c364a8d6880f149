/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use crate::error::WebResult;
use crate::requests::CountResponse;
use axum::extract::State;
use axum::{Extension, Json};
use scholar_core::projects::{self, ProjectSummary};
use scholar_core::types::*;
use std::sync::Arc;

pub async fn get_queue(
    state: State<Arc<ServerState>>,
    Extension(session): Extension<Session>,
) -> WebResult<Json<BaseResponse<Vec<ProjectSummary>>>> {
    let res = BaseResponse {
        error: false,
        message: projects::review_queue(&state, &session).await?,
    };

    Ok(Json(res))
}

pub async fn get_count(
    state: State<Arc<ServerState>>,
    Extension(session): Extension<Session>,
) -> WebResult<Json<BaseResponse<CountResponse>>> {
    let count = projects::review_count(&state, &session).await?;

    let res = BaseResponse {
        error: false,
        message: CountResponse { count },
    };

    Ok(Json(res))
}

pub async fn get_supervised(
    state: State<Arc<ServerState>>,
    Extension(session): Extension<Session>,
) -> WebResult<Json<BaseResponse<Vec<ProjectSummary>>>> {
    let res = BaseResponse {
        error: false,
        message: projects::supervised(&state, &session).await?,
    };

    Ok(Json(res))
}
