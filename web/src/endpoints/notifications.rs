/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use crate::error::WebResult;
use crate::requests::CountResponse;
use axum::extract::State;
use axum::{Extension, Json};
use scholar_core::notifications;
use scholar_core::types::*;
use std::sync::Arc;

pub async fn get(
    state: State<Arc<ServerState>>,
    Extension(session): Extension<Session>,
) -> WebResult<Json<BaseResponse<Vec<MNotification>>>> {
    let res = BaseResponse {
        error: false,
        message: notifications::list(&state, &session).await?,
    };

    Ok(Json(res))
}

pub async fn get_unread_count(
    state: State<Arc<ServerState>>,
    Extension(session): Extension<Session>,
) -> WebResult<Json<BaseResponse<CountResponse>>> {
    let count = notifications::unread_count(&state, &session).await?;

    let res = BaseResponse {
        error: false,
        message: CountResponse { count },
    };

    Ok(Json(res))
}

pub async fn post_mark_read(
    state: State<Arc<ServerState>>,
    Extension(session): Extension<Session>,
) -> WebResult<Json<BaseResponse<CountResponse>>> {
    let count = notifications::mark_all_read(&state, &session).await?;

    let res = BaseResponse {
        error: false,
        message: CountResponse { count },
    };

    Ok(Json(res))
}
