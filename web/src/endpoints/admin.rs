/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use crate::error::WebResult;
use axum::extract::{Path, State};
use axum::{Extension, Json};
use scholar_core::accounts::{self, ClasslistInput, NewUser, UserUpdate};
use scholar_core::projects::{self, ProjectSummary};
use scholar_core::types::*;
use std::sync::Arc;
use uuid::Uuid;

pub async fn get_users(
    state: State<Arc<ServerState>>,
    Extension(session): Extension<Session>,
) -> WebResult<Json<BaseResponse<Vec<MUser>>>> {
    let res = BaseResponse {
        error: false,
        message: accounts::list_users(&state, &session).await?,
    };

    Ok(Json(res))
}

pub async fn post_users(
    state: State<Arc<ServerState>>,
    Extension(session): Extension<Session>,
    Json(body): Json<NewUser>,
) -> WebResult<Json<BaseResponse<MUser>>> {
    let res = BaseResponse {
        error: false,
        message: accounts::create_user(&state, &session, body).await?,
    };

    Ok(Json(res))
}

pub async fn patch_user(
    state: State<Arc<ServerState>>,
    Extension(session): Extension<Session>,
    Path(user): Path<Uuid>,
    Json(body): Json<UserUpdate>,
) -> WebResult<Json<BaseResponse<MUser>>> {
    let res = BaseResponse {
        error: false,
        message: accounts::update_user(&state, &session, user, body).await?,
    };

    Ok(Json(res))
}

pub async fn delete_user(
    state: State<Arc<ServerState>>,
    Extension(session): Extension<Session>,
    Path(user): Path<Uuid>,
) -> WebResult<Json<BaseResponse<String>>> {
    accounts::delete_user(&state, &session, user).await?;

    let res = BaseResponse {
        error: false,
        message: "User deleted".to_string(),
    };

    Ok(Json(res))
}

pub async fn get_classlist(
    state: State<Arc<ServerState>>,
    Extension(session): Extension<Session>,
) -> WebResult<Json<BaseResponse<Vec<MClasslist>>>> {
    let res = BaseResponse {
        error: false,
        message: accounts::list_classlist(&state, &session).await?,
    };

    Ok(Json(res))
}

pub async fn post_classlist(
    state: State<Arc<ServerState>>,
    Extension(session): Extension<Session>,
    Json(body): Json<ClasslistInput>,
) -> WebResult<Json<BaseResponse<MClasslist>>> {
    let res = BaseResponse {
        error: false,
        message: accounts::create_classlist_entry(&state, &session, body).await?,
    };

    Ok(Json(res))
}

pub async fn patch_classlist(
    state: State<Arc<ServerState>>,
    Extension(session): Extension<Session>,
    Path(entry): Path<Uuid>,
    Json(body): Json<ClasslistInput>,
) -> WebResult<Json<BaseResponse<MClasslist>>> {
    let res = BaseResponse {
        error: false,
        message: accounts::update_classlist_entry(&state, &session, entry, body).await?,
    };

    Ok(Json(res))
}

pub async fn delete_classlist(
    state: State<Arc<ServerState>>,
    Extension(session): Extension<Session>,
    Path(entry): Path<Uuid>,
) -> WebResult<Json<BaseResponse<String>>> {
    accounts::delete_classlist_entry(&state, &session, entry).await?;

    let res = BaseResponse {
        error: false,
        message: "Classlist entry deleted".to_string(),
    };

    Ok(Json(res))
}

pub async fn get_projects(
    state: State<Arc<ServerState>>,
    Extension(session): Extension<Session>,
) -> WebResult<Json<BaseResponse<Vec<ProjectSummary>>>> {
    let res = BaseResponse {
        error: false,
        message: projects::all_projects(&state, &session).await?,
    };

    Ok(Json(res))
}

pub async fn delete_project(
    state: State<Arc<ServerState>>,
    Extension(session): Extension<Session>,
    Path(project): Path<Uuid>,
) -> WebResult<Json<BaseResponse<String>>> {
    projects::delete_project(&state, &session, project).await?;

    let res = BaseResponse {
        error: false,
        message: "Project deleted".to_string(),
    };

    Ok(Json(res))
}
