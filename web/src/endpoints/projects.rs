/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use crate::error::{WebError, WebResult};
use crate::requests::*;
use axum::extract::{Multipart, Path, State};
use axum::response::Redirect;
use axum::{Extension, Json};
use scholar_core::projects::{self, NewProject, ProjectDetails, ProjectSummary};
use scholar_core::types::*;
use std::sync::Arc;
use uuid::Uuid;

pub async fn post(
    state: State<Arc<ServerState>>,
    Extension(session): Extension<Session>,
    multipart: Multipart,
) -> WebResult<Json<BaseResponse<MProject>>> {
    let mut form = FormData::read(multipart).await?;

    let supervisor = Uuid::parse_str(form.text("supervisor")?.trim())
        .map_err(|_| WebError::invalid_field("supervisor"))?;

    let input = NewProject {
        title: form.text("title")?,
        summary: form.text("abstract")?,
        supervisor,
        draft: form.require_file("file")?,
    };

    let res = BaseResponse {
        error: false,
        message: projects::submit(&state, &session, input).await?,
    };

    Ok(Json(res))
}

pub async fn get_mine(
    state: State<Arc<ServerState>>,
    Extension(session): Extension<Session>,
) -> WebResult<Json<BaseResponse<Vec<ProjectSummary>>>> {
    let res = BaseResponse {
        error: false,
        message: projects::my_projects(&state, &session).await?,
    };

    Ok(Json(res))
}

pub async fn get_project(
    state: State<Arc<ServerState>>,
    Extension(session): Extension<Session>,
    Path(project): Path<Uuid>,
) -> WebResult<Json<BaseResponse<ProjectDetails>>> {
    let res = BaseResponse {
        error: false,
        message: projects::record_view(&state, &session, project).await?,
    };

    Ok(Json(res))
}

pub async fn get_download(
    state: State<Arc<ServerState>>,
    Extension(session): Extension<Session>,
    Path(project): Path<Uuid>,
) -> WebResult<Redirect> {
    let url = projects::record_download(&state, &session, project).await?;
    Ok(Redirect::temporary(&url))
}

pub async fn post_approve(
    state: State<Arc<ServerState>>,
    Extension(session): Extension<Session>,
    Path(project): Path<Uuid>,
    Json(body): Json<DecisionRequest>,
) -> WebResult<Json<BaseResponse<MProject>>> {
    let res = BaseResponse {
        error: false,
        message: projects::approve(&state, &session, project, body.comment).await?,
    };

    Ok(Json(res))
}

pub async fn post_reject(
    state: State<Arc<ServerState>>,
    Extension(session): Extension<Session>,
    Path(project): Path<Uuid>,
    Json(body): Json<DecisionRequest>,
) -> WebResult<Json<BaseResponse<MProject>>> {
    let comment = body.comment.unwrap_or_default();

    let res = BaseResponse {
        error: false,
        message: projects::reject(&state, &session, project, comment).await?,
    };

    Ok(Json(res))
}

pub async fn post_resubmit(
    state: State<Arc<ServerState>>,
    Extension(session): Extension<Session>,
    Path(project): Path<Uuid>,
    multipart: Multipart,
) -> WebResult<Json<BaseResponse<MProject>>> {
    let mut form = FormData::read(multipart).await?;
    let draft = form.require_file("file")?;

    let res = BaseResponse {
        error: false,
        message: projects::resubmit(&state, &session, project, draft).await?,
    };

    Ok(Json(res))
}

pub async fn post_publish(
    state: State<Arc<ServerState>>,
    Extension(session): Extension<Session>,
    Path(project): Path<Uuid>,
    multipart: Multipart,
) -> WebResult<Json<BaseResponse<MProject>>> {
    let mut form = FormData::read(multipart).await?;
    let final_report = form.take_file("file");

    let res = BaseResponse {
        error: false,
        message: projects::publish_final(&state, &session, project, final_report).await?,
    };

    Ok(Json(res))
}
