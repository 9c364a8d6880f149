/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use crate::error::WebResult;
use crate::requests::SearchQuery;
use axum::Json;
use axum::extract::{Query, State};
use scholar_core::projects::ProjectSummary;
use scholar_core::repository::{self, RepositoryFilters, RepositorySearch};
use scholar_core::types::*;
use std::sync::Arc;

pub async fn get_search(
    state: State<Arc<ServerState>>,
    Query(query): Query<SearchQuery>,
) -> WebResult<Json<BaseResponse<Vec<ProjectSummary>>>> {
    let search = RepositorySearch {
        term: query.q,
        year: query.year,
        supervisor: query.supervisor,
    };

    let res = BaseResponse {
        error: false,
        message: repository::search(&state, search).await?,
    };

    Ok(Json(res))
}

pub async fn get_filters(
    state: State<Arc<ServerState>>,
) -> WebResult<Json<BaseResponse<RepositoryFilters>>> {
    let res = BaseResponse {
        error: false,
        message: repository::filters(&state).await?,
    };

    Ok(Json(res))
}
