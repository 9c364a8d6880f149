/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

pub mod authorization;
pub mod endpoints;
pub mod error;
pub mod requests;

use axum::extract::DefaultBodyLimit;
use axum::http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use axum::routing::{delete, get, patch, post};
use axum::{Router, middleware};
use scholar_core::types::ServerState;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

fn cors_layer(state: &ServerState) -> CorsLayer {
    let origin = state.cli.serve_url.trim_end_matches('/');

    let allow_origin = match HeaderValue::from_str(origin) {
        Ok(origin) => AllowOrigin::exact(origin),
        Err(_) => {
            warn!("Serve url {} is not a valid origin, CORS disabled", origin);
            AllowOrigin::list(Vec::<HeaderValue>::new())
        }
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([AUTHORIZATION, ACCEPT, CONTENT_TYPE])
        .allow_credentials(true)
}

pub fn create_router(state: Arc<ServerState>) -> Router {
    let files = PathBuf::from(&state.cli.base_path).join("files");

    let api = Router::new()
        .route("/user", get(endpoints::user::get))
        .route("/user/navigation", get(endpoints::user::get_navigation))
        .route("/supervisors", get(endpoints::user::get_supervisors))
        .route("/repository", get(endpoints::repository::get_search))
        .route(
            "/repository/filters",
            get(endpoints::repository::get_filters),
        )
        .route("/projects", post(endpoints::projects::post))
        .route("/projects/mine", get(endpoints::projects::get_mine))
        .route("/projects/{project}", get(endpoints::projects::get_project))
        .route(
            "/projects/{project}/download",
            get(endpoints::projects::get_download),
        )
        .route(
            "/projects/{project}/approve",
            post(endpoints::projects::post_approve),
        )
        .route(
            "/projects/{project}/reject",
            post(endpoints::projects::post_reject),
        )
        .route(
            "/projects/{project}/resubmit",
            post(endpoints::projects::post_resubmit),
        )
        .route(
            "/projects/{project}/publish",
            post(endpoints::projects::post_publish),
        )
        .route("/review", get(endpoints::review::get_queue))
        .route("/review/count", get(endpoints::review::get_count))
        .route("/supervised", get(endpoints::review::get_supervised))
        .route("/notifications", get(endpoints::notifications::get))
        .route(
            "/notifications/unread-count",
            get(endpoints::notifications::get_unread_count),
        )
        .route(
            "/notifications/mark-read",
            post(endpoints::notifications::post_mark_read),
        )
        .route(
            "/admin/users",
            get(endpoints::admin::get_users).post(endpoints::admin::post_users),
        )
        .route(
            "/admin/users/{user}",
            patch(endpoints::admin::patch_user).delete(endpoints::admin::delete_user),
        )
        .route(
            "/admin/classlist",
            get(endpoints::admin::get_classlist).post(endpoints::admin::post_classlist),
        )
        .route(
            "/admin/classlist/{entry}",
            patch(endpoints::admin::patch_classlist).delete(endpoints::admin::delete_classlist),
        )
        .route("/admin/projects", get(endpoints::admin::get_projects))
        .route(
            "/admin/projects/{project}",
            delete(endpoints::admin::delete_project),
        )
        .route_layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            authorization::authorize,
        ))
        .route("/auth/login", post(endpoints::auth::post_login))
        .route("/auth/logout", post(endpoints::auth::post_logout))
        .route(
            "/auth/register/start",
            post(endpoints::auth::post_register_start),
        )
        .route(
            "/auth/register/verify",
            post(endpoints::auth::post_register_verify),
        )
        .route("/health", get(endpoints::get_health));

    Router::new()
        .nest("/api/v1", api)
        .nest_service("/files", ServeDir::new(files))
        .fallback(endpoints::handle_404)
        .layer(DefaultBodyLimit::max(state.cli.max_upload_bytes))
        .layer(cors_layer(&state))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve_web(state: Arc<ServerState>) -> std::io::Result<()> {
    let server_url = format!("{}:{}", state.cli.ip, state.cli.port);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&server_url).await?;
    info!("Listening on {}", server_url);
    axum::serve(listener, app).await
}
