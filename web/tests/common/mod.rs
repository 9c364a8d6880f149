/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

#![allow(dead_code)]

use anyhow::Result;
use async_trait::async_trait;
use axum_test::TestServer;
use bytes::Bytes;
use chrono::Utc;
use clap::Parser;
use entity::user::Role;
use scholar_core::email::NoopMailer;
use scholar_core::storage::FileStore;
use scholar_core::types::*;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use uuid::Uuid;

pub struct NullFileStore;

#[async_trait]
impl FileStore for NullFileStore {
    async fn upload(&self, _data: Bytes, folder: &str, extension: &str) -> Result<String> {
        Ok(format!("{}/{}.{}", folder, Uuid::new_v4(), extension))
    }

    async fn remove(&self, _reference: &str) -> Result<()> {
        Ok(())
    }

    fn public_url(&self, reference: &str) -> String {
        format!("http://files.test/{}", reference)
    }
}

fn jwt_secret_file() -> String {
    let path = std::env::temp_dir().join(format!("scholar-jwt-{}", Uuid::new_v4()));
    std::fs::write(&path, "web-test-secret").unwrap();
    path.to_string_lossy().to_string()
}

pub fn create_mock_cli(extra: &[&str]) -> Cli {
    let secret = jwt_secret_file();
    let mut args = vec![
        "scholar-server",
        "--jwt-secret-file",
        secret.as_str(),
        "--database-url",
        "mock://test",
    ];
    args.extend_from_slice(extra);
    Cli::parse_from(args)
}

pub fn create_mock_state(db: DatabaseConnection, extra: &[&str]) -> Arc<ServerState> {
    Arc::new(ServerState {
        db,
        cli: create_mock_cli(extra),
        mailer: Arc::new(NoopMailer),
        storage: Arc::new(NullFileStore),
    })
}

pub fn create_server(state: Arc<ServerState>) -> TestServer {
    TestServer::new(web::create_router(state)).unwrap()
}

pub fn user(role: Role, name: &str) -> MUser {
    MUser {
        id: Uuid::new_v4(),
        matricule: format!("M/{}", name.replace(' ', "")),
        name: name.to_string(),
        email: None,
        password: "unused".to_string(),
        role,
        last_login_at: None,
        created_at: Utc::now().naive_utc(),
    }
}

pub fn token_for(state: &ServerState, user: &MUser) -> String {
    web::authorization::encode_jwt(state, &Session::from(user)).unwrap()
}
