/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use super::email::Mailer;
use super::error::{ServiceError, ServiceResult};
use super::input::{greater_than_zero, port_in_range};
use super::storage::FileStore;
use clap::Parser;
use entity::user::Role;
use entity::*;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Parser, Debug, Clone)]
#[command(name = "Scholar", display_name = "Scholar", bin_name = "scholar-server", author = "Wavelens", version, about, long_about = None)]
pub struct Cli {
    #[arg(long, env = "SCHOLAR_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
    #[arg(long, env = "SCHOLAR_IP", default_value = "127.0.0.1")]
    pub ip: String,
    #[arg(long, env = "SCHOLAR_PORT", value_parser = port_in_range, default_value_t = 3000)]
    pub port: u16,
    #[arg(long, env = "SCHOLAR_SERVE_URL", default_value = "http://127.0.0.1:8000")]
    pub serve_url: String,
    #[arg(long, env = "SCHOLAR_FILES_URL")]
    pub files_url: Option<String>,
    #[arg(long, env = "SCHOLAR_DATABASE_URL")]
    pub database_url: Option<String>,
    #[arg(long, env = "SCHOLAR_DATABASE_URL_FILE")]
    pub database_url_file: Option<String>,
    #[arg(long, env = "SCHOLAR_JWT_SECRET_FILE")]
    pub jwt_secret_file: String,
    #[arg(long, env = "SCHOLAR_SESSION_TTL_HOURS", value_parser = greater_than_zero::<i64>, default_value = "24")]
    pub session_ttl_hours: i64,
    #[arg(long, env = "SCHOLAR_OTP_TTL_MINUTES", value_parser = greater_than_zero::<i64>, default_value = "10")]
    pub otp_ttl_minutes: i64,
    #[arg(long, env = "SCHOLAR_BASE_PATH", default_value = ".")]
    pub base_path: String,
    #[arg(long, env = "SCHOLAR_MAX_UPLOAD_BYTES", value_parser = greater_than_zero::<usize>, default_value = "26214400")]
    pub max_upload_bytes: usize,
    #[arg(long, env = "SCHOLAR_DISABLE_REGISTRATION", default_value = "false")]
    pub disable_registration: bool,
    #[arg(long, env = "SCHOLAR_ADMIN_MATRICULE")]
    pub admin_matricule: Option<String>,
    #[arg(long, env = "SCHOLAR_ADMIN_NAME", default_value = "Administrator")]
    pub admin_name: String,
    #[arg(long, env = "SCHOLAR_ADMIN_PASSWORD_FILE")]
    pub admin_password_file: Option<String>,
    #[arg(long, env = "SCHOLAR_REPORT_ERRORS", default_value = "false")]
    pub report_errors: bool,
    #[arg(long, env = "SCHOLAR_SENTRY_DSN")]
    pub sentry_dsn: Option<String>,
    #[arg(long, env = "SCHOLAR_EMAIL_ENABLED", default_value = "false")]
    pub email_enabled: bool,
    #[arg(long, env = "SCHOLAR_EMAIL_SMTP_HOST")]
    pub email_smtp_host: Option<String>,
    #[arg(long, env = "SCHOLAR_EMAIL_SMTP_PORT", default_value = "587")]
    pub email_smtp_port: u16,
    #[arg(long, env = "SCHOLAR_EMAIL_SMTP_USERNAME")]
    pub email_smtp_username: Option<String>,
    #[arg(long, env = "SCHOLAR_EMAIL_SMTP_PASSWORD_FILE")]
    pub email_smtp_password_file: Option<String>,
    #[arg(long, env = "SCHOLAR_EMAIL_FROM_ADDRESS")]
    pub email_from_address: Option<String>,
    #[arg(long, env = "SCHOLAR_EMAIL_FROM_NAME", default_value = "Project Repository")]
    pub email_from_name: String,
    #[arg(long, env = "SCHOLAR_EMAIL_DISABLE_TLS", default_value = "false")]
    pub email_disable_tls: bool,
}

impl Cli {
    /// Origin that serves `/files`. Without an explicit setting this is the API
    /// listener itself.
    pub fn files_base_url(&self) -> String {
        match &self.files_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("http://{}:{}", self.ip, self.port),
        }
    }
}

pub struct ServerState {
    pub db: DatabaseConnection,
    pub cli: Cli,
    pub mailer: Arc<dyn Mailer>,
    pub storage: Arc<dyn FileStore>,
}

impl ServerState {
    pub fn link(&self, path: &str) -> String {
        format!("{}{}", self.cli.serve_url.trim_end_matches('/'), path)
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct BaseResponse<T> {
    pub error: bool,
    pub message: T,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListItem {
    pub id: Uuid,
    pub name: String,
}

pub type ListResponse = Vec<ListItem>;

/// Identity of the caller for a single request. Built from the verified session
/// token and handed to every operation; nothing else is trusted for authorization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub name: String,
    pub role: Role,
}

impl From<&MUser> for Session {
    fn from(user: &MUser) -> Self {
        Session {
            id: user.id,
            name: user.name.clone(),
            role: user.role,
        }
    }
}

impl Session {
    pub fn require(&self, role: Role) -> ServiceResult<()> {
        if self.role == role {
            return Ok(());
        }

        Err(match role {
            Role::Admin => ServiceError::admin_only(),
            _ => ServiceError::Forbidden(format!(
                "Only a {} can do this.",
                role.as_str().to_lowercase()
            )),
        })
    }
}

pub type EClasslist = classlist::Entity;
pub type EComment = comment::Entity;
pub type ENotification = notification::Entity;
pub type EPendingRegistration = pending_registration::Entity;
pub type EProject = project::Entity;
pub type EUser = user::Entity;

pub type MClasslist = classlist::Model;
pub type MComment = comment::Model;
pub type MNotification = notification::Model;
pub type MPendingRegistration = pending_registration::Model;
pub type MProject = project::Model;
pub type MUser = user::Model;

pub type AClasslist = classlist::ActiveModel;
pub type AComment = comment::ActiveModel;
pub type ANotification = notification::ActiveModel;
pub type APendingRegistration = pending_registration::ActiveModel;
pub type AProject = project::ActiveModel;
pub type AUser = user::ActiveModel;

pub type CClasslist = classlist::Column;
pub type CComment = comment::Column;
pub type CNotification = notification::Column;
pub type CPendingRegistration = pending_registration::Column;
pub type CProject = project::Column;
pub type CUser = user::Column;
