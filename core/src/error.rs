/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("database error: {0}")]
    Database(DbErr),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<DbErr> for ServiceError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                ServiceError::Conflict("Resource already exists".to_string())
            }
            _ => ServiceError::Database(err),
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    pub fn not_found(resource: &str) -> Self {
        ServiceError::NotFound(format!("{} not found", resource))
    }

    pub fn already_exists(resource: &str) -> Self {
        ServiceError::Conflict(format!("{} already exists", resource))
    }

    pub fn invalid_credentials() -> Self {
        ServiceError::Unauthorized("Invalid credentials".to_string())
    }

    pub fn not_permitted() -> Self {
        ServiceError::Forbidden(
            "You are not authorized to perform this action on this project.".to_string(),
        )
    }

    pub fn admin_only() -> Self {
        ServiceError::Forbidden("Administrator access required".to_string())
    }

    pub fn stale_transition() -> Self {
        ServiceError::Forbidden("The project status changed, please reload it.".to_string())
    }

    pub fn is_client_error(&self) -> bool {
        !matches!(self, ServiceError::Database(_) | ServiceError::Internal(_))
    }
}
