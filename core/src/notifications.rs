/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, sea_query::Expr,
};
use tracing::warn;
use uuid::Uuid;

use super::consts::NOTIFICATION_PAGE_SIZE;
use super::error::ServiceResult;
use super::types::*;

/// Records an in-app notice. Failures are logged and swallowed so they never undo
/// the operation that triggered them.
pub async fn notify(state: &ServerState, recipient: Uuid, message: String, link: Option<String>) {
    let anotification = ANotification {
        id: Set(Uuid::new_v4()),
        recipient: Set(recipient),
        message: Set(message),
        link: Set(link),
        is_read: Set(false),
        created_at: Set(Utc::now().naive_utc()),
    };

    if let Err(e) = anotification.insert(&state.db).await {
        warn!(error = %e, %recipient, "Failed to create notification");
    }
}

pub async fn list(state: &ServerState, session: &Session) -> ServiceResult<Vec<MNotification>> {
    Ok(ENotification::find()
        .filter(CNotification::Recipient.eq(session.id))
        .order_by_desc(CNotification::CreatedAt)
        .limit(NOTIFICATION_PAGE_SIZE)
        .all(&state.db)
        .await?)
}

pub async fn unread_count(state: &ServerState, session: &Session) -> ServiceResult<u64> {
    Ok(ENotification::find()
        .filter(CNotification::Recipient.eq(session.id))
        .filter(CNotification::IsRead.eq(false))
        .count(&state.db)
        .await?)
}

/// Returns the number of notifications that were flipped to read.
pub async fn mark_all_read(state: &ServerState, session: &Session) -> ServiceResult<u64> {
    let result = ENotification::update_many()
        .col_expr(CNotification::IsRead, Expr::value(true))
        .filter(CNotification::Recipient.eq(session.id))
        .filter(CNotification::IsRead.eq(false))
        .exec(&state.db)
        .await?;

    Ok(result.rows_affected)
}
