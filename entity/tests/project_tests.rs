/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Tests for project entity

use chrono::NaiveDate;
use entity::*;
use sea_orm::{DatabaseBackend, MockDatabase, QueryOrder, entity::prelude::*};
use uuid::Uuid;

fn published(title: &str) -> project::Model {
    let naive_date = NaiveDate::from_ymd_opt(2025, 6, 1)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap();

    project::Model {
        id: Uuid::new_v4(),
        title: title.to_owned(),
        summary: "An abstract long enough to pass validation.".to_owned(),
        student: Uuid::new_v4(),
        supervisor: Some(Uuid::new_v4()),
        status: project::ProjectStatus::Published,
        draft_file: "drafts/a.pdf".to_owned(),
        final_file: Some("finals/a.pdf".to_owned()),
        view_count: 3,
        download_count: 1,
        created_at: naive_date,
        updated_at: naive_date,
        published_at: Some(naive_date),
    }
}

#[tokio::test]
async fn test_find_published_projects() -> Result<(), DbErr> {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![published("Solar Tracker"), published("Crop Yield")]])
        .into_connection();

    let projects = project::Entity::find()
        .filter(project::Column::Status.eq(project::ProjectStatus::Published))
        .order_by_desc(project::Column::PublishedAt)
        .all(&db)
        .await?;

    assert_eq!(projects.len(), 2);
    assert_eq!(projects[0].title, "Solar Tracker");

    let log = format!("{:?}", db.into_transaction_log());
    assert!(log.contains("ORDER BY"));

    Ok(())
}

#[test]
fn test_summary_maps_to_abstract() {
    assert_eq!(project::Column::Summary.as_str(), "abstract");

    let json = serde_json::to_value(published("Solar Tracker")).unwrap();
    assert!(json.get("abstract").is_some());
    assert!(json.get("summary").is_none());
    assert_eq!(json["status"], "PUBLISHED");
}
