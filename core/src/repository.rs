/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use chrono::Datelike;
use entity::project::ProjectStatus;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use serde::Serialize;
use std::collections::BTreeSet;
use uuid::Uuid;

use super::accounts::supervisors;
use super::error::ServiceResult;
use super::input::{non_blank, parse_year_term};
use super::projects::{ProjectSummary, with_names};
use super::types::*;

#[derive(Debug, Clone, Serialize)]
pub struct RepositoryFilters {
    pub supervisors: ListResponse,
    pub years: Vec<i32>,
}

/// Repository query. Every present criterion must hold.
#[derive(Debug, Clone, Default)]
pub struct RepositorySearch {
    pub term: Option<String>,
    pub year: Option<i32>,
    pub supervisor: Option<Uuid>,
}

impl RepositorySearch {
    pub fn matches(&self, project: &ProjectSummary) -> bool {
        let term = self
            .term
            .as_deref()
            .is_none_or(|term| matches_term(project, term));
        let year = self.year.is_none_or(|year| {
            project
                .project
                .published_at
                .is_some_and(|published| published.year() == year)
        });
        let supervisor = self
            .supervisor
            .is_none_or(|id| project.project.supervisor == Some(id));

        term && year && supervisor
    }
}

/// Case-insensitive match on title, student or supervisor name. A four digit term
/// also matches the year of publication.
pub fn matches_term(project: &ProjectSummary, term: &str) -> bool {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }

    let in_text = project.project.title.to_lowercase().contains(&needle)
        || project.student_name.to_lowercase().contains(&needle)
        || project
            .supervisor_name
            .as_ref()
            .is_some_and(|n| n.to_lowercase().contains(&needle));

    let in_year = parse_year_term(&needle)
        .zip(project.project.published_at)
        .is_some_and(|(year, published)| published.year() == year);

    in_text || in_year
}

async fn published(state: &ServerState) -> ServiceResult<Vec<MProject>> {
    Ok(EProject::find()
        .filter(CProject::Status.eq(ProjectStatus::Published))
        .order_by_desc(CProject::PublishedAt)
        .all(&state.db)
        .await?)
}

pub async fn search(
    state: &ServerState,
    query: RepositorySearch,
) -> ServiceResult<Vec<ProjectSummary>> {
    let query = RepositorySearch {
        term: non_blank(query.term),
        ..query
    };

    let projects = with_names(&state.db, published(state).await?).await?;

    Ok(projects.into_iter().filter(|p| query.matches(p)).collect())
}

pub async fn filters(state: &ServerState) -> ServiceResult<RepositoryFilters> {
    let years: BTreeSet<i32> = published(state)
        .await?
        .iter()
        .filter_map(|p| p.published_at.map(|d| d.year()))
        .collect();

    Ok(RepositoryFilters {
        supervisors: supervisors(state).await?,
        years: years.into_iter().rev().collect(),
    })
}
