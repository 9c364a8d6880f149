/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use chrono::{NaiveDateTime, Utc};
use entity::project::ProjectStatus;
use entity::user::Role;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, TransactionTrait, UpdateMany, sea_query::Expr,
};
use serde::Serialize;
use std::collections::HashMap;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::consts::{DRAFT_FOLDER, FINAL_FOLDER};
use super::email::{approval_notice, deliver, rejection_notice, submission_notice};
use super::error::{ServiceError, ServiceResult};
use super::input::{non_blank, validate_abstract, validate_title};
use super::lifecycle::{self, Transition};
use super::notifications::notify;
use super::storage::{UploadedFile, validate_pdf};
use super::types::*;

#[derive(Debug, Clone)]
pub struct NewProject {
    pub title: String,
    pub summary: String,
    pub supervisor: Uuid,
    pub draft: UploadedFile,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectSummary {
    #[serde(flatten)]
    pub project: MProject,
    pub student_name: String,
    pub supervisor_name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommentView {
    pub id: Uuid,
    pub content: String,
    pub author: Uuid,
    pub author_name: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectDetails {
    #[serde(flatten)]
    pub summary: ProjectSummary,
    pub comments: Vec<CommentView>,
    pub transitions: Vec<Transition>,
}

pub async fn load_project<C: ConnectionTrait>(db: &C, id: Uuid) -> ServiceResult<MProject> {
    EProject::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Project"))
}

async fn user_names<C: ConnectionTrait>(
    db: &C,
    ids: Vec<Uuid>,
) -> ServiceResult<HashMap<Uuid, String>> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    Ok(EUser::find()
        .filter(CUser::Id.is_in(ids))
        .all(db)
        .await?
        .into_iter()
        .map(|u| (u.id, u.name))
        .collect())
}

/// Attaches student and supervisor names with a single user lookup.
pub async fn with_names<C: ConnectionTrait>(
    db: &C,
    projects: Vec<MProject>,
) -> ServiceResult<Vec<ProjectSummary>> {
    let mut ids: Vec<Uuid> = projects
        .iter()
        .flat_map(|p| std::iter::once(p.student).chain(p.supervisor))
        .collect();
    ids.sort();
    ids.dedup();

    let names = user_names(db, ids).await?;

    Ok(projects
        .into_iter()
        .map(|project| ProjectSummary {
            student_name: names.get(&project.student).cloned().unwrap_or_default(),
            supervisor_name: project.supervisor.and_then(|s| names.get(&s).cloned()),
            project,
        })
        .collect())
}

/// Looks up a counter-party for notices. A failed lookup only costs the notice.
async fn contact(state: &ServerState, id: Option<Uuid>) -> Option<MUser> {
    let id = id?;

    match EUser::find_by_id(id).one(&state.db).await {
        Ok(user) => user,
        Err(e) => {
            warn!(error = %e, user = %id, "Failed to load notification recipient");
            None
        }
    }
}

/// Conditional status write: only matches while the project still has the status
/// it was authorized against.
fn transition_query(
    project: &MProject,
    to: ProjectStatus,
    now: NaiveDateTime,
) -> UpdateMany<EProject> {
    EProject::update_many()
        .col_expr(CProject::Status, Expr::value(to))
        .col_expr(CProject::UpdatedAt, Expr::value(now))
        .filter(CProject::Id.eq(project.id))
        .filter(CProject::Status.eq(project.status))
}

fn ensure_applied(rows_affected: u64) -> ServiceResult<()> {
    if rows_affected == 0 {
        return Err(ServiceError::stale_transition());
    }

    Ok(())
}

/// Runs a conditional status write that references a file uploaded for it. When
/// the write does not apply, the upload is removed again.
async fn apply_with_upload(
    state: &ServerState,
    query: UpdateMany<EProject>,
    upload: Option<&str>,
) -> ServiceResult<()> {
    let applied = match query.exec(&state.db).await {
        Ok(result) => ensure_applied(result.rows_affected),
        Err(e) => Err(e.into()),
    };

    if let (Err(_), Some(reference)) = (&applied, upload) {
        if let Err(e) = state.storage.remove(reference).await {
            warn!(error = %e, reference, "Failed to remove unused upload");
        }
    }

    applied
}

async fn insert_comment<C: ConnectionTrait>(
    db: &C,
    project: Uuid,
    author: Uuid,
    content: String,
    now: NaiveDateTime,
) -> ServiceResult<MComment> {
    let acomment = AComment {
        id: Set(Uuid::new_v4()),
        project: Set(project),
        author: Set(author),
        content: Set(content),
        created_at: Set(now),
    };

    Ok(acomment.insert(db).await?)
}

#[instrument(skip(state, input), fields(student = %session.id))]
pub async fn submit(
    state: &ServerState,
    session: &Session,
    input: NewProject,
) -> ServiceResult<MProject> {
    session.require(Role::Student)?;

    let title = input.title.trim().to_string();
    let summary = input.summary.trim().to_string();
    validate_title(&title).map_err(ServiceError::Validation)?;
    validate_abstract(&summary).map_err(ServiceError::Validation)?;
    validate_pdf(&input.draft)?;

    let supervisor = EUser::find_by_id(input.supervisor)
        .one(&state.db)
        .await?
        .filter(|u| u.role == Role::Supervisor)
        .ok_or_else(|| ServiceError::Validation("Please select a valid supervisor".to_string()))?;

    let now = Utc::now().naive_utc();
    let draft = MProject {
        id: Uuid::new_v4(),
        title,
        summary,
        student: session.id,
        supervisor: Some(supervisor.id),
        status: ProjectStatus::Draft,
        draft_file: String::new(),
        final_file: None,
        view_count: 0,
        download_count: 0,
        created_at: now,
        updated_at: now,
        published_at: None,
    };

    let status = lifecycle::authorize(session, &draft, Transition::Submit)?;
    let draft_file = state
        .storage
        .upload(input.draft.data, DRAFT_FOLDER, "pdf")
        .await?;

    let aproject = AProject {
        id: Set(draft.id),
        title: Set(draft.title),
        summary: Set(draft.summary),
        student: Set(draft.student),
        supervisor: Set(draft.supervisor),
        status: Set(status),
        draft_file: Set(draft_file),
        final_file: Set(None),
        view_count: Set(0),
        download_count: Set(0),
        created_at: Set(now),
        updated_at: Set(now),
        published_at: Set(None),
    };

    let project = aproject.insert(&state.db).await?;

    notify(
        state,
        supervisor.id,
        format!(
            "New project submission from {}: \"{}\"",
            session.name, project.title
        ),
        Some("/review".to_string()),
    )
    .await;

    deliver(
        state.mailer.as_ref(),
        supervisor.email.as_deref(),
        submission_notice(&session.name, &project.title, &state.link("/review")),
    )
    .await;

    info!(project = %project.id, "Project submitted for review");
    Ok(project)
}

#[instrument(skip(state, comment), fields(supervisor = %session.id))]
pub async fn approve(
    state: &ServerState,
    session: &Session,
    project_id: Uuid,
    comment: Option<String>,
) -> ServiceResult<MProject> {
    let comment = non_blank(comment);
    let mut project = load_project(&state.db, project_id).await?;
    let to = lifecycle::authorize(session, &project, Transition::Approve)?;
    let now = Utc::now().naive_utc();

    let txn = state.db.begin().await?;
    let result = transition_query(&project, to, now).exec(&txn).await?;
    ensure_applied(result.rows_affected)?;

    if let Some(content) = comment {
        insert_comment(&txn, project.id, session.id, content, now).await?;
    }

    txn.commit().await?;

    project.status = to;
    project.updated_at = now;

    notify(
        state,
        project.student,
        format!(
            "Your project \"{}\" has been approved. You can now submit the final report.",
            project.title
        ),
        Some("/my-projects".to_string()),
    )
    .await;

    if let Some(student) = contact(state, Some(project.student)).await {
        deliver(
            state.mailer.as_ref(),
            student.email.as_deref(),
            approval_notice(&student.name, &project.title, &state.link("/my-projects")),
        )
        .await;
    }

    info!(project = %project.id, "Project approved for final submission");
    Ok(project)
}

#[instrument(skip(state, comment), fields(supervisor = %session.id))]
pub async fn reject(
    state: &ServerState,
    session: &Session,
    project_id: Uuid,
    comment: String,
) -> ServiceResult<MProject> {
    let content = non_blank(Some(comment)).ok_or_else(|| {
        ServiceError::Validation("Comments are required for rejection.".to_string())
    })?;

    let mut project = load_project(&state.db, project_id).await?;
    let to = lifecycle::authorize(session, &project, Transition::Reject)?;
    let now = Utc::now().naive_utc();

    let txn = state.db.begin().await?;
    let result = transition_query(&project, to, now).exec(&txn).await?;
    ensure_applied(result.rows_affected)?;
    insert_comment(&txn, project.id, session.id, content.clone(), now).await?;
    txn.commit().await?;

    project.status = to;
    project.updated_at = now;

    notify(
        state,
        project.student,
        format!("Your project \"{}\" requires revisions.", project.title),
        Some("/my-projects".to_string()),
    )
    .await;

    if let Some(student) = contact(state, Some(project.student)).await {
        deliver(
            state.mailer.as_ref(),
            student.email.as_deref(),
            rejection_notice(
                &student.name,
                &project.title,
                &content,
                &state.link("/my-projects"),
            ),
        )
        .await;
    }

    info!(project = %project.id, "Project rejected");
    Ok(project)
}

#[instrument(skip(state, draft), fields(student = %session.id))]
pub async fn resubmit(
    state: &ServerState,
    session: &Session,
    project_id: Uuid,
    draft: UploadedFile,
) -> ServiceResult<MProject> {
    validate_pdf(&draft)?;

    let mut project = load_project(&state.db, project_id).await?;
    let to = lifecycle::authorize(session, &project, Transition::Resubmit)?;
    let draft_file = state
        .storage
        .upload(draft.data, DRAFT_FOLDER, "pdf")
        .await?;
    let now = Utc::now().naive_utc();

    let query = transition_query(&project, to, now)
        .col_expr(CProject::DraftFile, Expr::value(draft_file.clone()));
    apply_with_upload(state, query, Some(draft_file.as_str())).await?;

    project.status = to;
    project.updated_at = now;
    project.draft_file = draft_file;

    if let Some(supervisor) = project.supervisor {
        notify(
            state,
            supervisor,
            format!(
                "{} resubmitted \"{}\" for review.",
                session.name, project.title
            ),
            Some("/review".to_string()),
        )
        .await;
    }

    if let Some(supervisor) = contact(state, project.supervisor).await {
        deliver(
            state.mailer.as_ref(),
            supervisor.email.as_deref(),
            submission_notice(&session.name, &project.title, &state.link("/review")),
        )
        .await;
    }

    info!(project = %project.id, "Project resubmitted for review");
    Ok(project)
}

/// Publishes the project. Without a final report the approved draft is published.
#[instrument(skip(state, final_report), fields(student = %session.id))]
pub async fn publish_final(
    state: &ServerState,
    session: &Session,
    project_id: Uuid,
    final_report: Option<UploadedFile>,
) -> ServiceResult<MProject> {
    if let Some(file) = &final_report {
        validate_pdf(file)?;
    }

    let mut project = load_project(&state.db, project_id).await?;
    let to = lifecycle::authorize(session, &project, Transition::PublishFinal)?;

    // The draft is only ever reused, never removed.
    let (final_file, uploaded) = match final_report {
        Some(file) => {
            let reference = state.storage.upload(file.data, FINAL_FOLDER, "pdf").await?;
            (reference, true)
        }
        None => (project.draft_file.clone(), false),
    };
    let now = Utc::now().naive_utc();

    let query = transition_query(&project, to, now)
        .col_expr(CProject::FinalFile, Expr::value(Some(final_file.clone())))
        .col_expr(CProject::PublishedAt, Expr::value(Some(now)));
    apply_with_upload(state, query, uploaded.then_some(final_file.as_str())).await?;

    project.status = to;
    project.updated_at = now;
    project.final_file = Some(final_file);
    project.published_at = Some(now);

    if let Some(supervisor) = project.supervisor {
        notify(
            state,
            supervisor,
            format!("\"{}\" by {} has been published.", project.title, session.name),
            Some("/my-supervised".to_string()),
        )
        .await;
    }

    info!(project = %project.id, "Project published");
    Ok(project)
}

fn ensure_readable(session: &Session, project: &MProject) -> ServiceResult<()> {
    if project.status == ProjectStatus::Published || lifecycle::can_inspect(session, project) {
        return Ok(());
    }

    Err(ServiceError::not_permitted())
}

/// Adds one to a counter of a published project. Failures are logged and reported
/// as not counted.
async fn bump_counter(state: &ServerState, project: Uuid, counter: CProject) -> bool {
    let result = EProject::update_many()
        .col_expr(counter, Expr::col(counter).add(1))
        .filter(CProject::Id.eq(project))
        .filter(CProject::Status.eq(ProjectStatus::Published))
        .exec(&state.db)
        .await;

    match result {
        Ok(r) => r.rows_affected > 0,
        Err(e) => {
            warn!(error = %e, %project, ?counter, "Failed to update project counter");
            false
        }
    }
}

async fn comments_of(state: &ServerState, project: Uuid) -> ServiceResult<Vec<CommentView>> {
    let comments = EComment::find()
        .filter(CComment::Project.eq(project))
        .order_by_asc(CComment::CreatedAt)
        .all(&state.db)
        .await?;

    let mut authors: Vec<Uuid> = comments.iter().map(|c| c.author).collect();
    authors.sort();
    authors.dedup();
    let names = user_names(&state.db, authors).await?;

    Ok(comments
        .into_iter()
        .map(|c| CommentView {
            author_name: names.get(&c.author).cloned().unwrap_or_default(),
            id: c.id,
            content: c.content,
            author: c.author,
            created_at: c.created_at,
        })
        .collect())
}

/// Loads a project for display. Reading a published project counts as a view.
pub async fn record_view(
    state: &ServerState,
    session: &Session,
    project_id: Uuid,
) -> ServiceResult<ProjectDetails> {
    let mut project = load_project(&state.db, project_id).await?;
    ensure_readable(session, &project)?;

    if project.status == ProjectStatus::Published
        && bump_counter(state, project.id, CProject::ViewCount).await
    {
        project.view_count += 1;
    }

    let inspect = lifecycle::can_inspect(session, &project);
    let comments = if inspect {
        comments_of(state, project.id).await?
    } else {
        Vec::new()
    };

    let transitions = lifecycle::allowed_transitions(project.status)
        .into_iter()
        .filter(|t| lifecycle::authorize(session, &project, *t).is_ok())
        .collect();

    let summary = with_names(&state.db, vec![project])
        .await?
        .pop()
        .ok_or_else(|| ServiceError::not_found("Project"))?;

    Ok(ProjectDetails {
        summary,
        comments,
        transitions,
    })
}

/// Resolves the URL of the file to download: the final report when present,
/// otherwise the draft.
pub async fn record_download(
    state: &ServerState,
    session: &Session,
    project_id: Uuid,
) -> ServiceResult<String> {
    let project = load_project(&state.db, project_id).await?;
    ensure_readable(session, &project)?;

    if project.status == ProjectStatus::Published {
        bump_counter(state, project.id, CProject::DownloadCount).await;
    }

    let reference = project.final_file.as_deref().unwrap_or(&project.draft_file);
    Ok(state.storage.public_url(reference))
}

pub async fn my_projects(
    state: &ServerState,
    session: &Session,
) -> ServiceResult<Vec<ProjectSummary>> {
    session.require(Role::Student)?;

    let projects = EProject::find()
        .filter(CProject::Student.eq(session.id))
        .order_by_desc(CProject::UpdatedAt)
        .all(&state.db)
        .await?;

    with_names(&state.db, projects).await
}

pub async fn review_queue(
    state: &ServerState,
    session: &Session,
) -> ServiceResult<Vec<ProjectSummary>> {
    session.require(Role::Supervisor)?;

    let projects = EProject::find()
        .filter(CProject::Supervisor.eq(session.id))
        .filter(CProject::Status.eq(ProjectStatus::PendingReview))
        .order_by_asc(CProject::UpdatedAt)
        .all(&state.db)
        .await?;

    with_names(&state.db, projects).await
}

pub async fn review_count(state: &ServerState, session: &Session) -> ServiceResult<u64> {
    session.require(Role::Supervisor)?;

    Ok(EProject::find()
        .filter(CProject::Supervisor.eq(session.id))
        .filter(CProject::Status.eq(ProjectStatus::PendingReview))
        .count(&state.db)
        .await?)
}

pub async fn supervised(
    state: &ServerState,
    session: &Session,
) -> ServiceResult<Vec<ProjectSummary>> {
    session.require(Role::Supervisor)?;

    let projects = EProject::find()
        .filter(CProject::Supervisor.eq(session.id))
        .filter(CProject::Status.eq(ProjectStatus::Published))
        .order_by_desc(CProject::PublishedAt)
        .all(&state.db)
        .await?;

    with_names(&state.db, projects).await
}

pub async fn all_projects(
    state: &ServerState,
    session: &Session,
) -> ServiceResult<Vec<ProjectSummary>> {
    session.require(Role::Admin)?;

    let projects = EProject::find()
        .order_by_desc(CProject::CreatedAt)
        .all(&state.db)
        .await?;

    with_names(&state.db, projects).await
}

/// Removes a project and, through the foreign keys, its comments.
#[instrument(skip(state), fields(admin = %session.id))]
pub async fn delete_project(
    state: &ServerState,
    session: &Session,
    project_id: Uuid,
) -> ServiceResult<()> {
    session.require(Role::Admin)?;

    let result = EProject::delete_by_id(project_id).exec(&state.db).await?;
    if result.rows_affected == 0 {
        return Err(ServiceError::not_found("Project"));
    }

    info!(project = %project_id, "Project deleted");
    Ok(())
}
