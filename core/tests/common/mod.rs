/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

#![allow(dead_code)]

use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;
use chrono::{NaiveDateTime, Utc};
use clap::Parser;
use entity::project::ProjectStatus;
use entity::user::Role;
use scholar_core::email::Mailer;
use scholar_core::storage::{FileStore, UploadedFile};
use scholar_core::types::*;
use sea_orm::{DatabaseConnection, MockExecResult, Transaction};
use std::sync::{Arc, Mutex, OnceLock};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct SentEmail {
    pub to: String,
    pub subject: String,
    pub html_body: String,
}

/// Records every message handed to it. A failing mailer records the attempt and
/// then reports an SMTP error.
#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<SentEmail>>,
    pub failing: bool,
}

impl RecordingMailer {
    pub fn failing() -> Self {
        RecordingMailer {
            failing: true,
            ..Default::default()
        }
    }

    pub fn sent(&self) -> Vec<SentEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> Result<()> {
        self.sent.lock().unwrap().push(SentEmail {
            to: to.to_string(),
            subject: subject.to_string(),
            html_body: html_body.to_string(),
        });

        if self.failing {
            anyhow::bail!("SMTP connection refused");
        }

        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryFileStore {
    pub files: Mutex<Vec<(String, Bytes)>>,
}

impl MemoryFileStore {
    pub fn references(&self) -> Vec<String> {
        self.files
            .lock()
            .unwrap()
            .iter()
            .map(|(r, _)| r.clone())
            .collect()
    }
}

#[async_trait]
impl FileStore for MemoryFileStore {
    async fn upload(&self, data: Bytes, folder: &str, extension: &str) -> Result<String> {
        let reference = format!("{}/{}.{}", folder, Uuid::new_v4(), extension);
        self.files.lock().unwrap().push((reference.clone(), data));
        Ok(reference)
    }

    async fn remove(&self, reference: &str) -> Result<()> {
        let mut files = self.files.lock().unwrap();
        let before = files.len();
        files.retain(|(r, _)| r != reference);

        if files.len() == before {
            anyhow::bail!("no stored file {}", reference);
        }

        Ok(())
    }

    fn public_url(&self, reference: &str) -> String {
        format!("http://files.test/{}", reference)
    }
}

pub struct TestState {
    pub state: ServerState,
    pub mailer: Arc<RecordingMailer>,
    pub storage: Arc<MemoryFileStore>,
}

impl TestState {
    pub fn into_log(self) -> Vec<Transaction> {
        self.state.db.into_transaction_log()
    }
}

pub fn create_mock_cli(extra: &[&str]) -> Cli {
    let mut args = vec![
        "scholar-server",
        "--jwt-secret-file",
        "test_jwt",
        "--database-url",
        "mock://test",
        "--serve-url",
        "http://scholar.test",
    ];
    args.extend_from_slice(extra);
    Cli::parse_from(args)
}

pub fn create_state(db: DatabaseConnection) -> TestState {
    create_state_with(db, &[])
}

pub fn create_state_with(db: DatabaseConnection, extra: &[&str]) -> TestState {
    create_state_with_mailer(db, extra, RecordingMailer::default())
}

pub fn create_state_with_failing_mail(db: DatabaseConnection) -> TestState {
    create_state_with_mailer(db, &[], RecordingMailer::failing())
}

fn create_state_with_mailer(
    db: DatabaseConnection,
    extra: &[&str],
    mailer: RecordingMailer,
) -> TestState {
    let mailer = Arc::new(mailer);
    let storage = Arc::new(MemoryFileStore::default());

    TestState {
        state: ServerState {
            db,
            cli: create_mock_cli(extra),
            mailer: mailer.clone(),
            storage: storage.clone(),
        },
        mailer,
        storage,
    }
}

pub fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

/// Argon2 hash of `correct-horse`, computed once per test binary.
pub fn password_hash() -> String {
    static HASH: OnceLock<String> = OnceLock::new();
    HASH.get_or_init(|| password_auth::generate_hash("correct-horse"))
        .clone()
}

pub fn user(role: Role, name: &str, matricule: &str) -> MUser {
    MUser {
        id: Uuid::new_v4(),
        matricule: matricule.to_string(),
        name: name.to_string(),
        email: Some(format!("{}@uni.test", matricule.replace('/', "").to_lowercase())),
        password: password_hash(),
        role,
        last_login_at: None,
        created_at: now(),
    }
}

pub fn project(status: ProjectStatus, student: &MUser, supervisor: &MUser) -> MProject {
    MProject {
        id: Uuid::new_v4(),
        title: "Solar powered irrigation control".to_string(),
        summary: "A study of low cost irrigation control for small farms.".to_string(),
        student: student.id,
        supervisor: Some(supervisor.id),
        status,
        draft_file: "drafts/original.pdf".to_string(),
        final_file: None,
        view_count: 0,
        download_count: 0,
        created_at: now(),
        updated_at: now(),
        published_at: None,
    }
}

pub fn notification(recipient: Uuid) -> MNotification {
    MNotification {
        id: Uuid::new_v4(),
        recipient,
        message: "notice".to_string(),
        link: None,
        is_read: false,
        created_at: now(),
    }
}

pub fn comment(project: &MProject, author: &MUser, content: &str) -> MComment {
    MComment {
        id: Uuid::new_v4(),
        project: project.id,
        author: author.id,
        content: content.to_string(),
        created_at: now(),
    }
}

pub fn pdf() -> UploadedFile {
    UploadedFile {
        file_name: Some("report.pdf".to_string()),
        content_type: Some("application/pdf".to_string()),
        data: Bytes::from_static(b"%PDF-1.7\n%test\n"),
    }
}

pub fn rows(rows_affected: u64) -> MockExecResult {
    MockExecResult {
        last_insert_id: 0,
        rows_affected,
    }
}

/// Number of logged statements that start with `verb` on `table`, e.g.
/// `("INSERT INTO", "comment")`.
pub fn count_statements(log: &[Transaction], verb: &str, table: &str) -> usize {
    // Statement SQL is debug-formatted, so identifier quotes appear escaped.
    let needle = format!("{} \\\"{}\\\"", verb, table);
    log.iter()
        .map(|t| format!("{:?}", t).matches(&needle).count())
        .sum()
}

pub fn log_contains(log: &[Transaction], fragment: &str) -> bool {
    log.iter().any(|t| format!("{:?}", t).contains(fragment))
}
