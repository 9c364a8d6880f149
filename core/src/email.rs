/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use crate::types::Cli;
use anyhow::{Context, Result};
use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use std::sync::Arc;
use tokio::fs;
use tracing::{debug, info, warn};

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub subject: String,
    pub html_body: String,
}

/// Sends without letting a mail failure reach the caller. Recipients without an
/// address on file are skipped.
pub async fn deliver(mailer: &dyn Mailer, to: Option<&str>, message: EmailMessage) {
    let Some(to) = to else {
        debug!(subject = %message.subject, "No email address on file, skipping");
        return;
    };

    if let Err(e) = mailer.send(to, &message.subject, &message.html_body).await {
        warn!(error = %e, to, subject = %message.subject, "Failed to send email");
    }
}

pub struct EmailService {
    transport: Option<SmtpTransport>,
    from_address: String,
    from_name: String,
}

impl EmailService {
    pub async fn new(cli: &Cli) -> Result<Self> {
        let smtp_host = cli
            .email_smtp_host
            .as_ref()
            .context("SMTP host is required when email is enabled")?;

        let smtp_username = cli
            .email_smtp_username
            .as_ref()
            .context("SMTP username is required when email is enabled")?;

        let smtp_password_file = cli
            .email_smtp_password_file
            .as_ref()
            .context("SMTP password file is required when email is enabled")?;

        let from_address = cli
            .email_from_address
            .as_ref()
            .context("From address is required when email is enabled")?;

        let smtp_password = fs::read_to_string(smtp_password_file)
            .await
            .context("Failed to read SMTP password file")?
            .trim()
            .to_string();

        let credentials = Credentials::new(smtp_username.clone(), smtp_password);

        let transport = if cli.email_disable_tls {
            SmtpTransport::builder_dangerous(smtp_host)
                .credentials(credentials)
                .port(cli.email_smtp_port)
                .build()
        } else {
            SmtpTransport::relay(smtp_host)
                .context("Failed to create SMTP transport")?
                .credentials(credentials)
                .port(cli.email_smtp_port)
                .build()
        };

        Ok(Self {
            transport: Some(transport),
            from_address: from_address.clone(),
            from_name: cli.email_from_name.clone(),
        })
    }
}

#[async_trait]
impl Mailer for EmailService {
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> Result<()> {
        let transport = self
            .transport
            .clone()
            .context("SMTP transport not initialized")?;

        let email = Message::builder()
            .from(
                format!("{} <{}>", self.from_name, self.from_address)
                    .parse()
                    .context("Invalid from address")?,
            )
            .to(to.parse().context("Invalid to address")?)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html_body.to_string())
            .context("Failed to build email")?;

        // SmtpTransport blocks on network I/O.
        tokio::task::spawn_blocking(move || transport.send(&email))
            .await
            .context("Email task panicked")?
            .context("Failed to send email")?;

        info!("Email \"{}\" sent to {}", subject, to);
        Ok(())
    }
}

/// Used when email is disabled in the configuration.
pub struct NoopMailer;

#[async_trait]
impl Mailer for NoopMailer {
    async fn send(&self, to: &str, subject: &str, _html_body: &str) -> Result<()> {
        debug!(to, subject, "Email disabled, message dropped");
        Ok(())
    }
}

pub async fn create_mailer(cli: &Cli) -> Result<Arc<dyn Mailer>> {
    if !cli.email_enabled {
        return Ok(Arc::new(NoopMailer));
    }

    Ok(Arc::new(EmailService::new(cli).await?))
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn layout(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>{title}</title>
</head>
<body style="font-family: Arial, sans-serif; line-height: 1.6; color: #333;">
    <div style="max-width: 600px; margin: 0 auto; padding: 20px;">
{content}
        <hr style="border: none; border-top: 1px solid #eee; margin: 30px 0;">
        <p style="font-size: 12px; color: #666;">
            This email was sent by the project repository. If you have any questions, please contact your department administrator.
        </p>
    </div>
</body>
</html>
"#,
        title = escape_html(title),
        content = content
    )
}

pub fn submission_notice(student_name: &str, project_title: &str, review_link: &str) -> EmailMessage {
    let subject = format!("New Project Submission for Review: {}", project_title);
    let content = format!(
        r#"        <p>Hello,</p>
        <p>Student <strong>{student}</strong> has submitted a project draft titled "<strong>{title}</strong>" for your review.</p>
        <p>Please review it here: <a href="{link}">{link}</a></p>"#,
        student = escape_html(student_name),
        title = escape_html(project_title),
        link = escape_html(review_link)
    );

    EmailMessage {
        html_body: layout(&subject, &content),
        subject,
    }
}

pub fn rejection_notice(
    student_name: &str,
    project_title: &str,
    comments: &str,
    dashboard_link: &str,
) -> EmailMessage {
    let subject = "Project Draft Requires Revisions".to_string();
    let content = format!(
        r#"        <p>Hello {student},</p>
        <p>There is an update on your project, "<strong>{title}</strong>".</p>
        <p>Your supervisor has reviewed your draft and it requires revisions before it can be approved.</p>
        <h3>Supervisor's Comments:</h3>
        <div style="background-color: #f0f0f0; padding: 10px; border-radius: 5px;">{comments}</div>
        <p>You can view your project status on your dashboard: <a href="{link}">{link}</a></p>"#,
        student = escape_html(student_name),
        title = escape_html(project_title),
        comments = escape_html(comments).replace('\n', "<br>"),
        link = escape_html(dashboard_link)
    );

    EmailMessage {
        html_body: layout(&subject, &content),
        subject,
    }
}

pub fn approval_notice(student_name: &str, project_title: &str, dashboard_link: &str) -> EmailMessage {
    let subject = "Project Draft Approved!".to_string();
    let content = format!(
        r#"        <p>Hello {student},</p>
        <p>There is an update on your project, "<strong>{title}</strong>".</p>
        <p>Congratulations! Your draft has been <strong>APPROVED</strong>. You can now log in to upload your final report.</p>
        <p>You can view your project status on your dashboard: <a href="{link}">{link}</a></p>"#,
        student = escape_html(student_name),
        title = escape_html(project_title),
        link = escape_html(dashboard_link)
    );

    EmailMessage {
        html_body: layout(&subject, &content),
        subject,
    }
}

pub fn otp_notice(name: &str, otp: &str, ttl_minutes: i64) -> EmailMessage {
    let subject = "Your registration code".to_string();
    let content = format!(
        r#"        <p>Hello {name},</p>
        <p>Use the following code to complete your registration:</p>
        <p style="font-size: 28px; font-weight: bold; letter-spacing: 6px; text-align: center;">{otp}</p>
        <p>This code expires in {ttl} minutes. If you did not start a registration, you can safely ignore this email.</p>"#,
        name = escape_html(name),
        otp = escape_html(otp),
        ttl = ttl_minutes
    );

    EmailMessage {
        html_body: layout(&subject, &content),
        subject,
    }
}
