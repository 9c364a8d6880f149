/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Project status workflow.
//!
//! ```text
//! DRAFT --submit--> PENDING_REVIEW --approve--> APPROVED_FOR_FINAL --publish--> PUBLISHED
//!                        |   ^
//!                 reject |   | resubmit
//!                        v   |
//!                      REJECTED
//! ```
//!
//! Every operation that changes a project's status asks this module first. The
//! caller then writes the new status with a conditional update on the status it
//! observed, so a concurrent change turns into a rejected transition rather than a
//! lost update.

use entity::project::ProjectStatus;
use entity::user::Role;
use serde::{Deserialize, Serialize};

use super::error::{ServiceError, ServiceResult};
use super::types::{MProject, Session};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Transition {
    Submit,
    Approve,
    Reject,
    Resubmit,
    PublishFinal,
}

impl Transition {
    pub const ALL: [Transition; 5] = [
        Transition::Submit,
        Transition::Approve,
        Transition::Reject,
        Transition::Resubmit,
        Transition::PublishFinal,
    ];

    /// Role allowed to trigger the transition.
    pub fn actor(self) -> Role {
        match self {
            Transition::Submit | Transition::Resubmit | Transition::PublishFinal => Role::Student,
            Transition::Approve | Transition::Reject => Role::Supervisor,
        }
    }

    fn precondition_message(self) -> &'static str {
        match self {
            Transition::Submit => "This project has already been submitted.",
            Transition::Approve | Transition::Reject => "This project is not awaiting review.",
            Transition::Resubmit => "This project is not awaiting resubmission.",
            Transition::PublishFinal => "This project is not approved for final submission.",
        }
    }
}

pub fn next_status(from: ProjectStatus, transition: Transition) -> Option<ProjectStatus> {
    match (from, transition) {
        (ProjectStatus::Draft, Transition::Submit) => Some(ProjectStatus::PendingReview),
        (ProjectStatus::PendingReview, Transition::Approve) => {
            Some(ProjectStatus::ApprovedForFinal)
        }
        (ProjectStatus::PendingReview, Transition::Reject) => Some(ProjectStatus::Rejected),
        (ProjectStatus::Rejected, Transition::Resubmit) => Some(ProjectStatus::PendingReview),
        (ProjectStatus::ApprovedForFinal, Transition::PublishFinal) => {
            Some(ProjectStatus::Published)
        }
        _ => None,
    }
}

pub fn allowed_transitions(from: ProjectStatus) -> Vec<Transition> {
    Transition::ALL
        .into_iter()
        .filter(|t| next_status(from, *t).is_some())
        .collect()
}

pub fn is_terminal(status: ProjectStatus) -> bool {
    allowed_transitions(status).is_empty()
}

/// Checks role, relationship to the project, and the edge itself. Returns the
/// status the project moves to.
pub fn authorize(
    session: &Session,
    project: &MProject,
    transition: Transition,
) -> ServiceResult<ProjectStatus> {
    session.require(transition.actor())?;

    let related = match transition.actor() {
        Role::Student => project.student == session.id,
        Role::Supervisor => project.supervisor == Some(session.id),
        Role::Admin => false,
    };

    if !related {
        return Err(ServiceError::not_permitted());
    }

    next_status(project.status, transition)
        .ok_or_else(|| ServiceError::Forbidden(transition.precondition_message().to_string()))
}

/// Owner, assigned supervisor, or an administrator: callers who may see a project
/// before it is published, including its review comments.
pub fn can_inspect(session: &Session, project: &MProject) -> bool {
    match session.role {
        Role::Admin => true,
        Role::Student => project.student == session.id,
        Role::Supervisor => project.supervisor == Some(session.id),
    }
}
