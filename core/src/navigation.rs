/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use entity::user::Role;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavLink {
    pub route: String,
    pub label: String,
}

fn link(route: &str, label: &str) -> NavLink {
    NavLink {
        route: route.to_string(),
        label: label.to_string(),
    }
}

pub fn navigation(role: Role) -> Vec<NavLink> {
    match role {
        Role::Student => vec![
            link("/dashboard", "Home & Search"),
            link("/my-projects", "My Projects"),
            link("/projects/new", "Submit Project"),
            link("/notifications", "Notifications"),
        ],
        Role::Supervisor => vec![
            link("/dashboard", "Home & Search"),
            link("/review", "Review"),
            link("/my-supervised", "Supervised Projects"),
            link("/notifications", "Notifications"),
        ],
        Role::Admin => vec![
            link("/admin/users", "Users"),
            link("/admin/classlist", "Classlist"),
            link("/admin/projects", "Projects"),
        ],
    }
}
