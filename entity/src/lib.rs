/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

pub mod classlist;
pub mod comment;
pub mod notification;
pub mod pending_registration;
pub mod project;
pub mod user;
