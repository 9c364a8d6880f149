/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use std::ops::RangeInclusive;

pub const PORT_RANGE: RangeInclusive<usize> = 1..=65535;

pub const OTP_RANGE: RangeInclusive<u32> = 100_000..=999_999;
pub const OTP_LENGTH: usize = 6;

pub const TITLE_MIN_LENGTH: usize = 10;
pub const ABSTRACT_MIN_LENGTH: usize = 20;
pub const NAME_MIN_LENGTH: usize = 2;
pub const MATRICULE_MIN_LENGTH: usize = 2;
pub const PASSWORD_MIN_LENGTH: usize = 6;
pub const PASSWORD_MAX_LENGTH: usize = 128;

pub const NOTIFICATION_PAGE_SIZE: u64 = 20;

pub const PDF_CONTENT_TYPE: &str = "application/pdf";
pub const PDF_MAGIC: &[u8] = b"%PDF-";

pub const DRAFT_FOLDER: &str = "drafts";
pub const FINAL_FOLDER: &str = "finals";

pub const INVALID_OTP_MESSAGE: &str = "Invalid or expired OTP.";
