/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use email_address::EmailAddress;

use super::consts::*;

pub fn port_in_range(s: &str) -> Result<u16, String> {
    let port: usize = s
        .parse()
        .map_err(|_| format!("`{s}` is not a port number"))?;

    if PORT_RANGE.contains(&port) {
        Ok(port as u16)
    } else {
        Err(format!(
            "port not in range {}-{}",
            PORT_RANGE.start(),
            PORT_RANGE.end()
        ))
    }
}

pub fn greater_than_zero<
    T: std::str::FromStr + std::cmp::PartialOrd + std::fmt::Display + Default,
>(
    s: &str,
) -> Result<T, String> {
    let num: T = s
        .parse()
        .map_err(|_| format!("`{}` is not a valid number", s))?;

    if num > T::default() {
        Ok(num)
    } else {
        Err(format!("`{}` is not larger than 0", s))
    }
}

pub fn load_secret(f: &str) -> String {
    let s = std::fs::read_to_string(f).unwrap_or_default();
    s.trim().replace(char::from(25), "")
}

fn require_min_chars(value: &str, field: &str, min: usize) -> Result<(), String> {
    if value.trim().chars().count() < min {
        return Err(format!("{} must be at least {} characters long", field, min));
    }

    Ok(())
}

pub fn validate_title(title: &str) -> Result<(), String> {
    require_min_chars(title, "Title", TITLE_MIN_LENGTH)
}

pub fn validate_abstract(summary: &str) -> Result<(), String> {
    require_min_chars(summary, "Abstract", ABSTRACT_MIN_LENGTH)
}

pub fn validate_person_name(name: &str) -> Result<(), String> {
    require_min_chars(name, "Name", NAME_MIN_LENGTH)?;

    if name.chars().any(char::is_control) {
        return Err("Name cannot contain control characters".to_string());
    }

    Ok(())
}

/// Enrollment identifiers look like `CE/2020/001`; anything printable without
/// whitespace is accepted.
pub fn validate_matricule(matricule: &str) -> Result<(), String> {
    if matricule.trim() != matricule {
        return Err("Matricule cannot have leading or trailing whitespace".to_string());
    }

    require_min_chars(matricule, "Matricule", MATRICULE_MIN_LENGTH)?;

    if matricule
        .chars()
        .any(|c| c.is_whitespace() || c.is_control())
    {
        return Err("Matricule cannot contain whitespace".to_string());
    }

    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), String> {
    let length = password.chars().count();

    if length < PASSWORD_MIN_LENGTH {
        return Err(format!(
            "Password must be at least {} characters long",
            PASSWORD_MIN_LENGTH
        ));
    }

    if length > PASSWORD_MAX_LENGTH {
        return Err(format!(
            "Password cannot exceed {} characters",
            PASSWORD_MAX_LENGTH
        ));
    }

    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), String> {
    if !EmailAddress::is_valid(email) {
        return Err("Invalid Email".to_string());
    }

    Ok(())
}

pub fn is_otp_format(otp: &str) -> bool {
    otp.len() == OTP_LENGTH && otp.chars().all(|c| c.is_ascii_digit())
}

/// Returns the year when the search term is exactly four ASCII digits.
pub fn parse_year_term(term: &str) -> Option<i32> {
    if term.len() == 4 && term.chars().all(|c| c.is_ascii_digit()) {
        term.parse().ok()
    } else {
        None
    }
}

/// Trims optional free text and drops it when nothing is left.
pub fn non_blank(text: Option<String>) -> Option<String> {
    text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())
}
