/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Tests for input validation and parsing functions

use scholar_core::input::*;

#[test]
fn test_port_in_range() {
    let port = port_in_range("8080").unwrap();
    assert_eq!(port, 8080);

    let port = port_in_range("65535").unwrap();
    assert_eq!(port, 65535);

    let port = port_in_range("65536").unwrap_err();
    assert_eq!(port, "port not in range 1-65535");

    let port = port_in_range("0").unwrap_err();
    assert_eq!(port, "port not in range 1-65535");
}

#[test]
fn test_greater_than_zero() {
    let num = greater_than_zero::<i64>("10").unwrap();
    assert_eq!(num, 10);

    let num = greater_than_zero::<i64>("0").unwrap_err();
    assert_eq!(num, "`0` is not larger than 0");

    let num = greater_than_zero::<usize>("abc").unwrap_err();
    assert_eq!(num, "`abc` is not a valid number");
}

#[test]
fn test_validate_title() {
    assert!(validate_title("Too short").is_err());
    assert!(validate_title("   Too short   ").is_err());
    assert!(validate_title("Long enough").is_ok());
}

#[test]
fn test_validate_abstract() {
    assert_eq!(
        validate_abstract("Short abstract").unwrap_err(),
        "Abstract must be at least 20 characters long"
    );
    assert!(validate_abstract("This abstract is long enough.").is_ok());
}

#[test]
fn test_validate_matricule() {
    assert!(validate_matricule("CE/2020/001").is_ok());
    assert!(validate_matricule(" CE/2020/001").is_err());
    assert!(validate_matricule("CE 2020").is_err());
    assert!(validate_matricule("C").is_err());
}

#[test]
fn test_validate_password() {
    assert!(validate_password("12345").is_err());
    assert!(validate_password("123456").is_ok());
    assert!(validate_password(&"x".repeat(128)).is_ok());
    assert!(validate_password(&"x".repeat(129)).is_err());
}

#[test]
fn test_validate_person_name() {
    assert!(validate_person_name("Al").is_ok());
    assert!(validate_person_name("A").is_err());
    assert!(validate_person_name("Ada\u{0007}").is_err());
}

#[test]
fn test_validate_email() {
    assert!(validate_email("ada.obi@uni.test").is_ok());
    assert!(validate_email("ada.obi").is_err());
}

#[test]
fn test_is_otp_format() {
    assert!(is_otp_format("123456"));
    assert!(!is_otp_format("12345"));
    assert!(!is_otp_format("1234567"));
    assert!(!is_otp_format("12a456"));
}

#[test]
fn test_parse_year_term() {
    assert_eq!(parse_year_term("2024"), Some(2024));
    assert_eq!(parse_year_term("202"), None);
    assert_eq!(parse_year_term("20x4"), None);
}

#[test]
fn test_non_blank() {
    assert_eq!(non_blank(Some("  ok ".to_string())), Some("ok".to_string()));
    assert_eq!(non_blank(Some(" \n".to_string())), None);
    assert_eq!(non_blank(None), None);
}
