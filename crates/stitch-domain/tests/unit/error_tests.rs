//! Unit tests for domain error types

use std::error::Error as _;

use stitch_domain::{ContractViolation, Error};

#[test]
fn test_contract_violation_records_caller() {
    let line = line!() + 1;
    let violation = ContractViolation::new("not observable");

    assert_eq!(violation.message, "not observable");
    assert_eq!(violation.location.file(), file!());
    assert_eq!(violation.location.line(), line);
}

#[test]
fn test_contract_violation_display() {
    let violation = ContractViolation::new("not observable");

    let display_str = violation.to_string();
    assert!(display_str.starts_with("Contract violation: not observable (at "));
}

#[test]
fn test_contract_violation_error_is_transparent() {
    let violation = ContractViolation::new("broken");
    let error = Error::from(violation.clone());

    assert_eq!(error.to_string(), violation.to_string());
    match error {
        Error::ContractViolation(inner) => assert_eq!(inner, violation),
        _ => panic!("Expected ContractViolation error"),
    }
}

#[test]
fn test_contract_violation_helper_tracks_caller() {
    let line = line!() + 1;
    let error = Error::contract_violation("broken");

    match error {
        Error::ContractViolation(inner) => assert_eq!(inner.location.line(), line),
        _ => panic!("Expected ContractViolation error"),
    }
}

#[test]
fn test_configuration_error() {
    let error = Error::configuration("Invalid scope");
    match error {
        Error::Configuration { message, source } => {
            assert_eq!(message, "Invalid scope");
            assert!(source.is_none());
        }
        _ => panic!("Expected Configuration error"),
    }
}

#[test]
fn test_configuration_error_with_source() {
    let io_error = std::io::Error::other("disk");
    let error = Error::configuration_with_source("Failed to read", io_error);

    assert_eq!(error.to_string(), "Configuration error: Failed to read");
    assert!(error.source().is_some());
}

#[test]
fn test_io_errors() {
    let simple: Error = std::io::Error::other("closed").into();
    assert!(matches!(simple, Error::IoSimple { .. }));
    assert_eq!(simple.to_string(), "I/O error: closed");

    let with_message = Error::io("write failed");
    assert_eq!(with_message.to_string(), "I/O error: write failed");
    assert!(with_message.source().is_none());

    let with_source = Error::io_with_source("write failed", std::io::Error::other("full"));
    assert!(with_source.source().is_some());
}

#[test]
fn test_dispatch_error() {
    let error = Error::dispatch("main loop is gone");
    match error {
        Error::Dispatch { message } => assert_eq!(message, "main loop is gone"),
        _ => panic!("Expected Dispatch error"),
    }
}

#[test]
fn test_internal_and_infrastructure_errors() {
    assert_eq!(
        Error::internal("unexpected").to_string(),
        "Internal error: unexpected"
    );
    assert_eq!(
        Error::infrastructure("subscriber").to_string(),
        "Infrastructure error: subscriber"
    );
}
