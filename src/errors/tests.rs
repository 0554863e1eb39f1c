//! Unit tests for error handling.
//!
//! This module contains tests for error types, the diagnostics sink and
//! error reporting.

use crate::errors::errors::{Error, ErrorImpl, ErrorTip};
use crate::errors::handler::{ErrorCollector, ErrorsHandler};
use crate::Position;
use std::rc::Rc;

fn at(offset: u32) -> Position {
    Position(offset, Rc::new("test.funk".to_string()))
}

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "@".to_string(),
        },
        at(10),
    );

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert!(!error.is_semantic());
}

#[test]
fn test_error_position() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            token: "identifier".to_string(),
        },
        at(42),
    );

    assert_eq!(error.get_position().0, 42);
    assert_eq!(error.get_position().1.as_str(), "test.funk");
}

#[test]
fn test_type_mismatch_message_names_both_sides() {
    let error = Error::new(
        ErrorImpl::TypeMismatch {
            left: "long".to_string(),
            right: "string".to_string(),
        },
        at(0),
    );

    assert_eq!(error.get_error_name(), "TypeMismatch");
    assert_eq!(
        error.message(),
        "type mismatch: left type - long, right type - string"
    );
    assert!(error.is_semantic());
}

#[test]
fn test_identifier_not_found_error() {
    let error = Error::new(
        ErrorImpl::IdentifierNotFound {
            identifier: "foo".to_string(),
        },
        at(0),
    );

    assert_eq!(error.get_error_name(), "IdentifierNotFound");
    assert_eq!(error.message(), "identifier not found \"foo\"");
}

#[test]
fn test_symbol_already_declared_error() {
    let error = Error::new(
        ErrorImpl::SymbolAlreadyDeclared {
            symbol: "x".to_string(),
        },
        at(0),
    );

    assert_eq!(error.get_error_name(), "SymbolAlreadyDeclared");
}

#[test]
fn test_arity_errors_cite_declared_count() {
    let too_many = Error::new(
        ErrorImpl::TooManyArguments {
            function: "f".to_string(),
            expected: 2,
            received: 3,
        },
        at(0),
    );
    let too_few = Error::new(
        ErrorImpl::NotEnoughArguments {
            function: "f".to_string(),
            expected: 2,
            received: 1,
        },
        at(0),
    );

    assert_eq!(too_many.get_error_name(), "TooManyArguments");
    assert_eq!(too_many.message(), "too many parameters for function \"f\" (2)");
    assert_eq!(too_few.get_error_name(), "NotEnoughArguments");
    assert_eq!(too_few.message(), "not enough parameters for function \"f\" (2)");
}

#[test]
fn test_invalid_return_type_message() {
    let error = Error::new(
        ErrorImpl::InvalidReturnType {
            function: "f".to_string(),
            expected: "long".to_string(),
            received: "double".to_string(),
        },
        at(0),
    );

    assert_eq!(
        error.message(),
        "function \"f\" has invalid return value type, found double, expected long"
    );
}

#[test]
fn test_unknown_type_error() {
    let error = Error::new(
        ErrorImpl::UnknownType {
            type_: "CustomType".to_string(),
        },
        at(0),
    );

    assert_eq!(error.get_error_name(), "UnknownType");
}

#[test]
fn test_error_tip_none() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "@".to_string(),
        },
        at(0),
    );

    assert!(matches!(error.get_tip(), ErrorTip::None));
}

#[test]
fn test_error_tip_suggestion() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            token: "}".to_string(),
        },
        at(0),
    );

    match error.get_tip() {
        ErrorTip::Suggestion(_) => (),
        _ => panic!("Expected suggestion tip"),
    }
}

#[test]
fn test_error_tip_display() {
    let tip = ErrorTip::Suggestion("Try this instead".to_string());
    assert_eq!(tip.to_string(), "Try this instead");

    let tip = ErrorTip::None;
    assert_eq!(tip.to_string(), "");
}

#[test]
fn test_collector_keeps_emission_order() {
    let mut collector = ErrorCollector::new();
    collector.handle(Error::new(ErrorImpl::ExpectedBoolean, at(3)));
    collector.handle(Error::new(ErrorImpl::HeterogeneousArray, at(1)));

    assert_eq!(collector.len(), 2);
    assert_eq!(collector.names(), vec!["ExpectedBoolean", "HeterogeneousArray"]);
    assert_eq!(collector.errors()[0].get_position().0, 3);
}

#[test]
fn test_handler_through_mutable_reference() {
    fn report(mut handler: impl ErrorsHandler) {
        handler.handle(Error::new(ErrorImpl::ReturnOutsideFunction, at(0)));
    }

    let mut collector = ErrorCollector::new();
    report(&mut collector);
    report(&mut collector);

    assert_eq!(collector.len(), 2);
    assert_eq!(collector.into_errors()[1].get_error_name(), "ReturnOutsideFunction");
}
