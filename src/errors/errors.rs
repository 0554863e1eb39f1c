use std::fmt::Display;

use thiserror::Error;

use crate::Position;

#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    /// Human-readable message, as produced by the variant's `Display`.
    pub fn message(&self) -> String {
        self.internal_error.to_string()
    }

    /// Whether the error comes out of the analyzer rather than the front end.
    pub fn is_semantic(&self) -> bool {
        !matches!(
            self.internal_error,
            ErrorImpl::UnrecognisedToken { .. }
                | ErrorImpl::UnexpectedToken { .. }
                | ErrorImpl::UnexpectedTokenDetailed { .. }
                | ErrorImpl::NumberParseError { .. }
        )
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::SymbolAlreadyDeclared { .. } => "SymbolAlreadyDeclared",
            ErrorImpl::IdentifierNotFound { .. } => "IdentifierNotFound",
            ErrorImpl::UnknownType { .. } => "UnknownType",
            ErrorImpl::TypeMismatch { .. } => "TypeMismatch",
            ErrorImpl::HeterogeneousArray => "HeterogeneousArray",
            ErrorImpl::TooManyArguments { .. } => "TooManyArguments",
            ErrorImpl::NotEnoughArguments { .. } => "NotEnoughArguments",
            ErrorImpl::ArgumentTypeMismatch { .. } => "ArgumentTypeMismatch",
            ErrorImpl::NotAFunction { .. } => "NotAFunction",
            ErrorImpl::ExpectedBoolean => "ExpectedBoolean",
            ErrorImpl::MissingReturn { .. } => "MissingReturn",
            ErrorImpl::MissingReturnValue { .. } => "MissingReturnValue",
            ErrorImpl::InvalidReturnType { .. } => "InvalidReturnType",
            ErrorImpl::ReturnOutsideFunction => "ReturnOutsideFunction",
            ErrorImpl::NestedFunction { .. } => "NestedFunction",
            ErrorImpl::NoFunctionDataType { .. } => "NoFunctionDataType",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnexpectedToken { token } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, did you miss a semicolon?",
                token
            )),
            ErrorImpl::UnexpectedTokenDetailed { token, message } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, {}", token, message))
            }
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::SymbolAlreadyDeclared { symbol } => ErrorTip::Suggestion(format!(
                "`{}` is already declared in this scope, pick another name or move it into a nested block",
                symbol
            )),
            ErrorImpl::IdentifierNotFound { identifier } => ErrorTip::Suggestion(format!(
                "Identifier `{}` not found, is it declared in an enclosing scope?",
                identifier
            )),
            ErrorImpl::UnknownType { type_ } => ErrorTip::Suggestion(format!(
                "Unknown type `{}`, expected one of long, double, char, bool, string, unit",
                type_
            )),
            ErrorImpl::TypeMismatch { left, right } => ErrorTip::Suggestion(format!(
                "Left side is `{}` but right side is `{}`, there are no implicit conversions",
                left, right
            )),
            ErrorImpl::HeterogeneousArray => ErrorTip::Suggestion(String::from(
                "All array elements must share one element type",
            )),
            ErrorImpl::TooManyArguments { expected, received, .. } => {
                ErrorTip::Suggestion(format!(
                    "Expected {} arguments, received {}",
                    expected, received
                ))
            }
            ErrorImpl::NotEnoughArguments { expected, received, .. } => {
                ErrorTip::Suggestion(format!(
                    "Expected {} arguments, received {}",
                    expected, received
                ))
            }
            ErrorImpl::ArgumentTypeMismatch {
                expected, received, ..
            } => ErrorTip::Suggestion(format!(
                "Expected argument type `{}`, received `{}`",
                expected, received
            )),
            ErrorImpl::NotAFunction { identifier } => ErrorTip::Suggestion(format!(
                "`{}` is a variable and cannot be called",
                identifier
            )),
            ErrorImpl::ExpectedBoolean => ErrorTip::Suggestion(String::from(
                "Conditions must have type `bool`",
            )),
            ErrorImpl::MissingReturn { function } => ErrorTip::Suggestion(format!(
                "Add a `return` statement to `{}`",
                function
            )),
            ErrorImpl::MissingReturnValue { expected, .. } => {
                ErrorTip::Suggestion(format!("Return a value of type `{}`", expected))
            }
            ErrorImpl::InvalidReturnType {
                expected, received, ..
            } => ErrorTip::Suggestion(format!(
                "Expected return type `{}`, received `{}`",
                expected, received
            )),
            ErrorImpl::ReturnOutsideFunction => ErrorTip::Suggestion(String::from(
                "`return` can only be used inside a `funk` body",
            )),
            ErrorImpl::NestedFunction { .. } => ErrorTip::Suggestion(String::from(
                "Move the declaration to the top level",
            )),
            ErrorImpl::NoFunctionDataType { .. } => ErrorTip::None,
        }
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    // Lexer and parser
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("unexpected token ({message:?}): {token:?}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },

    // Semantic analysis
    #[error("symbol {symbol:?} has already been declared in this scope")]
    SymbolAlreadyDeclared { symbol: String },
    #[error("identifier not found {identifier:?}")]
    IdentifierNotFound { identifier: String },
    #[error("unknown data type {type_:?}")]
    UnknownType { type_: String },
    #[error("type mismatch: left type - {left}, right type - {right}")]
    TypeMismatch { left: String, right: String },
    #[error("heterogeneous type of array elements")]
    HeterogeneousArray,
    #[error("too many parameters for function {function:?} ({expected})")]
    TooManyArguments {
        function: String,
        expected: usize,
        received: usize,
    },
    #[error("not enough parameters for function {function:?} ({expected})")]
    NotEnoughArguments {
        function: String,
        expected: usize,
        received: usize,
    },
    #[error("parameter {index} of function {function:?} has the wrong type: expected {expected}, found {received}")]
    ArgumentTypeMismatch {
        function: String,
        index: usize,
        expected: String,
        received: String,
    },
    #[error("{identifier:?} is not a function")]
    NotAFunction { identifier: String },
    #[error("expected boolean expression")]
    ExpectedBoolean,
    #[error("missing return statement in function {function:?}")]
    MissingReturn { function: String },
    #[error("function {function:?} must return a value of type {expected}")]
    MissingReturnValue { function: String, expected: String },
    #[error("function {function:?} has invalid return value type, found {received}, expected {expected}")]
    InvalidReturnType {
        function: String,
        expected: String,
        received: String,
    },
    #[error("return statement outside of function")]
    ReturnOutsideFunction,
    #[error("function {function:?} cannot be declared inside another function")]
    NestedFunction { function: String },
    #[error("no function data type for {function:?}")]
    NoFunctionDataType { function: String },
}
