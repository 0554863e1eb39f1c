//! Semantic types.
//!
//! A [`DataType`] is what the checker records for every typed node. The
//! `Unknown` variant marks a type that could not be determined because of
//! an earlier error; nothing that reads it reports a further diagnostic.

use std::fmt::Display;

use crate::{
    ast::types::{Literals, TypeSyntax},
    errors::errors::{Error, ErrorImpl},
    Position,
};

#[derive(Debug, Clone, Eq)]
pub enum DataType {
    Literal(Literals),
    Array { element: Literals, dims: Vec<usize> },
    Unknown,
}

impl DataType {
    pub const LONG: DataType = DataType::Literal(Literals::Long);
    pub const DOUBLE: DataType = DataType::Literal(Literals::Double);
    pub const CHAR: DataType = DataType::Literal(Literals::Char);
    pub const BOOLEAN: DataType = DataType::Literal(Literals::Boolean);
    pub const STRING: DataType = DataType::Literal(Literals::String);
    pub const UNIT: DataType = DataType::Literal(Literals::Unit);

    pub fn array(element: Literals, size: usize) -> DataType {
        DataType::Array {
            element,
            dims: vec![size],
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, DataType::Unknown)
    }

    pub fn is_array(&self) -> bool {
        matches!(self, DataType::Array { .. })
    }

    /// The primitive kind with any array modifier stripped.
    pub fn base(&self) -> Option<Literals> {
        match self {
            DataType::Literal(literal) => Some(*literal),
            DataType::Array { element, .. } => Some(*element),
            DataType::Unknown => None,
        }
    }
}

impl PartialEq for DataType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (DataType::Literal(left), DataType::Literal(right)) => left == right,
            (
                DataType::Array {
                    element: left,
                    dims: left_dims,
                },
                DataType::Array {
                    element: right,
                    dims: right_dims,
                },
            ) => {
                // An array without dimensions matches any size
                left == right
                    && (left_dims.is_empty() || right_dims.is_empty() || left_dims == right_dims)
            }
            (DataType::Unknown, DataType::Unknown) => true,
            _ => false,
        }
    }
}

impl Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataType::Literal(literal) => write!(f, "{}", literal),
            DataType::Array { element, dims } => {
                write!(f, "{}", element)?;
                if dims.is_empty() {
                    write!(f, "[]")?;
                }
                for dim in dims {
                    write!(f, "[{}]", dim)?;
                }
                Ok(())
            }
            DataType::Unknown => write!(f, "unknown"),
        }
    }
}

/// Maps a written type annotation to its [`DataType`].
pub fn resolve(type_syntax: &TypeSyntax) -> Result<DataType, Error> {
    match type_syntax {
        TypeSyntax::Identifier(identifier) => Literals::from_name(&identifier.name)
            .map(DataType::Literal)
            .ok_or_else(|| unknown_type(&identifier.name, identifier.span.start.clone())),
        TypeSyntax::Array(array) => Literals::from_name(&array.element.name)
            .map(|element| DataType::array(element, array.size))
            .ok_or_else(|| unknown_type(&array.element.name, array.element.span.start.clone())),
    }
}

fn unknown_type(name: &str, position: Position) -> Error {
    Error::new(
        ErrorImpl::UnknownType {
            type_: name.to_string(),
        },
        position,
    )
}

/// Combines two operand types. Only identical types combine.
///
/// An `Unknown` operand yields `Unknown` without an error so a single
/// mistake is reported once.
pub fn promote(left: &DataType, right: &DataType, position: Position) -> Result<DataType, Error> {
    if left.is_unknown() || right.is_unknown() {
        return Ok(DataType::Unknown);
    }

    if left == right {
        Ok(left.clone())
    } else {
        Err(Error::new(
            ErrorImpl::TypeMismatch {
                left: left.to_string(),
                right: right.to_string(),
            },
            position,
        ))
    }
}
