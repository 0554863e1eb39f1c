//! Type syntax for the AST.
//!
//! Type annotations are kept exactly as written (`long`, `char[4]`). They
//! are turned into concrete types by the type checker, which is also where
//! unknown type names are reported.

use std::fmt::Display;

use crate::Span;

use super::ast::Identifier;

/// The primitive kinds of the language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Literals {
    Long,
    Double,
    Char,
    Boolean,
    String,
    Unit,
}

impl Literals {
    /// Maps a type name as written in source to its kind.
    pub fn from_name(name: &str) -> Option<Literals> {
        match name {
            "long" => Some(Literals::Long),
            "double" => Some(Literals::Double),
            "char" => Some(Literals::Char),
            "bool" => Some(Literals::Boolean),
            "string" => Some(Literals::String),
            "unit" => Some(Literals::Unit),
            _ => None,
        }
    }
}

impl Display for Literals {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Literals::Long => "long",
            Literals::Double => "double",
            Literals::Char => "char",
            Literals::Boolean => "bool",
            Literals::String => "string",
            Literals::Unit => "unit",
        };
        write!(f, "{}", name)
    }
}

/// A type annotation.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeSyntax {
    /// `long`
    Identifier(Identifier),
    /// `long[3]`
    Array(ArrayTypeSyntax),
}

impl TypeSyntax {
    pub fn get_span(&self) -> &Span {
        match self {
            TypeSyntax::Identifier(identifier) => &identifier.span,
            TypeSyntax::Array(array) => &array.span,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayTypeSyntax {
    pub element: Identifier,
    pub size: usize,
    pub span: Span,
}
