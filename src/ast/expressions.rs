use crate::{lexer::tokens::Token, Span};

use super::{
    ast::{Expr, Identifier, NodeId},
    types::Literals,
};

// LITERALS

/// Value carried by a literal, already converted from its token.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    Long(i64),
    Double(f64),
    Char(char),
    Boolean(bool),
    String(String),
}

/// Literal Expression
/// Represents a number, char, boolean or string literal in the AST.
#[derive(Debug, Clone, PartialEq)]
pub struct LiteralExpr {
    pub id: NodeId,
    pub value: LiteralValue,
    pub span: Span,
}

impl LiteralExpr {
    /// The type a literal has by construction.
    pub fn literal_type(&self) -> Literals {
        match self.value {
            LiteralValue::Long(_) => Literals::Long,
            LiteralValue::Double(_) => Literals::Double,
            LiteralValue::Char(_) => Literals::Char,
            LiteralValue::Boolean(_) => Literals::Boolean,
            LiteralValue::String(_) => Literals::String,
        }
    }
}

/// Name Expression
/// A reference to a variable, parameter or function by name.
#[derive(Debug, Clone, PartialEq)]
pub struct NameExpr {
    pub id: NodeId,
    pub identifier: Identifier,
}

// COMPLEX

/// Binary Expression
/// Represents a binary operation between two expressions, e.g. `a + b`.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub id: NodeId,
    pub left: Box<Expr>,
    pub operator: Token,
    pub right: Box<Expr>,
    pub span: Span,
}

/// Assignment Expression
/// `name = value`. Only plain names can be assigned to.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentExpr {
    pub id: NodeId,
    pub identifier: Identifier,
    pub value: Box<Expr>,
    pub span: Span,
}

/// Call Expression
/// Represents a call of a named function.
#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub id: NodeId,
    pub identifier: Identifier,
    pub arguments: Vec<Expr>,
    pub span: Span,
}

/// Array Expression
/// `[a, b, c]`
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayExpr {
    pub id: NodeId,
    pub elements: Vec<Expr>,
    pub span: Span,
}
