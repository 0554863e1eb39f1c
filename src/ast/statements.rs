use std::slice::Iter;

use crate::Span;

use super::{
    ast::{Expr, Identifier, NodeId, Stmt},
    types::TypeSyntax,
};

#[derive(Debug, Clone, PartialEq)]
pub struct BlockStmt {
    pub id: NodeId,
    pub body: Vec<Stmt>,
    pub span: Span,
}

impl BlockStmt {
    pub fn iter(&self) -> Iter<'_, Stmt> {
        self.body.iter()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStmt {
    pub id: NodeId,
    pub expression: Expr,
    pub span: Span,
}

/// `val name: type = initializer;`
#[derive(Debug, Clone, PartialEq)]
pub struct VarDeclStmt {
    pub id: NodeId,
    pub identifier: Identifier,
    pub type_clause: TypeSyntax,
    pub initializer: Expr,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub id: NodeId,
    pub identifier: Identifier,
    pub type_clause: TypeSyntax,
    pub span: Span,
}

/// `funk name(params): return_type { body }`
#[derive(Debug, Clone, PartialEq)]
pub struct FnDeclStmt {
    pub id: NodeId,
    pub identifier: Identifier,
    pub parameters: Vec<Parameter>,
    pub return_type: TypeSyntax,
    pub body: BlockStmt,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub id: NodeId,
    pub condition: Expr,
    pub then_body: Box<Stmt>,
    pub else_body: Option<Box<Stmt>>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub id: NodeId,
    pub condition: Expr,
    pub body: Box<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt {
    pub id: NodeId,
    pub value: Option<Expr>,
    pub span: Span,
}
