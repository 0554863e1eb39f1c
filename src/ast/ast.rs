use std::fmt::Display;

use crate::Span;

use super::{
    expressions::{ArrayExpr, AssignmentExpr, BinaryExpr, CallExpr, LiteralExpr, NameExpr},
    statements::{BlockStmt, ExpressionStmt, FnDeclStmt, IfStmt, ReturnStmt, VarDeclStmt, WhileStmt},
};

/// Identity of a syntax node.
///
/// Allocated by the parser from a running counter, so two parses of the
/// same source hand out the same ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A name as written in the source, either declared or used.
#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub id: NodeId,
    pub name: String,
    pub span: Span,
}

/// Root of a parsed file.
#[derive(Debug, Clone, PartialEq)]
pub struct CompilationUnit {
    pub body: BlockStmt,
}

/// Statement Types
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Block(BlockStmt),
    Expression(ExpressionStmt),
    VarDecl(VarDeclStmt),
    FnDecl(FnDeclStmt),
    If(IfStmt),
    While(WhileStmt),
    Return(ReturnStmt),
}

impl Stmt {
    pub fn id(&self) -> NodeId {
        match self {
            Stmt::Block(stmt) => stmt.id,
            Stmt::Expression(stmt) => stmt.id,
            Stmt::VarDecl(stmt) => stmt.id,
            Stmt::FnDecl(stmt) => stmt.id,
            Stmt::If(stmt) => stmt.id,
            Stmt::While(stmt) => stmt.id,
            Stmt::Return(stmt) => stmt.id,
        }
    }

    pub fn get_span(&self) -> &Span {
        match self {
            Stmt::Block(stmt) => &stmt.span,
            Stmt::Expression(stmt) => &stmt.span,
            Stmt::VarDecl(stmt) => &stmt.span,
            Stmt::FnDecl(stmt) => &stmt.span,
            Stmt::If(stmt) => &stmt.span,
            Stmt::While(stmt) => &stmt.span,
            Stmt::Return(stmt) => &stmt.span,
        }
    }
}

/// Expression Types
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(LiteralExpr),
    Name(NameExpr),
    Binary(BinaryExpr),
    Assignment(AssignmentExpr),
    Call(CallExpr),
    Array(ArrayExpr),
}

impl Expr {
    pub fn id(&self) -> NodeId {
        match self {
            Expr::Literal(expr) => expr.id,
            Expr::Name(expr) => expr.id,
            Expr::Binary(expr) => expr.id,
            Expr::Assignment(expr) => expr.id,
            Expr::Call(expr) => expr.id,
            Expr::Array(expr) => expr.id,
        }
    }

    pub fn get_span(&self) -> &Span {
        match self {
            Expr::Literal(expr) => &expr.span,
            Expr::Name(expr) => &expr.identifier.span,
            Expr::Binary(expr) => &expr.span,
            Expr::Assignment(expr) => &expr.span,
            Expr::Call(expr) => &expr.span,
            Expr::Array(expr) => &expr.span,
        }
    }
}

/// Borrowed view of any node that can be walked.
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    Block(&'a BlockStmt),
    Stmt(&'a Stmt),
    Expr(&'a Expr),
}

impl<'a> Node<'a> {
    /// Direct children in source order.
    pub fn children(&self) -> Vec<Node<'a>> {
        match *self {
            Node::Block(block) => block.body.iter().map(Node::Stmt).collect(),
            Node::Stmt(stmt) => match stmt {
                Stmt::Block(block) => Node::Block(block).children(),
                Stmt::Expression(stmt) => vec![Node::Expr(&stmt.expression)],
                Stmt::VarDecl(stmt) => vec![Node::Expr(&stmt.initializer)],
                Stmt::FnDecl(stmt) => vec![Node::Block(&stmt.body)],
                Stmt::If(stmt) => {
                    let mut children = vec![Node::Expr(&stmt.condition), Node::Stmt(&stmt.then_body)];
                    if let Some(else_body) = &stmt.else_body {
                        children.push(Node::Stmt(else_body));
                    }
                    children
                }
                Stmt::While(stmt) => vec![Node::Expr(&stmt.condition), Node::Stmt(&stmt.body)],
                Stmt::Return(stmt) => stmt.value.iter().map(Node::Expr).collect(),
            },
            Node::Expr(expr) => match expr {
                Expr::Literal(_) | Expr::Name(_) => vec![],
                Expr::Binary(expr) => vec![Node::Expr(&expr.left), Node::Expr(&expr.right)],
                Expr::Assignment(expr) => vec![Node::Expr(&expr.value)],
                Expr::Call(expr) => expr.arguments.iter().map(Node::Expr).collect(),
                Expr::Array(expr) => expr.elements.iter().map(Node::Expr).collect(),
            },
        }
    }

    pub fn id(&self) -> NodeId {
        match self {
            Node::Block(block) => block.id,
            Node::Stmt(stmt) => stmt.id(),
            Node::Expr(expr) => expr.id(),
        }
    }
}
