//! Unit tests for the parser module.
//!
//! This module contains tests for parsing the language constructs:
//! - Variable declarations
//! - Function declarations
//! - Expressions and precedence
//! - Control flow statements
//! - Node id allocation
//! - Syntax errors

use std::{collections::HashSet, rc::Rc};

use super::parser::parse;
use crate::{
    ast::{
        ast::{CompilationUnit, Expr, Node, NodeId, Stmt},
        expressions::LiteralValue,
        types::TypeSyntax,
    },
    errors::errors::Error,
    lexer::{lexer::tokenize, tokens::TokenKind},
};

fn parse_source(source: &str) -> Result<CompilationUnit, Error> {
    let tokens = tokenize(source.to_string(), Some("test.funk".to_string()))?;
    parse(tokens, Rc::new("test.funk".to_string()))
}

fn first_stmt(source: &str) -> Stmt {
    let unit = parse_source(source).unwrap();
    unit.body.body.into_iter().next().unwrap()
}

fn collect_ids(node: Node, ids: &mut Vec<NodeId>) {
    ids.push(node.id());
    for child in node.children() {
        collect_ids(child, ids);
    }
}

#[test]
fn test_parse_variable_declaration() {
    let stmt = first_stmt("val x: long = 42;");

    match stmt {
        Stmt::VarDecl(decl) => {
            assert_eq!(decl.identifier.name, "x");
            match decl.type_clause {
                TypeSyntax::Identifier(name) => assert_eq!(name.name, "long"),
                other => panic!("unexpected type clause {:?}", other),
            }
            match decl.initializer {
                Expr::Literal(literal) => assert_eq!(literal.value, LiteralValue::Long(42)),
                other => panic!("unexpected initializer {:?}", other),
            }
        }
        other => panic!("expected variable declaration, got {:?}", other),
    }
}

#[test]
fn test_parse_array_type_declaration() {
    let stmt = first_stmt("val xs: long[3] = [1, 2, 3];");

    match stmt {
        Stmt::VarDecl(decl) => {
            match decl.type_clause {
                TypeSyntax::Array(array) => {
                    assert_eq!(array.element.name, "long");
                    assert_eq!(array.size, 3);
                }
                other => panic!("unexpected type clause {:?}", other),
            }
            match decl.initializer {
                Expr::Array(array) => assert_eq!(array.elements.len(), 3),
                other => panic!("unexpected initializer {:?}", other),
            }
        }
        other => panic!("expected variable declaration, got {:?}", other),
    }
}

#[test]
fn test_parse_literals() {
    let unit = parse_source(
        "val a: double = 3.14; val b: char = 'c'; val c: bool = true; val d: string = \"hi\";",
    )
    .unwrap();

    let values: Vec<LiteralValue> = unit
        .body
        .iter()
        .map(|stmt| match stmt {
            Stmt::VarDecl(decl) => match &decl.initializer {
                Expr::Literal(literal) => literal.value.clone(),
                other => panic!("unexpected initializer {:?}", other),
            },
            other => panic!("unexpected statement {:?}", other),
        })
        .collect();

    assert_eq!(
        values,
        vec![
            LiteralValue::Double(3.14),
            LiteralValue::Char('c'),
            LiteralValue::Boolean(true),
            LiteralValue::String("hi".to_string()),
        ]
    );
}

#[test]
fn test_parse_function_declaration() {
    let stmt = first_stmt("funk add(a: long, b: long): long { return a + b; }");

    match stmt {
        Stmt::FnDecl(decl) => {
            assert_eq!(decl.identifier.name, "add");
            assert_eq!(decl.parameters.len(), 2);
            assert_eq!(decl.parameters[1].identifier.name, "b");
            assert_eq!(decl.body.body.len(), 1);
            assert!(matches!(decl.body.body[0], Stmt::Return(_)));
        }
        other => panic!("expected function declaration, got {:?}", other),
    }
}

#[test]
fn test_parse_function_without_parameters() {
    let stmt = first_stmt("funk main(): unit { }");

    match stmt {
        Stmt::FnDecl(decl) => {
            assert!(decl.parameters.is_empty());
            assert!(decl.body.body.is_empty());
        }
        other => panic!("expected function declaration, got {:?}", other),
    }
}

#[test]
fn test_parse_if_else_statement() {
    let stmt = first_stmt("if (x > 0) { y = 1; } else { y = 2; }");

    match stmt {
        Stmt::If(if_stmt) => {
            assert!(matches!(if_stmt.condition, Expr::Binary(_)));
            assert!(matches!(*if_stmt.then_body, Stmt::Block(_)));
            assert!(if_stmt.else_body.is_some());
        }
        other => panic!("expected if statement, got {:?}", other),
    }
}

#[test]
fn test_parse_if_without_block() {
    let stmt = first_stmt("if (flag) x = 1;");

    match stmt {
        Stmt::If(if_stmt) => {
            assert!(matches!(*if_stmt.then_body, Stmt::Expression(_)));
            assert!(if_stmt.else_body.is_none());
        }
        other => panic!("expected if statement, got {:?}", other),
    }
}

#[test]
fn test_parse_while_loop() {
    let stmt = first_stmt("while (x < 10) { x = x + 1; }");

    assert!(matches!(stmt, Stmt::While(_)));
}

#[test]
fn test_parse_operator_precedence() {
    let stmt = first_stmt("5 + 3 * 2;");

    match stmt {
        Stmt::Expression(expr) => match expr.expression {
            Expr::Binary(binary) => {
                assert_eq!(binary.operator.kind, TokenKind::Plus);
                match *binary.right {
                    Expr::Binary(inner) => assert_eq!(inner.operator.kind, TokenKind::Star),
                    other => panic!("unexpected right operand {:?}", other),
                }
            }
            other => panic!("unexpected expression {:?}", other),
        },
        other => panic!("expected expression statement, got {:?}", other),
    }
}

#[test]
fn test_parse_parenthesized_expression() {
    let stmt = first_stmt("(5 + 3) * 2;");

    match stmt {
        Stmt::Expression(expr) => match expr.expression {
            Expr::Binary(binary) => {
                assert_eq!(binary.operator.kind, TokenKind::Star);
                assert!(matches!(*binary.left, Expr::Binary(_)));
            }
            other => panic!("unexpected expression {:?}", other),
        },
        other => panic!("expected expression statement, got {:?}", other),
    }
}

#[test]
fn test_parse_logical_below_relational() {
    let stmt = first_stmt("x > 0 && y < 10;");

    match stmt {
        Stmt::Expression(expr) => match expr.expression {
            Expr::Binary(binary) => assert_eq!(binary.operator.kind, TokenKind::And),
            other => panic!("unexpected expression {:?}", other),
        },
        other => panic!("expected expression statement, got {:?}", other),
    }
}

#[test]
fn test_parse_function_call() {
    let stmt = first_stmt("print(\"Hello\", 1 + 2);");

    match stmt {
        Stmt::Expression(expr) => match expr.expression {
            Expr::Call(call) => {
                assert_eq!(call.identifier.name, "print");
                assert_eq!(call.arguments.len(), 2);
            }
            other => panic!("unexpected expression {:?}", other),
        },
        other => panic!("expected expression statement, got {:?}", other),
    }
}

#[test]
fn test_parse_assignment_is_right_associative() {
    let stmt = first_stmt("a = b = 1;");

    match stmt {
        Stmt::Expression(expr) => match expr.expression {
            Expr::Assignment(assignment) => {
                assert_eq!(assignment.identifier.name, "a");
                assert!(matches!(*assignment.value, Expr::Assignment(_)));
            }
            other => panic!("unexpected expression {:?}", other),
        },
        other => panic!("expected expression statement, got {:?}", other),
    }
}

#[test]
fn test_parse_return_statement() {
    let unit = parse_source("return 42; return;").unwrap();

    match (&unit.body.body[0], &unit.body.body[1]) {
        (Stmt::Return(with_value), Stmt::Return(without_value)) => {
            assert!(with_value.value.is_some());
            assert!(without_value.value.is_none());
        }
        other => panic!("unexpected statements {:?}", other),
    }
}

#[test]
fn test_parse_nested_blocks() {
    let stmt = first_stmt("{ val x: long = 10; { val y: long = 20; } }");

    match stmt {
        Stmt::Block(block) => {
            assert_eq!(block.body.len(), 2);
            assert!(matches!(block.body[1], Stmt::Block(_)));
        }
        other => panic!("expected block, got {:?}", other),
    }
}

#[test]
fn test_parse_empty_program() {
    let unit = parse_source("").unwrap();

    assert!(unit.body.body.is_empty());
}

#[test]
fn test_node_ids_are_unique() {
    let unit = parse_source(
        "funk f(a: long): long { if (a > 1) { return f(a - 1); } return a; } val x: long[2] = [f(1), 2];",
    )
    .unwrap();

    let mut ids = vec![];
    collect_ids(Node::Block(&unit.body), &mut ids);
    let unique: HashSet<NodeId> = ids.iter().copied().collect();

    assert_eq!(unique.len(), ids.len());
}

#[test]
fn test_node_ids_are_deterministic() {
    let source = "val x: long = 1 + 2; x = 3;";

    assert_eq!(parse_source(source).unwrap(), parse_source(source).unwrap());
}

#[test]
fn test_spans_cover_statement() {
    let stmt = first_stmt("val x: long = 42;");

    assert_eq!(stmt.get_span().start.0, 0);
    assert_eq!(stmt.get_span().end.0, 17);
}

#[test]
fn test_parse_syntax_error_missing_semicolon() {
    let error = parse_source("val x: long = 42").unwrap_err();

    assert_eq!(error.get_error_name(), "UnexpectedToken");
}

#[test]
fn test_parse_syntax_error_missing_identifier() {
    let error = parse_source("val = 42;").unwrap_err();

    assert_eq!(error.get_error_name(), "UnexpectedTokenDetailed");
    assert_eq!(error.get_position().0, 4);
}

#[test]
fn test_parse_requires_type_clause() {
    let error = parse_source("val x = 42;").unwrap_err();

    assert_eq!(error.get_error_name(), "UnexpectedTokenDetailed");
}

#[test]
fn test_parse_requires_return_type() {
    assert!(parse_source("funk f() { }").is_err());
}

#[test]
fn test_parse_rejects_call_on_non_name() {
    assert!(parse_source("(f + 1)(1);").is_err());
}

#[test]
fn test_parse_rejects_assignment_to_non_name() {
    assert!(parse_source("1 = 2;").is_err());
}

#[test]
fn test_parse_unclosed_block() {
    assert!(parse_source("{ val x: long = 1;").is_err());
}

#[test]
fn test_parse_multi_dimensional_array_type() {
    assert!(parse_source("val x: long[2][3] = [1];").is_err());
}
