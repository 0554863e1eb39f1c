//! Integration tests for the full checking pipeline.
//!
//! These tests drive source text through tokenization, parsing and type
//! checking and assert on the reported errors and the recorded types.

use std::rc::Rc;

use funk::{
    ast::{
        ast::{CompilationUnit, Expr, Node, NodeId, Stmt},
        types::Literals,
    },
    errors::{errors::Error, handler::ErrorCollector},
    lexer::lexer::tokenize,
    parser::parser::parse,
    type_checker::{
        data_type::DataType,
        type_checker::{type_check, AnalyzerOptions, TypeChecker},
    },
};

const FILE: &str = "test.funk";

fn parse_source(source: &str) -> CompilationUnit {
    let tokens = tokenize(source.to_string(), Some(FILE.to_string())).unwrap();
    parse(tokens, Rc::new(FILE.to_string())).unwrap()
}

fn check(source: &str) -> (CompilationUnit, TypeChecker<ErrorCollector>) {
    let unit = parse_source(source);
    let checker = type_check(&unit, ErrorCollector::new(), &AnalyzerOptions::default());
    (unit, checker)
}

fn errors(source: &str) -> Vec<Error> {
    check(source).1.into_handler().into_errors()
}

fn names(errors: &[Error]) -> Vec<&str> {
    errors.iter().map(|e| e.get_error_name()).collect()
}

fn offset_of(source: &str, needle: &str) -> u32 {
    source.find(needle).unwrap() as u32
}

fn collect_exprs<'a>(node: Node<'a>, exprs: &mut Vec<&'a Expr>) {
    if let Node::Expr(expr) = node {
        exprs.push(expr);
    }
    for child in node.children() {
        collect_exprs(child, exprs);
    }
}

#[test]
fn test_valid_program() {
    let source = r#"
        funk add(a: long, b: long): long {
            return a + b;
        }

        funk greet(name: string): unit {
            val message: string = name;
        }

        val total: long = add(1, 2);
        val xs: long[3] = [1, 2, total];
        val ready: bool = true;

        if (ready) {
            greet("funk");
        } else {
            total = 0;
        }

        while (ready) {
            ready = false;
        }
    "#;

    let errors = errors(source);
    assert!(errors.is_empty(), "unexpected errors: {:?}", names(&errors));
}

#[test]
fn test_every_expression_has_one_type() {
    let source = r#"
        funk scale(x: double, by: double): double { return x * by; }
        val a: double = scale(1.5, 2.0);
        val b: long[2] = [1 + 2, 3];
        val c: bool = true;
        c = false;
    "#;
    let (unit, checker) = check(source);
    assert!(checker.handler().is_empty());

    let mut exprs = vec![];
    collect_exprs(Node::Block(&unit.body), &mut exprs);

    assert!(!exprs.is_empty());
    for expr in exprs {
        let data_type = checker.data_type(expr.id());
        assert!(data_type.is_some(), "expression {} was not typed", expr.id());
        assert_ne!(data_type, Some(&DataType::Unknown));
    }
}

#[test]
fn test_redeclaration_reports_once_and_keeps_original() {
    let source = "val x: long = 1; val x: string = \"s\"; val y: long = x;";
    let (_, checker) = check(source);

    assert_eq!(checker.handler().names(), vec!["SymbolAlreadyDeclared"]);
    assert_eq!(
        checker.handler().errors()[0].get_position().0,
        offset_of(source, "x: string")
    );

    let unit = parse_source(source);
    let mut checker = TypeChecker::new(ErrorCollector::new());
    checker.analyze(&unit, false);
    assert_eq!(
        checker.environment().lookup("x").map(|s| s.data_type.clone()),
        Some(DataType::LONG)
    );
}

#[test]
fn test_shadowing_in_nested_scope() {
    let source = r#"
        val x: long = 1;
        {
            val x: char = 'c';
            val inner: char = x;
        }
        val outer: long = x;
    "#;

    let errors = errors(source);
    assert!(errors.is_empty(), "unexpected errors: {:?}", names(&errors));
}

#[test]
fn test_shadowed_binding_is_used_inside() {
    let source = "val x: long = 1; { val x: char = 'c'; val y: long = x; }";

    assert_eq!(names(&errors(source)), vec!["TypeMismatch"]);
}

#[test]
fn test_array_literals() {
    let (unit, checker) = check("val a: long[3] = [1, 2, 3]; val b: string[2] = [\"a\", 1];");

    let initializer = |index: usize| match &unit.body.body[index] {
        Stmt::VarDecl(decl) => decl.initializer.id(),
        other => panic!("unexpected statement {:?}", other),
    };

    assert_eq!(
        checker.data_type(initializer(0)),
        Some(&DataType::array(Literals::Long, 3))
    );
    assert_eq!(checker.data_type(initializer(1)), Some(&DataType::Unknown));
    assert_eq!(checker.handler().names(), vec!["HeterogeneousArray"]);
}

#[test]
fn test_call_arity_skips_argument_checks() {
    let source = r#"
        funk f(x: long, y: double): long { return x; }
        f("wrong");
    "#;

    let errors = errors(source);
    assert_eq!(names(&errors), vec!["NotEnoughArguments"]);
    assert_eq!(
        errors[0].message(),
        "not enough parameters for function \"f\" (2)"
    );
    assert_eq!(errors[0].get_position().0, offset_of(source, "f(\"wrong\")"));
}

#[test]
fn test_call_argument_mismatch_by_position() {
    let source = r#"
        funk f(x: long, y: double): long { return x; }
        f(1.0, 2.0);
    "#;

    let errors = errors(source);
    assert_eq!(names(&errors), vec!["ArgumentTypeMismatch"]);
    assert_eq!(
        errors[0].message(),
        "parameter 0 of function \"f\" has the wrong type: expected long, found double"
    );
}

#[test]
fn test_missing_return_points_at_function_name() {
    let source = r#"
        funk compute(x: long): long {
            val y: long = x;
            if (true) { y = 2; }
        }
    "#;

    let errors = errors(source);
    assert_eq!(names(&errors), vec!["MissingReturn"]);
    assert_eq!(errors[0].get_position().0, offset_of(source, "compute"));
}

#[test]
fn test_non_boolean_condition_and_branch_scopes() {
    let source = r#"
        if (1) {
            val inside: long = 1;
        } else {
            inside = 2;
        }
        inside = 3;
    "#;

    let errors = errors(source);
    assert_eq!(
        names(&errors),
        vec!["ExpectedBoolean", "IdentifierNotFound", "IdentifierNotFound"]
    );
    assert_eq!(errors[0].get_position().0, offset_of(source, "1)"));
}

#[test]
fn test_errors_are_reported_in_source_order() {
    let source = r#"
        val a: long = missing;
        val b: int = 1;
        funk f(): long { return; }
        return 1;
    "#;

    assert_eq!(
        names(&errors(source)),
        vec![
            "IdentifierNotFound",
            "UnknownType",
            "MissingReturnValue",
            "ReturnOutsideFunction"
        ]
    );
}

#[test]
fn test_analysis_is_idempotent() {
    let source = r#"
        funk f(x: long): double { return x; }
        val a: long = f(1, 2);
        val b: long[2] = [1, 'c'];
        if (a) { val c: long = 1.5; }
    "#;

    let (first_unit, first) = check(source);
    let (second_unit, second) = check(source);

    assert_eq!(first_unit, second_unit);
    assert!(!first.handler().is_empty());
    assert_eq!(first.handler().errors(), second.handler().errors());
    assert_eq!(first.data_types(), second.data_types());
}

#[test]
fn test_root_scope_option_keeps_diagnostics() {
    let unit = parse_source("val x: long = 1; val x: long = 2;");

    for create_root_scope in [true, false] {
        let options = AnalyzerOptions { create_root_scope };
        let checker = type_check(&unit, ErrorCollector::new(), &options);
        assert_eq!(checker.handler().names(), vec!["SymbolAlreadyDeclared"]);
    }
}

#[test]
fn test_checker_reports_into_borrowed_handler() {
    let unit = parse_source("val x: long = y;");
    let mut collected: Vec<Error> = vec![];

    let checker = type_check(&unit, &mut collected, &AnalyzerOptions::default());
    assert_eq!(checker.data_types().len(), 2);
    drop(checker);

    assert_eq!(names(&collected), vec!["IdentifierNotFound"]);
}

#[test]
fn test_front_end_errors_stop_the_pipeline() {
    let error = tokenize("val x: long = @;".to_string(), Some(FILE.to_string())).unwrap_err();
    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert!(!error.is_semantic());

    let tokens = tokenize("val x: long = ;".to_string(), Some(FILE.to_string())).unwrap();
    let error = parse(tokens, Rc::new(FILE.to_string())).unwrap_err();
    assert_eq!(error.get_error_name(), "UnexpectedToken");
}

#[test]
fn test_node_ids_are_stable_across_parses() {
    let source = "funk f(): unit { } f();";
    let first = parse_source(source);
    let second = parse_source(source);

    let mut first_ids = vec![];
    let mut second_ids = vec![];
    collect_exprs(Node::Block(&first.body), &mut first_ids);
    collect_exprs(Node::Block(&second.body), &mut second_ids);

    let first_ids: Vec<NodeId> = first_ids.iter().map(|e| e.id()).collect();
    let second_ids: Vec<NodeId> = second_ids.iter().map(|e| e.id()).collect();
    assert_eq!(first_ids, second_ids);
}
