use std::{
    collections::{BTreeSet, HashMap},
    ops::{Deref, DerefMut},
};

use tracing::{debug, span, Level};

use crate::{
    ast::{
        ast::{CompilationUnit, Expr, Identifier, Node, NodeId, Stmt},
        expressions::{ArrayExpr, AssignmentExpr, BinaryExpr, CallExpr, NameExpr},
        statements::{BlockStmt, FnDeclStmt, IfStmt, ReturnStmt, VarDeclStmt},
        types::TypeSyntax,
    },
    errors::{
        errors::{Error, ErrorImpl},
        handler::ErrorsHandler,
    },
    Position,
};

use super::{
    data_type::{self, DataType},
    environment::{Environment, Symbol},
};

/// Signature of a declared function, used to check its call sites.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionRecord {
    pub identifier: Identifier,
    pub declaration: NodeId,
    pub return_type: DataType,
    pub parameter_types: Vec<DataType>,
}

/// The function whose body is being analyzed.
#[derive(Debug, Clone)]
struct FunctionContext {
    name: String,
    position: Position,
    return_type: DataType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyzerOptions {
    /// Give the top level its own scope on top of the root one.
    pub create_root_scope: bool,
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        AnalyzerOptions {
            create_root_scope: true,
        }
    }
}

/// Resolves names, assigns a type to every expression and reports
/// semantic errors to `H` without stopping.
#[derive(Debug)]
pub struct TypeChecker<H: ErrorsHandler> {
    handler: H,
    environment: Environment,
    data_types: HashMap<NodeId, DataType>,
    functions: HashMap<String, FunctionRecord>,
    function: Option<FunctionContext>,
    has_return: bool,
}

/// Open scope that is popped when dropped, including during unwinding.
pub struct ScopeGuard<'a, H: ErrorsHandler> {
    checker: &'a mut TypeChecker<H>,
}

impl<H: ErrorsHandler> Deref for ScopeGuard<'_, H> {
    type Target = TypeChecker<H>;

    fn deref(&self) -> &Self::Target {
        self.checker
    }
}

impl<H: ErrorsHandler> DerefMut for ScopeGuard<'_, H> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.checker
    }
}

impl<H: ErrorsHandler> Drop for ScopeGuard<'_, H> {
    fn drop(&mut self) {
        self.checker.environment.pop();
    }
}

impl<H: ErrorsHandler> TypeChecker<H> {
    pub fn new(handler: H) -> Self {
        TypeChecker {
            handler,
            environment: Environment::new(),
            data_types: HashMap::new(),
            functions: HashMap::new(),
            function: None,
            has_return: false,
        }
    }

    /// Analyzes a whole compilation unit.
    ///
    /// The scope stack and the current function are reset first. Types and
    /// function records from an earlier call are kept, so a tree should be
    /// analyzed once per checker.
    pub fn analyze(&mut self, unit: &CompilationUnit, create_root_scope: bool) {
        let _span = span!(Level::TRACE, "analyze", create_root_scope).entered();

        self.environment.reset();
        self.function = None;
        self.has_return = false;

        self.visit(Node::Block(&unit.body), create_root_scope);
    }

    pub fn analyze_with(&mut self, unit: &CompilationUnit, options: &AnalyzerOptions) {
        self.analyze(unit, options.create_root_scope);
    }

    /// Type recorded for a node, if it was typed.
    pub fn data_type(&self, id: NodeId) -> Option<&DataType> {
        self.data_types.get(&id)
    }

    pub fn data_types(&self) -> &HashMap<NodeId, DataType> {
        &self.data_types
    }

    pub fn function(&self, name: &str) -> Option<&FunctionRecord> {
        self.functions.get(name)
    }

    pub fn functions(&self) -> &HashMap<String, FunctionRecord> {
        &self.functions
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn into_handler(self) -> H {
        self.handler
    }

    /// Pushes a scope that lives as long as the returned guard.
    pub fn scope(&mut self) -> ScopeGuard<'_, H> {
        self.environment.push();
        ScopeGuard { checker: self }
    }

    fn report(&mut self, error: Error) {
        debug!(
            name = error.get_error_name(),
            position = error.get_position().0,
            "{}",
            error.message()
        );
        self.handler.handle(error);
    }

    fn set_type(&mut self, id: NodeId, data_type: DataType) {
        let previous = self.data_types.insert(id, data_type);
        debug_assert!(previous.is_none(), "node {} was typed twice", id);
    }

    fn type_of(&self, id: NodeId) -> DataType {
        self.data_types.get(&id).cloned().unwrap_or(DataType::Unknown)
    }

    fn resolve_type(&mut self, type_syntax: &TypeSyntax) -> DataType {
        match data_type::resolve(type_syntax) {
            Ok(data_type) => data_type,
            Err(error) => {
                self.report(error);
                DataType::Unknown
            }
        }
    }

    fn promote(&mut self, left: &DataType, right: &DataType, position: Position) -> DataType {
        match data_type::promote(left, right, position) {
            Ok(data_type) => data_type,
            Err(error) => {
                self.report(error);
                DataType::Unknown
            }
        }
    }

    /// Declares a symbol in the innermost scope, reporting a redeclaration.
    fn declare(&mut self, identifier: &Identifier, data_type: DataType, is_function: bool) -> bool {
        let symbol = Symbol {
            identifier: identifier.clone(),
            data_type,
            is_function,
        };

        match self.environment.declare(symbol) {
            Ok(()) => true,
            Err(error) => {
                self.report(error);
                false
            }
        }
    }

    /// Looks a name up and records its type on `id`.
    fn resolve_name(&mut self, identifier: &Identifier, id: NodeId) -> Option<Symbol> {
        match self.environment.lookup(&identifier.name).cloned() {
            Some(symbol) => {
                self.set_type(id, symbol.data_type.clone());
                Some(symbol)
            }
            None => {
                self.set_type(id, DataType::Unknown);
                self.report(Error::new(
                    ErrorImpl::IdentifierNotFound {
                        identifier: identifier.name.clone(),
                    },
                    identifier.span.start.clone(),
                ));
                None
            }
        }
    }

    fn visit(&mut self, node: Node<'_>, create_scope: bool) {
        match node {
            Node::Block(block) => self.visit_block(block, create_scope),
            Node::Stmt(stmt) => match stmt {
                Stmt::Block(block) => self.visit_block(block, create_scope),
                Stmt::VarDecl(decl) => self.visit_var_decl(decl),
                Stmt::FnDecl(decl) => self.visit_fn_decl(decl),
                Stmt::If(stmt) => self.visit_if(stmt),
                Stmt::Return(stmt) => self.visit_return(stmt),
                Stmt::Expression(_) | Stmt::While(_) => self.visit_children(node),
            },
            Node::Expr(expr) => match expr {
                Expr::Literal(literal) => {
                    self.set_type(literal.id, DataType::Literal(literal.literal_type()))
                }
                Expr::Name(name) => self.visit_name(name),
                Expr::Binary(binary) => self.visit_binary(binary),
                Expr::Assignment(assignment) => self.visit_assignment(assignment),
                Expr::Call(call) => self.visit_call(call),
                Expr::Array(array) => self.visit_array(array),
            },
        }
    }

    fn visit_children(&mut self, node: Node<'_>) {
        for child in node.children() {
            self.visit(child, true);
        }
    }

    fn visit_expr(&mut self, expr: &Expr) -> DataType {
        self.visit(Node::Expr(expr), true);
        self.type_of(expr.id())
    }

    fn visit_block(&mut self, block: &BlockStmt, create_scope: bool) {
        if create_scope {
            let mut scope = self.scope();
            for stmt in block.iter() {
                scope.visit(Node::Stmt(stmt), true);
            }
        } else {
            for stmt in block.iter() {
                self.visit(Node::Stmt(stmt), true);
            }
        }
    }

    fn visit_var_decl(&mut self, decl: &VarDeclStmt) {
        let declared_type = self.resolve_type(&decl.type_clause);
        self.declare(&decl.identifier, declared_type.clone(), false);

        let initializer_type = self.visit_expr(&decl.initializer);
        let data_type = self.promote(&declared_type, &initializer_type, decl.span.start.clone());
        self.set_type(decl.id, data_type);
    }

    fn visit_fn_decl(&mut self, decl: &FnDeclStmt) {
        let name = decl.identifier.name.clone();
        let return_type = self.resolve_type(&decl.return_type);
        let declared = self.declare(&decl.identifier, return_type, true);

        if self.function.is_some() {
            self.report(Error::new(
                ErrorImpl::NestedFunction { function: name },
                decl.identifier.span.start.clone(),
            ));
            return;
        }

        let return_type = match self.environment.lookup(&name) {
            Some(symbol) => symbol.data_type.clone(),
            None => {
                self.report(Error::new(
                    ErrorImpl::NoFunctionDataType { function: name },
                    decl.identifier.span.start.clone(),
                ));
                return;
            }
        };

        let mut scope = self.scope();

        let parameter_types: Vec<DataType> = decl
            .parameters
            .iter()
            .map(|parameter| {
                let data_type = scope.resolve_type(&parameter.type_clause);
                if scope.declare(&parameter.identifier, data_type.clone(), false) {
                    data_type
                } else {
                    DataType::Unknown
                }
            })
            .collect();

        scope.function = Some(FunctionContext {
            name: name.clone(),
            position: decl.identifier.span.start.clone(),
            return_type: return_type.clone(),
        });
        scope.has_return = false;

        if declared {
            let record = FunctionRecord {
                identifier: decl.identifier.clone(),
                declaration: decl.id,
                return_type: return_type.clone(),
                parameter_types,
            };
            debug!(
                function = %name,
                return_type = %record.return_type,
                parameters = record.parameter_types.len(),
                "function record"
            );
            scope.functions.insert(name.clone(), record);
        }

        scope.visit_block(&decl.body, false);

        if return_type != DataType::UNIT && !return_type.is_unknown() && !scope.has_return {
            scope.report(Error::new(
                ErrorImpl::MissingReturn { function: name },
                decl.identifier.span.start.clone(),
            ));
        }

        scope.function = None;
        scope.has_return = false;
    }

    fn visit_if(&mut self, stmt: &IfStmt) {
        {
            let mut scope = self.scope();

            let condition_type = scope.visit_expr(&stmt.condition);
            if !condition_type.is_unknown() && condition_type != DataType::BOOLEAN {
                scope.report(Error::new(
                    ErrorImpl::ExpectedBoolean,
                    stmt.condition.get_span().start.clone(),
                ));
            }

            scope.visit(Node::Stmt(&stmt.then_body), false);
        }

        if let Some(else_body) = &stmt.else_body {
            let mut scope = self.scope();
            scope.visit(Node::Stmt(else_body), false);
        }
    }

    fn visit_return(&mut self, stmt: &ReturnStmt) {
        let context = match &self.function {
            Some(context) => context.clone(),
            None => {
                self.report(Error::new(
                    ErrorImpl::ReturnOutsideFunction,
                    stmt.span.start.clone(),
                ));
                if let Some(value) = &stmt.value {
                    self.visit_expr(value);
                }
                return;
            }
        };

        self.has_return = true;

        if context.return_type == DataType::UNIT {
            return;
        }

        match &stmt.value {
            None => {
                if !context.return_type.is_unknown() {
                    self.report(Error::new(
                        ErrorImpl::MissingReturnValue {
                            function: context.name,
                            expected: context.return_type.to_string(),
                        },
                        context.position,
                    ));
                }
            }
            Some(value) => {
                let value_type = self.visit_expr(value);
                if !value_type.is_unknown()
                    && !context.return_type.is_unknown()
                    && value_type != context.return_type
                {
                    self.report(Error::new(
                        ErrorImpl::InvalidReturnType {
                            function: context.name,
                            expected: context.return_type.to_string(),
                            received: value_type.to_string(),
                        },
                        context.position,
                    ));
                }
            }
        }
    }

    fn visit_name(&mut self, name: &NameExpr) {
        self.resolve_name(&name.identifier, name.id);
    }

    fn visit_binary(&mut self, binary: &BinaryExpr) {
        let left = self.visit_expr(&binary.left);
        let right = self.visit_expr(&binary.right);

        let data_type = self.promote(&left, &right, binary.span.start.clone());
        self.set_type(binary.id, data_type);
    }

    fn visit_assignment(&mut self, assignment: &AssignmentExpr) {
        let target = self.resolve_name(&assignment.identifier, assignment.identifier.id);
        self.visit_expr(&assignment.value);

        let data_type = target.map_or(DataType::Unknown, |symbol| symbol.data_type);
        self.set_type(assignment.id, data_type);
    }

    fn visit_array(&mut self, array: &ArrayExpr) {
        let element_types: Vec<DataType> = array
            .elements
            .iter()
            .map(|element| self.visit_expr(element))
            .collect();

        if element_types.iter().any(DataType::is_unknown) {
            self.set_type(array.id, DataType::Unknown);
            return;
        }

        let bases: BTreeSet<_> = element_types.iter().filter_map(DataType::base).collect();
        let data_type = match bases.iter().next() {
            Some(base) if bases.len() == 1 => DataType::array(*base, array.elements.len()),
            _ => {
                self.report(Error::new(
                    ErrorImpl::HeterogeneousArray,
                    array.span.start.clone(),
                ));
                DataType::Unknown
            }
        };
        self.set_type(array.id, data_type);
    }

    fn visit_call(&mut self, call: &CallExpr) {
        let name = &call.identifier.name;

        let symbol = match self.resolve_name(&call.identifier, call.identifier.id) {
            Some(symbol) if !symbol.data_type.is_unknown() => symbol,
            _ => {
                self.set_type(call.id, DataType::Unknown);
                return;
            }
        };

        if !symbol.is_function {
            self.report(Error::new(
                ErrorImpl::NotAFunction {
                    identifier: name.clone(),
                },
                call.span.start.clone(),
            ));
            self.set_type(call.id, DataType::Unknown);
            return;
        }

        let record = match self.functions.get(name) {
            Some(record) => record.clone(),
            None => {
                self.set_type(call.id, symbol.data_type);
                return;
            }
        };

        let expected = record.parameter_types.len();
        let received = call.arguments.len();
        if received != expected {
            let error = if received > expected {
                ErrorImpl::TooManyArguments {
                    function: name.clone(),
                    expected,
                    received,
                }
            } else {
                ErrorImpl::NotEnoughArguments {
                    function: name.clone(),
                    expected,
                    received,
                }
            };
            self.report(Error::new(error, call.span.start.clone()));
            self.set_type(call.id, DataType::Unknown);
            return;
        }

        let mut mismatched = false;
        for (index, (argument, parameter_type)) in call
            .arguments
            .iter()
            .zip(record.parameter_types.iter())
            .enumerate()
        {
            let argument_type = self.visit_expr(argument);
            if argument_type.is_unknown() || parameter_type.is_unknown() {
                continue;
            }

            if argument_type != *parameter_type {
                mismatched = true;
                self.report(Error::new(
                    ErrorImpl::ArgumentTypeMismatch {
                        function: name.clone(),
                        index,
                        expected: parameter_type.to_string(),
                        received: argument_type.to_string(),
                    },
                    call.span.start.clone(),
                ));
            }
        }

        let data_type = if mismatched {
            DataType::Unknown
        } else {
            record.return_type
        };
        self.set_type(call.id, data_type);
    }
}

/// Runs the checker over `unit`, reporting into `handler`, and returns the
/// checker so its types can be inspected.
pub fn type_check<H: ErrorsHandler>(
    unit: &CompilationUnit,
    handler: H,
    options: &AnalyzerOptions,
) -> TypeChecker<H> {
    let mut checker = TypeChecker::new(handler);
    checker.analyze_with(unit, options);
    checker
}
