use std::collections::HashMap;

use tracing::trace;

use crate::{
    ast::ast::Identifier,
    errors::errors::{Error, ErrorImpl},
};

use super::data_type::DataType;

/// A declared name.
#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    pub identifier: Identifier,
    pub data_type: DataType,
    pub is_function: bool,
}

/// Stack of lexical scopes, innermost last.
///
/// The root scope is never popped, so there is always a scope to declare
/// into.
#[derive(Debug)]
pub struct Environment {
    scopes: Vec<HashMap<String, Symbol>>,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            scopes: vec![HashMap::new()],
        }
    }

    /// Drops every scope and starts over with an empty root.
    pub fn reset(&mut self) {
        self.scopes.clear();
        self.scopes.push(HashMap::new());
    }

    pub fn push(&mut self) {
        self.scopes.push(HashMap::new());
        trace!(depth = self.depth(), "push scope");
    }

    pub fn pop(&mut self) {
        debug_assert!(self.scopes.len() > 1, "attempted to pop the root scope");
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
        trace!(depth = self.depth(), "pop scope");
    }

    /// Number of open scopes, the root included.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Binds a name in the innermost scope. Outer bindings may be shadowed.
    pub fn declare(&mut self, symbol: Symbol) -> Result<(), Error> {
        let name = symbol.identifier.name.clone();
        if self.declared_here(&name) {
            return Err(Error::new(
                ErrorImpl::SymbolAlreadyDeclared { symbol: name },
                symbol.identifier.span.start.clone(),
            ));
        }

        trace!(
            name = %name,
            data_type = %symbol.data_type,
            is_function = symbol.is_function,
            depth = self.depth(),
            "declare"
        );
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name, symbol);
        }
        Ok(())
    }

    /// Finds the innermost binding of `name`.
    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }

    /// Whether `name` is bound directly in the innermost scope.
    pub fn declared_here(&self, name: &str) -> bool {
        self.scopes
            .last()
            .is_some_and(|scope| scope.contains_key(name))
    }
}
