/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: node ids, the statement/expression enums and generic traversal
/// - expressions: Definitions for the expression nodes
/// - statements: Definitions for the statement nodes
/// - types: Type annotations and the primitive kinds
pub mod ast;
pub mod expressions;
pub mod statements;
pub mod types;
