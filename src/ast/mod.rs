/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: The `Program` root and the `Stmt` / `Expr` enums
/// - expressions: Node structs for every expression form
/// - statements: Node structs for every statement form
pub mod ast;
pub mod expressions;
pub mod statements;

#[cfg(test)]
mod tests;
