//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the parser that transforms a stream of tokens
//! into an Abstract Syntax Tree. It uses a Pratt parser for expressions
//! with proper operator precedence and handles:
//!
//! - Statement parsing (declarations, blocks, declaratives)
//! - Expression parsing (operators, calls, indexing, slicing, assignment)
//! - Control flow and declarations (`if`, `switch`, `match`, functions...)
//! - Array and dict patterns inside `match`
//! - Error recovery and reporting
//!
//! The parser uses NUD (null denotation), LED (left denotation) and postfix
//! functions for expression parsing with binding power for precedence
//! handling. Handlers return `None` after recording a diagnostic.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;

#[cfg(test)]
mod tests;
