//! Lexical analysis for Vint source.
//!
//! This module contains the lexer (tokenizer) that converts source code
//! into line-tagged tokens for parsing. It handles:
//!
//! - Tokenization of source code using regex patterns
//! - Recognition of keywords, identifiers, literals, and operators
//! - Line tracking across whitespace, comments and multi-line strings
//! - The [`tokens::TokenSource`] seam the parser pulls tokens through

pub mod lexer;
pub mod tokens;
