#![allow(clippy::module_inception)]

use std::fmt::Display;

use crate::{
    ast::ast::Program,
    errors::errors::{Error, ErrorTip},
    lexer::lexer::tokenize,
    parser::parser::parse,
};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;

extern crate regex;

/// Lexes and parses `source` in one go.
///
/// A lexer error ends the job early; otherwise the program comes back with
/// every parse diagnostic, and an empty list means a clean parse.
pub fn parse_source(source: &str) -> Result<(Program, Vec<Error>), Error> {
    let tokens = tokenize(source.to_string())?;
    let (parser, program) = parse(tokens);
    Ok((program, parser.diagnostics().to_vec()))
}

/// Returns the text of the 1-based `line`, if the source has one.
pub fn get_line(source: &str, line: usize) -> Option<&str> {
    source.lines().nth(line.checked_sub(1)?)
}

/// A diagnostic paired with the source it was found in, printed with the
/// offending line underneath.
///
/// ```text
/// Error: ExpectedToken (Insert the missing CloseParen)
/// -> main.vint
///    |
///  3 | if (x > 1 {
///    | ^^^^^^^^^^^
/// Line 3: expected CloseParen, got OpenCurly
/// ```
pub struct Diagnostic<'a> {
    pub source: &'a str,
    pub file: &'a str,
    pub error: &'a Error,
}

impl Display for Diagnostic<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let line = self.error.get_line();
        let line_string = line.to_string();
        let padding = line_string.len() + 2;

        if let ErrorTip::None = self.error.get_tip() {
            writeln!(f, "Error: {}", self.error.get_error_name())?;
        } else {
            writeln!(
                f,
                "Error: {} ({})",
                self.error.get_error_name(),
                self.error.get_tip()
            )?;
        }
        writeln!(f, "-> {}", self.file)?;

        if let Some(text) = get_line(self.source, line) {
            let trimmed = text.trim();
            writeln!(f, "{:>padding$}", "|")?;
            writeln!(f, "{} | {}", line_string, trimmed)?;
            writeln!(f, "{:>padding$} {}", "|", "^".repeat(trimmed.len().max(1)))?;
        }

        write!(f, "{}", self.error)
    }
}

/// Renders `error` against `source` as a [`Diagnostic`].
pub fn render_diagnostic(source: &str, file: &str, error: &Error) -> String {
    Diagnostic {
        source,
        file,
        error,
    }
    .to_string()
}
