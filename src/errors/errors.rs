use std::fmt::Display;

use thiserror::Error;

use crate::lexer::tokens::TokenKind;

/// A single diagnostic: what went wrong and the 1-based line it was found on.
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    internal_error: ErrorImpl,
    line: usize,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, line: usize) -> Self {
        Error {
            internal_error: error_impl,
            line,
        }
    }

    pub fn get_line(&self) -> usize {
        self.line
    }

    pub fn get_kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnterminatedString => "UnterminatedString",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedContinuation { .. } => "UnexpectedContinuation",
            ErrorImpl::ExpectedToken { .. } => "ExpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::InvalidAssignmentTarget { .. } => "InvalidAssignmentTarget",
            ErrorImpl::DefaultParameterOrder { .. } => "DefaultParameterOrder",
            ErrorImpl::DuplicateDefault { .. } => "DuplicateDefault",
            ErrorImpl::DuplicateRestPattern => "DuplicateRestPattern",
            ErrorImpl::RestPatternNotLast => "RestPatternNotLast",
            ErrorImpl::ExpectedRestIdentifier { .. } => "ExpectedRestIdentifier",
            ErrorImpl::UnclosedBlock => "UnclosedBlock",
            ErrorImpl::UnclosedConstruct { .. } => "UnclosedConstruct",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnterminatedString => {
                ErrorTip::Suggestion(String::from("Close the string with a matching quote"))
            }
            ErrorImpl::UnexpectedToken { .. } => {
                ErrorTip::Suggestion(String::from("An expression was expected here"))
            }
            ErrorImpl::UnexpectedContinuation { .. } => ErrorTip::Suggestion(String::from(
                "This token cannot continue the expression before it, did you miss a semicolon?",
            )),
            ErrorImpl::ExpectedToken { expected, .. } => {
                ErrorTip::Suggestion(format!("Insert the missing {}", expected))
            }
            ErrorImpl::UnexpectedTokenDetailed { .. } => ErrorTip::None,
            ErrorImpl::NumberParseError { .. } => {
                ErrorTip::Suggestion(String::from("Is it above the 64-bit integer limit?"))
            }
            ErrorImpl::InvalidAssignmentTarget { .. } => ErrorTip::Suggestion(String::from(
                "Only names, indexed values and properties can be assigned to",
            )),
            ErrorImpl::DefaultParameterOrder { .. } => ErrorTip::Suggestion(String::from(
                "Move parameters with default values to the end of the list",
            )),
            ErrorImpl::DuplicateDefault { .. } => {
                ErrorTip::Suggestion(String::from("Merge the default cases into one"))
            }
            ErrorImpl::DuplicateRestPattern | ErrorImpl::RestPatternNotLast => {
                ErrorTip::Suggestion(String::from(
                    "A single `...name` binding may appear as the last element",
                ))
            }
            ErrorImpl::ExpectedRestIdentifier { .. } => {
                ErrorTip::Suggestion(String::from("Write `...name` to bind the remaining elements"))
            }
            ErrorImpl::UnclosedBlock | ErrorImpl::UnclosedConstruct { .. } => {
                ErrorTip::Suggestion(String::from("Add the missing `}`"))
            }
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Line {}: {}", self.line, self.internal_error)
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unrecognised character {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("no prefix parse function for {token}")]
    UnexpectedToken { token: TokenKind },
    #[error("no infix parse function for {token}")]
    UnexpectedContinuation { token: TokenKind },
    #[error("expected {expected}, got {found}")]
    ExpectedToken { expected: TokenKind, found: TokenKind },
    #[error("{message}, got {token}")]
    UnexpectedTokenDetailed { token: TokenKind, message: String },
    #[error("could not parse {token:?} as a number")]
    NumberParseError { token: String },
    #[error("expected an identifier or indexable expression on the left of `{operator}`, found {found:?}")]
    InvalidAssignmentTarget { operator: String, found: String },
    #[error("non-default parameter {parameter:?} cannot follow a default parameter")]
    DefaultParameterOrder { parameter: String },
    #[error("a switch can only have one default case, found {count}")]
    DuplicateDefault { count: usize },
    #[error("only one rest element is allowed in an array pattern")]
    DuplicateRestPattern,
    #[error("the rest element must be last in an array pattern")]
    RestPatternNotLast,
    #[error("expected an identifier after `...`, got {found}")]
    ExpectedRestIdentifier { found: TokenKind },
    #[error("unclosed block, expected `}}` before end of input")]
    UnclosedBlock,
    #[error("unclosed {construct}, expected `}}` before end of input")]
    UnclosedConstruct { construct: &'static str },
}
