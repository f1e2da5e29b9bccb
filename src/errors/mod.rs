//! Diagnostics for the front end.
//!
//! This module defines the error types reported while lexing and parsing:
//!
//! - Error structures carrying the 1-based source line
//! - Specific error variants for each failure class
//! - `Line <n>: <message>` formatting and optional tips

pub mod errors;
