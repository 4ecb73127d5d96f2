//! sable_scanner: Lexer for Sable source text.
//!
//! Produces tokens from source text, with support for:
//! - Template literals
//! - Markup tokens (`.sax` files)
//! - Regular expression literals
//! - Unicode identifiers
//! - `//#` directives and `/** */` doc comment spans

pub mod chars;
mod scanner;

pub use scanner::{Scanner, ScannerState};
