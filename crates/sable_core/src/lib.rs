//! sable_core: Core utilities for the Sable parser.
//!
//! Provides text spans and change ranges, string interning, and arena
//! allocation used throughout the parsing pipeline.

pub mod arena;
pub mod error;
pub mod intern;
pub mod text;

// Re-export commonly used types
pub use arena::ParseArena;
pub use error::CoreError;
pub use intern::{InternedString, StringInterner};
pub use text::{TextChangeRange, TextRange, TextSpan};
