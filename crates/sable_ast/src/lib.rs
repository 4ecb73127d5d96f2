//! Syntax tree definitions for the Sable language.
//!
//! Nodes are arena-allocated and immutable in shape; positions and
//! flags live in `Cell`s so the incremental re-parser can shift a
//! surviving subtree without rebuilding it. Enums such as
//! [`node::Statement`] and [`node::Expression`] are thin `Copy`
//! wrappers over arena references, so trees are cheap to hand around.

pub mod flags;
pub mod node;
pub mod parents;
pub mod syntax_kind;
pub mod walk;

pub use flags::{ModifierFlags, NodeFlags, TokenFlags};
pub use node::*;
pub use parents::ParentLinks;
pub use syntax_kind::SyntaxKind;
pub use walk::{AstWalker, WalkControl};
