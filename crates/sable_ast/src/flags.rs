//! Flag sets carried by nodes and tokens.

use bitflags::bitflags;

bitflags! {
    /// Flags stored on every node. The low bits describe the node
    /// itself; the context bits record the ambient parser state at the
    /// moment the node was created, which the incremental re-parser
    /// compares before reusing a node.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct NodeFlags: u32 {
        const NONE = 0;
        /// Declared with `let`.
        const LET = 1 << 0;
        /// Declared with `const`.
        const CONST = 1 << 1;
        /// A namespace declaration nested behind a dotted name.
        const NESTED_NAMESPACE = 1 << 2;
        /// `in` is not an operator here (for-statement initializers).
        const DISALLOW_IN_CONTEXT = 1 << 3;
        /// `yield` is an expression here (generator bodies).
        const YIELD_CONTEXT = 1 << 4;
        /// Parsing a decorator expression.
        const DECORATOR_CONTEXT = 1 << 5;
        /// `await` is an operator here (async bodies, module top level).
        const AWAIT_CONTEXT = 1 << 6;
        /// A parse error was reported while this node was unfinished.
        const THIS_NODE_HAS_ERROR = 1 << 7;
        /// The node overlaps the changed span of an incremental update.
        /// Set on nodes of the previous tree only.
        const INTERSECTS_CHANGE = 1 << 8;
        /// Subtree error information below has been computed.
        const HAS_AGGREGATED_CHILD_DATA = 1 << 9;
        /// Some node in this subtree carries THIS_NODE_HAS_ERROR.
        /// Meaningful only together with HAS_AGGREGATED_CHILD_DATA.
        const SUBTREE_HAS_ERROR = 1 << 10;

        const CONTEXT_FLAGS = Self::DISALLOW_IN_CONTEXT.bits()
            | Self::YIELD_CONTEXT.bits()
            | Self::DECORATOR_CONTEXT.bits()
            | Self::AWAIT_CONTEXT.bits();
    }
}

bitflags! {
    /// Flags describing the token the scanner most recently produced.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TokenFlags: u16 {
        const NONE = 0;
        /// A line break occurred in the trivia before this token.
        const PRECEDING_LINE_BREAK = 1 << 0;
        /// A `/** */` comment occurred in the trivia before this token.
        const PRECEDING_DOC_COMMENT = 1 << 1;
        /// The literal ran into end of file before its closing delimiter.
        const UNTERMINATED = 1 << 2;
        /// Numeric literal written with an exponent.
        const SCIENTIFIC = 1 << 3;
        /// Numeric literal written with a `0x` prefix.
        const HEX_SPECIFIER = 1 << 4;
        /// Numeric literal written with a `0b` prefix.
        const BINARY_SPECIFIER = 1 << 5;
        /// Numeric literal written with a `0o` prefix.
        const OCTAL_SPECIFIER = 1 << 6;
        /// Numeric literal containing `_` separators.
        const CONTAINS_SEPARATOR = 1 << 7;
        /// The file opened with a `#!` line before this token.
        const PRECEDING_SHEBANG = 1 << 8;

        const NUMERIC_LITERAL_FLAGS = Self::SCIENTIFIC.bits()
            | Self::HEX_SPECIFIER.bits()
            | Self::BINARY_SPECIFIER.bits()
            | Self::OCTAL_SPECIFIER.bits()
            | Self::CONTAINS_SEPARATOR.bits();
    }
}

bitflags! {
    /// Modifier keywords seen on a declaration, as a set.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ModifierFlags: u16 {
        const NONE = 0;
        const EXPORT = 1 << 0;
        const AMBIENT = 1 << 1;
        const PUBLIC = 1 << 2;
        const PRIVATE = 1 << 3;
        const PROTECTED = 1 << 4;
        const STATIC = 1 << 5;
        const READONLY = 1 << 6;
        const ABSTRACT = 1 << 7;
        const ASYNC = 1 << 8;
        const DEFAULT = 1 << 9;
        const CONST = 1 << 10;

        const ACCESSIBILITY = Self::PUBLIC.bits() | Self::PRIVATE.bits() | Self::PROTECTED.bits();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_flags_subset() {
        let flags = NodeFlags::YIELD_CONTEXT | NodeFlags::THIS_NODE_HAS_ERROR;
        assert_eq!(
            flags & NodeFlags::CONTEXT_FLAGS,
            NodeFlags::YIELD_CONTEXT
        );
    }
}
