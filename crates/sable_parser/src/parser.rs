//! Parser state, token management, and speculation.
//!
//! The parser owns a scanner and a reference to the arena every node is
//! allocated in. Grammar productions live in sibling modules, each an
//! `impl` block on [`Parser`]: statements, expressions, types, markup,
//! and list machinery.
//!
//! Speculation is built on [`Checkpoint`]: `look_ahead` always rolls
//! back, `try_parse` rolls back only when the callback declines.
//! Rolling back truncates both scanner and parser diagnostics, so a
//! failed speculative branch leaves no trace.

use crate::incremental::SyntaxCursor;
use crate::lists::ParsingContext;
use sable_ast::flags::NodeFlags;
use sable_ast::node::*;
use sable_ast::syntax_kind::SyntaxKind;
use sable_core::arena::ParseArena;
use sable_core::intern::StringInterner;
use sable_core::text::TextPos;
use sable_diagnostics::{messages, Diagnostic, DiagnosticCollection, DiagnosticMessage};
use sable_scanner::{Scanner, ScannerState};

/// Nesting ceiling for statements and assignment-level expressions.
/// Past it the parser reports one error and synthesizes missing nodes
/// instead of recursing further.
pub(crate) const MAX_RECURSION_DEPTH: u32 = 1024;

/// Saved parser state for speculative parsing.
pub(crate) struct Checkpoint {
    scanner_state: ScannerState,
    current_token: SyntaxKind,
    prev_token_end: TextPos,
    diagnostics_len: usize,
    error_pending: bool,
}

pub struct Parser<'a> {
    pub(crate) arena: &'a ParseArena,
    pub(crate) scanner: Scanner,
    pub(crate) file_name: String,
    pub(crate) source_text: String,
    pub(crate) file_kind: FileKind,
    pub(crate) edition: Edition,
    /// Context bits stamped onto every node created while they are set.
    pub(crate) context_flags: NodeFlags,
    /// Parser-side diagnostics; scanner diagnostics are merged in at
    /// the end of the parse.
    pub(crate) diagnostics: DiagnosticCollection,
    /// Set when an error was reported since the last finished node; the
    /// next finished node takes the blame.
    pub(crate) error_pending: bool,
    pub(crate) recursion_depth: u32,
    pub(crate) node_count: usize,
    pub(crate) identifier_count: usize,
    pub(crate) interner: StringInterner,
    /// Bitmask of the list contexts currently being parsed, consulted
    /// during error recovery to decide whether to abort a list.
    pub(crate) parsing_context: ParsingContext,
    /// Present only during an incremental update.
    pub(crate) syntax_cursor: Option<SyntaxCursor<'a>>,
    pub(crate) current_token: SyntaxKind,
    /// End position of the last consumed token; the end of every
    /// finished node.
    pub(crate) prev_token_end: TextPos,
    pub(crate) directives: Vec<Directive>,
}

impl<'a> Parser<'a> {
    pub fn new(
        arena: &'a ParseArena,
        file_name: &str,
        source_text: &str,
        file_kind: FileKind,
        edition: Edition,
    ) -> Self {
        let mut scanner = Scanner::new(source_text);
        scanner.set_language_variant(file_kind.language_variant());
        Self {
            arena,
            scanner,
            file_name: file_name.to_string(),
            source_text: source_text.to_string(),
            file_kind,
            edition,
            context_flags: NodeFlags::NONE,
            diagnostics: DiagnosticCollection::new(),
            error_pending: false,
            recursion_depth: 0,
            node_count: 0,
            identifier_count: 0,
            interner: StringInterner::new(),
            parsing_context: ParsingContext::empty(),
            syntax_cursor: None,
            current_token: SyntaxKind::Unknown,
            prev_token_end: 0,
            directives: Vec::new(),
        }
    }

    pub(crate) fn with_interner(mut self, interner: StringInterner) -> Self {
        self.interner = interner;
        self
    }

    pub(crate) fn with_syntax_cursor(mut self, cursor: SyntaxCursor<'a>) -> Self {
        self.syntax_cursor = Some(cursor);
        self
    }

    // ========================================================================
    // Token management
    // ========================================================================

    #[inline]
    pub(crate) fn token(&self) -> SyntaxKind {
        self.current_token
    }

    pub(crate) fn next_token(&mut self) -> SyntaxKind {
        self.prev_token_end = self.scanner.token_end() as TextPos;
        self.current_token = self.scanner.scan();
        self.current_token
    }

    #[inline]
    pub(crate) fn token_pos(&self) -> TextPos {
        self.scanner.token_start() as TextPos
    }

    #[inline]
    pub(crate) fn token_end(&self) -> TextPos {
        self.scanner.token_end() as TextPos
    }

    #[inline]
    pub(crate) fn has_preceding_line_break(&self) -> bool {
        self.scanner.has_preceding_line_break()
    }

    /// Consume the current token into a tree token node.
    pub(crate) fn consume_token(&mut self) -> Token {
        let token = Token::new(
            self.current_token,
            self.token_pos(),
            self.token_end(),
            self.context_flags & NodeFlags::CONTEXT_FLAGS,
        );
        self.node_count += 1;
        self.next_token();
        token
    }

    /// Consume the current token if it has the expected kind. Otherwise
    /// report `'{kind}' expected` and synthesize a zero-width token at
    /// the current position.
    pub(crate) fn expect_token(&mut self, kind: SyntaxKind) -> Token {
        if self.current_token == kind {
            return self.consume_token();
        }
        self.error(
            &messages::_0_EXPECTED,
            &[kind.token_text().unwrap_or("token")],
        );
        self.node_count += 1;
        Token::new(
            kind,
            self.token_pos(),
            self.token_pos(),
            self.context_flags & NodeFlags::CONTEXT_FLAGS,
        )
    }

    /// Consume the current token if it has the given kind.
    pub(crate) fn parse_optional(&mut self, kind: SyntaxKind) -> bool {
        if self.current_token == kind {
            self.next_token();
            true
        } else {
            false
        }
    }

    pub(crate) fn parse_optional_token(&mut self, kind: SyntaxKind) -> Option<Token> {
        if self.current_token == kind {
            Some(self.consume_token())
        } else {
            None
        }
    }

    /// Whether a statement may end here without an explicit semicolon.
    pub(crate) fn can_parse_semicolon(&self) -> bool {
        match self.current_token {
            SyntaxKind::SemicolonToken
            | SyntaxKind::CloseBraceToken
            | SyntaxKind::EndOfFileToken => true,
            _ => self.has_preceding_line_break(),
        }
    }

    /// Consume a statement terminator, applying automatic semicolon
    /// insertion at `}`, end of file, and line breaks.
    pub(crate) fn parse_expected_semicolon(&mut self) {
        if self.current_token == SyntaxKind::SemicolonToken {
            self.next_token();
        } else if !self.can_parse_semicolon() {
            self.error(&messages::_0_EXPECTED, &[";"]);
        }
    }

    // ========================================================================
    // Errors
    // ========================================================================

    /// Report an error spanning the current token.
    pub(crate) fn error(&mut self, message: &DiagnosticMessage, args: &[&str]) {
        self.error_at(self.token_pos(), self.token_end(), message, args);
    }

    /// Report an error for an explicit range.
    pub(crate) fn error_at(
        &mut self,
        pos: TextPos,
        end: TextPos,
        message: &DiagnosticMessage,
        args: &[&str],
    ) {
        let span = sable_core::text::TextSpan::from_bounds(pos, end.max(pos));
        if self.diagnostics.add(Diagnostic::at(span, message, args)) {
            self.error_pending = true;
        }
    }

    // ========================================================================
    // Node construction
    // ========================================================================

    /// Finish a node spanning `pos` to the end of the last consumed
    /// token. Stamps the current context flags, and transfers a pending
    /// error report onto the node.
    pub(crate) fn finish_node(&mut self, kind: SyntaxKind, pos: TextPos) -> NodeData {
        self.finish_node_at(kind, pos, self.prev_token_end.max(pos))
    }

    pub(crate) fn finish_node_at(
        &mut self,
        kind: SyntaxKind,
        pos: TextPos,
        end: TextPos,
    ) -> NodeData {
        self.node_count += 1;
        let mut flags = self.context_flags & NodeFlags::CONTEXT_FLAGS;
        if self.error_pending {
            flags |= NodeFlags::THIS_NODE_HAS_ERROR;
            self.error_pending = false;
        }
        NodeData::new(kind, pos, end, flags)
    }

    pub(crate) fn alloc<T>(&self, node: T) -> &'a T {
        self.arena.alloc(node)
    }

    /// Build a node array from collected elements, spanning `pos` to
    /// the end of the last consumed token.
    pub(crate) fn make_node_array<T>(&self, elements: Vec<T>, pos: TextPos) -> NodeArray<'a, T> {
        NodeArray::new(pos, self.prev_token_end.max(pos), self.arena.alloc_vec(elements))
    }

    // ========================================================================
    // Context flags
    // ========================================================================

    #[inline]
    pub(crate) fn in_context(&self, flags: NodeFlags) -> bool {
        self.context_flags.intersects(flags)
    }

    pub(crate) fn set_context_flag(&mut self, flag: NodeFlags, value: bool) {
        if value {
            self.context_flags |= flag;
        } else {
            self.context_flags -= flag;
        }
    }

    /// Run `f` with the given context flags set, restoring the previous
    /// values afterwards.
    pub(crate) fn do_inside_of_context<T>(
        &mut self,
        flags: NodeFlags,
        f: impl FnOnce(&mut Self) -> T,
    ) -> T {
        let to_set = flags - self.context_flags;
        if to_set.is_empty() {
            return f(self);
        }
        self.context_flags |= to_set;
        let result = f(self);
        self.context_flags -= to_set;
        result
    }

    /// Run `f` with the given context flags cleared, restoring the
    /// previous values afterwards.
    pub(crate) fn do_outside_of_context<T>(
        &mut self,
        flags: NodeFlags,
        f: impl FnOnce(&mut Self) -> T,
    ) -> T {
        let to_clear = flags & self.context_flags;
        if to_clear.is_empty() {
            return f(self);
        }
        self.context_flags -= to_clear;
        let result = f(self);
        self.context_flags |= to_clear;
        result
    }

    pub(crate) fn allow_in_and<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        self.do_outside_of_context(NodeFlags::DISALLOW_IN_CONTEXT, f)
    }

    pub(crate) fn disallow_in_and<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        self.do_inside_of_context(NodeFlags::DISALLOW_IN_CONTEXT, f)
    }

    #[inline]
    pub(crate) fn in_disallow_in_context(&self) -> bool {
        self.in_context(NodeFlags::DISALLOW_IN_CONTEXT)
    }

    #[inline]
    pub(crate) fn in_yield_context(&self) -> bool {
        self.in_context(NodeFlags::YIELD_CONTEXT)
    }

    #[inline]
    pub(crate) fn in_await_context(&self) -> bool {
        self.in_context(NodeFlags::AWAIT_CONTEXT)
    }

    // ========================================================================
    // Speculation
    // ========================================================================

    pub(crate) fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            scanner_state: self.scanner.save_state(),
            current_token: self.current_token,
            prev_token_end: self.prev_token_end,
            diagnostics_len: self.diagnostics.len(),
            error_pending: self.error_pending,
        }
    }

    pub(crate) fn restore(&mut self, checkpoint: Checkpoint) {
        self.scanner.restore_state(checkpoint.scanner_state);
        self.current_token = checkpoint.current_token;
        self.prev_token_end = checkpoint.prev_token_end;
        self.diagnostics.truncate(checkpoint.diagnostics_len);
        self.error_pending = checkpoint.error_pending;
    }

    /// Run `f` and roll the parser back afterwards, whatever it did.
    pub(crate) fn look_ahead<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let state = self.checkpoint();
        let flags_before = self.context_flags;
        let result = f(self);
        self.restore(state);
        debug_assert_eq!(self.context_flags, flags_before);
        result
    }

    /// Run `f`, keeping its progress if it returns `Some` and rolling
    /// back otherwise.
    pub(crate) fn try_parse<T>(&mut self, f: impl FnOnce(&mut Self) -> Option<T>) -> Option<T> {
        let state = self.checkpoint();
        let flags_before = self.context_flags;
        let result = f(self);
        if result.is_none() {
            self.restore(state);
        }
        debug_assert_eq!(self.context_flags, flags_before);
        result
    }

    /// Guarded recursion entry. Reports once when source nesting
    /// exceeds the limit and tells the caller to bail out with a
    /// missing node instead of descending.
    pub(crate) fn enter_recursion(&mut self) -> bool {
        self.recursion_depth += 1;
        if self.recursion_depth == MAX_RECURSION_DEPTH {
            self.error(&messages::SOURCE_TOO_DEEPLY_NESTED, &[]);
        }
        self.recursion_depth < MAX_RECURSION_DEPTH
    }

    #[inline]
    pub(crate) fn exit_recursion(&mut self) {
        self.recursion_depth -= 1;
    }

    // ========================================================================
    // Identifiers and names
    // ========================================================================

    /// Whether the current token can begin an identifier here. `yield`
    /// and `await` only count outside their respective contexts.
    pub(crate) fn is_identifier_token(&self) -> bool {
        match self.current_token {
            SyntaxKind::Identifier => true,
            SyntaxKind::YieldKeyword => !self.in_yield_context(),
            SyntaxKind::AwaitKeyword => !self.in_await_context(),
            kind => kind.is_contextual_keyword(),
        }
    }

    pub(crate) fn intern_identifier(&mut self, pos: TextPos, end: TextPos) -> &'a Identifier<'a> {
        let value = self.scanner.token_value().to_string();
        let original_keyword_kind = if self.current_token != SyntaxKind::Identifier {
            Some(self.current_token)
        } else {
            None
        };
        self.next_token();
        self.identifier_count += 1;
        let text = self.interner.intern(&value);
        let text_str = self.arena.alloc_str(&value);
        let data = self.finish_node_at(SyntaxKind::Identifier, pos, end);
        self.alloc(Identifier {
            data,
            text,
            text_str,
            original_keyword_kind,
        })
    }

    /// Parse an identifier, reporting `Identifier expected` and
    /// synthesizing a missing one when the current token cannot be one.
    pub(crate) fn parse_identifier(&mut self) -> &'a Identifier<'a> {
        if self.is_identifier_token() {
            let pos = self.token_pos();
            let end = self.token_end();
            return self.intern_identifier(pos, end);
        }
        self.error(&messages::IDENTIFIER_EXPECTED, &[]);
        self.create_missing_identifier()
    }

    /// Parse any identifier or keyword as a name (member names, markup
    /// attribute names).
    pub(crate) fn parse_identifier_name(&mut self) -> &'a Identifier<'a> {
        if self.current_token == SyntaxKind::Identifier || self.current_token.is_keyword() {
            let pos = self.token_pos();
            let end = self.token_end();
            return self.intern_identifier(pos, end);
        }
        self.error(&messages::IDENTIFIER_EXPECTED, &[]);
        self.create_missing_identifier()
    }

    /// A zero-width identifier at the current position. Does not
    /// consume any input.
    pub(crate) fn create_missing_identifier(&mut self) -> &'a Identifier<'a> {
        let pos = self.token_pos();
        self.identifier_count += 1;
        let text = self.interner.intern("");
        let data = self.finish_node_at(SyntaxKind::Identifier, pos, pos);
        self.alloc(Identifier {
            data,
            text,
            text_str: "",
            original_keyword_kind: None,
        })
    }

    /// Parse a dotted name: `a`, `a.b`, `a.b.c`.
    pub(crate) fn parse_entity_name(&mut self) -> EntityName<'a> {
        let pos = self.token_pos();
        let mut entity = EntityName::Identifier(self.parse_identifier());
        while self.parse_optional(SyntaxKind::DotToken) {
            let right = self.parse_identifier_name();
            let data = self.finish_node(SyntaxKind::QualifiedName, pos);
            entity = EntityName::Qualified(self.alloc(QualifiedName {
                data,
                left: entity,
                right,
            }));
        }
        entity
    }

    /// Parse a property name: identifier, string or numeric literal, or
    /// a computed `[expr]` name.
    pub(crate) fn parse_property_name(&mut self) -> PropertyName<'a> {
        match self.current_token {
            SyntaxKind::StringLiteral => {
                let pos = self.token_pos();
                let end = self.token_end();
                let text = self.arena.alloc_str(self.scanner.token_value());
                self.next_token();
                let data = self.finish_node_at(SyntaxKind::StringLiteral, pos, end);
                PropertyName::String(self.alloc(StringLiteral { data, text }))
            }
            SyntaxKind::NumericLiteral => {
                let pos = self.token_pos();
                let end = self.token_end();
                let text = self.arena.alloc_str(self.scanner.token_value());
                self.next_token();
                let data = self.finish_node_at(SyntaxKind::NumericLiteral, pos, end);
                PropertyName::Numeric(self.alloc(NumericLiteral { data, text }))
            }
            SyntaxKind::OpenBracketToken => {
                let pos = self.token_pos();
                self.next_token();
                let expression = self.allow_in_and(|p| p.parse_assignment_expression_or_higher());
                self.expect_token(SyntaxKind::CloseBracketToken);
                let data = self.finish_node(SyntaxKind::ComputedPropertyName, pos);
                PropertyName::Computed(self.alloc(ComputedPropertyName { data, expression }))
            }
            _ => PropertyName::Identifier(self.parse_identifier_name()),
        }
    }

    // ========================================================================
    // Source file
    // ========================================================================

    /// Parse the whole file into a source file node. Always returns a
    /// complete tree; syntax errors are recorded on the side.
    pub fn parse_source_file(mut self) -> SourceFile<'a> {
        if self.edition == Edition::Current {
            self.context_flags |= NodeFlags::AWAIT_CONTEXT;
        }
        self.next_token();

        // Leading trivia is consumed now, so file-level directives are
        // available. The edition directive must win before any
        // statement parses.
        self.apply_leading_directives();

        let statements =
            self.parse_list(ParsingContext::SOURCE_ELEMENTS, |p| p.parse_statement());
        let end_of_file_token = Token::new(
            SyntaxKind::EndOfFileToken,
            self.token_pos(),
            self.token_end(),
            NodeFlags::NONE,
        );

        let text_len = self.scanner.text_len() as TextPos;
        let data = self.finish_node_at(SyntaxKind::SourceFile, 0, text_len);

        let doc_comments = self.parse_collected_doc_comments();
        let mut directives = std::mem::take(&mut self.directives);
        directives.extend(self.scanner.take_directives());

        let mut collected = self.scanner.take_diagnostics();
        collected.extend(std::mem::take(&mut self.diagnostics));
        collected.sort();
        let file_name = self.file_name.clone();
        let diagnostics = collected
            .into_diagnostics()
            .into_iter()
            .map(|mut d| {
                d.file = Some(file_name.clone());
                d
            })
            .collect();

        SourceFile {
            data,
            statements,
            end_of_file_token,
            file_name: self.file_name,
            text: self.source_text,
            file_kind: self.file_kind,
            language_variant: self.file_kind.language_variant(),
            edition: self.edition,
            diagnostics,
            doc_comments,
            directives,
            node_count: self.node_count,
            identifier_count: self.identifier_count,
            identifiers: self.interner,
        }
    }

    fn apply_leading_directives(&mut self) {
        self.directives = self.scanner.take_directives();
        for directive in &self.directives {
            if directive.name == "edition" && directive.value == "legacy" {
                self.edition = Edition::Legacy;
                self.context_flags -= NodeFlags::AWAIT_CONTEXT;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser<'a>(arena: &'a ParseArena, text: &str) -> Parser<'a> {
        Parser::new(arena, "test.sa", text, FileKind::Standard, Edition::Current)
    }

    #[test]
    fn test_expect_token_synthesizes_missing() {
        let arena = ParseArena::new();
        let mut p = parser(&arena, "let");
        p.next_token();
        let token = p.expect_token(SyntaxKind::SemicolonToken);
        assert_eq!(token.kind(), SyntaxKind::SemicolonToken);
        assert!(token.data.is_missing());
        assert_eq!(p.diagnostics.len(), 1);
    }

    #[test]
    fn test_look_ahead_restores_everything() {
        let arena = ParseArena::new();
        let mut p = parser(&arena, "a b c");
        p.next_token();
        let seen = p.look_ahead(|p| {
            p.next_token();
            p.error(&messages::EXPRESSION_EXPECTED, &[]);
            p.token()
        });
        assert_eq!(seen, SyntaxKind::Identifier);
        assert_eq!(p.token_pos(), 0);
        assert!(p.diagnostics.is_empty());
        assert!(!p.error_pending);
    }

    #[test]
    fn test_try_parse_keeps_progress_on_success() {
        let arena = ParseArena::new();
        let mut p = parser(&arena, "a b");
        p.next_token();
        let result = p.try_parse(|p| {
            p.next_token();
            Some(p.token_pos())
        });
        assert_eq!(result, Some(2));
        assert_eq!(p.token_pos(), 2);
    }

    #[test]
    fn test_error_pending_transfers_to_finished_node() {
        let arena = ParseArena::new();
        let mut p = parser(&arena, "x");
        p.next_token();
        p.error(&messages::EXPRESSION_EXPECTED, &[]);
        let data = p.finish_node(SyntaxKind::ExpressionStatement, 0);
        assert!(data.flags().contains(NodeFlags::THIS_NODE_HAS_ERROR));
        assert!(!p.error_pending);
        let clean = p.finish_node(SyntaxKind::ExpressionStatement, 0);
        assert!(!clean.flags().contains(NodeFlags::THIS_NODE_HAS_ERROR));
    }
}
