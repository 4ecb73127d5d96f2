//! The Sable scanner.
//!
//! Converts source text into a stream of tokens for the parser. All
//! positions are character offsets into the source text. The scanner is
//! fully restorable: [`Scanner::save_state`] and
//! [`Scanner::restore_state`] capture everything the parser needs for
//! speculative parsing, including the number of diagnostics reported so
//! far.

use crate::chars::*;
use sable_ast::flags::TokenFlags;
use sable_ast::node::{Directive, LanguageVariant};
use sable_ast::syntax_kind::SyntaxKind;
use sable_core::text::TextSpan;
use sable_diagnostics::{messages, Diagnostic, DiagnosticCollection, DiagnosticMessage};

/// Saved scanner state for speculative parsing.
pub struct ScannerState {
    pub pos: usize,
    pub token_start: usize,
    pub token: SyntaxKind,
    pub token_value: String,
    pub token_flags: TokenFlags,
    pub diagnostics_len: usize,
}

pub struct Scanner {
    /// The source text being scanned.
    text: Vec<char>,
    /// Current position in the text (end of the current token).
    pos: usize,
    /// Start of the current token (after leading trivia).
    token_start: usize,
    /// The current token kind.
    token: SyntaxKind,
    /// The text of the current token.
    token_value: String,
    /// Token flags for the current token.
    token_flags: TokenFlags,
    /// Whether `<` in expression position opens markup.
    language_variant: LanguageVariant,
    /// Length of a leading `#!` line, zero if there is none.
    shebang_len: usize,
    /// `//# key value` directives seen in trivia, in source order.
    directives: Vec<Directive>,
    /// Spans of `/** */` comments seen in trivia, in source order.
    doc_comment_spans: Vec<TextSpan>,
    /// Accumulated diagnostics.
    diagnostics: DiagnosticCollection,
}

impl Scanner {
    pub fn new(text: &str) -> Self {
        let shebang_len = if text.starts_with("#!") {
            let line_end = memchr::memchr(b'\n', text.as_bytes()).unwrap_or(text.len());
            text[..line_end].chars().count()
        } else {
            0
        };
        Self {
            text: text.chars().collect(),
            pos: 0,
            token_start: 0,
            token: SyntaxKind::Unknown,
            token_value: String::new(),
            token_flags: TokenFlags::NONE,
            language_variant: LanguageVariant::Standard,
            shebang_len,
            directives: Vec::new(),
            doc_comment_spans: Vec::new(),
            diagnostics: DiagnosticCollection::new(),
        }
    }

    pub fn set_language_variant(&mut self, variant: LanguageVariant) {
        self.language_variant = variant;
    }

    pub fn language_variant(&self) -> LanguageVariant {
        self.language_variant
    }

    /// Get the full source text length, in characters.
    pub fn text_len(&self) -> usize {
        self.text.len()
    }

    /// Look ahead: save state, call f, always restore, return the result.
    pub fn look_ahead<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let state = self.save_state();
        let result = f(self);
        self.restore_state(state);
        result
    }

    /// Try scanning: save state, call f, restore only if f returns None.
    pub fn try_scan<T>(&mut self, f: impl FnOnce(&mut Self) -> Option<T>) -> Option<T> {
        let state = self.save_state();
        let result = f(self);
        if result.is_none() {
            self.restore_state(state);
        }
        result
    }

    #[inline]
    pub fn token(&self) -> SyntaxKind {
        self.token
    }

    #[inline]
    pub fn token_value(&self) -> &str {
        &self.token_value
    }

    /// Start position of the current token, after trivia.
    #[inline]
    pub fn token_start(&self) -> usize {
        self.token_start
    }

    /// End position of the current token.
    #[inline]
    pub fn token_end(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn token_flags(&self) -> TokenFlags {
        self.token_flags
    }

    #[inline]
    pub fn has_preceding_line_break(&self) -> bool {
        self.token_flags.contains(TokenFlags::PRECEDING_LINE_BREAK)
    }

    #[inline]
    pub fn has_preceding_doc_comment(&self) -> bool {
        self.token_flags.contains(TokenFlags::PRECEDING_DOC_COMMENT)
    }

    pub fn diagnostics(&self) -> &DiagnosticCollection {
        &self.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> DiagnosticCollection {
        std::mem::take(&mut self.diagnostics)
    }

    pub fn take_directives(&mut self) -> Vec<Directive> {
        std::mem::take(&mut self.directives)
    }

    pub fn doc_comment_spans(&self) -> &[TextSpan] {
        &self.doc_comment_spans
    }

    pub fn take_doc_comment_spans(&mut self) -> Vec<TextSpan> {
        std::mem::take(&mut self.doc_comment_spans)
    }

    pub fn save_state(&self) -> ScannerState {
        ScannerState {
            pos: self.pos,
            token_start: self.token_start,
            token: self.token,
            token_value: self.token_value.clone(),
            token_flags: self.token_flags,
            diagnostics_len: self.diagnostics.len(),
        }
    }

    /// Restore a saved state, dropping any diagnostics reported since.
    pub fn restore_state(&mut self, state: ScannerState) {
        self.pos = state.pos;
        self.token_start = state.token_start;
        self.token = state.token;
        self.token_value = state.token_value;
        self.token_flags = state.token_flags;
        self.diagnostics.truncate(state.diagnostics_len);
    }

    /// Reset the scanner to a specific position. The next `scan` call
    /// produces the token starting at or after `pos`.
    pub fn set_pos(&mut self, pos: usize) {
        self.pos = pos;
        self.token_start = pos;
        self.token = SyntaxKind::Unknown;
        self.token_value.clear();
        self.token_flags = TokenFlags::NONE;
    }

    // ========================================================================
    // Core scanning
    // ========================================================================

    #[inline]
    fn current_char(&self) -> Option<char> {
        self.text.get(self.pos).copied()
    }

    #[inline]
    fn char_at(&self, offset: usize) -> Option<char> {
        self.text.get(self.pos + offset).copied()
    }

    #[inline]
    fn is_eof(&self) -> bool {
        self.pos >= self.text.len()
    }

    fn error(&mut self, message: &DiagnosticMessage, args: &[&str]) {
        self.error_at(self.token_start, self.pos - self.token_start, message, args);
    }

    fn error_at(&mut self, start: usize, length: usize, message: &DiagnosticMessage, args: &[&str]) {
        self.diagnostics.add(Diagnostic::at(
            TextSpan::new(start as u32, length as u32),
            message,
            args,
        ));
    }

    /// Skip whitespace and comments, setting token flags for line
    /// breaks, doc comments, and a leading shebang, and collecting
    /// `//#` directives.
    fn skip_trivia(&mut self) {
        if self.pos == 0 && self.shebang_len > 0 {
            self.pos = self.shebang_len;
            self.token_flags |= TokenFlags::PRECEDING_SHEBANG;
        }
        loop {
            if self.is_eof() {
                return;
            }
            let ch = self.text[self.pos];
            match ch {
                '\r' => {
                    self.token_flags |= TokenFlags::PRECEDING_LINE_BREAK;
                    self.pos += 1;
                    if self.current_char() == Some('\n') {
                        self.pos += 1;
                    }
                }
                '\n' | '\u{2028}' | '\u{2029}' => {
                    self.token_flags |= TokenFlags::PRECEDING_LINE_BREAK;
                    self.pos += 1;
                }
                '/' => {
                    if self.char_at(1) == Some('/') {
                        self.skip_single_line_comment();
                    } else if self.char_at(1) == Some('*') {
                        self.skip_multi_line_comment();
                    } else {
                        return;
                    }
                }
                c if is_white_space_single_line(c) => {
                    self.pos += 1;
                }
                '<' | '>' | '=' | '|' if self.is_conflict_marker_trivia() => {
                    self.skip_conflict_marker();
                }
                _ => return,
            }
        }
    }

    fn skip_single_line_comment(&mut self) {
        let start = self.pos;
        self.pos += 2;
        let is_directive = self.current_char() == Some('#');
        while !self.is_eof() && !is_line_break(self.text[self.pos]) {
            self.pos += 1;
        }
        if is_directive {
            self.record_directive(start, self.pos);
        }
    }

    /// Parse a `//# key value` comment into a directive. Comments with
    /// no key after the `#` are ordinary comments.
    fn record_directive(&mut self, start: usize, end: usize) {
        let mut pos = start + 3;
        while pos < end && is_white_space_single_line(self.text[pos]) {
            pos += 1;
        }
        let name_start = pos;
        while pos < end && (is_identifier_part(self.text[pos]) || self.text[pos] == '-') {
            pos += 1;
        }
        if pos == name_start {
            return;
        }
        let name: String = self.text[name_start..pos].iter().collect();
        while pos < end && is_white_space_single_line(self.text[pos]) {
            pos += 1;
        }
        let mut value_end = end;
        while value_end > pos && is_white_space_single_line(self.text[value_end - 1]) {
            value_end -= 1;
        }
        let value: String = self.text[pos..value_end].iter().collect();
        self.directives.push(Directive {
            pos: start as u32,
            end: end as u32,
            name,
            value,
        });
    }

    fn skip_multi_line_comment(&mut self) {
        let start = self.pos;
        let is_doc_comment = self.char_at(2) == Some('*') && self.char_at(3) != Some('/');
        self.pos += 2;
        let mut terminated = false;
        while !self.is_eof() {
            if self.text[self.pos] == '*' && self.char_at(1) == Some('/') {
                self.pos += 2;
                terminated = true;
                break;
            }
            if is_line_break(self.text[self.pos]) {
                self.token_flags |= TokenFlags::PRECEDING_LINE_BREAK;
            }
            self.pos += 1;
        }
        if !terminated {
            self.error_at(self.pos, 0, &messages::ASTERISK_SLASH_EXPECTED, &[]);
        }
        if is_doc_comment {
            self.token_flags |= TokenFlags::PRECEDING_DOC_COMMENT;
            self.doc_comment_spans
                .push(TextSpan::new(start as u32, (self.pos - start) as u32));
        }
    }

    /// Scan the next token and return its kind.
    pub fn scan(&mut self) -> SyntaxKind {
        self.token_flags = TokenFlags::NONE;
        self.token_value.clear();

        self.skip_trivia();
        self.token_start = self.pos;

        if self.is_eof() {
            self.token = SyntaxKind::EndOfFileToken;
            return self.token;
        }

        let ch = self.text[self.pos];
        self.token = match ch {
            '(' => { self.pos += 1; SyntaxKind::OpenParenToken }
            ')' => { self.pos += 1; SyntaxKind::CloseParenToken }
            '{' => { self.pos += 1; SyntaxKind::OpenBraceToken }
            '}' => { self.pos += 1; SyntaxKind::CloseBraceToken }
            '[' => { self.pos += 1; SyntaxKind::OpenBracketToken }
            ']' => { self.pos += 1; SyntaxKind::CloseBracketToken }
            ';' => { self.pos += 1; SyntaxKind::SemicolonToken }
            ',' => { self.pos += 1; SyntaxKind::CommaToken }
            '~' => { self.pos += 1; SyntaxKind::TildeToken }
            '@' => { self.pos += 1; SyntaxKind::AtToken }
            '#' => self.scan_hash(),

            '.' => self.scan_dot(),
            ':' => { self.pos += 1; SyntaxKind::ColonToken }
            '?' => self.scan_question(),
            '<' => self.scan_less_than(),
            '>' => { self.pos += 1; SyntaxKind::GreaterThanToken }
            '=' => self.scan_equals(),
            '!' => self.scan_exclamation(),
            '+' => self.scan_plus(),
            '-' => self.scan_minus(),
            '*' => self.scan_asterisk(),
            '/' => self.scan_slash(),
            '%' => self.scan_percent(),
            '&' => self.scan_ampersand(),
            '|' => self.scan_bar(),
            '^' => self.scan_caret(),

            '\'' | '"' => self.scan_string_literal(ch),
            '`' => self.scan_template_literal(),

            '0'..='9' => self.scan_number(),

            _ if is_identifier_start(ch) => self.scan_identifier(),

            _ => {
                self.pos += 1;
                self.error_at(self.token_start, 1, &messages::INVALID_CHARACTER, &[]);
                SyntaxKind::Unknown
            }
        };

        self.token
    }

    // ========================================================================
    // Token-specific scanning
    // ========================================================================

    fn scan_hash(&mut self) -> SyntaxKind {
        if self.char_at(1).is_some_and(is_identifier_start) {
            self.pos += 1;
            self.scan_identifier();
            self.token_value.insert(0, '#');
            SyntaxKind::PrivateIdentifier
        } else {
            self.pos += 1;
            SyntaxKind::HashToken
        }
    }

    fn scan_dot(&mut self) -> SyntaxKind {
        if self.char_at(1) == Some('.') && self.char_at(2) == Some('.') {
            self.pos += 3;
            SyntaxKind::DotDotDotToken
        } else if self.char_at(1).is_some_and(is_digit) {
            self.scan_number()
        } else {
            self.pos += 1;
            SyntaxKind::DotToken
        }
    }

    fn scan_question(&mut self) -> SyntaxKind {
        if self.char_at(1) == Some('?') {
            if self.char_at(2) == Some('=') {
                self.pos += 3;
                SyntaxKind::QuestionQuestionEqualsToken
            } else {
                self.pos += 2;
                SyntaxKind::QuestionQuestionToken
            }
        } else if self.char_at(1) == Some('.') && !self.char_at(2).is_some_and(is_digit) {
            self.pos += 2;
            SyntaxKind::QuestionDotToken
        } else {
            self.pos += 1;
            SyntaxKind::QuestionToken
        }
    }

    fn scan_less_than(&mut self) -> SyntaxKind {
        if self.char_at(1) == Some('<') {
            if self.char_at(2) == Some('=') {
                self.pos += 3;
                SyntaxKind::LessThanLessThanEqualsToken
            } else {
                self.pos += 2;
                SyntaxKind::LessThanLessThanToken
            }
        } else if self.char_at(1) == Some('=') {
            self.pos += 2;
            SyntaxKind::LessThanEqualsToken
        } else if self.char_at(1) == Some('/') {
            self.pos += 2;
            SyntaxKind::LessThanSlashToken
        } else {
            self.pos += 1;
            SyntaxKind::LessThanToken
        }
    }

    fn scan_equals(&mut self) -> SyntaxKind {
        if self.char_at(1) == Some('=') {
            if self.char_at(2) == Some('=') {
                self.pos += 3;
                SyntaxKind::EqualsEqualsEqualsToken
            } else {
                self.pos += 2;
                SyntaxKind::EqualsEqualsToken
            }
        } else if self.char_at(1) == Some('>') {
            self.pos += 2;
            SyntaxKind::EqualsGreaterThanToken
        } else {
            self.pos += 1;
            SyntaxKind::EqualsToken
        }
    }

    fn scan_exclamation(&mut self) -> SyntaxKind {
        if self.char_at(1) == Some('=') {
            if self.char_at(2) == Some('=') {
                self.pos += 3;
                SyntaxKind::ExclamationEqualsEqualsToken
            } else {
                self.pos += 2;
                SyntaxKind::ExclamationEqualsToken
            }
        } else {
            self.pos += 1;
            SyntaxKind::ExclamationToken
        }
    }

    fn scan_plus(&mut self) -> SyntaxKind {
        if self.char_at(1) == Some('+') {
            self.pos += 2;
            SyntaxKind::PlusPlusToken
        } else if self.char_at(1) == Some('=') {
            self.pos += 2;
            SyntaxKind::PlusEqualsToken
        } else {
            self.pos += 1;
            SyntaxKind::PlusToken
        }
    }

    fn scan_minus(&mut self) -> SyntaxKind {
        if self.char_at(1) == Some('-') {
            self.pos += 2;
            SyntaxKind::MinusMinusToken
        } else if self.char_at(1) == Some('=') {
            self.pos += 2;
            SyntaxKind::MinusEqualsToken
        } else {
            self.pos += 1;
            SyntaxKind::MinusToken
        }
    }

    fn scan_asterisk(&mut self) -> SyntaxKind {
        if self.char_at(1) == Some('*') {
            if self.char_at(2) == Some('=') {
                self.pos += 3;
                SyntaxKind::AsteriskAsteriskEqualsToken
            } else {
                self.pos += 2;
                SyntaxKind::AsteriskAsteriskToken
            }
        } else if self.char_at(1) == Some('=') {
            self.pos += 2;
            SyntaxKind::AsteriskEqualsToken
        } else {
            self.pos += 1;
            SyntaxKind::AsteriskToken
        }
    }

    fn scan_slash(&mut self) -> SyntaxKind {
        // Comments were consumed as trivia; this is division.
        if self.char_at(1) == Some('=') {
            self.pos += 2;
            SyntaxKind::SlashEqualsToken
        } else {
            self.pos += 1;
            SyntaxKind::SlashToken
        }
    }

    fn scan_percent(&mut self) -> SyntaxKind {
        if self.char_at(1) == Some('=') {
            self.pos += 2;
            SyntaxKind::PercentEqualsToken
        } else {
            self.pos += 1;
            SyntaxKind::PercentToken
        }
    }

    fn scan_ampersand(&mut self) -> SyntaxKind {
        if self.char_at(1) == Some('&') {
            if self.char_at(2) == Some('=') {
                self.pos += 3;
                SyntaxKind::AmpersandAmpersandEqualsToken
            } else {
                self.pos += 2;
                SyntaxKind::AmpersandAmpersandToken
            }
        } else if self.char_at(1) == Some('=') {
            self.pos += 2;
            SyntaxKind::AmpersandEqualsToken
        } else {
            self.pos += 1;
            SyntaxKind::AmpersandToken
        }
    }

    fn scan_bar(&mut self) -> SyntaxKind {
        if self.char_at(1) == Some('|') {
            if self.char_at(2) == Some('=') {
                self.pos += 3;
                SyntaxKind::BarBarEqualsToken
            } else {
                self.pos += 2;
                SyntaxKind::BarBarToken
            }
        } else if self.char_at(1) == Some('=') {
            self.pos += 2;
            SyntaxKind::BarEqualsToken
        } else {
            self.pos += 1;
            SyntaxKind::BarToken
        }
    }

    fn scan_caret(&mut self) -> SyntaxKind {
        if self.char_at(1) == Some('=') {
            self.pos += 2;
            SyntaxKind::CaretEqualsToken
        } else {
            self.pos += 1;
            SyntaxKind::CaretToken
        }
    }

    fn scan_string_literal(&mut self, quote: char) -> SyntaxKind {
        self.pos += 1;
        let mut result = String::new();
        loop {
            if self.is_eof() {
                self.error_at(self.pos, 0, &messages::UNTERMINATED_STRING_LITERAL, &[]);
                self.token_flags |= TokenFlags::UNTERMINATED;
                break;
            }
            let ch = self.text[self.pos];
            if ch == quote {
                self.pos += 1;
                break;
            }
            if ch == '\\' {
                result.push(ch);
                self.pos += 1;
                if !self.is_eof() {
                    result.push(self.text[self.pos]);
                    self.pos += 1;
                }
                continue;
            }
            if is_line_break(ch) {
                self.error_at(self.pos, 0, &messages::UNTERMINATED_STRING_LITERAL, &[]);
                self.token_flags |= TokenFlags::UNTERMINATED;
                break;
            }
            result.push(ch);
            self.pos += 1;
        }
        self.token_value = result;
        SyntaxKind::StringLiteral
    }

    fn scan_template_literal(&mut self) -> SyntaxKind {
        self.pos += 1;
        let mut result = String::new();
        loop {
            if self.is_eof() {
                self.error_at(self.pos, 0, &messages::UNTERMINATED_TEMPLATE_LITERAL, &[]);
                self.token_flags |= TokenFlags::UNTERMINATED;
                self.token_value = result;
                return SyntaxKind::NoSubstitutionTemplateLiteral;
            }
            let ch = self.text[self.pos];
            if ch == '`' {
                self.pos += 1;
                self.token_value = result;
                return SyntaxKind::NoSubstitutionTemplateLiteral;
            }
            if ch == '$' && self.char_at(1) == Some('{') {
                self.pos += 2;
                self.token_value = result;
                return SyntaxKind::TemplateHead;
            }
            if ch == '\\' {
                result.push(ch);
                self.pos += 1;
                if !self.is_eof() {
                    result.push(self.text[self.pos]);
                    self.pos += 1;
                }
                continue;
            }
            if ch == '\r' {
                result.push('\r');
                self.pos += 1;
                if self.current_char() == Some('\n') {
                    result.push('\n');
                    self.pos += 1;
                }
                continue;
            }
            result.push(ch);
            self.pos += 1;
        }
    }

    /// Scan a template middle or tail. Called by the parser with the
    /// position just past the `}` closing a substitution.
    pub fn rescan_template_token(&mut self) -> SyntaxKind {
        self.token_start = self.pos;
        self.token_value.clear();
        let mut result = String::new();

        loop {
            if self.is_eof() {
                self.error_at(self.pos, 0, &messages::UNTERMINATED_TEMPLATE_LITERAL, &[]);
                self.token_flags |= TokenFlags::UNTERMINATED;
                self.token_value = result;
                self.token = SyntaxKind::TemplateTail;
                return self.token;
            }
            let ch = self.text[self.pos];
            if ch == '`' {
                self.pos += 1;
                self.token_value = result;
                self.token = SyntaxKind::TemplateTail;
                return self.token;
            }
            if ch == '$' && self.char_at(1) == Some('{') {
                self.pos += 2;
                self.token_value = result;
                self.token = SyntaxKind::TemplateMiddle;
                return self.token;
            }
            if ch == '\\' {
                result.push(ch);
                self.pos += 1;
                if !self.is_eof() {
                    result.push(self.text[self.pos]);
                    self.pos += 1;
                }
                continue;
            }
            result.push(ch);
            self.pos += 1;
        }
    }

    /// Rescan the current `/` or `/=` as a regular expression literal.
    pub fn rescan_slash_token(&mut self) -> SyntaxKind {
        if self.token != SyntaxKind::SlashToken && self.token != SyntaxKind::SlashEqualsToken {
            return self.token;
        }
        self.pos = self.token_start + 1;
        let mut result = String::from("/");
        let mut in_character_class = false;

        loop {
            if self.is_eof() {
                self.error_at(self.pos, 0, &messages::UNTERMINATED_REGULAR_EXPRESSION_LITERAL, &[]);
                self.token_flags |= TokenFlags::UNTERMINATED;
                break;
            }
            let ch = self.text[self.pos];
            if is_line_break(ch) {
                self.error_at(self.pos, 0, &messages::UNTERMINATED_REGULAR_EXPRESSION_LITERAL, &[]);
                self.token_flags |= TokenFlags::UNTERMINATED;
                break;
            }
            if ch == '\\' {
                result.push(ch);
                self.pos += 1;
                if !self.is_eof() && !is_line_break(self.text[self.pos]) {
                    result.push(self.text[self.pos]);
                    self.pos += 1;
                }
                continue;
            }
            if ch == '[' {
                in_character_class = true;
            } else if ch == ']' {
                in_character_class = false;
            } else if ch == '/' && !in_character_class {
                result.push(ch);
                self.pos += 1;
                while !self.is_eof() && is_identifier_part(self.text[self.pos]) {
                    result.push(self.text[self.pos]);
                    self.pos += 1;
                }
                break;
            }
            result.push(ch);
            self.pos += 1;
        }

        self.token_value = result;
        self.token = SyntaxKind::RegularExpressionLiteral;
        self.token
    }

    /// Rescan `>` as `>=`, `>>`, `>>=`, `>>>`, or `>>>=`. The scanner
    /// never merges `>` with what follows on its own, so that nested
    /// type argument lists can close one level at a time.
    pub fn rescan_greater_than_token(&mut self) -> SyntaxKind {
        if self.token == SyntaxKind::GreaterThanToken {
            if self.current_char() == Some('>') {
                if self.char_at(1) == Some('>') {
                    if self.char_at(2) == Some('=') {
                        self.pos += 3;
                        self.token = SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken;
                    } else {
                        self.pos += 2;
                        self.token = SyntaxKind::GreaterThanGreaterThanGreaterThanToken;
                    }
                } else if self.char_at(1) == Some('=') {
                    self.pos += 2;
                    self.token = SyntaxKind::GreaterThanGreaterThanEqualsToken;
                } else {
                    self.pos += 1;
                    self.token = SyntaxKind::GreaterThanGreaterThanToken;
                }
            } else if self.current_char() == Some('=') {
                self.pos += 1;
                self.token = SyntaxKind::GreaterThanEqualsToken;
            }
        }
        self.token
    }

    /// Split `<<` back into a single `<`. Used where a type argument
    /// list or markup element can begin with `<` directly followed by
    /// another `<`.
    pub fn rescan_less_than_token(&mut self) -> SyntaxKind {
        if self.token == SyntaxKind::LessThanLessThanToken {
            self.pos = self.token_start + 1;
            self.token = SyntaxKind::LessThanToken;
        }
        self.token
    }

    fn scan_number(&mut self) -> SyntaxKind {
        let start = self.pos;
        let first_char = self.text[self.pos];

        if first_char == '0' {
            match self.char_at(1) {
                Some('x') | Some('X') => return self.scan_radix_number(start, TokenFlags::HEX_SPECIFIER),
                Some('b') | Some('B') => return self.scan_radix_number(start, TokenFlags::BINARY_SPECIFIER),
                Some('o') | Some('O') => return self.scan_radix_number(start, TokenFlags::OCTAL_SPECIFIER),
                _ => {}
            }
        }

        self.scan_digits();

        if self.current_char() == Some('.') {
            self.pos += 1;
            self.scan_digits();
        }

        if let Some('e') | Some('E') = self.current_char() {
            self.pos += 1;
            self.token_flags |= TokenFlags::SCIENTIFIC;
            if let Some('+') | Some('-') = self.current_char() {
                self.pos += 1;
            }
            if !self.scan_digits() {
                self.error_at(self.pos, 0, &messages::DIGIT_EXPECTED, &[]);
            }
        }

        self.finish_number(start)
    }

    fn scan_radix_number(&mut self, start: usize, specifier: TokenFlags) -> SyntaxKind {
        self.pos += 2;
        self.token_flags |= specifier;
        let digit_test: fn(char) -> bool = if specifier == TokenFlags::HEX_SPECIFIER {
            is_hex_digit
        } else if specifier == TokenFlags::BINARY_SPECIFIER {
            is_binary_digit
        } else {
            is_octal_digit
        };
        let mut any = false;
        let mut prev_separator = false;
        while let Some(ch) = self.current_char() {
            if ch == '_' {
                self.token_flags |= TokenFlags::CONTAINS_SEPARATOR;
                if !any || prev_separator {
                    self.error_at(self.pos, 1, &messages::NUMERIC_SEPARATORS_ARE_NOT_ALLOWED_HERE, &[]);
                }
                prev_separator = true;
                self.pos += 1;
            } else if digit_test(ch) {
                any = true;
                prev_separator = false;
                self.pos += 1;
            } else {
                break;
            }
        }
        if prev_separator {
            self.error_at(self.pos - 1, 1, &messages::NUMERIC_SEPARATORS_ARE_NOT_ALLOWED_HERE, &[]);
        }
        if !any {
            let message = if specifier == TokenFlags::HEX_SPECIFIER {
                &messages::HEXADECIMAL_DIGIT_EXPECTED
            } else if specifier == TokenFlags::BINARY_SPECIFIER {
                &messages::BINARY_DIGIT_EXPECTED
            } else {
                &messages::OCTAL_DIGIT_EXPECTED
            };
            self.error_at(self.pos, 0, message, &[]);
        }
        self.finish_number(start)
    }

    /// Consume an optional bigint suffix, reject an adjacent
    /// identifier, and capture the literal text.
    fn finish_number(&mut self, start: usize) -> SyntaxKind {
        let kind = if self.current_char() == Some('n') {
            self.pos += 1;
            SyntaxKind::BigIntLiteral
        } else {
            SyntaxKind::NumericLiteral
        };
        if self.current_char().is_some_and(is_identifier_start) {
            self.error_at(
                self.pos,
                1,
                &messages::AN_IDENTIFIER_CANNOT_FOLLOW_A_NUMERIC_LITERAL,
                &[],
            );
        }
        self.token_value = self.chars_to_string(start, self.pos);
        kind
    }

    fn scan_digits(&mut self) -> bool {
        let mut any = false;
        let mut prev_separator = false;
        let mut seen_separator = false;
        while let Some(ch) = self.current_char() {
            if ch == '_' {
                self.token_flags |= TokenFlags::CONTAINS_SEPARATOR;
                if !any || prev_separator {
                    self.error_at(self.pos, 1, &messages::NUMERIC_SEPARATORS_ARE_NOT_ALLOWED_HERE, &[]);
                }
                prev_separator = true;
                seen_separator = true;
                self.pos += 1;
            } else if is_digit(ch) {
                any = true;
                prev_separator = false;
                self.pos += 1;
            } else {
                break;
            }
        }
        if seen_separator && prev_separator {
            self.error_at(self.pos - 1, 1, &messages::NUMERIC_SEPARATORS_ARE_NOT_ALLOWED_HERE, &[]);
        }
        any
    }

    fn scan_identifier(&mut self) -> SyntaxKind {
        let start = self.pos;
        self.pos += 1;
        while !self.is_eof() && is_identifier_part(self.text[self.pos]) {
            self.pos += 1;
        }
        let text = self.chars_to_string(start, self.pos);

        if let Some(keyword) = SyntaxKind::from_keyword(&text) {
            self.token_value = text;
            return keyword;
        }

        self.token_value = text;
        SyntaxKind::Identifier
    }

    // ========================================================================
    // Markup scanning
    // ========================================================================

    /// Scan markup text content: everything up to the next `{` or `<`.
    pub fn scan_markup_text(&mut self) -> SyntaxKind {
        self.token_start = self.pos;
        self.token_flags = TokenFlags::NONE;
        let mut result = String::new();

        while !self.is_eof() {
            let ch = self.text[self.pos];
            if ch == '{' || ch == '<' {
                break;
            }
            result.push(ch);
            self.pos += 1;
        }

        self.token_value = result;
        if self.token_value.is_empty() {
            // Already at `{` or `<`; hand back a normal token.
            return self.scan();
        }
        self.token = SyntaxKind::MarkupText;
        self.token
    }

    /// Scan a token in markup child position: `{`, `<`, `</`, text, or
    /// end of file.
    pub fn scan_markup_token(&mut self) -> SyntaxKind {
        self.token_flags = TokenFlags::NONE;
        self.token_value.clear();
        self.token_start = self.pos;

        if self.is_eof() {
            self.token = SyntaxKind::EndOfFileToken;
            return self.token;
        }

        let ch = self.text[self.pos];
        match ch {
            '{' => {
                self.pos += 1;
                self.token = SyntaxKind::OpenBraceToken;
            }
            '<' => {
                if self.char_at(1) == Some('/') {
                    self.pos += 2;
                    self.token = SyntaxKind::LessThanSlashToken;
                } else {
                    self.pos += 1;
                    self.token = SyntaxKind::LessThanToken;
                }
            }
            _ => {
                return self.scan_markup_text();
            }
        }
        self.token
    }

    /// Scan a markup attribute value: a quoted string, or any normal
    /// token (for `{expr}` initializers).
    pub fn scan_markup_attribute_value(&mut self) -> SyntaxKind {
        self.skip_trivia();
        self.token_start = self.pos;
        match self.current_char() {
            Some(quote @ ('"' | '\'')) => {
                self.token = self.scan_string_literal(quote);
                self.token
            }
            _ => self.scan(),
        }
    }

    // ========================================================================
    // Conflict markers
    // ========================================================================

    fn is_conflict_marker_trivia(&self) -> bool {
        if self.pos + 6 >= self.text.len() {
            return false;
        }
        let ch = self.text[self.pos];
        for i in 1..7 {
            if self.text.get(self.pos + i) != Some(&ch) {
                return false;
            }
        }
        if self.pos == 0 {
            return true;
        }
        is_line_break(self.text[self.pos - 1])
    }

    fn skip_conflict_marker(&mut self) {
        let start = self.pos;
        let ch = self.text[self.pos];
        self.error_at(start, 7, &messages::MERGE_CONFLICT_MARKER_ENCOUNTERED, &[]);
        while !self.is_eof() && !is_line_break(self.text[self.pos]) {
            self.pos += 1;
        }
        if ch == '=' {
            // The ======= separator swallows everything up to the
            // closing marker, so one side of the conflict still parses.
            while !self.is_eof() {
                if self.text[self.pos] == '>' && self.is_conflict_marker_trivia() {
                    break;
                }
                self.pos += 1;
            }
        }
        self.token_flags |= TokenFlags::PRECEDING_LINE_BREAK;
    }

    fn chars_to_string(&self, start: usize, end: usize) -> String {
        self.text[start..end].iter().collect()
    }

    /// Get a substring of the source text by character offsets.
    pub fn text_slice(&self, start: usize, end: usize) -> String {
        let s = start.min(self.text.len());
        let e = end.min(self.text.len()).max(s);
        self.text[s..e].iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_simple_tokens() {
        let mut scanner = Scanner::new("( ) { } [ ] ; , :");
        assert_eq!(scanner.scan(), SyntaxKind::OpenParenToken);
        assert_eq!(scanner.scan(), SyntaxKind::CloseParenToken);
        assert_eq!(scanner.scan(), SyntaxKind::OpenBraceToken);
        assert_eq!(scanner.scan(), SyntaxKind::CloseBraceToken);
        assert_eq!(scanner.scan(), SyntaxKind::OpenBracketToken);
        assert_eq!(scanner.scan(), SyntaxKind::CloseBracketToken);
        assert_eq!(scanner.scan(), SyntaxKind::SemicolonToken);
        assert_eq!(scanner.scan(), SyntaxKind::CommaToken);
        assert_eq!(scanner.scan(), SyntaxKind::ColonToken);
        assert_eq!(scanner.scan(), SyntaxKind::EndOfFileToken);
    }

    #[test]
    fn test_scan_operators() {
        let mut scanner = Scanner::new("+ ++ += ** **= === !== ?? ??= =>");
        assert_eq!(scanner.scan(), SyntaxKind::PlusToken);
        assert_eq!(scanner.scan(), SyntaxKind::PlusPlusToken);
        assert_eq!(scanner.scan(), SyntaxKind::PlusEqualsToken);
        assert_eq!(scanner.scan(), SyntaxKind::AsteriskAsteriskToken);
        assert_eq!(scanner.scan(), SyntaxKind::AsteriskAsteriskEqualsToken);
        assert_eq!(scanner.scan(), SyntaxKind::EqualsEqualsEqualsToken);
        assert_eq!(scanner.scan(), SyntaxKind::ExclamationEqualsEqualsToken);
        assert_eq!(scanner.scan(), SyntaxKind::QuestionQuestionToken);
        assert_eq!(scanner.scan(), SyntaxKind::QuestionQuestionEqualsToken);
        assert_eq!(scanner.scan(), SyntaxKind::EqualsGreaterThanToken);
        assert_eq!(scanner.scan(), SyntaxKind::EndOfFileToken);
    }

    #[test]
    fn test_scan_identifier_and_keyword() {
        let mut scanner = Scanner::new("let x = 42;");
        assert_eq!(scanner.scan(), SyntaxKind::LetKeyword);
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
        assert_eq!(scanner.token_value(), "x");
        assert_eq!(scanner.scan(), SyntaxKind::EqualsToken);
        assert_eq!(scanner.scan(), SyntaxKind::NumericLiteral);
        assert_eq!(scanner.token_value(), "42");
        assert_eq!(scanner.scan(), SyntaxKind::SemicolonToken);
        assert_eq!(scanner.scan(), SyntaxKind::EndOfFileToken);
    }

    #[test]
    fn test_token_positions_are_char_offsets() {
        let mut scanner = Scanner::new("méta = 1");
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
        assert_eq!(scanner.token_start(), 0);
        assert_eq!(scanner.token_end(), 4);
        assert_eq!(scanner.scan(), SyntaxKind::EqualsToken);
        assert_eq!(scanner.token_start(), 5);
    }

    #[test]
    fn test_scan_string_literal() {
        let mut scanner = Scanner::new(r#""hello" 'world'"#);
        assert_eq!(scanner.scan(), SyntaxKind::StringLiteral);
        assert_eq!(scanner.token_value(), "hello");
        assert_eq!(scanner.scan(), SyntaxKind::StringLiteral);
        assert_eq!(scanner.token_value(), "world");
    }

    #[test]
    fn test_unterminated_string_reports_once() {
        let mut scanner = Scanner::new("\"abc");
        assert_eq!(scanner.scan(), SyntaxKind::StringLiteral);
        assert!(scanner.token_flags().contains(TokenFlags::UNTERMINATED));
        assert_eq!(scanner.diagnostics().len(), 1);
    }

    #[test]
    fn test_scan_template_head_and_tail() {
        let mut scanner = Scanner::new("`a ${x} b`");
        assert_eq!(scanner.scan(), SyntaxKind::TemplateHead);
        assert_eq!(scanner.token_value(), "a ");
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
        assert_eq!(scanner.scan(), SyntaxKind::CloseBraceToken);
        assert_eq!(scanner.rescan_template_token(), SyntaxKind::TemplateTail);
        assert_eq!(scanner.token_value(), " b");
    }

    #[test]
    fn test_unterminated_template() {
        let mut scanner = Scanner::new("`abc");
        assert_eq!(scanner.scan(), SyntaxKind::NoSubstitutionTemplateLiteral);
        assert!(scanner.token_flags().contains(TokenFlags::UNTERMINATED));
    }

    #[test]
    fn test_scan_number_formats() {
        let mut scanner = Scanner::new("42 3.14 0xff 0b1010 0o777 1_000 1e10 42n");
        assert_eq!(scanner.scan(), SyntaxKind::NumericLiteral);
        assert_eq!(scanner.token_value(), "42");
        assert_eq!(scanner.scan(), SyntaxKind::NumericLiteral);
        assert_eq!(scanner.token_value(), "3.14");
        assert_eq!(scanner.scan(), SyntaxKind::NumericLiteral);
        assert!(scanner.token_flags().contains(TokenFlags::HEX_SPECIFIER));
        assert_eq!(scanner.scan(), SyntaxKind::NumericLiteral);
        assert!(scanner.token_flags().contains(TokenFlags::BINARY_SPECIFIER));
        assert_eq!(scanner.scan(), SyntaxKind::NumericLiteral);
        assert!(scanner.token_flags().contains(TokenFlags::OCTAL_SPECIFIER));
        assert_eq!(scanner.scan(), SyntaxKind::NumericLiteral);
        assert!(scanner.token_flags().contains(TokenFlags::CONTAINS_SEPARATOR));
        assert_eq!(scanner.scan(), SyntaxKind::NumericLiteral);
        assert!(scanner.token_flags().contains(TokenFlags::SCIENTIFIC));
        assert_eq!(scanner.scan(), SyntaxKind::BigIntLiteral);
        assert_eq!(scanner.token_value(), "42n");
    }

    #[test]
    fn test_bad_numeric_separator() {
        let mut scanner = Scanner::new("1__0");
        assert_eq!(scanner.scan(), SyntaxKind::NumericLiteral);
        assert!(!scanner.diagnostics().is_empty());
    }

    #[test]
    fn test_identifier_after_number() {
        let mut scanner = Scanner::new("3x");
        assert_eq!(scanner.scan(), SyntaxKind::NumericLiteral);
        assert_eq!(scanner.diagnostics().len(), 1);
    }

    #[test]
    fn test_scan_comments_and_line_break_flag() {
        let mut scanner = Scanner::new("// comment\nlet /* block */ x");
        assert_eq!(scanner.scan(), SyntaxKind::LetKeyword);
        assert!(scanner.has_preceding_line_break());
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
        assert_eq!(scanner.token_value(), "x");
        assert!(!scanner.has_preceding_line_break());
    }

    #[test]
    fn test_doc_comment_flag_and_span() {
        let mut scanner = Scanner::new("/** doc */ let x;");
        assert_eq!(scanner.scan(), SyntaxKind::LetKeyword);
        assert!(scanner.has_preceding_doc_comment());
        assert_eq!(scanner.doc_comment_spans().len(), 1);
        assert_eq!(scanner.doc_comment_spans()[0].start, 0);
        assert_eq!(scanner.doc_comment_spans()[0].length, 10);
    }

    #[test]
    fn test_directive_comment() {
        let mut scanner = Scanner::new("//# edition legacy\nlet x;");
        assert_eq!(scanner.scan(), SyntaxKind::LetKeyword);
        let directives = scanner.take_directives();
        assert_eq!(directives.len(), 1);
        assert_eq!(directives[0].name, "edition");
        assert_eq!(directives[0].value, "legacy");
    }

    #[test]
    fn test_shebang_flag() {
        let mut scanner = Scanner::new("#!/usr/bin/env sable\nlet x = 1;");
        assert_eq!(scanner.scan(), SyntaxKind::LetKeyword);
        assert!(scanner.token_flags().contains(TokenFlags::PRECEDING_SHEBANG));
    }

    #[test]
    fn test_private_identifier() {
        let mut scanner = Scanner::new("#name #");
        assert_eq!(scanner.scan(), SyntaxKind::PrivateIdentifier);
        assert_eq!(scanner.token_value(), "#name");
        assert_eq!(scanner.scan(), SyntaxKind::HashToken);
    }

    #[test]
    fn test_rescan_greater_than() {
        let mut scanner = Scanner::new("a >> b");
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
        assert_eq!(scanner.scan(), SyntaxKind::GreaterThanToken);
        assert_eq!(
            scanner.rescan_greater_than_token(),
            SyntaxKind::GreaterThanGreaterThanToken
        );
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    }

    #[test]
    fn test_rescan_slash_as_regex() {
        let mut scanner = Scanner::new("/ab[c/]d/gi");
        assert_eq!(scanner.scan(), SyntaxKind::SlashToken);
        assert_eq!(
            scanner.rescan_slash_token(),
            SyntaxKind::RegularExpressionLiteral
        );
        assert_eq!(scanner.token_value(), "/ab[c/]d/gi");
    }

    #[test]
    fn test_scan_markup_text() {
        let mut scanner = Scanner::new("Hello World{");
        let kind = scanner.scan_markup_text();
        assert_eq!(kind, SyntaxKind::MarkupText);
        assert_eq!(scanner.token_value(), "Hello World");
    }

    #[test]
    fn test_scan_markup_token_closing_tag() {
        let mut scanner = Scanner::new("</div>");
        assert_eq!(scanner.scan_markup_token(), SyntaxKind::LessThanSlashToken);
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
        assert_eq!(scanner.scan(), SyntaxKind::GreaterThanToken);
    }

    #[test]
    fn test_conflict_marker_reported() {
        let mut scanner = Scanner::new("<<<<<<< ours\nlet x;\n");
        assert_eq!(scanner.scan(), SyntaxKind::LetKeyword);
        assert_eq!(scanner.diagnostics().len(), 1);
        assert_eq!(scanner.diagnostics().diagnostics()[0].code, 1032);
    }

    #[test]
    fn test_look_ahead_restores_everything() {
        let mut scanner = Scanner::new("let \"oops");
        scanner.scan();
        let next = scanner.look_ahead(|s| s.scan());
        assert_eq!(next, SyntaxKind::StringLiteral);
        assert_eq!(scanner.token(), SyntaxKind::LetKeyword);
        // The unterminated-string diagnostic from the lookahead is gone.
        assert!(scanner.diagnostics().is_empty());
    }

    #[test]
    fn test_try_scan_keeps_on_some() {
        let mut scanner = Scanner::new("a b");
        scanner.scan();
        let kept = scanner.try_scan(|s| {
            if s.scan() == SyntaxKind::Identifier {
                Some(s.token_value().to_string())
            } else {
                None
            }
        });
        assert_eq!(kept.as_deref(), Some("b"));
        assert_eq!(scanner.token(), SyntaxKind::Identifier);
    }
}
