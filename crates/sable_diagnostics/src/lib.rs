//! sable_diagnostics: Diagnostic messages and error reporting infrastructure.
//!
//! Defines every syntax diagnostic the scanner and parser can produce.
//! Diagnostics carry structured information (code, category, span) and
//! never abort a parse; a file with errors still yields a complete tree.

use sable_core::text::TextSpan;
use std::fmt;

/// Diagnostic severity category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCategory {
    Warning,
    Error,
    Suggestion,
    Message,
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticCategory::Warning => write!(f, "warning"),
            DiagnosticCategory::Error => write!(f, "error"),
            DiagnosticCategory::Suggestion => write!(f, "suggestion"),
            DiagnosticCategory::Message => write!(f, "message"),
        }
    }
}

/// A diagnostic message template with a code and category.
#[derive(Debug, Clone)]
pub struct DiagnosticMessage {
    /// The diagnostic error code (e.g., 1005).
    pub code: u32,
    /// The category of this diagnostic.
    pub category: DiagnosticCategory,
    /// The message template string. May contain `{0}`, `{1}`, etc. placeholders.
    pub message: &'static str,
}

/// A realized diagnostic with location information and resolved message text.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// The file path where this diagnostic occurred, if any.
    pub file: Option<String>,
    /// The source text span where this diagnostic occurred, if any.
    pub span: Option<TextSpan>,
    /// The resolved message text.
    pub message_text: String,
    /// The diagnostic error code.
    pub code: u32,
    /// The category.
    pub category: DiagnosticCategory,
}

impl Diagnostic {
    /// Create a new diagnostic without location info (global diagnostic).
    pub fn new(message: &DiagnosticMessage, args: &[&str]) -> Self {
        Self {
            file: None,
            span: None,
            message_text: format_message(message.message, args),
            code: message.code,
            category: message.category,
        }
    }

    /// Create a new diagnostic with a span but no file name. The file
    /// name is attached when the parse finishes.
    pub fn at(span: TextSpan, message: &DiagnosticMessage, args: &[&str]) -> Self {
        Self {
            file: None,
            span: Some(span),
            message_text: format_message(message.message, args),
            code: message.code,
            category: message.category,
        }
    }

    /// Create a new diagnostic with file and span info.
    pub fn with_location(
        file: String,
        span: TextSpan,
        message: &DiagnosticMessage,
        args: &[&str],
    ) -> Self {
        Self {
            file: Some(file),
            span: Some(span),
            message_text: format_message(message.message, args),
            code: message.code,
            category: message.category,
        }
    }

    /// Whether this is an error diagnostic.
    pub fn is_error(&self) -> bool {
        self.category == DiagnosticCategory::Error
    }

    /// The start offset of this diagnostic, if it has a span.
    pub fn start(&self) -> Option<u32> {
        self.span.map(|s| s.start)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref file) = self.file {
            write!(f, "{}", file)?;
            if let Some(span) = self.span {
                write!(f, "({})", span.start)?;
            }
            write!(f, ": ")?;
        }
        write!(f, "{} SA{}: {}", self.category, self.code, self.message_text)
    }
}

/// Format a diagnostic message template by replacing `{0}`, `{1}`, etc. with arguments.
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{}}}", i), arg);
    }
    result
}

/// A collection of diagnostics accumulated during a parse.
///
/// Insertion order follows parse order, which is source order except
/// when speculation rolls a prefix back. A diagnostic whose start
/// offset equals the previous entry's start offset is dropped, so
/// cascading failures at one position surface as a single message.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticCollection {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollection {
    pub fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
        }
    }

    /// Add a diagnostic, deduplicating by start offset against the
    /// previous entry. Returns whether the diagnostic was kept.
    pub fn add(&mut self, diagnostic: Diagnostic) -> bool {
        if let (Some(last), Some(start)) = (self.diagnostics.last(), diagnostic.start()) {
            if last.start() == Some(start) {
                return false;
            }
        }
        self.diagnostics.push(diagnostic);
        true
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.category == DiagnosticCategory::Error)
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.category == DiagnosticCategory::Error)
            .count()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Drop every diagnostic recorded after the given length. Used when
    /// a speculative parse is rolled back.
    pub fn truncate(&mut self, len: usize) {
        self.diagnostics.truncate(len);
    }

    pub fn extend(&mut self, other: DiagnosticCollection) {
        self.diagnostics.extend(other.diagnostics);
    }

    pub fn clear(&mut self) {
        self.diagnostics.clear();
    }

    /// Sort diagnostics by file and position.
    pub fn sort(&mut self) {
        self.diagnostics.sort_by(|a, b| {
            let file_cmp = a.file.cmp(&b.file);
            if file_cmp != std::cmp::Ordering::Equal {
                return file_cmp;
            }
            let a_pos = a.span.map(|s| s.start).unwrap_or(0);
            let b_pos = b.span.map(|s| s.start).unwrap_or(0);
            a_pos.cmp(&b_pos)
        });
    }
}

// ============================================================================
// Diagnostic messages
// ============================================================================

pub mod messages {
    use super::*;

    macro_rules! diag {
        ($code:expr, Error, $msg:expr) => {
            DiagnosticMessage { code: $code, category: DiagnosticCategory::Error, message: $msg }
        };
        ($code:expr, Warning, $msg:expr) => {
            DiagnosticMessage { code: $code, category: DiagnosticCategory::Warning, message: $msg }
        };
        ($code:expr, Suggestion, $msg:expr) => {
            DiagnosticMessage { code: $code, category: DiagnosticCategory::Suggestion, message: $msg }
        };
        ($code:expr, Message, $msg:expr) => {
            DiagnosticMessage { code: $code, category: DiagnosticCategory::Message, message: $msg }
        };
    }

    // ========================================================================
    // Scanner errors (1000-1099)
    // ========================================================================
    pub const UNTERMINATED_STRING_LITERAL: DiagnosticMessage = diag!(1002, Error, "Unterminated string literal.");
    pub const IDENTIFIER_EXPECTED: DiagnosticMessage = diag!(1003, Error, "Identifier expected.");
    pub const _0_EXPECTED: DiagnosticMessage = diag!(1005, Error, "'{0}' expected.");
    pub const TRAILING_SEPARATOR_NOT_ALLOWED: DiagnosticMessage = diag!(1009, Error, "Trailing comma not allowed.");
    pub const ASTERISK_SLASH_EXPECTED: DiagnosticMessage = diag!(1010, Error, "'*/' expected.");
    pub const UNEXPECTED_TOKEN: DiagnosticMessage = diag!(1012, Error, "Unexpected token.");
    pub const A_REST_PARAMETER_MUST_BE_LAST: DiagnosticMessage = diag!(1014, Error, "A rest parameter must be last in a parameter list.");
    pub const DIGIT_EXPECTED: DiagnosticMessage = diag!(1024, Error, "Digit expected.");
    pub const HEXADECIMAL_DIGIT_EXPECTED: DiagnosticMessage = diag!(1025, Error, "Hexadecimal digit expected.");
    pub const BINARY_DIGIT_EXPECTED: DiagnosticMessage = diag!(1026, Error, "Binary digit expected.");
    pub const OCTAL_DIGIT_EXPECTED: DiagnosticMessage = diag!(1027, Error, "Octal digit expected.");
    pub const UNEXPECTED_END_OF_TEXT: DiagnosticMessage = diag!(1030, Error, "Unexpected end of text.");
    pub const INVALID_CHARACTER: DiagnosticMessage = diag!(1031, Error, "Invalid character.");
    pub const MERGE_CONFLICT_MARKER_ENCOUNTERED: DiagnosticMessage = diag!(1032, Error, "Merge conflict marker encountered.");
    pub const UNTERMINATED_REGULAR_EXPRESSION_LITERAL: DiagnosticMessage = diag!(1033, Error, "Unterminated regular expression literal.");
    pub const UNTERMINATED_TEMPLATE_LITERAL: DiagnosticMessage = diag!(1034, Error, "Unterminated template literal.");
    pub const AN_IDENTIFIER_CANNOT_FOLLOW_A_NUMERIC_LITERAL: DiagnosticMessage = diag!(1035, Error, "An identifier or keyword cannot immediately follow a numeric literal.");
    pub const NUMERIC_SEPARATORS_ARE_NOT_ALLOWED_HERE: DiagnosticMessage = diag!(1036, Error, "Numeric separators are not allowed here.");

    // ========================================================================
    // Parser errors (1100-1199)
    // ========================================================================
    pub const EXPRESSION_EXPECTED: DiagnosticMessage = diag!(1109, Error, "Expression expected.");
    pub const TYPE_EXPECTED: DiagnosticMessage = diag!(1110, Error, "Type expected.");
    pub const STATEMENT_EXPECTED: DiagnosticMessage = diag!(1111, Error, "Statement expected.");
    pub const DECLARATION_OR_STATEMENT_EXPECTED: DiagnosticMessage = diag!(1112, Error, "Declaration or statement expected.");
    pub const DECLARATION_EXPECTED: DiagnosticMessage = diag!(1113, Error, "Declaration expected.");
    pub const CASE_OR_DEFAULT_EXPECTED: DiagnosticMessage = diag!(1114, Error, "'case' or 'default' expected.");
    pub const PROPERTY_OR_SIGNATURE_EXPECTED: DiagnosticMessage = diag!(1115, Error, "Property or signature expected.");
    pub const ENUM_MEMBER_EXPECTED: DiagnosticMessage = diag!(1116, Error, "Enum member expected.");
    pub const VARIABLE_DECLARATION_EXPECTED: DiagnosticMessage = diag!(1117, Error, "Variable declaration expected.");
    pub const ARGUMENT_EXPRESSION_EXPECTED: DiagnosticMessage = diag!(1118, Error, "Argument expression expected.");
    pub const PARAMETER_DECLARATION_EXPECTED: DiagnosticMessage = diag!(1119, Error, "Parameter declaration expected.");
    pub const TYPE_PARAMETER_DECLARATION_EXPECTED: DiagnosticMessage = diag!(1120, Error, "Type parameter declaration expected.");
    pub const TYPE_ARGUMENT_EXPECTED: DiagnosticMessage = diag!(1121, Error, "Type argument expected.");
    pub const PROPERTY_ASSIGNMENT_EXPECTED: DiagnosticMessage = diag!(1122, Error, "Property assignment expected.");
    pub const EXPRESSION_OR_COMMA_EXPECTED: DiagnosticMessage = diag!(1123, Error, "Expression or comma expected.");
    pub const ELEMENT_ACCESS_EXPRESSION_SHOULD_TAKE_AN_ARGUMENT: DiagnosticMessage = diag!(1124, Error, "An element access expression should take an argument.");
    pub const VARIABLE_DECLARATION_LIST_CANNOT_BE_EMPTY: DiagnosticMessage = diag!(1125, Error, "Variable declaration list cannot be empty.");
    pub const CATCH_OR_FINALLY_EXPECTED: DiagnosticMessage = diag!(1126, Error, "'catch' or 'finally' expected.");
    pub const LINE_BREAK_NOT_PERMITTED_HERE: DiagnosticMessage = diag!(1127, Error, "Line break not permitted here.");
    pub const A_YIELD_EXPRESSION_IS_ONLY_ALLOWED_IN_A_GENERATOR_BODY: DiagnosticMessage = diag!(1128, Error, "A 'yield' expression is only allowed in a generator body.");
    pub const SUPER_MUST_BE_FOLLOWED_BY_AN_ARGUMENT_LIST_OR_MEMBER_ACCESS: DiagnosticMessage = diag!(1129, Error, "'super' must be followed by an argument list or member access.");
    pub const STRING_LITERAL_EXPECTED: DiagnosticMessage = diag!(1130, Error, "String literal expected.");
    pub const IDENTIFIER_OR_STRING_LITERAL_EXPECTED: DiagnosticMessage = diag!(1131, Error, "Identifier or string literal expected.");
    pub const SOURCE_TOO_DEEPLY_NESTED: DiagnosticMessage = diag!(1132, Error, "Source is too deeply nested to parse.");
    pub const IMPORT_OR_EXPORT_SPECIFIER_EXPECTED: DiagnosticMessage = diag!(1133, Error, "Import or export specifier expected.");
    pub const AN_ENUM_MEMBER_NAME_MUST_BE_FOLLOWED_BY_A_COMMA: DiagnosticMessage = diag!(1134, Error, "An enum member name must be followed by a ',', '=', or '}'.");

    // ========================================================================
    // Markup errors (1200-1299)
    // ========================================================================
    pub const EXPECTED_CLOSING_TAG_TO_MATCH_0: DiagnosticMessage = diag!(1201, Error, "Expected corresponding closing tag for '{0}'.");
    pub const MARKUP_ELEMENT_HAS_NO_CLOSING_TAG: DiagnosticMessage = diag!(1202, Error, "Markup element '{0}' has no corresponding closing tag.");
    pub const MARKUP_ATTRIBUTE_EXPECTED: DiagnosticMessage = diag!(1203, Error, "Markup attribute expected.");
    pub const MARKUP_EXPRESSION_CANNOT_BE_EMPTY: DiagnosticMessage = diag!(1204, Error, "A markup expression cannot be empty.");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_message() {
        assert_eq!(
            format_message("'{0}' expected.", &[";"]),
            "';' expected."
        );
        assert_eq!(
            format_message("'{0}' to match '{1}'.", &["}", "{"]),
            "'}' to match '{'."
        );
    }

    #[test]
    fn test_dedup_by_start_offset() {
        let mut collection = DiagnosticCollection::new();
        let first = Diagnostic::with_location(
            "a.sa".to_string(),
            TextSpan::new(4, 1),
            &messages::EXPRESSION_EXPECTED,
            &[],
        );
        let same_start = Diagnostic::with_location(
            "a.sa".to_string(),
            TextSpan::new(4, 2),
            &messages::UNEXPECTED_TOKEN,
            &[],
        );
        let later = Diagnostic::with_location(
            "a.sa".to_string(),
            TextSpan::new(9, 1),
            &messages::UNEXPECTED_TOKEN,
            &[],
        );
        assert!(collection.add(first));
        assert!(!collection.add(same_start));
        assert!(collection.add(later));
        assert_eq!(collection.len(), 2);
    }

    #[test]
    fn test_truncate_for_rollback() {
        let mut collection = DiagnosticCollection::new();
        collection.add(Diagnostic::new(&messages::EXPRESSION_EXPECTED, &[]));
        let mark = collection.len();
        collection.add(Diagnostic::with_location(
            "a.sa".to_string(),
            TextSpan::new(1, 0),
            &messages::TYPE_EXPECTED,
            &[],
        ));
        collection.truncate(mark);
        assert_eq!(collection.len(), 1);
    }
}
