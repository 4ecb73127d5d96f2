//! sable_parser: Recursive descent parser for Sable.
//!
//! Parses token streams from the scanner into an arena-allocated AST,
//! with error recovery, markup syntax for `.sax` files, structured
//! `/** */` comment parsing, and incremental re-parse of edited files.

mod doc;
mod expressions;
mod incremental;
mod lists;
mod markup;
mod parser;
mod precedence;
mod statements;
mod types;

pub use incremental::{update_source_file, SyntaxCursor};
pub use parser::Parser;
pub use precedence::OperatorPrecedence;

use sable_ast::node::{DocComment, Edition, FileKind, SourceFile};
use sable_core::arena::ParseArena;
use sable_core::text::{TextPos, TextSpan};
use sable_diagnostics::Diagnostic;

/// Per-file parse settings. The file kind decides whether `<` in
/// expression position scans as markup; the edition decides top-level
/// `await`.
#[derive(Debug, Clone, Copy)]
pub struct ParseOptions {
    pub file_kind: FileKind,
    pub edition: Edition,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            file_kind: FileKind::Standard,
            edition: Edition::Current,
        }
    }
}

impl ParseOptions {
    /// Derive the file kind from the file name's extension.
    pub fn from_file_name(file_name: &str) -> Self {
        Self {
            file_kind: FileKind::from_path(file_name),
            edition: Edition::Current,
        }
    }
}

/// Parse a whole file. Diagnostics are collected on the returned
/// [`SourceFile`]; the parse itself never fails.
pub fn parse_source_file<'a>(
    arena: &'a ParseArena,
    file_name: &str,
    source_text: &str,
    options: ParseOptions,
) -> SourceFile<'a> {
    Parser::new(
        arena,
        file_name,
        source_text,
        options.file_kind,
        options.edition,
    )
    .parse_source_file()
}

/// Parse a standalone `/** */` comment at `[start, start + length)` of
/// `content`, as found in editor hovers and API extractors. Returns
/// `None` when the range holds no doc comment; diagnostics are scoped
/// to the range.
pub fn parse_isolated_doc_comment<'a>(
    arena: &'a ParseArena,
    content: &str,
    start: TextPos,
    length: TextPos,
) -> Option<(&'a DocComment<'a>, Vec<Diagnostic>)> {
    let mut parser = Parser::new(
        arena,
        "comment.sa",
        content,
        FileKind::Standard,
        Edition::Current,
    );
    let span = TextSpan::new(start, length);
    let opener = parser
        .scanner
        .text_slice(start as usize, (start as usize).saturating_add(3));
    if opener != "/**" {
        return None;
    }
    let doc = parser.parse_doc_comment_span(span);
    Some((doc, parser.diagnostics.into_diagnostics()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sable_ast::syntax_kind::SyntaxKind;

    #[test]
    fn test_parse_source_file_entry_point() {
        let arena = ParseArena::new();
        let file = parse_source_file(
            &arena,
            "main.sa",
            "let x = 1;\n",
            ParseOptions::default(),
        );
        assert_eq!(file.statements.elements.len(), 1);
        assert!(file.diagnostics.is_empty());
    }

    #[test]
    fn test_options_from_file_name() {
        assert_eq!(
            ParseOptions::from_file_name("app.sax").file_kind,
            FileKind::Markup
        );
        assert_eq!(
            ParseOptions::from_file_name("app.sa").file_kind,
            FileKind::Standard
        );
    }

    #[test]
    fn test_isolated_doc_comment() {
        let arena = ParseArena::new();
        let text = "/** Adds numbers.\n * @param a left operand\n * @returns the sum\n */";
        let (doc, diagnostics) =
            parse_isolated_doc_comment(&arena, text, 0, text.len() as u32)
                .expect("doc comment");
        assert_eq!(doc.comment, Some("Adds numbers."));
        assert_eq!(doc.tags.elements.len(), 2);
        assert_eq!(doc.tags.elements[0].data.kind, SyntaxKind::DocParameterTag);
        assert_eq!(doc.tags.elements[1].data.kind, SyntaxKind::DocReturnTag);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_isolated_doc_comment_inside_larger_text() {
        let arena = ParseArena::new();
        let text = "let x = 1; /** Trailing. */ let y = 2;";
        let (doc, _) = parse_isolated_doc_comment(&arena, text, 11, 16).expect("doc comment");
        assert_eq!(doc.comment, Some("Trailing."));
        assert_eq!(doc.data.pos(), 11);
        assert_eq!(doc.data.end(), 27);
    }

    #[test]
    fn test_isolated_doc_comment_absent() {
        let arena = ParseArena::new();
        let text = "// plain comment";
        assert!(parse_isolated_doc_comment(&arena, text, 0, text.len() as u32).is_none());
    }
}
