//! Structured comment parsing.
//!
//! The scanner records the span of every `/** */` comment it skips; the
//! tags inside are parsed here after the main parse finishes, so doc
//! syntax errors never disturb the surrounding grammar. Positions on
//! doc nodes are file positions, like every other node.

use crate::parser::Parser;
use sable_ast::flags::NodeFlags;
use sable_ast::node::{DocComment, DocTag, Identifier, NodeArray, NodeData};
use sable_ast::syntax_kind::SyntaxKind;
use sable_core::text::{TextPos, TextSpan};

impl<'a> Parser<'a> {
    pub(crate) fn parse_collected_doc_comments(&mut self) -> Vec<&'a DocComment<'a>> {
        let spans = self.scanner.take_doc_comment_spans();
        spans
            .into_iter()
            .map(|span| self.parse_doc_comment_span(span))
            .collect()
    }

    pub(crate) fn parse_doc_comment_span(&mut self, span: TextSpan) -> &'a DocComment<'a> {
        let pos = span.start;
        let end = span.end();
        let raw = self
            .scanner
            .text_slice(pos as usize, end as usize);
        let chars: Vec<char> = raw.chars().collect();

        // Content sits between the `/**` opener and the `*/` closer;
        // an unterminated comment runs to the end of the span.
        let content_start = 2.min(chars.len());
        let content_end = if chars.len() >= 2 && chars[chars.len() - 2..] == ['*', '/'] {
            chars.len() - 2
        } else {
            chars.len()
        };

        let mut cursor = DocCursor {
            chars: &chars[..content_end],
            index: content_start,
            base: pos,
        };

        let description = cursor.take_text_until_tag();
        let comment = if description.is_empty() {
            None
        } else {
            Some(&*self.arena.alloc_str(&description))
        };

        let tags_pos = cursor.position();
        let mut tags = Vec::new();
        while let Some(tag) = self.parse_doc_tag(&mut cursor) {
            tags.push(tag);
        }
        let tags_end = tags
            .last()
            .map(|t: &&DocTag<'_>| t.data.end())
            .unwrap_or(tags_pos);
        let tags = NodeArray::new(tags_pos, tags_end, self.arena.alloc_vec(tags));

        self.node_count += 1;
        let data = NodeData::new(SyntaxKind::DocComment, pos, end, NodeFlags::NONE);
        self.alloc(DocComment {
            data,
            comment,
            tags,
        })
    }

    fn parse_doc_tag(&mut self, cursor: &mut DocCursor<'_>) -> Option<&'a DocTag<'a>> {
        if !cursor.at_tag_start() {
            return None;
        }
        let pos = cursor.position();
        cursor.advance(); // `@`
        let name_pos = cursor.position();
        let tag_text = cursor.take_word();
        let name_end = cursor.position();
        let tag_name = self.make_doc_identifier(&tag_text, name_pos, name_end);

        let kind = match tag_text.as_str() {
            "param" => SyntaxKind::DocParameterTag,
            "returns" | "return" => SyntaxKind::DocReturnTag,
            _ => SyntaxKind::DocTag,
        };

        let name = if kind == SyntaxKind::DocParameterTag {
            cursor.skip_inline_whitespace();
            let param_pos = cursor.position();
            let param_text = cursor.take_word();
            if param_text.is_empty() {
                None
            } else {
                let param_end = cursor.position();
                Some(self.make_doc_identifier(&param_text, param_pos, param_end))
            }
        } else {
            None
        };

        let comment_text = cursor.take_text_until_tag();
        let comment = if comment_text.is_empty() {
            None
        } else {
            Some(&*self.arena.alloc_str(&comment_text))
        };

        let end = cursor.position();
        self.node_count += 1;
        let data = NodeData::new(kind, pos, end, NodeFlags::NONE);
        Some(self.alloc(DocTag {
            data,
            tag_name,
            name,
            comment,
        }))
    }

    fn make_doc_identifier(
        &mut self,
        text: &str,
        pos: TextPos,
        end: TextPos,
    ) -> &'a Identifier<'a> {
        self.identifier_count += 1;
        let interned = self.interner.intern(text);
        let text_str = self.arena.alloc_str(text);
        self.node_count += 1;
        let data = NodeData::new(SyntaxKind::Identifier, pos, end, NodeFlags::NONE);
        self.alloc(Identifier {
            data,
            text: interned,
            text_str,
            original_keyword_kind: None,
        })
    }
}

/// Walks the characters of one comment body, mapping indices back to
/// file positions. Comment positions stay exact because the text was
/// sliced by character offset.
struct DocCursor<'c> {
    chars: &'c [char],
    index: usize,
    base: TextPos,
}

impl DocCursor<'_> {
    fn position(&self) -> TextPos {
        self.base + self.index as TextPos
    }

    fn at_end(&self) -> bool {
        self.index >= self.chars.len()
    }

    fn current(&self) -> Option<char> {
        self.chars.get(self.index).copied()
    }

    fn advance(&mut self) {
        self.index += 1;
    }

    /// Whether the cursor sits on an `@` that opens a tag: preceded
    /// only by whitespace or `*` since the line began.
    fn at_tag_start(&self) -> bool {
        if self.current() != Some('@') {
            return false;
        }
        let mut i = self.index;
        while i > 0 {
            let ch = self.chars[i - 1];
            if ch == '\n' {
                return true;
            }
            if !ch.is_whitespace() && ch != '*' {
                return false;
            }
            i -= 1;
        }
        true
    }

    fn take_word(&mut self) -> String {
        let mut word = String::new();
        while let Some(ch) = self.current() {
            if ch.is_alphanumeric() || ch == '_' || ch == '$' || ch == '.' {
                word.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        word
    }

    fn skip_inline_whitespace(&mut self) {
        while let Some(ch) = self.current() {
            if ch == ' ' || ch == '\t' {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Collect free text up to the next tag or the end of the comment,
    /// stripping the decorative `*` line prefixes.
    fn take_text_until_tag(&mut self) -> String {
        let mut text = String::new();
        let mut at_line_start = true;
        while !self.at_end() && !self.at_tag_start() {
            let ch = self.chars[self.index];
            self.advance();
            if ch == '\n' {
                text.push('\n');
                at_line_start = true;
                continue;
            }
            if at_line_start {
                if ch == ' ' || ch == '\t' || ch == '*' {
                    continue;
                }
                at_line_start = false;
            }
            text.push(ch);
        }
        text.trim().to_string()
    }
}
