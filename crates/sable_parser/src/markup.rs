//! Markup expression grammar for `.sax` files.
//!
//! Markup switches the scanner between modes: inside a tag the normal
//! scanner runs, between tags `scan_markup_token` produces text runs
//! and the four structural tokens. The parser owns every mode switch so
//! the scanner never guesses from context.

use crate::parser::Parser;
use sable_ast::node::*;
use sable_ast::syntax_kind::SyntaxKind;
use sable_core::text::TextPos;
use sable_diagnostics::messages;

use crate::lists::ParsingContext;

impl<'a> Parser<'a> {
    pub(crate) fn parse_markup_element_or_fragment(&mut self) -> Expression<'a> {
        self.parse_markup_worker(true)
    }

    /// `in_expression_context` is true at the outermost element, where
    /// the token after the final `>` belongs to the surrounding
    /// expression; nested children resume markup text scanning instead.
    fn parse_markup_worker(&mut self, in_expression_context: bool) -> Expression<'a> {
        let pos = self.token_pos();
        self.scanner.rescan_less_than_token();
        self.current_token = self.scanner.token();
        self.expect_token(SyntaxKind::LessThanToken);

        if self.token() == SyntaxKind::GreaterThanToken {
            return self.parse_markup_fragment_rest(pos, in_expression_context);
        }

        let tag_name = self.parse_entity_name();
        let attributes = self.parse_markup_attributes();

        if self.token() == SyntaxKind::SlashToken {
            self.next_token();
            let end = self.token_end();
            self.finish_markup_tag(in_expression_context);
            let data = self.finish_node_at(SyntaxKind::MarkupSelfClosingElement, pos, end);
            return Expression::MarkupSelfClosing(self.alloc(MarkupSelfClosingElement {
                data,
                tag_name,
                attributes,
            }));
        }

        let opening_end = self.token_end();
        self.expect_markup_tag_close();
        let opening_data =
            self.finish_node_at(SyntaxKind::MarkupOpeningElement, pos, opening_end);
        let opening_element = self.alloc(MarkupOpeningElement {
            data: opening_data,
            tag_name,
            attributes,
        });

        let children = self.parse_markup_children(Some(opening_element.tag_name));
        let closing_element =
            self.parse_markup_closing_element(opening_element.tag_name, in_expression_context);

        let data = self.finish_node(SyntaxKind::MarkupElement, pos);
        Expression::MarkupElement(self.alloc(MarkupElement {
            data,
            opening_element,
            children,
            closing_element,
        }))
    }

    fn parse_markup_fragment_rest(
        &mut self,
        pos: TextPos,
        in_expression_context: bool,
    ) -> Expression<'a> {
        let opening_end = self.token_end();
        self.expect_markup_tag_close();
        let opening_data =
            self.finish_node_at(SyntaxKind::MarkupOpeningFragment, pos, opening_end);
        let opening_fragment = self.alloc(MarkupOpeningFragment { data: opening_data });

        let children = self.parse_markup_children(None);

        let closing_pos = self.token_pos();
        if self.token() == SyntaxKind::LessThanSlashToken {
            self.next_token();
        } else {
            self.error(&messages::_0_EXPECTED, &["</"]);
        }
        let closing_end = self.token_end();
        if self.token() == SyntaxKind::GreaterThanToken {
            if in_expression_context {
                self.next_token();
            } else {
                self.next_markup_child_token();
            }
        } else {
            self.error(&messages::_0_EXPECTED, &[">"]);
        }
        let closing_data =
            self.finish_node_at(SyntaxKind::MarkupClosingFragment, closing_pos, closing_end);
        let closing_fragment = self.alloc(MarkupClosingFragment { data: closing_data });

        let data = self.finish_node(SyntaxKind::MarkupFragment, pos);
        Expression::MarkupFragment(self.alloc(MarkupFragment {
            data,
            opening_fragment,
            children,
            closing_fragment,
        }))
    }

    /// Consume the `>` that ends an opening tag and switch the scanner
    /// into markup child mode.
    fn expect_markup_tag_close(&mut self) {
        if self.token() == SyntaxKind::GreaterThanToken {
            self.next_markup_child_token();
        } else {
            self.error(&messages::_0_EXPECTED, &[">"]);
        }
    }

    /// Like a self-closing tag's `>`: what follows belongs to the
    /// enclosing context, markup or expression.
    fn finish_markup_tag(&mut self, in_expression_context: bool) {
        if self.token() == SyntaxKind::GreaterThanToken {
            if in_expression_context {
                self.next_token();
            } else {
                self.next_markup_child_token();
            }
        } else {
            self.error(&messages::_0_EXPECTED, &[">"]);
        }
    }

    fn next_markup_child_token(&mut self) {
        self.prev_token_end = self.scanner.token_end() as TextPos;
        self.current_token = self.scanner.scan_markup_token();
    }

    fn parse_markup_children(
        &mut self,
        opening_tag: Option<EntityName<'a>>,
    ) -> NodeArray<'a, MarkupChild<'a>> {
        let list_pos = self.token_pos();
        let mut children = Vec::new();
        loop {
            match self.token() {
                SyntaxKind::LessThanSlashToken => break,
                SyntaxKind::EndOfFileToken => {
                    if let Some(tag) = opening_tag {
                        let text = entity_name_text(tag);
                        self.error(&messages::MARKUP_ELEMENT_HAS_NO_CLOSING_TAG, &[&text]);
                    } else {
                        self.error(&messages::MARKUP_ELEMENT_HAS_NO_CLOSING_TAG, &[""]);
                    }
                    break;
                }
                SyntaxKind::MarkupText => {
                    children.push(MarkupChild::Text(self.parse_markup_text_node()));
                }
                SyntaxKind::OpenBraceToken => {
                    let expression = self.parse_markup_expression(false);
                    children.push(MarkupChild::Expression(expression));
                }
                SyntaxKind::LessThanToken => {
                    let child = self.parse_markup_worker(false);
                    children.push(match child {
                        Expression::MarkupElement(element) => MarkupChild::Element(element),
                        Expression::MarkupSelfClosing(element) => {
                            MarkupChild::SelfClosing(element)
                        }
                        Expression::MarkupFragment(fragment) => MarkupChild::Fragment(fragment),
                        // The worker only returns markup forms; a
                        // recovery identifier becomes an empty
                        // expression child.
                        _ => {
                            let pos = self.token_pos();
                            let data =
                                self.finish_node_at(SyntaxKind::MarkupExpression, pos, pos);
                            MarkupChild::Expression(self.alloc(MarkupExpression {
                                data,
                                dot_dot_dot_token: None,
                                expression: None,
                            }))
                        }
                    });
                }
                _ => break,
            }
        }
        self.make_node_array(children, list_pos)
    }

    fn parse_markup_text_node(&mut self) -> &'a MarkupTextNode<'a> {
        let pos = self.token_pos();
        let end = self.token_end();
        let value = self.scanner.token_value();
        let contains_only_whitespace = value.chars().all(char::is_whitespace);
        let text = self.arena.alloc_str(value);
        self.next_markup_child_token();
        let data = self.finish_node_at(SyntaxKind::MarkupText, pos, end);
        self.alloc(MarkupTextNode {
            data,
            text,
            contains_only_whitespace,
        })
    }

    /// `{expr}`, `{...expr}`, or the invalid `{}` in child or attribute
    /// position.
    fn parse_markup_expression(&mut self, in_attribute: bool) -> &'a MarkupExpression<'a> {
        let pos = self.token_pos();
        self.expect_token(SyntaxKind::OpenBraceToken);

        let (dot_dot_dot_token, expression) = if self.token() == SyntaxKind::CloseBraceToken {
            self.error(&messages::MARKUP_EXPRESSION_CANNOT_BE_EMPTY, &[]);
            (None, None)
        } else {
            let dot_dot_dot_token = self.parse_optional_token(SyntaxKind::DotDotDotToken);
            let expression =
                Some(self.allow_in_and(|p| p.parse_assignment_expression_or_higher()));
            (dot_dot_dot_token, expression)
        };

        if self.token() == SyntaxKind::CloseBraceToken {
            if in_attribute {
                self.next_token();
            } else {
                self.next_markup_child_token();
            }
        } else {
            self.error(&messages::_0_EXPECTED, &["}"]);
        }

        let data = self.finish_node(SyntaxKind::MarkupExpression, pos);
        self.alloc(MarkupExpression {
            data,
            dot_dot_dot_token,
            expression,
        })
    }

    fn parse_markup_attributes(&mut self) -> &'a MarkupAttributes<'a> {
        let pos = self.token_pos();
        let properties = self.parse_list(ParsingContext::MARKUP_ATTRIBUTES, |p| {
            p.parse_markup_attribute_like()
        });
        let data = self.finish_node(SyntaxKind::MarkupAttributes, pos);
        self.alloc(MarkupAttributes { data, properties })
    }

    fn parse_markup_attribute_like(&mut self) -> MarkupAttributeLike<'a> {
        if self.token() == SyntaxKind::OpenBraceToken {
            let pos = self.token_pos();
            self.next_token();
            self.expect_token(SyntaxKind::DotDotDotToken);
            let expression = self.allow_in_and(|p| p.parse_assignment_expression_or_higher());
            self.expect_token(SyntaxKind::CloseBraceToken);
            let data = self.finish_node(SyntaxKind::MarkupSpreadAttribute, pos);
            return MarkupAttributeLike::Spread(
                self.alloc(MarkupSpreadAttribute { data, expression }),
            );
        }

        let pos = self.token_pos();
        let name = self.parse_identifier_name();
        let initializer = if self.token() == SyntaxKind::EqualsToken {
            // The value token is scanned in attribute mode so single
            // quoted strings work.
            self.prev_token_end = self.scanner.token_end() as TextPos;
            self.current_token = self.scanner.scan_markup_attribute_value();
            match self.token() {
                SyntaxKind::StringLiteral => {
                    let value_pos = self.token_pos();
                    let value_end = self.token_end();
                    let text = self.arena.alloc_str(self.scanner.token_value());
                    self.next_token();
                    let data =
                        self.finish_node_at(SyntaxKind::StringLiteral, value_pos, value_end);
                    Some(MarkupAttributeValue::String(
                        self.alloc(StringLiteral { data, text }),
                    ))
                }
                SyntaxKind::OpenBraceToken => Some(MarkupAttributeValue::Expression(
                    self.parse_markup_expression(true),
                )),
                _ => {
                    self.error(&messages::STRING_LITERAL_EXPECTED, &[]);
                    None
                }
            }
        } else {
            None
        };
        let data = self.finish_node(SyntaxKind::MarkupAttribute, pos);
        MarkupAttributeLike::Attribute(self.alloc(MarkupAttribute {
            data,
            name,
            initializer,
        }))
    }

    fn parse_markup_closing_element(
        &mut self,
        opening_tag: EntityName<'a>,
        in_expression_context: bool,
    ) -> &'a MarkupClosingElement<'a> {
        let pos = self.token_pos();
        if self.token() != SyntaxKind::LessThanSlashToken {
            // The children loop already reported the missing tag.
            let tag_name = EntityName::Identifier(self.create_missing_identifier());
            let data = self.finish_node_at(SyntaxKind::MarkupClosingElement, pos, pos);
            return self.alloc(MarkupClosingElement { data, tag_name });
        }
        self.next_token();
        let tag_name = self.parse_entity_name();
        if !tag_names_equal(opening_tag, tag_name) {
            let expected = entity_name_text(opening_tag);
            self.error_at(
                tag_name.node_data().pos(),
                tag_name.node_data().end(),
                &messages::EXPECTED_CLOSING_TAG_TO_MATCH_0,
                &[&expected],
            );
        }
        let end = self.token_end();
        if self.token() == SyntaxKind::GreaterThanToken {
            if in_expression_context {
                self.next_token();
            } else {
                self.next_markup_child_token();
            }
        } else {
            self.error(&messages::_0_EXPECTED, &[">"]);
        }
        let data = self.finish_node_at(SyntaxKind::MarkupClosingElement, pos, end);
        self.alloc(MarkupClosingElement { data, tag_name })
    }
}

/// Structural equality of tag names, by interned text.
fn tag_names_equal(a: EntityName<'_>, b: EntityName<'_>) -> bool {
    match (a, b) {
        (EntityName::Identifier(x), EntityName::Identifier(y)) => x.text == y.text,
        (EntityName::Qualified(x), EntityName::Qualified(y)) => {
            x.right.text == y.right.text && tag_names_equal(x.left, y.left)
        }
        _ => false,
    }
}

fn entity_name_text(name: EntityName<'_>) -> String {
    match name {
        EntityName::Identifier(identifier) => identifier.text_str.to_string(),
        EntityName::Qualified(qualified) => {
            let mut text = entity_name_text(qualified.left);
            text.push('.');
            text.push_str(qualified.right.text_str);
            text
        }
    }
}
