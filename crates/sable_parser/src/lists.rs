//! List parsing and error recovery.
//!
//! Every repeated production goes through `parse_list` or
//! `parse_delimited_list`. When neither an element nor a terminator is
//! recognizable, the recovery rule is: report one context-appropriate
//! error, then either skip a single token or abort the list entirely if
//! an enclosing list could parse the current token.
//!
//! Two list kinds are folded into neighbors rather than given their own
//! bit: parameters of ambient and overload signatures use `PARAMETERS`
//! (the no-initializer restriction lives in the grammar layer), and the
//! name/parameter words of `@param` tags are consumed by the doc
//! sub-parser, which never nests inside another list.

use crate::parser::Parser;
use bitflags::bitflags;
use sable_ast::node::NodeArray;
use sable_ast::syntax_kind::SyntaxKind;
use sable_core::text::TextPos;
use sable_diagnostics::{messages, DiagnosticMessage};

bitflags! {
    /// The kinds of lists the parser can be inside, as a bitmask so
    /// recovery can ask "could any enclosing list own this token".
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub(crate) struct ParsingContext: u32 {
        const SOURCE_ELEMENTS = 1 << 0;
        const BLOCK_STATEMENTS = 1 << 1;
        const SWITCH_CLAUSES = 1 << 2;
        const SWITCH_CLAUSE_STATEMENTS = 1 << 3;
        const TYPE_MEMBERS = 1 << 4;
        const CLASS_MEMBERS = 1 << 5;
        const ENUM_MEMBERS = 1 << 6;
        const HERITAGE_CLAUSE_ELEMENT = 1 << 7;
        const VARIABLE_DECLARATIONS = 1 << 8;
        const OBJECT_BINDING_ELEMENTS = 1 << 9;
        const ARRAY_BINDING_ELEMENTS = 1 << 10;
        const ARGUMENT_EXPRESSIONS = 1 << 11;
        const OBJECT_LITERAL_MEMBERS = 1 << 12;
        const ARRAY_LITERAL_MEMBERS = 1 << 13;
        const PARAMETERS = 1 << 14;
        const TYPE_PARAMETERS = 1 << 15;
        const TYPE_ARGUMENTS = 1 << 16;
        const TUPLE_ELEMENT_TYPES = 1 << 17;
        const IMPORT_OR_EXPORT_SPECIFIERS = 1 << 18;
        const MARKUP_ATTRIBUTES = 1 << 19;
        const MARKUP_CHILDREN = 1 << 20;
    }
}

impl<'a> Parser<'a> {
    /// Parse an undelimited list (statements, class members, switch
    /// clauses). Runs until a terminator for `context` or end of file.
    pub(crate) fn parse_list<T>(
        &mut self,
        context: ParsingContext,
        mut parse_element: impl FnMut(&mut Self) -> T,
    ) -> NodeArray<'a, T> {
        let saved = self.parsing_context;
        self.parsing_context |= context;
        let pos = self.token_pos();
        let mut elements = Vec::new();

        while !self.is_list_terminator(context) {
            if self.is_list_element(context, false) {
                elements.push(parse_element(self));
                continue;
            }
            if self.abort_parsing_list_or_move_to_next_token(context) {
                break;
            }
        }

        self.parsing_context = saved;
        self.make_node_array(elements, pos)
    }

    /// Parse a comma-delimited list. Records a trailing separator on
    /// the array span so `[a, b,]` survives a reprint.
    pub(crate) fn parse_delimited_list<T>(
        &mut self,
        context: ParsingContext,
        mut parse_element: impl FnMut(&mut Self) -> T,
    ) -> NodeArray<'a, T> {
        let saved = self.parsing_context;
        self.parsing_context |= context;
        let pos = self.token_pos();
        let mut elements = Vec::new();
        let mut trailing_separator = false;

        loop {
            if self.is_list_element(context, false) {
                let element_start = self.token_pos();
                elements.push(parse_element(self));
                trailing_separator = false;

                if self.parse_optional(SyntaxKind::CommaToken) {
                    trailing_separator = true;
                    continue;
                }
                if self.is_list_terminator(context) {
                    break;
                }
                // No comma and no terminator. Report the missing comma
                // and try to continue with the next element.
                self.error(&messages::_0_EXPECTED, &[","]);
                // A declaration list has no closing bracket; a token
                // that reads as the start of a new statement belongs to
                // the enclosing list, not to this one.
                if context == ParsingContext::VARIABLE_DECLARATIONS
                    && self.enclosing_context_owns_token(context)
                {
                    break;
                }
                if self.token_pos() == element_start {
                    // The element parser made no progress; skip a token
                    // so the loop cannot spin.
                    self.next_token();
                }
                continue;
            }
            if self.is_list_terminator(context) {
                break;
            }
            if self.abort_parsing_list_or_move_to_next_token(context) {
                break;
            }
        }

        self.parsing_context = saved;
        let array = self.make_node_array(elements, pos);
        array.span.set_has_trailing_separator(trailing_separator);
        array
    }

    /// Parse a bracketed delimited list: consume `open`, the elements,
    /// and `close`.
    pub(crate) fn parse_bracketed_list<T>(
        &mut self,
        context: ParsingContext,
        open: SyntaxKind,
        close: SyntaxKind,
        parse_element: impl FnMut(&mut Self) -> T,
    ) -> NodeArray<'a, T> {
        if self.parse_optional(open) {
            let list = self.parse_delimited_list(context, parse_element);
            self.expect_token(close);
            return list;
        }
        self.error(&messages::_0_EXPECTED, &[open.token_text().unwrap_or("token")]);
        NodeArray::empty(self.token_pos())
    }

    /// Whether the current token can start an element of `context`. In
    /// error recovery the predicates loosen slightly so a salvageable
    /// token is not thrown away.
    pub(crate) fn is_list_element(&mut self, context: ParsingContext, in_error_recovery: bool) -> bool {
        match context {
            ParsingContext::SOURCE_ELEMENTS
            | ParsingContext::BLOCK_STATEMENTS
            | ParsingContext::SWITCH_CLAUSE_STATEMENTS => {
                !(self.token() == SyntaxKind::SemicolonToken && in_error_recovery)
                    && self.is_start_of_statement()
            }
            ParsingContext::SWITCH_CLAUSES => matches!(
                self.token(),
                SyntaxKind::CaseKeyword | SyntaxKind::DefaultKeyword
            ),
            ParsingContext::TYPE_MEMBERS => self.is_start_of_type_member(),
            ParsingContext::CLASS_MEMBERS => self.is_start_of_class_member(),
            ParsingContext::ENUM_MEMBERS => {
                self.token() == SyntaxKind::OpenBracketToken || self.is_property_name_start()
            }
            ParsingContext::OBJECT_LITERAL_MEMBERS => match self.token() {
                SyntaxKind::OpenBracketToken
                | SyntaxKind::AsteriskToken
                | SyntaxKind::DotDotDotToken => true,
                _ => self.is_property_name_start(),
            },
            ParsingContext::HERITAGE_CLAUSE_ELEMENT => self.is_start_of_expression(),
            ParsingContext::VARIABLE_DECLARATIONS => self.is_binding_name_start(),
            ParsingContext::OBJECT_BINDING_ELEMENTS => {
                matches!(self.token(), SyntaxKind::DotDotDotToken)
                    || self.is_property_name_start()
            }
            ParsingContext::ARRAY_BINDING_ELEMENTS => {
                matches!(
                    self.token(),
                    SyntaxKind::CommaToken | SyntaxKind::DotDotDotToken
                ) || self.is_binding_name_start()
            }
            ParsingContext::ARGUMENT_EXPRESSIONS | ParsingContext::ARRAY_LITERAL_MEMBERS => {
                self.token() == SyntaxKind::CommaToken
                    || self.token() == SyntaxKind::DotDotDotToken
                    || self.is_start_of_expression()
            }
            ParsingContext::PARAMETERS => self.is_start_of_parameter(),
            ParsingContext::TYPE_PARAMETERS => self.is_identifier_token(),
            ParsingContext::TYPE_ARGUMENTS | ParsingContext::TUPLE_ELEMENT_TYPES => {
                self.token() == SyntaxKind::CommaToken || self.is_start_of_type()
            }
            ParsingContext::IMPORT_OR_EXPORT_SPECIFIERS => {
                self.token() == SyntaxKind::Identifier || self.token().is_keyword()
            }
            ParsingContext::MARKUP_ATTRIBUTES => {
                self.token() == SyntaxKind::OpenBraceToken
                    || self.token() == SyntaxKind::Identifier
                    || self.token().is_keyword()
            }
            _ => false,
        }
    }

    /// Whether the current token ends the list for `context`.
    pub(crate) fn is_list_terminator(&mut self, context: ParsingContext) -> bool {
        if self.token() == SyntaxKind::EndOfFileToken {
            return true;
        }
        match context {
            ParsingContext::SOURCE_ELEMENTS => false,
            ParsingContext::BLOCK_STATEMENTS
            | ParsingContext::SWITCH_CLAUSES
            | ParsingContext::TYPE_MEMBERS
            | ParsingContext::CLASS_MEMBERS
            | ParsingContext::ENUM_MEMBERS
            | ParsingContext::OBJECT_LITERAL_MEMBERS
            | ParsingContext::OBJECT_BINDING_ELEMENTS
            | ParsingContext::IMPORT_OR_EXPORT_SPECIFIERS => {
                self.token() == SyntaxKind::CloseBraceToken
            }
            ParsingContext::SWITCH_CLAUSE_STATEMENTS => matches!(
                self.token(),
                SyntaxKind::CaseKeyword | SyntaxKind::DefaultKeyword | SyntaxKind::CloseBraceToken
            ),
            ParsingContext::HERITAGE_CLAUSE_ELEMENT => matches!(
                self.token(),
                SyntaxKind::OpenBraceToken
                    | SyntaxKind::CloseBraceToken
                    | SyntaxKind::ExtendsKeyword
                    | SyntaxKind::ImplementsKeyword
            ),
            ParsingContext::VARIABLE_DECLARATIONS => {
                // A declaration list has no closing bracket; it ends at
                // anything that cannot continue it.
                matches!(
                    self.token(),
                    SyntaxKind::SemicolonToken
                        | SyntaxKind::CloseBraceToken
                        | SyntaxKind::CloseParenToken
                        | SyntaxKind::InKeyword
                        | SyntaxKind::OfKeyword
                ) || self.can_parse_semicolon()
            }
            ParsingContext::ARRAY_BINDING_ELEMENTS
            | ParsingContext::ARRAY_LITERAL_MEMBERS
            | ParsingContext::TUPLE_ELEMENT_TYPES => {
                self.token() == SyntaxKind::CloseBracketToken
            }
            ParsingContext::ARGUMENT_EXPRESSIONS | ParsingContext::PARAMETERS => {
                matches!(
                    self.token(),
                    SyntaxKind::CloseParenToken | SyntaxKind::CloseBracketToken
                )
            }
            ParsingContext::TYPE_PARAMETERS | ParsingContext::TYPE_ARGUMENTS => matches!(
                self.token(),
                SyntaxKind::GreaterThanToken
                    | SyntaxKind::OpenParenToken
                    | SyntaxKind::CloseParenToken
            ),
            ParsingContext::MARKUP_ATTRIBUTES => matches!(
                self.token(),
                SyntaxKind::GreaterThanToken | SyntaxKind::SlashToken
            ),
            ParsingContext::MARKUP_CHILDREN => self.token() == SyntaxKind::LessThanSlashToken,
            _ => false,
        }
    }

    /// Recovery after an unrecognized token inside a list. Returns true
    /// when the list should abort because an enclosing context can make
    /// sense of the token.
    fn abort_parsing_list_or_move_to_next_token(&mut self, context: ParsingContext) -> bool {
        let (message, args): (&DiagnosticMessage, &[&str]) = parsing_context_error(context);
        self.error(message, args);

        if self.enclosing_context_owns_token(context) {
            return true;
        }
        self.next_token();
        false
    }

    /// Whether any enclosing list could parse the current token, either
    /// as an element or as its terminator.
    fn enclosing_context_owns_token(&mut self, context: ParsingContext) -> bool {
        let enclosing = self.parsing_context - context;
        for bit in enclosing.iter() {
            if self.is_list_element(bit, true) || self.is_list_terminator(bit) {
                return true;
            }
        }
        false
    }

    /// Skip tokens until something that can start a statement, used
    /// after an unparseable statement head.
    pub(crate) fn skip_to_next_statement(&mut self) {
        loop {
            match self.token() {
                SyntaxKind::EndOfFileToken
                | SyntaxKind::SemicolonToken
                | SyntaxKind::CloseBraceToken => return,
                _ if self.is_start_of_statement() => return,
                _ => {
                    self.next_token();
                }
            }
        }
    }

    pub(crate) fn list_end_pos(&self) -> TextPos {
        self.token_pos()
    }
}

fn parsing_context_error(context: ParsingContext) -> (&'static DiagnosticMessage, &'static [&'static str]) {
    let message = match context {
        ParsingContext::SOURCE_ELEMENTS
        | ParsingContext::BLOCK_STATEMENTS
        | ParsingContext::SWITCH_CLAUSE_STATEMENTS => &messages::DECLARATION_OR_STATEMENT_EXPECTED,
        ParsingContext::SWITCH_CLAUSES => &messages::CASE_OR_DEFAULT_EXPECTED,
        ParsingContext::TYPE_MEMBERS => &messages::PROPERTY_OR_SIGNATURE_EXPECTED,
        ParsingContext::CLASS_MEMBERS => &messages::DECLARATION_EXPECTED,
        ParsingContext::ENUM_MEMBERS => &messages::ENUM_MEMBER_EXPECTED,
        ParsingContext::HERITAGE_CLAUSE_ELEMENT => &messages::EXPRESSION_EXPECTED,
        ParsingContext::VARIABLE_DECLARATIONS
        | ParsingContext::OBJECT_BINDING_ELEMENTS
        | ParsingContext::ARRAY_BINDING_ELEMENTS => &messages::VARIABLE_DECLARATION_EXPECTED,
        ParsingContext::ARGUMENT_EXPRESSIONS => &messages::ARGUMENT_EXPRESSION_EXPECTED,
        ParsingContext::OBJECT_LITERAL_MEMBERS => &messages::PROPERTY_ASSIGNMENT_EXPECTED,
        ParsingContext::ARRAY_LITERAL_MEMBERS => &messages::EXPRESSION_OR_COMMA_EXPECTED,
        ParsingContext::PARAMETERS => &messages::PARAMETER_DECLARATION_EXPECTED,
        ParsingContext::TYPE_PARAMETERS => &messages::TYPE_PARAMETER_DECLARATION_EXPECTED,
        ParsingContext::TYPE_ARGUMENTS => &messages::TYPE_ARGUMENT_EXPECTED,
        ParsingContext::TUPLE_ELEMENT_TYPES => &messages::TYPE_EXPECTED,
        ParsingContext::IMPORT_OR_EXPORT_SPECIFIERS => &messages::IMPORT_OR_EXPORT_SPECIFIER_EXPECTED,
        ParsingContext::MARKUP_ATTRIBUTES => &messages::MARKUP_ATTRIBUTE_EXPECTED,
        _ => &messages::UNEXPECTED_TOKEN,
    };
    (message, &[])
}
