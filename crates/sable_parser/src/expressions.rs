//! Expression grammar.
//!
//! Binary operators are parsed by precedence climbing over the table in
//! `precedence`; `**` is the one right-associative case. The `<` token
//! is three-ways ambiguous in expression position (less-than, type
//! argument list, type assertion or markup) and is resolved here with
//! bounded speculation.

use crate::lists::ParsingContext;
use crate::parser::Parser;
use crate::precedence::{get_binary_operator_precedence, OperatorPrecedence};
use sable_ast::flags::NodeFlags;
use sable_ast::node::*;
use sable_ast::syntax_kind::SyntaxKind;
use sable_core::text::TextPos;
use sable_diagnostics::messages;

/// Outcome of the parenthesized-arrow-function probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ArrowState {
    /// Certainly an arrow function; parse it without speculation so its
    /// errors surface.
    Definite,
    /// Certainly not an arrow function.
    Impossible,
    /// Cannot tell from a fixed lookahead; parse speculatively.
    Unknown,
}

impl<'a> Parser<'a> {
    /// Whether the current token can begin an expression.
    pub(crate) fn is_start_of_expression(&mut self) -> bool {
        match self.token() {
            SyntaxKind::PlusToken
            | SyntaxKind::MinusToken
            | SyntaxKind::TildeToken
            | SyntaxKind::ExclamationToken
            | SyntaxKind::PlusPlusToken
            | SyntaxKind::MinusMinusToken
            | SyntaxKind::DeleteKeyword
            | SyntaxKind::TypeOfKeyword
            | SyntaxKind::VoidKeyword
            | SyntaxKind::AwaitKeyword
            | SyntaxKind::YieldKeyword
            | SyntaxKind::LessThanToken
            | SyntaxKind::LessThanLessThanToken
            | SyntaxKind::DotDotDotToken => true,
            _ => self.is_start_of_left_hand_side_expression(),
        }
    }

    fn is_start_of_left_hand_side_expression(&mut self) -> bool {
        match self.token() {
            SyntaxKind::ThisKeyword
            | SyntaxKind::SuperKeyword
            | SyntaxKind::NullKeyword
            | SyntaxKind::TrueKeyword
            | SyntaxKind::FalseKeyword
            | SyntaxKind::NumericLiteral
            | SyntaxKind::BigIntLiteral
            | SyntaxKind::StringLiteral
            | SyntaxKind::NoSubstitutionTemplateLiteral
            | SyntaxKind::TemplateHead
            | SyntaxKind::OpenParenToken
            | SyntaxKind::OpenBracketToken
            | SyntaxKind::OpenBraceToken
            | SyntaxKind::FunctionKeyword
            | SyntaxKind::ClassKeyword
            | SyntaxKind::NewKeyword
            | SyntaxKind::SlashToken
            | SyntaxKind::SlashEqualsToken
            | SyntaxKind::PrivateIdentifier => true,
            _ => self.is_identifier_token(),
        }
    }

    /// The comma-operator level: `a, b, c`.
    pub(crate) fn parse_expression(&mut self) -> Expression<'a> {
        let pos = self.token_pos();
        let mut expression = self.parse_assignment_expression_or_higher();
        while self.token() == SyntaxKind::CommaToken {
            let operator_token = self.consume_token();
            let right = self.parse_assignment_expression_or_higher();
            let data = self.finish_node(SyntaxKind::BinaryExpression, pos);
            expression = Expression::Binary(self.alloc(BinaryExpression {
                data,
                left: expression,
                operator_token,
                right,
            }));
        }
        expression
    }

    pub(crate) fn parse_assignment_expression_or_higher(&mut self) -> Expression<'a> {
        if !self.enter_recursion() {
            self.exit_recursion();
            return Expression::Identifier(self.create_missing_identifier());
        }
        let result = self.parse_assignment_expression_inner();
        self.exit_recursion();
        result
    }

    fn parse_assignment_expression_inner(&mut self) -> Expression<'a> {
        if self.is_yield_expression_start() {
            return self.parse_yield_expression();
        }
        if let Some(arrow) = self.try_parse_arrow_function() {
            return arrow;
        }

        let pos = self.token_pos();
        let expression = self.parse_binary_expression_or_higher(OperatorPrecedence::LOWEST);

        if self.token().is_assignment_operator() && is_left_hand_side_expression(expression) {
            let operator_token = self.consume_token();
            let right = self.parse_assignment_expression_or_higher();
            let data = self.finish_node(SyntaxKind::BinaryExpression, pos);
            return Expression::Binary(self.alloc(BinaryExpression {
                data,
                left: expression,
                operator_token,
                right,
            }));
        }

        self.parse_conditional_expression_rest(expression, pos)
    }

    fn parse_conditional_expression_rest(
        &mut self,
        condition: Expression<'a>,
        pos: TextPos,
    ) -> Expression<'a> {
        let Some(question_token) = self.parse_optional_token(SyntaxKind::QuestionToken) else {
            return condition;
        };
        // The branch before `:` always allows `in`.
        let when_true = self.allow_in_and(|p| p.parse_assignment_expression_or_higher());
        let colon_token = self.expect_token(SyntaxKind::ColonToken);
        let when_false = self.parse_assignment_expression_or_higher();
        let data = self.finish_node(SyntaxKind::ConditionalExpression, pos);
        Expression::Conditional(self.alloc(ConditionalExpression {
            data,
            condition,
            question_token,
            when_true,
            colon_token,
            when_false,
        }))
    }

    // ========================================================================
    // Binary operators
    // ========================================================================

    pub(crate) fn parse_binary_expression_or_higher(
        &mut self,
        min_precedence: OperatorPrecedence,
    ) -> Expression<'a> {
        let pos = self.token_pos();
        let left = self.parse_unary_expression_or_higher();
        self.parse_binary_expression_rest(min_precedence, left, pos)
    }

    fn parse_binary_expression_rest(
        &mut self,
        min_precedence: OperatorPrecedence,
        mut left: Expression<'a>,
        pos: TextPos,
    ) -> Expression<'a> {
        loop {
            if self.token() == SyntaxKind::GreaterThanToken {
                self.scanner.rescan_greater_than_token();
                self.current_token = self.scanner.token();
            }
            let precedence = get_binary_operator_precedence(self.token());
            if precedence == OperatorPrecedence::Invalid {
                break;
            }
            // `**` is right-associative; everything else left.
            let consume = if self.token() == SyntaxKind::AsteriskAsteriskToken {
                precedence >= min_precedence
            } else {
                precedence > min_precedence
            };
            if !consume {
                break;
            }
            if self.token() == SyntaxKind::InKeyword && self.in_disallow_in_context() {
                break;
            }

            if self.token() == SyntaxKind::AsKeyword
                || self.token() == SyntaxKind::SatisfiesKeyword
            {
                // `as` and `satisfies` on a new line are identifiers,
                // not operators.
                if self.has_preceding_line_break() {
                    break;
                }
                let is_satisfies = self.token() == SyntaxKind::SatisfiesKeyword;
                self.next_token();
                let type_node = self.parse_type();
                let data = self.finish_node(
                    if is_satisfies {
                        SyntaxKind::SatisfiesExpression
                    } else {
                        SyntaxKind::AsExpression
                    },
                    pos,
                );
                left = if is_satisfies {
                    Expression::Satisfies(self.alloc(SatisfiesExpression {
                        data,
                        expression: left,
                        type_node,
                    }))
                } else {
                    Expression::As(self.alloc(AsExpression {
                        data,
                        expression: left,
                        type_node,
                    }))
                };
                continue;
            }

            let operator_token = self.consume_token();
            let right = self.parse_binary_expression_or_higher(precedence);
            let data = self.finish_node(SyntaxKind::BinaryExpression, pos);
            left = Expression::Binary(self.alloc(BinaryExpression {
                data,
                left,
                operator_token,
                right,
            }));
        }
        left
    }

    // ========================================================================
    // Unary operators
    // ========================================================================

    fn parse_unary_expression_or_higher(&mut self) -> Expression<'a> {
        match self.token() {
            SyntaxKind::PlusToken
            | SyntaxKind::MinusToken
            | SyntaxKind::TildeToken
            | SyntaxKind::ExclamationToken
            | SyntaxKind::PlusPlusToken
            | SyntaxKind::MinusMinusToken => {
                let pos = self.token_pos();
                let operator = self.token();
                self.next_token();
                let operand = self.parse_unary_expression_or_higher();
                let data = self.finish_node(SyntaxKind::PrefixUnaryExpression, pos);
                Expression::PrefixUnary(self.alloc(PrefixUnaryExpression {
                    data,
                    operator,
                    operand,
                }))
            }
            SyntaxKind::DeleteKeyword => self.parse_keyword_unary(SyntaxKind::DeleteExpression),
            SyntaxKind::TypeOfKeyword => self.parse_keyword_unary(SyntaxKind::TypeOfExpression),
            SyntaxKind::VoidKeyword => self.parse_keyword_unary(SyntaxKind::VoidExpression),
            SyntaxKind::AwaitKeyword if self.in_await_context() => {
                self.parse_keyword_unary(SyntaxKind::AwaitExpression)
            }
            SyntaxKind::LessThanToken | SyntaxKind::LessThanLessThanToken => {
                if self.scanner.language_variant() == LanguageVariant::Markup {
                    self.parse_markup_element_or_fragment()
                } else {
                    self.parse_type_assertion()
                }
            }
            _ => self.parse_update_expression(),
        }
    }

    fn parse_keyword_unary(&mut self, kind: SyntaxKind) -> Expression<'a> {
        let pos = self.token_pos();
        self.next_token();
        let expression = self.parse_unary_expression_or_higher();
        let data = self.finish_node(kind, pos);
        match kind {
            SyntaxKind::DeleteExpression => {
                Expression::Delete(self.alloc(DeleteExpression { data, expression }))
            }
            SyntaxKind::TypeOfExpression => {
                Expression::TypeOf(self.alloc(TypeOfExpression { data, expression }))
            }
            SyntaxKind::VoidExpression => {
                Expression::Void(self.alloc(VoidExpression { data, expression }))
            }
            _ => Expression::Await(self.alloc(AwaitExpression { data, expression })),
        }
    }

    /// `<T>expr` in standard-variant files.
    fn parse_type_assertion(&mut self) -> Expression<'a> {
        let pos = self.token_pos();
        self.scanner.rescan_less_than_token();
        self.current_token = self.scanner.token();
        self.expect_token(SyntaxKind::LessThanToken);
        let type_node = self.parse_type();
        self.expect_token(SyntaxKind::GreaterThanToken);
        let expression = self.parse_unary_expression_or_higher();
        let data = self.finish_node(SyntaxKind::TypeAssertionExpression, pos);
        Expression::TypeAssertion(self.alloc(TypeAssertionExpression {
            data,
            type_node,
            expression,
        }))
    }

    fn parse_update_expression(&mut self) -> Expression<'a> {
        let pos = self.token_pos();
        let expression = self.parse_left_hand_side_expression();
        if (self.token() == SyntaxKind::PlusPlusToken
            || self.token() == SyntaxKind::MinusMinusToken)
            && !self.has_preceding_line_break()
        {
            let operator = self.token();
            self.next_token();
            let data = self.finish_node(SyntaxKind::PostfixUnaryExpression, pos);
            return Expression::PostfixUnary(self.alloc(PostfixUnaryExpression {
                data,
                operand: expression,
                operator,
            }));
        }
        expression
    }

    // ========================================================================
    // Left-hand side: member access, calls, optional chains
    // ========================================================================

    pub(crate) fn parse_left_hand_side_expression(&mut self) -> Expression<'a> {
        let pos = self.token_pos();
        let expression = self.parse_member_expression_or_higher();
        self.parse_call_expression_rest(pos, expression)
    }

    fn parse_member_expression_or_higher(&mut self) -> Expression<'a> {
        let pos = self.token_pos();
        let expression = self.parse_primary_expression();
        self.parse_member_expression_rest(pos, expression)
    }

    fn parse_member_expression_rest(
        &mut self,
        pos: TextPos,
        mut expression: Expression<'a>,
    ) -> Expression<'a> {
        loop {
            match self.token() {
                SyntaxKind::DotToken => {
                    self.next_token();
                    let name = self.parse_member_name();
                    let data = self.finish_node(SyntaxKind::PropertyAccessExpression, pos);
                    expression = Expression::PropertyAccess(self.alloc(PropertyAccessExpression {
                        data,
                        expression,
                        question_dot_token: None,
                        name,
                    }));
                }
                SyntaxKind::QuestionDotToken => {
                    // `?.(` belongs to the call layer above.
                    if self.look_ahead(|p| {
                        p.next_token();
                        p.token() == SyntaxKind::OpenParenToken
                            || p.token() == SyntaxKind::LessThanToken
                    }) {
                        break;
                    }
                    let question_dot_token = Some(self.consume_token());
                    if self.parse_optional(SyntaxKind::OpenBracketToken) {
                        let argument_expression = self.element_access_argument();
                        self.expect_token(SyntaxKind::CloseBracketToken);
                        let data = self.finish_node(SyntaxKind::ElementAccessExpression, pos);
                        expression =
                            Expression::ElementAccess(self.alloc(ElementAccessExpression {
                                data,
                                expression,
                                question_dot_token,
                                argument_expression,
                            }));
                    } else {
                        let name = self.parse_member_name();
                        let data = self.finish_node(SyntaxKind::PropertyAccessExpression, pos);
                        expression =
                            Expression::PropertyAccess(self.alloc(PropertyAccessExpression {
                                data,
                                expression,
                                question_dot_token,
                                name,
                            }));
                    }
                }
                SyntaxKind::OpenBracketToken => {
                    self.next_token();
                    let argument_expression = self.element_access_argument();
                    self.expect_token(SyntaxKind::CloseBracketToken);
                    let data = self.finish_node(SyntaxKind::ElementAccessExpression, pos);
                    expression = Expression::ElementAccess(self.alloc(ElementAccessExpression {
                        data,
                        expression,
                        question_dot_token: None,
                        argument_expression,
                    }));
                }
                SyntaxKind::ExclamationToken if !self.has_preceding_line_break() => {
                    self.next_token();
                    let data = self.finish_node(SyntaxKind::NonNullExpression, pos);
                    expression = Expression::NonNull(self.alloc(NonNullExpression {
                        data,
                        expression,
                    }));
                }
                SyntaxKind::NoSubstitutionTemplateLiteral | SyntaxKind::TemplateHead => {
                    expression = self.parse_tagged_template_rest(pos, expression, None);
                }
                _ => break,
            }
        }
        expression
    }

    fn element_access_argument(&mut self) -> Expression<'a> {
        if self.token() == SyntaxKind::CloseBracketToken {
            self.error(&messages::ELEMENT_ACCESS_EXPRESSION_SHOULD_TAKE_AN_ARGUMENT, &[]);
            return Expression::Identifier(self.create_missing_identifier());
        }
        self.allow_in_and(|p| p.parse_expression())
    }

    fn parse_member_name(&mut self) -> MemberName<'a> {
        if self.token() == SyntaxKind::PrivateIdentifier {
            let pos = self.token_pos();
            let end = self.token_end();
            let value = self.scanner.token_value().to_string();
            self.next_token();
            self.identifier_count += 1;
            let text = self.interner.intern(&value);
            let text_str = self.arena.alloc_str(&value);
            let data = self.finish_node_at(SyntaxKind::PrivateIdentifier, pos, end);
            return MemberName::Private(self.alloc(PrivateIdentifier {
                data,
                text,
                text_str,
            }));
        }
        MemberName::Identifier(self.parse_identifier_name())
    }

    fn parse_call_expression_rest(
        &mut self,
        pos: TextPos,
        mut expression: Expression<'a>,
    ) -> Expression<'a> {
        loop {
            expression = self.parse_member_expression_rest(pos, expression);

            let question_dot_token = if self.token() == SyntaxKind::QuestionDotToken
                && self.look_ahead(|p| {
                    p.next_token();
                    p.token() == SyntaxKind::OpenParenToken
                        || p.token() == SyntaxKind::LessThanToken
                }) {
                Some(self.consume_token())
            } else {
                None
            };

            if self.token() == SyntaxKind::LessThanToken
                || self.token() == SyntaxKind::LessThanLessThanToken
            {
                // Could be `f<T>(...)`, a tagged template with type
                // arguments, or a plain relational chain.
                let speculation_question_dot = question_dot_token.clone();
                let speculated = self.try_parse(|p| {
                    let type_arguments = p.parse_type_arguments_in_expression()?;
                    match p.token() {
                        SyntaxKind::OpenParenToken => {
                            let arguments = p.parse_argument_list();
                            let data = p.finish_node(SyntaxKind::CallExpression, pos);
                            Some(Expression::Call(p.alloc(CallExpression {
                                data,
                                expression,
                                question_dot_token: speculation_question_dot,
                                type_arguments: Some(type_arguments),
                                arguments,
                            })))
                        }
                        SyntaxKind::NoSubstitutionTemplateLiteral | SyntaxKind::TemplateHead => {
                            Some(p.parse_tagged_template_rest(
                                pos,
                                expression,
                                Some(type_arguments),
                            ))
                        }
                        _ => None,
                    }
                });
                match speculated {
                    Some(call) => {
                        expression = call;
                        continue;
                    }
                    None if question_dot_token.is_some() => {
                        // `a?.<` that is not a call: degrade gracefully.
                        self.error(&messages::EXPRESSION_EXPECTED, &[]);
                        break;
                    }
                    None => break,
                }
            }

            if self.token() == SyntaxKind::OpenParenToken {
                let arguments = self.parse_argument_list();
                let data = self.finish_node(SyntaxKind::CallExpression, pos);
                expression = Expression::Call(self.alloc(CallExpression {
                    data,
                    expression,
                    question_dot_token,
                    type_arguments: None,
                    arguments,
                }));
                continue;
            }

            break;
        }
        expression
    }

    fn parse_argument_list(&mut self) -> NodeArray<'a, Expression<'a>> {
        self.expect_token(SyntaxKind::OpenParenToken);
        let arguments = self.allow_in_and(|p| {
            p.parse_delimited_list(ParsingContext::ARGUMENT_EXPRESSIONS, |p| {
                p.parse_argument_expression()
            })
        });
        self.expect_token(SyntaxKind::CloseParenToken);
        arguments
    }

    fn parse_argument_expression(&mut self) -> Expression<'a> {
        if self.token() == SyntaxKind::DotDotDotToken {
            return self.parse_spread_element();
        }
        self.parse_assignment_expression_or_higher()
    }

    fn parse_spread_element(&mut self) -> Expression<'a> {
        let pos = self.token_pos();
        self.expect_token(SyntaxKind::DotDotDotToken);
        let expression = self.parse_assignment_expression_or_higher();
        let data = self.finish_node(SyntaxKind::SpreadElement, pos);
        Expression::Spread(self.alloc(SpreadElement { data, expression }))
    }

    /// `<T...>` in expression position. Returns `None` when what
    /// follows makes the type-argument reading untenable, rolling the
    /// scanner back to the `<`.
    fn parse_type_arguments_in_expression(&mut self) -> Option<NodeArray<'a, TypeNode<'a>>> {
        if self.has_preceding_line_break() {
            return None;
        }
        self.scanner.rescan_less_than_token();
        self.current_token = self.scanner.token();
        if self.token() != SyntaxKind::LessThanToken {
            return None;
        }
        self.next_token();
        let type_arguments =
            self.parse_delimited_list(ParsingContext::TYPE_ARGUMENTS, |p| p.parse_type());
        if self.token() != SyntaxKind::GreaterThanToken {
            return None;
        }
        self.next_token();
        if type_arguments.is_empty() {
            return None;
        }
        // Only a call or a tagged template can follow; the caller
        // checks which.
        match self.token() {
            SyntaxKind::OpenParenToken
            | SyntaxKind::NoSubstitutionTemplateLiteral
            | SyntaxKind::TemplateHead => Some(type_arguments),
            _ => None,
        }
    }

    fn parse_tagged_template_rest(
        &mut self,
        pos: TextPos,
        tag: Expression<'a>,
        type_arguments: Option<NodeArray<'a, TypeNode<'a>>>,
    ) -> Expression<'a> {
        let template = if self.token() == SyntaxKind::NoSubstitutionTemplateLiteral {
            let literal = self.parse_no_substitution_template();
            TemplateLiteral::NoSubstitution(literal)
        } else {
            TemplateLiteral::Template(self.parse_template_expression())
        };
        let data = self.finish_node(SyntaxKind::TaggedTemplateExpression, pos);
        Expression::TaggedTemplate(self.alloc(TaggedTemplateExpression {
            data,
            tag,
            type_arguments,
            template,
        }))
    }

    // ========================================================================
    // new
    // ========================================================================

    fn parse_new_expression(&mut self) -> Expression<'a> {
        let pos = self.token_pos();
        self.expect_token(SyntaxKind::NewKeyword);
        let target_pos = self.token_pos();
        let primary = self.parse_primary_expression();
        let expression = self.parse_member_expression_rest(target_pos, primary);
        let type_arguments = if self.token() == SyntaxKind::LessThanToken {
            self.try_parse(|p| p.parse_type_arguments_for_new())
        } else {
            None
        };
        let arguments = if self.token() == SyntaxKind::OpenParenToken {
            Some(self.parse_argument_list())
        } else {
            None
        };
        let data = self.finish_node(SyntaxKind::NewExpression, pos);
        Expression::New(self.alloc(NewExpression {
            data,
            expression,
            type_arguments,
            arguments,
        }))
    }

    fn parse_type_arguments_for_new(&mut self) -> Option<NodeArray<'a, TypeNode<'a>>> {
        self.next_token();
        let type_arguments =
            self.parse_delimited_list(ParsingContext::TYPE_ARGUMENTS, |p| p.parse_type());
        if self.token() != SyntaxKind::GreaterThanToken || type_arguments.is_empty() {
            return None;
        }
        self.next_token();
        if self.token() != SyntaxKind::OpenParenToken {
            return None;
        }
        Some(type_arguments)
    }

    // ========================================================================
    // Primary expressions
    // ========================================================================

    pub(crate) fn parse_primary_expression(&mut self) -> Expression<'a> {
        match self.token() {
            SyntaxKind::NumericLiteral => {
                let literal = self.parse_literal_text(SyntaxKind::NumericLiteral);
                Expression::Numeric(self.alloc(NumericLiteral {
                    data: literal.0,
                    text: literal.1,
                }))
            }
            SyntaxKind::BigIntLiteral => {
                let literal = self.parse_literal_text(SyntaxKind::BigIntLiteral);
                Expression::BigInt(self.alloc(BigIntLiteral {
                    data: literal.0,
                    text: literal.1,
                }))
            }
            SyntaxKind::StringLiteral => {
                let literal = self.parse_literal_text(SyntaxKind::StringLiteral);
                Expression::String(self.alloc(StringLiteral {
                    data: literal.0,
                    text: literal.1,
                }))
            }
            SyntaxKind::NoSubstitutionTemplateLiteral => {
                Expression::NoSubstitutionTemplate(self.parse_no_substitution_template())
            }
            SyntaxKind::TemplateHead => Expression::Template(self.parse_template_expression()),
            SyntaxKind::SlashToken | SyntaxKind::SlashEqualsToken => {
                self.scanner.rescan_slash_token();
                self.current_token = self.scanner.token();
                let literal = self.parse_literal_text(SyntaxKind::RegularExpressionLiteral);
                Expression::Regex(self.alloc(RegularExpressionLiteral {
                    data: literal.0,
                    text: literal.1,
                }))
            }
            SyntaxKind::ThisKeyword => Expression::This(self.alloc_keyword_token()),
            SyntaxKind::SuperKeyword => self.parse_super_expression(),
            SyntaxKind::NullKeyword => Expression::Null(self.alloc_keyword_token()),
            SyntaxKind::TrueKeyword => Expression::True(self.alloc_keyword_token()),
            SyntaxKind::FalseKeyword => Expression::False(self.alloc_keyword_token()),
            SyntaxKind::OpenParenToken => self.parse_parenthesized_expression(),
            SyntaxKind::OpenBracketToken => self.parse_array_literal(),
            SyntaxKind::OpenBraceToken => self.parse_object_literal(),
            SyntaxKind::FunctionKeyword => self.parse_function_expression(),
            SyntaxKind::AsyncKeyword if self.is_async_function_expression_start() => {
                self.parse_function_expression()
            }
            SyntaxKind::ClassKeyword => self.parse_class_expression(),
            SyntaxKind::NewKeyword => self.parse_new_expression(),
            _ => {
                if self.is_identifier_token() {
                    return Expression::Identifier(self.parse_identifier());
                }
                self.error(&messages::EXPRESSION_EXPECTED, &[]);
                Expression::Identifier(self.create_missing_identifier())
            }
        }
    }

    fn is_async_function_expression_start(&mut self) -> bool {
        self.look_ahead(|p| {
            p.next_token();
            !p.has_preceding_line_break() && p.token() == SyntaxKind::FunctionKeyword
        })
    }

    fn alloc_keyword_token(&mut self) -> &'a Token {
        let token = self.consume_token();
        self.alloc(token)
    }

    fn parse_literal_text(&mut self, kind: SyntaxKind) -> (NodeData, &'a str) {
        let pos = self.token_pos();
        let end = self.token_end();
        let text = self.arena.alloc_str(self.scanner.token_value());
        self.next_token();
        let data = self.finish_node_at(kind, pos, end);
        (data, text)
    }

    fn parse_no_substitution_template(&mut self) -> &'a NoSubstitutionTemplateLiteral<'a> {
        let (data, text) = self.parse_literal_text(SyntaxKind::NoSubstitutionTemplateLiteral);
        self.alloc(NoSubstitutionTemplateLiteral { data, text })
    }

    fn parse_template_expression(&mut self) -> &'a TemplateExpression<'a> {
        let pos = self.token_pos();
        let (head_data, head_text) = self.parse_literal_text(SyntaxKind::TemplateHead);
        let head = self.alloc(TemplateLiteralPiece {
            data: head_data,
            text: head_text,
        });

        let spans_pos = self.token_pos();
        let mut spans = Vec::new();
        loop {
            let span_pos = self.token_pos();
            let expression = self.allow_in_and(|p| p.parse_expression());
            // The `}` closing the substitution is rescanned as the next
            // template piece.
            let literal = if self.token() == SyntaxKind::CloseBraceToken {
                self.scanner.rescan_template_token();
                self.current_token = self.scanner.token();
                let kind = self.current_token;
                let (data, text) = self.parse_literal_text(kind);
                self.alloc(TemplateLiteralPiece { data, text })
            } else {
                self.error(&messages::_0_EXPECTED, &["}"]);
                let here = self.token_pos();
                let data = self.finish_node_at(SyntaxKind::TemplateTail, here, here);
                self.alloc(TemplateLiteralPiece { data, text: "" })
            };
            let is_tail = literal.data.kind != SyntaxKind::TemplateMiddle;
            let span_data = self.finish_node(SyntaxKind::TemplateSpan, span_pos);
            spans.push(self.alloc(TemplateSpan {
                data: span_data,
                expression,
                literal,
            }));
            if is_tail {
                break;
            }
        }

        let template_spans = self.make_node_array(spans, spans_pos);
        let data = self.finish_node(SyntaxKind::TemplateExpression, pos);
        self.alloc(TemplateExpression {
            data,
            head,
            template_spans,
        })
    }

    fn parse_super_expression(&mut self) -> Expression<'a> {
        let token = self.consume_token();
        if !matches!(
            self.token(),
            SyntaxKind::OpenParenToken | SyntaxKind::DotToken | SyntaxKind::OpenBracketToken
        ) {
            self.error(
                &messages::SUPER_MUST_BE_FOLLOWED_BY_AN_ARGUMENT_LIST_OR_MEMBER_ACCESS,
                &[],
            );
        }
        Expression::Super(self.alloc(token))
    }

    fn parse_parenthesized_expression(&mut self) -> Expression<'a> {
        let pos = self.token_pos();
        self.expect_token(SyntaxKind::OpenParenToken);
        let expression = self.allow_in_and(|p| p.parse_expression());
        self.expect_token(SyntaxKind::CloseParenToken);
        let data = self.finish_node(SyntaxKind::ParenthesizedExpression, pos);
        Expression::Parenthesized(self.alloc(ParenthesizedExpression { data, expression }))
    }

    fn parse_array_literal(&mut self) -> Expression<'a> {
        let pos = self.token_pos();
        self.expect_token(SyntaxKind::OpenBracketToken);
        let elements = self.allow_in_and(|p| {
            p.parse_delimited_list(ParsingContext::ARRAY_LITERAL_MEMBERS, |p| {
                p.parse_array_literal_element()
            })
        });
        self.expect_token(SyntaxKind::CloseBracketToken);
        let data = self.finish_node(SyntaxKind::ArrayLiteralExpression, pos);
        Expression::ArrayLiteral(self.alloc(ArrayLiteralExpression { data, elements }))
    }

    fn parse_array_literal_element(&mut self) -> Expression<'a> {
        match self.token() {
            SyntaxKind::CommaToken => {
                // An elision: `[a, , b]`.
                let pos = self.token_pos();
                let data = self.finish_node_at(SyntaxKind::OmittedExpression, pos, pos);
                Expression::Omitted(self.alloc(OmittedExpression { data }))
            }
            SyntaxKind::DotDotDotToken => self.parse_spread_element(),
            _ => self.parse_assignment_expression_or_higher(),
        }
    }

    fn parse_object_literal(&mut self) -> Expression<'a> {
        let pos = self.token_pos();
        self.expect_token(SyntaxKind::OpenBraceToken);
        let properties = self.allow_in_and(|p| {
            p.parse_delimited_list(ParsingContext::OBJECT_LITERAL_MEMBERS, |p| {
                p.parse_object_literal_element()
            })
        });
        self.expect_token(SyntaxKind::CloseBraceToken);
        let data = self.finish_node(SyntaxKind::ObjectLiteralExpression, pos);
        Expression::ObjectLiteral(self.alloc(ObjectLiteralExpression { data, properties }))
    }

    fn parse_object_literal_element(&mut self) -> ObjectLiteralElement<'a> {
        let pos = self.token_pos();

        if self.token() == SyntaxKind::DotDotDotToken {
            self.next_token();
            let expression = self.parse_assignment_expression_or_higher();
            let data = self.finish_node(SyntaxKind::SpreadAssignment, pos);
            return ObjectLiteralElement::Spread(self.alloc(SpreadAssignment {
                data,
                expression,
            }));
        }

        let asterisk_token = self.parse_optional_token(SyntaxKind::AsteriskToken);

        if asterisk_token.is_none() {
            if let Some(accessor) = self.try_parse_accessor_in_object_literal(pos) {
                return accessor;
            }
        }

        let name = self.parse_property_name();

        if asterisk_token.is_some()
            || self.token() == SyntaxKind::OpenParenToken
            || self.token() == SyntaxKind::LessThanToken
        {
            let method = self.parse_method_rest(pos, None, None, asterisk_token, name, None);
            return ObjectLiteralElement::Method(method);
        }

        if let PropertyName::Identifier(identifier) = name {
            if self.token() != SyntaxKind::ColonToken {
                // Shorthand, possibly with a destructuring default.
                let object_assignment_initializer = self.parse_initializer();
                let data = self.finish_node(SyntaxKind::ShorthandPropertyAssignment, pos);
                return ObjectLiteralElement::Shorthand(self.alloc(
                    ShorthandPropertyAssignment {
                        data,
                        name: identifier,
                        object_assignment_initializer,
                    },
                ));
            }
        }

        self.expect_token(SyntaxKind::ColonToken);
        let initializer = self.parse_assignment_expression_or_higher();
        let data = self.finish_node(SyntaxKind::PropertyAssignment, pos);
        ObjectLiteralElement::Property(self.alloc(PropertyAssignment {
            data,
            name,
            initializer,
        }))
    }

    fn try_parse_accessor_in_object_literal(
        &mut self,
        pos: TextPos,
    ) -> Option<ObjectLiteralElement<'a>> {
        let kind = match self.token() {
            SyntaxKind::GetKeyword => SyntaxKind::GetAccessor,
            SyntaxKind::SetKeyword => SyntaxKind::SetAccessor,
            _ => return None,
        };
        // `get` and `set` are also valid property names; only treat
        // them as accessors when a name follows.
        if !self.look_ahead(|p| {
            p.next_token();
            p.is_property_name_start() || p.token() == SyntaxKind::OpenBracketToken
        }) {
            return None;
        }
        self.next_token();
        let name = self.parse_property_name();
        let parameters = self.parse_parameter_list();
        if kind == SyntaxKind::GetAccessor {
            let return_type = self.parse_type_annotation();
            let body = self.parse_function_block();
            let data = self.finish_node(SyntaxKind::GetAccessor, pos);
            Some(ObjectLiteralElement::GetAccessor(self.alloc(
                GetAccessorDeclaration {
                    data,
                    decorators: None,
                    modifiers: None,
                    name,
                    parameters,
                    return_type,
                    body: Some(body),
                },
            )))
        } else {
            let body = self.parse_function_block();
            let data = self.finish_node(SyntaxKind::SetAccessor, pos);
            Some(ObjectLiteralElement::SetAccessor(self.alloc(
                SetAccessorDeclaration {
                    data,
                    decorators: None,
                    modifiers: None,
                    name,
                    parameters,
                    body: Some(body),
                },
            )))
        }
    }

    /// Shared method tail for object literals and class bodies: type
    /// parameters, parameters, return type, body.
    pub(crate) fn parse_method_rest(
        &mut self,
        pos: TextPos,
        decorators: Option<NodeArray<'a, &'a Decorator<'a>>>,
        modifiers: Option<NodeArray<'a, Modifier>>,
        asterisk_token: Option<Token>,
        name: PropertyName<'a>,
        question_token: Option<Token>,
    ) -> &'a MethodDeclaration<'a> {
        let is_generator = asterisk_token.is_some();
        let is_async = has_modifier(&modifiers, SyntaxKind::AsyncKeyword);
        let type_parameters = self.parse_type_parameters();
        let parameters =
            self.parse_parameters_in_function_context(is_generator, is_async);
        let return_type = self.parse_type_annotation();
        let body = self.parse_optional_function_block(is_generator, is_async);
        let data = self.finish_node(SyntaxKind::MethodDeclaration, pos);
        self.alloc(MethodDeclaration {
            data,
            decorators,
            modifiers,
            asterisk_token,
            name,
            question_token,
            type_parameters,
            parameters,
            return_type,
            body,
        })
    }

    fn parse_function_expression(&mut self) -> Expression<'a> {
        let pos = self.token_pos();
        let modifiers = self.parse_modifiers();
        let is_async = has_modifier(&modifiers, SyntaxKind::AsyncKeyword);
        self.expect_token(SyntaxKind::FunctionKeyword);
        let asterisk_token = self.parse_optional_token(SyntaxKind::AsteriskToken);
        let is_generator = asterisk_token.is_some();
        let name = if self.is_identifier_token() {
            Some(self.parse_identifier())
        } else {
            None
        };
        let type_parameters = self.parse_type_parameters();
        let parameters = self.parse_parameters_in_function_context(is_generator, is_async);
        let return_type = self.parse_type_annotation();
        let body = self.parse_function_body(is_generator, is_async);
        let data = self.finish_node(SyntaxKind::FunctionExpression, pos);
        Expression::Function(self.alloc(FunctionExpression {
            data,
            modifiers,
            asterisk_token,
            name,
            type_parameters,
            parameters,
            return_type,
            body,
        }))
    }

    fn parse_class_expression(&mut self) -> Expression<'a> {
        let pos = self.token_pos();
        let (decorators, modifiers, name, type_parameters, heritage_clauses, members) =
            self.parse_class_parts(None, None);
        let data = self.finish_node(SyntaxKind::ClassExpression, pos);
        Expression::Class(self.alloc(ClassExpression {
            data,
            decorators,
            modifiers,
            name,
            type_parameters,
            heritage_clauses,
            members,
        }))
    }

    // ========================================================================
    // Function bodies and parameter contexts
    // ========================================================================

    pub(crate) fn parse_parameters_in_function_context(
        &mut self,
        is_generator: bool,
        is_async: bool,
    ) -> NodeArray<'a, &'a ParameterDeclaration<'a>> {
        self.in_function_context(is_generator, is_async, |p| p.parse_parameter_list())
    }

    /// Run `f` with yield/await contexts set for a function with the
    /// given modifiers, clearing statement-level restrictions.
    pub(crate) fn in_function_context<T>(
        &mut self,
        is_generator: bool,
        is_async: bool,
        f: impl FnOnce(&mut Self) -> T,
    ) -> T {
        let saved = self.context_flags;
        self.set_context_flag(NodeFlags::YIELD_CONTEXT, is_generator);
        self.set_context_flag(NodeFlags::AWAIT_CONTEXT, is_async);
        self.set_context_flag(NodeFlags::DISALLOW_IN_CONTEXT, false);
        let result = f(self);
        self.context_flags = saved;
        result
    }

    pub(crate) fn parse_function_body(
        &mut self,
        is_generator: bool,
        is_async: bool,
    ) -> &'a Block<'a> {
        self.in_function_context(is_generator, is_async, |p| p.parse_function_block())
    }

    pub(crate) fn parse_optional_function_block(
        &mut self,
        is_generator: bool,
        is_async: bool,
    ) -> Option<&'a Block<'a>> {
        if self.token() == SyntaxKind::OpenBraceToken {
            Some(self.parse_function_body(is_generator, is_async))
        } else {
            self.parse_expected_semicolon();
            None
        }
    }

    pub(crate) fn parse_function_block(&mut self) -> &'a Block<'a> {
        self.parse_block()
    }

    // ========================================================================
    // yield
    // ========================================================================

    fn is_yield_expression_start(&mut self) -> bool {
        if self.token() != SyntaxKind::YieldKeyword {
            return false;
        }
        if self.in_yield_context() {
            return true;
        }
        // Outside a generator `yield` is an identifier; `yield <expr>`
        // on one line still reads as a yield for error recovery.
        self.look_ahead(|p| {
            p.next_token();
            !p.has_preceding_line_break()
                && (p.token() == SyntaxKind::AsteriskToken || p.is_start_of_expression())
        })
    }

    fn parse_yield_expression(&mut self) -> Expression<'a> {
        let pos = self.token_pos();
        if !self.in_yield_context() {
            self.error(
                &messages::A_YIELD_EXPRESSION_IS_ONLY_ALLOWED_IN_A_GENERATOR_BODY,
                &[],
            );
        }
        self.next_token();
        let (asterisk_token, expression) = if !self.has_preceding_line_break() {
            let asterisk = self.parse_optional_token(SyntaxKind::AsteriskToken);
            if asterisk.is_some() || self.is_start_of_expression() {
                (asterisk, Some(self.parse_assignment_expression_or_higher()))
            } else {
                (asterisk, None)
            }
        } else {
            (None, None)
        };
        let data = self.finish_node(SyntaxKind::YieldExpression, pos);
        Expression::Yield(self.alloc(YieldExpression {
            data,
            asterisk_token,
            expression,
        }))
    }

    // ========================================================================
    // Arrow functions
    // ========================================================================

    fn try_parse_arrow_function(&mut self) -> Option<Expression<'a>> {
        // `x => ...` with a bare identifier parameter.
        if self.is_identifier_token()
            && self.look_ahead(|p| {
                p.next_token();
                !p.has_preceding_line_break() && p.token() == SyntaxKind::EqualsGreaterThanToken
            })
        {
            return Some(self.parse_simple_arrow_function(false));
        }

        // `async x => ...`, everything on one line.
        if self.token() == SyntaxKind::AsyncKeyword
            && self.look_ahead(|p| {
                p.next_token();
                if p.has_preceding_line_break() || !p.is_identifier_token() {
                    return false;
                }
                p.next_token();
                !p.has_preceding_line_break() && p.token() == SyntaxKind::EqualsGreaterThanToken
            })
        {
            return Some(self.parse_simple_arrow_function(true));
        }

        match self.is_parenthesized_arrow_function() {
            ArrowState::Definite => Some(self.parse_parenthesized_arrow_function(true)
                .unwrap_or_else(|| {
                    // Unreachable with allow_ambiguity, but keep the
                    // parser total.
                    Expression::Identifier(self.create_missing_identifier())
                })),
            ArrowState::Unknown => {
                self.try_parse(|p| p.parse_parenthesized_arrow_function(false))
            }
            ArrowState::Impossible => None,
        }
    }

    fn parse_simple_arrow_function(&mut self, is_async: bool) -> Expression<'a> {
        let pos = self.token_pos();
        let modifiers = if is_async {
            let modifier_pos = self.token_pos();
            let modifier = self.consume_token();
            Some(self.make_node_array(vec![modifier], modifier_pos))
        } else {
            None
        };
        let parameter_pos = self.token_pos();
        let name = self.parse_identifier();
        let parameter_data = self.finish_node(SyntaxKind::Parameter, parameter_pos);
        let parameter = self.alloc(ParameterDeclaration {
            data: parameter_data,
            decorators: None,
            modifiers: None,
            dot_dot_dot_token: None,
            name: BindingName::Identifier(name),
            question_token: None,
            type_annotation: None,
            initializer: None,
        });
        let parameters = NodeArray::new(
            parameter.data.pos(),
            parameter.data.end(),
            self.arena.alloc_vec(vec![parameter]),
        );
        let equals_greater_than_token = self.expect_token(SyntaxKind::EqualsGreaterThanToken);
        let body = self.parse_arrow_function_body(is_async);
        let data = self.finish_node(SyntaxKind::ArrowFunction, pos);
        Expression::Arrow(self.alloc(ArrowFunction {
            data,
            modifiers,
            type_parameters: None,
            parameters,
            return_type: None,
            equals_greater_than_token,
            body,
        }))
    }

    fn is_parenthesized_arrow_function(&mut self) -> ArrowState {
        match self.token() {
            SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken => {
                self.look_ahead(|p| p.probe_parenthesized_arrow_function())
            }
            SyntaxKind::AsyncKeyword => self.look_ahead(|p| {
                p.next_token();
                if p.has_preceding_line_break() {
                    return ArrowState::Impossible;
                }
                match p.token() {
                    SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken => {
                        p.probe_parenthesized_arrow_function()
                    }
                    _ => ArrowState::Impossible,
                }
            }),
            _ => ArrowState::Impossible,
        }
    }

    fn probe_parenthesized_arrow_function(&mut self) -> ArrowState {
        if self.token() == SyntaxKind::LessThanToken {
            // Generic arrows: unambiguous in standard files, rare
            // enough in markup files to require speculation.
            return if self.scanner.language_variant() == LanguageVariant::Markup {
                self.probe_generic_arrow_in_markup()
            } else {
                ArrowState::Unknown
            };
        }
        self.next_token();
        match self.token() {
            SyntaxKind::CloseParenToken => {
                // `()` must be an arrow (or an error); look at what
                // follows the close paren.
                self.next_token();
                match self.token() {
                    SyntaxKind::EqualsGreaterThanToken
                    | SyntaxKind::ColonToken
                    | SyntaxKind::OpenBraceToken => ArrowState::Definite,
                    _ => ArrowState::Impossible,
                }
            }
            SyntaxKind::OpenBracketToken | SyntaxKind::OpenBraceToken => {
                // A destructuring parameter; too costly to scan past.
                ArrowState::Unknown
            }
            SyntaxKind::DotDotDotToken => ArrowState::Definite,
            SyntaxKind::ThisKeyword => ArrowState::Unknown,
            _ => {
                if !self.is_identifier_token() {
                    return ArrowState::Impossible;
                }
                self.next_token();
                match self.token() {
                    // `(a:` and `(a?` cannot be expressions.
                    SyntaxKind::ColonToken | SyntaxKind::QuestionToken => ArrowState::Definite,
                    SyntaxKind::CommaToken
                    | SyntaxKind::EqualsToken
                    | SyntaxKind::CloseParenToken => ArrowState::Unknown,
                    _ => ArrowState::Impossible,
                }
            }
        }
    }

    fn probe_generic_arrow_in_markup(&mut self) -> ArrowState {
        self.next_token();
        if !self.is_identifier_token() {
            return ArrowState::Impossible;
        }
        self.next_token();
        match self.token() {
            // `<T,` and `<T extends` cannot open a markup element.
            SyntaxKind::CommaToken => ArrowState::Unknown,
            SyntaxKind::ExtendsKeyword => {
                self.next_token();
                if self.token() == SyntaxKind::EqualsToken
                    || self.token() == SyntaxKind::GreaterThanToken
                {
                    ArrowState::Impossible
                } else {
                    ArrowState::Unknown
                }
            }
            _ => ArrowState::Impossible,
        }
    }

    /// Parse `(params) => body`. With `allow_ambiguity` the parse
    /// commits and reports errors; without it, any shape that stops
    /// looking like an arrow function returns `None` for rollback.
    fn parse_parenthesized_arrow_function(
        &mut self,
        allow_ambiguity: bool,
    ) -> Option<Expression<'a>> {
        let pos = self.token_pos();
        let modifiers = if self.token() == SyntaxKind::AsyncKeyword {
            let modifier_pos = self.token_pos();
            let token = self.consume_token();
            Some(NodeArray::new(
                modifier_pos,
                token.data.end(),
                self.arena.alloc_vec(vec![token]),
            ))
        } else {
            None
        };
        let is_async = modifiers.is_some();

        let type_parameters = self.parse_type_parameters();

        if self.token() != SyntaxKind::OpenParenToken {
            return None;
        }
        let parameters = self.in_function_context(false, is_async, |p| p.parse_parameter_list());

        let return_type = self.parse_type_annotation();
        // A speculative head survives only when `=>` or a brace body
        // follows; the brace case becomes an arrow with a missing `=>`.
        if !allow_ambiguity
            && self.token() != SyntaxKind::EqualsGreaterThanToken
            && self.token() != SyntaxKind::OpenBraceToken
        {
            return None;
        }

        let equals_greater_than_token = self.expect_token(SyntaxKind::EqualsGreaterThanToken);
        let body = self.parse_arrow_function_body(is_async);
        let data = self.finish_node(SyntaxKind::ArrowFunction, pos);
        Some(Expression::Arrow(self.alloc(ArrowFunction {
            data,
            modifiers,
            type_parameters,
            parameters,
            return_type,
            equals_greater_than_token,
            body,
        })))
    }

    fn parse_arrow_function_body(&mut self, is_async: bool) -> ArrowBody<'a> {
        if self.token() == SyntaxKind::OpenBraceToken {
            ArrowBody::Block(self.parse_function_body(false, is_async))
        } else {
            let expression = self.in_function_context(false, is_async, |p| {
                p.parse_assignment_expression_or_higher()
            });
            ArrowBody::Expression(expression)
        }
    }
}

/// Whether an expression form may appear on the left of an assignment.
pub(crate) fn is_left_hand_side_expression(expression: Expression<'_>) -> bool {
    matches!(
        expression,
        Expression::Identifier(_)
            | Expression::This(_)
            | Expression::Super(_)
            | Expression::PropertyAccess(_)
            | Expression::ElementAccess(_)
            | Expression::Call(_)
            | Expression::New(_)
            | Expression::Parenthesized(_)
            | Expression::ArrayLiteral(_)
            | Expression::ObjectLiteral(_)
            | Expression::NonNull(_)
            | Expression::TaggedTemplate(_)
            | Expression::MarkupElement(_)
            | Expression::MarkupSelfClosing(_)
            | Expression::MarkupFragment(_)
    )
}

fn has_modifier(modifiers: &Option<NodeArray<'_, Modifier>>, kind: SyntaxKind) -> bool {
    modifiers
        .as_ref()
        .is_some_and(|list| list.iter().any(|m| m.kind() == kind))
}
