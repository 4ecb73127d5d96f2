//! Type annotation grammar.
//!
//! Types are parsed with their own small precedence tower: function and
//! constructor types at the top, then union, intersection, type
//! operators, postfix (`[]` and indexed access), and primary types.

use crate::lists::ParsingContext;
use crate::parser::Parser;
use sable_ast::node::*;
use sable_ast::syntax_kind::SyntaxKind;
use sable_diagnostics::messages;

impl<'a> Parser<'a> {
    pub(crate) fn parse_type(&mut self) -> TypeNode<'a> {
        // `in` only restricts expressions; types always allow it.
        self.do_outside_of_context(sable_ast::flags::NodeFlags::DISALLOW_IN_CONTEXT, |p| {
            if p.is_start_of_function_type() {
                return p.parse_function_or_constructor_type(false);
            }
            if p.token() == SyntaxKind::NewKeyword {
                return p.parse_function_or_constructor_type(true);
            }
            p.parse_union_type()
        })
    }

    /// Whether the current token begins a type.
    pub(crate) fn is_start_of_type(&mut self) -> bool {
        match self.token() {
            SyntaxKind::AnyKeyword
            | SyntaxKind::UnknownKeyword
            | SyntaxKind::NumberKeyword
            | SyntaxKind::BigIntLiteral
            | SyntaxKind::StringKeyword
            | SyntaxKind::BooleanKeyword
            | SyntaxKind::NeverKeyword
            | SyntaxKind::UndefinedKeyword
            | SyntaxKind::VoidKeyword
            | SyntaxKind::NullKeyword
            | SyntaxKind::TypeOfKeyword
            | SyntaxKind::KeyOfKeyword
            | SyntaxKind::UniqueKeyword
            | SyntaxKind::ReadonlyKeyword
            | SyntaxKind::OpenBraceToken
            | SyntaxKind::OpenBracketToken
            | SyntaxKind::LessThanToken
            | SyntaxKind::BarToken
            | SyntaxKind::AmpersandToken
            | SyntaxKind::NewKeyword
            | SyntaxKind::StringLiteral
            | SyntaxKind::NumericLiteral
            | SyntaxKind::TrueKeyword
            | SyntaxKind::FalseKeyword
            | SyntaxKind::DotDotDotToken
            | SyntaxKind::ThisKeyword => true,
            SyntaxKind::MinusToken => {
                self.look_ahead(|p| {
                    p.next_token();
                    p.token() == SyntaxKind::NumericLiteral
                        || p.token() == SyntaxKind::BigIntLiteral
                })
            }
            SyntaxKind::OpenParenToken => {
                // `(` starts a parenthesized or function type.
                true
            }
            _ => self.is_identifier_token(),
        }
    }

    fn is_start_of_function_type(&mut self) -> bool {
        if self.token() == SyntaxKind::LessThanToken {
            return true;
        }
        self.token() == SyntaxKind::OpenParenToken
            && self.look_ahead(|p| p.is_unambiguously_start_of_function_type())
    }

    fn is_unambiguously_start_of_function_type(&mut self) -> bool {
        self.next_token();
        match self.token() {
            // `()` and `(...` can only be parameter lists.
            SyntaxKind::CloseParenToken | SyntaxKind::DotDotDotToken => true,
            _ => {
                if self.skip_parameter_start() {
                    // `(a:`, `(a?`, `(a,`, `(a =` commit to parameters;
                    // `(a)` needs `=>` after.
                    match self.token() {
                        SyntaxKind::ColonToken
                        | SyntaxKind::CommaToken
                        | SyntaxKind::QuestionToken
                        | SyntaxKind::EqualsToken => return true,
                        SyntaxKind::CloseParenToken => {
                            self.next_token();
                            return self.token() == SyntaxKind::EqualsGreaterThanToken;
                        }
                        _ => {}
                    }
                }
                false
            }
        }
    }

    fn skip_parameter_start(&mut self) -> bool {
        if self.is_identifier_token() || self.token() == SyntaxKind::ThisKeyword {
            self.next_token();
            return true;
        }
        if self.token() == SyntaxKind::OpenBracketToken
            || self.token() == SyntaxKind::OpenBraceToken
        {
            // A binding pattern; skip it by brute token counting.
            let open = self.token();
            let close = if open == SyntaxKind::OpenBracketToken {
                SyntaxKind::CloseBracketToken
            } else {
                SyntaxKind::CloseBraceToken
            };
            let mut depth = 0usize;
            loop {
                if self.token() == open {
                    depth += 1;
                } else if self.token() == close {
                    depth -= 1;
                    if depth == 0 {
                        self.next_token();
                        return true;
                    }
                } else if self.token() == SyntaxKind::EndOfFileToken {
                    return false;
                }
                self.next_token();
            }
        }
        false
    }

    fn parse_function_or_constructor_type(&mut self, is_constructor: bool) -> TypeNode<'a> {
        let pos = self.token_pos();
        if is_constructor {
            self.expect_token(SyntaxKind::NewKeyword);
        }
        let type_parameters = self.parse_type_parameters();
        let parameters = self.parse_parameter_list();
        self.expect_token(SyntaxKind::EqualsGreaterThanToken);
        let return_type = self.parse_type();
        if is_constructor {
            let data = self.finish_node(SyntaxKind::ConstructorType, pos);
            TypeNode::Constructor(self.alloc(ConstructorTypeNode {
                data,
                type_parameters,
                parameters,
                return_type,
            }))
        } else {
            let data = self.finish_node(SyntaxKind::FunctionType, pos);
            TypeNode::Function(self.alloc(FunctionTypeNode {
                data,
                type_parameters,
                parameters,
                return_type,
            }))
        }
    }

    fn parse_union_type(&mut self) -> TypeNode<'a> {
        let pos = self.token_pos();
        // A leading `|` is allowed: `type T = | A | B`.
        let leading = self.parse_optional(SyntaxKind::BarToken);
        let first = self.parse_intersection_type();
        if !leading && self.token() != SyntaxKind::BarToken {
            return first;
        }
        let mut types = vec![first];
        while self.parse_optional(SyntaxKind::BarToken) {
            types.push(self.parse_intersection_type());
        }
        if types.len() == 1 {
            return types[0];
        }
        let members = self.make_node_array(types, pos);
        let data = self.finish_node(SyntaxKind::UnionType, pos);
        TypeNode::Union(self.alloc(UnionTypeNode {
            data,
            types: members,
        }))
    }

    fn parse_intersection_type(&mut self) -> TypeNode<'a> {
        let pos = self.token_pos();
        let leading = self.parse_optional(SyntaxKind::AmpersandToken);
        let first = self.parse_type_operator_or_higher();
        if !leading && self.token() != SyntaxKind::AmpersandToken {
            return first;
        }
        let mut types = vec![first];
        while self.parse_optional(SyntaxKind::AmpersandToken) {
            types.push(self.parse_type_operator_or_higher());
        }
        if types.len() == 1 {
            return types[0];
        }
        let members = self.make_node_array(types, pos);
        let data = self.finish_node(SyntaxKind::IntersectionType, pos);
        TypeNode::Intersection(self.alloc(IntersectionTypeNode {
            data,
            types: members,
        }))
    }

    fn parse_type_operator_or_higher(&mut self) -> TypeNode<'a> {
        match self.token() {
            SyntaxKind::KeyOfKeyword | SyntaxKind::UniqueKeyword | SyntaxKind::ReadonlyKeyword => {
                let pos = self.token_pos();
                let operator = self.token();
                self.next_token();
                let type_node = self.parse_type_operator_or_higher();
                let data = self.finish_node(SyntaxKind::TypeOperator, pos);
                TypeNode::Operator(self.alloc(TypeOperatorNode {
                    data,
                    operator,
                    type_node,
                }))
            }
            _ => self.parse_postfix_type(),
        }
    }

    fn parse_postfix_type(&mut self) -> TypeNode<'a> {
        let pos = self.token_pos();
        let mut type_node = self.parse_primary_type();
        while self.token() == SyntaxKind::OpenBracketToken && !self.has_preceding_line_break() {
            self.next_token();
            if self.parse_optional(SyntaxKind::CloseBracketToken) {
                let data = self.finish_node(SyntaxKind::ArrayType, pos);
                type_node = TypeNode::Array(self.alloc(ArrayTypeNode {
                    data,
                    element_type: type_node,
                }));
            } else {
                let index_type = self.parse_type();
                self.expect_token(SyntaxKind::CloseBracketToken);
                let data = self.finish_node(SyntaxKind::IndexedAccessType, pos);
                type_node = TypeNode::IndexedAccess(self.alloc(IndexedAccessTypeNode {
                    data,
                    object_type: type_node,
                    index_type,
                }));
            }
        }
        type_node
    }

    fn parse_primary_type(&mut self) -> TypeNode<'a> {
        match self.token() {
            SyntaxKind::AnyKeyword
            | SyntaxKind::UnknownKeyword
            | SyntaxKind::NumberKeyword
            | SyntaxKind::StringKeyword
            | SyntaxKind::BooleanKeyword
            | SyntaxKind::NeverKeyword
            | SyntaxKind::UndefinedKeyword
            | SyntaxKind::VoidKeyword => {
                let token = self.consume_token();
                TypeNode::Keyword(self.alloc(token))
            }
            SyntaxKind::NullKeyword
            | SyntaxKind::TrueKeyword
            | SyntaxKind::FalseKeyword
            | SyntaxKind::StringLiteral
            | SyntaxKind::NumericLiteral
            | SyntaxKind::BigIntLiteral
            | SyntaxKind::MinusToken => self.parse_literal_type(),
            SyntaxKind::TypeOfKeyword => self.parse_type_query(),
            SyntaxKind::OpenBraceToken => self.parse_type_literal(),
            SyntaxKind::OpenBracketToken => self.parse_tuple_type(),
            SyntaxKind::OpenParenToken => self.parse_parenthesized_type(),
            _ => {
                if self.is_identifier_token() || self.token() == SyntaxKind::ThisKeyword {
                    self.parse_type_reference()
                } else {
                    self.error(&messages::TYPE_EXPECTED, &[]);
                    let missing = self.create_missing_identifier();
                    let data = self.finish_node_at(
                        SyntaxKind::TypeReference,
                        missing.data.pos(),
                        missing.data.pos(),
                    );
                    TypeNode::TypeReference(self.alloc(TypeReferenceNode {
                        data,
                        type_name: EntityName::Identifier(missing),
                        type_arguments: None,
                    }))
                }
            }
        }
    }

    fn parse_literal_type(&mut self) -> TypeNode<'a> {
        let pos = self.token_pos();
        let literal = match self.token() {
            SyntaxKind::MinusToken => {
                // A negative numeric literal type: `-1`.
                self.parse_prefix_unary_for_literal_type()
            }
            _ => self.parse_primary_expression(),
        };
        let data = self.finish_node(SyntaxKind::LiteralType, pos);
        TypeNode::Literal(self.alloc(LiteralTypeNode { data, literal }))
    }

    fn parse_prefix_unary_for_literal_type(&mut self) -> Expression<'a> {
        let pos = self.token_pos();
        let operator = self.token();
        self.next_token();
        let operand = self.parse_primary_expression();
        let data = self.finish_node(SyntaxKind::PrefixUnaryExpression, pos);
        Expression::PrefixUnary(self.alloc(PrefixUnaryExpression {
            data,
            operator,
            operand,
        }))
    }

    fn parse_type_query(&mut self) -> TypeNode<'a> {
        let pos = self.token_pos();
        self.expect_token(SyntaxKind::TypeOfKeyword);
        let expr_name = self.parse_entity_name();
        let data = self.finish_node(SyntaxKind::TypeQuery, pos);
        TypeNode::TypeQuery(self.alloc(TypeQueryNode { data, expr_name }))
    }

    fn parse_type_literal(&mut self) -> TypeNode<'a> {
        let pos = self.token_pos();
        self.expect_token(SyntaxKind::OpenBraceToken);
        let members = self.parse_list(ParsingContext::TYPE_MEMBERS, |p| p.parse_type_member());
        self.expect_token(SyntaxKind::CloseBraceToken);
        let data = self.finish_node(SyntaxKind::TypeLiteral, pos);
        TypeNode::TypeLiteral(self.alloc(TypeLiteralNode { data, members }))
    }

    fn parse_tuple_type(&mut self) -> TypeNode<'a> {
        let pos = self.token_pos();
        let elements = self.parse_bracketed_list(
            ParsingContext::TUPLE_ELEMENT_TYPES,
            SyntaxKind::OpenBracketToken,
            SyntaxKind::CloseBracketToken,
            |p| p.parse_tuple_element_type(),
        );
        let data = self.finish_node(SyntaxKind::TupleType, pos);
        TypeNode::Tuple(self.alloc(TupleTypeNode { data, elements }))
    }

    fn parse_tuple_element_type(&mut self) -> TypeNode<'a> {
        let pos = self.token_pos();
        if self.parse_optional(SyntaxKind::DotDotDotToken) {
            let type_node = self.parse_type();
            let data = self.finish_node(SyntaxKind::RestType, pos);
            return TypeNode::Rest(self.alloc(RestTypeNode { data, type_node }));
        }
        let type_node = self.parse_type();
        if self.parse_optional(SyntaxKind::QuestionToken) {
            let data = self.finish_node(SyntaxKind::OptionalType, pos);
            return TypeNode::Optional(self.alloc(OptionalTypeNode { data, type_node }));
        }
        type_node
    }

    fn parse_parenthesized_type(&mut self) -> TypeNode<'a> {
        let pos = self.token_pos();
        self.expect_token(SyntaxKind::OpenParenToken);
        let type_node = self.parse_type();
        self.expect_token(SyntaxKind::CloseParenToken);
        let data = self.finish_node(SyntaxKind::ParenthesizedType, pos);
        TypeNode::Parenthesized(self.alloc(ParenthesizedTypeNode { data, type_node }))
    }

    pub(crate) fn parse_type_reference(&mut self) -> TypeNode<'a> {
        let pos = self.token_pos();
        let type_name = if self.token() == SyntaxKind::ThisKeyword {
            // `this` as a type parses as a reference named `this`.
            EntityName::Identifier(self.parse_identifier_name())
        } else {
            self.parse_entity_name()
        };
        let type_arguments = if self.token() == SyntaxKind::LessThanToken
            && !self.has_preceding_line_break()
        {
            Some(self.parse_type_arguments())
        } else {
            None
        };
        let data = self.finish_node(SyntaxKind::TypeReference, pos);
        TypeNode::TypeReference(self.alloc(TypeReferenceNode {
            data,
            type_name,
            type_arguments,
        }))
    }

    // ========================================================================
    // Type parameters and arguments
    // ========================================================================

    pub(crate) fn parse_type_parameters(
        &mut self,
    ) -> Option<NodeArray<'a, &'a TypeParameterDeclaration<'a>>> {
        if self.token() != SyntaxKind::LessThanToken {
            return None;
        }
        Some(self.parse_bracketed_list(
            ParsingContext::TYPE_PARAMETERS,
            SyntaxKind::LessThanToken,
            SyntaxKind::GreaterThanToken,
            |p| p.parse_type_parameter(),
        ))
    }

    fn parse_type_parameter(&mut self) -> &'a TypeParameterDeclaration<'a> {
        let pos = self.token_pos();
        let name = self.parse_identifier();
        let constraint = if self.parse_optional(SyntaxKind::ExtendsKeyword) {
            Some(self.parse_type())
        } else {
            None
        };
        let default = if self.parse_optional(SyntaxKind::EqualsToken) {
            Some(self.parse_type())
        } else {
            None
        };
        let data = self.finish_node(SyntaxKind::TypeParameter, pos);
        self.alloc(TypeParameterDeclaration {
            data,
            name,
            constraint,
            default,
        })
    }

    /// Parse `<T, U>`. The caller has already decided these are type
    /// arguments (speculatively or not).
    pub(crate) fn parse_type_arguments(&mut self) -> NodeArray<'a, TypeNode<'a>> {
        self.scanner.rescan_less_than_token();
        self.current_token = self.scanner.token();
        self.parse_bracketed_list(
            ParsingContext::TYPE_ARGUMENTS,
            SyntaxKind::LessThanToken,
            SyntaxKind::GreaterThanToken,
            |p| p.parse_type(),
        )
    }

    /// An optional `: Type` annotation.
    pub(crate) fn parse_type_annotation(&mut self) -> Option<TypeNode<'a>> {
        if self.parse_optional(SyntaxKind::ColonToken) {
            Some(self.parse_type())
        } else {
            None
        }
    }

    // ========================================================================
    // Type members
    // ========================================================================

    pub(crate) fn is_start_of_type_member(&mut self) -> bool {
        match self.token() {
            SyntaxKind::OpenParenToken
            | SyntaxKind::LessThanToken
            | SyntaxKind::OpenBracketToken
            | SyntaxKind::NewKeyword
            | SyntaxKind::ReadonlyKeyword => true,
            _ => self.is_property_name_start(),
        }
    }

    pub(crate) fn parse_type_member(&mut self) -> TypeElement<'a> {
        if let Some(reused) = self.try_reuse_type_member() {
            return reused;
        }
        match self.token() {
            SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken => {
                self.parse_call_or_construct_signature(false)
            }
            SyntaxKind::NewKeyword if self.look_ahead_is_construct_signature() => {
                self.parse_call_or_construct_signature(true)
            }
            SyntaxKind::OpenBracketToken if self.look_ahead_is_index_signature() => {
                let pos = self.token_pos();
                let member = self.parse_index_signature(pos, None);
                TypeElement::IndexSignature(member)
            }
            _ => self.parse_property_or_method_signature(),
        }
    }

    fn look_ahead_is_construct_signature(&mut self) -> bool {
        self.look_ahead(|p| {
            p.next_token();
            p.token() == SyntaxKind::OpenParenToken || p.token() == SyntaxKind::LessThanToken
        })
    }

    /// `[x: string]` begins an index signature; `[expr]` is a computed
    /// property name.
    pub(crate) fn look_ahead_is_index_signature(&mut self) -> bool {
        self.look_ahead(|p| {
            p.next_token();
            if !p.is_identifier_token() {
                return false;
            }
            p.next_token();
            p.token() == SyntaxKind::ColonToken || p.token() == SyntaxKind::CommaToken
        })
    }

    fn parse_call_or_construct_signature(&mut self, is_construct: bool) -> TypeElement<'a> {
        let pos = self.token_pos();
        if is_construct {
            self.expect_token(SyntaxKind::NewKeyword);
        }
        let type_parameters = self.parse_type_parameters();
        let parameters = self.parse_parameter_list();
        let return_type = self.parse_type_annotation();
        self.parse_type_member_semicolon();
        if is_construct {
            let data = self.finish_node(SyntaxKind::ConstructSignature, pos);
            TypeElement::ConstructSignature(self.alloc(ConstructSignatureDeclaration {
                data,
                type_parameters,
                parameters,
                return_type,
            }))
        } else {
            let data = self.finish_node(SyntaxKind::CallSignature, pos);
            TypeElement::CallSignature(self.alloc(CallSignatureDeclaration {
                data,
                type_parameters,
                parameters,
                return_type,
            }))
        }
    }

    /// `[name: Type]: Type`. Shared by interfaces, type literals, and
    /// class bodies; class index signatures carry modifiers.
    pub(crate) fn parse_index_signature(
        &mut self,
        pos: sable_core::text::TextPos,
        modifiers: Option<NodeArray<'a, Modifier>>,
    ) -> &'a IndexSignatureDeclaration<'a> {
        let parameters = self.parse_bracketed_list(
            ParsingContext::PARAMETERS,
            SyntaxKind::OpenBracketToken,
            SyntaxKind::CloseBracketToken,
            |p| p.parse_parameter(),
        );
        let type_annotation = self.parse_type_annotation();
        self.parse_type_member_semicolon();
        let data = self.finish_node(SyntaxKind::IndexSignature, pos);
        self.alloc(IndexSignatureDeclaration {
            data,
            modifiers,
            parameters,
            type_annotation,
        })
    }

    fn parse_property_or_method_signature(&mut self) -> TypeElement<'a> {
        let pos = self.token_pos();
        let modifiers = self.parse_modifiers();
        let name = self.parse_property_name();
        let question_token = self.parse_optional_token(SyntaxKind::QuestionToken);

        if self.token() == SyntaxKind::OpenParenToken || self.token() == SyntaxKind::LessThanToken {
            let type_parameters = self.parse_type_parameters();
            let parameters = self.parse_parameter_list();
            let return_type = self.parse_type_annotation();
            self.parse_type_member_semicolon();
            let data = self.finish_node(SyntaxKind::MethodSignature, pos);
            return TypeElement::MethodSignature(self.alloc(MethodSignature {
                data,
                modifiers,
                name,
                question_token,
                type_parameters,
                parameters,
                return_type,
            }));
        }

        let type_annotation = self.parse_type_annotation();
        self.parse_type_member_semicolon();
        let data = self.finish_node(SyntaxKind::PropertySignature, pos);
        TypeElement::PropertySignature(self.alloc(PropertySignature {
            data,
            modifiers,
            name,
            question_token,
            type_annotation,
        }))
    }

    /// Members may be separated by `,`, `;`, or a line break.
    fn parse_type_member_semicolon(&mut self) {
        if self.parse_optional(SyntaxKind::CommaToken) {
            return;
        }
        self.parse_expected_semicolon();
    }

    // ========================================================================
    // Parameters
    // ========================================================================

    pub(crate) fn is_start_of_parameter(&mut self) -> bool {
        match self.token() {
            SyntaxKind::DotDotDotToken | SyntaxKind::AtToken | SyntaxKind::ThisKeyword => true,
            _ => self.token().is_modifier_kind() || self.is_binding_name_start(),
        }
    }

    /// `( parameter, ... )`.
    pub(crate) fn parse_parameter_list(
        &mut self,
    ) -> NodeArray<'a, &'a ParameterDeclaration<'a>> {
        self.parse_bracketed_list(
            ParsingContext::PARAMETERS,
            SyntaxKind::OpenParenToken,
            SyntaxKind::CloseParenToken,
            |p| p.parse_parameter(),
        )
    }

    pub(crate) fn parse_parameter(&mut self) -> &'a ParameterDeclaration<'a> {
        if let Some(reused) = self.try_reuse_parameter() {
            return reused;
        }
        let pos = self.token_pos();
        let decorators = self.parse_decorators();
        let modifiers = self.parse_modifiers();
        let dot_dot_dot_token = self.parse_optional_token(SyntaxKind::DotDotDotToken);
        let name = self.parse_binding_name();
        let question_token = self.parse_optional_token(SyntaxKind::QuestionToken);
        let type_annotation = self.parse_type_annotation();
        let initializer = self.parse_initializer();
        if dot_dot_dot_token.is_some() && self.token() == SyntaxKind::CommaToken {
            self.error(&messages::A_REST_PARAMETER_MUST_BE_LAST, &[]);
        }
        let data = self.finish_node(SyntaxKind::Parameter, pos);
        self.alloc(ParameterDeclaration {
            data,
            decorators,
            modifiers,
            dot_dot_dot_token,
            name,
            question_token,
            type_annotation,
            initializer,
        })
    }

    /// An optional `= expr` initializer.
    pub(crate) fn parse_initializer(&mut self) -> Option<Expression<'a>> {
        if self.parse_optional(SyntaxKind::EqualsToken) {
            Some(self.allow_in_and(|p| p.parse_assignment_expression_or_higher()))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sable_ast::node::{Edition, FileKind};
    use sable_core::arena::ParseArena;

    fn parse_type_of(text: &str) -> bool {
        let arena = ParseArena::new();
        let source = format!("let x: {} = y;", text);
        let parser = Parser::new(&arena, "t.sa", &source, FileKind::Standard, Edition::Current);
        let file = parser.parse_source_file();
        file.diagnostics.is_empty()
    }

    #[test]
    fn test_basic_type_annotations_parse_clean() {
        assert!(parse_type_of("number"));
        assert!(parse_type_of("string[]"));
        assert!(parse_type_of("Map<string, number>"));
        assert!(parse_type_of("A | B & C"));
        assert!(parse_type_of("keyof T"));
        assert!(parse_type_of("[string, number?, ...boolean[]]"));
        assert!(parse_type_of("(a: number, b?: string) => void"));
        assert!(parse_type_of("new () => T"));
        assert!(parse_type_of("{ a: number; m(x: T): U; [k: string]: any }"));
        assert!(parse_type_of("typeof console"));
        assert!(parse_type_of("\"lit\" | 42 | -1 | true | null"));
        assert!(parse_type_of("T[\"key\"]"));
    }
}
