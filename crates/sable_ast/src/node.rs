//! The syntax tree node model.
//!
//! Every node embeds a [`NodeData`] header holding its kind, its span,
//! and its flags. Positions and flags live in `Cell`s: the incremental
//! re-parser shifts and marks nodes of the previous tree in place
//! before deciding which of them to carry into the next tree.
//!
//! Nodes are allocated in a bump arena and referenced by `&'a` pointers.
//! The enums (`Statement`, `Expression`, ...) are `Copy` handles over
//! those references, so splicing a reused node into a new list copies a
//! pointer, never the subtree.

use crate::flags::NodeFlags;
use crate::syntax_kind::SyntaxKind;
use sable_core::intern::{InternedString, StringInterner};
use sable_core::text::{TextPos, TextRange};
use sable_diagnostics::Diagnostic;
use std::cell::Cell;

/// The header every node starts with.
#[derive(Debug, Clone)]
pub struct NodeData {
    pub kind: SyntaxKind,
    pos: Cell<TextPos>,
    end: Cell<TextPos>,
    flags: Cell<NodeFlags>,
}

impl NodeData {
    pub fn new(kind: SyntaxKind, pos: TextPos, end: TextPos, flags: NodeFlags) -> Self {
        Self {
            kind,
            pos: Cell::new(pos),
            end: Cell::new(end),
            flags: Cell::new(flags),
        }
    }

    #[inline]
    pub fn pos(&self) -> TextPos {
        self.pos.get()
    }

    #[inline]
    pub fn end(&self) -> TextPos {
        self.end.get()
    }

    #[inline]
    pub fn set_pos(&self, pos: TextPos) {
        self.pos.set(pos);
    }

    #[inline]
    pub fn set_end(&self, end: TextPos) {
        self.end.set(end);
    }

    #[inline]
    pub fn range(&self) -> TextRange {
        TextRange::new(self.pos(), self.end())
    }

    #[inline]
    pub fn flags(&self) -> NodeFlags {
        self.flags.get()
    }

    #[inline]
    pub fn set_flags(&self, flags: NodeFlags) {
        self.flags.set(flags);
    }

    #[inline]
    pub fn add_flags(&self, flags: NodeFlags) {
        self.flags.set(self.flags.get() | flags);
    }

    #[inline]
    pub fn remove_flags(&self, flags: NodeFlags) {
        self.flags.set(self.flags.get() - flags);
    }

    /// The context bits the parser was in when this node was created.
    #[inline]
    pub fn context_flags(&self) -> NodeFlags {
        self.flags.get() & NodeFlags::CONTEXT_FLAGS
    }

    /// A zero-width node synthesized where a real one was expected.
    /// The end-of-file token is legitimately zero width.
    #[inline]
    pub fn is_missing(&self) -> bool {
        self.pos() == self.end() && self.kind != SyntaxKind::EndOfFileToken
    }
}

/// A bare token kept in the tree (keywords, operators, punctuation).
#[derive(Debug, Clone)]
pub struct Token {
    pub data: NodeData,
}

impl Token {
    pub fn new(kind: SyntaxKind, pos: TextPos, end: TextPos, flags: NodeFlags) -> Self {
        Self {
            data: NodeData::new(kind, pos, end, flags),
        }
    }

    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        self.data.kind
    }
}

/// The span of a node list, tracked separately from the elements so the
/// incremental re-parser can adjust it like any node boundary. The
/// trailing-separator bit distinguishes `[a, b]` from `[a, b,]`.
#[derive(Debug, Clone, Default)]
pub struct ArraySpan {
    pos: Cell<TextPos>,
    end: Cell<TextPos>,
    has_trailing_separator: Cell<bool>,
}

impl ArraySpan {
    pub fn new(pos: TextPos, end: TextPos) -> Self {
        Self {
            pos: Cell::new(pos),
            end: Cell::new(end),
            has_trailing_separator: Cell::new(false),
        }
    }

    #[inline]
    pub fn pos(&self) -> TextPos {
        self.pos.get()
    }

    #[inline]
    pub fn end(&self) -> TextPos {
        self.end.get()
    }

    #[inline]
    pub fn set_pos(&self, pos: TextPos) {
        self.pos.set(pos);
    }

    #[inline]
    pub fn set_end(&self, end: TextPos) {
        self.end.set(end);
    }

    #[inline]
    pub fn has_trailing_separator(&self) -> bool {
        self.has_trailing_separator.get()
    }

    #[inline]
    pub fn set_has_trailing_separator(&self, value: bool) {
        self.has_trailing_separator.set(value);
    }
}

/// A positioned list of nodes. Elements live in the arena; the span
/// lives with the owning node.
#[derive(Debug, Clone)]
pub struct NodeArray<'a, T> {
    pub span: ArraySpan,
    pub elements: &'a [T],
}

impl<'a, T> NodeArray<'a, T> {
    pub fn new(pos: TextPos, end: TextPos, elements: &'a [T]) -> Self {
        Self {
            span: ArraySpan::new(pos, end),
            elements,
        }
    }

    pub fn empty(pos: TextPos) -> Self {
        Self {
            span: ArraySpan::new(pos, pos),
            elements: &[],
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'a, T> {
        self.elements.iter()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&'a T> {
        self.elements.get(index)
    }
}

// ============================================================================
// Identifiers and names
// ============================================================================

#[derive(Debug, Clone)]
pub struct Identifier<'a> {
    pub data: NodeData,
    /// Interned handle for O(1) name comparison.
    pub text: InternedString,
    /// The identifier text, arena-allocated.
    pub text_str: &'a str,
    /// Set when the identifier was written as a contextual keyword.
    pub original_keyword_kind: Option<SyntaxKind>,
}

#[derive(Debug, Clone)]
pub struct PrivateIdentifier<'a> {
    pub data: NodeData,
    pub text: InternedString,
    pub text_str: &'a str,
}

#[derive(Debug, Clone)]
pub struct QualifiedName<'a> {
    pub data: NodeData,
    pub left: EntityName<'a>,
    pub right: &'a Identifier<'a>,
}

#[derive(Debug, Clone, Copy)]
pub enum EntityName<'a> {
    Identifier(&'a Identifier<'a>),
    Qualified(&'a QualifiedName<'a>),
}

impl<'a> EntityName<'a> {
    pub fn node_data(self) -> &'a NodeData {
        match self {
            EntityName::Identifier(n) => &n.data,
            EntityName::Qualified(n) => &n.data,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ComputedPropertyName<'a> {
    pub data: NodeData,
    pub expression: Expression<'a>,
}

#[derive(Debug, Clone, Copy)]
pub enum PropertyName<'a> {
    Identifier(&'a Identifier<'a>),
    String(&'a StringLiteral<'a>),
    Numeric(&'a NumericLiteral<'a>),
    Computed(&'a ComputedPropertyName<'a>),
}

impl<'a> PropertyName<'a> {
    pub fn node_data(self) -> &'a NodeData {
        match self {
            PropertyName::Identifier(n) => &n.data,
            PropertyName::String(n) => &n.data,
            PropertyName::Numeric(n) => &n.data,
            PropertyName::Computed(n) => &n.data,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum MemberName<'a> {
    Identifier(&'a Identifier<'a>),
    Private(&'a PrivateIdentifier<'a>),
}

impl<'a> MemberName<'a> {
    pub fn node_data(self) -> &'a NodeData {
        match self {
            MemberName::Identifier(n) => &n.data,
            MemberName::Private(n) => &n.data,
        }
    }
}

// ============================================================================
// Binding patterns
// ============================================================================

#[derive(Debug, Clone)]
pub struct ObjectBindingPattern<'a> {
    pub data: NodeData,
    pub elements: NodeArray<'a, &'a BindingElement<'a>>,
}

#[derive(Debug, Clone)]
pub struct ArrayBindingPattern<'a> {
    pub data: NodeData,
    pub elements: NodeArray<'a, ArrayBindingElement<'a>>,
}

#[derive(Debug, Clone, Copy)]
pub enum ArrayBindingElement<'a> {
    Binding(&'a BindingElement<'a>),
    Omitted(&'a OmittedExpression),
}

impl<'a> ArrayBindingElement<'a> {
    pub fn node_data(self) -> &'a NodeData {
        match self {
            ArrayBindingElement::Binding(n) => &n.data,
            ArrayBindingElement::Omitted(n) => &n.data,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BindingElement<'a> {
    pub data: NodeData,
    pub dot_dot_dot_token: Option<Token>,
    pub property_name: Option<PropertyName<'a>>,
    pub name: BindingName<'a>,
    pub initializer: Option<Expression<'a>>,
}

#[derive(Debug, Clone, Copy)]
pub enum BindingName<'a> {
    Identifier(&'a Identifier<'a>),
    Object(&'a ObjectBindingPattern<'a>),
    Array(&'a ArrayBindingPattern<'a>),
}

impl<'a> BindingName<'a> {
    pub fn node_data(self) -> &'a NodeData {
        match self {
            BindingName::Identifier(n) => &n.data,
            BindingName::Object(n) => &n.data,
            BindingName::Array(n) => &n.data,
        }
    }
}

// ============================================================================
// Signature elements
// ============================================================================

pub type Modifier = Token;

#[derive(Debug, Clone)]
pub struct Decorator<'a> {
    pub data: NodeData,
    pub expression: Expression<'a>,
}

#[derive(Debug, Clone)]
pub struct TypeParameterDeclaration<'a> {
    pub data: NodeData,
    pub name: &'a Identifier<'a>,
    pub constraint: Option<TypeNode<'a>>,
    pub default: Option<TypeNode<'a>>,
}

#[derive(Debug, Clone)]
pub struct ParameterDeclaration<'a> {
    pub data: NodeData,
    pub decorators: Option<NodeArray<'a, &'a Decorator<'a>>>,
    pub modifiers: Option<NodeArray<'a, Modifier>>,
    pub dot_dot_dot_token: Option<Token>,
    pub name: BindingName<'a>,
    pub question_token: Option<Token>,
    pub type_annotation: Option<TypeNode<'a>>,
    pub initializer: Option<Expression<'a>>,
}

// ============================================================================
// Type nodes
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub enum TypeNode<'a> {
    Keyword(&'a Token),
    TypeReference(&'a TypeReferenceNode<'a>),
    Function(&'a FunctionTypeNode<'a>),
    Constructor(&'a ConstructorTypeNode<'a>),
    TypeQuery(&'a TypeQueryNode<'a>),
    TypeLiteral(&'a TypeLiteralNode<'a>),
    Array(&'a ArrayTypeNode<'a>),
    Tuple(&'a TupleTypeNode<'a>),
    Optional(&'a OptionalTypeNode<'a>),
    Rest(&'a RestTypeNode<'a>),
    Union(&'a UnionTypeNode<'a>),
    Intersection(&'a IntersectionTypeNode<'a>),
    Parenthesized(&'a ParenthesizedTypeNode<'a>),
    Operator(&'a TypeOperatorNode<'a>),
    IndexedAccess(&'a IndexedAccessTypeNode<'a>),
    Literal(&'a LiteralTypeNode<'a>),
}

impl<'a> TypeNode<'a> {
    pub fn node_data(self) -> &'a NodeData {
        match self {
            TypeNode::Keyword(n) => &n.data,
            TypeNode::TypeReference(n) => &n.data,
            TypeNode::Function(n) => &n.data,
            TypeNode::Constructor(n) => &n.data,
            TypeNode::TypeQuery(n) => &n.data,
            TypeNode::TypeLiteral(n) => &n.data,
            TypeNode::Array(n) => &n.data,
            TypeNode::Tuple(n) => &n.data,
            TypeNode::Optional(n) => &n.data,
            TypeNode::Rest(n) => &n.data,
            TypeNode::Union(n) => &n.data,
            TypeNode::Intersection(n) => &n.data,
            TypeNode::Parenthesized(n) => &n.data,
            TypeNode::Operator(n) => &n.data,
            TypeNode::IndexedAccess(n) => &n.data,
            TypeNode::Literal(n) => &n.data,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TypeReferenceNode<'a> {
    pub data: NodeData,
    pub type_name: EntityName<'a>,
    pub type_arguments: Option<NodeArray<'a, TypeNode<'a>>>,
}

#[derive(Debug, Clone)]
pub struct FunctionTypeNode<'a> {
    pub data: NodeData,
    pub type_parameters: Option<NodeArray<'a, &'a TypeParameterDeclaration<'a>>>,
    pub parameters: NodeArray<'a, &'a ParameterDeclaration<'a>>,
    pub return_type: TypeNode<'a>,
}

#[derive(Debug, Clone)]
pub struct ConstructorTypeNode<'a> {
    pub data: NodeData,
    pub type_parameters: Option<NodeArray<'a, &'a TypeParameterDeclaration<'a>>>,
    pub parameters: NodeArray<'a, &'a ParameterDeclaration<'a>>,
    pub return_type: TypeNode<'a>,
}

#[derive(Debug, Clone)]
pub struct TypeQueryNode<'a> {
    pub data: NodeData,
    pub expr_name: EntityName<'a>,
}

#[derive(Debug, Clone)]
pub struct TypeLiteralNode<'a> {
    pub data: NodeData,
    pub members: NodeArray<'a, TypeElement<'a>>,
}

#[derive(Debug, Clone)]
pub struct ArrayTypeNode<'a> {
    pub data: NodeData,
    pub element_type: TypeNode<'a>,
}

#[derive(Debug, Clone)]
pub struct TupleTypeNode<'a> {
    pub data: NodeData,
    pub elements: NodeArray<'a, TypeNode<'a>>,
}

#[derive(Debug, Clone)]
pub struct OptionalTypeNode<'a> {
    pub data: NodeData,
    pub type_node: TypeNode<'a>,
}

#[derive(Debug, Clone)]
pub struct RestTypeNode<'a> {
    pub data: NodeData,
    pub type_node: TypeNode<'a>,
}

#[derive(Debug, Clone)]
pub struct UnionTypeNode<'a> {
    pub data: NodeData,
    pub types: NodeArray<'a, TypeNode<'a>>,
}

#[derive(Debug, Clone)]
pub struct IntersectionTypeNode<'a> {
    pub data: NodeData,
    pub types: NodeArray<'a, TypeNode<'a>>,
}

#[derive(Debug, Clone)]
pub struct ParenthesizedTypeNode<'a> {
    pub data: NodeData,
    pub type_node: TypeNode<'a>,
}

#[derive(Debug, Clone)]
pub struct TypeOperatorNode<'a> {
    pub data: NodeData,
    /// `keyof`, `readonly`, or `unique`.
    pub operator: SyntaxKind,
    pub type_node: TypeNode<'a>,
}

#[derive(Debug, Clone)]
pub struct IndexedAccessTypeNode<'a> {
    pub data: NodeData,
    pub object_type: TypeNode<'a>,
    pub index_type: TypeNode<'a>,
}

#[derive(Debug, Clone)]
pub struct LiteralTypeNode<'a> {
    pub data: NodeData,
    pub literal: Expression<'a>,
}

// ============================================================================
// Type members
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub enum TypeElement<'a> {
    PropertySignature(&'a PropertySignature<'a>),
    MethodSignature(&'a MethodSignature<'a>),
    CallSignature(&'a CallSignatureDeclaration<'a>),
    ConstructSignature(&'a ConstructSignatureDeclaration<'a>),
    IndexSignature(&'a IndexSignatureDeclaration<'a>),
}

impl<'a> TypeElement<'a> {
    pub fn node_data(self) -> &'a NodeData {
        match self {
            TypeElement::PropertySignature(n) => &n.data,
            TypeElement::MethodSignature(n) => &n.data,
            TypeElement::CallSignature(n) => &n.data,
            TypeElement::ConstructSignature(n) => &n.data,
            TypeElement::IndexSignature(n) => &n.data,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PropertySignature<'a> {
    pub data: NodeData,
    pub modifiers: Option<NodeArray<'a, Modifier>>,
    pub name: PropertyName<'a>,
    pub question_token: Option<Token>,
    pub type_annotation: Option<TypeNode<'a>>,
}

#[derive(Debug, Clone)]
pub struct MethodSignature<'a> {
    pub data: NodeData,
    pub modifiers: Option<NodeArray<'a, Modifier>>,
    pub name: PropertyName<'a>,
    pub question_token: Option<Token>,
    pub type_parameters: Option<NodeArray<'a, &'a TypeParameterDeclaration<'a>>>,
    pub parameters: NodeArray<'a, &'a ParameterDeclaration<'a>>,
    pub return_type: Option<TypeNode<'a>>,
}

#[derive(Debug, Clone)]
pub struct CallSignatureDeclaration<'a> {
    pub data: NodeData,
    pub type_parameters: Option<NodeArray<'a, &'a TypeParameterDeclaration<'a>>>,
    pub parameters: NodeArray<'a, &'a ParameterDeclaration<'a>>,
    pub return_type: Option<TypeNode<'a>>,
}

#[derive(Debug, Clone)]
pub struct ConstructSignatureDeclaration<'a> {
    pub data: NodeData,
    pub type_parameters: Option<NodeArray<'a, &'a TypeParameterDeclaration<'a>>>,
    pub parameters: NodeArray<'a, &'a ParameterDeclaration<'a>>,
    pub return_type: Option<TypeNode<'a>>,
}

#[derive(Debug, Clone)]
pub struct IndexSignatureDeclaration<'a> {
    pub data: NodeData,
    pub modifiers: Option<NodeArray<'a, Modifier>>,
    pub parameters: NodeArray<'a, &'a ParameterDeclaration<'a>>,
    pub type_annotation: Option<TypeNode<'a>>,
}

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub enum Expression<'a> {
    Identifier(&'a Identifier<'a>),
    This(&'a Token),
    Super(&'a Token),
    Null(&'a Token),
    True(&'a Token),
    False(&'a Token),
    Numeric(&'a NumericLiteral<'a>),
    BigInt(&'a BigIntLiteral<'a>),
    String(&'a StringLiteral<'a>),
    Regex(&'a RegularExpressionLiteral<'a>),
    NoSubstitutionTemplate(&'a NoSubstitutionTemplateLiteral<'a>),
    Template(&'a TemplateExpression<'a>),
    ArrayLiteral(&'a ArrayLiteralExpression<'a>),
    ObjectLiteral(&'a ObjectLiteralExpression<'a>),
    PropertyAccess(&'a PropertyAccessExpression<'a>),
    ElementAccess(&'a ElementAccessExpression<'a>),
    Call(&'a CallExpression<'a>),
    New(&'a NewExpression<'a>),
    TaggedTemplate(&'a TaggedTemplateExpression<'a>),
    TypeAssertion(&'a TypeAssertionExpression<'a>),
    Parenthesized(&'a ParenthesizedExpression<'a>),
    Function(&'a FunctionExpression<'a>),
    Arrow(&'a ArrowFunction<'a>),
    Delete(&'a DeleteExpression<'a>),
    TypeOf(&'a TypeOfExpression<'a>),
    Void(&'a VoidExpression<'a>),
    Await(&'a AwaitExpression<'a>),
    PrefixUnary(&'a PrefixUnaryExpression<'a>),
    PostfixUnary(&'a PostfixUnaryExpression<'a>),
    Binary(&'a BinaryExpression<'a>),
    Conditional(&'a ConditionalExpression<'a>),
    Yield(&'a YieldExpression<'a>),
    Spread(&'a SpreadElement<'a>),
    Class(&'a ClassExpression<'a>),
    Omitted(&'a OmittedExpression),
    As(&'a AsExpression<'a>),
    Satisfies(&'a SatisfiesExpression<'a>),
    NonNull(&'a NonNullExpression<'a>),
    MarkupElement(&'a MarkupElement<'a>),
    MarkupSelfClosing(&'a MarkupSelfClosingElement<'a>),
    MarkupFragment(&'a MarkupFragment<'a>),
}

impl<'a> Expression<'a> {
    pub fn node_data(self) -> &'a NodeData {
        match self {
            Expression::Identifier(n) => &n.data,
            Expression::This(n) => &n.data,
            Expression::Super(n) => &n.data,
            Expression::Null(n) => &n.data,
            Expression::True(n) => &n.data,
            Expression::False(n) => &n.data,
            Expression::Numeric(n) => &n.data,
            Expression::BigInt(n) => &n.data,
            Expression::String(n) => &n.data,
            Expression::Regex(n) => &n.data,
            Expression::NoSubstitutionTemplate(n) => &n.data,
            Expression::Template(n) => &n.data,
            Expression::ArrayLiteral(n) => &n.data,
            Expression::ObjectLiteral(n) => &n.data,
            Expression::PropertyAccess(n) => &n.data,
            Expression::ElementAccess(n) => &n.data,
            Expression::Call(n) => &n.data,
            Expression::New(n) => &n.data,
            Expression::TaggedTemplate(n) => &n.data,
            Expression::TypeAssertion(n) => &n.data,
            Expression::Parenthesized(n) => &n.data,
            Expression::Function(n) => &n.data,
            Expression::Arrow(n) => &n.data,
            Expression::Delete(n) => &n.data,
            Expression::TypeOf(n) => &n.data,
            Expression::Void(n) => &n.data,
            Expression::Await(n) => &n.data,
            Expression::PrefixUnary(n) => &n.data,
            Expression::PostfixUnary(n) => &n.data,
            Expression::Binary(n) => &n.data,
            Expression::Conditional(n) => &n.data,
            Expression::Yield(n) => &n.data,
            Expression::Spread(n) => &n.data,
            Expression::Class(n) => &n.data,
            Expression::Omitted(n) => &n.data,
            Expression::As(n) => &n.data,
            Expression::Satisfies(n) => &n.data,
            Expression::NonNull(n) => &n.data,
            Expression::MarkupElement(n) => &n.data,
            Expression::MarkupSelfClosing(n) => &n.data,
            Expression::MarkupFragment(n) => &n.data,
        }
    }

    pub fn kind(self) -> SyntaxKind {
        self.node_data().kind
    }
}

#[derive(Debug, Clone)]
pub struct NumericLiteral<'a> {
    pub data: NodeData,
    pub text: &'a str,
}

#[derive(Debug, Clone)]
pub struct BigIntLiteral<'a> {
    pub data: NodeData,
    pub text: &'a str,
}

#[derive(Debug, Clone)]
pub struct StringLiteral<'a> {
    pub data: NodeData,
    /// The cooked value, escapes resolved.
    pub text: &'a str,
}

#[derive(Debug, Clone)]
pub struct RegularExpressionLiteral<'a> {
    pub data: NodeData,
    pub text: &'a str,
}

#[derive(Debug, Clone)]
pub struct NoSubstitutionTemplateLiteral<'a> {
    pub data: NodeData,
    pub text: &'a str,
}

/// A head, middle, or tail piece of a substitution template, the kind
/// held in `data.kind`.
#[derive(Debug, Clone)]
pub struct TemplateLiteralPiece<'a> {
    pub data: NodeData,
    pub text: &'a str,
}

#[derive(Debug, Clone)]
pub struct TemplateExpression<'a> {
    pub data: NodeData,
    pub head: &'a TemplateLiteralPiece<'a>,
    pub template_spans: NodeArray<'a, &'a TemplateSpan<'a>>,
}

#[derive(Debug, Clone)]
pub struct TemplateSpan<'a> {
    pub data: NodeData,
    pub expression: Expression<'a>,
    pub literal: &'a TemplateLiteralPiece<'a>,
}

#[derive(Debug, Clone, Copy)]
pub enum TemplateLiteral<'a> {
    NoSubstitution(&'a NoSubstitutionTemplateLiteral<'a>),
    Template(&'a TemplateExpression<'a>),
}

impl<'a> TemplateLiteral<'a> {
    pub fn node_data(self) -> &'a NodeData {
        match self {
            TemplateLiteral::NoSubstitution(n) => &n.data,
            TemplateLiteral::Template(n) => &n.data,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ArrayLiteralExpression<'a> {
    pub data: NodeData,
    pub elements: NodeArray<'a, Expression<'a>>,
}

#[derive(Debug, Clone)]
pub struct ObjectLiteralExpression<'a> {
    pub data: NodeData,
    pub properties: NodeArray<'a, ObjectLiteralElement<'a>>,
}

#[derive(Debug, Clone, Copy)]
pub enum ObjectLiteralElement<'a> {
    Property(&'a PropertyAssignment<'a>),
    Shorthand(&'a ShorthandPropertyAssignment<'a>),
    Spread(&'a SpreadAssignment<'a>),
    Method(&'a MethodDeclaration<'a>),
    GetAccessor(&'a GetAccessorDeclaration<'a>),
    SetAccessor(&'a SetAccessorDeclaration<'a>),
}

impl<'a> ObjectLiteralElement<'a> {
    pub fn node_data(self) -> &'a NodeData {
        match self {
            ObjectLiteralElement::Property(n) => &n.data,
            ObjectLiteralElement::Shorthand(n) => &n.data,
            ObjectLiteralElement::Spread(n) => &n.data,
            ObjectLiteralElement::Method(n) => &n.data,
            ObjectLiteralElement::GetAccessor(n) => &n.data,
            ObjectLiteralElement::SetAccessor(n) => &n.data,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PropertyAssignment<'a> {
    pub data: NodeData,
    pub name: PropertyName<'a>,
    pub initializer: Expression<'a>,
}

#[derive(Debug, Clone)]
pub struct ShorthandPropertyAssignment<'a> {
    pub data: NodeData,
    pub name: &'a Identifier<'a>,
    /// Present in destructuring contexts: `{ a = 1 } = obj`.
    pub object_assignment_initializer: Option<Expression<'a>>,
}

#[derive(Debug, Clone)]
pub struct SpreadAssignment<'a> {
    pub data: NodeData,
    pub expression: Expression<'a>,
}

#[derive(Debug, Clone)]
pub struct PropertyAccessExpression<'a> {
    pub data: NodeData,
    pub expression: Expression<'a>,
    pub question_dot_token: Option<Token>,
    pub name: MemberName<'a>,
}

#[derive(Debug, Clone)]
pub struct ElementAccessExpression<'a> {
    pub data: NodeData,
    pub expression: Expression<'a>,
    pub question_dot_token: Option<Token>,
    pub argument_expression: Expression<'a>,
}

#[derive(Debug, Clone)]
pub struct CallExpression<'a> {
    pub data: NodeData,
    pub expression: Expression<'a>,
    pub question_dot_token: Option<Token>,
    pub type_arguments: Option<NodeArray<'a, TypeNode<'a>>>,
    pub arguments: NodeArray<'a, Expression<'a>>,
}

#[derive(Debug, Clone)]
pub struct NewExpression<'a> {
    pub data: NodeData,
    pub expression: Expression<'a>,
    pub type_arguments: Option<NodeArray<'a, TypeNode<'a>>>,
    pub arguments: Option<NodeArray<'a, Expression<'a>>>,
}

#[derive(Debug, Clone)]
pub struct TaggedTemplateExpression<'a> {
    pub data: NodeData,
    pub tag: Expression<'a>,
    pub type_arguments: Option<NodeArray<'a, TypeNode<'a>>>,
    pub template: TemplateLiteral<'a>,
}

#[derive(Debug, Clone)]
pub struct TypeAssertionExpression<'a> {
    pub data: NodeData,
    pub type_node: TypeNode<'a>,
    pub expression: Expression<'a>,
}

#[derive(Debug, Clone)]
pub struct ParenthesizedExpression<'a> {
    pub data: NodeData,
    pub expression: Expression<'a>,
}

#[derive(Debug, Clone)]
pub struct FunctionExpression<'a> {
    pub data: NodeData,
    pub modifiers: Option<NodeArray<'a, Modifier>>,
    pub asterisk_token: Option<Token>,
    pub name: Option<&'a Identifier<'a>>,
    pub type_parameters: Option<NodeArray<'a, &'a TypeParameterDeclaration<'a>>>,
    pub parameters: NodeArray<'a, &'a ParameterDeclaration<'a>>,
    pub return_type: Option<TypeNode<'a>>,
    pub body: &'a Block<'a>,
}

#[derive(Debug, Clone, Copy)]
pub enum ArrowBody<'a> {
    Block(&'a Block<'a>),
    Expression(Expression<'a>),
}

impl<'a> ArrowBody<'a> {
    pub fn node_data(self) -> &'a NodeData {
        match self {
            ArrowBody::Block(n) => &n.data,
            ArrowBody::Expression(n) => n.node_data(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ArrowFunction<'a> {
    pub data: NodeData,
    pub modifiers: Option<NodeArray<'a, Modifier>>,
    pub type_parameters: Option<NodeArray<'a, &'a TypeParameterDeclaration<'a>>>,
    pub parameters: NodeArray<'a, &'a ParameterDeclaration<'a>>,
    pub return_type: Option<TypeNode<'a>>,
    pub equals_greater_than_token: Token,
    pub body: ArrowBody<'a>,
}

#[derive(Debug, Clone)]
pub struct DeleteExpression<'a> {
    pub data: NodeData,
    pub expression: Expression<'a>,
}

#[derive(Debug, Clone)]
pub struct TypeOfExpression<'a> {
    pub data: NodeData,
    pub expression: Expression<'a>,
}

#[derive(Debug, Clone)]
pub struct VoidExpression<'a> {
    pub data: NodeData,
    pub expression: Expression<'a>,
}

#[derive(Debug, Clone)]
pub struct AwaitExpression<'a> {
    pub data: NodeData,
    pub expression: Expression<'a>,
}

#[derive(Debug, Clone)]
pub struct PrefixUnaryExpression<'a> {
    pub data: NodeData,
    pub operator: SyntaxKind,
    pub operand: Expression<'a>,
}

#[derive(Debug, Clone)]
pub struct PostfixUnaryExpression<'a> {
    pub data: NodeData,
    pub operand: Expression<'a>,
    pub operator: SyntaxKind,
}

#[derive(Debug, Clone)]
pub struct BinaryExpression<'a> {
    pub data: NodeData,
    pub left: Expression<'a>,
    pub operator_token: Token,
    pub right: Expression<'a>,
}

#[derive(Debug, Clone)]
pub struct ConditionalExpression<'a> {
    pub data: NodeData,
    pub condition: Expression<'a>,
    pub question_token: Token,
    pub when_true: Expression<'a>,
    pub colon_token: Token,
    pub when_false: Expression<'a>,
}

#[derive(Debug, Clone)]
pub struct YieldExpression<'a> {
    pub data: NodeData,
    pub asterisk_token: Option<Token>,
    pub expression: Option<Expression<'a>>,
}

#[derive(Debug, Clone)]
pub struct SpreadElement<'a> {
    pub data: NodeData,
    pub expression: Expression<'a>,
}

#[derive(Debug, Clone)]
pub struct OmittedExpression {
    pub data: NodeData,
}

#[derive(Debug, Clone)]
pub struct ExpressionWithTypeArguments<'a> {
    pub data: NodeData,
    pub expression: Expression<'a>,
    pub type_arguments: Option<NodeArray<'a, TypeNode<'a>>>,
}

#[derive(Debug, Clone)]
pub struct AsExpression<'a> {
    pub data: NodeData,
    pub expression: Expression<'a>,
    pub type_node: TypeNode<'a>,
}

#[derive(Debug, Clone)]
pub struct SatisfiesExpression<'a> {
    pub data: NodeData,
    pub expression: Expression<'a>,
    pub type_node: TypeNode<'a>,
}

#[derive(Debug, Clone)]
pub struct NonNullExpression<'a> {
    pub data: NodeData,
    pub expression: Expression<'a>,
}

// ============================================================================
// Markup
// ============================================================================

#[derive(Debug, Clone)]
pub struct MarkupElement<'a> {
    pub data: NodeData,
    pub opening_element: &'a MarkupOpeningElement<'a>,
    pub children: NodeArray<'a, MarkupChild<'a>>,
    pub closing_element: &'a MarkupClosingElement<'a>,
}

#[derive(Debug, Clone)]
pub struct MarkupSelfClosingElement<'a> {
    pub data: NodeData,
    pub tag_name: EntityName<'a>,
    pub attributes: &'a MarkupAttributes<'a>,
}

#[derive(Debug, Clone)]
pub struct MarkupOpeningElement<'a> {
    pub data: NodeData,
    pub tag_name: EntityName<'a>,
    pub attributes: &'a MarkupAttributes<'a>,
}

#[derive(Debug, Clone)]
pub struct MarkupClosingElement<'a> {
    pub data: NodeData,
    pub tag_name: EntityName<'a>,
}

#[derive(Debug, Clone)]
pub struct MarkupFragment<'a> {
    pub data: NodeData,
    pub opening_fragment: &'a MarkupOpeningFragment,
    pub children: NodeArray<'a, MarkupChild<'a>>,
    pub closing_fragment: &'a MarkupClosingFragment,
}

#[derive(Debug, Clone)]
pub struct MarkupOpeningFragment {
    pub data: NodeData,
}

#[derive(Debug, Clone)]
pub struct MarkupClosingFragment {
    pub data: NodeData,
}

#[derive(Debug, Clone)]
pub struct MarkupAttributes<'a> {
    pub data: NodeData,
    pub properties: NodeArray<'a, MarkupAttributeLike<'a>>,
}

#[derive(Debug, Clone, Copy)]
pub enum MarkupAttributeLike<'a> {
    Attribute(&'a MarkupAttribute<'a>),
    Spread(&'a MarkupSpreadAttribute<'a>),
}

impl<'a> MarkupAttributeLike<'a> {
    pub fn node_data(self) -> &'a NodeData {
        match self {
            MarkupAttributeLike::Attribute(n) => &n.data,
            MarkupAttributeLike::Spread(n) => &n.data,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MarkupAttribute<'a> {
    pub data: NodeData,
    pub name: &'a Identifier<'a>,
    pub initializer: Option<MarkupAttributeValue<'a>>,
}

#[derive(Debug, Clone, Copy)]
pub enum MarkupAttributeValue<'a> {
    String(&'a StringLiteral<'a>),
    Expression(&'a MarkupExpression<'a>),
}

impl<'a> MarkupAttributeValue<'a> {
    pub fn node_data(self) -> &'a NodeData {
        match self {
            MarkupAttributeValue::String(n) => &n.data,
            MarkupAttributeValue::Expression(n) => &n.data,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MarkupSpreadAttribute<'a> {
    pub data: NodeData,
    pub expression: Expression<'a>,
}

#[derive(Debug, Clone)]
pub struct MarkupExpression<'a> {
    pub data: NodeData,
    pub dot_dot_dot_token: Option<Token>,
    pub expression: Option<Expression<'a>>,
}

#[derive(Debug, Clone)]
pub struct MarkupTextNode<'a> {
    pub data: NodeData,
    pub text: &'a str,
    pub contains_only_whitespace: bool,
}

#[derive(Debug, Clone, Copy)]
pub enum MarkupChild<'a> {
    Text(&'a MarkupTextNode<'a>),
    Element(&'a MarkupElement<'a>),
    SelfClosing(&'a MarkupSelfClosingElement<'a>),
    Fragment(&'a MarkupFragment<'a>),
    Expression(&'a MarkupExpression<'a>),
}

impl<'a> MarkupChild<'a> {
    pub fn node_data(self) -> &'a NodeData {
        match self {
            MarkupChild::Text(n) => &n.data,
            MarkupChild::Element(n) => &n.data,
            MarkupChild::SelfClosing(n) => &n.data,
            MarkupChild::Fragment(n) => &n.data,
            MarkupChild::Expression(n) => &n.data,
        }
    }
}

// ============================================================================
// Statements
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub enum Statement<'a> {
    Block(&'a Block<'a>),
    Empty(&'a EmptyStatement),
    Variable(&'a VariableStatement<'a>),
    Expression(&'a ExpressionStatement<'a>),
    If(&'a IfStatement<'a>),
    Do(&'a DoStatement<'a>),
    While(&'a WhileStatement<'a>),
    For(&'a ForStatement<'a>),
    ForIn(&'a ForInStatement<'a>),
    ForOf(&'a ForOfStatement<'a>),
    Continue(&'a ContinueStatement<'a>),
    Break(&'a BreakStatement<'a>),
    Return(&'a ReturnStatement<'a>),
    With(&'a WithStatement<'a>),
    Switch(&'a SwitchStatement<'a>),
    Labeled(&'a LabeledStatement<'a>),
    Throw(&'a ThrowStatement<'a>),
    Try(&'a TryStatement<'a>),
    Debugger(&'a DebuggerStatement),
    Function(&'a FunctionDeclaration<'a>),
    Class(&'a ClassDeclaration<'a>),
    Interface(&'a InterfaceDeclaration<'a>),
    TypeAlias(&'a TypeAliasDeclaration<'a>),
    Enum(&'a EnumDeclaration<'a>),
    Module(&'a ModuleDeclaration<'a>),
    ImportEquals(&'a ImportEqualsDeclaration<'a>),
    Import(&'a ImportDeclaration<'a>),
    ExportAssignment(&'a ExportAssignment<'a>),
    Export(&'a ExportDeclaration<'a>),
}

impl<'a> Statement<'a> {
    pub fn node_data(self) -> &'a NodeData {
        match self {
            Statement::Block(n) => &n.data,
            Statement::Empty(n) => &n.data,
            Statement::Variable(n) => &n.data,
            Statement::Expression(n) => &n.data,
            Statement::If(n) => &n.data,
            Statement::Do(n) => &n.data,
            Statement::While(n) => &n.data,
            Statement::For(n) => &n.data,
            Statement::ForIn(n) => &n.data,
            Statement::ForOf(n) => &n.data,
            Statement::Continue(n) => &n.data,
            Statement::Break(n) => &n.data,
            Statement::Return(n) => &n.data,
            Statement::With(n) => &n.data,
            Statement::Switch(n) => &n.data,
            Statement::Labeled(n) => &n.data,
            Statement::Throw(n) => &n.data,
            Statement::Try(n) => &n.data,
            Statement::Debugger(n) => &n.data,
            Statement::Function(n) => &n.data,
            Statement::Class(n) => &n.data,
            Statement::Interface(n) => &n.data,
            Statement::TypeAlias(n) => &n.data,
            Statement::Enum(n) => &n.data,
            Statement::Module(n) => &n.data,
            Statement::ImportEquals(n) => &n.data,
            Statement::Import(n) => &n.data,
            Statement::ExportAssignment(n) => &n.data,
            Statement::Export(n) => &n.data,
        }
    }

    pub fn kind(self) -> SyntaxKind {
        self.node_data().kind
    }
}

#[derive(Debug, Clone)]
pub struct Block<'a> {
    pub data: NodeData,
    pub statements: NodeArray<'a, Statement<'a>>,
}

#[derive(Debug, Clone)]
pub struct EmptyStatement {
    pub data: NodeData,
}

#[derive(Debug, Clone)]
pub struct VariableStatement<'a> {
    pub data: NodeData,
    pub modifiers: Option<NodeArray<'a, Modifier>>,
    pub declaration_list: &'a VariableDeclarationList<'a>,
}

#[derive(Debug, Clone)]
pub struct VariableDeclarationList<'a> {
    /// LET or CONST node flags record the declaration keyword.
    pub data: NodeData,
    pub declarations: NodeArray<'a, &'a VariableDeclaration<'a>>,
}

#[derive(Debug, Clone)]
pub struct VariableDeclaration<'a> {
    pub data: NodeData,
    pub name: BindingName<'a>,
    pub exclamation_token: Option<Token>,
    pub type_annotation: Option<TypeNode<'a>>,
    pub initializer: Option<Expression<'a>>,
}

#[derive(Debug, Clone)]
pub struct ExpressionStatement<'a> {
    pub data: NodeData,
    pub expression: Expression<'a>,
}

#[derive(Debug, Clone)]
pub struct IfStatement<'a> {
    pub data: NodeData,
    pub expression: Expression<'a>,
    pub then_statement: Statement<'a>,
    pub else_statement: Option<Statement<'a>>,
}

#[derive(Debug, Clone)]
pub struct DoStatement<'a> {
    pub data: NodeData,
    pub statement: Statement<'a>,
    pub expression: Expression<'a>,
}

#[derive(Debug, Clone)]
pub struct WhileStatement<'a> {
    pub data: NodeData,
    pub expression: Expression<'a>,
    pub statement: Statement<'a>,
}

#[derive(Debug, Clone, Copy)]
pub enum ForInitializer<'a> {
    VariableDeclarationList(&'a VariableDeclarationList<'a>),
    Expression(Expression<'a>),
}

impl<'a> ForInitializer<'a> {
    pub fn node_data(self) -> &'a NodeData {
        match self {
            ForInitializer::VariableDeclarationList(n) => &n.data,
            ForInitializer::Expression(n) => n.node_data(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ForStatement<'a> {
    pub data: NodeData,
    pub initializer: Option<ForInitializer<'a>>,
    pub condition: Option<Expression<'a>>,
    pub incrementor: Option<Expression<'a>>,
    pub statement: Statement<'a>,
}

#[derive(Debug, Clone)]
pub struct ForInStatement<'a> {
    pub data: NodeData,
    pub initializer: ForInitializer<'a>,
    pub expression: Expression<'a>,
    pub statement: Statement<'a>,
}

#[derive(Debug, Clone)]
pub struct ForOfStatement<'a> {
    pub data: NodeData,
    pub await_modifier: Option<Token>,
    pub initializer: ForInitializer<'a>,
    pub expression: Expression<'a>,
    pub statement: Statement<'a>,
}

#[derive(Debug, Clone)]
pub struct ContinueStatement<'a> {
    pub data: NodeData,
    pub label: Option<&'a Identifier<'a>>,
}

#[derive(Debug, Clone)]
pub struct BreakStatement<'a> {
    pub data: NodeData,
    pub label: Option<&'a Identifier<'a>>,
}

#[derive(Debug, Clone)]
pub struct ReturnStatement<'a> {
    pub data: NodeData,
    pub expression: Option<Expression<'a>>,
}

#[derive(Debug, Clone)]
pub struct WithStatement<'a> {
    pub data: NodeData,
    pub expression: Expression<'a>,
    pub statement: Statement<'a>,
}

#[derive(Debug, Clone)]
pub struct SwitchStatement<'a> {
    pub data: NodeData,
    pub expression: Expression<'a>,
    pub case_block: &'a CaseBlock<'a>,
}

#[derive(Debug, Clone)]
pub struct CaseBlock<'a> {
    pub data: NodeData,
    pub clauses: NodeArray<'a, CaseOrDefaultClause<'a>>,
}

#[derive(Debug, Clone, Copy)]
pub enum CaseOrDefaultClause<'a> {
    Case(&'a CaseClause<'a>),
    Default(&'a DefaultClause<'a>),
}

impl<'a> CaseOrDefaultClause<'a> {
    pub fn node_data(self) -> &'a NodeData {
        match self {
            CaseOrDefaultClause::Case(n) => &n.data,
            CaseOrDefaultClause::Default(n) => &n.data,
        }
    }

    pub fn statements(self) -> &'a NodeArray<'a, Statement<'a>> {
        match self {
            CaseOrDefaultClause::Case(n) => &n.statements,
            CaseOrDefaultClause::Default(n) => &n.statements,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CaseClause<'a> {
    pub data: NodeData,
    pub expression: Expression<'a>,
    pub statements: NodeArray<'a, Statement<'a>>,
}

#[derive(Debug, Clone)]
pub struct DefaultClause<'a> {
    pub data: NodeData,
    pub statements: NodeArray<'a, Statement<'a>>,
}

#[derive(Debug, Clone)]
pub struct LabeledStatement<'a> {
    pub data: NodeData,
    pub label: &'a Identifier<'a>,
    pub statement: Statement<'a>,
}

#[derive(Debug, Clone)]
pub struct ThrowStatement<'a> {
    pub data: NodeData,
    pub expression: Expression<'a>,
}

#[derive(Debug, Clone)]
pub struct TryStatement<'a> {
    pub data: NodeData,
    pub try_block: &'a Block<'a>,
    pub catch_clause: Option<&'a CatchClause<'a>>,
    pub finally_block: Option<&'a Block<'a>>,
}

#[derive(Debug, Clone)]
pub struct CatchClause<'a> {
    pub data: NodeData,
    pub variable_declaration: Option<&'a VariableDeclaration<'a>>,
    pub block: &'a Block<'a>,
}

#[derive(Debug, Clone)]
pub struct DebuggerStatement {
    pub data: NodeData,
}

// ============================================================================
// Declarations
// ============================================================================

#[derive(Debug, Clone)]
pub struct FunctionDeclaration<'a> {
    pub data: NodeData,
    pub modifiers: Option<NodeArray<'a, Modifier>>,
    pub asterisk_token: Option<Token>,
    pub name: Option<&'a Identifier<'a>>,
    pub type_parameters: Option<NodeArray<'a, &'a TypeParameterDeclaration<'a>>>,
    pub parameters: NodeArray<'a, &'a ParameterDeclaration<'a>>,
    pub return_type: Option<TypeNode<'a>>,
    pub body: Option<&'a Block<'a>>,
}

#[derive(Debug, Clone)]
pub struct ClassDeclaration<'a> {
    pub data: NodeData,
    pub decorators: Option<NodeArray<'a, &'a Decorator<'a>>>,
    pub modifiers: Option<NodeArray<'a, Modifier>>,
    pub name: Option<&'a Identifier<'a>>,
    pub type_parameters: Option<NodeArray<'a, &'a TypeParameterDeclaration<'a>>>,
    pub heritage_clauses: Option<NodeArray<'a, &'a HeritageClause<'a>>>,
    pub members: NodeArray<'a, ClassElement<'a>>,
}

#[derive(Debug, Clone)]
pub struct ClassExpression<'a> {
    pub data: NodeData,
    pub decorators: Option<NodeArray<'a, &'a Decorator<'a>>>,
    pub modifiers: Option<NodeArray<'a, Modifier>>,
    pub name: Option<&'a Identifier<'a>>,
    pub type_parameters: Option<NodeArray<'a, &'a TypeParameterDeclaration<'a>>>,
    pub heritage_clauses: Option<NodeArray<'a, &'a HeritageClause<'a>>>,
    pub members: NodeArray<'a, ClassElement<'a>>,
}

#[derive(Debug, Clone)]
pub struct HeritageClause<'a> {
    pub data: NodeData,
    /// `extends` or `implements`.
    pub token: SyntaxKind,
    pub types: NodeArray<'a, &'a ExpressionWithTypeArguments<'a>>,
}

#[derive(Debug, Clone, Copy)]
pub enum ClassElement<'a> {
    Constructor(&'a ConstructorDeclaration<'a>),
    Method(&'a MethodDeclaration<'a>),
    Property(&'a PropertyDeclaration<'a>),
    GetAccessor(&'a GetAccessorDeclaration<'a>),
    SetAccessor(&'a SetAccessorDeclaration<'a>),
    IndexSignature(&'a IndexSignatureDeclaration<'a>),
    Semicolon(&'a SemicolonClassElement),
}

impl<'a> ClassElement<'a> {
    pub fn node_data(self) -> &'a NodeData {
        match self {
            ClassElement::Constructor(n) => &n.data,
            ClassElement::Method(n) => &n.data,
            ClassElement::Property(n) => &n.data,
            ClassElement::GetAccessor(n) => &n.data,
            ClassElement::SetAccessor(n) => &n.data,
            ClassElement::IndexSignature(n) => &n.data,
            ClassElement::Semicolon(n) => &n.data,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConstructorDeclaration<'a> {
    pub data: NodeData,
    pub modifiers: Option<NodeArray<'a, Modifier>>,
    pub parameters: NodeArray<'a, &'a ParameterDeclaration<'a>>,
    pub body: Option<&'a Block<'a>>,
}

#[derive(Debug, Clone)]
pub struct MethodDeclaration<'a> {
    pub data: NodeData,
    pub decorators: Option<NodeArray<'a, &'a Decorator<'a>>>,
    pub modifiers: Option<NodeArray<'a, Modifier>>,
    pub asterisk_token: Option<Token>,
    pub name: PropertyName<'a>,
    pub question_token: Option<Token>,
    pub type_parameters: Option<NodeArray<'a, &'a TypeParameterDeclaration<'a>>>,
    pub parameters: NodeArray<'a, &'a ParameterDeclaration<'a>>,
    pub return_type: Option<TypeNode<'a>>,
    pub body: Option<&'a Block<'a>>,
}

#[derive(Debug, Clone)]
pub struct PropertyDeclaration<'a> {
    pub data: NodeData,
    pub decorators: Option<NodeArray<'a, &'a Decorator<'a>>>,
    pub modifiers: Option<NodeArray<'a, Modifier>>,
    pub name: PropertyName<'a>,
    pub question_token: Option<Token>,
    pub exclamation_token: Option<Token>,
    pub type_annotation: Option<TypeNode<'a>>,
    pub initializer: Option<Expression<'a>>,
}

#[derive(Debug, Clone)]
pub struct GetAccessorDeclaration<'a> {
    pub data: NodeData,
    pub decorators: Option<NodeArray<'a, &'a Decorator<'a>>>,
    pub modifiers: Option<NodeArray<'a, Modifier>>,
    pub name: PropertyName<'a>,
    pub parameters: NodeArray<'a, &'a ParameterDeclaration<'a>>,
    pub return_type: Option<TypeNode<'a>>,
    pub body: Option<&'a Block<'a>>,
}

#[derive(Debug, Clone)]
pub struct SetAccessorDeclaration<'a> {
    pub data: NodeData,
    pub decorators: Option<NodeArray<'a, &'a Decorator<'a>>>,
    pub modifiers: Option<NodeArray<'a, Modifier>>,
    pub name: PropertyName<'a>,
    pub parameters: NodeArray<'a, &'a ParameterDeclaration<'a>>,
    pub body: Option<&'a Block<'a>>,
}

#[derive(Debug, Clone)]
pub struct SemicolonClassElement {
    pub data: NodeData,
}

#[derive(Debug, Clone)]
pub struct InterfaceDeclaration<'a> {
    pub data: NodeData,
    pub modifiers: Option<NodeArray<'a, Modifier>>,
    pub name: &'a Identifier<'a>,
    pub type_parameters: Option<NodeArray<'a, &'a TypeParameterDeclaration<'a>>>,
    pub heritage_clauses: Option<NodeArray<'a, &'a HeritageClause<'a>>>,
    pub members: NodeArray<'a, TypeElement<'a>>,
}

#[derive(Debug, Clone)]
pub struct TypeAliasDeclaration<'a> {
    pub data: NodeData,
    pub modifiers: Option<NodeArray<'a, Modifier>>,
    pub name: &'a Identifier<'a>,
    pub type_parameters: Option<NodeArray<'a, &'a TypeParameterDeclaration<'a>>>,
    pub type_node: TypeNode<'a>,
}

#[derive(Debug, Clone)]
pub struct EnumDeclaration<'a> {
    pub data: NodeData,
    pub modifiers: Option<NodeArray<'a, Modifier>>,
    pub name: &'a Identifier<'a>,
    pub members: NodeArray<'a, &'a EnumMember<'a>>,
}

#[derive(Debug, Clone)]
pub struct EnumMember<'a> {
    pub data: NodeData,
    pub name: PropertyName<'a>,
    pub initializer: Option<Expression<'a>>,
}

#[derive(Debug, Clone, Copy)]
pub enum ModuleName<'a> {
    Identifier(&'a Identifier<'a>),
    String(&'a StringLiteral<'a>),
}

impl<'a> ModuleName<'a> {
    pub fn node_data(self) -> &'a NodeData {
        match self {
            ModuleName::Identifier(n) => &n.data,
            ModuleName::String(n) => &n.data,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum ModuleBody<'a> {
    Block(&'a ModuleBlock<'a>),
    Namespace(&'a ModuleDeclaration<'a>),
}

impl<'a> ModuleBody<'a> {
    pub fn node_data(self) -> &'a NodeData {
        match self {
            ModuleBody::Block(n) => &n.data,
            ModuleBody::Namespace(n) => &n.data,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ModuleDeclaration<'a> {
    pub data: NodeData,
    pub modifiers: Option<NodeArray<'a, Modifier>>,
    pub name: ModuleName<'a>,
    pub body: Option<ModuleBody<'a>>,
}

#[derive(Debug, Clone)]
pub struct ModuleBlock<'a> {
    pub data: NodeData,
    pub statements: NodeArray<'a, Statement<'a>>,
}

#[derive(Debug, Clone, Copy)]
pub enum ModuleReference<'a> {
    Entity(EntityName<'a>),
    External(&'a ExternalModuleReference<'a>),
}

impl<'a> ModuleReference<'a> {
    pub fn node_data(self) -> &'a NodeData {
        match self {
            ModuleReference::Entity(n) => n.node_data(),
            ModuleReference::External(n) => &n.data,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExternalModuleReference<'a> {
    pub data: NodeData,
    pub expression: Expression<'a>,
}

#[derive(Debug, Clone)]
pub struct ImportEqualsDeclaration<'a> {
    pub data: NodeData,
    pub modifiers: Option<NodeArray<'a, Modifier>>,
    pub name: &'a Identifier<'a>,
    pub module_reference: ModuleReference<'a>,
}

#[derive(Debug, Clone)]
pub struct ImportDeclaration<'a> {
    pub data: NodeData,
    pub modifiers: Option<NodeArray<'a, Modifier>>,
    pub import_clause: Option<&'a ImportClause<'a>>,
    pub module_specifier: Expression<'a>,
}

#[derive(Debug, Clone)]
pub struct ImportClause<'a> {
    pub data: NodeData,
    pub name: Option<&'a Identifier<'a>>,
    pub named_bindings: Option<NamedImportBindings<'a>>,
}

#[derive(Debug, Clone, Copy)]
pub enum NamedImportBindings<'a> {
    Namespace(&'a NamespaceImport<'a>),
    Named(&'a NamedImports<'a>),
}

impl<'a> NamedImportBindings<'a> {
    pub fn node_data(self) -> &'a NodeData {
        match self {
            NamedImportBindings::Namespace(n) => &n.data,
            NamedImportBindings::Named(n) => &n.data,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NamespaceImport<'a> {
    pub data: NodeData,
    pub name: &'a Identifier<'a>,
}

#[derive(Debug, Clone)]
pub struct NamedImports<'a> {
    pub data: NodeData,
    pub elements: NodeArray<'a, &'a ImportSpecifier<'a>>,
}

#[derive(Debug, Clone)]
pub struct ImportSpecifier<'a> {
    pub data: NodeData,
    pub property_name: Option<&'a Identifier<'a>>,
    pub name: &'a Identifier<'a>,
}

#[derive(Debug, Clone)]
pub struct ExportAssignment<'a> {
    pub data: NodeData,
    pub modifiers: Option<NodeArray<'a, Modifier>>,
    /// `export = x` rather than `export default x`.
    pub is_export_equals: bool,
    pub expression: Expression<'a>,
}

#[derive(Debug, Clone)]
pub struct ExportDeclaration<'a> {
    pub data: NodeData,
    pub modifiers: Option<NodeArray<'a, Modifier>>,
    pub export_clause: Option<NamedExportBindings<'a>>,
    pub module_specifier: Option<Expression<'a>>,
}

#[derive(Debug, Clone, Copy)]
pub enum NamedExportBindings<'a> {
    Namespace(&'a NamespaceExport<'a>),
    Named(&'a NamedExports<'a>),
}

impl<'a> NamedExportBindings<'a> {
    pub fn node_data(self) -> &'a NodeData {
        match self {
            NamedExportBindings::Namespace(n) => &n.data,
            NamedExportBindings::Named(n) => &n.data,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NamespaceExport<'a> {
    pub data: NodeData,
    pub name: &'a Identifier<'a>,
}

#[derive(Debug, Clone)]
pub struct NamedExports<'a> {
    pub data: NodeData,
    pub elements: NodeArray<'a, &'a ExportSpecifier<'a>>,
}

#[derive(Debug, Clone)]
pub struct ExportSpecifier<'a> {
    pub data: NodeData,
    pub property_name: Option<&'a Identifier<'a>>,
    pub name: &'a Identifier<'a>,
}

// ============================================================================
// Structured comments
// ============================================================================

#[derive(Debug, Clone)]
pub struct DocComment<'a> {
    pub data: NodeData,
    /// Description text ahead of the first tag.
    pub comment: Option<&'a str>,
    pub tags: NodeArray<'a, &'a DocTag<'a>>,
}

/// A `@tag` inside a structured comment. `data.kind` is `DocTag`,
/// `DocParameterTag`, or `DocReturnTag`.
#[derive(Debug, Clone)]
pub struct DocTag<'a> {
    pub data: NodeData,
    pub tag_name: &'a Identifier<'a>,
    /// The parameter name, for `@param name text` tags.
    pub name: Option<&'a Identifier<'a>>,
    pub comment: Option<&'a str>,
}

// ============================================================================
// Source file
// ============================================================================

/// How a file's extension classifies it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// A `.sa` file.
    Standard,
    /// A `.sax` file with markup syntax enabled.
    Markup,
}

/// Whether `<` in expression position opens markup or a type assertion.
/// Fixed per file, derived from [`FileKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageVariant {
    Standard,
    Markup,
}

impl FileKind {
    pub fn language_variant(self) -> LanguageVariant {
        match self {
            FileKind::Standard => LanguageVariant::Standard,
            FileKind::Markup => LanguageVariant::Markup,
        }
    }

    /// Classify a file path by extension. Unknown extensions parse as
    /// standard files.
    pub fn from_path(path: &str) -> FileKind {
        if path.ends_with(".sax") {
            FileKind::Markup
        } else {
            FileKind::Standard
        }
    }
}

/// The language edition a file is parsed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Edition {
    /// The current language edition.
    #[default]
    Current,
    /// The pre-module legacy edition; top-level `await` is not an
    /// operator here.
    Legacy,
}

/// A `//# key value` directive from the leading trivia of a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub pos: TextPos,
    pub end: TextPos,
    pub name: String,
    pub value: String,
}

/// The root of a parsed file. Owns the source text, the diagnostics,
/// and the per-file identifier interner; the nodes below it live in
/// the arena the parse ran in.
#[derive(Debug)]
pub struct SourceFile<'a> {
    pub data: NodeData,
    pub statements: NodeArray<'a, Statement<'a>>,
    pub end_of_file_token: Token,
    pub file_name: String,
    pub text: String,
    pub file_kind: FileKind,
    pub language_variant: LanguageVariant,
    pub edition: Edition,
    pub diagnostics: Vec<Diagnostic>,
    /// Doc comments collected ahead of declarations, in source order.
    pub doc_comments: Vec<&'a DocComment<'a>>,
    /// Directives from the leading trivia.
    pub directives: Vec<Directive>,
    /// Total nodes created for this tree (reused nodes not recounted).
    pub node_count: usize,
    /// Identifier nodes created for this tree.
    pub identifier_count: usize,
    /// Interner holding every identifier text in the file.
    pub identifiers: StringInterner,
}

impl<'a> SourceFile<'a> {
    #[inline]
    pub fn flags(&self) -> NodeFlags {
        self.data.flags()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_data_cells() {
        let data = NodeData::new(SyntaxKind::Identifier, 3, 8, NodeFlags::NONE);
        assert_eq!(data.pos(), 3);
        assert_eq!(data.end(), 8);
        data.set_pos(5);
        data.set_end(10);
        assert_eq!(data.range(), TextRange::new(5, 10));
        data.add_flags(NodeFlags::THIS_NODE_HAS_ERROR);
        assert!(data.flags().contains(NodeFlags::THIS_NODE_HAS_ERROR));
        data.remove_flags(NodeFlags::THIS_NODE_HAS_ERROR);
        assert!(!data.flags().contains(NodeFlags::THIS_NODE_HAS_ERROR));
    }

    #[test]
    fn test_missing_node() {
        let missing = NodeData::new(SyntaxKind::Identifier, 4, 4, NodeFlags::NONE);
        assert!(missing.is_missing());
        let eof = NodeData::new(SyntaxKind::EndOfFileToken, 4, 4, NodeFlags::NONE);
        assert!(!eof.is_missing());
    }

    #[test]
    fn test_array_span_trailing_separator() {
        let array: NodeArray<'_, u32> = NodeArray::empty(7);
        assert_eq!(array.span.pos(), 7);
        assert_eq!(array.span.end(), 7);
        assert!(!array.span.has_trailing_separator());
        array.span.set_has_trailing_separator(true);
        assert!(array.span.has_trailing_separator());
    }

    #[test]
    fn test_file_kind_from_path() {
        assert_eq!(FileKind::from_path("a.sa"), FileKind::Standard);
        assert_eq!(FileKind::from_path("a.sax"), FileKind::Markup);
        assert_eq!(FileKind::from_path("a.txt"), FileKind::Standard);
    }
}
