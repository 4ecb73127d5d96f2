//! Generic traversal over node headers and array spans.
//!
//! The incremental re-parser needs uniform access to every node
//! boundary in a tree: positions are shifted or clamped, change
//! intersection is marked, and error bits are aggregated, all without
//! caring what kind of node is under the cursor. The walker trait hands
//! out `NodeData` headers and `ArraySpan`s in syntactic order; typed
//! consumers match on the enums in [`crate::node`] directly instead.
//!
//! `enter_node`/`enter_array` decide whether children are visited;
//! `leave_node`/`leave_array` always run, so stack-based walkers stay
//! balanced.

use crate::node::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkControl {
    Descend,
    Skip,
}

pub trait AstWalker<'a> {
    fn enter_node(&mut self, node: &'a NodeData) -> WalkControl;
    fn leave_node(&mut self, _node: &'a NodeData) {}
    fn enter_array(&mut self, span: &'a ArraySpan) -> WalkControl;
    fn leave_array(&mut self, _span: &'a ArraySpan) {}
}

fn walk_array<'a, T, W, F>(w: &mut W, array: &'a NodeArray<'a, T>, f: F)
where
    W: AstWalker<'a> + ?Sized,
    F: Fn(&mut W, &'a T),
{
    if w.enter_array(&array.span) == WalkControl::Descend {
        for element in array.elements {
            f(w, element);
        }
    }
    w.leave_array(&array.span);
}

fn walk_opt_array<'a, T, W, F>(w: &mut W, array: &'a Option<NodeArray<'a, T>>, f: F)
where
    W: AstWalker<'a> + ?Sized,
    F: Fn(&mut W, &'a T),
{
    if let Some(array) = array {
        walk_array(w, array, f);
    }
}

pub fn walk_token<'a, W: AstWalker<'a> + ?Sized>(w: &mut W, token: &'a Token) {
    w.enter_node(&token.data);
    w.leave_node(&token.data);
}

fn walk_opt_token<'a, W: AstWalker<'a> + ?Sized>(w: &mut W, token: &'a Option<Token>) {
    if let Some(token) = token {
        walk_token(w, token);
    }
}

pub fn walk_identifier<'a, W: AstWalker<'a> + ?Sized>(w: &mut W, ident: &'a Identifier<'a>) {
    w.enter_node(&ident.data);
    w.leave_node(&ident.data);
}

fn walk_opt_identifier<'a, W: AstWalker<'a> + ?Sized>(
    w: &mut W,
    ident: &'a Option<&'a Identifier<'a>>,
) {
    if let Some(ident) = ident {
        walk_identifier(w, ident);
    }
}

pub fn walk_entity_name<'a, W: AstWalker<'a> + ?Sized>(w: &mut W, name: EntityName<'a>) {
    match name {
        EntityName::Identifier(n) => walk_identifier(w, n),
        EntityName::Qualified(n) => {
            if w.enter_node(&n.data) == WalkControl::Descend {
                walk_entity_name(w, n.left);
                walk_identifier(w, n.right);
            }
            w.leave_node(&n.data);
        }
    }
}

pub fn walk_property_name<'a, W: AstWalker<'a> + ?Sized>(w: &mut W, name: PropertyName<'a>) {
    match name {
        PropertyName::Identifier(n) => walk_identifier(w, n),
        PropertyName::String(n) => {
            w.enter_node(&n.data);
            w.leave_node(&n.data);
        }
        PropertyName::Numeric(n) => {
            w.enter_node(&n.data);
            w.leave_node(&n.data);
        }
        PropertyName::Computed(n) => {
            if w.enter_node(&n.data) == WalkControl::Descend {
                walk_expression(w, n.expression);
            }
            w.leave_node(&n.data);
        }
    }
}

pub fn walk_member_name<'a, W: AstWalker<'a> + ?Sized>(w: &mut W, name: MemberName<'a>) {
    let data = name.node_data();
    w.enter_node(data);
    w.leave_node(data);
}

pub fn walk_binding_name<'a, W: AstWalker<'a> + ?Sized>(w: &mut W, name: BindingName<'a>) {
    match name {
        BindingName::Identifier(n) => walk_identifier(w, n),
        BindingName::Object(n) => {
            if w.enter_node(&n.data) == WalkControl::Descend {
                walk_array(w, &n.elements, |w, e| walk_binding_element(w, e));
            }
            w.leave_node(&n.data);
        }
        BindingName::Array(n) => {
            if w.enter_node(&n.data) == WalkControl::Descend {
                walk_array(w, &n.elements, |w, e| match *e {
                    ArrayBindingElement::Binding(b) => walk_binding_element(w, b),
                    ArrayBindingElement::Omitted(o) => {
                        w.enter_node(&o.data);
                        w.leave_node(&o.data);
                    }
                });
            }
            w.leave_node(&n.data);
        }
    }
}

pub fn walk_binding_element<'a, W: AstWalker<'a> + ?Sized>(w: &mut W, n: &'a BindingElement<'a>) {
    if w.enter_node(&n.data) == WalkControl::Descend {
        walk_opt_token(w, &n.dot_dot_dot_token);
        if let Some(name) = n.property_name {
            walk_property_name(w, name);
        }
        walk_binding_name(w, n.name);
        walk_opt_expression(w, &n.initializer);
    }
    w.leave_node(&n.data);
}

pub fn walk_decorator<'a, W: AstWalker<'a> + ?Sized>(w: &mut W, n: &'a Decorator<'a>) {
    if w.enter_node(&n.data) == WalkControl::Descend {
        walk_expression(w, n.expression);
    }
    w.leave_node(&n.data);
}

fn walk_decorators<'a, W: AstWalker<'a> + ?Sized>(
    w: &mut W,
    decorators: &'a Option<NodeArray<'a, &'a Decorator<'a>>>,
) {
    walk_opt_array(w, decorators, |w, d| walk_decorator(w, d));
}

fn walk_modifiers<'a, W: AstWalker<'a> + ?Sized>(
    w: &mut W,
    modifiers: &'a Option<NodeArray<'a, Modifier>>,
) {
    walk_opt_array(w, modifiers, |w, m| walk_token(w, m));
}

pub fn walk_type_parameter<'a, W: AstWalker<'a> + ?Sized>(
    w: &mut W,
    n: &'a TypeParameterDeclaration<'a>,
) {
    if w.enter_node(&n.data) == WalkControl::Descend {
        walk_identifier(w, n.name);
        walk_opt_type(w, &n.constraint);
        walk_opt_type(w, &n.default);
    }
    w.leave_node(&n.data);
}

fn walk_type_parameters<'a, W: AstWalker<'a> + ?Sized>(
    w: &mut W,
    params: &'a Option<NodeArray<'a, &'a TypeParameterDeclaration<'a>>>,
) {
    walk_opt_array(w, params, |w, p| walk_type_parameter(w, p));
}

pub fn walk_parameter<'a, W: AstWalker<'a> + ?Sized>(w: &mut W, n: &'a ParameterDeclaration<'a>) {
    if w.enter_node(&n.data) == WalkControl::Descend {
        walk_decorators(w, &n.decorators);
        walk_modifiers(w, &n.modifiers);
        walk_opt_token(w, &n.dot_dot_dot_token);
        walk_binding_name(w, n.name);
        walk_opt_token(w, &n.question_token);
        walk_opt_type(w, &n.type_annotation);
        walk_opt_expression(w, &n.initializer);
    }
    w.leave_node(&n.data);
}

fn walk_parameters<'a, W: AstWalker<'a> + ?Sized>(
    w: &mut W,
    params: &'a NodeArray<'a, &'a ParameterDeclaration<'a>>,
) {
    walk_array(w, params, |w, p| walk_parameter(w, p));
}

// ============================================================================
// Types
// ============================================================================

pub fn walk_type<'a, W: AstWalker<'a> + ?Sized>(w: &mut W, ty: TypeNode<'a>) {
    match ty {
        TypeNode::Keyword(n) => walk_token(w, n),
        TypeNode::TypeReference(n) => {
            if w.enter_node(&n.data) == WalkControl::Descend {
                walk_entity_name(w, n.type_name);
                walk_opt_array(w, &n.type_arguments, |w, t| walk_type(w, *t));
            }
            w.leave_node(&n.data);
        }
        TypeNode::Function(n) => {
            if w.enter_node(&n.data) == WalkControl::Descend {
                walk_type_parameters(w, &n.type_parameters);
                walk_parameters(w, &n.parameters);
                walk_type(w, n.return_type);
            }
            w.leave_node(&n.data);
        }
        TypeNode::Constructor(n) => {
            if w.enter_node(&n.data) == WalkControl::Descend {
                walk_type_parameters(w, &n.type_parameters);
                walk_parameters(w, &n.parameters);
                walk_type(w, n.return_type);
            }
            w.leave_node(&n.data);
        }
        TypeNode::TypeQuery(n) => {
            if w.enter_node(&n.data) == WalkControl::Descend {
                walk_entity_name(w, n.expr_name);
            }
            w.leave_node(&n.data);
        }
        TypeNode::TypeLiteral(n) => {
            if w.enter_node(&n.data) == WalkControl::Descend {
                walk_array(w, &n.members, |w, m| walk_type_element(w, *m));
            }
            w.leave_node(&n.data);
        }
        TypeNode::Array(n) => {
            if w.enter_node(&n.data) == WalkControl::Descend {
                walk_type(w, n.element_type);
            }
            w.leave_node(&n.data);
        }
        TypeNode::Tuple(n) => {
            if w.enter_node(&n.data) == WalkControl::Descend {
                walk_array(w, &n.elements, |w, t| walk_type(w, *t));
            }
            w.leave_node(&n.data);
        }
        TypeNode::Optional(n) => {
            if w.enter_node(&n.data) == WalkControl::Descend {
                walk_type(w, n.type_node);
            }
            w.leave_node(&n.data);
        }
        TypeNode::Rest(n) => {
            if w.enter_node(&n.data) == WalkControl::Descend {
                walk_type(w, n.type_node);
            }
            w.leave_node(&n.data);
        }
        TypeNode::Union(n) => {
            if w.enter_node(&n.data) == WalkControl::Descend {
                walk_array(w, &n.types, |w, t| walk_type(w, *t));
            }
            w.leave_node(&n.data);
        }
        TypeNode::Intersection(n) => {
            if w.enter_node(&n.data) == WalkControl::Descend {
                walk_array(w, &n.types, |w, t| walk_type(w, *t));
            }
            w.leave_node(&n.data);
        }
        TypeNode::Parenthesized(n) => {
            if w.enter_node(&n.data) == WalkControl::Descend {
                walk_type(w, n.type_node);
            }
            w.leave_node(&n.data);
        }
        TypeNode::Operator(n) => {
            if w.enter_node(&n.data) == WalkControl::Descend {
                walk_type(w, n.type_node);
            }
            w.leave_node(&n.data);
        }
        TypeNode::IndexedAccess(n) => {
            if w.enter_node(&n.data) == WalkControl::Descend {
                walk_type(w, n.object_type);
                walk_type(w, n.index_type);
            }
            w.leave_node(&n.data);
        }
        TypeNode::Literal(n) => {
            if w.enter_node(&n.data) == WalkControl::Descend {
                walk_expression(w, n.literal);
            }
            w.leave_node(&n.data);
        }
    }
}

fn walk_opt_type<'a, W: AstWalker<'a> + ?Sized>(w: &mut W, ty: &'a Option<TypeNode<'a>>) {
    if let Some(ty) = ty {
        walk_type(w, *ty);
    }
}

pub fn walk_type_element<'a, W: AstWalker<'a> + ?Sized>(w: &mut W, member: TypeElement<'a>) {
    match member {
        TypeElement::PropertySignature(n) => {
            if w.enter_node(&n.data) == WalkControl::Descend {
                walk_modifiers(w, &n.modifiers);
                walk_property_name(w, n.name);
                walk_opt_token(w, &n.question_token);
                walk_opt_type(w, &n.type_annotation);
            }
            w.leave_node(&n.data);
        }
        TypeElement::MethodSignature(n) => {
            if w.enter_node(&n.data) == WalkControl::Descend {
                walk_modifiers(w, &n.modifiers);
                walk_property_name(w, n.name);
                walk_opt_token(w, &n.question_token);
                walk_type_parameters(w, &n.type_parameters);
                walk_parameters(w, &n.parameters);
                walk_opt_type(w, &n.return_type);
            }
            w.leave_node(&n.data);
        }
        TypeElement::CallSignature(n) => {
            if w.enter_node(&n.data) == WalkControl::Descend {
                walk_type_parameters(w, &n.type_parameters);
                walk_parameters(w, &n.parameters);
                walk_opt_type(w, &n.return_type);
            }
            w.leave_node(&n.data);
        }
        TypeElement::ConstructSignature(n) => {
            if w.enter_node(&n.data) == WalkControl::Descend {
                walk_type_parameters(w, &n.type_parameters);
                walk_parameters(w, &n.parameters);
                walk_opt_type(w, &n.return_type);
            }
            w.leave_node(&n.data);
        }
        TypeElement::IndexSignature(n) => {
            if w.enter_node(&n.data) == WalkControl::Descend {
                walk_modifiers(w, &n.modifiers);
                walk_parameters(w, &n.parameters);
                walk_opt_type(w, &n.type_annotation);
            }
            w.leave_node(&n.data);
        }
    }
}

// ============================================================================
// Expressions
// ============================================================================

pub fn walk_expression<'a, W: AstWalker<'a> + ?Sized>(w: &mut W, expr: Expression<'a>) {
    match expr {
        Expression::Identifier(n) => walk_identifier(w, n),
        Expression::This(n)
        | Expression::Super(n)
        | Expression::Null(n)
        | Expression::True(n)
        | Expression::False(n) => walk_token(w, n),
        Expression::Numeric(n) => {
            w.enter_node(&n.data);
            w.leave_node(&n.data);
        }
        Expression::BigInt(n) => {
            w.enter_node(&n.data);
            w.leave_node(&n.data);
        }
        Expression::String(n) => {
            w.enter_node(&n.data);
            w.leave_node(&n.data);
        }
        Expression::Regex(n) => {
            w.enter_node(&n.data);
            w.leave_node(&n.data);
        }
        Expression::NoSubstitutionTemplate(n) => {
            w.enter_node(&n.data);
            w.leave_node(&n.data);
        }
        Expression::Template(n) => {
            if w.enter_node(&n.data) == WalkControl::Descend {
                w.enter_node(&n.head.data);
                w.leave_node(&n.head.data);
                walk_array(w, &n.template_spans, |w, s| {
                    if w.enter_node(&s.data) == WalkControl::Descend {
                        walk_expression(w, s.expression);
                        w.enter_node(&s.literal.data);
                        w.leave_node(&s.literal.data);
                    }
                    w.leave_node(&s.data);
                });
            }
            w.leave_node(&n.data);
        }
        Expression::ArrayLiteral(n) => {
            if w.enter_node(&n.data) == WalkControl::Descend {
                walk_array(w, &n.elements, |w, e| walk_expression(w, *e));
            }
            w.leave_node(&n.data);
        }
        Expression::ObjectLiteral(n) => {
            if w.enter_node(&n.data) == WalkControl::Descend {
                walk_array(w, &n.properties, |w, p| walk_object_literal_element(w, *p));
            }
            w.leave_node(&n.data);
        }
        Expression::PropertyAccess(n) => {
            if w.enter_node(&n.data) == WalkControl::Descend {
                walk_expression(w, n.expression);
                walk_opt_token(w, &n.question_dot_token);
                walk_member_name(w, n.name);
            }
            w.leave_node(&n.data);
        }
        Expression::ElementAccess(n) => {
            if w.enter_node(&n.data) == WalkControl::Descend {
                walk_expression(w, n.expression);
                walk_opt_token(w, &n.question_dot_token);
                walk_expression(w, n.argument_expression);
            }
            w.leave_node(&n.data);
        }
        Expression::Call(n) => {
            if w.enter_node(&n.data) == WalkControl::Descend {
                walk_expression(w, n.expression);
                walk_opt_token(w, &n.question_dot_token);
                walk_opt_array(w, &n.type_arguments, |w, t| walk_type(w, *t));
                walk_array(w, &n.arguments, |w, a| walk_expression(w, *a));
            }
            w.leave_node(&n.data);
        }
        Expression::New(n) => {
            if w.enter_node(&n.data) == WalkControl::Descend {
                walk_expression(w, n.expression);
                walk_opt_array(w, &n.type_arguments, |w, t| walk_type(w, *t));
                if let Some(args) = &n.arguments {
                    walk_array(w, args, |w, a| walk_expression(w, *a));
                }
            }
            w.leave_node(&n.data);
        }
        Expression::TaggedTemplate(n) => {
            if w.enter_node(&n.data) == WalkControl::Descend {
                walk_expression(w, n.tag);
                walk_opt_array(w, &n.type_arguments, |w, t| walk_type(w, *t));
                match n.template {
                    TemplateLiteral::NoSubstitution(lit) => {
                        w.enter_node(&lit.data);
                        w.leave_node(&lit.data);
                    }
                    TemplateLiteral::Template(t) => walk_expression(w, Expression::Template(t)),
                }
            }
            w.leave_node(&n.data);
        }
        Expression::TypeAssertion(n) => {
            if w.enter_node(&n.data) == WalkControl::Descend {
                walk_type(w, n.type_node);
                walk_expression(w, n.expression);
            }
            w.leave_node(&n.data);
        }
        Expression::Parenthesized(n) => {
            if w.enter_node(&n.data) == WalkControl::Descend {
                walk_expression(w, n.expression);
            }
            w.leave_node(&n.data);
        }
        Expression::Function(n) => {
            if w.enter_node(&n.data) == WalkControl::Descend {
                walk_modifiers(w, &n.modifiers);
                walk_opt_token(w, &n.asterisk_token);
                walk_opt_identifier(w, &n.name);
                walk_type_parameters(w, &n.type_parameters);
                walk_parameters(w, &n.parameters);
                walk_opt_type(w, &n.return_type);
                walk_block(w, n.body);
            }
            w.leave_node(&n.data);
        }
        Expression::Arrow(n) => {
            if w.enter_node(&n.data) == WalkControl::Descend {
                walk_modifiers(w, &n.modifiers);
                walk_type_parameters(w, &n.type_parameters);
                walk_parameters(w, &n.parameters);
                walk_opt_type(w, &n.return_type);
                walk_token(w, &n.equals_greater_than_token);
                match n.body {
                    ArrowBody::Block(b) => walk_block(w, b),
                    ArrowBody::Expression(e) => walk_expression(w, e),
                }
            }
            w.leave_node(&n.data);
        }
        Expression::Delete(n) => {
            if w.enter_node(&n.data) == WalkControl::Descend {
                walk_expression(w, n.expression);
            }
            w.leave_node(&n.data);
        }
        Expression::TypeOf(n) => {
            if w.enter_node(&n.data) == WalkControl::Descend {
                walk_expression(w, n.expression);
            }
            w.leave_node(&n.data);
        }
        Expression::Void(n) => {
            if w.enter_node(&n.data) == WalkControl::Descend {
                walk_expression(w, n.expression);
            }
            w.leave_node(&n.data);
        }
        Expression::Await(n) => {
            if w.enter_node(&n.data) == WalkControl::Descend {
                walk_expression(w, n.expression);
            }
            w.leave_node(&n.data);
        }
        Expression::PrefixUnary(n) => {
            if w.enter_node(&n.data) == WalkControl::Descend {
                walk_expression(w, n.operand);
            }
            w.leave_node(&n.data);
        }
        Expression::PostfixUnary(n) => {
            if w.enter_node(&n.data) == WalkControl::Descend {
                walk_expression(w, n.operand);
            }
            w.leave_node(&n.data);
        }
        Expression::Binary(n) => {
            if w.enter_node(&n.data) == WalkControl::Descend {
                walk_expression(w, n.left);
                walk_token(w, &n.operator_token);
                walk_expression(w, n.right);
            }
            w.leave_node(&n.data);
        }
        Expression::Conditional(n) => {
            if w.enter_node(&n.data) == WalkControl::Descend {
                walk_expression(w, n.condition);
                walk_token(w, &n.question_token);
                walk_expression(w, n.when_true);
                walk_token(w, &n.colon_token);
                walk_expression(w, n.when_false);
            }
            w.leave_node(&n.data);
        }
        Expression::Yield(n) => {
            if w.enter_node(&n.data) == WalkControl::Descend {
                walk_opt_token(w, &n.asterisk_token);
                walk_opt_expression(w, &n.expression);
            }
            w.leave_node(&n.data);
        }
        Expression::Spread(n) => {
            if w.enter_node(&n.data) == WalkControl::Descend {
                walk_expression(w, n.expression);
            }
            w.leave_node(&n.data);
        }
        Expression::Class(n) => {
            if w.enter_node(&n.data) == WalkControl::Descend {
                walk_decorators(w, &n.decorators);
                walk_modifiers(w, &n.modifiers);
                walk_opt_identifier(w, &n.name);
                walk_type_parameters(w, &n.type_parameters);
                walk_heritage_clauses(w, &n.heritage_clauses);
                walk_array(w, &n.members, |w, m| walk_class_element(w, *m));
            }
            w.leave_node(&n.data);
        }
        Expression::Omitted(n) => {
            w.enter_node(&n.data);
            w.leave_node(&n.data);
        }
        Expression::As(n) => {
            if w.enter_node(&n.data) == WalkControl::Descend {
                walk_expression(w, n.expression);
                walk_type(w, n.type_node);
            }
            w.leave_node(&n.data);
        }
        Expression::Satisfies(n) => {
            if w.enter_node(&n.data) == WalkControl::Descend {
                walk_expression(w, n.expression);
                walk_type(w, n.type_node);
            }
            w.leave_node(&n.data);
        }
        Expression::NonNull(n) => {
            if w.enter_node(&n.data) == WalkControl::Descend {
                walk_expression(w, n.expression);
            }
            w.leave_node(&n.data);
        }
        Expression::MarkupElement(n) => walk_markup_element(w, n),
        Expression::MarkupSelfClosing(n) => walk_markup_self_closing(w, n),
        Expression::MarkupFragment(n) => walk_markup_fragment(w, n),
    }
}

fn walk_opt_expression<'a, W: AstWalker<'a> + ?Sized>(
    w: &mut W,
    expr: &'a Option<Expression<'a>>,
) {
    if let Some(expr) = expr {
        walk_expression(w, *expr);
    }
}

pub fn walk_object_literal_element<'a, W: AstWalker<'a> + ?Sized>(
    w: &mut W,
    element: ObjectLiteralElement<'a>,
) {
    match element {
        ObjectLiteralElement::Property(n) => {
            if w.enter_node(&n.data) == WalkControl::Descend {
                walk_property_name(w, n.name);
                walk_expression(w, n.initializer);
            }
            w.leave_node(&n.data);
        }
        ObjectLiteralElement::Shorthand(n) => {
            if w.enter_node(&n.data) == WalkControl::Descend {
                walk_identifier(w, n.name);
                walk_opt_expression(w, &n.object_assignment_initializer);
            }
            w.leave_node(&n.data);
        }
        ObjectLiteralElement::Spread(n) => {
            if w.enter_node(&n.data) == WalkControl::Descend {
                walk_expression(w, n.expression);
            }
            w.leave_node(&n.data);
        }
        ObjectLiteralElement::Method(n) => walk_class_element(w, ClassElement::Method(n)),
        ObjectLiteralElement::GetAccessor(n) => walk_class_element(w, ClassElement::GetAccessor(n)),
        ObjectLiteralElement::SetAccessor(n) => walk_class_element(w, ClassElement::SetAccessor(n)),
    }
}

// ============================================================================
// Markup
// ============================================================================

pub fn walk_markup_element<'a, W: AstWalker<'a> + ?Sized>(w: &mut W, n: &'a MarkupElement<'a>) {
    if w.enter_node(&n.data) == WalkControl::Descend {
        walk_markup_opening(w, n.opening_element);
        walk_array(w, &n.children, |w, c| walk_markup_child(w, *c));
        if w.enter_node(&n.closing_element.data) == WalkControl::Descend {
            walk_entity_name(w, n.closing_element.tag_name);
        }
        w.leave_node(&n.closing_element.data);
    }
    w.leave_node(&n.data);
}

fn walk_markup_opening<'a, W: AstWalker<'a> + ?Sized>(w: &mut W, n: &'a MarkupOpeningElement<'a>) {
    if w.enter_node(&n.data) == WalkControl::Descend {
        walk_entity_name(w, n.tag_name);
        walk_markup_attributes(w, n.attributes);
    }
    w.leave_node(&n.data);
}

pub fn walk_markup_self_closing<'a, W: AstWalker<'a> + ?Sized>(
    w: &mut W,
    n: &'a MarkupSelfClosingElement<'a>,
) {
    if w.enter_node(&n.data) == WalkControl::Descend {
        walk_entity_name(w, n.tag_name);
        walk_markup_attributes(w, n.attributes);
    }
    w.leave_node(&n.data);
}

pub fn walk_markup_fragment<'a, W: AstWalker<'a> + ?Sized>(w: &mut W, n: &'a MarkupFragment<'a>) {
    if w.enter_node(&n.data) == WalkControl::Descend {
        w.enter_node(&n.opening_fragment.data);
        w.leave_node(&n.opening_fragment.data);
        walk_array(w, &n.children, |w, c| walk_markup_child(w, *c));
        w.enter_node(&n.closing_fragment.data);
        w.leave_node(&n.closing_fragment.data);
    }
    w.leave_node(&n.data);
}

fn walk_markup_attributes<'a, W: AstWalker<'a> + ?Sized>(w: &mut W, n: &'a MarkupAttributes<'a>) {
    if w.enter_node(&n.data) == WalkControl::Descend {
        walk_array(w, &n.properties, |w, a| match *a {
            MarkupAttributeLike::Attribute(attr) => {
                if w.enter_node(&attr.data) == WalkControl::Descend {
                    walk_identifier(w, attr.name);
                    if let Some(value) = attr.initializer {
                        match value {
                            MarkupAttributeValue::String(s) => {
                                w.enter_node(&s.data);
                                w.leave_node(&s.data);
                            }
                            MarkupAttributeValue::Expression(e) => walk_markup_expression(w, e),
                        }
                    }
                }
                w.leave_node(&attr.data);
            }
            MarkupAttributeLike::Spread(spread) => {
                if w.enter_node(&spread.data) == WalkControl::Descend {
                    walk_expression(w, spread.expression);
                }
                w.leave_node(&spread.data);
            }
        });
    }
    w.leave_node(&n.data);
}

fn walk_markup_expression<'a, W: AstWalker<'a> + ?Sized>(w: &mut W, n: &'a MarkupExpression<'a>) {
    if w.enter_node(&n.data) == WalkControl::Descend {
        walk_opt_token(w, &n.dot_dot_dot_token);
        walk_opt_expression(w, &n.expression);
    }
    w.leave_node(&n.data);
}

pub fn walk_markup_child<'a, W: AstWalker<'a> + ?Sized>(w: &mut W, child: MarkupChild<'a>) {
    match child {
        MarkupChild::Text(n) => {
            w.enter_node(&n.data);
            w.leave_node(&n.data);
        }
        MarkupChild::Element(n) => walk_markup_element(w, n),
        MarkupChild::SelfClosing(n) => walk_markup_self_closing(w, n),
        MarkupChild::Fragment(n) => walk_markup_fragment(w, n),
        MarkupChild::Expression(n) => walk_markup_expression(w, n),
    }
}

// ============================================================================
// Statements and declarations
// ============================================================================

pub fn walk_block<'a, W: AstWalker<'a> + ?Sized>(w: &mut W, n: &'a Block<'a>) {
    if w.enter_node(&n.data) == WalkControl::Descend {
        walk_array(w, &n.statements, |w, s| walk_statement(w, *s));
    }
    w.leave_node(&n.data);
}

fn walk_opt_block<'a, W: AstWalker<'a> + ?Sized>(w: &mut W, block: &'a Option<&'a Block<'a>>) {
    if let Some(block) = block {
        walk_block(w, block);
    }
}

pub fn walk_variable_declaration<'a, W: AstWalker<'a> + ?Sized>(
    w: &mut W,
    n: &'a VariableDeclaration<'a>,
) {
    if w.enter_node(&n.data) == WalkControl::Descend {
        walk_binding_name(w, n.name);
        walk_opt_token(w, &n.exclamation_token);
        walk_opt_type(w, &n.type_annotation);
        walk_opt_expression(w, &n.initializer);
    }
    w.leave_node(&n.data);
}

pub fn walk_variable_declaration_list<'a, W: AstWalker<'a> + ?Sized>(
    w: &mut W,
    n: &'a VariableDeclarationList<'a>,
) {
    if w.enter_node(&n.data) == WalkControl::Descend {
        walk_array(w, &n.declarations, |w, d| walk_variable_declaration(w, d));
    }
    w.leave_node(&n.data);
}

fn walk_for_initializer<'a, W: AstWalker<'a> + ?Sized>(w: &mut W, init: ForInitializer<'a>) {
    match init {
        ForInitializer::VariableDeclarationList(n) => walk_variable_declaration_list(w, n),
        ForInitializer::Expression(e) => walk_expression(w, e),
    }
}

fn walk_heritage_clauses<'a, W: AstWalker<'a> + ?Sized>(
    w: &mut W,
    clauses: &'a Option<NodeArray<'a, &'a HeritageClause<'a>>>,
) {
    walk_opt_array(w, clauses, |w, clause| {
        if w.enter_node(&clause.data) == WalkControl::Descend {
            walk_array(w, &clause.types, |w, t| {
                if w.enter_node(&t.data) == WalkControl::Descend {
                    walk_expression(w, t.expression);
                    walk_opt_array(w, &t.type_arguments, |w, ta| walk_type(w, *ta));
                }
                w.leave_node(&t.data);
            });
        }
        w.leave_node(&clause.data);
    });
}

pub fn walk_class_element<'a, W: AstWalker<'a> + ?Sized>(w: &mut W, member: ClassElement<'a>) {
    match member {
        ClassElement::Constructor(n) => {
            if w.enter_node(&n.data) == WalkControl::Descend {
                walk_modifiers(w, &n.modifiers);
                walk_parameters(w, &n.parameters);
                walk_opt_block(w, &n.body);
            }
            w.leave_node(&n.data);
        }
        ClassElement::Method(n) => {
            if w.enter_node(&n.data) == WalkControl::Descend {
                walk_decorators(w, &n.decorators);
                walk_modifiers(w, &n.modifiers);
                walk_opt_token(w, &n.asterisk_token);
                walk_property_name(w, n.name);
                walk_opt_token(w, &n.question_token);
                walk_type_parameters(w, &n.type_parameters);
                walk_parameters(w, &n.parameters);
                walk_opt_type(w, &n.return_type);
                walk_opt_block(w, &n.body);
            }
            w.leave_node(&n.data);
        }
        ClassElement::Property(n) => {
            if w.enter_node(&n.data) == WalkControl::Descend {
                walk_decorators(w, &n.decorators);
                walk_modifiers(w, &n.modifiers);
                walk_property_name(w, n.name);
                walk_opt_token(w, &n.question_token);
                walk_opt_token(w, &n.exclamation_token);
                walk_opt_type(w, &n.type_annotation);
                walk_opt_expression(w, &n.initializer);
            }
            w.leave_node(&n.data);
        }
        ClassElement::GetAccessor(n) => {
            if w.enter_node(&n.data) == WalkControl::Descend {
                walk_decorators(w, &n.decorators);
                walk_modifiers(w, &n.modifiers);
                walk_property_name(w, n.name);
                walk_parameters(w, &n.parameters);
                walk_opt_type(w, &n.return_type);
                walk_opt_block(w, &n.body);
            }
            w.leave_node(&n.data);
        }
        ClassElement::SetAccessor(n) => {
            if w.enter_node(&n.data) == WalkControl::Descend {
                walk_decorators(w, &n.decorators);
                walk_modifiers(w, &n.modifiers);
                walk_property_name(w, n.name);
                walk_parameters(w, &n.parameters);
                walk_opt_block(w, &n.body);
            }
            w.leave_node(&n.data);
        }
        ClassElement::IndexSignature(n) => {
            walk_type_element(w, TypeElement::IndexSignature(n));
        }
        ClassElement::Semicolon(n) => {
            w.enter_node(&n.data);
            w.leave_node(&n.data);
        }
    }
}

pub fn walk_case_or_default_clause<'a, W: AstWalker<'a> + ?Sized>(
    w: &mut W,
    clause: CaseOrDefaultClause<'a>,
) {
    match clause {
        CaseOrDefaultClause::Case(n) => {
            if w.enter_node(&n.data) == WalkControl::Descend {
                walk_expression(w, n.expression);
                walk_array(w, &n.statements, |w, s| walk_statement(w, *s));
            }
            w.leave_node(&n.data);
        }
        CaseOrDefaultClause::Default(n) => {
            if w.enter_node(&n.data) == WalkControl::Descend {
                walk_array(w, &n.statements, |w, s| walk_statement(w, *s));
            }
            w.leave_node(&n.data);
        }
    }
}

pub fn walk_enum_member<'a, W: AstWalker<'a> + ?Sized>(w: &mut W, n: &'a EnumMember<'a>) {
    if w.enter_node(&n.data) == WalkControl::Descend {
        walk_property_name(w, n.name);
        walk_opt_expression(w, &n.initializer);
    }
    w.leave_node(&n.data);
}

pub fn walk_statement<'a, W: AstWalker<'a> + ?Sized>(w: &mut W, stmt: Statement<'a>) {
    match stmt {
        Statement::Block(n) => walk_block(w, n),
        Statement::Empty(n) => {
            w.enter_node(&n.data);
            w.leave_node(&n.data);
        }
        Statement::Variable(n) => {
            if w.enter_node(&n.data) == WalkControl::Descend {
                walk_modifiers(w, &n.modifiers);
                walk_variable_declaration_list(w, n.declaration_list);
            }
            w.leave_node(&n.data);
        }
        Statement::Expression(n) => {
            if w.enter_node(&n.data) == WalkControl::Descend {
                walk_expression(w, n.expression);
            }
            w.leave_node(&n.data);
        }
        Statement::If(n) => {
            if w.enter_node(&n.data) == WalkControl::Descend {
                walk_expression(w, n.expression);
                walk_statement(w, n.then_statement);
                if let Some(else_statement) = n.else_statement {
                    walk_statement(w, else_statement);
                }
            }
            w.leave_node(&n.data);
        }
        Statement::Do(n) => {
            if w.enter_node(&n.data) == WalkControl::Descend {
                walk_statement(w, n.statement);
                walk_expression(w, n.expression);
            }
            w.leave_node(&n.data);
        }
        Statement::While(n) => {
            if w.enter_node(&n.data) == WalkControl::Descend {
                walk_expression(w, n.expression);
                walk_statement(w, n.statement);
            }
            w.leave_node(&n.data);
        }
        Statement::For(n) => {
            if w.enter_node(&n.data) == WalkControl::Descend {
                if let Some(init) = n.initializer {
                    walk_for_initializer(w, init);
                }
                walk_opt_expression(w, &n.condition);
                walk_opt_expression(w, &n.incrementor);
                walk_statement(w, n.statement);
            }
            w.leave_node(&n.data);
        }
        Statement::ForIn(n) => {
            if w.enter_node(&n.data) == WalkControl::Descend {
                walk_for_initializer(w, n.initializer);
                walk_expression(w, n.expression);
                walk_statement(w, n.statement);
            }
            w.leave_node(&n.data);
        }
        Statement::ForOf(n) => {
            if w.enter_node(&n.data) == WalkControl::Descend {
                walk_opt_token(w, &n.await_modifier);
                walk_for_initializer(w, n.initializer);
                walk_expression(w, n.expression);
                walk_statement(w, n.statement);
            }
            w.leave_node(&n.data);
        }
        Statement::Continue(n) => {
            if w.enter_node(&n.data) == WalkControl::Descend {
                walk_opt_identifier(w, &n.label);
            }
            w.leave_node(&n.data);
        }
        Statement::Break(n) => {
            if w.enter_node(&n.data) == WalkControl::Descend {
                walk_opt_identifier(w, &n.label);
            }
            w.leave_node(&n.data);
        }
        Statement::Return(n) => {
            if w.enter_node(&n.data) == WalkControl::Descend {
                walk_opt_expression(w, &n.expression);
            }
            w.leave_node(&n.data);
        }
        Statement::With(n) => {
            if w.enter_node(&n.data) == WalkControl::Descend {
                walk_expression(w, n.expression);
                walk_statement(w, n.statement);
            }
            w.leave_node(&n.data);
        }
        Statement::Switch(n) => {
            if w.enter_node(&n.data) == WalkControl::Descend {
                walk_expression(w, n.expression);
                if w.enter_node(&n.case_block.data) == WalkControl::Descend {
                    walk_array(w, &n.case_block.clauses, |w, c| {
                        walk_case_or_default_clause(w, *c)
                    });
                }
                w.leave_node(&n.case_block.data);
            }
            w.leave_node(&n.data);
        }
        Statement::Labeled(n) => {
            if w.enter_node(&n.data) == WalkControl::Descend {
                walk_identifier(w, n.label);
                walk_statement(w, n.statement);
            }
            w.leave_node(&n.data);
        }
        Statement::Throw(n) => {
            if w.enter_node(&n.data) == WalkControl::Descend {
                walk_expression(w, n.expression);
            }
            w.leave_node(&n.data);
        }
        Statement::Try(n) => {
            if w.enter_node(&n.data) == WalkControl::Descend {
                walk_block(w, n.try_block);
                if let Some(catch) = n.catch_clause {
                    if w.enter_node(&catch.data) == WalkControl::Descend {
                        if let Some(decl) = catch.variable_declaration {
                            walk_variable_declaration(w, decl);
                        }
                        walk_block(w, catch.block);
                    }
                    w.leave_node(&catch.data);
                }
                walk_opt_block(w, &n.finally_block);
            }
            w.leave_node(&n.data);
        }
        Statement::Debugger(n) => {
            w.enter_node(&n.data);
            w.leave_node(&n.data);
        }
        Statement::Function(n) => {
            if w.enter_node(&n.data) == WalkControl::Descend {
                walk_modifiers(w, &n.modifiers);
                walk_opt_token(w, &n.asterisk_token);
                walk_opt_identifier(w, &n.name);
                walk_type_parameters(w, &n.type_parameters);
                walk_parameters(w, &n.parameters);
                walk_opt_type(w, &n.return_type);
                walk_opt_block(w, &n.body);
            }
            w.leave_node(&n.data);
        }
        Statement::Class(n) => {
            if w.enter_node(&n.data) == WalkControl::Descend {
                walk_decorators(w, &n.decorators);
                walk_modifiers(w, &n.modifiers);
                walk_opt_identifier(w, &n.name);
                walk_type_parameters(w, &n.type_parameters);
                walk_heritage_clauses(w, &n.heritage_clauses);
                walk_array(w, &n.members, |w, m| walk_class_element(w, *m));
            }
            w.leave_node(&n.data);
        }
        Statement::Interface(n) => {
            if w.enter_node(&n.data) == WalkControl::Descend {
                walk_modifiers(w, &n.modifiers);
                walk_identifier(w, n.name);
                walk_type_parameters(w, &n.type_parameters);
                walk_heritage_clauses(w, &n.heritage_clauses);
                walk_array(w, &n.members, |w, m| walk_type_element(w, *m));
            }
            w.leave_node(&n.data);
        }
        Statement::TypeAlias(n) => {
            if w.enter_node(&n.data) == WalkControl::Descend {
                walk_modifiers(w, &n.modifiers);
                walk_identifier(w, n.name);
                walk_type_parameters(w, &n.type_parameters);
                walk_type(w, n.type_node);
            }
            w.leave_node(&n.data);
        }
        Statement::Enum(n) => {
            if w.enter_node(&n.data) == WalkControl::Descend {
                walk_modifiers(w, &n.modifiers);
                walk_identifier(w, n.name);
                walk_array(w, &n.members, |w, m| walk_enum_member(w, m));
            }
            w.leave_node(&n.data);
        }
        Statement::Module(n) => {
            if w.enter_node(&n.data) == WalkControl::Descend {
                walk_modifiers(w, &n.modifiers);
                match n.name {
                    ModuleName::Identifier(i) => walk_identifier(w, i),
                    ModuleName::String(s) => {
                        w.enter_node(&s.data);
                        w.leave_node(&s.data);
                    }
                }
                if let Some(body) = n.body {
                    match body {
                        ModuleBody::Block(b) => {
                            if w.enter_node(&b.data) == WalkControl::Descend {
                                walk_array(w, &b.statements, |w, s| walk_statement(w, *s));
                            }
                            w.leave_node(&b.data);
                        }
                        ModuleBody::Namespace(m) => walk_statement(w, Statement::Module(m)),
                    }
                }
            }
            w.leave_node(&n.data);
        }
        Statement::ImportEquals(n) => {
            if w.enter_node(&n.data) == WalkControl::Descend {
                walk_modifiers(w, &n.modifiers);
                walk_identifier(w, n.name);
                match n.module_reference {
                    ModuleReference::Entity(e) => walk_entity_name(w, e),
                    ModuleReference::External(ext) => {
                        if w.enter_node(&ext.data) == WalkControl::Descend {
                            walk_expression(w, ext.expression);
                        }
                        w.leave_node(&ext.data);
                    }
                }
            }
            w.leave_node(&n.data);
        }
        Statement::Import(n) => {
            if w.enter_node(&n.data) == WalkControl::Descend {
                walk_modifiers(w, &n.modifiers);
                if let Some(clause) = n.import_clause {
                    if w.enter_node(&clause.data) == WalkControl::Descend {
                        walk_opt_identifier(w, &clause.name);
                        if let Some(bindings) = clause.named_bindings {
                            match bindings {
                                NamedImportBindings::Namespace(ns) => {
                                    if w.enter_node(&ns.data) == WalkControl::Descend {
                                        walk_identifier(w, ns.name);
                                    }
                                    w.leave_node(&ns.data);
                                }
                                NamedImportBindings::Named(named) => {
                                    if w.enter_node(&named.data) == WalkControl::Descend {
                                        walk_array(w, &named.elements, |w, spec| {
                                            if w.enter_node(&spec.data) == WalkControl::Descend {
                                                walk_opt_identifier(w, &spec.property_name);
                                                walk_identifier(w, spec.name);
                                            }
                                            w.leave_node(&spec.data);
                                        });
                                    }
                                    w.leave_node(&named.data);
                                }
                            }
                        }
                    }
                    w.leave_node(&clause.data);
                }
                walk_expression(w, n.module_specifier);
            }
            w.leave_node(&n.data);
        }
        Statement::ExportAssignment(n) => {
            if w.enter_node(&n.data) == WalkControl::Descend {
                walk_modifiers(w, &n.modifiers);
                walk_expression(w, n.expression);
            }
            w.leave_node(&n.data);
        }
        Statement::Export(n) => {
            if w.enter_node(&n.data) == WalkControl::Descend {
                walk_modifiers(w, &n.modifiers);
                if let Some(clause) = n.export_clause {
                    match clause {
                        NamedExportBindings::Namespace(ns) => {
                            if w.enter_node(&ns.data) == WalkControl::Descend {
                                walk_identifier(w, ns.name);
                            }
                            w.leave_node(&ns.data);
                        }
                        NamedExportBindings::Named(named) => {
                            if w.enter_node(&named.data) == WalkControl::Descend {
                                walk_array(w, &named.elements, |w, spec| {
                                    if w.enter_node(&spec.data) == WalkControl::Descend {
                                        walk_opt_identifier(w, &spec.property_name);
                                        walk_identifier(w, spec.name);
                                    }
                                    w.leave_node(&spec.data);
                                });
                            }
                            w.leave_node(&named.data);
                        }
                    }
                }
                walk_opt_expression(w, &n.module_specifier);
            }
            w.leave_node(&n.data);
        }
    }
}

pub fn walk_doc_comment<'a, W: AstWalker<'a> + ?Sized>(w: &mut W, n: &'a DocComment<'a>) {
    if w.enter_node(&n.data) == WalkControl::Descend {
        walk_array(w, &n.tags, |w, tag| {
            if w.enter_node(&tag.data) == WalkControl::Descend {
                walk_identifier(w, tag.tag_name);
                walk_opt_identifier(w, &tag.name);
            }
            w.leave_node(&tag.data);
        });
    }
    w.leave_node(&n.data);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::NodeFlags;
    use crate::syntax_kind::SyntaxKind;

    struct Counter {
        nodes: usize,
        arrays: usize,
    }

    impl<'a> AstWalker<'a> for Counter {
        fn enter_node(&mut self, _node: &'a NodeData) -> WalkControl {
            self.nodes += 1;
            WalkControl::Descend
        }
        fn enter_array(&mut self, _span: &'a ArraySpan) -> WalkControl {
            self.arrays += 1;
            WalkControl::Descend
        }
    }

    #[test]
    fn test_walk_binary_expression() {
        let left_ident = Identifier {
            data: NodeData::new(SyntaxKind::Identifier, 0, 1, NodeFlags::NONE),
            text: sable_core::StringInterner::new().intern("a"),
            text_str: "a",
            original_keyword_kind: None,
        };
        let right_ident = Identifier {
            data: NodeData::new(SyntaxKind::Identifier, 4, 5, NodeFlags::NONE),
            text: left_ident.text,
            text_str: "b",
            original_keyword_kind: None,
        };
        let binary = BinaryExpression {
            data: NodeData::new(SyntaxKind::BinaryExpression, 0, 5, NodeFlags::NONE),
            left: Expression::Identifier(&left_ident),
            operator_token: Token::new(SyntaxKind::PlusToken, 2, 3, NodeFlags::NONE),
            right: Expression::Identifier(&right_ident),
        };
        let mut counter = Counter { nodes: 0, arrays: 0 };
        walk_expression(&mut counter, Expression::Binary(&binary));
        // Binary node, two identifiers, the operator token.
        assert_eq!(counter.nodes, 4);
        assert_eq!(counter.arrays, 0);
    }
}
