//! Incremental re-parse over an edited file.
//!
//! [`update_source_file`] takes the previous tree, the new text, and
//! the change range the host observed, then reparses the file while
//! reusing every old subtree the change cannot have affected. Before
//! the reparse, a single walk over the old tree shifts node positions
//! past the edit by the length delta and marks everything touching the
//! edited span with [`NodeFlags::INTERSECTS_CHANGE`]. The parser then
//! consults a [`SyntaxCursor`] over the old tree: whenever a list
//! element is about to be parsed, a clean old node starting at exactly
//! the current position is spliced in and the scanner jumps past it.
//!
//! The old tree is adjusted in place and must not be used again after
//! an update. Old and new tree share one arena, so reused nodes stay
//! valid by reference.

use sable_ast::flags::NodeFlags;
use sable_ast::node::{
    ArraySpan, Block, CaseOrDefaultClause, ClassElement, EnumMember, ForInitializer,
    ModuleBody, ModuleDeclaration, NodeArray, NodeData, ParameterDeclaration, SourceFile,
    Statement, TypeElement, VariableDeclaration,
};
use sable_ast::syntax_kind::SyntaxKind;
use sable_ast::walk::{self, AstWalker, WalkControl};
use sable_core::arena::ParseArena;
use sable_core::text::{TextChangeRange, TextPos, TextSpan};

use crate::parser::Parser;

/// Reparse `source_file` against `new_text`.
///
/// `change_range` must describe the edit exactly: the replaced span in
/// the old text and the length of its replacement. When the range is
/// inconsistent with the two texts the whole file is parsed from
/// scratch instead. `aggressive_checks` enables debug assertions that
/// the unchanged text around the edit really is unchanged.
pub fn update_source_file<'a>(
    arena: &'a ParseArena,
    source_file: &'a SourceFile<'a>,
    new_text: &str,
    change_range: TextChangeRange,
    aggressive_checks: bool,
) -> SourceFile<'a> {
    if change_range.is_unchanged() && new_text == source_file.text {
        return share_unchanged(source_file);
    }

    let old_len = source_file.text.chars().count() as TextPos;
    let new_len = new_text.chars().count() as TextPos;
    let consistent = change_range.old_end() <= old_len
        && change_range.span.start <= change_range.old_end()
        && old_len as i64 + change_range.delta() == new_len as i64;
    if !consistent || source_file.statements.elements.is_empty() {
        return parse_full(arena, source_file, new_text);
    }

    if aggressive_checks {
        let start = change_range.span.start as usize;
        debug_assert!(source_file
            .text
            .chars()
            .take(start)
            .eq(new_text.chars().take(start)));
        debug_assert!(source_file
            .text
            .chars()
            .skip(change_range.old_end() as usize)
            .eq(new_text.chars().skip(change_range.new_end() as usize)));
    }

    // Pull the change start back to the nearest node boundary at or
    // before it. The edit may have changed how the preceding token
    // scans (an inserted `=` can merge with a `=` before it), so the
    // node touching the boundary is reparsed rather than reused.
    let extended = extend_to_affected_range(source_file, change_range);

    let mut marker = ChangeMarker {
        change_start: extended.span.start,
        old_change_end: extended.old_end(),
        new_change_end: extended.new_end(),
        delta: extended.delta(),
    };
    adjust_old_tree(source_file, &mut marker);

    let parser = Parser::new(
        arena,
        &source_file.file_name,
        new_text,
        source_file.file_kind,
        source_file.edition,
    )
    .with_interner(source_file.identifiers.clone())
    .with_syntax_cursor(SyntaxCursor::new(source_file));
    let mut result = parser.parse_source_file();

    // Doc comments inside reused regions are never rescanned; carry
    // the shifted old ones over and keep the list sorted.
    for doc in &source_file.doc_comments {
        let intersects = doc.data.flags().intersects(NodeFlags::INTERSECTS_CHANGE);
        let duplicate = result
            .doc_comments
            .iter()
            .any(|d| d.data.pos() == doc.data.pos());
        if !intersects && !duplicate {
            result.doc_comments.push(*doc);
        }
    }
    result.doc_comments.sort_by_key(|d| d.data.pos());

    result
}

fn parse_full<'a>(
    arena: &'a ParseArena,
    source_file: &SourceFile<'_>,
    new_text: &str,
) -> SourceFile<'a> {
    Parser::new(
        arena,
        &source_file.file_name,
        new_text,
        source_file.file_kind,
        source_file.edition,
    )
    .parse_source_file()
}

/// A no-op edit still produces a fresh `SourceFile` value, sharing the
/// old statement slice and interner.
fn share_unchanged<'a>(source_file: &'a SourceFile<'a>) -> SourceFile<'a> {
    let statements = NodeArray::new(
        source_file.statements.span.pos(),
        source_file.statements.span.end(),
        source_file.statements.elements,
    );
    statements
        .span
        .set_has_trailing_separator(source_file.statements.span.has_trailing_separator());
    SourceFile {
        data: NodeData::new(
            SyntaxKind::SourceFile,
            source_file.data.pos(),
            source_file.data.end(),
            source_file.data.flags(),
        ),
        statements,
        end_of_file_token: source_file.end_of_file_token.clone(),
        file_name: source_file.file_name.clone(),
        text: source_file.text.clone(),
        file_kind: source_file.file_kind,
        language_variant: source_file.language_variant,
        edition: source_file.edition,
        diagnostics: source_file.diagnostics.clone(),
        doc_comments: source_file.doc_comments.clone(),
        directives: source_file.directives.clone(),
        node_count: source_file.node_count,
        identifier_count: source_file.identifier_count,
        identifiers: source_file.identifiers.clone(),
    }
}

fn extend_to_affected_range(
    source_file: &SourceFile<'_>,
    change_range: TextChangeRange,
) -> TextChangeRange {
    let mut finder = NearestStartFinder {
        limit: change_range.span.start,
        best: 0,
    };
    for statement in source_file.statements.elements {
        walk::walk_statement(&mut finder, *statement);
    }
    let start = finder.best.min(change_range.span.start);
    TextChangeRange::new(
        TextSpan::from_bounds(start, change_range.old_end()),
        change_range.new_end() - start,
    )
}

/// Finds the largest node start position at or before a limit.
struct NearestStartFinder {
    limit: TextPos,
    best: TextPos,
}

impl<'a> AstWalker<'a> for NearestStartFinder {
    fn enter_node(&mut self, node: &'a NodeData) -> WalkControl {
        if node.pos() > self.limit {
            return WalkControl::Skip;
        }
        if node.pos() > self.best {
            self.best = node.pos();
        }
        WalkControl::Descend
    }

    fn enter_array(&mut self, span: &'a ArraySpan) -> WalkControl {
        if span.pos() > self.limit {
            WalkControl::Skip
        } else {
            WalkControl::Descend
        }
    }
}

fn adjust_old_tree<'a>(source_file: &'a SourceFile<'a>, marker: &mut ChangeMarker) {
    marker.enter_node(&source_file.data);
    marker.enter_array(&source_file.statements.span);
    for statement in source_file.statements.elements {
        walk::walk_statement(marker, *statement);
    }
    walk::walk_token(marker, &source_file.end_of_file_token);
    for doc in &source_file.doc_comments {
        walk::walk_doc_comment(marker, *doc);
    }
}

/// Shifts or marks every node boundary relative to one edit.
///
/// Nodes entirely past the old change span move by the delta. Nodes
/// touching the span are marked intersecting and their boundaries are
/// clamped into the new text, so position invariants hold even though
/// the node will not be reused. Nodes entirely before the span are
/// untouched and their subtrees are skipped.
struct ChangeMarker {
    change_start: TextPos,
    old_change_end: TextPos,
    new_change_end: TextPos,
    delta: i64,
}

impl ChangeMarker {
    fn shift(&self, pos: TextPos) -> TextPos {
        (pos as i64 + self.delta) as TextPos
    }

    fn adjust(&self, pos: TextPos, end: TextPos) -> Option<(TextPos, TextPos)> {
        // A node starting at the old change end has none of its own
        // text inside the span; it shifts cleanly. A later reuse
        // attempt still has to match the shifted start exactly, so a
        // token merged across the boundary can never resurrect it.
        if pos >= self.old_change_end {
            return Some((self.shift(pos), self.shift(end)));
        }
        if end >= self.change_start {
            let pos = pos.min(self.new_change_end);
            let end = if end >= self.old_change_end {
                self.shift(end)
            } else {
                end.min(self.new_change_end)
            };
            return Some((pos, end.max(pos)));
        }
        None
    }

    // A node starting at the old change end took the clean-shift
    // branch of `adjust`; only nodes that begin before the end of the
    // span can hold changed text.
    fn intersects(&self, pos: TextPos, end: TextPos) -> bool {
        pos < self.old_change_end && end >= self.change_start
    }
}

impl<'a> AstWalker<'a> for ChangeMarker {
    fn enter_node(&mut self, node: &'a NodeData) -> WalkControl {
        let pos = node.pos();
        let end = node.end();
        match self.adjust(pos, end) {
            Some((new_pos, new_end)) => {
                if self.intersects(pos, end) {
                    node.add_flags(NodeFlags::INTERSECTS_CHANGE);
                    node.remove_flags(
                        NodeFlags::HAS_AGGREGATED_CHILD_DATA | NodeFlags::SUBTREE_HAS_ERROR,
                    );
                }
                node.set_pos(new_pos);
                node.set_end(new_end);
                WalkControl::Descend
            }
            None => WalkControl::Skip,
        }
    }

    fn enter_array(&mut self, span: &'a ArraySpan) -> WalkControl {
        match self.adjust(span.pos(), span.end()) {
            Some((new_pos, new_end)) => {
                span.set_pos(new_pos);
                span.set_end(new_end);
                WalkControl::Descend
            }
            None => WalkControl::Skip,
        }
    }
}

// ============================================================================
// Syntax cursor
// ============================================================================

/// An old-tree node a list parse may splice in unchanged.
#[derive(Clone, Copy)]
pub(crate) enum ReusableNode<'a> {
    Statement(Statement<'a>),
    ClassElement(ClassElement<'a>),
    SwitchClause(CaseOrDefaultClause<'a>),
    EnumMember(&'a EnumMember<'a>),
    TypeElement(TypeElement<'a>),
    VariableDeclaration(&'a VariableDeclaration<'a>),
    Parameter(&'a ParameterDeclaration<'a>),
}

impl<'a> ReusableNode<'a> {
    fn node_data(self) -> &'a NodeData {
        match self {
            ReusableNode::Statement(n) => n.node_data(),
            ReusableNode::ClassElement(n) => n.node_data(),
            ReusableNode::SwitchClause(n) => n.node_data(),
            ReusableNode::EnumMember(n) => &n.data,
            ReusableNode::TypeElement(n) => n.node_data(),
            ReusableNode::VariableDeclaration(n) => &n.data,
            ReusableNode::Parameter(n) => &n.data,
        }
    }

    fn walk<W: AstWalker<'a> + ?Sized>(self, w: &mut W) {
        match self {
            ReusableNode::Statement(n) => walk::walk_statement(w, n),
            ReusableNode::ClassElement(n) => walk::walk_class_element(w, n),
            ReusableNode::SwitchClause(n) => walk::walk_case_or_default_clause(w, n),
            ReusableNode::EnumMember(n) => walk::walk_enum_member(w, n),
            ReusableNode::TypeElement(n) => walk::walk_type_element(w, n),
            ReusableNode::VariableDeclaration(n) => walk::walk_variable_declaration(w, n),
            ReusableNode::Parameter(n) => walk::walk_parameter(w, n),
        }
    }
}

/// One of the old tree's element lists.
#[derive(Clone, Copy)]
enum ListRef<'a> {
    Statements(&'a [Statement<'a>]),
    ClassElements(&'a [ClassElement<'a>]),
    SwitchClauses(&'a [CaseOrDefaultClause<'a>]),
    EnumMembers(&'a [&'a EnumMember<'a>]),
    TypeElements(&'a [TypeElement<'a>]),
    VariableDeclarations(&'a [&'a VariableDeclaration<'a>]),
    Parameters(&'a [&'a ParameterDeclaration<'a>]),
}

impl<'a> ListRef<'a> {
    fn get(self, index: usize) -> Option<ReusableNode<'a>> {
        match self {
            ListRef::Statements(l) => l.get(index).copied().map(ReusableNode::Statement),
            ListRef::ClassElements(l) => l.get(index).copied().map(ReusableNode::ClassElement),
            ListRef::SwitchClauses(l) => l.get(index).copied().map(ReusableNode::SwitchClause),
            ListRef::EnumMembers(l) => l.get(index).copied().map(ReusableNode::EnumMember),
            ListRef::TypeElements(l) => l.get(index).copied().map(ReusableNode::TypeElement),
            ListRef::VariableDeclarations(l) => {
                l.get(index).copied().map(ReusableNode::VariableDeclaration)
            }
            ListRef::Parameters(l) => l.get(index).copied().map(ReusableNode::Parameter),
        }
    }
}

/// Hands out old-tree list elements by position during an incremental
/// parse. Successive requests usually hit the element after the last
/// one returned, so the containing list and index are cached; anything
/// else re-descends from the file root.
pub struct SyntaxCursor<'a> {
    source_file: &'a SourceFile<'a>,
    cached_list: Option<ListRef<'a>>,
    cached_index: usize,
}

impl<'a> SyntaxCursor<'a> {
    pub fn new(source_file: &'a SourceFile<'a>) -> Self {
        Self {
            source_file,
            cached_list: None,
            cached_index: 0,
        }
    }

    /// The old-tree list element starting at exactly `position`, if any.
    pub(crate) fn current_node(&mut self, position: TextPos) -> Option<ReusableNode<'a>> {
        if let Some(list) = self.cached_list {
            for index in [self.cached_index, self.cached_index + 1] {
                if let Some(node) = list.get(index) {
                    if node.node_data().pos() == position {
                        self.cached_index = index;
                        return Some(node);
                    }
                }
            }
        }
        let (list, index) =
            find_in_statement_list(self.source_file.statements.elements, position)?;
        self.cached_list = Some(list);
        self.cached_index = index;
        list.get(index)
    }
}

type Found<'a> = Option<(ListRef<'a>, usize)>;

fn find_in_statement_list<'a>(list: &'a [Statement<'a>], position: TextPos) -> Found<'a> {
    for (index, statement) in list.iter().enumerate() {
        let data = statement.node_data();
        if data.pos() == position {
            return Some((ListRef::Statements(list), index));
        }
        if position < data.pos() {
            return None;
        }
        if position < data.end() {
            return find_in_statement(*statement, position);
        }
    }
    None
}

fn descend_statement<'a>(statement: Statement<'a>, position: TextPos) -> Found<'a> {
    let data = statement.node_data();
    if position >= data.pos() && position < data.end() {
        find_in_statement(statement, position)
    } else {
        None
    }
}

fn find_in_block<'a>(block: &'a Block<'a>, position: TextPos) -> Found<'a> {
    if position >= block.data.pos() && position < block.data.end() {
        find_in_statement_list(block.statements.elements, position)
    } else {
        None
    }
}

fn find_in_opt_block<'a>(block: &Option<&'a Block<'a>>, position: TextPos) -> Found<'a> {
    block.and_then(|b| find_in_block(b, position))
}

fn find_in_statement<'a>(statement: Statement<'a>, position: TextPos) -> Found<'a> {
    match statement {
        Statement::Block(n) => find_in_statement_list(n.statements.elements, position),
        Statement::Variable(n) => {
            find_in_variable_declarations(n.declaration_list.declarations.elements, position)
        }
        Statement::If(n) => descend_statement(n.then_statement, position).or_else(|| {
            n.else_statement
                .and_then(|e| descend_statement(e, position))
        }),
        Statement::Do(n) => descend_statement(n.statement, position),
        Statement::While(n) => descend_statement(n.statement, position),
        Statement::With(n) => descend_statement(n.statement, position),
        Statement::Labeled(n) => descend_statement(n.statement, position),
        Statement::For(n) => match n.initializer {
            Some(ForInitializer::VariableDeclarationList(list))
                if position < list.data.end() =>
            {
                find_in_variable_declarations(list.declarations.elements, position)
            }
            _ => descend_statement(n.statement, position),
        },
        Statement::ForIn(n) => find_in_for_initializer(n.initializer, position)
            .or_else(|| descend_statement(n.statement, position)),
        Statement::ForOf(n) => find_in_for_initializer(n.initializer, position)
            .or_else(|| descend_statement(n.statement, position)),
        Statement::Switch(n) => {
            let clauses = n.case_block.clauses.elements;
            for (index, clause) in clauses.iter().enumerate() {
                let data = clause.node_data();
                if data.pos() == position {
                    return Some((ListRef::SwitchClauses(clauses), index));
                }
                if position < data.pos() {
                    return None;
                }
                if position < data.end() {
                    return find_in_statement_list(clause.statements().elements, position);
                }
            }
            None
        }
        Statement::Try(n) => find_in_block(n.try_block, position)
            .or_else(|| {
                n.catch_clause
                    .and_then(|c| find_in_block(c.block, position))
            })
            .or_else(|| find_in_opt_block(&n.finally_block, position)),
        Statement::Function(n) => find_in_parameters(n.parameters.elements, position)
            .or_else(|| find_in_opt_block(&n.body, position)),
        Statement::Class(n) => {
            let members = n.members.elements;
            for (index, member) in members.iter().enumerate() {
                let data = member.node_data();
                if data.pos() == position {
                    return Some((ListRef::ClassElements(members), index));
                }
                if position < data.pos() {
                    return None;
                }
                if position < data.end() {
                    return find_in_class_element(*member, position);
                }
            }
            None
        }
        Statement::Interface(n) => {
            let members = n.members.elements;
            for (index, member) in members.iter().enumerate() {
                let data = member.node_data();
                if data.pos() == position {
                    return Some((ListRef::TypeElements(members), index));
                }
                if position < data.pos() {
                    return None;
                }
                if position < data.end() {
                    return find_in_type_element(*member, position);
                }
            }
            None
        }
        Statement::Enum(n) => {
            let members = n.members.elements;
            for (index, member) in members.iter().enumerate() {
                if member.data.pos() == position {
                    return Some((ListRef::EnumMembers(members), index));
                }
                if position < member.data.pos() {
                    return None;
                }
            }
            None
        }
        Statement::Module(n) => find_in_module(n, position),
        _ => None,
    }
}

fn find_in_module<'a>(module: &'a ModuleDeclaration<'a>, position: TextPos) -> Found<'a> {
    match module.body {
        Some(ModuleBody::Block(block))
            if position >= block.data.pos() && position < block.data.end() =>
        {
            find_in_statement_list(block.statements.elements, position)
        }
        Some(ModuleBody::Namespace(inner)) => find_in_module(inner, position),
        _ => None,
    }
}

fn find_in_for_initializer<'a>(initializer: ForInitializer<'a>, position: TextPos) -> Found<'a> {
    match initializer {
        ForInitializer::VariableDeclarationList(list) if position < list.data.end() => {
            find_in_variable_declarations(list.declarations.elements, position)
        }
        _ => None,
    }
}

fn find_in_class_element<'a>(member: ClassElement<'a>, position: TextPos) -> Found<'a> {
    match member {
        ClassElement::Constructor(n) => find_in_parameters(n.parameters.elements, position)
            .or_else(|| find_in_opt_block(&n.body, position)),
        ClassElement::Method(n) => find_in_parameters(n.parameters.elements, position)
            .or_else(|| find_in_opt_block(&n.body, position)),
        ClassElement::GetAccessor(n) => find_in_parameters(n.parameters.elements, position)
            .or_else(|| find_in_opt_block(&n.body, position)),
        ClassElement::SetAccessor(n) => find_in_parameters(n.parameters.elements, position)
            .or_else(|| find_in_opt_block(&n.body, position)),
        ClassElement::IndexSignature(n) => find_in_parameters(n.parameters.elements, position),
        ClassElement::Property(_) | ClassElement::Semicolon(_) => None,
    }
}

fn find_in_type_element<'a>(member: TypeElement<'a>, position: TextPos) -> Found<'a> {
    match member {
        TypeElement::MethodSignature(n) => find_in_parameters(n.parameters.elements, position),
        TypeElement::CallSignature(n) => find_in_parameters(n.parameters.elements, position),
        TypeElement::ConstructSignature(n) => {
            find_in_parameters(n.parameters.elements, position)
        }
        TypeElement::IndexSignature(n) => find_in_parameters(n.parameters.elements, position),
        TypeElement::PropertySignature(_) => None,
    }
}

fn find_in_parameters<'a>(
    list: &'a [&'a ParameterDeclaration<'a>],
    position: TextPos,
) -> Found<'a> {
    for (index, parameter) in list.iter().enumerate() {
        if parameter.data.pos() == position {
            return Some((ListRef::Parameters(list), index));
        }
        if position < parameter.data.pos() {
            return None;
        }
    }
    None
}

fn find_in_variable_declarations<'a>(
    list: &'a [&'a VariableDeclaration<'a>],
    position: TextPos,
) -> Found<'a> {
    for (index, declaration) in list.iter().enumerate() {
        if declaration.data.pos() == position {
            return Some((ListRef::VariableDeclarations(list), index));
        }
        if position < declaration.data.pos() {
            return None;
        }
    }
    None
}

// ============================================================================
// Reuse vetting
// ============================================================================

/// Aggregates error bits lazily, caching the result on the node so the
/// subtree is walked at most once per update.
fn contains_parse_error(node: ReusableNode<'_>) -> bool {
    let data = node.node_data();
    if data.flags().intersects(NodeFlags::THIS_NODE_HAS_ERROR) {
        return true;
    }
    if !data.flags().intersects(NodeFlags::HAS_AGGREGATED_CHILD_DATA) {
        let mut aggregator = ErrorAggregator { has_error: false };
        node.walk(&mut aggregator);
        let mut flags = NodeFlags::HAS_AGGREGATED_CHILD_DATA;
        if aggregator.has_error {
            flags |= NodeFlags::SUBTREE_HAS_ERROR;
        }
        data.add_flags(flags);
    }
    data.flags().intersects(NodeFlags::SUBTREE_HAS_ERROR)
}

struct ErrorAggregator {
    has_error: bool,
}

impl<'a> AstWalker<'a> for ErrorAggregator {
    fn enter_node(&mut self, node: &'a NodeData) -> WalkControl {
        if node.flags().intersects(NodeFlags::THIS_NODE_HAS_ERROR) {
            self.has_error = true;
            return WalkControl::Skip;
        }
        WalkControl::Descend
    }

    fn enter_array(&mut self, _span: &'a ArraySpan) -> WalkControl {
        if self.has_error {
            WalkControl::Skip
        } else {
            WalkControl::Descend
        }
    }
}

impl<'a> Parser<'a> {
    /// An old node starting at the current token that survived the
    /// edit: boundaries untouched, no recorded errors, and created
    /// under the same context flags the parser is in now.
    fn reuse_candidate(&mut self) -> Option<ReusableNode<'a>> {
        let position = self.token_pos();
        let node = self.syntax_cursor.as_mut()?.current_node(position)?;
        let data = node.node_data();
        if data.pos() != position {
            return None;
        }
        if data.flags().intersects(NodeFlags::INTERSECTS_CHANGE) {
            return None;
        }
        if data.is_missing() {
            return None;
        }
        if data.context_flags() != self.context_flags & NodeFlags::CONTEXT_FLAGS {
            return None;
        }
        if contains_parse_error(node) {
            return None;
        }
        Some(node)
    }

    /// Splice a reused node in: jump the scanner to its end and scan
    /// the token after it.
    fn consume_reused_node(&mut self, end: TextPos) {
        self.scanner.set_pos(end as usize);
        self.next_token();
    }

    pub(crate) fn try_reuse_statement(&mut self) -> Option<Statement<'a>> {
        match self.reuse_candidate()? {
            ReusableNode::Statement(statement) => {
                self.consume_reused_node(statement.node_data().end());
                Some(statement)
            }
            _ => None,
        }
    }

    pub(crate) fn try_reuse_class_member(&mut self) -> Option<ClassElement<'a>> {
        match self.reuse_candidate()? {
            ReusableNode::ClassElement(member) => {
                self.consume_reused_node(member.node_data().end());
                Some(member)
            }
            _ => None,
        }
    }

    pub(crate) fn try_reuse_switch_clause(&mut self) -> Option<CaseOrDefaultClause<'a>> {
        match self.reuse_candidate()? {
            ReusableNode::SwitchClause(clause) => {
                self.consume_reused_node(clause.node_data().end());
                Some(clause)
            }
            _ => None,
        }
    }

    pub(crate) fn try_reuse_enum_member(&mut self) -> Option<&'a EnumMember<'a>> {
        match self.reuse_candidate()? {
            ReusableNode::EnumMember(member) => {
                self.consume_reused_node(member.data.end());
                Some(member)
            }
            _ => None,
        }
    }

    pub(crate) fn try_reuse_type_member(&mut self) -> Option<TypeElement<'a>> {
        match self.reuse_candidate()? {
            ReusableNode::TypeElement(member) => {
                self.consume_reused_node(member.node_data().end());
                Some(member)
            }
            _ => None,
        }
    }

    /// Initialized declarations are never reused: the initializer was
    /// parsed under the enclosing `in`-operator context, which may
    /// differ at the new position.
    pub(crate) fn try_reuse_variable_declaration(
        &mut self,
    ) -> Option<&'a VariableDeclaration<'a>> {
        match self.reuse_candidate()? {
            ReusableNode::VariableDeclaration(declaration)
                if declaration.initializer.is_none() =>
            {
                self.consume_reused_node(declaration.data.end());
                Some(declaration)
            }
            _ => None,
        }
    }

    /// Same restriction as variable declarations: default values keep
    /// parameters from being reused.
    pub(crate) fn try_reuse_parameter(&mut self) -> Option<&'a ParameterDeclaration<'a>> {
        match self.reuse_candidate()? {
            ReusableNode::Parameter(parameter) if parameter.initializer.is_none() => {
                self.consume_reused_node(parameter.data.end());
                Some(parameter)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sable_ast::node::{Edition, FileKind};

    fn parse<'a>(arena: &'a ParseArena, text: &str) -> SourceFile<'a> {
        Parser::new(arena, "test.sa", text, FileKind::Standard, Edition::Current)
            .parse_source_file()
    }

    #[test]
    fn test_change_marker_shifts_nodes_past_edit() {
        let mut marker = ChangeMarker {
            change_start: 10,
            old_change_end: 12,
            new_change_end: 15,
            delta: 3,
        };

        let after = NodeData::new(SyntaxKind::Identifier, 20, 25, NodeFlags::NONE);
        assert_eq!(marker.enter_node(&after), WalkControl::Descend);
        assert_eq!(after.pos(), 23);
        assert_eq!(after.end(), 28);
        assert!(!after.flags().intersects(NodeFlags::INTERSECTS_CHANGE));

        let before = NodeData::new(SyntaxKind::Identifier, 0, 5, NodeFlags::NONE);
        assert_eq!(marker.enter_node(&before), WalkControl::Skip);
        assert_eq!(before.pos(), 0);
        assert_eq!(before.end(), 5);

        let touching = NodeData::new(SyntaxKind::Identifier, 8, 11, NodeFlags::NONE);
        assert_eq!(marker.enter_node(&touching), WalkControl::Descend);
        assert!(touching.flags().intersects(NodeFlags::INTERSECTS_CHANGE));
        assert_eq!(touching.pos(), 8);
        assert_eq!(touching.end(), 11);

        // A node starting exactly at the old change end shifts cleanly.
        let at_boundary = NodeData::new(SyntaxKind::Identifier, 12, 16, NodeFlags::NONE);
        assert_eq!(marker.enter_node(&at_boundary), WalkControl::Descend);
        assert_eq!(at_boundary.pos(), 15);
        assert_eq!(at_boundary.end(), 19);
        assert!(!at_boundary.flags().intersects(NodeFlags::INTERSECTS_CHANGE));
    }

    #[test]
    fn test_cursor_finds_top_level_statement() {
        let arena = ParseArena::new();
        let file = arena.alloc(parse(&arena, "let a = 1;\nlet b = 2;\n"));
        let second_pos = file.statements.elements[1].node_data().pos();
        let mut cursor = SyntaxCursor::new(file);
        let found = cursor.current_node(second_pos);
        assert!(matches!(found, Some(ReusableNode::Statement(_))));
        assert!(cursor.current_node(second_pos + 1).is_none());
    }

    #[test]
    fn test_cursor_finds_class_member() {
        let arena = ParseArena::new();
        let file = arena.alloc(parse(
            &arena,
            "class C {\n  m() { return 1; }\n  n() { return 2; }\n}\n",
        ));
        let Statement::Class(class) = file.statements.elements[0] else {
            panic!("expected a class declaration");
        };
        let member_pos = class.members.elements[1].node_data().pos();
        let mut cursor = SyntaxCursor::new(file);
        let found = cursor.current_node(member_pos);
        assert!(matches!(found, Some(ReusableNode::ClassElement(_))));
    }

    #[test]
    fn test_cursor_descends_into_namespace_block() {
        let arena = ParseArena::new();
        let file = arena.alloc(parse(
            &arena,
            "namespace Outer.Inner {\n  let a = 1;\n  let b = 2;\n}\n",
        ));
        let Statement::Module(module) = file.statements.elements[0] else {
            panic!("expected a module declaration");
        };
        let Some(ModuleBody::Namespace(inner)) = module.body else {
            panic!("expected a nested namespace");
        };
        let Some(ModuleBody::Block(block)) = inner.body else {
            panic!("expected a module block");
        };
        let second_pos = block.statements.elements[1].node_data().pos();
        let mut cursor = SyntaxCursor::new(file);
        let found = cursor.current_node(second_pos);
        assert!(matches!(found, Some(ReusableNode::Statement(_))));
    }

    #[test]
    fn test_unchanged_update_shares_statements() {
        let arena = ParseArena::new();
        let text = "let a = 1;\n";
        let file = arena.alloc(parse(&arena, text));
        let updated =
            update_source_file(&arena, file, text, TextChangeRange::unchanged(), true);
        assert_eq!(
            updated.statements.elements.as_ptr(),
            file.statements.elements.as_ptr()
        );
    }

    #[test]
    fn test_incremental_matches_full_reparse() {
        let arena = ParseArena::new();
        let old_text = "let a = 1;\nfunction f() { return a; }\nlet b = 3;\n";
        let new_text = "let a = 10;\nfunction f() { return a; }\nlet b = 3;\n";
        let old = arena.alloc(parse(&arena, old_text));

        // `1` replaced by `10` at offset 8.
        let change = TextChangeRange::new(TextSpan::new(8, 1), 2);
        let updated = update_source_file(&arena, old, new_text, change, true);

        let fresh_arena = ParseArena::new();
        let fresh = parse(&fresh_arena, new_text);

        assert_eq!(
            updated.statements.elements.len(),
            fresh.statements.elements.len()
        );
        for (a, b) in updated
            .statements
            .elements
            .iter()
            .zip(fresh.statements.elements)
        {
            assert_eq!(a.node_data().kind, b.node_data().kind);
            assert_eq!(a.node_data().pos(), b.node_data().pos());
            assert_eq!(a.node_data().end(), b.node_data().end());
        }
        assert!(updated.diagnostics.is_empty());
    }

    #[test]
    fn test_statement_after_edit_is_reused() {
        let arena = ParseArena::new();
        let old_text = "let a = 1;\nfunction f() { return a; }\n";
        let new_text = "let a = 99;\nfunction f() { return a; }\n";
        let old = arena.alloc(parse(&arena, old_text));
        let old_fn = match old.statements.elements[1] {
            Statement::Function(f) => f as *const _,
            _ => panic!("expected a function declaration"),
        };

        let change = TextChangeRange::new(TextSpan::new(8, 1), 2);
        let updated = update_source_file(&arena, old, new_text, change, true);
        let new_fn = match updated.statements.elements[1] {
            Statement::Function(f) => f as *const _,
            _ => panic!("expected a function declaration"),
        };
        assert_eq!(old_fn, new_fn);
    }

    #[test]
    fn test_edit_inside_statement_forces_reparse_of_it() {
        let arena = ParseArena::new();
        let old_text = "function f() { return 1; }\nlet a = 2;\n";
        let new_text = "function f() { return 12; }\nlet a = 2;\n";
        let old = arena.alloc(parse(&arena, old_text));

        let change = TextChangeRange::new(TextSpan::new(22, 1), 2);
        let updated = update_source_file(&arena, old, new_text, change, true);

        let fresh_arena = ParseArena::new();
        let fresh = parse(&fresh_arena, new_text);
        assert_eq!(
            updated.statements.elements.len(),
            fresh.statements.elements.len()
        );
        for (a, b) in updated
            .statements
            .elements
            .iter()
            .zip(fresh.statements.elements)
        {
            assert_eq!(a.node_data().kind, b.node_data().kind);
            assert_eq!(a.node_data().range(), b.node_data().range());
        }
    }

    #[test]
    fn test_inserted_class_member_is_fresh_and_sibling_is_reused() {
        let arena = ParseArena::new();
        let old_text = "class C { m() {} }";
        let new_text = "class C { p = 1; m() {} }";
        let old = arena.alloc(parse(&arena, old_text));
        let old_method = match old.statements.elements[0] {
            Statement::Class(class) => match class.members.elements[0] {
                ClassElement::Method(m) => m as *const _,
                _ => panic!("expected a method"),
            },
            _ => panic!("expected a class declaration"),
        };

        // Insert `p = 1; ` in front of the method.
        let change = TextChangeRange::new(TextSpan::new(10, 0), 7);
        let updated = update_source_file(&arena, old, new_text, change, true);
        let Statement::Class(class) = updated.statements.elements[0] else {
            panic!("expected a class declaration");
        };
        assert_eq!(class.members.elements.len(), 2);

        let ClassElement::Property(property) = class.members.elements[0] else {
            panic!("expected a property");
        };
        assert_eq!(property.data.pos(), 10);

        let ClassElement::Method(new_method) = class.members.elements[1] else {
            panic!("expected a method");
        };
        assert_eq!(old_method, new_method as *const _);
    }

    #[test]
    fn test_inconsistent_change_range_falls_back_to_full_parse() {
        let arena = ParseArena::new();
        let old = arena.alloc(parse(&arena, "let a = 1;\n"));
        let new_text = "let a = 2;\n";
        // Claims to delete more than the file holds.
        let change = TextChangeRange::new(TextSpan::new(0, 999), 0);
        let updated = update_source_file(&arena, old, new_text, change, false);
        assert_eq!(updated.statements.elements.len(), 1);
        assert!(updated.diagnostics.is_empty());
    }
}
