//! Parent links, built on request.
//!
//! The tree stores no upward pointers. Callers that need them ask for a
//! [`ParentLinks`] table, which maps each node header to the header of
//! its nearest enclosing node. Top level statements have no entry.

use rustc_hash::FxHashMap;

use crate::node::{ArraySpan, NodeData, SourceFile};
use crate::walk::{self, AstWalker, WalkControl};

pub struct ParentLinks<'a> {
    map: FxHashMap<usize, &'a NodeData>,
}

impl<'a> ParentLinks<'a> {
    pub fn build(source_file: &SourceFile<'a>) -> Self {
        let mut builder = Builder {
            stack: Vec::new(),
            map: FxHashMap::default(),
        };
        for statement in source_file.statements.elements {
            walk::walk_statement(&mut builder, *statement);
        }
        ParentLinks { map: builder.map }
    }

    pub fn parent_of(&self, node: &NodeData) -> Option<&'a NodeData> {
        self.map.get(&(node as *const NodeData as usize)).copied()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

struct Builder<'a> {
    stack: Vec<&'a NodeData>,
    map: FxHashMap<usize, &'a NodeData>,
}

impl<'a> AstWalker<'a> for Builder<'a> {
    fn enter_node(&mut self, node: &'a NodeData) -> WalkControl {
        if let Some(parent) = self.stack.last() {
            self.map.insert(node as *const NodeData as usize, parent);
        }
        self.stack.push(node);
        WalkControl::Descend
    }

    fn leave_node(&mut self, _node: &'a NodeData) {
        self.stack.pop();
    }

    fn enter_array(&mut self, _span: &'a ArraySpan) -> WalkControl {
        WalkControl::Descend
    }
}
