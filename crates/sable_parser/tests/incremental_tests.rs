//! Incremental reparse equivalence tests.
//!
//! Applies a sweep of splice edits to a fixed source file and checks
//! that the incrementally updated tree is indistinguishable from a
//! from-scratch parse of the edited text: same node kinds and spans in
//! walk order, same diagnostics.

use sable_ast::node::{ArraySpan, NodeData, SourceFile};
use sable_ast::syntax_kind::SyntaxKind;
use sable_ast::walk::{self, AstWalker, WalkControl};
use sable_core::arena::ParseArena;
use sable_core::text::{TextChangeRange, TextSpan};
use sable_parser::{parse_source_file, update_source_file, ParseOptions};

const SOURCE: &str = "\
let total = 0;
function add(a, b) { return a + b; }
class Counter {
    count = 0;
    bump() { this.count = add(this.count, 1); }
}
enum Mode { Off, On = 2 }
interface Shape { area(): number; }
for (let i = 0; i < 4; i++) { total = add(total, i); }
switch (total) { case 0: break; default: total--; }
";

/// Flattens a tree into (kind, pos, end) triples in walk order.
struct ShapeCollector {
    shape: Vec<(SyntaxKind, u32, u32)>,
}

impl<'a> AstWalker<'a> for ShapeCollector {
    fn enter_node(&mut self, node: &'a NodeData) -> WalkControl {
        self.shape.push((node.kind, node.pos(), node.end()));
        WalkControl::Descend
    }

    fn enter_array(&mut self, _span: &'a ArraySpan) -> WalkControl {
        WalkControl::Descend
    }
}

fn shape(file: &SourceFile<'_>) -> Vec<(SyntaxKind, u32, u32)> {
    let mut collector = ShapeCollector { shape: Vec::new() };
    for statement in file.statements.elements {
        walk::walk_statement(&mut collector, *statement);
    }
    collector.shape
}

fn diagnostics(file: &SourceFile<'_>) -> Vec<(u32, Option<TextSpan>)> {
    file.diagnostics.iter().map(|d| (d.code, d.span)).collect()
}

/// Splice `inserted` over `deleted` bytes at `start`, reparse both
/// incrementally and from scratch, and require identical results.
fn check_edit(old_text: &str, start: usize, deleted: usize, inserted: &str) {
    let mut new_text = String::with_capacity(old_text.len() + inserted.len());
    new_text.push_str(&old_text[..start]);
    new_text.push_str(inserted);
    new_text.push_str(&old_text[start + deleted..]);

    let arena = ParseArena::new();
    let old = arena.alloc(parse_source_file(
        &arena,
        "test.sa",
        old_text,
        ParseOptions::default(),
    ));
    let change = TextChangeRange::new(
        TextSpan::new(start as u32, deleted as u32),
        inserted.len() as u32,
    );
    let updated = update_source_file(&arena, old, &new_text, change, true);

    let fresh_arena = ParseArena::new();
    let fresh = parse_source_file(&fresh_arena, "test.sa", &new_text, ParseOptions::default());

    assert_eq!(
        shape(&updated),
        shape(&fresh),
        "tree mismatch for edit at {} (deleted {}, inserted {:?})",
        start,
        deleted,
        inserted
    );
    assert_eq!(
        diagnostics(&updated),
        diagnostics(&fresh),
        "diagnostic mismatch for edit at {} (deleted {}, inserted {:?})",
        start,
        deleted,
        inserted
    );
}

#[test]
fn test_base_source_parses_clean() {
    let arena = ParseArena::new();
    let file = parse_source_file(&arena, "test.sa", SOURCE, ParseOptions::default());
    assert!(
        file.diagnostics.is_empty(),
        "diagnostics: {:?}",
        file.diagnostics
    );
}

#[test]
fn test_edit_sweep_matches_full_reparse() {
    let replacements = ["", "x", " let q = 0; ", "/*c*/"];
    for start in (0..=SOURCE.len()).step_by(7) {
        for deleted in [0usize, 1, 3] {
            if start + deleted > SOURCE.len() {
                continue;
            }
            for inserted in replacements {
                if deleted == 0 && inserted.is_empty() {
                    continue;
                }
                check_edit(SOURCE, start, deleted, inserted);
            }
        }
    }
}

#[test]
fn test_edits_into_malformed_text_match_full_reparse() {
    // Edits that leave the file broken still have to converge on the
    // same tree and the same diagnostics as a fresh parse.
    check_edit(SOURCE, 0, 3, "le");
    check_edit(SOURCE, 15, 8, "funct");
    check_edit(SOURCE, 52, 1, "");
    check_edit(SOURCE, SOURCE.len(), 0, "class {");
    check_edit(SOURCE, 30, 0, "%%%");
}

#[test]
fn test_repeated_edits_stay_equivalent() {
    // Chain several updates, checking each against a scratch parse.
    let arena = ParseArena::new();
    let mut text = SOURCE.to_string();
    let mut current = &*arena.alloc(parse_source_file(
        &arena,
        "test.sa",
        &text,
        ParseOptions::default(),
    ));

    let edits: [(usize, usize, &str); 4] = [
        (12, 1, "42"),
        (0, 0, "let first = true;\n"),
        (90, 5, ""),
        (40, 0, " /* note */ "),
    ];
    for (start, deleted, inserted) in edits {
        let mut new_text = String::new();
        new_text.push_str(&text[..start]);
        new_text.push_str(inserted);
        new_text.push_str(&text[start + deleted..]);

        let change = TextChangeRange::new(
            TextSpan::new(start as u32, deleted as u32),
            inserted.len() as u32,
        );
        let updated = arena.alloc(update_source_file(&arena, current, &new_text, change, true));

        let fresh_arena = ParseArena::new();
        let fresh = parse_source_file(&fresh_arena, "test.sa", &new_text, ParseOptions::default());
        assert_eq!(shape(updated), shape(&fresh));
        assert_eq!(diagnostics(updated), diagnostics(&fresh));

        text = new_text;
        current = updated;
    }
}
