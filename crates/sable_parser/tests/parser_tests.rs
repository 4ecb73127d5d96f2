//! Parser integration tests.
//!
//! Verifies that the parser builds the expected tree shapes from Sable
//! source, recovers from malformed input, and keeps its structural
//! guarantees: spans nest, output is deterministic, and no input
//! panics.

use sable_ast::node::{
    ArraySpan, Expression, FileKind, NodeData, SourceFile, Statement,
};
use sable_ast::syntax_kind::SyntaxKind;
use sable_ast::walk::{self, AstWalker, WalkControl};
use sable_core::arena::ParseArena;
use sable_parser::{parse_source_file, ParseOptions};

fn parse<'a>(arena: &'a ParseArena, source: &str) -> SourceFile<'a> {
    parse_source_file(arena, "test.sa", source, ParseOptions::default())
}

fn parse_markup<'a>(arena: &'a ParseArena, source: &str) -> SourceFile<'a> {
    parse_source_file(
        arena,
        "test.sax",
        source,
        ParseOptions::from_file_name("test.sax"),
    )
}

/// Parse and return the number of top level statements.
fn statement_count(source: &str) -> usize {
    let arena = ParseArena::new();
    parse(&arena, source).statements.elements.len()
}

fn assert_statement_count(source: &str, expected: usize) {
    assert_eq!(statement_count(source), expected, "source: {}", source);
}

/// Parse and return the diagnostic codes, in source order.
fn diagnostic_codes(source: &str) -> Vec<u32> {
    let arena = ParseArena::new();
    parse(&arena, source)
        .diagnostics
        .iter()
        .map(|d| d.code)
        .collect()
}

fn assert_clean(source: &str) {
    let arena = ParseArena::new();
    let file = parse(&arena, source);
    assert!(
        file.diagnostics.is_empty(),
        "unexpected diagnostics for {:?}: {:?}",
        source,
        file.diagnostics
    );
}

// ============================================================================
// Statements and declarations
// ============================================================================

#[test]
fn test_parse_variable_declarations() {
    assert_statement_count("const x = 42;", 1);
    assert_statement_count("let y = 'hello';", 1);
    assert_statement_count("var z = true;", 1);
    assert_statement_count("const a = 1; let b = 2; var c = 3;", 3);
    assert_clean("let x: number = 1, y = x;");
}

#[test]
fn test_parse_destructuring_declarations() {
    assert_clean("let { a, b: { c }, ...rest } = obj;");
    assert_clean("const [first, , third = 3] = items;");
}

#[test]
fn test_parse_function_declarations() {
    assert_clean("function foo() {}");
    assert_clean("function add(a: number, b: number): number { return a + b; }");
    assert_clean("async function fetchData() { return await fetch('url'); }");
    assert_clean("function* gen() { yield 1; yield* other(); }");
    assert_clean("declare function ambient(x: string): void;");
}

#[test]
fn test_parse_class_declarations() {
    assert_clean("class Foo {}");
    assert_clean("class Bar extends Foo implements A, B<T> {}");
    assert_clean(
        "class Person {\n  name: string;\n  #secret = 1;\n  constructor(name: string) { this.name = name; }\n  get title() { return this.name; }\n  set title(v: string) { this.name = v; }\n  static create() { return new Person('x'); }\n}",
    );
    assert_clean("abstract class Shape { abstract area(): number; }");
    assert_clean("@sealed\nclass Decorated { @readonly prop = 1; }");
}

#[test]
fn test_parse_interface_and_type_alias() {
    assert_clean("interface Foo { bar: string; baz?(): number; [k: string]: unknown; }");
    assert_clean("interface Child extends Base<string> { extra: boolean; }");
    assert_clean("type Pair<A, B> = { first: A; second: B };");
    assert_clean("type Handler = (event: string) => void;");
}

#[test]
fn test_parse_enum_declarations() {
    assert_clean("enum Color { Red, Green = 2, Blue }");
    assert_clean("const enum Flags { None = 0, All = 0xFF }");
}

#[test]
fn test_parse_module_declarations() {
    assert_clean("namespace Outer.Inner { export const x = 1; }");
    assert_clean("module \"ambient\" { export function f(): void; }");
}

#[test]
fn test_parse_imports_and_exports() {
    assert_clean("import \"./side-effect\";");
    assert_clean("import def from \"./mod\";");
    assert_clean("import def, { a, b as c } from \"./mod\";");
    assert_clean("import * as ns from \"./mod\";");
    assert_clean("import alias = require(\"./legacy\");");
    assert_clean("export { a, b as c };");
    assert_clean("export * from \"./mod\";");
    assert_clean("export * as ns from \"./mod\";");
    assert_clean("export default function () {}");
    assert_clean("export default 42;");
    assert_clean("export = internals;");
    assert_clean("export const answer = 42;");
}

#[test]
fn test_parse_control_flow() {
    assert_clean("if (a) { b(); } else if (c) d(); else e();");
    assert_clean("while (ready()) { step(); }");
    assert_clean("do { tick(); } while (running);");
    assert_clean("for (let i = 0; i < 10; i++) { use(i); }");
    assert_clean("for (const key in table) { visit(key); }");
    assert_clean("for (const item of items) { consume(item); }");
    assert_clean("async function f() { for await (const x of stream) { emit(x); } }");
    assert_clean("outer: for (;;) { if (done) break outer; continue outer; }");
    assert_clean(
        "switch (tag) { case 1: one(); break; case 2: case 3: few(); break; default: many(); }",
    );
    assert_clean("try { risky(); } catch (e) { report(e); } finally { cleanup(); }");
    assert_clean("try { risky(); } catch { ignore(); }");
    assert_clean("throw new Error(\"boom\");");
    assert_clean("debugger;");
}

// ============================================================================
// Expressions
// ============================================================================

#[test]
fn test_parse_expression_statements() {
    assert_clean("a + b * c ** d ** e;");
    assert_clean("x = y ??= z;");
    assert_clean("cond ? left : right;");
    assert_clean("obj?.prop?.[key]?.(arg);");
    assert_clean("tag`head${mid}tail`;");
    assert_clean("new Box<number>(1);");
    assert_clean("value as Wide satisfies Narrow;");
    assert_clean("target!.method();");
    assert_clean("let re = /ab+c/gi;");
    assert_clean("delete obj.prop, typeof x, void 0;");
}

#[test]
fn test_parse_object_and_array_literals() {
    assert_clean("let o = { a, b: 2, [key]: 3, ...rest, method() {}, get g() { return 1; } };");
    assert_clean("let a = [1, , 3, ...more];");
}

#[test]
fn test_object_literal_member_kinds() {
    let arena = ParseArena::new();
    let file = parse(&arena, "let o = { a: 1, b, ...rest };");
    assert!(file.diagnostics.is_empty());
    let Statement::Variable(statement) = file.statements.elements[0] else {
        panic!("expected a variable statement");
    };
    let declaration = statement.declaration_list.declarations.elements[0];
    let Some(Expression::ObjectLiteral(object)) = declaration.initializer else {
        panic!("expected an object literal initializer");
    };
    let kinds: Vec<SyntaxKind> = object
        .properties
        .elements
        .iter()
        .map(|p| p.node_data().kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            SyntaxKind::PropertyAssignment,
            SyntaxKind::ShorthandPropertyAssignment,
            SyntaxKind::SpreadAssignment,
        ]
    );
}

#[test]
fn test_arrow_function_forms() {
    assert_clean("let f = x => x + 1;");
    assert_clean("let g = (a, b = 1, ...rest) => ({ a, b });");
    assert_clean("let h = async (x: number): Promise<number> => x;");
    assert_clean("let typed = <T,>(x: T) => x;");
}

#[test]
fn test_async_arrow_with_bare_parameter() {
    let arena = ParseArena::new();
    let file = parse(&arena, "let f = async x => x;");
    assert!(
        file.diagnostics.is_empty(),
        "diagnostics: {:?}",
        file.diagnostics
    );
    let Statement::Variable(statement) = file.statements.elements[0] else {
        panic!("expected a variable statement");
    };
    let declaration = statement.declaration_list.declarations.elements[0];
    let Some(Expression::Arrow(arrow)) = declaration.initializer else {
        panic!("expected an arrow function initializer");
    };
    assert!(arrow.modifiers.is_some());
    assert_eq!(arrow.parameters.elements.len(), 1);

    // A line break after `async` ends the initializer instead.
    assert_statement_count("let g = async\nx => x;", 2);
}

#[test]
fn test_parenthesized_arrow_vs_comma_expression() {
    let arena = ParseArena::new();
    let file = parse(&arena, "(a, b) => a;\n(a, b);\n");
    assert!(file.diagnostics.is_empty());

    let Statement::Expression(first) = file.statements.elements[0] else {
        panic!("expected an expression statement");
    };
    assert!(matches!(first.expression, Expression::Arrow(_)));

    let Statement::Expression(second) = file.statements.elements[1] else {
        panic!("expected an expression statement");
    };
    let Expression::Parenthesized(paren) = second.expression else {
        panic!("expected a parenthesized expression");
    };
    assert!(matches!(paren.expression, Expression::Binary(_)));
}

#[test]
fn test_call_with_type_arguments_vs_comparison() {
    let arena = ParseArena::new();
    let file = parse(&arena, "f<T>(x);\na < b > c;\n");
    assert!(file.diagnostics.is_empty());

    let Statement::Expression(first) = file.statements.elements[0] else {
        panic!("expected an expression statement");
    };
    let Expression::Call(call) = first.expression else {
        panic!("expected a call expression");
    };
    assert!(call.type_arguments.is_some());

    let Statement::Expression(second) = file.statements.elements[1] else {
        panic!("expected an expression statement");
    };
    assert!(matches!(second.expression, Expression::Binary(_)));
}

#[test]
fn test_type_assertion_in_standard_files() {
    let arena = ParseArena::new();
    let file = parse(&arena, "let y = <Target>value;");
    assert!(file.diagnostics.is_empty());
    let Statement::Variable(statement) = file.statements.elements[0] else {
        panic!("expected a variable statement");
    };
    let declaration = statement.declaration_list.declarations.elements[0];
    assert!(matches!(
        declaration.initializer,
        Some(Expression::TypeAssertion(_))
    ));
}

// ============================================================================
// Markup
// ============================================================================

#[test]
fn test_markup_element_in_markup_files() {
    let arena = ParseArena::new();
    let file = parse_markup(
        &arena,
        "let view = <panel title=\"main\" {...props}>\n  <item selected />\n  {render(child)}\n  text run\n</panel>;",
    );
    assert!(
        file.diagnostics.is_empty(),
        "diagnostics: {:?}",
        file.diagnostics
    );
    let Statement::Variable(statement) = file.statements.elements[0] else {
        panic!("expected a variable statement");
    };
    let declaration = statement.declaration_list.declarations.elements[0];
    assert!(matches!(
        declaration.initializer,
        Some(Expression::MarkupElement(_))
    ));
}

#[test]
fn test_markup_fragment_and_nesting() {
    let arena = ParseArena::new();
    let file = parse_markup(&arena, "let v = <>{a}<b.c d={1}>inner</b.c></>;");
    assert!(
        file.diagnostics.is_empty(),
        "diagnostics: {:?}",
        file.diagnostics
    );
}

#[test]
fn test_markup_mismatched_closing_tag() {
    let arena = ParseArena::new();
    let file = parse_markup(&arena, "let v = <a>text</b>;");
    assert!(file.diagnostics.iter().any(|d| d.code == 1201));
}

// ============================================================================
// Error recovery
// ============================================================================

#[test]
fn test_missing_initializer_reports_and_recovers() {
    let codes = diagnostic_codes("let x = ;\nlet y = 2;");
    assert_eq!(codes, vec![1109]);
    assert_statement_count("let x = ;\nlet y = 2;", 2);
}

#[test]
fn test_arrow_head_without_arrow_token_recovers() {
    let arena = ParseArena::new();
    let file = parse(&arena, "let f = (a, b) { return a; };");
    let codes: Vec<u32> = file.diagnostics.iter().map(|d| d.code).collect();
    assert!(codes.contains(&1005), "codes: {:?}", codes);
    let Statement::Variable(statement) = file.statements.elements[0] else {
        panic!("expected a variable statement");
    };
    let declaration = statement.declaration_list.declarations.elements[0];
    assert!(matches!(declaration.initializer, Some(Expression::Arrow(_))));
}

#[test]
fn test_unterminated_template_literal() {
    let codes = diagnostic_codes("let s = `abc");
    assert!(codes.contains(&1034), "codes: {:?}", codes);
}

#[test]
fn test_missing_semicolon_between_statements_on_one_line() {
    let codes = diagnostic_codes("let a = 1 let b = 2;");
    assert!(codes.contains(&1005), "codes: {:?}", codes);
    assert_statement_count("let a = 1 let b = 2;", 2);
}

#[test]
fn test_unclosed_block_reaches_end_of_file() {
    let arena = ParseArena::new();
    let file = parse(&arena, "function f() { let a = 1;");
    assert!(!file.diagnostics.is_empty());
    assert_eq!(file.statements.elements.len(), 1);
}

#[test]
fn test_enum_member_separator_error() {
    let codes = diagnostic_codes("enum E { A B }");
    assert!(codes.contains(&1134), "codes: {:?}", codes);
}

#[test]
fn test_statements_survive_garbage_between_them() {
    let arena = ParseArena::new();
    let file = parse(&arena, "let a = 1;\n%%%\nlet b = 2;");
    assert!(!file.diagnostics.is_empty());
    let kinds: Vec<SyntaxKind> = file
        .statements
        .elements
        .iter()
        .map(|s| s.node_data().kind)
        .collect();
    assert!(kinds.contains(&SyntaxKind::VariableStatement));
    assert_eq!(
        kinds
            .iter()
            .filter(|k| **k == SyntaxKind::VariableStatement)
            .count(),
        2
    );
}

// ============================================================================
// Structural guarantees
// ============================================================================

/// Checks that every node's span is contained in its parent's span.
struct SpanChecker {
    stack: Vec<(u32, u32)>,
    violations: usize,
}

impl<'a> AstWalker<'a> for SpanChecker {
    fn enter_node(&mut self, node: &'a NodeData) -> WalkControl {
        let pos = node.pos();
        let end = node.end();
        if pos > end {
            self.violations += 1;
        }
        if let Some(&(parent_pos, parent_end)) = self.stack.last() {
            if pos < parent_pos || end > parent_end {
                self.violations += 1;
            }
        }
        self.stack.push((pos, end));
        WalkControl::Descend
    }

    fn leave_node(&mut self, _node: &'a NodeData) {
        self.stack.pop();
    }

    fn enter_array(&mut self, _span: &'a ArraySpan) -> WalkControl {
        WalkControl::Descend
    }
}

#[test]
fn test_spans_nest_within_parents() {
    let source = "class Service<T> extends Base {\n  items: T[] = [];\n  run(input: T): T { return input; }\n}\nfunction main() {\n  const s = new Service<number>();\n  for (const n of [1, 2, 3]) { s.run(n); }\n}\n";
    let arena = ParseArena::new();
    let file = parse(&arena, source);
    assert!(file.diagnostics.is_empty());

    let mut checker = SpanChecker {
        stack: Vec::new(),
        violations: 0,
    };
    for statement in file.statements.elements {
        walk::walk_statement(&mut checker, *statement);
    }
    assert_eq!(checker.violations, 0);
    assert!(checker.stack.is_empty());
}

#[test]
fn test_parse_is_deterministic() {
    let source = "let a = <Wide>narrow;\nfunction f(x = 1) { return x ** 2; }\nenum E { A, B }\nbroken syntax here %%%\n";
    let arena_one = ParseArena::new();
    let arena_two = ParseArena::new();
    let first = parse(&arena_one, source);
    let second = parse(&arena_two, source);

    assert_eq!(first.node_count, second.node_count);
    assert_eq!(first.statements.elements.len(), second.statements.elements.len());
    assert_eq!(first.diagnostics.len(), second.diagnostics.len());
    for (a, b) in first.statements.elements.iter().zip(second.statements.elements) {
        assert_eq!(a.node_data().kind, b.node_data().kind);
        assert_eq!(a.node_data().pos(), b.node_data().pos());
        assert_eq!(a.node_data().end(), b.node_data().end());
    }
}

#[test]
fn test_no_input_panics() {
    let nasty = [
        "",
        ";",
        "let x = ;",
        "((((((((((",
        "}}}}}}}",
        "class {",
        "<div>",
        "`unterminated",
        "/* unclosed",
        "a?.<",
        "export =",
        "for (let of items) {}",
        "enum { , }",
        "\u{FEFF}let bom = 1;",
        "let \u{1F600} = 1;",
        "x ===== y;",
    ];
    for source in nasty {
        let result = std::panic::catch_unwind(|| {
            let arena = ParseArena::new();
            let file = parse(&arena, source);
            file.statements.elements.len()
        });
        assert!(result.is_ok(), "panicked on {:?}", source);
    }
}

#[test]
fn test_deep_nesting_degrades_to_diagnostic() {
    let mut source = String::new();
    for _ in 0..2000 {
        source.push('(');
    }
    source.push('x');
    for _ in 0..2000 {
        source.push(')');
    }
    source.push(';');

    let result = std::panic::catch_unwind(|| {
        let arena = ParseArena::new();
        let file = parse(&arena, &source);
        file.diagnostics.iter().map(|d| d.code).collect::<Vec<_>>()
    });
    let codes = result.expect("deep nesting must not panic");
    assert!(codes.contains(&1132), "codes: {:?}", codes);
}

#[test]
fn test_file_kind_switches_markup_interpretation() {
    // The same text is a type assertion in one dialect and a markup
    // element in the other.
    let source = "let v = <a>b</a>;";

    let arena = ParseArena::new();
    let markup = parse_markup(&arena, source);
    assert!(markup.diagnostics.is_empty());
    assert_eq!(markup.file_kind, FileKind::Markup);

    let standard = parse(&arena, source);
    assert!(!standard.diagnostics.is_empty());
}

#[test]
fn test_doc_comments_are_collected() {
    let arena = ParseArena::new();
    let file = parse(
        &arena,
        "/** Entry point.\n * @param argv raw arguments\n * @returns exit code\n */\nfunction main(argv: string[]): number { return 0; }\n",
    );
    assert!(file.diagnostics.is_empty());
    assert_eq!(file.doc_comments.len(), 1);
    let doc = file.doc_comments[0];
    assert_eq!(doc.comment, Some("Entry point."));
    assert_eq!(doc.tags.elements.len(), 2);
    let param = doc.tags.elements[0];
    assert_eq!(param.data.kind, SyntaxKind::DocParameterTag);
    assert_eq!(param.name.map(|n| n.text_str), Some("argv"));
    assert_eq!(param.comment, Some("raw arguments"));
}
