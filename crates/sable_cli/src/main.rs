//! sablec: The Sable parser CLI.
//!
//! Usage:
//!   sablec [options] [file...]
//!
//! Parses the given `.sa` and `.sax` files and reports syntax
//! diagnostics. Exits 0 when every file parses cleanly, 2 when any
//! diagnostic is an error.

use clap::Parser as ClapParser;
use miette::IntoDiagnostic;
use std::process;
use std::time::Instant;

use sable_ast::node::Edition;
use sable_core::arena::ParseArena;
use sable_core::CoreError;
use sable_core::text::LineMap;
use sable_diagnostics::Diagnostic;
use sable_parser::{parse_source_file, ParseOptions};

#[derive(ClapParser, Debug)]
#[command(name = "sablec", about = "Sable - a fast parser for the Sable language")]
struct Cli {
    /// Sable files to parse.
    #[arg(value_name = "FILE", required = true)]
    files: Vec<String>,

    /// Parse with legacy edition semantics.
    #[arg(long)]
    legacy: bool,

    /// Print node and identifier counts per file.
    #[arg(long)]
    stats: bool,

    /// Print collected doc comments.
    #[arg(long = "docComments")]
    doc_comments: bool,

    /// Enable pretty printing for diagnostics.
    #[arg(long, default_value_t = true)]
    pretty: bool,
}

// ANSI color codes
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";
const GRAY: &str = "\x1b[90m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    let code = run_parse(&cli)?;
    if code != 0 {
        process::exit(code);
    }
    Ok(())
}

fn run_parse(cli: &Cli) -> miette::Result<i32> {
    let start = Instant::now();
    let use_color = cli.pretty && stderr_is_terminal();

    let mut error_count = 0usize;
    let mut total_nodes = 0usize;

    for file_name in &cli.files {
        let source = read_source(file_name).into_diagnostic()?;

        let mut options = ParseOptions::from_file_name(file_name);
        if cli.legacy {
            options.edition = Edition::Legacy;
        }

        let arena = ParseArena::new();
        let file = parse_source_file(&arena, file_name, &source, options);
        let line_map = LineMap::new(&file.text);

        for diag in &file.diagnostics {
            print_diagnostic(diag, &line_map, use_color);
            if diag.is_error() {
                error_count += 1;
            }
        }

        if cli.doc_comments {
            for doc in &file.doc_comments {
                let at = line_map.line_and_column_of(doc.data.pos());
                println!(
                    "{}:{}:{}: doc comment, {} tag{}",
                    file_name,
                    at.line + 1,
                    at.character + 1,
                    doc.tags.elements.len(),
                    if doc.tags.elements.len() == 1 { "" } else { "s" }
                );
                if let Some(comment) = doc.comment {
                    println!("  {}", comment.lines().next().unwrap_or(""));
                }
            }
        }

        if cli.stats {
            println!(
                "{}: {} statements, {} nodes, {} identifiers, {} bytes in arena",
                file_name,
                file.statements.elements.len(),
                file.node_count,
                file.identifier_count,
                arena.allocated_bytes()
            );
        }
        total_nodes += file.node_count;
    }

    let elapsed = start.elapsed();

    if error_count > 0 {
        if use_color {
            eprintln!(
                "\n{}Found {} error{}.{}",
                RED,
                error_count,
                if error_count == 1 { "" } else { "s" },
                RESET
            );
        } else {
            eprintln!(
                "\nFound {} error{}.",
                error_count,
                if error_count == 1 { "" } else { "s" }
            );
        }
        return Ok(2);
    }

    if use_color {
        eprintln!(
            "{}Parsed {} file{} ({} nodes) in {:.2}ms.{}",
            GRAY,
            cli.files.len(),
            if cli.files.len() == 1 { "" } else { "s" },
            total_nodes,
            elapsed.as_secs_f64() * 1000.0,
            RESET
        );
    }

    Ok(0)
}

fn read_source(path: &str) -> Result<String, CoreError> {
    std::fs::read_to_string(path).map_err(|source| CoreError::ReadFile {
        path: path.to_string(),
        source,
    })
}

fn print_diagnostic(diag: &Diagnostic, line_map: &LineMap, use_color: bool) {
    if use_color {
        let color = if diag.is_error() { RED } else { YELLOW };
        let category = if diag.is_error() { "error" } else { "warning" };
        if let Some(ref file) = diag.file {
            eprint!("{}{}{}", CYAN, file, RESET);
            if let Some(span) = diag.span {
                let at = line_map.line_and_column_of(span.start);
                eprint!(":{}:{}", at.line + 1, at.character + 1);
            }
            eprint!(": ");
        }
        eprintln!(
            "{}{}{}{} {}SA{}{}: {}",
            BOLD, color, category, RESET, CYAN, diag.code, RESET, diag.message_text
        );
    } else {
        eprintln!("{}", diag);
    }
}

fn stderr_is_terminal() -> bool {
    #[cfg(unix)]
    {
        unsafe { libc::isatty(2) != 0 }
    }
    #[cfg(not(unix))]
    {
        true
    }
}
