//! Parses a DOT file and prints its syntax tree, or writes a DOT diagram of
//! the syntax node types themselves.

use anyhow::{Context, Result};
use clap::Parser;
use dot_syntax::dump::dump_tree;
use dot_syntax::registry::self_diagram;
use dot_syntax::{FormatSettings, SourceText, SyntaxNode, SyntaxTree};
use log::debug;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

#[derive(Parser, Debug)]
#[command(name = "dotdump", version)]
#[command(about = "Dumps the syntax tree of a Graphviz DOT file")]
struct Cli {
    /// DOT file to read, or `-` for standard input
    #[arg(value_name = "FILE", required_unless_present = "ast")]
    input: Option<String>,

    /// Write the parsed text back out unchanged instead of dumping the tree
    #[arg(long, conflicts_with = "format")]
    render: bool,

    /// Rewrite the input with consistent layout
    #[arg(long)]
    format: bool,

    /// Indentation written per nesting level when formatting
    #[arg(long, value_name = "STR", requires = "format")]
    indent: Option<String>,

    /// Do not end formatted output with a new line
    #[arg(long, requires = "format")]
    no_final_newline: bool,

    /// Do not end node, attribute and name/value statements with `;`
    #[arg(long, requires = "format")]
    no_node_semicolons: bool,

    /// End subgraph statements with `;`
    #[arg(long, requires = "format")]
    subgraph_semicolons: bool,

    /// Write a DOT diagram of the syntax node types to OUT, or to standard output
    #[arg(
        long,
        value_name = "OUT",
        num_args = 0..=1,
        conflicts_with_all = ["input", "render", "format"]
    )]
    ast: Option<Option<PathBuf>>,
}

impl Cli {
    fn format_settings(&self) -> FormatSettings {
        let mut settings = FormatSettings::default()
            .with_final_new_line(!self.no_final_newline)
            .with_node_semicolons(!self.no_node_semicolons)
            .with_subgraph_semicolons(self.subgraph_semicolons);
        if let Some(indent) = &self.indent {
            settings = settings.with_indent(indent.as_str());
        }
        settings
    }

    /// Produces the output for a parsed input file.
    fn output(&self, tree: &SyntaxTree) -> Result<String, dot_syntax::Error> {
        if self.render {
            debug!("rendering");
            Ok(tree.to_string())
        } else if self.format {
            let mut out = String::new();
            tree.write_formatted(&mut out, &self.format_settings())?;
            Ok(out)
        } else {
            dump_tree(tree)
        }
    }
}

fn read_source(input: &str) -> Result<SourceText> {
    if input == "-" {
        SourceText::from_reader(io::stdin().lock()).context("failed to read standard input")
    } else {
        let text = fs::read_to_string(input).with_context(|| format!("failed to read {}", input))?;
        Ok(SourceText::from(text))
    }
}

/// The self-diagram as a complete DOT document.
fn ast_diagram() -> String {
    SyntaxTree::from_graph(self_diagram()).to_string()
}

fn run(cli: &Cli) -> Result<()> {
    if let Some(out) = &cli.ast {
        let text = ast_diagram();
        match out {
            Some(path) => fs::write(path, text)
                .with_context(|| format!("failed to write {}", path.display()))?,
            None => io::stdout().write_all(text.as_bytes())?,
        }
        return Ok(());
    }

    let input = cli.input.as_deref().unwrap_or("-");
    let source = read_source(input)?;
    let tree = dot_syntax::parse_source(&source).with_context(|| input.to_string())?;
    let output = cli.output(&tree)?;
    io::stdout().write_all(output.as_bytes())?;
    Ok(())
}

fn main() {
    env_logger::init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version are not failures.
            let code = if e.use_stderr() { 1 } else { 0 };
            drop(e.print());
            process::exit(code);
        }
    };

    if let Err(e) = run(&cli) {
        eprintln!("dotdump: {:#}", e);
        process::exit(1);
    }
}
