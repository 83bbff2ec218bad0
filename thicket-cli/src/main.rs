//! thicket CLI
//!
//! Runs a selector against a JSON document tree and prints what it matches.

mod document;
mod output;

use std::fs;
use std::io::{self, IsTerminal, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use thicket_dom::NodeRef;
use thicket_selector::{Query, parse_selector_group};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use output::{Format, Palette};

/// thicket: CSS-style selectors over JSON document trees
#[derive(Parser, Debug)]
#[command(name = "thicket")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Every link inside a nav, from a file
    thicket 'nav a[href]' page.json

    # From stdin, first match only
    cat page.json | thicket --first 'li:nth-child(2n+1)'

    # Inline document, JSON output
    thicket --format json --doc '{"tag": "p", "children": ["hi"]}' p

    # Count matches
    thicket --count '.item:not(.hidden)' page.json

    # Show the parsed selector
    thicket --ast 'ul > li, ol > li'

DOCUMENT FORMAT:
    A node or an array of nodes:
    {"tag": "ul", "attrs": {"id": "menu"}, "children": [...]}
    {"text": "hello"} or "hello"
    {"comment": "note"}
"#)]
#[allow(clippy::struct_excessive_bools)]
struct Cli {
    /// Selector to run
    #[arg(value_name = "SELECTOR")]
    selector: String,

    /// JSON document file; `-` or nothing reads stdin
    #[arg(value_name = "FILE")]
    path: Option<PathBuf>,

    /// Parse a JSON document string directly instead of a file
    #[arg(long, value_name = "JSON", conflicts_with = "path")]
    doc: Option<String>,

    /// Print only the first match
    #[arg(long)]
    first: bool,

    /// Print the number of matches instead of the matches
    #[arg(long, conflicts_with = "first")]
    count: bool,

    /// Output format for matches
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Print the parsed selector as JSON and exit
    #[arg(long)]
    ast: bool,

    /// Only check that the selector compiles
    #[arg(long, conflicts_with = "ast")]
    check: bool,

    /// When to color text output
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    color: ColorChoice,

    /// More logging (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ColorChoice {
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    fn enabled(self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none(),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.ast {
        let group = parse_selector_group(&cli.selector)
            .with_context(|| format!("invalid selector `{}`", cli.selector))?;
        println!("{}", serde_json::to_string_pretty(&group)?);
        return Ok(());
    }

    let query = Query::parse(&cli.selector)
        .with_context(|| format!("invalid selector `{}`", cli.selector))?;

    if cli.check {
        println!("ok");
        return Ok(());
    }

    let json = read_document(&cli)?;
    let tree = document::load(&json)?;
    let roots = [tree.document()];

    let mut stdout = io::stdout().lock();

    if cli.count {
        writeln!(stdout, "{}", query.select(roots).count())?;
        return Ok(());
    }

    let matches: Vec<NodeRef<'_>> = if cli.first {
        query.first(roots).into_iter().collect()
    } else {
        query.select(roots).collect()
    };
    debug!(matches = matches.len(), "query finished");

    output::write_matches(
        &mut stdout,
        &matches,
        cli.format,
        &Palette::new(cli.color.enabled()),
    )
}

/// Install a stderr `fmt` subscriber. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// The document text from `--doc`, a file, or stdin.
fn read_document(cli: &Cli) -> Result<String> {
    if let Some(json) = &cli.doc {
        return Ok(json.clone());
    }
    match cli.path.as_deref() {
        Some(path) if path != Path::new("-") => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => {
            let mut json = String::new();
            let _ = io::stdin()
                .read_to_string(&mut json)
                .context("failed to read document from stdin")?;
            Ok(json)
        }
    }
}
