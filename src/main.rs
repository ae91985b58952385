//! The `rstree` binary.

use std::fmt::Write as _;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use rstree::{json, parse_document, tree, Lexer, Options, Severity};

const EXIT_PARSE_SEVERE: i32 = 2;

#[derive(Debug, Parser)]
#[command(
    about,
    author,
    version,
    after_help = "Set RUST_LOG=debug to trace the parser's decisions."
)]
struct Cli {
    /// The reStructuredText file to parse; or standard input if none passed
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Tab stop used when expanding tabs
    #[arg(long, value_name = "WIDTH", default_value_t = 8)]
    tab_width: usize,

    /// How many tokens the parser may look ahead before giving up
    #[arg(long, value_name = "TOKENS", default_value_t = 99)]
    max_lookahead: usize,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Tree)]
    to: Format,

    /// Indent JSON output
    #[arg(long)]
    pretty: bool,

    /// Exit with status 2 if any SEVERE system message was produced
    #[arg(long)]
    strict: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// The JSON node list
    Json,
    /// An indented node dump
    Tree,
    /// The lexer's token stream
    Tokens,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let (name, input) = match cli.file {
        Some(ref path) => (path.display().to_string(), std::fs::read_to_string(path)?),
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            ("<stdin>".to_string(), buf)
        }
    };

    let options = Options {
        tab_width: cli.tab_width,
        max_lookahead: cli.max_lookahead,
    };

    let mut out = String::new();
    let mut severe = false;
    match cli.to {
        Format::Tokens => {
            for token in Lexer::new(&name, &input, &options)? {
                writeln!(out, "{}", token)?;
            }
        }
        Format::Json | Format::Tree => {
            let doc = parse_document(&name, &input, &options)?;
            for diagnostic in doc.diagnostics() {
                log::info!("{}:{}", name, diagnostic);
                severe |= diagnostic.severity == Severity::Severe;
            }
            if cli.to == Format::Tree {
                tree::format_document(&doc, &mut out)?;
            } else if cli.pretty {
                out = json::to_string_pretty(&doc)?;
                out.push('\n');
            } else {
                out = json::to_string(&doc)?;
                out.push('\n');
            }
        }
    }

    let stdout = io::stdout();
    let mut lock = stdout.lock();
    lock.write_all(out.as_bytes())?;
    lock.flush()?;

    if cli.strict && severe {
        process::exit(EXIT_PARSE_SEVERE);
    }
    Ok(())
}
