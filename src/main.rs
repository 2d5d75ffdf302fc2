//! mdsl Command Line Interface
//!
//! Usage:
//!   mdsl [OPTIONS] <input-file>
//!   mdsl [OPTIONS] --text <TEXT>...
//!   mdsl --help
//!
//! Examples:
//!   mdsl sample.dsl                          # Translate to C++
//!   mdsl --emit=tokens sample.dsl            # Dump tokens as JSON lines
//!   mdsl --emit=check sample.dsl             # Verify reprint is stable
//!   mdsl --text 'main () { print(1); }'      # Translate inline text

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use log::{debug, error, info};
use mdsl::codegen::{EmitCpp, Unparser};
use mdsl::TranslateConfig;
use std::fs;
use std::path::PathBuf;

/// mdsl - Matrix DSL to C++ translator
#[derive(Parser, Debug)]
#[command(name = "mdsl")]
#[command(version)]
#[command(about = "Translate matrix DSL programs to C++", long_about = None)]
struct Cli {
    /// Input file (DSL source)
    #[arg(value_name = "FILE", required_unless_present = "text", conflicts_with = "text")]
    input: Option<PathBuf>,

    /// Program text given inline; multiple values are joined by a space
    #[arg(long, num_args = 1..)]
    text: Option<Vec<String>>,

    /// Output file (defaults to stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// What to emit
    #[arg(long, default_value = "cpp")]
    emit: EmitKind,

    /// Include path of the matrix runtime header
    #[arg(long, value_name = "PATH")]
    runtime_header: Option<String>,

    /// Omit the #include / using-namespace preamble
    #[arg(long)]
    no_prelude: bool,

    /// Spaces per indent level in generated text
    #[arg(long, value_name = "N")]
    indent: Option<usize>,

    /// Verbose output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode (suppress warnings)
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum EmitKind {
    /// Scanned tokens, one JSON object per line
    Tokens,
    /// Abstract Syntax Tree as JSON
    Ast,
    /// Reprinted DSL source
    Unparse,
    /// Generated C++
    Cpp,
    /// Verify that reprinting is stable
    Check,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.quiet {
        log::LevelFilter::Error
    } else {
        match cli.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .format_timestamp(None)
        .init();

    info!("mdsl v{}", mdsl::VERSION);

    let source = read_source(&cli)?;
    let config = build_config(&cli);
    debug!("Translate config: {:?}", config);

    let output = match cli.emit {
        EmitKind::Tokens => {
            info!("Scanning...");
            let tokens = mdsl::scan(&source)?;
            let mut lines = Vec::with_capacity(tokens.len());
            for token in &tokens {
                lines.push(serde_json::to_string(token).context("Failed to serialize token")?);
            }
            lines.join("\n")
        }
        EmitKind::Ast => {
            info!("Parsing...");
            let root = mdsl::parse(&source)?;
            serde_json::to_string_pretty(&root).context("Failed to serialize AST")?
        }
        EmitKind::Unparse => {
            info!("Parsing...");
            let root = mdsl::parse(&source)?;
            let mut unparser = Unparser::new(&config.indent);
            unparser.root(&root);
            unparser.finish()
        }
        EmitKind::Cpp => {
            info!("Parsing...");
            let root = mdsl::parse(&source)?;
            info!("Emitting C++...");
            root.emit_cpp(&config)
        }
        EmitKind::Check => {
            info!("Checking round trip...");
            match mdsl::verify_round_trip(&source) {
                Ok(stable) => stable,
                Err(e) => {
                    error!("Round trip failed: {:#}", e);
                    return Err(e);
                }
            }
        }
    };

    write_output(&cli.output, output.trim_end_matches('\n'))
}

fn read_source(cli: &Cli) -> Result<String> {
    match (&cli.input, &cli.text) {
        (_, Some(parts)) => Ok(parts.join(" ")),
        (Some(path), None) => {
            debug!("Input file: {:?}", path);
            fs::read_to_string(path)
                .with_context(|| format!("Failed to read input file: {:?}", path))
        }
        (None, None) => bail!("no input: give a FILE or --text"),
    }
}

fn build_config(cli: &Cli) -> TranslateConfig {
    let mut config = TranslateConfig::default();

    if let Some(ref header) = cli.runtime_header {
        config.runtime_header = header.clone();
    }
    if cli.no_prelude {
        config.prelude = false;
    }
    if let Some(n) = cli.indent {
        config.indent = " ".repeat(n);
    }

    config
}

fn write_output(path: &Option<PathBuf>, content: &str) -> Result<()> {
    match path {
        Some(p) => {
            fs::write(p, format!("{}\n", content))
                .with_context(|| format!("Failed to write output file: {:?}", p))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
