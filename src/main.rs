//! `vint` command line: parses a Vint source file and reports syntax errors.

use std::{fs::read_to_string, path::PathBuf, process::ExitCode, time::Instant};

use anyhow::Context;
use clap::Parser as ClapParser;
use tracing_subscriber::EnvFilter;
use vint::{lexer::lexer::tokenize, parser::parser::parse, render_diagnostic};

#[derive(ClapParser, Debug)]
#[command(name = "vint", about = "Parse Vint source files and report syntax errors")]
struct Cli {
    /// Source file to parse.
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Print the parsed program.
    #[arg(long)]
    ast: bool,

    /// Dump the token stream before parsing.
    #[arg(long)]
    tokens: bool,

    /// Print how long each phase took.
    #[arg(long)]
    timings: bool,
}

fn main() -> anyhow::Result<ExitCode> {
    // Log level comes from RUST_LOG, defaulting to warn
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();
    let file_name = cli.file.display().to_string();
    let source =
        read_to_string(&cli.file).with_context(|| format!("failed to read {}", file_name))?;

    let start = Instant::now();

    let tokens = match tokenize(source.clone()) {
        Ok(tokens) => tokens,
        Err(error) => {
            eprintln!("{}", render_diagnostic(&source, &file_name, &error));
            return Ok(ExitCode::FAILURE);
        }
    };

    if cli.timings {
        println!("Tokenized in {:?}", start.elapsed());
    }
    if cli.tokens {
        for token in &tokens {
            println!("{}", token.debug());
        }
    }

    let parse_start = Instant::now();
    let (parser, program) = parse(tokens);

    if cli.timings {
        println!("Parsed in {:?}", parse_start.elapsed());
    }

    let diagnostics = parser.diagnostics();
    if !diagnostics.is_empty() {
        for error in diagnostics {
            eprintln!("{}\n", render_diagnostic(&source, &file_name, error));
        }
        eprintln!("{} syntax error(s) in {}", diagnostics.len(), file_name);
        return Ok(ExitCode::FAILURE);
    }

    if cli.ast {
        println!("{}", program);
    }
    if cli.timings {
        println!("Total time: {:?}", start.elapsed());
    }

    Ok(ExitCode::SUCCESS)
}
