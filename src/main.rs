// Copyright 2016 Vincent Vigneron. See the COPYRIGHT
// file at the top-level directory of this distribution.
//
// Licensed under the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at.your option.
// This file may not be copied, modified, or distributed
// except according to those terms.

use std::io;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use re2dfa::pattern::reader::{PatternReader, DEFAULT_SENTINEL};
use re2dfa::Session;

const BANNER: &str = "Welcome to RE to DFA machine. Use U for intersection, * for Kleene Star. \
                      ` means its a start state and [ ] means its an accept state";

#[derive(Parser)]
#[command(name = "re2dfa")]
#[command(version)]
#[command(about = "Compile binary patterns into DFA transition tables", long_about = None)]
struct Cli {
    /// Line that ends the session
    #[arg(long, value_name = "WORD", default_value = DEFAULT_SENTINEL)]
    sentinel: String,

    /// Do not print the banner and the prompts
    #[arg(short, long)]
    quiet: bool,

    /// Read patterns from a file instead of the standard input
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.input {
        Some(ref path) => {
            let patterns = PatternReader::from_file(path)
                .with_context(|| format!("failed to open pattern file {}", path.display()))?;
            run(patterns.with_sentinel(cli.sentinel.as_str()), cli.quiet)
        },
        None => {
            let stdin = io::stdin();
            let patterns = PatternReader::from_reader(stdin.lock());
            run(patterns.with_sentinel(cli.sentinel.as_str()), cli.quiet)
        },
    }
}

fn run<R: BufRead>(mut patterns: PatternReader<R>, quiet: bool) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut session = Session::new();

    if !quiet {
        writeln!(out, "{}", BANNER)?;
    }
    loop {
        if !quiet {
            write!(out, "Enter a RE or type {} to end: ", patterns.sentinel())?;
            out.flush()?;
        }
        let pattern = match patterns.next() {
            Some(pattern) => pattern.context("failed to read a pattern")?,
            None => break,
        };
        match session.compile_and_render(&pattern) {
            Ok(lines) => {
                for line in lines {
                    writeln!(out, "{}", line)?;
                }
            },
            Err(e) => {
                out.flush()?;
                eprintln!("Error: {}", e);
                if let Some(dfa) = session.automaton() {
                    write!(out, "{}", dfa)?;
                }
            },
        }
    }
    out.flush()?;
    Ok(())
}
