use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use memo_core::{ERROR_PREFIX, MaskedError, Pipeline, Verbosity, capture, tag_it, tagged};
use memo_store::{IndexLock, StoreConfig, Upsert, from_period, keep, render};

#[derive(Parser)]
#[command(
    name = "memo",
    about = "Pipe-friendly memo toolbox",
    after_help = "Chains:\n  memo new | memo tagit <tag> | memo keep\n  memo from all | memo tagged <tag>... | memo stdout [short|long|verbose]"
)]
struct Cli {
    /// Enable verbose debug output on stderr
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Turn stdin into a timestamped memo
    New,

    /// Add a tag to the memo on stdin
    Tagit {
        /// Tag to append
        tag: String,
    },

    /// Store the memo on stdin and index it
    Keep,

    /// Print the index, filtered by period ("help" lists periods)
    From {
        /// Period name
        #[arg(default_value = "help")]
        period: String,

        /// Read this index file instead of the configured one
        #[arg(long)]
        index: Option<PathBuf>,
    },

    /// Keep only index entries carrying every given tag
    Tagged {
        #[arg(required = true)]
        tags: Vec<String>,
    },

    /// Print the memos referenced by the index on stdin
    Stdout {
        /// short, long or verbose
        #[arg(default_value = "short")]
        verbosity: String,
    },
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match &cli.command {
        Commands::New => cmd_new(),
        Commands::Tagit { tag } => cmd_tagit(tag),
        Commands::Keep => cmd_keep(),
        Commands::From { period, index } => cmd_from(period, index.as_deref()),
        Commands::Tagged { tags } => cmd_tagged(tags),
        Commands::Stdout { verbosity } => cmd_stdout(verbosity),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if e.downcast_ref::<MaskedError>().is_some() {
                eprintln!("{e}");
            } else {
                eprintln!("{ERROR_PREFIX}{e:#}");
            }
            ExitCode::FAILURE
        }
    }
}

/// Copy a step's bytes to stdout.
fn emit(pipeline: Pipeline) -> Result<()> {
    pipeline.emit(io::stdout().lock())?;
    Ok(())
}

fn load_config() -> Result<StoreConfig> {
    StoreConfig::load().context("failed to load configuration")
}

fn cmd_new() -> Result<()> {
    emit(capture(io::stdin().lock()))?;
    eprintln!("✓ converted");
    Ok(())
}

fn cmd_tagit(tag: &str) -> Result<()> {
    emit(tag_it(io::stdin().lock(), tag))?;
    eprintln!("✓ tagged ... {tag}");
    Ok(())
}

fn cmd_keep() -> Result<()> {
    let config = load_config()?;
    let outcome =
        keep(io::stdin().lock(), &config, &IndexLock::new()).map_err(MaskedError::new)?;

    eprintln!("✓ hashed ... {}", outcome.hash);
    match outcome.status {
        Upsert::Added => eprintln!("✓ index ... added, {} entries now", outcome.entries),
        Upsert::Updated => eprintln!("✓ index ... updated, {} entries", outcome.entries),
    }
    eprintln!("✓ stored");
    Ok(())
}

fn cmd_from(period: &str, index: Option<&std::path::Path>) -> Result<()> {
    if period == "help" {
        print_from_help()?;
        return Ok(());
    }
    let index_path = match index {
        Some(path) => path.to_path_buf(),
        None => load_config()?.index_path(),
    };
    emit(from_period(period, &index_path))
}

fn cmd_tagged(tags: &[String]) -> Result<()> {
    emit(tagged(io::stdin().lock(), tags))
}

fn cmd_stdout(verbosity: &str) -> Result<()> {
    emit(render(io::stdin().lock(), Verbosity::from(verbosity)))
}

fn print_from_help() -> Result<()> {
    let mut err = io::stderr().lock();
    writeln!(err)?;
    writeln!(err, "FROM is part of the memo toolbox")?;
    writeln!(err, "--------------------------------")?;
    writeln!(err, "Usage: memo from <period> | further tools")?;
    writeln!(err)?;
    writeln!(err, "Reads the index file and filters its entries by a named period.")?;
    writeln!(err, "Dates or timestamps are not supported as periods.")?;
    writeln!(err)?;
    writeln!(err, "Periods:")?;
    for period in memo_core::Period::ALL {
        let mark = if period.is_implemented() { '✓' } else { '✘' };
        writeln!(err, "  {mark} {period}")?;
    }
    writeln!(err)?;
    writeln!(err, "Tool chains:")?;
    writeln!(err, "  ... new, tagit, keep")?;
    writeln!(err, "  ... from, tagged, stdout")?;
    writeln!(err)?;
    Ok(())
}
