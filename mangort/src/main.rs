//! `mangort` drives the mango runtime primitives from the command line.

use std::io::{StdinLock, StdoutLock};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use mango_runtime::{equals, int_to_string, string_to_int, Console, Int, MangoString, RuntimeConfig};
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

type StdConsole = Console<StdinLock<'static>, StdoutLock<'static>>;

/// Mango runtime driver.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    /// JSON-encoded runtime configuration.
    #[arg(long, env = "MANGO_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,
    /// Longest accepted input line, overriding the configuration file.
    #[arg(long, env = "MANGO_MAX_LINE", value_name = "CHARS")]
    max_line: Option<usize>,
    /// Subcommand.
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Format an integer in the given radix.
    Itoa {
        /// Value to format.
        #[arg(allow_negative_numbers = true)]
        value: Int,
        /// Radix between 2 and 36.
        #[arg(short, long, default_value_t = 10, allow_negative_numbers = true)]
        radix: Int,
    },
    /// Parse a digit string in the given radix and print it in decimal.
    Atoi {
        /// Digits to parse, optionally prefixed with '-'.
        #[arg(allow_hyphen_values = true)]
        digits: String,
        /// Radix between 2 and 36.
        #[arg(short, long, default_value_t = 10, allow_negative_numbers = true)]
        radix: Int,
    },
    /// Compare two strings and print `true` or `false`.
    Eq {
        /// Left operand.
        #[arg(allow_hyphen_values = true)]
        left: String,
        /// Right operand.
        #[arg(allow_hyphen_values = true)]
        right: String,
    },
    /// Copy standard input to standard output line by line.
    Echo,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = load_config(cli.config.as_deref(), cli.max_line)?;
    debug!(?config, "runtime configuration");
    let mut console = Console::stdio(config);

    match cli.command {
        Commands::Itoa { value, radix } => itoa(&mut console, value, radix)?,
        Commands::Atoi { digits, radix } => atoi(&mut console, &digits, radix)?,
        Commands::Eq { left, right } => eq(&mut console, &left, &right)?,
        Commands::Echo => echo(&mut console)?,
    }
    console.flush()?;
    Ok(())
}

fn load_config(path: Option<&Path>, max_line: Option<usize>) -> anyhow::Result<RuntimeConfig> {
    let mut config = match path {
        Some(path) => {
            let data = std::fs::read(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_slice(&data)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => RuntimeConfig::default(),
    };
    if let Some(limit) = max_line {
        config = config.with_max_line_length(limit);
    }
    Ok(config)
}

fn itoa(console: &mut StdConsole, value: Int, radix: Int) -> anyhow::Result<()> {
    let digits = int_to_string(value, radix)?;
    console.write_line(&digits)?;
    Ok(())
}

fn atoi(console: &mut StdConsole, digits: &str, radix: Int) -> anyhow::Result<()> {
    let value = string_to_int(&MangoString::from(digits), radix)?;
    console.write_line(&MangoString::from(value.to_string().as_str()))?;
    Ok(())
}

fn eq(console: &mut StdConsole, left: &str, right: &str) -> anyhow::Result<()> {
    let same = equals(&MangoString::from(left), &MangoString::from(right));
    console.write_line(&MangoString::from(if same { "true" } else { "false" }))?;
    Ok(())
}

fn echo(console: &mut StdConsole) -> anyhow::Result<()> {
    let mut lines = 0usize;
    while let Some(line) = console.next_line()? {
        console.write_line(&line)?;
        lines += 1;
    }
    info!(lines, "echo finished");
    Ok(())
}
