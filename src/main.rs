use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use ezconf::cli;
use ezconf::config::{Config, DocumentFormat};

#[derive(Parser)]
#[command(name = "ezconf", about = "Inspect tagged configuration and API search indexes")]
struct Cli {
    /// Write debug logs to /tmp/ezconf-debug.log (tail -f to inspect).
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List every tag in a YAML or JSON document with its path.
    Tags {
        file: PathBuf,
        /// Override the format detected from the file extension.
        #[arg(long, value_enum)]
        format: Option<FormatArg>,
    },
    /// Work with a generated `searchData` index file.
    Index {
        #[command(subcommand)]
        command: IndexCommand,
    },
}

#[derive(Subcommand)]
enum IndexCommand {
    /// Report structural violations; exits non-zero if any are found.
    Check { file: PathBuf },
    /// Print entries whose token starts with TERM.
    Query { file: PathBuf, term: String },
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Yaml,
    Json,
}

impl From<FormatArg> for DocumentFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Yaml => DocumentFormat::Yaml,
            FormatArg::Json => DocumentFormat::Json,
        }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let args = Cli::parse();

    if args.debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/ezconf-debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("ezconf debug log started, tail -f /tmp/ezconf-debug.log");
    }

    let config = Config::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "could not load config, using defaults");
        Config::defaults()
    });

    let mut stdout = std::io::stdout().lock();
    match args.command {
        Command::Tags { file, format } => {
            cli::tags(&file, format.map(Into::into), &config, &mut stdout)?;
        }
        Command::Index { command } => match command {
            IndexCommand::Check { file } => {
                if !cli::index_check(&file, &mut stdout)? {
                    return Ok(ExitCode::FAILURE);
                }
            }
            IndexCommand::Query { file, term } => {
                cli::index_query(&file, &term, &config, &mut stdout)?;
            }
        },
    }
    Ok(ExitCode::SUCCESS)
}
