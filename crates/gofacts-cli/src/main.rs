//! gofacts: Go source facts for editor code generation.
//!
//! This CLI parses a single Go file and prints what it declares as JSON:
//! - The whole file model (package, imports, structs, interfaces, functions)
//! - The struct enclosing a given line
//! - An interface by name
//! - Imports grouped into standard library, third-party and local packages

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gofacts::{
    dump, find_module_path, group_imports, interface_by_name, parse_file, struct_at_line, Config,
    FileModel,
};
use serde::Serialize;

/// Exit codes for the CLI
///
/// - 0: Success
/// - 1: Any failure (unreadable file, syntax error, nothing found, bad arguments)
mod exit_codes {
    pub const ERROR: u8 = 1;
}

/// Go source analysis for editor code generation
#[derive(Parser)]
#[command(name = "gofacts")]
#[command(author, version = env!("GOFACTS_VERSION"), about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Emit single-line JSON instead of indented output
    #[arg(long, global = true)]
    compact: bool,

    /// Configuration file (defaults to .gofacts.toml in the current directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a Go file and print its full model
    Parse {
        /// Go source file
        file: PathBuf,
    },

    /// Print the struct declared around a line
    Struct {
        /// Go source file
        file: PathBuf,

        /// 1-based line number inside the struct declaration
        line: u32,
    },

    /// Print an interface by name
    Interface {
        /// Go source file
        file: PathBuf,

        /// Interface name (case-sensitive)
        name: String,
    },

    /// Print imports grouped into standard, third-party and local packages
    Imports {
        /// Go source file
        file: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => return report_usage(e),
    };

    // Initialize logging; stdout is reserved for JSON
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(exit_codes::ERROR)
        }
    }
}

/// Help and version requests succeed; every other argument problem is a usage error.
fn report_usage(error: clap::Error) -> ExitCode {
    use clap::error::ErrorKind;

    match error.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            let _ = error.print();
            ExitCode::SUCCESS
        }
        ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand | ErrorKind::MissingSubcommand => {
            eprintln!("Error: missing command\n\n{}", error.render());
            ExitCode::from(exit_codes::ERROR)
        }
        _ => {
            eprintln!("Error: {}", usage_message(&error));
            ExitCode::from(exit_codes::ERROR)
        }
    }
}

/// First line of clap's rendered error, without its own `error:` prefix.
fn usage_message(error: &clap::Error) -> String {
    let rendered = error.render().to_string();
    let first = rendered
        .lines()
        .find(|line| !line.trim().is_empty())
        .unwrap_or("invalid arguments");
    first.trim_start_matches("error:").trim().to_string()
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load_file(path),
        None => Config::load(&std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))),
    };

    match cli.command {
        Commands::Parse { file } => cmd_parse(&file, &config, cli.compact),
        Commands::Struct { file, line } => cmd_struct(&file, line, &config, cli.compact),
        Commands::Interface { file, name } => cmd_interface(&file, &name, &config, cli.compact),
        Commands::Imports { file } => cmd_imports(&file, &config, cli.compact),
    }
}

fn load_model(file: &Path, config: &Config) -> Result<FileModel> {
    parse_file(file, config).context("parsing file")
}

/// Print the whole file model
fn cmd_parse(file: &Path, config: &Config, compact: bool) -> Result<()> {
    let model = load_model(file, config)?;
    emit(dump(&model), compact)
}

/// Print the struct whose declaration contains `line`
fn cmd_struct(file: &Path, line: u32, config: &Config, compact: bool) -> Result<()> {
    let model = load_model(file, config)?;
    let record = struct_at_line(&model, line)?;
    emit(record, compact)
}

/// Print the interface called `name`
fn cmd_interface(file: &Path, name: &str, config: &Config, compact: bool) -> Result<()> {
    let model = load_model(file, config)?;
    let record = interface_by_name(&model, name)?;
    emit(record, compact)
}

/// Print imports grouped relative to the enclosing Go module
fn cmd_imports(file: &Path, config: &Config, compact: bool) -> Result<()> {
    let model = load_model(file, config)?;

    let file = file
        .canonicalize()
        .context("Failed to resolve file path")?;
    let module = file.parent().and_then(find_module_path);
    if module.is_none() {
        tracing::debug!("No go.mod found above {:?}", file);
    }

    let groups = group_imports(&model, module.as_deref());
    emit(&groups, compact)
}

fn emit<T: Serialize + ?Sized>(value: &T, compact: bool) -> Result<()> {
    let json = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    println!("{}", json);
    Ok(())
}
