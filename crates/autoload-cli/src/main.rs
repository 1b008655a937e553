//! autoload: command-line front end for class-file resolution.
//!
//! This CLI assembles an autoloading strategy from `.autoload.toml` and
//! exposes it for:
//! - Resolving a class name to its source file (`resolve`)
//! - Resolving and loading the file through the runtime chain (`load`)
//! - Validating the configuration (`check`)

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use autoload::{Autoloader, Config, LoaderChain, SharedStrategy};

/// Exit codes for the CLI
///
/// - 0: Success
/// - 1: Not found (valid query, no results)
/// - 2: Error (invalid input, bad configuration, etc.)
mod exit_codes {
    pub const SUCCESS: u8 = 0;
    pub const NOT_FOUND: u8 = 1;
    pub const ERROR: u8 = 2;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

/// Class-file autoload resolution tool
#[derive(Parser)]
#[command(name = "autoload")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Suppress diagnostic output
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a class name to its source file without loading it
    Resolve {
        /// Fully qualified class name (e.g. "Vendor\Package\Thing")
        class: String,

        /// Project root holding .autoload.toml (defaults to current directory)
        #[arg(short, long, default_value = ".")]
        root: PathBuf,

        /// Strategy to build, overriding the configured one
        #[arg(long)]
        strategy: Option<String>,
    },

    /// Resolve a class name and load its file through the runtime chain
    Load {
        /// Fully qualified class name (e.g. "Vendor\Package\Thing")
        class: String,

        /// Project root holding .autoload.toml (defaults to current directory)
        #[arg(short, long, default_value = ".")]
        root: PathBuf,

        /// Strategy to build, overriding the configured one
        #[arg(long)]
        strategy: Option<String>,
    },

    /// Validate the configuration and report the registered mappings
    Check {
        /// Project root holding .autoload.toml (defaults to current directory)
        #[arg(short, long, default_value = ".")]
        root: PathBuf,
    },
}

#[derive(Serialize)]
struct Resolution<'a> {
    class: &'a str,
    path: Option<&'a Path>,
    loaded: bool,
}

#[derive(Serialize)]
struct ConfigReport {
    strategy: String,
    extension: String,
    fixed_classes: usize,
    psr0_prefixes: usize,
    psr4_prefixes: usize,
    pear_prefixes: usize,
    recursive_roots: usize,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if !cli.quiet {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_writer(std::io::stderr)
            .init();
    }

    match run(&cli) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::from(exit_codes::ERROR)
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode> {
    match &cli.command {
        Commands::Resolve {
            class,
            root,
            strategy,
        } => {
            let strategy = build_strategy(root, strategy.as_deref())?;
            let path = strategy.find_class_file(class);
            let found = path.is_some();

            report(
                cli.format,
                &Resolution {
                    class,
                    path: path.as_deref(),
                    loaded: false,
                },
            )?;
            Ok(not_found_exit(found))
        }

        Commands::Load {
            class,
            root,
            strategy,
        } => {
            let strategy = build_strategy(root, strategy.as_deref())?;
            let mut autoloader = Autoloader::new(LoaderChain::new());
            autoloader.set_strategy(strategy.clone());

            let loaded = autoloader.load_class(class);
            let path = strategy.find_class_file(class);

            report(
                cli.format,
                &Resolution {
                    class,
                    path: path.as_deref(),
                    loaded,
                },
            )?;
            Ok(not_found_exit(loaded))
        }

        Commands::Check { root } => {
            let config = Config::load(root);
            // Surfaces unknown strategy names before any lookup runs.
            config
                .build_strategy(root)
                .context("configuration does not build")?;

            report(
                cli.format,
                &ConfigReport {
                    strategy: config.strategy.clone(),
                    extension: config.conventions.extension.clone(),
                    fixed_classes: config.fixed.len(),
                    psr0_prefixes: config.psr0.len(),
                    psr4_prefixes: config.psr4.len(),
                    pear_prefixes: config.pear.len(),
                    recursive_roots: config.recursive.len(),
                },
            )?;
            Ok(ExitCode::from(exit_codes::SUCCESS))
        }
    }
}

fn build_strategy(root: &Path, override_name: Option<&str>) -> Result<SharedStrategy> {
    let mut config = Config::load(root);
    if let Some(name) = override_name {
        config.strategy = name.to_string();
    }
    tracing::debug!(root = %root.display(), strategy = %config.strategy, "building strategy");
    config
        .build_strategy(root)
        .with_context(|| format!("building `{}` strategy", config.strategy))
}

fn not_found_exit(found: bool) -> ExitCode {
    if found {
        ExitCode::from(exit_codes::SUCCESS)
    } else {
        ExitCode::from(exit_codes::NOT_FOUND)
    }
}

fn report<T: Serialize + TextReport>(format: OutputFormat, value: &T) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Text => value.print(),
    }
    Ok(())
}

/// Human-readable rendering for `--format text`.
trait TextReport {
    fn print(&self);
}

impl TextReport for Resolution<'_> {
    fn print(&self) {
        match self.path {
            Some(path) => {
                let verb = if self.loaded { "loaded" } else { "found" };
                println!("{}: {} ({verb})", self.class, path.display());
            }
            None => println!("{}: not found", self.class),
        }
    }
}

impl TextReport for ConfigReport {
    fn print(&self) {
        println!("strategy: {}", self.strategy);
        println!("extension: .{}", self.extension);
        println!("fixed classes: {}", self.fixed_classes);
        println!("psr0 prefixes: {}", self.psr0_prefixes);
        println!("psr4 prefixes: {}", self.psr4_prefixes);
        println!("pear prefixes: {}", self.pear_prefixes);
        println!("recursive roots: {}", self.recursive_roots);
    }
}
