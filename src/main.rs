use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use barrelsplit::{collect_source_files, transform_files, Config};

#[derive(Parser)]
#[command(name = "barrelsplit")]
#[command(author = "Zachary Woods <143150513+zach-fau@users.noreply.github.com>")]
#[command(version)]
#[command(about = "Rewrites barrel imports of utility libraries into per-function imports", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Transform source files or directories
    Transform {
        /// Files or directories to transform
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Module to watch (repeatable); replaces the configured list
        #[arg(short, long = "watch", value_name = "MODULE")]
        watch: Vec<String>,

        /// Path to a JSON config file
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Rewrite files in place
        #[arg(long, conflicts_with = "check")]
        write: bool,

        /// Exit with an error if any file would change
        #[arg(long)]
        check: bool,
    },
    /// Show version information
    Version,
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "barrelsplit=debug"
    } else {
        "barrelsplit=info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&PathBuf>, watch: Vec<String>) -> Result<Config> {
    let config = match path {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => {
            let cwd = std::env::current_dir().context("Failed to read working directory")?;
            Config::discover(&cwd).context("Failed to load config")?
        }
    };
    Ok(config.with_watched_modules(watch))
}

fn run_transform(
    paths: &[PathBuf],
    watch: Vec<String>,
    config: Option<&PathBuf>,
    write: bool,
    check: bool,
) -> Result<ExitCode> {
    let config = load_config(config, watch)?;
    let watched = config.watched().context("Invalid configuration")?;
    info!(modules = ?watched.iter().collect::<Vec<_>>(), "watching modules");

    let files = collect_source_files(paths);
    let print_headers = files.len() > 1;
    let mut failed = false;
    let mut changed = 0usize;

    for (path, result) in transform_files(&files, &watched) {
        let outcome = match result {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(path = %path.display(), "{}", e);
                failed = true;
                continue;
            }
        };

        if outcome.changed() {
            changed += 1;
        }

        if check {
            if outcome.changed() {
                println!("{}", path.display());
            }
        } else if write {
            if outcome.changed() {
                outcome
                    .write()
                    .with_context(|| format!("Failed to write {}", path.display()))?;
            }
        } else {
            if print_headers {
                println!("// {}", path.display());
            }
            print!("{}", outcome.output);
            if !outcome.output.ends_with('\n') {
                println!();
            }
        }
    }

    info!(files = files.len(), changed, "done");

    if failed || (check && changed > 0) {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Some(Commands::Transform {
            paths,
            watch,
            config,
            write,
            check,
        }) => run_transform(&paths, watch, config.as_ref(), write, check),
        Some(Commands::Version) => {
            println!("barrelsplit v{}", env!("CARGO_PKG_VERSION"));
            Ok(ExitCode::SUCCESS)
        }
        None => {
            println!("barrelsplit - barrel import splitter");
            println!("Run 'barrelsplit transform <paths>' to rewrite imports");
            println!("Run 'barrelsplit --help' for more information");
            Ok(ExitCode::SUCCESS)
        }
    }
}
