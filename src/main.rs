//! rocket — normalize model attribute descriptions for the scaffolding generators.
//!
//! Two subcommands:
//!
//! - **attributes**: `rocket attributes post.txt` (or lines on stdin) prints
//!   the normalized attribute set, after a preview the user confirms
//! - **pivot**: `rocket pivot Place Tag --column amount` prints the join table
//!   name and its attribute set

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use fibers_rocket::line::input_lines;
use fibers_rocket::pivot::build_pivot;
use fibers_rocket::render::{self, table::TableRenderer, Renderer};
use fibers_rocket::{build_set, AttributeSet, EmptyRegistry, ModelRegistry, StaticRegistry};
use heck::ToTitleCase;
use std::fs;
use std::io::{self, BufRead, Read, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "rocket",
    about = "Normalize model attribute descriptions for the scaffolding generators",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Model registry (JSON list of known models)
    #[arg(short = 'm', long, env = "ROCKET_MODELS", global = true)]
    models: Option<PathBuf>,

    /// Output format: json (default), table
    #[arg(short = 'f', long, default_value = "json", global = true)]
    format: String,

    /// More log output (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse attribute lines, one per line; `:q` ends the input
    Attributes {
        /// Input file. If omitted, reads from stdin.
        file: Option<PathBuf>,

        /// What the attributes are for (used in error messages)
        #[arg(short = 't', long, default_value = "model")]
        title: String,

        /// Skip the preview and confirmation
        #[arg(short = 's', long)]
        silent: bool,

        /// Show the preview but do not ask for confirmation
        #[arg(short = 'y', long)]
        yes: bool,
    },
    /// Describe the pivot table between two models
    Pivot {
        first: String,
        second: String,

        /// Extra pivot column (repeatable). Defaults to the pivot columns the
        /// registered models declare on each other.
        #[arg(short = 'c', long = "column")]
        columns: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let registry = load_registry(cli.models.as_deref())?;
    let renderer = render::create_renderer(&cli.format)?;

    match cli.command {
        Commands::Attributes {
            file,
            title,
            silent,
            yes,
        } => {
            let input = read_input(file.as_deref())?;
            let lines = input_lines(&input);
            log::info!("read {} attribute line(s)", lines.len());

            let set = build_set(&title, &lines, &*registry)?;
            let dropped = lines
                .iter()
                .filter(|l| !l.trim().is_empty())
                .count()
                .saturating_sub(set.len());
            if dropped > 0 {
                log::warn!("{} line(s) produced no attribute or were overwritten", dropped);
            }

            if !silent {
                let ask = !yes && file.is_some();
                if !yes && file.is_none() {
                    log::warn!("attributes read from stdin, confirmation skipped");
                }
                if !preview_and_confirm(&title, &set, ask)? {
                    bail!("aborted: attributes not confirmed");
                }
            }
            print!("{}", renderer.render(&set)?);
        }
        Commands::Pivot {
            first,
            second,
            columns,
        } => {
            if columns.is_empty() {
                log::debug!("no --column given, using pivot columns declared in the registry");
            }
            let (table, set) = build_pivot(&*registry, &first, &second, &columns)?;
            log::info!("pivot table {} with {} attribute(s)", table, set.len());
            println!("{}", table);
            print!("{}", renderer.render(&set)?);
        }
    }
    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .try_init();
}

/// Load the model registry, or an empty one when no path is configured.
fn load_registry(path: Option<&Path>) -> Result<Box<dyn ModelRegistry>> {
    match path {
        Some(path) => {
            let registry = StaticRegistry::load(path)?;
            log::info!("loaded {} model(s) from {}", registry.len(), path.display());
            Ok(Box::new(registry))
        }
        None => {
            log::debug!("no model registry configured");
            Ok(Box::new(EmptyRegistry))
        }
    }
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => {
            log::debug!("reading attributes from {}", path.display());
            fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
        }
        None => {
            log::debug!("reading attributes from stdin");
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("failed to read stdin")?;
            Ok(input)
        }
    }
}

/// Print the preview to stderr and ask whether to continue. Answering
/// anything but yes (or just Enter) declines.
fn preview_and_confirm(title: &str, set: &AttributeSet, ask: bool) -> Result<bool> {
    let mut stderr = io::stderr().lock();
    writeln!(
        stderr,
        "\n {} will be created with following attributes:\n",
        title.to_title_case()
    )?;
    write!(stderr, "{}", TableRenderer.render(set)?)?;

    if !ask {
        return Ok(true);
    }

    write!(stderr, "Do you want to continue? [Y/n] ")?;
    stderr.flush()?;
    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("failed to read confirmation")?;
    Ok(matches!(
        answer.trim().to_lowercase().as_str(),
        "" | "y" | "yes"
    ))
}
