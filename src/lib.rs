//! symload: lazy symbol resolution for embedded script runtimes.
//!
//! When a host runtime meets a type name it has not seen yet, it hands the
//! name to a resolution hook. symload maps that name onto a source file by
//! naming convention, asks the host to include the file once, and reports
//! whether the symbol is now defined.
//!
//! # Naming convention
//!
//! - `\` and `_` both separate path segments (`App\Db\Adapter`, `Zend_Db_Table`).
//! - The top-level namespace (`App`) and the plugin segment (`Plugins`) are
//!   stripped from the front of the path, once each, in that order.
//! - The bare top-level name maps to a file named after the system.
//!
//! # Search order
//!
//! - Plugin symbols try the plugins root first, core symbols the core root.
//! - Any name carrying the own namespace marker then walks both own roots,
//!   truncating the path one segment at a time, to find files that declare
//!   several symbols.
//! - Everything else gets one attempt under the vendor root.
//!
//! # Embedding
//!
//! ```ignore
//! let loader = Loader::new(LoaderConfig::for_root("/srv/app"))?;
//! let mut hooks = HookStack::new();
//! hook::install(&mut hooks, loader);
//! // later, from the runtime's unknown-type path:
//! hooks.dispatch(&runtime, "App\\Plugins\\Live\\Visitor")?;
//! ```
//!
//! # Crate Structure
//!
//! - [`core`]: naming convention, classification, dispatcher, hook chain and
//!   the [`core::host::SymbolHost`] seam.
//! - `cli`: the `symload` binary's argument types.

pub mod core;
mod cli;

use crate::cli::{Cli, Command, OutputFormat};
use crate::core::config::LoaderConfig;
use crate::core::envelope::{Envelope, Status};
use crate::core::error::LoadError;
use crate::core::family::Family;
use crate::core::loader::{Attempt, Loader};
use crate::core::probe;

use clap::Parser;
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

pub use crate::core::hook::{HookOutcome, HookStack, ResolverRegistry, SymbolHook, install};
pub use crate::core::host::{SymbolHost, SymbolTable};
pub use crate::core::namespace::{CandidatePath, Namespace};

fn init_tracing(verbose: bool) {
    let default = if verbose { "symload=debug" } else { "symload=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    // A subscriber may already be installed when embedded; keep the existing one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn build_loader(root: Option<PathBuf>, config: Option<PathBuf>) -> Result<Loader, LoadError> {
    let config = match (config, root) {
        (Some(path), root) => {
            let mut config = LoaderConfig::load(&path)?;
            if let Some(root) = root {
                config.install_root = root;
            }
            config
        }
        (None, Some(root)) => LoaderConfig::discover(&root)?,
        (None, None) => LoaderConfig::discover(&std::env::current_dir()?)?,
    };
    Loader::new(config)
}

#[derive(Serialize)]
struct ResolvedName {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Serialize)]
struct ClassifiedName {
    name: String,
    family: Family,
    own_marker: bool,
}

#[derive(Serialize)]
struct PlanBody<'a> {
    name: &'a str,
    family: Family,
    path: String,
    attempts: &'a [Attempt],
}

#[derive(Serialize)]
struct LocateBody<'a> {
    name: &'a str,
    file: Option<String>,
}

pub fn run() -> Result<(), LoadError> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Command::Version = cli.command {
        println!("v{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let loader = build_loader(cli.root, cli.config)?;

    match cli.command {
        Command::Version => Ok(()),
        Command::Resolve { names, format } => run_resolve(&loader, &names, format.format),
        Command::Classify { names, format } => {
            run_classify(&loader, &names, format.format);
            Ok(())
        }
        Command::Plan { name, format } => run_plan(&loader, &name, format.format),
        Command::Locate { name, format } => run_locate(&loader, &name, format.format),
    }
}

fn run_resolve(loader: &Loader, names: &[String], format: OutputFormat) -> Result<(), LoadError> {
    let results: Vec<ResolvedName> = names
        .iter()
        .map(|name| match loader.resolve(name) {
            Ok(path) => ResolvedName {
                name: name.clone(),
                path: Some(path.to_string()),
                error: None,
            },
            Err(e) => ResolvedName {
                name: name.clone(),
                path: None,
                error: Some(e.to_string()),
            },
        })
        .collect();

    let invalid: Vec<&str> = results
        .iter()
        .filter(|r| r.error.is_some())
        .map(|r| r.name.as_str())
        .collect();

    match format {
        OutputFormat::Json => {
            let status = if invalid.is_empty() { Status::Ok } else { Status::Error };
            let body = serde_json::json!({ "results": results });
            println!("{}", Envelope::new("resolve", status, body).to_json());
        }
        OutputFormat::Text => {
            for r in &results {
                match (&r.path, &r.error) {
                    (Some(path), _) => println!("{} {} {}", r.name, "→".bright_cyan(), path),
                    (None, Some(error)) => println!("{} {} {}", r.name, "✗".bright_red(), error),
                    (None, None) => {}
                }
            }
        }
    }

    if invalid.is_empty() {
        Ok(())
    } else {
        Err(LoadError::InvalidName(invalid.join(", ")))
    }
}

fn run_classify(loader: &Loader, names: &[String], format: OutputFormat) {
    let results: Vec<ClassifiedName> = names
        .iter()
        .map(|name| ClassifiedName {
            name: name.clone(),
            family: loader.classify(name),
            own_marker: loader.namespace().has_own_marker(name),
        })
        .collect();

    match format {
        OutputFormat::Json => {
            let body = serde_json::json!({ "results": results });
            println!("{}", Envelope::new("classify", Status::Ok, body).to_json());
        }
        OutputFormat::Text => {
            for r in &results {
                let marker = if r.own_marker { " (own namespace)" } else { "" };
                println!("{} {} {}{}", r.name, "→".bright_cyan(), r.family, marker.dimmed());
            }
        }
    }
}

fn run_plan(loader: &Loader, name: &str, format: OutputFormat) -> Result<(), LoadError> {
    let path = loader.resolve(name)?;
    let family = loader.classify(name);
    let attempts = probe::plan(loader, name)?;
    let any_exists = attempts.iter().any(|a| a.existed);

    match format {
        OutputFormat::Json => {
            let status = if any_exists { Status::Ok } else { Status::Miss };
            let body = PlanBody {
                name,
                family,
                path: path.to_string(),
                attempts: &attempts,
            };
            println!("{}", Envelope::new("plan", status, body).to_json());
        }
        OutputFormat::Text => {
            println!(
                "{} {} ({} {} {})",
                "plan".bold(),
                name.bright_white(),
                family,
                "→".bright_cyan(),
                path
            );
            for (i, attempt) in attempts.iter().enumerate() {
                let state = if attempt.existed {
                    "exists".bright_green()
                } else {
                    "missing".dimmed()
                };
                println!(
                    "  {:>2}. {:<8} {}  {}",
                    i + 1,
                    attempt.root.to_string(),
                    attempt.file.display(),
                    state
                );
            }
        }
    }
    Ok(())
}

fn run_locate(loader: &Loader, name: &str, format: OutputFormat) -> Result<(), LoadError> {
    let found = probe::locate(loader, name)?;

    match format {
        OutputFormat::Json => {
            let status = if found.is_some() { Status::Ok } else { Status::Miss };
            let body = LocateBody {
                name,
                file: found.as_ref().map(|f| f.display().to_string()),
            };
            println!("{}", Envelope::new("locate", status, body).to_json());
        }
        OutputFormat::Text => {
            if let Some(file) = &found {
                println!("{}", file.display());
            }
        }
    }

    match found {
        Some(_) => Ok(()),
        None => Err(LoadError::NotFound(format!("no source file for {}", name))),
    }
}
