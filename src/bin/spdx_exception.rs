//! Look up SPDX license exceptions from the command line.
//!
//! Usage:
//!   spdx-exception resolve "llvm exception"
//!   spdx-exception list --include-deprecated
//!   spdx-exception compat Classpath-exception-2.0
//!   spdx-exception text LLVM-exception
//!
//! JSON goes to stdout; diagnostics go to stderr.

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use spdx_exceptions::{
    DirectoryResources, ExceptionRegistry, LicenseException, ScanError, resource_root,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "spdx-exception")]
#[command(about = "Resolve SPDX license exceptions and print their compatibility and text")]
struct Cli {
    /// Resource directory holding exception-mapping.json and exceptions/.
    #[arg(long, global = true)]
    resources: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the catalog entry an identifier resolves to.
    Resolve { identifier: String },
    /// Print every catalog entry in declaration order.
    List {
        /// Include entries kept only for historical compatibility.
        #[arg(long)]
        include_deprecated: bool,
    },
    /// Print the licenses an exception may be appended to.
    Compat { identifier: String },
    /// Print the full legal text of an exception.
    Text { identifier: String },
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let root = cli.resources.clone().unwrap_or_else(resource_root);
    tracing::debug!(root = %root.display(), "reading license exception resources");
    let registry = ExceptionRegistry::with_builtin(DirectoryResources::new(root));

    match cli.command {
        Command::Resolve { identifier } => {
            let entry = lookup(&registry, &identifier)?;
            println!("{}", serde_json::to_string_pretty(entry)?);
        }
        Command::List { include_deprecated } => {
            let entries: Vec<&LicenseException> = registry
                .catalog()
                .iter()
                .filter(|entry| include_deprecated || !entry.deprecated)
                .collect();
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        Command::Compat { identifier } => {
            let entry = lookup(&registry, &identifier)?;
            let licenses = registry.compatible_licenses(entry).map_err(|err| {
                ScanError::with_message_and_cause(
                    format!("loading compatible licenses for {entry}"),
                    Some(Box::new(err)),
                )
            })?;
            println!("{}", serde_json::to_string_pretty(&licenses)?);
        }
        Command::Text { identifier } => {
            let entry = lookup(&registry, &identifier)?;
            let text = registry.text(entry).map_err(|err| {
                ScanError::with_message_and_cause(
                    format!("loading text for {entry}"),
                    Some(Box::new(err)),
                )
            })?;
            print!("{text}");
        }
    }
    Ok(())
}

fn lookup<'a>(registry: &'a ExceptionRegistry, identifier: &str) -> Result<&'a LicenseException> {
    let entry = registry
        .resolve(identifier)
        .ok_or_else(|| anyhow!("'{identifier}' is not an SPDX license exception"))?;
    if entry.deprecated {
        tracing::warn!(id = entry.id, "license exception id is deprecated");
    }
    Ok(entry)
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!(err.to_string()))
        .context("installing log subscriber");
    if let Err(err) = installed {
        eprintln!("{err:#}");
    }
}
