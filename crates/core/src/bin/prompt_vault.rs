//! prompt-vault command-line entry point
//!
//! Thin driver over the command registry: argument parsing, file I/O and
//! printing live here, everything else in the library.

use std::{fs, path::PathBuf};

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use prompt_vault_core::{commands, config::VaultConfig, export::backup_file_name, logging, VaultStore};
use serde_json::Value;

#[derive(Debug, Parser)]
#[command(name = "prompt-vault", version, about = "Local prompt library with JSON import/export")]
struct Cli {
    /// SQLite file to use instead of the configured one
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run a registry command, e.g. `call prompts.list`
    Call {
        name: String,
        /// JSON arguments
        args: Option<String>,
    },
    /// List registry commands
    Commands,
    /// Write a backup document
    Export {
        /// Output file, defaults to promptvault-backup-<date>.json
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Validate and merge a backup document
    Import {
        file: PathBuf,
        /// Only show what would happen
        #[arg(long)]
        dry_run: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = VaultConfig::from_env().context("loading configuration")?;
    if let Some(path) = cli.data {
        config.data_path = path;
    }
    logging::init(&config.log_filter);

    match cli.command {
        Command::Commands => {
            for name in commands::list_commands() {
                println!("{}", name);
            }
        },
        Command::Call { name, args } => {
            let mut store = open_store(&config)?;
            let args: Value = match args {
                Some(text) => serde_json::from_str(&text).context("parsing command arguments")?,
                None => Value::Object(Default::default()),
            };
            let result = commands::call(&mut store, &name, args);
            println!("{}", serde_json::to_string_pretty(&result)?);
            if result.get("error") == Some(&Value::Bool(true)) {
                std::process::exit(1);
            }
        },
        Command::Export { out } => {
            let store = open_store(&config)?;
            let path = out.unwrap_or_else(|| PathBuf::from(backup_file_name(Utc::now())));
            let json = store.export().to_json_pretty()?;
            fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
            println!("Data exported to {}", path.display());
        },
        Command::Import { file, dry_run } => {
            let mut store = open_store(&config)?;
            let text = fs::read_to_string(&file).with_context(|| format!("reading {}", file.display()))?;
            let payload: Value = serde_json::from_str(&text).unwrap_or(Value::Null);
            let preview = store.preview_import(&payload);
            let validation = &preview.validation;

            println!("Valid prompts:   {}", validation.valid_prompts.len());
            println!("Invalid prompts: {}", validation.invalid_prompts.len());
            println!("New categories:  {}", preview.categories.len());
            for error in &validation.errors {
                println!("error:   {}", error);
            }
            for warning in &validation.warnings {
                println!("warning: {}", warning);
            }
            for invalid in &validation.invalid_prompts {
                let id = invalid.prompt.get("id").and_then(Value::as_str).unwrap_or("?");
                println!("invalid: {} ({})", id, invalid.errors.join("; "));
            }

            if dry_run {
                return Ok(());
            }
            if validation.valid_prompts.is_empty() {
                bail!("No valid prompts to import.");
            }
            let outcome = store.apply_import(&preview)?;
            println!("{}", outcome.message());
        },
    }

    Ok(())
}

fn open_store(config: &VaultConfig) -> Result<VaultStore> {
    VaultStore::open(config).with_context(|| format!("opening store at {}", config.data_path.display()))
}
