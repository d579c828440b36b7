//! Onboard CLI - onboarding flow authoring tool
//!
//! Usage:
//!   onboard init                 Create a template onboard.toml (interactive)
//!   onboard validate [MANIFEST]  Parse and validate a flow manifest
//!   onboard inspect [MANIFEST]   Show the parsed flow (--json for JSON)

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dialoguer::{Confirm, Input};
use std::fs;
use std::path::{Path, PathBuf};

use onboard_common::config::{self, FlowConfig};

#[derive(Parser)]
#[command(name = "onboard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Onboard - onboarding flow authoring tool")]
struct Cli {
    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    silent: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a template onboard.toml in the current directory (interactive)
    Init {
        /// Accept all defaults without prompts
        #[arg(short, long)]
        yes: bool,
    },

    /// Parse and validate a flow manifest
    Validate {
        /// Path to onboard.toml (default: ./onboard.toml)
        manifest: Option<PathBuf>,
    },

    /// Show the parsed flow
    Inspect {
        /// Path to onboard.toml (default: ./onboard.toml)
        manifest: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Init { yes } => cmd_init(yes, cli.silent),
        Commands::Validate { manifest } => cmd_validate(manifest, cli.silent),
        Commands::Inspect { manifest, json } => cmd_inspect(manifest, json),
    }
}

fn cmd_init(yes: bool, silent: bool) -> Result<()> {
    let target = PathBuf::from("onboard.toml");

    if target.exists() && !yes {
        let overwrite = Confirm::new()
            .with_prompt("onboard.toml already exists. Overwrite?")
            .default(false)
            .interact()?;
        if !overwrite {
            println!("Keeping the existing onboard.toml.");
            return Ok(());
        }
    }

    let name: String = if yes {
        "My App".to_string()
    } else {
        Input::new()
            .with_prompt("Flow name")
            .default("My App".to_string())
            .interact_text()?
    };

    fs::write(&target, config::generate_template(&name))
        .with_context(|| format!("Failed to write {}", target.display()))?;

    if !silent {
        println!("✅ Created onboard.toml with three demo pages.");
        println!("   Try it: onboard-runtime onboard.toml");
    }
    Ok(())
}

fn cmd_validate(manifest: Option<PathBuf>, silent: bool) -> Result<()> {
    let (config, base_dir) = load(manifest)?;
    config.validate(&base_dir)?;

    if !silent {
        println!("✅ {} is a valid flow", config.flow.name);
        println!("   Pages:  {}", config.pages.len());
        println!("   Policy: {:?}", config.flow.policy);
    }
    Ok(())
}

fn cmd_inspect(manifest: Option<PathBuf>, json: bool) -> Result<()> {
    let (config, _) = load(manifest)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    println!("Flow: {} ({:?})", config.flow.name, config.flow.policy);
    println!(
        "Controls: [{}] [{}] [{}]",
        config.flow.next_label, config.flow.skip_label, config.flow.finish_label
    );
    for (i, page) in config.pages.iter().enumerate() {
        println!();
        println!("  {}. {}", i + 1, page.title);
        if !page.image.is_empty() {
            println!("     image: {} ({})", page.image, page.background);
        }
        if !page.description.is_empty() {
            println!("     {}", page.description);
        }
    }
    Ok(())
}

fn load(manifest: Option<PathBuf>) -> Result<(FlowConfig, PathBuf)> {
    match manifest {
        Some(path) => {
            let config = FlowConfig::from_file(&path)?;
            let base = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."))
                .to_path_buf();
            Ok((config, base))
        }
        None => Ok((FlowConfig::from_current_dir()?, PathBuf::from("."))),
    }
}
