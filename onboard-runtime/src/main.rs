//! Onboard Runtime - terminal onboarding flow player
//!
//! This is the runner entry point. It handles:
//! 1. CLI argument parsing (--auto, --policy, etc.)
//! 2. Loading and validating the flow manifest
//! 3. Driving the flow controller until the completion handler fires

use anyhow::{Context, Result};
use clap::Parser;
use dialoguer::Select;
use std::cell::Cell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use onboard_common::config::FlowConfig;
use onboard_common::sequence::CompletionPolicy;
use onboard_runtime::controller::{FlowController, FlowEvent};
use onboard_runtime::ui::TerminalView;

/// Onboard Runtime - plays an onboarding flow in the terminal
#[derive(Parser, Debug)]
#[command(name = "onboard-runtime")]
#[command(about = "Terminal onboarding flow player")]
#[command(version)]
struct Args {
    /// Path to the flow manifest (default: ./onboard.toml)
    manifest: Option<PathBuf>,

    /// Play the flow unattended, advancing through every page
    #[arg(long)]
    auto: bool,

    /// Override the manifest's completion policy (one-step, two-step)
    #[arg(long, value_name = "POLICY")]
    policy: Option<String>,

    /// Suppress log output
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging - only if not in quiet mode
    if !args.quiet {
        let _ = FmtSubscriber::builder()
            .with_max_level(Level::INFO)
            .with_target(false)
            .without_time()
            .try_init();
    }

    let manifest = args
        .manifest
        .unwrap_or_else(|| PathBuf::from("onboard.toml"));
    let config = FlowConfig::from_file(&manifest)?;

    let base_dir = manifest
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."))
        .to_path_buf();
    config.validate(&base_dir)?;

    let policy = match args.policy.as_deref() {
        Some(s) => CompletionPolicy::parse(s)
            .with_context(|| format!("unknown policy '{s}' (expected 'one-step' or 'two-step')"))?,
        None => config.flow.policy,
    };

    info!(
        "{} ({} pages, {:?})",
        config.flow.name,
        config.pages.len(),
        policy
    );

    let view = TerminalView::new(config.flow.labels(), base_dir);
    let mut controller = FlowController::new(config.pages.clone(), policy, view)
        .context("cannot start the onboarding flow")?;

    // Single-shot completion notification back to "the host" - here, the
    // loop below. The handler flips a shared cell and the loop drains.
    let finished = Rc::new(Cell::new(false));
    let done = finished.clone();
    controller.on_finished(move || {
        done.set(true);
        println!();
        println!("✅ Onboarding finished. Over to the app!");
    });

    controller.start();

    if args.auto {
        while !finished.get() {
            controller.handle(FlowEvent::NextRequested);
        }
        return Ok(());
    }

    while !finished.get() {
        let advance_label = if controller.sequence().terminal_visible() {
            config.flow.finish_label.clone()
        } else {
            config.flow.next_label.clone()
        };

        let mut items = vec![advance_label, config.flow.skip_label.clone()];
        if config.flow.show_back {
            items.push("Back".to_string());
        }

        let choice = Select::new()
            .with_prompt("Navigate")
            .items(&items)
            .default(0)
            .interact()
            .context("navigation prompt failed")?;

        let event = match choice {
            0 => FlowEvent::NextRequested,
            1 => FlowEvent::SkipRequested,
            _ => FlowEvent::BackRequested,
        };
        controller.handle(event);
    }

    Ok(())
}
