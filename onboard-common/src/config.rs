//! Flow Manifest Parser
//!
//! Parses onboard.toml files describing an onboarding flow: flow-wide
//! settings plus the ordered page list.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::page::Page;
use crate::sequence::CompletionPolicy;

/// The main configuration structure matching onboard.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowConfig {
    pub flow: FlowSettings,
    #[serde(default)]
    pub pages: Vec<Page>,
}

/// Flow-wide settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowSettings {
    /// Human-readable flow name, shown by the runner
    pub name: String,

    /// What an advance on the last page does ("one-step" or "two-step")
    #[serde(default)]
    pub policy: CompletionPolicy,

    /// Label of the skip control
    #[serde(default = "default_skip_label")]
    pub skip_label: String,

    /// Label of the advance control
    #[serde(default = "default_next_label")]
    pub next_label: String,

    /// Label of the terminal control
    #[serde(default = "default_finish_label")]
    pub finish_label: String,

    /// Offer backward navigation (default: false)
    #[serde(default)]
    pub show_back: bool,
}

/// Control labels a frontend puts on its navigation affordances
#[derive(Debug, Clone)]
pub struct ControlLabels {
    pub skip: String,
    pub next: String,
    pub finish: String,
}

fn default_skip_label() -> String {
    "Skip".to_string()
}

fn default_next_label() -> String {
    "Next".to_string()
}

fn default_finish_label() -> String {
    "Get started".to_string()
}

impl FlowSettings {
    /// Bundle the three control labels for a frontend
    pub fn labels(&self) -> ControlLabels {
        ControlLabels {
            skip: self.skip_label.clone(),
            next: self.next_label.clone(),
            finish: self.finish_label.clone(),
        }
    }
}

impl FlowConfig {
    /// Load configuration from a file path
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest: {}", path.display()))?;

        Self::from_str(&contents)
    }

    /// Load configuration from the current directory
    pub fn from_current_dir() -> Result<Self> {
        let config_path = std::env::current_dir()?.join("onboard.toml");

        if !config_path.exists() {
            anyhow::bail!(
                "No onboard.toml found in current directory.\n\
                 Run 'onboard init' to create one, or pass a manifest path"
            );
        }

        Self::from_file(&config_path)
    }

    /// Parse configuration from a TOML string
    pub fn from_str(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str).context("Failed to parse onboard.toml")
    }

    /// Validate the configuration
    ///
    /// An empty page list is fatal: the flow has nothing to show. A page
    /// image that does not resolve under `base_dir` is only warned about,
    /// since assets are a frontend concern and never block the flow.
    pub fn validate(&self, base_dir: &Path) -> Result<()> {
        if self.pages.is_empty() {
            anyhow::bail!(
                "Flow '{}' has no pages.\n\
                 Add at least one [[pages]] entry to onboard.toml.",
                self.flow.name
            );
        }

        for page in &self.pages {
            if !page.image.is_empty() && !base_dir.join(&page.image).exists() {
                tracing::warn!(
                    "image resource not found: {} (page '{}')",
                    page.image,
                    page.title
                );
            }
        }

        Ok(())
    }
}

/// Generate a template onboard.toml file
pub fn generate_template(name: &str) -> String {
    format!(
        r##"# Onboard Flow Manifest
# Documentation: https://github.com/onboard-core/onboard

[flow]
name = "{name}"

# What tapping the advance control on the last page does:
#   "one-step" - completes the flow immediately
#   "two-step" - first reveals the terminal control, the next tap completes
policy = "one-step"

# Control labels (defaults shown)
skip_label = "Skip"
next_label = "Next"
finish_label = "Get started"

# Offer backward navigation
show_back = false

[[pages]]
title = "What's new"
image = "img1.gif"
background = "#68C0F8"
description = "Login: a quick look at signing in and what changed since the last release."

[[pages]]
title = "Shopping Cart"
image = "img2.gif"
background = "#D0D0D0"
description = "Shopping Cart: collect items as you browse and review them in one place."

[[pages]]
title = "Payment"
image = "img3.gif"
background = "#B7DFC9"
description = "Payment: check out with a saved method, or add a new one on the fly."
"##,
        name = name,
    )
}
