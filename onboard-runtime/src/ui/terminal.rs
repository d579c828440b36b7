//! Terminal Frontend
//!
//! Draws each page as a plain-text card with indicator dots and the
//! current control labels. Stands in for the graphical frontends a host
//! application would bring.

use std::path::PathBuf;

use onboard_common::config::ControlLabels;
use onboard_common::page::Page;

use super::PageView;

/// Plain-text page renderer.
pub struct TerminalView {
    labels: ControlLabels,
    /// Directory image references are resolved against (the manifest's)
    asset_dir: PathBuf,
}

impl TerminalView {
    pub fn new(labels: ControlLabels, asset_dir: PathBuf) -> Self {
        Self { labels, asset_dir }
    }
}

impl PageView for TerminalView {
    fn show_page(&mut self, page: &Page, index: usize, of: usize, terminal: bool) {
        // Missing images are a log line, never a navigation problem
        if !page.image.is_empty() && !self.asset_dir.join(&page.image).exists() {
            tracing::warn!("image resource not found: {}", page.image);
        }

        let advance = if terminal {
            &self.labels.finish
        } else {
            &self.labels.next
        };

        println!();
        println!("  {}", page.title);
        if !page.image.is_empty() {
            println!("  [{}]  {}", page.image, page.background);
        } else if !page.background.is_empty() {
            println!("  {}", page.background);
        }
        if !page.description.is_empty() {
            println!();
            println!("  {}", page.description);
        }
        println!();
        println!(
            "  {}    [{}] [{}]",
            indicator_dots(index, of),
            advance,
            self.labels.skip
        );
    }

    fn show_terminal_action(&mut self) {
        println!();
        println!("  ▸ [{}]", self.labels.finish);
    }
}

/// Page indicator in the "● ○ ○" style
fn indicator_dots(index: usize, of: usize) -> String {
    (0..of)
        .map(|i| if i == index { "●" } else { "○" })
        .collect::<Vec<_>>()
        .join(" ")
}
