//! UI Module - rendering frontends
//!
//! The flow core never draws anything itself. After each state change the
//! controller hands (page, position, control state) to a [`PageView`] and
//! the frontend takes it from there.

mod terminal;

pub use terminal::TerminalView;

use onboard_common::page::Page;

/// Rendering collaborator driven by the flow controller.
///
/// Implementations draw; they never mutate navigation state. Asset
/// problems (a missing image file, say) are theirs to report through a
/// log warning, not by steering the flow.
pub trait PageView {
    /// Show the page at `index` of `of`. `terminal` is true when the
    /// advance control should carry the terminal label ("Get started")
    /// instead of the plain one ("Next").
    fn show_page(&mut self, page: &Page, index: usize, of: usize, terminal: bool);

    /// Reveal or relabel the terminal control without a full page change,
    /// e.g. after a drag settles on the last page.
    fn show_terminal_action(&mut self);
}
