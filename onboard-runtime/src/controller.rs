//! Flow Controller
//!
//! Maps discrete user events (skip, next, back, indicator tap, drag
//! settle) onto sequence operations and notifies the host exactly once
//! when the flow finishes. Rendering is delegated to a [`PageView`]: the
//! controller decides WHAT is current, the view decides how it looks.

use tracing::{debug, info, warn};

use onboard_common::page::Page;
use onboard_common::sequence::{CompletionPolicy, PageSequence, SequenceError, Transition};

use crate::ui::PageView;

/// A discrete user gesture, already stripped of its UI origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FlowEvent {
    /// The skip control was tapped.
    SkipRequested,
    /// The advance (next / terminal) control was tapped.
    NextRequested,
    /// The back control was tapped.
    BackRequested,
    /// An indicator dot was tapped.
    IndicatorSelected(usize),
    /// A paging drag settled at this offset, in page widths. 1.0 means
    /// exactly on page 1; the nearest page wins.
    DragSettled(f32),
}

/// Drives one [`PageSequence`] on behalf of a host application.
///
/// The host registers at most one completion handler; it runs exactly
/// once per flow instance, whether the flow is skipped or finished via
/// the terminal action, no matter how events interleave afterwards.
pub struct FlowController<V: PageView> {
    sequence: PageSequence,
    view: V,
    on_finished: Option<Box<dyn FnOnce()>>,
}

impl<V: PageView> FlowController<V> {
    /// Build a controller over `pages`, positioned on the first page.
    pub fn new(
        pages: Vec<Page>,
        policy: CompletionPolicy,
        view: V,
    ) -> Result<Self, SequenceError> {
        Ok(Self {
            sequence: PageSequence::new(pages, policy)?,
            view,
            on_finished: None,
        })
    }

    /// Register the host's completion handler. Cardinality is one: a
    /// later registration replaces a handler that has not fired yet.
    pub fn on_finished(&mut self, handler: impl FnOnce() + 'static) {
        self.on_finished = Some(Box::new(handler));
    }

    /// Present the first page. Call once, after the handler is registered.
    pub fn start(&mut self) {
        self.render();
    }

    /// Feed one user event through the sequence.
    ///
    /// Events that arrive after completion are dropped; out-of-range
    /// navigation is rejected and dropped. Neither is an error to the
    /// caller - the flow simply does not move.
    pub fn handle(&mut self, event: FlowEvent) {
        match event {
            FlowEvent::SkipRequested => {
                let transition = self.sequence.skip();
                self.apply(Ok(transition));
            }
            FlowEvent::NextRequested => {
                let result = self.sequence.advance();
                self.apply(result);
            }
            FlowEvent::BackRequested => {
                let result = self.sequence.retreat();
                self.apply(result);
            }
            FlowEvent::IndicatorSelected(index) => {
                let result = self.sequence.jump_to(index);
                self.apply(result);
            }
            FlowEvent::DragSettled(offset) => self.drag_settled(offset),
        }
    }

    /// Whether the flow has finished.
    pub fn is_complete(&self) -> bool {
        self.sequence.is_complete()
    }

    /// The sequence being driven, for state queries.
    pub fn sequence(&self) -> &PageSequence {
        &self.sequence
    }

    /// The rendering collaborator.
    pub fn view(&self) -> &V {
        &self.view
    }

    fn drag_settled(&mut self, offset: f32) {
        let nearest = offset.round();
        if !(0.0..self.sequence.len() as f32).contains(&nearest) {
            warn!("drag settled outside the page range (offset {offset})");
            return;
        }
        let index = nearest as usize;
        if Some(index) != self.sequence.current_index() {
            let result = self.sequence.jump_to(index);
            self.apply(result);
        }
        // Settling on the last page reveals the terminal control, but a
        // drag never completes the flow by itself - only the explicit
        // terminal action does.
        if self.sequence.reveal_terminal() == Transition::TerminalReady {
            self.view.show_terminal_action();
        }
    }

    fn apply(&mut self, result: Result<Transition, SequenceError>) {
        match result {
            Ok(Transition::Moved { index }) => {
                debug!(page = index, "page changed");
                self.render();
            }
            Ok(Transition::TerminalReady) => self.view.show_terminal_action(),
            Ok(Transition::Completed) => self.finish(),
            Ok(Transition::Unchanged) => {}
            Err(SequenceError::SequenceComplete) => {
                debug!("ignoring event, flow already complete");
            }
            Err(err) => warn!("rejected navigation event: {err}"),
        }
    }

    fn render(&mut self) {
        let of = self.sequence.len();
        let terminal = self.sequence.terminal_visible();
        if let (Some(page), Some(index)) =
            (self.sequence.current_page(), self.sequence.current_index())
        {
            self.view.show_page(page, index, of, terminal);
        }
    }

    fn finish(&mut self) {
        info!("onboarding flow finished");
        if let Some(handler) = self.on_finished.take() {
            handler();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Records every render call instead of drawing anything.
    #[derive(Default)]
    struct RecordingView {
        shown: Vec<(usize, bool)>,
        terminal_signals: usize,
    }

    impl PageView for RecordingView {
        fn show_page(&mut self, _page: &Page, index: usize, _of: usize, terminal: bool) {
            self.shown.push((index, terminal));
        }

        fn show_terminal_action(&mut self) {
            self.terminal_signals += 1;
        }
    }

    fn three_pages() -> Vec<Page> {
        vec![
            Page::new("A", "", "", ""),
            Page::new("B", "", "", ""),
            Page::new("C", "", "", ""),
        ]
    }

    fn controller(policy: CompletionPolicy) -> FlowController<RecordingView> {
        FlowController::new(three_pages(), policy, RecordingView::default()).unwrap()
    }

    /// Wire a counting handler and return the counter.
    fn count_completions(ctl: &mut FlowController<RecordingView>) -> Rc<Cell<u32>> {
        let count = Rc::new(Cell::new(0));
        let seen = count.clone();
        ctl.on_finished(move || seen.set(seen.get() + 1));
        count
    }

    #[test]
    fn test_start_renders_first_page() {
        let mut ctl = controller(CompletionPolicy::OneStepTerminal);
        ctl.start();
        assert_eq!(ctl.view().shown, vec![(0, false)]);
    }

    #[test]
    fn test_next_advances_and_rerenders() {
        let mut ctl = controller(CompletionPolicy::OneStepTerminal);
        ctl.start();
        ctl.handle(FlowEvent::NextRequested);
        ctl.handle(FlowEvent::NextRequested);
        // The last render carries the terminal flag under one-step
        assert_eq!(ctl.view().shown, vec![(0, false), (1, false), (2, true)]);
        assert!(!ctl.is_complete());
    }

    #[test]
    fn test_skip_notifies_host_exactly_once() {
        let mut ctl = controller(CompletionPolicy::OneStepTerminal);
        let completions = count_completions(&mut ctl);
        ctl.start();
        ctl.handle(FlowEvent::SkipRequested);
        assert!(ctl.is_complete());
        assert_eq!(completions.get(), 1);
    }

    #[test]
    fn test_double_tap_skip_single_notification() {
        let mut ctl = controller(CompletionPolicy::OneStepTerminal);
        let completions = count_completions(&mut ctl);
        ctl.start();
        ctl.handle(FlowEvent::SkipRequested);
        ctl.handle(FlowEvent::SkipRequested);
        assert_eq!(completions.get(), 1);
    }

    #[test]
    fn test_skip_then_next_single_notification() {
        // Near-simultaneous skip + next taps must not double-notify
        let mut ctl = controller(CompletionPolicy::OneStepTerminal);
        let completions = count_completions(&mut ctl);
        ctl.start();
        ctl.handle(FlowEvent::SkipRequested);
        ctl.handle(FlowEvent::NextRequested);
        assert_eq!(completions.get(), 1);
    }

    #[test]
    fn test_one_step_advance_through_completes() {
        let mut ctl = controller(CompletionPolicy::OneStepTerminal);
        let completions = count_completions(&mut ctl);
        ctl.start();
        for _ in 0..3 {
            ctl.handle(FlowEvent::NextRequested);
        }
        assert!(ctl.is_complete());
        assert_eq!(completions.get(), 1);
    }

    #[test]
    fn test_two_step_relabel_then_complete() {
        let mut ctl = controller(CompletionPolicy::TwoStepTerminal);
        let completions = count_completions(&mut ctl);
        ctl.start();
        ctl.handle(FlowEvent::NextRequested); // -> 1
        ctl.handle(FlowEvent::NextRequested); // -> 2, control still "Next"
        assert_eq!(ctl.view().shown.last(), Some(&(2, false)));
        ctl.handle(FlowEvent::NextRequested); // reveals terminal control
        assert_eq!(ctl.view().terminal_signals, 1);
        assert_eq!(completions.get(), 0);
        ctl.handle(FlowEvent::NextRequested); // completes
        assert_eq!(completions.get(), 1);
    }

    #[test]
    fn test_indicator_jump_renders_target() {
        let mut ctl = controller(CompletionPolicy::OneStepTerminal);
        ctl.start();
        ctl.handle(FlowEvent::IndicatorSelected(2));
        ctl.handle(FlowEvent::IndicatorSelected(0));
        assert_eq!(ctl.view().shown, vec![(0, false), (2, true), (0, false)]);
    }

    #[test]
    fn test_indicator_out_of_range_is_dropped() {
        let mut ctl = controller(CompletionPolicy::OneStepTerminal);
        ctl.start();
        ctl.handle(FlowEvent::IndicatorSelected(3));
        assert_eq!(ctl.sequence().current_index(), Some(0));
        assert_eq!(ctl.view().shown.len(), 1); // no re-render
    }

    #[test]
    fn test_drag_settles_on_nearest_page() {
        let mut ctl = controller(CompletionPolicy::OneStepTerminal);
        ctl.start();
        ctl.handle(FlowEvent::DragSettled(1.4));
        assert_eq!(ctl.sequence().current_index(), Some(1));
        ctl.handle(FlowEvent::DragSettled(0.6));
        assert_eq!(ctl.sequence().current_index(), Some(1));
    }

    #[test]
    fn test_drag_settle_on_same_page_does_not_rerender() {
        let mut ctl = controller(CompletionPolicy::OneStepTerminal);
        ctl.start();
        ctl.handle(FlowEvent::DragSettled(0.2));
        assert_eq!(ctl.view().shown.len(), 1);
    }

    #[test]
    fn test_drag_settle_on_last_page_shows_terminal_action() {
        let mut ctl = controller(CompletionPolicy::OneStepTerminal);
        let completions = count_completions(&mut ctl);
        ctl.start();
        ctl.handle(FlowEvent::DragSettled(2.0));
        assert_eq!(ctl.sequence().current_index(), Some(2));
        assert!(!ctl.is_complete());
        assert_eq!(completions.get(), 0);
        assert_eq!(ctl.view().terminal_signals, 1);
    }

    #[test]
    fn test_drag_settle_arms_two_step_terminal() {
        // After scrolling onto the last page, one tap of the terminal
        // control finishes the flow even under two-step
        let mut ctl = controller(CompletionPolicy::TwoStepTerminal);
        let completions = count_completions(&mut ctl);
        ctl.start();
        ctl.handle(FlowEvent::DragSettled(2.0));
        assert_eq!(ctl.view().terminal_signals, 1);
        ctl.handle(FlowEvent::NextRequested);
        assert_eq!(completions.get(), 1);
    }

    #[test]
    fn test_drag_settle_out_of_range_is_dropped() {
        let mut ctl = controller(CompletionPolicy::OneStepTerminal);
        ctl.start();
        ctl.handle(FlowEvent::DragSettled(-1.0));
        ctl.handle(FlowEvent::DragSettled(3.2));
        ctl.handle(FlowEvent::DragSettled(f32::NAN));
        assert_eq!(ctl.sequence().current_index(), Some(0));
        assert_eq!(ctl.view().shown.len(), 1);
    }

    #[test]
    fn test_events_after_completion_are_inert() {
        let mut ctl = controller(CompletionPolicy::OneStepTerminal);
        let completions = count_completions(&mut ctl);
        ctl.start();
        ctl.handle(FlowEvent::SkipRequested);
        let renders = ctl.view().shown.len();
        ctl.handle(FlowEvent::NextRequested);
        ctl.handle(FlowEvent::BackRequested);
        ctl.handle(FlowEvent::IndicatorSelected(1));
        ctl.handle(FlowEvent::DragSettled(1.0));
        assert_eq!(completions.get(), 1);
        assert_eq!(ctl.view().shown.len(), renders);
    }

    #[test]
    fn test_back_retreats_and_stops_at_first_page() {
        let mut ctl = controller(CompletionPolicy::OneStepTerminal);
        ctl.start();
        ctl.handle(FlowEvent::NextRequested);
        ctl.handle(FlowEvent::BackRequested);
        assert_eq!(ctl.sequence().current_index(), Some(0));
        let renders = ctl.view().shown.len();
        ctl.handle(FlowEvent::BackRequested); // already first: no-op
        assert_eq!(ctl.view().shown.len(), renders);
    }
}
