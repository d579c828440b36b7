//! Page Sequence State Machine
//!
//! Deterministic bookkeeping of "which page is current" and "is the flow
//! done". This is pure logic: no rendering, no timers, no I/O. The
//! controller in onboard-runtime feeds it one user event at a time and
//! acts on the returned transition.
//!
//! Index transitions:
//! ```text
//!   [0] ──advance──► [1] ──advance──► ... ──advance──► [last]
//!    ▲                │                                  │
//!    └────retreat─────┘          one-step: advance ──────┼──► Complete
//!                                two-step: advance ──► armed ──advance──► Complete
//!
//!   jump_to(i)  moves to any in-range index, forward or backward
//!   skip        completes immediately from any index
//! ```
//! `Complete` is terminal and monotonic: it is entered at most once and no
//! operation leaves it.

use serde::{Deserialize, Serialize};

use crate::page::Page;

/// What happens when the user advances while already on the last page.
///
/// The two policies model the two control styles onboarding screens use:
/// a button whose label flips to the terminal action one tap before it
/// fires, or a button that fires immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CompletionPolicy {
    /// Advancing on the last page completes the flow immediately.
    #[default]
    #[serde(rename = "one-step")]
    OneStepTerminal,

    /// Advancing on the last page first reveals the terminal control
    /// ("Get started"); only the advance after that completes the flow.
    #[serde(rename = "two-step")]
    TwoStepTerminal,
}

impl CompletionPolicy {
    /// Parse the manifest spelling of a policy.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "one-step" => Some(Self::OneStepTerminal),
            "two-step" => Some(Self::TwoStepTerminal),
            _ => None,
        }
    }
}

/// Errors rejected at the sequence boundary.
///
/// None of these are retried: an invalid configuration is fatal at
/// construction, the other two mean "drop the event".
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SequenceError {
    /// The flow was constructed with no pages - there is nothing to show.
    #[error("onboarding flow has no pages")]
    InvalidConfiguration,

    /// An explicit jump target outside the page range.
    #[error("page index {index} out of range (flow has {len} pages)")]
    IndexOutOfRange { index: usize, len: usize },

    /// An operation arrived after the flow completed. The flow is inert.
    #[error("onboarding flow already complete")]
    SequenceComplete,
}

/// The observable effect of a successful sequence operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The current page changed; the frontend should show the page at
    /// this index.
    Moved { index: usize },

    /// The terminal control must be shown or relabeled. Not complete yet.
    TerminalReady,

    /// The flow finished. A sequence produces this at most once, ever.
    Completed,

    /// Nothing observable changed.
    Unchanged,
}

/// Ordered pages plus the current index and completion flag.
///
/// Owned by exactly one controller and mutated only in response to
/// discrete user events. Invariant while active: `current < pages.len()`.
/// Once complete, the index is no longer meaningful and the index/page
/// accessors return `None`.
#[derive(Debug, Clone)]
pub struct PageSequence {
    pages: Vec<Page>,
    policy: CompletionPolicy,
    current: usize,
    /// Two-step bookkeeping: the terminal control has been revealed and
    /// the next advance completes the flow. True only on the last page.
    terminal_armed: bool,
    complete: bool,
}

impl PageSequence {
    /// Create a sequence positioned on the first page.
    ///
    /// Fails with [`SequenceError::InvalidConfiguration`] when `pages` is
    /// empty: a flow with no pages cannot start.
    pub fn new(pages: Vec<Page>, policy: CompletionPolicy) -> Result<Self, SequenceError> {
        if pages.is_empty() {
            return Err(SequenceError::InvalidConfiguration);
        }
        Ok(Self {
            pages,
            policy,
            current: 0,
            terminal_armed: false,
            complete: false,
        })
    }

    /// Move forward one page, or resolve the last page per the policy.
    pub fn advance(&mut self) -> Result<Transition, SequenceError> {
        if self.complete {
            return Err(SequenceError::SequenceComplete);
        }
        if !self.is_on_last_page() {
            self.current += 1;
            return Ok(Transition::Moved {
                index: self.current,
            });
        }
        match self.policy {
            CompletionPolicy::OneStepTerminal => {
                self.complete = true;
                Ok(Transition::Completed)
            }
            CompletionPolicy::TwoStepTerminal if !self.terminal_armed => {
                self.terminal_armed = true;
                Ok(Transition::TerminalReady)
            }
            CompletionPolicy::TwoStepTerminal => {
                self.complete = true;
                Ok(Transition::Completed)
            }
        }
    }

    /// Move back one page. A no-op on the first page.
    pub fn retreat(&mut self) -> Result<Transition, SequenceError> {
        if self.complete {
            return Err(SequenceError::SequenceComplete);
        }
        if self.current == 0 {
            return Ok(Transition::Unchanged);
        }
        self.current -= 1;
        self.terminal_armed = false;
        Ok(Transition::Moved {
            index: self.current,
        })
    }

    /// Set the index directly. Absolute, not relative: supports
    /// non-adjacent jumps in both directions.
    pub fn jump_to(&mut self, index: usize) -> Result<Transition, SequenceError> {
        if self.complete {
            return Err(SequenceError::SequenceComplete);
        }
        if index >= self.pages.len() {
            return Err(SequenceError::IndexOutOfRange {
                index,
                len: self.pages.len(),
            });
        }
        self.current = index;
        // Moving resets the armed control; reveal_terminal re-arms it when
        // the landing spot warrants.
        self.terminal_armed = false;
        Ok(Transition::Moved { index })
    }

    /// Complete the flow from any index. Idempotent: the first call
    /// completes, later calls are no-ops rather than errors.
    pub fn skip(&mut self) -> Transition {
        if self.complete {
            return Transition::Unchanged;
        }
        self.complete = true;
        Transition::Completed
    }

    /// Reveal the terminal control without advancing, e.g. after a drag
    /// settles on the last page. A no-op unless the sequence is active,
    /// on the last page, and the control is not already revealed.
    pub fn reveal_terminal(&mut self) -> Transition {
        if self.complete || !self.is_on_last_page() || self.terminal_armed {
            return Transition::Unchanged;
        }
        self.terminal_armed = true;
        Transition::TerminalReady
    }

    /// Whether the current page is the last one.
    pub fn is_on_last_page(&self) -> bool {
        self.current == self.pages.len() - 1
    }

    /// Whether the flow has finished (skipped or advanced past the end).
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Whether the control should currently carry the terminal label.
    ///
    /// Under one-step the terminal label shows whenever the last page is
    /// current; under two-step only once the control has been armed.
    pub fn terminal_visible(&self) -> bool {
        match self.policy {
            CompletionPolicy::OneStepTerminal => self.is_on_last_page(),
            CompletionPolicy::TwoStepTerminal => self.terminal_armed,
        }
    }

    /// The current index, or `None` once the flow is complete.
    pub fn current_index(&self) -> Option<usize> {
        if self.complete {
            None
        } else {
            Some(self.current)
        }
    }

    /// The current page, or `None` once the flow is complete.
    pub fn current_page(&self) -> Option<&Page> {
        if self.complete {
            None
        } else {
            self.pages.get(self.current)
        }
    }

    /// Number of pages in the flow.
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Always false: construction rejects empty flows.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn policy(&self) -> CompletionPolicy {
        self.policy
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }
}
