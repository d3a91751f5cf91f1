//! Per-chain mutable state: the negation mode and the error sink.
//!
//! Every `checking(node)` call creates one [`ChainContext`]. It moves with the
//! chain from the inclusion gate through each analyzer and statement, so all
//! steps of one chain see the same mode and the same accumulated errors while
//! separate chains never share state.

use crate::error::ValidationFailure;

/// Whether predicate outcomes are read as "should" or "should not".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Affirm,
    Negate,
}

/// The "negate next" toggle of one chain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NegateNext {
    mode: Mode,
}

impl NegateNext {
    /// Flips the mode. Calling it twice returns to `Affirm`.
    pub fn toggle(&mut self) {
        self.mode = match self.mode {
            Mode::Affirm => Mode::Negate,
            Mode::Negate => Mode::Affirm,
        };
    }

    pub fn is_negated(&self) -> bool {
        self.mode == Mode::Negate
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }
}

/// Collects mismatch messages and turns them into a report.
///
/// Messages are recorded by predicates and moved into the report by
/// [`check_for_errors`](Self::check_for_errors) after each step. Once a step
/// has failed the chain stays failed until [`clear_errors`](Self::clear_errors).
#[derive(Debug, Clone, Default)]
pub struct ResultCaller {
    pending: Vec<String>,
    report: String,
    has_errors: bool,
}

impl ResultCaller {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a mismatch message for the current step.
    pub fn record(&mut self, message: impl Into<String>) {
        self.pending.push(message.into());
    }

    /// Messages recorded since the last `check_for_errors`.
    pub fn pending(&self) -> &[String] {
        &self.pending
    }

    /// The accumulated report text.
    pub fn report(&self) -> &str {
        &self.report
    }

    /// True once any step recorded a message and it has not been cleared.
    pub fn has_errors(&self) -> bool {
        self.has_errors
    }

    /// Moves pending messages into the report as one `Error(s) occurred:` block.
    pub fn check_for_errors(&mut self) {
        if self.pending.is_empty() {
            return;
        }

        self.has_errors = true;
        self.report.push_str("Error(s) occurred:\n");
        for message in self.pending.drain(..) {
            self.report.push_str(&message);
            self.report.push('\n');
        }
    }

    /// Drops pending messages, the report and the failed flag.
    pub fn clear_errors(&mut self) {
        self.pending.clear();
        self.report.clear();
        self.has_errors = false;
    }

    /// Fails with the report if any step failed.
    pub fn validate(&self) -> Result<(), ValidationFailure> {
        if self.has_errors {
            return Err(ValidationFailure::new(self.report.clone()));
        }
        Ok(())
    }

    /// Like [`validate`](Self::validate), prefixing the report with `reason`.
    pub fn validate_with_reason(&self, reason: &str) -> Result<(), ValidationFailure> {
        if self.has_errors {
            return Err(ValidationFailure::new(format!("{}\n{}", reason, self.report)));
        }
        Ok(())
    }
}

/// The state shared by every step of one chain.
#[derive(Debug, Clone, Default)]
pub struct ChainContext {
    pub negate: NegateNext,
    pub results: ResultCaller,
}

impl ChainContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_negated(&self) -> bool {
        self.negate.is_negated()
    }
}
