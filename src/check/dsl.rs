//! The fluent chain: inclusion gate and statements.
//!
//! ```text
//! checking(node) -> Inclusion
//!     .should() | .should_not()           -> Analyzer
//!     .<predicate>(..)?                   -> Statement
//!     .and() | .or()                      -> Analyzer
//!     .validate() | .validate_with_reason -> Result<(), CheckError>
//! ```
//!
//! Mismatches are only collected while the chain runs. Nothing fails until
//! `validate` is called, so a chain that is never validated passes silently.

use super::analyzer::Analyzer;
use crate::error::CheckError;

/// Entry point of a chain, choosing between "should" and "should not".
#[derive(Debug)]
pub struct Inclusion<A> {
    analyzer: A,
}

impl<A: Analyzer> Inclusion<A> {
    pub(crate) fn new(analyzer: A) -> Self {
        Self { analyzer }
    }

    /// Continues in the chain's current mode.
    pub fn should(self) -> A {
        self.analyzer
    }

    /// Toggles the chain's mode, so predicates report what they find.
    ///
    /// This toggles rather than sets: negating a negated chain affirms again.
    pub fn should_not(mut self) -> A {
        self.analyzer.query_mut().context_mut().negate.toggle();
        self.analyzer
    }
}

/// The result of one predicate, offering combinators and the terminal check.
///
/// Dropping a statement without calling [`validate`](Self::validate) discards
/// every recorded mismatch.
#[must_use = "mismatches are only reported by validate()"]
#[derive(Debug)]
pub struct Statement<A> {
    analyzer: A,
}

impl<A: Analyzer> Statement<A> {
    pub(crate) fn new(analyzer: A) -> Self {
        Self { analyzer }
    }

    /// Continues the chain with another predicate.
    ///
    /// In negate mode the errors recorded so far are cleared first. The mode
    /// itself is kept.
    pub fn and(mut self) -> A {
        let context = self.analyzer.query_mut().context_mut();
        if context.is_negated() {
            context.results.clear_errors();
        }
        self.analyzer
    }

    /// Continues the chain with an alternative predicate.
    ///
    /// In negate mode the terminal check runs and a failure is swallowed. The
    /// mode itself is kept.
    pub fn or(self) -> A {
        let context = self.analyzer.query().context();
        if context.is_negated() {
            if let Err(failure) = context.results.validate() {
                tracing::debug!(report = failure.report(), "ignoring failure before or()");
            }
        }
        self.analyzer
    }

    /// Fails with the accumulated report if any step recorded a mismatch.
    pub fn validate(&self) -> Result<(), CheckError> {
        self.analyzer.query().context().results.validate()?;
        Ok(())
    }

    /// Like [`validate`](Self::validate), prefixing the report with `reason`.
    pub fn validate_with_reason(&self, reason: &str) -> Result<(), CheckError> {
        self.analyzer
            .query()
            .context()
            .results
            .validate_with_reason(reason)?;
        Ok(())
    }

    /// The analyzer this statement continues with.
    pub fn analyzer(&self) -> &A {
        &self.analyzer
    }
}
