//! Query primitives shared by every analyzer.

use super::dsl::Statement;
use super::query::ScopedQuery;
use crate::error::CheckError;

/// An analyzer built on a [`ScopedQuery`].
///
/// Implementors only expose their query; the generic predicates come with the
/// trait, and domain analyzers add their own predicates next to them.
pub trait Analyzer: Sized {
    fn query(&self) -> &ScopedQuery;

    fn query_mut(&mut self) -> &mut ScopedQuery;

    /// Asserts that a path below the given node ends with `tag_name`.
    ///
    /// # Errors
    ///
    /// `CheckError::InvalidArgument` if `tag_name` is blank.
    fn have_tag(mut self, tag_name: &str) -> Result<Statement<Self>, CheckError> {
        self.query_mut().has_tag(tag_name)?;
        Ok(Statement::new(self))
    }

    /// Asserts that a value below the given node contains `value`.
    ///
    /// # Errors
    ///
    /// `CheckError::InvalidArgument` if `value` is blank.
    fn contain_value(mut self, value: &str) -> Result<Statement<Self>, CheckError> {
        self.query_mut().contain_value(value)?;
        Ok(Statement::new(self))
    }

    /// Asserts that a value below the given node equals `value`.
    ///
    /// # Errors
    ///
    /// `CheckError::InvalidArgument` if `value` is blank.
    fn equals_value(mut self, value: &str) -> Result<Statement<Self>, CheckError> {
        self.query_mut().equals_value(value)?;
        Ok(Statement::new(self))
    }
}
