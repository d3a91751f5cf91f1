//! The scoped query engine behind every analyzer.
//!
//! A [`ScopedQuery`] answers path queries against the flattened document
//! below one given node. Each query follows the same shape: filter the
//! working set, compare the outcome against the chain's mode, record a
//! message when they disagree, move messages into the report, and narrow the
//! working set to the matches.

use super::context::ChainContext;
use crate::error::{require, CheckError};
use crate::path::{PathElement, PathMatching};
use std::sync::Arc;

/// Query state of one chain: scope, working set and chain context.
#[derive(Debug, Clone)]
pub struct ScopedQuery {
    given_node: String,
    elements: Arc<[PathElement]>,
    /// Indices into `elements`; replaced wholesale when a query narrows.
    working: Vec<usize>,
    matching: PathMatching,
    context: ChainContext,
}

impl ScopedQuery {
    /// Opens a query over all `elements` below `given_node` with a fresh context.
    pub fn new(
        given_node: impl Into<String>,
        elements: Arc<[PathElement]>,
        matching: PathMatching,
    ) -> Self {
        let working = (0..elements.len()).collect();
        Self {
            given_node: given_node.into(),
            elements,
            working,
            matching,
            context: ChainContext::new(),
        }
    }

    pub fn given_node(&self) -> &str {
        &self.given_node
    }

    pub fn context(&self) -> &ChainContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut ChainContext {
        &mut self.context
    }

    /// The elements later queries of this chain will look at.
    pub fn working_set(&self) -> impl Iterator<Item = &PathElement> + '_ {
        self.working.iter().map(move |&idx| &self.elements[idx])
    }

    /// Returns true if `path` lies at or below `node` under this query's matching.
    pub fn is_under(&self, path: &str, node: &str) -> bool {
        self.matching.is_under(path, node)
    }

    /// Returns true if `path` lies at or below the given node.
    pub fn in_scope(&self, path: &str) -> bool {
        self.is_under(path, &self.given_node)
    }

    /// Indices of working elements accepted by `predicate`.
    pub fn select<F>(&self, predicate: F) -> Vec<usize>
    where
        F: Fn(&PathElement) -> bool,
    {
        self.working
            .iter()
            .copied()
            .filter(|&idx| predicate(&self.elements[idx]))
            .collect()
    }

    /// Resolves selected indices to elements.
    pub fn resolve<'q>(
        &'q self,
        selected: &'q [usize],
    ) -> impl Iterator<Item = &'q PathElement> + 'q {
        selected.iter().map(move |&idx| &self.elements[idx])
    }

    /// Replaces the working set.
    pub fn narrow(&mut self, selected: Vec<usize>) {
        self.working = selected;
    }

    /// Records the outcome of one step and moves messages into the report.
    ///
    /// In affirm mode a missing match records `missing()`; in negate mode a
    /// found match records every line of `disallowed()`.
    pub fn conclude<D, M>(&mut self, found: bool, disallowed: D, missing: M)
    where
        D: FnOnce() -> Vec<String>,
        M: FnOnce() -> String,
    {
        let negated = self.context.is_negated();
        tracing::debug!(
            node = %self.given_node,
            found,
            negated,
            "assertion evaluated"
        );

        if negated && found {
            for line in disallowed() {
                self.context.results.record(line);
            }
        } else if !negated && !found {
            self.context.results.record(missing());
        }

        self.context.results.check_for_errors();
    }

    /// Elements in scope whose path ends with `tag_name`.
    pub fn has_tag(&mut self, tag_name: &str) -> Result<(), CheckError> {
        let tag_name = require("tag_name", tag_name)?;
        let matching = self.matching;
        let selected = self.select(|element| {
            self.in_scope(element.path()) && matching.ends_with_tag(element.path(), tag_name)
        });

        let node = self.given_node.clone();
        let found_values: Vec<String> = self
            .resolve(&selected)
            .map(|element| format!("- {}", element.value()))
            .collect();

        self.conclude(
            !selected.is_empty(),
            || {
                let mut lines = vec![format!(
                    "{} found in {} where it is not allowed. \nFound disallowed value: ",
                    tag_name, node
                )];
                lines.extend(found_values);
                lines
            },
            || format!("No {} found in {} where it is required", tag_name, node),
        );
        self.narrow(selected);
        Ok(())
    }

    /// Elements in scope whose string form contains `value`.
    pub fn contain_value(&mut self, value: &str) -> Result<(), CheckError> {
        let value = require("value", value)?;
        self.filter_value(value, |form| form.contains(value))
    }

    /// Elements in scope whose string form equals `value`.
    pub fn equals_value(&mut self, value: &str) -> Result<(), CheckError> {
        let value = require("value", value)?;
        self.filter_value(value, |form| form == value)
    }

    fn filter_value<F>(&mut self, value: &str, accepts: F) -> Result<(), CheckError>
    where
        F: Fn(&str) -> bool,
    {
        let selected = self.select(|element| {
            self.in_scope(element.path())
                && element
                    .value()
                    .string_form()
                    .map(|form| accepts(form.as_str()))
                    .unwrap_or(false)
        });

        let node = self.given_node.clone();
        self.conclude(
            !selected.is_empty(),
            || {
                vec![format!(
                    "Value '{}' found in {} where it is not allowed",
                    value, node
                )]
            },
            || format!("Value '{}' not found in {} where it is required", value, node),
        );
        self.narrow(selected);
        Ok(())
    }
}
