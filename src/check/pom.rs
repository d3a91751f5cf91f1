//! Build-descriptor checks: properties, plugin executions, dependencies.

use super::analyzer::Analyzer;
use super::dsl::Statement;
use super::query::ScopedQuery;
use crate::document::node::DocValue;
use crate::error::{require, CheckError};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Node every property lives under.
const PROPERTIES_NODE: &str = "properties";
/// Path suffix of a plugin's execution entries.
const EXECUTIONS_SUFFIX: &str = ".executions.execution";
/// Element name of a declared dependency.
const DEPENDENCY_TAG: &str = "dependency";

/// Scope of a declared dependency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DependencyScope {
    /// Needed to compile and run; the default when no scope is declared.
    #[default]
    Compile,
    /// Only needed to compile and run tests.
    Test,
    /// Needed at runtime but not to compile.
    Runtime,
    /// Needed to compile, supplied by the runtime environment.
    Provided,
}

impl DependencyScope {
    pub fn as_str(self) -> &'static str {
        match self {
            DependencyScope::Compile => "compile",
            DependencyScope::Test => "test",
            DependencyScope::Runtime => "runtime",
            DependencyScope::Provided => "provided",
        }
    }
}

impl fmt::Display for DependencyScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown dependency scope '{0}'")]
pub struct UnknownScope(pub String);

impl FromStr for DependencyScope {
    type Err = UnknownScope;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "compile" => Ok(DependencyScope::Compile),
            "test" => Ok(DependencyScope::Test),
            "runtime" => Ok(DependencyScope::Runtime),
            "provided" => Ok(DependencyScope::Provided),
            _ => Err(UnknownScope(s.to_string())),
        }
    }
}

/// Analyzer for a descriptor's project nodes.
///
/// Returned by [`Checker::checking`](super::checker::Checker::checking).
#[derive(Debug, Clone)]
pub struct PomAnalyzer {
    query: ScopedQuery,
}

impl Analyzer for PomAnalyzer {
    fn query(&self) -> &ScopedQuery {
        &self.query
    }

    fn query_mut(&mut self) -> &mut ScopedQuery {
        &mut self.query
    }
}

impl PomAnalyzer {
    pub fn new(query: ScopedQuery) -> Self {
        Self { query }
    }

    /// Asserts that a property whose path contains `property_name` exists.
    ///
    /// Properties are looked up under `properties` regardless of the given
    /// node.
    pub fn have_property(mut self, property_name: &str) -> Result<Statement<Self>, CheckError> {
        let property_name = require("property_name", property_name)?;
        let q = &self.query;
        let selected = q.select(|element| {
            q.is_under(element.path(), PROPERTIES_NODE) && element.path().contains(property_name)
        });

        self.query.conclude(
            !selected.is_empty(),
            || vec![format!("Property '{}' found where not allowed", property_name)],
            || format!("Required property '{}' not found", property_name),
        );
        self.query.narrow(selected);
        Ok(Statement::new(self))
    }

    /// Asserts that plugin `plugin_artifact_id` runs `goal` in `phase`.
    ///
    /// Plugins are the nodes below the given node carrying a matching
    /// `artifactId`; their `executions.execution` entries may be a single
    /// execution or a list, and `goals.goal` a single goal or a list.
    pub fn have_plugin_execution_in_phase_for_goal(
        mut self,
        plugin_artifact_id: &str,
        phase: &str,
        goal: &str,
    ) -> Result<Statement<Self>, CheckError> {
        let plugin_artifact_id = require("plugin_artifact_id", plugin_artifact_id)?;
        let phase = require("phase", phase)?;
        let goal = require("goal", goal)?;

        let q = &self.query;
        let plugin_paths: HashSet<String> = q
            .working_set()
            .filter(|element| q.in_scope(element.path()))
            .filter(|element| has_field(element.value(), "artifactId", plugin_artifact_id))
            .map(|element| element.path().to_string())
            .collect();

        let selected = q.select(|element| {
            q.in_scope(element.path())
                && execution_owner(element.path())
                    .map(|owner| plugin_paths.contains(owner))
                    .unwrap_or(false)
                && has_field(element.value(), "phase", phase)
                && runs_goal(element.value(), goal)
        });

        self.query.conclude(
            !selected.is_empty(),
            || {
                vec![format!(
                    "Plugin '{}' found in phase '{}' for goal '{}' where this is not permitted",
                    plugin_artifact_id, phase, goal
                )]
            },
            || {
                format!(
                    "Plugin '{}' not found in given phase '{}' for goal '{}'",
                    plugin_artifact_id, phase, goal
                )
            },
        );
        self.query.narrow(selected);
        Ok(Statement::new(self))
    }

    /// Asserts that dependency `artifact_id` is declared with `scope`.
    ///
    /// Only `dependency` entries count, so artifacts named inside their
    /// `exclusions` never match. A dependency without a `scope` entry has the
    /// `compile` scope.
    pub fn have_dependency_with_scope(
        mut self,
        artifact_id: &str,
        scope: DependencyScope,
    ) -> Result<Statement<Self>, CheckError> {
        let artifact_id = require("artifact_id", artifact_id)?;

        let q = &self.query;
        let selected = q.select(|element| {
            q.in_scope(element.path())
                && is_dependency_entry(element.path())
                && has_field(element.value(), "artifactId", artifact_id)
                && declared_scope(element.value()) == Some(scope)
        });

        let node = self.query.given_node().to_string();
        self.query.conclude(
            !selected.is_empty(),
            || {
                vec![format!(
                    "Dependency '{}' found with scope '{}' in {} where it is not allowed",
                    artifact_id, scope, node
                )]
            },
            || {
                format!(
                    "Dependency '{}' with scope '{}' not found in {} where it is required",
                    artifact_id, scope, node
                )
            },
        );
        self.query.narrow(selected);
        Ok(Statement::new(self))
    }
}

/// True if `value` is a mapping whose `field` renders as `expected`.
fn has_field(value: &DocValue, field: &str, expected: &str) -> bool {
    value
        .get(field)
        .and_then(DocValue::string_form)
        .map(|form| form == expected)
        .unwrap_or(false)
}

fn runs_goal(execution: &DocValue, goal: &str) -> bool {
    execution
        .get_dotted("goals.goal")
        .map(|goals| {
            goals
                .one_or_many()
                .any(|g| g.string_form().as_deref() == Some(goal))
        })
        .unwrap_or(false)
}

/// Scope of a dependency mapping; `None` for non-mappings or unknown scopes.
fn declared_scope(dependency: &DocValue) -> Option<DependencyScope> {
    if !dependency.is_object() {
        return None;
    }
    match dependency.get("scope").and_then(DocValue::string_form) {
        Some(scope) => scope.parse().ok(),
        None => Some(DependencyScope::Compile),
    }
}

/// Path of the plugin owning an execution path, e.g.
/// `build.plugins.plugin[1].executions.execution[0]` → `build.plugins.plugin[1]`.
fn execution_owner(path: &str) -> Option<&str> {
    strip_index(path)?.strip_suffix(EXECUTIONS_SUFFIX)
}

/// True if `path` addresses a `dependency` entry itself, not a mapping
/// nested inside one such as `dependency.exclusions.exclusion`.
fn is_dependency_entry(path: &str) -> bool {
    strip_index(path)
        .map(|entry| entry.rsplit('.').next() == Some(DEPENDENCY_TAG))
        .unwrap_or(false)
}

/// Drops a trailing `[i]` from `path`; `None` if the brackets hold no index.
fn strip_index(path: &str) -> Option<&str> {
    match path.strip_suffix(']') {
        Some(head) => {
            let open = head.rfind('[')?;
            if !head[open + 1..].chars().all(|c| c.is_ascii_digit()) {
                return None;
            }
            Some(&head[..open])
        }
        None => Some(path),
    }
}
