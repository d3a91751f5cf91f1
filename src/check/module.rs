//! Checks on the modules a descriptor registers.

use super::analyzer::Analyzer;
use super::dsl::Statement;
use super::query::ScopedQuery;
use crate::error::{require, CheckError};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Node module registrations live under.
pub const MODULES_NODE: &str = "modules";
/// Node holding the registered module names.
const MODULE_ENTRIES: &str = "modules.module";

/// Answers file-existence questions for module checks.
///
/// Paths are relative to the project the descriptor belongs to.
pub trait FileSystem: fmt::Debug + Send + Sync {
    fn exists(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;
}

/// The local filesystem, resolving paths against a project root.
#[derive(Debug, Clone)]
pub struct LocalFileSystem {
    root: PathBuf,
}

impl LocalFileSystem {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl Default for LocalFileSystem {
    fn default() -> Self {
        Self::new(".")
    }
}

impl FileSystem for LocalFileSystem {
    fn exists(&self, path: &Path) -> bool {
        self.root.join(path).exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.root.join(path).is_dir()
    }
}

/// Analyzer for the `modules` section of a descriptor.
///
/// Returned by [`Checker::checking_module`](super::checker::Checker::checking_module).
#[derive(Debug, Clone)]
pub struct ModuleAnalyzer {
    query: ScopedQuery,
    file_system: Arc<dyn FileSystem>,
    /// File name of a module's own descriptor, e.g. `pom.xml`.
    descriptor: String,
}

impl Analyzer for ModuleAnalyzer {
    fn query(&self) -> &ScopedQuery {
        &self.query
    }

    fn query_mut(&mut self) -> &mut ScopedQuery {
        &mut self.query
    }
}

impl ModuleAnalyzer {
    pub fn new(
        query: ScopedQuery,
        file_system: Arc<dyn FileSystem>,
        descriptor: impl Into<String>,
    ) -> Self {
        Self {
            query,
            file_system,
            descriptor: descriptor.into(),
        }
    }

    /// Asserts that module `module_name` has a directory or a descriptor file.
    pub fn module_exists(mut self, module_name: &str) -> Result<Statement<Self>, CheckError> {
        self.check_module(module_name)?;
        Ok(Statement::new(self))
    }

    /// Runs [`module_exists`](Self::module_exists) for every registered module.
    pub fn all_registered_modules_exist(mut self) -> Result<Statement<Self>, CheckError> {
        let q = &self.query;
        let names: Vec<String> = q
            .working_set()
            .filter(|element| q.is_under(element.path(), MODULE_ENTRIES))
            .filter(|element| !element.value().is_container())
            .filter_map(|element| element.value().string_form())
            .filter(|name| !name.trim().is_empty())
            .collect();

        tracing::debug!(count = names.len(), "checking registered modules");
        for name in &names {
            self.check_module(name)?;
        }
        Ok(Statement::new(self))
    }

    /// Asserts that a module entry contains `module_name`.
    pub fn contain_module_node(self, module_name: &str) -> Result<Statement<Self>, CheckError> {
        self.contain_value(module_name)
    }

    fn check_module(&mut self, module_name: &str) -> Result<(), CheckError> {
        let module_name = require("module_name", module_name)?;
        let module_dir = Path::new(module_name);
        let found = self.file_system.is_dir(module_dir)
            || self.file_system.exists(&module_dir.join(&self.descriptor));

        self.query.conclude(
            found,
            || {
                vec![format!(
                    "Module '{}' directory or pom file found, but not expected",
                    module_name
                )]
            },
            || {
                format!(
                    "Module '{}' directory or pom file not found while expected",
                    module_name
                )
            },
        );
        Ok(())
    }
}
