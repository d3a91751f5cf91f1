//! Opening documents and handing out assertion chains.

use super::dsl::Inclusion;
use super::module::{FileSystem, LocalFileSystem, ModuleAnalyzer, MODULES_NODE};
use super::pom::PomAnalyzer;
use super::query::ScopedQuery;
use crate::config::Config;
use crate::document::tree::DocTree;
use crate::file::loader::load_document_file;
use crate::path::{PathElement, PathMatching};
use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

/// A flattened descriptor ready to be checked.
///
/// The document is flattened once; every call to [`checking`](Self::checking)
/// or [`checking_module`](Self::checking_module) opens an independent chain
/// with its own mode and error sink over the same read-only elements.
///
/// # Example
///
/// ```
/// use pomassert::check::{Analyzer, Checker};
/// use pomassert::document::parser::parse_yaml;
///
/// let tree = parse_yaml("properties:\n  java.version: '11'\n").unwrap();
/// let checker = Checker::from_tree(&tree);
///
/// checker
///     .checking("properties")
///     .should()
///     .have_property("java.version")
///     .unwrap()
///     .validate()
///     .unwrap();
///
/// let failure = checker
///     .checking("properties")
///     .should_not()
///     .have_property("java.version")
///     .unwrap()
///     .validate();
/// assert!(failure.is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Checker {
    elements: Arc<[PathElement]>,
    matching: PathMatching,
    file_system: Arc<dyn FileSystem>,
    module_descriptor: String,
}

impl Checker {
    /// Flattens `tree` with default settings.
    pub fn from_tree(tree: &DocTree) -> Self {
        Self {
            elements: tree.elements().into(),
            matching: PathMatching::default(),
            file_system: Arc::new(LocalFileSystem::default()),
            module_descriptor: Config::default().module_descriptor,
        }
    }

    /// Opens the configured default descriptor (`pom.xml` unless configured).
    pub fn analyze_pom() -> Result<Self> {
        Self::analyze_default(&Config::load())
    }

    /// Opens `config.default_document` with `config` applied.
    pub fn analyze_default(config: &Config) -> Result<Self> {
        Self::open(&config.default_document, config)
    }

    /// Opens the descriptor at `path`, applying the user's configuration.
    pub fn analyze_pom_at<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open(path, &Config::load())
    }

    fn open<P: AsRef<Path>>(path: P, config: &Config) -> Result<Self> {
        let tree = load_document_file(path)?;
        Ok(Self::from_tree(&tree).with_config(config))
    }

    /// Applies matching mode and module settings from `config`.
    pub fn with_config(self, config: &Config) -> Self {
        let mut checker = self
            .with_matching(config.path_matching)
            .with_file_system(Arc::new(LocalFileSystem::new(&config.module_root)));
        checker.module_descriptor = config.module_descriptor.clone();
        checker
    }

    pub fn with_matching(mut self, matching: PathMatching) -> Self {
        self.matching = matching;
        self
    }

    pub fn with_file_system(mut self, file_system: Arc<dyn FileSystem>) -> Self {
        self.file_system = file_system;
        self
    }

    /// The flattened document.
    pub fn elements(&self) -> &[PathElement] {
        &self.elements
    }

    /// Opens a chain scoped to `given_node`.
    pub fn checking(&self, given_node: &str) -> Inclusion<PomAnalyzer> {
        Inclusion::new(PomAnalyzer::new(self.open_query(given_node)))
    }

    /// Opens a chain over the registered modules.
    pub fn checking_module(&self) -> Inclusion<ModuleAnalyzer> {
        Inclusion::new(ModuleAnalyzer::new(
            self.open_query(MODULES_NODE),
            Arc::clone(&self.file_system),
            self.module_descriptor.clone(),
        ))
    }

    fn open_query(&self, given_node: &str) -> ScopedQuery {
        ScopedQuery::new(given_node, Arc::clone(&self.elements), self.matching)
    }
}
