//! The assertion engine.
//!
//! A [`Checker`] flattens a descriptor once and opens chains over it:
//!
//! ```text
//! checker.checking("modules.module")
//!     .should()
//!     .contain_value("customer")?
//!     .and()
//!     .contain_value("product")?
//!     .validate()?;
//! ```
//!
//! Each chain carries one negation mode and one error sink. Predicates record
//! mismatches instead of failing; only [`Statement::validate`] turns them into
//! a [`CheckError::Validation`](crate::error::CheckError::Validation). A chain
//! that is never validated never fails.

pub mod analyzer;
pub mod checker;
pub mod context;
pub mod dsl;
pub mod module;
pub mod pom;
pub mod query;

pub use analyzer::Analyzer;
pub use checker::Checker;
pub use dsl::{Inclusion, Statement};
pub use module::{FileSystem, LocalFileSystem, ModuleAnalyzer};
pub use pom::{DependencyScope, PomAnalyzer};
