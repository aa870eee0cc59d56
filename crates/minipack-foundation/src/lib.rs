//! Foundation Layer - Core types shared by every minipack crate
//!
//! This crate provides:
//! - [`ModuleId`]: the canonical identity of a module
//! - [`Asset`]: one loaded module plus its specifier bookkeeping
//! - [`ModuleGraph`]: identity → asset map built by the graph builder
//! - [`BuildError`]: the error taxonomy of a build
//!
//! It has no dependencies on other minipack crates.

pub mod asset;
pub mod error;
pub mod graph;
pub mod module_id;

pub use asset::Asset;
pub use error::{BuildError, BuildErrorKind, BuildResult, Importer};
pub use graph::{GraphSummary, ModuleGraph};
pub use module_id::ModuleId;
