// src/lib.rs

//! Recipe source synchronizer
//!
//! Mirrors one metapackage's transitive dependency set from a remote RPM
//! repository into a packaging recipe's `source:` block:
//!
//! 1. Fetch the repodata manifest and locate the primary and filelists
//!    documents.
//! 2. Build the dependency map from primary.xml and resolve the
//!    metapackage's transitive closure.
//! 3. For each required source package, download its tarball and compute
//!    its SHA-256 digest.
//! 4. Rewrite the recipe's version line and source block in place,
//!    preserving every other byte.
//!
//! The run is fully sequential; any failure aborts it before the recipe
//! is touched.

pub mod client;
mod error;
pub mod recipe;
pub mod repodata;
pub mod resolve;
pub mod sources;

pub use client::RepositoryClient;
pub use error::{Error, Result};
pub use recipe::{load_recipe, rewrite_recipe, write_recipe};
pub use repodata::{DependencyMap, FilelistsPackage, RepoManifest};
pub use resolve::resolve_closure;
pub use sources::{SourceEntry, SourcePlan, hash_sources, plan_sources};
