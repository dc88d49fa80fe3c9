// src/repodata/mod.rs

//! RPM repodata parsing
//!
//! This module handles the three XML documents that make up a repository's
//! metadata:
//! - `repomd.xml`: the manifest listing the other metadata documents
//! - `primary.xml`: per-package name and requirement listing
//! - `filelists.xml`: per-package file listing

mod filelists;
mod primary;
mod repomd;

pub use filelists::{FilelistsPackage, parse_filelists};
pub use primary::{DependencyMap, parse_primary};
pub use repomd::{RepoManifest, parse_repomd};
