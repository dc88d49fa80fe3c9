// src/sources.rs

//! Tarball location and hashing
//!
//! Walks the filelists entries, picks out the source packages required by
//! the install set, and turns each one into a recipe source entry: a
//! download URL with the version segment templated out, plus the SHA-256
//! digest of the tarball's bytes.

use crate::client::{RepositoryClient, join_url};
use crate::error::{Error, Result};
use crate::repodata::FilelistsPackage;
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use tracing::{info, warn};

/// Placeholder substituted for the version segment in recipe URLs
pub const VERSION_PLACEHOLDER: &str = "{{ version }}";

/// Path segment under the repository base URL where tarballs live
const TARBALL_DIR: &str = "tgz/";

/// A recipe source entry: templated download URL and content digest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEntry {
    pub url: String,
    pub sha256: String,
}

/// One tarball scheduled for download and hashing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedTarball {
    pub package: String,
    pub url: String,
}

/// The outcome of the filelists scan: a shared version and the tarballs
/// to fetch, in document order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePlan {
    pub version: String,
    pub tarballs: Vec<PlannedTarball>,
}

/// Scan filelists entries and plan the tarball downloads
///
/// Only source packages (arch "src") named in the install set are taken.
/// Every processed package must share one version and ship exactly one
/// `.tar.gz` file; either violation is fatal. Matched names are removed
/// from the install set, and names left over after the scan are reported
/// as warnings: binary-only packages carry no source RPM, so a leftover
/// is not treated as an error.
pub fn plan_sources(
    base_url: &str,
    packages: &[FilelistsPackage],
    mut install_set: HashSet<String>,
) -> Result<SourcePlan> {
    let mut version: Option<String> = None;
    let mut tarballs = Vec::new();

    for package in packages {
        if !package.is_source() {
            continue;
        }
        if !install_set.contains(&package.name) {
            println!("Skipping unrequired tarball {}", package.name);
            continue;
        }

        match &version {
            None => version = Some(package.version.clone()),
            Some(past) if *past != package.version => {
                return Err(Error::SourceError(format!(
                    "Version mismatch: {} has version {} but earlier source packages have {}",
                    package.name, package.version, past
                )));
            }
            Some(_) => {}
        }

        let tarball = locate_tarball(package)?;
        tarballs.push(PlannedTarball {
            package: package.name.clone(),
            url: join_url(base_url, &format!("{TARBALL_DIR}{tarball}")),
        });

        install_set.remove(&package.name);
    }

    let version = version.ok_or_else(|| {
        Error::SourceError("No required source packages found in filelists".to_string())
    })?;

    for leftover in &install_set {
        warn!("Required package {} has no source tarball", leftover);
    }

    info!(
        "Planned {} tarball downloads at version {}",
        tarballs.len(),
        version
    );

    Ok(SourcePlan { version, tarballs })
}

/// Find the single `.tar.gz` file a source package ships
fn locate_tarball(package: &FilelistsPackage) -> Result<&str> {
    let mut matches = package.files.iter().filter(|f| f.ends_with(".tar.gz"));

    let tarball = matches.next().ok_or_else(|| {
        Error::SourceError(format!(
            "Source package {} ships no .tar.gz file (files: {:?})",
            package.name, package.files
        ))
    })?;

    if matches.next().is_some() {
        return Err(Error::SourceError(format!(
            "Source package {} ships more than one .tar.gz file (files: {:?})",
            package.name, package.files
        )));
    }

    Ok(tarball)
}

/// Download and hash every planned tarball
///
/// Returns one source entry per tarball, with the version-specific URL
/// segment replaced by the `{{ version }}` placeholder.
pub fn hash_sources(client: &RepositoryClient, plan: &SourcePlan) -> Result<Vec<SourceEntry>> {
    let mut entries = Vec::with_capacity(plan.tarballs.len());

    for tarball in &plan.tarballs {
        let bytes = client.download_to_bytes(&tarball.url)?;

        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        let digest = format!("{:x}", hasher.finalize());

        println!("Got hash {} for {}", digest, tarball.package);

        entries.push(SourceEntry {
            url: tarball.url.replace(&plan.version, VERSION_PLACEHOLDER),
            sha256: digest,
        });
    }

    Ok(entries)
}
