// src/recipe.rs

//! Recipe rewriting
//!
//! Patches two regions of a recipe document in place: the version
//! declaration line and the `source:` block. The patch is byte-preserving:
//! everything outside the two regions comes through untouched, so the
//! recipe's formatting survives version bumps.

use crate::error::{Error, Result};
use crate::sources::SourceEntry;
use regex::{NoExpand, Regex};
use std::path::Path;
use std::sync::LazyLock;

/// Matches the version declaration line, e.g. `version = "1.138"`
static VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"version = "\d+\.\d+""#).unwrap());

/// Matches a `source:` header plus its two-or-more-space-indented lines
static SOURCE_BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^source:\n(?:[ ]{2,}[^\n]*\n)+").unwrap());

/// Read a recipe document from disk
pub fn load_recipe(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| {
        Error::IoError(format!("Failed to read recipe {}: {e}", path.display()))
    })
}

/// Write a rewritten recipe document back to disk
pub fn write_recipe(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).map_err(|e| {
        Error::IoError(format!("Failed to write recipe {}: {e}", path.display()))
    })
}

/// Rewrite the recipe's version line and source block
///
/// The version line must match exactly once; the source block must be
/// immediately followed by a blank line and a `build:` line. Either
/// structural violation is fatal. Each source entry becomes a three-line
/// item (url, sha256, folder), with the folder fixed to the metapackage
/// name so all tarballs unpack side by side.
pub fn rewrite_recipe(
    content: &str,
    version: &str,
    entries: &[SourceEntry],
    folder: &str,
) -> Result<String> {
    let matches = VERSION_RE.find_iter(content).count();
    if matches != 1 {
        return Err(Error::RecipeError(format!(
            "Expected exactly one version line in the recipe, found {matches}"
        )));
    }

    let version_line = format!("version = \"{version}\"");
    let patched = VERSION_RE.replace(content, NoExpand(&version_line));

    let block = SOURCE_BLOCK_RE.find(&patched).ok_or_else(|| {
        Error::RecipeError("Could not find the source section in the recipe".to_string())
    })?;
    let (start, end) = (block.start(), block.end());

    if !patched[end..].starts_with("\nbuild:\n") {
        return Err(Error::RecipeError(
            "Could not find the build section after the source block".to_string(),
        ));
    }

    let mut new_block = String::from("source:\n");
    for entry in entries {
        new_block.push_str(&format!(
            "  - url: {}\n    sha256: {}\n    folder: {}\n",
            entry.url, entry.sha256, folder
        ));
    }

    Ok(format!(
        "{}{}{}",
        &patched[..start],
        new_block,
        &patched[end..]
    ))
}
