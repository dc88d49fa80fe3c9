// tests/sync_flow.rs

//! Integration tests for the sync pipeline
//!
//! Drives the full flow from repodata documents to a rewritten recipe on
//! disk, with the network fetches replaced by inline fixtures.

use recipe_sync::sources::VERSION_PLACEHOLDER;
use recipe_sync::{SourceEntry, recipe, repodata, resolve, sources};
use std::collections::HashSet;

const BASE_URL: &str = "https://repo.example.com/cas/";

const REPOMD: &str = r#"<repomd xmlns="http://linux.duke.edu/metadata/repo">
  <data type="primary">
    <location href="repodata/abc-primary.xml.gz"/>
  </data>
  <data type="filelists">
    <location href="repodata/def-filelists.xml.gz"/>
  </data>
</repomd>"#;

const PRIMARY: &str = r#"<metadata xmlns="http://linux.duke.edu/metadata/common" xmlns:rpm="http://linux.duke.edu/metadata/rpm" packages="3">
  <package type="rpm">
    <name>ca-policy-lcg</name>
    <format>
      <rpm:requires>
        <rpm:entry name="ca_A"/>
        <rpm:entry name="ca_B"/>
      </rpm:requires>
    </format>
  </package>
  <package type="rpm">
    <name>ca_A</name>
  </package>
  <package type="rpm">
    <name>ca_B</name>
  </package>
</metadata>"#;

const FILELISTS: &str = r#"<filelists xmlns="http://linux.duke.edu/metadata/filelists" packages="3">
  <package pkgid="a" name="ca_A" arch="src">
    <version epoch="0" ver="1.138" rel="1"/>
    <file>ca_A-1.138.tar.gz</file>
  </package>
  <package pkgid="b" name="ca_B" arch="src">
    <version epoch="0" ver="1.138" rel="1"/>
    <file>ca_B-1.138.tar.gz</file>
  </package>
  <package pkgid="c" name="ca_unwanted" arch="src">
    <version epoch="0" ver="1.138" rel="1"/>
    <file>ca_unwanted-1.138.tar.gz</file>
  </package>
</filelists>"#;

const RECIPE: &str = "\
{% set version = \"1.2\" %}

package:
  name: ca-policy-lcg
  version: {{ version }}

source:
  - url: https://repo.example.com/cas/tgz/stale-{{ version }}.tar.gz
    sha256: 1111111111111111111111111111111111111111111111111111111111111111
    folder: ca-policy-lcg

build:
  number: 0
";

#[test]
fn test_manifest_to_plan() {
    let manifest = repodata::parse_repomd(REPOMD).unwrap();
    assert_eq!(
        manifest.primary_url(BASE_URL),
        "https://repo.example.com/cas/repodata/abc-primary.xml.gz"
    );

    let dependency_map = repodata::parse_primary(PRIMARY).unwrap();
    let install_set = resolve::resolve_closure(&dependency_map, "ca-policy-lcg");
    assert_eq!(
        install_set,
        ["ca-policy-lcg", "ca_A", "ca_B"]
            .iter()
            .map(|s| s.to_string())
            .collect::<HashSet<_>>()
    );

    let packages = repodata::parse_filelists(FILELISTS).unwrap();
    let plan = sources::plan_sources(BASE_URL, &packages, install_set).unwrap();

    assert_eq!(plan.version, "1.138");
    let planned: Vec<&str> = plan.tarballs.iter().map(|t| t.package.as_str()).collect();
    assert_eq!(planned, vec!["ca_A", "ca_B"]);
    assert_eq!(
        plan.tarballs[0].url,
        "https://repo.example.com/cas/tgz/ca_A-1.138.tar.gz"
    );
}

#[test]
fn test_plan_to_rewritten_recipe_on_disk() {
    let dependency_map = repodata::parse_primary(PRIMARY).unwrap();
    let install_set = resolve::resolve_closure(&dependency_map, "ca-policy-lcg");
    let packages = repodata::parse_filelists(FILELISTS).unwrap();
    let plan = sources::plan_sources(BASE_URL, &packages, install_set).unwrap();

    // Stand in for hash_sources, which would hit the network
    let entries: Vec<SourceEntry> = plan
        .tarballs
        .iter()
        .map(|t| SourceEntry {
            url: t.url.replace(&plan.version, VERSION_PLACEHOLDER),
            sha256: "2222222222222222222222222222222222222222222222222222222222222222"
                .to_string(),
        })
        .collect();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("meta.yaml");
    recipe::write_recipe(&path, RECIPE).unwrap();

    let content = recipe::load_recipe(&path).unwrap();
    let rewritten =
        recipe::rewrite_recipe(&content, &plan.version, &entries, "ca-policy-lcg").unwrap();
    recipe::write_recipe(&path, &rewritten).unwrap();

    let on_disk = recipe::load_recipe(&path).unwrap();
    assert!(on_disk.contains("version = \"1.138\""));
    assert!(on_disk.contains(
        "  - url: https://repo.example.com/cas/tgz/ca_A-{{ version }}.tar.gz\n    \
         sha256: 2222222222222222222222222222222222222222222222222222222222222222\n    \
         folder: ca-policy-lcg\n"
    ));
    assert!(!on_disk.contains("stale"));
    assert!(on_disk.ends_with("build:\n  number: 0\n"));
    assert!(on_disk.starts_with("{% set version = \"1.138\" %}\n"));
}
