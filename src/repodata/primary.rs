// src/repodata/primary.rs

//! primary.xml parsing
//!
//! Builds the dependency map: package name -> set of required package
//! names. Only `rpm:entry` elements under `rpm:requires` count as
//! requirements; `rpm:provides` and the other format sections are ignored.

use crate::error::{Error, Result};
use quick_xml::Reader;
use quick_xml::events::Event;
use std::collections::{HashMap, HashSet};
use tracing::debug;

use super::repomd::get_attribute;

/// Package name -> declared required package names
///
/// Built once from primary.xml and read-only afterward. Packages that
/// declare no requirements have no entry.
pub type DependencyMap = HashMap<String, HashSet<String>>;

/// Parse a primary.xml document into a dependency map
///
/// Every discovered package name is echoed to stdout for operator
/// visibility, matching the tool's progress-line contract.
pub fn parse_primary(content: &str) -> Result<DependencyMap> {
    let mut reader = Reader::from_str(content);

    let mut dependency_map = DependencyMap::new();

    let mut package_name: Option<String> = None;
    let mut requires: HashSet<String> = HashSet::new();
    let mut in_name = false;
    let mut in_requires = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"package" => {
                    package_name = None;
                    requires.clear();
                }
                b"name" => in_name = true,
                b"rpm:requires" => in_requires = true,
                b"rpm:entry" if in_requires => {
                    if let Some(name) = get_attribute(&e, "name")? {
                        requires.insert(name);
                    }
                }
                _ => {}
            },
            Ok(Event::Empty(e)) => {
                if e.name().as_ref() == b"rpm:entry" && in_requires {
                    if let Some(name) = get_attribute(&e, "name")? {
                        requires.insert(name);
                    }
                }
            }
            Ok(Event::Text(t)) => {
                if in_name {
                    let text = t
                        .unescape()
                        .map_err(|e| Error::ParseError(format!("Invalid primary.xml text: {e}")))?;
                    package_name = Some(text.into_owned());
                }
            }
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"name" => in_name = false,
                b"rpm:requires" => in_requires = false,
                b"package" => {
                    if let Some(name) = package_name.take() {
                        println!("{name}");
                        if !requires.is_empty() {
                            debug!("{} requires {} packages", name, requires.len());
                            dependency_map.insert(name, std::mem::take(&mut requires));
                        }
                    }
                    requires.clear();
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(Error::ParseError(format!("Invalid primary.xml: {e}")));
            }
        }
    }

    Ok(dependency_map)
}
