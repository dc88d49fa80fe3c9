// src/repodata/filelists.rs

//! filelists.xml parsing
//!
//! Lists every package together with the files it ships. Source packages
//! (arch "src") are the ones whose tarballs feed the recipe.

use crate::error::{Error, Result};
use quick_xml::Reader;
use quick_xml::events::Event;

use super::repomd::get_attribute;

/// One package entry from filelists.xml, in document order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilelistsPackage {
    pub name: String,
    pub arch: String,
    pub version: String,
    pub files: Vec<String>,
}

impl FilelistsPackage {
    /// Whether this is a source package (payload is source code)
    pub fn is_source(&self) -> bool {
        self.arch == "src"
    }
}

/// Parse a filelists.xml document into its package entries
pub fn parse_filelists(content: &str) -> Result<Vec<FilelistsPackage>> {
    let mut reader = Reader::from_str(content);

    let mut packages = Vec::new();

    let mut name: Option<String> = None;
    let mut arch: Option<String> = None;
    let mut version: Option<String> = None;
    let mut files: Vec<String> = Vec::new();
    let mut in_file = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"package" => {
                    name = get_attribute(&e, "name")?;
                    arch = get_attribute(&e, "arch")?;
                    version = None;
                    files.clear();
                }
                b"version" => {
                    version = get_attribute(&e, "ver")?;
                }
                b"file" => in_file = true,
                _ => {}
            },
            Ok(Event::Empty(e)) => {
                if e.name().as_ref() == b"version" {
                    version = get_attribute(&e, "ver")?;
                }
            }
            Ok(Event::Text(t)) => {
                if in_file {
                    let text = t.unescape().map_err(|e| {
                        Error::ParseError(format!("Invalid filelists.xml text: {e}"))
                    })?;
                    files.push(text.into_owned());
                }
            }
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"file" => in_file = false,
                b"package" => {
                    let name = name.take().ok_or_else(|| {
                        Error::ParseError("filelists.xml package without a name".to_string())
                    })?;
                    let arch = arch.take().ok_or_else(|| {
                        Error::ParseError(format!("filelists.xml package {name} without an arch"))
                    })?;
                    let version = version.take().ok_or_else(|| {
                        Error::ParseError(format!("filelists.xml package {name} without a version"))
                    })?;
                    packages.push(FilelistsPackage {
                        name,
                        arch,
                        version,
                        files: std::mem::take(&mut files),
                    });
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(Error::ParseError(format!("Invalid filelists.xml: {e}")));
            }
        }
    }

    Ok(packages)
}
