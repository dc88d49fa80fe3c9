// src/repodata/repomd.rs

//! repomd.xml manifest parsing
//!
//! The manifest lists the repository's metadata documents by type. We only
//! care about the `primary` and `filelists` entries; both must be present.

use crate::client::join_url;
use crate::error::{Error, Result};
use quick_xml::Reader;
use quick_xml::events::Event;
use tracing::debug;

/// Locations of the metadata documents we need, resolved from repomd.xml
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoManifest {
    /// Relative href of the primary (package/requirement) document
    pub primary_href: String,
    /// Relative href of the filelists (per-package files) document
    pub filelists_href: String,
}

impl RepoManifest {
    /// Absolute URL of the primary document under the given base URL
    pub fn primary_url(&self, base_url: &str) -> String {
        join_url(base_url, &self.primary_href)
    }

    /// Absolute URL of the filelists document under the given base URL
    pub fn filelists_url(&self, base_url: &str) -> String {
        join_url(base_url, &self.filelists_href)
    }
}

/// Parse a repomd.xml manifest document
///
/// Fails if the document is not well-formed XML or if either the `primary`
/// or `filelists` entry is missing a `location href`.
pub fn parse_repomd(content: &str) -> Result<RepoManifest> {
    let mut reader = Reader::from_str(content);

    let mut primary_href: Option<String> = None;
    let mut filelists_href: Option<String> = None;
    let mut current_type: Option<String> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"data" => {
                    current_type = get_attribute(&e, "type")?;
                }
                b"location" => {
                    if let Some(href) = get_attribute(&e, "href")? {
                        match current_type.as_deref() {
                            Some("primary") => primary_href = Some(href),
                            Some("filelists") => filelists_href = Some(href),
                            _ => {}
                        }
                    }
                }
                _ => {}
            },
            Ok(Event::End(e)) => {
                if e.name().as_ref() == b"data" {
                    current_type = None;
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(Error::ParseError(format!("Invalid repomd.xml: {e}")));
            }
        }
    }

    let primary_href = primary_href.ok_or_else(|| {
        Error::MetadataError("repomd.xml has no primary metadata entry".to_string())
    })?;
    let filelists_href = filelists_href.ok_or_else(|| {
        Error::MetadataError("repomd.xml has no filelists metadata entry".to_string())
    })?;

    debug!(
        "Manifest resolved: primary={}, filelists={}",
        primary_href, filelists_href
    );

    Ok(RepoManifest {
        primary_href,
        filelists_href,
    })
}

/// Read a single attribute off an element, unescaped
pub(crate) fn get_attribute(
    element: &quick_xml::events::BytesStart<'_>,
    name: &str,
) -> Result<Option<String>> {
    let attr = element
        .try_get_attribute(name)
        .map_err(|e| Error::ParseError(format!("Malformed {name} attribute: {e}")))?;

    match attr {
        Some(attr) => {
            let value = attr
                .unescape_value()
                .map_err(|e| Error::ParseError(format!("Malformed {name} attribute: {e}")))?;
            Ok(Some(value.into_owned()))
        }
        None => Ok(None),
    }
}
