// src/client.rs

//! HTTP client for repository operations
//!
//! Provides a thin wrapper around reqwest's blocking client for fetching
//! repodata documents and source tarballs. Every fetch is a single
//! synchronous request; a non-success status or transport error aborts
//! the whole run, so there is no retry loop here.

use crate::error::{Error, Result};
use flate2::read::GzDecoder;
use reqwest::blocking::Client;
use std::io::Read;
use std::time::Duration;
use tracing::debug;

/// Default timeout for HTTP requests (30 seconds)
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client wrapper for repository fetches
pub struct RepositoryClient {
    client: Client,
}

impl RepositoryClient {
    /// Create a new repository client
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| Error::InitError(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }

    /// Download a URL to bytes
    ///
    /// Returns the response body, or an error if the request fails or the
    /// server answers with a non-success status.
    pub fn download_to_bytes(&self, url: &str) -> Result<Vec<u8>> {
        debug!("Fetching {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| Error::DownloadError(format!("Failed to fetch {url}: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::DownloadError(format!(
                "HTTP {} from {}",
                response.status(),
                url
            )));
        }

        let bytes = response
            .bytes()
            .map_err(|e| Error::DownloadError(format!("Failed to read response from {url}: {e}")))?;

        Ok(bytes.to_vec())
    }

    /// Fetch a gzip-compressed document and return the decompressed bytes
    ///
    /// Repodata documents (primary, filelists) are always gzip-compressed.
    pub fn fetch_gzip(&self, url: &str) -> Result<Vec<u8>> {
        let bytes = self.download_to_bytes(url)?;

        let mut decoder = GzDecoder::new(bytes.as_slice());
        let mut decompressed = Vec::new();
        decoder
            .read_to_end(&mut decompressed)
            .map_err(|e| Error::ParseError(format!("Failed to decompress data from {url}: {e}")))?;

        debug!(
            "Decompressed {} bytes -> {} bytes",
            bytes.len(),
            decompressed.len()
        );
        Ok(decompressed)
    }
}

/// Join a repository base URL with a relative href
pub fn join_url(base: &str, href: &str) -> String {
    if base.ends_with('/') {
        format!("{base}{href}")
    } else {
        format!("{base}/{href}")
    }
}
