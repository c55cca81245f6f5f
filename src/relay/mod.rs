//! Patch relay
//!
//! Resolves a patch slug against the patch-sharing catalog and downloads the
//! first file of the matching patch, ready to be served as an attachment.
//! Every failure maps to HTTP 404; there are no retries.

pub mod catalog;

use std::io::Read;
use std::time::Duration;

pub use catalog::PatchFile;

/// Base URL of the patch catalog API.
pub const DEFAULT_API: &str = "https://patchstorage.com/api/alpha";

/// Catalog platform id of Cardinal patches.
pub const CARDINAL_PLATFORM: u32 = 7834;

/// Status code reported for every relay failure.
pub const NOT_FOUND: u16 = 404;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors that can occur while relaying a patch.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("no slug given")]
    MissingSlug,
    #[error("request to {url} failed: {message}")]
    Request { url: String, message: String },
    #[error("invalid catalog response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("no patch matches the slug")]
    NoMatch,
    #[error("catalog response has no {0}")]
    MissingField(&'static str),
    #[error("patch file is empty")]
    EmptyBody,
}

impl RelayError {
    /// HTTP status to answer with. Always 404.
    pub fn status(&self) -> u16 {
        NOT_FOUND
    }
}

/// A downloaded patch file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchDownload {
    /// File name as listed in the catalog.
    pub filename: String,
    /// File body.
    pub contents: Vec<u8>,
}

impl PatchDownload {
    /// The file name reduced to a single path component without quotes.
    pub fn safe_filename(&self) -> String {
        let name = self
            .filename
            .rsplit(&['/', '\\'][..])
            .next()
            .unwrap_or_default()
            .replace('"', "");
        if name.is_empty() || name == "." || name == ".." {
            "patch".to_string()
        } else {
            name
        }
    }

    /// Response headers forcing a browser download.
    pub fn headers(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Content-Description", "File Transfer".to_string()),
            ("Content-Type", "application/octet-stream".to_string()),
            (
                "Content-Disposition",
                format!("attachment; filename=\"{}\"", self.safe_filename()),
            ),
            ("Expires", "0".to_string()),
            ("Cache-Control", "must-revalidate".to_string()),
            ("Pragma", "public".to_string()),
            ("Content-Length", self.contents.len().to_string()),
        ]
    }
}

/// Blocking client of the patch catalog.
pub struct PatchRelay {
    api_base: String,
    platform: u32,
    agent: ureq::Agent,
}

impl PatchRelay {
    /// Create a relay for the catalog at `api_base`.
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into().trim_end_matches('/').to_string(),
            platform: CARDINAL_PLATFORM,
            agent: ureq::AgentBuilder::new().timeout(DEFAULT_TIMEOUT).build(),
        }
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.agent = ureq::AgentBuilder::new().timeout(timeout).build();
        self
    }

    /// Set the catalog platform id.
    pub fn with_platform(mut self, platform: u32) -> Self {
        self.platform = platform;
        self
    }

    /// Resolve `slug` and download the first file of the matching patch.
    pub fn fetch(&self, slug: &str) -> Result<PatchDownload, RelayError> {
        let slug = slug.trim();
        if slug.is_empty() {
            return Err(RelayError::MissingSlug);
        }

        let search_url = format!("{}/patches", self.api_base);
        let platform = self.platform.to_string();
        let search = self.get_text(&search_url, &[("platform", &platform), ("slug", slug)])?;
        let id = catalog::first_patch_id(&search)?;
        log::debug!("slug '{slug}' resolved to patch {id}");

        let details = self.get_text(&format!("{}/patches/{id}", self.api_base), &[])?;
        let file = catalog::first_file(&details)?;

        let contents = self.get_bytes(&file.url)?;
        if contents.is_empty() {
            return Err(RelayError::EmptyBody);
        }
        log::info!("downloaded '{}' ({} bytes)", file.filename, contents.len());

        Ok(PatchDownload {
            filename: file.filename,
            contents,
        })
    }

    fn call(&self, url: &str, query: &[(&str, &str)]) -> Result<ureq::Response, RelayError> {
        let mut request = self.agent.get(url);
        for (key, value) in query {
            request = request.query(key, value);
        }
        request.call().map_err(|err| RelayError::Request {
            url: url.to_string(),
            message: err.to_string(),
        })
    }

    fn get_text(&self, url: &str, query: &[(&str, &str)]) -> Result<String, RelayError> {
        let body = self
            .call(url, query)?
            .into_string()
            .map_err(|err| RelayError::Request {
                url: url.to_string(),
                message: err.to_string(),
            })?;
        if body.is_empty() {
            return Err(RelayError::EmptyBody);
        }
        Ok(body)
    }

    fn get_bytes(&self, url: &str) -> Result<Vec<u8>, RelayError> {
        let mut bytes = Vec::new();
        self.call(url, &[])?
            .into_reader()
            .read_to_end(&mut bytes)
            .map_err(|err| RelayError::Request {
                url: url.to_string(),
                message: err.to_string(),
            })?;
        Ok(bytes)
    }
}

impl Default for PatchRelay {
    fn default() -> Self {
        Self::new(DEFAULT_API)
    }
}
