//! Patch catalog responses.
//!
//! Only the fields needed to locate a patch file are decoded. A missing,
//! null, zero or empty value anywhere along the way counts as not found.

use serde::Deserialize;

use super::RelayError;

#[derive(Debug, Deserialize)]
struct SearchEntry {
    #[serde(default)]
    id: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct PatchDetails {
    #[serde(default)]
    files: Option<Vec<FileEntry>>,
}

#[derive(Debug, Deserialize)]
struct FileEntry {
    #[serde(default)]
    filename: Option<String>,
    #[serde(default)]
    url: Option<String>,
}

/// The downloadable file of a patch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchFile {
    /// File name offered to the browser.
    pub filename: String,
    /// Where the file body is downloaded from.
    pub url: String,
}

/// Id of the first patch of a search response.
pub fn first_patch_id(body: &str) -> Result<u64, RelayError> {
    let entries: Option<Vec<Option<SearchEntry>>> = serde_json::from_str(body)?;
    let entry = entries
        .unwrap_or_default()
        .into_iter()
        .next()
        .flatten()
        .ok_or(RelayError::NoMatch)?;
    entry
        .id
        .filter(|id| *id != 0)
        .ok_or(RelayError::MissingField("id"))
}

/// First file of a patch details response.
pub fn first_file(body: &str) -> Result<PatchFile, RelayError> {
    let details: Option<PatchDetails> = serde_json::from_str(body)?;
    let file = details
        .and_then(|details| details.files)
        .unwrap_or_default()
        .into_iter()
        .next()
        .ok_or(RelayError::MissingField("files"))?;

    let filename = non_empty(file.filename).ok_or(RelayError::MissingField("filename"))?;
    let url = non_empty(file.url).ok_or(RelayError::MissingField("url"))?;
    Ok(PatchFile { filename, url })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}
