//! Helpers shared by the reqwest adapters.

use reqwest::Url;
use serde::Deserialize;
use thiserror::Error;

/// Errors raised while constructing an HTTP adapter.
#[derive(Debug, Error)]
pub enum AdapterBuildError {
    /// The reqwest client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
    /// The base URL cannot carry path segments.
    #[error("base URL {url} cannot be used as an API root")]
    BaseUrl {
        /// Offending URL.
        url: String,
    },
}

/// Validate `base` as an API root and make sure it ends with `/`.
pub(super) fn api_root(mut base: Url) -> Result<Url, AdapterBuildError> {
    if base.cannot_be_a_base() {
        return Err(AdapterBuildError::BaseUrl {
            url: base.to_string(),
        });
    }
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    Ok(base)
}

/// Append escaped path segments to an API root built by [`api_root`].
pub(super) fn endpoint(root: &Url, segments: &[&str]) -> Url {
    let mut url = root.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}

#[derive(Deserialize)]
struct ErrorBodyDto {
    message: Option<String>,
    error: Option<ErrorDetailDto>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ErrorDetailDto {
    Text(String),
    Detail { message: Option<String> },
}

/// Extract a display message from an error response body.
///
/// A non-blank JSON `message` field wins, then a non-blank `error.message` or
/// string `error`; otherwise a compacted preview of the raw body is returned.
pub(super) fn error_message(body: &[u8]) -> String {
    if let Ok(parsed) = serde_json::from_slice::<ErrorBodyDto>(body) {
        let detail = parsed.error.and_then(|error| match error {
            ErrorDetailDto::Text(text) => Some(text),
            ErrorDetailDto::Detail { message } => message,
        });
        if let Some(message) = non_blank(parsed.message).or_else(|| non_blank(detail)) {
            return message;
        }
    }
    body_preview(body)
}

fn non_blank(text: Option<String>) -> Option<String> {
    text.filter(|text| !text.trim().is_empty())
}

pub(super) fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
