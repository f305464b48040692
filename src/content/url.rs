//! # File URL Generation
//!
//! Turns stored-file URIs into absolute URLs a browser can fetch.

use super::errors::{ContentError, ContentResult};

/// Route serving `private://` files
const PRIVATE_FILES_PATH: &str = "system/files";

/// Resolves a stored file URI to an absolute URL
pub trait FileUrlGenerator: Send + Sync + std::fmt::Debug {
    fn absolute_url(&self, uri: &str) -> ContentResult<String>;
}

/// Maps `public://` URIs under a public files directory on `base_url`
///
/// - `public://a/b c.jpg` becomes `{base_url}/{public_path}/a/b%20c.jpg`
/// - `private://x` becomes `{base_url}/system/files/x`, served behind access control
/// - `http://` and `https://` URIs pass through unchanged
/// - a root-relative path `/x/y` becomes `{base_url}/x/y`
#[derive(Debug, Clone)]
pub struct PublicFileUrlGenerator {
    base_url: String,
    public_path: String,
}

impl PublicFileUrlGenerator {
    /// Create a generator serving public files from `public_path` on `base_url`
    pub fn new(base_url: impl Into<String>, public_path: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            public_path: public_path.into().trim_matches('/').to_string(),
        }
    }

    fn encode_path(path: &str) -> String {
        path.split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect::<Vec<_>>()
            .join("/")
    }
}

impl FileUrlGenerator for PublicFileUrlGenerator {
    fn absolute_url(&self, uri: &str) -> ContentResult<String> {
        if uri.starts_with("http://") || uri.starts_with("https://") {
            return Ok(uri.to_string());
        }

        if let Some(target) = uri.strip_prefix("public://") {
            let target = Self::encode_path(target.trim_start_matches('/'));
            if self.public_path.is_empty() {
                return Ok(format!("{}/{}", self.base_url, target));
            }
            return Ok(format!("{}/{}/{}", self.base_url, self.public_path, target));
        }

        if let Some(target) = uri.strip_prefix("private://") {
            let target = Self::encode_path(target.trim_start_matches('/'));
            return Ok(format!("{}/{}/{}", self.base_url, PRIVATE_FILES_PATH, target));
        }

        if uri.starts_with('/') {
            return Ok(format!("{}{}", self.base_url, Self::encode_path(uri)));
        }

        let scheme = uri.split_once("://").map(|(s, _)| s).unwrap_or(uri);
        Err(ContentError::UnsupportedScheme(scheme.to_string()))
    }
}
