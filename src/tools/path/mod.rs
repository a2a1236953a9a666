//! Path Tools

mod utils;

use crate::error::{Result, WibbleError};
use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    File,
    Url,
}

/// Structured pieces of a filesystem path or URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathSource {
    pub kind: SourceKind,
    pub scheme: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    /// Everything before `base`, without the trailing separator.
    pub dir: String,
    /// Last path component; empty when the path ends with a separator.
    pub base: String,
    /// `base` without its extension.
    pub stem: String,
    pub ext: Option<String>,
    pub segments: Vec<String>,
    pub query: Vec<(String, String)>,
}

impl PathSource {
    pub fn is_url(&self) -> bool {
        self.kind == SourceKind::Url
    }
}

/// Decompose a path or URL.
///
/// Input with a `scheme://` prefix is treated as a URL, anything else as a
/// filesystem path (both `/` and `\` separate components). File paths are
/// kept byte for byte, including surrounding whitespace. URL path components
/// are percent-decoded after splitting, so an encoded `%2F` stays inside its
/// segment.
///
/// # Examples
/// ```
/// use wibble::tools::path::path_source;
///
/// let src = path_source("/data/2024/report.final.csv").unwrap();
/// assert_eq!(src.dir, "/data/2024");
/// assert_eq!(src.base, "report.final.csv");
/// assert_eq!(src.stem, "report.final");
/// assert_eq!(src.ext.as_deref(), Some("csv"));
/// ```
pub fn path_source(path: &str) -> Result<PathSource> {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return Err(WibbleError::EmptyPath);
    }

    if utils::has_scheme(trimmed) {
        url_source(trimmed)
    } else {
        Ok(file_source(path))
    }
}

fn file_source(path: &str) -> PathSource {
    let parts = utils::split_path(path, &['/', '\\']);
    PathSource {
        kind: SourceKind::File,
        scheme: None,
        host: None,
        port: None,
        dir: parts.dir,
        base: parts.base,
        stem: parts.stem,
        ext: parts.ext,
        segments: parts.segments,
        query: Vec::new(),
    }
}

fn url_source(raw: &str) -> Result<PathSource> {
    let url = Url::parse(raw).map_err(|_| WibbleError::InvalidUrl(raw.to_string()))?;
    let parts = utils::split_path(url.path(), &['/']);

    Ok(PathSource {
        kind: SourceKind::Url,
        scheme: Some(url.scheme().to_string()),
        host: url.host_str().map(utils::canonical_host),
        port: url.port_or_known_default(),
        dir: utils::decode(&parts.dir),
        base: utils::decode(&parts.base),
        stem: utils::decode(&parts.stem),
        ext: parts.ext.as_deref().map(utils::decode),
        segments: parts.segments.iter().map(|s| utils::decode(s)).collect(),
        query: url.query_pairs().into_owned().collect(),
    })
}
