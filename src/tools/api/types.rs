use crate::error::{Result, WibbleError};
use serde::{Deserialize, Serialize};
use url::{form_urlencoded, Url};

/// A single API request: base URL, endpoint path, query pairs and optional body.
///
/// A request with a body is sent as `POST`, otherwise as `GET`.
///
/// # Examples
/// ```
/// use wibble::tools::api::ApiRequest;
///
/// let req = ApiRequest::new("https://api.example.com/v1")
///     .path("users")
///     .query("q", "jane doe");
/// let url = req.full_url().unwrap();
/// assert_eq!(url.as_str(), "https://api.example.com/v1/users?q=jane+doe");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiRequest {
    pub url: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub query: Vec<(String, String)>,
    #[serde(default)]
    pub body: Option<String>,
}

impl ApiRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Endpoint path appended to the base URL.
    ///
    /// A `?` in the path starts inline query parameters, so `"search?q=x"`
    /// is the same as `.path("search").query("q", "x")`.
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Build a request from aligned name/value vectors (`query[i]=value[i]`).
    pub fn from_parts(
        url: &str,
        query: &[String],
        value: &[String],
        path: &str,
    ) -> Result<Self> {
        if query.len() != value.len() {
            return Err(WibbleError::mismatch("value", query.len(), value.len()));
        }
        Ok(Self {
            url: url.to_string(),
            path: path.to_string(),
            query: query.iter().cloned().zip(value.iter().cloned()).collect(),
            body: None,
        })
    }

    /// Resolve base URL + path + query into the URL that is actually requested.
    ///
    /// Pairs with an empty name are dropped. Existing query parameters on the
    /// base URL come first, then inline parameters from `path`, then `query`.
    pub fn full_url(&self) -> Result<Url> {
        let mut url = Url::parse(self.url.trim())
            .map_err(|_| WibbleError::InvalidUrl(self.url.clone()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(WibbleError::InvalidUrl(self.url.clone()));
        }

        let (path, inline) = match self.path.trim().split_once('?') {
            Some((path, inline)) => (path, inline),
            None => (self.path.trim(), ""),
        };
        let path = path.trim_start_matches('/');
        if !path.is_empty() {
            let joined = format!("{}/{}", url.path().trim_end_matches('/'), path);
            url.set_path(&joined);
        }

        let inline: Vec<(String, String)> = form_urlencoded::parse(inline.as_bytes())
            .into_owned()
            .collect();
        let pairs: Vec<&(String, String)> = inline
            .iter()
            .chain(&self.query)
            .filter(|(name, _)| !name.is_empty())
            .collect();
        if !pairs.is_empty() {
            let mut query = url.query_pairs_mut();
            for (name, value) in pairs {
                query.append_pair(name, value);
            }
        }

        Ok(url)
    }
}
