//! Web Tools

mod utils;

use crate::config::Config;
use crate::error::Result;
use crate::tools::api::{send, ApiRequest};
use serde::{Deserialize, Serialize};

/// A fetched page: its headline text and raw HTML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebPage {
    pub url: String,
    pub title: String,
    pub body: String,
}

/// Fetch a URL and return its headline: `<title>`, else the first `<h1>`,
/// else the page text. Whitespace is collapsed; an empty page gives `""`.
pub async fn webbler(url: &str) -> Result<String> {
    web_page(url).await.map(|page| page.title)
}

/// Fetch a URL and keep both the headline and the raw HTML.
pub async fn web_page(url: &str) -> Result<WebPage> {
    web_page_with(&Config::default(), url).await
}

pub async fn web_page_with(cfg: &Config, url: &str) -> Result<WebPage> {
    let body = send(cfg, &ApiRequest::new(url)).await?;
    let title = utils::headline(&body);
    Ok(WebPage {
        url: url.to_string(),
        title,
        body,
    })
}
