//! API Tools

mod client;
mod utils;

pub mod types;

pub use types::*;

use crate::config::Config;
use crate::error::{Result, WibbleError};
use crate::tools::batch::batch;
use std::sync::Arc;
use std::time::Instant;

/// Call an API endpoint and return the raw response text.
///
/// `query` holds parameter names and `value` the matching values; they must be
/// the same length. `path` is appended to `url` with a single `/`.
///
/// # Examples
/// ```no_run
/// use wibble::tools::api::api_call;
///
/// # async fn example() -> wibble::Result<()> {
/// let body = api_call(
///     "https://api.example.com",
///     &["q".to_string()],
///     &["rust".to_string()],
///     "search",
/// )
/// .await?;
/// # Ok(())
/// # }
/// ```
pub async fn api_call(
    url: &str,
    query: &[String],
    value: &[String],
    path: &str,
) -> Result<String> {
    let request = ApiRequest::from_parts(url, query, value, path)?;
    api_call_with(&Config::default(), &request).await
}

/// Send one request with an explicit config.
pub async fn api_call_with(cfg: &Config, request: &ApiRequest) -> Result<String> {
    send(cfg, request).await
}

/// Call one endpoint per row of four aligned vectors.
///
/// Row `i` uses `urls[i]`, the single pair `queries[i]=values[i]` (skipped
/// when the name is empty) and `paths[i]`. The vectors must all be the same
/// length or nothing is sent. A failing row yields `Err` at its position
/// without failing the others.
pub async fn api_calls(
    urls: &[String],
    queries: &[String],
    values: &[String],
    paths: &[String],
) -> Result<Vec<Result<String>>> {
    let requests = batch_requests(urls, queries, values, paths)?;
    Ok(api_calls_with(&Config::default(), requests).await)
}

/// Send many requests concurrently; results keep input order.
pub async fn api_calls_with(cfg: &Config, requests: Vec<ApiRequest>) -> Vec<Result<String>> {
    let cfg = Arc::new(cfg.clone());
    let concurrency = cfg.effective_concurrency();
    let indexed: Vec<(usize, ApiRequest)> = requests.into_iter().enumerate().collect();

    batch(indexed, concurrency, move |(row, request)| {
        let cfg = Arc::clone(&cfg);
        async move {
            let result = send(&cfg, &request).await;
            if let Err(e) = &result {
                tracing::warn!(row, url = %request.url, error = %e, "batch row failed");
            }
            result
        }
    })
    .await
}

/// Zip the four batch columns into requests, rejecting misaligned input.
pub fn batch_requests(
    urls: &[String],
    queries: &[String],
    values: &[String],
    paths: &[String],
) -> Result<Vec<ApiRequest>> {
    let expected = urls.len();
    for (field, len) in [
        ("query", queries.len()),
        ("value", values.len()),
        ("path", paths.len()),
    ] {
        if len != expected {
            return Err(WibbleError::mismatch(field, expected, len));
        }
    }

    Ok(urls
        .iter()
        .zip(queries)
        .zip(values)
        .zip(paths)
        .map(|(((url, name), value), path)| {
            let request = ApiRequest::new(url.as_str()).path(path.as_str());
            if name.is_empty() {
                request
            } else {
                request.query(name.as_str(), value.as_str())
            }
        })
        .collect())
}

/// Issue the request and return the body of a success response.
pub(crate) async fn send(cfg: &Config, request: &ApiRequest) -> Result<String> {
    let url = request.full_url()?;
    let client = client::client_for(cfg)?;
    let start = Instant::now();

    let builder = match &request.body {
        Some(body) => client.post(url.clone()).body(body.clone()),
        None => client.get(url.clone()),
    };

    let response = builder.send().await?;
    let status = response.status();
    tracing::debug!(
        url = %url,
        status = status.as_u16(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "response"
    );
    utils::validate_status(status, url.as_str())?;

    Ok(response.text().await?)
}
