//! HTTP transport for v1 API calls

use super::error::Result;
use super::request::API_KEY_PARAM;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Maximum length of response body to log
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Truncate a response body and drop non-printable characters for logging
fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        let mut end = MAX_LOG_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... [truncated, {} bytes total]", &body[..end], body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

/// Copy of `url` with the secret key masked, safe to log
pub fn redact_url(url: &Url) -> String {
    let mut redacted = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let value = if k == API_KEY_PARAM {
                "***".to_string()
            } else {
                v.into_owned()
            };
            (k.into_owned(), value)
        })
        .collect();

    if !pairs.is_empty() {
        redacted.query_pairs_mut().clear().extend_pairs(pairs);
    }
    redacted.to_string()
}

/// Thin GET-only wrapper over reqwest
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a transport whose requests give up after `timeout`
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("fisherman/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self { client })
    }

    /// Issue a GET and return the body, whatever the HTTP status.
    ///
    /// The v1 API reports failures inside the body, so non-2xx statuses are
    /// only logged here and left for the envelope decoder to judge.
    pub async fn get(&self, url: &Url) -> Result<Vec<u8>> {
        tracing::debug!("GET {}", redact_url(url));

        // reqwest errors embed the request URL, which carries the api key
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(reqwest::Error::without_url)?;

        tracing::debug!(
            "Response {} - {}",
            status,
            sanitize_for_log(&String::from_utf8_lossy(&body))
        );
        if !status.is_success() {
            tracing::warn!("API returned HTTP {}", status);
        }

        Ok(body.to_vec())
    }
}
