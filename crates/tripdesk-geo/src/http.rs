use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::LookupError;

/// Builds the shared `reqwest` client used by every geodata service.
pub(crate) fn build_http_client(
    timeout_secs: u64,
    user_agent: &str,
) -> Result<Client, LookupError> {
    let client = Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(timeout_secs.min(10)))
        .user_agent(user_agent)
        .build()?;
    Ok(client)
}

pub(crate) fn parse_base_url(raw: &str) -> Result<Url, LookupError> {
    Url::parse(raw.trim()).map_err(|e| LookupError::InvalidBaseUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })
}

/// Appends query parameters to a clone of `base`, percent-encoding values.
pub(crate) fn with_query(base: &Url, params: &[(&str, &str)]) -> Url {
    let mut url = base.clone();
    {
        let mut pairs = url.query_pairs_mut();
        for (k, v) in params {
            pairs.append_pair(k, v);
        }
    }
    url
}

/// Sends a GET request, asserts a 2xx status, and parses the body as JSON.
pub(crate) async fn request_json(
    client: &Client,
    url: &Url,
) -> Result<serde_json::Value, LookupError> {
    let response = client
        .get(url.clone())
        .header(reqwest::header::ACCEPT, "application/json")
        .send()
        .await?;
    let response = response.error_for_status()?;
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| LookupError::Deserialize {
        context: url.to_string(),
        source: e,
    })
}
