// Thin HTTP client wrapper for extractors
//
// One reqwest client per extraction run, configured from ExtractorConfig
// (proxy, timeout, user agent). Retries, rate limiting and caching are the
// calling framework's job; nothing of the sort lives here.

use std::time::Duration;

use serde_json::Value;

use super::errors::ExtractError;
use super::traits::ExtractorConfig;

const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36";

/// HTTP client shared by the extractors
pub struct ApiClient {
    client: reqwest::Client,
}

impl ApiClient {
    /// Build a client from the extraction config
    pub fn new(config: &ExtractorConfig) -> Result<Self, ExtractError> {
        let mut builder = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds as u64))
            .user_agent(
                config
                    .user_agent
                    .as_deref()
                    .unwrap_or(DEFAULT_USER_AGENT),
            );

        if let Some(proxy_url) = config.proxy.as_deref() {
            let proxy = reqwest::Proxy::all(proxy_url).map_err(|e| {
                ExtractError::InvalidConfig(format!("Invalid proxy URL {}: {}", proxy_url, e))
            })?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| ExtractError::Unknown(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Fetch a page body as text
    pub async fn get_text(&self, url: &str, note: &str) -> Result<String, ExtractError> {
        eprintln!("[Api] Downloading {}", note);
        let response = self.client.get(url).send().await?;
        let response = Self::check_status(response)?;
        Ok(response.text().await?)
    }

    /// GET a JSON endpoint with query parameters
    pub async fn get_json(
        &self,
        url: &str,
        query: &[(&str, &str)],
        note: &str,
    ) -> Result<Value, ExtractError> {
        eprintln!("[Api] Downloading {} JSON", note);
        let response = self.client.get(url).query(query).send().await?;
        let response = Self::check_status(response)?;
        response
            .json()
            .await
            .map_err(|e| ExtractError::ParseError(format!("Invalid JSON for {}: {}", note, e)))
    }

    /// POST a form-encoded body and parse the JSON response
    pub async fn post_form(
        &self,
        url: &str,
        form: &[(&str, &str)],
        note: &str,
    ) -> Result<Value, ExtractError> {
        eprintln!("[Api] Downloading {} JSON", note);
        let response = self.client.post(url).form(form).send().await?;
        let response = Self::check_status(response)?;
        response
            .json()
            .await
            .map_err(|e| ExtractError::ParseError(format!("Invalid JSON for {}: {}", note, e)))
    }

    fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ExtractError> {
        let status = response.status();
        if !status.is_success() {
            return Err(ExtractError::HttpStatus(status.as_u16()));
        }
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_builds_with_defaults() {
        assert!(ApiClient::new(&ExtractorConfig::default()).is_ok());
    }

    #[test]
    fn test_client_builds_with_socks_proxy() {
        let config = ExtractorConfig::default()
            .with_proxy(Some("socks5://127.0.0.1:1080".to_string()));
        assert!(ApiClient::new(&config).is_ok());
    }

    #[test]
    fn test_client_rejects_bad_proxy() {
        let config = ExtractorConfig::default().with_proxy(Some("not a proxy".to_string()));
        assert!(matches!(
            ApiClient::new(&config),
            Err(ExtractError::InvalidConfig(_))
        ));
    }
}
