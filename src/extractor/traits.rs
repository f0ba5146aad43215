// SiteExtractor trait and extraction configuration

use async_trait::async_trait;

use super::errors::ExtractError;
use super::http::ApiClient;
use super::models::Extraction;

/// Audio bitrates the media API is known to serve, in kbps
pub const VALID_BITRATES: [u32; 5] = [16, 32, 64, 128, 320];

/// Configuration for an extraction run
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    /// SOCKS5/HTTP proxy URL
    pub proxy: Option<String>,
    /// Request timeout in seconds
    pub timeout_seconds: u32,
    /// Override the client user agent
    pub user_agent: Option<String>,
    /// Audio bitrates to request, in kbps
    pub bitrates: Vec<u32>,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            proxy: None,
            timeout_seconds: 30,
            user_agent: None,
            bitrates: vec![128, 320],
        }
    }
}

impl ExtractorConfig {
    pub fn with_proxy(mut self, proxy: Option<String>) -> Self {
        self.proxy = proxy;
        self
    }

    pub fn with_timeout(mut self, seconds: u32) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    pub fn with_user_agent(mut self, user_agent: Option<String>) -> Self {
        self.user_agent = user_agent;
        self
    }

    pub fn with_bitrates(mut self, bitrates: Vec<u32>) -> Self {
        self.bitrates = bitrates;
        self
    }

    /// Reject bitrates the API does not serve
    pub fn validate_bitrates(&self) -> Result<(), ExtractError> {
        let invalid: Vec<String> = self
            .bitrates
            .iter()
            .filter(|b| !VALID_BITRATES.contains(b))
            .map(|b| b.to_string())
            .collect();

        if invalid.is_empty() {
            return Ok(());
        }

        let valid: Vec<String> = VALID_BITRATES.iter().map(|b| b.to_string()).collect();
        Err(ExtractError::InvalidConfig(format!(
            "Invalid bitrate(s): {}. Valid bitrates are: {}",
            invalid.join(", "),
            valid.join(", ")
        )))
    }
}

/// Trait for site extractors
#[async_trait]
pub trait SiteExtractor: Send + Sync {
    /// Name of the extractor (for logging)
    fn name(&self) -> &'static str;

    /// Check whether this extractor recognizes the URL. Pure, no network.
    fn matches(&self, url: &str) -> bool;

    /// Run the extraction against a recognized URL
    async fn extract(
        &self,
        client: &ApiClient,
        url: &str,
        config: &ExtractorConfig,
    ) -> Result<Extraction, ExtractError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bitrates_are_valid() {
        assert!(ExtractorConfig::default().validate_bitrates().is_ok());
    }

    #[test]
    fn test_invalid_bitrate_rejected() {
        let config = ExtractorConfig::default().with_bitrates(vec![128, 192]);
        let err = config.validate_bitrates().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("192"));
        assert!(msg.contains("320")); // lists the valid set
    }

    #[test]
    fn test_builder_chain() {
        let config = ExtractorConfig::default()
            .with_proxy(Some("socks5://127.0.0.1:1080".to_string()))
            .with_timeout(10)
            .with_bitrates(vec![64]);
        assert_eq!(config.timeout_seconds, 10);
        assert_eq!(config.bitrates, vec![64]);
        assert!(config.proxy.is_some());
    }
}
