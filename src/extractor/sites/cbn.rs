// CBN extractors
//
// cbn.com hosts its catalog on Brightcove, so both extractors resolve to a
// player-URL delegation: the watch page carries the Brightcove video id in a
// <video-js> element, and the partner site puts it directly in the URL.

use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;

use crate::extractor::errors::ExtractError;
use crate::extractor::html::{extract_attributes, find_element_html};
use crate::extractor::http::ApiClient;
use crate::extractor::models::{Delegation, Extraction, Resolver};
use crate::extractor::traits::{ExtractorConfig, SiteExtractor};

const ACCOUNT_ID: &str = "734546207001";
const PLAYER_ID: &str = "TADSYViJy";
const EMBED: &str = "default";

lazy_static! {
    static ref VIDEO_URL_RE: Regex =
        Regex::new(r"^https?://(?:www\.)?cbn\.com/video/(?:[^/?#]+/)?(?P<id>[^/?&#]+)").unwrap();
    static ref FAMILY_URL_RE: Regex = Regex::new(
        r"^https?://(?:www\.)?secure\.cbn\.com/partners/video/(?:shows|impactstories)/[^/?#]+/(?P<id>[^/?&#]+)"
    )
    .unwrap();
    static ref PLAYER_TAG_ID_RE: Regex = Regex::new(r"player-\d+").unwrap();
}

/// Delegation for a known Brightcove video id
fn brightcove_delegation(video_id: &str) -> Extraction {
    Extraction::Delegated(Delegation {
        player_url: format!(
            "https://players.brightcove.net/{}/{}_{}/index.html?videoId={}",
            ACCOUNT_ID, PLAYER_ID, EMBED, video_id
        ),
        resolver: Resolver::Brightcove,
    })
}

/// Brightcove video id from a cbn.com watch page
fn video_id_from_page(webpage: &str) -> Result<String, ExtractError> {
    let tag = find_element_html(webpage, "video-js", "id", &PLAYER_TAG_ID_RE)
        .ok_or(ExtractError::MissingField("video-js player element"))?;
    extract_attributes(tag)
        .remove("data-video-id")
        .filter(|v| !v.is_empty())
        .ok_or(ExtractError::MissingField("data-video-id"))
}

/// Watch pages on cbn.com
pub struct CbnExtractor;

impl CbnExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CbnExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SiteExtractor for CbnExtractor {
    fn name(&self) -> &'static str {
        "cbn"
    }

    fn matches(&self, url: &str) -> bool {
        VIDEO_URL_RE.is_match(url)
    }

    async fn extract(
        &self,
        client: &ApiClient,
        url: &str,
        _config: &ExtractorConfig,
    ) -> Result<Extraction, ExtractError> {
        let display_id = VIDEO_URL_RE
            .captures(url)
            .and_then(|caps| caps.name("id"))
            .ok_or_else(|| ExtractError::InvalidUrl(url.to_string()))?
            .as_str()
            .to_string();

        let webpage = client.get_text(url, &display_id).await?;
        let video_id = video_id_from_page(&webpage)?;
        eprintln!("[Cbn] {} resolved to brightcove id {}", display_id, video_id);
        Ok(brightcove_delegation(&video_id))
    }
}

/// Partner pages on secure.cbn.com; the URL already carries the video id
pub struct CbnFamilyExtractor;

impl CbnFamilyExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CbnFamilyExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SiteExtractor for CbnFamilyExtractor {
    fn name(&self) -> &'static str {
        "cbnfamily"
    }

    fn matches(&self, url: &str) -> bool {
        FAMILY_URL_RE.is_match(url)
    }

    async fn extract(
        &self,
        _client: &ApiClient,
        url: &str,
        _config: &ExtractorConfig,
    ) -> Result<Extraction, ExtractError> {
        let video_id = FAMILY_URL_RE
            .captures(url)
            .and_then(|caps| caps.name("id"))
            .ok_or_else(|| ExtractError::InvalidUrl(url.to_string()))?
            .as_str();
        Ok(brightcove_delegation(video_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_url_match() {
        let cbn = CbnExtractor::new();
        assert!(cbn.matches("https://cbn.com/video/shows/faith-nation-january-20-2026"));
        assert!(cbn.matches("https://www.cbn.com/video/vida-dura-529"));
        assert!(cbn.matches(
            "https://cbn.com/video/stories/newsmakers-israel-chaos-and-deception-last-days-1826"
        ));
        assert!(!cbn.matches("https://cbn.com/radio/morning-show"));
        assert!(!cbn.matches("https://example.com/video/foo"));
    }

    #[test]
    fn test_family_url_match() {
        let family = CbnFamilyExtractor::new();
        assert!(family.matches(
            "https://secure.cbn.com/partners/video/shows/miraclelivingtoday/6365325644112"
        ));
        assert!(family.matches(
            "https://secure.cbn.com/partners/video/impactstories/salvations/6338841578112"
        ));
        assert!(!family.matches("https://secure.cbn.com/partners/video/other/x/123"));
        assert!(!family.matches("https://cbn.com/video/vida-dura-529"));
    }

    #[test]
    fn test_brightcove_delegation_url() {
        let extraction = brightcove_delegation("6388008634112");
        let delegation = extraction.as_delegation().unwrap();
        assert_eq!(delegation.resolver, Resolver::Brightcove);
        assert_eq!(
            delegation.player_url,
            "https://players.brightcove.net/734546207001/TADSYViJy_default/index.html?videoId=6388008634112"
        );
    }

    #[test]
    fn test_video_id_from_page() {
        let webpage = r#"
            <html><body>
            <video-js id="hero-teaser" data-video-id="000"></video-js>
            <video-js id="player-7" class="vjs" data-video-id="6313599036112"></video-js>
            </body></html>
        "#;
        assert_eq!(video_id_from_page(webpage).unwrap(), "6313599036112");
    }

    #[test]
    fn test_video_id_missing_player() {
        let err = video_id_from_page("<html><body>nothing here</body></html>").unwrap_err();
        assert!(matches!(err, ExtractError::MissingField(_)));
    }
}
