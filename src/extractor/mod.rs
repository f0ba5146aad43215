// Extractor module - URL recognition, metadata mapping, playlist paging
//
// Site extractors turn a recognized URL into a normalized extraction
// result: a media record with formats, a playlist of entries, or a
// delegation to a third-party player resolver. Downloading, muxing and
// format selection happen in the consuming framework.

pub mod errors;
pub mod html;
pub mod http;
pub mod models;
pub mod paging;
pub mod sites;
pub mod traits;
pub mod traverse;
pub mod value;

pub use errors::ExtractError;
pub use http::ApiClient;
pub use models::{
    Delegation, Extraction, MediaFormat, MediaHint, MediaInfo, PlaylistEntry, PlaylistInfo,
    Resolver,
};
pub use sites::{all_extractors, find_extractor};
pub use traits::{ExtractorConfig, SiteExtractor};

/// One-shot extraction: build a client, dispatch on the URL, extract.
pub async fn extract_url(url: &str, config: &ExtractorConfig) -> Result<Extraction, ExtractError> {
    let extractor =
        find_extractor(url).ok_or_else(|| ExtractError::UnsupportedUrl(url.to_string()))?;
    eprintln!("[Extractor] {} handles {}", extractor.name(), url);
    let client = ApiClient::new(config)?;
    extractor.extract(&client, url, config).await
}
