pub mod extractor;

pub use extractor::{
    all_extractors, extract_url, find_extractor, ApiClient, Delegation, ExtractError,
    Extraction, ExtractorConfig, MediaFormat, MediaHint, MediaInfo, PlaylistEntry, PlaylistInfo,
    Resolver, SiteExtractor,
};
