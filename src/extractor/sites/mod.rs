// Site extractor registry

use super::traits::SiteExtractor;

pub mod cbn;
pub mod jiosaavn;

pub use cbn::{CbnExtractor, CbnFamilyExtractor};
pub use jiosaavn::{
    JioSaavnAlbumExtractor, JioSaavnArtistExtractor, JioSaavnPlaylistExtractor,
    JioSaavnShowSeasonExtractor, JioSaavnSongExtractor,
};

/// Every known extractor. The show-season matcher is registered before the
/// song matcher so `/shows/<slug>/<season>/<id>` never reads as an episode.
pub fn all_extractors() -> Vec<Box<dyn SiteExtractor>> {
    vec![
        Box::new(CbnExtractor::new()),
        Box::new(CbnFamilyExtractor::new()),
        Box::new(JioSaavnAlbumExtractor::new()),
        Box::new(JioSaavnPlaylistExtractor::new()),
        Box::new(JioSaavnShowSeasonExtractor::new()),
        Box::new(JioSaavnArtistExtractor::new()),
        Box::new(JioSaavnSongExtractor::new()),
    ]
}

/// First extractor that recognizes the URL
pub fn find_extractor(url: &str) -> Option<Box<dyn SiteExtractor>> {
    all_extractors().into_iter().find(|e| e.matches(url))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch() {
        let cases = [
            ("https://cbn.com/video/vida-dura-529", "cbn"),
            (
                "https://secure.cbn.com/partners/video/shows/miraclelivingtoday/6365325644112",
                "cbnfamily",
            ),
            ("https://www.jiosaavn.com/song/leja-re/OQsEfQFVUXk", "jiosaavn:song"),
            ("https://www.jiosaavn.com/album/96/buIOjYZDrNA_", "jiosaavn:album"),
            (
                "https://www.jiosaavn.com/featured/taaza-tunes/Me5RridRfDk_",
                "jiosaavn:playlist",
            ),
            (
                "https://www.jiosaavn.com/shows/talking-music/1/PjReFP-Sguk_",
                "jiosaavn:showplaylist",
            ),
            (
                "https://www.jiosaavn.com/shows/non-food-ways/XFMcKICOCgc_",
                "jiosaavn:song",
            ),
            (
                "https://www.jiosaavn.com/artist/krsna-songs/rYLBEve2z3U_",
                "jiosaavn:artist",
            ),
        ];
        for (url, expected) in cases {
            let extractor = find_extractor(url).unwrap_or_else(|| panic!("no match for {}", url));
            assert_eq!(extractor.name(), expected, "{}", url);
        }
    }

    #[test]
    fn test_unknown_url() {
        assert!(find_extractor("https://example.com/watch?v=123").is_none());
    }
}
