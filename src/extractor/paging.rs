// Pagination drivers for playlist-shaped endpoints
//
// Two termination styles exist in the wild:
// - the endpoint reports a total item count up front (featured playlists),
// - the endpoint just returns an empty page eventually (artist pages, show
//   seasons), with no count anywhere.
// The empty-page style gets a hard ceiling so a misbehaving API cannot spin
// the loop forever.

use async_trait::async_trait;

use super::errors::ExtractError;
use super::models::PlaylistEntry;

/// Upper bound on page requests for endpoints without a total count
pub const PAGE_CAP: usize = 20_000;

/// Number of pages needed for `total_items` at `page_size` per page
pub fn page_count(total_items: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total_items.div_ceil(page_size)
}

/// One page-fetching strategy; pages are 1-based
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_page(&self, page: usize) -> Result<Vec<PlaylistEntry>, ExtractError>;
}

/// Collect pages until the first empty one, bounded by `cap` requests.
///
/// API order is preserved.
pub async fn drain_pages(
    fetcher: &dyn PageFetcher,
    cap: usize,
) -> Result<Vec<PlaylistEntry>, ExtractError> {
    let mut entries = Vec::new();
    let mut page = 1;
    while page <= cap {
        let batch = fetcher.fetch_page(page).await?;
        if batch.is_empty() {
            break;
        }
        entries.extend(batch);
        page += 1;
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::models::MediaInfo;

    fn make_entry(id: &str) -> PlaylistEntry {
        PlaylistEntry {
            webpage_url: format!("https://example.com/song/{}", id),
            info: MediaInfo {
                id: id.to_string(),
                ..Default::default()
            },
            media_hint: None,
        }
    }

    /// Serves `pages` then empty pages forever
    struct FixedPages {
        pages: Vec<Vec<PlaylistEntry>>,
    }

    #[async_trait]
    impl PageFetcher for FixedPages {
        async fn fetch_page(&self, page: usize) -> Result<Vec<PlaylistEntry>, ExtractError> {
            Ok(self.pages.get(page - 1).cloned().unwrap_or_default())
        }
    }

    /// Never returns an empty page
    struct Endless;

    #[async_trait]
    impl PageFetcher for Endless {
        async fn fetch_page(&self, page: usize) -> Result<Vec<PlaylistEntry>, ExtractError> {
            Ok(vec![make_entry(&page.to_string())])
        }
    }

    #[test]
    fn test_page_count() {
        assert_eq!(page_count(301, 50), 7);
        assert_eq!(page_count(300, 50), 6);
        assert_eq!(page_count(1, 50), 1);
        assert_eq!(page_count(0, 50), 0);
        assert_eq!(page_count(10, 0), 0);
    }

    #[tokio::test]
    async fn test_drain_stops_at_empty_page() {
        let fetcher = FixedPages {
            pages: vec![
                vec![make_entry("a"), make_entry("b")],
                vec![make_entry("c")],
            ],
        };
        let entries = drain_pages(&fetcher, PAGE_CAP).await.unwrap();
        let ids: Vec<&str> = entries.iter().map(|e| e.info.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]); // API order kept
    }

    #[tokio::test]
    async fn test_drain_respects_cap() {
        let entries = drain_pages(&Endless, 3).await.unwrap();
        assert_eq!(entries.len(), 3);
    }

    #[tokio::test]
    async fn test_drain_empty_first_page() {
        let fetcher = FixedPages { pages: vec![] };
        let entries = drain_pages(&fetcher, PAGE_CAP).await.unwrap();
        assert!(entries.is_empty());
    }
}
