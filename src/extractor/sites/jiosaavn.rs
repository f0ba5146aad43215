// JioSaavn extractors
//
// Everything goes through the site's private JSON API (api.php). Single
// songs and podcast episodes resolve to a media record with per-bitrate
// audio formats; albums, featured playlists, show seasons and artist pages
// resolve to playlists whose entries carry the tokens needed to fetch
// formats later without another metadata round-trip.

use std::collections::HashSet;

use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

use crate::extractor::errors::ExtractError;
use crate::extractor::html::search_json_after;
use crate::extractor::http::ApiClient;
use crate::extractor::models::{
    Extraction, MediaFormat, MediaHint, MediaInfo, PlaylistEntry, PlaylistInfo,
};
use crate::extractor::paging::{drain_pages, page_count, PageFetcher, PAGE_CAP};
use crate::extractor::traits::{ExtractorConfig, SiteExtractor};
use crate::extractor::traverse::{collect_strings, first_of, traverse, Step};
use crate::extractor::value::{
    clean_html, int_or_none, normalize_language, split_names, str_or_none, unified_strdate,
    unified_timestamp, url_basename, url_or_none,
};

const URL_BASE: &str = r"https?://(?:www\.)?(?:jio)?saavn\.com";
const BASE_URL: &str = "https://www.jiosaavn.com";
const API_URL: &str = "https://www.jiosaavn.com/api.php";

const PLAYLIST_PAGE_SIZE: usize = 50;

lazy_static! {
    static ref SONG_URL_RE: Regex =
        Regex::new(&format!(r"^{}/song/[^/?#]+/(?P<id>[^/?#]+)", URL_BASE)).unwrap();
    static ref SONG_ALT_URL_RE: Regex =
        Regex::new(&format!(r"^{}/s/song/(?:[^/?#]+/){{3}}(?P<id>[^/?#]+)", URL_BASE)).unwrap();
    static ref EPISODE_URL_RE: Regex =
        Regex::new(&format!(r"^{}/shows/[^/?#]+/(?P<id>[^/?#]+)$", URL_BASE)).unwrap();
    static ref ALBUM_URL_RE: Regex =
        Regex::new(&format!(r"^{}/album/[^/?#]+/(?P<id>[^/?#]+)", URL_BASE)).unwrap();
    static ref PLAYLIST_URL_RE: Regex = Regex::new(&format!(
        r"^{}/(?:s/playlist/(?:[^/?#]+/){{2}}|featured/[^/?#]+/)(?P<id>[^/?#]+)",
        URL_BASE
    ))
    .unwrap();
    static ref SEASON_URL_RE: Regex = Regex::new(&format!(
        r"^{}/shows/[^#/?]+/(?P<season>\d+)/(?P<id>[^/?#]+)",
        URL_BASE
    ))
    .unwrap();
    static ref ARTIST_URL_RE: Regex =
        Regex::new(&format!(r"^{}/artist/[^/?#]+/(?P<id>[^/?#]+)", URL_BASE)).unwrap();
    static ref THUMB_SIZE_RE: Regex = Regex::new(r"-\d+x\d+\.").unwrap();
    static ref SHOW_VIEW_RE: Regex = Regex::new(r#""showView"\s*:\s*"#).unwrap();
}

fn match_id(re: &Regex, url: &str) -> Result<String, ExtractError> {
    re.captures(url)
        .and_then(|caps| caps.name("id"))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| ExtractError::InvalidUrl(url.to_string()))
}

/// GET against api.php with the common web-API query; `params` wins over
/// the defaults so callers can swap the RPC name.
async fn call_api(
    client: &ApiClient,
    kind: &str,
    token: &str,
    note: &str,
    params: &[(&str, &str)],
) -> Result<Value, ExtractError> {
    let mut query: Vec<(&str, &str)> = params.to_vec();
    let defaults = [
        ("__call", "webapi.get"),
        ("_format", "json"),
        ("_marker", "0"),
        ("ctx", "web6dot0"),
        ("token", token),
        ("type", kind),
    ];
    for (key, value) in defaults {
        if !query.iter().any(|(existing, _)| *existing == key) {
            query.push((key, value));
        }
    }
    client.get_json(API_URL, &query, note).await
}

/// The media-url token lives at the top level for catalog songs and under
/// more_info for episodes and show listings.
fn encrypted_media_url(song_data: &Value) -> Option<String> {
    first_of(
        song_data,
        &[
            &[Step::Key("encrypted_media_url")],
            &[Step::Key("more_info"), Step::Key("encrypted_media_url")],
        ],
    )
    .and_then(str_or_none)
}

fn audio_ext(reported: Option<&str>) -> String {
    match reported {
        Some("mp4") | None => "m4a".to_string(),
        Some(other) => other.to_string(),
    }
}

/// Map one raw song/episode object to the normalized record.
///
/// Fallback chains follow the API's two habitats for most fields: the top
/// level (catalog search shape) and more_info (episode/show shape).
fn song_from_data(song_data: &Value, fallback_url: Option<&str>) -> MediaInfo {
    let webpage_url = song_data
        .get("perma_url")
        .and_then(url_or_none)
        .or_else(|| fallback_url.map(str::to_string));
    let display_id = webpage_url.as_deref().map(url_basename);

    let mut artists: Vec<String> = song_data
        .get("primary_artists")
        .and_then(str_or_none)
        .map(|s| split_names(&s))
        .unwrap_or_default();
    if let Some(featured) = song_data.get("featured_artists").and_then(str_or_none) {
        artists.extend(split_names(&featured));
    }
    if artists.is_empty() {
        artists = collect_strings(
            song_data,
            &[
                Step::Key("more_info"),
                Step::Key("artistMap"),
                Step::Key("primary_artists"),
            ],
            "name",
        );
    }
    let mut seen = HashSet::new();
    artists.retain(|artist| seen.insert(artist.clone()));

    MediaInfo {
        id: song_data
            .get("id")
            .and_then(str_or_none)
            .unwrap_or_default(),
        display_id,
        title: first_of(song_data, &[&[Step::Key("song")], &[Step::Key("title")]])
            .and_then(str_or_none),
        album: song_data
            .get("album")
            .and_then(Value::as_str)
            .map(clean_html)
            .filter(|s| !s.is_empty()),
        description: traverse(
            song_data,
            &[Step::Key("more_info"), Step::Key("description")],
        )
        .and_then(str_or_none),
        thumbnail: song_data
            .get("image")
            .and_then(url_or_none)
            .map(|url| THUMB_SIZE_RE.replace(&url, "-500x500.").to_string()),
        duration: first_of(
            song_data,
            &[
                &[Step::Key("duration")],
                &[Step::Key("more_info"), Step::Key("duration")],
            ],
        )
        .and_then(int_or_none)
        .map(|d| d as u32),
        release_year: song_data
            .get("year")
            .and_then(int_or_none)
            .map(|y| y as i32),
        timestamp: traverse(
            song_data,
            &[Step::Key("more_info"), Step::Key("release_time")],
        )
        .and_then(str_or_none)
        .and_then(|s| unified_timestamp(&s)),
        upload_date: song_data
            .get("release_date")
            .and_then(str_or_none)
            .and_then(|s| unified_strdate(&s)),
        view_count: song_data
            .get("play_count")
            .and_then(int_or_none)
            .map(|c| c as u64),
        channel: first_of(
            song_data,
            &[
                &[Step::Key("label")],
                &[Step::Key("more_info"), Step::Key("label")],
            ],
        )
        .and_then(str_or_none),
        channel_id: first_of(
            song_data,
            &[
                &[Step::Key("label_id")],
                &[Step::Key("more_info"), Step::Key("label_id")],
            ],
        )
        .and_then(str_or_none),
        channel_url: first_of(
            song_data,
            &[
                &[Step::Key("label_url")],
                &[Step::Key("more_info"), Step::Key("label_url")],
            ],
        )
        .and_then(str_or_none)
        .map(|path| format!("{}{}", BASE_URL, path)),
        series: traverse(song_data, &[Step::Key("more_info"), Step::Key("show_title")])
            .and_then(str_or_none),
        series_id: traverse(song_data, &[Step::Key("more_info"), Step::Key("show_id")])
            .and_then(str_or_none),
        season: traverse(
            song_data,
            &[Step::Key("more_info"), Step::Key("season_title")],
        )
        .and_then(str_or_none),
        season_number: traverse(song_data, &[Step::Key("more_info"), Step::Key("season_no")])
            .and_then(int_or_none)
            .map(|n| n as u32),
        season_id: traverse(song_data, &[Step::Key("more_info"), Step::Key("season_id")])
            .and_then(str_or_none),
        episode_number: traverse(
            song_data,
            &[Step::Key("more_info"), Step::Key("episode_number")],
        )
        .and_then(int_or_none)
        .map(|n| n as u32),
        artists,
        cast: song_data
            .get("starring")
            .and_then(str_or_none)
            .map(|s| split_names(&s))
            .unwrap_or_default(),
        webpage_url,
        language: song_data
            .get("language")
            .and_then(str_or_none)
            .map(|l| normalize_language(&l)),
        media_type: Some(
            song_data
                .get("type")
                .and_then(str_or_none)
                .unwrap_or_else(|| "song".to_string()),
        ),
        formats: Vec::new(),
    }
}

/// One auth-token call per requested bitrate. Failures are soft: the
/// bitrate is skipped with a warning and the rest still resolve.
async fn fetch_formats(
    client: &ApiClient,
    encrypted_url: &str,
    bitrates: &[u32],
) -> Vec<MediaFormat> {
    let mut formats = Vec::new();
    for &bitrate in bitrates {
        let bitrate_str = bitrate.to_string();
        let note = format!("format info for {}", bitrate);
        let form = [
            ("__call", "song.generateAuthToken"),
            ("_format", "json"),
            ("bitrate", bitrate_str.as_str()),
            ("url", encrypted_url),
        ];
        let media_data = match client.post_form(API_URL, &form, &note).await {
            Ok(data) => data,
            Err(e) => {
                eprintln!("[JioSaavn] Unable to fetch format info for {}: {}", bitrate, e);
                continue;
            }
        };
        let auth_url = match media_data.get("auth_url").and_then(url_or_none) {
            Some(url) => url,
            None => {
                eprintln!("[JioSaavn] Unable to extract format info for {}", bitrate);
                continue;
            }
        };
        let reported = media_data.get("type").and_then(str_or_none);
        formats.push(MediaFormat {
            format_id: bitrate_str,
            url: auth_url,
            ext: audio_ext(reported.as_deref()),
            abr: Some(bitrate),
            acodec: None,
            vcodec: Some("none".to_string()),
        });
    }
    formats
}

fn array_of<'j>(data: &'j Value, key: &str) -> &'j [Value] {
    data.get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Playlist entries from raw song objects. Entries without both an id and
/// a permalink are dropped; everything else keeps its media-url token as a
/// hint for a later format-only pass.
fn playlist_entries(songs: &[Value]) -> Vec<PlaylistEntry> {
    songs
        .iter()
        .filter_map(|song_data| {
            let id = song_data.get("id").and_then(str_or_none)?;
            let webpage_url = song_data.get("perma_url").and_then(url_or_none)?;
            let media_hint = encrypted_media_url(song_data).map(|enc| MediaHint {
                id,
                encrypted_media_url: enc,
            });
            Some(PlaylistEntry {
                webpage_url,
                info: song_from_data(song_data, None),
                media_hint,
            })
        })
        .collect()
}

/// Single songs and podcast episodes
pub struct JioSaavnSongExtractor;

impl JioSaavnSongExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Format-only extraction for a playlist entry that already carries
    /// its tokens; no metadata call is made.
    pub async fn extract_hinted(
        &self,
        client: &ApiClient,
        hint: &MediaHint,
        config: &ExtractorConfig,
    ) -> Result<Extraction, ExtractError> {
        config.validate_bitrates()?;
        let info = MediaInfo {
            id: hint.id.clone(),
            formats: fetch_formats(client, &hint.encrypted_media_url, &config.bitrates).await,
            ..Default::default()
        };
        Ok(Extraction::Media(Box::new(info)))
    }
}

impl Default for JioSaavnSongExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SiteExtractor for JioSaavnSongExtractor {
    fn name(&self) -> &'static str {
        "jiosaavn:song"
    }

    fn matches(&self, url: &str) -> bool {
        SONG_URL_RE.is_match(url) || SONG_ALT_URL_RE.is_match(url) || EPISODE_URL_RE.is_match(url)
    }

    async fn extract(
        &self,
        client: &ApiClient,
        url: &str,
        config: &ExtractorConfig,
    ) -> Result<Extraction, ExtractError> {
        config.validate_bitrates()?;

        let (id, list_key, kind) = if let Some(caps) = EPISODE_URL_RE.captures(url) {
            (caps["id"].to_string(), "episodes", "episode")
        } else {
            let id = match_id(&SONG_URL_RE, url).or_else(|_| match_id(&SONG_ALT_URL_RE, url))?;
            (id, "songs", "song")
        };

        let payload = call_api(client, kind, &id, kind, &[]).await?;
        let song_data = payload
            .get(list_key)
            .and_then(|list| list.get(0))
            .ok_or(ExtractError::MissingField(list_key))?;

        let encrypted_url = encrypted_media_url(song_data)
            .ok_or(ExtractError::MissingField("encrypted_media_url"))?;

        let mut info = song_from_data(song_data, Some(url));
        info.formats = fetch_formats(client, &encrypted_url, &config.bitrates).await;
        Ok(Extraction::Media(Box::new(info)))
    }
}

/// Album pages; one API call returns the whole track list
pub struct JioSaavnAlbumExtractor;

impl JioSaavnAlbumExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JioSaavnAlbumExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SiteExtractor for JioSaavnAlbumExtractor {
    fn name(&self) -> &'static str {
        "jiosaavn:album"
    }

    fn matches(&self, url: &str) -> bool {
        ALBUM_URL_RE.is_match(url)
    }

    async fn extract(
        &self,
        client: &ApiClient,
        url: &str,
        _config: &ExtractorConfig,
    ) -> Result<Extraction, ExtractError> {
        let id = match_id(&ALBUM_URL_RE, url)?;
        let album_data = call_api(client, "album", &id, "album", &[]).await?;
        Ok(Extraction::Playlist(PlaylistInfo {
            id,
            title: album_data.get("title").and_then(str_or_none),
            entries: playlist_entries(array_of(&album_data, "songs")),
        }))
    }
}

/// Featured and shared playlists; the first page reports the total count
pub struct JioSaavnPlaylistExtractor;

impl JioSaavnPlaylistExtractor {
    pub fn new() -> Self {
        Self
    }

    async fn fetch_page(
        client: &ApiClient,
        token: &str,
        page: usize,
    ) -> Result<Value, ExtractError> {
        let page_str = page.to_string();
        let size = PLAYLIST_PAGE_SIZE.to_string();
        let note = format!("playlist page {}", page);
        call_api(
            client,
            "playlist",
            token,
            &note,
            &[("p", page_str.as_str()), ("n", size.as_str())],
        )
        .await
    }
}

impl Default for JioSaavnPlaylistExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SiteExtractor for JioSaavnPlaylistExtractor {
    fn name(&self) -> &'static str {
        "jiosaavn:playlist"
    }

    fn matches(&self, url: &str) -> bool {
        PLAYLIST_URL_RE.is_match(url)
    }

    async fn extract(
        &self,
        client: &ApiClient,
        url: &str,
        _config: &ExtractorConfig,
    ) -> Result<Extraction, ExtractError> {
        let id = match_id(&PLAYLIST_URL_RE, url)?;

        let first_page = Self::fetch_page(client, &id, 1).await?;
        let list_count = first_page
            .get("list_count")
            .and_then(int_or_none)
            .ok_or(ExtractError::MissingField("list_count"))? as usize;
        let total_pages = page_count(list_count, PLAYLIST_PAGE_SIZE);
        let title = first_page.get("listname").and_then(str_or_none);

        let mut entries = playlist_entries(array_of(&first_page, "songs"));
        for page in 2..=total_pages {
            let page_data = Self::fetch_page(client, &id, page).await?;
            entries.extend(playlist_entries(array_of(&page_data, "songs")));
        }

        Ok(Extraction::Playlist(PlaylistInfo { id, title, entries }))
    }
}

struct SeasonPages<'a> {
    client: &'a ApiClient,
    token: String,
    season: String,
}

#[async_trait]
impl PageFetcher for SeasonPages<'_> {
    async fn fetch_page(&self, page: usize) -> Result<Vec<PlaylistEntry>, ExtractError> {
        let page_str = page.to_string();
        let note = format!("show page {}", page);
        let page_data = call_api(
            self.client,
            "show",
            &self.token,
            &note,
            &[
                ("__call", "show.getAllEpisodes"),
                ("p", page_str.as_str()),
                ("show_id", self.token.as_str()),
                ("season_number", self.season.as_str()),
                ("api_version", "4"),
                ("sort_order", "desc"),
            ],
        )
        .await?;
        let episodes = page_data.as_array().map(Vec::as_slice).unwrap_or(&[]);
        Ok(playlist_entries(episodes))
    }
}

/// One season of a podcast show; the API token hides in the page state
pub struct JioSaavnShowSeasonExtractor;

impl JioSaavnShowSeasonExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JioSaavnShowSeasonExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SiteExtractor for JioSaavnShowSeasonExtractor {
    fn name(&self) -> &'static str {
        "jiosaavn:showplaylist"
    }

    fn matches(&self, url: &str) -> bool {
        SEASON_URL_RE.is_match(url)
    }

    async fn extract(
        &self,
        client: &ApiClient,
        url: &str,
        _config: &ExtractorConfig,
    ) -> Result<Extraction, ExtractError> {
        let caps = SEASON_URL_RE
            .captures(url)
            .ok_or_else(|| ExtractError::InvalidUrl(url.to_string()))?;
        let season = caps["season"].to_string();
        let show_id = caps["id"].to_string();
        let playlist_id = format!("{}-{}", show_id, season);

        let webpage = client.get_text(url, &playlist_id).await?;
        // the page state carries bare `undefined` literals
        let webpage = webpage.replace("undefined", "null");
        let show_view = search_json_after(&webpage, &SHOW_VIEW_RE)
            .ok_or_else(|| ExtractError::ParseError("showView state not found".to_string()))?;

        let token = show_view
            .get("current_id")
            .and_then(str_or_none)
            .ok_or(ExtractError::MissingField("current_id"))?;
        let title = traverse(
            &show_view,
            &[Step::Key("show"), Step::Key("title"), Step::Key("text")],
        )
        .and_then(str_or_none);

        let fetcher = SeasonPages {
            client,
            token,
            season,
        };
        let entries = drain_pages(&fetcher, PAGE_CAP).await?;

        Ok(Extraction::Playlist(PlaylistInfo {
            id: playlist_id,
            title,
            entries,
        }))
    }
}

async fn artist_page(
    client: &ApiClient,
    token: &str,
    page: usize,
) -> Result<Value, ExtractError> {
    let page_str = page.to_string();
    let note = format!("artist page {}", page + 1);
    call_api(
        client,
        "artist",
        token,
        &note,
        &[
            ("p", page_str.as_str()),
            ("n_song", "50"),
            ("n_album", "50"),
            ("sub_type", ""),
            ("includeMetaTags", ""),
            ("api_version", "4"),
            ("category", "alphabetical"),
            ("sort_order", "asc"),
        ],
    )
    .await
}

struct ArtistPages<'a> {
    client: &'a ApiClient,
    token: String,
}

#[async_trait]
impl PageFetcher for ArtistPages<'_> {
    async fn fetch_page(&self, page: usize) -> Result<Vec<PlaylistEntry>, ExtractError> {
        let page_data = artist_page(self.client, &self.token, page).await?;
        Ok(playlist_entries(array_of(&page_data, "topSongs")))
    }
}

/// Artist pages; page sizes vary, so only an empty page terminates
pub struct JioSaavnArtistExtractor;

impl JioSaavnArtistExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JioSaavnArtistExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SiteExtractor for JioSaavnArtistExtractor {
    fn name(&self) -> &'static str {
        "jiosaavn:artist"
    }

    fn matches(&self, url: &str) -> bool {
        ARTIST_URL_RE.is_match(url)
    }

    async fn extract(
        &self,
        client: &ApiClient,
        url: &str,
        _config: &ExtractorConfig,
    ) -> Result<Extraction, ExtractError> {
        let token = match_id(&ARTIST_URL_RE, url)?;

        let first_page = artist_page(client, &token, 0).await?;
        let title = first_page.get("name").and_then(str_or_none);

        let mut entries = playlist_entries(array_of(&first_page, "topSongs"));
        if !entries.is_empty() {
            let fetcher = ArtistPages {
                client,
                token: token.clone(),
            };
            // page 0 above already counts against the ceiling
            entries.extend(drain_pages(&fetcher, PAGE_CAP - 1).await?);
        }

        Ok(Extraction::Playlist(PlaylistInfo {
            id: token,
            title,
            entries,
        }))
    }
}
