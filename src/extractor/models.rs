// Common data models for extractors

use serde::{Deserialize, Serialize};

/// A single playable format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaFormat {
    /// Format ID (for audio this is the bitrate, e.g. "128", "320")
    pub format_id: String,
    /// Resolved stream URL
    pub url: String,
    /// File extension (m4a, mp3, mp4)
    pub ext: String,
    /// Audio bitrate in kbps
    pub abr: Option<u32>,
    /// Audio codec, if known
    pub acodec: Option<String>,
    /// Video codec ("none" for audio-only)
    pub vcodec: Option<String>,
}

/// Normalized metadata record consumed by the download pipeline
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MediaInfo {
    /// Canonical site id
    pub id: String,
    /// Human-facing id from the URL slug (permalink basename)
    pub display_id: Option<String>,
    pub title: Option<String>,
    pub album: Option<String>,
    pub description: Option<String>,
    pub thumbnail: Option<String>,
    /// Duration in seconds
    pub duration: Option<u32>,
    pub release_year: Option<i32>,
    /// Release time as unix seconds
    pub timestamp: Option<i64>,
    /// Upload date as YYYYMMDD
    pub upload_date: Option<String>,
    pub view_count: Option<u64>,
    /// Label / publisher
    pub channel: Option<String>,
    pub channel_id: Option<String>,
    pub channel_url: Option<String>,
    /// Podcast show, for episodes
    pub series: Option<String>,
    pub series_id: Option<String>,
    pub season: Option<String>,
    pub season_number: Option<u32>,
    pub season_id: Option<String>,
    pub episode_number: Option<u32>,
    pub artists: Vec<String>,
    pub cast: Vec<String>,
    pub webpage_url: Option<String>,
    /// ISO 639-2 code, "und" when unknown
    pub language: Option<String>,
    /// "song" or "episode"
    pub media_type: Option<String>,
    pub formats: Vec<MediaFormat>,
}

/// Prefetched tokens attached to playlist entries.
///
/// Lets the song extractor skip its metadata API call when the entry
/// already came with everything needed to resolve formats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaHint {
    pub id: String,
    pub encrypted_media_url: String,
}

/// One entry of a playlist result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistEntry {
    /// Permalink of the entry
    pub webpage_url: String,
    /// Metadata known at playlist time (no formats yet)
    pub info: MediaInfo,
    /// Tokens for a later format-only extraction
    pub media_hint: Option<MediaHint>,
}

/// Playlist result (album, featured playlist, show season, artist page)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistInfo {
    pub id: String,
    pub title: Option<String>,
    pub entries: Vec<PlaylistEntry>,
}

/// Third-party resolver a delegation points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resolver {
    Brightcove,
}

/// Url-transparent hand-off: the external framework resolves the
/// player URL with the named resolver and keeps our metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Delegation {
    pub player_url: String,
    pub resolver: Resolver,
}

/// What an extractor hands back to the pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Extraction {
    Media(Box<MediaInfo>),
    Playlist(PlaylistInfo),
    Delegated(Delegation),
}

impl Extraction {
    /// Convenience accessor for single-media results
    pub fn as_media(&self) -> Option<&MediaInfo> {
        match self {
            Self::Media(info) => Some(info),
            _ => None,
        }
    }

    pub fn as_playlist(&self) -> Option<&PlaylistInfo> {
        match self {
            Self::Playlist(playlist) => Some(playlist),
            _ => None,
        }
    }

    pub fn as_delegation(&self) -> Option<&Delegation> {
        match self {
            Self::Delegated(delegation) => Some(delegation),
            _ => None,
        }
    }
}
