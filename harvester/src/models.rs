use serde::{Deserialize, Serialize};

/// One harvested video, as it appears in the output artifact.
///
/// The three statistics are integers-as-strings exactly as the provider
/// reports them. A statistic the provider withholds (e.g. comments
/// disabled) stays `None` and serializes as an explicit `null`, never a
/// synthesized zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoRecord {
    pub video_id: String,
    pub title: String,
    #[serde(rename = "publishedAt")]
    pub published_at: String,
    pub duration: String,
    #[serde(rename = "viewCount")]
    pub view_count: Option<String>,
    #[serde(rename = "likeCount")]
    pub like_count: Option<String>,
    #[serde(rename = "commentCount")]
    pub comment_count: Option<String>,
}

impl From<VideoItem> for VideoRecord {
    fn from(item: VideoItem) -> Self {
        VideoRecord {
            video_id: item.id,
            title: item.snippet.title,
            published_at: item.snippet.published_at,
            duration: item.content_details.duration,
            view_count: item.statistics.view_count,
            like_count: item.statistics.like_count,
            comment_count: item.statistics.comment_count,
        }
    }
}

// Wire types for the three YouTube Data API responses the pipeline reads.
// Only the fields the pipeline consumes are modeled; anything else in the
// response is ignored.

/// https://developers.google.com/youtube/v3/docs/channels/list
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChannelListResponse {
    #[serde(default)]
    pub items: Vec<ChannelItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChannelItem {
    #[serde(rename = "contentDetails")]
    pub content_details: ChannelContentDetails,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChannelContentDetails {
    #[serde(rename = "relatedPlaylists")]
    pub related_playlists: RelatedPlaylists,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RelatedPlaylists {
    pub uploads: Option<String>,
}

/// https://developers.google.com/youtube/v3/docs/playlistItems/list
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaylistItemsResponse {
    #[serde(default)]
    pub items: Vec<PlaylistItem>,
    #[serde(rename = "nextPageToken")]
    pub next_page_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistItem {
    #[serde(rename = "contentDetails")]
    pub content_details: PlaylistItemContentDetails,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistItemContentDetails {
    #[serde(rename = "videoId")]
    pub video_id: String,
}

/// https://developers.google.com/youtube/v3/docs/videos/list
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VideoListResponse {
    #[serde(default)]
    pub items: Vec<VideoItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VideoItem {
    pub id: String,
    pub snippet: VideoSnippet,
    #[serde(rename = "contentDetails")]
    pub content_details: VideoContentDetails,
    #[serde(default)]
    pub statistics: VideoStatistics,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VideoSnippet {
    pub title: String,
    #[serde(rename = "publishedAt")]
    pub published_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VideoContentDetails {
    pub duration: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VideoStatistics {
    #[serde(rename = "viewCount")]
    pub view_count: Option<String>,
    #[serde(rename = "likeCount")]
    pub like_count: Option<String>,
    #[serde(rename = "commentCount")]
    pub comment_count: Option<String>,
}
