use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::error::{HarvestError, Result};
use crate::models::{ChannelListResponse, PlaylistItemsResponse, VideoListResponse};

pub const YOUTUBE_API_BASE: &str = "https://www.googleapis.com/youtube/v3";

/// The three read-only provider endpoints the pipeline consumes.
///
/// The pipeline stages are written against this trait so tests can drive
/// them with an in-memory fake instead of the live API.
#[async_trait]
pub trait YouTubeApi {
    /// Channel lookup by handle, requesting content details.
    async fn channel_for_handle(&self, handle: &str) -> Result<ChannelListResponse>;

    /// One page of playlist items, starting from an optional cursor.
    async fn playlist_items_page(
        &self,
        playlist_id: &str,
        page_size: u32,
        page_token: Option<&str>,
    ) -> Result<PlaylistItemsResponse>;

    /// Snippet, content details and statistics for a batch of video ids.
    async fn videos_for_ids(&self, video_ids: &[String]) -> Result<VideoListResponse>;
}

/// YouTube Data API v3 client authenticated with a static API key.
pub struct YouTubeClient {
    http: Client,
    api_key: String,
    base_url: String,
}

impl YouTubeClient {
    /// The provider enforces no timeout of its own, so every request gets
    /// an explicit one.
    pub fn new(api_key: String, timeout: Duration) -> Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(YouTubeClient {
            http,
            api_key,
            base_url: YOUTUBE_API_BASE.to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!("GET {url}");

        let response = self
            .http
            .get(&url)
            .query(&[("key", self.api_key.as_str())])
            .query(query)
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| HarvestError::Schema {
            endpoint,
            detail: e.to_string(),
        })
    }
}

#[async_trait]
impl YouTubeApi for YouTubeClient {
    async fn channel_for_handle(&self, handle: &str) -> Result<ChannelListResponse> {
        // https://developers.google.com/youtube/v3/docs/channels
        self.get_json(
            "channels",
            &[("part", "contentDetails"), ("forHandle", handle)],
        )
        .await
    }

    async fn playlist_items_page(
        &self,
        playlist_id: &str,
        page_size: u32,
        page_token: Option<&str>,
    ) -> Result<PlaylistItemsResponse> {
        // https://developers.google.com/youtube/v3/docs/playlistItems
        let max_results = page_size.to_string();
        let mut query = vec![
            ("part", "contentDetails"),
            ("maxResults", max_results.as_str()),
            ("playlistId", playlist_id),
        ];
        if let Some(token) = page_token {
            query.push(("pageToken", token));
        }
        self.get_json("playlistItems", &query).await
    }

    async fn videos_for_ids(&self, video_ids: &[String]) -> Result<VideoListResponse> {
        // https://developers.google.com/youtube/v3/docs/videos
        let ids = video_ids.join(",");
        self.get_json(
            "videos",
            &[
                ("part", "snippet,contentDetails,statistics"),
                ("id", ids.as_str()),
            ],
        )
        .await
    }
}
