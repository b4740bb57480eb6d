use std::path::PathBuf;

use log::{info, warn};

use crate::config::HarvesterConfig;
use crate::error::{HarvestError, Result};
use crate::models::VideoRecord;
use crate::services::writer;
use crate::services::youtube::YouTubeApi;
use crate::utils::{parse_iso8601_duration_to_seconds, parse_iso8601_to_timestamp};

/// Outcome of one completed harvest run.
#[derive(Debug)]
pub struct HarvestSummary {
    pub video_count: usize,
    pub total_duration_secs: i64,
    pub artifact: PathBuf,
}

/// Resolve a channel handle to the id of its uploads playlist.
///
/// A handle resolving to more than one channel is unusual; the first item
/// wins and the rest are reported.
pub async fn resolve_uploads_playlist(api: &impl YouTubeApi, handle: &str) -> Result<String> {
    let response = api.channel_for_handle(handle).await?;

    if response.items.len() > 1 {
        warn!(
            "Handle {handle:?} matched {} channels, using the first",
            response.items.len()
        );
    }

    let channel = response
        .items
        .into_iter()
        .next()
        .ok_or_else(|| HarvestError::ChannelNotFound {
            handle: handle.to_string(),
        })?;

    channel
        .content_details
        .related_playlists
        .uploads
        .ok_or_else(|| HarvestError::Schema {
            endpoint: "channels",
            detail: "channel has no uploads playlist reference".to_string(),
        })
}

/// Walk the uploads playlist page by page and collect every video id, in
/// playlist order.
///
/// Termination normally comes from the provider omitting `nextPageToken`;
/// `max_pages` bounds the loop in case it never does.
pub async fn collect_video_ids(
    api: &impl YouTubeApi,
    playlist_id: &str,
    page_size: u32,
    max_pages: u32,
) -> Result<Vec<String>> {
    let mut video_ids = Vec::new();
    let mut page_token: Option<String> = None;

    for _ in 0..max_pages {
        let page = api
            .playlist_items_page(playlist_id, page_size, page_token.as_deref())
            .await?;

        for item in page.items {
            video_ids.push(item.content_details.video_id);
        }

        page_token = page.next_page_token;
        if page_token.is_none() {
            return Ok(video_ids);
        }
    }

    Err(HarvestError::PageLimitExceeded { max_pages })
}

/// Fetch metadata for every collected id, `batch_size` ids per request.
///
/// The provider may return fewer items than requested when a video was
/// deleted or privated after id collection; those simply drop out of the
/// result.
pub async fn fetch_video_details(
    api: &impl YouTubeApi,
    video_ids: &[String],
    batch_size: usize,
) -> Result<Vec<VideoRecord>> {
    let batch_size = batch_size.max(1);
    let mut records = Vec::with_capacity(video_ids.len());

    for batch in video_ids.chunks(batch_size) {
        let response = api.videos_for_ids(batch).await?;
        records.extend(response.items.into_iter().map(VideoRecord::from));
    }

    Ok(records)
}

/// Run the full pipeline: resolve the uploads playlist, collect ids, fetch
/// details, write the dated artifact. Strictly sequential; the first error
/// at any stage aborts the run.
pub async fn run_harvest(
    api: &impl YouTubeApi,
    config: &HarvesterConfig,
) -> Result<HarvestSummary> {
    info!("Starting harvest for channel {}", config.channel_handle);

    let playlist_id = resolve_uploads_playlist(api, &config.channel_handle).await?;
    info!("Uploads playlist: {playlist_id}");

    let video_ids =
        collect_video_ids(api, &playlist_id, config.page_size, config.max_pages).await?;
    info!("Collected {} video ids", video_ids.len());

    let records =
        fetch_video_details(api, &video_ids, config.page_size as usize).await?;
    if records.len() < video_ids.len() {
        info!(
            "{} of {} videos are no longer available",
            video_ids.len() - records.len(),
            video_ids.len()
        );
    }

    let artifact = writer::save_records(&config.output_dir, &records)?;

    let total_duration_secs: i64 = records
        .iter()
        .map(|record| parse_iso8601_duration_to_seconds(&record.duration))
        .sum();
    info!(
        "Harvest finished: {} videos, {}h {:02}m of footage",
        records.len(),
        total_duration_secs / 3600,
        (total_duration_secs % 3600) / 60
    );

    let newest_upload = records
        .iter()
        .map(|record| parse_iso8601_to_timestamp(&record.published_at))
        .max();
    if let Some(timestamp) = newest_upload {
        if let Some(date) = chrono::DateTime::from_timestamp(timestamp, 0) {
            info!("Newest upload: {}", date.format("%Y-%m-%d"));
        }
    }

    Ok(HarvestSummary {
        video_count: records.len(),
        total_duration_secs,
        artifact,
    })
}
