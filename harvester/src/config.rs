use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use env_logger::Builder;
use log::{error, info, LevelFilter};
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::services::harvester::run_harvest;
use crate::services::youtube::YouTubeClient;

/// Page-size ceiling enforced by the provider.
pub const MAX_PAGE_SIZE: u32 = 50;

const DEFAULT_PAGE_SIZE: u32 = 50;
const DEFAULT_MAX_PAGES: u32 = 200;
const DEFAULT_OUTPUT_DIR: &str = "./data";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Run configuration, read from the environment once at startup and passed
/// down explicitly so the pipeline stays testable.
#[derive(Debug, Clone)]
pub struct HarvesterConfig {
    pub api_key: String,
    pub channel_handle: String,
    /// Serves both the playlist page size and the detail-fetch batch size.
    pub page_size: u32,
    /// Safety bound for the pagination loop.
    pub max_pages: u32,
    pub output_dir: PathBuf,
    pub http_timeout: Duration,
    /// 6-field cron expression; when set the binary stays resident and
    /// harvests on schedule instead of running once.
    pub schedule: Option<String>,
}

impl HarvesterConfig {
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("YOUTUBE_API_KEY")
            .context("YOUTUBE_API_KEY environment variable must be set")?;
        let channel_handle = env::var("CHANNEL_HANDLE")
            .context("CHANNEL_HANDLE environment variable must be set")?;

        let page_size: u32 = parse_var("HARVEST_PAGE_SIZE", DEFAULT_PAGE_SIZE)?;
        let max_pages = parse_var("HARVEST_MAX_PAGES", DEFAULT_MAX_PAGES)?;
        let timeout_secs = parse_var("HARVEST_HTTP_TIMEOUT_SECS", DEFAULT_HTTP_TIMEOUT_SECS)?;
        let output_dir =
            env::var("HARVEST_OUTPUT_DIR").unwrap_or_else(|_| DEFAULT_OUTPUT_DIR.to_string());

        Ok(HarvesterConfig {
            api_key,
            channel_handle,
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
            max_pages,
            output_dir: PathBuf::from(output_dir),
            http_timeout: Duration::from_secs(timeout_secs),
            schedule: env::var("HARVEST_SCHEDULE").ok(),
        })
    }
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .with_context(|| format!("{name} is set to an invalid value: {raw:?}")),
        Err(_) => Ok(default),
    }
}

pub fn load_environment() {
    dotenv::dotenv().ok();
}

pub fn init_logger() {
    Builder::new().filter_level(LevelFilter::Info).init();
    info!("Starting channel harvester...");
}

/// Register the pipeline as a recurring job. Each firing is one full run; a
/// failed run is logged and the schedule keeps going — retry policy stays
/// with the operator.
pub async fn setup_harvest_scheduler(
    config: HarvesterConfig,
    schedule: &str,
) -> Result<JobScheduler> {
    let scheduler = JobScheduler::new().await?;

    let harvest_job = Job::new_async(schedule, move |_uuid, _l| {
        let config = config.clone();
        Box::pin(async move {
            let client = match YouTubeClient::new(config.api_key.clone(), config.http_timeout) {
                Ok(client) => client,
                Err(e) => {
                    error!("Failed to build YouTube client: {e}");
                    return;
                }
            };

            match run_harvest(&client, &config).await {
                Ok(summary) => info!(
                    "Scheduled harvest saved {} videos to {}",
                    summary.video_count,
                    summary.artifact.display()
                ),
                Err(e) => error!("Scheduled harvest failed: {e}"),
            }
        })
    })?;

    scheduler.add(harvest_job).await?;
    scheduler.start().await?;
    info!("Harvest scheduler started.");

    Ok(scheduler)
}
