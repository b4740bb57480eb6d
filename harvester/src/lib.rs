//! Channel Video Harvester: a batch pipeline that pulls a YouTube
//! channel's full video catalog and writes it to a dated JSON artifact.
//!
//! The pipeline is four strictly sequential stages — resolve the channel's
//! uploads playlist, collect every video id from it, fetch metadata for the
//! ids in batches, and write the result — exposed through
//! [`services::harvester`]. [`run_harvest`] chains them for one full run.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use config::{init_logger, load_environment, setup_harvest_scheduler, HarvesterConfig};
pub use error::{HarvestError, Result};
pub use models::VideoRecord;
pub use services::harvester::{
    collect_video_ids, fetch_video_details, resolve_uploads_playlist, run_harvest, HarvestSummary,
};
pub use services::youtube::{YouTubeApi, YouTubeClient};
