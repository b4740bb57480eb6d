use anyhow::Result;
use log::info;

use harvester::{
    config, run_harvest, setup_harvest_scheduler, HarvesterConfig, YouTubeClient,
};

#[tokio::main]
async fn main() -> Result<()> {
    config::load_environment();
    config::init_logger();

    let config = HarvesterConfig::from_env()?;

    match config.schedule.clone() {
        Some(schedule) => {
            let _scheduler = setup_harvest_scheduler(config, &schedule).await?;
            tokio::signal::ctrl_c().await?;
            info!("Shutting down harvest scheduler.");
        }
        None => {
            let client = YouTubeClient::new(config.api_key.clone(), config.http_timeout)?;
            let summary = run_harvest(&client, &config).await?;
            info!(
                "Harvested {} videos into {}",
                summary.video_count,
                summary.artifact.display()
            );
        }
    }

    Ok(())
}
