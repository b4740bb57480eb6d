use thiserror::Error;

/// Everything that can abort a harvest run.
///
/// No stage recovers locally: whichever variant occurs first surfaces
/// unchanged to the caller and the run terminates without partial output.
#[derive(Debug, Error)]
pub enum HarvestError {
    /// Network-level failure or a non-2xx status from the provider.
    #[error("transport failure talking to YouTube: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body did not match the expected shape.
    #[error("unexpected response shape from the {endpoint} endpoint: {detail}")]
    Schema {
        endpoint: &'static str,
        detail: String,
    },

    /// The channel lookup returned zero items for the handle.
    #[error("no channel found for handle {handle:?}")]
    ChannelNotFound { handle: String },

    /// The provider kept returning pagination cursors past the safety bound.
    #[error("playlist paging did not finish within {max_pages} pages")]
    PageLimitExceeded { max_pages: u32 },

    /// Local persistence failure while writing the artifact.
    #[error("failed to write harvest artifact: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, HarvestError>;
