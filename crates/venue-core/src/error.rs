use thiserror::Error;

#[derive(Debug, Error)]
pub enum VenueError {
    #[error("not initialized: run 'venue init'")]
    NotInitialized,

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// The remote venue-operations API rejected a conduction call or could
    /// not be reached. `status` is `None` for transport failures.
    #[error("conduction tracker error: {message}")]
    Tracker {
        status: Option<u16>,
        message: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl VenueError {
    pub fn tracker(status: Option<u16>, message: impl Into<String>) -> Self {
        VenueError::Tracker {
            status,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, VenueError>;
