use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SearchError {
    // Parameters
    #[error("min delay {min} is greater than max delay {max}")]
    InvalidDelayRange { min: u32, max: u32 },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    // Runtime
    #[error("failed to spawn search worker")]
    Spawn(#[source] std::io::Error),

    #[error("search worker panicked")]
    WorkerPanicked,

    // Settings
    #[error("could not determine a configuration directory")]
    NoConfigDirectory,

    #[error("IO error")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed settings file")]
    Settings(#[from] serde_json::Error),
}

impl SearchError {
    /// The path this error occurred at, if applicable.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::Io { path, .. } => Some(path),
            _ => None,
        }
    }

    /// Whether the caller should report this to the user and let them retry.
    ///
    /// Input errors are fixed by editing the parameters. Everything else means
    /// the search or the settings store is unusable.
    pub fn is_user_input(&self) -> bool {
        matches!(
            self,
            Self::InvalidDelayRange { .. } | Self::InvalidArgument(_)
        )
    }
}
