use thiserror::Error;

/// Library-level errors using thiserror for structured error handling.
///
/// None of these propagate out of playback operations; playback failures
/// degrade to logged no-ops. They surface only at the seams where the
/// embedding application talks to this crate directly.

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Audio engine failed to start")]
    StartFailed(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("No audio output device available")]
    NoOutputDevice,

    #[error("Audio engine unavailable: {0}")]
    Unavailable(String),
}

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to load audio settings from {path}")]
    LoadFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Failed to save audio settings to {path}")]
    SaveFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Invalid audio settings: {0}")]
    Invalid(String),
}

/// Type alias for application Results using anyhow for context chaining
pub type AppResult<T> = anyhow::Result<T>;
