use thiserror::Error;

/// Errors surfaced outside the game logic itself: configuration loading and
/// frontend I/O. The per-frame rules never fail.
#[derive(Error, Debug)]
pub enum GameError {
    /// IO error from the terminal or the filesystem
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file is not valid JSON for [`crate::settings::Settings`]
    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// Configuration parsed but holds values the game cannot run with
    #[error("Invalid configuration: {0}")]
    Config(String),
}
