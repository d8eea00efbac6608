/// Errors raised outside the frame engine: terminal I/O and tuning files.
///
/// The simulation itself never fails; everything here belongs to the
/// bootstrap around it.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to read tuning file '{path}': {source}")]
    ConfigRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse tuning file '{path}': {source}")]
    ConfigParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid tuning: {0}")]
    InvalidTuning(String),
}
