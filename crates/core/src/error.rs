/// Result alias that carries the custom [`RaceError`] type.
pub type Result<T> = std::result::Result<T, RaceError>;

/// Common error type for the core crate.
#[derive(Debug, thiserror::Error)]
pub enum RaceError {
    /// Free-form message for failures that do not deserve their own variant.
    #[error("{0}")]
    Message(String),
    /// Wrapper around standard IO errors.
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    /// A raw row could not be turned into a [`crate::Record`].
    #[error("malformed record: {0}")]
    MalformedRecord(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("unsupported data source `{0}`")]
    UnsupportedSource(String),
    /// The playback loop has already been torn down.
    #[error("playback session is closed")]
    PlaybackClosed,
}

impl RaceError {
    /// Creates a new error that simply wraps the provided message.
    pub fn msg<T: Into<String>>(msg: T) -> Self {
        Self::Message(msg.into())
    }

    pub fn malformed<T: Into<String>>(reason: T) -> Self {
        Self::MalformedRecord(reason.into())
    }

    pub fn invalid_config<T: Into<String>>(reason: T) -> Self {
        Self::InvalidConfig(reason.into())
    }
}

impl From<&str> for RaceError {
    fn from(value: &str) -> Self {
        Self::msg(value)
    }
}

impl From<String> for RaceError {
    fn from(value: String) -> Self {
        Self::Message(value)
    }
}
