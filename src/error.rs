// SPDX-License-Identifier: MPL-2.0
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("I/O Error: {0}")]
    Io(String),

    #[error("Config Error: {0}")]
    Config(String),

    /// The serialized page list handed to the reader could not be decoded.
    #[error("Invalid page payload: {0}")]
    InvalidPayload(String),

    /// A container the shell must provide is absent.
    #[error("Missing shell container: {0}")]
    MissingContainer(&'static str),

    /// The pipe-delimited source list contained no usable URL.
    #[error("No valid video URLs found")]
    NoVideoSources,

    #[error("Video Error: {0}")]
    Video(#[from] VideoError),
}

/// Specific error types for video playback issues.
/// Used to provide user-friendly, localized error messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VideoError {
    /// The media format is not supported by the platform.
    #[error("Unsupported video format")]
    UnsupportedFormat,

    /// Loading was aborted before metadata arrived.
    #[error("Video loading aborted")]
    Aborted,

    /// The source could not be fetched.
    #[error("Network error: {0}")]
    Network(String),

    /// The stream was fetched but could not be decoded.
    #[error("Decoding failed: {0}")]
    Decode(String),

    /// The source URL points at something the back-end cannot play.
    #[error("Unsupported source: {0}")]
    UnsupportedSource(String),

    /// A newer load request interrupted this one.
    #[error("Load interrupted")]
    Interrupted,

    /// Every candidate source failed.
    #[error("All video sources failed")]
    SourcesExhausted,

    /// Generic error with raw message
    #[error("{0}")]
    Other(String),
}

impl VideoError {
    /// Returns the i18n message key for this error type.
    #[must_use]
    pub fn i18n_key(&self) -> &'static str {
        match self {
            VideoError::UnsupportedFormat => "error-video-unsupported-format",
            VideoError::Aborted => "error-video-aborted",
            VideoError::Network(_) => "error-video-network",
            VideoError::Decode(_) => "error-video-decode",
            VideoError::UnsupportedSource(_) => "error-video-unsupported-source",
            VideoError::Interrupted => "error-video-interrupted",
            VideoError::SourcesExhausted => "error-video-sources-exhausted",
            VideoError::Other(_) => "error-video-general",
        }
    }

    /// Categorizes an error reported by a media back-end.
    ///
    /// `name` is the error class reported by the platform (e.g. `NotSupportedError`),
    /// `message` its free-form description.
    #[must_use]
    pub fn from_report(name: Option<&str>, message: &str) -> Self {
        match name {
            Some("NotSupportedError") => return VideoError::UnsupportedFormat,
            Some("AbortError") => return VideoError::Aborted,
            _ => {}
        }

        if message.contains("NETWORK_ERR") || message.contains("Failed to fetch") {
            return VideoError::Network(message.to_string());
        }
        if message.contains("MEDIA_ERR_DECODE") {
            return VideoError::Decode(message.to_string());
        }
        if message.contains("MEDIA_ERR_SRC_NOT_SUPPORTED") {
            return VideoError::UnsupportedSource(message.to_string());
        }
        if message
            .to_lowercase()
            .contains("interrupted by a new load request")
        {
            return VideoError::Interrupted;
        }

        VideoError::Other(message.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::InvalidPayload(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
