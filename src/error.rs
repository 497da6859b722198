//! Error types for the timeline crate.
//!
//! The event loop never fails: these errors are logged and the triggering
//! gesture completes as a no-op.

use thiserror::Error;

use crate::traits::CommandId;

#[derive(Error, Debug)]
pub enum TimelineError {
    /// A stored setting could not be decoded
    #[error("setting '{key}' is not valid JSON: {source}")]
    Setting {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// A setting could not be encoded
    #[error("setting '{key}' could not be serialized: {source}")]
    SettingEncode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// The host failed to run a command
    #[error("command {id} failed: {source}")]
    Command {
        id: CommandId,
        #[source]
        source: anyhow::Error,
    },

    /// The host failed to apply a range drop
    #[error("range drop failed: {0}")]
    Drop(#[source] anyhow::Error),
}

/// Result type alias for timeline operations
pub type TimelineResult<T> = Result<T, TimelineError>;
