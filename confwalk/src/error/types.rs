//! Primary error enum for configuration loading flows.

use camino::Utf8PathBuf;
use figment::Error as FigmentError;
use thiserror::Error;

use super::WalkError;

/// Errors that can occur while building defaults or loading configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// No config file with the configured name exists in any search path.
    #[error("config - loading file [{context}]: no config file '{name}' found in {searched}")]
    FileNotFound {
        /// Caller supplied context distinguishing the load attempt.
        context: String,
        /// Config file name without extension.
        name: String,
        /// Search paths that were inspected, comma separated.
        searched: String,
    },

    /// A config file exists but could not be read or parsed.
    #[error("config - loading file [{context}]: {source}")]
    File {
        /// Caller supplied context distinguishing the load attempt.
        context: String,
        /// Path of the offending file.
        path: Utf8PathBuf,
        /// Underlying error reported by the YAML provider.
        #[source]
        source: Box<FigmentError>,
    },

    /// Default tags of a config struct failed to decode.
    #[error("config - creating defaults [{context}]: {source}")]
    Defaults {
        /// Key prefix the defaults were registered under.
        context: String,
        /// Conversion errors collected by the walk.
        #[source]
        source: WalkError,
    },

    /// The merged layers do not deserialise into the config type.
    #[error("config - unmarshal config [{context}]: {source}")]
    Unmarshal {
        /// Caller supplied context distinguishing the load attempt.
        context: String,
        /// Underlying extraction error.
        #[source]
        source: Box<FigmentError>,
    },

    /// A value could not be stored at a configuration key.
    #[error("config - storing value [{key}]: {source}")]
    Value {
        /// Dotted key the value was meant for.
        key: String,
        /// Underlying serialisation error.
        #[source]
        source: serde_json::Error,
    },

    /// The log output could not be opened or the subscriber installed.
    #[error("config - setting up logging [{target}]: {source}")]
    Logging {
        /// Configured log output.
        target: String,
        /// Underlying failure.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}
