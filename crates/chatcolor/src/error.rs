use thiserror::Error;

/// Failure reported by a [`PlaceholderProvider`](crate::PlaceholderProvider).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("placeholder provider failed: {message}")]
pub struct ProviderError {
    pub message: String,
}

impl ProviderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Errors raised while loading formatter configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse formatter config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("failed to read formatter config '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("animation '{name}' has a zero tick interval")]
    ZeroInterval { name: String },

    #[error("animation '{name}' has no frames for locale '{locale}'")]
    EmptyFrames { name: String, locale: String },

    #[error("animation '{name}' has no frames for the default locale '{locale}'")]
    MissingDefaultLocale { name: String, locale: String },
}
