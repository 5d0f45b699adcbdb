//! External placeholder resolution.
//!
//! Text may carry `%name%` markers that an external provider knows how to
//! fill in (player statistics, server state, other plugins' values). A
//! provider's output can itself contain markers, so resolution runs until
//! the text stops changing, capped at [`MAX_PLACEHOLDER_PASSES`].
//!
//! # Providers
//!
//! Anything implementing [`PlaceholderProvider`] can be plugged in. Closures
//! of the right shape implement it directly:
//!
//! ```rust
//! use chatcolor::placeholder::{resolve_placeholders, Subject};
//! use chatcolor::ProviderError;
//!
//! let provider = |subject: &Subject, text: &str| -> Result<String, ProviderError> {
//!     Ok(text.replace("%player_name%", &subject.display_name))
//! };
//!
//! let steve = Subject::new("069a79f4", "Steve");
//! assert_eq!(
//!     resolve_placeholders(&provider, Some(&steve), "hi %player_name%"),
//!     "hi Steve"
//! );
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ProviderError;

/// Upper bound on provider passes over a single text.
pub const MAX_PLACEHOLDER_PASSES: usize = 10;

static MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"%[^%\s]+%").expect("placeholder marker pattern is valid"));

/// The viewer a message is being formatted for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Subject {
    /// Stable identifier, typically a UUID.
    pub id: String,
    pub display_name: String,
    /// Client locale such as `en_us`. `None` uses the configured default.
    pub locale: Option<String>,
}

impl Subject {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            locale: None,
        }
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }
}

/// A text-to-text placeholder source.
///
/// Implementations are shared across formatting threads, so they must be
/// `Send + Sync`.
pub trait PlaceholderProvider: Send + Sync {
    /// Whether the provider can be used at all (for example, whether the
    /// plugin backing it is loaded). Checked once per [`FormatContext`](crate::FormatContext).
    fn is_available(&self) -> bool {
        true
    }

    /// Replaces the markers in `text` that this provider knows about.
    fn apply(&self, subject: &Subject, text: &str) -> Result<String, ProviderError>;
}

impl<F> PlaceholderProvider for F
where
    F: Fn(&Subject, &str) -> Result<String, ProviderError> + Send + Sync,
{
    fn apply(&self, subject: &Subject, text: &str) -> Result<String, ProviderError> {
        (self)(subject, text)
    }
}

/// The provider used when none is configured. Never available.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopProvider;

impl PlaceholderProvider for NoopProvider {
    fn is_available(&self) -> bool {
        false
    }

    fn apply(&self, _subject: &Subject, text: &str) -> Result<String, ProviderError> {
        Ok(text.to_string())
    }
}

/// Whether `text` contains anything that looks like a `%name%` marker.
pub fn has_placeholders(text: &str) -> bool {
    MARKER.is_match(text)
}

/// Runs `provider` over `text` until it stops changing.
///
/// Without a subject the text is returned unchanged. A provider error ends
/// resolution and the last successfully resolved text is returned.
pub fn resolve_placeholders(
    provider: &dyn PlaceholderProvider,
    subject: Option<&Subject>,
    text: &str,
) -> String {
    let Some(subject) = subject else {
        return text.to_string();
    };

    let mut current = text.to_string();
    for _ in 0..MAX_PLACEHOLDER_PASSES {
        if !has_placeholders(&current) {
            return current;
        }
        match provider.apply(subject, &current) {
            Ok(next) if next == current => return current,
            Ok(next) => current = next,
            Err(err) => {
                tracing::warn!(subject = %subject.id, error = %err, "placeholder resolution failed");
                return current;
            }
        }
    }

    tracing::debug!(
        subject = %subject.id,
        passes = MAX_PLACEHOLDER_PASSES,
        "placeholder resolution hit its pass limit"
    );
    current
}
