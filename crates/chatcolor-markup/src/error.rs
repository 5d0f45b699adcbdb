//! Error types for color parsing and markup parsing.

use thiserror::Error;

/// Errors produced while interpreting a color value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// Not exactly six hex digits.
    #[error("invalid hex color '{0}' (expected 6 hex digits)")]
    InvalidHex(String),

    /// Not one of the 16 legacy color names.
    #[error("unknown color name '{0}'")]
    UnknownName(String),

    /// A gradient needs at least two stops.
    #[error("gradient needs at least 2 stops, got {0}")]
    TooFewStops(usize),
}

/// Errors produced when markup is structurally malformed.
///
/// Unknown tags are not errors; they degrade to literal text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarkupError {
    /// A `<` with no closing `>`.
    #[error("unterminated tag starting at byte {offset}")]
    UnterminatedTag { offset: usize },

    /// Tags nested past the parser's depth limit.
    #[error("tags nested deeper than {limit}")]
    TooDeep { limit: usize },
}
