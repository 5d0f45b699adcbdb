//! # chatcolor - Chat Text Formatting
//!
//! Turns author-written chat text into styled text. Authors write legacy
//! `&` codes, hex colors, gradients and close directives:
//!
//! ```text
//! &6[Server] &#FF5555&lAlert!&/l &7Restart in %minutes% minutes {animation_dots}
//! ```
//!
//! and every chat surface (broadcasts, private messages, scoreboards, tab
//! lists) gets back either a [`StyledNode`] tree or a legacy `§`-coded
//! string.
//!
//! ## Quick Start
//!
//! ```rust
//! use chatcolor::{Formatter, FormatterConfig, Subject};
//!
//! let formatter = Formatter::new(FormatterConfig::default());
//!
//! // Legacy output for clients that only understand § codes
//! let legacy = formatter.format_legacy("&c&lHello &r&9World", None);
//! assert_eq!(legacy, "§c§lHello §r§9World");
//!
//! // A styled tree for surfaces that take structured text
//! let tree = formatter.format_tree("&@red-blueRainbow", None);
//! assert_eq!(tree.plain_text(), "Rainbow");
//! assert_eq!(tree.styled_chars().len(), 7);
//! ```
//!
//! ## Pipeline
//!
//! | Stage | Module |
//! |---|---|
//! | `{animation_<name>}` tokens | [`animation`] |
//! | `%name%` placeholders | [`placeholder`] |
//! | `§` to `&` | [`normalize_legacy`] |
//! | `&` codes to bracket tags | [`lexer`], [`gradient`] |
//! | bracket tags to a tree | [`parse_markup`] |
//! | tree to text | [`to_legacy`], [`render_ansi`] |
//!
//! Each stage can be switched off with [`FormatFlags`]. When colors are off,
//! control syntax is removed with [`strip_controls`] instead of being
//! interpreted.
//!
//! ## Configuration
//!
//! [`FormatterConfig`] loads from YAML; see [`config`] for the format.
//!
//! ## Logging
//!
//! Diagnostics go through `tracing`. The crate never installs a subscriber.

pub mod animation;
pub mod config;
mod context;
mod error;
mod formatter;
pub mod gradient;
pub mod lexer;
mod message;
mod normalize;
pub mod placeholder;
mod strip;

// Error types
pub use error::{ConfigError, ProviderError};

// Pipeline
pub use context::FormatContext;
pub use formatter::Formatter;

pub use animation::{resolve_animations, AnimationFrameSet, AnimationRegistry};
pub use config::{AnimationConfig, FormatFlags, FormatterConfig, LexerConfig};
pub use lexer::{transpile, LexOptions, StyleToken, TagStack};
pub use message::MessagePart;
pub use normalize::normalize_legacy;
pub use placeholder::{
    resolve_placeholders, NoopProvider, PlaceholderProvider, Subject, MAX_PLACEHOLDER_PASSES,
};
pub use strip::{has_controls, strip_controls, MAX_STRIP_PASSES};

// Re-export the markup layer
pub use chatcolor_markup::{
    parse_markup, render_ansi, rgb_to_ansi256, to_legacy, ColorError, Format, Gradient,
    MarkupError, NamedColor, Rgb, Style, StyledNode, TextColor, MAX_DEPTH, RENDERED_GLYPH,
};
