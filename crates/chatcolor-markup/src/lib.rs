//! Color model, bracket-tag markup parser, and styled-text tree for chat text.
//!
//! This crate is the lower half of the `chatcolor` pipeline. It knows nothing
//! about legacy `&` codes; it consumes the intermediate bracket-tag markup
//! the lexer produces (or that authors write directly) and turns it into a
//! [`StyledNode`] tree, which can then be serialized to legacy control codes
//! or rendered for a terminal.
//!
//! # Example
//!
//! ```rust
//! use chatcolor_markup::{parse_markup, to_legacy};
//!
//! let tree = parse_markup("<red><bold>Hello</bold></red> <gradient:#FF0000:#0000FF>World</gradient>").unwrap();
//! assert_eq!(tree.plain_text(), "Hello World");
//!
//! let legacy = to_legacy(&tree);
//! assert!(legacy.starts_with("§c§lHello§r "));
//! ```
//!
//! # Modules
//!
//! - [`color`]: [`Rgb`], [`NamedColor`], [`TextColor`], [`Format`], [`Gradient`]
//! - [`node`]: [`Style`] and [`StyledNode`]
//! - [`parser`]: [`parse_markup`]
//! - [`serialize`]: [`to_legacy`], [`render_ansi`]

pub mod color;
mod error;
pub mod node;
pub mod parser;
pub mod serialize;

pub use color::{Format, Gradient, NamedColor, Rgb, TextColor};
pub use error::{ColorError, MarkupError};
pub use node::{Style, StyledNode};
pub use parser::{parse_markup, scan_tag, TagEffect, MAX_DEPTH};
pub use serialize::{render_ansi, rgb_to_ansi256, to_legacy, RENDERED_GLYPH};
