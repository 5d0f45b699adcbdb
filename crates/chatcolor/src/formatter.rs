//! The formatting pipeline.
//!
//! [`Formatter`] is the entry point every chat surface goes through. For
//! each call it runs, skipping any stage its flags turn off:
//!
//! 1. animation tokens (`{animation_<name>}`)
//! 2. external placeholders (`%name%`)
//! 3. legacy normalization (`§` to `&`)
//! 4. lexing into bracket-tag markup
//! 5. parsing into a [`StyledNode`] tree
//!
//! and then hands back the tree, a legacy `§`-coded string, ANSI text, or
//! plain text. With colors off, stages 3 to 5 are replaced by stripping
//! every control sequence.
//!
//! Formatting never fails. Markup that cannot be parsed falls back to the
//! stripped text, and the failure is logged.

use std::sync::Arc;

use chatcolor_markup::{parse_markup, render_ansi, to_legacy, StyledNode};

use crate::config::{FormatFlags, FormatterConfig};
use crate::context::FormatContext;
use crate::lexer::{transpile, LexOptions};
use crate::normalize::normalize_legacy;
use crate::placeholder::{resolve_placeholders, Subject};
use crate::strip::strip_controls;

/// Formats chat text according to a fixed set of flags.
///
/// `Formatter` is `Send + Sync`; share one behind an `Arc` across worker
/// threads.
///
/// # Example
///
/// ```rust
/// use chatcolor::{Formatter, FormatterConfig};
///
/// let formatter = Formatter::new(FormatterConfig::default());
///
/// assert_eq!(
///     formatter.format_legacy("&c&lHello &r&9World", None),
///     "§c§lHello §r§9World"
/// );
///
/// let tree = formatter.format_tree("&#FF0000Alert!", None);
/// assert_eq!(tree.plain_text(), "Alert!");
/// ```
#[derive(Debug, Clone)]
pub struct Formatter {
    flags: FormatFlags,
    lex_options: LexOptions,
    context: Arc<FormatContext>,
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new(FormatterConfig::default())
    }
}

impl Formatter {
    /// Builds a formatter with its own context, loading the configured
    /// animations into a fresh registry.
    pub fn new(config: FormatterConfig) -> Self {
        let context = FormatContext::new(config.animation_registry());
        Self::with_context(&config, Arc::new(context))
    }

    /// Builds a formatter over an existing shared context.
    pub fn with_context(config: &FormatterConfig, context: Arc<FormatContext>) -> Self {
        Self {
            flags: config.flags,
            lex_options: config.lex_options(),
            context,
        }
    }

    /// A copy of this formatter with different flags, sharing the context.
    pub fn with_flags(&self, flags: FormatFlags) -> Self {
        Self {
            flags,
            lex_options: LexOptions {
                bracket_markup: flags.bracket_markup,
                ..self.lex_options
            },
            context: Arc::clone(&self.context),
        }
    }

    pub fn flags(&self) -> FormatFlags {
        self.flags
    }

    pub fn lex_options(&self) -> LexOptions {
        self.lex_options
    }

    pub fn context(&self) -> &Arc<FormatContext> {
        &self.context
    }

    /// Formats `text` into a styled tree.
    pub fn format_tree(&self, text: &str, subject: Option<&Subject>) -> StyledNode {
        let text = self.substitute(text, subject);

        if !self.flags.colors {
            return StyledNode::text(strip_controls(&text));
        }

        let markup = transpile(&normalize_legacy(&text), self.lex_options);
        match parse_markup(&markup) {
            Ok(tree) => tree,
            Err(err) => {
                tracing::warn!(error = %err, "chat markup did not parse, using stripped text");
                StyledNode::text(strip_controls(&text))
            }
        }
    }

    /// Formats `text` into a legacy `§`-coded string.
    pub fn format_legacy(&self, text: &str, subject: Option<&Subject>) -> String {
        to_legacy(&self.format_tree(text, subject))
    }

    /// Formats `text` with ANSI escapes, for server consoles and logs.
    pub fn format_ansi(&self, text: &str, subject: Option<&Subject>, force_styling: bool) -> String {
        render_ansi(&self.format_tree(text, subject), force_styling)
    }

    /// Formats `text` and drops all styling.
    ///
    /// The result never contains control syntax, even where the author
    /// escaped it.
    pub fn format_plain(&self, text: &str, subject: Option<&Subject>) -> String {
        strip_controls(&self.format_tree(text, subject).plain_text())
    }

    /// Runs the substitution stages.
    fn substitute(&self, text: &str, subject: Option<&Subject>) -> String {
        let mut text = text.to_string();
        if self.flags.animations {
            text = self.context.animations().resolve(&text, subject);
        }
        if self.flags.placeholders && self.context.placeholders_available() {
            text = resolve_placeholders(self.context.provider(), subject, &text);
        }
        text
    }
}
