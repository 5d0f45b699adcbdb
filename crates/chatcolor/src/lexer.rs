//! Legacy code lexer and transpiler.
//!
//! The lexer scans `&`-escaped chat text one character at a time, classifies
//! every escape sequence into a [`StyleToken`], and tracks which style tags
//! are open on a [`TagStack`]. [`transpile`] then renders the tokens as the
//! bracket-tag markup understood by [`chatcolor_markup::parse_markup`].
//!
//! # Escape sequences
//!
//! | Sequence | Token |
//! |---|---|
//! | `&0`-`&9`, `&a`-`&f` | named color |
//! | `&k` `&l` `&m` `&n` `&o` | obfuscated, bold, strikethrough, underline, italic |
//! | `&r` | reset |
//! | `&#RRGGBB`, `#RRGGBB` | hex color |
//! | `&x&R&R&G&G&B&B` | hex color, spread form |
//! | `&@c1-c2[-c3...]` | gradient |
//! | `&/<code>` | close |
//!
//! Anything else is literal text. Malformed directives never fail; they are
//! emitted as the literal characters they were written with.

use std::collections::VecDeque;

use chatcolor_markup::{scan_tag, Format, Gradient, NamedColor, Rgb, TagEffect, TextColor};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::gradient::resolve_gradient;

/// The escape character authors write.
pub const ESCAPE: char = '&';

/// Tag name used for hex colors.
pub const COLOR_TAG: &str = "color";

/// Tag name used for gradients.
pub const GRADIENT_TAG: &str = "gradient";

/// Six `&`-escaped hex digits, the tail of a spread hex color.
static SPREAD_HEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:&[0-9a-fA-F]){6}").expect("spread hex pattern is valid"));

/// Which escape features the lexer honors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexOptions {
    /// Honor `&/<code>` closing directives.
    pub end_tags: bool,
    /// Honor `&k`-`&o` format toggles and the silent `&/r` closer.
    pub format_toggles: bool,
    /// Honor `&@` gradients.
    pub gradients: bool,
    /// Pass author-written `<tag>` markup through to the parser instead of
    /// escaping it.
    ///
    /// Author tags then count as open tags for `&/` closes, and the markup
    /// escapes apply to author text: `\<` is a literal `<` and `\\` a single
    /// `\`.
    pub bracket_markup: bool,
}

impl Default for LexOptions {
    fn default() -> Self {
        Self {
            end_tags: true,
            format_toggles: true,
            gradients: true,
            bracket_markup: true,
        }
    }
}

/// One lexed unit of input.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleToken {
    NamedColor(NamedColor),
    HexColor(Rgb),
    Gradient(Gradient),
    Format(Format),
    Reset,
    /// Closes the named tag and everything opened after it.
    Close(&'static str),
    Literal(char),
}

impl StyleToken {
    /// The tag name an opening token pushes, if any.
    pub fn tag_name(&self) -> Option<&'static str> {
        match self {
            StyleToken::NamedColor(named) => Some(named.name()),
            StyleToken::HexColor(_) => Some(COLOR_TAG),
            StyleToken::Gradient(_) => Some(GRADIENT_TAG),
            StyleToken::Format(format) => Some(format.tag()),
            StyleToken::Reset | StyleToken::Close(_) | StyleToken::Literal(_) => None,
        }
    }
}

/// The ordered record of currently open tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagStack {
    open: Vec<&'static str>,
}

impl TagStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, tag: &'static str) {
        self.open.push(tag);
    }

    pub fn is_open(&self, tag: &str) -> bool {
        self.open.contains(&tag)
    }

    /// Closes the most recent `tag` and every tag opened after it.
    ///
    /// Returns `false`, leaving the stack untouched, if `tag` is not open.
    pub fn close(&mut self, tag: &str) -> bool {
        match self.open.iter().rposition(|t| *t == tag) {
            Some(index) => {
                self.open.truncate(index);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.open.clear();
    }

    pub fn depth(&self) -> usize {
        self.open.len()
    }

    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }

    /// Open tags, outermost first.
    pub fn tags(&self) -> &[&'static str] {
        &self.open
    }
}

/// Resolves the character after `&/` to the tag it closes.
///
/// Uses the same table as opening: color codes close their color, format
/// codes their format, `#` and `x` the hex color, `@` the gradient.
pub fn close_target(code: char) -> Option<&'static str> {
    if let Some(named) = NamedColor::from_code(code) {
        return Some(named.name());
    }
    if let Some(format) = Format::from_code(code) {
        return Some(format.tag());
    }
    match code {
        '#' | 'x' | 'X' => Some(COLOR_TAG),
        '@' => Some(GRADIENT_TAG),
        _ => None,
    }
}

/// Reads `#RRGGBB` digits: six hex digits at the start of `input`.
pub(crate) fn leading_hex(input: &str) -> Option<Rgb> {
    Rgb::parse_hex(input.get(..6)?).ok()
}

/// Reads the spread form tail `&R&R&G&G&B&B` at the start of `input`.
pub(crate) fn leading_spread_hex(input: &str) -> Option<Rgb> {
    let matched = SPREAD_HEX.find(input)?;
    let digits: String = matched.as_str().chars().filter(|c| *c != ESCAPE).collect();
    Rgb::parse_hex(&digits).ok()
}

/// Streaming lexer over normalized (`&`-escaped) text.
///
/// # Example
///
/// ```rust
/// use chatcolor::lexer::{LexOptions, Lexer, StyleToken};
/// use chatcolor_markup::{Format, NamedColor};
///
/// let tokens: Vec<_> = Lexer::new("&c&lHi", LexOptions::default()).collect();
/// assert_eq!(
///     tokens,
///     vec![
///         StyleToken::NamedColor(NamedColor::Red),
///         StyleToken::Format(Format::Bold),
///         StyleToken::Literal('H'),
///         StyleToken::Literal('i'),
///     ]
/// );
/// ```
#[derive(Debug)]
pub struct Lexer<'a> {
    text: &'a str,
    pos: usize,
    options: LexOptions,
    stack: TagStack,
    pending: VecDeque<StyleToken>,
}

impl<'a> Lexer<'a> {
    pub fn new(text: &'a str, options: LexOptions) -> Self {
        Self {
            text,
            pos: 0,
            options,
            stack: TagStack::new(),
            pending: VecDeque::new(),
        }
    }

    /// The tags currently open.
    pub fn stack(&self) -> &TagStack {
        &self.stack
    }

    fn open(&mut self, token: StyleToken, consumed: usize) -> StyleToken {
        if let Some(tag) = token.tag_name() {
            self.stack.push(tag);
        }
        self.pos += consumed;
        token
    }

    /// Emits the next `len` bytes as literal characters.
    fn literal(&mut self, len: usize) -> StyleToken {
        let end = self.pos + len;
        let mut chars = self.text[self.pos..end].chars();
        self.pos = end;
        let first = chars.next().unwrap_or(ESCAPE);
        self.pending.extend(chars.map(StyleToken::Literal));
        StyleToken::Literal(first)
    }

    /// Tracks an author-written tag or markup escape at the start of `rest`,
    /// returning its length so it passes through untouched.
    fn author_markup(&mut self, rest: &str) -> Option<usize> {
        if rest.starts_with('\\') {
            return matches!(rest[1..].chars().next(), Some('<' | '\\')).then_some(2);
        }
        let (effect, len) = scan_tag(rest)?;
        match effect {
            TagEffect::Open(tag) => self.stack.push(tag),
            TagEffect::Close(tag) => {
                self.stack.close(tag);
            }
            TagEffect::Reset => self.stack.clear(),
        }
        Some(len)
    }

    /// Lexes `&<code>`. Returns `None` for a sequence that is consumed
    /// without emitting anything.
    fn lex_escape(&mut self, code: char) -> Option<StyleToken> {
        // Byte offsets below assume the escape and its code are one byte
        // each; every recognized code is ASCII.
        let text = self.text;
        let after = &text[self.pos + 2..];

        let token = match code {
            '/' if self.options.end_tags => return self.lex_close(after),
            '#' => match leading_hex(after) {
                Some(rgb) => self.open(StyleToken::HexColor(rgb), 8),
                None => self.literal(2),
            },
            'x' | 'X' => match leading_spread_hex(after) {
                Some(rgb) => self.open(StyleToken::HexColor(rgb), 14),
                None => self.literal(2),
            },
            '@' if self.options.gradients => match resolve_gradient(after) {
                Some((gradient, consumed)) => {
                    self.open(StyleToken::Gradient(gradient), 2 + consumed)
                }
                None => self.literal(2),
            },
            'r' | 'R' => {
                self.stack.clear();
                self.pos += 2;
                StyleToken::Reset
            }
            c => {
                if let Some(named) = NamedColor::from_code(c) {
                    self.open(StyleToken::NamedColor(named), 2)
                } else {
                    match Format::from_code(c) {
                        Some(format) if self.options.format_toggles => {
                            self.open(StyleToken::Format(format), 2)
                        }
                        _ => self.literal(2),
                    }
                }
            }
        };
        Some(token)
    }

    /// Lexes `&/<code>`; `after` starts at `<code>`.
    fn lex_close(&mut self, after: &str) -> Option<StyleToken> {
        let Some(code) = after.chars().next() else {
            return Some(self.literal(2));
        };
        let len = 2 + code.len_utf8();

        if matches!(code, 'r' | 'R') && self.options.format_toggles {
            self.pos += len;
            return None;
        }

        let token = match close_target(code) {
            Some(tag) if self.stack.close(tag) => {
                self.pos += len;
                StyleToken::Close(tag)
            }
            Some(_) => self.literal(len),
            // Leave the next character to be scanned on its own.
            None => self.literal(2),
        };
        Some(token)
    }
}

impl Iterator for Lexer<'_> {
    type Item = StyleToken;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(token) = self.pending.pop_front() {
            return Some(token);
        }

        loop {
            let text = self.text;
            let rest = &text[self.pos..];
            let mut chars = rest.chars();
            let c = chars.next()?;

            if self.options.bracket_markup {
                if let Some(len) = self.author_markup(rest) {
                    return Some(self.literal(len));
                }
            }

            if c != ESCAPE {
                if c == '#' {
                    if let Some(rgb) = leading_hex(&rest[1..]) {
                        return Some(self.open(StyleToken::HexColor(rgb), 7));
                    }
                }
                self.pos += c.len_utf8();
                return Some(StyleToken::Literal(c));
            }

            match chars.next() {
                Some(code) if code.is_ascii() => {
                    if let Some(token) = self.lex_escape(code) {
                        return Some(token);
                    }
                }
                Some(code) => return Some(self.literal(1 + code.len_utf8())),
                None => return Some(self.literal(1)),
            }
        }
    }
}

/// Lexes `text` into tokens.
pub fn tokenize(text: &str, options: LexOptions) -> Vec<StyleToken> {
    Lexer::new(text, options).collect()
}

/// Transpiles `&`-escaped text into bracket-tag markup.
///
/// # Example
///
/// ```rust
/// use chatcolor::lexer::{transpile, LexOptions};
///
/// assert_eq!(
///     transpile("&c&lHello &r&9World", LexOptions::default()),
///     "<red><bold>Hello <reset><blue>World"
/// );
/// assert_eq!(
///     transpile("&#1A2B3CHi", LexOptions::default()),
///     "<color:#1A2B3C>Hi"
/// );
/// ```
pub fn transpile(text: &str, options: LexOptions) -> String {
    let mut out = String::with_capacity(text.len() + 16);
    for token in Lexer::new(text, options) {
        push_markup(&mut out, &token, options.bracket_markup);
    }
    out
}

fn push_markup(out: &mut String, token: &StyleToken, bracket_markup: bool) {
    match token {
        StyleToken::NamedColor(named) => {
            out.push('<');
            out.push_str(named.name());
            out.push('>');
        }
        StyleToken::HexColor(rgb) => {
            out.push_str("<color:");
            out.push_str(&rgb.to_hex());
            out.push('>');
        }
        StyleToken::Gradient(gradient) => {
            out.push_str("<gradient");
            for stop in gradient.stops() {
                out.push(':');
                match stop {
                    TextColor::Named(named) => out.push_str(named.name()),
                    TextColor::Hex(rgb) => out.push_str(&rgb.to_hex()),
                }
            }
            out.push('>');
        }
        StyleToken::Format(format) => {
            out.push('<');
            out.push_str(format.tag());
            out.push('>');
        }
        StyleToken::Reset => out.push_str("<reset>"),
        StyleToken::Close(tag) => {
            out.push_str("</");
            out.push_str(tag);
            out.push('>');
        }
        StyleToken::Literal(c) => {
            if !bracket_markup && matches!(c, '<' | '\\') {
                out.push('\\');
            }
            out.push(*c);
        }
    }
}
