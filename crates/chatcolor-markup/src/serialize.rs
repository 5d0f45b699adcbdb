//! Flattening a styled-text tree back into text.
//!
//! Two output forms are supported:
//!
//! - [`to_legacy`]: a flat string of `§`-prefixed control codes, for
//!   consumers that only understand legacy chat codes (scoreboards, older
//!   clients, plain logs that keep codes).
//! - [`render_ansi`]: ANSI escape sequences via `console`, for terminals and
//!   server consoles.
//!
//! Both walk the tree depth-first and emit one styled run at a time, so the
//! effective style of every character survives even when the original tag
//! boundaries do not.

use crate::color::{Format, TextColor};
use crate::node::{Style, StyledNode};

/// The glyph that prefixes every rendered control code.
pub const RENDERED_GLYPH: char = '§';

/// Serializes a tree into a flat legacy control-coded string.
///
/// Each change of style emits a reset (unless nothing was styled before),
/// then the color code, then one code per active format. Hex colors use the
/// spread form `§x§R§R§G§G§B§B`.
///
/// # Example
///
/// ```rust
/// use chatcolor_markup::{to_legacy, NamedColor, Style, StyledNode};
///
/// let tree = StyledNode::new()
///     .with_child(StyledNode::styled("Hi", Style::new().color(NamedColor::Red).bold()))
///     .with_child(StyledNode::text(" there"));
/// assert_eq!(to_legacy(&tree), "§c§lHi§r there");
/// ```
pub fn to_legacy(node: &StyledNode) -> String {
    let mut out = String::new();
    let mut current = Style::default();

    for (text, style) in node.runs() {
        if style != current {
            if !current.is_plain() {
                push_code(&mut out, 'r');
            }
            push_style_codes(&mut out, &style);
            current = style;
        }
        out.push_str(&text);
    }

    out
}

fn push_code(out: &mut String, code: char) {
    out.push(RENDERED_GLYPH);
    out.push(code);
}

fn push_style_codes(out: &mut String, style: &Style) {
    match style.color {
        Some(TextColor::Named(named)) => push_code(out, named.code()),
        Some(TextColor::Hex(rgb)) => {
            push_code(out, 'x');
            for digit in format!("{:02x}{:02x}{:02x}", rgb.0, rgb.1, rgb.2).chars() {
                push_code(out, digit);
            }
        }
        None => {}
    }
    for format in Format::ALL {
        if style.has(format) {
            push_code(out, format.code());
        }
    }
}

/// Renders a tree with ANSI escape sequences.
///
/// RGB colors are mapped to the nearest 256-color palette entry. With
/// `force_styling` off, `console` decides whether the terminal supports
/// color and may emit plain text.
pub fn render_ansi(node: &StyledNode, force_styling: bool) -> String {
    let mut out = String::new();
    for (text, style) in node.runs() {
        if style.is_plain() {
            out.push_str(&text);
            continue;
        }
        let console_style = to_console_style(&style).force_styling(force_styling);
        out.push_str(&console_style.apply_to(&text).to_string());
    }
    out
}

fn to_console_style(style: &Style) -> console::Style {
    let mut out = console::Style::new();
    if let Some(color) = style.color {
        out = out.fg(console::Color::Color256(rgb_to_ansi256(color.rgb().into())));
    }
    if style.has(Format::Bold) {
        out = out.bold();
    }
    if style.has(Format::Italic) {
        out = out.italic();
    }
    if style.has(Format::Underline) {
        out = out.underlined();
    }
    if style.has(Format::Strikethrough) {
        out = out.strikethrough();
    }
    if style.has(Format::Obfuscated) {
        out = out.blink();
    }
    out
}

/// Converts an RGB triplet to the nearest ANSI 256-color palette index.
///
/// # Example
///
/// ```rust
/// use chatcolor_markup::rgb_to_ansi256;
///
/// assert_eq!(rgb_to_ansi256((255, 0, 0)), 196);
/// assert_eq!(rgb_to_ansi256((0, 255, 0)), 46);
/// ```
pub fn rgb_to_ansi256((r, g, b): (u8, u8, u8)) -> u8 {
    if r == g && g == b {
        if r < 8 {
            16
        } else if r > 248 {
            231
        } else {
            232 + ((r as u16 - 8) * 24 / 247) as u8
        }
    } else {
        let red = (r as u16 * 5 / 255) as u8;
        let green = (g as u16 * 5 / 255) as u8;
        let blue = (b as u16 * 5 / 255) as u8;
        16 + 36 * red + 6 * green + blue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{NamedColor, Rgb};
    use crate::parser::parse_markup;

    #[test]
    fn test_plain_tree_has_no_codes() {
        assert_eq!(to_legacy(&StyledNode::text("hello")), "hello");
        assert_eq!(to_legacy(&StyledNode::new()), "");
    }

    #[test]
    fn test_named_color_and_formats() {
        let tree = StyledNode::styled("x", Style::new().color(NamedColor::Blue).bold().italic());
        assert_eq!(to_legacy(&tree), "§9§l§ox");
    }

    #[test]
    fn test_hex_color_spread_form() {
        let tree = StyledNode::styled("x", Style::new().color(Rgb(0x1A, 0x2B, 0x3C)));
        assert_eq!(to_legacy(&tree), "§x§1§a§2§b§3§cx");
    }

    #[test]
    fn test_style_change_resets() {
        let tree = parse_markup("<red><bold>Hello </bold></red><blue>World</blue>").unwrap();
        assert_eq!(to_legacy(&tree), "§c§lHello §r§9World");
    }

    #[test]
    fn test_adjacent_equal_runs_merge() {
        let tree = StyledNode::new()
            .with_child(StyledNode::styled("a", Style::new().bold()))
            .with_child(StyledNode::styled("b", Style::new().bold()));
        assert_eq!(to_legacy(&tree), "§lab");
    }

    #[test]
    fn test_render_ansi_forced() {
        let tree = StyledNode::styled("hi", Style::new().bold());
        let out = render_ansi(&tree, true);
        assert!(out.contains("\x1b[1m"));
        assert!(out.contains("hi"));
    }

    #[test]
    fn test_render_ansi_plain_passthrough() {
        assert_eq!(render_ansi(&StyledNode::text("hi"), true), "hi");
    }

    #[test]
    fn test_rgb_to_ansi256_grays() {
        assert_eq!(rgb_to_ansi256((0, 0, 0)), 16);
        assert_eq!(rgb_to_ansi256((255, 255, 255)), 231);
    }
}
