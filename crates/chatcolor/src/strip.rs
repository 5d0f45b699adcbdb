//! Removing control syntax from text.
//!
//! [`strip_controls`] removes every sequence the formatter would interpret:
//! legacy codes, both hex notations, gradient directives, close directives
//! and recognized bracket tags. It is used whenever colors are disabled and
//! as the fallback when markup fails to parse, so plain-text consumers
//! never see control syntax.
//!
//! Removing a sequence can splice together a new one (`&&cc` becomes `&c`).
//! After each removal the end of the output is re-examined together with the
//! input that follows, so such sequences go in the same pass. A splice
//! reaching further back than that window is caught by a further pass;
//! [`strip_controls`] makes at most [`MAX_STRIP_PASSES`] of them.

use chatcolor_markup::{Format, NamedColor};

use crate::gradient::resolve_gradient;
use crate::lexer::{close_target, leading_hex, leading_spread_hex, ESCAPE};
use crate::normalize::normalize_legacy;

/// Upper bound on removal passes made by [`strip_controls`].
pub const MAX_STRIP_PASSES: usize = 4;

/// Bytes at the end of the output re-examined after a removal.
const SEAM_TAIL: usize = 16;

/// Characters of following input joined to that tail.
const SEAM_LOOKAHEAD: usize = 48;

/// Strips all control syntax.
///
/// # Example
///
/// ```rust
/// use chatcolor::strip_controls;
///
/// assert_eq!(strip_controls("&c&lHello &r&9World"), "Hello World");
/// assert_eq!(strip_controls("<gold>#FF0000Alert</gold>"), "Alert");
/// assert_eq!(strip_controls("&&cc"), "");
/// ```
pub fn strip_controls(text: &str) -> String {
    let mut current = strip_once(text);
    for _ in 1..MAX_STRIP_PASSES {
        let next = strip_once(&current);
        if next == current {
            break;
        }
        current = next;
    }
    current
}

/// Whether `text` contains anything [`strip_controls`] would remove.
pub fn has_controls(text: &str) -> bool {
    *strip_once(text) != *normalize_legacy(text)
}

/// One left-to-right removal pass.
fn strip_once(text: &str) -> String {
    let text = normalize_legacy(text);
    let mut out = String::with_capacity(text.len());
    let mut rest: &str = &text;

    while let Some(c) = rest.chars().next() {
        match control_len(rest) {
            Some(len) => {
                rest = &rest[len..];
                while let Some(used) = remove_seam(&mut out, rest) {
                    rest = &rest[used..];
                }
            }
            None => {
                out.push(c);
                rest = &rest[c.len_utf8()..];
            }
        }
    }

    out
}

/// Byte length of the control sequence at the start of `rest`, if any.
fn control_len(rest: &str) -> Option<usize> {
    match rest.chars().next()? {
        ESCAPE => escape_len(rest),
        '#' => leading_hex(&rest[1..]).map(|_| 7),
        '<' => tag_len(rest),
        _ => None,
    }
}

/// Removes a control sequence that starts in the tail of `out` and runs on
/// into `rest`. Returns the number of bytes of `rest` it used.
fn remove_seam(out: &mut String, rest: &str) -> Option<usize> {
    if rest.is_empty() || out.is_empty() {
        return None;
    }

    let mut start = out.len().saturating_sub(SEAM_TAIL);
    while !out.is_char_boundary(start) {
        start += 1;
    }
    let tail_len = out.len() - start;
    let cut = rest
        .char_indices()
        .nth(SEAM_LOOKAHEAD)
        .map_or(rest.len(), |(i, _)| i);
    let truncated = cut < rest.len();
    let joined = format!("{}{}", &out[start..], &rest[..cut]);

    let (offset, end) = joined[..tail_len]
        .char_indices()
        .filter(|(_, c)| matches!(*c, ESCAPE | '#' | '<'))
        .find_map(|(i, _)| {
            let end = i + control_len(&joined[i..])?;
            // A match running to the end of a cut-off window may be partial.
            let complete = !(truncated && end == joined.len());
            (end > tail_len && complete).then_some((i, end))
        })?;

    out.truncate(start + offset);
    Some(end - tail_len)
}

/// Byte length of the control sequence at the start of `rest` (which starts
/// with the escape character), if there is one.
fn escape_len(rest: &str) -> Option<usize> {
    let after = &rest[1..];
    let code = after.chars().next().filter(char::is_ascii)?;
    let tail = &after[1..];

    match code {
        '/' => {
            let closed = tail.chars().next().filter(char::is_ascii)?;
            (matches!(closed, 'r' | 'R') || close_target(closed).is_some()).then_some(3)
        }
        '#' => leading_hex(tail).map(|_| 8),
        'x' | 'X' => leading_spread_hex(tail).map(|_| 14),
        '@' => resolve_gradient(tail).map(|(_, consumed)| 2 + consumed),
        'r' | 'R' => Some(2),
        c if NamedColor::from_code(c).is_some() || Format::from_code(c).is_some() => Some(2),
        _ => None,
    }
}

/// Byte length of a recognized bracket tag at the start of `rest` (which
/// starts with `<`), if there is one.
fn tag_len(rest: &str) -> Option<usize> {
    let end = rest[1..].find(|c: char| c == '<' || c == '>')? + 1;
    if rest.as_bytes()[end] != b'>' {
        return None;
    }

    let content = &rest[1..end];
    let content = content.strip_prefix('/').unwrap_or(content);
    let name = content.split(':').next().unwrap_or_default();
    is_known_tag(name).then_some(end + 1)
}

fn is_known_tag(name: &str) -> bool {
    if !name.chars().all(|c| c.is_ascii_lowercase() || c == '_') || name.is_empty() {
        return false;
    }
    matches!(name, "color" | "gradient" | "reset")
        || Format::from_tag(name).is_some()
        || NamedColor::from_name(name).is_some()
}
