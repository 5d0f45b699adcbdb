//! Gradient directive resolution.
//!
//! A gradient directive is `&@` followed by two or more color stops joined
//! by `-`, with the colored text following immediately:
//!
//! ```text
//! &@red-blueRainbow
//! &@#FF0000-e-#00FFAAHello
//! &@c-9Text
//! ```
//!
//! The directive span is the run of alphanumerics, `#` and `-` after the
//! `@`. Because the colored text usually starts inside that span, stops are
//! resolved greedily left to right: a `#RRGGBB` literal, else the longest
//! color name that prefixes the segment, else a single legacy color code.
//! The first character after a stop that is not `-` ends the directive.

use chatcolor_markup::{Gradient, NamedColor, Rgb, TextColor};

/// Resolves a gradient directive at the start of `input` (the text after `&@`).
///
/// Returns the gradient and the number of bytes of `input` the stops took
/// up, or `None` if the directive is malformed and should stay literal.
///
/// # Example
///
/// ```rust
/// use chatcolor::gradient::resolve_gradient;
///
/// let (gradient, consumed) = resolve_gradient("red-blueRainbow").unwrap();
/// assert_eq!(gradient.stops().len(), 2);
/// assert_eq!(&"red-blueRainbow"[consumed..], "Rainbow");
///
/// assert!(resolve_gradient("red").is_none());
/// assert!(resolve_gradient("red-nope").is_none());
/// ```
pub fn resolve_gradient(input: &str) -> Option<(Gradient, usize)> {
    let span_len = input
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '#' || c == '-'))
        .unwrap_or(input.len());
    let span = &input[..span_len];

    let mut stops = Vec::new();
    let mut pos = 0;
    loop {
        let (color, len) = resolve_stop(&span[pos..])?;
        stops.push(color);
        pos += len;

        if span[pos..].starts_with('-') {
            pos += 1;
        } else {
            break;
        }
    }

    let gradient = Gradient::new(stops).ok()?;
    Some((gradient, pos))
}

/// Resolves one stop at the start of `segment`, returning it with its byte length.
fn resolve_stop(segment: &str) -> Option<(TextColor, usize)> {
    if let Some(rest) = segment.strip_prefix('#') {
        let rgb = Rgb::parse_hex(rest.get(..6)?).ok()?;
        return Some((TextColor::Hex(rgb), 7));
    }

    if let Some((named, len)) = NamedColor::longest_name_prefix(segment) {
        return Some((TextColor::Named(named), len));
    }

    let code = segment.chars().next()?;
    NamedColor::from_code(code).map(|named| (TextColor::Named(named), code.len_utf8()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stops(input: &str) -> Vec<TextColor> {
        resolve_gradient(input)
            .map(|(g, _)| g.stops().to_vec())
            .unwrap_or_default()
    }

    #[test]
    fn test_named_stops() {
        assert_eq!(
            stops("red-blueRainbow"),
            vec![NamedColor::Red.into(), NamedColor::Blue.into()]
        );
    }

    #[test]
    fn test_code_stops() {
        let (gradient, consumed) = resolve_gradient("c-9Text").unwrap();
        assert_eq!(
            gradient.stops(),
            &[NamedColor::Red.into(), NamedColor::Blue.into()]
        );
        assert_eq!(consumed, 3);
    }

    #[test]
    fn test_hex_stops() {
        let (gradient, consumed) = resolve_gradient("#FF0000-#0000FFHi").unwrap();
        assert_eq!(
            gradient.stops(),
            &[Rgb(255, 0, 0).into(), Rgb(0, 0, 255).into()]
        );
        assert_eq!(consumed, 15);
    }

    #[test]
    fn test_mixed_three_stops() {
        assert_eq!(
            stops("gold-#00FF00-bText"),
            vec![
                NamedColor::Gold.into(),
                Rgb(0, 255, 0).into(),
                NamedColor::Aqua.into()
            ]
        );
    }

    #[test]
    fn test_longest_name_wins_over_code() {
        // "black" rather than code 'b' (aqua) followed by text "lack".
        assert_eq!(
            stops("a-black"),
            vec![NamedColor::Green.into(), NamedColor::Black.into()]
        );
    }

    #[test]
    fn test_span_stops_at_escape_and_space() {
        let (_, consumed) = resolve_gradient("red-blue&lBold").unwrap();
        assert_eq!(consumed, 8);
        let (_, consumed) = resolve_gradient("red-blue text").unwrap();
        assert_eq!(consumed, 8);
    }

    #[test]
    fn test_single_stop_is_rejected() {
        assert!(resolve_gradient("redText").is_none());
        assert!(resolve_gradient("").is_none());
    }

    #[test]
    fn test_unresolvable_segment_is_rejected() {
        assert!(resolve_gradient("red-zzz").is_none());
        assert!(resolve_gradient("red-").is_none());
        assert!(resolve_gradient("red-#12345").is_none());
        assert!(resolve_gradient("zzz-red").is_none());
    }
}
