//! Escape alphabet normalization.

use std::borrow::Cow;

use chatcolor_markup::RENDERED_GLYPH;

use crate::lexer::ESCAPE;

/// Rewrites rendered `§` codes to the authoring `&` form.
///
/// Placeholder providers may hand back text that is already rendered; after
/// this pass every later stage sees a single escape character. Borrows when
/// there is nothing to rewrite.
///
/// # Example
///
/// ```rust
/// use chatcolor::normalize_legacy;
///
/// assert_eq!(normalize_legacy("§cHi &lthere"), "&cHi &lthere");
/// ```
pub fn normalize_legacy(text: &str) -> Cow<'_, str> {
    if text.contains(RENDERED_GLYPH) {
        Cow::Owned(text.replace(RENDERED_GLYPH, ESCAPE.encode_utf8(&mut [0; 4])))
    } else {
        Cow::Borrowed(text)
    }
}
