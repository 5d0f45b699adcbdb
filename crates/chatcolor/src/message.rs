//! Templated message parts.
//!
//! Some surfaces (advancement and death announcements, roleplay actions)
//! fill in a fixed set of `%name%` placeholders themselves before the text
//! reaches the formatter. [`MessagePart`] splits a template into literal and
//! placeholder segments so those surfaces can substitute without string
//! searching.

use std::fmt;

/// One segment of a message template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessagePart {
    Text(String),
    /// A placeholder name, without the surrounding `%`.
    Placeholder(String),
}

impl MessagePart {
    /// Splits a template into parts.
    ///
    /// A placeholder is a non-empty run without whitespace between two `%`.
    /// A `%` without a valid partner stays in the text.
    ///
    /// # Example
    ///
    /// ```rust
    /// use chatcolor::MessagePart;
    ///
    /// let parts = MessagePart::split("%player% was slain by %killer%");
    /// assert_eq!(
    ///     parts,
    ///     vec![
    ///         MessagePart::Placeholder("player".into()),
    ///         MessagePart::Text(" was slain by ".into()),
    ///         MessagePart::Placeholder("killer".into()),
    ///     ]
    /// );
    /// ```
    pub fn split(template: &str) -> Vec<MessagePart> {
        let mut parts = Vec::new();
        let mut text = String::new();
        let mut rest = template;

        while let Some(start) = rest.find('%') {
            text.push_str(&rest[..start]);
            let after = &rest[start + 1..];
            match after.find('%') {
                Some(end) if is_placeholder_name(&after[..end]) => {
                    if !text.is_empty() {
                        parts.push(MessagePart::Text(std::mem::take(&mut text)));
                    }
                    parts.push(MessagePart::Placeholder(after[..end].to_string()));
                    rest = &after[end + 1..];
                }
                _ => {
                    text.push('%');
                    rest = after;
                }
            }
        }

        text.push_str(rest);
        if !text.is_empty() {
            parts.push(MessagePart::Text(text));
        }
        parts
    }

    /// Rebuilds text from parts, asking `lookup` for each placeholder.
    ///
    /// Placeholders `lookup` does not know are written back verbatim.
    pub fn join<F>(parts: &[MessagePart], mut lookup: F) -> String
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut out = String::new();
        for part in parts {
            match part {
                MessagePart::Text(text) => out.push_str(text),
                MessagePart::Placeholder(name) => match lookup(name) {
                    Some(value) => out.push_str(&value),
                    None => {
                        out.push('%');
                        out.push_str(name);
                        out.push('%');
                    }
                },
            }
        }
        out
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, MessagePart::Placeholder(_))
    }
}

impl fmt::Display for MessagePart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessagePart::Text(text) => f.write_str(text),
            MessagePart::Placeholder(name) => write!(f, "%{name}%"),
        }
    }
}

fn is_placeholder_name(name: &str) -> bool {
    !name.is_empty() && !name.chars().any(char::is_whitespace)
}
