//! The styled-text tree.
//!
//! A [`StyledNode`] holds a run of text, an optional [`Style`], and ordered
//! children. The text comes before the children when the node is read in
//! order. A node's effective style is its ancestors' styles merged in order,
//! with each node's own set fields overriding what it inherits.

use crate::color::{Format, Gradient, Rgb, TextColor};

/// Style attributes of a node.
///
/// Unset fields (`None`) inherit from the parent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Style {
    pub color: Option<TextColor>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub underline: Option<bool>,
    pub strikethrough: Option<bool>,
    pub obfuscated: Option<bool>,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color(mut self, color: impl Into<TextColor>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn bold(self) -> Self {
        self.format(Format::Bold, true)
    }

    pub fn italic(self) -> Self {
        self.format(Format::Italic, true)
    }

    pub fn underline(self) -> Self {
        self.format(Format::Underline, true)
    }

    pub fn strikethrough(self) -> Self {
        self.format(Format::Strikethrough, true)
    }

    pub fn obfuscated(self) -> Self {
        self.format(Format::Obfuscated, true)
    }

    /// Sets a format toggle explicitly.
    pub fn format(mut self, format: Format, on: bool) -> Self {
        *self.format_slot(format) = Some(on);
        self
    }

    /// Whether a format is switched on. Unset counts as off.
    pub fn has(&self, format: Format) -> bool {
        let slot = match format {
            Format::Obfuscated => self.obfuscated,
            Format::Bold => self.bold,
            Format::Strikethrough => self.strikethrough,
            Format::Underline => self.underline,
            Format::Italic => self.italic,
        };
        slot.unwrap_or(false)
    }

    fn format_slot(&mut self, format: Format) -> &mut Option<bool> {
        match format {
            Format::Obfuscated => &mut self.obfuscated,
            Format::Bold => &mut self.bold,
            Format::Strikethrough => &mut self.strikethrough,
            Format::Underline => &mut self.underline,
            Format::Italic => &mut self.italic,
        }
    }

    /// Returns `self` layered over `parent`: fields set here win.
    pub fn inherit(&self, parent: &Style) -> Style {
        Style {
            color: self.color.or(parent.color),
            bold: self.bold.or(parent.bold),
            italic: self.italic.or(parent.italic),
            underline: self.underline.or(parent.underline),
            strikethrough: self.strikethrough.or(parent.strikethrough),
            obfuscated: self.obfuscated.or(parent.obfuscated),
        }
    }

    /// True if no color is set and every format is off.
    pub fn is_plain(&self) -> bool {
        self.color.is_none() && Format::ALL.iter().all(|f| !self.has(*f))
    }

    /// Drops explicit `false` formats so styles compare by what is visible.
    pub fn visible(&self) -> Style {
        let mut out = Style {
            color: self.color,
            ..Style::default()
        };
        for format in Format::ALL {
            if self.has(format) {
                *out.format_slot(format) = Some(true);
            }
        }
        out
    }
}

/// A node in the styled-text tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyledNode {
    pub text: String,
    pub style: Style,
    pub children: Vec<StyledNode>,
}

impl StyledNode {
    /// An empty, unstyled node.
    pub fn new() -> Self {
        Self::default()
    }

    /// An unstyled text leaf.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// A styled text leaf.
    pub fn styled(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
            children: Vec::new(),
        }
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn with_child(mut self, child: StyledNode) -> Self {
        self.children.push(child);
        self
    }

    /// Appends text, merging with a trailing unstyled leaf where possible.
    pub fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if self.children.is_empty() {
            self.text.push_str(text);
            return;
        }
        match self.children.last_mut() {
            Some(last) if last.style == Style::default() && last.children.is_empty() => {
                last.text.push_str(text);
            }
            _ => self.children.push(StyledNode::text(text)),
        }
    }

    /// The text content with all styling removed.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.walk(&Style::default(), &mut |text, _| out.push_str(text));
        out
    }

    /// Number of characters in this subtree.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
            + self
                .children
                .iter()
                .map(StyledNode::char_count)
                .sum::<usize>()
    }

    /// Every character with its effective style.
    pub fn styled_chars(&self) -> Vec<(char, Style)> {
        let mut out = Vec::new();
        self.walk(&Style::default(), &mut |text, style| {
            out.extend(text.chars().map(|c| (c, *style)));
        });
        out
    }

    /// Maximal runs of text sharing the same visible style, in reading order.
    ///
    /// Empty text is skipped. Adjacent runs always differ in style.
    pub fn runs(&self) -> Vec<(String, Style)> {
        let mut runs: Vec<(String, Style)> = Vec::new();
        self.walk(&Style::default(), &mut |text, style| {
            let style = style.visible();
            match runs.last_mut() {
                Some((run, last)) if *last == style => run.push_str(text),
                _ => runs.push((text.to_string(), style)),
            }
        });
        runs
    }

    /// Depth-first traversal, calling `visit` with each non-empty text run and
    /// its effective style.
    pub fn walk<F>(&self, inherited: &Style, visit: &mut F)
    where
        F: FnMut(&str, &Style),
    {
        let effective = self.style.inherit(inherited);
        if !self.text.is_empty() {
            visit(&self.text, &effective);
        }
        for child in &self.children {
            child.walk(&effective, visit);
        }
    }

    /// Colors every character of this subtree along `gradient`.
    ///
    /// Positions are spread across all characters of the subtree; characters
    /// under a node with its own color keep that color.
    pub fn apply_gradient(&mut self, gradient: &Gradient) {
        let colors = gradient.sample(self.char_count());
        let mut position = 0;
        self.paint(&colors, &mut position, false);
    }

    fn paint(&mut self, colors: &[Rgb], position: &mut usize, colored: bool) {
        let colored = colored || self.style.color.is_some();

        if !self.text.is_empty() {
            let count = self.text.chars().count();
            if !colored {
                let painted: Vec<StyledNode> = self
                    .text
                    .chars()
                    .zip(&colors[*position..*position + count])
                    .map(|(c, rgb)| StyledNode::styled(c.to_string(), Style::new().color(*rgb)))
                    .collect();
                self.text.clear();
                self.children.splice(0..0, painted);
                *position += count;
                // Painted leaves now sit ahead of the original children.
                for child in self.children.iter_mut().skip(count) {
                    child.paint(colors, position, colored);
                }
                return;
            }
            *position += count;
        }

        for child in &mut self.children {
            child.paint(colors, position, colored);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::NamedColor;

    #[test]
    fn test_inherit_overrides_parent() {
        let parent = Style::new().color(NamedColor::Red).bold();
        let child = Style::new().color(NamedColor::Blue);
        let merged = child.inherit(&parent);
        assert_eq!(merged.color, Some(TextColor::Named(NamedColor::Blue)));
        assert_eq!(merged.bold, Some(true));
    }

    #[test]
    fn test_visible_drops_explicit_false() {
        let style = Style::new().format(Format::Bold, false).italic();
        assert_eq!(style.visible(), Style::new().italic());
        assert!(Style::new().format(Format::Bold, false).is_plain());
    }

    #[test]
    fn test_plain_text_order() {
        let node = StyledNode::text("a")
            .with_child(StyledNode::styled("b", Style::new().bold()).with_child(StyledNode::text("c")))
            .with_child(StyledNode::text("d"));
        assert_eq!(node.plain_text(), "abcd");
        assert_eq!(node.char_count(), 4);
    }

    #[test]
    fn test_styled_chars_effective_style() {
        let node = StyledNode::new().with_child(
            StyledNode::styled("x", Style::new().color(NamedColor::Red))
                .with_child(StyledNode::styled("y", Style::new().bold())),
        );
        let chars = node.styled_chars();
        assert_eq!(chars[0], ('x', Style::new().color(NamedColor::Red)));
        assert_eq!(chars[1], ('y', Style::new().color(NamedColor::Red).bold()));
    }

    #[test]
    fn test_children_do_not_mutate_parent() {
        let node = StyledNode::styled("a", Style::new().color(NamedColor::Red))
            .with_child(StyledNode::styled("b", Style::new().color(NamedColor::Blue)))
            .with_child(StyledNode::text("c"));
        let chars = node.styled_chars();
        assert_eq!(chars[2].1.color, Some(TextColor::Named(NamedColor::Red)));
    }

    #[test]
    fn test_runs_merge_equal_styles() {
        let node = StyledNode::new()
            .with_child(StyledNode::styled("ab", Style::new().bold()))
            .with_child(StyledNode::styled("cd", Style::new().bold()))
            .with_child(StyledNode::text("e"));
        let runs = node.runs();
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0], ("abcd".to_string(), Style::new().bold()));
        assert_eq!(runs[1], ("e".to_string(), Style::new()));
    }

    #[test]
    fn test_push_text_merges_into_trailing_leaf() {
        let mut node = StyledNode::new();
        node.push_text("a");
        node.push_text("b");
        assert_eq!(node.text, "ab");

        node.children.push(StyledNode::styled("c", Style::new().bold()));
        node.push_text("d");
        node.push_text("e");
        assert_eq!(node.children.len(), 2);
        assert_eq!(node.children[1].text, "de");
    }

    #[test]
    fn test_apply_gradient_paints_every_char() {
        let gradient = Gradient::new(vec![Rgb(255, 0, 0).into(), Rgb(0, 0, 255).into()]).unwrap();
        let mut node = StyledNode::text("abc");
        node.apply_gradient(&gradient);

        let chars = node.styled_chars();
        assert_eq!(chars.len(), 3);
        assert_eq!(chars[0].1.color, Some(TextColor::Hex(Rgb(255, 0, 0))));
        assert_eq!(chars[1].1.color, Some(TextColor::Hex(Rgb(128, 0, 128))));
        assert_eq!(chars[2].1.color, Some(TextColor::Hex(Rgb(0, 0, 255))));
        assert_eq!(node.plain_text(), "abc");
    }

    #[test]
    fn test_apply_gradient_keeps_inner_colors() {
        let gradient = Gradient::new(vec![Rgb(255, 0, 0).into(), Rgb(0, 0, 255).into()]).unwrap();
        let mut node = StyledNode::text("a")
            .with_child(StyledNode::styled("b", Style::new().color(NamedColor::Green)))
            .with_child(StyledNode::styled("c", Style::new().bold()));
        node.apply_gradient(&gradient);

        let chars = node.styled_chars();
        assert_eq!(chars[0].1.color, Some(TextColor::Hex(Rgb(255, 0, 0))));
        assert_eq!(chars[1].1.color, Some(TextColor::Named(NamedColor::Green)));
        assert_eq!(chars[2].1.color, Some(TextColor::Hex(Rgb(0, 0, 255))));
        assert_eq!(chars[2].1.bold, Some(true));
    }
}
