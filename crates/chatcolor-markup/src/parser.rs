//! Bracket-tag markup parser.
//!
//! Parses `<tag>content</tag>` markup into a [`StyledNode`] tree.
//!
//! # Tags
//!
//! | Tag | Effect |
//! |---|---|
//! | `<red>`, `<dark_blue>`, ... | named color |
//! | `<color:#RRGGBB>`, `<color:red>` | color |
//! | `<gradient:#RRGGBB:red[:...]>` | gradient over the content |
//! | `<bold>`, `<italic>`, `<underline>`, `<strikethrough>`, `<obfuscated>` | format |
//! | `<reset>` | closes every open tag |
//! | `\<`, `\\` | a literal `<`, a literal `\` |
//!
//! A close tag `</name>` closes the most recent open `name` together with
//! every tag opened after it. Tags left open at the end of input close
//! implicitly. A backslash before anything other than `<` or `\` is kept,
//! so `\\` is the only way to write two backslashes in a row.
//!
//! # Degradation
//!
//! Unknown tags, tags with bad arguments, and close tags for tags that are
//! not open are kept as literal text. Only structural problems (a `<` that
//! is never closed, runaway gradient nesting) are errors.
//!
//! Tag names follow the pattern `[a-z_][a-z0-9_-]*`.
//!
//! # Nesting
//!
//! Color and format tags opened one after another share a single level of
//! the tree: each one starts a new sibling carrying the combined style.
//! Only gradients, which paint their whole content, add a level. Long runs
//! of legacy color codes therefore stay shallow.

use crate::color::{Format, Gradient, NamedColor, TextColor};
use crate::error::MarkupError;
use crate::node::{Style, StyledNode};

/// Maximum tree depth, counted in gradient levels and the style runs
/// between them.
pub const MAX_DEPTH: usize = 256;

/// Parses markup into a styled-text tree.
///
/// # Example
///
/// ```rust
/// use chatcolor_markup::{parse_markup, NamedColor, TextColor};
///
/// let tree = parse_markup("<red>Hi</red> there").unwrap();
/// assert_eq!(tree.plain_text(), "Hi there");
///
/// let chars = tree.styled_chars();
/// assert_eq!(chars[0].1.color, Some(TextColor::Named(NamedColor::Red)));
/// assert_eq!(chars[3].1.color, None);
/// ```
pub fn parse_markup(input: &str) -> Result<StyledNode, MarkupError> {
    let mut stack: Vec<Frame<'_>> = vec![Frame::root()];

    for token in Tokenizer::new(input) {
        match token? {
            Token::Text(text) => top(&mut stack).node.push_text(text),
            Token::Escaped(c) => top(&mut stack).node.push_text(c.encode_utf8(&mut [0; 4])),
            Token::OpenTag { name, args, raw } => match Tag::resolve(name, &args) {
                Some(Tag::Reset) => close_to(&mut stack, 1),
                Some(tag) => open(&mut stack, name, tag)?,
                None => top(&mut stack).node.push_text(raw),
            },
            Token::CloseTag { name, raw } => match find_open(&stack, name) {
                Some((frame, entry)) => close_at(&mut stack, frame, entry),
                None => top(&mut stack).node.push_text(raw),
            },
        }
    }

    close_to(&mut stack, 1);
    Ok(stack.pop().map(|f| f.node).unwrap_or_default())
}

/// What a recognized tag does to the set of open tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagEffect {
    Open(&'static str),
    Close(&'static str),
    Reset,
}

/// Reads the tag at the start of `input`, returning its effect and its
/// length in bytes.
///
/// Returns `None` wherever [`parse_markup`] would not treat the text as a
/// tag: unknown names, bad arguments, stray brackets. A close tag is
/// reported whether or not its tag is open.
///
/// # Example
///
/// ```rust
/// use chatcolor_markup::parser::{scan_tag, TagEffect};
///
/// assert_eq!(scan_tag("<red>hi"), Some((TagEffect::Open("red"), 5)));
/// assert_eq!(scan_tag("</color>"), Some((TagEffect::Close("color"), 8)));
/// assert_eq!(scan_tag("<sparkle>"), None);
/// ```
pub fn scan_tag(input: &str) -> Option<(TagEffect, usize)> {
    if !input.starts_with('<') {
        return None;
    }
    let end = input[1..].find(|c: char| c == '<' || c == '>')? + 1;
    if input.as_bytes()[end] != b'>' {
        return None;
    }

    let full_tag = &input[..=end];
    let effect = match Tokenizer::classify(full_tag) {
        Token::OpenTag { name, args, .. } => match Tag::resolve(name, &args)? {
            Tag::Reset => TagEffect::Reset,
            _ => TagEffect::Open(static_name(name)?),
        },
        Token::CloseTag { name, .. } => TagEffect::Close(static_name(name)?),
        Token::Text(_) | Token::Escaped(_) => return None,
    };
    Some((effect, full_tag.len()))
}

/// The `'static` spelling of a tag name that can be opened.
fn static_name(name: &str) -> Option<&'static str> {
    match name {
        "color" => Some("color"),
        "gradient" => Some("gradient"),
        _ => Format::from_tag(name)
            .map(Format::tag)
            .or_else(|| NamedColor::from_name(name).map(NamedColor::name)),
    }
}

/// A resolved, recognized tag.
#[derive(Debug, Clone, PartialEq)]
enum Tag {
    Color(TextColor),
    Gradient(Gradient),
    Format(Format),
    Reset,
}

impl Tag {
    fn resolve(name: &str, args: &[&str]) -> Option<Tag> {
        match (name, args) {
            ("reset", []) => Some(Tag::Reset),
            ("color", [value]) => TextColor::parse(value).ok().map(Tag::Color),
            ("gradient", stops) => {
                let stops = stops
                    .iter()
                    .map(|s| TextColor::parse(s))
                    .collect::<Result<Vec<_>, _>>()
                    .ok()?;
                Gradient::new(stops).ok().map(Tag::Gradient)
            }
            (name, []) => Format::from_tag(name)
                .map(Tag::Format)
                .or_else(|| NamedColor::from_name(name).map(|c| Tag::Color(c.into()))),
            _ => None,
        }
    }
}

/// One level of the tree under construction.
///
/// A gradient frame holds exactly one tag. A style frame holds a run of
/// color and format tags, each with the combined style in effect once it
/// is open; its node carries the last of those styles.
struct Frame<'a> {
    tags: Vec<(&'a str, Style)>,
    gradient: Option<Gradient>,
    node: StyledNode,
}

impl<'a> Frame<'a> {
    fn root() -> Self {
        Self {
            tags: Vec::new(),
            gradient: None,
            node: StyledNode::new(),
        }
    }

    fn styled(name: &'a str, style: Style) -> Self {
        Self {
            tags: vec![(name, style)],
            gradient: None,
            node: StyledNode::new().with_style(style),
        }
    }

    fn gradient(name: &'a str, gradient: Gradient) -> Self {
        Self {
            tags: vec![(name, Style::new())],
            gradient: Some(gradient),
            node: StyledNode::new(),
        }
    }

    fn is_style_run(&self) -> bool {
        self.gradient.is_none() && !self.tags.is_empty()
    }

    /// Starts a new node for `style`, returning the finished one.
    fn restyle(&mut self, style: Style) -> StyledNode {
        std::mem::replace(&mut self.node, StyledNode::new().with_style(style))
    }

    fn finish(mut self) -> StyledNode {
        if let Some(gradient) = &self.gradient {
            self.node.apply_gradient(gradient);
        }
        self.node
    }
}

fn top<'s, 'a>(stack: &'s mut [Frame<'a>]) -> &'s mut Frame<'a> {
    let last = stack.len() - 1;
    &mut stack[last]
}

/// Adds a finished node to the parent of the top frame.
fn attach(stack: &mut [Frame<'_>], node: StyledNode) {
    if node.text.is_empty() && node.children.is_empty() {
        return;
    }
    let parent = stack.len() - 2;
    stack[parent].node.children.push(node);
}

fn open<'a>(stack: &mut Vec<Frame<'a>>, name: &'a str, tag: Tag) -> Result<(), MarkupError> {
    let style = match tag {
        Tag::Color(color) => Style::new().color(color),
        Tag::Format(format) => Style::new().format(format, true),
        Tag::Reset => {
            close_to(stack, 1);
            return Ok(());
        }
        Tag::Gradient(gradient) => {
            check_depth(stack)?;
            stack.push(Frame::gradient(name, gradient));
            return Ok(());
        }
    };

    let frame = top(stack);
    if !frame.is_style_run() {
        check_depth(stack)?;
        stack.push(Frame::styled(name, style));
        return Ok(());
    }

    let current = frame.tags.last().map(|(_, s)| *s).unwrap_or_default();
    let combined = style.inherit(&current);
    frame.tags.push((name, combined));
    let finished = frame.restyle(combined);
    attach(stack, finished);
    Ok(())
}

fn check_depth(stack: &[Frame<'_>]) -> Result<(), MarkupError> {
    if stack.len() > MAX_DEPTH {
        return Err(MarkupError::TooDeep { limit: MAX_DEPTH });
    }
    Ok(())
}

/// Locates the most recent open `name` as (frame, tag within frame).
///
/// Frame 0 is the root and holds no tags.
fn find_open(stack: &[Frame<'_>], name: &str) -> Option<(usize, usize)> {
    stack.iter().enumerate().rev().find_map(|(index, frame)| {
        frame
            .tags
            .iter()
            .rposition(|(tag, _)| *tag == name)
            .map(|entry| (index, entry))
    })
}

/// Closes tag `entry` of frame `frame` and every tag opened after it.
fn close_at(stack: &mut Vec<Frame<'_>>, frame: usize, entry: usize) {
    close_to(stack, frame + 1);
    if entry == 0 {
        close_to(stack, frame);
        return;
    }

    let current = top(stack);
    current.tags.truncate(entry);
    let style = current.tags[entry - 1].1;
    let finished = current.restyle(style);
    attach(stack, finished);
}

/// Closes frames until only `keep` remain, attaching each to its parent.
fn close_to(stack: &mut Vec<Frame<'_>>, keep: usize) {
    while stack.len() > keep.max(1) {
        if let Some(frame) = stack.pop() {
            let node = frame.finish();
            top(stack).node.children.push(node);
        }
    }
}

/// Token types produced by the tokenizer.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Token<'a> {
    /// Plain text content.
    Text(&'a str),
    /// A backslash-escaped character.
    Escaped(char),
    /// Opening tag: `<name>` or `<name:arg:arg>`
    OpenTag {
        name: &'a str,
        args: Vec<&'a str>,
        raw: &'a str,
    },
    /// Closing tag: `</name>`
    CloseTag { name: &'a str, raw: &'a str },
}

/// Tokenizer for bracket tags.
struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Checks if a string is a valid tag name.
    fn is_valid_tag_name(s: &str) -> bool {
        let mut chars = s.chars();
        let Some(first) = chars.next() else {
            return false;
        };

        if !first.is_ascii_lowercase() && first != '_' {
            return false;
        }

        chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-')
    }

    fn classify(full_tag: &'a str) -> Token<'a> {
        let content = &full_tag[1..full_tag.len() - 1];

        if let Some(name) = content.strip_prefix('/') {
            if Self::is_valid_tag_name(name) {
                return Token::CloseTag {
                    name,
                    raw: full_tag,
                };
            }
            return Token::Text(full_tag);
        }

        let mut parts = content.split(':');
        let name = parts.next().unwrap_or_default();
        let args: Vec<&str> = parts.collect();
        if Self::is_valid_tag_name(name) && args.iter().all(|a| !a.is_empty()) {
            Token::OpenTag {
                name,
                args,
                raw: full_tag,
            }
        } else {
            Token::Text(full_tag)
        }
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Result<Token<'a>, MarkupError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.input.len() {
            return None;
        }

        let remaining = &self.input[self.pos..];

        match remaining.find(|c: char| c == '<' || c == '\\') {
            Some(0) => {}
            Some(special) => {
                self.pos += special;
                return Some(Ok(Token::Text(&remaining[..special])));
            }
            None => {
                self.pos = self.input.len();
                return Some(Ok(Token::Text(remaining)));
            }
        }

        if let Some(rest) = remaining.strip_prefix('\\') {
            return match rest.chars().next() {
                Some(c @ ('<' | '\\')) => {
                    self.pos += 1 + c.len_utf8();
                    Some(Ok(Token::Escaped(c)))
                }
                _ => {
                    self.pos += 1;
                    Some(Ok(Token::Text("\\")))
                }
            };
        }

        // At a '<': the tag runs to the next '>', unless another '<' comes
        // first, in which case this one is a literal.
        match remaining[1..].find(|c: char| c == '<' || c == '>') {
            Some(end) if remaining.as_bytes()[end + 1] == b'>' => {
                let full_tag = &remaining[..end + 2];
                self.pos += full_tag.len();
                Some(Ok(Self::classify(full_tag)))
            }
            Some(_) => {
                self.pos += 1;
                Some(Ok(Token::Text("<")))
            }
            None => {
                let offset = self.pos;
                self.pos = self.input.len();
                Some(Err(MarkupError::UnterminatedTag { offset }))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;

    fn color_at(tree: &StyledNode, index: usize) -> Option<TextColor> {
        tree.styled_chars()[index].1.color
    }

    // ==================== Basic Parsing ====================

    mod basics {
        use super::*;

        #[test]
        fn plain_text_unchanged() {
            let tree = parse_markup("hello world").unwrap();
            assert_eq!(tree.plain_text(), "hello world");
            assert!(tree.styled_chars().iter().all(|(_, s)| s.is_plain()));
        }

        #[test]
        fn empty_input() {
            let tree = parse_markup("").unwrap();
            assert_eq!(tree.plain_text(), "");
        }

        #[test]
        fn named_color_tag() {
            let tree = parse_markup("<red>hi</red>").unwrap();
            assert_eq!(tree.plain_text(), "hi");
            assert_eq!(color_at(&tree, 0), Some(TextColor::Named(NamedColor::Red)));
        }

        #[test]
        fn hex_color_tag() {
            let tree = parse_markup("<color:#1A2B3C>hi</color>").unwrap();
            assert_eq!(color_at(&tree, 1), Some(TextColor::Hex(Rgb(0x1A, 0x2B, 0x3C))));
        }

        #[test]
        fn format_tags() {
            for format in Format::ALL {
                let input = format!("<{0}>x</{0}>", format.tag());
                let tree = parse_markup(&input).unwrap();
                assert!(tree.styled_chars()[0].1.has(format), "{input}");
            }
        }

        #[test]
        fn nested_tags_merge() {
            let tree = parse_markup("<red><bold>a</bold>b</red>c").unwrap();
            let chars = tree.styled_chars();
            assert_eq!(chars[0].1, Style::new().color(NamedColor::Red).bold());
            assert_eq!(chars[1].1, Style::new().color(NamedColor::Red));
            assert_eq!(chars[2].1, Style::new());
        }

        #[test]
        fn inner_color_overrides_outer() {
            let tree = parse_markup("<red>a<blue>b</blue>c</red>").unwrap();
            assert_eq!(color_at(&tree, 0), Some(TextColor::Named(NamedColor::Red)));
            assert_eq!(color_at(&tree, 1), Some(TextColor::Named(NamedColor::Blue)));
            assert_eq!(color_at(&tree, 2), Some(TextColor::Named(NamedColor::Red)));
        }

        #[test]
        fn unclosed_tags_close_at_end() {
            let tree = parse_markup("<red>hello").unwrap();
            assert_eq!(tree.plain_text(), "hello");
            assert_eq!(color_at(&tree, 4), Some(TextColor::Named(NamedColor::Red)));
        }
    }

    // ==================== Closing Semantics ====================

    mod closing {
        use super::*;

        #[test]
        fn close_collapses_later_tags() {
            let tree = parse_markup("<red>a<bold>b<italic>c</red>d").unwrap();
            let chars = tree.styled_chars();
            assert_eq!(chars[2].1, Style::new().color(NamedColor::Red).bold().italic());
            assert_eq!(chars[3].1, Style::new());
        }

        #[test]
        fn close_targets_most_recent_match() {
            let tree = parse_markup("<color:#111111>a<color:#222222>b</color>c").unwrap();
            assert_eq!(color_at(&tree, 1), Some(TextColor::Hex(Rgb(0x22, 0x22, 0x22))));
            assert_eq!(color_at(&tree, 2), Some(TextColor::Hex(Rgb(0x11, 0x11, 0x11))));
        }

        #[test]
        fn orphan_close_is_literal() {
            let tree = parse_markup("hello</bold>").unwrap();
            assert_eq!(tree.plain_text(), "hello</bold>");
        }

        #[test]
        fn close_inside_style_run_restores_earlier_style() {
            let tree = parse_markup("<red>a<bold>b<gold>c</bold>d</red>e").unwrap();
            let chars = tree.styled_chars();
            assert_eq!(chars[1].1, Style::new().color(NamedColor::Red).bold());
            assert_eq!(chars[2].1, Style::new().color(NamedColor::Gold).bold());
            assert_eq!(chars[3].1, Style::new().color(NamedColor::Red));
            assert_eq!(chars[4].1, Style::new());
        }

        #[test]
        fn close_reaches_past_gradient() {
            let tree = parse_markup("<bold>a<gradient:red:blue>bc</bold>d").unwrap();
            let chars = tree.styled_chars();
            assert!(chars[1].1.has(Format::Bold));
            assert_eq!(chars[1].1.color, Some(TextColor::Hex(NamedColor::Red.rgb())));
            assert_eq!(chars[3].1, Style::new());
        }

        #[test]
        fn reset_closes_everything() {
            let tree = parse_markup("<red><bold><italic>a<reset>b").unwrap();
            let chars = tree.styled_chars();
            assert_eq!(chars[0].1, Style::new().color(NamedColor::Red).bold().italic());
            assert_eq!(chars[1].1, Style::new());
        }
    }

    // ==================== Degradation ====================

    mod degradation {
        use super::*;

        #[test]
        fn unknown_tag_is_literal() {
            let tree = parse_markup("<sparkle>x</sparkle>").unwrap();
            assert_eq!(tree.plain_text(), "<sparkle>x</sparkle>");
        }

        #[test]
        fn bad_color_argument_is_literal() {
            let tree = parse_markup("<color:#GGGGGG>x").unwrap();
            assert_eq!(tree.plain_text(), "<color:#GGGGGG>x");
        }

        #[test]
        fn single_stop_gradient_is_literal() {
            let tree = parse_markup("<gradient:red>x").unwrap();
            assert_eq!(tree.plain_text(), "<gradient:red>x");
        }

        #[test]
        fn invalid_tag_names_are_literal() {
            let tree = parse_markup("<123>a<Bold>b< c >d").unwrap();
            assert_eq!(tree.plain_text(), "<123>a<Bold>b< c >d");
        }

        #[test]
        fn unterminated_tag_is_error() {
            assert_eq!(
                parse_markup("ab<red"),
                Err(MarkupError::UnterminatedTag { offset: 2 })
            );
        }

        #[test]
        fn bracket_before_tag_is_literal() {
            let tree = parse_markup("a<<red>b").unwrap();
            assert_eq!(tree.plain_text(), "a<b");
            assert_eq!(color_at(&tree, 2), Some(TextColor::Named(NamedColor::Red)));
        }

        #[test]
        fn escapes() {
            let tree = parse_markup(r"\<red>x\\y\z").unwrap();
            assert_eq!(tree.plain_text(), r"<red>x\y\z");
        }

        #[test]
        fn too_deep_is_error() {
            let input = "<gradient:red:blue>".repeat(MAX_DEPTH + 1);
            assert_eq!(
                parse_markup(&input),
                Err(MarkupError::TooDeep { limit: MAX_DEPTH })
            );
        }
    }

    // ==================== Nesting ====================

    mod nesting {
        use super::*;

        fn depth(node: &StyledNode) -> usize {
            1 + node.children.iter().map(depth).max().unwrap_or(0)
        }

        #[test]
        fn long_style_runs_stay_shallow() {
            let input = "<red>x<bold>y<gold>z".repeat(300);
            let tree = parse_markup(&input).unwrap();
            assert!(depth(&tree) <= 3);

            let chars = tree.styled_chars();
            assert_eq!(chars.len(), 900);
            assert_eq!(color_at(&tree, 0), Some(TextColor::Named(NamedColor::Red)));
            assert_eq!(chars[899].1, Style::new().color(NamedColor::Gold).bold());
        }

        #[test]
        fn styles_inside_gradient_share_a_level() {
            let input = format!("<gradient:red:blue>{}", "<bold>a<italic>b".repeat(300));
            let tree = parse_markup(&input).unwrap();
            assert!(depth(&tree) <= 4);
            assert_eq!(tree.plain_text().len(), 600);
        }
    }

    // ==================== Scanning ====================

    mod scanning {
        use super::*;

        #[test]
        fn recognized_tags() {
            assert_eq!(scan_tag("<bold>x"), Some((TagEffect::Open("bold"), 6)));
            assert_eq!(
                scan_tag("<color:#123456>"),
                Some((TagEffect::Open("color"), 15))
            );
            assert_eq!(
                scan_tag("<gradient:red:blue>"),
                Some((TagEffect::Open("gradient"), 19))
            );
            assert_eq!(scan_tag("</dark_red>"), Some((TagEffect::Close("dark_red"), 11)));
            assert_eq!(scan_tag("<reset>"), Some((TagEffect::Reset, 7)));
        }

        #[test]
        fn literal_text_is_not_a_tag() {
            let inputs = [
                "<sparkle>",
                "</sparkle>",
                "<color:#GG0000>",
                "<<red>",
                "<red",
                "</reset>",
                "x<red>",
            ];
            for input in inputs {
                assert_eq!(scan_tag(input), None, "{input}");
            }
        }
    }

    // ==================== Gradients ====================

    mod gradients {
        use super::*;

        #[test]
        fn gradient_spans_content() {
            let tree = parse_markup("<gradient:#FF0000:#0000FF>abc</gradient>d").unwrap();
            assert_eq!(color_at(&tree, 0), Some(TextColor::Hex(Rgb(255, 0, 0))));
            assert_eq!(color_at(&tree, 1), Some(TextColor::Hex(Rgb(128, 0, 128))));
            assert_eq!(color_at(&tree, 2), Some(TextColor::Hex(Rgb(0, 0, 255))));
            assert_eq!(color_at(&tree, 3), None);
        }

        #[test]
        fn gradient_with_nested_format() {
            let tree = parse_markup("<gradient:red:blue>a<bold>bc</bold></gradient>").unwrap();
            let chars = tree.styled_chars();
            assert_eq!(chars[0].1.color, Some(TextColor::Hex(NamedColor::Red.rgb())));
            assert_eq!(chars[2].1.color, Some(TextColor::Hex(NamedColor::Blue.rgb())));
            assert!(chars[1].1.has(Format::Bold));
            assert!(!chars[0].1.has(Format::Bold));
        }
    }

    // ==================== Tokenizer ====================

    mod tokenizer {
        use super::*;

        fn tokens(input: &str) -> Vec<Token<'_>> {
            Tokenizer::new(input).map(|t| t.unwrap()).collect()
        }

        #[test]
        fn tokenize_mixed() {
            assert_eq!(
                tokens("a<b>c</b>d"),
                vec![
                    Token::Text("a"),
                    Token::OpenTag {
                        name: "b",
                        args: vec![],
                        raw: "<b>"
                    },
                    Token::Text("c"),
                    Token::CloseTag {
                        name: "b",
                        raw: "</b>"
                    },
                    Token::Text("d"),
                ]
            );
        }

        #[test]
        fn tokenize_args() {
            assert_eq!(
                tokens("<gradient:red:#00FF00>"),
                vec![Token::OpenTag {
                    name: "gradient",
                    args: vec!["red", "#00FF00"],
                    raw: "<gradient:red:#00FF00>"
                }]
            );
        }

        #[test]
        fn empty_argument_is_text() {
            assert_eq!(tokens("<color:>"), vec![Token::Text("<color:>")]);
        }

        #[test]
        fn valid_tag_names() {
            assert!(Tokenizer::is_valid_tag_name("bold"));
            assert!(Tokenizer::is_valid_tag_name("dark_blue"));
            assert!(Tokenizer::is_valid_tag_name("h1"));
            assert!(!Tokenizer::is_valid_tag_name(""));
            assert!(!Tokenizer::is_valid_tag_name("1style"));
            assert!(!Tokenizer::is_valid_tag_name("-style"));
            assert!(!Tokenizer::is_valid_tag_name("Bold"));
        }
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    // Plain text without markup-significant characters.
    fn plain_text() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9 .,!?:;'\"]{0,50}"
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        #[test]
        fn plain_text_round_trips(content in plain_text()) {
            let tree = parse_markup(&content).unwrap();
            prop_assert_eq!(tree.plain_text(), content);
        }

        #[test]
        fn known_tags_strip_to_content(
            format in prop::sample::select(Format::ALL.to_vec()),
            content in plain_text()
        ) {
            let input = format!("<{0}>{1}</{0}>", format.tag(), content);
            let tree = parse_markup(&input).unwrap();
            prop_assert_eq!(tree.plain_text(), content);
        }

        #[test]
        fn never_panics(input in "\\PC{0,80}") {
            let _ = parse_markup(&input);
        }

        #[test]
        fn closing_outer_tag_never_leaks(
            content in "[a-z]{1,10}",
            tail in "[a-z]{1,10}"
        ) {
            let input = format!("<red>{content}<bold><italic>{content}</red>{tail}");
            let tree = parse_markup(&input).unwrap();
            let chars = tree.styled_chars();
            for (_, style) in &chars[chars.len() - tail.len()..] {
                prop_assert!(style.is_plain());
            }
        }
    }
}
