//! Color values for chat text.
//!
//! Supports the color forms that can appear in chat markup:
//!
//! - Named colors: the 16 legacy chat colors, addressed by code (`0`-`9`,
//!   `a`-`f`) or by name (`red`, `dark_blue`, ...)
//! - RGB hex: `#1A2B3C` (exactly 6 digits)
//! - Gradients: two or more stops, sampled per character
//!
//! # Example
//!
//! ```rust
//! use chatcolor_markup::{NamedColor, Rgb, TextColor};
//!
//! let red = NamedColor::from_code('c').unwrap();
//! assert_eq!(red.name(), "red");
//! assert_eq!(red.rgb(), Rgb(255, 85, 85));
//!
//! let hex = TextColor::parse("#1a2b3c").unwrap();
//! assert_eq!(hex, TextColor::Hex(Rgb(0x1A, 0x2B, 0x3C)));
//! ```

use std::fmt;

use crate::error::ColorError;

/// A true-color RGB triplet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Parses exactly six hex digits (no `#` prefix), case-insensitive.
    pub fn parse_hex(hex: &str) -> Result<Self, ColorError> {
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorError::InvalidHex(hex.to_string()));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| ColorError::InvalidHex(hex.to_string()))
        };
        Ok(Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Renders the color as `#RRGGBB` (uppercase).
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }

    /// Linearly interpolates between two colors. `t` is clamped to `0.0..=1.0`.
    pub fn lerp(a: Rgb, b: Rgb, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let channel = |x: u8, y: u8| -> u8 {
            let v = x as f64 + t * (y as f64 - x as f64);
            v.round().clamp(0.0, 255.0) as u8
        };
        Rgb(channel(a.0, b.0), channel(a.1, b.1), channel(a.2, b.2))
    }
}

impl From<Rgb> for (u8, u8, u8) {
    fn from(rgb: Rgb) -> Self {
        (rgb.0, rgb.1, rgb.2)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// The 16 legacy chat colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedColor {
    Black,
    DarkBlue,
    DarkGreen,
    DarkAqua,
    DarkRed,
    DarkPurple,
    Gold,
    Gray,
    DarkGray,
    Blue,
    Green,
    Aqua,
    Red,
    LightPurple,
    Yellow,
    White,
}

impl NamedColor {
    /// All colors, ordered by legacy code (`0` through `f`).
    pub const ALL: [NamedColor; 16] = [
        NamedColor::Black,
        NamedColor::DarkBlue,
        NamedColor::DarkGreen,
        NamedColor::DarkAqua,
        NamedColor::DarkRed,
        NamedColor::DarkPurple,
        NamedColor::Gold,
        NamedColor::Gray,
        NamedColor::DarkGray,
        NamedColor::Blue,
        NamedColor::Green,
        NamedColor::Aqua,
        NamedColor::Red,
        NamedColor::LightPurple,
        NamedColor::Yellow,
        NamedColor::White,
    ];

    /// Looks up a color by its legacy code character (case-insensitive).
    pub fn from_code(code: char) -> Option<Self> {
        let index = code.to_digit(16)?;
        Some(Self::ALL[index as usize])
    }

    /// Looks up a color by name.
    ///
    /// Names are case-insensitive and accepted with or without underscores,
    /// so `dark_blue`, `darkblue` and `DARK_BLUE` all resolve. `grey` and
    /// `dark_grey` are aliases.
    pub fn from_name(name: &str) -> Option<Self> {
        let key: String = name
            .chars()
            .filter(|c| *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        let color = match key.as_str() {
            "black" => NamedColor::Black,
            "darkblue" => NamedColor::DarkBlue,
            "darkgreen" => NamedColor::DarkGreen,
            "darkaqua" => NamedColor::DarkAqua,
            "darkred" => NamedColor::DarkRed,
            "darkpurple" => NamedColor::DarkPurple,
            "gold" => NamedColor::Gold,
            "gray" | "grey" => NamedColor::Gray,
            "darkgray" | "darkgrey" => NamedColor::DarkGray,
            "blue" => NamedColor::Blue,
            "green" => NamedColor::Green,
            "aqua" => NamedColor::Aqua,
            "red" => NamedColor::Red,
            "lightpurple" => NamedColor::LightPurple,
            "yellow" => NamedColor::Yellow,
            "white" => NamedColor::White,
            _ => return None,
        };
        Some(color)
    }

    /// Finds the longest color name that prefixes `input`.
    ///
    /// Returns the color and the number of bytes of `input` it consumed.
    /// Only underscore-free spellings are considered, so this is suitable
    /// for scanning runs of alphanumeric text.
    pub fn longest_name_prefix(input: &str) -> Option<(Self, usize)> {
        const SPELLINGS: [(&str, NamedColor); 18] = [
            ("lightpurple", NamedColor::LightPurple),
            ("darkpurple", NamedColor::DarkPurple),
            ("darkgreen", NamedColor::DarkGreen),
            ("darkgray", NamedColor::DarkGray),
            ("darkgrey", NamedColor::DarkGray),
            ("darkblue", NamedColor::DarkBlue),
            ("darkaqua", NamedColor::DarkAqua),
            ("darkred", NamedColor::DarkRed),
            ("yellow", NamedColor::Yellow),
            ("black", NamedColor::Black),
            ("green", NamedColor::Green),
            ("white", NamedColor::White),
            ("gold", NamedColor::Gold),
            ("gray", NamedColor::Gray),
            ("grey", NamedColor::Gray),
            ("blue", NamedColor::Blue),
            ("aqua", NamedColor::Aqua),
            ("red", NamedColor::Red),
        ];

        // Longest spellings come first, so the first hit is the longest.
        SPELLINGS.iter().find_map(|(spelling, color)| {
            let head = input.get(..spelling.len())?;
            head.eq_ignore_ascii_case(spelling)
                .then_some((*color, spelling.len()))
        })
    }

    /// The legacy code character (`0`-`9`, `a`-`f`).
    pub fn code(self) -> char {
        let index = Self::ALL
            .iter()
            .position(|c| *c == self)
            .unwrap_or_default();
        std::char::from_digit(index as u32, 16).unwrap_or('f')
    }

    /// The canonical lowercase name, also used as the markup tag name.
    pub fn name(self) -> &'static str {
        match self {
            NamedColor::Black => "black",
            NamedColor::DarkBlue => "dark_blue",
            NamedColor::DarkGreen => "dark_green",
            NamedColor::DarkAqua => "dark_aqua",
            NamedColor::DarkRed => "dark_red",
            NamedColor::DarkPurple => "dark_purple",
            NamedColor::Gold => "gold",
            NamedColor::Gray => "gray",
            NamedColor::DarkGray => "dark_gray",
            NamedColor::Blue => "blue",
            NamedColor::Green => "green",
            NamedColor::Aqua => "aqua",
            NamedColor::Red => "red",
            NamedColor::LightPurple => "light_purple",
            NamedColor::Yellow => "yellow",
            NamedColor::White => "white",
        }
    }

    /// The RGB value clients display for this color.
    pub fn rgb(self) -> Rgb {
        match self {
            NamedColor::Black => Rgb(0x00, 0x00, 0x00),
            NamedColor::DarkBlue => Rgb(0x00, 0x00, 0xAA),
            NamedColor::DarkGreen => Rgb(0x00, 0xAA, 0x00),
            NamedColor::DarkAqua => Rgb(0x00, 0xAA, 0xAA),
            NamedColor::DarkRed => Rgb(0xAA, 0x00, 0x00),
            NamedColor::DarkPurple => Rgb(0xAA, 0x00, 0xAA),
            NamedColor::Gold => Rgb(0xFF, 0xAA, 0x00),
            NamedColor::Gray => Rgb(0xAA, 0xAA, 0xAA),
            NamedColor::DarkGray => Rgb(0x55, 0x55, 0x55),
            NamedColor::Blue => Rgb(0x55, 0x55, 0xFF),
            NamedColor::Green => Rgb(0x55, 0xFF, 0x55),
            NamedColor::Aqua => Rgb(0x55, 0xFF, 0xFF),
            NamedColor::Red => Rgb(0xFF, 0x55, 0x55),
            NamedColor::LightPurple => Rgb(0xFF, 0x55, 0xFF),
            NamedColor::Yellow => Rgb(0xFF, 0xFF, 0x55),
            NamedColor::White => Rgb(0xFF, 0xFF, 0xFF),
        }
    }
}

/// A text color: either one of the legacy named colors or an explicit RGB value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextColor {
    Named(NamedColor),
    Hex(Rgb),
}

impl TextColor {
    /// Parses a color from a string.
    ///
    /// Supports:
    /// - Hex codes: `#1a2b3c` (6 digits only)
    /// - Named colors: `red`, `dark_blue`, `darkblue`
    /// - Single legacy code characters: `c`, `9`
    pub fn parse(s: &str) -> Result<Self, ColorError> {
        let s = s.trim();

        if let Some(hex) = s.strip_prefix('#') {
            return Rgb::parse_hex(hex).map(TextColor::Hex);
        }

        let mut chars = s.chars();
        if let (Some(code), None) = (chars.next(), chars.next()) {
            if let Some(named) = NamedColor::from_code(code) {
                return Ok(TextColor::Named(named));
            }
        }

        NamedColor::from_name(s)
            .map(TextColor::Named)
            .ok_or_else(|| ColorError::UnknownName(s.to_string()))
    }

    /// Resolves to an RGB triplet.
    pub fn rgb(self) -> Rgb {
        match self {
            TextColor::Named(named) => named.rgb(),
            TextColor::Hex(rgb) => rgb,
        }
    }
}

impl From<NamedColor> for TextColor {
    fn from(named: NamedColor) -> Self {
        TextColor::Named(named)
    }
}

impl From<Rgb> for TextColor {
    fn from(rgb: Rgb) -> Self {
        TextColor::Hex(rgb)
    }
}

/// Text formatting toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Obfuscated,
    Bold,
    Strikethrough,
    Underline,
    Italic,
}

impl Format {
    pub const ALL: [Format; 5] = [
        Format::Obfuscated,
        Format::Bold,
        Format::Strikethrough,
        Format::Underline,
        Format::Italic,
    ];

    /// Looks up a format by its legacy code (`k`, `l`, `m`, `n`, `o`).
    pub fn from_code(code: char) -> Option<Self> {
        match code.to_ascii_lowercase() {
            'k' => Some(Format::Obfuscated),
            'l' => Some(Format::Bold),
            'm' => Some(Format::Strikethrough),
            'n' => Some(Format::Underline),
            'o' => Some(Format::Italic),
            _ => None,
        }
    }

    /// Looks up a format by its markup tag name.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.tag() == tag)
    }

    pub fn code(self) -> char {
        match self {
            Format::Obfuscated => 'k',
            Format::Bold => 'l',
            Format::Strikethrough => 'm',
            Format::Underline => 'n',
            Format::Italic => 'o',
        }
    }

    /// The markup tag name.
    pub fn tag(self) -> &'static str {
        match self {
            Format::Obfuscated => "obfuscated",
            Format::Bold => "bold",
            Format::Strikethrough => "strikethrough",
            Format::Underline => "underline",
            Format::Italic => "italic",
        }
    }
}

/// A multi-stop color gradient.
///
/// Always holds at least two stops; construction with fewer fails.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Gradient {
    stops: Vec<TextColor>,
}

impl Gradient {
    /// Builds a gradient from its stops. Fewer than two stops is an error.
    pub fn new(stops: Vec<TextColor>) -> Result<Self, ColorError> {
        if stops.len() < 2 {
            return Err(ColorError::TooFewStops(stops.len()));
        }
        Ok(Self { stops })
    }

    pub fn stops(&self) -> &[TextColor] {
        &self.stops
    }

    /// Returns the color at position `t` in `0.0..=1.0`.
    pub fn at(&self, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let segments = self.stops.len() - 1;
        let scaled = t * segments as f64;
        let index = (scaled.floor() as usize).min(segments - 1);
        let local = scaled - index as f64;
        Rgb::lerp(self.stops[index].rgb(), self.stops[index + 1].rgb(), local)
    }

    /// Samples `count` evenly spaced colors, first stop to last stop.
    ///
    /// Character `i` of `count` sits at `i / (count - 1)`; a single
    /// character takes the first stop.
    pub fn sample(&self, count: usize) -> Vec<Rgb> {
        match count {
            0 => Vec::new(),
            1 => vec![self.stops[0].rgb()],
            n => (0..n)
                .map(|i| self.at(i as f64 / (n - 1) as f64))
                .collect(),
        }
    }
}
