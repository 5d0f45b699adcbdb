//! Formatter configuration.
//!
//! Configuration is plain YAML. Every field is optional:
//!
//! ```yaml
//! flags:
//!   colors: true
//!   bracket_markup: false
//!   placeholders: true
//!   animations: true
//! lexer:
//!   end_tags: true
//!   format_toggles: true
//!   gradients: true
//! default_locale: en_us
//! animations:
//!   loading:
//!     interval: 20
//!     frames:
//!       en_us: ["Loading.", "Loading..", "Loading..."]
//!       de_de: ["Laden.", "Laden..", "Laden..."]
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::animation::{AnimationFrameSet, AnimationRegistry};
use crate::error::ConfigError;
use crate::lexer::LexOptions;

/// Locale used when a viewer's locale has no frames of its own.
pub const DEFAULT_LOCALE: &str = "en_us";

/// Ticks between frames when an animation does not say. Twenty game ticks
/// is one second.
pub const DEFAULT_INTERVAL: u32 = 20;

/// Which pipeline stages run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatFlags {
    /// Interpret color and format codes. When off, they are stripped.
    pub colors: bool,
    /// Let authors write bracket tags such as `<bold>` directly.
    pub bracket_markup: bool,
    /// Resolve `%name%` placeholders through the provider.
    pub placeholders: bool,
    /// Resolve `{animation_<name>}` tokens.
    pub animations: bool,
}

impl Default for FormatFlags {
    fn default() -> Self {
        Self {
            colors: true,
            bracket_markup: true,
            placeholders: true,
            animations: true,
        }
    }
}

impl FormatFlags {
    /// Everything off: text comes out stripped and unsubstituted.
    pub fn plain() -> Self {
        Self {
            colors: false,
            bracket_markup: false,
            placeholders: false,
            animations: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LexerConfig {
    pub end_tags: bool,
    pub format_toggles: bool,
    pub gradients: bool,
}

impl Default for LexerConfig {
    fn default() -> Self {
        Self {
            end_tags: true,
            format_toggles: true,
            gradients: true,
        }
    }
}

/// One animation as written in configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationConfig {
    #[serde(default = "default_interval")]
    pub interval: u32,
    /// Frames keyed by locale.
    #[serde(default)]
    pub frames: BTreeMap<String, Vec<String>>,
}

fn default_interval() -> u32 {
    DEFAULT_INTERVAL
}

impl AnimationConfig {
    pub fn to_frame_set(&self, name: &str) -> AnimationFrameSet {
        self.frames
            .iter()
            .fold(AnimationFrameSet::new(name, self.interval), |set, (locale, frames)| {
                set.with_frames(locale.clone(), frames.clone())
            })
    }
}

/// Complete formatter configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatterConfig {
    pub flags: FormatFlags,
    pub lexer: LexerConfig,
    pub default_locale: String,
    pub animations: BTreeMap<String, AnimationConfig>,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            flags: FormatFlags::default(),
            lexer: LexerConfig::default(),
            default_locale: DEFAULT_LOCALE.to_string(),
            animations: BTreeMap::new(),
        }
    }
}

impl FormatterConfig {
    /// Parses and validates YAML configuration.
    ///
    /// # Example
    ///
    /// ```rust
    /// use chatcolor::FormatterConfig;
    ///
    /// let config = FormatterConfig::from_yaml(r#"
    /// flags:
    ///   placeholders: false
    /// animations:
    ///   dots:
    ///     interval: 10
    ///     frames:
    ///       en_us: [".", "..", "..."]
    /// "#).unwrap();
    /// assert!(config.flags.colors);
    /// assert!(!config.flags.placeholders);
    /// assert_eq!(config.animations["dots"].interval, 10);
    /// ```
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: FormatterConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    /// Checks every animation definition.
    ///
    /// Each animation needs a non-zero interval, no empty frame lists, and
    /// frames for the default locale.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, animation) in &self.animations {
            if animation.interval == 0 {
                return Err(ConfigError::ZeroInterval { name: name.clone() });
            }
            if let Some((locale, _)) = animation.frames.iter().find(|(_, f)| f.is_empty()) {
                return Err(ConfigError::EmptyFrames {
                    name: name.clone(),
                    locale: locale.clone(),
                });
            }
            if !animation.frames.contains_key(&self.default_locale) {
                return Err(ConfigError::MissingDefaultLocale {
                    name: name.clone(),
                    locale: self.default_locale.clone(),
                });
            }
        }
        Ok(())
    }

    /// Registers every configured animation, returning how many were loaded.
    pub fn load_animations(&self, registry: &AnimationRegistry) -> usize {
        for (name, animation) in &self.animations {
            registry.register(animation.to_frame_set(name));
        }
        self.animations.len()
    }

    /// A registry using this configuration's default locale, with every
    /// configured animation loaded.
    pub fn animation_registry(&self) -> AnimationRegistry {
        let registry = AnimationRegistry::new(self.default_locale.clone());
        self.load_animations(&registry);
        registry
    }

    pub fn lex_options(&self) -> LexOptions {
        LexOptions {
            end_tags: self.lexer.end_tags,
            format_toggles: self.lexer.format_toggles,
            gradients: self.lexer.gradients,
            bracket_markup: self.flags.bracket_markup,
        }
    }
}
