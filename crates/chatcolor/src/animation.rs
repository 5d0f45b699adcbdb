//! Tick-driven text animations.
//!
//! An animation is a named cycle of frames. Text refers to one with an
//! `{animation_<name>}` token, which [`resolve_animations`] replaces with
//! the frame currently showing. Frames are authored per locale; a viewer
//! whose locale has no frames sees the default locale's.
//!
//! Frames advance on an external clock. The host calls
//! [`AnimationRegistry::tick`] once per game tick; each set counts ticks
//! and steps to its next frame every `interval` ticks, wrapping around.
//!
//! ```rust
//! use chatcolor::animation::{AnimationFrameSet, AnimationRegistry};
//!
//! let registry = AnimationRegistry::new("en_us");
//! registry.register(
//!     AnimationFrameSet::new("dots", 2)
//!         .with_frames("en_us", vec![".".into(), "..".into()]),
//! );
//!
//! assert_eq!(registry.resolve("wait{animation_dots}", None), "wait.");
//! registry.tick();
//! registry.tick();
//! assert_eq!(registry.resolve("wait{animation_dots}", None), "wait..");
//! ```

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::placeholder::Subject;

static ANIMATION_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{animation_([A-Za-z0-9_-]+)\}").expect("animation token pattern is valid")
});

/// Substituted inside frames with the viewer's display name.
pub const PLAYER_TOKEN: &str = "{player}";

/// One named animation and its playback state.
#[derive(Debug)]
pub struct AnimationFrameSet {
    name: String,
    interval: u32,
    frames: HashMap<String, Vec<String>>,
    ticks: AtomicU32,
    index: AtomicUsize,
}

impl AnimationFrameSet {
    /// Creates an empty set that advances every `interval` ticks.
    ///
    /// An interval of zero is treated as one.
    pub fn new(name: impl Into<String>, interval: u32) -> Self {
        Self {
            name: name.into(),
            interval: interval.max(1),
            frames: HashMap::new(),
            ticks: AtomicU32::new(0),
            index: AtomicUsize::new(0),
        }
    }

    /// Adds the frames for one locale.
    pub fn with_frames(mut self, locale: impl Into<String>, frames: Vec<String>) -> Self {
        self.frames.insert(locale.into(), frames);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn interval(&self) -> u32 {
        self.interval
    }

    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.frames.keys().map(String::as_str)
    }

    /// The raw frame index. Use [`frame`](Self::frame) to read a frame.
    pub fn index(&self) -> usize {
        self.index.load(Ordering::Acquire)
    }

    /// Counts one tick, stepping to the next frame when the interval is
    /// reached.
    ///
    /// Both counters are updated atomically, so concurrent callers never
    /// lose a tick.
    pub fn tick(&self) {
        let interval = self.interval;
        let (Ok(ticks) | Err(ticks)) =
            self.ticks
                .fetch_update(Ordering::AcqRel, Ordering::Acquire, |t| match t.saturating_add(1) {
                    next if next >= interval => Some(0),
                    next => Some(next),
                });
        if ticks.saturating_add(1) < interval {
            return;
        }

        let len = self.cycle_len();
        let (Ok(index) | Err(index)) = self
            .index
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |i| Some((i + 1) % len));
        tracing::trace!(animation = %self.name, frame = (index + 1) % len, "animation advanced");
    }

    /// The current frame for `locale`, falling back to `default_locale`.
    ///
    /// The index is reduced modulo the chosen list's length, so locales
    /// with different frame counts are always read in bounds.
    pub fn frame(&self, locale: Option<&str>, default_locale: &str) -> Option<&str> {
        let frames = locale
            .and_then(|l| self.frames.get(l))
            .filter(|f| !f.is_empty())
            .or_else(|| self.frames.get(default_locale))
            .filter(|f| !f.is_empty())?;
        frames.get(self.index() % frames.len()).map(String::as_str)
    }

    /// Length of the longest frame list; the index cycles through this.
    fn cycle_len(&self) -> usize {
        self.frames.values().map(Vec::len).max().unwrap_or(0).max(1)
    }
}

/// Process-wide animation registry.
///
/// Lookups take a read lock; only loading and unloading take the write lock.
/// Playback state lives in atomics on each set, so [`tick`](Self::tick) only
/// needs a read lock too.
#[derive(Debug)]
pub struct AnimationRegistry {
    default_locale: String,
    sets: RwLock<HashMap<String, Arc<AnimationFrameSet>>>,
}

impl Default for AnimationRegistry {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_LOCALE)
    }
}

impl AnimationRegistry {
    pub fn new(default_locale: impl Into<String>) -> Self {
        Self {
            default_locale: default_locale.into(),
            sets: RwLock::new(HashMap::new()),
        }
    }

    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    /// Adds or replaces an animation.
    pub fn register(&self, set: AnimationFrameSet) {
        tracing::debug!(animation = %set.name, interval = set.interval, "registering animation");
        let mut sets = self.sets.write().unwrap_or_else(|e| e.into_inner());
        sets.insert(set.name.clone(), Arc::new(set));
    }

    pub fn unregister(&self, name: &str) -> bool {
        let mut sets = self.sets.write().unwrap_or_else(|e| e.into_inner());
        sets.remove(name).is_some()
    }

    pub fn clear(&self) {
        self.sets
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }

    pub fn get(&self, name: &str) -> Option<Arc<AnimationFrameSet>> {
        let sets = self.sets.read().unwrap_or_else(|e| e.into_inner());
        sets.get(name).cloned()
    }

    /// Registered animation names, sorted.
    pub fn names(&self) -> Vec<String> {
        let sets = self.sets.read().unwrap_or_else(|e| e.into_inner());
        let mut names: Vec<String> = sets.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.sets.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Advances every registered animation by one tick.
    pub fn tick(&self) {
        let sets = self.sets.read().unwrap_or_else(|e| e.into_inner());
        for set in sets.values() {
            set.tick();
        }
    }

    /// The frame `name` is currently showing for `locale`.
    pub fn current_frame(&self, name: &str, locale: Option<&str>) -> Option<String> {
        let set = self.get(name)?;
        set.frame(locale, &self.default_locale).map(str::to_string)
    }

    /// Replaces every `{animation_<name>}` token in `text`.
    ///
    /// See [`resolve_animations`].
    pub fn resolve(&self, text: &str, subject: Option<&Subject>) -> String {
        resolve_animations(self, text, subject)
    }
}

/// Whether `text` refers to any animation.
pub fn has_animations(text: &str) -> bool {
    ANIMATION_TOKEN.is_match(text)
}

/// Replaces every `{animation_<name>}` token in `text` with the current
/// frame for the subject's locale.
///
/// `{player}` inside a frame becomes the subject's display name; without a
/// subject it is left as is. Unknown names become
/// `[unknown animation: <name>]`.
pub fn resolve_animations(
    registry: &AnimationRegistry,
    text: &str,
    subject: Option<&Subject>,
) -> String {
    if !has_animations(text) {
        return text.to_string();
    }
    let locale = subject.and_then(|s| s.locale.as_deref());

    ANIMATION_TOKEN
        .replace_all(text, |caps: &Captures| {
            let name = &caps[1];
            match registry.current_frame(name, locale) {
                Some(frame) => match subject {
                    Some(subject) => frame.replace(PLAYER_TOKEN, &subject.display_name),
                    None => frame,
                },
                None => format!("[unknown animation: {name}]"),
            }
        })
        .into_owned()
}
