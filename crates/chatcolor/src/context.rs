//! Shared state injected into a [`Formatter`](crate::Formatter).
//!
//! A [`FormatContext`] bundles the state that outlives any single formatting
//! call: the animation registry the tick driver advances, and the
//! placeholder provider. Formatters hold it behind an `Arc`, so several
//! formatters (for example one per chat surface, each with its own flags)
//! can share one registry.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use chatcolor::{AnimationRegistry, FormatContext};
//!
//! let context = Arc::new(FormatContext::new(AnimationRegistry::new("en_us")));
//! assert!(!context.placeholders_available());
//!
//! // The host's scheduler drives animations from its own thread.
//! context.animations().tick();
//! ```

use std::fmt;

use once_cell::sync::OnceCell;

use crate::animation::AnimationRegistry;
use crate::placeholder::{NoopProvider, PlaceholderProvider};

pub struct FormatContext {
    animations: AnimationRegistry,
    provider: Box<dyn PlaceholderProvider>,
    provider_available: OnceCell<bool>,
}

impl FormatContext {
    /// A context with no placeholder provider.
    pub fn new(animations: AnimationRegistry) -> Self {
        Self {
            animations,
            provider: Box::new(NoopProvider),
            provider_available: OnceCell::new(),
        }
    }

    pub fn with_provider<P: PlaceholderProvider + 'static>(mut self, provider: P) -> Self {
        self.provider = Box::new(provider);
        self.provider_available = OnceCell::new();
        self
    }

    pub fn animations(&self) -> &AnimationRegistry {
        &self.animations
    }

    pub fn provider(&self) -> &dyn PlaceholderProvider {
        self.provider.as_ref()
    }

    /// Whether the provider is usable.
    ///
    /// Asked once; the answer is kept for the life of the context.
    pub fn placeholders_available(&self) -> bool {
        *self.provider_available.get_or_init(|| {
            let available = self.provider.is_available();
            tracing::debug!(available, "placeholder provider availability checked");
            available
        })
    }
}

impl Default for FormatContext {
    fn default() -> Self {
        Self::new(AnimationRegistry::default())
    }
}

impl fmt::Debug for FormatContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormatContext")
            .field("animations", &self.animations)
            .field("provider_available", &self.provider_available.get())
            .finish_non_exhaustive()
    }
}
