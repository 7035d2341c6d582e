//! # Base Profile Cache
//!
//! Keeps one prism template per clamped side count. Lookups hand out independent
//! copies so callers can transform the geometry freely without corrupting the
//! cached template.

use std::collections::HashMap;

use log::trace;

use super::primitives::generate_prism;
use super::BaseProfile;
use crate::params::clamp_sides;

/// Lazily populated side-count keyed template table.
///
/// Side counts are bounded to `[3, 128]`, so the table never holds more than 126
/// entries and needs no eviction.
#[derive(Debug, Default)]
pub struct BaseProfileCache {
    templates: HashMap<u32, BaseProfile>,
    hits: u64,
    misses: u64,
}

impl BaseProfileCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the profile for `sides`, clamped to `[3, 128]` and rounded.
    pub fn profile(&mut self, sides: f32) -> BaseProfile {
        self.template(clamp_sides(sides)).clone()
    }

    /// Borrow the cached template, generating it on first use.
    pub(crate) fn template(&mut self, sides: u32) -> &BaseProfile {
        if self.templates.contains_key(&sides) {
            self.hits += 1;
            trace!("profile cache hit for {} sides", sides);
        } else {
            self.misses += 1;
            trace!("profile cache miss for {} sides", sides);
        }
        self.templates
            .entry(sides)
            .or_insert_with(|| generate_prism(sides))
    }

    /// Number of cached side counts.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// (hits, misses) since creation or the last [`clear`](Self::clear).
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }

    pub fn clear(&mut self) {
        self.templates.clear();
        self.hits = 0;
        self.misses = 0;
    }
}
