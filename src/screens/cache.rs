//! Single-slot section cache.
//!
//! Building sections can mean walking live host objects, so the engine keeps
//! exactly one fetched result around: the sections of the item the cursor is
//! currently on. The slot is invalidated on item change, on refresh, and
//! after any dispatched action that may have mutated host state.

use crate::domain::Result;
use crate::screens::Section;

/// Caches the sections of a single item index.
#[derive(Debug, Default)]
pub struct SectionCache {
    slot: Option<(usize, Vec<Section>)>,
}

impl SectionCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the sections for `index`, fetching only on a miss.
    ///
    /// A hit requires the slot to hold the same index; any other index
    /// replaces the slot. A failed fetch leaves the slot empty so the next
    /// call retries.
    ///
    /// # Errors
    ///
    /// Propagates the fetch error on a miss.
    pub fn get_or_fetch<F>(&mut self, index: usize, fetch: F) -> Result<&[Section]>
    where
        F: FnOnce() -> Result<Vec<Section>>,
    {
        let hit = matches!(&self.slot, Some((cached, _)) if *cached == index);
        if !hit {
            self.slot = None;
            self.slot = Some((index, fetch()?));
        }
        match &self.slot {
            Some((_, sections)) => Ok(sections),
            None => Ok(&[]),
        }
    }

    /// Returns the cached sections for `index` without fetching.
    #[must_use]
    pub fn peek(&self, index: usize) -> Option<&[Section]> {
        match &self.slot {
            Some((cached, sections)) if *cached == index => Some(sections),
            _ => None,
        }
    }

    /// Drops the slot unconditionally.
    pub fn invalidate(&mut self) {
        self.slot = None;
    }
}
