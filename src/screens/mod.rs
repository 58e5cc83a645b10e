//! The screen contract and its supporting model.
//!
//! A [`Screen`] is one top-level navigable category (Nations, Fleets,
//! Councilors, …): an ordered sequence of opaque items derived from host
//! data, with per-item summaries, details, and lazily built detail
//! [`Section`]s. The engine walks screens through this trait alone.
//!
//! # Design
//!
//! - The set of screens is fixed when the engine is constructed; behavioral
//!   differences are declared through [`Capabilities`] rather than runtime
//!   type discovery.
//! - Every host-reading operation takes an explicit read-only context handle
//!   `H` supplied by the integration layer, so the contract is testable
//!   without a live host.
//! - Items have no identity beyond their position in the current list. After
//!   [`Screen::refresh`] the same index may denote a different underlying
//!   object, which is why the engine invalidates cached section data on
//!   every refresh.
//!
//! # Modules
//!
//! - [`section`]: the [`Section`]/[`SectionItem`] model
//! - [`cache`]: the single-slot section cache
//! - [`static_screen`]: a data-driven [`Screen`] implementation

pub mod cache;
pub mod section;
pub mod static_screen;

pub use cache::SectionCache;
pub use section::{Section, SectionItem};
pub use static_screen::{StaticItem, StaticScreen};

use crate::domain::{CommandToken, Result};
use crate::grid::GridModel;

/// Optional behaviors a screen declares up front.
///
/// The engine consults these flags instead of probing the implementation, so
/// a capability a screen does not declare is never invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    /// Supports switching between the "mine" and "all" item universes.
    pub view_toggle: bool,
    /// Supports jumping to the next item by first letter.
    pub letter_jump: bool,
    /// Supports cycling through a discrete faction filter list.
    pub faction_filter: bool,
    /// Exposes a sort menu with enumerable sort orders.
    pub sort_menu: bool,
}

/// One navigable category of host data.
///
/// Implementations read from the host only through the explicit context
/// handle and must never mutate host state from the read paths. Side effects
/// travel exclusively through returned [`CommandToken`]s.
///
/// Read operations are expected to tolerate an out-of-range index by
/// returning an "invalid" message rather than failing: index staleness
/// between a shrink and the next refresh is a normal condition, not an
/// error.
pub trait Screen<H> {
    /// Screen identity, spoken when the cursor lands on it.
    fn name(&self) -> &str;

    /// One-line description of what the screen contains.
    fn description(&self) -> &str {
        ""
    }

    /// The capability set. Defaults to none.
    fn capabilities(&self) -> Capabilities {
        Capabilities::default()
    }

    /// Re-derives the item list from host state.
    ///
    /// Must be idempotent and cheap to call repeatedly; the engine calls it
    /// on screen activation and after any dispatched action that may have
    /// mutated host state.
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::NavError::HostRead`] when host data cannot be
    /// enumerated; the engine converts that into a spoken error and leaves
    /// navigation state untouched.
    fn refresh(&mut self, ctx: &H) -> Result<()>;

    /// Number of items in the current list.
    fn item_count(&self) -> usize;

    /// Summary line for one item.
    fn item_summary(&self, ctx: &H, index: usize) -> Result<String>;

    /// Longer detail text for one item. Defaults to the summary.
    fn item_detail(&self, ctx: &H, index: usize) -> Result<String> {
        self.item_summary(ctx, index)
    }

    /// The name used for letter jumps and type-ahead search.
    ///
    /// Defaults to the summary; screens whose summaries lead with status
    /// decorations override this with the bare sortable name.
    fn sortable_name(&self, ctx: &H, index: usize) -> Result<String> {
        self.item_summary(ctx, index)
    }

    /// Builds the ordered detail sections for one item.
    ///
    /// Called lazily when the user drills in, and cached by the engine per
    /// item index until invalidated. An empty list means the item has no
    /// drill-down content.
    fn sections_for_item(&self, ctx: &H, index: usize) -> Result<Vec<Section>>;

    /// Whether drilling into the item should enter section browsing.
    ///
    /// Defaults to "has at least one section". The engine passes in the
    /// already-fetched sections so overrides never trigger a second host
    /// read.
    fn can_drill_into_item(&self, _ctx: &H, _index: usize, sections: &[Section]) -> bool {
        !sections.is_empty()
    }

    /// Activation command for an item with no sections, if any.
    fn item_command(&self, _ctx: &H, _index: usize) -> Option<CommandToken> {
        None
    }

    /// Grid snapshot for a composite grid item, if this item is one.
    ///
    /// A `Some` return makes the engine hand control to grid mode instead of
    /// section browsing.
    ///
    /// # Errors
    ///
    /// Host-read failures while building the snapshot.
    fn grid_for_item(&self, _ctx: &H, _index: usize) -> Result<Option<GridModel>> {
        Ok(None)
    }

    /// Resolves the nested sections behind a [`SectionItem`] secondary id.
    ///
    /// # Errors
    ///
    /// Host-read failures while resolving the referenced object.
    fn sections_for_secondary(&self, _ctx: &H, _id: &str) -> Result<Vec<Section>> {
        Ok(Vec::new())
    }

    /// Switches between the "mine" and "all" item universes.
    ///
    /// Returns a short status string to speak ("Showing all fleets"), or
    /// `None` when the screen does not support the toggle. Implementations
    /// rebuild their item list as part of the switch.
    ///
    /// # Errors
    ///
    /// Host-read failures while rebuilding the item list.
    fn toggle_view(&mut self, _ctx: &H) -> Result<Option<String>> {
        Ok(None)
    }

    /// Advances the faction filter to the next entry, wrapping.
    ///
    /// Returns a short status string to speak ("Filter: Academy"), or `None`
    /// when unsupported.
    ///
    /// # Errors
    ///
    /// Host-read failures while rebuilding the item list.
    fn cycle_faction_filter(&mut self, _ctx: &H) -> Result<Option<String>> {
        Ok(None)
    }

    /// The enumerable sort orders for the sort menu. Empty when unsupported.
    fn sort_options(&self) -> Vec<String> {
        Vec::new()
    }

    /// Applies one of [`sort_options`](Self::sort_options) by index.
    ///
    /// Returns a short status string to speak ("Sorted by power"), or `None`
    /// when the choice is out of range.
    ///
    /// # Errors
    ///
    /// Host-read failures while re-sorting the item list.
    fn apply_sort(&mut self, _ctx: &H, _choice: usize) -> Result<Option<String>> {
        Ok(None)
    }

    /// Text spoken when the screen is entered.
    ///
    /// By convention this triggers a [`refresh`](Self::refresh) as a side
    /// effect, so the announced item count reflects current host state. A
    /// failed refresh degrades to a spoken error.
    fn activation_announcement(&mut self, ctx: &H) -> String {
        if let Err(error) = self.refresh(ctx) {
            tracing::warn!(screen = self.name(), %error, "refresh failed on activation");
            return format!("Error reading {}", self.name());
        }
        match self.item_count() {
            0 => format!("{}. no items", self.name()),
            1 => format!("{}. 1 item", self.name()),
            n => format!("{}. {n} items", self.name()),
        }
    }

    /// Finds the next item whose sortable name starts with `letter`.
    ///
    /// Linear scan from `current_index + 1` forward with wraparound; after
    /// the wrap, indices `0..=current_index` are re-checked so a sole match
    /// at the cursor itself is still found. Case-insensitive. Returns
    /// `Ok(None)` when no item matches anywhere.
    ///
    /// # Errors
    ///
    /// Host-read failures while reading sortable names.
    fn find_next_item_by_letter(
        &self,
        ctx: &H,
        letter: char,
        current_index: usize,
    ) -> Result<Option<usize>> {
        let count = self.item_count();
        if count == 0 {
            return Ok(None);
        }
        let target = letter.to_ascii_lowercase();
        let start = (current_index + 1).min(count);
        for index in (start..count).chain(0..start.min(count)) {
            let name = self.sortable_name(ctx, index)?;
            if name
                .chars()
                .next()
                .is_some_and(|c| c.to_ascii_lowercase() == target)
            {
                return Ok(Some(index));
            }
        }
        Ok(None)
    }
}
