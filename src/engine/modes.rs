//! Level and mode state types for the review engine.
//!
//! [`NavLevel`] names where the cursor sits in the
//! Screens → Items → Sections → SectionItems tree (plus the one nested drill
//! behind a secondary id). [`Mode`] names which interaction overlay is
//! active: plain browsing, grid selection, the sort menu, or type-ahead
//! search. The two are orthogonal — an overlay suspends browsing without
//! discarding the cursor underneath it.

use crate::grid::GridNav;

/// Depth of the cursor in the navigation tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavLevel {
    /// Top level: cursor over the list of screens.
    Screens,
    /// Cursor over the current screen's items.
    Items,
    /// Cursor over the current item's sections.
    Sections,
    /// Cursor over the current section's entries.
    SectionItems,
    /// Cursor over the nested sections behind a secondary id.
    SubSections,
    /// Cursor over a nested section's entries. Deepest level.
    SubSectionItems,
}

/// Grid overlay state: the cell cursor plus the item it was opened from,
/// so the snapshot can be re-fetched after a dispatched adjustment.
#[derive(Debug)]
pub struct GridState {
    pub nav: GridNav,
    pub item_index: usize,
}

/// Sort menu overlay: the option list and the highlighted entry.
#[derive(Debug)]
pub struct SortMenuState {
    pub options: Vec<String>,
    pub index: usize,
}

/// Type-ahead search overlay.
///
/// The query only moves the cursor, never the item universe, so indices
/// stay stable for a listener who has already heard the list.
#[derive(Debug, Default)]
pub struct SearchState {
    pub query: String,
    /// Item index to restore when the search is cancelled.
    pub restore_index: usize,
}

/// Which interaction overlay currently interprets commands.
#[derive(Debug)]
pub enum Mode {
    /// Plain tree browsing.
    Browse,
    /// Grid selection over a priority matrix.
    Grid(GridState),
    /// Choosing a sort order for the current screen.
    SortMenu(SortMenuState),
    /// Typing an incremental item search.
    Search(SearchState),
}
