//! The navigation cursor and its state machine.
//!
//! [`NavigationState`] is the single mutable cursor over the
//! Screens → Items → Sections → SectionItems tree: current indices at every
//! level, the one-slot section cache, and the drill/back transitions between
//! levels. It owns no screen data — every operation takes the screen list
//! and the host context explicitly, which keeps the machine testable without
//! a live host.
//!
//! # Invariants
//!
//! - Indices are valid for the current list lengths, or are clamped back
//!   into range by the next operation that touches them; shrinking lists
//!   never cause a failure.
//! - A failed host read leaves the cursor exactly where it was.
//! - Cached section data never outlives the item index it was fetched for,
//!   a refresh, or a dispatched action.

use crate::domain::{CommandToken, Result};
use crate::engine::modes::NavLevel;
use crate::screens::{Screen, Section, SectionCache, SectionItem};

/// Result of a drill-down attempt.
///
/// Tells the caller whether to re-announce the new position (`Drilled`),
/// hand the token to the dispatcher and stay silent (`Activated` — the
/// dispatched action owns its own speech), switch to grid mode
/// (`EnteredGrid`), or do nothing at all.
#[derive(Debug)]
pub enum DrillOutcome {
    /// The cursor moved one level deeper.
    Drilled,
    /// The target exposed an activation command; no level change.
    Activated(CommandToken),
    /// The target is a composite grid; control passes to grid mode.
    EnteredGrid(crate::grid::GridModel),
    /// The target offers nothing to drill into or activate.
    Nothing,
}

/// Nested drill behind a [`SectionItem`] secondary id.
#[derive(Debug)]
struct SubDrill {
    /// The secondary id this drill was resolved from, kept for resync.
    origin: String,
    sections: Vec<Section>,
    section_index: usize,
    entry_index: usize,
}

/// The single mutable cursor over the navigation tree.
#[derive(Debug)]
pub struct NavigationState {
    screen_index: usize,
    item_index: usize,
    section_index: usize,
    entry_index: usize,
    sub: Option<SubDrill>,
    level: NavLevel,
    cache: SectionCache,
}

impl Default for NavigationState {
    fn default() -> Self {
        Self::new()
    }
}

impl NavigationState {
    /// Starts at the screens level with all indices at zero.
    #[must_use]
    pub fn new() -> Self {
        Self {
            screen_index: 0,
            item_index: 0,
            section_index: 0,
            entry_index: 0,
            sub: None,
            level: NavLevel::Screens,
            cache: SectionCache::new(),
        }
    }

    #[must_use]
    pub fn level(&self) -> NavLevel {
        self.level
    }

    #[must_use]
    pub fn screen_index(&self) -> usize {
        self.screen_index
    }

    #[must_use]
    pub fn item_index(&self) -> usize {
        self.item_index
    }

    /// Number of entries at the cursor's current level.
    #[must_use]
    pub fn count_at_level<H>(&self, screens: &[Box<dyn Screen<H>>]) -> usize {
        match self.level {
            NavLevel::Screens => screens.len(),
            NavLevel::Items => screens
                .get(self.screen_index)
                .map_or(0, |screen| screen.item_count()),
            NavLevel::Sections => self.sections().map_or(0, <[Section]>::len),
            NavLevel::SectionItems => self.current_section().map_or(0, Section::len),
            NavLevel::SubSections => self.sub.as_ref().map_or(0, |sub| sub.sections.len()),
            NavLevel::SubSectionItems => self.current_sub_section().map_or(0, Section::len),
        }
    }

    /// Moves the cursor forward by one with wraparound. No-op on an empty
    /// list; returns whether the cursor moved.
    pub fn next<H>(&mut self, screens: &[Box<dyn Screen<H>>]) -> bool {
        let count = self.count_at_level(screens);
        if count == 0 {
            return false;
        }
        let slot = self.cursor_mut();
        *slot = (*slot + 1) % count;
        true
    }

    /// Moves the cursor backward by one with wraparound. No-op on an empty
    /// list; returns whether the cursor moved.
    pub fn previous<H>(&mut self, screens: &[Box<dyn Screen<H>>]) -> bool {
        let count = self.count_at_level(screens);
        if count == 0 {
            return false;
        }
        let slot = self.cursor_mut();
        *slot = if *slot == 0 { count - 1 } else { *slot - 1 };
        true
    }

    /// Drills one level deeper, activates, or switches to grid mode.
    ///
    /// See [`DrillOutcome`] for the caller contract. The special grid case
    /// is checked before section browsing, so a composite grid item never
    /// enters the normal section path.
    ///
    /// # Errors
    ///
    /// Host-read failures while fetching sections or grid snapshots; the
    /// cursor is left unchanged.
    pub fn drill_down<H>(
        &mut self,
        screens: &mut [Box<dyn Screen<H>>],
        ctx: &H,
    ) -> Result<DrillOutcome> {
        match self.level {
            NavLevel::Screens => {
                if screens.is_empty() {
                    return Ok(DrillOutcome::Nothing);
                }
                self.enter_items();
                Ok(DrillOutcome::Drilled)
            }
            NavLevel::Items => self.drill_from_item(screens, ctx),
            NavLevel::Sections => {
                let Some(sections) = self.sections() else {
                    return Ok(DrillOutcome::Nothing);
                };
                if sections.is_empty() {
                    return Ok(DrillOutcome::Nothing);
                }
                self.section_index = self.section_index.min(sections.len() - 1);
                self.entry_index = 0;
                self.level = NavLevel::SectionItems;
                Ok(DrillOutcome::Drilled)
            }
            NavLevel::SectionItems => self.drill_from_entry(screens, ctx),
            NavLevel::SubSections => {
                let Some(sub) = self.sub.as_mut() else {
                    return Ok(DrillOutcome::Nothing);
                };
                if sub.sections.is_empty() {
                    return Ok(DrillOutcome::Nothing);
                }
                sub.section_index = sub.section_index.min(sub.sections.len() - 1);
                sub.entry_index = 0;
                self.level = NavLevel::SubSectionItems;
                Ok(DrillOutcome::Drilled)
            }
            NavLevel::SubSectionItems => {
                // Deepest level: sub-entries activate but never nest further.
                match self.current_sub_entry().and_then(SectionItem::activation) {
                    Some(token) => Ok(DrillOutcome::Activated(token.clone())),
                    None => Ok(DrillOutcome::Nothing),
                }
            }
        }
    }

    /// Pops one level. Returns `false` when already at the screens level,
    /// signaling the caller that escape behavior is now external; state is
    /// never mutated in that case.
    pub fn back_out(&mut self) -> bool {
        match self.level {
            NavLevel::Screens => false,
            NavLevel::Items => {
                self.level = NavLevel::Screens;
                true
            }
            NavLevel::Sections => {
                self.level = NavLevel::Items;
                true
            }
            NavLevel::SectionItems => {
                self.level = NavLevel::Sections;
                true
            }
            NavLevel::SubSections => {
                self.sub = None;
                self.level = NavLevel::SectionItems;
                true
            }
            NavLevel::SubSectionItems => {
                self.level = NavLevel::SubSections;
                true
            }
        }
    }

    /// Jumps straight to the screens level and moves by one, regardless of
    /// current depth. Returns whether a screen cursor move happened.
    pub fn page<H>(&mut self, screens: &[Box<dyn Screen<H>>], forward: bool) -> bool {
        if screens.is_empty() {
            return false;
        }
        if self.level != NavLevel::Screens {
            self.sub = None;
            self.level = NavLevel::Screens;
        }
        if forward {
            self.next(screens)
        } else {
            self.previous(screens)
        }
    }

    /// Moves the item cursor directly, for letter jumps and search.
    pub fn jump_to_item(&mut self, index: usize) {
        self.item_index = index;
    }

    /// Re-enters the items level of the current screen (used when leaving
    /// grid mode).
    pub fn return_to_items(&mut self) {
        self.sub = None;
        self.level = NavLevel::Items;
    }

    /// Drops cached section data unconditionally.
    pub fn invalidate_cache(&mut self) {
        self.cache.invalidate();
    }

    /// Re-derives host-backed data after a dispatched action.
    ///
    /// Refreshes the current screen, drops the section cache, clamps every
    /// index back into range, and re-resolves whatever level the cursor sits
    /// on. When the content under the cursor is gone entirely the cursor
    /// falls back to the items level.
    ///
    /// # Errors
    ///
    /// Host-read failures from the refresh or the section re-fetch.
    pub fn resync<H>(&mut self, screens: &mut [Box<dyn Screen<H>>], ctx: &H) -> Result<()> {
        self.cache.invalidate();
        if self.level == NavLevel::Screens {
            self.screen_index = clamp_index(self.screen_index, screens.len());
            return Ok(());
        }
        let Some(screen) = screens.get_mut(self.screen_index) else {
            self.level = NavLevel::Screens;
            self.screen_index = 0;
            return Ok(());
        };
        screen.refresh(ctx)?;
        let count = screen.item_count();
        if count == 0 {
            self.return_to_items();
            self.item_index = 0;
            return Ok(());
        }
        self.item_index = clamp_index(self.item_index, count);
        if self.level == NavLevel::Items {
            return Ok(());
        }

        let index = self.item_index;
        let sections = self
            .cache
            .get_or_fetch(index, || screen.sections_for_item(ctx, index))?;
        if sections.is_empty() {
            self.return_to_items();
            return Ok(());
        }
        let section_count = sections.len();
        self.section_index = clamp_index(self.section_index, section_count);
        let entry_count = sections[self.section_index].len();
        self.entry_index = clamp_index(self.entry_index, entry_count.max(1));

        if matches!(self.level, NavLevel::SubSections | NavLevel::SubSectionItems) {
            let origin = self.sub.as_ref().map(|sub| sub.origin.clone());
            match origin {
                Some(origin) => {
                    let resolved = screen.sections_for_secondary(ctx, &origin)?;
                    if resolved.is_empty() {
                        self.sub = None;
                        self.level = NavLevel::SectionItems;
                    } else if let Some(sub) = self.sub.as_mut() {
                        sub.section_index = clamp_index(sub.section_index, resolved.len());
                        let entries = resolved[sub.section_index].len();
                        sub.entry_index = clamp_index(sub.entry_index, entries.max(1));
                        sub.sections = resolved;
                    }
                }
                None => self.level = NavLevel::SectionItems,
            }
        }
        Ok(())
    }

    /// Spoken line for the cursor's current position.
    ///
    /// Tolerates every stale-index and host-failure condition: the worst
    /// case is a short "Error reading X" or "Invalid item" message, never a
    /// failure.
    #[must_use]
    pub fn describe_current<H>(
        &self,
        screens: &[Box<dyn Screen<H>>],
        ctx: &H,
        verbose: bool,
    ) -> String {
        match self.level {
            NavLevel::Screens => match screens.get(self.screen_index) {
                Some(screen) => position_suffix(
                    format!("{} screen", screen.name()),
                    self.screen_index,
                    screens.len(),
                    verbose,
                ),
                None => "No screens".to_string(),
            },
            NavLevel::Items => {
                let Some(screen) = screens.get(self.screen_index) else {
                    return "No screens".to_string();
                };
                let count = screen.item_count();
                if count == 0 {
                    return "No items".to_string();
                }
                if self.item_index >= count {
                    return "Invalid item".to_string();
                }
                match screen.item_summary(ctx, self.item_index) {
                    Ok(summary) => position_suffix(summary, self.item_index, count, verbose),
                    Err(error) => read_error(screen.name(), &error),
                }
            }
            NavLevel::Sections => match self.current_section() {
                Some(section) => position_suffix(
                    section.spoken_line(),
                    self.section_index,
                    self.sections().map_or(0, <[Section]>::len),
                    verbose,
                ),
                None => "No sections".to_string(),
            },
            NavLevel::SectionItems => match self.current_entry() {
                Some(entry) => position_suffix(
                    entry.spoken_line(),
                    self.entry_index,
                    self.current_section().map_or(0, Section::len),
                    verbose,
                ),
                None => "no items".to_string(),
            },
            NavLevel::SubSections => match self.current_sub_section() {
                Some(section) => position_suffix(
                    section.spoken_line(),
                    self.sub.as_ref().map_or(0, |sub| sub.section_index),
                    self.sub.as_ref().map_or(0, |sub| sub.sections.len()),
                    verbose,
                ),
                None => "No sections".to_string(),
            },
            NavLevel::SubSectionItems => match self.current_sub_entry() {
                Some(entry) => position_suffix(
                    entry.spoken_line(),
                    self.sub.as_ref().map_or(0, |sub| sub.entry_index),
                    self.current_sub_section().map_or(0, Section::len),
                    verbose,
                ),
                None => "no items".to_string(),
            },
        }
    }

    /// Spoken detail text for the cursor's current position.
    #[must_use]
    pub fn describe_detail<H>(&self, screens: &[Box<dyn Screen<H>>], ctx: &H) -> String {
        match self.level {
            NavLevel::Screens => match screens.get(self.screen_index) {
                Some(screen) if !screen.description().is_empty() => {
                    screen.description().to_string()
                }
                Some(screen) => format!("{} screen", screen.name()),
                None => "No screens".to_string(),
            },
            NavLevel::Items => {
                let Some(screen) = screens.get(self.screen_index) else {
                    return "No screens".to_string();
                };
                if self.item_index >= screen.item_count() {
                    return "Invalid item".to_string();
                }
                match screen.item_detail(ctx, self.item_index) {
                    Ok(detail) => detail,
                    Err(error) => read_error(screen.name(), &error),
                }
            }
            NavLevel::Sections => self
                .current_section()
                .map_or_else(|| "No sections".to_string(), Section::spoken_line),
            NavLevel::SectionItems => entry_detail(self.current_entry()),
            NavLevel::SubSections => self
                .current_sub_section()
                .map_or_else(|| "No sections".to_string(), Section::spoken_line),
            NavLevel::SubSectionItems => entry_detail(self.current_sub_entry()),
        }
    }

    /// Spoken enumeration of everything at the cursor's current level.
    #[must_use]
    pub fn list_all<H>(&self, screens: &[Box<dyn Screen<H>>], ctx: &H) -> String {
        match self.level {
            NavLevel::Screens => {
                let names: Vec<&str> = screens.iter().map(|screen| screen.name()).collect();
                join_listing("screens", &names)
            }
            NavLevel::Items => {
                let Some(screen) = screens.get(self.screen_index) else {
                    return "No screens".to_string();
                };
                let mut lines = Vec::with_capacity(screen.item_count());
                for index in 0..screen.item_count() {
                    match screen.item_summary(ctx, index) {
                        Ok(summary) => lines.push(summary),
                        Err(error) => return read_error(screen.name(), &error),
                    }
                }
                let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
                join_listing("items", &refs)
            }
            NavLevel::Sections | NavLevel::SubSections => {
                let sections = if self.level == NavLevel::Sections {
                    self.sections().unwrap_or(&[])
                } else {
                    self.sub
                        .as_ref()
                        .map_or(&[][..], |sub| sub.sections.as_slice())
                };
                let names: Vec<&str> = sections.iter().map(Section::name).collect();
                join_listing("sections", &names)
            }
            NavLevel::SectionItems | NavLevel::SubSectionItems => {
                let section = if self.level == NavLevel::SectionItems {
                    self.current_section()
                } else {
                    self.current_sub_section()
                };
                let lines: Vec<String> = section
                    .map(Section::items)
                    .unwrap_or(&[])
                    .iter()
                    .map(SectionItem::spoken_line)
                    .collect();
                let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
                join_listing("items", &refs)
            }
        }
    }

    fn drill_from_item<H>(
        &mut self,
        screens: &mut [Box<dyn Screen<H>>],
        ctx: &H,
    ) -> Result<DrillOutcome> {
        let Some(screen) = screens.get_mut(self.screen_index) else {
            return Ok(DrillOutcome::Nothing);
        };
        let count = screen.item_count();
        if count == 0 {
            return Ok(DrillOutcome::Nothing);
        }
        self.item_index = clamp_index(self.item_index, count);
        let index = self.item_index;

        if let Some(grid) = screen.grid_for_item(ctx, index)? {
            return Ok(DrillOutcome::EnteredGrid(grid));
        }

        let drillable = {
            let sections = self
                .cache
                .get_or_fetch(index, || screen.sections_for_item(ctx, index))?;
            screen.can_drill_into_item(ctx, index, sections)
        };
        if drillable {
            self.section_index = 0;
            self.entry_index = 0;
            self.level = NavLevel::Sections;
            return Ok(DrillOutcome::Drilled);
        }
        match screen.item_command(ctx, index) {
            Some(token) => Ok(DrillOutcome::Activated(token)),
            None => Ok(DrillOutcome::Nothing),
        }
    }

    fn drill_from_entry<H>(
        &mut self,
        screens: &mut [Box<dyn Screen<H>>],
        ctx: &H,
    ) -> Result<DrillOutcome> {
        let Some(entry) = self.current_entry() else {
            return Ok(DrillOutcome::Nothing);
        };
        let secondary = entry.secondary_id().map(str::to_string);
        let command = entry.activation().cloned();

        if let Some(id) = secondary {
            let Some(screen) = screens.get(self.screen_index) else {
                return Ok(DrillOutcome::Nothing);
            };
            let resolved = screen.sections_for_secondary(ctx, &id)?;
            if !resolved.is_empty() {
                self.sub = Some(SubDrill {
                    origin: id,
                    sections: resolved,
                    section_index: 0,
                    entry_index: 0,
                });
                self.level = NavLevel::SubSections;
                return Ok(DrillOutcome::Drilled);
            }
        }
        match command {
            Some(token) => Ok(DrillOutcome::Activated(token)),
            None => Ok(DrillOutcome::Nothing),
        }
    }

    fn enter_items(&mut self) {
        self.item_index = 0;
        self.section_index = 0;
        self.entry_index = 0;
        self.sub = None;
        self.cache.invalidate();
        self.level = NavLevel::Items;
    }

    fn cursor_mut(&mut self) -> &mut usize {
        match self.level {
            NavLevel::Screens => &mut self.screen_index,
            NavLevel::Items => &mut self.item_index,
            NavLevel::Sections => &mut self.section_index,
            NavLevel::SectionItems => &mut self.entry_index,
            NavLevel::SubSections => match self.sub.as_mut() {
                Some(sub) => &mut sub.section_index,
                None => &mut self.section_index,
            },
            NavLevel::SubSectionItems => match self.sub.as_mut() {
                Some(sub) => &mut sub.entry_index,
                None => &mut self.entry_index,
            },
        }
    }

    fn sections(&self) -> Option<&[Section]> {
        self.cache.peek(self.item_index)
    }

    fn current_section(&self) -> Option<&Section> {
        self.sections()?.get(self.section_index)
    }

    fn current_entry(&self) -> Option<&SectionItem> {
        self.current_section()?.item(self.entry_index)
    }

    fn current_sub_section(&self) -> Option<&Section> {
        let sub = self.sub.as_ref()?;
        sub.sections.get(sub.section_index)
    }

    fn current_sub_entry(&self) -> Option<&SectionItem> {
        let sub = self.sub.as_ref()?;
        self.current_sub_section()?.item(sub.entry_index)
    }
}

fn clamp_index(index: usize, count: usize) -> usize {
    if count == 0 {
        0
    } else {
        index.min(count - 1)
    }
}

fn position_suffix(text: String, index: usize, count: usize, verbose: bool) -> String {
    if verbose && count > 0 {
        format!("{text}. {} of {count}", index + 1)
    } else {
        text
    }
}

fn read_error(what: &str, error: &crate::domain::NavError) -> String {
    tracing::warn!(source = what, %error, "host read failed");
    format!("Error reading {what}")
}

fn entry_detail(entry: Option<&SectionItem>) -> String {
    match entry {
        Some(entry) if !entry.detail_text().is_empty() => entry.detail_text().to_string(),
        Some(entry) => entry.spoken_line(),
        None => "no items".to_string(),
    }
}

fn join_listing(kind: &str, names: &[&str]) -> String {
    match names.len() {
        0 => format!("No {kind}"),
        1 => format!("1 {}: {}", kind.trim_end_matches('s'), names[0]),
        n => format!("{n} {kind}: {}", names.join(", ")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CommandToken;
    use crate::screens::{StaticItem, StaticScreen};

    fn fixture() -> Vec<Box<dyn Screen<()>>> {
        let fleets = StaticScreen::new("Fleets", "Your fleets and their orders")
            .item(
                StaticItem::new("First Fleet").section(
                    Section::new("Ships")
                        .with(SectionItem::new("Frigate Dawn"))
                        .with(SectionItem::new("Monitor Dusk")),
                ),
            )
            .item(StaticItem::new("Second Fleet").command(CommandToken::new("fleet.select 1")))
            .item(StaticItem::new("Third Fleet"));
        let nations = StaticScreen::new("Nations", "All nations and their stats");
        vec![Box::new(fleets), Box::new(nations)]
    }

    #[test]
    fn next_wraps_to_start_after_count_moves() {
        let screens = fixture();
        let mut nav = NavigationState::new();
        let start = nav.screen_index();
        for _ in 0..screens.len() {
            assert!(nav.next(&screens));
        }
        assert_eq!(nav.screen_index(), start);
    }

    #[test]
    fn previous_is_inverse_of_next() {
        let mut screens = fixture();
        let mut nav = NavigationState::new();
        nav.drill_down(&mut screens, &()).unwrap();
        nav.next(&screens);
        let at = nav.item_index();
        nav.next(&screens);
        nav.previous(&screens);
        assert_eq!(nav.item_index(), at);
    }

    #[test]
    fn back_out_at_top_reports_false_without_mutation() {
        let screens = fixture();
        let mut nav = NavigationState::new();
        nav.next(&screens);
        assert!(!nav.back_out());
        assert_eq!(nav.level(), NavLevel::Screens);
        assert_eq!(nav.screen_index(), 1);
    }

    #[test]
    fn drill_walks_down_to_section_items() {
        let mut screens = fixture();
        let mut nav = NavigationState::new();
        assert!(matches!(
            nav.drill_down(&mut screens, &()).unwrap(),
            DrillOutcome::Drilled
        ));
        assert_eq!(nav.level(), NavLevel::Items);
        assert!(matches!(
            nav.drill_down(&mut screens, &()).unwrap(),
            DrillOutcome::Drilled
        ));
        assert_eq!(nav.level(), NavLevel::Sections);
        assert!(matches!(
            nav.drill_down(&mut screens, &()).unwrap(),
            DrillOutcome::Drilled
        ));
        assert_eq!(nav.level(), NavLevel::SectionItems);
        assert_eq!(nav.describe_current(&screens, &(), false), "Frigate Dawn");
    }

    #[test]
    fn sectionless_item_with_command_activates() {
        let mut screens = fixture();
        let mut nav = NavigationState::new();
        nav.drill_down(&mut screens, &()).unwrap();
        nav.next(&screens);
        match nav.drill_down(&mut screens, &()).unwrap() {
            DrillOutcome::Activated(token) => assert_eq!(token.as_str(), "fleet.select 1"),
            other => panic!("expected activation, got {other:?}"),
        }
        assert_eq!(nav.level(), NavLevel::Items);
    }

    #[test]
    fn bare_item_drill_is_nothing() {
        let mut screens = fixture();
        let mut nav = NavigationState::new();
        nav.drill_down(&mut screens, &()).unwrap();
        nav.next(&screens);
        nav.next(&screens);
        assert!(matches!(
            nav.drill_down(&mut screens, &()).unwrap(),
            DrillOutcome::Nothing
        ));
        assert_eq!(nav.level(), NavLevel::Items);
    }

    #[test]
    fn page_jumps_to_screens_from_any_depth() {
        let mut screens = fixture();
        let mut nav = NavigationState::new();
        nav.drill_down(&mut screens, &()).unwrap();
        nav.drill_down(&mut screens, &()).unwrap();
        nav.drill_down(&mut screens, &()).unwrap();
        assert!(nav.page(&screens, true));
        assert_eq!(nav.level(), NavLevel::Screens);
        assert_eq!(nav.screen_index(), 1);
    }

    #[test]
    fn empty_screen_drill_reports_nothing() {
        let mut screens = fixture();
        let mut nav = NavigationState::new();
        nav.next(&screens);
        nav.drill_down(&mut screens, &()).unwrap();
        assert_eq!(nav.level(), NavLevel::Items);
        assert!(matches!(
            nav.drill_down(&mut screens, &()).unwrap(),
            DrillOutcome::Nothing
        ));
        assert_eq!(nav.describe_current(&screens, &(), false), "No items");
    }

    #[test]
    fn secondary_id_drills_into_nested_sections() {
        let ledger = StaticScreen::new("Ledger", "Income lines")
            .item(StaticItem::new("Mining income").section(
                Section::new("Lines").with(
                    SectionItem::new("Luna Hab")
                        .value("12 per month")
                        .secondary("hab:luna"),
                ),
            ))
            .secondary(
                "hab:luna",
                vec![Section::new("Modules").with(SectionItem::new("Solar array"))],
            );
        let mut screens: Vec<Box<dyn Screen<()>>> = vec![Box::new(ledger)];
        let mut nav = NavigationState::new();
        for _ in 0..3 {
            nav.drill_down(&mut screens, &()).unwrap();
        }
        assert_eq!(nav.level(), NavLevel::SectionItems);
        assert!(matches!(
            nav.drill_down(&mut screens, &()).unwrap(),
            DrillOutcome::Drilled
        ));
        assert_eq!(nav.level(), NavLevel::SubSections);
        nav.drill_down(&mut screens, &()).unwrap();
        assert_eq!(nav.level(), NavLevel::SubSectionItems);
        assert_eq!(nav.describe_current(&screens, &(), false), "Solar array");
        assert!(nav.back_out());
        assert!(nav.back_out());
        assert_eq!(nav.level(), NavLevel::SectionItems);
    }

    #[test]
    fn stale_index_reads_as_invalid_instead_of_failing() {
        let mut screens = fixture();
        let mut nav = NavigationState::new();
        nav.drill_down(&mut screens, &()).unwrap();
        // Simulates the list shrinking under the cursor between frames.
        nav.jump_to_item(10);
        assert_eq!(nav.describe_current(&screens, &(), true), "Invalid item");
        assert_eq!(nav.describe_detail(&screens, &()), "Invalid item");
        // The next resync clamps the cursor back into range.
        nav.resync(&mut screens, &()).unwrap();
        assert_eq!(nav.item_index(), 2);
    }

    #[test]
    fn verbose_mode_appends_position() {
        let screens = fixture();
        let nav = NavigationState::new();
        assert_eq!(
            nav.describe_current(&screens, &(), true),
            "Fleets screen. 1 of 2"
        );
    }

    #[test]
    fn list_all_enumerates_screen_names() {
        let screens = fixture();
        let nav = NavigationState::new();
        assert_eq!(nav.list_all(&screens, &()), "2 screens: Fleets, Nations");
    }
}
