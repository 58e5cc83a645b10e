//! Command handling and state transition logic.
//!
//! [`handle_command`] is the primary coordinator: it takes one logical
//! command, mutates the review state, and returns the side effects to
//! execute — speech and host command dispatches. It is pure with respect to
//! the outside world; the embedding layer runs the returned [`Action`]s.
//!
//! Control flow per command:
//! 1. An active overlay mode (grid, sort menu, search) interprets the
//!    command first.
//! 2. Otherwise the command drives the tree cursor in browse mode.
//! 3. Host-read failures are converted here, at the screen boundary, into a
//!    short "Error reading X" utterance plus a log entry; navigation state
//!    is never left partially mutated by a failed read.
//!
//! After any [`Action::Dispatch`] is executed, the embedding layer must call
//! [`after_dispatch`] so cached section data and stale indices are
//! re-derived from host state.

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

use crate::domain::{CommandToken, NavError};
use crate::engine::actions::Action;
use crate::engine::modes::{GridState, Mode, NavLevel, SearchState, SortMenuState};
use crate::engine::state::DrillOutcome;
use crate::engine::ReviewState;
use crate::grid::GridNav;
use crate::input::NavCommand;
use crate::screens::Screen;

/// Processes one command against the review state.
///
/// Returns the actions to execute in order. An empty vector means the
/// command was a silent no-op (e.g. drilling into a bare item, or a command
/// that does not apply at the current level).
pub fn handle_command<H>(
    state: &mut ReviewState,
    screens: &mut [Box<dyn Screen<H>>],
    ctx: &H,
    command: NavCommand,
) -> Vec<Action> {
    let _span = tracing::debug_span!("handle_command", command = ?command).entered();

    if matches!(state.mode, Mode::Grid(_)) {
        return grid_command(state, screens, ctx, command);
    }
    if matches!(state.mode, Mode::SortMenu(_)) {
        return sort_menu_command(state, screens, ctx, command);
    }
    if matches!(state.mode, Mode::Search(_)) {
        return search_command(state, screens, ctx, command);
    }
    browse_command(state, screens, ctx, command)
}

/// Re-derives host-backed data after a dispatched command.
///
/// Any dispatched action may have mutated host state, so the section cache
/// is dropped unconditionally. In grid mode the snapshot is re-fetched and
/// the updated cell is read back; everywhere else the navigation state is
/// resynced and clamped.
pub fn after_dispatch<H>(
    state: &mut ReviewState,
    screens: &mut [Box<dyn Screen<H>>],
    ctx: &H,
) -> Vec<Action> {
    state.nav.invalidate_cache();

    if let Mode::Grid(grid) = &mut state.mode {
        let item = grid.item_index;
        let refreshed = screens.get_mut(state.nav.screen_index()).and_then(|screen| {
            screen.refresh(ctx).ok()?;
            screen.grid_for_item(ctx, item).ok().flatten()
        });
        match refreshed {
            Some(model) => {
                grid.nav.replace_model(model);
                return vec![Action::say_queued(grid.nav.spoken_cell())];
            }
            None => {
                tracing::debug!("grid gone after dispatch, returning to items");
                state.mode = Mode::Browse;
                state.nav.return_to_items();
                return vec![];
            }
        }
    }

    match state.nav.resync(screens, ctx) {
        Ok(()) => vec![],
        Err(error) => read_failure(screens, state.nav.screen_index(), &error),
    }
}

fn browse_command<H>(
    state: &mut ReviewState,
    screens: &mut [Box<dyn Screen<H>>],
    ctx: &H,
    command: NavCommand,
) -> Vec<Action> {
    match command {
        NavCommand::MoveDown => {
            state.nav.next(screens);
            vec![Action::say(state.nav.describe_current(screens, ctx, state.verbose))]
        }
        NavCommand::MoveUp => {
            state.nav.previous(screens);
            vec![Action::say(state.nav.describe_current(screens, ctx, state.verbose))]
        }
        NavCommand::MoveRight | NavCommand::Activate => drill(state, screens, ctx),
        NavCommand::MoveLeft | NavCommand::Cancel | NavCommand::Backspace => {
            if state.nav.back_out() {
                vec![Action::say(state.nav.describe_current(screens, ctx, state.verbose))]
            } else {
                // Top level: escape behavior belongs to the host.
                vec![Action::Dispatch(CommandToken::new("ui.open_menu"))]
            }
        }
        NavCommand::PageUp | NavCommand::PageDown => {
            state.nav.page(screens, command == NavCommand::PageDown);
            vec![Action::say(state.nav.describe_current(screens, ctx, state.verbose))]
        }
        NavCommand::ReadDetail => {
            vec![Action::say(state.nav.describe_detail(screens, ctx))]
        }
        NavCommand::ListAll => {
            vec![Action::say(state.nav.list_all(screens, ctx))]
        }
        NavCommand::LetterJump(letter) => letter_jump(state, screens, ctx, letter),
        NavCommand::Search => {
            if state.nav.level() != NavLevel::Items {
                return vec![];
            }
            state.mode = Mode::Search(SearchState {
                query: String::new(),
                restore_index: state.nav.item_index(),
            });
            vec![Action::say(
                "Search. Type to match, Enter to jump, Escape to cancel",
            )]
        }
        NavCommand::ToggleView => {
            capability_toggle(state, screens, ctx, |screen| screen.capabilities().view_toggle, |screen, ctx| {
                screen.toggle_view(ctx)
            })
        }
        NavCommand::CycleFactionFilter => {
            capability_toggle(state, screens, ctx, |screen| screen.capabilities().faction_filter, |screen, ctx| {
                screen.cycle_faction_filter(ctx)
            })
        }
        NavCommand::SortMenu => open_sort_menu(state, screens),
        // Typed characters only matter inside search mode.
        NavCommand::Char(_) => vec![],
        // Routed to other handlers by the chain; inert here.
        NavCommand::SlotToggle
        | NavCommand::TimePause
        | NavCommand::TimeFaster
        | NavCommand::TimeSlower
        | NavCommand::TimeSetSpeed(_) => vec![],
    }
}

fn drill<H>(
    state: &mut ReviewState,
    screens: &mut [Box<dyn Screen<H>>],
    ctx: &H,
) -> Vec<Action> {
    match state.nav.drill_down(screens, ctx) {
        Ok(DrillOutcome::Drilled) => {
            if state.nav.level() == NavLevel::Items {
                // Entered a screen: the activation announcement refreshes
                // the item list as a side effect.
                let text = match screens.get_mut(state.nav.screen_index()) {
                    Some(screen) => screen.activation_announcement(ctx),
                    None => "No screens".to_string(),
                };
                vec![Action::say(text)]
            } else {
                vec![Action::say(state.nav.describe_current(screens, ctx, state.verbose))]
            }
        }
        // The dispatched action owns its own speech; do not re-announce.
        Ok(DrillOutcome::Activated(token)) => vec![Action::Dispatch(token)],
        Ok(DrillOutcome::EnteredGrid(model)) => {
            let nav = GridNav::new(model);
            let announcement = format!("{} grid. {}", nav.title(), nav.spoken_cell());
            state.mode = Mode::Grid(GridState {
                nav,
                item_index: state.nav.item_index(),
            });
            vec![Action::say(announcement)]
        }
        Ok(DrillOutcome::Nothing) => vec![],
        Err(error) => read_failure(screens, state.nav.screen_index(), &error),
    }
}

fn letter_jump<H>(
    state: &mut ReviewState,
    screens: &mut [Box<dyn Screen<H>>],
    ctx: &H,
    letter: char,
) -> Vec<Action> {
    if state.nav.level() != NavLevel::Items {
        return vec![];
    }
    let index = state.nav.screen_index();
    let Some(screen) = screens.get(index) else {
        return vec![];
    };
    if !screen.capabilities().letter_jump {
        return vec![];
    }
    match screen.find_next_item_by_letter(ctx, letter, state.nav.item_index()) {
        Ok(Some(hit)) => {
            state.nav.jump_to_item(hit);
            vec![Action::say(state.nav.describe_current(screens, ctx, state.verbose))]
        }
        Ok(None) => vec![Action::say(format!("No items starting with {letter}"))],
        Err(error) => read_failure(screens, index, &error),
    }
}

fn capability_toggle<H>(
    state: &mut ReviewState,
    screens: &mut [Box<dyn Screen<H>>],
    ctx: &H,
    supported: impl Fn(&dyn Screen<H>) -> bool,
    apply: impl FnOnce(&mut dyn Screen<H>, &H) -> crate::domain::Result<Option<String>>,
) -> Vec<Action> {
    if state.nav.level() != NavLevel::Items {
        return vec![];
    }
    let index = state.nav.screen_index();
    let Some(screen) = screens.get_mut(index) else {
        return vec![];
    };
    if !supported(screen.as_ref()) {
        return vec![];
    }
    match apply(screen.as_mut(), ctx) {
        Ok(Some(status)) => {
            // The item universe changed under the cursor.
            state.nav.invalidate_cache();
            let count = screens
                .get(index)
                .map_or(0, |screen| screen.item_count());
            if count > 0 {
                state.nav.jump_to_item(state.nav.item_index().min(count - 1));
            } else {
                state.nav.jump_to_item(0);
            }
            vec![
                Action::say(status),
                Action::say_queued(state.nav.describe_current(screens, ctx, state.verbose)),
            ]
        }
        Ok(None) => vec![],
        Err(error) => read_failure(screens, index, &error),
    }
}

fn open_sort_menu<H>(state: &mut ReviewState, screens: &[Box<dyn Screen<H>>]) -> Vec<Action> {
    if state.nav.level() != NavLevel::Items {
        return vec![];
    }
    let Some(screen) = screens.get(state.nav.screen_index()) else {
        return vec![];
    };
    if !screen.capabilities().sort_menu {
        return vec![];
    }
    let options = screen.sort_options();
    if options.is_empty() {
        return vec![Action::say("No sort options")];
    }
    let announcement = format!("Sort by {}. 1 of {}", options[0], options.len());
    state.mode = Mode::SortMenu(SortMenuState { options, index: 0 });
    vec![Action::say(announcement)]
}

fn grid_command<H>(
    state: &mut ReviewState,
    screens: &mut [Box<dyn Screen<H>>],
    ctx: &H,
    command: NavCommand,
) -> Vec<Action> {
    let Mode::Grid(grid) = &mut state.mode else {
        return vec![];
    };
    match command {
        NavCommand::MoveUp => {
            grid.nav.move_up();
            vec![Action::say(grid.nav.spoken_cell())]
        }
        NavCommand::MoveDown => {
            grid.nav.move_down();
            vec![Action::say(grid.nav.spoken_cell())]
        }
        NavCommand::MoveLeft => {
            grid.nav.move_left();
            vec![Action::say(grid.nav.spoken_cell())]
        }
        NavCommand::MoveRight => {
            grid.nav.move_right();
            vec![Action::say(grid.nav.spoken_cell())]
        }
        NavCommand::Activate => match grid.nav.increase() {
            Some(token) => vec![Action::Dispatch(token)],
            None => vec![Action::say("Read only")],
        },
        NavCommand::Backspace => match grid.nav.decrease() {
            Some(token) => vec![Action::Dispatch(token)],
            None => vec![Action::say("Read only")],
        },
        NavCommand::ReadDetail => {
            vec![Action::say(format!(
                "{} grid. {}",
                grid.nav.title(),
                grid.nav.spoken_cell()
            ))]
        }
        NavCommand::ListAll => {
            vec![Action::say(format!(
                "{} grid, {} rows by {} columns",
                grid.nav.title(),
                grid.nav.rows(),
                grid.nav.cols()
            ))]
        }
        NavCommand::Cancel => {
            state.mode = Mode::Browse;
            state.nav.return_to_items();
            state.nav.invalidate_cache();
            vec![Action::say(state.nav.describe_current(screens, ctx, state.verbose))]
        }
        NavCommand::PageUp | NavCommand::PageDown => {
            state.mode = Mode::Browse;
            state.nav.return_to_items();
            state.nav.invalidate_cache();
            browse_command(state, screens, ctx, command)
        }
        _ => vec![],
    }
}

fn sort_menu_command<H>(
    state: &mut ReviewState,
    screens: &mut [Box<dyn Screen<H>>],
    ctx: &H,
    command: NavCommand,
) -> Vec<Action> {
    let Mode::SortMenu(menu) = &mut state.mode else {
        return vec![];
    };
    match command {
        NavCommand::MoveDown => {
            menu.index = (menu.index + 1) % menu.options.len();
            vec![Action::say(format!(
                "Sort by {}. {} of {}",
                menu.options[menu.index],
                menu.index + 1,
                menu.options.len()
            ))]
        }
        NavCommand::MoveUp => {
            menu.index = if menu.index == 0 {
                menu.options.len() - 1
            } else {
                menu.index - 1
            };
            vec![Action::say(format!(
                "Sort by {}. {} of {}",
                menu.options[menu.index],
                menu.index + 1,
                menu.options.len()
            ))]
        }
        NavCommand::Activate | NavCommand::MoveRight => {
            let choice = menu.index;
            state.mode = Mode::Browse;
            let index = state.nav.screen_index();
            let Some(screen) = screens.get_mut(index) else {
                return vec![];
            };
            match screen.apply_sort(ctx, choice) {
                Ok(Some(status)) => {
                    state.nav.invalidate_cache();
                    vec![
                        Action::say(status),
                        Action::say_queued(state.nav.describe_current(screens, ctx, state.verbose)),
                    ]
                }
                Ok(None) => vec![],
                Err(error) => read_failure(screens, index, &error),
            }
        }
        NavCommand::Cancel => {
            state.mode = Mode::Browse;
            vec![Action::say("Sort cancelled")]
        }
        _ => vec![],
    }
}

fn search_command<H>(
    state: &mut ReviewState,
    screens: &mut [Box<dyn Screen<H>>],
    ctx: &H,
    command: NavCommand,
) -> Vec<Action> {
    let Mode::Search(search) = &mut state.mode else {
        return vec![];
    };
    match command {
        NavCommand::Char(c) => {
            search.query.push(c);
            announce_best(screens, ctx, state.nav.screen_index(), &search.query)
        }
        NavCommand::Backspace => {
            search.query.pop();
            if search.query.is_empty() {
                vec![Action::say("Search cleared")]
            } else {
                announce_best(screens, ctx, state.nav.screen_index(), &search.query)
            }
        }
        NavCommand::Activate => {
            let query = std::mem::take(&mut search.query);
            state.mode = Mode::Browse;
            match find_best_match(screens, ctx, state.nav.screen_index(), &query) {
                Some(hit) => {
                    state.nav.jump_to_item(hit);
                    vec![Action::say(state.nav.describe_current(screens, ctx, state.verbose))]
                }
                None => vec![Action::say(format!("No match for {query}"))],
            }
        }
        NavCommand::Cancel => {
            let restore = search.restore_index;
            state.mode = Mode::Browse;
            state.nav.jump_to_item(restore);
            vec![Action::say("Search cancelled")]
        }
        _ => vec![],
    }
}

fn announce_best<H>(
    screens: &[Box<dyn Screen<H>>],
    ctx: &H,
    screen_index: usize,
    query: &str,
) -> Vec<Action> {
    match find_best_match(screens, ctx, screen_index, query) {
        Some(hit) => {
            let summary = screens
                .get(screen_index)
                .and_then(|screen| screen.item_summary(ctx, hit).ok())
                .unwrap_or_else(|| "Invalid item".to_string());
            vec![Action::say(summary)]
        }
        None => vec![Action::say(format!("No match for {query}"))],
    }
}

/// Ranks items by fuzzy score against the query and returns the best.
///
/// Every whitespace-separated token must match the item's sortable name;
/// scores of matching tokens add up. Items whose names cannot be read are
/// skipped rather than failing the whole search.
fn find_best_match<H>(
    screens: &[Box<dyn Screen<H>>],
    ctx: &H,
    screen_index: usize,
    query: &str,
) -> Option<usize> {
    let tokens: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();
    if tokens.is_empty() {
        return None;
    }
    let screen = screens.get(screen_index)?;
    let matcher = SkimMatcherV2::default();

    let mut best: Option<(i64, usize)> = None;
    for index in 0..screen.item_count() {
        let Ok(name) = screen.sortable_name(ctx, index) else {
            continue;
        };
        let name = name.to_lowercase();
        let mut total = 0i64;
        let mut all_matched = true;
        for token in &tokens {
            match matcher.fuzzy_match(&name, token) {
                Some(score) => total += score,
                None => {
                    all_matched = false;
                    break;
                }
            }
        }
        if all_matched && best.map_or(true, |(top, _)| total > top) {
            best = Some((total, index));
        }
    }
    best.map(|(_, index)| index)
}

fn read_failure<H>(
    screens: &[Box<dyn Screen<H>>],
    screen_index: usize,
    error: &NavError,
) -> Vec<Action> {
    let name = screens
        .get(screen_index)
        .map_or_else(|| "screen".to_string(), |screen| screen.name().to_string());
    tracing::warn!(screen = %name, %error, "host read failed");
    vec![Action::say(format!("Error reading {name}"))]
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::domain::Result;
    use crate::grid::{GridCell, GridModel};
    use crate::screens::{Capabilities, Section, SectionItem, StaticItem, StaticScreen};
    use crate::Verbosity;

    fn say_texts(actions: &[Action]) -> Vec<String> {
        actions
            .iter()
            .filter_map(|action| match action {
                Action::Speak { text, .. } => Some(text.clone()),
                Action::Dispatch(_) => None,
            })
            .collect()
    }

    fn state() -> ReviewState {
        ReviewState::new(Verbosity::Terse)
    }

    /// Screen whose grid snapshot reflects a mutable host value.
    struct PriorityScreen {
        value: Rc<Cell<u8>>,
    }

    impl Screen<()> for PriorityScreen {
        fn name(&self) -> &str {
            "Nations"
        }

        fn refresh(&mut self, _ctx: &()) -> Result<()> {
            Ok(())
        }

        fn item_count(&self) -> usize {
            1
        }

        fn item_summary(&self, _ctx: &(), _index: usize) -> Result<String> {
            Ok("United Nations".to_string())
        }

        fn sections_for_item(&self, _ctx: &(), _index: usize) -> Result<Vec<Section>> {
            Ok(Vec::new())
        }

        fn grid_for_item(&self, _ctx: &(), _index: usize) -> Result<Option<GridModel>> {
            let cell = GridCell::adjustable(
                format!("{} of 5", self.value.get()),
                CommandToken::new("priority.increase economy"),
                CommandToken::new("priority.decrease economy"),
            );
            Ok(Some(
                GridModel::new(
                    "Priorities",
                    vec!["Economy".to_string()],
                    vec!["Funding".to_string()],
                    vec![vec![cell]],
                )
                .expect("static grid shape"),
            ))
        }
    }

    /// Screen that counts section fetches and can toggle its universe.
    struct FleetScreen {
        fetches: Rc<Cell<usize>>,
        all_view: bool,
    }

    impl Screen<()> for FleetScreen {
        fn name(&self) -> &str {
            "Fleets"
        }

        fn capabilities(&self) -> Capabilities {
            Capabilities {
                view_toggle: true,
                sort_menu: true,
                faction_filter: true,
                letter_jump: true,
            }
        }

        fn refresh(&mut self, _ctx: &()) -> Result<()> {
            Ok(())
        }

        fn item_count(&self) -> usize {
            if self.all_view {
                4
            } else {
                2
            }
        }

        fn item_summary(&self, _ctx: &(), index: usize) -> Result<String> {
            Ok(format!("Fleet {index}"))
        }

        fn sections_for_item(&self, _ctx: &(), index: usize) -> Result<Vec<Section>> {
            self.fetches.set(self.fetches.get() + 1);
            Ok(vec![
                Section::new("Ships").with(SectionItem::new(format!("Flagship {index}")))
            ])
        }

        fn toggle_view(&mut self, _ctx: &()) -> Result<Option<String>> {
            self.all_view = !self.all_view;
            Ok(Some(
                if self.all_view {
                    "Showing all fleets"
                } else {
                    "Showing your fleets"
                }
                .to_string(),
            ))
        }

        fn sort_options(&self) -> Vec<String> {
            vec!["Name".to_string(), "Power".to_string()]
        }

        fn apply_sort(&mut self, _ctx: &(), choice: usize) -> Result<Option<String>> {
            Ok(self
                .sort_options()
                .get(choice)
                .map(|option| format!("Sorted by {option}")))
        }
    }

    struct BrokenScreen;

    impl Screen<()> for BrokenScreen {
        fn name(&self) -> &str {
            "Resources"
        }

        fn refresh(&mut self, _ctx: &()) -> Result<()> {
            Ok(())
        }

        fn item_count(&self) -> usize {
            1
        }

        fn item_summary(&self, _ctx: &(), _index: usize) -> Result<String> {
            Err(NavError::HostRead("object destroyed".into()))
        }

        fn sections_for_item(&self, _ctx: &(), _index: usize) -> Result<Vec<Section>> {
            Err(NavError::HostRead("object destroyed".into()))
        }
    }

    fn enter_items(state: &mut ReviewState, screens: &mut [Box<dyn Screen<()>>]) {
        let actions = handle_command(state, screens, &(), NavCommand::Activate);
        assert!(!say_texts(&actions).is_empty());
        assert_eq!(state.nav.level(), NavLevel::Items);
    }

    #[test]
    fn grid_item_switches_to_grid_mode() {
        let mut screens: Vec<Box<dyn Screen<()>>> = vec![Box::new(PriorityScreen {
            value: Rc::new(Cell::new(2)),
        })];
        let mut state = state();
        enter_items(&mut state, &mut screens);
        let actions = handle_command(&mut state, &mut screens, &(), NavCommand::Activate);
        assert!(state.in_grid());
        assert_eq!(
            say_texts(&actions),
            ["Priorities grid. Economy, Funding: 2 of 5"]
        );
    }

    #[test]
    fn grid_adjust_dispatches_and_rereads_the_cell() {
        let value = Rc::new(Cell::new(2));
        let mut screens: Vec<Box<dyn Screen<()>>> = vec![Box::new(PriorityScreen {
            value: Rc::clone(&value),
        })];
        let mut state = state();
        enter_items(&mut state, &mut screens);
        handle_command(&mut state, &mut screens, &(), NavCommand::Activate);

        let actions = handle_command(&mut state, &mut screens, &(), NavCommand::Activate);
        assert_eq!(
            actions,
            vec![Action::Dispatch(CommandToken::new(
                "priority.increase economy"
            ))]
        );

        // The host applied the change; the follow-up reads the new value.
        value.set(3);
        let follow = after_dispatch(&mut state, &mut screens, &());
        assert_eq!(say_texts(&follow), ["Economy, Funding: 3 of 5"]);
        assert!(state.in_grid());
    }

    #[test]
    fn grid_cancel_returns_to_items() {
        let mut screens: Vec<Box<dyn Screen<()>>> = vec![Box::new(PriorityScreen {
            value: Rc::new(Cell::new(1)),
        })];
        let mut state = state();
        enter_items(&mut state, &mut screens);
        handle_command(&mut state, &mut screens, &(), NavCommand::Activate);
        let actions = handle_command(&mut state, &mut screens, &(), NavCommand::Cancel);
        assert!(!state.in_grid());
        assert_eq!(state.nav.level(), NavLevel::Items);
        assert_eq!(say_texts(&actions), ["United Nations"]);
    }

    #[test]
    fn section_fetch_is_cached_until_dispatch() {
        let fetches = Rc::new(Cell::new(0));
        let mut screens: Vec<Box<dyn Screen<()>>> = vec![Box::new(FleetScreen {
            fetches: Rc::clone(&fetches),
            all_view: false,
        })];
        let mut state = state();
        enter_items(&mut state, &mut screens);
        handle_command(&mut state, &mut screens, &(), NavCommand::Activate);
        handle_command(&mut state, &mut screens, &(), NavCommand::Activate);
        assert_eq!(state.nav.level(), NavLevel::SectionItems);
        assert_eq!(fetches.get(), 1);

        after_dispatch(&mut state, &mut screens, &());
        assert_eq!(fetches.get(), 2);
    }

    #[test]
    fn toggle_view_speaks_status_then_position() {
        let mut screens: Vec<Box<dyn Screen<()>>> = vec![Box::new(FleetScreen {
            fetches: Rc::new(Cell::new(0)),
            all_view: false,
        })];
        let mut state = state();
        enter_items(&mut state, &mut screens);
        let actions = handle_command(&mut state, &mut screens, &(), NavCommand::ToggleView);
        assert_eq!(say_texts(&actions), ["Showing all fleets", "Fleet 0"]);
    }

    #[test]
    fn sort_menu_walks_and_applies() {
        let mut screens: Vec<Box<dyn Screen<()>>> = vec![Box::new(FleetScreen {
            fetches: Rc::new(Cell::new(0)),
            all_view: false,
        })];
        let mut state = state();
        enter_items(&mut state, &mut screens);
        let open = handle_command(&mut state, &mut screens, &(), NavCommand::SortMenu);
        assert_eq!(say_texts(&open), ["Sort by Name. 1 of 2"]);
        let down = handle_command(&mut state, &mut screens, &(), NavCommand::MoveDown);
        assert_eq!(say_texts(&down), ["Sort by Power. 2 of 2"]);
        let apply = handle_command(&mut state, &mut screens, &(), NavCommand::Activate);
        assert_eq!(say_texts(&apply), ["Sorted by Power", "Fleet 0"]);
    }

    #[test]
    fn search_jumps_to_best_match() {
        let mut screens: Vec<Box<dyn Screen<()>>> = vec![Box::new(
            StaticScreen::new("Councilors", "Your council")
                .capabilities(Capabilities {
                    letter_jump: true,
                    ..Capabilities::default()
                })
                .item(StaticItem::new("Anna Mercier"))
                .item(StaticItem::new("Boris Volkov"))
                .item(StaticItem::new("Carmen Reyes")),
        )];
        let mut state = state();
        enter_items(&mut state, &mut screens);
        handle_command(&mut state, &mut screens, &(), NavCommand::Search);
        assert!(state.is_searching());
        for c in ['v', 'o', 'l'] {
            handle_command(&mut state, &mut screens, &(), NavCommand::Char(c));
        }
        let actions = handle_command(&mut state, &mut screens, &(), NavCommand::Activate);
        assert!(!state.is_searching());
        assert_eq!(state.nav.item_index(), 1);
        assert_eq!(say_texts(&actions), ["Boris Volkov"]);
    }

    #[test]
    fn search_cancel_restores_the_cursor() {
        let mut screens: Vec<Box<dyn Screen<()>>> = vec![Box::new(
            StaticScreen::new("Councilors", "Your council")
                .item(StaticItem::new("Anna Mercier"))
                .item(StaticItem::new("Boris Volkov")),
        )];
        let mut state = state();
        enter_items(&mut state, &mut screens);
        handle_command(&mut state, &mut screens, &(), NavCommand::MoveDown);
        handle_command(&mut state, &mut screens, &(), NavCommand::Search);
        handle_command(&mut state, &mut screens, &(), NavCommand::Char('a'));
        let actions = handle_command(&mut state, &mut screens, &(), NavCommand::Cancel);
        assert_eq!(state.nav.item_index(), 1);
        assert_eq!(say_texts(&actions), ["Search cancelled"]);
    }

    #[test]
    fn host_read_failure_becomes_spoken_error() {
        let mut screens: Vec<Box<dyn Screen<()>>> = vec![Box::new(BrokenScreen)];
        let mut state = state();
        enter_items(&mut state, &mut screens);
        let actions = handle_command(&mut state, &mut screens, &(), NavCommand::Activate);
        assert_eq!(say_texts(&actions), ["Error reading Resources"]);
        assert_eq!(state.nav.level(), NavLevel::Items);
    }

    #[test]
    fn escape_at_top_level_defers_to_the_host() {
        let mut screens: Vec<Box<dyn Screen<()>>> = vec![Box::new(StaticScreen::new(
            "Fleets",
            "Your fleets",
        ))];
        let mut state = state();
        let actions = handle_command(&mut state, &mut screens, &(), NavCommand::Cancel);
        assert_eq!(
            actions,
            vec![Action::Dispatch(CommandToken::new("ui.open_menu"))]
        );
    }

    #[test]
    fn letter_jump_requires_the_capability() {
        let mut screens: Vec<Box<dyn Screen<()>>> = vec![Box::new(
            StaticScreen::new("Plain", "No capabilities").item(StaticItem::new("Alpha")),
        )];
        let mut state = state();
        enter_items(&mut state, &mut screens);
        let actions = handle_command(&mut state, &mut screens, &(), NavCommand::LetterJump('a'));
        assert!(actions.is_empty());
    }

    #[test]
    fn letter_jump_without_match_says_so() {
        let mut screens: Vec<Box<dyn Screen<()>>> = vec![Box::new(FleetScreen {
            fetches: Rc::new(Cell::new(0)),
            all_view: false,
        })];
        let mut state = state();
        enter_items(&mut state, &mut screens);
        let actions = handle_command(&mut state, &mut screens, &(), NavCommand::LetterJump('z'));
        assert_eq!(say_texts(&actions), ["No items starting with z"]);
    }
}
