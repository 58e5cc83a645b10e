//! Logical commands resolved from key bindings.
//!
//! A [`NavCommand`] is what the engine actually handles; which physical key
//! produced it is a keymap concern. Directional commands are deliberately
//! spatial (`MoveRight`, not `DrillDown`) because their meaning depends on
//! the active mode: in browsing, right drills and left backs out; in grid
//! mode the same commands move the cell cursor.

use serde::{Deserialize, Serialize};

/// A logical command produced by the keymap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavCommand {
    // ── Movement and structure ──────────────────────────────────────
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    /// Confirm / drill / activate the current target.
    Activate,
    /// Back out one level; escape behavior at the top level is external.
    Cancel,
    /// Jump to the screens level and move one screen back.
    PageUp,
    /// Jump to the screens level and move one screen forward.
    PageDown,

    // ── Reading ─────────────────────────────────────────────────────
    /// Read the longer detail text of the current position.
    ReadDetail,
    /// Enumerate everything at the current level.
    ListAll,

    // ── Item-level helpers ──────────────────────────────────────────
    /// Jump to the next item starting with the letter.
    LetterJump(char),
    /// Open type-ahead item search.
    Search,
    /// A typed character while search is open.
    Char(char),
    /// Delete the last search character; backs out elsewhere.
    Backspace,

    // ── Screen capabilities ─────────────────────────────────────────
    /// Switch between the "mine" and "all" item universes.
    ToggleView,
    /// Advance the faction filter, wrapping.
    CycleFactionFilter,
    /// Open the sort menu for the current screen.
    SortMenu,

    // ── Auxiliary modes ─────────────────────────────────────────────
    /// Toggle the slot cursor over live UI elements.
    SlotToggle,

    // ── Global time controls ────────────────────────────────────────
    TimePause,
    TimeFaster,
    TimeSlower,
    /// Set an absolute game speed (1-based).
    TimeSetSpeed(u8),
}

impl NavCommand {
    /// Whether this is one of the global time controls, which are handled
    /// last in the chain and independently of navigation depth.
    #[must_use]
    pub fn is_time_control(self) -> bool {
        matches!(
            self,
            Self::TimePause | Self::TimeFaster | Self::TimeSlower | Self::TimeSetSpeed(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_serde_roundtrip() {
        for command in [
            NavCommand::MoveDown,
            NavCommand::LetterJump('c'),
            NavCommand::TimeSetSpeed(3),
            NavCommand::SlotToggle,
        ] {
            let json = serde_json::to_string(&command).unwrap();
            let decoded: NavCommand = serde_json::from_str(&json).unwrap();
            assert_eq!(decoded, command);
        }
    }

    #[test]
    fn time_controls_are_classified() {
        assert!(NavCommand::TimeSetSpeed(1).is_time_control());
        assert!(!NavCommand::MoveDown.is_time_control());
    }
}
