//! Configurable keymap resolving key chords to logical commands.
//!
//! Default bindings are built in; a TOML keymap file can override or extend
//! them. The file format is a list of bindings:
//!
//! ```toml
//! [[bindings]]
//! key = "d"
//! modifiers = ["ctrl"]
//! command = "read_detail"
//!
//! [[bindings]]
//! key = "f6"
//! command = "slot_toggle"
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{NavError, Result};
use crate::input::command::NavCommand;
use crate::input::keys::{Key, Modifiers};

/// One serialized binding in a keymap file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBinding {
    /// Key name: a single character or a named key ("up", "enter", "f6").
    pub key: String,
    /// Modifier names: any of "ctrl", "alt", "shift".
    #[serde(default)]
    pub modifiers: Vec<String>,
    /// The command this binding triggers.
    pub command: NavCommand,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct KeymapFile {
    #[serde(default)]
    bindings: Vec<KeyBinding>,
}

/// Resolves key chords to [`NavCommand`]s.
#[derive(Debug)]
pub struct Keymap {
    bindings: HashMap<(Key, Modifiers), NavCommand>,
}

impl Keymap {
    /// The built-in bindings.
    ///
    /// Arrows move and drill, Enter activates, Escape backs out, PageUp/Down
    /// switch screens from any depth, `a`–`z` letter-jump, `/` opens search,
    /// and Ctrl-chords carry the reading and capability commands so they
    /// never collide with letter jumps. Space and the number row are the
    /// global time controls.
    #[must_use]
    pub fn default_bindings() -> Self {
        let mut bindings = HashMap::new();

        bindings.insert((Key::Up, Modifiers::NONE), NavCommand::MoveUp);
        bindings.insert((Key::Down, Modifiers::NONE), NavCommand::MoveDown);
        bindings.insert((Key::Left, Modifiers::NONE), NavCommand::MoveLeft);
        bindings.insert((Key::Right, Modifiers::NONE), NavCommand::MoveRight);
        bindings.insert((Key::Enter, Modifiers::NONE), NavCommand::Activate);
        bindings.insert((Key::Escape, Modifiers::NONE), NavCommand::Cancel);
        bindings.insert((Key::Backspace, Modifiers::NONE), NavCommand::Backspace);

        bindings.insert((Key::PageUp, Modifiers::NONE), NavCommand::PageUp);
        bindings.insert((Key::PageDown, Modifiers::NONE), NavCommand::PageDown);

        bindings.insert((Key::Tab, Modifiers::NONE), NavCommand::ReadDetail);
        bindings.insert((Key::Char('d'), Modifiers::CTRL), NavCommand::ReadDetail);
        bindings.insert((Key::Char('l'), Modifiers::CTRL), NavCommand::ListAll);

        bindings.insert((Key::Char('v'), Modifiers::CTRL), NavCommand::ToggleView);
        bindings.insert(
            (Key::Char('f'), Modifiers::CTRL),
            NavCommand::CycleFactionFilter,
        );
        bindings.insert((Key::Char('s'), Modifiers::CTRL), NavCommand::SortMenu);
        bindings.insert((Key::Char('/'), Modifiers::NONE), NavCommand::Search);

        bindings.insert((Key::F(6), Modifiers::NONE), NavCommand::SlotToggle);

        bindings.insert((Key::Space, Modifiers::NONE), NavCommand::TimePause);
        bindings.insert((Key::Char('='), Modifiers::NONE), NavCommand::TimeFaster);
        bindings.insert((Key::Char('-'), Modifiers::NONE), NavCommand::TimeSlower);
        for speed in 1..=5u8 {
            let digit = char::from(b'0' + speed);
            bindings.insert(
                (Key::Char(digit), Modifiers::NONE),
                NavCommand::TimeSetSpeed(speed),
            );
        }

        for letter in 'a'..='z' {
            bindings.insert(
                (Key::Char(letter), Modifiers::NONE),
                NavCommand::LetterJump(letter),
            );
        }

        Self { bindings }
    }

    /// Resolves a key chord to its command.
    #[must_use]
    pub fn resolve(&self, key: Key, modifiers: Modifiers) -> Option<NavCommand> {
        self.bindings.get(&(key, modifiers)).copied()
    }

    /// Adds or overrides a binding.
    pub fn bind(&mut self, key: Key, modifiers: Modifiers, command: NavCommand) {
        self.bindings.insert((key, modifiers), command);
    }

    /// Removes a binding.
    pub fn unbind(&mut self, key: Key, modifiers: Modifiers) {
        self.bindings.remove(&(key, modifiers));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Parses a keymap file and applies it over the defaults.
    ///
    /// # Errors
    ///
    /// TOML syntax errors, unknown key names, or unknown modifier names.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let file: KeymapFile = toml::from_str(text)?;
        let mut keymap = Self::default_bindings();
        for binding in file.bindings {
            let key = Key::parse(&binding.key)
                .ok_or_else(|| NavError::Config(format!("unknown key {:?}", binding.key)))?;
            let modifiers = Modifiers::parse(&binding.modifiers).ok_or_else(|| {
                NavError::Config(format!("unknown modifiers {:?}", binding.modifiers))
            })?;
            keymap.bind(key, modifiers, binding.command);
        }
        Ok(keymap)
    }

    /// Loads a keymap file from disk, applied over the defaults.
    ///
    /// # Errors
    ///
    /// IO failures and the same parse errors as
    /// [`from_toml_str`](Self::from_toml_str).
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::default_bindings()
    }
}
