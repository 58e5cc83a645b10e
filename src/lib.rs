//! Saynav: a speech-first navigation engine for driving a game UI by keyboard.
//!
//! Saynav is the core of an accessibility layer for a strategy game: it
//! exposes the game's UI state — screens, items, detail sections, actions —
//! as speech through a screen-reader sink, and lets a non-visual user drive
//! the game entirely from the keyboard by walking a tree of
//! Screens → Items → Sections → SectionItems, with two auxiliary traversal
//! modes (a slot cursor over live UI elements, and grid selection for
//! priority matrices).
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Host integration shim (game mod / test harness)    │  ← owns the frame loop
//! └─────────────────────────────────────────────────────┘
//!                        │ once per frame
//! ┌─────────────────────────────────────────────────────┐
//! │  Driver (driver.rs)                                 │  ← edge detection
//! │  - keymap resolution                                │  ← chain routing
//! │  - action execution, post-dispatch resync           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Engine        │   │ Slot cursor   │   │ Input layer   │
//! │ (engine/)     │   │ (slots/)      │   │ (input/)      │
//! │ - tree cursor │   │ - containers  │   │ - edges       │
//! │ - overlays    │   │ - children    │   │ - keymap      │
//! │ - handler     │   │ - flat mode   │   │ - chain       │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Screen contract & domain (screens/, grid/, domain/)│
//! │  - Screen trait over an explicit host context       │
//! │  - Section model, single-slot cache                 │
//! │  - command tokens, error types                      │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Outbound capabilities                              │
//! │  - SpeechSink: speak(text, interrupt)               │
//! │  - CommandDispatcher: dispatch(token)               │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Boundaries
//!
//! The host game never appears as a type in this crate. Screens read host
//! data through an explicit context handle supplied by the integration
//! layer, side effects travel as opaque [`CommandToken`]s executed by an
//! external dispatcher, and speech is one opaque `speak(text, interrupt)`
//! capability. This keeps the whole engine testable without a live host.
//!
//! # Example
//!
//! ```
//! use saynav::screens::{Screen, StaticItem, StaticScreen};
//! use saynav::speech::RecordingSink;
//! use saynav::{
//!     CommandDispatcher, CommandToken, Config, DispatchOutcome, FrameInput, Key, Modifiers,
//!     NoSurface, ReviewDriver,
//! };
//! use std::time::Duration;
//!
//! struct Host;
//! impl CommandDispatcher for Host {
//!     fn dispatch(&mut self, _token: &CommandToken) -> DispatchOutcome {
//!         DispatchOutcome::Done(None)
//!     }
//! }
//!
//! let screens: Vec<Box<dyn Screen<()>>> = vec![Box::new(
//!     StaticScreen::new("Fleets", "Your fleets").item(StaticItem::new("First Fleet")),
//! )];
//! let mut driver = ReviewDriver::new(&Config::default(), screens);
//! let mut sink = RecordingSink::new();
//! let mut host = Host;
//!
//! driver.frame(
//!     &(),
//!     &NoSurface,
//!     FrameInput {
//!         pressed: &[(Key::Enter, Modifiers::NONE)],
//!         now: Duration::ZERO,
//!         menu_active: false,
//!     },
//!     &mut sink,
//!     &mut host,
//! );
//! assert_eq!(sink.last(), Some("Fleets. 1 item"));
//! ```

pub mod domain;
pub mod driver;
pub mod engine;
pub mod grid;
pub mod input;
pub mod observability;
pub mod screens;
pub mod slots;
pub mod speech;

pub use domain::{CommandDispatcher, CommandToken, DispatchOutcome, NavError, Result};
pub use driver::{FrameInput, ReviewDriver};
pub use engine::{handle_command, Action, DrillOutcome, NavLevel, NavigationState, ReviewState};
pub use input::{Key, Keymap, Modifiers, NavCommand};
pub use screens::{Capabilities, Screen, Section, SectionItem};
pub use slots::{NoSurface, SlotCursor, UiSurface};
pub use speech::{Announcer, SpeechSink};

use std::collections::BTreeMap;

/// How much position context announcements carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Just the line itself ("Second Fleet").
    Terse,
    /// Line plus position ("Second Fleet. 2 of 7").
    Verbose,
}

/// Engine configuration, parsed from the host's preference map.
///
/// Mod loaders hand plugins a flat string map; [`Config::from_prefs`]
/// extracts typed values with per-field fallback defaults, so a malformed
/// preference degrades to the default instead of failing the load.
#[derive(Debug, Clone)]
pub struct Config {
    /// Announcement verbosity. Default: [`Verbosity::Verbose`].
    pub verbosity: Verbosity,

    /// Duplicate-announcement suppression window in milliseconds.
    ///
    /// Default: 200. Covers hosts that refire hover/focus events several
    /// times per interaction.
    pub debounce_ms: u64,

    /// Path to a TOML keymap file applied over the default bindings.
    pub keymap_file: Option<String>,

    /// Tracing level filter ("trace", "debug", "info", "warn", "error").
    /// Default: `"info"`.
    pub log_level: Option<String>,

    /// Directory for the log file. No directory means no logging.
    pub log_dir: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            verbosity: Verbosity::Verbose,
            debounce_ms: 200,
            keymap_file: None,
            log_level: None,
            log_dir: None,
        }
    }
}

impl Config {
    /// Parses configuration from the host's key-value preference map.
    ///
    /// Recognized keys: `verbosity` ("terse"/"verbose"), `debounce_ms`,
    /// `keymap_file`, `log_level`, `log_dir`. Unknown keys are ignored;
    /// unparseable values fall back to defaults.
    #[must_use]
    pub fn from_prefs(prefs: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        let verbosity = match prefs.get("verbosity").map(String::as_str) {
            Some("terse") => Verbosity::Terse,
            Some("verbose") => Verbosity::Verbose,
            _ => defaults.verbosity,
        };
        let debounce_ms = prefs
            .get("debounce_ms")
            .and_then(|value| value.parse().ok())
            .unwrap_or(defaults.debounce_ms);
        Self {
            verbosity,
            debounce_ms,
            keymap_file: prefs.get("keymap_file").cloned(),
            log_level: prefs.get("log_level").cloned(),
            log_dir: prefs.get("log_dir").cloned(),
        }
    }
}
