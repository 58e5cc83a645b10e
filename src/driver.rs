//! The per-frame driver wiring input, engine, slots, speech, and dispatch.
//!
//! The host integration layer owns exactly one [`ReviewDriver`] and calls
//! [`frame`](ReviewDriver::frame) once per animation frame with the current
//! held-key snapshot, the active visual surface, the host context, and the
//! two outbound capabilities (speech sink, command dispatcher). Everything
//! else — edge detection, keymap resolution, handler-chain routing, action
//! execution, post-dispatch resync — happens in here.
//!
//! Single-threaded by design: all state is owned by the one calling thread,
//! there is no background work, and the only "suspension" is the implicit
//! wait between frames while the host renders.

use std::time::Duration;

use crate::domain::{CommandDispatcher, CommandToken, DispatchOutcome};
use crate::engine::{after_dispatch, handle_command, Action, ReviewState};
use crate::input::{
    EdgeDetector, HandlerChain, HandlerId, Key, Keymap, Modifiers, NavCommand, RouteContext,
};
use crate::screens::Screen;
use crate::slots::{SlotCursor, UiSurface};
use crate::speech::{Announcer, SpeechSink};
use crate::Config;

/// Everything the host supplies for one frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameInput<'a> {
    /// Keys currently held down, with modifiers.
    pub pressed: &'a [(Key, Modifiers)],
    /// Monotonically non-decreasing frame timestamp.
    pub now: Duration,
    /// Whether the host's pre-game menu is active.
    pub menu_active: bool,
}

/// The top-level engine object owned by the host integration layer.
pub struct ReviewDriver<H> {
    screens: Vec<Box<dyn Screen<H>>>,
    state: ReviewState,
    slots: SlotCursor,
    edges: EdgeDetector,
    keymap: Keymap,
    chain: HandlerChain,
    announcer: Announcer,
}

impl<H> ReviewDriver<H> {
    /// Builds a driver from configuration and the fixed screen set.
    ///
    /// A configured keymap file that fails to load falls back to the default
    /// bindings with a log entry; a broken keymap must never cost the user
    /// their keyboard.
    pub fn new(config: &Config, screens: Vec<Box<dyn Screen<H>>>) -> Self {
        let keymap = match &config.keymap_file {
            Some(path) => Keymap::load(path).unwrap_or_else(|error| {
                tracing::warn!(path = %path, %error, "failed to load keymap, using defaults");
                Keymap::default_bindings()
            }),
            None => Keymap::default_bindings(),
        };
        Self {
            screens,
            state: ReviewState::new(config.verbosity),
            slots: SlotCursor::new(),
            edges: EdgeDetector::new(),
            keymap,
            chain: HandlerChain::new(),
            announcer: Announcer::new(Duration::from_millis(config.debounce_ms)),
        }
    }

    #[must_use]
    pub fn state(&self) -> &ReviewState {
        &self.state
    }

    #[must_use]
    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    /// Processes one frame: edge detection, routing, action execution.
    pub fn frame(
        &mut self,
        ctx: &H,
        surface: &dyn UiSurface,
        input: FrameInput<'_>,
        sink: &mut dyn SpeechSink,
        dispatcher: &mut dyn CommandDispatcher,
    ) {
        if self.slots.enabled() || input.menu_active {
            self.slots.sync(surface);
        }

        for (key, modifiers) in self.edges.edges(input.pressed) {
            let Some(command) = self.resolve(key, modifiers) else {
                continue;
            };
            let route = self.chain.route(
                command,
                RouteContext {
                    menu_active: input.menu_active,
                    slots_active: self.slots.enabled(),
                },
            );
            let actions = match route {
                Some(HandlerId::Menu | HandlerId::Slots) => self.slot_actions(command, surface),
                Some(HandlerId::Review) => {
                    handle_command(&mut self.state, &mut self.screens, ctx, command)
                }
                Some(HandlerId::TimeControl) => time_actions(command),
                None => vec![],
            };
            self.execute(actions, ctx, sink, dispatcher, input.now);
        }
    }

    /// Resolves a key chord, giving an open search first claim on printable
    /// characters so typing does not trigger letter jumps.
    fn resolve(&self, key: Key, modifiers: Modifiers) -> Option<NavCommand> {
        if self.state.is_searching() && modifiers == Modifiers::NONE {
            match key {
                Key::Char(c) => return Some(NavCommand::Char(c)),
                Key::Space => return Some(NavCommand::Char(' ')),
                _ => {}
            }
        }
        self.keymap.resolve(key, modifiers)
    }

    fn execute(
        &mut self,
        actions: Vec<Action>,
        ctx: &H,
        sink: &mut dyn SpeechSink,
        dispatcher: &mut dyn CommandDispatcher,
        now: Duration,
    ) {
        for action in actions {
            match action {
                Action::Speak { text, interrupt } => {
                    self.announcer.announce(sink, &text, interrupt, now);
                }
                Action::Dispatch(token) => {
                    tracing::debug!(%token, "dispatching host command");
                    match dispatcher.dispatch(&token) {
                        DispatchOutcome::Done(Some(message)) => {
                            self.announcer.announce(sink, &message, true, now);
                        }
                        DispatchOutcome::Done(None) => {}
                        DispatchOutcome::Rejected(reason) => {
                            tracing::debug!(%token, reason = %reason, "host rejected command");
                            self.announcer.announce(sink, &reason, true, now);
                        }
                    }
                    // The action may have mutated host state.
                    let follow = after_dispatch(&mut self.state, &mut self.screens, ctx);
                    for action in follow {
                        if let Action::Speak { text, interrupt } = action {
                            self.announcer.announce(sink, &text, interrupt, now);
                        }
                    }
                }
            }
        }
    }

    /// Handles commands claimed by the slot cursor or the menu walker.
    ///
    /// The pre-game menu is walked with the same cursor over the menu
    /// surface; the number row jumps straight to the nth entry there.
    fn slot_actions(&mut self, command: NavCommand, surface: &dyn UiSurface) -> Vec<Action> {
        match command {
            NavCommand::SlotToggle => {
                if self.slots.toggle() {
                    self.slots.invalidate();
                    self.slots.sync(surface);
                    vec![Action::say(format!(
                        "Slot cursor on. {}",
                        self.slots.spoken_current()
                    ))]
                } else {
                    vec![Action::say("Slot cursor off")]
                }
            }
            NavCommand::MoveDown => {
                self.slots.move_next();
                vec![Action::say(self.slots.spoken_current())]
            }
            NavCommand::MoveUp => {
                self.slots.move_previous();
                vec![Action::say(self.slots.spoken_current())]
            }
            NavCommand::MoveRight => {
                if self.slots.drill_down() {
                    vec![Action::say(self.slots.spoken_current())]
                } else {
                    vec![]
                }
            }
            NavCommand::MoveLeft => {
                if self.slots.back_out() {
                    vec![Action::say(self.slots.spoken_current())]
                } else {
                    vec![]
                }
            }
            NavCommand::Activate => {
                if let Some(token) = self.slots.activate() {
                    vec![Action::Dispatch(token)]
                } else if self.slots.drill_down() {
                    vec![Action::say(self.slots.spoken_current())]
                } else {
                    vec![]
                }
            }
            NavCommand::Cancel => {
                if self.slots.back_out() {
                    vec![Action::say(self.slots.spoken_current())]
                } else if self.slots.enabled() {
                    self.slots.toggle();
                    vec![Action::say("Slot cursor off")]
                } else {
                    // Menu mode: closing the menu is the host's business.
                    vec![]
                }
            }
            NavCommand::ReadDetail => {
                vec![Action::say(self.slots.read_detail(surface))]
            }
            NavCommand::ListAll => {
                vec![Action::say(self.slots.spoken_overview())]
            }
            NavCommand::TimeSetSpeed(n) => {
                if self.slots.jump_to(usize::from(n).saturating_sub(1)) {
                    vec![Action::say(self.slots.spoken_current())]
                } else {
                    vec![]
                }
            }
            _ => vec![],
        }
    }
}

fn time_actions(command: NavCommand) -> Vec<Action> {
    let token = match command {
        NavCommand::TimePause => CommandToken::new("time.pause"),
        NavCommand::TimeFaster => CommandToken::new("time.faster"),
        NavCommand::TimeSlower => CommandToken::new("time.slower"),
        NavCommand::TimeSetSpeed(speed) => {
            CommandToken::with_target("time.speed", &speed.to_string())
        }
        _ => return vec![],
    };
    vec![Action::Dispatch(token)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screens::{StaticItem, StaticScreen};
    use crate::slots::NoSurface;
    use crate::speech::RecordingSink;

    struct OkDispatcher {
        tokens: Vec<CommandToken>,
    }

    impl CommandDispatcher for OkDispatcher {
        fn dispatch(&mut self, token: &CommandToken) -> DispatchOutcome {
            self.tokens.push(token.clone());
            DispatchOutcome::Done(None)
        }
    }

    fn driver() -> ReviewDriver<()> {
        let screens: Vec<Box<dyn Screen<()>>> = vec![Box::new(
            StaticScreen::new("Fleets", "Your fleets")
                .item(StaticItem::new("First Fleet"))
                .item(StaticItem::new("Second Fleet")),
        )];
        ReviewDriver::new(&Config::default(), screens)
    }

    fn press(
        driver: &mut ReviewDriver<()>,
        sink: &mut RecordingSink,
        dispatcher: &mut OkDispatcher,
        keys: &[(Key, Modifiers)],
        at_ms: u64,
    ) {
        driver.frame(
            &(),
            &NoSurface,
            FrameInput {
                pressed: keys,
                now: Duration::from_millis(at_ms),
                menu_active: false,
            },
            sink,
            dispatcher,
        );
    }

    #[test]
    fn held_key_does_not_repeat_across_frames() {
        let mut driver = driver();
        let mut sink = RecordingSink::new();
        let mut dispatcher = OkDispatcher { tokens: vec![] };
        let down = [(Key::Down, Modifiers::NONE)];
        press(&mut driver, &mut sink, &mut dispatcher, &down, 0);
        press(&mut driver, &mut sink, &mut dispatcher, &down, 16);
        press(&mut driver, &mut sink, &mut dispatcher, &down, 32);
        assert_eq!(sink.utterances.len(), 1);
    }

    #[test]
    fn time_controls_dispatch_regardless_of_depth() {
        let mut driver = driver();
        let mut sink = RecordingSink::new();
        let mut dispatcher = OkDispatcher { tokens: vec![] };
        press(
            &mut driver,
            &mut sink,
            &mut dispatcher,
            &[(Key::Space, Modifiers::NONE)],
            0,
        );
        assert_eq!(dispatcher.tokens, vec![CommandToken::new("time.pause")]);
    }

    #[test]
    fn number_row_sets_speed_outside_the_menu() {
        let mut driver = driver();
        let mut sink = RecordingSink::new();
        let mut dispatcher = OkDispatcher { tokens: vec![] };
        press(
            &mut driver,
            &mut sink,
            &mut dispatcher,
            &[(Key::Char('3'), Modifiers::NONE)],
            0,
        );
        assert_eq!(dispatcher.tokens, vec![CommandToken::new("time.speed 3")]);
    }

    #[test]
    fn walkthrough_speaks_screen_then_item() {
        let mut driver = driver();
        let mut sink = RecordingSink::new();
        let mut dispatcher = OkDispatcher { tokens: vec![] };
        press(
            &mut driver,
            &mut sink,
            &mut dispatcher,
            &[(Key::Enter, Modifiers::NONE)],
            0,
        );
        press(&mut driver, &mut sink, &mut dispatcher, &[], 16);
        press(
            &mut driver,
            &mut sink,
            &mut dispatcher,
            &[(Key::Down, Modifiers::NONE)],
            32,
        );
        let texts: Vec<&str> = sink
            .utterances
            .iter()
            .map(|(text, _)| text.as_str())
            .collect();
        assert_eq!(texts, ["Fleets. 2 items", "Second Fleet. 2 of 2"]);
    }

    #[test]
    fn slot_toggle_announces_even_without_elements() {
        let mut driver = driver();
        let mut sink = RecordingSink::new();
        let mut dispatcher = OkDispatcher { tokens: vec![] };
        press(
            &mut driver,
            &mut sink,
            &mut dispatcher,
            &[(Key::F(6), Modifiers::NONE)],
            0,
        );
        assert_eq!(sink.last(), Some("Slot cursor on. No elements"));
    }
}
