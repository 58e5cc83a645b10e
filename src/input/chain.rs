//! Explicit priority chain for command routing.
//!
//! Several handlers can plausibly claim the same logical command: the
//! pre-game menu walker, the slot cursor, the review-mode engine, and the
//! global time controls. Rather than inferring precedence from scattered
//! conditionals, the chain is an ordered list where each handler declares
//! the command set it claims; the first claimant wins and shadows the rest.
//!
//! The fixed default order: menu (only while the pre-game menu is active),
//! slot cursor (only while enabled, except its own toggle), review
//! navigation, and time controls last — so time commands work at any
//! navigation depth, and the number row selects menu entries while the menu
//! is open but sets game speed everywhere else.

use crate::input::command::NavCommand;

/// The handlers a command can be routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerId {
    /// Pre-game menu walker (over the live menu surface).
    Menu,
    /// Slot cursor over live UI elements.
    Slots,
    /// The review-mode navigation engine.
    Review,
    /// Global time controls, dispatched straight to the host.
    TimeControl,
}

/// Per-frame facts the routing decision depends on.
#[derive(Debug, Clone, Copy, Default)]
pub struct RouteContext {
    /// Whether the host's pre-game menu is active.
    pub menu_active: bool,
    /// Whether the slot cursor is currently enabled.
    pub slots_active: bool,
}

/// Ordered handler chain.
#[derive(Debug)]
pub struct HandlerChain {
    order: Vec<HandlerId>,
}

impl Default for HandlerChain {
    fn default() -> Self {
        Self {
            order: vec![
                HandlerId::Menu,
                HandlerId::Slots,
                HandlerId::Review,
                HandlerId::TimeControl,
            ],
        }
    }
}

impl HandlerChain {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Routes a command to the first handler that claims it, or `None` when
    /// nothing does.
    #[must_use]
    pub fn route(&self, command: NavCommand, ctx: RouteContext) -> Option<HandlerId> {
        self.order
            .iter()
            .copied()
            .find(|id| claims(*id, command, ctx))
    }
}

fn claims(id: HandlerId, command: NavCommand, ctx: RouteContext) -> bool {
    match id {
        HandlerId::Menu => {
            ctx.menu_active
                && matches!(
                    command,
                    NavCommand::MoveUp
                        | NavCommand::MoveDown
                        | NavCommand::MoveLeft
                        | NavCommand::MoveRight
                        | NavCommand::Activate
                        | NavCommand::Cancel
                        | NavCommand::ReadDetail
                        | NavCommand::ListAll
                        | NavCommand::TimeSetSpeed(_)
                )
        }
        HandlerId::Slots => {
            matches!(command, NavCommand::SlotToggle)
                || (ctx.slots_active
                    && matches!(
                        command,
                        NavCommand::MoveUp
                            | NavCommand::MoveDown
                            | NavCommand::MoveLeft
                            | NavCommand::MoveRight
                            | NavCommand::Activate
                            | NavCommand::Cancel
                            | NavCommand::ReadDetail
                    ))
        }
        HandlerId::Review => !command.is_time_control() && command != NavCommand::SlotToggle,
        HandlerId::TimeControl => command.is_time_control(),
    }
}
