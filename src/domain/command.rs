//! Opaque command tokens and the dispatcher boundary.
//!
//! The navigation core never executes side effects itself. An activatable
//! entry carries a [`CommandToken`], the engine hands the token back to the
//! caller on activation, and an external [`CommandDispatcher`] supplied by
//! the host integration layer executes it. This keeps the core free of
//! host-type dependencies and makes every action testable as a value.

use serde::{Deserialize, Serialize};

/// An opaque, host-defined command.
///
/// Tokens are plain strings by convention namespaced as `"verb"` or
/// `"verb target"` (e.g. `"councilor.recruit 3"`, `"time.pause"`,
/// `"ui.click save-button"`). The core never inspects them beyond logging.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommandToken(String);

impl CommandToken {
    /// Creates a token from a verb.
    #[must_use]
    pub fn new(verb: impl Into<String>) -> Self {
        Self(verb.into())
    }

    /// Creates a token from a verb and a target argument.
    #[must_use]
    pub fn with_target(verb: &str, target: &str) -> Self {
        Self(format!("{verb} {target}"))
    }

    /// The raw token text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CommandToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result of executing a command token against the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The host accepted the command.
    ///
    /// Carries an optional confirmation to speak ("Recruited Anna Mercier").
    /// `None` means the action owns its own feedback and the engine stays
    /// silent.
    Done(Option<String>),

    /// The host rejected the command.
    ///
    /// The reason is spoken verbatim so the user is never left guessing why
    /// nothing happened.
    Rejected(String),
}

/// Executes command tokens against the host.
///
/// Implemented by the integration layer; the engine only sees the returned
/// [`DispatchOutcome`] and never inspects host internals further. Actions are
/// fire-and-forget: there is no retry policy, a failed action simply requires
/// the user to try again or choose differently.
pub trait CommandDispatcher {
    /// Executes a single command token.
    fn dispatch(&mut self, token: &CommandToken) -> DispatchOutcome;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_target_joins_verb_and_target() {
        let token = CommandToken::with_target("councilor.recruit", "3");
        assert_eq!(token.as_str(), "councilor.recruit 3");
    }

    #[test]
    fn token_serde_is_transparent() {
        let token = CommandToken::new("time.pause");
        let json = serde_json::to_string(&token).unwrap();
        assert_eq!(json, "\"time.pause\"");
        let decoded: CommandToken = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, token);
    }
}
