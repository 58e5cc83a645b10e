//! Actions representing side effects to be executed by the embedding layer.
//!
//! The command handler is pure with respect to the outside world: it mutates
//! navigation state and returns a sequence of [`Action`]s. The embedding
//! layer (the driver, or a host shim) executes them in order — speech goes
//! to the screen-reader sink, commands go to the host dispatcher. This is
//! the boundary between state transitions and effects.

use crate::domain::CommandToken;

/// A side effect requested by the command handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Speak text through the screen-reader sink.
    Speak {
        text: String,
        /// `true` cancels any in-flight utterance; `false` queues after it.
        interrupt: bool,
    },

    /// Execute an opaque host command via the external dispatcher.
    ///
    /// The dispatcher's outcome decides the follow-up speech; the handler
    /// stays silent about the position so the action's own feedback is not
    /// talked over.
    Dispatch(CommandToken),
}

impl Action {
    /// An interrupting utterance — the default for cursor movement, where
    /// stale speech is worse than clipped speech.
    #[must_use]
    pub fn say(text: impl Into<String>) -> Self {
        Self::Speak {
            text: text.into(),
            interrupt: true,
        }
    }

    /// A queued utterance, spoken after whatever is in flight.
    #[must_use]
    pub fn say_queued(text: impl Into<String>) -> Self {
        Self::Speak {
            text: text.into(),
            interrupt: false,
        }
    }
}
