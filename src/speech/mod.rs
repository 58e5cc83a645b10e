//! Speech output: the sink contract and the debouncing announcer.
//!
//! The screen-reader bridge is an opaque external capability: one
//! `speak(text, interrupt)` call, nothing else. The engine never depends on
//! the sink's internal behavior beyond that contract. [`Announcer`] sits in
//! front of the sink and suppresses duplicate announcements inside a short
//! window, because hosts love refiring hover/focus events and a flood of
//! identical utterances makes speech unusable.

use std::time::Duration;

/// The screen-reader bridge.
///
/// `interrupt = true` cancels any in-flight utterance; `false` queues after
/// it.
pub trait SpeechSink {
    fn speak(&mut self, text: &str, interrupt: bool);
}

/// A sink that discards everything. Useful while the host is muting output.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl SpeechSink for NullSink {
    fn speak(&mut self, _text: &str, _interrupt: bool) {}
}

/// A sink that records utterances, for tests and embedding diagnostics.
#[derive(Debug, Default)]
pub struct RecordingSink {
    /// Spoken text with its interrupt flag, in order.
    pub utterances: Vec<(String, bool)>,
}

impl RecordingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent utterance text, if any.
    #[must_use]
    pub fn last(&self) -> Option<&str> {
        self.utterances.last().map(|(text, _)| text.as_str())
    }
}

impl SpeechSink for RecordingSink {
    fn speak(&mut self, text: &str, interrupt: bool) {
        self.utterances.push((text.to_string(), interrupt));
    }
}

/// Debouncing front-end to a [`SpeechSink`].
///
/// Time comes from the host as a monotonically non-decreasing frame
/// timestamp, so the window is deterministic under test and no wall clock is
/// read inside the engine.
#[derive(Debug)]
pub struct Announcer {
    window: Duration,
    last: Option<(String, Duration)>,
}

impl Announcer {
    /// Creates an announcer suppressing identical repeats within `window`.
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self { window, last: None }
    }

    /// Speaks unless the identical text was already spoken within the
    /// window. Returns whether the sink was invoked.
    pub fn announce(
        &mut self,
        sink: &mut dyn SpeechSink,
        text: &str,
        interrupt: bool,
        now: Duration,
    ) -> bool {
        if let Some((previous, at)) = &self.last {
            if previous == text && now.saturating_sub(*at) < self.window {
                tracing::trace!(text, "duplicate announcement suppressed");
                return false;
            }
        }
        sink.speak(text, interrupt);
        self.last = Some((text.to_string(), now));
        true
    }

    /// Forgets the last utterance so the next announcement always speaks.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn duplicate_inside_window_is_suppressed() {
        let mut announcer = Announcer::new(ms(200));
        let mut sink = RecordingSink::new();
        assert!(announcer.announce(&mut sink, "Save button", true, ms(0)));
        assert!(!announcer.announce(&mut sink, "Save button", true, ms(100)));
        assert_eq!(sink.utterances.len(), 1);
    }

    #[test]
    fn duplicate_after_window_speaks_again() {
        let mut announcer = Announcer::new(ms(200));
        let mut sink = RecordingSink::new();
        announcer.announce(&mut sink, "Save button", true, ms(0));
        assert!(announcer.announce(&mut sink, "Save button", true, ms(250)));
        assert_eq!(sink.utterances.len(), 2);
    }

    #[test]
    fn different_text_is_never_suppressed() {
        let mut announcer = Announcer::new(ms(200));
        let mut sink = RecordingSink::new();
        announcer.announce(&mut sink, "Save button", true, ms(0));
        assert!(announcer.announce(&mut sink, "Cancel button", true, ms(10)));
    }

    #[test]
    fn reset_forgets_the_last_utterance() {
        let mut announcer = Announcer::new(ms(200));
        let mut sink = RecordingSink::new();
        announcer.announce(&mut sink, "Save button", true, ms(0));
        announcer.reset();
        assert!(announcer.announce(&mut sink, "Save button", true, ms(10)));
    }

    #[test]
    fn interrupt_flag_reaches_the_sink() {
        let mut announcer = Announcer::new(ms(200));
        let mut sink = RecordingSink::new();
        announcer.announce(&mut sink, "queued", false, ms(0));
        assert_eq!(sink.utterances[0], ("queued".to_string(), false));
    }
}
