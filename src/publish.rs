//! Debounced publisher
//!
//! Watches the draft store and pushes its value to the host's write port
//! after a quiet period, coalescing a burst of rapid edits into a single
//! write. The committed value therefore lags the draft by at most the
//! debounce window during active editing, and equals it once editing has
//! been quiescent for that window.
//!
//! The widget runs on the UI thread with no timer facility of its own, so
//! the "scheduled commit" is a deadline checked by a per-frame `poll` rather
//! than a background timer. At most one pending commit exists at a time;
//! each edit cancels the previous one before scheduling a new one.

use crate::host::WritePort;
use log::{debug, trace};
use std::time::{Duration, Instant};

/// Default quiet period before an edit burst is committed.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

// ─────────────────────────────────────────────────────────────────────────────
// Clock Abstraction
// ─────────────────────────────────────────────────────────────────────────────

/// Time source for deadline checks. Injected so the debounce properties are
/// testable without sleeping.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// The real wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Debounced Publisher
// ─────────────────────────────────────────────────────────────────────────────

/// The single live scheduled commit.
#[derive(Debug, Clone)]
struct PendingCommit {
    due_at: Instant,
    value: String,
}

/// Debounced write-back from the draft store to the host.
///
/// Dropping the publisher drops any pending commit without flushing it:
/// edits made within the final debounce window before teardown are lost, an
/// accepted trade-off. Hosts that want commit-on-teardown call
/// [`DebouncedPublisher::flush`] first.
#[derive(Debug)]
pub struct DebouncedPublisher<C: Clock = SystemClock> {
    window: Duration,
    pending: Option<PendingCommit>,
    clock: C,
}

impl DebouncedPublisher<SystemClock> {
    /// Publisher over the system clock.
    pub fn new(window: Duration) -> Self {
        Self::with_clock(window, SystemClock)
    }
}

impl<C: Clock> DebouncedPublisher<C> {
    /// Publisher over an explicit clock.
    pub fn with_clock(window: Duration, clock: C) -> Self {
        Self {
            window,
            pending: None,
            clock,
        }
    }

    /// Record an edit: cancel the pending commit, schedule a new one
    /// `window` in the future carrying `value`.
    pub fn note_edit(&mut self, value: String) {
        let due_at = self.clock.now() + self.window;
        if self.pending.is_some() {
            trace!("pending commit rescheduled");
        }
        self.pending = Some(PendingCommit { due_at, value });
    }

    /// Whether a commit is scheduled and not yet fired.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Fire the pending commit if its deadline has passed.
    ///
    /// Call once per frame. Returns whether a commit was written.
    pub fn poll(&mut self, sink: &mut dyn WritePort) -> bool {
        let due = self
            .pending
            .as_ref()
            .is_some_and(|p| self.clock.now() >= p.due_at);
        if !due {
            return false;
        }
        if let Some(commit) = self.pending.take() {
            debug!("debounced commit ({} bytes)", commit.value.len());
            sink.set(commit.value);
        }
        true
    }

    /// Commit the pending value immediately, bypassing the deadline.
    ///
    /// Returns whether anything was pending. For hosts that want
    /// commit-on-teardown instead of the default cancel semantics.
    pub fn flush(&mut self, sink: &mut dyn WritePort) -> bool {
        match self.pending.take() {
            Some(commit) => {
                debug!("pending commit flushed");
                sink.set(commit.value);
                true
            }
            None => false,
        }
    }

    /// Drop the pending commit without writing it.
    pub fn cancel(&mut self) {
        if self.pending.take().is_some() {
            debug!("pending commit cancelled");
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Manually advanced clock.
    #[derive(Clone)]
    struct MockClock(Rc<Cell<Instant>>);

    impl MockClock {
        fn start() -> Self {
            Self(Rc::new(Cell::new(Instant::now())))
        }

        fn advance(&self, ms: u64) {
            self.0.set(self.0.get() + Duration::from_millis(ms));
        }
    }

    impl Clock for MockClock {
        fn now(&self) -> Instant {
            self.0.get()
        }
    }

    /// Write port that records every commit.
    #[derive(Default)]
    struct RecordingSink(Vec<String>);

    impl WritePort for RecordingSink {
        fn set(&mut self, value: String) {
            self.0.push(value);
        }
    }

    fn publisher(clock: &MockClock) -> DebouncedPublisher<MockClock> {
        DebouncedPublisher::with_clock(DEFAULT_DEBOUNCE, clock.clone())
    }

    #[test]
    fn test_burst_coalesces_to_one_commit() {
        // Edits at t, t+50, t+100 produce exactly one commit, at
        // >= t+400, carrying the value as of t+100.
        let clock = MockClock::start();
        let mut publisher = publisher(&clock);
        let mut sink = RecordingSink::default();

        publisher.note_edit("a".to_string());
        clock.advance(50);
        assert!(!publisher.poll(&mut sink));
        publisher.note_edit("ab".to_string());
        clock.advance(50);
        assert!(!publisher.poll(&mut sink));
        publisher.note_edit("abc".to_string());

        // t+399: the last edit's window has not yet elapsed
        clock.advance(299);
        assert!(!publisher.poll(&mut sink));
        assert!(sink.0.is_empty());

        // t+400: exactly one commit with the final value
        clock.advance(1);
        assert!(publisher.poll(&mut sink));
        assert_eq!(sink.0, vec!["abc".to_string()]);

        // no further commits
        clock.advance(1000);
        assert!(!publisher.poll(&mut sink));
        assert_eq!(sink.0.len(), 1);
    }

    #[test]
    fn test_single_edit_commits_after_window() {
        // A lone edit at t commits exactly once at t+300
        let clock = MockClock::start();
        let mut publisher = publisher(&clock);
        let mut sink = RecordingSink::default();

        publisher.note_edit("hello".to_string());
        clock.advance(299);
        assert!(!publisher.poll(&mut sink));
        clock.advance(1);
        assert!(publisher.poll(&mut sink));
        assert_eq!(sink.0, vec!["hello".to_string()]);
        assert!(!publisher.is_pending());
    }

    #[test]
    fn test_cancel_drops_pending_without_commit() {
        let clock = MockClock::start();
        let mut publisher = publisher(&clock);
        let mut sink = RecordingSink::default();

        publisher.note_edit("lost".to_string());
        publisher.cancel();
        clock.advance(1000);
        assert!(!publisher.poll(&mut sink));
        assert!(sink.0.is_empty());
    }

    #[test]
    fn test_flush_commits_immediately() {
        let clock = MockClock::start();
        let mut publisher = publisher(&clock);
        let mut sink = RecordingSink::default();

        assert!(!publisher.flush(&mut sink));

        publisher.note_edit("now".to_string());
        assert!(publisher.flush(&mut sink));
        assert_eq!(sink.0, vec!["now".to_string()]);
        assert!(!publisher.is_pending());
    }

    #[test]
    fn test_drop_within_window_loses_edit() {
        let clock = MockClock::start();
        let mut sink = RecordingSink::default();
        {
            let mut publisher = publisher(&clock);
            publisher.note_edit("lost on teardown".to_string());
        }
        clock.advance(1000);
        assert!(sink.0.is_empty());
        let _ = &mut sink;
    }
}
