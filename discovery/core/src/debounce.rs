//! Input Debouncing
//!
//! A single-slot, replace-on-write timer. Every input change replaces the
//! pending value and pushes the deadline out by the full quiet period; only
//! the value that survives a whole quiet period is ever emitted.
//!
//! The debouncer is driven by the caller's clock rather than its own task, so
//! it can live inside an event loop (`sleep_until(deadline)`) and be tested
//! without waiting on real time.

use std::time::Duration;

use tokio::time::Instant;

/// Debounced view of a changing value
#[derive(Clone, Debug)]
pub struct Debouncer<T> {
    /// Required stable time before emitting
    quiet_period: Duration,
    /// Most recent raw input
    latest: T,
    /// Last emitted value
    current: T,
    /// When `latest` becomes eligible for emission
    deadline: Option<Instant>,
}

impl<T: Clone + PartialEq> Debouncer<T> {
    /// Create a debouncer whose raw and emitted values both start at `initial`
    pub fn new(initial: T, quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            latest: initial.clone(),
            current: initial,
            deadline: None,
        }
    }

    /// Record a new raw value observed at `now`
    ///
    /// Restarts the quiet period. Re-entering the value already pending is
    /// not a change and leaves the deadline alone.
    pub fn input(&mut self, value: T, now: Instant) {
        if value == self.latest {
            return;
        }
        self.latest = value;
        self.deadline = Some(now + self.quiet_period);
    }

    /// Emit the settled value if the quiet period has elapsed by `now`
    ///
    /// Returns `Some` at most once per settled value, and only when it
    /// differs from the previously emitted one.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                if self.latest == self.current {
                    None
                } else {
                    self.current = self.latest.clone();
                    Some(self.current.clone())
                }
            }
            _ => None,
        }
    }

    /// When the pending value will settle, if one is pending
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Last emitted value
    #[must_use]
    pub fn current(&self) -> &T {
        &self.current
    }

    /// Configured quiet period
    #[must_use]
    pub fn quiet_period(&self) -> Duration {
        self.quiet_period
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUIET: Duration = Duration::from_millis(700);

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_nothing_emitted_before_first_quiet_period() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(String::new(), QUIET);
        assert_eq!(debouncer.current(), "");
        assert_eq!(debouncer.poll(start + ms(5000)), None);

        debouncer.input("a".to_string(), start);
        assert_eq!(debouncer.poll(start + ms(699)), None);
        assert_eq!(debouncer.current(), "");
        assert_eq!(debouncer.poll(start + ms(700)), Some("a".to_string()));
    }

    #[test]
    fn test_typing_emits_only_final_value() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(String::new(), QUIET);
        let mut emitted = Vec::new();

        // "Inception" typed over 400ms, polled every 10ms for 2s
        let word = "Inception";
        let mut t = 0;
        while t <= 2000 {
            if t % 50 == 0 && (t / 50) < word.len() as u64 {
                let end = (t / 50) as usize + 1;
                debouncer.input(word[..end].to_string(), start + ms(t));
            }
            if let Some(value) = debouncer.poll(start + ms(t)) {
                emitted.push((t, value));
            }
            t += 10;
        }

        // Last keystroke at 400ms, emission at 1100ms
        assert_eq!(emitted, vec![(1100, "Inception".to_string())]);
    }

    #[test]
    fn test_each_input_restarts_deadline() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(0u32, QUIET);

        debouncer.input(1, start);
        assert_eq!(debouncer.deadline(), Some(start + QUIET));
        debouncer.input(2, start + ms(600));
        assert_eq!(debouncer.deadline(), Some(start + ms(1300)));

        assert_eq!(debouncer.poll(start + ms(800)), None);
        assert_eq!(debouncer.poll(start + ms(1300)), Some(2));
        assert_eq!(debouncer.deadline(), None);
    }

    #[test]
    fn test_same_value_does_not_restart() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(String::new(), QUIET);

        debouncer.input("x".to_string(), start);
        debouncer.input("x".to_string(), start + ms(500));
        assert_eq!(debouncer.deadline(), Some(start + QUIET));
    }

    #[test]
    fn test_returning_to_current_value_emits_nothing() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(String::new(), QUIET);

        debouncer.input("b".to_string(), start);
        debouncer.input(String::new(), start + ms(100));
        assert_eq!(debouncer.poll(start + ms(2000)), None);
        assert_eq!(debouncer.deadline(), None);
        assert_eq!(debouncer.current(), "");
    }

    #[test]
    fn test_emits_once_per_settled_value() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(String::new(), QUIET);

        debouncer.input("dune".to_string(), start);
        assert!(debouncer.poll(start + ms(700)).is_some());
        assert_eq!(debouncer.poll(start + ms(1400)), None);
    }

    #[test]
    fn test_relaxed_quiet_period() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(String::new(), Duration::from_secs(1));
        debouncer.input("heat".to_string(), start);
        assert_eq!(debouncer.poll(start + ms(999)), None);
        assert_eq!(debouncer.poll(start + ms(1000)), Some("heat".to_string()));
        assert_eq!(debouncer.quiet_period(), Duration::from_secs(1));
    }
}
