//! Deterministic clock for tests.

use crispy_types::{Clock, Timestamp};
use std::cell::Cell;

/// Manually driven time.
///
/// Share it with a chain through `Rc<NullClock>` and keep the other handle
/// to move time between transactions.
pub struct NullClock {
    secs: Cell<u64>,
}

impl NullClock {
    pub fn new(initial_secs: u64) -> Self {
        Self {
            secs: Cell::new(initial_secs),
        }
    }

    pub fn now(&self) -> Timestamp {
        Timestamp::new(self.secs.get())
    }

    /// Saturates at `u64::MAX`.
    pub fn advance(&self, secs: u64) {
        self.secs.set(self.secs.get().saturating_add(secs));
    }

    pub fn set(&self, secs: u64) {
        self.secs.set(secs);
    }

    pub fn set_to(&self, at: Timestamp) {
        self.set(at.as_secs());
    }
}

impl Clock for NullClock {
    fn now(&self) -> Timestamp {
        NullClock::now(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn moves_only_when_told() {
        let clock = NullClock::new(1_000);
        assert_eq!(clock.now(), clock.now());
        clock.advance(5);
        assert_eq!(clock.now(), Timestamp::new(1_005));
        clock.set(10);
        assert_eq!(clock.now(), Timestamp::new(10));
        clock.set_to(Timestamp::new(77));
        assert_eq!(clock.now(), Timestamp::new(77));
    }

    #[test]
    fn advance_saturates() {
        let clock = NullClock::new(u64::MAX - 1);
        clock.advance(10);
        assert_eq!(clock.now(), Timestamp::new(u64::MAX));
    }

    #[test]
    fn shared_handle_sees_the_same_time() {
        let clock = Rc::new(NullClock::new(0));
        let handle: Rc<dyn Clock> = clock.clone();
        clock.advance(30);
        assert_eq!(handle.now(), Timestamp::new(30));
    }
}
