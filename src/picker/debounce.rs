use std::time::{Duration, Instant};

/// A single resettable deadline.
///
/// Every call to [`Debouncer::schedule`] replaces the pending deadline, so a
/// burst of events yields exactly one firing once the burst goes quiet.
#[derive(Debug, Clone)]
pub(crate) struct Debouncer {
    wait: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub(crate) fn new(wait: Duration) -> Self {
        Self {
            wait,
            deadline: None,
        }
    }

    pub(crate) fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now + self.wait);
    }

    pub(crate) fn cancel(&mut self) {
        self.deadline = None;
    }

    pub(crate) fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub(crate) fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Consume the deadline if it has passed.
    pub(crate) fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rescheduling_pushes_the_deadline_back() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(300));
        debouncer.schedule(start);
        debouncer.schedule(start + Duration::from_millis(200));

        assert!(!debouncer.fire(start + Duration::from_millis(300)));
        assert!(debouncer.fire(start + Duration::from_millis(500)));
        assert!(!debouncer.fire(start + Duration::from_millis(900)));
    }

    #[test]
    fn cancel_drops_the_pending_deadline() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(10));
        debouncer.schedule(start);
        debouncer.cancel();
        assert!(!debouncer.is_pending());
        assert!(!debouncer.fire(start + Duration::from_secs(1)));
    }
}
