/// A render that has been requested and not yet reported back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct InFlight {
    generation: u64,
    page: u32,
}

/// Hands out render generations and remembers the newest outstanding one.
///
/// Any completion carrying a generation older than the last one issued is
/// stale: a newer request exists and its result is what should end up on
/// screen.
#[derive(Debug, Clone, Default)]
pub(crate) struct RenderTracker {
    issued: u64,
    pending: Option<InFlight>,
}

impl RenderTracker {
    pub(crate) fn request(&mut self, page: u32) -> u64 {
        self.issued = self.issued.wrapping_add(1);
        self.pending = Some(InFlight {
            generation: self.issued,
            page,
        });
        self.issued
    }

    pub(crate) fn is_stale(&self, generation: u64) -> bool {
        generation < self.issued
    }

    /// Mark `generation` as finished, successfully or not.
    pub(crate) fn settle(&mut self, generation: u64) {
        if self.pending.is_some_and(|p| p.generation == generation) {
            self.pending = None;
        }
    }

    /// Target page of the newest outstanding render.
    pub(crate) fn pending_page(&self) -> Option<u32> {
        self.pending.map(|p| p.page)
    }

    pub(crate) fn latest_generation(&self) -> u64 {
        self.issued
    }
}

#[cfg(test)]
mod tests {
    use super::RenderTracker;

    #[test]
    fn older_generations_are_stale() {
        let mut tracker = RenderTracker::default();
        let first = tracker.request(2);
        let second = tracker.request(3);
        assert!(tracker.is_stale(first));
        assert!(!tracker.is_stale(second));
        assert_eq!(tracker.pending_page(), Some(3));
    }

    #[test]
    fn settling_an_old_generation_keeps_newest_pending() {
        let mut tracker = RenderTracker::default();
        let first = tracker.request(2);
        let second = tracker.request(3);
        tracker.settle(first);
        assert_eq!(tracker.pending_page(), Some(3));
        tracker.settle(second);
        assert_eq!(tracker.pending_page(), None);
        assert_eq!(tracker.latest_generation(), second);
    }
}
