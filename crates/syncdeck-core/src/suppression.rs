/// Blocks time-driven paging for a short window after manual navigation.
///
/// Every engagement bumps an epoch. The scheduled release carries the epoch it
/// was issued for and only clears the flag if no newer engagement happened in
/// the meantime, so the window always ends one full period after the most
/// recent manual navigation.
#[derive(Debug, Clone, Default)]
pub struct SuppressionGuard {
    active: bool,
    epoch: u64,
}

impl SuppressionGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise the flag and return the epoch the matching release must carry.
    pub fn engage(&mut self) -> u64 {
        self.epoch = self.epoch.wrapping_add(1);
        self.active = true;
        self.epoch
    }

    /// Clear the flag if `epoch` is still the latest engagement.
    pub fn release(&mut self, epoch: u64) -> bool {
        if self.active && epoch == self.epoch {
            self.active = false;
            true
        } else {
            false
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }
}
