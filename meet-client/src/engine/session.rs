/// Counts call attempts. Work started for one attempt holds its number and
/// stops once a hangup or a newer start has moved past it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SessionEpoch(u64);

impl SessionEpoch {
    /// Begins a new attempt and returns its number.
    pub fn advance(&mut self) -> u64 {
        self.0 += 1;
        self.0
    }

    pub fn is_current(&self, epoch: u64) -> bool {
        self.0 == epoch
    }
}
