use lti_core::Snapshot;

/// Why an RK4 run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Every requested step was taken.
    Complete,

    /// The observer returned [`Action::StopEarly`](super::Action::StopEarly).
    StoppedByObserver,
}

/// Accepted snapshots from an RK4 run.
///
/// `history[0]` is the initial snapshot and `history[n]` follows `n` steps,
/// so a complete run over `steps` steps holds `steps + 1` snapshots.
#[derive(Debug, Clone)]
pub struct Solution<I, O> {
    pub status: Status,
    pub history: Vec<Snapshot<I, O>>,
    /// Steps actually taken, which is fewer than requested if stopped early.
    pub steps: usize,
}

impl<I, O> Solution<I, O> {
    /// Model outputs in step order, starting with the initial output.
    pub fn outputs(&self) -> impl Iterator<Item = &O> {
        self.history.iter().map(|snapshot| &snapshot.output)
    }

    /// The last accepted snapshot.
    #[must_use]
    pub fn last(&self) -> Option<&Snapshot<I, O>> {
        self.history.last()
    }
}
