use lti_core::Snapshot;

/// An accepted RK4 step, as seen by an observer.
///
/// Intermediate stages are never reported; `step == 0` is the initial snapshot.
#[derive(Debug, Clone)]
pub struct Event<I, O> {
    pub step: usize,

    /// Time elapsed since the initial snapshot, `step * dt`.
    pub elapsed: f64,

    pub snapshot: Snapshot<I, O>,
}
