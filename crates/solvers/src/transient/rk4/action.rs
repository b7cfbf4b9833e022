/// What an observer may ask the RK4 solver to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// End the run and return the snapshots accepted so far.
    StopEarly,
}
