use thiserror::Error;

/// Why a single performance metric could not be computed.
///
/// These are soft failures: a metric that is unavailable never prevents the
/// other metrics from being reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MetricUnavailable {
    #[error("response has no samples")]
    EmptyResponse,

    #[error("response has no finite samples")]
    NonFiniteResponse,

    #[error("final value is zero")]
    ZeroFinalValue,

    #[error("response never exceeds its final value")]
    NoOvershoot,

    #[error("nearest band crossing occurs before the peak")]
    BeforePeak,

    #[error("settling time is unbounded without damping")]
    ZeroDamping,
}
