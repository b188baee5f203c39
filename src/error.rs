use thiserror::Error;

/// Failures reported by sampling and generation routines.
///
/// Both kinds are local input-validation failures detected at the point of
/// computation. Callers should treat "no path" as a valid state rather than
/// a fatal condition.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A caller-supplied argument is outside the accepted domain.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// A direction required for frame construction is unusable: zero-length,
    /// or parallel to the global up axis. Surfaced explicitly instead of
    /// letting NaN propagate through normalization.
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(&'static str),
}
