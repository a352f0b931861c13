//! Error types for measurement validation and the statistics engine.

use crate::stats::MIN_SAMPLE;

/// Reasons a batch of raw measurements is rejected before any statistics run.
///
/// The display strings double as the user-facing error text published by the
/// store, so keep them readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The source could not produce a well-formed batch (missing file,
    /// unreadable content, or a shape that does not parse).
    #[error("wrong data file format")]
    WrongFormat,

    /// Two or more records share a measurement id.
    #[error("the input data contains duplicate measurement identifiers")]
    DuplicateIds,

    /// Fewer records than the smallest window the quartile scheme supports.
    #[error("the input data contains not enough measurements")]
    TooFewMeasurements,
}

/// Failures inside the statistics engine itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StatsError {
    /// Quartiles are undefined below the minimum sample size.
    #[error("quartile statistics need at least {min} values, got {0}", min = MIN_SAMPLE)]
    InsufficientData(usize),

    /// Slope and variation are undefined over an empty series.
    #[error("cannot compute statistics over an empty series")]
    EmptyInput,

    /// Every point shares the same id, so the slope denominator is zero.
    #[error("all points share one measurement id, slope is undefined")]
    DegenerateInput,
}
