//! Pure statistics over per-axis measurement series.
//!
//! Everything here is stateless: quartile fences, outlier filtering, max
//! variation, least-squares slope and trend classification. The store in
//! [`crate::store`] wires these together per axis.

use crate::data::model::{DataPoint, QuartileStats, Trend};
use crate::error::StatsError;

/// Smallest sample the quartile scheme accepts, and the floor for the
/// store's window size.
pub const MIN_SAMPLE: usize = 7;

/// Slopes within this distance of zero classify as flat.
pub const TREND_TOLERANCE: f64 = 1e-4;

const FENCE_MULTIPLIER: f64 = 1.5;

// ---------------------------------------------------------------------------
// Quartiles and fences
// ---------------------------------------------------------------------------

/// Median and outlier fences of a value sequence.
///
/// The partition is not the textbook quartile method: the lower half for
/// Q1 is the first `mid - 1` sorted elements, the upper half for Q3 runs
/// from `mid` to the end, and each half takes its median keyed on the
/// parity of the half's own midpoint index rather than its length.
/// Published fence values depend on this exact scheme.
pub fn median_and_fences(values: &[f64]) -> Result<QuartileStats, StatsError> {
    if values.len() < MIN_SAMPLE {
        return Err(StatsError::InsufficientData(values.len()));
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let n = sorted.len();
    let mid = n / 2;
    let median = if n % 2 != 0 {
        sorted[mid]
    } else {
        (sorted[mid] + sorted[mid - 1]) / 2.0
    };

    let q1 = half_median(&sorted[..mid - 1]);
    let q3 = half_median(&sorted[mid..]);
    let iqr = q3 - q1;

    Ok(QuartileStats {
        median,
        upper_fence: q3 + FENCE_MULTIPLIER * iqr,
        lower_fence: q1 - FENCE_MULTIPLIER * iqr,
    })
}

/// Median of one sorted half, keyed on the parity of its midpoint index.
///
/// With at least [`MIN_SAMPLE`] values overall, both halves have a
/// midpoint of at least 1, so the even branch never underflows.
fn half_median(half: &[f64]) -> f64 {
    let mid = half.len() / 2;
    if mid % 2 != 0 {
        half[mid]
    } else {
        (half[mid] + half[mid - 1]) / 2.0
    }
}

// ---------------------------------------------------------------------------
// Outliers and variation
// ---------------------------------------------------------------------------

/// Points strictly outside the fences, in series order.
pub fn outliers(series: &[DataPoint], upper_fence: f64, lower_fence: f64) -> Vec<DataPoint> {
    series
        .iter()
        .copied()
        .filter(|p| p.value < lower_fence || p.value > upper_fence)
        .collect()
}

/// Spread of a value sequence: `|min - max|`.
pub fn max_variation(values: &[f64]) -> Result<f64, StatsError> {
    if values.is_empty() {
        return Err(StatsError::EmptyInput);
    }
    let min = values.iter().fold(f64::INFINITY, |acc, &v| acc.min(v));
    let max = values.iter().fold(f64::NEG_INFINITY, |acc, &v| acc.max(v));
    Ok((min - max).abs())
}

// ---------------------------------------------------------------------------
// Slope and trend
// ---------------------------------------------------------------------------

/// Ordinary least-squares slope of value against id.
pub fn slope(series: &[DataPoint]) -> Result<f64, StatsError> {
    if series.is_empty() {
        return Err(StatsError::EmptyInput);
    }
    let n = series.len() as f64;
    let mean_id = series.iter().map(|p| p.id as f64).sum::<f64>() / n;
    let mean_value = series.iter().map(|p| p.value).sum::<f64>() / n;

    let mut numerator = 0.0;
    let mut denominator = 0.0;
    for p in series {
        let dx = p.id as f64 - mean_id;
        numerator += dx * (p.value - mean_value);
        denominator += dx * dx;
    }
    if denominator == 0.0 {
        return Err(StatsError::DegenerateInput);
    }
    Ok(numerator / denominator)
}

/// Classify a slope, treating the tolerance band around zero as flat.
/// Slopes exactly at the boundary are flat.
pub fn classify_trend(slope: f64) -> Trend {
    if slope > TREND_TOLERANCE {
        Trend::Positive
    } else if slope < -TREND_TOLERANCE {
        Trend::Negative
    } else {
        Trend::Flat
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
