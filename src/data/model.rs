use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// RawMeasurement – one record of the measurement file
// ---------------------------------------------------------------------------

/// A single raw measurement: one id and one reading per spatial axis.
///
/// Field names follow the on-disk JSON shape (`Id`, `X`, `Y`, `Z`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawMeasurement {
    /// Measurement identifier, unique within a batch.
    pub id: i64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl RawMeasurement {
    /// The reading for one axis of this record.
    pub fn component(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }
}

// ---------------------------------------------------------------------------
// Axis – the three measured coordinates
// ---------------------------------------------------------------------------

/// One of the three measured coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// All axes in presentation order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Stable position of this axis in the published result collection.
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn name(&self) -> &'static str {
        match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ---------------------------------------------------------------------------
// DataPoint – one (id, value) pair of a per-axis series
// ---------------------------------------------------------------------------

/// One point of a per-axis series: the record id and that axis' reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DataPoint {
    pub id: i64,
    pub value: f64,
}

impl DataPoint {
    pub fn new(id: i64, value: f64) -> Self {
        DataPoint { id, value }
    }
}

impl fmt::Display for DataPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {:.4})", self.id, self.value)
    }
}

// ---------------------------------------------------------------------------
// QuartileStats – median and outlier fences of one series
// ---------------------------------------------------------------------------

/// Median and Tukey-style outlier fences of one per-axis series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuartileStats {
    pub median: f64,
    /// Third quartile plus 1.5 times the interquartile range.
    pub upper_fence: f64,
    /// First quartile minus 1.5 times the interquartile range.
    pub lower_fence: f64,
}

// ---------------------------------------------------------------------------
// Trend – direction of the fitted slope
// ---------------------------------------------------------------------------

/// Direction of the least-squares slope of value against id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Flat,
    Positive,
    Negative,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Trend::Flat => "flat",
            Trend::Positive => "positive",
            Trend::Negative => "negative",
        };
        write!(f, "{label}")
    }
}

// ---------------------------------------------------------------------------
// AxisResult – everything the pipeline derives for one axis
// ---------------------------------------------------------------------------

/// The complete derived state for one axis over the current window.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisResult {
    pub axis: Axis,
    /// The windowed series the remaining fields were computed from,
    /// ordered by ascending id.
    pub series: Vec<DataPoint>,
    pub stats: QuartileStats,
    /// Spread of the series: maximum value minus minimum value.
    pub max_variation: f64,
    /// Points outside the fences, in series order.
    pub outliers: Vec<DataPoint>,
    pub trend: Trend,
}

impl AxisResult {
    /// Number of points in the windowed series.
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// Whether the windowed series is empty.
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Series extraction
// ---------------------------------------------------------------------------

/// Project one axis out of a batch of raw measurements, keeping record order.
pub fn axis_series(records: &[RawMeasurement], axis: Axis) -> Vec<DataPoint> {
    records
        .iter()
        .map(|r| DataPoint::new(r.id, r.component(axis)))
        .collect()
}

/// Plain values of a series, in series order.
pub fn series_values(series: &[DataPoint]) -> Vec<f64> {
    series.iter().map(|p| p.value).collect()
}
