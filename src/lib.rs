//! Statistics and validation core for a 3-axis measurement trend viewer.
//!
//! A [`MeasurementStore`] pulls batches of raw `(id, x, y, z)` records
//! through a [`DataSource`], validates them (readable shape, unique ids,
//! minimum size), windows them to the lowest ids, and derives per-axis
//! quartile fences, outliers, max variation and a least-squares trend.
//!
//! ```no_run
//! use trendview_core::{JsonFileSource, MeasurementStore};
//!
//! let mut store = MeasurementStore::new(JsonFileSource);
//! if store.load_from_source("measurements.json").is_ok() {
//!     for result in store.axis_results() {
//!         println!(
//!             "{}: median {:.3}, trend {}",
//!             result.axis, result.stats.median, result.trend
//!         );
//!     }
//! }
//!
//! // Narrow the view to the seven earliest measurements.
//! store.recalculate_statistics(7);
//! ```

pub mod data;
pub mod error;
pub mod stats;
pub mod store;

pub use data::model::{Axis, AxisResult, DataPoint, QuartileStats, RawMeasurement, Trend};
pub use data::source::{DataSource, JsonFileSource};
pub use error::{StatsError, ValidationError};
pub use store::{MeasurementStore, StoreProperty, DEFAULT_WINDOW};
