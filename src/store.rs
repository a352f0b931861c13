//! The measurement store: raw batches in, validated windows and per-axis
//! statistics out.

use std::collections::HashSet;
use std::sync::mpsc;

use crate::data::model::{self, Axis, AxisResult, RawMeasurement};
use crate::data::source::DataSource;
use crate::error::{StatsError, ValidationError};
use crate::stats;

/// Window size applied after every successful load.
pub const DEFAULT_WINDOW: usize = 20;

// ---------------------------------------------------------------------------
// Observable properties
// ---------------------------------------------------------------------------

/// The store's observable fields, named for change subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreProperty {
    SourceId,
    IsLoaded,
    ErrorText,
    WindowSize,
    AxisResults,
}

// ---------------------------------------------------------------------------
// MeasurementStore
// ---------------------------------------------------------------------------

/// Owns the raw measurement batch and everything derived from it.
///
/// All work runs synchronously on the caller's thread. Consumers read the
/// current state through the accessors and may subscribe to per-property
/// change notifications.
pub struct MeasurementStore<S> {
    source: S,

    /// The batch the source returned on the most recent load attempt,
    /// valid or not.
    raw: Option<Vec<RawMeasurement>>,

    source_id: String,
    is_loaded: bool,
    /// Human-readable failure reason, empty when the last load succeeded.
    error_text: String,
    /// Effective window size. Zero until the first successful load.
    window_size: usize,
    /// Exactly one entry per axis, or empty.
    results: Vec<AxisResult>,

    subscribers: Vec<mpsc::Sender<StoreProperty>>,
}

impl<S: DataSource> MeasurementStore<S> {
    pub fn new(source: S) -> Self {
        MeasurementStore {
            source,
            raw: None,
            source_id: String::new(),
            is_loaded: false,
            error_text: String::new(),
            window_size: 0,
            results: Vec::new(),
            subscribers: Vec::new(),
        }
    }

    // -- Accessors --

    pub fn source_id(&self) -> &str {
        &self.source_id
    }

    pub fn is_loaded(&self) -> bool {
        self.is_loaded
    }

    pub fn error_text(&self) -> &str {
        &self.error_text
    }

    /// Effective window size. Zero until the first successful load.
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// The published per-axis results: one entry per axis after a
    /// successful computation, empty otherwise.
    pub fn axis_results(&self) -> &[AxisResult] {
        &self.results
    }

    /// Subscribe to property-change notifications. Dropping the receiver
    /// ends the subscription.
    pub fn subscribe(&mut self) -> mpsc::Receiver<StoreProperty> {
        let (sender, receiver) = mpsc::channel();
        self.subscribers.push(sender);
        receiver
    }

    /// Live subscriptions, as of the most recent notification.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    // -- Operations --

    /// Fetch a batch from the source, validate it, and on success derive
    /// fresh per-axis results over the default window.
    ///
    /// On failure the derived results are cleared, the failing source id
    /// is retained for display, and the error text carries the reason.
    /// The raw batch always becomes whatever the source just returned,
    /// even when validation rejects it.
    pub fn load_from_source(&mut self, source_id: &str) -> Result<(), ValidationError> {
        log::info!("Loading measurements from {source_id}");

        let fetched = self.source.fetch(source_id);
        self.set_error_text(String::new());

        let outcome = validate(fetched.as_deref());
        let count = fetched.as_ref().map_or(0, Vec::len);
        self.raw = fetched;

        if let Err(reason) = outcome {
            self.set_error_text(reason.to_string());
        }
        self.set_is_loaded(outcome.is_ok());
        self.set_source_id(source_id.to_string());

        match outcome {
            Err(reason) => {
                log::error!("Rejected measurements from {source_id}: {reason}");
                self.clear_results();
                Err(reason)
            }
            Ok(()) => {
                log::info!("Accepted {count} measurements from {source_id}");
                self.set_window_size(DEFAULT_WINDOW);
                self.rebuild_results();
                Ok(())
            }
        }
    }

    /// Re-derive the per-axis results over a requested window size,
    /// clamped to what the loaded batch supports: values at or below the
    /// minimum sample snap to the minimum, values above the available
    /// count snap to the count.
    pub fn recalculate_statistics(&mut self, requested: usize) {
        let Some(raw) = &self.raw else {
            log::warn!("No measurements loaded, nothing to recalculate");
            return;
        };

        let clamped = if requested <= stats::MIN_SAMPLE {
            stats::MIN_SAMPLE
        } else {
            requested.min(raw.len())
        };
        self.set_window_size(clamped);
        self.rebuild_results();
    }

    // -- Derivation --

    /// Recompute the full result collection for the current window.
    ///
    /// Either all three axes are published as one new collection, or the
    /// previous collection is cleared when the engine rejects any axis.
    /// Partial results are never visible.
    fn rebuild_results(&mut self) {
        let windowed = match &self.raw {
            Some(raw) => window_by_lowest_ids(raw, self.window_size),
            None => {
                self.clear_results();
                return;
            }
        };

        let mut fresh = Vec::with_capacity(Axis::ALL.len());
        for axis in Axis::ALL {
            match axis_result(&windowed, axis) {
                Ok(result) => fresh.push(result),
                Err(err) => {
                    log::error!("Statistics failed for axis {axis}: {err}");
                    self.clear_results();
                    return;
                }
            }
        }

        self.results = fresh;
        self.notify(StoreProperty::AxisResults);
        log::info!(
            "Calculations completed over a window of {} points",
            windowed.len()
        );
    }

    // -- Property setters, notify only on change --

    fn set_source_id(&mut self, value: String) {
        if self.source_id != value {
            self.source_id = value;
            self.notify(StoreProperty::SourceId);
        }
    }

    fn set_is_loaded(&mut self, value: bool) {
        if self.is_loaded != value {
            self.is_loaded = value;
            self.notify(StoreProperty::IsLoaded);
        }
    }

    fn set_error_text(&mut self, value: String) {
        if self.error_text != value {
            self.error_text = value;
            self.notify(StoreProperty::ErrorText);
        }
    }

    fn set_window_size(&mut self, value: usize) {
        if self.window_size != value {
            self.window_size = value;
            self.notify(StoreProperty::WindowSize);
        }
    }

    /// Drop the published results, notifying only when something was
    /// actually cleared.
    fn clear_results(&mut self) {
        if !self.results.is_empty() {
            self.results.clear();
            self.notify(StoreProperty::AxisResults);
        }
    }

    fn notify(&mut self, property: StoreProperty) {
        self.subscribers
            .retain(|subscriber| subscriber.send(property).is_ok());
    }
}

// ---------------------------------------------------------------------------
// Validation and windowing
// ---------------------------------------------------------------------------

/// Validation order is fixed: format, then duplicate ids, then size.
/// Only the first failure is reported.
fn validate(records: Option<&[RawMeasurement]>) -> Result<(), ValidationError> {
    let Some(records) = records else {
        return Err(ValidationError::WrongFormat);
    };
    let distinct: HashSet<i64> = records.iter().map(|r| r.id).collect();
    if distinct.len() != records.len() {
        return Err(ValidationError::DuplicateIds);
    }
    if records.len() < stats::MIN_SAMPLE {
        return Err(ValidationError::TooFewMeasurements);
    }
    Ok(())
}

/// The `window` records with the smallest ids, in ascending id order.
/// Asking for more than is available yields everything.
fn window_by_lowest_ids(records: &[RawMeasurement], window: usize) -> Vec<RawMeasurement> {
    let mut sorted = records.to_vec();
    sorted.sort_by_key(|r| r.id);
    sorted.truncate(window);
    sorted
}

/// Run the per-axis pipeline over the windowed records: fences, slope,
/// trend, max variation, then outliers against the fences.
fn axis_result(windowed: &[RawMeasurement], axis: Axis) -> Result<AxisResult, StatsError> {
    let series = model::axis_series(windowed, axis);
    let values = model::series_values(&series);

    let quartiles = stats::median_and_fences(&values)?;
    log::debug!(
        "Axis {axis}: median {:.3}, fences [{:.3}, {:.3}]",
        quartiles.median,
        quartiles.lower_fence,
        quartiles.upper_fence
    );

    let slope = stats::slope(&series)?;
    let trend = stats::classify_trend(slope);
    log::debug!("Axis {axis}: slope {slope:.3} classified as {trend}");

    let max_variation = stats::max_variation(&values)?;
    let outliers = stats::outliers(&series, quartiles.upper_fence, quartiles.lower_fence);
    log::debug!(
        "Axis {axis}: max variation {max_variation:.3}, {} outliers",
        outliers.len()
    );

    Ok(AxisResult {
        axis,
        series,
        stats: quartiles,
        max_variation,
        outliers,
        trend,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
