/// Data layer: the measurement record model and the sources it comes from.
///
/// Architecture:
/// ```text
///  measurement .json
///        │
///        ▼
///   ┌──────────┐
///   │  source   │  fetch(id) → Vec<RawMeasurement> | absent
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ RawMeasurement│  one id, one reading per axis
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  store    │  validate, window, derive AxisResults
///   └──────────┘
/// ```

pub mod model;
pub mod source;
