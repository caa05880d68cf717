//! Custom data sources for system monitor themes.
//!
//! A custom data source exposes one external metric (hardware, a log file,
//! an HTTP endpoint) as a numeric value for graphs and radial bars, a
//! formatted string for text widgets, and a short history for line plots.

pub mod config;
pub mod error;
pub mod history;
pub mod reading;
pub mod sources;

pub use config::Config;
pub use error::{Result, SensorError};
pub use history::History;
pub use reading::{poll, Numeric, Reading};
pub use sources::SourceKind;

/// Trait for all custom data sources.
///
/// Every source implements all three views. A view a source cannot provide
/// is reported as `None` rather than left empty, so the host can tell
/// "no value by design" apart from a failed fetch.
pub trait CustomDataSource: Send {
    /// Returns the registry name of this source.
    fn name(&self) -> &str;

    /// Fetches the current value.
    ///
    /// Returns `Ok(None)` when the source has no numeric value. Fetch
    /// failures are logged by the source and returned as `Err`; the source
    /// keeps whatever state it needs so that `as_string` still renders.
    fn as_numeric(&mut self) -> Result<Option<f64>>;

    /// Returns the display string for the last fetched value.
    ///
    /// Values whose width varies are padded to a fixed width so that a
    /// shorter value fully overwrites a longer one on the display.
    fn as_string(&self) -> String;

    /// Returns the most recent values for line graphs, oldest first.
    fn last_values(&self) -> Option<&[f64]>;
}

/// Placeholder rendered in place of a value that is not a number.
pub(crate) const PLACEHOLDER: &str = "--";
