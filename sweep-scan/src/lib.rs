mod error;
mod plan;
mod record;
mod source;
mod sweep;

pub use crate::error::ClientError;
pub use crate::plan::ScanBounds;
pub use crate::record::write_records;
pub use crate::source::{fetch_measurement, MeasurementSource, MockSource, NetworkedSource};
pub use crate::sweep::{run_sweep, NullProgress, ProgressSink, Sweep};
