use serde::{Deserialize, Serialize};

/// One orientation of the pan/tilt head, in degrees.
///
/// The serialized form is the request body sent to the measurement station.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScanTarget {
    /// Tilt angle in degrees.
    pub theta: f64,
    /// Pan angle in degrees.
    pub phi: f64,
}

/// One reading reported by the range sensor.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Distance to the target in cm.
    pub distance: f64,
    /// Return strength of the laser pulse.
    pub strength: f64,
    /// Sensor chip temperature in degrees Celsius.
    pub temperature: f64,
}

/// Outcome of a single measurement attempt.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MeasurementOutcome {
    /// The sensor produced a trustworthy reading.
    Measured(Measurement),
    /// The frame arrived corrupted. Asking again may succeed.
    ChecksumInvalid,
    /// The frame was intact but the return strength was below the trusted
    /// threshold. Asking again may succeed.
    WeakSignal,
    /// No reading could be obtained for this orientation. Terminal.
    Unavailable,
}
