pub mod coords;
pub mod measurement;
pub mod wire;

pub use coords::{to_display_angle, to_display_angles, CartesianPoint, SphericalPoint};
pub use measurement::{Measurement, MeasurementOutcome, ScanTarget};
pub use wire::Response;
