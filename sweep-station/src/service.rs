use crate::error::StationError;
use crate::sensor::RangeSensor;
use crate::servo::{Axis, ServoDrive};
use sweep_data::MeasurementOutcome;

/// Move, then read: one complete measurement at one orientation.
pub struct MeasurementService {
    servos: Box<dyn ServoDrive>,
    sensor: Box<dyn RangeSensor>,
}

impl MeasurementService {
    pub fn new(servos: Box<dyn ServoDrive>, sensor: Box<dyn RangeSensor>) -> Self {
        MeasurementService { servos, sensor }
    }

    /// Drives both axes to the target orientation and takes one reading.
    /// Bytes buffered before the move completed belong to the previous
    /// orientation and are dropped before the read.
    pub fn measure_at(&mut self, theta: f64, phi: f64) -> Result<MeasurementOutcome, StationError> {
        self.servos.rotate(Axis::Theta, theta)?;
        self.servos.rotate(Axis::Phi, phi)?;
        self.sensor.drain()?;
        self.sensor.acquire()
    }
}
