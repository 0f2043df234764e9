use i2cdev::linux::LinuxI2CError;
use std::error::Error;
use std::fmt::Display;
use std::{fmt, io};

#[derive(Debug)]
pub enum StationError {
    AngleOutOfRange(f64),
    SensorTimeout(),
    Serial(serialport::Error),
    I2c(LinuxI2CError),
    Json(serde_json::Error),
    Io(io::Error),
}

impl fmt::Display for StationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StationError::AngleOutOfRange(angle) => write!(
                f,
                "Servo angles must be between 0 and 160 degrees. Requested {}.",
                angle
            ),
            StationError::SensorTimeout() => write!(f, "Timed out waiting for sensor data"),
            StationError::Serial(err) => Display::fmt(&err, f),
            StationError::I2c(err) => Display::fmt(&err, f),
            StationError::Json(err) => Display::fmt(&err, f),
            StationError::Io(err) => Display::fmt(&err, f),
        }
    }
}

impl Error for StationError {}

impl From<io::Error> for StationError {
    fn from(err: io::Error) -> Self {
        StationError::Io(err)
    }
}
impl From<serialport::Error> for StationError {
    fn from(err: serialport::Error) -> Self {
        StationError::Serial(err)
    }
}
impl From<LinuxI2CError> for StationError {
    fn from(err: LinuxI2CError) -> Self {
        StationError::I2c(err)
    }
}
impl From<serde_json::Error> for StationError {
    fn from(err: serde_json::Error) -> Self {
        StationError::Json(err)
    }
}
