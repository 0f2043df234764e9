mod constants;
mod error;
mod frame;
mod pwm;
mod sensor;
mod server;
mod service;
mod servo;
mod time;

pub use crate::error::StationError;
pub use crate::pwm::{I2cPwmBus, PwmBus};
pub use crate::sensor::{MockRangeSensor, RangeSensor, SerialRangeSensor};
pub use crate::server::serve;
pub use crate::service::MeasurementService;
pub use crate::servo::{Axis, MockServoDrive, ServoController, ServoDrive};
