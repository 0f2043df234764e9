use crate::constants::{
    FRAME_HEADER_BYTE, FRAME_HEADER_SIZE, FRAME_PAYLOAD_SIZE, FRAME_SIZE, N_READ_TRIALS,
    SENSOR_BAUD_RATE,
};
use crate::error::StationError;
use crate::frame::{decode, is_frame_header};
use crate::time::sleep_ms;
use serialport::{ClearBuffer, SerialPort};
use std::io::Read;
use std::time::Duration;
use sweep_data::{Measurement, MeasurementOutcome};

/// Range sensor backends. Sensors are owned by the serving thread, hence
/// `Send`.
pub trait RangeSensor: Send {
    /// Drops any buffered sensor I/O so the next frame read is current.
    fn drain(&mut self) -> Result<(), StationError>;
    /// Reads and decodes one frame from the sensor.
    fn acquire(&mut self) -> Result<MeasurementOutcome, StationError>;
}

/// TFmini-style range sensor streaming frames over a serial port.
pub struct SerialRangeSensor {
    port: Box<dyn SerialPort>,
}

impl SerialRangeSensor {
    pub fn open(port_name: &str) -> Result<Self, StationError> {
        let port = serialport::new(port_name, SENSOR_BAUD_RATE)
            .timeout(Duration::from_millis(10))
            .open()?;
        Ok(SerialRangeSensor { port })
    }

    pub fn from_port(port: Box<dyn SerialPort>) -> Self {
        SerialRangeSensor { port }
    }
}

fn get_n_read(port: &mut Box<dyn SerialPort>) -> Result<usize, StationError> {
    let n_read: u32 = port.bytes_to_read()?;
    Ok(n_read as usize)
}

fn read(port: &mut Box<dyn SerialPort>, data_size: usize) -> Result<Vec<u8>, StationError> {
    assert!(data_size > 0);
    for _ in 0..N_READ_TRIALS {
        let n_read: usize = get_n_read(port)?;

        if n_read < data_size {
            sleep_ms(10);
            continue;
        }

        let mut data: Vec<u8> = vec![0; data_size];
        if let Err(e) = port.read(data.as_mut_slice()) {
            return Err(StationError::Io(e));
        }
        return Ok(data);
    }
    Err(StationError::SensorTimeout())
}

/// Discards stream bytes until the two-byte frame sentinel has been consumed.
fn sync_to_frame(port: &mut Box<dyn SerialPort>) -> Result<(), StationError> {
    let mut previous: u8 = 0;
    loop {
        let byte = read(port, 1)?;
        if is_frame_header(previous, byte[0]) {
            return Ok(());
        }
        previous = byte[0];
    }
}

impl RangeSensor for SerialRangeSensor {
    fn drain(&mut self) -> Result<(), StationError> {
        self.port.clear(ClearBuffer::All)?;
        Ok(())
    }

    fn acquire(&mut self) -> Result<MeasurementOutcome, StationError> {
        sync_to_frame(&mut self.port)?;
        let payload = read(&mut self.port, FRAME_PAYLOAD_SIZE)?;

        let mut frame = [0u8; FRAME_SIZE];
        frame[0] = FRAME_HEADER_BYTE;
        frame[1] = FRAME_HEADER_BYTE;
        frame[FRAME_HEADER_SIZE..].copy_from_slice(&payload);
        Ok(decode(&frame))
    }
}

/// Sensor for running the station without hardware attached. Reports a fixed
/// nearby reading.
pub struct MockRangeSensor;

impl RangeSensor for MockRangeSensor {
    fn drain(&mut self) -> Result<(), StationError> {
        Ok(())
    }

    fn acquire(&mut self) -> Result<MeasurementOutcome, StationError> {
        Ok(MeasurementOutcome::Measured(Measurement {
            distance: 10.,
            strength: 10.,
            temperature: 10.,
        }))
    }
}
