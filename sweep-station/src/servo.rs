use crate::constants::{
    CHANNEL_0_END, CHANNEL_0_START, CHANNEL_1_END, CHANNEL_1_START, MAX_SERVO_ANGLE,
    MODE1_AUTO_INCREMENT, MODE1_REG_ADDR, MODE1_SLEEP, PRESCALE_50HZ, PRESCALE_REG_ADDR,
    PWM_FREQUENCY_HZ, SETTLE_BASE_MS,
};
use crate::error::StationError;
use crate::pwm::PwmBus;
use crate::time::sleep_ms;

/// Servo axes of the pan/tilt head.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Axis {
    /// Tilt, carried on PWM channel 0.
    Theta,
    /// Pan, carried on PWM channel 1.
    Phi,
}

/// Pan/tilt drive backends. Angles are in degrees; the mechanism accepts
/// 0 to 160. Drives are owned by the serving thread, hence `Send`.
pub trait ServoDrive: Send {
    fn rotate(&mut self, axis: Axis, angle: f64) -> Result<(), StationError>;
}

pub(crate) fn degrees_pulse_duration(degrees: f64) -> f64 {
    (degrees + 45.) / (90. * 1000.)
}

pub(crate) fn pulse_duration_ticks(pulse: f64, frequency: f64) -> u16 {
    let tick_ms = 1000. / frequency / 4096.;
    (pulse * 1000. / tick_ms) as u16
}

/// Two hobby servos behind a PCA9685 PWM chip.
pub struct ServoController {
    bus: Box<dyn PwmBus>,
}

impl ServoController {
    /// Configures the PWM chip and homes both axes to 0 degrees.
    pub fn new(mut bus: Box<dyn PwmBus>) -> Result<Self, StationError> {
        // Prescaler writes require sleep mode
        bus.write_byte(MODE1_REG_ADDR, MODE1_SLEEP)?;
        bus.write_byte(PRESCALE_REG_ADDR, PRESCALE_50HZ)?;
        sleep_ms(SETTLE_BASE_MS);

        // Auto-increment enables word writes
        bus.write_byte(MODE1_REG_ADDR, MODE1_AUTO_INCREMENT)?;

        // Pulses start at the beginning of each period
        bus.write_word(CHANNEL_0_START, 0)?;
        bus.write_word(CHANNEL_1_START, 0)?;

        let mut controller = ServoController { bus };
        controller.rotate(Axis::Theta, 0.)?;
        controller.rotate(Axis::Phi, 0.)?;
        Ok(controller)
    }

    fn set_position(&mut self, channel_end: u8, angle: f64) -> Result<(), StationError> {
        if angle < 0. || angle > MAX_SERVO_ANGLE {
            return Err(StationError::AngleOutOfRange(angle));
        }

        let pulse = degrees_pulse_duration(angle);
        let ticks = pulse_duration_ticks(pulse, PWM_FREQUENCY_HZ);
        self.bus.write_word(channel_end, ticks)?;

        // The head must be still before the next command or sensor read
        sleep_ms(2 * SETTLE_BASE_MS);
        Ok(())
    }
}

impl ServoDrive for ServoController {
    fn rotate(&mut self, axis: Axis, angle: f64) -> Result<(), StationError> {
        let channel_end = match axis {
            Axis::Theta => CHANNEL_0_END,
            Axis::Phi => CHANNEL_1_END,
        };
        self.set_position(channel_end, angle)
    }
}

/// Drive for running the station without the pan/tilt hardware attached.
/// Range-checks its input and otherwise does nothing.
pub struct MockServoDrive;

impl ServoDrive for MockServoDrive {
    fn rotate(&mut self, _axis: Axis, angle: f64) -> Result<(), StationError> {
        if angle < 0. || angle > MAX_SERVO_ANGLE {
            return Err(StationError::AngleOutOfRange(angle));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, PartialEq)]
    enum BusWrite {
        Byte(u8, u8),
        Word(u8, u16),
    }

    struct RecordingBus {
        writes: Arc<Mutex<Vec<BusWrite>>>,
    }

    impl PwmBus for RecordingBus {
        fn write_byte(&mut self, register: u8, value: u8) -> Result<(), StationError> {
            self.writes.lock().unwrap().push(BusWrite::Byte(register, value));
            Ok(())
        }

        fn write_word(&mut self, register: u8, value: u16) -> Result<(), StationError> {
            self.writes.lock().unwrap().push(BusWrite::Word(register, value));
            Ok(())
        }
    }

    fn recording_bus() -> (Arc<Mutex<Vec<BusWrite>>>, Box<dyn PwmBus>) {
        let writes = Arc::new(Mutex::new(Vec::new()));
        let bus = RecordingBus {
            writes: Arc::clone(&writes),
        };
        (writes, Box::new(bus))
    }

    #[test]
    fn test_degrees_pulse_duration() {
        assert_eq!(degrees_pulse_duration(0.), 0.0005);
        assert_eq!(degrees_pulse_duration(90.), 0.0015);
        assert_eq!(degrees_pulse_duration(180.), 0.0025);
    }

    #[test]
    fn test_pulse_duration_ticks() {
        assert_eq!(pulse_duration_ticks(degrees_pulse_duration(0.), 50.), 102);
        assert_eq!(pulse_duration_ticks(degrees_pulse_duration(90.), 50.), 307);
        assert_eq!(pulse_duration_ticks(degrees_pulse_duration(160.), 50.), 466);
        assert_eq!(pulse_duration_ticks(degrees_pulse_duration(180.), 50.), 512);
    }

    #[test]
    fn test_init_sequence() {
        let (writes, bus) = recording_bus();
        ServoController::new(bus).unwrap();

        let expected = vec![
            BusWrite::Byte(MODE1_REG_ADDR, MODE1_SLEEP),
            BusWrite::Byte(PRESCALE_REG_ADDR, PRESCALE_50HZ),
            BusWrite::Byte(MODE1_REG_ADDR, MODE1_AUTO_INCREMENT),
            BusWrite::Word(CHANNEL_0_START, 0),
            BusWrite::Word(CHANNEL_1_START, 0),
            BusWrite::Word(CHANNEL_0_END, 102),
            BusWrite::Word(CHANNEL_1_END, 102),
        ];
        assert_eq!(*writes.lock().unwrap(), expected);
    }

    #[test]
    fn test_rotate_writes_target_channel() {
        let (writes, bus) = recording_bus();
        let mut controller = ServoController::new(bus).unwrap();

        controller.rotate(Axis::Theta, 90.).unwrap();
        assert_eq!(
            *writes.lock().unwrap().last().unwrap(),
            BusWrite::Word(CHANNEL_0_END, 307)
        );

        controller.rotate(Axis::Phi, 160.).unwrap();
        assert_eq!(
            *writes.lock().unwrap().last().unwrap(),
            BusWrite::Word(CHANNEL_1_END, 466)
        );
    }

    #[test]
    fn test_rotate_rejects_out_of_range_angles() {
        let (writes, bus) = recording_bus();
        let mut controller = ServoController::new(bus).unwrap();
        let writes_after_init = writes.lock().unwrap().len();

        assert!(matches!(
            controller.rotate(Axis::Theta, 160.5),
            Err(StationError::AngleOutOfRange(_))
        ));
        assert!(matches!(
            controller.rotate(Axis::Phi, -1.),
            Err(StationError::AngleOutOfRange(_))
        ));
        assert_eq!(writes.lock().unwrap().len(), writes_after_init);
    }

    #[test]
    fn test_mock_drive_checks_range() {
        let mut drive = MockServoDrive;
        assert!(matches!(drive.rotate(Axis::Theta, 160.), Ok(())));
        assert!(matches!(
            drive.rotate(Axis::Phi, 161.),
            Err(StationError::AngleOutOfRange(_))
        ));
    }
}
