pub(crate) const SENSOR_BAUD_RATE: u32 = 115_200;
pub(crate) const FRAME_HEADER_BYTE: u8 = 0x59;
pub(crate) const FRAME_SIZE: usize = 9;
pub(crate) const FRAME_HEADER_SIZE: usize = 2;
pub(crate) const FRAME_PAYLOAD_SIZE: usize = FRAME_SIZE - FRAME_HEADER_SIZE;
pub(crate) const MIN_STRENGTH: f64 = 200.;
pub(crate) const N_READ_TRIALS: usize = 100;

// PCA9685 servo controller
pub(crate) const PCA9685_I2C_ADDR: u16 = 0x40;
pub(crate) const MODE1_REG_ADDR: u8 = 0x00;
pub(crate) const PRESCALE_REG_ADDR: u8 = 0xFE;
pub(crate) const CHANNEL_0_START: u8 = 0x06;
pub(crate) const CHANNEL_0_END: u8 = 0x08;
pub(crate) const CHANNEL_1_START: u8 = 0x0A;
pub(crate) const CHANNEL_1_END: u8 = 0x0C;
pub(crate) const MODE1_SLEEP: u8 = 0x10;
pub(crate) const MODE1_AUTO_INCREMENT: u8 = 0x20;
// 50 Hz per the datasheet prescale formula
pub(crate) const PRESCALE_50HZ: u8 = 0x80;
pub(crate) const PWM_FREQUENCY_HZ: f64 = 50.;
pub(crate) const MAX_SERVO_ANGLE: f64 = 160.;
pub(crate) const SETTLE_BASE_MS: u64 = 250;
