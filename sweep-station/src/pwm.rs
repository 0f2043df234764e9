use crate::constants::PCA9685_I2C_ADDR;
use crate::error::StationError;
use i2cdev::core::I2CDevice;
use i2cdev::linux::LinuxI2CDevice;

/// Register-level writes to the servo PWM chip.
pub trait PwmBus: Send {
    fn write_byte(&mut self, register: u8, value: u8) -> Result<(), StationError>;
    fn write_word(&mut self, register: u8, value: u16) -> Result<(), StationError>;
}

/// PCA9685 on a Linux I2C bus.
pub struct I2cPwmBus {
    device: LinuxI2CDevice,
}

impl I2cPwmBus {
    pub fn open(bus: u8) -> Result<Self, StationError> {
        let device = LinuxI2CDevice::new(format!("/dev/i2c-{}", bus), PCA9685_I2C_ADDR)?;
        Ok(I2cPwmBus { device })
    }
}

impl PwmBus for I2cPwmBus {
    fn write_byte(&mut self, register: u8, value: u8) -> Result<(), StationError> {
        Ok(self.device.smbus_write_byte_data(register, value)?)
    }

    fn write_word(&mut self, register: u8, value: u16) -> Result<(), StationError> {
        Ok(self.device.smbus_write_word_data(register, value)?)
    }
}
