//! # LIDAR-Lite v3 register map
//!
//! Typed access to every register of the Garmin LIDAR-Lite v3 optical
//! distance sensor. Each register gets a `get_`/`set_` pair that does exactly
//! one bus transaction of the register's width through a [`Transport`];
//! bit-field masks, defaults and enumerated values live in [`register`] and
//! [`commands`] so callers can compose register bytes without magic numbers.
//!
//! ```rust,no_run
//! use sensor_lib_lidar_lite_v3::{Sensor, commands::AcqCommand};
//!
//! let i2c = embedded_hal_mock::eh1::i2c::Mock::new(&[]);
//! let mut lidar = Sensor::with_i2c(i2c);
//!
//! lidar.set_acq_command(AcqCommand::Bias.into()).unwrap();
//! while lidar.get_status_flags().unwrap().is_busy() {}
//! let cm = lidar.get_full_delay().unwrap();
//! ```
#![cfg_attr(not(test), no_std)]

mod fmt; // <-- must be first module!

use embedded_hal::i2c;

pub mod commands;
pub mod data;
pub mod register;
pub mod sensor_status;
pub mod transport;

pub use crate::register::Register;
pub use crate::sensor_status::SensorStatus;
pub use crate::transport::{I2cTransport, Transport, Width, DEFAULT_ADDRESS};

use crate::data::CorrelationSample;


/// One LIDAR-Lite v3 behind a [`Transport`].
///
/// Holds nothing but the transport. Setters overwrite the whole register,
/// there is no read-modify-write.
pub struct Sensor<T>
where T: Transport
{
    transport: T,
}

macro_rules! register_accessors {
    ($( $reg:ident : $ty:ty => $get:ident, $set:ident; )+) => {
        $(
            #[doc = concat!("Read ", stringify!($reg), ".")]
            pub fn $get(&mut self) -> Result<$ty, T::Error> {
                self.read_register(Register::$reg).map(|v| v as $ty)
            }

            #[doc = concat!("Write ", stringify!($reg), ", replacing its whole content.")]
            pub fn $set(&mut self, value: $ty) -> Result<(), T::Error> {
                self.write_register(Register::$reg, value as u16)
            }
        )+
    };
}

impl<T> Sensor<T>
where T: Transport
{
    pub fn new(transport: T) -> Self {
        Sensor { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Needed e.g. to move an [`I2cTransport`] to a new secondary address.
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn release(self) -> T {
        self.transport
    }

    /// Read any register at its own width.
    pub fn read_register(&mut self, register: Register) -> Result<u16, T::Error> {
        self.transport.read(register.addr(), register.width())
    }

    /// Write any register at its own width. 8-bit registers only take the
    /// low byte of `value`.
    pub fn write_register(&mut self, register: Register, value: u16) -> Result<(), T::Error> {
        self.transport.write(register.addr(), value, register.width())
    }

    register_accessors! {
        ACQ_COMMAND: u8 => get_acq_command, set_acq_command;
        STATUS: u8 => get_status, set_status;
        SIG_COUNT_VAL: u8 => get_sig_count_val, set_sig_count_val;
        ACQ_CONFIG_REG: u8 => get_acq_config_reg, set_acq_config_reg;
        VELOCITY: u8 => get_velocity, set_velocity;
        PEAK_CORR: u8 => get_peak_corr, set_peak_corr;
        NOISE_PEAK: u8 => get_noise_peak, set_noise_peak;
        SIGNAL_STRENGTH: u8 => get_signal_strength, set_signal_strength;
        FULL_DELAY: u16 => get_full_delay, set_full_delay;
        OUTER_LOOP_COUNT: u8 => get_outer_loop_count, set_outer_loop_count;
        REF_COUNT_VAL: u8 => get_ref_count_val, set_ref_count_val;
        LAST_DELAY_HIGH: u8 => get_last_delay_high, set_last_delay_high;
        LAST_DELAY_LOW: u8 => get_last_delay_low, set_last_delay_low;
        UNIT_ID_HIGH: u8 => get_unit_id_high, set_unit_id_high;
        UNIT_ID_LOW: u8 => get_unit_id_low, set_unit_id_low;
        I2C_ID_HIGH: u8 => get_i2c_id_high, set_i2c_id_high;
        I2C_ID_LOW: u8 => get_i2c_id_low, set_i2c_id_low;
        I2C_SEC_ADDR: u8 => get_i2c_sec_addr, set_i2c_sec_addr;
        THRESHOLD_BYPASS: u8 => get_threshold_bypass, set_threshold_bypass;
        I2C_CONFIG: u8 => get_i2c_config, set_i2c_config;
        COMMAND: u8 => get_command, set_command;
        MEASURE_DELAY: u8 => get_measure_delay, set_measure_delay;
        PEAK_BCK: u8 => get_peak_bck, set_peak_bck;
        CORR_DATA: u8 => get_corr_data, set_corr_data;
        CORR_DATA_SIGN: u8 => get_corr_data_sign, set_corr_data_sign;
        ACQ_SETTINGS: u8 => get_acq_settings, set_acq_settings;
        POWER_CONTROL: u8 => get_power_control, set_power_control;
    }

    pub fn get_status_flags(&mut self) -> Result<SensorStatus, T::Error> {
        self.get_status().map(SensorStatus::new)
    }

    /// VELOCITY as a signed cm difference to the previous measurement.
    pub fn get_velocity_cm(&mut self) -> Result<i8, T::Error> {
        self.get_velocity().map(data::velocity_from_raw)
    }

    /// Previous distance in cm. Two separate byte reads, high byte first.
    pub fn get_last_delay(&mut self) -> Result<u16, T::Error> {
        let high = self.get_last_delay_high()?;
        let low = self.get_last_delay_low()?;
        Ok(data::word_from_halves(high, low))
    }

    /// Serial number, the value to write back into I2C_ID_HIGH/LOW before
    /// I2C_SEC_ADDR is accepted.
    pub fn get_unit_id(&mut self) -> Result<u16, T::Error> {
        let high = self.get_unit_id_high()?;
        let low = self.get_unit_id_low()?;
        Ok(data::word_from_halves(high, low))
    }

    /// Read CORR_DATA and CORR_DATA_SIGN in one 16-bit transaction and
    /// sign-extend the 9-bit sample. In test mode every call returns the
    /// next entry of the correlation record.
    pub fn get_corr_data_pair(&mut self) -> Result<i16, T::Error> {
        let word = self.transport.read(Register::CORR_DATA.addr(), Width::Bits16)?;
        Ok(CorrelationSample::from_pair_word(word).value())
    }
}

impl<I2C> Sensor<I2cTransport<I2C>>
where I2C: i2c::I2c
{
    /// Sensor on the factory default address (0x62).
    pub fn with_i2c(i2c: I2C) -> Self {
        Sensor::new(I2cTransport::default(i2c))
    }

    pub fn with_i2c_address(i2c: I2C, address: u8) -> Self {
        Sensor::new(I2cTransport::new(i2c, address))
    }
}




#[cfg(test)]
mod i2c_sensor_tests {
    use embedded_hal::i2c::ErrorKind;
    use embedded_hal_mock::eh1::i2c::{
        Mock as I2cMock,
        Transaction as I2cTransaction,
    };

    use super::*;
    use crate::commands::{AcqCommand, TestMode};
    use crate::register::{acq_settings, command, AcqSettingsBank};

    #[test]
    fn read_distance()
    {
        let expectations = [
            I2cTransaction::write(DEFAULT_ADDRESS, vec![Register::ACQ_COMMAND.addr(), commands::BIAS]),
            I2cTransaction::write_read(DEFAULT_ADDRESS, vec![0x01], vec![0x21]),
            I2cTransaction::write_read(DEFAULT_ADDRESS, vec![0x01], vec![0x20]),
            I2cTransaction::write_read(DEFAULT_ADDRESS, vec![0x8F], vec![0x00, 0xC8]),
        ];

        let i2c = I2cMock::new(&expectations);
        let mut sensor = Sensor::with_i2c(i2c);

        sensor.set_acq_command(AcqCommand::Bias.into()).unwrap();
        assert!(sensor.get_status_flags().unwrap().is_busy());
        assert!(!sensor.get_status_flags().unwrap().is_busy());
        assert_eq!(sensor.get_full_delay().unwrap(), 200);

        sensor.release().release().done();
    }

    #[test]
    fn secondary_address_unlock()
    {
        //the unlock order is up to the caller, each step is a plain write.
        let expectations = [
            I2cTransaction::write_read(DEFAULT_ADDRESS, vec![0x16], vec![0xAB]),
            I2cTransaction::write_read(DEFAULT_ADDRESS, vec![0x17], vec![0xCD]),
            I2cTransaction::write(DEFAULT_ADDRESS, vec![0x18, 0xAB]),
            I2cTransaction::write(DEFAULT_ADDRESS, vec![0x19, 0xCD]),
            I2cTransaction::write(DEFAULT_ADDRESS, vec![0x1A, 0x44]),
            I2cTransaction::write(0x44, vec![0x1E, 0x08]),
        ];

        let i2c = I2cMock::new(&expectations);
        let mut sensor = Sensor::with_i2c(i2c);

        let high = sensor.get_unit_id_high().unwrap();
        let low = sensor.get_unit_id_low().unwrap();
        sensor.set_i2c_id_high(high).unwrap();
        sensor.set_i2c_id_low(low).unwrap();
        sensor.set_i2c_sec_addr(0x44).unwrap();
        sensor.transport_mut().set_address(0x44);
        sensor.set_i2c_config(register::i2c_config::RESPONSE_CONTROL.set(1)).unwrap();

        sensor.release().release().done();
    }

    #[test]
    fn correlation_record_download()
    {
        let expectations = [
            I2cTransaction::write(DEFAULT_ADDRESS, vec![0x5D, 0xC0]),
            I2cTransaction::write(DEFAULT_ADDRESS, vec![0x40, 0x07]),
            I2cTransaction::write_read(DEFAULT_ADDRESS, vec![0xD2], vec![0x10, 0x01]),
            I2cTransaction::write_read(DEFAULT_ADDRESS, vec![0xD2], vec![0x10, 0x00]),
            I2cTransaction::write(DEFAULT_ADDRESS, vec![0x40, 0x00]),
        ];

        let i2c = I2cMock::new(&expectations);
        let mut sensor = Sensor::with_i2c(i2c);

        sensor.set_acq_settings(acq_settings::BANK.set(AcqSettingsBank::Correlation.into())).unwrap();
        sensor.set_command(command::TEST_MODE.set(TestMode::Enable.into())).unwrap();
        assert_eq!(sensor.get_corr_data_pair().unwrap(), -240);
        assert_eq!(sensor.get_corr_data_pair().unwrap(), 16);
        sensor.set_command(TestMode::Disable.into()).unwrap();

        sensor.release().release().done();
    }

    #[test]
    fn custom_address()
    {
        let expectations = [
            I2cTransaction::write(0x44, vec![0x65, 0x04]),
        ];

        let i2c = I2cMock::new(&expectations);
        let mut sensor = Sensor::with_i2c_address(i2c, 0x44);
        assert_eq!(sensor.transport().address(), 0x44);

        sensor.set_power_control(register::power_control::SLEEP.set(1)).unwrap();

        sensor.release().release().done();
    }

    #[test]
    fn nack_reaches_caller()
    {
        let expectations = [
            I2cTransaction::write(DEFAULT_ADDRESS, vec![0x00, 0x00])
                .with_error(ErrorKind::NoAcknowledge(
                    embedded_hal::i2c::NoAcknowledgeSource::Address,
                )),
        ];

        let i2c = I2cMock::new(&expectations);
        let mut sensor = Sensor::with_i2c(i2c);

        assert_eq!(
            sensor.set_acq_command(AcqCommand::Reset.into()),
            Err(transport::Error::I2C(ErrorKind::NoAcknowledge(
                embedded_hal::i2c::NoAcknowledgeSource::Address,
            )))
        );

        sensor.release().release().done();
    }
}
