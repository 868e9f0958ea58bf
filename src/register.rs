//! Register Mapping
//!
//! Every register of the LIDAR-Lite v3 with its address, transaction width,
//! access convention and power-on default, plus the bit-fields inside each one.
//! All of it is constant data; live values only exist on the device.

use crate::transport::Width;

#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Register {
    /// Device command, write only.
    ACQ_COMMAND = 0x00,
    /// System status.
    STATUS = 0x01,
    /// Maximum acquisition count.
    SIG_COUNT_VAL = 0x02,
    /// Acquisition mode control.
    ACQ_CONFIG_REG = 0x04,
    /// Velocity measurement output, signed.
    VELOCITY = 0x09,
    /// Peak value in correlation record.
    PEAK_CORR = 0x0C,
    /// Correlation record noise floor.
    NOISE_PEAK = 0x0D,
    /// Received signal strength.
    SIGNAL_STRENGTH = 0x0E,
    /// Distance measurement, high byte at 0x0f and low byte at 0x10.
    FULL_DELAY = 0x0F,
    /// Burst measurement count control.
    OUTER_LOOP_COUNT = 0x11,
    /// Reference acquisition count.
    REF_COUNT_VAL = 0x12,
    /// Previous distance measurement high byte.
    LAST_DELAY_HIGH = 0x14,
    /// Previous distance measurement low byte.
    LAST_DELAY_LOW = 0x15,
    /// Serial number high byte.
    UNIT_ID_HIGH = 0x16,
    /// Serial number low byte.
    UNIT_ID_LOW = 0x17,
    /// Serial number high byte, written to unlock the secondary address.
    I2C_ID_HIGH = 0x18,
    /// Serial number low byte, written to unlock the secondary address.
    I2C_ID_LOW = 0x19,
    /// New I2C address, honored once I2C_ID_HIGH/LOW match the serial.
    I2C_SEC_ADDR = 0x1A,
    /// Peak detection threshold bypass.
    THRESHOLD_BYPASS = 0x1C,
    /// Default address response control.
    I2C_CONFIG = 0x1E,
    /// State command, selects test mode.
    COMMAND = 0x40,
    /// Delay between automatic measurements.
    MEASURE_DELAY = 0x45,
    /// Second largest peak value in correlation record.
    PEAK_BCK = 0x4C,
    /// Correlation record data low byte.
    CORR_DATA = 0x52,
    /// Correlation record data high byte, only bit 0 is meaningful.
    CORR_DATA_SIGN = 0x53,
    /// Correlation record memory bank select.
    ACQ_SETTINGS = 0x5D,
    /// Power state control.
    POWER_CONTROL = 0x65,
}

/// How a register is meant to be used. Nothing enforces this, it is
/// carried for documentation and for tooling that walks [`Register::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Access {
    ReadOnly,
    WriteOnly,
    ReadWrite,
}

impl Register {
    pub const ALL: [Register; 27] = [
        Register::ACQ_COMMAND,
        Register::STATUS,
        Register::SIG_COUNT_VAL,
        Register::ACQ_CONFIG_REG,
        Register::VELOCITY,
        Register::PEAK_CORR,
        Register::NOISE_PEAK,
        Register::SIGNAL_STRENGTH,
        Register::FULL_DELAY,
        Register::OUTER_LOOP_COUNT,
        Register::REF_COUNT_VAL,
        Register::LAST_DELAY_HIGH,
        Register::LAST_DELAY_LOW,
        Register::UNIT_ID_HIGH,
        Register::UNIT_ID_LOW,
        Register::I2C_ID_HIGH,
        Register::I2C_ID_LOW,
        Register::I2C_SEC_ADDR,
        Register::THRESHOLD_BYPASS,
        Register::I2C_CONFIG,
        Register::COMMAND,
        Register::MEASURE_DELAY,
        Register::PEAK_BCK,
        Register::CORR_DATA,
        Register::CORR_DATA_SIGN,
        Register::ACQ_SETTINGS,
        Register::POWER_CONTROL,
    ];

    pub const fn addr(self) -> u8 {
        self as u8
    }

    pub const fn width(self) -> Width {
        match self {
            Register::FULL_DELAY => Width::Bits16,
            _ => Width::Bits8,
        }
    }

    pub const fn access(self) -> Access {
        use Register::*;
        match self {
            ACQ_COMMAND | I2C_ID_HIGH | I2C_ID_LOW | I2C_SEC_ADDR => Access::WriteOnly,
            STATUS | VELOCITY | PEAK_CORR | NOISE_PEAK | SIGNAL_STRENGTH | FULL_DELAY
            | LAST_DELAY_HIGH | LAST_DELAY_LOW | UNIT_ID_HIGH | UNIT_ID_LOW | PEAK_BCK
            | CORR_DATA | CORR_DATA_SIGN => Access::ReadOnly,
            _ => Access::ReadWrite,
        }
    }

    /// Power-on value of the whole register, where the datasheet gives one.
    pub const fn default_value(self) -> Option<u8> {
        match self {
            Register::SIG_COUNT_VAL => sig_count_val::VALUE.default,
            Register::ACQ_CONFIG_REG => Some(acq_config_reg::DEFAULT),
            Register::OUTER_LOOP_COUNT => outer_loop_count::VALUE.default,
            Register::REF_COUNT_VAL => ref_count_val::VALUE.default,
            Register::THRESHOLD_BYPASS => threshold_bypass::VALUE.default,
            Register::I2C_CONFIG => i2c_config::RESPONSE_CONTROL.default,
            Register::MEASURE_DELAY => measure_delay::VALUE.default,
            Register::POWER_CONTROL => Some(power_control::DEFAULT),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        use Register::*;
        match self {
            ACQ_COMMAND => "ACQ_COMMAND",
            STATUS => "STATUS",
            SIG_COUNT_VAL => "SIG_COUNT_VAL",
            ACQ_CONFIG_REG => "ACQ_CONFIG_REG",
            VELOCITY => "VELOCITY",
            PEAK_CORR => "PEAK_CORR",
            NOISE_PEAK => "NOISE_PEAK",
            SIGNAL_STRENGTH => "SIGNAL_STRENGTH",
            FULL_DELAY => "FULL_DELAY",
            OUTER_LOOP_COUNT => "OUTER_LOOP_COUNT",
            REF_COUNT_VAL => "REF_COUNT_VAL",
            LAST_DELAY_HIGH => "LAST_DELAY_HIGH",
            LAST_DELAY_LOW => "LAST_DELAY_LOW",
            UNIT_ID_HIGH => "UNIT_ID_HIGH",
            UNIT_ID_LOW => "UNIT_ID_LOW",
            I2C_ID_HIGH => "I2C_ID_HIGH",
            I2C_ID_LOW => "I2C_ID_LOW",
            I2C_SEC_ADDR => "I2C_SEC_ADDR",
            THRESHOLD_BYPASS => "THRESHOLD_BYPASS",
            I2C_CONFIG => "I2C_CONFIG",
            COMMAND => "COMMAND",
            MEASURE_DELAY => "MEASURE_DELAY",
            PEAK_BCK => "PEAK_BCK",
            CORR_DATA => "CORR_DATA",
            CORR_DATA_SIGN => "CORR_DATA_SIGN",
            ACQ_SETTINGS => "ACQ_SETTINGS",
            POWER_CONTROL => "POWER_CONTROL",
        }
    }

    /// Look a register up by its bus address. The low byte of FULL_DELAY
    /// (0x10) is not a register of its own and gives `None`.
    pub fn from_addr(addr: u8) -> Option<Register> {
        Register::ALL.iter().copied().find(|r| r.addr() == addr)
    }
}


/// A masked bit range inside an 8-bit register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Field {
    pub mask: u8,
    /// Power-on value of the field, already shifted down.
    pub default: Option<u8>,
}

impl Field {
    pub const fn new(mask: u8) -> Self {
        Field { mask, default: None }
    }

    pub const fn with_default(mask: u8, default: u8) -> Self {
        Field { mask, default: Some(default) }
    }

    /// Bit position of the lowest bit in the mask.
    pub const fn shift(&self) -> u32 {
        self.mask.trailing_zeros()
    }

    /// Number of bits in the mask.
    pub const fn width(&self) -> u32 {
        self.mask.count_ones()
    }

    /// Pull this field out of a raw register value.
    pub const fn get(&self, raw: u8) -> u8 {
        (raw & self.mask) >> self.shift()
    }

    /// Shift `value` into position. Bits that fall outside the mask are
    /// dropped; the result holds only this field, callers OR fields together.
    pub const fn set(&self, value: u8) -> u8 {
        value.wrapping_shl(self.shift()) & self.mask
    }
}


// === ACQ_COMMAND (0x00) ===
pub mod acq_command {
    use super::Field;
    pub const VALUE: Field = Field::new(0b1111_1111);
}

// === STATUS (0x01) ===
pub mod status {
    use super::Field;
    pub const UNUSED: Field = Field::new(0b1000_0000);
    pub const PROCESS_ERROR_FLAG: Field = Field::new(0b0100_0000);
    pub const HEALTH_FLAG: Field = Field::new(0b0010_0000);
    pub const SECONDARY_RETURN_FLAG: Field = Field::new(0b0001_0000);
    pub const INVALID_SIGNAL_FLAG: Field = Field::new(0b0000_1000);
    pub const SIGNAL_OVERFLOW_FLAG: Field = Field::new(0b0000_0100);
    pub const REFERENCE_OVERFLOW_FLAG: Field = Field::new(0b0000_0010);
    pub const BUSY_FLAG: Field = Field::new(0b0000_0001);

    pub const PROCESS_OK: u8 = 0;
    pub const PROCESS_ERR: u8 = 1;
    pub const HEALTH_ERR: u8 = 0;
    pub const HEALTH_OK: u8 = 1;
    pub const SECONDARY_RETURN_NO: u8 = 0;
    pub const SECONDARY_RETURN_YES: u8 = 1;
    /// Peak detected, the measurement is valid.
    pub const PEAK_DETECTED: u8 = 0;
    /// No peak in the correlation record, the measurement is invalid.
    pub const PEAK_NOT_DETECTED: u8 = 1;
    pub const OVERFLOW_NO: u8 = 0;
    pub const OVERFLOW_YES: u8 = 1;
    pub const READY: u8 = 0;
    pub const BUSY: u8 = 1;
}

// === SIG_COUNT_VAL (0x02) ===
pub mod sig_count_val {
    use super::Field;
    pub const VALUE: Field = Field::with_default(0b1111_1111, 0x80);
}

// === ACQ_CONFIG_REG (0x04) ===
pub mod acq_config_reg {
    use super::Field;
    pub const UNUSED: Field = Field::with_default(0b1000_0000, 0);
    pub const ENABLE_REFERENCE_PROCESS: Field = Field::with_default(0b0100_0000, 0);
    pub const DELAY: Field = Field::with_default(0b0010_0000, 0);
    pub const REFERENCE_FILTER: Field = Field::with_default(0b0001_0000, 0);
    pub const QUICK_TERMINATION: Field = Field::with_default(0b0000_1000, 1);
    pub const REFERENCE_ACQUISITION: Field = Field::with_default(0b0000_0100, 0);
    pub const MODE_SELECT: Field = Field::with_default(0b0000_0011, 0);

    /// Whole register after power on; only quick termination is set.
    pub const DEFAULT: u8 = 0x08;

    /// Bits 6, 4 and 3 are active low: 0 enables the feature.
    pub const ENABLE: u8 = 0;
    pub const DISABLE: u8 = 1;
    /// Bit 5: automatic repetition delay source.
    pub const DELAY_DEFAULT: u8 = 0;
    pub const DELAY_FROM_MEASURE_DELAY: u8 = 1;
    /// Bit 2: reference acquisition count source.
    pub const REF_ACQ_DEFAULT: u8 = 0;
    pub const REF_ACQ_FROM_REF_COUNT_VAL: u8 = 1;
}

// === VELOCITY (0x09) ===
pub mod velocity {
    use super::Field;
    /// Two's complement difference to the previous measurement, in cm.
    pub const VALUE: Field = Field::new(0b1111_1111);
}

// === PEAK_CORR (0x0C) ===
pub mod peak_corr {
    use super::Field;
    pub const VALUE: Field = Field::new(0b1111_1111);
}

// === NOISE_PEAK (0x0D) ===
pub mod noise_peak {
    use super::Field;
    pub const VALUE: Field = Field::new(0b1111_1111);
}

// === SIGNAL_STRENGTH (0x0E) ===
pub mod signal_strength {
    use super::Field;
    pub const VALUE: Field = Field::new(0b1111_1111);
}

// === FULL_DELAY (0x0F, 16 bit) ===
pub mod full_delay {
    /// Distance in centimeters, the whole word.
    pub const VALUE_MASK: u16 = 0b1111_1111_1111_1111;
}

// === OUTER_LOOP_COUNT (0x11) ===
pub mod outer_loop_count {
    use super::Field;
    /// 0x00-0x01 single shot, 0x02-0xfe repetition count, 0xff forever.
    pub const VALUE: Field = Field::with_default(0b1111_1111, 0x01);
    pub const SINGLE: u8 = 0x01;
    pub const INDEFINITE: u8 = 0xFF;
}

// === REF_COUNT_VAL (0x12) ===
pub mod ref_count_val {
    use super::Field;
    pub const VALUE: Field = Field::with_default(0b1111_1111, 0x05);
}

// === LAST_DELAY_HIGH (0x14) / LAST_DELAY_LOW (0x15) ===
pub mod last_delay {
    use super::Field;
    pub const HIGH: Field = Field::new(0b1111_1111);
    pub const LOW: Field = Field::new(0b1111_1111);
}

// === UNIT_ID_HIGH (0x16) / UNIT_ID_LOW (0x17) ===
pub mod unit_id {
    use super::Field;
    pub const HIGH: Field = Field::new(0b1111_1111);
    pub const LOW: Field = Field::new(0b1111_1111);
}

// === I2C_ID_HIGH (0x18) / I2C_ID_LOW (0x19) ===
pub mod i2c_id {
    use super::Field;
    pub const HIGH: Field = Field::new(0b1111_1111);
    pub const LOW: Field = Field::new(0b1111_1111);
}

// === I2C_SEC_ADDR (0x1A) ===
pub mod i2c_sec_addr {
    use super::Field;
    /// 7-bit address with bit 0 clear (even values only).
    pub const VALUE: Field = Field::new(0b1111_1111);
}

// === THRESHOLD_BYPASS (0x1C) ===
pub mod threshold_bypass {
    use super::Field;
    pub const VALUE: Field = Field::with_default(0b1111_1111, 0x00);
    /// Use the built-in peak/signal/noise detection algorithm.
    pub const DEFAULT: u8 = 0x00;
    pub const HIGH_SENSITIVITY: u8 = 0x20;
    pub const LOW_SENSITIVITY: u8 = 0x60;
}

// === I2C_CONFIG (0x1E) ===
pub mod i2c_config {
    use super::Field;
    pub const RESPONSE_CONTROL: Field = Field::with_default(0b0000_1000, 0);
}

// === COMMAND (0x40) ===
pub mod command {
    use super::Field;
    pub const TEST_MODE: Field = Field::new(0b0000_0111);
}

// === MEASURE_DELAY (0x45) ===
pub mod measure_delay {
    use super::Field;
    /// 0xc8 is about 10 Hz, 0x14 about 100 Hz.
    pub const VALUE: Field = Field::with_default(0b1111_1111, 0x14);
}

// === PEAK_BCK (0x4C) ===
pub mod peak_bck {
    use super::Field;
    pub const VALUE: Field = Field::new(0b1111_1111);
}

// === CORR_DATA (0x52) / CORR_DATA_SIGN (0x53) ===
pub mod corr_data {
    use super::Field;
    pub const VALUE: Field = Field::new(0b1111_1111);
    /// Bit 0 of CORR_DATA_SIGN is bit 8 (the sign) of the 9-bit sample.
    pub const SIGN: Field = Field::new(0b0000_0001);
}

// === ACQ_SETTINGS (0x5D) ===
pub mod acq_settings {
    use super::Field;
    pub const BANK: Field = Field::new(0b1100_0000);
}

// === POWER_CONTROL (0x65) ===
pub mod power_control {
    use super::Field;
    pub const SLEEP: Field = Field::with_default(0b0000_0100, 0);
    pub const RECEIVER_CIRCUIT: Field = Field::with_default(0b0000_0001, 0);
    pub const DEFAULT: u8 = 0x00;
}


/// ACQ_CONFIG_REG bits 1:0, function of the mode select pin.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ModeSelect {
    /// PWM mode, pull low to trigger, 10us/cm high pulse back.
    Pwm = 0b00,
    /// Pin driven high while busy.
    StatusOutput = 0b01,
    /// PWM output, pulling low does not trigger.
    FixedDelayPwm = 0b10,
    /// Nominal 31.25 kHz oscillator output.
    OscillatorOutput = 0b11,
}

impl ModeSelect {
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0b00 => ModeSelect::Pwm,
            0b01 => ModeSelect::StatusOutput,
            0b10 => ModeSelect::FixedDelayPwm,
            _ => ModeSelect::OscillatorOutput,
        }
    }
}

/// ACQ_SETTINGS bits 7:6.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AcqSettingsBank {
    /// Correlation memory, select before enabling test mode.
    Correlation = 0b11,
}

/// I2C_CONFIG bit 3.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ResponseControl {
    /// Answer on 0x62 and on the secondary address if one is set.
    Default = 0,
    /// Only answer on the secondary address.
    NonDefault = 1,
}

/// POWER_CONTROL bit 2.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Sleep {
    Wake = 0,
    /// Wakes on the next I2C transaction with registers reinitialized.
    Sleep = 1,
}

/// POWER_CONTROL bit 0.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReceiverCircuit {
    Enable = 0,
    Disable = 1,
}

macro_rules! field_value_conversions {
    ($($ty:ident { $($variant:ident),+ }),+ $(,)?) => {
        $(
            impl From<$ty> for u8 {
                fn from(v: $ty) -> u8 {
                    v as u8
                }
            }

            impl TryFrom<u8> for $ty {
                type Error = u8;

                fn try_from(v: u8) -> Result<Self, Self::Error> {
                    $(
                        if v == $ty::$variant as u8 {
                            return Ok($ty::$variant);
                        }
                    )+
                    Err(v)
                }
            }
        )+
    };
}

field_value_conversions!(
    ModeSelect { Pwm, StatusOutput, FixedDelayPwm, OscillatorOutput },
    AcqSettingsBank { Correlation },
    ResponseControl { Default, NonDefault },
    Sleep { Wake, Sleep },
    ReceiverCircuit { Enable, Disable },
);
