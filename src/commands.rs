
//We have sepreate consts and enums for the puporse of being used during
//testing(consts) or as parameters(enum).

// ACQ_COMMAND (0x00)
pub const RESET: u8 = 0x00;
pub const NO_BIAS: u8 = 0x03;
pub const BIAS: u8 = 0x04;

// COMMAND (0x40), bits 2:0
pub const TEST_MODE_DISABLE: u8 = 0b000;
pub const TEST_MODE_ENABLE: u8 = 0b111;

/// Values for ACQ_COMMAND.
///
/// Skipping the receiver bias correction (`NoBias`) is faster but loses
/// accuracy when conditions drift, so a `Bias` measurement should still be
/// taken about once every 100 measurements.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AcqCommand {
    /// All registers return to their default values.
    Reset = RESET,
    /// Measure without receiver bias correction.
    NoBias = NO_BIAS,
    /// Measure with receiver bias correction.
    Bias = BIAS,
}

/// Values for the test mode bits of COMMAND.
///
/// Select the correlation bank in ACQ_SETTINGS before enabling; while
/// enabled, reads of the CORR_DATA pair step through the correlation record.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TestMode {
    Disable = TEST_MODE_DISABLE,
    Enable = TEST_MODE_ENABLE,
}

impl From<AcqCommand> for u8 {
    fn from(c: AcqCommand) -> u8 {
        c as u8
    }
}

impl From<TestMode> for u8 {
    fn from(m: TestMode) -> u8 {
        m as u8
    }
}
