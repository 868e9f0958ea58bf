/*
 * Filename: data.rs
 * Description: turning raw register bytes from the sensor into values.
 */

/// VELOCITY holds a two's complement difference in cm.
pub fn velocity_from_raw(raw: u8) -> i8 {
    raw as i8
}

/// Rebuild one correlation record sample.
///
/// The sample is 9 bits of two's complement: CORR_DATA holds bits 7:0 and
/// bit 0 of CORR_DATA_SIGN holds the sign. The sign is extended across the
/// whole high byte.
pub fn corr_sample(low: u8, sign: u8) -> i16 {
    if sign & 1 != 0 {
        (0xFF00 | low as u16) as i16
    } else {
        low as i16
    }
}

/// Join two byte registers (LAST_DELAY_HIGH/LOW, UNIT_ID_HIGH/LOW).
pub fn word_from_halves(high: u8, low: u8) -> u16 {
    u16::from_be_bytes([high, low])
}

/// A sample read as one 16-bit transaction starting at CORR_DATA.
///
/// The first byte on the bus is CORR_DATA, so in the word it lands in the
/// high byte and CORR_DATA_SIGN in the low byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CorrelationSample {
    pub low: u8,
    pub sign: u8,
}

impl CorrelationSample {
    pub fn from_pair_word(word: u16) -> Self {
        let [low, sign] = word.to_be_bytes();
        CorrelationSample { low, sign }
    }

    pub fn value(&self) -> i16 {
        corr_sample(self.low, self.sign)
    }
}


#[cfg(test)]
mod sensor_data_tests {
    use super::*;

    #[test]
    fn negative_sample() {
        assert_eq!(corr_sample(0x10, 0x01), -240);
        assert_eq!(corr_sample(0x10, 0x01) as u16, 0xFF10);
    }

    #[test]
    fn positive_sample() {
        assert_eq!(corr_sample(0x10, 0x00), 16);
    }

    #[test]
    fn sample_limits() {
        assert_eq!(corr_sample(0xFF, 0x00), 255);
        assert_eq!(corr_sample(0x00, 0x01), -256);
        assert_eq!(corr_sample(0xFF, 0x01), -1);
    }

    #[test]
    fn only_sign_bit_counts() {
        //bits above bit 0 of the sign byte carry nothing.
        assert_eq!(corr_sample(0x10, 0xFE), 16);
        assert_eq!(corr_sample(0x10, 0xFF), -240);
    }

    #[test]
    fn pair_word() {
        let s = CorrelationSample::from_pair_word(0x1001);
        assert_eq!(s, CorrelationSample { low: 0x10, sign: 0x01 });
        assert_eq!(s.value(), -240);
    }

    #[test]
    fn velocity() {
        assert_eq!(velocity_from_raw(0x05), 5);
        assert_eq!(velocity_from_raw(0xFB), -5);
        assert_eq!(velocity_from_raw(0x80), -128);
    }

    #[test]
    fn halves() {
        assert_eq!(word_from_halves(0x00, 0xC8), 200);
        assert_eq!(word_from_halves(0x12, 0x34), 0x1234);
    }
}
