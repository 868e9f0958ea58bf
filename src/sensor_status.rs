//Bits and their meanings, see STATUS (0x01) in the LIDAR-Lite v3
//operation manual.
/*
 * bit[7]: Reserved
 * bit[6]: Process error flag, 1: system error during measurement
 * bit[5]: Health flag, 1: reference and receiver bias are operational
 * bit[4]: Secondary return flag
 * bit[3]: Invalid signal flag, 1: no peak found, measurement is invalid
 * bit[2]: Signal overflow flag
 * bit[1]: Reference overflow flag (happens periodically)
 * bit[0]: Busy flag
*/

//This means it's a primitive enum representation; aka uint8_t
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BitMasks {
    ProcessError = (1 << 6),
    Health = (1 << 5),
    SecondaryReturn = (1 << 4),
    InvalidSignal = (1 << 3),
    SignalOverflow = (1 << 2),
    ReferenceOverflow = (1 << 1),
    Busy = (1 << 0),
}

/// A decoded copy of the STATUS register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorStatus {
    pub status: u8,
}

impl SensorStatus {
    pub fn new(status: u8) -> SensorStatus {
        SensorStatus { status }
    }

    fn is_set(&self, mask: BitMasks) -> bool {
        self.status & mask as u8 != 0
    }

    pub fn is_busy(&self) -> bool {
        self.is_set(BitMasks::Busy)
    }

    pub fn is_process_error(&self) -> bool {
        self.is_set(BitMasks::ProcessError)
    }

    pub fn is_healthy(&self) -> bool {
        self.is_set(BitMasks::Health)
    }

    pub fn has_secondary_return(&self) -> bool {
        self.is_set(BitMasks::SecondaryReturn)
    }

    /// No peak in the correlation record; the last distance is not usable.
    pub fn is_signal_invalid(&self) -> bool {
        self.is_set(BitMasks::InvalidSignal)
    }

    pub fn has_signal_overflow(&self) -> bool {
        self.is_set(BitMasks::SignalOverflow)
    }

    pub fn has_reference_overflow(&self) -> bool {
        self.is_set(BitMasks::ReferenceOverflow)
    }
}

impl From<u8> for SensorStatus {
    fn from(status: u8) -> Self {
        SensorStatus::new(status)
    }
}




#[cfg(test)]
mod sensor_status_tests {
    use super::*;

    #[test]
    fn new_status() {
        //0x20 is what an idle, healthy sensor reports.
        let s = SensorStatus::new(0x20);

        assert_eq!(s.status, 0x20);
        assert!(!s.is_busy());
        assert!(s.is_healthy());
        assert!(!s.is_process_error());
        assert!(!s.is_signal_invalid());
    }

    #[test]
    fn busy_status() {
        let mut senstat = SensorStatus::from(0x00);
        assert!(!senstat.is_busy());

        //set the busy bit.
        senstat.status |= BitMasks::Busy as u8;
        assert!(senstat.is_busy());

        senstat.status |= BitMasks::Health as u8;
        assert!(senstat.is_busy());
        assert!(senstat.is_healthy());
    }

    #[test]
    fn invalid_measurement() {
        let s = SensorStatus::new(0x20 | BitMasks::InvalidSignal as u8);
        assert!(s.is_signal_invalid());
        assert!(!s.has_secondary_return());
    }

    #[test]
    fn overflow_flags() {
        let s = SensorStatus::new(0b0000_0110);
        assert!(s.has_signal_overflow());
        assert!(s.has_reference_overflow());
        assert!(!s.is_healthy());

        let s = SensorStatus::new(0b0000_0010);
        assert!(!s.has_signal_overflow());
        assert!(s.has_reference_overflow());
    }

    #[test]
    fn error_flags() {
        let s = SensorStatus::new(0b0101_0000);
        assert!(s.is_process_error());
        assert!(s.has_secondary_return());
        assert!(!s.is_healthy());
    }
}
