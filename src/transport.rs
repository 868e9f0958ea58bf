//! Bus transport for the register map.
//!
//! The register accessors on [`Sensor`](crate::Sensor) never talk to the bus
//! themselves, they hand an address and a width to a [`Transport`]. Anything
//! that can move 8 or 16 bits to and from a register address can be one: the
//! [`I2cTransport`] below, a simulator, or a test double.

use embedded_hal::i2c;

/// LIDAR-Lite v3 default I2C address.
pub const DEFAULT_ADDRESS: u8 = 0x62;

/// Setting bit 7 of the register pointer makes the device auto-increment
/// through consecutive registers within one transaction.
pub const AUTO_INCREMENT: u8 = 0x80;

/// Width of a single register transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Width {
    Bits8,
    Bits16,
}

impl Width {
    pub const fn bits(self) -> u8 {
        match self {
            Width::Bits8 => 8,
            Width::Bits16 => 16,
        }
    }
}

/// Raw register I/O.
///
/// An 8-bit read returns its byte in the low 8 bits of the result; an 8-bit
/// write only uses the low 8 bits of `value`. For 16-bit transactions the byte
/// at `address` is the high byte and the byte at `address + 1` is the low byte.
pub trait Transport {
    type Error;

    fn read(&mut self, address: u8, width: Width) -> Result<u16, Self::Error>;

    fn write(&mut self, address: u8, value: u16, width: Width) -> Result<(), Self::Error>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    type Error = T::Error;

    fn read(&mut self, address: u8, width: Width) -> Result<u16, Self::Error> {
        (**self).read(address, width)
    }

    fn write(&mut self, address: u8, value: u16, width: Width) -> Result<(), Self::Error> {
        (**self).write(address, value, width)
    }
}

//Impliment Error type for the I2C transport.
#[derive(Debug, PartialEq)]
pub enum Error<E> {
    I2C(E),
    /// Register pointer has bit 7 set, which the device reads as the
    /// auto-increment flag rather than part of the address.
    InvalidRegister(u8),
}

/// [`Transport`] over an `embedded-hal` I2C bus.
pub struct I2cTransport<I2C>
where I2C: i2c::I2c
{
    i2c: I2C,
    address: u8,
}

impl<I2C> I2cTransport<I2C>
where I2C: i2c::I2c
{
    pub fn new(i2c: I2C, address: u8) -> Self {
        debug!("lidar-lite transport on i2c address {:#x}", address);
        I2cTransport { i2c, address }
    }

    /// Transport talking to the factory default address (0x62).
    pub fn default(i2c: I2C) -> Self {
        Self::new(i2c, DEFAULT_ADDRESS)
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    /// Switch to a new device address, e.g. after I2C_SEC_ADDR was written.
    pub fn set_address(&mut self, address: u8) {
        debug!("lidar-lite transport moving to i2c address {:#x}", address);
        self.address = address;
    }

    /// Give the bus back.
    pub fn release(self) -> I2C {
        self.i2c
    }

    fn check_register(register: u8) -> Result<(), Error<I2C::Error>> {
        if register & AUTO_INCREMENT != 0 {
            warn!("register pointer {:#x} collides with auto-increment bit", register);
            return Err(Error::InvalidRegister(register));
        }
        Ok(())
    }
}

impl<I2C> Transport for I2cTransport<I2C>
where I2C: i2c::I2c
{
    type Error = Error<I2C::Error>;

    fn read(&mut self, address: u8, width: Width) -> Result<u16, Self::Error> {
        Self::check_register(address)?;

        let value = match width {
            Width::Bits8 => {
                let mut buf = [0u8; 1];
                self.i2c
                    .write_read(self.address, &[address], &mut buf)
                    .map_err(Error::I2C)?;
                buf[0] as u16
            }
            Width::Bits16 => {
                //high byte comes first, the pointer walks up to the low byte.
                let mut buf = [0u8; 2];
                self.i2c
                    .write_read(self.address, &[address | AUTO_INCREMENT], &mut buf)
                    .map_err(Error::I2C)?;
                u16::from_be_bytes(buf)
            }
        };

        trace!("read {} bits at {:#x}: {:#x}", width.bits(), address, value);
        Ok(value)
    }

    fn write(&mut self, address: u8, value: u16, width: Width) -> Result<(), Self::Error> {
        Self::check_register(address)?;
        trace!("write {} bits at {:#x}: {:#x}", width.bits(), address, value);

        match width {
            Width::Bits8 => self
                .i2c
                .write(self.address, &[address, value as u8])
                .map_err(Error::I2C),
            Width::Bits16 => {
                let [high, low] = value.to_be_bytes();
                self.i2c
                    .write(self.address, &[address | AUTO_INCREMENT, high, low])
                    .map_err(Error::I2C)
            }
        }
    }
}
