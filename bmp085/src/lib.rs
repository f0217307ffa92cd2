#![cfg_attr(not(test), no_std)]
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod calibration;
pub mod registers;
pub mod types;

use registers::*;
pub use crate::calibration::{compensate_pressure, compensate_temperature, CalibrationSet};
pub use crate::types::*;

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{I2c, SevenBitAddress};
use log::{debug, trace};

/// Trait alias to support both I2c<SevenBitAddress> and I2c without address mode.
pub trait CompatibleI2c<E>: I2c<Error = E> {}
impl<T, E> CompatibleI2c<E> for T where T: I2c<Error = E> {}

pub const DEFAULT_ADDRESS: u8 = 0x77;

/// Reference pressure at sea level in pascals.
pub const DEFAULT_SEA_LEVEL_PA: f32 = 101_325.0;

// 10ms of start-up time after power-up, before first communication
const STARTUP_DELAY_MS: u32 = 10;

// Temperature conversion takes 4.5ms; wait 5
const TEMPERATURE_DELAY_MS: u32 = 5;

pub struct Bmp085<I2C, D, E> {
    i2c: I2C,
    delay: D,
    address: u8,
    oss: Oversampling,
    cal: CalibrationSet,
    sea_level_pa: f32,
    _error: core::marker::PhantomData<E>,
}

impl<I2C, D, E> Bmp085<I2C, D, E> {
    pub fn i2c(&mut self) -> &mut I2C {
        &mut self.i2c
    }
}

#[derive(Debug)]
pub enum Error<E> {
    I2c(E),
    InvalidCalibrationWord(u8),
    ZeroDivisor,
}

/// Polymorphic access to a barometric sensor.
pub trait Barometer {
    type Error;

    fn temperature(&mut self) -> Result<DeciCelsius, Self::Error>;
    fn pressure(&mut self) -> Result<Pascal, Self::Error>;
    fn altitude(&mut self) -> Result<f32, Self::Error>;
}

impl<I2C, D, E> Bmp085<I2C, D, E>
where
    I2C: CompatibleI2c<E>,
    D: DelayNs,
    E: core::fmt::Debug,
{
    /// Waits out the device's power-up time, then loads and validates the
    /// calibration EEPROM. The oversampling setting is fixed for the life
    /// of the instance.
    pub fn new(i2c: I2C, delay: D, address: u8, oss: Oversampling) -> Result<Self, Error<E>> {
        let mut bmp = Self {
            i2c,
            delay,
            address,
            oss,
            cal: CalibrationSet::default(),
            sea_level_pa: DEFAULT_SEA_LEVEL_PA,
            _error: core::marker::PhantomData,
        };
        bmp.delay.delay_ms(STARTUP_DELAY_MS);
        bmp.cal = bmp.read_calibration()?;
        Ok(bmp)
    }

    pub fn default(i2c: I2C, delay: D) -> Result<Self, Error<E>> {
        Self::new(i2c, delay, DEFAULT_ADDRESS, Oversampling::default())
    }

    pub fn destroy(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }

    pub fn calibration(&self) -> &CalibrationSet {
        &self.cal
    }

    pub fn oversampling(&self) -> Oversampling {
        self.oss
    }

    /// Sets the sea-level reference pressure used by altitude readings.
    pub fn set_sea_level_pressure(&mut self, pa: f32) {
        self.sea_level_pa = pa;
    }

    fn read_calibration(&mut self) -> Result<CalibrationSet, Error<E>> {
        Ok(CalibrationSet {
            ac1: self.read_cal_word(CalReg::Ac1)? as i16,
            ac2: self.read_cal_word(CalReg::Ac2)? as i16,
            ac3: self.read_cal_word(CalReg::Ac3)? as i16,
            ac4: self.read_cal_word(CalReg::Ac4)?,
            ac5: self.read_cal_word(CalReg::Ac5)?,
            ac6: self.read_cal_word(CalReg::Ac6)?,
            b1: self.read_cal_word(CalReg::B1)? as i16,
            b2: self.read_cal_word(CalReg::B2)? as i16,
            mb: self.read_cal_word(CalReg::Mb)? as i16,
            mc: self.read_cal_word(CalReg::Mc)? as i16,
            md: self.read_cal_word(CalReg::Md)? as i16,
        })
    }

    fn read_cal_word(&mut self, reg: CalReg) -> Result<u16, Error<E>> {
        let mut buf = [0u8; 2];
        self.read_bytes(reg.addr(), &mut buf)?;
        let word = u16::from_be_bytes(buf);
        debug!("cal word {:<4}({:#04X}) = {:#06X}", reg.name(), reg.addr(), word);
        // A word stuck at all zeros or all ones is a bus or EEPROM fault
        if word == 0x0000 || word == 0xFFFF {
            return Err(Error::InvalidCalibrationWord(reg.addr()));
        }
        Ok(word)
    }

    pub fn read_reg(&mut self, reg: u8) -> Result<u8, Error<E>> {
        let mut buf = [0u8];
        self.i2c
            .write_read(self.address, &[reg], &mut buf)
            .map_err(Error::I2c)?;
        Ok(buf[0])
    }

    pub fn write_reg(&mut self, reg: u8, val: u8) -> Result<(), Error<E>> {
        self.i2c
            .write(self.address, &[reg, val])
            .map_err(Error::I2c)?;
        Ok(())
    }

    pub fn read_bytes(&mut self, start_reg: u8, buffer: &mut [u8]) -> Result<(), Error<E>> {
        self.i2c
            .write_read(self.address, &[start_reg], buffer)
            .map_err(Error::I2c)
    }

    /// Starts a temperature conversion, waits it out and returns the raw
    /// 16-bit code.
    pub fn read_raw_temperature(&mut self) -> Result<u16, Error<E>> {
        self.write_reg(CtrlReg::Control.into(), CMD_TEMPERATURE)?;
        self.delay.delay_ms(TEMPERATURE_DELAY_MS);

        let mut buf = [0u8; 2];
        self.read_bytes(CtrlReg::OutMsb.into(), &mut buf)?;
        let ut = u16::from_be_bytes(buf);
        trace!("raw temperature code {}", ut);
        Ok(ut)
    }

    /// Starts a pressure conversion at the configured oversampling, waits
    /// it out and returns the raw code (up to 19 bits at oss 3).
    pub fn read_raw_pressure(&mut self) -> Result<u32, Error<E>> {
        let cmd = CMD_PRESSURE_BASE | (self.oss.value() << CONTROL_OSS_LOC);
        self.write_reg(CtrlReg::Control.into(), cmd)?;
        self.delay.delay_ms(self.oss.conversion_delay_ms());

        let mut buf = [0u8; 3];
        self.read_bytes(CtrlReg::OutMsb.into(), &mut buf)?;
        let raw = ((buf[0] as u32) << 16) | ((buf[1] as u32) << 8) | buf[2] as u32;
        let up = raw >> (8 - self.oss.value());
        trace!("raw pressure code {} (oss {})", up, self.oss.value());
        Ok(up)
    }

    pub fn read_temperature(&mut self) -> Result<DeciCelsius, Error<E>> {
        let ut = self.read_raw_temperature()?;
        let (t, _b5) = compensate_temperature(ut, &self.cal).ok_or(Error::ZeroDivisor)?;
        Ok(t)
    }

    /// Runs a full measurement cycle. The b5 intermediate is recomputed
    /// from a fresh temperature conversion taken right before the pressure
    /// conversion; a stale one would skew the compensation.
    pub fn read_pressure(&mut self) -> Result<Pascal, Error<E>> {
        let ut = self.read_raw_temperature()?;
        let (_, b5) = compensate_temperature(ut, &self.cal).ok_or(Error::ZeroDivisor)?;
        let up = self.read_raw_pressure()?;
        compensate_pressure(up, b5, self.oss, &self.cal).ok_or(Error::ZeroDivisor)
    }

    /// Altitude in meters against the configured sea-level reference.
    /// Triggers a full temperature plus pressure measurement.
    pub fn read_altitude(&mut self) -> Result<f32, Error<E>> {
        let pressure = self.read_pressure()?;
        Ok(altitude_from_pressure(pressure, self.sea_level_pa))
    }

    pub fn dump_config<R>(&mut self, regs: &[R]) -> Result<(), Error<E>>
    where
        R: NamedRegister + Copy,
    {
        fn show(label: &str, reg: u8, val: Result<u8, impl core::fmt::Debug>) {
            match val {
                Ok(v) => debug!("{:<4}({:#04x}): 0x{:02X} ({:>3}) 0b{:08b}", label, reg, v, v, v),
                Err(e) => debug!("{:<4}: Error: {:?}", label, e),
            }
        }

        for reg in regs {
            let label = reg.name();
            let addr = reg.addr();
            show(label, addr, self.read_reg(addr));
        }

        Ok(())
    }
}

impl<I2C, D, E> Barometer for Bmp085<I2C, D, E>
where
    I2C: embedded_hal::i2c::I2c<Error = E>,
    D: DelayNs,
    E: core::fmt::Debug,
{
    type Error = Error<E>;

    fn temperature(&mut self) -> Result<DeciCelsius, Self::Error> {
        self.read_temperature()
    }

    fn pressure(&mut self) -> Result<Pascal, Self::Error> {
        self.read_pressure()
    }

    fn altitude(&mut self) -> Result<f32, Self::Error> {
        self.read_altitude()
    }
}

/// Barometric altitude in meters for a pressure reading against a sea-level
/// reference pressure.
pub fn altitude_from_pressure(pressure: Pascal, sea_level_pa: f32) -> f32 {
    44330.0 * (1.0 - libm::powf(pressure as f32 / sea_level_pa, 0.190295))
}
