//! Factory calibration coefficients and the fixed-point compensation math
//! from the BMP085 datasheet.
//!
//! Both functions are pure: they take the coefficients read-only and report
//! a degenerate divisor as `None` instead of dividing. The pressure formula
//! takes the `b5` intermediate as an explicit argument; it must come from a
//! temperature conversion performed immediately before the pressure
//! conversion.

use crate::types::{DeciCelsius, Oversampling, Pascal};

/// The eleven coefficients trimmed into device EEPROM at the factory,
/// read once from 0xAA..0xBE at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CalibrationSet {
    pub ac1: i16,
    pub ac2: i16,
    pub ac3: i16,
    pub ac4: u16,
    pub ac5: u16,
    pub ac6: u16,
    pub b1: i16,
    pub b2: i16,
    pub mb: i16,
    pub mc: i16,
    pub md: i16,
}

/// Converts a raw temperature code into tenths of a degree Celsius.
///
/// Returns the temperature together with the `b5` intermediate consumed by
/// [`compensate_pressure`]. `None` if `x1 + md` lands on zero (corrupt
/// coefficients).
pub fn compensate_temperature(ut: u16, cal: &CalibrationSet) -> Option<(DeciCelsius, i32)> {
    let x1 = (ut as i32 - cal.ac6 as i32).wrapping_mul(cal.ac5 as i32) >> 15;
    let divisor = x1 + cal.md as i32;
    if divisor == 0 {
        return None;
    }
    let x2 = ((cal.mc as i32) << 11) / divisor;
    let b5 = x1 + x2;
    Some(((b5 + 8) >> 4, b5))
}

/// Converts a raw pressure code into pascals.
///
/// `b5` is the intermediate returned by [`compensate_temperature`] for a
/// raw sample taken just before the pressure conversion. `None` if the `b4`
/// divisor lands on zero (corrupt coefficients).
pub fn compensate_pressure(
    up: u32,
    b5: i32,
    oss: Oversampling,
    cal: &CalibrationSet,
) -> Option<Pascal> {
    let oss = oss.value();

    // Products wrap like the datasheet's 32-bit reference code: raw codes
    // or coefficients far outside their physical range must come out as
    // garbage readings, never as a fault.
    let b6 = b5 - 4000;
    let b6_sq = b6.wrapping_mul(b6) >> 12;

    let x1 = (cal.b2 as i32).wrapping_mul(b6_sq) >> 11;
    let x2 = (cal.ac2 as i32).wrapping_mul(b6) >> 11;
    let x3 = x1 + x2;
    let b3 = ((((cal.ac1 as i32) * 4 + x3) << oss) + 2) >> 2;

    let x1 = (cal.ac3 as i32).wrapping_mul(b6) >> 13;
    let x2 = (cal.b1 as i32).wrapping_mul(b6_sq) >> 16;
    let x3 = ((x1 + x2) + 2) >> 2;
    let b4 = (cal.ac4 as u32).wrapping_mul((x3 + 32768) as u32) >> 15;
    if b4 == 0 {
        return None;
    }

    let b7 = up.wrapping_sub(b3 as u32).wrapping_mul(50_000 >> oss);
    let mut p = if b7 < 0x8000_0000 {
        ((b7 << 1) / b4) as i32
    } else {
        ((b7 / b4) << 1) as i32
    };

    let x1 = (p >> 8).wrapping_mul(p >> 8);
    let x1 = x1.wrapping_mul(3038) >> 16;
    let x2 = p.wrapping_mul(-7357) >> 16;
    p = p.wrapping_add((x1 + x2 + 3791) >> 4);

    Some(p)
}
