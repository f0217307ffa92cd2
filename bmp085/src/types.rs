/// Temperature in tenths of a degree Celsius (150 = 15.0 C).
pub type DeciCelsius = i32;

/// Pressure in pascals.
pub type Pascal = i32;

/// Pressure oversampling setting.
///
/// Selects how many internal samples the device averages per pressure
/// conversion. Higher settings give better resolution at the cost of a
/// longer conversion delay and more supply current. Fixed per driver
/// instance.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Oversampling {
    UltraLowPower = 0,
    Standard = 1,
    HighResolution = 2,
    UltraHighResolution = 3,
}

impl Oversampling {
    pub fn value(self) -> u8 {
        self as u8
    }

    /// Minimum conversion wait in milliseconds for a pressure reading at
    /// this setting: 2 + (3 << oss).
    pub fn conversion_delay_ms(self) -> u32 {
        2 + (3 << self.value())
    }
}

impl Default for Oversampling {
    fn default() -> Self {
        Oversampling::UltraLowPower
    }
}
