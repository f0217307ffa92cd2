macro_rules! registers {
    (
        $enum_name:ident, $slice_name:ident {
            $($name:ident = $val:expr),* $(,)?
        }
    ) => {
        #[repr(u8)]
        #[derive(Copy, Clone, Debug, PartialEq, Eq)]
        pub enum $enum_name {
            $($name = $val),*
        }

        pub const $slice_name: &[$enum_name] = &[
            $($enum_name::$name),*
        ];

        impl $enum_name {
            pub fn name(&self) -> &'static str {
                match self {
                    $($enum_name::$name => stringify!($name),)*
                }
            }
        }

        impl Register for $enum_name {
            fn addr(self) -> u8 {
                self as u8
            }
        }

        impl NamedRegister for $enum_name {
            fn name(&self) -> &'static str {
                self.name()
            }
        }

        impl From<$enum_name> for u8 {
            fn from(r: $enum_name) -> u8 {
                r as u8
            }
        }
    };
}

pub trait NamedRegister: Register {
    fn name(&self) -> &'static str;
}

pub trait Register: Copy {
    fn addr(self) -> u8;
}

// Calibration EEPROM words, one 16-bit big-endian word per even address.
registers! {
    CalReg, CAL_REGS {
        Ac1 = 0xAA,
        Ac2 = 0xAC,
        Ac3 = 0xAE,
        Ac4 = 0xB0,
        Ac5 = 0xB2,
        Ac6 = 0xB4,
        B1  = 0xB6,
        B2  = 0xB8,
        Mb  = 0xBA,
        Mc  = 0xBC,
        Md  = 0xBE,
    }
}

registers! {
    CtrlReg, CTRL_REGS {
        Control = 0xF4,
        OutMsb  = 0xF6,
        OutLsb  = 0xF7,
        OutXlsb = 0xF8,
    }
}

// Conversion commands written to Control (0xF4).
pub const CMD_TEMPERATURE: u8 = 0x2E;
pub const CMD_PRESSURE_BASE: u8 = 0x34;

// -- Bit offset constants --

pub const CONTROL_OSS_LOC: u8 = 6;
