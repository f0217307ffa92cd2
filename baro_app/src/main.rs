mod filters;

use std::env;
use std::thread;
use std::time::Duration;

use linux_embedded_hal::{Delay, I2cdev};
use log::{error, info, Level, LevelFilter, Metadata, Record};

use bmp085::registers::{CAL_REGS, CTRL_REGS};
use bmp085::{Barometer, Bmp085, DeciCelsius, Oversampling, Pascal, DEFAULT_ADDRESS};

use crate::filters::{low_pass_filter_reading, FilteredReading};

const LPF_ALPHA: f32 = 0.2;
const SAMPLE_PERIOD: Duration = Duration::from_secs(1);

struct StdoutLogger;

impl log::Log for StdoutLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Debug
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            println!("{:<5} {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StdoutLogger = StdoutLogger;

fn sample<B: Barometer>(baro: &mut B) -> Result<(DeciCelsius, Pascal, f32), B::Error> {
    let temperature = baro.temperature()?;
    let pressure = baro.pressure()?;
    let altitude = baro.altitude()?;
    Ok((temperature, pressure, altitude))
}

fn main() {
    log::set_logger(&LOGGER).unwrap();
    log::set_max_level(LevelFilter::Debug);

    let path = env::args()
        .nth(1)
        .unwrap_or_else(|| "/dev/i2c-1".to_string());
    info!("opening {}", path);
    let i2c = I2cdev::new(&path).unwrap();

    let mut baro = match Bmp085::new(
        i2c,
        Delay,
        DEFAULT_ADDRESS,
        Oversampling::UltraHighResolution,
    ) {
        Ok(baro) => baro,
        Err(e) => {
            error!("sensor bring-up failed: {:?}", e);
            std::process::exit(1);
        }
    };

    info!("oversampling {:?}", baro.oversampling());
    baro.dump_config(CAL_REGS).unwrap();
    baro.dump_config(CTRL_REGS).unwrap();

    let mut filtered_alt = FilteredReading {
        data: 0.0,
        initialized: false,
    };

    loop {
        match sample(&mut baro) {
            Ok((temperature, pressure, altitude)) => {
                low_pass_filter_reading(altitude, &mut filtered_alt, LPF_ALPHA);
                info!(
                    "temperature {:.1} degC, pressure {} Pa, altitude {:.1} m ({:.1} m filtered)",
                    temperature as f32 / 10.0,
                    pressure,
                    altitude,
                    filtered_alt.data
                );
            }
            Err(e) => error!("measurement failed: {:?}", e),
        }
        thread::sleep(SAMPLE_PERIOD);
    }
}
