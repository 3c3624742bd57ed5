use embedded_hal::{delay::DelayNs, digital::OutputPin, i2c::I2c};

use crate::ads1115::Ads1115;
use crate::alarm::{self, AlarmLevel};
use crate::clock::Clock;
use crate::mq2::Mq2;
use crate::mq7::Mq7;
use crate::settings::Settings;

/// Nominal interval between [`GasMonitor::tick`] calls, ms.
pub const TICK_MS: u64 = 250;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Tick {
    pub mq2_reading: bool,
    pub mq7_reading: bool,
}

/// Both sensors on one ADS1115.
///
/// Sensors are stepped one after another so conversions never overlap.
pub struct GasMonitor<I2C, D, P, C> {
    reader: Ads1115<I2C, D>,
    mq2: Mq2,
    mq7: Mq7<P>,
    clock: C,
}

impl<I2C, D, P, C> GasMonitor<I2C, D, P, C>
where
    I2C: I2c,
    D: DelayNs,
    P: OutputPin,
    C: Clock,
{
    pub fn new(i2c: I2C, delay: D, heater: P, clock: C) -> Self {
        Self {
            reader: Ads1115::new(i2c, delay),
            mq2: Mq2::new(),
            mq7: Mq7::new(heater),
            clock,
        }
    }

    pub fn start(&mut self, settings: &Settings) {
        self.reader.detect_address();
        self.mq2.start(&settings.mq2);
        self.mq7.start(&self.clock);
    }

    /// Runs one tick.
    ///
    /// MQ-2 waits for the converter to be detected. The MQ-7 heater cycle
    /// keeps running without it, its readings are simply invalid meanwhile.
    pub fn tick(&mut self, settings: &mut Settings) -> Tick {
        let detected = self.reader.detect_address() != 0;

        let mq2_reading =
            detected && self.mq2.step(&mut settings.mq2, &mut self.reader, &self.clock);
        let mq7_reading = self
            .mq7
            .step(&mut settings.mq7, &mut self.reader, &self.clock);

        Tick {
            mq2_reading,
            mq7_reading,
        }
    }

    pub fn mq2_alarm(&self, settings: &Settings) -> AlarmLevel {
        alarm::mq2_level(self.mq2.ppm_smoothed(), &settings.mq2)
    }

    pub fn mq7_alarm(&self, settings: &Settings) -> AlarmLevel {
        alarm::mq7_level(
            self.mq7.ppm_at_end(),
            self.mq7.resistance_delta(),
            &settings.mq7,
        )
    }

    pub fn reader(&self) -> &Ads1115<I2C, D> {
        &self.reader
    }

    pub fn mq2(&self) -> &Mq2 {
        &self.mq2
    }

    pub fn mq7(&self) -> &Mq7<P> {
        &self.mq7
    }
}
