use log::{debug, info};

use crate::ads1115::{Channel, ResistanceSource};
use crate::clock::Clock;
use crate::curve::{Curve, percentage};
use crate::settings::Mq2Settings;

/// Calibration length in 250 ms ticks.
pub const CALIBRATION_SAMPLES: u16 = 100;

/// PPM is recalculated every this many ticks.
pub const PPM_INTERVAL_TICKS: u8 = 4;

/// A reading above `kohm_max` this long after the last Ro update forces
/// recalibration, seconds.
pub const RECALIBRATION_AGE_SECS: u32 = 43200;

/// Stored `kohm_max` above this is corrupt.
pub const KOHM_MAX_LIMIT: f32 = 1000.0;

const RESISTANCE_ALPHA: f32 = 0.1;
const PPM_ALPHA: f32 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum State {
    Sampling { ticks_left: u8 },
    Calibrating { samples_left: u16 },
}

/// MQ-2 methane/LPG sensor.
///
/// Runs a calibration burst whenever the baseline is missing or drifted and
/// otherwise samples PPM at a low rate.
#[derive(Debug, Clone)]
pub struct Mq2 {
    state: State,
    resistance: f32,
    ppm: f32,
    ppm_smoothed: f32,
}

impl Default for Mq2 {
    fn default() -> Self {
        Self::new()
    }
}

impl Mq2 {
    pub fn new() -> Self {
        Self {
            state: State::Sampling {
                ticks_left: PPM_INTERVAL_TICKS,
            },
            resistance: 0.0,
            ppm: 0.0,
            ppm_smoothed: 0.0,
        }
    }

    pub fn start(&mut self, settings: &Mq2Settings) {
        if !settings.ro_is_valid() {
            self.calibrate();
        }
    }

    /// Advances the sensor by one tick. Returns true if a reading occurred.
    pub fn step<R, C>(&mut self, settings: &mut Mq2Settings, reader: &mut R, clock: &C) -> bool
    where
        R: ResistanceSource,
        C: Clock,
    {
        match self.state {
            State::Sampling { ticks_left } => {
                let ticks_left = ticks_left.saturating_sub(1);
                if ticks_left > 0 {
                    self.state = State::Sampling { ticks_left };
                    return false;
                }
                self.state = State::Sampling {
                    ticks_left: PPM_INTERVAL_TICKS,
                };

                if !settings.ro_is_valid() {
                    self.calibrate();
                    return false;
                }

                self.update_ppm(settings, reader, clock)
            }
            State::Calibrating { samples_left } => {
                self.calibration_step(samples_left, settings, reader, clock);
                true
            }
        }
    }

    fn calibrate(&mut self) {
        if self.is_calibrating() {
            return;
        }
        self.state = State::Calibrating {
            samples_left: CALIBRATION_SAMPLES,
        };
        debug!("MQX: Start MQ-2 calibration");
    }

    fn calibration_step<R, C>(
        &mut self,
        samples_left: u16,
        settings: &mut Mq2Settings,
        reader: &mut R,
        clock: &C,
    ) where
        R: ResistanceSource,
        C: Clock,
    {
        let resistance = reader.calculate_resistance(Channel::Mq2);
        if resistance.is_nan() || resistance <= 0.0 {
            return;
        }

        if self.resistance == 0.0 {
            self.resistance = resistance;
        } else {
            self.resistance =
                (1.0 - RESISTANCE_ALPHA) * self.resistance + RESISTANCE_ALPHA * resistance;
        }

        let samples_left = samples_left.saturating_sub(1);
        if samples_left > 0 {
            self.state = State::Calibrating { samples_left };
            return;
        }
        self.state = State::Sampling {
            ticks_left: PPM_INTERVAL_TICKS,
        };

        debug!("MQX: End MQ-2 calibration. R(Avg): {:.2}", self.resistance);

        if settings.kohm_max > KOHM_MAX_LIMIT {
            info!("MQX: MQ-2 has invalid rmax. Resetting");
            settings.set_defaults();
        }

        if self.resistance <= settings.kohm_max {
            if !settings.ro_is_valid() {
                info!("MQX: Unable to calibrate MQ-2: High PPM value");
            }
            return;
        }

        settings.kohm_max = self.resistance;
        settings.ro = self.resistance / settings.clean_air_factor;
        settings.ro_date = clock.epoch_seconds();

        debug!("MQX: New MQ-2 Ro={:.2}", settings.ro);
    }

    fn update_ppm<R, C>(&mut self, settings: &Mq2Settings, reader: &mut R, clock: &C) -> bool
    where
        R: ResistanceSource,
        C: Clock,
    {
        let resistance = reader.calculate_resistance(Channel::Mq2);
        if resistance.is_nan() || resistance <= 0.0 {
            return false;
        }

        self.resistance = resistance;
        self.ppm = percentage(resistance / settings.ro, &Curve::CH4);

        let age = clock.epoch_seconds().wrapping_sub(settings.ro_date);
        if resistance > settings.kohm_max && age > RECALIBRATION_AGE_SECS {
            self.calibrate();
            debug!("MQX: Calibrate due to max & time");
        }

        // Rise slowly, follow drops immediately
        self.ppm_smoothed = (1.0 - PPM_ALPHA) * self.ppm_smoothed + PPM_ALPHA * self.ppm;
        if self.ppm_smoothed > self.ppm {
            self.ppm_smoothed = self.ppm;
        }

        true
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn is_calibrating(&self) -> bool {
        matches!(self.state, State::Calibrating { .. })
    }

    pub fn calibration_samples_left(&self) -> u16 {
        match self.state {
            State::Calibrating { samples_left } => samples_left,
            State::Sampling { .. } => 0,
        }
    }

    pub fn ppm(&self) -> f32 {
        self.ppm
    }

    pub fn ppm_smoothed(&self) -> f32 {
        self.ppm_smoothed
    }

    /// Last resistance in kOhm. Smoothed while calibrating.
    pub fn resistance(&self) -> f32 {
        self.resistance
    }
}
