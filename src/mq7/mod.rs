use embedded_hal::digital::{Error as _, OutputPin, PinState};
use log::{debug, info, warn};

use crate::ads1115::{Channel, ResistanceSource};
use crate::clock::Clock;
use crate::curve::{Curve, percentage};
use crate::settings::Mq7Settings;

/// Heater on time, ms.
pub const HEAT_MS: u64 = 60_000;

/// Reading window opens this long after the heater was switched off, ms.
pub const READ_START_MS: u64 = 80_000;

/// Reading window closes and the cycle restarts this long after the heater
/// was switched off, ms.
pub const CYCLE_MS: u64 = 90_000;

/// Minimum age of Ro before a new one is accepted, seconds.
pub const CALIBRATION_COOLDOWN_SECS: u32 = 43200;

const RESISTANCE_ALPHA: f32 = 0.1;
const MIN_RESISTANCE: f32 = 0.01;

/// Ro below this is reported as never calibrated, kOhm.
const RO_UNSET_KOHM: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Heating,
    Cooling,
    Reading,
}

/// MQ-7 carbon monoxide sensor.
///
/// The heater is switched on by `start` and off once the heating phase is
/// over. From then on every cycle is a low-temperature phase sampled near its
/// end. Ro is recalibrated and PPM computed once per cycle.
pub struct Mq7<P> {
    heater: P,
    phase: Phase,
    heat_start_ms: u64,
    resistance_current: f32,
    resistance_start: f32,
    ppm_current: f32,
    ppm_start: f32,
}

impl<P: OutputPin> Mq7<P> {
    pub fn new(heater: P) -> Self {
        Self {
            heater,
            phase: Phase::Cooling,
            heat_start_ms: 0,
            resistance_current: 0.0,
            resistance_start: 0.0,
            ppm_current: 0.0,
            ppm_start: 0.0,
        }
    }

    /// Starts heat and cool cycles.
    pub fn start<C: Clock>(&mut self, clock: &C) {
        self.set_heat(true, clock);
    }

    fn set_heat<C: Clock>(&mut self, heat: bool, clock: &C) {
        self.phase = if heat { Phase::Heating } else { Phase::Cooling };
        self.heat_start_ms = clock.millis();

        if let Err(err) = self.heater.set_state(PinState::from(heat)) {
            warn!("MQX: MQ-7 heater pin failed: {:?}", err.kind());
        }
    }

    /// Advances the heat/cool cycle. Returns true if a reading occurred.
    pub fn step<R, C>(&mut self, settings: &mut Mq7Settings, reader: &mut R, clock: &C) -> bool
    where
        R: ResistanceSource,
        C: Clock,
    {
        let elapsed = clock.millis().saturating_sub(self.heat_start_ms);
        let reading = self.is_reading();

        match self.phase {
            Phase::Heating if elapsed > HEAT_MS => self.set_heat(false, clock),
            Phase::Cooling if elapsed > READ_START_MS => {
                self.phase = Phase::Reading;
                self.resistance_current = 0.0;
            }
            _ => {}
        }

        if self.phase == Phase::Reading && elapsed > CYCLE_MS {
            self.set_heat(false, clock);
            self.calibrate(settings, clock);
            self.update_ppm(settings);
        }

        // The snapshot above is taken before this tick's sample
        if reading {
            self.update_resistance(reader);
        }

        reading
    }

    fn calibrate<C: Clock>(&mut self, settings: &mut Mq7Settings, clock: &C) {
        if !settings.ro.is_finite() {
            settings.ro = 0.0;
            settings.ro_date = 0;
        }

        if self.resistance_current <= settings.kohm_max {
            if ro_unset(settings) {
                info!("MQX: Unable to calibrate MQ-7: Too high CO PPM concentration");
            }
            return;
        }

        let now = clock.epoch_seconds();
        if now.wrapping_sub(settings.ro_date) < CALIBRATION_COOLDOWN_SECS {
            return;
        }

        settings.kohm_max = self.resistance_current;
        settings.ro = self.resistance_current / settings.clean_air_factor;
        settings.ro_date = now;

        debug!(
            "MQX: New MQ-7 Ro={:.2} kOhm derived from Rs={:.2} kOhm",
            settings.ro, settings.kohm_max
        );
    }

    fn update_resistance<R: ResistanceSource>(&mut self, reader: &mut R) {
        let resistance = reader.calculate_resistance(Channel::Mq7);
        if resistance.is_nan() || resistance <= 0.0 {
            return;
        }

        if self.resistance_current < MIN_RESISTANCE {
            self.resistance_current = resistance;
            self.resistance_start = resistance;
        } else {
            self.resistance_current = (1.0 - RESISTANCE_ALPHA) * self.resistance_current
                + RESISTANCE_ALPHA * resistance;
        }
    }

    fn update_ppm(&mut self, settings: &Mq7Settings) {
        if !settings.ro_is_valid() {
            self.ppm_current = 0.0;
            self.ppm_start = 0.0;
            return;
        }

        self.ppm_current = percentage(self.resistance_current / settings.ro, &Curve::CO);
        self.ppm_start = percentage(self.resistance_start / settings.ro, &Curve::CO);
    }
}

fn ro_unset(settings: &Mq7Settings) -> bool {
    !settings.ro.is_finite() || settings.ro < RO_UNSET_KOHM
}

impl<P> Mq7<P> {
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_heating(&self) -> bool {
        self.phase == Phase::Heating
    }

    pub fn is_reading(&self) -> bool {
        self.phase == Phase::Reading
    }

    /// CO PPM when the last reading window opened.
    pub fn ppm_at_start(&self) -> f32 {
        self.ppm_start
    }

    /// CO PPM when the last reading window closed.
    pub fn ppm_at_end(&self) -> f32 {
        self.ppm_current
    }

    pub fn resistance(&self) -> f32 {
        self.resistance_current
    }

    pub fn resistance_delta(&self) -> f32 {
        self.resistance_current - self.resistance_start
    }

    /// Millis timestamp of the last heater switch.
    pub fn heater_started(&self) -> u64 {
        self.heat_start_ms
    }

    pub fn release(self) -> P {
        self.heater
    }
}
