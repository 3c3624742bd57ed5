//! Calibration and alarm settings shared by both sensors.
//!
//! The caller owns the record and decides how it is persisted. Sensors only
//! mutate their own half during calibration.

/// Smallest usable baseline resistance, kOhm.
pub const MIN_RO: f32 = 0.01;

/// Returns true if `ro` can be used as a ratio denominator.
pub fn ro_is_valid(ro: f32) -> bool {
    ro.is_finite() && ro >= MIN_RO
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mq2Settings {
    /// Rs/Ro ratio in clean air.
    pub clean_air_factor: f32,
    /// Maximum sensor resistance seen in clean air, kOhm.
    pub kohm_max: f32,
    /// Baseline resistance derived from `kohm_max`, kOhm.
    pub ro: f32,
    /// Epoch seconds of the last `ro` update.
    pub ro_date: u32,
    pub warning_level_ppm: f32,
    pub alarm_level_ppm: f32,
}

impl Mq2Settings {
    pub fn set_defaults(&mut self) {
        *self = Self::default();
    }

    pub fn ro_is_valid(&self) -> bool {
        ro_is_valid(self.ro)
    }
}

impl Default for Mq2Settings {
    fn default() -> Self {
        Self {
            clean_air_factor: 9.83,
            // High enough to prevent calibration in a high PPM environment
            kohm_max: 50.0,
            ro: 0.0,
            ro_date: 0,
            warning_level_ppm: 60.0,
            alarm_level_ppm: 100.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mq7Settings {
    pub clean_air_factor: f32,
    pub kohm_max: f32,
    pub ro: f32,
    pub ro_date: u32,
    pub warning_level_ppm: f32,
    pub alarm_level_ppm: f32,
    /// MQ-7 recovers slowly. A rising resistance by more than this many kOhm
    /// within a cycle clears the alarm state.
    pub alarm_off_delta: f32,
}

impl Mq7Settings {
    pub fn set_defaults(&mut self) {
        *self = Self::default();
    }

    pub fn ro_is_valid(&self) -> bool {
        ro_is_valid(self.ro)
    }
}

impl Default for Mq7Settings {
    fn default() -> Self {
        Self {
            clean_air_factor: 28.3,
            kohm_max: 90.0,
            ro: 0.0,
            ro_date: 0,
            warning_level_ppm: 15.0,
            alarm_level_ppm: 50.0,
            alarm_off_delta: 0.1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Settings {
    pub mq2: Mq2Settings,
    pub mq7: Mq7Settings,
}

impl Settings {
    pub fn set_defaults(&mut self) {
        self.mq2.set_defaults();
        self.mq7.set_defaults();
    }
}
