use crate::settings::{Mq2Settings, Mq7Settings};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum AlarmLevel {
    #[default]
    Normal,
    Warning,
    Alarm,
}

impl AlarmLevel {
    pub fn from_ppm(ppm: f32, warning_ppm: f32, alarm_ppm: f32) -> Self {
        if ppm >= alarm_ppm {
            AlarmLevel::Alarm
        } else if ppm >= warning_ppm {
            AlarmLevel::Warning
        } else {
            AlarmLevel::Normal
        }
    }
}

/// MQ-2 level from the smoothed PPM trace.
pub fn mq2_level(ppm_smoothed: f32, settings: &Mq2Settings) -> AlarmLevel {
    AlarmLevel::from_ppm(
        ppm_smoothed,
        settings.warning_level_ppm,
        settings.alarm_level_ppm,
    )
}

/// MQ-7 level from the end of cycle PPM.
///
/// The MQ-7 goes back down slowly, so while the resistance keeps rising
/// within a cycle by more than `alarm_off_delta` an alarm is held at warning.
pub fn mq7_level(ppm: f32, resistance_delta: f32, settings: &Mq7Settings) -> AlarmLevel {
    match AlarmLevel::from_ppm(ppm, settings.warning_level_ppm, settings.alarm_level_ppm) {
        AlarmLevel::Alarm if resistance_delta > settings.alarm_off_delta => AlarmLevel::Warning,
        level => level,
    }
}
