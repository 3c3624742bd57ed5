#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod ads1115;
pub mod alarm;
mod bus;
pub mod clock;
pub mod curve;
pub mod monitor;
pub mod mq2;
pub mod mq7;
pub mod settings;

#[cfg(test)]
mod debug_utils;

pub use bus::Error;
pub use monitor::{GasMonitor, Tick};
pub use settings::Settings;
