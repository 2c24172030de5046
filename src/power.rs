/*
 *  power.rs
 *
 *  inkcast - six days of weather on one sheet of e-paper
 *
 *  Battery gate and the fuel-gauge / deep-sleep collaborator seams
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use log::info;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PowerError {
    #[error("Battery gauge read failed: {0}")]
    Gauge(String),
    #[error("Deep sleep transition failed: {0}")]
    Sleep(String),
}

/// Battery floor for network activity. At or below this, the cycle
/// renders the power-save scene without ever touching the radio.
pub const FETCH_BATTERY_FLOOR: f32 = 15.0;

/// The single gate for all network activity this cycle.
pub fn decide_fetch(battery_percent: f32) -> bool {
    battery_percent > FETCH_BATTERY_FLOOR
}

/// One battery sample, taken once per cycle before anything else runs.
/// `fetch_enabled` is derived from the sample, never set independently.
#[derive(Debug, Clone, Copy)]
pub struct PowerState {
    pub battery_percent: f32,
    fetch_enabled: bool,
}

impl PowerState {
    pub fn measure<B: BatteryMonitor + ?Sized>(monitor: &mut B) -> Result<Self, PowerError> {
        let battery_percent = monitor.cell_percent()?;
        let fetch_enabled = decide_fetch(battery_percent);
        info!(
            "Battery at {:.1}%, fetch {}",
            battery_percent,
            if fetch_enabled { "enabled" } else { "disabled" }
        );
        Ok(Self {
            battery_percent,
            fetch_enabled,
        })
    }

    pub fn fetch_enabled(&self) -> bool {
        self.fetch_enabled
    }
}

/// Fuel-gauge collaborator: one read per cycle.
pub trait BatteryMonitor {
    fn cell_percent(&mut self) -> Result<f32, PowerError>;
}

/// Deep-sleep collaborator. On the device this powers the board down
/// until the wake deadline and does not return; host stand-ins return
/// so the process can exit normally.
pub trait SleepController {
    fn deep_sleep(&mut self, sleep_seconds: u32) -> Result<(), PowerError>;
}

/// Host stand-in for the fuel gauge: reports a fixed percentage, from
/// the `--battery-percent` override or a full charge.
#[derive(Debug, Clone, Copy)]
pub struct FixedBattery {
    percent: f32,
}

impl FixedBattery {
    pub fn new(percent: f32) -> Self {
        Self {
            percent: percent.clamp(0.0, 100.0),
        }
    }
}

impl BatteryMonitor for FixedBattery {
    fn cell_percent(&mut self) -> Result<f32, PowerError> {
        Ok(self.percent)
    }
}

/// Host stand-in for the alarm/deep-sleep primitive: logs the deadline
/// instead of powering anything down.
#[derive(Debug, Default)]
pub struct LoggingSleep;

impl SleepController for LoggingSleep {
    fn deep_sleep(&mut self, sleep_seconds: u32) -> Result<(), PowerError> {
        info!(
            "Would deep-sleep for {} seconds ({}h{:02}m)",
            sleep_seconds,
            sleep_seconds / 3600,
            (sleep_seconds % 3600) / 60
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_gate_boundary() {
        assert!(!decide_fetch(15.0));
        assert!(decide_fetch(15.01));
        assert!(!decide_fetch(0.0));
        assert!(decide_fetch(100.0));
    }

    #[test]
    fn test_power_state_derives_gate() {
        let mut low = FixedBattery::new(10.0);
        let state = PowerState::measure(&mut low).unwrap();
        assert_eq!(state.battery_percent, 10.0);
        assert!(!state.fetch_enabled());

        let mut full = FixedBattery::new(88.0);
        assert!(PowerState::measure(&mut full).unwrap().fetch_enabled());
    }

    #[test]
    fn test_fixed_battery_clamps() {
        let mut b = FixedBattery::new(140.0);
        assert_eq!(b.cell_percent().unwrap(), 100.0);
    }
}
