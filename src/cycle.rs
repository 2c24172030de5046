/*
 *  cycle.rs
 *
 *  inkcast - six days of weather on one sheet of e-paper
 *
 *  One wake cycle: measure, maybe fetch, render, schedule, sleep
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

use anyhow::Context;
use chrono::Utc;
use log::{debug, info};

use crate::config::{Config, FetchSettings};
use crate::display::layout::{build_forecast_scene, build_low_battery_scene};
use crate::display::traits::Panel;
use crate::power::{BatteryMonitor, PowerState, SleepController};
use crate::schedule::next_wake;
use crate::weather::{ForecastSource, WeatherError};

/// The whole-cycle state machine. The terminal state is Sleep: the
/// device loses execution context there and restarts at Start on the
/// next wake, carrying nothing over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CycleState {
    Start,
    MeasureBattery,
    FetchAndRender,
    LowBatteryRender,
    Schedule,
    Sleep,
}

/// What one cycle did, for logging and tests. On real hardware the
/// deep-sleep call never returns and this value is never observed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleOutcome {
    pub battery_percent: f32,
    pub fetched: bool,
    pub sleep_seconds: u32,
}

fn enter(state: CycleState) -> CycleState {
    debug!("cycle state -> {:?}", state);
    state
}

/// Run one complete wake cycle against the four collaborator seams.
///
/// `make_source` is only invoked when the battery gate allows a fetch;
/// keeping construction behind the gate is what guarantees the network
/// stack is never brought up on a low battery. Any failure aborts the
/// cycle before a sleep is scheduled; the low-battery render is the one
/// deliberate alternate success path.
pub async fn run_cycle<B, P, SL, S, F>(
    cfg: &Config,
    battery: &mut B,
    panel: &mut P,
    sleeper: &mut SL,
    make_source: F,
) -> anyhow::Result<CycleOutcome>
where
    B: BatteryMonitor,
    P: Panel,
    SL: SleepController,
    S: ForecastSource,
    F: FnOnce(&FetchSettings) -> Result<S, WeatherError>,
{
    enter(CycleState::Start);

    enter(CycleState::MeasureBattery);
    let power = PowerState::measure(battery).context("battery measurement")?;

    // local "now" for scheduling: the snapshot's observation instant
    // when we fetched, the system clock plus the configured fallback
    // offset when we did not
    let (fetched, now_utc, tz_offset) = if power.fetch_enabled() {
        enter(CycleState::FetchAndRender);
        let settings = cfg
            .require_fetch_settings()
            .context("fetch enabled but configuration incomplete")?;
        let mut source = make_source(&settings).context("forecast source init")?;
        let forecast = source.fetch().await.context("forecast fetch")?;

        let scene = build_forecast_scene(cfg.city(), &forecast, power.battery_percent)
            .context("forecast layout")?;
        info!("Rendering forecast scene ({} elements)", scene.len());
        panel.render_scene(&scene).context("panel refresh")?;

        (true, forecast.current_dt, forecast.timezone_offset)
    } else {
        enter(CycleState::LowBatteryRender);
        let scene = build_low_battery_scene(power.battery_percent);
        info!("Rendering power-save scene");
        panel.render_scene(&scene).context("panel refresh")?;

        (false, Utc::now().timestamp(), cfg.fallback_tz_offset())
    };

    enter(CycleState::Schedule);
    let schedule = next_wake(now_utc, tz_offset).context("wake scheduling")?;
    info!("Next wake in {} seconds", schedule.sleep_seconds);

    enter(CycleState::Sleep);
    sleeper
        .deep_sleep(schedule.sleep_seconds)
        .context("deep sleep transition")?;

    Ok(CycleOutcome {
        battery_percent: power.battery_percent,
        fetched,
        sleep_seconds: schedule.sleep_seconds,
    })
}
