/*
 *  main.rs
 *
 *  inkcast - six days of weather on one sheet of e-paper
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
use env_logger::Env;
use log::info;

use inkcast::config;
use inkcast::cycle::run_cycle;
use inkcast::display::drivers::ConsolePanel;
use inkcast::display::Panel;
use inkcast::power::{FixedBattery, LoggingSleep};
use inkcast::weather::WeatherClient;

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (cfg, cli) = config::load().context("configuration")?;

    let filter = cfg.log_level.as_deref().unwrap_or("info").to_string();
    env_logger::Builder::from_env(Env::default().default_filter_or(filter)).init();

    info!("inkcast v.{} built {}", env!("CARGO_PKG_VERSION"), BUILD_DATE);

    if cli.dump_config {
        println!("{}", serde_yaml::to_string(&cfg)?);
        return Ok(());
    }

    // Host stand-ins for the hardware collaborators. A deployment build
    // swaps these for the fuel gauge, panel, and RTC alarm drivers.
    let mut battery = FixedBattery::new(cli.battery_percent.unwrap_or(100.0));
    let mut panel = ConsolePanel::new();
    let mut sleeper = LoggingSleep;

    panel.init().context("panel init")?;

    let outcome = run_cycle(&cfg, &mut battery, &mut panel, &mut sleeper, |settings| {
        WeatherClient::new(settings)
    })
    .await?;

    info!(
        "Cycle complete: battery {:.0}%, fetched={}, next wake in {}s",
        outcome.battery_percent, outcome.fetched, outcome.sleep_seconds
    );
    Ok(())
}
