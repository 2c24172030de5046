/*
 *  display/layout.rs
 *
 *  inkcast - six days of weather on one sheet of e-paper
 *
 *  Fixed-geometry scene construction for the 296x128 panel
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

use chrono::{DateTime, Datelike, Timelike, Utc};
use embedded_graphics::geometry::Point;
use log::debug;

use crate::classify::{classify_humidity, classify_temperature, classify_wind, Category};
use crate::weather::{Forecast, ForecastDay};

use super::color::Color;
use super::error::LayoutError;
use super::icons::resolve_icon;
use super::scene::{IconElement, IconSet, Scene, TextElement};

/// Panel width in logical pixels.
pub const DISPLAY_WIDTH: u32 = 296;
/// Panel height in logical pixels.
pub const DISPLAY_HEIGHT: u32 = 128;

pub const DAYS: [&str; 7] = [
    "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday",
];
pub const MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

/// Below this battery percent the indicator flips to its alert pairing.
/// White-on-black rather than red: a red battery figure next to red
/// temperature extremes would read as a weather alert.
pub const BATTERY_ALERT_PCT: f32 = 20.0;

// Today banner geometry. One physical panel, fixed positions.
pub const BATTERY_POS: Point = Point::new(190, 14);
pub const DATE_POS: Point = Point::new(15, 14);
pub const CITY_POS: Point = Point::new(15, 25);
pub const TODAY_ICON_POS: Point = Point::new(10, 40);
pub const MORN_TEMP_X: i32 = 118;
pub const DAY_TEMP_X: i32 = 149;
pub const NIGHT_TEMP_X: i32 = 180;
pub const TEMP_VALUE_Y: i32 = 59;
pub const TEMP_LABEL_Y: i32 = 71;
pub const HUMIDITY_X: i32 = 105;
pub const WIND_X: i32 = 155;
pub const READING_Y: i32 = 95;
pub const READING_LABEL_DY: i32 = 11;
pub const SUNRISE_POS: Point = Point::new(45, 117);
pub const SUNSET_POS: Point = Point::new(130, 117);

// Future-day rows: five banners stacked on the right edge.
pub const FUTURE_BANNER_X: i32 = 210;
pub const FUTURE_BANNER_YS: [i32; 5] = [18, 39, 60, 81, 102];
const FUTURE_DAY_DY: i32 = 10;
const FUTURE_ICON_DX: i32 = 25;
const FUTURE_TEMP_DX: i32 = 50;

// Low-battery scene: three lines centered on the panel.
const CENTER_X: i32 = (DISPLAY_WIDTH / 2) as i32;
const LOW_BATT_YS: [i32; 3] = [44, 64, 84];

/// Shift an epoch second into local wall time. Same trick as the usual
/// firmware `localtime(ts + offset)`: the shifted instant is read back
/// through UTC accessors, which then yield local calendar fields.
fn local_datetime(ts: i64, tz_offset: i64) -> Result<DateTime<Utc>, LayoutError> {
    DateTime::from_timestamp(ts + tz_offset, 0).ok_or(LayoutError::InvalidTimestamp(ts))
}

fn uppercase_date_line(dt: &DateTime<Utc>) -> String {
    let weekday = DAYS[dt.weekday().num_days_from_monday() as usize].to_uppercase();
    let month = MONTHS[dt.month() as usize - 1].to_uppercase();
    format!("{} {} {}, {}", weekday, month, dt.day(), dt.year())
}

/// A measurement block: the formatted value in its category colors, with
/// the short category label painted beneath it.
fn push_classified(
    scene: &mut Scene,
    value_text: String,
    category: Category,
    anchor: (f32, f32),
    value_pos: Point,
    label_pos: Point,
) {
    scene.push_text(
        TextElement::new(value_text, value_pos)
            .anchor(anchor.0, anchor.1)
            .colors(category.fg, Some(category.bg)),
    );
    scene.push_text(
        TextElement::new(category.label, label_pos)
            .anchor(anchor.0, anchor.1)
            .colors(category.fg, Some(category.bg)),
    );
}

/// Build the dense left-hand banner for the current day.
///
/// Element-block paint order: battery, date, city, icon, morning temp,
/// day temp, night temp, humidity, wind, sunrise, sunset.
pub fn build_today_scene(
    city: &str,
    today: &ForecastDay,
    tz_offset: i64,
    battery_percent: f32,
) -> Result<Scene, LayoutError> {
    let date = local_datetime(today.dt, tz_offset)?;
    let sunrise_ts = today.sunrise.ok_or(LayoutError::MissingSunTimes)?;
    let sunset_ts = today.sunset.ok_or(LayoutError::MissingSunTimes)?;
    let sunrise = local_datetime(sunrise_ts, tz_offset)?;
    let sunset = local_datetime(sunset_ts, tz_offset)?;

    let mut scene = Scene::new();

    // battery indicator, alert pairing when low
    let mut battery = TextElement::new(
        format!("{:2}%", battery_percent as i32),
        BATTERY_POS,
    )
    .anchor(1.0, 0.0);
    if battery_percent < BATTERY_ALERT_PCT {
        battery = battery.colors(Color::White, Some(Color::Black));
    }
    scene.push_text(battery);

    scene.push_text(TextElement::new(uppercase_date_line(&date), DATE_POS));
    scene.push_text(TextElement::new(city, CITY_POS));

    scene.push_icon(IconElement {
        set: IconSet::Large,
        index: resolve_icon(today.icon_code())?,
        position: TODAY_ICON_POS,
    });

    let morn = classify_temperature(today.temp.morn);
    let day = classify_temperature(today.temp.day);
    let night = classify_temperature(today.temp.night);
    let humidity = classify_humidity(today.humidity, today.temp.day);
    let wind = classify_wind(today.wind_speed);
    debug!(
        "today categories: morn={} day={} night={} humidity={} wind={}",
        morn.label, day.label, night.label, humidity.label, wind.label
    );

    for (temp, category, x) in [
        (today.temp.morn, morn, MORN_TEMP_X),
        (today.temp.day, day, DAY_TEMP_X),
        (today.temp.night, night, NIGHT_TEMP_X),
    ] {
        push_classified(
            &mut scene,
            format!("{:3.0}F", temp),
            category,
            (0.5, 0.0),
            Point::new(x, TEMP_VALUE_Y),
            Point::new(x, TEMP_LABEL_Y),
        );
    }

    push_classified(
        &mut scene,
        format!("{:3}%", today.humidity),
        humidity,
        (0.0, 0.5),
        Point::new(HUMIDITY_X, READING_Y),
        Point::new(HUMIDITY_X, READING_Y + READING_LABEL_DY),
    );
    push_classified(
        &mut scene,
        format!("{:3.0}mph", today.wind_speed),
        wind,
        (0.0, 0.5),
        Point::new(WIND_X, READING_Y),
        Point::new(WIND_X, READING_Y + READING_LABEL_DY),
    );

    scene.push_text(
        TextElement::new(
            format!("{:2}:{:02} AM", sunrise.hour(), sunrise.minute()),
            SUNRISE_POS,
        )
        .anchor(0.0, 0.5),
    );
    // Assumes sunset falls in the PM hours; at extreme latitudes an
    // earlier sunset renders a negative hour rather than wrapping.
    scene.push_text(
        TextElement::new(
            format!("{:2}:{:02} PM", sunset.hour() as i32 - 12, sunset.minute()),
            SUNSET_POS,
        )
        .anchor(0.0, 0.5),
    );

    Ok(scene)
}

/// Build one compact future-day banner anchored at (x, y): three-letter
/// weekday, small icon, classified day temperature. No humidity or wind;
/// only the today banner carries those.
pub fn build_future_day_scene(x: i32, y: i32, day: &ForecastDay) -> Result<Scene, LayoutError> {
    // the provider timestamps daily entries at local noon; date math
    // needs no offset for the weekday abbreviation
    let date = local_datetime(day.dt, 0)?;
    let weekday = DAYS[date.weekday().num_days_from_monday() as usize][..3].to_uppercase();

    let mut scene = Scene::new();
    scene.push_text(
        TextElement::new(weekday, Point::new(x, y + FUTURE_DAY_DY)).anchor(0.0, 0.5),
    );
    scene.push_icon(IconElement {
        set: IconSet::Small,
        index: resolve_icon(day.icon_code())?,
        position: Point::new(x + FUTURE_ICON_DX, y),
    });

    let category = classify_temperature(day.temp.day);
    scene.push_text(
        TextElement::new(
            format!("{:3.0}F", day.temp.day),
            Point::new(x + FUTURE_TEMP_DX, y + FUTURE_DAY_DY),
        )
        .anchor(0.0, 0.5)
        .colors(category.fg, Some(category.bg)),
    );

    Ok(scene)
}

/// Build the complete forecast scene: today banner plus the five stacked
/// future-day banners.
pub fn build_forecast_scene(
    city: &str,
    forecast: &Forecast,
    battery_percent: f32,
) -> Result<Scene, LayoutError> {
    let mut scene = build_today_scene(
        city,
        forecast.today(),
        forecast.timezone_offset,
        battery_percent,
    )?;
    for (day, y) in forecast.future_days().iter().zip(FUTURE_BANNER_YS) {
        scene.extend(build_future_day_scene(FUTURE_BANNER_X, y, day)?);
    }
    Ok(scene)
}

/// Fallback scene rendered when the battery gate skipped the fetch.
/// Exactly three centered text lines, none forecast-derived. This is an
/// alternate success path, not an error path.
pub fn build_low_battery_scene(battery_percent: f32) -> Scene {
    let mut scene = Scene::new();
    scene.push_text(
        TextElement::new(
            format!("{:2}%", battery_percent as i32),
            Point::new(CENTER_X, LOW_BATT_YS[0]),
        )
        .anchor(0.5, 0.5)
        .colors(Color::White, Some(Color::Black)),
    );
    scene.push_text(
        TextElement::new("Power Save Mode", Point::new(CENTER_X, LOW_BATT_YS[1]))
            .anchor(0.5, 0.5),
    );
    scene.push_text(
        TextElement::new("Please Recharge", Point::new(CENTER_X, LOW_BATT_YS[2]))
            .anchor(0.5, 0.5),
    );
    scene
}
