/*
 *  tests/forecast_cycle.rs
 *
 *  Integration tests for the full wake cycle
 *
 *  inkcast - six days of weather on one sheet of e-paper
 */

use embedded_graphics::prelude::Point;

use inkcast::config::Config;
use inkcast::cycle::run_cycle;
use inkcast::display::drivers::MockPanel;
use inkcast::display::layout::{self, build_low_battery_scene};
use inkcast::display::{Color, Scene, VisualElement};
use inkcast::power::{FixedBattery, LoggingSleep, PowerError, SleepController};
use inkcast::weather::{Forecast, ForecastSource, WeatherError};

struct CannedSource(Forecast);

impl ForecastSource for CannedSource {
    async fn fetch(&mut self) -> Result<Forecast, WeatherError> {
        Ok(self.0.clone())
    }
}

struct FailingSource;

impl ForecastSource for FailingSource {
    async fn fetch(&mut self) -> Result<Forecast, WeatherError> {
        Err(WeatherError::Api(503))
    }
}

struct RecordingSleep {
    last: Option<u32>,
}

impl SleepController for RecordingSleep {
    fn deep_sleep(&mut self, sleep_seconds: u32) -> Result<(), PowerError> {
        self.last = Some(sleep_seconds);
        Ok(())
    }
}

fn test_config() -> Config {
    Config {
        api_key: Some("test-key".into()),
        latitude: Some(37.66),
        longitude: Some(-121.87),
        city: Some("Pleasanton, CA".into()),
        ..Default::default()
    }
}

/// A snapshot observed at noon local time (-7h offset), today hot and
/// humid, the following days mild.
fn hot_humid_forecast() -> Forecast {
    let day = |dt: i64, temp_day: f64, humidity: i64, sun: bool| {
        let sun_fields = if sun {
            format!("\"sunrise\": {}, \"sunset\": {},", dt - 19500, dt + 29100)
        } else {
            String::new()
        };
        format!(
            r#"{{"dt": {dt}, {sun_fields}
                "temp": {{"morn": 68.0, "day": {temp_day}, "night": 71.0}},
                "humidity": {humidity}, "wind_speed": 10.0,
                "weather": [{{"icon": "01d"}}]}}"#
        )
    };
    let mut daily = vec![day(1724094000, 95.0, 70, true)];
    for i in 1..8 {
        daily.push(day(1724094000 + i * 86400, 72.0, 40, false));
    }
    let body = format!(
        r#"{{"daily": [{}], "current": {{"dt": 1724094000}}, "timezone_offset": -25200}}"#,
        daily.join(",")
    );
    Forecast::from_json(&body).unwrap()
}

fn texts_of(scene: &Scene) -> Vec<String> {
    scene.texts().map(|t| t.text.clone()).collect()
}

#[tokio::test]
async fn test_healthy_battery_renders_full_forecast() {
    let cfg = test_config();
    let forecast = hot_humid_forecast();
    let mut battery = FixedBattery::new(50.0);
    let mut panel = MockPanel::tricolor();
    let mut sleeper = RecordingSleep { last: None };

    let outcome = run_cycle(&cfg, &mut battery, &mut panel, &mut sleeper, move |_| {
        Ok(CannedSource(forecast))
    })
    .await
    .unwrap();

    assert!(outcome.fetched);
    let scene = panel.state().last_scene.unwrap();

    // hot day temperature and humid reading are both highlighted
    let day_temp = scene
        .texts()
        .find(|t| t.text == " 95F" && t.anchor_position == Point::new(layout::DAY_TEMP_X, layout::TEMP_VALUE_Y))
        .expect("day temperature block");
    assert_eq!(day_temp.fg, Color::White);
    assert_eq!(day_temp.bg, Some(Color::Red));

    let humidity = scene
        .texts()
        .find(|t| t.anchor_position == Point::new(layout::HUMIDITY_X, layout::READING_Y))
        .expect("humidity block");
    assert_eq!(humidity.text, " 70%");
    assert_eq!(humidity.fg, Color::White);
    assert_eq!(humidity.bg, Some(Color::Red));

    // battery is healthy so its block stays neutral
    let battery_text = scene
        .texts()
        .find(|t| t.anchor_position == Point::new(190, 14))
        .expect("battery block");
    assert_eq!(battery_text.text, "50%");
    assert_eq!(battery_text.fg, Color::Black);

    // five future-day rows, each with one small icon
    let small_icons = scene
        .icons()
        .filter(|i| i.set == inkcast::display::IconSet::Small)
        .count();
    assert_eq!(small_icons, 5);

    // observed at noon local: next 06:00 is 18 hours out
    assert_eq!(outcome.sleep_seconds, 18 * 3600);
    assert_eq!(sleeper.last, Some(18 * 3600));
}

#[tokio::test]
async fn test_low_battery_never_builds_network_stack() {
    let cfg = test_config();
    let mut battery = FixedBattery::new(10.0);
    let mut panel = MockPanel::tricolor();
    let mut sleeper = RecordingSleep { last: None };

    let outcome = run_cycle(
        &cfg,
        &mut battery,
        &mut panel,
        &mut sleeper,
        |_| -> Result<CannedSource, WeatherError> {
            panic!("forecast source constructed on low battery")
        },
    )
    .await
    .unwrap();

    assert!(!outcome.fetched);
    let scene = panel.state().last_scene.unwrap();
    assert_eq!(scene, build_low_battery_scene(10.0));
    assert_eq!(texts_of(&scene).len(), 3);
    assert!(sleeper.last.is_some());
}

#[tokio::test]
async fn test_fetch_failure_aborts_without_sleep() {
    let cfg = test_config();
    let mut battery = FixedBattery::new(80.0);
    let mut panel = MockPanel::tricolor();
    let mut sleeper = RecordingSleep { last: None };

    let err = run_cycle(&cfg, &mut battery, &mut panel, &mut sleeper, |_| {
        Ok(FailingSource)
    })
    .await
    .unwrap_err();

    assert!(err.to_string().contains("fetch"));
    assert_eq!(panel.state().render_count, 0);
    assert_eq!(sleeper.last, None);
}

#[tokio::test]
async fn test_render_failure_aborts_without_sleep() {
    let cfg = test_config();
    let forecast = hot_humid_forecast();
    let mut battery = FixedBattery::new(80.0);
    let mut panel = MockPanel::tricolor();
    panel.fail_render();
    let mut sleeper = RecordingSleep { last: None };

    let err = run_cycle(&cfg, &mut battery, &mut panel, &mut sleeper, move |_| {
        Ok(CannedSource(forecast))
    })
    .await
    .unwrap_err();

    assert!(err.to_string().contains("refresh"));
    assert_eq!(sleeper.last, None);
}

#[tokio::test]
async fn test_logging_sleep_is_a_usable_stand_in() {
    let cfg = test_config();
    let forecast = hot_humid_forecast();
    let mut battery = FixedBattery::new(35.0);
    let mut panel = MockPanel::tricolor();
    let mut sleeper = LoggingSleep;

    let outcome = run_cycle(&cfg, &mut battery, &mut panel, &mut sleeper, move |_| {
        Ok(CannedSource(forecast))
    })
    .await
    .unwrap();

    assert!(outcome.fetched);
    assert!(outcome.sleep_seconds > 0);
    assert!(outcome.sleep_seconds <= 86400);
}

#[test]
fn test_low_battery_scene_shape() {
    let scene = build_low_battery_scene(12.0);
    let texts: Vec<_> = scene.texts().collect();
    assert_eq!(texts.len(), 3);
    assert!(texts[0].fg == Color::White && texts[0].bg == Some(Color::Black));
    for element in scene.iter() {
        assert!(matches!(element, VisualElement::Text(_)));
    }
}
