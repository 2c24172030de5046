/*
 *  weather.rs
 *
 *  inkcast - six days of weather on one sheet of e-paper
 *
 *  Forecast data model and One Call API client
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

use std::time::Duration;

use log::{debug, info};
use reqwest::{Client, header};
use serde::Deserialize;
use thiserror::Error;

use crate::config::FetchSettings;

/// One render cycle uses today plus five future days.
pub const DAYS_REQUIRED: usize = 6;

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Forecast parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Forecast API error: HTTP {0}")]
    Api(u16),
    #[error("Missing forecast data: {0}")]
    MissingData(String),
}

/// Morning/day/night readings for one forecast day, degrees Fahrenheit.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Temperature {
    pub morn: f64,
    pub day: f64,
    pub night: f64,
}

/// One condition summary; only the icon code is consumed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Condition {
    pub icon: String,
}

/// One daily forecast entry, immutable once parsed. Sunrise and sunset
/// are carried only on the today entry of a snapshot.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ForecastDay {
    /// Seconds since epoch, UTC; source of weekday/date
    pub dt: i64,
    #[serde(default)]
    pub sunrise: Option<i64>,
    #[serde(default)]
    pub sunset: Option<i64>,
    pub temp: Temperature,
    /// Integer percent, 0-100
    pub humidity: i64,
    /// Miles per hour
    pub wind_speed: f64,
    #[serde(rename = "weather")]
    pub conditions: Vec<Condition>,
}

impl ForecastDay {
    /// The provider icon code for this day, e.g. "10d". Empty when the
    /// conditions array is empty; icon resolution then fails downstream,
    /// which is the intended hard stop for contract mismatches.
    pub fn icon_code(&self) -> &str {
        self.conditions.first().map(|c| c.icon.as_str()).unwrap_or("")
    }
}

#[derive(Debug, Clone, Deserialize)]
struct CurrentConditions {
    dt: i64,
}

#[derive(Debug, Clone, Deserialize)]
struct OneCallResponse {
    daily: Vec<ForecastDay>,
    current: CurrentConditions,
    timezone_offset: i64,
}

/// One fetched snapshot: today plus the following days, the observation
/// instant, and the local UTC offset the provider reports.
#[derive(Debug, Clone)]
pub struct Forecast {
    pub daily: Vec<ForecastDay>,
    /// Observation time, seconds since epoch UTC
    pub current_dt: i64,
    /// Local offset from UTC in seconds
    pub timezone_offset: i64,
}

impl Forecast {
    /// Parse and validate a One Call response body.
    pub fn from_json(body: &str) -> Result<Self, WeatherError> {
        let resp: OneCallResponse = serde_json::from_str(body)?;
        if resp.daily.len() < DAYS_REQUIRED {
            return Err(WeatherError::MissingData(format!(
                "need {} daily entries, got {}",
                DAYS_REQUIRED,
                resp.daily.len()
            )));
        }
        Ok(Self {
            daily: resp.daily,
            current_dt: resp.current.dt,
            timezone_offset: resp.timezone_offset,
        })
    }

    pub fn today(&self) -> &ForecastDay {
        &self.daily[0]
    }

    /// The five future-day entries.
    pub fn future_days(&self) -> &[ForecastDay] {
        &self.daily[1..DAYS_REQUIRED]
    }
}

/// Anything the cycle can pull a forecast snapshot from. The production
/// implementation is `WeatherClient`; tests substitute canned data.
pub trait ForecastSource {
    fn fetch(&mut self) -> impl std::future::Future<Output = Result<Forecast, WeatherError>> + Send;
}

/// One Call API client. Constructed only after the battery gate allows
/// a fetch; building it is the first network-stack activity of a cycle.
#[derive(Debug)]
pub struct WeatherClient {
    base_url: String,
    api_key: String,
    lat: f64,
    lon: f64,
    client: Client,
}

const ONECALL_URL: &str = "https://api.openweathermap.org/data/3.0/onecall";

impl WeatherClient {
    pub fn new(settings: &FetchSettings) -> Result<Self, WeatherError> {
        const VERSION: &str = concat!(env!("CARGO_PKG_NAME"), " v", env!("CARGO_PKG_VERSION"));

        let mut headers = header::HeaderMap::new();
        headers.insert("User-Agent", header::HeaderValue::from_static(VERSION));
        headers.insert("Accept", header::HeaderValue::from_static("application/json"));
        headers.insert("Connection", header::HeaderValue::from_static("close"));

        // bounded timeouts: a hung fetch would otherwise hold the device
        // out of deep sleep
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(15))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            base_url: ONECALL_URL.to_string(),
            api_key: settings.api_key.clone(),
            lat: settings.latitude,
            lon: settings.longitude,
            client,
        })
    }

    async fn fetch_forecast(&self) -> Result<Forecast, WeatherError> {
        info!("Fetching forecast for {:.4},{:.4}...", self.lat, self.lon);

        let params = [
            ("lat", self.lat.to_string()),
            ("lon", self.lon.to_string()),
            ("units", "imperial".to_string()),
            ("exclude", "minutely,hourly".to_string()),
            ("appid", self.api_key.clone()),
        ];

        let response = self
            .client
            .get(&self.base_url)
            .query(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(WeatherError::Api(status.as_u16()));
        }

        let body = response.text().await?;
        let forecast = Forecast::from_json(&body)?;
        debug!(
            "Forecast snapshot: {} daily entries, tz offset {}s",
            forecast.daily.len(),
            forecast.timezone_offset
        );
        Ok(forecast)
    }
}

impl ForecastSource for WeatherClient {
    async fn fetch(&mut self) -> Result<Forecast, WeatherError> {
        self.fetch_forecast().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day_json(dt: i64, with_sun: bool) -> String {
        let sun = if with_sun {
            r#""sunrise": 1723972800, "sunset": 1724022000,"#
        } else {
            ""
        };
        format!(
            r#"{{
                "dt": {dt},
                {sun}
                "temp": {{"morn": 58.0, "day": 75.0, "night": 60.0}},
                "humidity": 45,
                "wind_speed": 7.5,
                "weather": [{{"icon": "01d"}}]
            }}"#
        )
    }

    fn snapshot_json(days: usize) -> String {
        let daily: Vec<String> = (0..days)
            .map(|i| day_json(1723950000 + i as i64 * 86400, i == 0))
            .collect();
        format!(
            r#"{{
                "daily": [{}],
                "current": {{"dt": 1723975000}},
                "timezone_offset": -25200
            }}"#,
            daily.join(",")
        )
    }

    #[test]
    fn test_parse_full_snapshot() {
        let forecast = Forecast::from_json(&snapshot_json(8)).unwrap();
        assert_eq!(forecast.daily.len(), 8);
        assert_eq!(forecast.current_dt, 1723975000);
        assert_eq!(forecast.timezone_offset, -25200);
        assert_eq!(forecast.today().sunrise, Some(1723972800));
        assert_eq!(forecast.future_days().len(), 5);
        // sun times only ride on the today entry
        assert_eq!(forecast.future_days()[0].sunrise, None);
        assert_eq!(forecast.today().icon_code(), "01d");
    }

    #[test]
    fn test_too_few_days_rejected() {
        let err = Forecast::from_json(&snapshot_json(5)).unwrap_err();
        assert!(matches!(err, WeatherError::MissingData(_)));
    }

    #[test]
    fn test_malformed_body_rejected() {
        assert!(matches!(
            Forecast::from_json("{\"daily\": 42}"),
            Err(WeatherError::Parse(_))
        ));
        assert!(matches!(
            Forecast::from_json("not json"),
            Err(WeatherError::Parse(_))
        ));
    }

    #[test]
    fn test_icon_code_empty_when_no_conditions() {
        let mut forecast = Forecast::from_json(&snapshot_json(6)).unwrap();
        forecast.daily[0].conditions.clear();
        assert_eq!(forecast.today().icon_code(), "");
    }
}
