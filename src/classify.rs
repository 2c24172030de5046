/*
 *  classify.rs
 *
 *  inkcast - six days of weather on one sheet of e-paper
 *
 *  Threshold classification of raw readings into display categories
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

use crate::display::color::Color;

/// How a single reading should be presented: a short label (5 chars max,
/// the panel font is tiny) plus the foreground/background pairing.
///
/// Every branch of every classifier keeps `fg != bg`; text drawn in the
/// same color as its backing rectangle would be invisible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub label: &'static str,
    pub fg: Color,
    pub bg: Color,
}

impl Category {
    const fn new(label: &'static str, fg: Color, bg: Color) -> Self {
        Self { label, fg, bg }
    }

    /// True when the pairing uses the red highlight backing.
    pub fn is_alert(&self) -> bool {
        self.bg == Color::Red
    }
}

/// Classify a temperature reading in degrees Fahrenheit.
///
/// Total over all reals: the one-sided `<` ladder terminates at the
/// final `else`, so -40.0 and 130.0 both land in a defined band.
/// Only the extremes (freezing, hot) use the red alert backing.
pub fn classify_temperature(temp_f: f64) -> Category {
    if temp_f < 30.0 {
        Category::new("Frz", Color::White, Color::Red)
    } else if temp_f < 50.0 {
        Category::new("Cold", Color::White, Color::Black)
    } else if temp_f < 70.0 {
        Category::new("Cool", Color::Black, Color::White)
    } else if temp_f < 80.0 {
        Category::new("Mild", Color::Black, Color::White)
    } else if temp_f < 90.0 {
        Category::new("Warm", Color::White, Color::Black)
    } else {
        Category::new("Hot", Color::White, Color::Red)
    }
}

/// Classify a relative-humidity reading against the concurrent daytime
/// temperature.
///
/// Humidity alone does not decide the alert: muggy air is only flagged
/// when the same day's temperature is at or above 70F. Humid-but-cool
/// days read as "Norm".
pub fn classify_humidity(humidity_pct: i64, same_day_temp_f: f64) -> Category {
    if humidity_pct < 20 {
        Category::new("Dry", Color::Black, Color::White)
    } else if humidity_pct < 60 {
        Category::new("Norm", Color::Black, Color::White)
    } else if same_day_temp_f >= 70.0 {
        Category::new("Hum", Color::White, Color::Red)
    } else {
        Category::new("Norm", Color::Black, Color::White)
    }
}

/// Classify a wind-speed reading in miles per hour.
pub fn classify_wind(speed_mph: f64) -> Category {
    if speed_mph < 5.0 {
        Category::new("Calm", Color::Black, Color::White)
    } else if speed_mph < 15.0 {
        Category::new("Brzy", Color::Black, Color::White)
    } else if speed_mph < 30.0 {
        Category::new("Windy", Color::White, Color::Black)
    } else {
        Category::new("Storm", Color::White, Color::Red)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temperature_boundaries_both_sides() {
        // each of the five boundaries, approached from below and hit exactly
        let cases = [
            (29.999, "Frz", Color::White, Color::Red),
            (30.0, "Cold", Color::White, Color::Black),
            (49.999, "Cold", Color::White, Color::Black),
            (50.0, "Cool", Color::Black, Color::White),
            (69.999, "Cool", Color::Black, Color::White),
            (70.0, "Mild", Color::Black, Color::White),
            (79.999, "Mild", Color::Black, Color::White),
            (80.0, "Warm", Color::White, Color::Black),
            (89.999, "Warm", Color::White, Color::Black),
            (90.0, "Hot", Color::White, Color::Red),
        ];
        for (t, label, fg, bg) in cases {
            let cat = classify_temperature(t);
            assert_eq!(cat.label, label, "temp {}", t);
            assert_eq!(cat.fg, fg, "temp {}", t);
            assert_eq!(cat.bg, bg, "temp {}", t);
        }
    }

    #[test]
    fn test_temperature_total_over_extremes() {
        assert_eq!(classify_temperature(-60.0).label, "Frz");
        assert_eq!(classify_temperature(140.0).label, "Hot");
        for t in [-60.0, 0.0, 45.5, 72.0, 88.0, 140.0] {
            let cat = classify_temperature(t);
            assert_ne!(cat.fg, cat.bg, "legibility at temp {}", t);
            assert!(cat.label.len() <= 5);
        }
    }

    #[test]
    fn test_humidity_needs_concurrent_heat() {
        // high humidity only alerts when the day is >= 70F
        let hot_humid = classify_humidity(60, 70.0);
        assert_eq!(hot_humid.label, "Hum");
        assert_eq!((hot_humid.fg, hot_humid.bg), (Color::White, Color::Red));

        let cool_humid = classify_humidity(95, 69.9);
        assert_eq!(cool_humid.label, "Norm");
        assert!(!cool_humid.is_alert());
    }

    #[test]
    fn test_humidity_bands() {
        assert_eq!(classify_humidity(0, 90.0).label, "Dry");
        assert_eq!(classify_humidity(19, 90.0).label, "Dry");
        assert_eq!(classify_humidity(20, 90.0).label, "Norm");
        assert_eq!(classify_humidity(59, 90.0).label, "Norm");
        assert_eq!(classify_humidity(100, 90.0).label, "Hum");
    }

    #[test]
    fn test_wind_bands() {
        assert_eq!(classify_wind(0.0).label, "Calm");
        assert_eq!(classify_wind(4.999).label, "Calm");
        assert_eq!(classify_wind(5.0).label, "Brzy");
        assert_eq!(classify_wind(14.999).label, "Brzy");
        let windy = classify_wind(15.0);
        assert_eq!(windy.label, "Windy");
        assert_eq!((windy.fg, windy.bg), (Color::White, Color::Black));
        let storm = classify_wind(30.0);
        assert_eq!(storm.label, "Storm");
        assert_eq!((storm.fg, storm.bg), (Color::White, Color::Red));
    }

    #[test]
    fn test_all_branches_legible() {
        for h in [0, 19, 20, 59, 60, 100] {
            for t in [60.0, 75.0] {
                let cat = classify_humidity(h, t);
                assert_ne!(cat.fg, cat.bg);
            }
        }
        for w in [0.0, 5.0, 15.0, 30.0, 80.0] {
            let cat = classify_wind(w);
            assert_ne!(cat.fg, cat.bg);
        }
    }
}
