/*
 *  schedule.rs
 *
 *  inkcast - six days of weather on one sheet of e-paper
 *
 *  Wake scheduling: one refresh per day at 06:00 local
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

use chrono::{DateTime, Timelike};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Timestamp out of calendar range: {0}")]
    InvalidTimestamp(i64),
}

/// Daily wake time, local clock.
pub const TARGET_HOUR: u32 = 6;
pub const TARGET_MINUTE: u32 = 0;
pub const TARGET_SECOND: u32 = 0;

const SECONDS_PER_DAY: u32 = 24 * 3600;

/// Sole output of the schedule policy, handed to the alarm collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleResult {
    pub sleep_seconds: u32,
}

/// Local seconds since midnight for an epoch instant and UTC offset.
pub fn seconds_since_midnight(utc_ts: i64, tz_offset: i64) -> Result<u32, ScheduleError> {
    let local = DateTime::from_timestamp(utc_ts + tz_offset, 0)
        .ok_or(ScheduleError::InvalidTimestamp(utc_ts))?;
    Ok(local.hour() * 3600 + local.minute() * 60 + local.second())
}

/// Seconds to sleep so the next wake lands on 06:00:00 local.
///
/// Strict `<`: exactly 06:00:00 counts as already past, so the device
/// sleeps a full day rather than waking again immediately. The result
/// is periodic with period 86400 and never exceeds 24 hours.
pub fn compute_sleep_seconds(now_local_seconds: u32) -> u32 {
    let target = TARGET_HOUR * 3600 + TARGET_MINUTE * 60 + TARGET_SECOND;
    if now_local_seconds < target {
        target - now_local_seconds
    } else {
        (SECONDS_PER_DAY - now_local_seconds) + target
    }
}

/// Full schedule computation from an epoch instant.
pub fn next_wake(utc_now: i64, tz_offset: i64) -> Result<ScheduleResult, ScheduleError> {
    let now = seconds_since_midnight(utc_now, tz_offset)?;
    Ok(ScheduleResult {
        sleep_seconds: compute_sleep_seconds(now),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_points() {
        assert_eq!(compute_sleep_seconds(0), 21600); // midnight -> 6h
        assert_eq!(compute_sleep_seconds(82800), 10800); // 23:00 -> 3h
        assert_eq!(compute_sleep_seconds(21599), 1); // one second shy
        // exactly 06:00:00 is "already past": a full day
        assert_eq!(compute_sleep_seconds(21600), 86400);
        assert_eq!(compute_sleep_seconds(21601), 86399);
    }

    #[test]
    fn test_never_more_than_a_day() {
        for now in (0..86400).step_by(613) {
            let sleep = compute_sleep_seconds(now);
            assert!(sleep >= 1 && sleep <= 86400, "now={} sleep={}", now, sleep);
            // landing instant is always 06:00:00
            assert_eq!((now + sleep) % 86400, 21600, "now={}", now);
        }
    }

    #[test]
    fn test_seconds_since_midnight_uses_offset() {
        // 2024-08-19 19:00:00 UTC at -7h is noon local
        assert_eq!(seconds_since_midnight(1724094000, -25200).unwrap(), 12 * 3600);
        // and 19:00 with no offset
        assert_eq!(seconds_since_midnight(1724094000, 0).unwrap(), 19 * 3600);
    }

    #[test]
    fn test_next_wake_end_to_end() {
        // noon local -> 18h to the next 06:00
        let r = next_wake(1724094000, -25200).unwrap();
        assert_eq!(r.sleep_seconds, 18 * 3600);
    }
}
