/*
 *  display/icons.rs
 *
 *  inkcast - six days of weather on one sheet of e-paper
 *
 *  Provider icon-code to sprite-index resolution
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

use super::error::LayoutError;

/// Provider condition-code prefixes, in sprite-sheet order. The index of
/// a prefix in this table is the tile index in both sprite sheets.
pub const ICON_MAP: [&str; 9] = ["01", "02", "03", "04", "09", "10", "11", "13", "50"];

/// Resolve a provider icon code (e.g. "10d") to its sprite index via its
/// first two characters.
///
/// A short or unknown code is fatal for the cycle: an unmapped icon
/// means the provider contract changed underneath us, and drawing a
/// wrong or missing glyph would be a silently wrong display.
pub fn resolve_icon(code: &str) -> Result<usize, LayoutError> {
    let prefix = code
        .get(..2)
        .ok_or_else(|| LayoutError::TruncatedIconCode(code.to_string()))?;
    ICON_MAP
        .iter()
        .position(|&p| p == prefix)
        .ok_or_else(|| LayoutError::UnknownIconCode(code.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_prefixes_stable_order() {
        for (idx, prefix) in ICON_MAP.iter().enumerate() {
            assert_eq!(resolve_icon(prefix), Ok(idx));
            // full provider codes carry a day/night suffix
            assert_eq!(resolve_icon(&format!("{}d", prefix)), Ok(idx));
            assert_eq!(resolve_icon(&format!("{}n", prefix)), Ok(idx));
        }
    }

    #[test]
    fn test_unknown_code_fails() {
        assert_eq!(
            resolve_icon("99d"),
            Err(LayoutError::UnknownIconCode("99d".to_string()))
        );
    }

    #[test]
    fn test_truncated_code_fails() {
        assert_eq!(
            resolve_icon("1"),
            Err(LayoutError::TruncatedIconCode("1".to_string()))
        );
        assert_eq!(
            resolve_icon(""),
            Err(LayoutError::TruncatedIconCode(String::new()))
        );
    }
}
