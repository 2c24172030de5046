/*
 *  display/color.rs
 *
 *  inkcast - six days of weather on one sheet of e-paper
 *
 *  Three-value palette for the tri-color panel
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

use embedded_graphics::pixelcolor::{BinaryColor, Rgb888};

/// Renderable colors on the panel: background, foreground, and the one
/// highlight plane the controller drives in a second pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    /// Paper background
    White,

    /// Foreground ink
    Black,

    /// Highlight plane
    Red,
}

impl Color {
    /// True for the color that lives on the highlight plane.
    pub fn is_highlight(&self) -> bool {
        matches!(self, Color::Red)
    }

    /// Collapse to on/off for a driver without a highlight plane.
    /// Red degrades to ink rather than vanishing.
    pub fn to_binary(&self) -> BinaryColor {
        match self {
            Color::White => BinaryColor::Off,
            Color::Black => BinaryColor::On,
            Color::Red => BinaryColor::On,
        }
    }

    /// Full-color equivalent, for emulation and diagnostics output.
    pub fn to_rgb888(&self) -> Rgb888 {
        match self {
            Color::White => Rgb888::new(255, 255, 255),
            Color::Black => Rgb888::new(0, 0, 0),
            Color::Red => Rgb888::new(255, 0, 0),
        }
    }
}
