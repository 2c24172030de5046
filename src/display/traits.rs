/*
 *  display/traits.rs
 *
 *  inkcast - six days of weather on one sheet of e-paper
 *
 *  Panel collaborator boundary
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

use super::error::PanelError;
use super::scene::Scene;

/// Static description of a panel.
#[derive(Debug, Clone, Copy)]
pub struct PanelCapabilities {
    /// Panel width in logical pixels
    pub width: u32,

    /// Panel height in logical pixels
    pub height: u32,

    /// Whether the panel has a highlight (red) plane
    pub has_highlight: bool,

    /// Minimum interval between physical refreshes. Bistable panels are
    /// damaged by rapid refresh; honoring this is a caller obligation,
    /// not enforced inside the driver.
    pub min_refresh_interval: Duration,
}

impl PanelCapabilities {
    /// The 296x128 tri-color panel this station ships with.
    pub fn tricolor_296x128() -> Self {
        Self {
            width: 296,
            height: 128,
            has_highlight: true,
            min_refresh_interval: Duration::from_secs(180),
        }
    }
}

/// A display panel that can take a scene and perform one physical
/// refresh. Drivers are thin wrappers over vendor hardware APIs; the
/// core never talks to the bus directly.
pub trait Panel: Send {
    /// Returns the capabilities of this panel
    fn capabilities(&self) -> PanelCapabilities;

    /// Bring up the panel hardware
    fn init(&mut self) -> Result<(), PanelError>;

    /// Draw the scene and refresh. Either succeeds or raises; the core
    /// does not attempt recovery from a failed refresh.
    fn render_scene(&mut self, scene: &Scene) -> Result<(), PanelError>;
}
