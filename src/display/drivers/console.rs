/*
 *  display/drivers/console.rs
 *
 *  inkcast - six days of weather on one sheet of e-paper
 *
 *  Panel driver that prints scenes to the log for desk runs
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

use log::info;

use crate::display::error::PanelError;
use crate::display::scene::{Scene, VisualElement};
use crate::display::traits::{Panel, PanelCapabilities};

/// Panel driver that emits each scene to the log instead of a sheet.
/// Used when running on a workstation; it reports the same geometry as
/// the real panel so layouts exercise the production coordinates.
#[derive(Debug, Default)]
pub struct ConsolePanel {
    refresh_count: usize,
}

impl ConsolePanel {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Panel for ConsolePanel {
    fn capabilities(&self) -> PanelCapabilities {
        PanelCapabilities::tricolor_296x128()
    }

    fn init(&mut self) -> Result<(), PanelError> {
        info!("Console panel ready ({}x{})", 296, 128);
        Ok(())
    }

    fn render_scene(&mut self, scene: &Scene) -> Result<(), PanelError> {
        self.refresh_count += 1;
        info!("--- refresh #{} ({} elements) ---", self.refresh_count, scene.len());
        for element in scene.iter() {
            match element {
                VisualElement::Text(t) => info!(
                    "text ({:3},{:3}) anchor ({:.1},{:.1}) {:?} on {:?}: {:?}",
                    t.anchor_position.x,
                    t.anchor_position.y,
                    t.anchor_point.0,
                    t.anchor_point.1,
                    t.fg,
                    t.bg,
                    t.text
                ),
                VisualElement::Icon(i) => info!(
                    "icon ({:3},{:3}) {:?} tile {}",
                    i.position.x, i.position.y, i.set, i.index
                ),
            }
        }
        Ok(())
    }
}
