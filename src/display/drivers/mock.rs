/*
 *  display/drivers/mock.rs
 *
 *  inkcast - six days of weather on one sheet of e-paper
 *
 *  Mock panel driver for testing without hardware
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

use std::sync::{Arc, Mutex};

use crate::display::error::PanelError;
use crate::display::scene::Scene;
use crate::display::traits::{Panel, PanelCapabilities};

/// Panel stand-in that records every operation instead of driving
/// hardware. Tests clone the shared state out through [`MockPanel::state`]
/// and assert on counts and the last rendered scene.
#[derive(Debug, Clone)]
pub struct MockPanel {
    capabilities: PanelCapabilities,
    state: Arc<Mutex<MockPanelState>>,
}

/// Internal state for the mock panel (shared for inspection in tests)
#[derive(Debug, Clone, Default)]
pub struct MockPanelState {
    /// Number of times init() was called
    pub init_count: usize,

    /// Number of times render_scene() was called
    pub render_count: usize,

    /// The most recently rendered scene, if any
    pub last_scene: Option<Scene>,

    /// Whether init() has completed
    pub is_initialized: bool,

    /// When set, init() fails
    pub simulate_init_failure: bool,

    /// When set, render_scene() fails
    pub simulate_render_failure: bool,
}

impl MockPanel {
    pub fn new(capabilities: PanelCapabilities) -> Self {
        Self {
            capabilities,
            state: Arc::new(Mutex::new(MockPanelState::default())),
        }
    }

    /// A mock with the geometry of the production tri-color sheet.
    pub fn tricolor() -> Self {
        Self::new(PanelCapabilities::tricolor_296x128())
    }

    /// Snapshot of the recorded state.
    pub fn state(&self) -> MockPanelState {
        self.state.lock().unwrap().clone()
    }

    /// Arrange for the next init() call to fail.
    pub fn fail_init(&self) {
        self.state.lock().unwrap().simulate_init_failure = true;
    }

    /// Arrange for the next render_scene() call to fail.
    pub fn fail_render(&self) {
        self.state.lock().unwrap().simulate_render_failure = true;
    }
}

impl Panel for MockPanel {
    fn capabilities(&self) -> PanelCapabilities {
        self.capabilities
    }

    fn init(&mut self) -> Result<(), PanelError> {
        let mut state = self.state.lock().unwrap();
        state.init_count += 1;
        if state.simulate_init_failure {
            return Err(PanelError::InitializationFailed(
                "simulated init failure".to_string(),
            ));
        }
        state.is_initialized = true;
        Ok(())
    }

    fn render_scene(&mut self, scene: &Scene) -> Result<(), PanelError> {
        let mut state = self.state.lock().unwrap();
        if state.simulate_render_failure {
            return Err(PanelError::RefreshFailed(
                "simulated refresh failure".to_string(),
            ));
        }
        state.render_count += 1;
        state.last_scene = Some(scene.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::color::Color;
    use crate::display::scene::TextElement;
    use embedded_graphics::prelude::Point;

    #[test]
    fn test_mock_records_renders() {
        let mut panel = MockPanel::tricolor();
        panel.init().unwrap();

        let mut scene = Scene::new();
        scene.push_text(TextElement::new("hello", Point::new(4, 4)).colors(Color::Black, None));
        panel.render_scene(&scene).unwrap();

        let state = panel.state();
        assert!(state.is_initialized);
        assert_eq!(state.init_count, 1);
        assert_eq!(state.render_count, 1);
        assert_eq!(state.last_scene.unwrap().len(), 1);
    }

    #[test]
    fn test_simulated_failures() {
        let mut panel = MockPanel::tricolor();
        panel.fail_init();
        assert!(panel.init().is_err());
        assert!(!panel.state().is_initialized);

        let mut panel = MockPanel::tricolor();
        panel.fail_render();
        assert!(panel.render_scene(&Scene::new()).is_err());
        assert_eq!(panel.state().render_count, 0);
    }

    #[test]
    fn test_capability_report() {
        let panel = MockPanel::tricolor();
        let caps = panel.capabilities();
        assert_eq!(caps.width, 296);
        assert_eq!(caps.height, 128);
        assert!(caps.has_highlight);
    }
}
