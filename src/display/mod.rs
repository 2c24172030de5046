/*
 *  display/mod.rs
 *
 *  inkcast - six days of weather on one sheet of e-paper
 *
 *  Display subsystem - scene model, layout engine, panel drivers
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

// Core trait definitions
pub mod traits;
pub mod error;
pub mod color;

// Scene model and the fixed-geometry layout engine
pub mod scene;
pub mod icons;
pub mod layout;

// Panel drivers
pub mod drivers;

// Re-exports for convenience
pub use color::Color;
pub use error::{LayoutError, PanelError};
pub use icons::{resolve_icon, ICON_MAP};
pub use scene::{IconElement, IconSet, Scene, TextElement, VisualElement};
pub use traits::{Panel, PanelCapabilities};
