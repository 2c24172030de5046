/*
 *  display/scene.rs
 *
 *  inkcast - six days of weather on one sheet of e-paper
 *
 *  Declarative scene model handed to the panel collaborator
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

use embedded_graphics::geometry::Point;

use super::color::Color;

/// A positioned text label.
///
/// `anchor_point` is the fractional alignment of the label's own bounding
/// box (0,0 = top-left, 1,0 = top-right, 0.5,0.5 = centered) and
/// `anchor_position` is the pixel the anchor is pinned to.
#[derive(Debug, Clone, PartialEq)]
pub struct TextElement {
    pub text: String,
    pub anchor_point: (f32, f32),
    pub anchor_position: Point,
    pub fg: Color,
    /// None means transparent: the panel background shows through.
    pub bg: Option<Color>,
}

impl TextElement {
    pub fn new(text: impl Into<String>, anchor_position: Point) -> Self {
        Self {
            text: text.into(),
            anchor_point: (0.0, 0.0),
            anchor_position,
            fg: Color::Black,
            bg: None,
        }
    }

    /// Builder: set the fractional anchor.
    pub fn anchor(mut self, fx: f32, fy: f32) -> Self {
        self.anchor_point = (fx, fy);
        self
    }

    /// Builder: set colors.
    pub fn colors(mut self, fg: Color, bg: Option<Color>) -> Self {
        self.fg = fg;
        self.bg = bg;
        self
    }
}

/// Which sprite sheet an icon index points into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconSet {
    /// 70x70 tiles, today banner
    Large,
    /// 20x20 tiles, future-day rows
    Small,
}

impl IconSet {
    /// Edge length of one tile in the sheet.
    pub fn tile_size(&self) -> u32 {
        match self {
            IconSet::Large => 70,
            IconSet::Small => 20,
        }
    }
}

/// A positioned sprite reference. The index comes from the icon table
/// (see `display::icons`); the asset loader owns the actual bitmaps.
#[derive(Debug, Clone, PartialEq)]
pub struct IconElement {
    pub set: IconSet,
    pub index: usize,
    pub position: Point,
}

/// One paintable item. The sequence order is paint order: a later
/// element may overlay an earlier one at the same coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum VisualElement {
    Text(TextElement),
    Icon(IconElement),
}

/// An immutable, ordered list of visual elements: the sole hand-off
/// artifact between the layout engine and the panel collaborator.
/// Built fresh every wake cycle, never mutated after construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    elements: Vec<VisualElement>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_text(&mut self, text: TextElement) {
        self.elements.push(VisualElement::Text(text));
    }

    pub fn push_icon(&mut self, icon: IconElement) {
        self.elements.push(VisualElement::Icon(icon));
    }

    /// Append every element of `other`, preserving paint order.
    pub fn extend(&mut self, other: Scene) {
        self.elements.extend(other.elements);
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &VisualElement> {
        self.elements.iter()
    }

    /// Text elements only, in paint order.
    pub fn texts(&self) -> impl Iterator<Item = &TextElement> {
        self.elements.iter().filter_map(|e| match e {
            VisualElement::Text(t) => Some(t),
            VisualElement::Icon(_) => None,
        })
    }

    /// Icon elements only, in paint order.
    pub fn icons(&self) -> impl Iterator<Item = &IconElement> {
        self.elements.iter().filter_map(|e| match e {
            VisualElement::Icon(i) => Some(i),
            VisualElement::Text(_) => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paint_order_preserved() {
        let mut scene = Scene::new();
        scene.push_text(TextElement::new("first", Point::new(0, 0)));
        scene.push_icon(IconElement {
            set: IconSet::Small,
            index: 3,
            position: Point::new(10, 10),
        });
        scene.push_text(TextElement::new("last", Point::new(5, 5)));

        assert_eq!(scene.len(), 3);
        let kinds: Vec<_> = scene
            .iter()
            .map(|e| matches!(e, VisualElement::Text(_)))
            .collect();
        assert_eq!(kinds, vec![true, false, true]);
        assert_eq!(scene.texts().count(), 2);
        assert_eq!(scene.icons().count(), 1);
    }

    #[test]
    fn test_text_builder() {
        let t = TextElement::new("10%", Point::new(190, 14))
            .anchor(1.0, 0.0)
            .colors(Color::White, Some(Color::Black));
        assert_eq!(t.anchor_point, (1.0, 0.0));
        assert_eq!(t.fg, Color::White);
        assert_eq!(t.bg, Some(Color::Black));
    }

    #[test]
    fn test_tile_sizes() {
        assert_eq!(IconSet::Large.tile_size(), 70);
        assert_eq!(IconSet::Small.tile_size(), 20);
    }

    #[test]
    fn test_extend_concatenates() {
        let mut a = Scene::new();
        a.push_text(TextElement::new("a", Point::zero()));
        let mut b = Scene::new();
        b.push_text(TextElement::new("b", Point::zero()));
        a.extend(b);
        let texts: Vec<_> = a.texts().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "b"]);
    }
}
