//! Row geometry for shop buttons.
//!
//! Buttons are spawned at the menu anchor, scaled uniformly to the row
//! height, then pushed right so that button `i` starts exactly `i` widths
//! after the anchor.

use bevy::prelude::*;
use thiserror::Error;

use super::components::{ButtonTemplate, MenuRect};

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum LayoutError {
    #[error("shop menu has no MenuRect; it cannot size its button row")]
    MissingMenuRect,
    #[error("button template has no sprite size")]
    MissingTemplateSprite,
    #[error("button template height {0} must be positive")]
    DegenerateTemplate(f32),
    #[error("menu row height {0} must be positive")]
    DegenerateRow(f32),
}

/// Where one button ends up, in the menu's local space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ButtonPlacement {
    pub scale: f32,
    pub width: f32,
    pub offset_x: f32,
}

impl ButtonPlacement {
    pub fn translation(&self, z: f32) -> Vec3 {
        Vec3::new(self.offset_x, 0.0, z)
    }

    pub fn max_x(&self) -> f32 {
        self.offset_x + self.width * 0.5
    }
}

/// Validated inputs for laying out one row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowLayout {
    pub template_size: Vec2,
    pub row_height: f32,
    pub row_width: f32,
}

impl RowLayout {
    pub fn new(menu_rect: Option<&MenuRect>, template: &ButtonTemplate) -> Result<Self, LayoutError> {
        let rect = menu_rect.ok_or(LayoutError::MissingMenuRect)?;
        let template_size = template.sprite_size.ok_or(LayoutError::MissingTemplateSprite)?;
        if !(template_size.y > 0.0) {
            return Err(LayoutError::DegenerateTemplate(template_size.y));
        }
        if !(rect.size.y > 0.0) {
            return Err(LayoutError::DegenerateRow(rect.size.y));
        }
        Ok(Self {
            template_size,
            row_height: rect.size.y,
            row_width: rect.size.x,
        })
    }

    pub fn place(&self, index: usize) -> ButtonPlacement {
        let scale = self.row_height / self.template_size.y;
        let width = self.template_size.x * scale;
        // Spawned centred on the anchor
        let anchor_x = 0.0;
        let min_x = anchor_x - width * 0.5;
        ButtonPlacement {
            scale,
            width,
            offset_x: horizontal_offset(anchor_x, min_x, width, index),
        }
    }

    /// True when `count` buttons would run past the menu's right edge.
    pub fn overflows(&self, count: usize) -> bool {
        count > 0 && self.place(count - 1).max_x() > self.row_width + f32::EPSILON
    }
}

pub fn horizontal_offset(anchor_x: f32, element_min_x: f32, element_width: f32, index: usize) -> f32 {
    anchor_x - element_min_x + element_width * index as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(size: Option<Vec2>) -> ButtonTemplate {
        ButtonTemplate {
            sprite_size: size,
            color: Color::WHITE,
            preview_slot: None,
        }
    }

    fn rect(w: f32, h: f32) -> MenuRect {
        MenuRect { size: Vec2::new(w, h) }
    }

    #[test]
    fn test_preconditions() {
        let ok = template(Some(Vec2::new(64.0, 80.0)));
        assert_eq!(RowLayout::new(None, &ok), Err(LayoutError::MissingMenuRect));
        assert_eq!(
            RowLayout::new(Some(&rect(500.0, 100.0)), &template(None)),
            Err(LayoutError::MissingTemplateSprite)
        );
        assert_eq!(
            RowLayout::new(Some(&rect(500.0, 100.0)), &template(Some(Vec2::new(64.0, 0.0)))),
            Err(LayoutError::DegenerateTemplate(0.0))
        );
        assert_eq!(
            RowLayout::new(Some(&rect(500.0, 0.0)), &ok),
            Err(LayoutError::DegenerateRow(0.0))
        );
    }

    #[test]
    fn test_buttons_are_scaled_to_row_height() {
        let layout = RowLayout::new(Some(&rect(1000.0, 100.0)), &template(Some(Vec2::new(64.0, 80.0)))).unwrap();
        let placement = layout.place(0);
        assert!((placement.scale - 1.25).abs() < 1e-6);
        assert!((placement.width - 80.0).abs() < 1e-4);
    }

    #[test]
    fn test_offsets_step_by_width() {
        let layout = RowLayout::new(Some(&rect(1000.0, 100.0)), &template(Some(Vec2::new(64.0, 80.0)))).unwrap();
        let width = layout.place(0).width;

        for i in 0..6 {
            let placement = layout.place(i);
            // Left edge of button i sits i widths right of the anchor
            let left = placement.offset_x - placement.width * 0.5;
            assert!((left - width * i as f32).abs() < 1e-3, "button {i} starts at {left}");
            assert_eq!(placement, layout.place(i));
        }
    }

    #[test]
    fn test_horizontal_offset_formula() {
        assert_eq!(horizontal_offset(10.0, 4.0, 20.0, 0), 6.0);
        assert_eq!(horizontal_offset(10.0, 4.0, 20.0, 3), 66.0);
    }

    #[test]
    fn test_overflow_detection() {
        let layout = RowLayout::new(Some(&rect(240.0, 100.0)), &template(Some(Vec2::new(64.0, 80.0)))).unwrap();
        assert!(!layout.overflows(0));
        assert!(!layout.overflows(3));
        assert!(layout.overflows(4));
    }
}
