use bevy::prelude::*;

use super::PreviewError;

/// A persisted preview, ready to be shown inside a target rectangle.
#[derive(Debug, Clone)]
pub struct PreviewSprite {
    pub image: Handle<Image>,
    pub pixel_size: UVec2,
    pub pixels_per_unit: f32,
}

impl PreviewSprite {
    pub fn new(image: Handle<Image>, pixel_size: UVec2, target: Vec2) -> Result<Self, PreviewError> {
        let pixels_per_unit = pixels_per_unit(pixel_size, target)?;
        Ok(Self { image, pixel_size, pixels_per_unit })
    }

    /// Size in world units at scale 1. One axis matches the target exactly,
    /// the other covers it.
    pub fn world_size(&self) -> Vec2 {
        self.pixel_size.as_vec2() / self.pixels_per_unit
    }

    /// Centre-pivoted sprite; the pivot is Bevy's default anchor.
    pub fn to_sprite(&self) -> Sprite {
        Sprite {
            image: self.image.clone(),
            custom_size: Some(self.world_size()),
            ..default()
        }
    }
}

/// Pixel density that fills `target` while keeping the texture's aspect ratio.
pub fn pixels_per_unit(pixel_size: UVec2, target: Vec2) -> Result<f32, PreviewError> {
    if !(target.x.is_finite() && target.y.is_finite()) || target.x <= 0.0 || target.y <= 0.0 {
        return Err(PreviewError::DegenerateBounds { width: target.x, height: target.y });
    }
    if pixel_size.x == 0 || pixel_size.y == 0 {
        return Err(PreviewError::EmptyThumbnail);
    }
    let texture = pixel_size.as_vec2();
    Ok((texture.x / target.x).min(texture.y / target.y))
}

/// Per-axis scale that makes something of `current` size occupy `slot` exactly.
pub fn fit_scale(slot: Vec2, current: Vec2) -> Vec2 {
    Vec2::new(
        if current.x > 0.0 { slot.x / current.x } else { 1.0 },
        if current.y > 0.0 { slot.y / current.y } else { 1.0 },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixels_per_unit_is_min_ratio() {
        let cases = [
            (UVec2::new(128, 128), Vec2::new(64.0, 64.0), 2.0),
            (UVec2::new(128, 64), Vec2::new(64.0, 64.0), 1.0),
            (UVec2::new(64, 128), Vec2::new(64.0, 64.0), 1.0),
            (UVec2::new(100, 50), Vec2::new(10.0, 20.0), 2.5),
            (UVec2::new(1, 1000), Vec2::new(0.5, 0.5), 2.0),
        ];
        for (pixels, target, expected) in cases {
            let ppu = pixels_per_unit(pixels, target).unwrap();
            let by_formula = (pixels.x as f32 / target.x).min(pixels.y as f32 / target.y);
            assert!((ppu - expected).abs() < 1e-5, "{pixels:?} into {target:?}: {ppu}");
            assert_eq!(ppu, by_formula);
        }
    }

    #[test]
    fn test_degenerate_targets_fail() {
        for target in [
            Vec2::new(64.0, 0.0),
            Vec2::new(0.0, 64.0),
            Vec2::new(-1.0, 64.0),
            Vec2::new(f32::NAN, 64.0),
            Vec2::new(64.0, f32::INFINITY),
        ] {
            assert!(matches!(
                pixels_per_unit(UVec2::new(64, 64), target),
                Err(PreviewError::DegenerateBounds { .. })
            ));
        }
    }

    #[test]
    fn test_world_size_covers_target_keeping_aspect() {
        let target = Vec2::new(52.0, 52.0);
        let sprite = PreviewSprite::new(Handle::default(), UVec2::new(200, 100), target).unwrap();
        let size = sprite.world_size();

        assert!((size.y - target.y).abs() < 1e-4);
        assert!(size.x >= target.x);
        assert!((size.x / size.y - 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_fit_scale_makes_bounds_equal_slot() {
        let slot = Vec2::new(52.0, 40.0);
        let current = Vec2::new(104.0, 52.0);
        let scale = fit_scale(slot, current);
        assert!((current * scale - slot).length() < 1e-4);
    }
}
