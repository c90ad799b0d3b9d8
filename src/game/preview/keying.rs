//! Background removal for unit thumbnails.
//!
//! Thumbnails are rendered on a flat grey backdrop. Every pixel that matches
//! the key colour exactly becomes fully transparent; antialiased edges that
//! blend into the backdrop are left alone.

use bevy::prelude::*;
use bevy::render::render_resource::TextureFormat;
use image::{Rgba, RgbaImage};

use super::PreviewError;

pub const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyColor(pub Rgba<u8>);

impl KeyColor {
    pub const fn new(rgba: [u8; 4]) -> Self {
        Self(Rgba(rgba))
    }

    pub fn matches(&self, pixel: &Rgba<u8>) -> bool {
        self.0 == *pixel
    }
}

impl Default for KeyColor {
    fn default() -> Self {
        Self::new([82, 82, 82, 255])
    }
}

/// Copy `source` with every key-coloured pixel cleared. Returns the copy and
/// the number of pixels that were cleared.
pub fn strip_background(source: &RgbaImage, key: KeyColor) -> (RgbaImage, usize) {
    let mut result = source.clone();
    let mut cleared = 0;
    for pixel in result.pixels_mut() {
        if key.matches(pixel) {
            *pixel = TRANSPARENT;
            cleared += 1;
        }
    }
    (result, cleared)
}

/// Copy the CPU-side pixels of a loaded Bevy image.
pub fn thumbnail_pixels(thumbnail: &Image) -> Result<RgbaImage, PreviewError> {
    let width = thumbnail.width();
    let height = thumbnail.height();
    if width == 0 || height == 0 {
        return Err(PreviewError::EmptyThumbnail);
    }

    let format = thumbnail.texture_descriptor.format;
    if !matches!(format, TextureFormat::Rgba8UnormSrgb | TextureFormat::Rgba8Unorm) {
        return Err(PreviewError::UnsupportedFormat(format!("{:?}", format)));
    }

    let data = thumbnail.data.clone().ok_or(PreviewError::MalformedPixels { width, height })?;
    RgbaImage::from_raw(width, height, data).ok_or(PreviewError::MalformedPixels { width, height })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::asset::RenderAssetUsages;
    use bevy::render::render_resource::{Extent3d, TextureDimension};

    fn filled(format: TextureFormat, pixel: &[u8]) -> Image {
        Image::new_fill(
            Extent3d { width: 2, height: 3, depth_or_array_layers: 1 },
            TextureDimension::D2,
            pixel,
            format,
            RenderAssetUsages::default(),
        )
    }

    fn random_image(rng: &mut fastrand::Rng, width: u32, height: u32, key: KeyColor) -> RgbaImage {
        RgbaImage::from_fn(width, height, |_, _| {
            // Roughly a third of the grid is backdrop
            if rng.u8(..3) == 0 {
                key.0
            } else {
                Rgba([rng.u8(..), rng.u8(..), rng.u8(..), rng.u8(..)])
            }
        })
    }

    #[test]
    fn test_key_pixels_become_transparent_others_untouched() {
        let key = KeyColor::default();
        let mut rng = fastrand::Rng::with_seed(7);

        for _ in 0..8 {
            let width = rng.u32(1..40);
            let height = rng.u32(1..40);
            let source = random_image(&mut rng, width, height, key);
            let (stripped, cleared) = strip_background(&source, key);

            let mut expected_cleared = 0;
            for (src, out) in source.pixels().zip(stripped.pixels()) {
                if key.matches(src) {
                    assert_eq!(out.0[3], 0);
                    expected_cleared += 1;
                } else {
                    assert_eq!(src, out);
                }
            }
            assert_eq!(cleared, expected_cleared);
        }
    }

    #[test]
    fn test_near_key_colour_is_kept() {
        let key = KeyColor::default();
        let source = RgbaImage::from_fn(3, 1, |x, _| match x {
            0 => Rgba([82, 82, 82, 255]),
            1 => Rgba([83, 82, 82, 255]),
            _ => Rgba([82, 82, 82, 254]),
        });

        let (stripped, cleared) = strip_background(&source, key);

        assert_eq!(cleared, 1);
        assert_eq!(*stripped.get_pixel(0, 0), TRANSPARENT);
        assert_eq!(*stripped.get_pixel(1, 0), Rgba([83, 82, 82, 255]));
        assert_eq!(*stripped.get_pixel(2, 0), Rgba([82, 82, 82, 254]));
    }

    #[test]
    fn test_source_is_not_modified() {
        let key = KeyColor::default();
        let source = RgbaImage::from_pixel(4, 4, key.0);
        let (_, cleared) = strip_background(&source, key);

        assert_eq!(cleared, 16);
        assert!(source.pixels().all(|p| key.matches(p)));
    }

    #[test]
    fn test_thumbnail_pixels_copies_rgba8() {
        let image = filled(TextureFormat::Rgba8UnormSrgb, &[82, 82, 82, 255]);
        let pixels = thumbnail_pixels(&image).unwrap();

        assert_eq!(pixels.dimensions(), (2, 3));
        assert!(pixels.pixels().all(|p| KeyColor::default().matches(p)));
    }

    #[test]
    fn test_thumbnail_pixels_rejects_other_formats() {
        let image = filled(TextureFormat::Rg32Float, &[0; 8]);
        assert!(matches!(thumbnail_pixels(&image), Err(PreviewError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_thumbnail_pixels_needs_cpu_data() {
        let mut image = filled(TextureFormat::Rgba8Unorm, &[1, 2, 3, 4]);
        image.data = None;
        assert!(matches!(
            thumbnail_pixels(&image),
            Err(PreviewError::MalformedPixels { width: 2, height: 3 })
        ));
    }
}
