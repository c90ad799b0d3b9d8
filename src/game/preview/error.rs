use thiserror::Error;

#[derive(Error, Debug)]
pub enum PreviewError {
    #[error("preview target bounds {width}x{height} have no area")]
    DegenerateBounds { width: f32, height: f32 },

    #[error("thumbnail has zero size")]
    EmptyThumbnail,

    #[error("thumbnail texture format {0} is not 8-bit RGBA")]
    UnsupportedFormat(String),

    #[error("thumbnail pixel data does not match its {width}x{height} size")]
    MalformedPixels { width: u32, height: u32 },

    #[error("failed to write preview asset {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode preview asset {path}: {source}")]
    Encode {
        path: String,
        #[source]
        source: image::ImageError,
    },
}
