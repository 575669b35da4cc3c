//! Converts an uploaded tribute photo into a web-friendly WebP image.

use image::imageops::FilterType;
use image::{DynamicImage, ImageDecoder, ImageFormat, ImageReader};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// The outcome of a [`convert_to_webp`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Converted {
    /// Width and height of the source image after orientation was applied.
    pub original: (u32, u32),

    /// Width and height of the written image.
    pub output: (u32, u32),
}

impl Converted {
    pub fn resized(&self) -> bool {
        self.original != self.output
    }
}

/// Reads the photo at `source`, applies its EXIF orientation, downscales it
/// to at most `max_width` pixels wide (never upscaling, preserving the aspect
/// ratio), and writes it to `destination` as WebP.
pub fn convert_to_webp(source: &Path, destination: &Path, max_width: u32) -> Result<Converted> {
    let annotate = |err| Error::Image {
        path: source.to_owned(),
        err,
    };

    let mut decoder = ImageReader::open(source)
        .map_err(|err| Error::Open {
            path: source.to_owned(),
            err,
        })?
        .with_guessed_format()
        .map_err(|err| Error::Open {
            path: source.to_owned(),
            err,
        })?
        .into_decoder()
        .map_err(annotate)?;
    let orientation = decoder.orientation().map_err(annotate)?;
    let mut photo = DynamicImage::from_decoder(decoder).map_err(annotate)?;
    photo.apply_orientation(orientation);

    let original = (photo.width(), photo.height());
    if photo.width() > max_width {
        let height = (u64::from(max_width) * u64::from(photo.height()) / u64::from(photo.width())) as u32;
        photo = photo.resize_exact(max_width, height.max(1), FilterType::Lanczos3);
    }
    let output = (photo.width(), photo.height());

    // The WebP encoder only takes 8-bit RGB(A).
    let photo = match photo.color().has_alpha() {
        true => DynamicImage::ImageRgba8(photo.to_rgba8()),
        false => DynamicImage::ImageRgb8(photo.to_rgb8()),
    };
    photo
        .save_with_format(destination, ImageFormat::WebP)
        .map_err(|err| Error::Image {
            path: destination.to_owned(),
            err,
        })?;

    let converted = Converted { original, output };
    debug!(
        source = %source.display(),
        original = ?converted.original,
        output = ?converted.output,
        "converted photo"
    );
    Ok(converted)
}

type Result<T> = std::result::Result<T, Error>;

/// Represents a problem converting a photo.
#[derive(Debug)]
pub enum Error {
    /// Returned when the source photo can't be opened.
    Open { path: PathBuf, err: std::io::Error },

    /// Returned when a photo can't be decoded or encoded.
    Image {
        path: PathBuf,
        err: image::ImageError,
    },
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Open { path, err } => {
                write!(f, "Opening photo '{}': {}", path.display(), err)
            }
            Error::Image { path, err } => {
                write!(f, "Converting photo '{}': {}", path.display(), err)
            }
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Open { path: _, err } => Some(err),
            Error::Image { path: _, err } => Some(err),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};

    #[test]
    fn test_downscales_wide_photo() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let source = dir.path().join("wide.png");
        RgbImage::from_pixel(2400, 1200, Rgb([120, 80, 40])).save(&source)?;

        let destination = dir.path().join("wide.webp");
        let converted = convert_to_webp(&source, &destination, 1200)?;
        assert_eq!((2400, 1200), converted.original);
        assert_eq!((1200, 600), converted.output);
        assert!(converted.resized());

        let written = image::open(&destination)?;
        assert_eq!((1200, 600), (written.width(), written.height()));
        assert!(std::fs::read(&destination)?.starts_with(b"RIFF"));
        Ok(())
    }

    #[test]
    fn test_never_upscales() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let source = dir.path().join("small.png");
        RgbaImage::from_pixel(300, 200, Rgba([0, 0, 0, 128])).save(&source)?;

        let destination = dir.path().join("small.webp");
        let converted = convert_to_webp(&source, &destination, 1200)?;
        assert_eq!((300, 200), converted.output);
        assert!(!converted.resized());
        let written = image::open(&destination)?;
        assert_eq!((300, 200), (written.width(), written.height()));
        Ok(())
    }

    #[test]
    fn test_missing_source() {
        let dir = tempfile::tempdir().expect("tempdir");
        let result = convert_to_webp(
            &dir.path().join("nope.jpg"),
            &dir.path().join("nope.webp"),
            1200,
        );
        assert!(matches!(result, Err(Error::Open { .. })));
    }
}
