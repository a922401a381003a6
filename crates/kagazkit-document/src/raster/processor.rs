// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image processor — decode an input image and bring it into the 8-bit RGB
// representation PDF pages are built from.

use image::{DynamicImage, RgbImage};
use kagazkit_core::error::{DocumentError, DocumentResult};
use tracing::{debug, info, instrument};

/// A single decoded image.
///
/// The decoded pixels are owned by this value and released when it (or the
/// `RgbImage` it is converted into) is dropped.
pub struct ImageProcessor {
    /// The current working image.
    image: DynamicImage,
}

impl ImageProcessor {
    // -- Construction ---------------------------------------------------------

    /// Load an image from a file path.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<std::path::Path>) -> DocumentResult<Self> {
        let img = image::open(path.as_ref()).map_err(|err| {
            DocumentError::Image(format!(
                "failed to open {}: {}",
                path.as_ref().display(),
                err
            ))
        })?;
        info!(
            width = img.width(),
            height = img.height(),
            color = ?img.color(),
            "Image loaded"
        );
        Ok(Self { image: img })
    }

    // -- Output ---------------------------------------------------------------

    /// Consume the processor and return 8-bit RGB pixels.
    ///
    /// RGB8 images are handed over untouched; every other colour type is
    /// converted, dropping any alpha channel.
    pub fn into_rgb8(self) -> RgbImage {
        match self.image {
            DynamicImage::ImageRgb8(rgb) => rgb,
            other => {
                debug!(from = ?other.color(), "Converting image to RGB8");
                other.to_rgb8()
            }
        }
    }
}
