// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF writer — build new PDF documents from raster images using `printpdf` 0.8.
//
// printpdf 0.8 uses a data-oriented API: documents are built by constructing
// `PdfPage` structs containing `Vec<Op>` operation lists, then serialised via
// `PdfDocument::save()`.

use std::path::Path;

use image::RgbImage;
use kagazkit_core::config::ConvertOptions;
use kagazkit_core::error::{DocumentError, DocumentResult};
use printpdf::{
    Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, Pt, RawImage, RawImageData,
    RawImageFormat, XObjectTransform,
};
use tracing::{debug, info, instrument, warn};

const MM_PER_INCH: f32 = 25.4;

/// Creates new PDF documents with one page per image.
///
/// Each page is exactly the size of its image at the configured resolution,
/// and the image fills it.
pub struct PdfWriter {
    /// Pixels per inch used to size pages.
    resolution_dpi: f32,
    /// Title metadata embedded in the PDF /Info dictionary.
    title: Option<String>,
}

impl PdfWriter {
    /// Create a new writer with the given conversion options.
    pub fn new(options: ConvertOptions) -> Self {
        Self {
            resolution_dpi: options.resolution_dpi,
            title: None,
        }
    }

    /// Set a title for the PDF metadata.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    /// Page size in millimetres for an image of the given pixel size.
    pub fn page_size_for(&self, width_px: u32, height_px: u32) -> (Mm, Mm) {
        let to_mm = |px: u32| Mm(px as f32 / self.resolution_dpi * MM_PER_INCH);
        (to_mm(width_px), to_mm(height_px))
    }

    // -- Images to PDF --------------------------------------------------------

    /// Create a multi-page PDF, one page per image, in the order given.
    ///
    /// The first image forms the first page and the rest follow.
    #[instrument(skip_all, fields(images = images.len(), dpi = self.resolution_dpi))]
    pub fn create_from_images(&self, images: &[RgbImage]) -> DocumentResult<Vec<u8>> {
        if images.is_empty() {
            return Err(DocumentError::Image("no images to place".into()));
        }
        if !(self.resolution_dpi.is_finite() && self.resolution_dpi > 0.0) {
            return Err(DocumentError::Image(format!(
                "invalid resolution {} dpi",
                self.resolution_dpi
            )));
        }

        let title = self.title.as_deref().unwrap_or("KagazKit Images");
        info!(title, "Creating image PDF");

        let mut doc = PdfDocument::new(title);
        let mut pages: Vec<PdfPage> = Vec::with_capacity(images.len());

        for (index, rgb_image) in images.iter().enumerate() {
            let (width, height) = rgb_image.dimensions();
            if width == 0 || height == 0 {
                return Err(DocumentError::Image(format!(
                    "image #{} is empty ({}x{})",
                    index + 1,
                    width,
                    height
                )));
            }

            let raw = RawImage {
                pixels: RawImageData::U8(rgb_image.as_raw().clone()),
                width: width as usize,
                height: height as usize,
                data_format: RawImageFormat::RGB8,
                tag: Vec::new(),
            };
            let xobject_id = doc.add_image(&raw);

            let (page_w, page_h) = self.page_size_for(width, height);
            let ops = vec![Op::UseXobject {
                id: xobject_id,
                transform: XObjectTransform {
                    translate_x: Some(Pt(0.0)),
                    translate_y: Some(Pt(0.0)),
                    scale_x: None,
                    scale_y: None,
                    dpi: Some(self.resolution_dpi),
                    rotate: None,
                },
            }];
            pages.push(PdfPage::new(page_w, page_h, ops));

            debug!(
                page = index + 1,
                width,
                height,
                page_w_mm = page_w.0,
                page_h_mm = page_h.0,
                "Image placed on page"
            );
        }

        doc.with_pages(pages);

        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let output = doc.save(&PdfSaveOptions::default(), &mut warnings);
        if !warnings.is_empty() {
            warn!(count = warnings.len(), "printpdf reported warnings");
        }

        Ok(output)
    }

    // -- File output convenience ----------------------------------------------

    /// Create an image PDF and write it directly to a file.
    pub fn write_images_to_file(
        &self,
        images: &[RgbImage],
        path: impl AsRef<Path>,
    ) -> DocumentResult<()> {
        let bytes = self.create_from_images(images)?;
        std::fs::write(path.as_ref(), &bytes)?;
        info!("Wrote image PDF to {}", path.as_ref().display());
        Ok(())
    }
}

impl Default for PdfWriter {
    fn default() -> Self {
        Self::new(ConvertOptions::default())
    }
}
