// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Document operations — merge, image conversion, split, and rotate.
//
// Each entry point validates its inputs, delegates to the PDF and image
// wrappers, and converts any failure into an `OperationError` tagged with the
// operation. Nothing below this boundary constructs an `OperationError`.

use std::path::{Path, PathBuf};

use kagazkit_core::config::{AppConfig, ConvertOptions};
use kagazkit_core::error::{DocumentResult, OperationError, Result};
use kagazkit_core::types::{FileCategory, Operation};
use tracing::{debug, info, instrument};

use crate::pdf::merge::PdfMerger;
use crate::pdf::reader::{PdfReader, save_document};
use crate::pdf::writer::PdfWriter;
use crate::raster::processor::ImageProcessor;
use crate::validate::Validator;

/// The four document operations.
///
/// Stateless apart from conversion settings: every call opens, uses, and
/// drops its own documents and images.
#[derive(Debug, Clone, Default)]
pub struct DocumentOperations {
    convert_options: ConvertOptions,
}

impl DocumentOperations {
    pub fn new(convert_options: ConvertOptions) -> Self {
        Self { convert_options }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.convert_options())
    }

    /// Merge `paths`, in order, into a single PDF at `output`.
    ///
    /// An empty `paths` is accepted and produces a PDF with no pages.
    #[instrument(skip_all, fields(inputs = paths.len(), output = %output.as_ref().display()))]
    pub fn merge<P: AsRef<Path>>(&self, paths: &[P], output: impl AsRef<Path>) -> Result<PathBuf> {
        let operation = Operation::Merge;
        let output = output.as_ref();
        info!("Merging PDFs");
        let validated = Validator::validate_paths(paths, FileCategory::Pdf)
            .map_err(|err| OperationError::validation(operation, err))?;

        let pages = merge_files(&validated, output)
            .map_err(|err| OperationError::failed(operation, err))?;

        info!(files = validated.len(), pages, "PDFs merged");
        Ok(output.to_path_buf())
    }

    /// Convert PNG/JPEG images, in order, into one PDF with a page per image.
    #[instrument(skip_all, fields(inputs = paths.len(), output = %output.as_ref().display()))]
    pub fn convert_images<P: AsRef<Path>>(
        &self,
        paths: &[P],
        output: impl AsRef<Path>,
    ) -> Result<PathBuf> {
        let operation = Operation::ConvertImages;
        let output = output.as_ref();
        info!("Converting images to PDF");
        let validated = Validator::validate_paths(paths, FileCategory::Image)
            .map_err(|err| OperationError::validation(operation, err))?;

        if validated.is_empty() {
            return Err(OperationError::NoImages);
        }

        self.convert_files(&validated, output)
            .map_err(|err| OperationError::failed(operation, err))?;

        info!(images = validated.len(), "Images converted to PDF");
        Ok(output.to_path_buf())
    }

    /// Write each page of `input` to `output_dir/{stem}_page_{n}.pdf`.
    ///
    /// Returns the written paths in page order; a document without pages
    /// yields an empty list.
    #[instrument(skip_all, fields(input = %input.as_ref().display(), output_dir = %output_dir.as_ref().display()))]
    pub fn split(
        &self,
        input: impl AsRef<Path>,
        output_dir: impl AsRef<Path>,
    ) -> Result<Vec<PathBuf>> {
        let operation = Operation::Split;
        let input = input.as_ref();
        info!("Splitting PDF");
        Validator::validate_pdf(input).map_err(|err| OperationError::validation(operation, err))?;

        let written = split_file(input, output_dir.as_ref())
            .map_err(|err| OperationError::failed(operation, err))?;

        info!(pages = written.len(), "PDF split");
        Ok(written)
    }

    /// Rotate every page of `input` by `angle` degrees and write the result
    /// to `output`. The angle is passed through as given.
    #[instrument(skip_all, fields(input = %input.as_ref().display(), output = %output.as_ref().display(), angle = angle))]
    pub fn rotate(
        &self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
        angle: i64,
    ) -> Result<PathBuf> {
        let operation = Operation::Rotate;
        let input = input.as_ref();
        let output = output.as_ref();
        info!("Rotating PDF");
        Validator::validate_pdf(input).map_err(|err| OperationError::validation(operation, err))?;

        let pages = rotate_file(input, output, angle)
            .map_err(|err| OperationError::failed(operation, err))?;

        info!(pages, angle, "PDF rotated");
        Ok(output.to_path_buf())
    }

    // Decoded images live in `images` and are dropped when this returns,
    // whether the save succeeded or not.
    fn convert_files(&self, paths: &[PathBuf], output: &Path) -> DocumentResult<()> {
        let images = paths
            .iter()
            .map(|path| ImageProcessor::open(path).map(ImageProcessor::into_rgb8))
            .collect::<DocumentResult<Vec<_>>>()?;

        let mut writer = PdfWriter::new(self.convert_options);
        if let Some(stem) = output.file_stem() {
            writer.set_title(stem.to_string_lossy());
        }

        prepare_output(output)?;
        writer.write_images_to_file(&images, output)
    }
}

fn merge_files(paths: &[PathBuf], output: &Path) -> DocumentResult<usize> {
    let mut merger = PdfMerger::new();
    for path in paths {
        merger.append(PdfReader::open(path)?.into_document())?;
    }
    let pages = merger.page_count();

    let mut merged = merger.finish();
    prepare_output(output)?;
    save_document(&mut merged, output)?;
    Ok(pages)
}

fn split_file(input: &Path, output_dir: &Path) -> DocumentResult<Vec<PathBuf>> {
    ensure_dir(output_dir)?;

    let reader = PdfReader::open(input)?;
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();

    let page_count = reader.page_count() as u32;
    let mut written = Vec::with_capacity(page_count as usize);
    for page_number in 1..=page_count {
        let mut page = reader.extract_page(page_number)?;
        let path = output_dir.join(format!("{stem}_page_{page_number}.pdf"));
        save_document(&mut page, &path)?;
        written.push(path);
    }
    Ok(written)
}

fn rotate_file(input: &Path, output: &Path, angle: i64) -> DocumentResult<usize> {
    let mut reader = PdfReader::open(input)?;
    let pages = reader.rotate_all(angle)?;
    prepare_output(output)?;
    reader.save(output)?;
    Ok(pages)
}

/// Make sure the directory `path` will be written into exists.
fn prepare_output(path: &Path) -> DocumentResult<()> {
    match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => ensure_dir(parent),
        None => Ok(()),
    }
}

fn ensure_dir(dir: &Path) -> DocumentResult<()> {
    if !dir.is_dir() {
        debug!(dir = %dir.display(), "Creating output directory");
        std::fs::create_dir_all(dir)?;
    }
    Ok(())
}
