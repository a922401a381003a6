// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Input validation — existence, file type, and magic-number checks run before
// any input is handed to a parsing library.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use kagazkit_core::error::{ValidationError, ValidationResult};
use kagazkit_core::types::{FileCategory, FileKind, ImageFormat};
use tracing::{debug, instrument};

/// Checks that input files exist and really are what their names claim.
///
/// A file renamed to `.pdf` without PDF content is rejected here, before it
/// can reach `lopdf` or `image`.
pub struct Validator;

impl Validator {
    /// Fail unless `path` exists and is a regular file.
    pub fn validate_file(path: impl AsRef<Path>) -> ValidationResult<()> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ValidationError::NotFound(path.to_path_buf()));
        }
        if !path.is_file() {
            return Err(ValidationError::NotAFile(path.to_path_buf()));
        }
        Ok(())
    }

    /// Fail unless `path` is a regular file starting with `%PDF`.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn validate_pdf(path: impl AsRef<Path>) -> ValidationResult<()> {
        let path = path.as_ref();
        Self::validate_file(path)?;

        let signature = FileKind::Pdf.signature();
        let header = read_prefix(path, signature.len())?;
        if !header.starts_with(signature) {
            return Err(ValidationError::InvalidHeader {
                label: "PDF".into(),
                path: path.to_path_buf(),
            });
        }

        debug!("PDF signature ok");
        Ok(())
    }

    /// Fail unless `path` is a regular PNG or JPEG file whose signature
    /// matches its extension. Returns the detected format.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn validate_image(path: impl AsRef<Path>) -> ValidationResult<ImageFormat> {
        let path = path.as_ref();
        Self::validate_file(path)?;

        let ext = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();
        let format = ImageFormat::from_extension(&ext)
            .ok_or_else(|| ValidationError::UnsupportedExtension(ext.clone()))?;

        let signature = format.signature();
        let header = read_prefix(path, signature.len())?;
        if !header.starts_with(signature) {
            return Err(ValidationError::InvalidHeader {
                label: ext.to_ascii_uppercase(),
                path: path.to_path_buf(),
            });
        }

        debug!(?format, "image signature ok");
        Ok(format)
    }

    /// Validate one path against `category` and report the kind it was
    /// confirmed as.
    pub fn validate_kind(
        path: impl AsRef<Path>,
        category: FileCategory,
    ) -> ValidationResult<FileKind> {
        let path = path.as_ref();
        match category {
            FileCategory::Pdf => Self::validate_pdf(path).map(|()| FileKind::Pdf),
            FileCategory::Image => Self::validate_image(path).map(FileKind::Image),
        }
    }

    /// Validate every path in order, stopping at the first failure.
    ///
    /// On success the paths come back unchanged and in input order.
    pub fn validate_paths<P: AsRef<Path>>(
        paths: &[P],
        category: FileCategory,
    ) -> ValidationResult<Vec<PathBuf>> {
        let mut validated = Vec::with_capacity(paths.len());
        for path in paths {
            let path = path.as_ref();
            let kind = Self::validate_kind(path, category)?;
            debug!(path = %path.display(), ?kind, "input accepted");
            validated.push(path.to_path_buf());
        }
        Ok(validated)
    }
}

/// Read up to `len` leading bytes. Short files yield a short buffer, which
/// then fails the signature comparison.
fn read_prefix(path: &Path, len: usize) -> ValidationResult<Vec<u8>> {
    let to_read_error = |source| ValidationError::Read {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(to_read_error)?;
    let mut header = Vec::with_capacity(len);
    file.take(len as u64)
        .read_to_end(&mut header)
        .map_err(to_read_error)?;
    Ok(header)
}
