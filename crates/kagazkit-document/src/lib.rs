// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// kagazkit-document — Document processing for KagazKit.
//
// Signature-checked input validation, PDF operations (merge, split, rotate)
// over `lopdf`, and image-to-PDF conversion over `image` and `printpdf`.

pub mod operations;
pub mod pdf;
pub mod raster;
pub mod validate;

// Re-export the primary structs so callers can use `kagazkit_document::Validator` etc.
pub use operations::DocumentOperations;
pub use pdf::reader::PdfReader;
pub use pdf::writer::PdfWriter;
pub use raster::processor::ImageProcessor;
pub use validate::Validator;
