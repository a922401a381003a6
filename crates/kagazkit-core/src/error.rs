// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Error types for KagazKit.
//
// Three layers: `ValidationError` from the input checks, `DocumentError`
// from the PDF and image library calls, and `OperationError`, the only type
// an operation entry point ever returns.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::Operation;

/// Why an input file was rejected before any library touched it.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Path is not a file: {}", .0.display())]
    NotAFile(PathBuf),

    #[error("Unsupported image extension: {0}")]
    UnsupportedExtension(String),

    /// `label` is the expected type as shown to the user ("PDF", "PNG", "JPG").
    #[error("Invalid {label} file header: {}", .path.display())]
    InvalidHeader { label: String, path: PathBuf },

    #[error("Error reading file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failure inside a PDF or image library call.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("PDF operation failed: {0}")]
    Pdf(String),

    #[error("image processing failed: {0}")]
    Image(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error returned by every document operation.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("Validation failed: {source}")]
    Validation {
        operation: Operation,
        #[source]
        source: ValidationError,
    },

    #[error("No valid images provided.")]
    NoImages,

    #[error("Failed to {operation}: {source}")]
    Failed {
        operation: Operation,
        #[source]
        source: DocumentError,
    },
}

impl OperationError {
    pub fn validation(operation: Operation, source: ValidationError) -> Self {
        Self::Validation { operation, source }
    }

    pub fn failed(operation: Operation, source: impl Into<DocumentError>) -> Self {
        Self::Failed {
            operation,
            source: source.into(),
        }
    }

    /// The operation that produced this error.
    pub fn operation(&self) -> Operation {
        match self {
            Self::Validation { operation, .. } | Self::Failed { operation, .. } => *operation,
            Self::NoImages => Operation::ConvertImages,
        }
    }
}

/// Alias used by the validation layer.
pub type ValidationResult<T> = std::result::Result<T, ValidationError>;

/// Alias used by the library wrappers.
pub type DocumentResult<T> = std::result::Result<T, DocumentError>;

/// Alias used by the operation entry points.
pub type Result<T> = std::result::Result<T, OperationError>;
