// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for the front-end.
//
// Every operation error is mapped to plain English with a clear suggestion.
// The severity drives how the front-end presents it.

use std::io::ErrorKind;

use crate::error::{DocumentError, OperationError, ValidationError};
use crate::types::Operation;

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Disk full, file locked by another program. Trying again may work.
    Transient,
    /// The user must pick different input (wrong type, missing file).
    ActionRequired,
    /// The input is damaged or unsupported; trying again will not help.
    Permanent,
}

/// A human-readable error with plain English message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain English summary (shown as a heading).
    pub message: String,
    /// What the user should try (shown as body text).
    pub suggestion: String,
    /// Severity level (drives icon/colour in UI).
    pub severity: Severity,
}

/// Convert an `OperationError` into a `HumanError`.
pub fn humanize_error(err: &OperationError) -> HumanError {
    match err {
        OperationError::Validation { source, .. } => humanize_validation_error(source),

        OperationError::NoImages => HumanError {
            message: "No images were selected.".into(),
            suggestion: "Add one or more PNG or JPEG images, then try again.".into(),
            severity: Severity::ActionRequired,
        },

        OperationError::Failed { operation, source } => match source {
            DocumentError::Pdf(_) => HumanError {
                message: "There's a problem with this PDF file.".into(),
                suggestion: format!(
                    "The file may be damaged or password-protected. Try opening it in a PDF viewer first. (Could not {operation}.)"
                ),
                severity: Severity::Permanent,
            },

            DocumentError::Image(_) => HumanError {
                message: "There's a problem with this image.".into(),
                suggestion: "The image may be damaged. Try re-saving it as a PNG or JPEG first.".into(),
                severity: Severity::Permanent,
            },

            DocumentError::Io(io_err) => humanize_io_error(*operation, io_err.kind()),
        },
    }
}

fn humanize_validation_error(err: &ValidationError) -> HumanError {
    match err {
        ValidationError::NotFound(_) => HumanError {
            message: "The file couldn't be found.".into(),
            suggestion: "It may have been moved or deleted. Try choosing the file again.".into(),
            severity: Severity::ActionRequired,
        },

        ValidationError::NotAFile(_) => HumanError {
            message: "That's a folder, not a file.".into(),
            suggestion: "Choose a file inside the folder instead.".into(),
            severity: Severity::ActionRequired,
        },

        ValidationError::UnsupportedExtension(ext) => HumanError {
            message: "This type of image isn't supported.".into(),
            suggestion: format!("Only PNG and JPEG images can be converted. (File type: {ext})"),
            severity: Severity::ActionRequired,
        },

        ValidationError::InvalidHeader { label, .. } => HumanError {
            message: format!("This file isn't really a {label}."),
            suggestion: "The file name says one thing but the contents say another. Try exporting the file again from the program that made it.".into(),
            severity: Severity::ActionRequired,
        },

        ValidationError::Read { source, .. } => humanize_io_error_kind(source.kind()),
    }
}

fn humanize_io_error(operation: Operation, kind: ErrorKind) -> HumanError {
    match operation {
        // Output paths are involved in every operation, but split writes many files.
        Operation::Split if kind == ErrorKind::PermissionDenied => HumanError {
            message: "The pages couldn't be saved to that folder.".into(),
            suggestion: "Choose a different output folder that you can write to.".into(),
            severity: Severity::ActionRequired,
        },
        _ => humanize_io_error_kind(kind),
    }
}

fn humanize_io_error_kind(kind: ErrorKind) -> HumanError {
    match kind {
        ErrorKind::NotFound => HumanError {
            message: "The file couldn't be found.".into(),
            suggestion: "It may have been moved or deleted. Try choosing the file again.".into(),
            severity: Severity::ActionRequired,
        },
        ErrorKind::PermissionDenied => HumanError {
            message: "The app doesn't have permission to use that file.".into(),
            suggestion: "Check the file permissions, or try a different location.".into(),
            severity: Severity::ActionRequired,
        },
        _ => HumanError {
            message: "There was a problem reading or writing a file.".into(),
            suggestion: "Try again. If this keeps happening, your disk may be full.".into(),
            severity: Severity::Transient,
        },
    }
}
