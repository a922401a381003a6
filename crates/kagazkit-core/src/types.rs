// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types: recognised file kinds, their signatures, and the
// operations that can fail.

use serde::{Deserialize, Serialize};

/// Leading bytes of every PDF file.
pub const PDF_SIGNATURE: &[u8] = b"%PDF";
/// Leading bytes of every PNG file.
pub const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";
/// Leading bytes of every JPEG file.
pub const JPEG_SIGNATURE: &[u8] = b"\xFF\xD8\xFF";

/// Raster formats accepted as input for image-to-PDF conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageFormat {
    Png,
    Jpeg,
}

impl ImageFormat {
    /// Infer the format from a file extension (case-insensitive, with or
    /// without a leading dot).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            _ => None,
        }
    }

    /// Magic number expected at the start of a file of this format.
    pub fn signature(&self) -> &'static [u8] {
        match self {
            Self::Png => PNG_SIGNATURE,
            Self::Jpeg => JPEG_SIGNATURE,
        }
    }
}

/// A file type as established by its signature and extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FileKind {
    Pdf,
    Image(ImageFormat),
}

impl FileKind {
    /// Magic number expected at the start of a file of this kind.
    pub fn signature(&self) -> &'static [u8] {
        match self {
            Self::Pdf => PDF_SIGNATURE,
            Self::Image(format) => format.signature(),
        }
    }
}

/// Which validation rule to apply to a batch of input paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileCategory {
    Pdf,
    Image,
}

/// The four document operations. Carried by every operation-level error so
/// the caller always knows which step failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    Merge,
    ConvertImages,
    Split,
    Rotate,
}

impl Operation {
    /// Short description used in "Failed to …" messages.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Merge => "merge PDFs",
            Self::ConvertImages => "convert images to PDF",
            Self::Split => "split PDF",
            Self::Rotate => "rotate PDF",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.description())
    }
}
