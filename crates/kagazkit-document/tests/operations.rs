// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// End-to-end tests for the document operations against real files on disk.

use std::path::{Path, PathBuf};

use image::{GrayImage, Luma, Rgb, RgbImage, Rgba, RgbaImage};
use kagazkit_core::config::ConvertOptions;
use kagazkit_core::error::{OperationError, ValidationError};
use kagazkit_core::types::Operation;
use kagazkit_document::{DocumentOperations, PdfReader};
use lopdf::{Document, Object, Stream, dictionary};
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Write a PDF whose pages have the given MediaBox widths, so page identity
/// can be checked after an operation.
fn write_pdf(dir: &TempDir, name: &str, widths: &[i64]) -> PathBuf {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let mut kids = Vec::new();
    for &width in widths {
        let content_id = doc.add_object(Stream::new(dictionary! {}, b"0 0 m".to_vec()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => Object::Reference(pages_id),
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(width),
                Object::Integer(792),
            ],
            "Contents" => Object::Reference(content_id),
        });
        kids.push(Object::Reference(page_id));
    }
    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let path = dir.path().join(name);
    doc.save(&path).unwrap();
    path
}

fn page_widths(path: &Path) -> Vec<i64> {
    let doc = Document::load(path).unwrap();
    doc.get_pages()
        .values()
        .map(|&id| {
            doc.get_object(id)
                .and_then(Object::as_dict)
                .and_then(|d| d.get(b"MediaBox"))
                .and_then(Object::as_array)
                .and_then(|a| a[2].as_i64())
                .unwrap()
        })
        .collect()
}

fn page_count(path: &Path) -> usize {
    PdfReader::open(path).unwrap().page_count()
}

fn rotations(path: &Path) -> Vec<i64> {
    let reader = PdfReader::open(path).unwrap();
    (1..=reader.page_count() as u32)
        .map(|n| reader.page_rotation(n).unwrap())
        .collect()
}

fn write_fake_pdf(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("fake.pdf");
    std::fs::write(&path, b"NOT_A_PDF").unwrap();
    path
}

// ---------------------------------------------------------------------------
// Merge
// ---------------------------------------------------------------------------

#[test]
fn merge_keeps_input_order() {
    let dir = TempDir::new().unwrap();
    let a = write_pdf(&dir, "a.pdf", &[100, 110]);
    let b = write_pdf(&dir, "b.pdf", &[200]);
    let output = dir.path().join("merged.pdf");

    let written = DocumentOperations::default().merge(&[&a, &b], &output).unwrap();
    assert_eq!(written, output);
    assert_eq!(page_widths(&output), vec![100, 110, 200]);

    let reversed = dir.path().join("reversed.pdf");
    DocumentOperations::default().merge(&[&b, &a], &reversed).unwrap();
    assert_eq!(page_widths(&reversed), vec![200, 100, 110]);
}

#[test]
fn merge_of_nothing_writes_an_empty_pdf() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("empty.pdf");
    let none: [PathBuf; 0] = [];

    DocumentOperations::default().merge(&none, &output).unwrap();
    assert_eq!(page_count(&output), 0);
}

#[test]
fn merge_stops_at_first_invalid_input_without_writing() {
    let dir = TempDir::new().unwrap();
    let good = write_pdf(&dir, "good.pdf", &[100]);
    let missing = dir.path().join("missing.pdf");
    let output = dir.path().join("merged.pdf");

    let err = DocumentOperations::default()
        .merge(&[&good, &missing], &output)
        .unwrap_err();
    assert!(matches!(
        err,
        OperationError::Validation {
            operation: Operation::Merge,
            source: ValidationError::NotFound(_),
        }
    ));
    assert!(!output.exists());
}

#[test]
fn merge_creates_missing_output_directories() {
    let dir = TempDir::new().unwrap();
    let a = write_pdf(&dir, "a.pdf", &[100]);
    let output = dir.path().join("nested").join("deeper").join("out.pdf");

    DocumentOperations::default().merge(&[&a], &output).unwrap();
    assert_eq!(page_count(&output), 1);
}

// ---------------------------------------------------------------------------
// Convert
// ---------------------------------------------------------------------------

#[test]
fn convert_makes_one_page_per_image_in_order() {
    let dir = TempDir::new().unwrap();
    let wide = dir.path().join("wide.png");
    RgbImage::from_pixel(200, 100, Rgb([255, 0, 0])).save(&wide).unwrap();
    let tall = dir.path().join("tall.jpg");
    RgbImage::from_pixel(100, 200, Rgb([0, 0, 255])).save(&tall).unwrap();
    let output = dir.path().join("images.pdf");

    DocumentOperations::default()
        .convert_images(&[&wide, &tall], &output)
        .unwrap();

    let doc = Document::load(&output).unwrap();
    let pages = doc.get_pages();
    assert_eq!(pages.len(), 2);

    // At 100 dpi a 200 px edge is two inches, or 144 pt.
    let media_box = |n: u32| -> Vec<f32> {
        doc.get_object(pages[&n])
            .and_then(Object::as_dict)
            .and_then(|d| d.get(b"MediaBox"))
            .and_then(Object::as_array)
            .unwrap()
            .iter()
            .map(|v| v.as_float().unwrap())
            .collect()
    };
    let first = media_box(1);
    let second = media_box(2);
    assert!((first[2] - first[0] - 144.0).abs() < 1.0, "{first:?}");
    assert!((first[3] - first[1] - 72.0).abs() < 1.0, "{first:?}");
    assert!((second[2] - second[0] - 72.0).abs() < 1.0, "{second:?}");
    assert!((second[3] - second[1] - 144.0).abs() < 1.0, "{second:?}");
}

#[test]
fn convert_titles_the_pdf_after_the_output_name() {
    let dir = TempDir::new().unwrap();
    let image = dir.path().join("page.png");
    RgbImage::from_pixel(20, 30, Rgb([1, 2, 3])).save(&image).unwrap();
    let output = dir.path().join("scans.pdf");

    DocumentOperations::default()
        .convert_images(&[&image], &output)
        .unwrap();

    let doc = Document::load(&output).unwrap();
    let info_id = doc.trailer.get(b"Info").and_then(Object::as_reference).unwrap();
    let raw = doc
        .get_object(info_id)
        .and_then(Object::as_dict)
        .and_then(|info| info.get(b"Title"))
        .and_then(Object::as_str)
        .unwrap();
    let title = match raw {
        [0xFE, 0xFF, rest @ ..] => {
            let units: Vec<u16> = rest
                .chunks_exact(2)
                .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
                .collect();
            String::from_utf16_lossy(&units)
        }
        _ => String::from_utf8_lossy(raw).into_owned(),
    };
    assert_eq!(title, "scans");
}

#[test]
fn convert_accepts_alpha_and_grayscale_images() {
    let dir = TempDir::new().unwrap();
    let rgba = dir.path().join("rgba.png");
    RgbaImage::from_pixel(10, 10, Rgba([10, 20, 30, 128])).save(&rgba).unwrap();
    let gray = dir.path().join("gray.png");
    GrayImage::from_pixel(10, 10, Luma([99])).save(&gray).unwrap();
    let output = dir.path().join("out").join("mixed.pdf");

    DocumentOperations::default()
        .convert_images(&[&rgba, &gray], &output)
        .unwrap();
    assert_eq!(page_count(&output), 2);
}

#[test]
fn convert_resolution_scales_pages() {
    let dir = TempDir::new().unwrap();
    let image = dir.path().join("square.png");
    RgbImage::from_pixel(300, 300, Rgb([1, 2, 3])).save(&image).unwrap();
    let output = dir.path().join("square.pdf");

    DocumentOperations::new(ConvertOptions {
        resolution_dpi: 300.0,
    })
    .convert_images(&[&image], &output)
    .unwrap();

    let doc = Document::load(&output).unwrap();
    let page_id = doc.get_pages()[&1];
    let width = doc
        .get_object(page_id)
        .and_then(Object::as_dict)
        .and_then(|d| d.get(b"MediaBox"))
        .and_then(Object::as_array)
        .and_then(|a| a[2].as_float())
        .unwrap();
    // 300 px at 300 dpi is one inch.
    assert!((width - 72.0).abs() < 1.0, "{width}");
}

#[test]
fn convert_of_nothing_reports_no_images() {
    let dir = TempDir::new().unwrap();
    let none: [PathBuf; 0] = [];
    let err = DocumentOperations::default()
        .convert_images(&none, dir.path().join("out.pdf"))
        .unwrap_err();
    assert_eq!(err.to_string(), "No valid images provided.");
}

#[test]
fn convert_rejects_mislabelled_images() {
    let dir = TempDir::new().unwrap();
    let png_named_jpg = dir.path().join("photo.jpg");
    RgbImage::new(4, 4).save_with_format(&png_named_jpg, image::ImageFormat::Png).unwrap();
    let text = dir.path().join("notes.txt");
    std::fs::write(&text, b"hello").unwrap();
    let output = dir.path().join("out.pdf");
    let ops = DocumentOperations::default();

    let err = ops.convert_images(&[&png_named_jpg], &output).unwrap_err();
    assert!(err.to_string().contains("Validation failed"), "{err}");
    assert!(err.to_string().contains("Invalid JPG file header"), "{err}");

    let err = ops.convert_images(&[&text], &output).unwrap_err();
    assert!(matches!(
        err,
        OperationError::Validation {
            source: ValidationError::UnsupportedExtension(_),
            ..
        }
    ));
    assert!(!output.exists());
}

// ---------------------------------------------------------------------------
// Split
// ---------------------------------------------------------------------------

#[test]
fn split_writes_one_file_per_page() {
    let dir = TempDir::new().unwrap();
    let input = write_pdf(&dir, "report.pdf", &[101, 102, 103]);
    let out_dir = dir.path().join("pages");

    let written = DocumentOperations::default().split(&input, &out_dir).unwrap();

    let expected: Vec<PathBuf> = (1..=3)
        .map(|n| out_dir.join(format!("report_page_{n}.pdf")))
        .collect();
    assert_eq!(written, expected);
    for (path, width) in written.iter().zip([101, 102, 103]) {
        assert_eq!(page_widths(path), vec![width]);
        // Page, its content stream, the page tree root, and the catalog.
        assert_eq!(Document::load(path).unwrap().objects.len(), 4, "{}", path.display());
    }
}

#[test]
fn split_of_empty_pdf_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let input = write_pdf(&dir, "empty.pdf", &[]);
    let out_dir = dir.path().join("pages");

    let written = DocumentOperations::default().split(&input, &out_dir).unwrap();
    assert!(written.is_empty());
    assert!(out_dir.is_dir());
}

#[test]
fn split_then_merge_restores_the_document() {
    let dir = TempDir::new().unwrap();
    let input = write_pdf(&dir, "doc.pdf", &[11, 22, 33, 44]);
    let ops = DocumentOperations::default();

    let pages = ops.split(&input, dir.path().join("pages")).unwrap();
    let rejoined = dir.path().join("rejoined.pdf");
    ops.merge(&pages, &rejoined).unwrap();

    assert_eq!(page_widths(&rejoined), vec![11, 22, 33, 44]);
}

// ---------------------------------------------------------------------------
// Rotate
// ---------------------------------------------------------------------------

#[test]
fn rotate_applies_angle_to_every_page() {
    let dir = TempDir::new().unwrap();
    let input = write_pdf(&dir, "in.pdf", &[100, 200, 300]);
    let ops = DocumentOperations::default();

    for angle in [90, -90, 45] {
        let output = dir.path().join(format!("rotated_{angle}.pdf"));
        ops.rotate(&input, &output, angle).unwrap();
        assert_eq!(rotations(&output), vec![angle; 3]);
        assert_eq!(page_widths(&output), vec![100, 200, 300]);
    }
}

#[test]
fn rotate_adds_to_existing_rotation() {
    let dir = TempDir::new().unwrap();
    let input = write_pdf(&dir, "in.pdf", &[100]);
    let once = dir.path().join("once.pdf");
    let twice = dir.path().join("twice.pdf");
    let ops = DocumentOperations::default();

    ops.rotate(&input, &once, 90).unwrap();
    ops.rotate(&once, &twice, 90).unwrap();
    assert_eq!(rotations(&twice), vec![180]);
}

#[test]
fn rotation_overflow_fails_without_writing() {
    let dir = TempDir::new().unwrap();
    let input = write_pdf(&dir, "in.pdf", &[100, 200]);
    let once = dir.path().join("once.pdf");
    let output = dir.path().join("overflow.pdf");
    let ops = DocumentOperations::default();

    ops.rotate(&input, &once, 90).unwrap();
    let err = ops.rotate(&once, &output, i64::MAX).unwrap_err();

    assert!(
        matches!(err, OperationError::Failed { operation: Operation::Rotate, .. }),
        "{err:?}"
    );
    assert!(err.to_string().starts_with("Failed to rotate PDF"), "{err}");
    assert!(!output.exists());
    assert_eq!(rotations(&once), vec![90, 90]);
}

#[test]
fn rotate_creates_missing_output_directories() {
    let dir = TempDir::new().unwrap();
    let input = write_pdf(&dir, "in.pdf", &[100]);
    let output = dir.path().join("a").join("b").join("rotated.pdf");

    DocumentOperations::default().rotate(&input, &output, 180).unwrap();
    assert_eq!(rotations(&output), vec![180]);
}

// ---------------------------------------------------------------------------
// Validation across operations
// ---------------------------------------------------------------------------

#[test]
fn fake_pdf_is_rejected_everywhere() {
    let dir = TempDir::new().unwrap();
    let fake = write_fake_pdf(&dir);
    let ops = DocumentOperations::default();

    let results = [
        ops.merge(&[&fake], dir.path().join("m.pdf")).map(|_| ()),
        ops.split(&fake, dir.path().join("s")).map(|_| ()),
        ops.rotate(&fake, dir.path().join("r.pdf"), 90).map(|_| ()),
    ];
    for result in results {
        let err = result.unwrap_err();
        assert!(err.to_string().contains("Validation failed"), "{err}");
        assert!(err.to_string().contains("Invalid PDF file header"), "{err}");
    }
}

#[test]
fn directory_input_is_not_a_file() {
    let dir = TempDir::new().unwrap();
    let err = DocumentOperations::default()
        .rotate(dir.path(), dir.path().join("r.pdf"), 90)
        .unwrap_err();
    assert!(matches!(
        err,
        OperationError::Validation {
            source: ValidationError::NotAFile(_),
            ..
        }
    ));
}
