// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF reader — open, inspect, split, and rotate existing PDF documents using
// the `lopdf` crate.

use std::collections::BTreeSet;
use std::path::Path;

use kagazkit_core::error::{DocumentError, DocumentResult};
use lopdf::{Dictionary, Document, Object, ObjectId, dictionary};
use tracing::{debug, info, instrument};

/// Parents are followed at most this far when resolving inherited attributes.
const MAX_PAGE_TREE_DEPTH: usize = 64;

/// Page attributes a page may inherit from its ancestors in the page tree.
const INHERITABLE_ATTRIBUTES: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Reads and manipulates existing PDF files.
///
/// Wraps `lopdf::Document` and provides the page-level operations the
/// document operations are built from.
pub struct PdfReader {
    /// The underlying lopdf document.
    document: Document,
}

impl PdfReader {
    // -- Construction ---------------------------------------------------------

    /// Open a PDF from the filesystem.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> DocumentResult<Self> {
        let path_ref = path.as_ref();
        info!("Opening PDF: {}", path_ref.display());

        let document = Document::load(path_ref).map_err(|err| {
            DocumentError::Pdf(format!("failed to open {}: {}", path_ref.display(), err))
        })?;

        debug!(pages = document.get_pages().len(), "PDF loaded");

        Ok(Self { document })
    }

    /// Create a reader from raw PDF bytes already in memory.
    #[instrument(skip_all, fields(bytes_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> DocumentResult<Self> {
        let document = Document::load_mem(data).map_err(|err| {
            DocumentError::Pdf(format!("failed to load PDF from memory: {}", err))
        })?;

        debug!(pages = document.get_pages().len(), "PDF loaded from bytes");

        Ok(Self { document })
    }

    // -- Inspection -----------------------------------------------------------

    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.document.get_pages().len()
    }

    /// Effective `/Rotate` of a page (1-indexed), following inheritance
    /// through the page tree. Pages without one report 0.
    pub fn page_rotation(&self, page_number: u32) -> DocumentResult<i64> {
        let page_id = self.page_id(page_number)?;
        Ok(effective_rotation(&self.document, page_id))
    }

    /// Consume the reader and return the underlying document.
    pub fn into_document(self) -> Document {
        self.document
    }

    // -- Extraction -----------------------------------------------------------

    /// Extract a single page (1-indexed) into a new standalone document.
    ///
    /// Only the objects the page reaches (contents, resources, annotations)
    /// are copied; the rest of the source is never touched. Inherited
    /// attributes are copied onto the page itself, since its ancestors are
    /// not carried over.
    #[instrument(skip(self))]
    pub fn extract_page(&self, page_number: u32) -> DocumentResult<Document> {
        let page_id = self.page_id(page_number)?;
        let mut page = self
            .document
            .get_object(page_id)
            .and_then(Object::as_dict)
            .map_err(|err| {
                DocumentError::Pdf(format!("page {} is not a dictionary: {}", page_number, err))
            })?
            .clone();
        inherit_attributes(&self.document, page_id, &mut page);
        page.remove(b"Parent");

        let mut single = Document::with_version(self.document.version.clone());
        let mut pending = Vec::new();
        collect_dictionary_references(&page, &mut pending);

        let mut seen = BTreeSet::from([page_id]);
        while let Some(id) = pending.pop() {
            if !seen.insert(id) {
                continue;
            }
            let Ok(object) = self.document.get_object(id) else {
                continue;
            };
            // Links to other pages are left dangling rather than pulling
            // those pages in; readers treat them as null. Source ids are
            // kept so a dangling id never lands on an unrelated object.
            if is_page_tree_node(object) {
                continue;
            }
            collect_references(object, &mut pending);
            single.objects.insert(id, object.clone());
        }

        single.max_id = single
            .objects
            .keys()
            .map(|&(number, _)| number)
            .chain([page_id.0])
            .max()
            .unwrap_or(0);
        let pages_id = single.new_object_id();
        page.set("Parent", Object::Reference(pages_id));
        single.objects.insert(page_id, Object::Dictionary(page));
        single.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![Object::Reference(page_id)],
                "Count" => Object::Integer(1),
            }),
        );
        let catalog_id = single.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => Object::Reference(pages_id),
        });
        single.trailer.set("Root", Object::Reference(catalog_id));

        debug!(page_number, objects = single.objects.len(), "Page extracted");
        Ok(single)
    }

    // -- Rotation -------------------------------------------------------------

    /// Add `degrees` to the rotation of every page, preserving page order.
    ///
    /// The angle is applied as given: no range check and no reduction modulo
    /// 360. Returns the number of pages rotated.
    #[instrument(skip(self))]
    pub fn rotate_all(&mut self, degrees: i64) -> DocumentResult<usize> {
        let pages = self.document.get_pages();

        // Resolve every new angle before touching the document, so an
        // overflow leaves it unchanged.
        let mut updates = Vec::with_capacity(pages.len());
        for (&page_number, &page_id) in &pages {
            let current = effective_rotation(&self.document, page_id);
            let new_rotation = current.checked_add(degrees).ok_or_else(|| {
                DocumentError::Pdf(format!(
                    "rotation overflow on page {}: {} + {}",
                    page_number, current, degrees
                ))
            })?;
            updates.push((page_number, page_id, current, new_rotation));
        }

        for (page_number, page_id, current, new_rotation) in updates {
            let page = self
                .document
                .get_object_mut(page_id)
                .and_then(Object::as_dict_mut)
                .map_err(|err| {
                    DocumentError::Pdf(format!("page {} is not a dictionary: {}", page_number, err))
                })?;
            page.set("Rotate", Object::Integer(new_rotation));

            debug!(page_number, current, new_rotation, "Page rotated");
        }

        info!(pages = pages.len(), degrees, "Rotation applied");
        Ok(pages.len())
    }

    // -- Output ---------------------------------------------------------------

    /// Serialise the document to `path`.
    #[instrument(skip(self), fields(path = %path.as_ref().display()))]
    pub fn save(&mut self, path: impl AsRef<Path>) -> DocumentResult<()> {
        save_document(&mut self.document, path.as_ref())
    }

    // -- Helpers --------------------------------------------------------------

    fn page_id(&self, page_number: u32) -> DocumentResult<ObjectId> {
        let pages = self.document.get_pages();
        pages.get(&page_number).copied().ok_or_else(|| {
            DocumentError::Pdf(format!(
                "page {} out of range (document has {} pages)",
                page_number,
                pages.len()
            ))
        })
    }
}

/// Write a document to disk, mapping lopdf's error into ours.
pub fn save_document(document: &mut Document, path: &Path) -> DocumentResult<()> {
    // lopdf 0.38's `Document::save` reports failures as `std::io::Error`.
    document.save(path).map_err(DocumentError::Io)?;
    debug!(path = %path.display(), "PDF written");
    Ok(())
}

/// Copy attributes the page inherits from its ancestors onto the page, unless
/// the page sets them itself.
fn inherit_attributes(document: &Document, page_id: ObjectId, page: &mut Dictionary) {
    let mut node_id = page_id;
    for _ in 0..MAX_PAGE_TREE_DEPTH {
        let Ok(parent_id) = document
            .get_object(node_id)
            .and_then(Object::as_dict)
            .and_then(|dict| dict.get(b"Parent"))
            .and_then(Object::as_reference)
        else {
            break;
        };
        let Ok(parent) = document.get_object(parent_id).and_then(Object::as_dict) else {
            break;
        };
        for key in INHERITABLE_ATTRIBUTES {
            if !page.has(key) {
                if let Ok(value) = parent.get(key) {
                    page.set(key, value.clone());
                }
            }
        }
        node_id = parent_id;
    }
}

/// Push every indirect reference inside `object`. `/Parent` links are not
/// followed, so walking a page never climbs back up into the page tree.
fn collect_references(object: &Object, out: &mut Vec<ObjectId>) {
    match object {
        Object::Reference(id) => out.push(*id),
        Object::Array(items) => {
            for item in items {
                collect_references(item, out);
            }
        }
        Object::Dictionary(dict) => collect_dictionary_references(dict, out),
        Object::Stream(stream) => collect_dictionary_references(&stream.dict, out),
        _ => {}
    }
}

fn collect_dictionary_references(dict: &Dictionary, out: &mut Vec<ObjectId>) {
    for (key, value) in dict.iter() {
        if key.as_slice() != b"Parent" {
            collect_references(value, out);
        }
    }
}

fn is_page_tree_node(object: &Object) -> bool {
    object
        .as_dict()
        .and_then(|dict| dict.get(b"Type"))
        .and_then(Object::as_name)
        .is_ok_and(|name| name == b"Page" || name == b"Pages")
}

/// `/Rotate` of a page, or of the nearest ancestor that sets one.
fn effective_rotation(document: &Document, page_id: ObjectId) -> i64 {
    let mut node_id = page_id;
    for _ in 0..MAX_PAGE_TREE_DEPTH {
        let Ok(dict) = document.get_object(node_id).and_then(Object::as_dict) else {
            break;
        };
        if let Ok(rotate) = dict.get(b"Rotate") {
            return match rotate {
                Object::Integer(value) => *value,
                Object::Real(value) => value.round() as i64,
                _ => 0,
            };
        }
        match dict.get(b"Parent").and_then(Object::as_reference) {
            Ok(parent) => node_id = parent,
            Err(_) => break,
        }
    }
    0
}
