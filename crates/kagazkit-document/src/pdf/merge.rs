// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Append whole documents, in order, into one accumulating document.

use kagazkit_core::error::{DocumentError, DocumentResult};
use lopdf::{Document, Object, ObjectId, dictionary};
use tracing::{debug, info, instrument};

/// Combines documents into one by appending each in full.
///
/// Every source's objects are renumbered into a shared id space and its
/// page-tree root is hung under a new root `/Pages` node. Keeping the source
/// trees intact preserves inherited attributes (MediaBox, Resources, Rotate)
/// and the original page order. Source catalogs, and with them outlines and
/// other document-level entries, are dropped.
pub struct PdfMerger {
    document: Document,
    pages_id: ObjectId,
    kids: Vec<Object>,
    page_count: i64,
}

impl PdfMerger {
    pub fn new() -> Self {
        let mut document = Document::with_version("1.5");
        let pages_id = document.new_object_id();
        Self {
            document,
            pages_id,
            kids: Vec::new(),
            page_count: 0,
        }
    }

    /// Append all pages of `source` after the pages already added.
    #[instrument(skip_all, fields(appended = self.kids.len()))]
    pub fn append(&mut self, mut source: Document) -> DocumentResult<()> {
        source.renumber_objects_with(self.document.max_id + 1);

        let source_pages = source.get_pages().len() as i64;
        let catalog_id = source
            .trailer
            .get(b"Root")
            .and_then(Object::as_reference)
            .map_err(|err| DocumentError::Pdf(format!("source has no catalog: {}", err)))?;
        let root_pages_id = source
            .catalog()
            .and_then(|catalog| catalog.get(b"Pages"))
            .and_then(Object::as_reference)
            .map_err(|err| DocumentError::Pdf(format!("source has no page tree: {}", err)))?;

        self.document.max_id = self.document.max_id.max(source.max_id);

        for (id, object) in source.objects {
            if id == catalog_id {
                continue;
            }
            self.document.objects.insert(id, object);
        }

        let root = self
            .document
            .get_object_mut(root_pages_id)
            .and_then(Object::as_dict_mut)
            .map_err(|err| DocumentError::Pdf(format!("page tree root is unusable: {}", err)))?;
        root.set("Parent", Object::Reference(self.pages_id));

        self.kids.push(Object::Reference(root_pages_id));
        self.page_count += source_pages;

        debug!(source_pages, total_pages = self.page_count, "Document appended");
        Ok(())
    }

    /// Number of pages appended so far.
    pub fn page_count(&self) -> usize {
        self.page_count as usize
    }

    /// Close the page tree and return the combined document.
    pub fn finish(mut self) -> Document {
        self.document.objects.insert(
            self.pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => self.kids,
                "Count" => Object::Integer(self.page_count),
            }),
        );
        let catalog_id = self.document.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => Object::Reference(self.pages_id),
        });
        self.document.trailer.set("Root", Object::Reference(catalog_id));
        self.document.prune_objects();

        info!(pages = self.page_count, "Merge complete");
        self.document
    }
}

impl Default for PdfMerger {
    fn default() -> Self {
        Self::new()
    }
}

/// Merge documents in the order given. An empty input yields a valid
/// document with no pages.
pub fn merge_documents(
    documents: impl IntoIterator<Item = Document>,
) -> DocumentResult<Document> {
    let mut merger = PdfMerger::new();
    for document in documents {
        merger.append(document)?;
    }
    Ok(merger.finish())
}
