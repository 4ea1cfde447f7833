//! PDF document concatenation.
//!
//! Rebuilds a single page tree out of several parsed documents: objects are
//! renumbered into one id space, page objects are re-parented under one
//! `Pages` node, and a fresh catalog points at it. Interactive structures
//! (outlines) are dropped; a receipt dossier has no use for them.

use std::collections::BTreeMap;

use lopdf::{Document, Object, ObjectId};

use crate::error::{Error, Result};

/// Type of a PDF object, read from its dictionary's `/Type` name.
fn type_name(object: &Object) -> Option<&[u8]> {
    object
        .as_dict()
        .ok()
        .and_then(|dict| dict.get(b"Type").ok())
        .and_then(|name| name.as_name().ok())
}

/// Concatenate documents in order into one.
///
/// The inputs are consumed; the result still needs to be saved by the
/// caller. Fails when no input contributes a page tree.
pub fn merge_documents(documents: Vec<Document>) -> Result<Document> {
    let mut max_id = 1;
    let mut document_pages: BTreeMap<ObjectId, Object> = BTreeMap::new();
    let mut document_objects: BTreeMap<ObjectId, Object> = BTreeMap::new();

    // Pull every object out of every input, renumbered into one id space.
    // Page ids are collected separately, in input order, because BTreeMap
    // ordering over renumbered ids preserves it.
    for mut doc in documents {
        doc.renumber_objects_with(max_id);
        max_id = doc.max_id + 1;

        for (_, object_id) in doc.get_pages() {
            let page = doc.get_object(object_id)?.to_owned();
            document_pages.insert(object_id, page);
        }
        document_objects.append(&mut doc.objects);
    }

    let mut merged = Document::with_version("1.5");
    let mut catalog_object: Option<(ObjectId, Object)> = None;
    let mut pages_object: Option<(ObjectId, Object)> = None;

    for (object_id, object) in &document_objects {
        match type_name(object) {
            Some(b"Catalog") => {
                // Keep the first catalog id, latest content.
                catalog_object = Some((
                    if let Some((id, _)) = catalog_object {
                        id
                    } else {
                        *object_id
                    },
                    object.clone(),
                ));
            }
            Some(b"Pages") => {
                // Collapse all page trees into one node.
                if let Ok(dictionary) = object.as_dict() {
                    let mut dictionary = dictionary.clone();
                    if let Some((_, ref existing)) = pages_object {
                        if let Ok(existing) = existing.as_dict() {
                            dictionary.extend(existing);
                        }
                    }
                    pages_object = Some((
                        if let Some((id, _)) = pages_object {
                            id
                        } else {
                            *object_id
                        },
                        Object::Dictionary(dictionary),
                    ));
                }
            }
            // Pages are re-inserted below with a fixed parent; outline
            // objects are dropped.
            Some(b"Page") => {}
            Some(b"Outlines" | b"Outline") => {}
            _ => {
                merged.objects.insert(*object_id, object.clone());
            }
        }
    }

    let (pages_id, pages_root) = pages_object.ok_or(Error::NoPages)?;
    let (catalog_id, catalog_root) = catalog_object.ok_or(Error::NoCatalog)?;

    for (object_id, object) in &document_pages {
        if let Ok(dictionary) = object.as_dict() {
            let mut dictionary = dictionary.clone();
            dictionary.set("Parent", pages_id);
            merged
                .objects
                .insert(*object_id, Object::Dictionary(dictionary));
        }
    }

    if let Ok(dictionary) = pages_root.as_dict() {
        let mut dictionary = dictionary.clone();
        dictionary.set("Count", document_pages.len() as i64);
        dictionary.set(
            "Kids",
            document_pages
                .keys()
                .map(|id| Object::Reference(*id))
                .collect::<Vec<_>>(),
        );
        merged
            .objects
            .insert(pages_id, Object::Dictionary(dictionary));
    }

    if let Ok(dictionary) = catalog_root.as_dict() {
        let mut dictionary = dictionary.clone();
        dictionary.set("Pages", pages_id);
        dictionary.remove(b"Outlines");
        merged
            .objects
            .insert(catalog_id, Object::Dictionary(dictionary));
    }

    merged.trailer.set("Root", catalog_id);
    merged.max_id = merged.objects.len() as u32;
    merged.renumber_objects();
    merged.compress();

    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_page_document(text: &str) -> Document {
        let (doc, page, layer) = printpdf::PdfDocument::new(
            text,
            printpdf::Mm(210.0),
            printpdf::Mm(297.0),
            "layer",
        );
        let font = doc
            .add_builtin_font(printpdf::BuiltinFont::Helvetica)
            .unwrap();
        doc.get_page(page).get_layer(layer).use_text(
            text,
            12.0,
            printpdf::Mm(10.0),
            printpdf::Mm(280.0),
            &font,
        );
        let bytes = doc.save_to_bytes().unwrap();
        Document::load_mem(&bytes).unwrap()
    }

    #[test]
    fn test_merge_preserves_page_count_and_order() {
        let merged =
            merge_documents(vec![one_page_document("first"), one_page_document("second")])
                .unwrap();
        assert_eq!(merged.get_pages().len(), 2);
    }

    #[test]
    fn test_merge_single_document() {
        let merged = merge_documents(vec![one_page_document("only")]).unwrap();
        assert_eq!(merged.get_pages().len(), 1);
    }

    #[test]
    fn test_merge_nothing_is_an_error() {
        assert!(matches!(merge_documents(vec![]), Err(Error::NoPages)));
    }
}
