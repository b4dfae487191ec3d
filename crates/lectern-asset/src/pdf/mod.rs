//! PDF page counting and page limiting.
//!
//! Page limiting produces a new document holding a contiguous prefix of the
//! source's pages. The root page tree node is rewritten to list only the kept
//! pages, and everything no longer reachable from the catalog is pruned.

use std::collections::BTreeSet;

use bytes::Bytes;
use lopdf::{Document, Object, ObjectId};

use crate::{Error, Result, TRACING_TARGET_PDF};

/// Page attributes a page may inherit from its ancestors in the page tree.
const INHERITABLE: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Parses PDF bytes and returns the number of pages.
///
/// # Errors
///
/// Returns [`Error::MalformedAsset`] if the bytes are not a valid PDF.
pub fn page_count(source: &[u8]) -> Result<u32> {
    let doc = load(source)?;
    Ok(doc.get_pages().len() as u32)
}

/// Interprets a raw `pages` request value.
///
/// Integers outside the `i64` range saturate, so an oversized request still
/// means "every page". Non-numeric input yields `0`, which [`limit_pages`]
/// treats as "no limit".
pub fn parse_page_request(raw: &str) -> i64 {
    let raw = raw.trim();
    if let Ok(value) = raw.parse() {
        return value;
    }

    let (negative, digits) = match raw.strip_prefix('-') {
        Some(digits) => (true, digits),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        0
    } else if negative {
        i64::MIN
    } else {
        i64::MAX
    }
}

/// Returns a PDF containing only the first `requested` pages of `source`.
///
/// A non-positive `requested` returns `source` unchanged without parsing it.
/// Otherwise the result holds `min(requested, total)` pages in their original
/// order; asking for at least the total still yields a freshly written copy.
///
/// Parsing and writing are CPU bound, so async callers should run this on a
/// blocking thread.
///
/// # Errors
///
/// Returns [`Error::MalformedAsset`] if `source` does not parse or its page
/// tree is broken, and [`Error::Serialization`] if the new document cannot
/// be written.
pub fn limit_pages(source: Bytes, requested: i64) -> Result<Bytes> {
    if requested <= 0 {
        return Ok(source);
    }

    let mut doc = load(&source)?;
    let pages = doc.get_pages();
    let total = pages.len() as u32;
    let keep = u32::try_from(requested).unwrap_or(u32::MAX).min(total);

    if keep < total {
        let kept: Vec<ObjectId> = pages.values().take(keep as usize).copied().collect();
        truncate_page_tree(&mut doc, &kept)?;
    }

    doc.prune_objects();
    doc.compress();

    let mut buffer = Vec::with_capacity(source.len());
    doc.save_to(&mut buffer)
        .map_err(|e| Error::Serialization(format!("failed to write limited PDF: {e}")))?;

    tracing::debug!(
        target: TRACING_TARGET_PDF,
        requested,
        total,
        kept = keep,
        source_size = source.len(),
        output_size = buffer.len(),
        "limited PDF pages"
    );

    Ok(Bytes::from(buffer))
}

/// Makes `kept` the only children of the root page tree node.
///
/// Each kept page is reparented onto the root, taking any attributes it
/// inherited from intermediate nodes along, so dropped subtrees become
/// unreachable in one pass.
fn truncate_page_tree(doc: &mut Document, kept: &[ObjectId]) -> Result<()> {
    let root = doc
        .catalog()
        .and_then(|catalog| catalog.get(b"Pages"))
        .and_then(Object::as_reference)
        .map_err(malformed)?;

    for &page_id in kept {
        let inherited = inherited_attributes(doc, page_id)?;
        let page = doc
            .get_object_mut(page_id)
            .and_then(Object::as_dict_mut)
            .map_err(malformed)?;
        for (name, value) in inherited {
            page.set(name, value);
        }
        page.set("Parent", Object::Reference(root));
    }

    let node = doc
        .get_object_mut(root)
        .and_then(Object::as_dict_mut)
        .map_err(malformed)?;
    node.set(
        "Kids",
        Object::Array(kept.iter().map(|id| Object::Reference(*id)).collect()),
    );
    node.set("Count", Object::Integer(kept.len() as i64));
    Ok(())
}

/// Collects the inheritable attributes `page_id` lacks, nearest ancestor first.
fn inherited_attributes(doc: &Document, page_id: ObjectId) -> Result<Vec<(&'static [u8], Object)>> {
    let page = doc.get_dictionary(page_id).map_err(malformed)?;
    let mut missing: Vec<&'static [u8]> = INHERITABLE
        .into_iter()
        .filter(|name| !page.has(name))
        .collect();

    let mut found = Vec::new();
    let mut visited = BTreeSet::new();
    let mut parent = page.get(b"Parent").and_then(Object::as_reference).ok();

    while let Some(id) = parent {
        if missing.is_empty() || !visited.insert(id) {
            break;
        }

        let node = doc.get_dictionary(id).map_err(malformed)?;
        missing.retain(|name| match node.get(name) {
            Ok(value) => {
                found.push((*name, value.clone()));
                false
            }
            Err(_) => true,
        });
        parent = node.get(b"Parent").and_then(Object::as_reference).ok();
    }

    Ok(found)
}

fn load(source: &[u8]) -> Result<Document> {
    Document::load_mem(source).map_err(malformed)
}

fn malformed(e: lopdf::Error) -> Error {
    Error::MalformedAsset(format!("failed to parse PDF: {e}"))
}

#[cfg(test)]
mod tests {
    use lectern_test::pdf::{nested_pdf, sample_pdf};

    use super::*;

    fn page_contents(bytes: &[u8]) -> Vec<Vec<u8>> {
        let doc = Document::load_mem(bytes).unwrap();
        doc.get_pages()
            .values()
            .map(|id| doc.get_page_content(*id).unwrap())
            .collect()
    }

    #[test]
    fn counts_pages() {
        assert_eq!(page_count(&sample_pdf(7)).unwrap(), 7);
    }

    #[test]
    fn keeps_prefix_in_order() {
        let source = Bytes::from(sample_pdf(10));
        let limited = limit_pages(source.clone(), 3).unwrap();

        assert_eq!(page_count(&limited).unwrap(), 3);
        let expected: Vec<_> = page_contents(&source).into_iter().take(3).collect();
        assert_eq!(page_contents(&limited), expected);
    }

    #[test]
    fn non_positive_request_is_passthrough() {
        let source = Bytes::from(sample_pdf(10));
        assert_eq!(limit_pages(source.clone(), 0).unwrap(), source);
        assert_eq!(limit_pages(source.clone(), -1).unwrap(), source);
    }

    #[test]
    fn passthrough_skips_parsing() {
        let garbage = Bytes::from_static(b"not a pdf");
        assert_eq!(limit_pages(garbage.clone(), 0).unwrap(), garbage);
    }

    #[test]
    fn request_is_capped_at_page_count() {
        let source = Bytes::from(sample_pdf(10));
        let limited = limit_pages(source.clone(), 999).unwrap();
        assert_eq!(page_count(&limited).unwrap(), 10);
        assert_eq!(page_contents(&limited), page_contents(&source));
    }

    #[test]
    fn limited_output_is_smaller() {
        let source = Bytes::from(sample_pdf(5));
        let limited = limit_pages(source.clone(), 2).unwrap();
        assert_eq!(page_count(&limited).unwrap(), 2);
        assert!(limited.len() < source.len());
    }

    #[test]
    fn malformed_source_is_rejected() {
        let err = limit_pages(Bytes::from_static(b"%PDF-garbage"), 2).unwrap_err();
        assert!(matches!(err, Error::MalformedAsset(_)));
        assert!(page_count(b"").is_err());
    }

    #[test]
    fn parses_page_requests() {
        assert_eq!(parse_page_request("2"), 2);
        assert_eq!(parse_page_request(" 12 "), 12);
        assert_eq!(parse_page_request("-1"), -1);
        assert_eq!(parse_page_request("two"), 0);
        assert_eq!(parse_page_request("2.5"), 0);
        assert_eq!(parse_page_request(""), 0);
        assert_eq!(parse_page_request("-"), 0);
    }

    #[test]
    fn oversized_page_requests_saturate() {
        assert_eq!(parse_page_request("99999999999999999999"), i64::MAX);
        assert_eq!(parse_page_request("+99999999999999999999"), i64::MAX);
        assert_eq!(parse_page_request("-99999999999999999999"), i64::MIN);
        assert_eq!(parse_page_request("99999999999999999999x"), 0);

        let source = Bytes::from(sample_pdf(4));
        let limited = limit_pages(source, parse_page_request("99999999999999999999")).unwrap();
        assert_eq!(page_count(&limited).unwrap(), 4);
    }

    #[test]
    fn nested_tree_keeps_inherited_attributes() {
        let source = Bytes::from(nested_pdf(10, 3));
        let limited = limit_pages(source.clone(), 4).unwrap();

        assert_eq!(page_count(&limited).unwrap(), 4);
        let expected: Vec<_> = page_contents(&source).into_iter().take(4).collect();
        assert_eq!(page_contents(&limited), expected);

        let doc = Document::load_mem(&limited).unwrap();
        for page_id in doc.get_pages().into_values() {
            let page = doc.get_dictionary(page_id).unwrap();
            assert!(page.has(b"MediaBox"));
            assert!(page.has(b"Resources"));
        }
        assert!(limited.len() < source.len());
    }

    #[test]
    fn large_document_is_cut_to_first_page() {
        let source = Bytes::from(sample_pdf(300));
        let limited = limit_pages(source.clone(), 1).unwrap();

        assert_eq!(page_count(&limited).unwrap(), 1);
        assert_eq!(page_contents(&limited), page_contents(&source)[..1].to_vec());

        let doc = Document::load_mem(&limited).unwrap();
        let pages = doc
            .get_object(doc.catalog().unwrap().get(b"Pages").unwrap().as_reference().unwrap())
            .unwrap()
            .as_dict()
            .unwrap();
        assert_eq!(pages.get(b"Count").unwrap().as_i64().unwrap(), 1);
    }
}
