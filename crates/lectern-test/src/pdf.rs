//! PDF fixtures.

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat};

/// Builds a PDF with `num_pages` letter-size pages.
///
/// Each page draws the text `Page {n}`, so page content is distinct and
/// can be compared after a transform.
pub fn sample_pdf(num_pages: u32) -> Vec<u8> {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();
    let resources_id = add_resources(&mut doc);

    let mut page_ids = Vec::new();
    for i in 0..num_pages {
        let content_id = add_page_content(&mut doc, i + 1);
        let page = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            ("MediaBox", letter_box()),
            ("Resources", Object::Reference(resources_id)),
            ("Contents", Object::Reference(content_id)),
        ]);
        page_ids.push(doc.add_object(page));
    }

    insert_pages_node(&mut doc, pages_id, None, &page_ids, num_pages);
    finish(doc, pages_id)
}

/// Builds a PDF whose page tree is two levels deep.
///
/// Pages are grouped `per_node` at a time under intermediate `Pages` nodes.
/// The pages carry only their content: `Resources` live on the intermediate
/// nodes and `MediaBox` on the root, so both must be inherited.
pub fn nested_pdf(num_pages: u32, per_node: u32) -> Vec<u8> {
    let per_node = per_node.max(1);
    let mut doc = Document::with_version("1.7");
    let root_id = doc.new_object_id();
    let resources_id = add_resources(&mut doc);

    let mut node_ids = Vec::new();
    let mut number = 1;
    while number <= num_pages {
        let node_id = doc.new_object_id();
        let last = (number + per_node - 1).min(num_pages);

        let mut page_ids = Vec::new();
        for n in number..=last {
            let content_id = add_page_content(&mut doc, n);
            page_ids.push(doc.add_object(Dictionary::from_iter(vec![
                ("Type", Object::Name(b"Page".to_vec())),
                ("Parent", Object::Reference(node_id)),
                ("Contents", Object::Reference(content_id)),
            ])));
        }

        insert_pages_node(&mut doc, node_id, Some(root_id), &page_ids, last - number + 1);
        if let Ok(Object::Dictionary(node)) = doc.get_object_mut(node_id) {
            node.set("Resources", Object::Reference(resources_id));
        }

        node_ids.push(node_id);
        number = last + 1;
    }

    insert_pages_node(&mut doc, root_id, None, &node_ids, num_pages);
    if let Ok(Object::Dictionary(root)) = doc.get_object_mut(root_id) {
        root.set("MediaBox", letter_box());
    }
    finish(doc, root_id)
}

fn add_resources(doc: &mut Document) -> ObjectId {
    let font_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Font".to_vec())),
        ("Subtype", Object::Name(b"Type1".to_vec())),
        ("BaseFont", Object::Name(b"Helvetica".to_vec())),
    ]));
    doc.add_object(Dictionary::from_iter(vec![(
        "Font",
        Object::Dictionary(Dictionary::from_iter(vec![(
            "F1",
            Object::Reference(font_id),
        )])),
    )]))
}

fn add_page_content(doc: &mut Document, number: u32) -> ObjectId {
    let content = Content {
        operations: vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec![Object::Name(b"F1".to_vec()), Object::Integer(24)]),
            Operation::new("Td", vec![Object::Integer(100), Object::Integer(700)]),
            Operation::new(
                "Tj",
                vec![Object::String(
                    format!("Page {number}").into_bytes(),
                    StringFormat::Literal,
                )],
            ),
            Operation::new("ET", vec![]),
        ],
    };
    let encoded = content.encode().expect("content encodes");
    doc.add_object(Stream::new(Dictionary::new(), encoded))
}

fn letter_box() -> Object {
    Object::Array(vec![
        Object::Integer(0),
        Object::Integer(0),
        Object::Integer(612),
        Object::Integer(792),
    ])
}

fn insert_pages_node(
    doc: &mut Document,
    id: ObjectId,
    parent: Option<ObjectId>,
    kids: &[ObjectId],
    count: u32,
) {
    let mut node = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Count", Object::Integer(i64::from(count))),
        (
            "Kids",
            Object::Array(kids.iter().map(|id| Object::Reference(*id)).collect()),
        ),
    ]);
    if let Some(parent) = parent {
        node.set("Parent", Object::Reference(parent));
    }
    doc.objects.insert(id, Object::Dictionary(node));
}

fn finish(mut doc: Document, pages_id: ObjectId) -> Vec<u8> {
    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).expect("fixture PDF serializes");
    buffer
}
