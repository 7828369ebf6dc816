//! Property-based checks over arbitrary documents built programmatically
//! (quickcheck generates structure directly, since a JSON-syntax
//! generator would mostly just re-test the parser's grammar rather than
//! the serializer's invariants).

use arenajson::{Document, NodeId, SerializeOptions};
use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;

#[derive(Clone, Debug)]
enum Shape {
    Null,
    Bool(bool),
    Number(i32),
    Str(String),
    Array(Vec<Shape>),
    Object(Vec<(String, Shape)>),
}

impl Arbitrary for Shape {
    fn arbitrary(g: &mut Gen) -> Self {
        let depth = *g.choose(&[0u8, 1, 2]).unwrap();
        arbitrary_at(g, depth)
    }
}

fn arbitrary_at(g: &mut Gen, depth: u8) -> Shape {
    if depth == 0 {
        return match *g.choose(&[0u8, 1, 2, 3]).unwrap() {
            0 => Shape::Null,
            1 => Shape::Bool(bool::arbitrary(g)),
            2 => Shape::Number(i32::arbitrary(g)),
            _ => Shape::Str(String::arbitrary(g)),
        };
    }
    match *g.choose(&[0u8, 1]).unwrap() {
        0 => Shape::Array((0..3).map(|_| arbitrary_at(g, depth - 1)).collect()),
        _ => Shape::Object(
            (0..3)
                .map(|i| (format!("k{i}"), arbitrary_at(g, depth - 1)))
                .collect(),
        ),
    }
}

fn build(doc: &mut Document, shape: &Shape) -> NodeId {
    match shape {
        Shape::Null => doc.new_null(),
        Shape::Bool(b) => doc.new_bool(*b),
        Shape::Number(n) => doc.new_number_i64(i64::from(*n)),
        Shape::Str(s) => doc.new_string_encode(s.as_bytes()),
        Shape::Array(items) => {
            let arr = doc.new_array();
            for item in items {
                let v = build(doc, item);
                doc.array_append(arr, v);
            }
            arr
        }
        Shape::Object(entries) => {
            let obj = doc.new_object();
            for (k, v) in entries {
                let value = build(doc, v);
                doc.object_append(obj, k.as_bytes(), value);
            }
            obj
        }
    }
}

#[quickcheck]
fn estimate_is_upper_bound_compact(shape: Shape) -> bool {
    let mut doc = Document::new_null_document();
    let root = build(&mut doc, &shape);
    doc.to_compact(root).len() <= doc.estimate_compact(root)
}

#[quickcheck]
fn estimate_is_upper_bound_pretty(shape: Shape) -> bool {
    let mut doc = Document::new_null_document();
    let root = build(&mut doc, &shape);
    let options = SerializeOptions::default();
    doc.to_pretty(root, options).len() <= doc.estimate_pretty(root, options)
}

#[quickcheck]
fn parse_then_dump_is_idempotent(shape: Shape) -> bool {
    let mut doc = Document::new_null_document();
    let root = build(&mut doc, &shape);
    let first = doc.to_compact(root);
    let doc2 = Document::parse(&first);
    if doc2.is_error() {
        return false;
    }
    let second = doc2.to_compact(doc2.root());
    first == second
}
