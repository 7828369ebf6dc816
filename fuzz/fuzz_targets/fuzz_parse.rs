#![no_main]
use arbitrary::{Arbitrary, Unstructured};
use arenajson::{Document, SerializeOptions};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // The first few bytes pick a pretty-print indent step; whatever is
    // left is the JSON text itself.
    let mut u = Unstructured::new(data);
    let options = SerializeOptions::arbitrary(&mut u).unwrap_or_default();
    let json = u.take_rest();

    let doc = Document::parse(json);
    if doc.is_error() {
        return;
    }

    let root = doc.root();
    let compact = doc.to_compact(root);
    assert!(compact.len() <= doc.estimate_compact(root));

    let pretty = doc.to_pretty(root, options);
    assert!(pretty.len() <= doc.estimate_pretty(root, options));

    // A document we just produced ourselves must always parse back cleanly.
    let reparsed = Document::parse(&compact);
    assert!(!reparsed.is_error());
});
