//! Concrete parse/query scenarios and parse-error cases.

use arenajson::Document;
use rstest::rstest;

#[rstest]
#[case::empty_object(r#"{}"#)]
#[case::empty_array(r#"[]"#)]
#[case::nested(r#"{"a":{"b":[1,2,3]}}"#)]
#[case::zero(r#"0"#)]
#[case::negative_zero(r#"-0"#)]
#[case::decimal(r#"-1.5e10"#)]
#[case::escaped_key(r#"{"a\"b":1}"#)]
#[case::surrogate_pair(r#""😀""#)]
fn parses_without_error(#[case] input: &str) {
    let doc = Document::parse(input.as_bytes());
    assert!(!doc.is_error(), "expected {input} to parse, got {:?}", doc.error());
}

#[rstest]
#[case::trailing_comma_object(r#"{"a":1,}"#)]
#[case::trailing_comma_array(r#"[1,2,]"#)]
#[case::bad_literal(r#"tru"#)]
#[case::leading_zero(r#"01"#)]
#[case::missing_exponent_digits(r#"1e"#)]
#[case::unterminated_string(r#""abc"#)]
#[case::bom(&"\u{feff}{}")]
fn reports_parse_error(#[case] input: &str) {
    let doc = Document::parse(input.as_bytes());
    assert!(doc.is_error(), "expected {input:?} to fail to parse");
}

#[test]
fn zero_and_negative_zero_have_distinct_tags() {
    let doc = Document::parse(b"0");
    assert!(doc.is_number(doc.root()));
    let doc = Document::parse(b"-0");
    assert!(doc.is_number(doc.root()));
    assert_eq!(doc.raw_view(doc.root()), Some(b"-0".as_slice()));
}

#[test]
fn object_preserves_insertion_order() {
    let mut doc = Document::new_object_document();
    let root = doc.root();
    let a = doc.new_number_string("1");
    let b = doc.new_number_string("2");
    doc.object_append(root, b"z", a);
    doc.object_append(root, b"a", b);
    let keys: Vec<_> = doc.object_scan(root).map(|(k, _)| k.to_vec()).collect();
    assert_eq!(keys, vec![b"z".to_vec(), b"a".to_vec()]);
}

#[test]
fn duplicate_keys_scan_to_first_occurrence() {
    let mut doc = Document::new_object_document();
    let root = doc.root();
    let first = doc.new_number_string("1");
    let second = doc.new_number_string("2");
    doc.object_append(root, b"k", first);
    doc.object_append(root, b"k", second);
    let found = doc.object_scan_get(root, b"k").unwrap();
    assert_eq!(found, first);
}

#[test]
fn get_and_find_agree_with_scan_after_crossover() {
    let mut doc = Document::new_object_document();
    let root = doc.root();
    let first = doc.new_number_string("1");
    let second = doc.new_number_string("2");
    doc.object_append(root, b"k", first);
    doc.object_append(root, b"k", second);

    // Build the tree first (via find), then the sorted snapshot (via
    // get); each must still report the first occurrence, not whatever
    // the other index's rebuild might otherwise leave behind.
    assert_eq!(doc.object_find_node(root, b"k"), Some(first));
    assert_eq!(doc.object_get_node(root, b"k"), Some(first));
    assert_eq!(doc.object_find_node(root, b"k"), Some(first));
}

#[test]
fn path_raw_supports_index_and_filter_segments() {
    let mut doc = Document::parse(br#"{"items":[{"id":"a"},{"id":"b"}]}"#);
    let root = doc.root();
    let first = doc.path_raw(root, b"items.0").unwrap();
    assert!(doc.is_object(first));
    let filtered = doc.path_raw(root, b"items.id=b").unwrap();
    assert_eq!(doc.decoded_view(doc.object_scan_get(filtered, b"id").unwrap()).as_deref(), Some(b"b".as_slice()));
}

#[test]
fn serialize_round_trips_structure() {
    let doc = Document::parse(br#"{"a":1,"b":[true,false,null,"x"]}"#);
    let root = doc.root();
    let out = doc.to_string_compact(root);
    let doc2 = Document::parse(out.as_bytes());
    assert!(!doc2.is_error());
    assert_eq!(doc2.to_string_compact(doc2.root()), out);
}
