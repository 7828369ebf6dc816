//! No-copy aliasing and round-trip checks for the escape/unescape codecs.

use std::borrow::Cow;

use arenajson::codecs::{decode, encode};

#[test]
fn decode_aliases_input_with_no_escapes() {
    let input = b"hello world";
    match decode(input) {
        Cow::Borrowed(b) => assert_eq!(b, input),
        Cow::Owned(_) => panic!("expected decode to alias input with no backslashes"),
    }
}

#[test]
fn encode_aliases_input_needing_no_escapes() {
    let input = b"hello world";
    match encode(input) {
        Cow::Borrowed(b) => assert_eq!(b, input),
        Cow::Owned(_) => panic!("expected encode to alias input needing no escaping"),
    }
}

#[test]
fn decode_handles_basic_escapes() {
    assert_eq!(&*decode(br#"a\"b\\c\/d"#), b"a\"b\\c/d".as_slice());
    assert_eq!(&*decode(br"line\nbreak"), b"line\nbreak".as_slice());
}

#[test]
fn decode_combines_surrogate_pairs() {
    // U+1F600, encoded as a UTF-16 surrogate pair escape sequence.
    let decoded = decode(br"\uD83D\uDE00");
    assert_eq!(&*decoded, "\u{1F600}".as_bytes());
}

#[test]
fn decode_passes_through_malformed_unicode_escape() {
    let decoded = decode(br"\uZZZZ");
    assert_eq!(&*decoded, b"\\uZZZZ".as_slice());
}

#[test]
fn encode_escapes_control_bytes_and_specials() {
    let encoded = encode(b"a\"b\\c\x01d");
    assert_eq!(&*encoded, b"a\\\"b\\\\c\\u0001d".as_slice());
}
