//! The single-pass scanner/parser building a [`Document`]'s node tree.
//!
//! Parsing never mutates the input it is given: bytes are copied once
//! into the document's own byte arena, and the state machine below walks
//! cursors into that owned copy rather than writing NUL terminators into
//! caller memory.

use alloc::boxed::Box;

use crate::arena::ByteSpan;
use crate::document::Document;
use crate::error::{ParseError, SyntaxError};
use crate::node::{NodeData, NodeId, Tag};

impl Document {
    /// Parses `input` into a document. This never fails in the sense of
    /// panicking or returning a `Result`: a malformed input produces a
    /// document whose root is a [`Tag::Error`] node, inspectable via
    /// [`Document::error`].
    ///
    /// Trailing bytes after the first complete value are ignored, matching
    /// a single-value parse that does not care what else may follow in the
    /// caller's buffer.
    #[must_use]
    pub fn parse(input: &[u8]) -> Document {
        let mut doc = Document::empty_with_root(NodeData::Scalar(ByteSpan::EMPTY), Tag::Null);
        let raw = doc.bytes.push(input);
        let owned_start = raw.start as usize;
        let mut p = Cursor {
            doc: &mut doc,
            input,
            pos: 0,
            owned_start,
        };
        match p.parse_value() {
            Ok(root) => doc.root = root,
            Err(err) => {
                let pos = p.pos;
                let parse_err = ParseError::new(err, input, pos);
                let id = doc.alloc_node(Tag::Error, None, NodeData::Error(Box::new(parse_err)));
                doc.root = id;
            }
        }
        doc
    }

    /// Parses a UTF-8 string into a document. Equivalent to
    /// `Document::parse(input.as_bytes())`.
    #[must_use]
    pub fn parse_str(input: &str) -> Document {
        Document::parse(input.as_bytes())
    }
}

struct Cursor<'a> {
    doc: &'a mut Document,
    input: &'a [u8],
    pos: usize,
    /// Offset of the copy of `input` inside `doc.bytes`, so spans taken
    /// while parsing can be translated into the document's owned storage.
    owned_start: usize,
}

type PResult<T> = Result<T, SyntaxError>;

impl<'a> Cursor<'a> {
    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.pos += 1;
        Some(b)
    }

    fn skip_ws(&mut self) {
        while let Some(b) = self.peek() {
            if Document::is_json_whitespace(b) {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn expect(&mut self, b: u8) -> PResult<()> {
        match self.bump() {
            Some(found) if found == b => Ok(()),
            Some(found) => Err(SyntaxError::InvalidCharacter(found)),
            None => Err(SyntaxError::UnexpectedEndOfInput),
        }
    }

    fn expect_literal(&mut self, rest: &[u8]) -> PResult<()> {
        for &want in rest {
            match self.bump() {
                Some(found) if found == want => {}
                Some(found) => return Err(SyntaxError::InvalidCharacter(found)),
                None => return Err(SyntaxError::UnexpectedEndOfInput),
            }
        }
        Ok(())
    }

    /// Pushes an owned-arena span for `self.input[start..self.pos]`.
    fn owned_span(&self, start: usize) -> ByteSpan {
        ByteSpan {
            start: (self.owned_start + start) as u32,
            len: (self.pos - start) as u32,
        }
    }

    fn parse_value(&mut self) -> PResult<NodeId> {
        self.skip_ws();
        match self.peek() {
            Some(b'{') => self.parse_object(),
            Some(b'[') => self.parse_array(),
            Some(b'"') => self.parse_string(),
            Some(b't') => {
                self.pos += 1;
                self.expect_literal(b"rue")?;
                Ok(self.doc.new_bool(true))
            }
            Some(b'f') => {
                self.pos += 1;
                self.expect_literal(b"alse")?;
                Ok(self.doc.new_bool(false))
            }
            Some(b'n') => {
                self.pos += 1;
                self.expect_literal(b"ull")?;
                Ok(self.doc.new_null())
            }
            Some(b'-') | Some(b'0'..=b'9') => self.parse_number(),
            Some(other) => Err(SyntaxError::InvalidCharacter(other)),
            None => Err(SyntaxError::UnexpectedEndOfInput),
        }
    }

    fn parse_object(&mut self) -> PResult<NodeId> {
        self.expect(b'{')?;
        let object = self.doc.new_object();
        self.skip_ws();
        if self.peek() == Some(b'}') {
            self.pos += 1;
            return Ok(object);
        }
        loop {
            self.skip_ws();
            if self.peek() != Some(b'"') {
                return match self.peek() {
                    Some(b) => Err(SyntaxError::InvalidCharacter(b)),
                    None => Err(SyntaxError::UnexpectedEndOfInput),
                };
            }
            let key_span = self.scan_string_body()?;
            let key = self.doc.bytes.get(key_span).to_vec();
            self.skip_ws();
            self.expect(b':')?;
            let value = self.parse_value()?;
            self.doc.object_append(object, &key, value);
            self.skip_ws();
            match self.bump() {
                Some(b',') => {
                    self.skip_ws();
                    if self.peek() == Some(b'}') {
                        return Err(SyntaxError::TrailingComma('}'));
                    }
                }
                Some(b'}') => return Ok(object),
                Some(b) => return Err(SyntaxError::InvalidCharacter(b)),
                None => return Err(SyntaxError::UnexpectedEndOfInput),
            }
        }
    }

    fn parse_array(&mut self) -> PResult<NodeId> {
        self.expect(b'[')?;
        let array = self.doc.new_array();
        self.skip_ws();
        if self.peek() == Some(b']') {
            self.pos += 1;
            return Ok(array);
        }
        loop {
            let value = self.parse_value()?;
            self.doc.array_append(array, value);
            self.skip_ws();
            match self.bump() {
                Some(b',') => {
                    self.skip_ws();
                    if self.peek() == Some(b']') {
                        return Err(SyntaxError::TrailingComma(']'));
                    }
                }
                Some(b']') => return Ok(array),
                Some(b) => return Err(SyntaxError::InvalidCharacter(b)),
                None => return Err(SyntaxError::UnexpectedEndOfInput),
            }
        }
    }

    /// Scans a quoted string's body, tolerating escaped quotes via
    /// odd/even backslash-run counting, and returns the span of its raw
    /// (still-escaped) bytes, excluding the surrounding quotes.
    fn scan_string_body(&mut self) -> PResult<ByteSpan> {
        self.expect(b'"')?;
        let start = self.pos;
        loop {
            match self.bump() {
                Some(b'"') => {
                    let body_end = self.pos - 1;
                    let span = ByteSpan {
                        start: (self.owned_start + start) as u32,
                        len: (body_end - start) as u32,
                    };
                    return Ok(span);
                }
                Some(b'\\') => {
                    // Any byte, including a second backslash or a quote,
                    // is consumed as part of the escape and never ends
                    // the string.
                    if self.bump().is_none() {
                        return Err(SyntaxError::UnterminatedString);
                    }
                }
                Some(_) => {}
                None => return Err(SyntaxError::UnterminatedString),
            }
        }
    }

    fn parse_string(&mut self) -> PResult<NodeId> {
        let span = self.scan_string_body()?;
        Ok(self
            .doc
            .alloc_node(Tag::String, None, NodeData::Scalar(span)))
    }

    fn parse_number(&mut self) -> PResult<NodeId> {
        let start = self.pos;
        let mut is_zero_literal = true;
        if self.peek() == Some(b'-') {
            self.pos += 1;
            is_zero_literal = false;
        }
        match self.bump() {
            Some(b'0') => {}
            Some(b'1'..=b'9') => {
                is_zero_literal = false;
                while matches!(self.peek(), Some(b'0'..=b'9')) {
                    self.pos += 1;
                }
            }
            Some(b) => return Err(SyntaxError::InvalidCharacter(b)),
            None => return Err(SyntaxError::UnexpectedEndOfInput),
        }
        let mut is_decimal = false;
        if self.peek() == Some(b'.') {
            is_decimal = true;
            is_zero_literal = false;
            self.pos += 1;
            if !matches!(self.peek(), Some(b'0'..=b'9')) {
                return Err(SyntaxError::InvalidNumber);
            }
            while matches!(self.peek(), Some(b'0'..=b'9')) {
                self.pos += 1;
            }
        }
        if matches!(self.peek(), Some(b'e') | Some(b'E')) {
            is_decimal = true;
            is_zero_literal = false;
            self.pos += 1;
            if matches!(self.peek(), Some(b'+') | Some(b'-')) {
                self.pos += 1;
            }
            if !matches!(self.peek(), Some(b'0'..=b'9')) {
                return Err(SyntaxError::InvalidNumber);
            }
            while matches!(self.peek(), Some(b'0'..=b'9')) {
                self.pos += 1;
            }
        }
        let span = self.owned_span(start);
        let tag = if is_zero_literal {
            Tag::Zero
        } else if is_decimal {
            Tag::Decimal
        } else {
            Tag::Number
        };
        Ok(self.doc.alloc_node(tag, None, NodeData::Scalar(span)))
    }
}
