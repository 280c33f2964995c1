//! Checks a byte stream against the XML dialect in a single pass.
//!
//! ### Example
//!
//! ```
//! use sxd_validator::parser::Parser;
//! let parser = Parser::new();
//! let xml = r#"<?xml version="1.0" encoding="utf-8"?>
//! <!-- Awesome data incoming -->
//! <data awesome="true">
//!   <datum>Science</datum>
//!   <datum>Math &gt; others</datum>
//! </data>"#;
//! parser.validate(xml.as_bytes()).expect("Failed to validate");
//! ```
//!
//! ### Error handling
//!
//! Validation stops at the first fault. The returned error carries the
//! location at which the fault was noticed, which is usually just after
//! the offending construct.
//!
//! ### Known limitations
//!
//! - Mixed content is not supported: an element may contain either
//!   text or child elements and comments, never text followed by an
//!   element.
//! - Names are restricted to ASCII identifiers with at most one
//!   namespace prefix.

use std::io::Read;

use log::{debug, trace};

use crate::cursor::Cursor;
use crate::xmlbyte::XmlByte;

use self::header::Header;

pub use self::error::{Error, ErrorCategory, SpecificError};

mod attribute;
mod error;
mod header;
mod text;
mod xmlstr;

fn text_of(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    }
}

fn skip_space<R>(cursor: &mut Cursor<R>) -> Result<(), SpecificError>
    where R: Read
{
    while let Some(b) = cursor.peek()? {
        if !b.is_space_byte() {
            break;
        }
        cursor.next_byte()?;
    }
    Ok(())
}

/// Reads up to the next whitespace, for quoting in a diagnostic. A `>`
/// ends the token and is included in it.
fn read_token<R>(cursor: &mut Cursor<R>) -> Result<String, SpecificError>
    where R: Read
{
    let mut token = Vec::new();

    while let Some(b) = cursor.peek()? {
        if b.is_space_byte() {
            break;
        }
        cursor.next_byte()?;
        token.push(b);
        if b == b'>' {
            break;
        }
    }

    Ok(text_of(token))
}

#[derive(Debug, Default)]
struct DocumentState {
    elements: Vec<String>,
    seen_content: bool,
    prolog_found: bool,
    content_before_prolog: bool,
    root_found: bool,
    root_closed: bool,
}

impl DocumentState {
    fn scan<R>(&mut self, cursor: &mut Cursor<R>) -> Result<(), SpecificError>
        where R: Read
    {
        loop {
            skip_space(cursor)?;

            let (first, second) = match cursor.peek()? {
                None => break,
                Some(first) => (first, cursor.peek_nth(1)?),
            };

            self.seen_content = true;
            trace!("{}: next token starts with {:?}", cursor.location(), first as char);

            match (first, second) {
                (b'<', Some(b'!')) => self.comment(cursor)?,
                (b'<', Some(b'?')) => self.prolog(cursor)?,
                (b'<', Some(b'/')) => self.closing_tag(cursor)?,
                (b'<', Some(b)) if b.is_identifier_start_byte() => self.element(cursor)?,
                _ => self.text(cursor)?,
            }
        }

        self.finish()
    }

    fn comment<R>(&mut self, cursor: &mut Cursor<R>) -> Result<(), SpecificError>
        where R: Read
    {
        Header::Comment.read(cursor)?;
        self.mark_content();
        Ok(())
    }

    fn prolog<R>(&mut self, cursor: &mut Cursor<R>) -> Result<(), SpecificError>
        where R: Read
    {
        if self.prolog_found {
            return Err(SpecificError::MultipleProlog);
        }
        if self.content_before_prolog {
            return Err(SpecificError::PrologNotFirst);
        }

        Header::Prolog.read(cursor)?;
        self.prolog_found = true;
        debug!("prolog accepted");
        Ok(())
    }

    fn element<R>(&mut self, cursor: &mut Cursor<R>) -> Result<(), SpecificError>
        where R: Read
    {
        let element = Header::Element.read(cursor)?;

        if self.elements.is_empty() {
            if self.root_closed {
                return Err(SpecificError::SecondRoot(element.name));
            }
            self.root_found = true;
        }

        if element.closed {
            if self.elements.is_empty() {
                self.root_closed = true;
            }
        } else {
            debug!("open <{}> at depth {}", element.name, self.elements.len());
            self.elements.push(element.name);
        }

        self.mark_content();
        Ok(())
    }

    fn closing_tag<R>(&mut self, cursor: &mut Cursor<R>) -> Result<(), SpecificError>
        where R: Read
    {
        cursor.consume_literal(b"</")?;

        let mut name = Vec::new();
        loop {
            match cursor.next_byte()? {
                None => return Err(SpecificError::UnexpectedEof("closing tag")),
                Some(b'>') => break,
                Some(b) => name.push(b),
            }
        }
        while name.last().map_or(false, |b| b.is_space_byte()) {
            name.pop();
        }
        let name = text_of(name);

        match self.elements.last() {
            None => return Err(SpecificError::UnexpectedClosingTag(name)),
            Some(open) if *open != name => {
                return Err(SpecificError::MismatchedClosingTag { found: name, expected: open.clone() });
            },
            Some(_) => {},
        }

        self.elements.pop();
        debug!("close </{}> at depth {}", name, self.elements.len());
        if self.elements.is_empty() {
            self.root_closed = true;
        }
        Ok(())
    }

    fn text<R>(&mut self, cursor: &mut Cursor<R>) -> Result<(), SpecificError>
        where R: Read
    {
        match self.elements.last() {
            Some(element) => text::read_text(cursor, element),
            None => Err(SpecificError::TextOutsideElement(read_token(cursor)?)),
        }
    }

    fn mark_content(&mut self) {
        if !self.prolog_found {
            self.content_before_prolog = true;
        }
    }

    fn finish(&self) -> Result<(), SpecificError> {
        if !self.seen_content {
            return Err(SpecificError::EmptyFile);
        }
        if let Some(open) = self.elements.last() {
            return Err(SpecificError::UnclosedElement(open.clone()));
        }
        if !self.root_found {
            return Err(SpecificError::NoRootElement);
        }
        Ok(())
    }
}

/// Validates documents. Holds no state between documents.
#[derive(Debug, Default, Copy, Clone)]
pub struct Parser;

impl Parser {
    pub fn new() -> Parser {
        Parser
    }

    pub fn validate<R>(&self, input: R) -> Result<(), Error>
        where R: Read
    {
        let mut cursor = Cursor::new(input);
        let mut state = DocumentState::default();

        let result = state.scan(&mut cursor);
        match result {
            Ok(()) => {
                debug!("document is valid");
                Ok(())
            },
            Err(e) => {
                let location = cursor.location();
                debug!("document is invalid at {}: {}", location, e);
                Err(Error::new(location, e))
            },
        }
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::{Error, ErrorCategory, Parser, SpecificError};

    fn full_parse(xml: &str) -> Result<(), Error> {
        Parser::new()
            .validate(xml.as_bytes())
    }

    fn quick_parse(xml: &str) {
        if let Err(e) = full_parse(xml) {
            panic!("Failed to validate the XML string: {}", e);
        }
    }

    fn parse_failure(xml: &str) -> SpecificError {
        match full_parse(xml) {
            Ok(()) => panic!("Unexpectedly validated: {}", xml),
            Err(e) => e.into_specific(),
        }
    }

    #[test]
    fn a_document_with_a_prolog() {
        quick_parse("<?xml version='1.0' ?><hello />");
    }

    #[test]
    fn a_document_with_a_full_prolog() {
        quick_parse(r#"<?xml version="1.0" encoding="utf-8"?>
<hello/>"#);
    }

    #[test]
    fn a_document_with_only_an_element() {
        quick_parse("<hello/>");
    }

    #[test]
    fn nested_elements() {
        quick_parse("<hello><world/></hello>");
    }

    #[test]
    fn nested_elements_with_attributes() {
        quick_parse("<hello><world name='Earth'/></hello>");
    }

    #[test]
    fn element_with_text() {
        quick_parse("<hello>world</hello>");
    }

    #[test]
    fn element_with_entity_reference() {
        quick_parse("<math>I &lt;3 math</math>");
    }

    #[test]
    fn element_with_comment() {
        quick_parse("<hello><!-- A comment --></hello>");
    }

    #[test]
    fn comment_before_top_element() {
        quick_parse("<!-- A comment --><hello />");
    }

    #[test]
    fn multiple_comments_after_top_element() {
        quick_parse("
<hello />
<!--Comment 1-->
<!--Comment 2-->
");
    }

    #[test]
    fn namespaced_elements() {
        quick_parse("<ns:hello xmlns:ns='urn:x'><ns:world/></ns:hello>");
    }

    #[test]
    fn closing_tag_with_trailing_space() {
        quick_parse("<hello>world</hello >");
    }

    #[test]
    fn deeply_nested_siblings() {
        quick_parse("<a><b><c>1</c><c>2</c></b><b/></a>");
    }

    #[test]
    fn failure_empty_file() {
        assert!(matches!(parse_failure(""), SpecificError::EmptyFile));
        assert!(matches!(parse_failure(" \n\t "), SpecificError::EmptyFile));
    }

    #[test]
    fn failure_only_a_prolog() {
        let e = parse_failure("<?xml version='1.0'?>");

        assert!(matches!(e, SpecificError::NoRootElement));
    }

    #[test]
    fn failure_two_roots() {
        let e = parse_failure("<a></a><b></b>");

        assert!(matches!(e, SpecificError::SecondRoot(ref n) if n == "b"));
    }

    #[test]
    fn failure_two_self_closing_roots() {
        let e = parse_failure("<a/><b/>");

        assert!(matches!(e, SpecificError::SecondRoot(ref n) if n == "b"));
    }

    #[test]
    fn failure_two_prologs() {
        let e = parse_failure("<?xml version='1.0'?><?xml version='1.0'?><a/>");

        assert!(matches!(e, SpecificError::MultipleProlog));
    }

    #[test]
    fn failure_comment_before_prolog() {
        let e = parse_failure("<!-- hi --><?xml version='1.0'?><a/>");

        assert!(matches!(e, SpecificError::PrologNotFirst));
    }

    #[test]
    fn failure_element_before_prolog() {
        let e = parse_failure("<a/><?xml version='1.0'?>");

        assert!(matches!(e, SpecificError::PrologNotFirst));
    }

    #[test]
    fn failure_mismatched_closing_tag() {
        let e = parse_failure("<a><b></a>");

        match e {
            SpecificError::MismatchedClosingTag { found, expected } => {
                assert_eq!(found, "a");
                assert_eq!(expected, "b");
            },
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn failure_closing_tag_with_leading_space() {
        let e = full_parse("<a>x</ a>").unwrap_err();

        assert_eq!(e.category(), ErrorCategory::Structural);
        assert_eq!(e.to_string(), "line 1, column 10: invalid tag: ' a', expected 'a'");
    }

    #[test]
    fn failure_closing_tag_without_open_element() {
        let e = parse_failure("</a>");

        assert!(matches!(e, SpecificError::UnexpectedClosingTag(ref n) if n == "a"));
    }

    #[test]
    fn failure_closing_tag_after_root() {
        let e = parse_failure("<a></a></a>");

        assert!(matches!(e, SpecificError::UnexpectedClosingTag(..)));
    }

    #[test]
    fn failure_unclosed_root() {
        let e = parse_failure("<a><b></b>");

        assert!(matches!(e, SpecificError::UnclosedElement(ref n) if n == "a"));
    }

    #[test]
    fn failure_text_outside_element() {
        let e = parse_failure("hello");

        assert!(matches!(e, SpecificError::TextOutsideElement(ref t) if t == "hello"));
    }

    #[test]
    fn failure_text_after_root() {
        let e = parse_failure("<a/> trailing");

        assert!(matches!(e, SpecificError::TextOutsideElement(..)));
    }

    #[test]
    fn failure_mixed_content() {
        let e = parse_failure("<hello>to <a/></hello>");

        assert!(matches!(e, SpecificError::ElementInsideText { .. }));
    }

    #[test]
    fn failure_unescaped_text() {
        let e = full_parse("<hello>fish & chips</hello>").unwrap_err();

        assert_eq!(e.category(), ErrorCategory::Encoding);
    }

    #[test]
    fn failure_unescaped_attribute() {
        let e = full_parse("<hello a='<'/>").unwrap_err();

        assert_eq!(e.category(), ErrorCategory::Encoding);
    }

    #[test]
    fn failure_unterminated_closing_tag() {
        let e = full_parse("<hello></hello").unwrap_err();

        assert_eq!(e.category(), ErrorCategory::Io);
    }

    #[test]
    fn failure_reports_location() {
        let e = full_parse("<a>\n  <b x='1' x='2'/>\n</a>").unwrap_err();

        assert_eq!(e.location().line, 2);
        assert_eq!(e.category(), ErrorCategory::Structural);
    }

    #[test]
    fn validation_is_repeatable() {
        let xml = "<a><b>&amp;</b></a>";
        let parser = Parser::new();

        for _ in 0..3 {
            assert!(parser.validate(xml.as_bytes()).is_ok());
        }
    }
}
