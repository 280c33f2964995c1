use peresil::{Progress, Status, StringPoint};

use crate::xmlbyte::XmlByte;

const ENTITY_REFERENCES: [&str; 5] = ["&lt;", "&gt;", "&amp;", "&apos;", "&quot;"];

pub trait XmlStr {
    fn end_of_identifier(&self) -> Option<usize>;
    fn end_of_entity_reference(&self) -> Option<usize>;
    fn first_unescaped(&self) -> Option<usize>;
    fn is_identifier(&self) -> bool;
    fn is_qualified_name(&self) -> bool;
}

impl<'a> XmlStr for &'a str {
    fn end_of_identifier(&self) -> Option<usize> {
        let mut bytes = self.bytes();

        match bytes.next() {
            Some(b) if b.is_identifier_start_byte() => {},
            _ => return None,
        }

        let rest = bytes.take_while(|b| b.is_identifier_byte()).count();
        Some(1 + rest)
    }

    /// Only the five predefined entities are understood; character
    /// references and user entities are not part of the dialect.
    fn end_of_entity_reference(&self) -> Option<usize> {
        let xml = StringPoint::new(self);

        ENTITY_REFERENCES.iter().find_map(|entity| {
            match xml.consume_literal(*entity) {
                Progress { status: Status::Success(_), point } => Some(point.offset),
                Progress { status: Status::Failure(_), .. } => None,
            }
        })
    }

    fn first_unescaped(&self) -> Option<usize> {
        let bytes = self.as_bytes();
        let mut offset = 0;

        while offset < bytes.len() {
            match bytes[offset] {
                b'<' | b'>' | b'\'' | b'"' => return Some(offset),
                b'&' => match (&self[offset..]).end_of_entity_reference() {
                    Some(len) => offset += len,
                    None => return Some(offset),
                },
                _ => offset += 1,
            }
        }

        None
    }

    fn is_identifier(&self) -> bool {
        self.end_of_identifier() == Some(self.len())
    }

    fn is_qualified_name(&self) -> bool {
        match self.split_once(':') {
            Some((prefix, local)) => prefix.is_identifier() && local.is_identifier(),
            None => self.is_identifier(),
        }
    }
}
