use std::io::Read;

use crate::cursor::Cursor;
use crate::xmlbyte::XmlByte;

use super::error::SpecificError;
use super::xmlstr::XmlStr;
use super::{skip_space, text_of};

#[derive(Debug, PartialEq)]
pub enum Attribute {
    Pair { key: String, value: String },
    /// The `>` closing the tag was consumed. `marker` is the `/` or
    /// `?` directly in front of it, if any.
    TagEnd { marker: Option<u8> },
}

fn is_end_of_key(b: u8) -> bool {
    b.is_space_byte() || b == b'>' || b == b'/' || b == b'?'
}

/// Reads one `key="value"` pair of `element`, or the end of the tag.
pub fn read_attribute<R>(cursor: &mut Cursor<R>, element: &str) -> Result<Attribute, SpecificError>
    where R: Read
{
    skip_space(cursor)?;

    match cursor.peek()? {
        None => return Err(SpecificError::UnexpectedEof("tag")),
        Some(b'>') => {
            cursor.next_byte()?;
            return Ok(Attribute::TagEnd { marker: None });
        },
        Some(marker @ b'/') | Some(marker @ b'?') => {
            cursor.next_byte()?;
            return match cursor.next_byte()? {
                Some(b'>') => Ok(Attribute::TagEnd { marker: Some(marker) }),
                Some(found) => Err(SpecificError::ExpectedTagEnd {
                    marker: marker as char,
                    found: found as char,
                }),
                None => Err(SpecificError::UnexpectedEof("tag")),
            };
        },
        Some(_) => {},
    }

    let mut key = Vec::new();
    loop {
        match cursor.peek()? {
            None => return Err(SpecificError::UnexpectedEof("attribute key")),
            Some(b'=') => {
                cursor.next_byte()?;
                break;
            },
            Some(b) if is_end_of_key(b) => {
                return Err(SpecificError::MissingAttributeValue(text_of(key)));
            },
            Some(b) => {
                cursor.next_byte()?;
                key.push(b);
            },
        }
    }
    let key = text_of(key);

    let quote = match cursor.next_byte()? {
        Some(q) if q.is_quote_byte() => q,
        Some(_) => return Err(SpecificError::UnquotedAttributeValue(key)),
        None => return Err(SpecificError::UnexpectedEof("attribute value")),
    };

    let mut value = Vec::new();
    loop {
        match cursor.next_byte()? {
            None => return Err(SpecificError::UnexpectedEof("attribute value")),
            Some(b) if b == quote => break,
            Some(b) => value.push(b),
        }
    }
    let value = text_of(value);

    if !key.as_str().is_qualified_name() {
        return Err(SpecificError::InvalidAttributeKey(key));
    }

    if value.as_str().first_unescaped().is_some() {
        return Err(SpecificError::UnescapedAttributeValue { element: element.into(), key, value });
    }

    Ok(Attribute::Pair { key, value })
}
