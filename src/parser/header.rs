use std::collections::HashSet;
use std::io::Read;

use crate::cursor::Cursor;
use crate::xmlbyte::XmlByte;

use super::attribute::{read_attribute, Attribute};
use super::error::SpecificError;
use super::xmlstr::XmlStr;
use super::{read_token, text_of};

/// The kinds of construct that start with `<` and are read in one go.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Header {
    Prolog,
    Element,
    Comment,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedHeader {
    pub name: String,
    /// The construct needs no closing tag: `/>` for elements, `?>` for
    /// the prolog, and always for comments.
    pub closed: bool,
}

impl Header {
    pub fn read<R>(self, cursor: &mut Cursor<R>) -> Result<ParsedHeader, SpecificError>
        where R: Read
    {
        match self {
            Header::Prolog => read_prolog(cursor),
            Header::Element => read_element(cursor),
            Header::Comment => read_comment(cursor),
        }
    }
}

fn read_prolog<R>(cursor: &mut Cursor<R>) -> Result<ParsedHeader, SpecificError>
    where R: Read
{
    if !cursor.consume_literal(b"<?xml")? {
        return Err(SpecificError::InvalidProlog(read_token(cursor)?));
    }

    if !cursor.peek()?.map_or(false, |b| b.is_space_byte()) {
        let rest = read_token(cursor)?;
        return Err(SpecificError::InvalidProlog(format!("<?xml{}", rest)));
    }

    let mut keys = HashSet::new();

    loop {
        let (key, value) = match read_attribute(cursor, "xml")? {
            Attribute::TagEnd { marker: Some(b'?') } => break,
            Attribute::TagEnd { .. } => return Err(SpecificError::UnclosedProlog),
            Attribute::Pair { key, value } => (key, value),
        };

        if keys.contains(&key) {
            return Err(SpecificError::DuplicatePrologAttribute(key));
        }

        match &key[..] {
            "version" if value != "1.0" => return Err(SpecificError::UnsupportedVersion(value)),
            "encoding" if value != "utf-8" => return Err(SpecificError::UnsupportedEncoding(value)),
            "version" | "encoding" => {},
            _ => return Err(SpecificError::UnknownPrologAttribute(key)),
        }

        keys.insert(key);
    }

    if keys.is_empty() {
        return Err(SpecificError::EmptyProlog);
    }

    Ok(ParsedHeader { name: "xml".into(), closed: true })
}

fn read_element<R>(cursor: &mut Cursor<R>) -> Result<ParsedHeader, SpecificError>
    where R: Read
{
    cursor.next_byte()?;

    let mut first = Vec::new();
    let mut second = None;

    loop {
        match cursor.peek()? {
            None => return Err(SpecificError::UnexpectedEof("tag name")),
            Some(b) if b.is_space_byte() || b == b'>' || b == b'/' => break,
            Some(b':') => {
                cursor.next_byte()?;
                if let Some(local) = second {
                    let mut near = first;
                    near.push(b':');
                    near.extend(local);
                    near.push(b':');
                    return Err(SpecificError::RepeatedNamespace(text_of(near)));
                }
                second = Some(Vec::new());
            },
            Some(b) => {
                cursor.next_byte()?;
                match second {
                    Some(ref mut local) => local.push(b),
                    None => first.push(b),
                }
            },
        }
    }

    let name = match second {
        Some(local) => {
            let prefix = text_of(first);
            let local = text_of(local);
            if !prefix.as_str().is_identifier() {
                return Err(SpecificError::InvalidNamespace(prefix));
            }
            let name = format!("{}:{}", prefix, local);
            if !local.as_str().is_identifier() {
                return Err(SpecificError::InvalidTagName(name));
            }
            name
        },
        None => {
            let name = text_of(first);
            if !name.as_str().is_identifier() {
                return Err(SpecificError::InvalidTagName(name));
            }
            name
        },
    };

    let mut keys = HashSet::new();

    let closed = loop {
        match read_attribute(cursor, &name)? {
            Attribute::TagEnd { marker: None } => break false,
            Attribute::TagEnd { marker: Some(b'/') } => break true,
            Attribute::TagEnd { marker: Some(m) } => {
                return Err(SpecificError::MisplacedMarker { element: name, marker: m as char });
            },
            Attribute::Pair { key, .. } => {
                if !keys.insert(key.clone()) {
                    return Err(SpecificError::DuplicateAttribute { element: name, key });
                }
            },
        }
    };

    Ok(ParsedHeader { name, closed })
}

fn read_comment<R>(cursor: &mut Cursor<R>) -> Result<ParsedHeader, SpecificError>
    where R: Read
{
    if !cursor.consume_literal(b"<!--")? {
        return Err(SpecificError::MalformedComment(read_token(cursor)?));
    }

    let mut body = Vec::new();
    loop {
        match cursor.next_byte()? {
            None => return Err(SpecificError::UnterminatedComment),
            Some(b) => body.push(b),
        }
        if body.ends_with(b"-->") {
            body.truncate(body.len() - 3);
            break;
        }
    }

    // A dash right before the terminator forms `--` with it.
    if body.windows(2).any(|w| w == b"--") || body.last() == Some(&b'-') {
        return Err(SpecificError::DoubleDashInComment(text_of(body)));
    }

    Ok(ParsedHeader { name: String::new(), closed: true })
}
