use std::io::Read;

use crate::cursor::Cursor;
use crate::xmlbyte::XmlByte;

use super::error::SpecificError;
use super::text_of;
use super::xmlstr::XmlStr;

/// Reads the value of `element` up to its closing tag, which is left
/// unread.
pub fn read_text<R>(cursor: &mut Cursor<R>, element: &str) -> Result<(), SpecificError>
    where R: Read
{
    let mut text = Vec::new();

    loop {
        match cursor.peek()? {
            None => return Err(SpecificError::UnexpectedEof("element value")),
            Some(b'<') => {
                match cursor.peek_nth(1)? {
                    Some(b'/') => {
                        let next = cursor.peek_nth(2)?;
                        if next.map_or(false, |b| b.is_closing_name_byte() || b.is_space_byte()) {
                            break;
                        }
                    },
                    Some(b) if b.is_identifier_start_byte() => {
                        cursor.next_byte()?;
                        let mut name = Vec::new();
                        while let Some(b) = cursor.peek()? {
                            if !b.is_identifier_byte() {
                                break;
                            }
                            cursor.next_byte()?;
                            name.push(b);
                        }
                        return Err(SpecificError::ElementInsideText {
                            parent: element.into(),
                            name: text_of(name),
                        });
                    },
                    _ => {},
                }
                cursor.next_byte()?;
                text.push(b'<');
            },
            Some(b) => {
                cursor.next_byte()?;
                text.push(b);
            },
        }
    }

    let text = text_of(text);
    if text.as_str().first_unescaped().is_some() {
        return Err(SpecificError::UnescapedText { element: element.into(), text });
    }

    Ok(())
}
