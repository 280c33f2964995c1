/// Byte classes used by the readers.
///
/// Only ASCII is recognized; every byte outside the ASCII range fails
/// each of these predicates.
pub trait XmlByte {
    fn is_space_byte(self) -> bool;
    fn is_identifier_start_byte(self) -> bool;
    fn is_identifier_byte(self) -> bool;
    fn is_closing_name_byte(self) -> bool;
    fn is_quote_byte(self) -> bool;
}

impl XmlByte for u8 {
    fn is_space_byte(self) -> bool {
        matches!(self, b'\x20' | b'\x09' | b'\x0D' | b'\x0A' | b'\x0B' | b'\x0C')
    }

    fn is_identifier_start_byte(self) -> bool {
        matches!(self, b'A'..=b'Z' | b'_' | b'a'..=b'z')
    }

    fn is_identifier_byte(self) -> bool {
        self.is_identifier_start_byte() || self.is_ascii_digit()
    }

    /// Anything that may start the name of a closing tag. This is
    /// wider than the identifier grammar so that a misspelled closing
    /// tag is reported as a mismatch rather than swallowed as text.
    fn is_closing_name_byte(self) -> bool {
        match self {
            b'-' | b'.' | b':' => true,
            _ => self.is_identifier_byte(),
        }
    }

    fn is_quote_byte(self) -> bool {
        self == b'"' || self == b'\''
    }
}
