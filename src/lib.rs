//! Validates documents written in a strict subset of XML.
//!
//! The validator reads its input once, front to back, and never builds
//! a tree. It stops at the first problem it finds.
//!
//! ```
//! use sxd_validator::{validate_str, ErrorCategory};
//!
//! assert!(validate_str("<hello planet='Earth'>Greetings!</hello>").is_ok());
//!
//! let error = validate_str("<hello>fish & chips</hello>").unwrap_err();
//! assert_eq!(error.category(), ErrorCategory::Encoding);
//! ```
//!
//! ### The dialect
//!
//! - An optional `<?xml ...?>` prolog, allowing only `version="1.0"`
//!   and `encoding="utf-8"`, before anything else.
//! - Exactly one root element.
//! - Element and attribute names are C-like identifiers, with an
//!   optional `prefix:` namespace.
//! - `<`, `>`, `&`, `'` and `"` in values must be written as one of the
//!   five predefined entity references.
//! - Comments may not contain `--`.
//!
//! There is no support for DTDs, CDATA sections or processing
//! instructions.

use std::io::Read;

mod cursor;
mod xmlbyte;

pub mod parser;

pub use crate::cursor::Location;
pub use crate::parser::{Error, ErrorCategory, Parser, SpecificError};

/// Validates everything `input` produces as one document.
pub fn validate<R>(input: R) -> Result<(), Error>
    where R: Read
{
    Parser::new().validate(input)
}

/// Validates a document that is already in memory.
pub fn validate_str(xml: &str) -> Result<(), Error> {
    validate(xml.as_bytes())
}
