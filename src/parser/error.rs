use std::io;

use crate::cursor::Location;

/// The broad class a validation failure belongs to.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The document is not shaped like the dialect allows.
    Structural,
    /// A value or text contains a character that must be escaped.
    Encoding,
    /// The input could not be read, was empty, or ended too early.
    Io,
}

#[derive(Debug, thiserror::Error)]
pub enum SpecificError {
    #[error("invalid XML prolog: '{0}'")]
    InvalidProlog(String),
    #[error("XML prolog has no attributes")]
    EmptyProlog,
    #[error("XML prolog is not closed with '?>'")]
    UnclosedProlog,
    #[error("unknown XML prolog attribute: '{0}'")]
    UnknownPrologAttribute(String),
    #[error("unknown XML version: '{0}'")]
    UnsupportedVersion(String),
    #[error("unknown XML encoding: '{0}'")]
    UnsupportedEncoding(String),
    #[error("found duplicate key in prolog: '{0}'")]
    DuplicatePrologAttribute(String),
    #[error("prolog must come first in the document")]
    PrologNotFirst,
    #[error("only one prolog in document allowed")]
    MultipleProlog,

    #[error("invalid XML comment: '{0}'")]
    MalformedComment(String),
    #[error("double dash in XML comment: '{0}'")]
    DoubleDashInComment(String),

    #[error("invalid tag name: '{0}'")]
    InvalidTagName(String),
    #[error("invalid namespace: '{0}'")]
    InvalidNamespace(String),
    #[error("invalid namespace name near: '{0}'")]
    RepeatedNamespace(String),
    #[error("unexpected '{marker}' before '>' in tag '{element}'")]
    MisplacedMarker { element: String, marker: char },
    #[error("expected '>' after '{marker}' but found '{found}'")]
    ExpectedTagEnd { marker: char, found: char },
    #[error("invalid key: '{0}'")]
    InvalidAttributeKey(String),
    #[error("key '{0}' has no value")]
    MissingAttributeValue(String),
    #[error("value of key '{0}' is not quoted")]
    UnquotedAttributeValue(String),
    #[error("found duplicate key in tag '{element}': '{key}' already exists")]
    DuplicateAttribute { element: String, key: String },

    #[error("invalid tag: '{found}', expected '{expected}'")]
    MismatchedClosingTag { found: String, expected: String },
    #[error("closing tag '{0}' does not match any open element")]
    UnexpectedClosingTag(String),
    #[error("only one root element in document is allowed but found: '{0}'")]
    SecondRoot(String),
    #[error("document has no root element")]
    NoRootElement,
    #[error("element '{0}' is never closed")]
    UnclosedElement(String),
    #[error("value outside of any element: '{0}'")]
    TextOutsideElement(String),
    #[error("element '{name}' starts inside the value of '{parent}'; is '{parent}' missing a closing tag?")]
    ElementInsideText { parent: String, name: String },

    #[error("unencoded symbol in element '{element}': key '{key}' in value '{value}'")]
    UnescapedAttributeValue { element: String, key: String, value: String },
    #[error("unencoded character in value '{text}' in element '{element}'")]
    UnescapedText { element: String, text: String },

    #[error("empty file")]
    EmptyFile,
    #[error("XML comment not completed")]
    UnterminatedComment,
    #[error("unexpected end of file in {0}")]
    UnexpectedEof(&'static str),
    #[error("could not read input: {0}")]
    Io(#[from] io::Error),
}

impl SpecificError {
    pub fn category(&self) -> ErrorCategory {
        use self::SpecificError::*;

        match *self {
            UnescapedAttributeValue { .. } | UnescapedText { .. } => ErrorCategory::Encoding,
            EmptyFile | UnterminatedComment | UnexpectedEof(..) | Io(..) => ErrorCategory::Io,
            _ => ErrorCategory::Structural,
        }
    }
}

/// The first fault found in a document, and where it was found.
#[derive(Debug, thiserror::Error)]
#[error("{location}: {error}")]
pub struct Error {
    location: Location,
    #[source]
    error: SpecificError,
}

impl Error {
    pub fn new(location: Location, error: SpecificError) -> Error {
        Error { location, error }
    }

    pub fn location(&self) -> Location {
        self.location
    }

    pub fn specific(&self) -> &SpecificError {
        &self.error
    }

    pub fn into_specific(self) -> SpecificError {
        self.error
    }

    pub fn category(&self) -> ErrorCategory {
        self.error.category()
    }
}
