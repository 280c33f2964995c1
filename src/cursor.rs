//! A forward-only byte cursor with a small lookahead window.
//!
//! The readers never need to look further ahead than the five bytes of
//! `<?xml`, so the window is bounded and nothing is ever un-read.

use std::collections::VecDeque;
use std::fmt;
use std::io::{self, BufReader, Read};

const LOOKAHEAD: usize = 5;

/// A position in the input, reported alongside every error.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Location {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Location {
    fn start() -> Location {
        Location { offset: 0, line: 1, column: 1 }
    }

    fn advance(&mut self, byte: u8) {
        self.offset += 1;
        if byte == b'\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

pub struct Cursor<R> {
    bytes: io::Bytes<BufReader<R>>,
    window: VecDeque<u8>,
    exhausted: bool,
    location: Location,
}

impl<R> Cursor<R>
    where R: Read
{
    pub fn new(input: R) -> Cursor<R> {
        Cursor {
            bytes: BufReader::new(input).bytes(),
            window: VecDeque::with_capacity(LOOKAHEAD),
            exhausted: false,
            location: Location::start(),
        }
    }

    /// The location of the next unread byte.
    pub fn location(&self) -> Location {
        self.location
    }

    fn fill(&mut self, wanted: usize) -> io::Result<()> {
        debug_assert!(wanted <= LOOKAHEAD, "lookahead of {} bytes requested", wanted);

        while self.window.len() < wanted && !self.exhausted {
            match self.bytes.next() {
                Some(byte) => self.window.push_back(byte?),
                None => self.exhausted = true,
            }
        }
        Ok(())
    }

    /// Looks at the byte `n` positions ahead without consuming anything.
    pub fn peek_nth(&mut self, n: usize) -> io::Result<Option<u8>> {
        self.fill(n + 1)?;
        Ok(self.window.get(n).cloned())
    }

    pub fn peek(&mut self) -> io::Result<Option<u8>> {
        self.peek_nth(0)
    }

    pub fn next_byte(&mut self) -> io::Result<Option<u8>> {
        self.fill(1)?;
        let byte = self.window.pop_front();
        if let Some(b) = byte {
            self.location.advance(b);
        }
        Ok(byte)
    }

    /// Consumes `literal` if the input starts with it, leaving the
    /// cursor untouched otherwise.
    pub fn consume_literal(&mut self, literal: &[u8]) -> io::Result<bool> {
        for (i, &expected) in literal.iter().enumerate() {
            if self.peek_nth(i)? != Some(expected) {
                return Ok(false);
            }
        }
        for _ in literal {
            self.next_byte()?;
        }
        Ok(true)
    }
}
