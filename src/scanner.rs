//! Lazy UTF-8 tokenizer over a [`ByteStream`].
//!
//! Bytes are pulled from the stream only as far as the current lookahead
//! needs and decoded into a queue of pending characters. Every primitive
//! takes the [`Delimiter`] it splits by as an argument, so there is no
//! delimiter state to restore between reads: a caller that does not ask for
//! anything else always gets whitespace splitting.

use std::collections::VecDeque;
use std::io::{self, BufRead};

use crate::source::ByteStream;
use crate::{Result, StdioError};

/// How the input is split into tokens for one read.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Delimiter {
    /// Runs of Unicode whitespace separate tokens; leading runs are skipped.
    #[default]
    Whitespace,
    /// Every code point is a token of its own, whitespace included.
    Empty,
    /// Nothing separates anything: the single token is the rest of the input.
    All,
}

const LINE_FEED: char = '\n';
const CARRIAGE_RETURN: char = '\r';

pub fn is_line_terminator(c: char) -> bool {
    matches!(
        c,
        LINE_FEED
            | CARRIAGE_RETURN
            | '\u{000B}'
            | '\u{000C}'
            | '\u{0085}'
            | '\u{2028}'
            | '\u{2029}'
    )
}

pub struct Scanner {
    stream: Option<ByteStream>,
    pending: VecDeque<char>,
    // tail of a UTF-8 sequence split across two refills
    partial: Vec<u8>,
    // set once undecodable bytes are reached; every later refill fails
    fault: Option<String>,
    exhausted: bool,
}

impl Scanner {
    pub fn new(stream: ByteStream) -> Self {
        Self {
            stream: Some(stream),
            pending: VecDeque::new(),
            partial: Vec::new(),
            fault: None,
            exhausted: false,
        }
    }

    pub fn is_open(&self) -> bool {
        self.stream.is_some()
    }

    /// Release the underlying stream. Calling it again does nothing.
    pub fn close(&mut self) {
        if self.stream.take().is_some() {
            log::trace!(
                "scanner closed with {} chars unread",
                self.pending.len()
            );
        }
        self.pending.clear();
        self.partial.clear();
        self.fault = None;
        self.exhausted = true;
    }

    /// Decode one more chunk of the stream. Returns `false` at end of input.
    ///
    /// Text in front of an invalid byte is still decoded; the error is
    /// reported once everything before it has been consumed, and again on
    /// every call after that.
    fn refill(&mut self) -> Result<bool> {
        let stream = self.stream.as_mut().ok_or(StdioError::Closed)?;
        if let Some(fault) = &self.fault {
            return Err(invalid_utf8(fault));
        }
        if self.exhausted {
            return Ok(false);
        }

        let consumed = {
            let chunk = stream.fill_buf()?;
            self.partial.extend_from_slice(chunk);
            chunk.len()
        };
        stream.consume(consumed);

        if consumed == 0 {
            self.exhausted = true;
            if !self.partial.is_empty() {
                let fault = "stream ends inside a UTF-8 sequence".to_owned();
                let err = invalid_utf8(&fault);
                self.fault = Some(fault);
                return Err(err);
            }
            return Ok(false);
        }

        let valid = match std::str::from_utf8(&self.partial) {
            Ok(text) => text.len(),
            Err(e) => {
                if e.error_len().is_some() {
                    self.fault = Some(e.to_string());
                }
                e.valid_up_to()
            }
        };
        let text = std::str::from_utf8(&self.partial[..valid])?;
        self.pending.extend(text.chars());
        self.partial = self.partial.split_off(valid);
        log::trace!(
            "decoded {} bytes, {} chars pending",
            valid,
            self.pending.len()
        );
        Ok(true)
    }

    /// Make sure at least `count` chars are decoded, unless the input ends
    /// first. Returns whether they are available.
    fn fill_to(&mut self, count: usize) -> Result<bool> {
        while self.pending.len() < count {
            if !self.refill()? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn char_at(&mut self, index: usize) -> Result<Option<char>> {
        if self.fill_to(index + 1)? {
            Ok(self.pending.get(index).copied())
        } else {
            Ok(None)
        }
    }

    /// Locate the next token without consuming anything. The token spans
    /// `start..end` of the pending queue.
    fn locate(
        &mut self,
        delimiter: Delimiter,
    ) -> Result<Option<(usize, usize)>> {
        match delimiter {
            Delimiter::Whitespace => {
                let mut start = 0;
                loop {
                    match self.char_at(start)? {
                        None => return Ok(None),
                        Some(c) if c.is_whitespace() => start += 1,
                        Some(_) => break,
                    }
                }
                let mut end = start + 1;
                while let Some(c) = self.char_at(end)? {
                    if c.is_whitespace() {
                        break;
                    }
                    end += 1;
                }
                Ok(Some((start, end)))
            }
            Delimiter::Empty => match self.char_at(0)? {
                Some(_) => Ok(Some((0, 1))),
                None => Ok(None),
            },
            Delimiter::All => {
                while self.refill()? {}
                if self.pending.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some((0, self.pending.len())))
                }
            }
        }
    }

    /// The next token under `delimiter`, left unread.
    pub fn peek(&mut self, delimiter: Delimiter) -> Result<Option<String>> {
        Ok(self
            .locate(delimiter)?
            .map(|(start, end)| self.pending.range(start..end).collect()))
    }

    /// The next token under `delimiter`. Consumes the token and everything
    /// before it, but not the delimiter that follows it.
    pub fn next(&mut self, delimiter: Delimiter) -> Result<Option<String>> {
        Ok(self.locate(delimiter)?.map(|(start, end)| {
            self.pending
                .drain(..end)
                .skip(start)
                .collect()
        }))
    }

    pub fn has_next_char(&mut self) -> Result<bool> {
        Ok(self.char_at(0)?.is_some())
    }

    /// True when only whitespace, or nothing, is left.
    pub fn is_empty(&mut self) -> Result<bool> {
        Ok(self.locate(Delimiter::Whitespace)?.is_none())
    }

    /// The rest of the current line, without its terminator. `\r\n` counts as
    /// one terminator. `None` only when no character at all is left.
    pub fn next_line(&mut self) -> Result<Option<String>> {
        let mut end = 0;
        let terminator = loop {
            match self.char_at(end)? {
                None if end == 0 => return Ok(None),
                None => break 0,
                Some(CARRIAGE_RETURN) => {
                    break match self.char_at(end + 1)? {
                        Some(LINE_FEED) => 2,
                        _ => 1,
                    };
                }
                Some(c) if is_line_terminator(c) => break 1,
                Some(_) => end += 1,
            }
        };
        let line: String = self.pending.drain(..end).collect();
        for _ in 0..terminator {
            self.pending.pop_front();
        }
        Ok(Some(line))
    }
}

impl From<ByteStream> for Scanner {
    fn from(stream: ByteStream) -> Self {
        Scanner::new(stream)
    }
}

fn invalid_utf8(message: &str) -> StdioError {
    StdioError::Io(io::Error::new(
        io::ErrorKind::InvalidData,
        message.to_owned(),
    ))
}
