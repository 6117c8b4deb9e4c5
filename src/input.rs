use std::fs::File;
use std::io::{BufReader, Cursor, Read};
use std::net::TcpStream;
use std::path::Path;

use url::Url;

use crate::config::SourceOptions;
use crate::locale::{parse_boolean, parse_float, parse_integer};
use crate::scanner::{Delimiter, Scanner};
use crate::source::{Source, SCANNER, STANDARD_INPUT, TEXT};
use crate::{Result, StdioError};

/// Typed, whitespace-tokenized reader over any [`Source`].
///
/// Scalar reads take the next whitespace-separated token and parse it. A
/// token that does not parse is reported as [`StdioError::Parse`] and left
/// unread, so the caller can still take it with [`In::read_string`].
pub struct In {
    scanner: Scanner,
    label: String,
}

impl In {
    pub fn new(source: impl Into<Source>) -> Result<Self> {
        Self::with_options(source, &SourceOptions::default())
    }

    pub fn with_options(
        source: impl Into<Source>,
        options: &SourceOptions,
    ) -> Result<Self> {
        let source = source.into();
        let label = source.describe();
        let scanner = match source {
            Source::Scanner(scanner) => scanner,
            source => Scanner::new(source.resolve(options)?),
        };
        log::debug!("reading from {}", label);
        Ok(Self { scanner, label })
    }

    /// A reader over standard input, independent from [`crate::stdin`].
    pub fn stdin() -> Self {
        let stream = Box::new(BufReader::new(std::io::stdin()));
        Self {
            scanner: Scanner::new(stream),
            label: STANDARD_INPUT.to_owned(),
        }
    }

    /// Resolve `name` as a file, a registered resource or a URL.
    ///
    /// An `http(s)` URL is fetched on a runtime of its own, so this must not
    /// be called from inside an async task; tokio panics if it is.
    pub fn open(name: &str) -> Result<Self> {
        Self::new(Source::Name(name.to_owned()))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::new(Source::File(path.as_ref().to_path_buf()))
    }

    pub fn from_file(file: File) -> Result<Self> {
        Self::new(Source::Handle(file))
    }

    pub fn from_socket(socket: TcpStream) -> Result<Self> {
        Self::new(Source::Socket(socket))
    }

    /// Read the body behind `url`. For `http(s)` this blocks on a runtime of
    /// its own and panics when called from inside an async task.
    pub fn from_url(url: Url) -> Result<Self> {
        Self::new(Source::Url(url))
    }

    pub fn from_text(text: impl Into<String>) -> Self {
        let stream = Box::new(Cursor::new(text.into().into_bytes()));
        Self {
            scanner: Scanner::new(stream),
            label: TEXT.to_owned(),
        }
    }

    pub fn from_reader(reader: impl Read + Send + 'static) -> Result<Self> {
        Self::new(Source::Reader(Box::new(reader)))
    }

    pub fn from_scanner(scanner: Scanner) -> Self {
        Self {
            scanner,
            label: SCANNER.to_owned(),
        }
    }

    /// Give up the reader, keeping whatever it has not consumed yet.
    pub fn into_scanner(self) -> Scanner {
        self.scanner
    }

    /// Where this reader reads from, as used in error messages.
    pub fn name(&self) -> &str {
        &self.label
    }

    /// True until the reader is closed.
    pub fn exists(&self) -> bool {
        self.scanner.is_open()
    }

    /// Release the underlying stream. Reads afterwards fail with
    /// [`StdioError::Closed`].
    pub fn close(&mut self) {
        log::debug!("closing {}", self.label);
        self.scanner.close();
    }

    fn end_of_input(&self, what: &str) -> StdioError {
        StdioError::EndOfInput(format!(
            "attempts to read {} from {}, but no more tokens are available",
            what, self.label
        ))
    }

    fn checked<T>(&self, result: Result<T>) -> Result<T> {
        if let Err(StdioError::Closed) = result {
            log::warn!("read attempted on closed {}", self.label);
        }
        result
    }

    // ---------------------------------------------------------------- queries

    /// True when only whitespace, or nothing, is left.
    pub fn is_empty(&mut self) -> Result<bool> {
        let result = self.scanner.is_empty();
        self.checked(result)
    }

    /// True when at least one character is left, even if it is a bare line
    /// terminator or other whitespace.
    pub fn has_next_line(&mut self) -> Result<bool> {
        let result = self.scanner.has_next_char();
        self.checked(result)
    }

    pub fn has_next_char(&mut self) -> Result<bool> {
        let result = self.scanner.has_next_char();
        self.checked(result)
    }

    fn has_next_parsed<T>(
        &mut self,
        parse: impl Fn(&str) -> Result<T>,
    ) -> Result<bool> {
        let token = self.scanner.peek(Delimiter::Whitespace);
        match self.checked(token)? {
            Some(token) => Ok(parse(&token).is_ok()),
            None => Ok(false),
        }
    }

    pub fn has_next_int(&mut self) -> Result<bool> {
        self.has_next_parsed(|t| parse_integer::<i32>(t, "int"))
    }

    pub fn has_next_long(&mut self) -> Result<bool> {
        self.has_next_parsed(|t| parse_integer::<i64>(t, "long"))
    }

    pub fn has_next_short(&mut self) -> Result<bool> {
        self.has_next_parsed(|t| parse_integer::<i16>(t, "short"))
    }

    pub fn has_next_byte(&mut self) -> Result<bool> {
        self.has_next_parsed(|t| parse_integer::<i8>(t, "byte"))
    }

    pub fn has_next_float(&mut self) -> Result<bool> {
        self.has_next_parsed(|t| parse_float::<f32>(t, "float"))
    }

    pub fn has_next_double(&mut self) -> Result<bool> {
        self.has_next_parsed(|t| parse_float::<f64>(t, "double"))
    }

    pub fn has_next_boolean(&mut self) -> Result<bool> {
        self.has_next_parsed(parse_boolean)
    }

    // ----------------------------------------------------------- scalar reads

    pub fn read_line(&mut self) -> Result<String> {
        let line = self.scanner.next_line();
        self.checked(line)?
            .ok_or_else(|| self.end_of_input("a line"))
    }

    /// The next code point, whitespace included.
    pub fn read_char(&mut self) -> Result<char> {
        let token = self.scanner.next(Delimiter::Empty);
        self.checked(token)?
            .and_then(|token| token.chars().next())
            .ok_or_else(|| self.end_of_input("a char"))
    }

    /// Everything that is left, leading whitespace included. Fails with
    /// [`StdioError::EndOfInput`] when only whitespace is left.
    pub fn read_all(&mut self) -> Result<String> {
        if self.is_empty()? {
            return Err(self.end_of_input("the remaining input"));
        }
        let token = self.scanner.next(Delimiter::All);
        self.checked(token)?
            .ok_or_else(|| self.end_of_input("the remaining input"))
    }

    pub fn read_string(&mut self) -> Result<String> {
        let token = self.scanner.next(Delimiter::Whitespace);
        self.checked(token)?
            .ok_or_else(|| self.end_of_input("a string"))
    }

    /// Parse the next token, consuming it only when `parse` accepts it.
    fn read_parsed<T>(
        &mut self,
        what: &str,
        parse: impl Fn(&str) -> Result<T>,
    ) -> Result<T> {
        let token = self.scanner.peek(Delimiter::Whitespace);
        let token = self
            .checked(token)?
            .ok_or_else(|| self.end_of_input(what))?;
        let value = parse(&token)?;
        self.scanner.next(Delimiter::Whitespace)?;
        Ok(value)
    }

    pub fn read_int(&mut self) -> Result<i32> {
        self.read_parsed("an int", |t| parse_integer(t, "int"))
    }

    pub fn read_long(&mut self) -> Result<i64> {
        self.read_parsed("a long", |t| parse_integer(t, "long"))
    }

    pub fn read_short(&mut self) -> Result<i16> {
        self.read_parsed("a short", |t| parse_integer(t, "short"))
    }

    pub fn read_byte(&mut self) -> Result<i8> {
        self.read_parsed("a byte", |t| parse_integer(t, "byte"))
    }

    pub fn read_float(&mut self) -> Result<f32> {
        self.read_parsed("a float", |t| parse_float(t, "float"))
    }

    pub fn read_double(&mut self) -> Result<f64> {
        self.read_parsed("a double", |t| parse_float(t, "double"))
    }

    /// `true`/`false` in any case, or `1`/`0`.
    pub fn read_boolean(&mut self) -> Result<bool> {
        self.read_parsed("a boolean", parse_boolean)
    }

    // ------------------------------------------------------------- bulk reads

    /// Every remaining whitespace-separated token.
    pub fn read_all_strings(&mut self) -> Result<Vec<String>> {
        let rest = self.scanner.next(Delimiter::All);
        Ok(match self.checked(rest)? {
            Some(rest) => rest.split_whitespace().map(str::to_owned).collect(),
            None => Vec::new(),
        })
    }

    /// Every remaining line, without terminators.
    pub fn read_all_lines(&mut self) -> Result<Vec<String>> {
        let mut lines = Vec::new();
        while self.has_next_line()? {
            lines.push(self.read_line()?);
        }
        Ok(lines)
    }

    /// Read every remaining token and parse all of them, or fail on the
    /// first one that does not parse. The input is consumed either way.
    fn read_all_parsed<T>(
        &mut self,
        kind: &'static str,
        parse: impl Fn(&str, &'static str) -> Result<T>,
    ) -> Result<Vec<T>> {
        self.read_all_strings()?
            .into_iter()
            .enumerate()
            .map(|(index, token)| {
                parse(&token, kind)
                    .map_err(|_| StdioError::BulkParse { kind, index, token })
            })
            .collect()
    }

    pub fn read_all_ints(&mut self) -> Result<Vec<i32>> {
        self.read_all_parsed("int", parse_integer)
    }

    pub fn read_all_longs(&mut self) -> Result<Vec<i64>> {
        self.read_all_parsed("long", parse_integer)
    }

    pub fn read_all_shorts(&mut self) -> Result<Vec<i16>> {
        self.read_all_parsed("short", parse_integer)
    }

    pub fn read_all_bytes(&mut self) -> Result<Vec<i8>> {
        self.read_all_parsed("byte", parse_integer)
    }

    pub fn read_all_floats(&mut self) -> Result<Vec<f32>> {
        self.read_all_parsed("float", parse_float)
    }

    pub fn read_all_doubles(&mut self) -> Result<Vec<f64>> {
        self.read_all_parsed("double", parse_float)
    }

    // ------------------------------------------------------------ shorthands

    pub fn read_all_strings_from(name: &str) -> Result<Vec<String>> {
        Self::open(name)?.read_all_strings()
    }

    pub fn read_all_ints_from(name: &str) -> Result<Vec<i32>> {
        Self::open(name)?.read_all_ints()
    }

    pub fn read_all_doubles_from(name: &str) -> Result<Vec<f64>> {
        Self::open(name)?.read_all_doubles()
    }
}
