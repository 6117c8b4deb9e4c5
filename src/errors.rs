use std::str::Utf8Error;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, StdioError>;

#[derive(Error, Debug)]
pub enum StdioError {
    #[error("Bad source: {0}")]
    BadSource(String),
    #[error("End of input: {0}")]
    EndOfInput(String),
    #[error("Parsing error: expected {kind}, found {token:?}")]
    Parse { kind: &'static str, token: String },
    #[error("Parsing error: expected {kind} at index {index}, found {token:?}")]
    BulkParse {
        kind: &'static str,
        index: usize,
        token: String,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("IO error: stream is closed")]
    Closed,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StdioError {
    pub fn parse(kind: &'static str, token: impl Into<String>) -> Self {
        Self::Parse {
            kind,
            token: token.into(),
        }
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. } | Self::BulkParse { .. })
    }

    pub fn is_end_of_input(&self) -> bool {
        matches!(self, Self::EndOfInput(_))
    }

    pub fn is_bad_source(&self) -> bool {
        matches!(self, Self::BadSource(_))
    }

    /// Both stream failures and reads on a closed stream.
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io(_) | Self::Closed)
    }
}

impl From<Utf8Error> for StdioError {
    fn from(e: Utf8Error) -> Self {
        Self::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}

impl From<reqwest::Error> for StdioError {
    fn from(e: reqwest::Error) -> Self {
        Self::BadSource(e.to_string())
    }
}

impl From<url::ParseError> for StdioError {
    fn from(e: url::ParseError) -> Self {
        Self::BadSource(e.to_string())
    }
}
