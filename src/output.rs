use std::fmt::{self, Display};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::net::TcpStream;
use std::path::Path;

use crate::locale::Locale;
use crate::{Result, StdioError};

/// UTF-8 text writer to standard output, a file, a socket or any sink.
///
/// Every write is flushed before it returns.
pub struct Out {
    writer: Option<Box<dyn Write + Send>>,
    label: String,
}

impl Out {
    pub fn stdout() -> Self {
        Self {
            writer: Some(Box::new(io::stdout())),
            label: "standard output".to_owned(),
        }
    }

    /// Create (or truncate) the file `name`.
    pub fn create(name: impl AsRef<Path>) -> Result<Self> {
        let path = name.as_ref();
        let file = File::create(path).map_err(|e| {
            StdioError::BadSource(format!(
                "could not create {}: {}",
                path.display(),
                e
            ))
        })?;
        Ok(Self {
            writer: Some(Box::new(BufWriter::new(file))),
            label: path.display().to_string(),
        })
    }

    pub fn from_socket(socket: TcpStream) -> Self {
        let label = match socket.peer_addr() {
            Ok(addr) => format!("socket {}", addr),
            Err(_) => "socket".to_owned(),
        };
        Self {
            writer: Some(Box::new(BufWriter::new(socket))),
            label,
        }
    }

    pub fn from_writer(writer: impl Write + Send + 'static) -> Self {
        Self {
            writer: Some(Box::new(writer)),
            label: "writer".to_owned(),
        }
    }

    pub fn name(&self) -> &str {
        &self.label
    }

    fn writer(&mut self) -> Result<&mut Box<dyn Write + Send>> {
        match self.writer.as_mut() {
            Some(writer) => Ok(writer),
            None => {
                log::warn!("write attempted on closed {}", self.label);
                Err(StdioError::Closed)
            }
        }
    }

    /// Write `x` followed by a line terminator.
    ///
    /// Values go through [`Display`], so a whole float loses its fraction:
    /// `3.0` is written as `3`. Use [`Out::printf`] with a precision, such
    /// as `{:.1}`, to keep it.
    pub fn println<T: Display>(&mut self, x: T) -> Result<()> {
        let writer = self.writer()?;
        writeln!(writer, "{}", x)?;
        writer.flush()?;
        Ok(())
    }

    /// Write a line terminator only.
    pub fn newline(&mut self) -> Result<()> {
        let writer = self.writer()?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }

    /// Write `x` and flush, without a line terminator.
    pub fn print<T: Display>(&mut self, x: T) -> Result<()> {
        let writer = self.writer()?;
        write!(writer, "{}", x)?;
        writer.flush()?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer()?.flush()?;
        Ok(())
    }

    /// Formatted write, usually through `format_args!`.
    pub fn printf(&mut self, args: fmt::Arguments<'_>) -> Result<()> {
        let writer = self.writer()?;
        writer.write_fmt(args)?;
        writer.flush()?;
        Ok(())
    }

    /// Formatted write in `locale`. The only locale formats numbers with a
    /// `.` decimal point and no grouping, which is what `format_args!`
    /// produces already.
    pub fn printf_locale(
        &mut self,
        locale: Locale,
        args: fmt::Arguments<'_>,
    ) -> Result<()> {
        debug_assert_eq!(locale.decimal_separator(), '.');
        self.printf(args)
    }

    /// Flush and release the destination. Calling it again does nothing.
    pub fn close(&mut self) -> Result<()> {
        match self.writer.take() {
            Some(mut writer) => {
                log::debug!("closing {}", self.label);
                writer.flush()?;
                Ok(())
            }
            None => Ok(()),
        }
    }
}

impl Drop for Out {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            log::error!(
                "Failed to flush {} because of error: {}",
                self.label,
                e
            )
        }
    }
}
