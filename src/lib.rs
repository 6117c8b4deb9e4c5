//! Whitespace-tokenized typed input and convenience output.
//!
//! [`In`] reads tokens, lines, characters and numbers from standard input,
//! files, sockets, URLs, registered resources or in-memory text. [`Out`]
//! writes formatted values back out. The [`stdin`] and [`stdout`] modules
//! offer the same over process-wide instances.
//!
//! ```
//! use stdinout::In;
//!
//! let mut input = In::from_text("  123  hello  3.5\n");
//! assert_eq!(input.read_int().unwrap(), 123);
//! assert_eq!(input.read_string().unwrap(), "hello");
//! assert_eq!(input.read_double().unwrap(), 3.5);
//! assert!(input.is_empty().unwrap());
//! ```

pub mod config;
pub mod errors;
pub mod input;
pub mod locale;
pub mod output;
pub mod resources;
pub mod scanner;
pub mod source;
pub mod stdin;
pub mod stdout;

pub use config::SourceOptions;
pub use errors::{Result, StdioError};
pub use input::In;
pub use locale::Locale;
pub use output::Out;
pub use scanner::{Delimiter, Scanner};
pub use source::{ByteStream, Source};

#[cfg(test)]
static INIT: std::sync::Once = std::sync::Once::new();

#[cfg(test)]
pub(crate) fn initialize() {
    INIT.call_once(|| {
        let _ = env_logger::builder()
            .is_test(true)
            .try_init();
        log::info!("Initializing stdinout tests");
    });
}
