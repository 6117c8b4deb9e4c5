//! Process-wide writer to standard output.

use std::fmt::{self, Display};
use std::sync::{Mutex, MutexGuard};

use lazy_static::lazy_static;

use crate::{Out, Result};

lazy_static! {
    static ref STDOUT: Mutex<Out> = Mutex::new(Out::stdout());
}

fn writer() -> MutexGuard<'static, Out> {
    match STDOUT.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

pub fn println<T: Display>(x: T) -> Result<()> {
    writer().println(x)
}

pub fn newline() -> Result<()> {
    writer().newline()
}

pub fn print<T: Display>(x: T) -> Result<()> {
    writer().print(x)
}

pub fn flush() -> Result<()> {
    writer().flush()
}

pub fn printf(args: fmt::Arguments<'_>) -> Result<()> {
    writer().printf(args)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_writer_stays_open() {
        print("stdout test: ").unwrap();
        printf(format_args!("{}-{}", 1, 2)).unwrap();
        newline().unwrap();
        println(0.5).unwrap();
        flush().unwrap();
    }
}
