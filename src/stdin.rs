//! Process-wide reader over standard input.
//!
//! Standard input is wrapped once, on first use, and shared by every function
//! of this module. Readers built with [`In::stdin`] are separate from it.

use std::sync::{Mutex, MutexGuard};

use lazy_static::lazy_static;

use crate::{In, Result};

lazy_static! {
    static ref STDIN: Mutex<In> = {
        log::info!("Wrapping standard input");
        Mutex::new(In::stdin())
    };
}

fn reader() -> MutexGuard<'static, In> {
    match STDIN.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

pub fn is_empty() -> Result<bool> {
    reader().is_empty()
}

pub fn has_next_line() -> Result<bool> {
    reader().has_next_line()
}

pub fn has_next_char() -> Result<bool> {
    reader().has_next_char()
}

pub fn has_next_int() -> Result<bool> {
    reader().has_next_int()
}

pub fn has_next_long() -> Result<bool> {
    reader().has_next_long()
}

pub fn has_next_double() -> Result<bool> {
    reader().has_next_double()
}

pub fn read_line() -> Result<String> {
    reader().read_line()
}

pub fn read_char() -> Result<char> {
    reader().read_char()
}

pub fn read_all() -> Result<String> {
    reader().read_all()
}

pub fn read_string() -> Result<String> {
    reader().read_string()
}

pub fn read_int() -> Result<i32> {
    reader().read_int()
}

pub fn read_long() -> Result<i64> {
    reader().read_long()
}

pub fn read_short() -> Result<i16> {
    reader().read_short()
}

pub fn read_byte() -> Result<i8> {
    reader().read_byte()
}

pub fn read_float() -> Result<f32> {
    reader().read_float()
}

pub fn read_double() -> Result<f64> {
    reader().read_double()
}

pub fn read_boolean() -> Result<bool> {
    reader().read_boolean()
}

pub fn read_all_strings() -> Result<Vec<String>> {
    reader().read_all_strings()
}

pub fn read_all_lines() -> Result<Vec<String>> {
    reader().read_all_lines()
}

pub fn read_all_ints() -> Result<Vec<i32>> {
    reader().read_all_ints()
}

pub fn read_all_longs() -> Result<Vec<i64>> {
    reader().read_all_longs()
}

pub fn read_all_doubles() -> Result<Vec<f64>> {
    reader().read_all_doubles()
}
