//! Process-wide registry of resources packaged with the program.
//!
//! A [`crate::Source::Name`] is looked up here after the filesystem and before
//! the network. Programs register their assets once, usually at startup:
//!
//! ```
//! stdinout::resources::register("words.txt", b"alpha beta gamma");
//! let mut input = stdinout::In::open("words.txt").unwrap();
//! assert_eq!(input.read_string().unwrap(), "alpha");
//! ```

use std::collections::HashMap;
use std::sync::RwLock;

use lazy_static::lazy_static;

lazy_static! {
    static ref RESOURCES: RwLock<HashMap<String, &'static [u8]>> =
        RwLock::new(HashMap::new());
}

/// Register `bytes` under `name`, replacing a previous registration.
pub fn register(name: impl Into<String>, bytes: &'static [u8]) {
    let name = name.into();
    log::debug!("registering resource {} ({} bytes)", name, bytes.len());
    let mut resources = match RESOURCES.write() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    resources.insert(name, bytes);
}

/// Remove the resource registered under `name`, if any.
pub fn unregister(name: &str) -> bool {
    let mut resources = match RESOURCES.write() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    resources.remove(name).is_some()
}

pub fn lookup(name: &str) -> Option<&'static [u8]> {
    let resources = match RESOURCES.read() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    resources.get(name).copied()
}
