/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use std::env;
use std::io;

/// Result of [`getenv`]: the variable's value, or the caller's default untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvVar<D> {
    Set(String),
    Default(D),
}

impl<D> EnvVar<D> {
    pub fn is_set(&self) -> bool {
        matches!(self, EnvVar::Set(_))
    }

    pub fn into_result(self) -> Result<String, D> {
        match self {
            EnvVar::Set(s) => Ok(s),
            EnvVar::Default(d) => Err(d),
        }
    }
}

impl EnvVar<String> {
    pub fn into_string(self) -> String {
        match self {
            EnvVar::Set(s) | EnvVar::Default(s) => s,
        }
    }
}

/// Looks up `key` in the process environment.
///
/// Values that are not valid UTF-8 are converted lossily.
pub fn getenv<D>(key: &str, default: D) -> EnvVar<D> {
    if !valid_key(key) {
        return EnvVar::Default(default);
    }
    match env::var_os(key) {
        Some(value) => EnvVar::Set(value.to_string_lossy().into_owned()),
        None => EnvVar::Default(default),
    }
}

/// Sets `key` to `value` for this process and the children it spawns.
///
/// Other threads must not read or write the environment concurrently.
pub fn putenv(key: &str, value: &str) -> io::Result<()> {
    if !valid_key(key) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("illegal environment variable name {key:?}"),
        ));
    }
    if value.contains('\0') {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "environment variable value contains a NUL byte",
        ));
    }
    // SAFETY: the key and value were validated above; concurrent access to the
    // environment is excluded by this function's contract.
    unsafe { env::set_var(key, value) };
    Ok(())
}

fn valid_key(key: &str) -> bool {
    !key.is_empty() && !key.contains('=') && !key.contains('\0')
}
