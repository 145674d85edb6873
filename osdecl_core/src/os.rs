/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! Typed client functions for the host `os` module.
//!
//! Each function is a single call into the operating system. Failures are the
//! operating system's own [`std::io::Error`], returned unchanged.

mod env;
mod fs;
mod random;

pub use crate::binding::NAME;
pub use env::{EnvVar, getenv, putenv};
pub use fs::{chdir, chmod, getcwd, listdir, mkdir, remove, removedirs, rename, rmdir};
pub use random::{getrandom, urandom};
