/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

// functions used for testing

use osdecl_core::{Catalog, ErrorSummary, Type, Value};
use std::path::Path;

pub fn unwrap_or_panic<T>(result: Result<T, ErrorSummary>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            panic!("{}", e.to_string_ansi());
        }
    }
}

/// Checks and performs `src` against the os catalog.
pub fn call(src: &str) -> (Value, Type) {
    let catalog = Catalog::os().unwrap();
    unwrap_or_panic(osdecl_core::call_str(&catalog, src))
}

/// `path` as a string literal of the call syntax.
pub fn lit(path: &Path) -> String {
    let s = path.to_str().expect("temp paths are utf-8");
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}
