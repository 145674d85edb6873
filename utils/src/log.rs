/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

/// Whether `dlog!` output is enabled: debug build *and* `DEBUG_LOG` set in the environment.
pub fn enabled() -> bool {
    cfg!(debug_assertions) && ::std::env::var_os("DEBUG_LOG").is_some()
}

/// Debug log line on stderr, prefixed with the calling module.
///
/// stdout is left alone so that command output stays parseable.
#[macro_export]
macro_rules! dlog {
    ($($arg:tt)*) => {{
        if $crate::log::enabled() {
            eprintln!("[{}] {}", module_path!(), format_args!($($arg)*))
        }
    }};
}
