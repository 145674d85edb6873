/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

/// [`write!`] into a `String`, without the `Result`.
///
/// Formatting into a `String` never fails.
///
/// ```
/// use utils::swrite;
///
/// let mut s = String::new();
/// swrite!(&mut s, "mkdir{}", "(path: PathLike)");
/// assert_eq!(s, "mkdir(path: PathLike)");
/// ```
#[macro_export]
macro_rules! swrite {
    ($s:expr, $($arg:tt)*) => {{
        let _ = ::std::fmt::Write::write_fmt($s, format_args!($($arg)*));
    }};
}

/// [`writeln!`] into a `String`, without the `Result`.
#[macro_export]
macro_rules! swriteln {
    ($s:expr) => {{
        $crate::swrite!($s, "\n")
    }};
    ($s:expr, $($arg:tt)*) => {{
        $crate::swrite!($s, $($arg)*);
        $crate::swrite!($s, "\n");
    }};
}
