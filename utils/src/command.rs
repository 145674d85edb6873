/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

/// Runs a program and collects its output.
///
/// `command!("prog a b")` splits the string on whitespace.
/// `command!(program; arg, arg, ...)` passes each argument through verbatim,
/// for arguments that contain spaces or quotes.
#[macro_export]
macro_rules! command {
    ($program:expr; $($arg:expr),* $(,)?) => {{
        use std::process::Command;
        let mut cmd = Command::new($program);
        $( cmd.arg($arg); )*
        cmd.output()
    }};
    ($s:expr) => {{
        use std::process::Command;
        let parts: Vec<&str> = $s.split_whitespace().collect();
        let (cmd, args) = parts
            .split_first()
            .expect("command! macro called with an empty string");
        Command::new(cmd).args(args).output()
    }};
}
