/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! Typed declarations of the host `os` module, and the machinery to check and
//! perform calls against them.
//!
//! The [`os`] module holds the typed functions. [`catalog::Catalog`] describes
//! them as name/signature pairs; [`check_str`] and [`call_str`] validate and run
//! call expressions such as `os.getenv("HOME", "")` against that catalog.

use std::fmt::{self, Display};

pub mod ast;
pub mod binding;
pub mod catalog;
pub mod host;
pub mod os;
pub mod parse;
pub mod statics;
pub mod types;
pub mod value;

pub use binding::{NAME, OsBinding};
pub use catalog::{Catalog, CatalogError};
pub use host::RuntimeError;
pub use statics::{Checked, CheckedCall};
pub use types::Type;
pub use value::Value;

pub use codespan_reporting::term::termcolor::ColorChoice;

/// Parses and type-checks `source` against `catalog`.
pub fn check_str(catalog: &Catalog, source: &str) -> Result<Checked, ErrorSummary> {
    let call = parse::parse_call(source).map_err(|errors| ErrorSummary::statics(source, errors))?;
    statics::check_call(catalog, &call).map_err(|errors| ErrorSummary::statics(source, errors))
}

/// Parses, type-checks and performs `source`. Returns the value together with its static type.
pub fn call_str(catalog: &Catalog, source: &str) -> Result<(Value, Type), ErrorSummary> {
    let checked = check_str(catalog, source)?;
    let value = host::eval(&checked).map_err(ErrorSummary::runtime)?;
    Ok((value, checked.ty()))
}

#[derive(Debug)]
pub struct ErrorSummary {
    msg: String,
    more: Option<(String, Vec<statics::Error>)>,
    runtime: Option<RuntimeError>,
}

use std::io::IsTerminal;

// termcolor's `Auto` only consults TERM and NO_COLOR; settle it against stderr here
fn resolve(color: ColorChoice) -> ColorChoice {
    match color {
        ColorChoice::Auto if std::io::stderr().is_terminal() => ColorChoice::Always,
        ColorChoice::Auto => ColorChoice::Never,
        other => other,
    }
}

impl ErrorSummary {
    fn statics(source: &str, errors: Vec<statics::Error>) -> Self {
        ErrorSummary {
            msg: String::new(),
            more: Some((source.to_string(), errors)),
            runtime: None,
        }
    }

    fn runtime(err: RuntimeError) -> Self {
        ErrorSummary {
            msg: err.to_string(),
            more: None,
            runtime: Some(err),
        }
    }

    /// The static errors, if checking failed.
    pub fn static_errors(&self) -> &[statics::Error] {
        match &self.more {
            Some((_, errors)) => errors,
            None => &[],
        }
    }

    /// The runtime error, if the call reached the operating system and failed there.
    pub fn runtime_error(&self) -> Option<&RuntimeError> {
        self.runtime.as_ref()
    }

    /// Writes the error to stderr. `ColorChoice::Auto` colours only when stderr is a terminal.
    pub fn emit(&self, color: ColorChoice) {
        let color = resolve(color);
        if !self.msg.is_empty() {
            let (red, bold, reset) = match color {
                ColorChoice::Never => ("", "", ""),
                _ => ("\x1B[1;31m", "\x1b[1m", "\x1b[0m"),
            };
            eprintln!("{red}{bold}error:{reset} {}", self.msg);
        }
        if let Some((source, errors)) = &self.more {
            for error in errors {
                error.emit(source, color);
            }
        }
    }

    pub fn to_string_ansi(&self) -> String {
        let mut s = String::new();
        s.push_str(&self.msg);
        if let Some((source, errors)) = &self.more {
            for error in errors {
                s.push_str(&error.to_string(source, true));
            }
        }
        s
    }
}

impl Display for ErrorSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.msg)?;
        if let Some((source, errors)) = &self.more {
            for error in errors {
                write!(f, "{}", error.to_string(source, false))?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ErrorSummary {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.runtime
            .as_ref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}
