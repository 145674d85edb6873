/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use super::Error;
use crate::ast::Span;
use codespan_reporting::diagnostic::{Diagnostic, Label};
use codespan_reporting::files::SimpleFile;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{Buffer, ColorChoice, StandardStream};

pub(crate) const SOURCE_NAME: &str = "<call>";

impl Error {
    pub fn span(&self) -> Span {
        match self {
            Error::UnrecognizedToken(span)
            | Error::UnterminatedString(span)
            | Error::InvalidEscape(span)
            | Error::InvalidInteger(span)
            | Error::UnexpectedToken { span, .. }
            | Error::UnknownModule { span, .. }
            | Error::UnknownBinding { span, .. }
            | Error::NotCallable { span, .. }
            | Error::NotCalled { span, .. }
            | Error::TooManyArguments { span, .. }
            | Error::PositionalAfterKeyword { span }
            | Error::UnknownKeyword { span, .. }
            | Error::MissingArgument { span, .. }
            | Error::ArgumentType { span, .. } => *span,
            Error::DuplicateArgument { second, .. } => *second,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Error::UnrecognizedToken(_) => "Unrecognized token".to_string(),
            Error::UnterminatedString(_) => "Unterminated string literal".to_string(),
            Error::InvalidEscape(_) => "Invalid escape sequence".to_string(),
            Error::InvalidInteger(_) => "Invalid integer literal".to_string(),
            Error::UnexpectedToken { .. } => "Unexpected token".to_string(),
            Error::UnknownModule { name, .. } => format!("Unknown module `{name}`"),
            Error::UnknownBinding { name, .. } => format!("Could not resolve binding `{name}`"),
            Error::NotCallable { name, .. } => format!("`{name}` is a constant, not a function"),
            Error::NotCalled { binding, .. } => format!("`{binding}` must be called"),
            Error::TooManyArguments { binding, max, .. } => {
                format!("`{binding}` takes at most {max} argument(s)")
            }
            Error::PositionalAfterKeyword { .. } => {
                "Positional argument follows keyword argument".to_string()
            }
            Error::UnknownKeyword {
                binding, keyword, ..
            } => format!("`{binding}` has no parameter named `{keyword}`"),
            Error::DuplicateArgument { param, .. } => {
                format!("Argument `{param}` was given more than once")
            }
            Error::MissingArgument { binding, param, .. } => {
                format!("Missing argument `{param}` in call to `{binding}`")
            }
            Error::ArgumentType {
                binding,
                param,
                expected,
                found,
                ..
            } => format!(
                "Argument `{param}` of `{binding}` expects `{expected}` but found `{found}`"
            ),
        }
    }

    fn make_diagnostic(&self) -> Diagnostic<()> {
        let mut labels = vec![];
        let mut notes = vec![];

        match self {
            Error::UnexpectedToken {
                expected, found, ..
            } => {
                labels.push(
                    Label::primary((), self.span().range())
                        .with_message(format!("Found `{found}` when expecting `{expected}`")),
                );
            }
            Error::UnknownModule { expected, .. } => {
                labels.push(Label::primary((), self.span().range()));
                notes.push(format!("the only module available is `{expected}`"));
            }
            Error::UnknownBinding { suggestion, .. } => {
                let label = Label::primary((), self.span().range());
                labels.push(match suggestion {
                    Some(s) => label.with_message(format!("did you mean `{s}`?")),
                    None => label,
                });
            }
            Error::NotCalled { binding, .. } => {
                labels.push(Label::primary((), self.span().range()));
                notes.push(binding.declaration());
            }
            Error::DuplicateArgument { first, second, .. } => {
                labels.push(Label::secondary((), first.range()).with_message("first given here"));
                labels.push(Label::primary((), second.range()).with_message("then given here"));
            }
            Error::TooManyArguments { binding, .. }
            | Error::UnknownKeyword { binding, .. }
            | Error::MissingArgument { binding, .. } => {
                labels.push(Label::primary((), self.span().range()));
                notes.push(binding.declaration());
            }
            Error::ArgumentType {
                binding, found, ..
            } => {
                labels.push(
                    Label::primary((), self.span().range())
                        .with_message(format!("this is `{found}`")),
                );
                notes.push(binding.declaration());
            }
            _ => {
                labels.push(Label::primary((), self.span().range()));
            }
        }

        Diagnostic::error()
            .with_message(self.message())
            .with_labels(labels)
            .with_notes(notes)
    }

    /// Writes the diagnostic for this error, pointing into `source`, to stderr.
    pub fn emit(&self, source: &str, color: ColorChoice) {
        let file = SimpleFile::new(SOURCE_NAME, source);
        let diagnostic = self.make_diagnostic();
        let writer = StandardStream::stderr(color);
        let config = term::Config::default();

        if term::emit_to_write_style(&mut writer.lock(), &config, &file, &diagnostic).is_err() {
            eprintln!("error: {}", self.message());
        }
    }

    pub fn to_string(&self, source: &str, ansi: bool) -> String {
        let file = SimpleFile::new(SOURCE_NAME, source);
        let diagnostic = self.make_diagnostic();
        let mut buffer = if ansi {
            Buffer::ansi()
        } else {
            Buffer::no_color()
        };
        let config = term::Config::default();

        if term::emit_to_write_style(&mut buffer, &config, &file, &diagnostic).is_err() {
            return format!("error: {}\n", self.message());
        }
        String::from_utf8_lossy(buffer.as_slice()).into_owned()
    }
}
