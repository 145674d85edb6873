/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */
use clap::{Parser, Subcommand, ValueEnum};
use osdecl_core::{Catalog, ColorChoice};
use std::io::IsTerminal;
use std::process::exit;
use utils::dlog;

#[derive(Parser)]
#[command(name = "osdecl", version, about = "Typed declarations of the host os module")]
struct Args {
    /// When to color diagnostics
    #[arg(long, value_enum, default_value_t = Color::Auto, global = true)]
    color: Color,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the declaration of every binding
    Decl,
    /// Print the declaration of one binding
    Sig { name: String },
    /// Type-check a call expression and print its type
    Check { expr: String },
    /// Type-check a call expression, perform it and print the result
    Call { expr: String },
    /// Print the OS family name
    Name,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Color {
    Auto,
    Always,
    Never,
}

impl Color {
    fn enabled(self) -> bool {
        match self {
            Color::Auto => std::io::stdout().is_terminal(),
            Color::Always => true,
            Color::Never => false,
        }
    }

    // `Auto` is settled here; termcolor's own auto mode ignores redirection
    fn choice(self) -> ColorChoice {
        if self.enabled() {
            ColorChoice::Always
        } else {
            ColorChoice::Never
        }
    }
}

fn paint(color: Color, code: &'static str) -> &'static str {
    if color.enabled() { code } else { "" }
}

fn fail(color: Color, msg: impl std::fmt::Display) -> ! {
    let red = paint(color, "\x1b[38;2;230;100;100m");
    let bold = paint(color, "\x1b[1m");
    let reset = paint(color, "\x1b[0m");
    eprintln!("{red}{bold}error:{reset} {msg}");
    exit(1);
}

fn main() {
    let args = Args::parse();
    let color = args.color;

    let catalog = match Catalog::os() {
        Ok(catalog) => catalog,
        Err(err) => fail(color, err),
    };
    dlog!("loaded catalog `{}` with {} bindings", catalog.module_name(), catalog.bindings().len());

    match args.command {
        Command::Decl => print!("{}", catalog.declarations()),
        Command::Sig { name } => {
            if name == "name" {
                println!("name: {}", osdecl_core::Type::String);
                return;
            }
            match catalog.lookup(&name) {
                Ok(binding) => println!("{}", binding.declaration()),
                Err(err) => fail(color, err),
            }
        }
        Command::Check { expr } => match osdecl_core::check_str(&catalog, &expr) {
            Ok(checked) => println!("{}", checked.ty()),
            Err(err) => {
                err.emit(color.choice());
                exit(1);
            }
        },
        Command::Call { expr } => match osdecl_core::call_str(&catalog, &expr) {
            Ok((value, ty)) => {
                dlog!("{expr} : {ty}");
                println!("{value}");
            }
            Err(err) => {
                err.emit(color.choice());
                exit(1);
            }
        },
        Command::Name => println!("{}", osdecl_core::NAME),
    }
}
