/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use crate::types::Type;
use crate::value::Value;
use heck::ToSnakeCase;
use std::fmt;
use strum::AsRefStr;
use strum::IntoEnumIterator;
use strum::VariantArray;
use strum_macros::EnumIter;

// A binding is a callable of the host `os` module, described by its signature.
// None of them are implemented here: each one delegates to the operating system (see os.rs).
// The order of the variants is the order of the declaration listing.

#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, VariantArray, AsRefStr,
)]
pub enum OsBinding {
    Chdir,
    Chmod,
    Getcwd,
    Getenv,
    Listdir,
    Mkdir,
    Putenv,
    Remove,
    Removedirs,
    Rename,
    Rmdir,
    Getrandom,
    Urandom,
}

/// Name of the OS family the module was built for.
#[cfg(unix)]
pub const NAME: &str = "posix";
#[cfg(windows)]
pub const NAME: &str = "nt";
#[cfg(not(any(unix, windows)))]
pub const NAME: &str = "unknown";

/// Mode used by `mkdir` when none is given.
pub const DEFAULT_DIR_MODE: u32 = 0o777;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DefaultValue {
    None,
    CurrentDir,
    DirMode,
}

impl DefaultValue {
    pub fn value(self) -> Value {
        match self {
            DefaultValue::None => Value::None,
            DefaultValue::CurrentDir => Value::Str(".".to_string()),
            DefaultValue::DirMode => Value::Int(DEFAULT_DIR_MODE as i64),
        }
    }

    pub fn ty(self) -> Type {
        self.value().ty()
    }
}

impl fmt::Display for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultValue::None => write!(f, "none"),
            DefaultValue::CurrentDir => write!(f, "\".\""),
            DefaultValue::DirMode => write!(f, "0o{DEFAULT_DIR_MODE:o}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: &'static str,
    pub ty: Type,
    pub default: Option<DefaultValue>,
}

impl Param {
    fn required(name: &'static str, ty: Type) -> Self {
        Param {
            name,
            ty,
            default: None,
        }
    }

    fn optional(name: &'static str, ty: Type, default: DefaultValue) -> Self {
        Param {
            name,
            ty,
            default: Some(default),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Signature {
    pub type_params: Vec<&'static str>,
    pub params: Vec<Param>,
    pub ret: Type,
}

impl Signature {
    fn new(params: Vec<Param>, ret: Type) -> Self {
        Signature {
            type_params: vec![],
            params,
            ret,
        }
    }

    pub fn param(&self, name: &str) -> Option<(usize, &Param)> {
        self.params.iter().enumerate().find(|(_, p)| p.name == name)
    }
}

impl OsBinding {
    pub fn enumerate() -> Vec<Self> {
        Self::iter().collect()
    }

    pub fn name(&self) -> String {
        self.as_ref().to_snake_case()
    }

    /// Whether calling this binding changes process or filesystem state.
    pub fn is_mutating(&self) -> bool {
        match self {
            OsBinding::Chdir
            | OsBinding::Chmod
            | OsBinding::Mkdir
            | OsBinding::Putenv
            | OsBinding::Remove
            | OsBinding::Removedirs
            | OsBinding::Rename
            | OsBinding::Rmdir => true,

            OsBinding::Getcwd
            | OsBinding::Getenv
            | OsBinding::Listdir
            | OsBinding::Getrandom
            | OsBinding::Urandom => false,
        }
    }

    pub fn type_signature(&self) -> Signature {
        match self {
            OsBinding::Chdir
            | OsBinding::Remove
            | OsBinding::Removedirs
            | OsBinding::Rmdir => Signature::new(
                vec![Param::required("path", Type::PathLike)],
                Type::None,
            ),
            OsBinding::Chmod => Signature::new(
                vec![
                    Param::required("path", Type::PathLike),
                    Param::required("mode", Type::Nat),
                ],
                Type::None,
            ),
            OsBinding::Getcwd => Signature::new(vec![], Type::String),
            OsBinding::Getenv => Signature {
                type_params: vec!["D"],
                params: vec![
                    Param::required("key", Type::String),
                    Param::optional("default", Type::Param("D"), DefaultValue::None),
                ],
                ret: Type::union([Type::String, Type::Param("D")]),
            },
            OsBinding::Listdir => Signature::new(
                vec![Param::optional(
                    "path",
                    Type::PathLike,
                    DefaultValue::CurrentDir,
                )],
                Type::seq(Type::String),
            ),
            OsBinding::Mkdir => Signature::new(
                vec![
                    Param::required("path", Type::PathLike),
                    Param::optional("mode", Type::Nat, DefaultValue::DirMode),
                ],
                Type::None,
            ),
            OsBinding::Putenv => Signature::new(
                vec![
                    Param::required("key", Type::String),
                    Param::required("value", Type::String),
                ],
                Type::None,
            ),
            OsBinding::Rename => Signature::new(
                vec![
                    Param::required("src", Type::PathLike),
                    Param::required("dst", Type::PathLike),
                ],
                Type::None,
            ),
            OsBinding::Getrandom | OsBinding::Urandom => {
                Signature::new(vec![Param::required("size", Type::Nat)], Type::Bytes)
            }
        }
    }

    /// One line of the declaration listing, e.g. `mkdir!(path: PathLike, mode: nat = 0o777) -> none`.
    pub fn declaration(&self) -> String {
        let sig = self.type_signature();
        let mut s = self.name();
        if self.is_mutating() {
            s.push('!');
        }
        if !sig.type_params.is_empty() {
            s.push('[');
            s.push_str(&sig.type_params.join(", "));
            s.push(']');
        }
        s.push('(');
        for (i, param) in sig.params.iter().enumerate() {
            if i != 0 {
                s.push_str(", ");
            }
            s.push_str(param.name);
            s.push_str(": ");
            s.push_str(&param.ty.to_string());
            if let Some(default) = param.default {
                s.push_str(" = ");
                s.push_str(&default.to_string());
            }
        }
        s.push_str(") -> ");
        s.push_str(&sig.ret.to_string());
        s
    }
}

impl fmt::Display for OsBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
