/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

// Values crossing the boundary between a dynamic call and the typed os functions

use crate::types::Type;
use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    None,
    Str(String),
    Int(i64),
    Bytes(Vec<u8>),
    List(Vec<Value>),
}

impl Value {
    /// The most precise type of this value. Non-negative integers are `nat`.
    pub fn ty(&self) -> Type {
        match self {
            Value::None => Type::None,
            Value::Str(_) => Type::String,
            Value::Int(n) if *n >= 0 => Type::Nat,
            Value::Int(_) => Type::Int,
            Value::Bytes(_) => Type::Bytes,
            Value::List(elems) => {
                if elems.is_empty() {
                    Type::seq(Type::Param("_"))
                } else {
                    Type::seq(Type::union(elems.iter().map(Value::ty)))
                }
            }
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Value::None => "none",
            Value::Str(_) => "string",
            Value::Int(_) => "int",
            Value::Bytes(_) => "bytes",
            Value::List(_) => "list",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => write!(f, "none"),
            Value::Str(s) => write!(f, "{s:?}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Bytes(bytes) => {
                write!(f, "b\"")?;
                for b in bytes {
                    match b {
                        b'"' => write!(f, "\\\"")?,
                        b'\\' => write!(f, "\\\\")?,
                        0x20..=0x7e => write!(f, "{}", *b as char)?,
                        _ => write!(f, "\\x{b:02x}")?,
                    }
                }
                write!(f, "\"")
            }
            Value::List(elems) => {
                write!(f, "[")?;
                for (i, elem) in elems.iter().enumerate() {
                    if i != 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{elem}")?;
                }
                write!(f, "]")
            }
        }
    }
}

/// A value that does not fit the Rust type it is being converted to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarshalError {
    pub expected: &'static str,
    pub found: &'static str,
}

impl fmt::Display for MarshalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected {}, found {}", self.expected, self.found)
    }
}

impl std::error::Error for MarshalError {}

/// Conversion between Rust types and [`Value`]s, the counterpart of each declared type.
pub trait HostValue: Sized {
    fn from_value(value: Value) -> Result<Self, MarshalError>;

    fn into_value(self) -> Value;
}

fn mismatch<T>(expected: &'static str, found: &Value) -> Result<T, MarshalError> {
    Err(MarshalError {
        expected,
        found: found.kind(),
    })
}

impl HostValue for () {
    fn from_value(value: Value) -> Result<Self, MarshalError> {
        match value {
            Value::None => Ok(()),
            other => mismatch("none", &other),
        }
    }

    fn into_value(self) -> Value {
        Value::None
    }
}

impl HostValue for String {
    fn from_value(value: Value) -> Result<Self, MarshalError> {
        match value {
            Value::Str(s) => Ok(s),
            other => mismatch("string", &other),
        }
    }

    fn into_value(self) -> Value {
        Value::Str(self)
    }
}

impl HostValue for Vec<u8> {
    fn from_value(value: Value) -> Result<Self, MarshalError> {
        match value {
            Value::Bytes(b) => Ok(b),
            other => mismatch("bytes", &other),
        }
    }

    fn into_value(self) -> Value {
        Value::Bytes(self)
    }
}

impl HostValue for i64 {
    fn from_value(value: Value) -> Result<Self, MarshalError> {
        match value {
            Value::Int(n) => Ok(n),
            other => mismatch("int", &other),
        }
    }

    fn into_value(self) -> Value {
        Value::Int(self)
    }
}

impl HostValue for usize {
    fn from_value(value: Value) -> Result<Self, MarshalError> {
        match value {
            Value::Int(n) => usize::try_from(n).map_err(|_| MarshalError {
                expected: "nat",
                found: "int",
            }),
            other => mismatch("nat", &other),
        }
    }

    fn into_value(self) -> Value {
        Value::Int(self as i64)
    }
}

impl HostValue for PathBuf {
    fn from_value(value: Value) -> Result<Self, MarshalError> {
        match value {
            Value::Str(s) => Ok(PathBuf::from(s)),
            Value::Bytes(b) => Ok(PathBuf::from(os_string_from_bytes(b))),
            other => mismatch("PathLike", &other),
        }
    }

    fn into_value(self) -> Value {
        Value::Str(self.to_string_lossy().into_owned())
    }
}

#[cfg(unix)]
fn os_string_from_bytes(bytes: Vec<u8>) -> OsString {
    use std::os::unix::ffi::OsStringExt;
    OsString::from_vec(bytes)
}

#[cfg(not(unix))]
fn os_string_from_bytes(bytes: Vec<u8>) -> OsString {
    OsString::from(String::from_utf8_lossy(&bytes).into_owned())
}

impl<T: HostValue> HostValue for Vec<T> {
    fn from_value(value: Value) -> Result<Self, MarshalError> {
        match value {
            Value::List(elems) => elems.into_iter().map(T::from_value).collect(),
            other => mismatch("list", &other),
        }
    }

    fn into_value(self) -> Value {
        Value::List(self.into_iter().map(T::into_value).collect())
    }
}

// Values bound to a type parameter pass through untouched
impl HostValue for Value {
    fn from_value(value: Value) -> Result<Self, MarshalError> {
        Ok(value)
    }

    fn into_value(self) -> Value {
        self
    }
}
