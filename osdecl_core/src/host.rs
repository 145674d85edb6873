/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

// Performs checked calls against the host OS

use crate::binding::{NAME, OsBinding};
use crate::os;
use crate::statics::{Checked, CheckedCall};
use crate::value::{HostValue, MarshalError, Value};
use std::io;
use std::path::PathBuf;
use thiserror::Error;
use utils::dlog;

#[derive(Debug, Error)]
pub enum RuntimeError {
    /// The operating system rejected the call.
    #[error("{binding}: {source}")]
    Os {
        binding: OsBinding,
        #[source]
        source: io::Error,
    },
    #[error("{binding}: argument {index}: {source}")]
    Marshal {
        binding: OsBinding,
        index: usize,
        #[source]
        source: MarshalError,
    },
    #[error("{binding}: expected {expected} argument(s), got {found}")]
    Arity {
        binding: OsBinding,
        expected: usize,
        found: usize,
    },
}

impl RuntimeError {
    /// The OS error, if this is one.
    pub fn os_error(&self) -> Option<&io::Error> {
        match self {
            RuntimeError::Os { source, .. } => Some(source),
            _ => None,
        }
    }
}

// Pops arguments off a checked call in declaration order
struct Args {
    binding: OsBinding,
    values: std::vec::IntoIter<Value>,
    index: usize,
}

impl Args {
    fn new(call: &CheckedCall) -> Result<Self, RuntimeError> {
        let expected = call.binding.type_signature().params.len();
        if call.args.len() != expected {
            return Err(RuntimeError::Arity {
                binding: call.binding,
                expected,
                found: call.args.len(),
            });
        }
        Ok(Args {
            binding: call.binding,
            values: call.args.clone().into_iter(),
            index: 0,
        })
    }

    fn next<T: HostValue>(&mut self) -> Result<T, RuntimeError> {
        let index = self.index;
        self.index += 1;
        let value = self.values.next().unwrap_or(Value::None);
        T::from_value(value).map_err(|source| RuntimeError::Marshal {
            binding: self.binding,
            index,
            source,
        })
    }
}

// `nat` is unbounded, mode bits are not
fn mode_bits(mode: i64) -> io::Result<u32> {
    u32::try_from(mode).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("mode {mode:#o} does not fit in 32 bits"),
        )
    })
}

/// Evaluates a checked expression: reads `os.name` or performs the call.
pub fn eval(checked: &Checked) -> Result<Value, RuntimeError> {
    match checked {
        Checked::Name => Ok(Value::Str(NAME.to_string())),
        Checked::Call(call) => invoke(call),
    }
}

/// Performs `call` against the operating system.
pub fn invoke(call: &CheckedCall) -> Result<Value, RuntimeError> {
    let binding = call.binding;
    let mut args = Args::new(call)?;
    dlog!("invoke {binding}{:?}", call.args);

    let os_err = |source: io::Error| RuntimeError::Os { binding, source };
    let ret = match binding {
        OsBinding::Chdir => os::chdir(args.next::<PathBuf>()?).map_err(os_err)?.into_value(),
        OsBinding::Chmod => {
            let path: PathBuf = args.next()?;
            let mode = mode_bits(args.next()?).map_err(os_err)?;
            os::chmod(path, mode).map_err(os_err)?.into_value()
        }
        OsBinding::Getcwd => os::getcwd().map_err(os_err)?.into_value(),
        OsBinding::Getenv => {
            let key: String = args.next()?;
            let default: Value = args.next()?;
            match os::getenv(&key, default) {
                os::EnvVar::Set(s) => Value::Str(s),
                os::EnvVar::Default(d) => d,
            }
        }
        OsBinding::Listdir => os::listdir(args.next::<PathBuf>()?)
            .map_err(os_err)?
            .into_value(),
        OsBinding::Mkdir => {
            let path: PathBuf = args.next()?;
            let mode = mode_bits(args.next()?).map_err(os_err)?;
            os::mkdir(path, mode).map_err(os_err)?.into_value()
        }
        OsBinding::Putenv => {
            let key: String = args.next()?;
            let value: String = args.next()?;
            os::putenv(&key, &value).map_err(os_err)?.into_value()
        }
        OsBinding::Remove => os::remove(args.next::<PathBuf>()?).map_err(os_err)?.into_value(),
        OsBinding::Removedirs => os::removedirs(args.next::<PathBuf>()?)
            .map_err(os_err)?
            .into_value(),
        OsBinding::Rename => {
            let src: PathBuf = args.next()?;
            let dst: PathBuf = args.next()?;
            os::rename(src, dst).map_err(os_err)?.into_value()
        }
        OsBinding::Rmdir => os::rmdir(args.next::<PathBuf>()?).map_err(os_err)?.into_value(),
        OsBinding::Getrandom => os::getrandom(args.next()?).map_err(os_err)?.into_value(),
        OsBinding::Urandom => os::urandom(args.next()?).map_err(os_err)?.into_value(),
    };

    dlog!("{binding} returned {ret}");
    Ok(ret)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Type;

    #[test]
    fn hand_built_calls_are_validated() {
        let call = CheckedCall {
            binding: OsBinding::Urandom,
            args: vec![],
            ret: Type::Bytes,
        };
        assert!(matches!(
            invoke(&call),
            Err(RuntimeError::Arity { expected: 1, found: 0, .. })
        ));

        let call = CheckedCall {
            binding: OsBinding::Urandom,
            args: vec![Value::Str("16".into())],
            ret: Type::Bytes,
        };
        let err = invoke(&call).unwrap_err();
        assert_eq!(err.to_string(), "urandom: argument 0: expected nat, found string");
        assert!(err.os_error().is_none());
    }

    #[test]
    fn name_and_random() {
        assert_eq!(eval(&Checked::Name).unwrap(), Value::Str(NAME.into()));
        let call = CheckedCall {
            binding: OsBinding::Getrandom,
            args: vec![Value::Int(5)],
            ret: Type::Bytes,
        };
        assert!(matches!(invoke(&call).unwrap(), Value::Bytes(b) if b.len() == 5));
    }

    #[test]
    fn oversized_mode_is_an_os_error() {
        let call = CheckedCall {
            binding: OsBinding::Chmod,
            args: vec![Value::Str("unused".into()), Value::Int(1 << 32)],
            ret: Type::None,
        };
        let err = invoke(&call).unwrap_err();
        assert!(matches!(err, RuntimeError::Os { binding: OsBinding::Chmod, .. }));
        assert_eq!(err.os_error().map(io::Error::kind), Some(io::ErrorKind::InvalidInput));
    }
}
