/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use crate::ast::{Arg, CallExpr, Span};
use crate::binding::OsBinding;
use crate::catalog::Catalog;
use crate::types::Type;
use crate::value::Value;
use utils::dlog;

mod error;

/// A call that type-checked against the catalog, with every parameter filled in.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckedCall {
    pub binding: OsBinding,
    /// One value per declared parameter, in declaration order. Omitted arguments hold their default.
    pub args: Vec<Value>,
    pub ret: Type,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Checked {
    /// `os.name`
    Name,
    Call(CheckedCall),
}

impl Checked {
    pub fn ty(&self) -> Type {
        match self {
            Checked::Name => Type::String,
            Checked::Call(call) => call.ret.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    // lexing and parsing
    UnrecognizedToken(Span),
    UnterminatedString(Span),
    InvalidEscape(Span),
    InvalidInteger(Span),
    UnexpectedToken {
        expected: String,
        found: String,
        span: Span,
    },

    // resolution
    UnknownModule {
        name: String,
        expected: &'static str,
        span: Span,
    },
    UnknownBinding {
        name: String,
        suggestion: Option<String>,
        span: Span,
    },
    NotCallable {
        name: String,
        span: Span,
    },
    NotCalled {
        binding: OsBinding,
        span: Span,
    },

    // argument binding
    TooManyArguments {
        binding: OsBinding,
        max: usize,
        span: Span,
    },
    PositionalAfterKeyword {
        span: Span,
    },
    UnknownKeyword {
        binding: OsBinding,
        keyword: String,
        span: Span,
    },
    DuplicateArgument {
        param: &'static str,
        first: Span,
        second: Span,
    },
    MissingArgument {
        binding: OsBinding,
        param: &'static str,
        span: Span,
    },

    // typing
    ArgumentType {
        binding: OsBinding,
        param: &'static str,
        expected: Type,
        found: Type,
        span: Span,
    },
}

/// Checks `call` against `catalog`, reporting every problem found.
pub fn check_call(catalog: &Catalog, call: &CallExpr) -> Result<Checked, Vec<Error>> {
    if let Some(module) = &call.module
        && module.v != catalog.module_name()
    {
        return Err(vec![Error::UnknownModule {
            name: module.v.clone(),
            expected: catalog.module_name(),
            span: module.span,
        }]);
    }

    if call.func.v == "name" {
        return match call.args {
            Some(_) => Err(vec![Error::NotCallable {
                name: call.func.v.clone(),
                span: call.span,
            }]),
            None => Ok(Checked::Name),
        };
    }

    let Some(binding) = catalog.get(&call.func.v) else {
        return Err(vec![Error::UnknownBinding {
            name: call.func.v.clone(),
            suggestion: catalog.suggest(&call.func.v),
            span: call.func.span,
        }]);
    };
    dlog!("resolved `{}` to {:?}", call.func.v, binding);

    let Some(args) = &call.args else {
        return Err(vec![Error::NotCalled {
            binding,
            span: call.span,
        }]);
    };

    let sig = binding.type_signature();
    let mut errors = vec![];
    let mut slots: Vec<Option<&Arg>> = vec![None; sig.params.len()];

    let mut next_positional = 0;
    let mut seen_keyword = false;
    for arg in args {
        match &arg.keyword {
            None if seen_keyword => {
                errors.push(Error::PositionalAfterKeyword { span: arg.span() });
            }
            None => {
                if next_positional >= sig.params.len() {
                    errors.push(Error::TooManyArguments {
                        binding,
                        max: sig.params.len(),
                        span: arg.span(),
                    });
                } else {
                    slots[next_positional] = Some(arg);
                }
                next_positional += 1;
            }
            Some(keyword) => {
                seen_keyword = true;
                match sig.param(&keyword.v) {
                    None => errors.push(Error::UnknownKeyword {
                        binding,
                        keyword: keyword.v.clone(),
                        span: keyword.span,
                    }),
                    Some((i, param)) => match slots[i] {
                        Some(first) => errors.push(Error::DuplicateArgument {
                            param: param.name,
                            first: first.span(),
                            second: arg.span(),
                        }),
                        None => slots[i] = Some(arg),
                    },
                }
            }
        }
    }

    let mut values = vec![];
    let mut arg_types = vec![];
    for (param, slot) in sig.params.iter().zip(&slots) {
        match (slot, param.default) {
            (Some(arg), _) => {
                let value = arg.value.to_value();
                let found = value.ty();
                if !found.conforms_to(&param.ty) {
                    errors.push(Error::ArgumentType {
                        binding,
                        param: param.name,
                        expected: param.ty.clone(),
                        found: found.clone(),
                        span: arg.value.span,
                    });
                }
                values.push(value);
                arg_types.push(found);
            }
            (None, Some(default)) => {
                values.push(default.value());
                arg_types.push(default.ty());
            }
            (None, None) => {
                errors.push(Error::MissingArgument {
                    binding,
                    param: param.name,
                    span: call.span,
                });
            }
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    // a type parameter takes the type of the argument declared with it
    let instantiate = |name: &str| {
        sig.params
            .iter()
            .position(|p| matches!(p.ty, Type::Param(tp) if tp == name))
            .map(|i| arg_types[i].clone())
    };
    let ret = sig.ret.substitute(&instantiate);
    dlog!("checked call to {binding}: {ret}");

    Ok(Checked::Call(CheckedCall {
        binding,
        args: values,
        ret,
    }))
}
