/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use crate::binding::{OsBinding, Signature};
use crate::types::Type;
use thiserror::Error;
use utils::hash::HashMap;
use utils::swriteln;

pub const MODULE_NAME: &str = "os";

/// Name-to-signature map for one foreign module.
#[derive(Debug, Clone)]
pub struct Catalog {
    module: &'static str,
    bindings: Vec<OsBinding>,
    by_name: HashMap<String, OsBinding>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("`{name}` is declared more than once in module `{module}`")]
    DuplicateBinding { module: &'static str, name: String },
    #[error("`{name}`: required parameter `{param}` follows a parameter with a default")]
    RequiredAfterOptional { name: String, param: &'static str },
    #[error("`{name}`: default `{default}` of parameter `{param}` is not a `{expected}`")]
    BadDefault {
        name: String,
        param: &'static str,
        default: String,
        expected: Type,
    },
    #[error("module `{module}` has no binding named `{name}`{}", did_you_mean(.suggestion))]
    UnknownBinding {
        module: &'static str,
        name: String,
        suggestion: Option<String>,
    },
}

fn did_you_mean(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(s) => format!(" (did you mean `{s}`?)"),
        None => String::new(),
    }
}

impl Catalog {
    /// The catalog of the host `os` module.
    pub fn os() -> Result<Self, CatalogError> {
        Self::new(MODULE_NAME, OsBinding::enumerate())
    }

    pub fn new(module: &'static str, bindings: Vec<OsBinding>) -> Result<Self, CatalogError> {
        let mut by_name = HashMap::default();
        for binding in &bindings {
            let name = binding.name();
            validate_signature(&name, &binding.type_signature())?;
            if by_name.insert(name.clone(), *binding).is_some() {
                return Err(CatalogError::DuplicateBinding { module, name });
            }
        }
        Ok(Catalog {
            module,
            bindings,
            by_name,
        })
    }

    pub fn module_name(&self) -> &'static str {
        self.module
    }

    pub fn get(&self, name: &str) -> Option<OsBinding> {
        self.by_name.get(name).copied()
    }

    pub fn lookup(&self, name: &str) -> Result<OsBinding, CatalogError> {
        self.get(name).ok_or_else(|| CatalogError::UnknownBinding {
            module: self.module,
            name: name.to_string(),
            suggestion: self.suggest(name),
        })
    }

    /// The declared name closest to `name`, if any is close enough to be a likely typo.
    pub fn suggest(&self, name: &str) -> Option<String> {
        let limit = (name.chars().count() / 3).max(1);
        self.bindings
            .iter()
            .map(|b| b.name())
            .chain(std::iter::once("name".to_string()))
            .map(|candidate| (levenshtein(name, &candidate), candidate))
            .filter(|(dist, _)| *dist <= limit)
            .min_by_key(|(dist, _)| *dist)
            .map(|(_, candidate)| candidate)
    }

    /// The bindings in declaration order.
    pub fn bindings(&self) -> &[OsBinding] {
        &self.bindings
    }

    /// The whole catalog as a declaration listing, one entry per line.
    pub fn declarations(&self) -> String {
        let mut s = String::new();
        swriteln!(&mut s, "name: {}", Type::String);
        for binding in &self.bindings {
            swriteln!(&mut s, "{}", binding.declaration());
        }
        s
    }
}

/// Checks that parameters with defaults come last and that each default has the parameter's type.
pub fn validate_signature(name: &str, sig: &Signature) -> Result<(), CatalogError> {
    let mut seen_default = false;
    for param in &sig.params {
        match param.default {
            Some(default) => {
                seen_default = true;
                if !default.ty().conforms_to(&param.ty) {
                    return Err(CatalogError::BadDefault {
                        name: name.to_string(),
                        param: param.name,
                        default: default.to_string(),
                        expected: param.ty.clone(),
                    });
                }
            }
            None if seen_default => {
                return Err(CatalogError::RequiredAfterOptional {
                    name: name.to_string(),
                    param: param.name,
                });
            }
            None => {}
        }
    }
    Ok(())
}

fn levenshtein(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];
    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = prev[j] + usize::from(ca != *cb);
            curr[j + 1] = substitution.min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}
