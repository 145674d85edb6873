/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use std::fmt;
use std::rc::Rc;

/// Types that can appear in a binding's signature.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    None,
    String,
    Nat,
    Int,
    Bytes,
    /// Anything accepted where a filesystem path is expected.
    PathLike,
    Seq(Rc<Type>),
    /// Always normalized: flat, deduplicated, at least two members.
    Union(Vec<Type>),
    /// A type parameter of a generic signature, e.g. `D` in `getenv`.
    Param(&'static str),
}

impl Type {
    pub fn seq(elem: Type) -> Type {
        Type::Seq(Rc::new(elem))
    }

    /// Builds the union of `members`, flattening nested unions and dropping duplicates.
    pub fn union(members: impl IntoIterator<Item = Type>) -> Type {
        let mut flat: Vec<Type> = vec![];
        for member in members {
            match member {
                Type::Union(inner) => {
                    for ty in inner {
                        if !flat.contains(&ty) {
                            flat.push(ty);
                        }
                    }
                }
                ty => {
                    if !flat.contains(&ty) {
                        flat.push(ty);
                    }
                }
            }
        }
        match flat.len() {
            0 => Type::None,
            1 => flat.pop().unwrap_or(Type::None),
            _ => Type::Union(flat),
        }
    }

    /// Whether a value of type `self` is accepted where `expected` is declared.
    pub fn conforms_to(&self, expected: &Type) -> bool {
        if self == expected {
            return true;
        }
        match (self, expected) {
            (_, Type::Param(_)) => true,
            (Type::Union(members), _) => members.iter().all(|m| m.conforms_to(expected)),
            (_, Type::Union(members)) => members.iter().any(|m| self.conforms_to(m)),
            (Type::Nat, Type::Int) => true,
            (Type::String | Type::Bytes, Type::PathLike) => true,
            (Type::Seq(found), Type::Seq(want)) => found.conforms_to(want),
            _ => false,
        }
    }

    /// Replaces type parameters using `lookup`. Parameters it has no answer for are kept.
    pub fn substitute(&self, lookup: &impl Fn(&str) -> Option<Type>) -> Type {
        match self {
            Type::Param(name) => lookup(name).unwrap_or_else(|| self.clone()),
            Type::Seq(elem) => Type::seq(elem.substitute(lookup)),
            Type::Union(members) => Type::union(members.iter().map(|m| m.substitute(lookup))),
            _ => self.clone(),
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::None => write!(f, "none"),
            Type::String => write!(f, "string"),
            Type::Nat => write!(f, "nat"),
            Type::Int => write!(f, "int"),
            Type::Bytes => write!(f, "bytes"),
            Type::PathLike => write!(f, "PathLike"),
            Type::Seq(elem) => write!(f, "[{elem}]"),
            Type::Union(members) => {
                for (i, member) in members.iter().enumerate() {
                    if i != 0 {
                        write!(f, " | ")?;
                    }
                    write!(f, "{member}")?;
                }
                Ok(())
            }
            Type::Param(name) => write!(f, "{name}"),
        }
    }
}
