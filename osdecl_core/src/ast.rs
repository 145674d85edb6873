/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use crate::value::Value;
use std::ops::Range;

/// Byte range into the source text. `hi` is exclusive.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Span {
    pub lo: usize,
    pub hi: usize,
}

impl Span {
    pub fn new(lo: usize, hi: usize) -> Self {
        Span { lo, hi }
    }

    pub fn to(self, other: Span) -> Span {
        Span {
            lo: self.lo.min(other.lo),
            hi: self.hi.max(other.hi),
        }
    }

    pub fn range(self) -> Range<usize> {
        self.lo..self.hi
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub v: String,
    pub span: Span,
}

/// `os.getenv("HOME", none)`, `getcwd()` or `os.name`
#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub module: Option<Identifier>,
    pub func: Identifier,
    /// `None` when the name is not followed by parentheses
    pub args: Option<Vec<Arg>>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Arg {
    pub keyword: Option<Identifier>,
    pub value: Literal,
}

impl Arg {
    pub fn span(&self) -> Span {
        match &self.keyword {
            Some(kw) => kw.span.to(self.value.span),
            None => self.value.span,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    pub kind: LiteralKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LiteralKind {
    None,
    Str(String),
    Bytes(Vec<u8>),
    Int(i64),
    List(Vec<Literal>),
}

impl Literal {
    pub fn to_value(&self) -> Value {
        match &self.kind {
            LiteralKind::None => Value::None,
            LiteralKind::Str(s) => Value::Str(s.clone()),
            LiteralKind::Bytes(b) => Value::Bytes(b.clone()),
            LiteralKind::Int(n) => Value::Int(*n),
            LiteralKind::List(elems) => Value::List(elems.iter().map(Literal::to_value).collect()),
        }
    }
}
