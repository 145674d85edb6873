/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use crate::ast::*;
use crate::parse::lexer::{Token, TokenKind, TokenTag, tokenize};
use crate::statics::Error;
use strum::IntoDiscriminant;
mod lexer;

/// Parses a single call expression such as `os.mkdir("out", mode=0o755)`.
pub fn parse_call(source: &str) -> Result<CallExpr, Vec<Error>> {
    let tokens = tokenize(source)?;
    let mut parser = Parser::new(tokens);
    let call = parser.parse_call().map_err(|e| vec![*e])?;
    parser.expect_token(TokenTag::Eof).map_err(|e| vec![*e])?;
    Ok(call)
}

struct Parser {
    index: usize,
    tokens: Vec<Token>,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Parser { index: 0, tokens }
    }

    fn current_token(&self) -> Token {
        match self.tokens.get(self.index) {
            Some(t) => t.clone(),
            None => self.eof(),
        }
    }

    fn peek_token(&self, diff: usize) -> Token {
        match self.tokens.get(self.index + diff) {
            Some(t) => t.clone(),
            None => self.eof(),
        }
    }

    fn eof(&self) -> Token {
        let end = self.tokens.last().map(|t| t.span.hi).unwrap_or(0);
        Token {
            kind: TokenKind::Eof,
            span: Span::new(end, end),
        }
    }

    fn unexpected(&self, expected: impl ToString) -> Box<Error> {
        let current = self.current_token();
        Box::new(Error::UnexpectedToken {
            expected: expected.to_string(),
            found: current.kind.discriminant().to_string(),
            span: current.span,
        })
    }

    fn expect_token(&mut self, kind: TokenTag) -> Result<Span, Box<Error>> {
        let current = self.current_token();
        if current.kind.discriminant() == kind {
            self.index += 1;
            Ok(current.span)
        } else {
            Err(self.unexpected(kind))
        }
    }

    fn expect_ident(&mut self) -> Result<Identifier, Box<Error>> {
        let current = self.current_token();
        if let TokenKind::Ident(v) = current.kind {
            self.index += 1;
            Ok(Identifier {
                v,
                span: current.span,
            })
        } else {
            Err(self.unexpected(TokenTag::Ident))
        }
    }

    fn parse_call(&mut self) -> Result<CallExpr, Box<Error>> {
        let first = self.expect_ident()?;
        let (module, func) = if self.current_token().kind == TokenKind::Dot {
            self.index += 1;
            (Some(first), self.expect_ident()?)
        } else {
            (None, first)
        };
        let lo = module.as_ref().map(|m| m.span).unwrap_or(func.span).lo;

        if self.current_token().kind != TokenKind::OpenParen {
            return Ok(CallExpr {
                span: Span::new(lo, func.span.hi),
                module,
                func,
                args: None,
            });
        }
        self.index += 1;

        let mut args = vec![];
        while self.current_token().kind != TokenKind::CloseParen {
            args.push(self.parse_arg()?);
            if self.current_token().kind == TokenKind::Comma {
                self.index += 1;
            } else {
                break;
            }
        }
        let close = self.expect_token(TokenTag::CloseParen)?;

        Ok(CallExpr {
            module,
            func,
            args: Some(args),
            span: Span::new(lo, close.hi),
        })
    }

    fn parse_arg(&mut self) -> Result<Arg, Box<Error>> {
        let is_keyword = matches!(self.current_token().kind, TokenKind::Ident(_))
            && self.peek_token(1).kind == TokenKind::Eq;
        let keyword = if is_keyword {
            let kw = self.expect_ident()?;
            self.index += 1; // `=`
            Some(kw)
        } else {
            None
        };
        let value = self.parse_literal()?;
        Ok(Arg { keyword, value })
    }

    fn parse_literal(&mut self) -> Result<Literal, Box<Error>> {
        let current = self.current_token();
        let kind = match current.kind {
            TokenKind::None => {
                self.index += 1;
                LiteralKind::None
            }
            TokenKind::String(s) => {
                self.index += 1;
                LiteralKind::Str(s)
            }
            TokenKind::Bytes(b) => {
                self.index += 1;
                LiteralKind::Bytes(b)
            }
            TokenKind::Int(_) | TokenKind::Minus => return self.parse_int(),
            TokenKind::OpenBracket => return self.parse_list(),
            _ => return Err(self.unexpected("literal")),
        };
        Ok(Literal {
            kind,
            span: current.span,
        })
    }

    fn parse_int(&mut self) -> Result<Literal, Box<Error>> {
        let mut span = self.current_token().span;
        let negative = self.current_token().kind == TokenKind::Minus;
        if negative {
            self.index += 1;
        }
        let current = self.current_token();
        let TokenKind::Int(text) = current.kind else {
            return Err(self.unexpected(TokenTag::Int));
        };
        self.index += 1;
        span = span.to(current.span);

        let digits = text.replace('_', "");
        let (radix, digits) = match digits.get(..2) {
            Some("0x") | Some("0X") => (16, &digits[2..]),
            Some("0o") | Some("0O") => (8, &digits[2..]),
            Some("0b") | Some("0B") => (2, &digits[2..]),
            _ => (10, &digits[..]),
        };
        // from_str_radix would accept a sign of its own
        if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
            return Err(Box::new(Error::InvalidInteger(span)));
        }
        let magnitude =
            i128::from_str_radix(digits, radix).map_err(|_| Box::new(Error::InvalidInteger(span)))?;
        let n = if negative { -magnitude } else { magnitude };
        let n = i64::try_from(n).map_err(|_| Box::new(Error::InvalidInteger(span)))?;
        Ok(Literal {
            kind: LiteralKind::Int(n),
            span,
        })
    }

    fn parse_list(&mut self) -> Result<Literal, Box<Error>> {
        let open = self.expect_token(TokenTag::OpenBracket)?;
        let mut elems = vec![];
        while self.current_token().kind != TokenKind::CloseBracket {
            elems.push(self.parse_literal()?);
            if self.current_token().kind == TokenKind::Comma {
                self.index += 1;
            } else {
                break;
            }
        }
        let close = self.expect_token(TokenTag::CloseBracket)?;
        Ok(Literal {
            kind: LiteralKind::List(elems),
            span: open.to(close),
        })
    }
}
