/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use crate::ast::Span;
use crate::statics::Error;
use std::fmt;
use std::fmt::Formatter;
use strum_macros::EnumDiscriminants;

#[derive(Debug, Clone)]
pub(crate) struct Token {
    pub(crate) kind: TokenKind,
    pub(crate) span: Span,
}

#[derive(Debug, Clone, PartialEq, EnumDiscriminants)]
#[strum_discriminants(name(TokenTag))]
pub(crate) enum TokenKind {
    /// `=`
    Eq,
    /// `-`
    Minus,
    /// `.`
    Dot,
    /// `,`
    Comma,
    /// `(`
    OpenParen,
    /// `)`
    CloseParen,
    /// `[`
    OpenBracket,
    /// `]`
    CloseBracket,

    /* Keywords */
    None,

    Int(String),
    String(String),
    Bytes(Vec<u8>),
    Ident(String),

    Eof,
}

impl TokenKind {
    fn keyword_from_str(s: &str) -> Option<Self> {
        Some(match s {
            "none" => TokenKind::None,
            _ => return None,
        })
    }
}

struct Lexer {
    chars: Vec<(usize, char)>,
    source_len: usize,
    index: usize,

    tokens: Vec<Token>,
    errors: Vec<Error>,
}

impl Lexer {
    fn new(source: &str) -> Self {
        Lexer {
            chars: source.char_indices().collect(),
            source_len: source.len(),
            index: 0,
            tokens: vec![],
            errors: vec![],
        }
    }

    fn done(&self) -> bool {
        self.index >= self.chars.len()
    }

    fn current_char(&self) -> char {
        self.chars[self.index].1
    }

    fn peek_char(&self, dist: usize) -> Option<char> {
        self.chars.get(self.index + dist).map(|(_, c)| *c)
    }

    // byte offset of the char `dist` positions ahead, or the end of the source
    fn offset(&self, dist: usize) -> usize {
        match self.chars.get(self.index + dist) {
            Some((offset, _)) => *offset,
            None => self.source_len,
        }
    }

    // emits a token spanning `nchars` chars from the current position
    fn emit(&mut self, kind: TokenKind, nchars: usize) {
        let span = Span::new(self.offset(0), self.offset(nchars));
        self.tokens.push(Token { kind, span });
        self.index += nchars;
    }

    fn error(&mut self, error: Error) {
        self.errors.push(error);
    }
}

pub(crate) fn tokenize(source: &str) -> Result<Vec<Token>, Vec<Error>> {
    let mut lexer = Lexer::new(source);
    while !lexer.done() {
        let c = lexer.current_char();
        if (c == 'b') && lexer.peek_char(1) == Some('"') {
            lex_quoted(&mut lexer, 1);
            continue;
        }
        if start_of_ident(c) {
            let mut ident = String::from(c);

            let mut next = 1;
            while let Some(c) = lexer.peek_char(next)
                && middle_of_ident(c)
            {
                ident.push(c);
                next += 1;
            }

            if let Some(kw) = TokenKind::keyword_from_str(&ident) {
                lexer.emit(kw, next);
            } else {
                lexer.emit(TokenKind::Ident(ident), next);
            }
            continue;
        }
        if c.is_ascii_digit() {
            let mut num = String::from(c);

            let mut next = 1;
            // digits of any radix, plus the `0x`/`0o`/`0b` prefix letters; validated by the parser
            while let Some(c) = lexer.peek_char(next)
                && (c.is_ascii_alphanumeric() || c == '_')
            {
                num.push(c);
                next += 1;
            }
            lexer.emit(TokenKind::Int(num), next);
            continue;
        }
        match c {
            '(' => lexer.emit(TokenKind::OpenParen, 1),
            ')' => lexer.emit(TokenKind::CloseParen, 1),
            '[' => lexer.emit(TokenKind::OpenBracket, 1),
            ']' => lexer.emit(TokenKind::CloseBracket, 1),
            ',' => lexer.emit(TokenKind::Comma, 1),
            '.' => lexer.emit(TokenKind::Dot, 1),
            '=' => lexer.emit(TokenKind::Eq, 1),
            '-' => lexer.emit(TokenKind::Minus, 1),
            '"' => lex_quoted(&mut lexer, 0),
            ' ' | '\t' | '\n' | '\r' => {
                // skip space
                lexer.index += 1;
            }
            _ => {
                let span = Span::new(lexer.offset(0), lexer.offset(1));
                lexer.error(Error::UnrecognizedToken(span));
                lexer.index += 1;
            }
        }
    }

    lexer.emit(TokenKind::Eof, 0);

    if lexer.errors.is_empty() {
        Ok(lexer.tokens)
    } else {
        Err(lexer.errors)
    }
}

// Lexes a string literal whose opening quote is `prefix` chars ahead.
// A non-zero prefix (the `b` in `b"..."`) makes it a byte string.
fn lex_quoted(lexer: &mut Lexer, prefix: usize) {
    let is_bytes = prefix > 0;
    let mut s = String::new();
    let mut bytes: Vec<u8> = vec![];

    let mut next = prefix + 1;
    loop {
        let Some(c) = lexer.peek_char(next) else {
            let span = Span::new(lexer.offset(0), lexer.source_len);
            lexer.error(Error::UnterminatedString(span));
            lexer.index = lexer.chars.len();
            return;
        };
        match c {
            '"' => {
                next += 1;
                break;
            }
            '\\' => {
                let escape_span = Span::new(lexer.offset(next), lexer.offset(next + 2));
                let escaped = match lexer.peek_char(next + 1) {
                    Some('n') => Some('\n'),
                    Some('t') => Some('\t'),
                    Some('r') => Some('\r'),
                    Some('0') => Some('\0'),
                    Some('\\') => Some('\\'),
                    Some('"') => Some('"'),
                    Some('x') if is_bytes => {
                        let hex: String =
                            (2..4).filter_map(|i| lexer.peek_char(next + i)).collect();
                        if hex.len() == 2 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
                            bytes.extend(u8::from_str_radix(&hex, 16).ok());
                            next += 4;
                        } else {
                            let span = Span::new(lexer.offset(next), lexer.offset(next + 2));
                            lexer.error(Error::InvalidEscape(span));
                            next += 2;
                        }
                        continue;
                    }
                    _ => None,
                };
                match escaped {
                    Some(e) => {
                        s.push(e);
                        bytes.push(e as u8);
                    }
                    None => lexer.error(Error::InvalidEscape(escape_span)),
                }
                next += 2;
            }
            c => {
                if is_bytes && !c.is_ascii() {
                    let span = Span::new(lexer.offset(next), lexer.offset(next + 1));
                    lexer.error(Error::InvalidEscape(span));
                }
                s.push(c);
                let mut buf = [0u8; 4];
                bytes.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
                next += 1;
            }
        }
    }

    if is_bytes {
        lexer.emit(TokenKind::Bytes(bytes), next);
    } else {
        lexer.emit(TokenKind::String(s), next);
    }
}

fn start_of_ident(c: char) -> bool {
    matches!(c, '_' | 'a'..='z' | 'A'..='Z')
}

fn middle_of_ident(c: char) -> bool {
    matches!(c, '_' | '0'..='9' | 'a'..='z' | 'A'..='Z')
}

impl fmt::Display for TokenTag {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self {
            TokenTag::Eq => write!(f, "="),
            TokenTag::Minus => write!(f, "-"),
            TokenTag::Dot => write!(f, "."),
            TokenTag::Comma => write!(f, ","),
            TokenTag::OpenParen => write!(f, "("),
            TokenTag::CloseParen => write!(f, ")"),
            TokenTag::OpenBracket => write!(f, "["),
            TokenTag::CloseBracket => write!(f, "]"),
            TokenTag::None => write!(f, "none"),
            TokenTag::Int => write!(f, "int literal"),
            TokenTag::String => write!(f, "string literal"),
            TokenTag::Bytes => write!(f, "bytes literal"),
            TokenTag::Ident => write!(f, "identifier"),
            TokenTag::Eof => write!(f, "<EOF>"),
        }
    }
}
