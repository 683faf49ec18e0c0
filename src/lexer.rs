//! Lexical analysis for the Lak language.
//!
//! [`Lexer`] scans a byte string into a lazy stream of [`Token`]s. It
//! tracks two indices (`pos`, `read_pos`) and the current byte, advancing
//! one byte at a time; no lookahead beyond a single byte is ever needed.
//!
//! # Examples
//!
//! ```
//! use lak::lexer::Lexer;
//! use lak::token::TokenKind;
//!
//! let mut lexer = Lexer::new("let five = 5;");
//! assert_eq!(lexer.next_token().kind, TokenKind::Let);
//! assert_eq!(lexer.next_token().kind, TokenKind::Ident);
//! assert_eq!(lexer.next_token().kind, TokenKind::Assign);
//! assert_eq!(lexer.next_token().kind, TokenKind::Int);
//! assert_eq!(lexer.next_token().kind, TokenKind::Semicolon);
//! assert_eq!(lexer.next_token().kind, TokenKind::Eof);
//! assert_eq!(lexer.next_token().kind, TokenKind::Eof);
//! ```
//!
//! # See Also
//!
//! * [`crate::token`] — the [`Token`]/[`TokenKind`] vocabulary produced here
//! * [`crate::parser`] — consumes this stream

use crate::token::{Token, TokenKind};

/// A byte-wise scanner over source text.
///
/// `ch` holds the current byte, with `0` standing in for end-of-input —
/// the same sentinel the scanned language's reference implementation
/// uses, since Rust has no null byte-as-EOF convention of its own to
/// reach for here.
pub struct Lexer<'a> {
    input: &'a [u8],
    pos: usize,
    read_pos: usize,
    ch: u8,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        let mut lexer = Lexer {
            input: input.as_bytes(),
            pos: 0,
            read_pos: 0,
            ch: 0,
        };
        lexer.read_char();
        lexer
    }

    fn read_char(&mut self) {
        self.ch = if self.read_pos >= self.input.len() {
            0
        } else {
            self.input[self.read_pos]
        };
        self.pos = self.read_pos;
        self.read_pos += 1;
    }

    fn peek_char(&self) -> u8 {
        if self.read_pos >= self.input.len() {
            0
        } else {
            self.input[self.read_pos]
        }
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.ch, b' ' | b'\t' | b'\n' | b'\r') {
            self.read_char();
        }
    }

    /// Scans and returns the next token. Call repeatedly to drain the
    /// input; once `Eof` is reached, every subsequent call returns `Eof`
    /// again (the read position never advances past the end of input).
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let tok = match self.ch {
            b'=' => {
                if self.peek_char() == b'=' {
                    self.read_char();
                    self.read_char();
                    return Token::new(TokenKind::Eq, "==");
                }
                Token::new(TokenKind::Assign, "=")
            }
            b'!' => {
                if self.peek_char() == b'=' {
                    self.read_char();
                    self.read_char();
                    return Token::new(TokenKind::NotEq, "!=");
                }
                Token::new(TokenKind::Bang, "!")
            }
            b'+' => Token::new(TokenKind::Plus, "+"),
            b'-' => Token::new(TokenKind::Minus, "-"),
            b'*' => Token::new(TokenKind::Asterisk, "*"),
            b'/' => Token::new(TokenKind::Slash, "/"),
            b'<' => Token::new(TokenKind::Lt, "<"),
            b'>' => Token::new(TokenKind::Gt, ">"),
            b'(' => Token::new(TokenKind::LParen, "("),
            b')' => Token::new(TokenKind::RParen, ")"),
            b'{' => Token::new(TokenKind::LBrace, "{"),
            b'}' => Token::new(TokenKind::RBrace, "}"),
            b'[' => Token::new(TokenKind::LBracket, "["),
            b']' => Token::new(TokenKind::RBracket, "]"),
            b',' => Token::new(TokenKind::Comma, ","),
            b';' => Token::new(TokenKind::Semicolon, ";"),
            b':' => Token::new(TokenKind::Colon, ":"),
            b'"' => return self.read_string(),
            0 => Token::new(TokenKind::Eof, ""),
            c if is_letter(c) => return self.read_identifier(),
            c if c.is_ascii_digit() => return self.read_integer(),
            c => Token::new(TokenKind::Illegal, (c as char).to_string()),
        };

        self.read_char();
        tok
    }

    /// Consumes bytes between a pair of `"` with no escape processing, per
    /// the language's string-literal rule. An unterminated string (input
    /// ends before the closing quote) produces an `Illegal` token carrying
    /// whatever content was scanned, rather than silently running to EOF.
    fn read_string(&mut self) -> Token {
        self.read_char(); // skip opening quote
        let start = self.pos;

        loop {
            match self.ch {
                b'"' => {
                    let literal = String::from_utf8_lossy(&self.input[start..self.pos]).into_owned();
                    self.read_char(); // skip closing quote
                    return Token::new(TokenKind::Str, literal);
                }
                0 => {
                    let literal = String::from_utf8_lossy(&self.input[start..self.pos]).into_owned();
                    return Token::new(TokenKind::Illegal, literal);
                }
                _ => self.read_char(),
            }
        }
    }

    fn read_identifier(&mut self) -> Token {
        let start = self.pos;
        while is_letter(self.ch) {
            self.read_char();
        }
        let literal = std::str::from_utf8(&self.input[start..self.pos]).unwrap_or_default();
        Token::keyword_or_ident(literal)
    }

    fn read_integer(&mut self) -> Token {
        let start = self.pos;
        while self.ch.is_ascii_digit() {
            self.read_char();
        }
        let literal = std::str::from_utf8(&self.input[start..self.pos]).unwrap_or_default();
        Token::new(TokenKind::Int, literal)
    }
}

fn is_letter(ch: u8) -> bool {
    ch.is_ascii_alphabetic() || ch == b'_'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(input: &str) -> Vec<TokenKind> {
        let mut lexer = Lexer::new(input);
        let mut kinds = Vec::new();
        loop {
            let tok = lexer.next_token();
            let done = tok.kind == TokenKind::Eof;
            kinds.push(tok.kind);
            if done {
                break;
            }
        }
        kinds
    }

    #[test]
    fn single_char_tokens() {
        use TokenKind::*;
        assert_eq!(
            collect("=+(){},;:[]"),
            vec![
                Assign, Plus, LParen, RParen, LBrace, RBrace, Comma, Semicolon, Colon, LBracket,
                RBracket, Eof
            ]
        );
    }

    #[test]
    fn two_char_operators() {
        use TokenKind::*;
        assert_eq!(collect("== != < >"), vec![Eq, NotEq, Lt, Gt, Eof]);
    }

    #[test]
    fn keywords_and_identifiers() {
        use TokenKind::*;
        assert_eq!(
            collect("fn let if else return true false foobar"),
            vec![Function, Let, If, Else, Return, True, False, Ident, Eof]
        );
    }

    #[test]
    fn integer_literal() {
        let mut lexer = Lexer::new("12345");
        let tok = lexer.next_token();
        assert_eq!(tok.kind, TokenKind::Int);
        assert_eq!(tok.literal, "12345");
    }

    #[test]
    fn string_literal() {
        let mut lexer = Lexer::new(r#""foo bar""#);
        let tok = lexer.next_token();
        assert_eq!(tok.kind, TokenKind::Str);
        assert_eq!(tok.literal, "foo bar");
    }

    #[test]
    fn unterminated_string_is_illegal() {
        let mut lexer = Lexer::new("\"foo");
        let tok = lexer.next_token();
        assert_eq!(tok.kind, TokenKind::Illegal);
        assert_eq!(tok.literal, "foo");
    }

    #[test]
    fn illegal_byte() {
        let mut lexer = Lexer::new("@");
        assert_eq!(lexer.next_token().kind, TokenKind::Illegal);
    }

    #[test]
    fn eof_is_sticky() {
        let mut lexer = Lexer::new("");
        assert_eq!(lexer.next_token().kind, TokenKind::Eof);
        assert_eq!(lexer.next_token().kind, TokenKind::Eof);
        assert_eq!(lexer.next_token().kind, TokenKind::Eof);
    }

    #[test]
    fn full_program() {
        let input = r#"
            let five = 5;
            let add = fn(x, y) { x + y; };
            let result = add(five, 10);
            !-/*5;
            5 < 10 > 5;
            if (5 < 10) { return true; } else { return false; }
            10 == 10;
            10 != 9;
            "foobar"
            "foo bar"
            [1, 2];
            {"foo": "bar"}
        "#;
        let kinds = collect(input);
        assert_eq!(kinds.last(), Some(&TokenKind::Eof));
        assert!(kinds.iter().filter(|k| **k == TokenKind::Illegal).count() == 0);
    }
}
