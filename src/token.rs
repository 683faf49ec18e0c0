//! Token definitions for the Lak lexer.
//!
//! This module provides the fundamental token types used throughout the
//! Lak interpreter: [`TokenKind`] for the closed set of lexeme kinds, and
//! [`Token`] for a kind paired with its exact source literal.
//!
//! # See Also
//!
//! * [`crate::lexer`] — produces the token stream consumed by the parser
//! * [`crate::parser`] — consumes these tokens to build an AST

/// The closed set of lexeme kinds the lexer can produce.
///
/// Single-character punctuation and operators each get their own variant;
/// `Eq`/`NotEq` are the two-character `==`/`!=` operators. `Eof` and
/// `Illegal` are sentinels: `Eof` marks the end of input (and every call
/// to [`crate::lexer::Lexer::next_token`] after reaching it keeps
/// returning `Eof`), `Illegal` marks a byte the lexer does not recognize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Identifiers and literals
    Ident,
    Int,
    Str,
    // Keywords
    Let,
    Function,
    If,
    Else,
    Return,
    True,
    False,
    // Delimiters
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Comma,
    Semicolon,
    Colon,
    // Operators
    Plus,
    Minus,
    Asterisk,
    Slash,
    Assign,
    Eq,
    NotEq,
    Bang,
    Lt,
    Gt,
    // Sentinels
    Eof,
    Illegal,
}

impl std::fmt::Display for TokenKind {
    /// Renders the kind as the all-caps tag form used in diagnostics
    /// (`IDENT`, `ASSIGN`, `EOF`, ...), independent of the enum's own
    /// PascalCase variant spelling.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = match self {
            TokenKind::Ident => "IDENT",
            TokenKind::Int => "INT",
            TokenKind::Str => "STRING",
            TokenKind::Let => "LET",
            TokenKind::Function => "FUNCTION",
            TokenKind::If => "IF",
            TokenKind::Else => "ELSE",
            TokenKind::Return => "RETURN",
            TokenKind::True => "TRUE",
            TokenKind::False => "FALSE",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::LBrace => "LBRACE",
            TokenKind::RBrace => "RBRACE",
            TokenKind::LBracket => "LBRACKET",
            TokenKind::RBracket => "RBRACKET",
            TokenKind::Comma => "COMMA",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Colon => "COLON",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Asterisk => "ASTERISK",
            TokenKind::Slash => "SLASH",
            TokenKind::Assign => "ASSIGN",
            TokenKind::Eq => "EQ",
            TokenKind::NotEq => "NOT_EQ",
            TokenKind::Bang => "BANG",
            TokenKind::Lt => "LT",
            TokenKind::Gt => "GT",
            TokenKind::Eof => "EOF",
            TokenKind::Illegal => "ILLEGAL",
        };
        write!(f, "{}", tag)
    }
}

/// A single lexeme: its kind, and the exact source substring it came from.
///
/// `literal` is always the raw text the lexer consumed — for single-byte
/// punctuation it's that one character, for `==`/`!=` it's both
/// characters, and for `Eof` it's empty. The AST keeps each node's
/// originating token around so `Display` can pretty-print from the
/// literal rather than re-deriving it.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
}

impl Token {
    pub fn new(kind: TokenKind, literal: impl Into<String>) -> Self {
        Token {
            kind,
            literal: literal.into(),
        }
    }

    /// Looks up a scanned identifier against the keyword table, falling
    /// back to a plain `Ident` token when it isn't a keyword.
    pub fn keyword_or_ident(literal: &str) -> Token {
        let kind = match literal {
            "fn" => TokenKind::Function,
            "let" => TokenKind::Let,
            "if" => TokenKind::If,
            "else" => TokenKind::Else,
            "return" => TokenKind::Return,
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            _ => TokenKind::Ident,
        };
        Token::new(kind, literal)
    }
}
