//! Recursive-descent / Pratt parser for the Lak language.
//!
//! Statements are parsed by a straightforward dispatch on the current
//! token; expressions use Pratt parsing keyed off [`Precedence`]. Rather
//! than the source material's runtime map of prefix/infix closures, this
//! parser dispatches with a `match` on [`TokenKind`] — a compile-time
//! exhaustiveness check stands in for the registration table (see
//! DESIGN.md for why).
//!
//! # Grammar
//!
//! ```text
//! program     → statement* EOF
//! statement   → let_stmt | return_stmt | expr_stmt
//! let_stmt    → "let" IDENT "=" expression ";"?
//! return_stmt → "return" expression ";"?
//! expr_stmt   → expression ";"?
//! expression  → pratt-parsed per the precedence table below
//! ```
//!
//! # See Also
//!
//! * [`crate::lexer`] — produces the token stream
//! * [`crate::ast`] — the node types built here
//! * [`crate::eval`] — walks the resulting [`Program`]

use crate::ast::{Block, Expression, Identifier, Program, Statement};
use crate::lexer::Lexer;
use crate::token::{Token, TokenKind};

/// Operator precedence, lowest to highest. Tokens absent from
/// [`Parser::peek_precedence`]'s table default to [`Precedence::Lowest`].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Eq, Ord)]
pub enum Precedence {
    Lowest,
    Equals,      // == !=
    LessGreater, // < >
    Sum,         // + -
    Product,     // * /
    Prefix,      // -x !x
    Call,        // fn(x) arr[x]
}

fn precedence_of(kind: TokenKind) -> Precedence {
    match kind {
        TokenKind::Eq | TokenKind::NotEq => Precedence::Equals,
        TokenKind::Lt | TokenKind::Gt => Precedence::LessGreater,
        TokenKind::Plus | TokenKind::Minus => Precedence::Sum,
        TokenKind::Asterisk | TokenKind::Slash => Precedence::Product,
        TokenKind::LParen | TokenKind::LBracket => Precedence::Call,
        _ => Precedence::Lowest,
    }
}

/// A parse error. Parsing never aborts on one of these — they accumulate
/// in [`Parser::errors`], and the parser does a best-effort resynchronization
/// by continuing at the next statement boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub message: String,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// A Pratt parser over a [`Lexer`]'s token stream.
///
/// Maintains two tokens of lookahead (`cur`, `peek`), primed by two
/// [`Parser::next_token`] calls at construction.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    cur: Token,
    peek: Token,
    errors: Vec<String>,
}

impl<'a> Parser<'a> {
    pub fn new(mut lexer: Lexer<'a>) -> Self {
        let cur = lexer.next_token();
        let peek = lexer.next_token();
        Parser {
            lexer,
            cur,
            peek,
            errors: Vec::new(),
        }
    }

    /// Parser errors accumulated so far, in order of discovery.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    fn next_token(&mut self) {
        self.cur = std::mem::replace(&mut self.peek, self.lexer.next_token());
    }

    fn peek_precedence(&self) -> Precedence {
        precedence_of(self.peek.kind)
    }

    fn cur_precedence(&self) -> Precedence {
        precedence_of(self.cur.kind)
    }

    /// Advances past `kind` if `peek` matches it; otherwise records
    /// `"expected next token <kind>, got <kind>"` and leaves the cursor
    /// where it is.
    fn expect_peek(&mut self, kind: TokenKind) -> bool {
        if self.peek.kind == kind {
            self.next_token();
            true
        } else {
            self.errors.push(format!(
                "expected next token {}, got {}",
                kind, self.peek.kind
            ));
            false
        }
    }

    /// Parses the whole token stream into a [`Program`], advancing until
    /// `Eof`. Statements that fail to parse are skipped (not pushed), but
    /// parsing continues so later errors are also collected.
    pub fn parse_program(&mut self) -> Program {
        let mut statements = Vec::new();
        while self.cur.kind != TokenKind::Eof {
            if let Some(stmt) = self.parse_statement() {
                statements.push(stmt);
            }
            self.next_token();
        }
        Program { statements }
    }

    fn parse_statement(&mut self) -> Option<Statement> {
        match self.cur.kind {
            TokenKind::Let => self.parse_let_statement(),
            TokenKind::Return => self.parse_return_statement(),
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_let_statement(&mut self) -> Option<Statement> {
        if !self.expect_peek(TokenKind::Ident) {
            return None;
        }
        let name = Identifier {
            name: self.cur.literal.clone(),
        };
        if !self.expect_peek(TokenKind::Assign) {
            return None;
        }
        self.next_token();
        let value = self.parse_expression(Precedence::Lowest)?;
        if self.peek.kind == TokenKind::Semicolon {
            self.next_token();
        }
        Some(Statement::Let { name, value })
    }

    fn parse_return_statement(&mut self) -> Option<Statement> {
        self.next_token();
        let value = self.parse_expression(Precedence::Lowest)?;
        if self.peek.kind == TokenKind::Semicolon {
            self.next_token();
        }
        Some(Statement::Return { value })
    }

    fn parse_expression_statement(&mut self) -> Option<Statement> {
        let expr = self.parse_expression(Precedence::Lowest)?;
        if self.peek.kind == TokenKind::Semicolon {
            self.next_token();
        }
        Some(Statement::Expression(expr))
    }

    /// The Pratt loop: parse a prefix expression, then repeatedly fold in
    /// infix operators while the next token binds tighter than `precedence`.
    fn parse_expression(&mut self, precedence: Precedence) -> Option<Expression> {
        let mut left = self.parse_prefix()?;

        while self.peek.kind != TokenKind::Semicolon && precedence < self.peek_precedence() {
            left = match self.peek.kind {
                TokenKind::Plus
                | TokenKind::Minus
                | TokenKind::Asterisk
                | TokenKind::Slash
                | TokenKind::Eq
                | TokenKind::NotEq
                | TokenKind::Lt
                | TokenKind::Gt => {
                    self.next_token();
                    self.parse_infix(left)?
                }
                TokenKind::LParen => {
                    self.next_token();
                    self.parse_call(left)?
                }
                TokenKind::LBracket => {
                    self.next_token();
                    self.parse_index(left)?
                }
                _ => return Some(left),
            };
        }

        Some(left)
    }

    fn parse_prefix(&mut self) -> Option<Expression> {
        match self.cur.kind {
            TokenKind::Ident => Some(Expression::Identifier(Identifier {
                name: self.cur.literal.clone(),
            })),
            TokenKind::Int => match self.cur.literal.parse::<i64>() {
                Ok(value) => Some(Expression::IntegerLiteral(value)),
                Err(_) => {
                    self.errors
                        .push(format!("could not parse {} as integer", self.cur.literal));
                    None
                }
            },
            TokenKind::Str => Some(Expression::StringLiteral(self.cur.literal.clone())),
            TokenKind::True => Some(Expression::BooleanLiteral(true)),
            TokenKind::False => Some(Expression::BooleanLiteral(false)),
            TokenKind::Bang | TokenKind::Minus => self.parse_prefix_expression(),
            TokenKind::LParen => self.parse_grouped_expression(),
            TokenKind::If => self.parse_if_expression(),
            TokenKind::Function => self.parse_function_literal(),
            TokenKind::LBracket => self.parse_array_literal(),
            TokenKind::LBrace => self.parse_hash_literal(),
            kind => {
                self.errors.push(format!("no prefix function for {}", kind));
                None
            }
        }
    }

    fn parse_prefix_expression(&mut self) -> Option<Expression> {
        let operator = self.cur.literal.clone();
        self.next_token();
        let right = self.parse_expression(Precedence::Prefix)?;
        Some(Expression::Prefix {
            operator,
            right: Box::new(right),
        })
    }

    fn parse_infix(&mut self, left: Expression) -> Option<Expression> {
        let operator = self.cur.literal.clone();
        let precedence = self.cur_precedence();
        self.next_token();
        let right = self.parse_expression(precedence)?;
        Some(Expression::Infix {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    fn parse_grouped_expression(&mut self) -> Option<Expression> {
        self.next_token();
        let expr = self.parse_expression(Precedence::Lowest)?;
        if !self.expect_peek(TokenKind::RParen) {
            return None;
        }
        Some(expr)
    }

    fn parse_if_expression(&mut self) -> Option<Expression> {
        if !self.expect_peek(TokenKind::LParen) {
            return None;
        }
        self.next_token();
        let condition = self.parse_expression(Precedence::Lowest)?;

        if !self.expect_peek(TokenKind::RParen) {
            return None;
        }
        if !self.expect_peek(TokenKind::LBrace) {
            return None;
        }
        let consequence = self.parse_block_statement();

        let alternative = if self.peek.kind == TokenKind::Else {
            self.next_token();
            if !self.expect_peek(TokenKind::LBrace) {
                return None;
            }
            Some(self.parse_block_statement())
        } else {
            None
        };

        Some(Expression::If {
            condition: Box::new(condition),
            consequence,
            alternative,
        })
    }

    fn parse_function_literal(&mut self) -> Option<Expression> {
        if !self.expect_peek(TokenKind::LParen) {
            return None;
        }
        let params = self.parse_function_params()?;
        if !self.expect_peek(TokenKind::LBrace) {
            return None;
        }
        let body = self.parse_block_statement();
        Some(Expression::FunctionLiteral { params, body })
    }

    fn parse_function_params(&mut self) -> Option<Vec<Identifier>> {
        let mut params = Vec::new();

        if self.peek.kind == TokenKind::RParen {
            self.next_token();
            return Some(params);
        }

        self.next_token();
        params.push(Identifier {
            name: self.cur.literal.clone(),
        });

        while self.peek.kind == TokenKind::Comma {
            self.next_token();
            self.next_token();
            params.push(Identifier {
                name: self.cur.literal.clone(),
            });
        }

        if !self.expect_peek(TokenKind::RParen) {
            return None;
        }
        Some(params)
    }

    /// Parses a `{ ... }` block. Terminates on `}` or `Eof` — never on `)`,
    /// which would wrongly let a block swallow tokens belonging to an
    /// enclosing call or grouped expression.
    fn parse_block_statement(&mut self) -> Block {
        let mut statements = Vec::new();
        self.next_token();

        while self.cur.kind != TokenKind::RBrace && self.cur.kind != TokenKind::Eof {
            if let Some(stmt) = self.parse_statement() {
                statements.push(stmt);
            }
            self.next_token();
        }

        Block { statements }
    }

    fn parse_call(&mut self, callee: Expression) -> Option<Expression> {
        let args = self.parse_expression_list(TokenKind::RParen)?;
        Some(Expression::Call {
            callee: Box::new(callee),
            args,
        })
    }

    fn parse_array_literal(&mut self) -> Option<Expression> {
        let elements = self.parse_expression_list(TokenKind::RBracket)?;
        Some(Expression::ArrayLiteral(elements))
    }

    fn parse_index(&mut self, left: Expression) -> Option<Expression> {
        self.next_token();
        let index = self.parse_expression(Precedence::Lowest)?;
        if !self.expect_peek(TokenKind::RBracket) {
            return None;
        }
        Some(Expression::Index {
            left: Box::new(left),
            index: Box::new(index),
        })
    }

    fn parse_hash_literal(&mut self) -> Option<Expression> {
        let mut pairs = Vec::new();

        while self.peek.kind != TokenKind::RBrace {
            self.next_token();
            let key = self.parse_expression(Precedence::Lowest)?;

            if !self.expect_peek(TokenKind::Colon) {
                return None;
            }
            self.next_token();
            let value = self.parse_expression(Precedence::Lowest)?;
            pairs.push((key, value));

            if self.peek.kind != TokenKind::RBrace && !self.expect_peek(TokenKind::Comma) {
                return None;
            }
        }

        if !self.expect_peek(TokenKind::RBrace) {
            return None;
        }
        Some(Expression::HashLiteral(pairs))
    }

    /// Parses a comma-separated expression list terminated by `end`,
    /// shared by call arguments and array literals.
    fn parse_expression_list(&mut self, end: TokenKind) -> Option<Vec<Expression>> {
        let mut list = Vec::new();

        if self.peek.kind == end {
            self.next_token();
            return Some(list);
        }

        self.next_token();
        list.push(self.parse_expression(Precedence::Lowest)?);

        while self.peek.kind == TokenKind::Comma {
            self.next_token();
            self.next_token();
            list.push(self.parse_expression(Precedence::Lowest)?);
        }

        if !self.expect_peek(end) {
            return None;
        }
        Some(list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Expression::*;

    fn parse(input: &str) -> (Program, Vec<String>) {
        let lexer = Lexer::new(input);
        let mut parser = Parser::new(lexer);
        let program = parser.parse_program();
        (program, parser.errors().to_vec())
    }

    #[test]
    fn let_statements() {
        let (program, errors) = parse("let x = 5; let y = true; let foobar = y;");
        assert!(errors.is_empty(), "{:?}", errors);
        assert_eq!(program.statements.len(), 3);
        match &program.statements[0] {
            Statement::Let { name, value } => {
                assert_eq!(name.name, "x");
                assert_eq!(*value, IntegerLiteral(5));
            }
            other => panic!("expected let, got {:?}", other),
        }
    }

    #[test]
    fn let_missing_assign_is_error() {
        let (_program, errors) = parse("let = 5;");
        assert_eq!(errors, vec!["expected next token IDENT, got ASSIGN"]);
    }

    #[test]
    fn return_statements() {
        let (program, errors) = parse("return 5; return true; return foobar;");
        assert!(errors.is_empty());
        assert_eq!(program.statements.len(), 3);
    }

    #[test]
    fn operator_precedence_round_trips_through_display() {
        let cases = [
            ("-a * b", "((-a) * b)"),
            ("a + b + c", "((a + b) + c)"),
            ("a + b - c", "((a + b) - c)"),
            ("a * b * c", "((a * b) * c)"),
            ("a + b * c + d / e - f", "(((a + (b * c)) + (d / e)) - f)"),
            ("3 + 4; -5 * 5", "(3 + 4)((-5) * 5)"),
            ("5 < 4 == 3 > 4", "((5 < 4) == (3 > 4))"),
            ("5 > 4 != 3 < 4", "((5 > 4) != (3 < 4))"),
            (
                "3 + 4 * 5 == 3 * 1 + 4 * 5",
                "((3 + (4 * 5)) == ((3 * 1) + (4 * 5)))",
            ),
            ("1 + (2 + 3) + 4", "((1 + (2 + 3)) + 4)"),
            ("(5 + 5) * 2", "((5 + 5) * 2)"),
            ("-(5 + 5)", "(-(5 + 5))"),
            ("!(true == true)", "(!(true == true))"),
            ("a + add(b * c) + d", "((a + add((b * c))) + d)"),
            (
                "add(a, b, 1, 2 * 3, 4 + 5, add(6, 7 * 8))",
                "add(a, b, 1, (2 * 3), (4 + 5), add(6, (7 * 8)))",
            ),
            ("a * [1, 2, 3, 4][b * c] * d", "((a * ([1,2,3,4][(b * c)])) * d)"),
        ];

        for (input, expected) in cases {
            let (program, errors) = parse(input);
            assert!(errors.is_empty(), "{}: {:?}", input, errors);
            assert_eq!(program.to_string(), expected, "input: {}", input);
        }
    }

    #[test]
    fn if_else_expression() {
        let (program, errors) = parse("if (x < y) { x } else { y }");
        assert!(errors.is_empty(), "{:?}", errors);
        assert_eq!(program.statements.len(), 1);
        match &program.statements[0] {
            Statement::Expression(If {
                consequence,
                alternative,
                ..
            }) => {
                assert_eq!(consequence.statements.len(), 1);
                assert!(alternative.is_some());
            }
            other => panic!("expected if expression, got {:?}", other),
        }
    }

    #[test]
    fn function_literal_parses() {
        let (program, errors) = parse("fn(x, y) { x + y; }");
        assert!(errors.is_empty(), "{:?}", errors);
        match &program.statements[0] {
            Statement::Expression(FunctionLiteral { params, body }) => {
                assert_eq!(params.len(), 2);
                assert_eq!(body.statements.len(), 1);
            }
            other => panic!("expected function literal, got {:?}", other),
        }
    }

    #[test]
    fn function_literal_with_no_params() {
        let (program, errors) = parse("fn() { 1; }");
        assert!(errors.is_empty(), "{:?}", errors);
        match &program.statements[0] {
            Statement::Expression(FunctionLiteral { params, .. }) => assert!(params.is_empty()),
            other => panic!("expected function literal, got {:?}", other),
        }
    }

    #[test]
    fn call_expression_parses() {
        let (program, errors) = parse("add(1, 2 * 3, 4 + 5);");
        assert!(errors.is_empty(), "{:?}", errors);
        match &program.statements[0] {
            Statement::Expression(Call { args, .. }) => assert_eq!(args.len(), 3),
            other => panic!("expected call, got {:?}", other),
        }
    }

    #[test]
    fn array_literal_parses() {
        let (program, errors) = parse("[1, 2 * 2, 3 + 3]");
        assert!(errors.is_empty(), "{:?}", errors);
        match &program.statements[0] {
            Statement::Expression(ArrayLiteral(elements)) => assert_eq!(elements.len(), 3),
            other => panic!("expected array literal, got {:?}", other),
        }
    }

    #[test]
    fn index_expression_parses() {
        let (program, errors) = parse("myArray[1 + 1]");
        assert!(errors.is_empty(), "{:?}", errors);
        match &program.statements[0] {
            Statement::Expression(Index { .. }) => {}
            other => panic!("expected index, got {:?}", other),
        }
    }

    #[test]
    fn hash_literal_parses() {
        let (program, errors) = parse(r#"{"one": 1, "two": 2, "three": 3}"#);
        assert!(errors.is_empty(), "{:?}", errors);
        match &program.statements[0] {
            Statement::Expression(HashLiteral(pairs)) => assert_eq!(pairs.len(), 3),
            other => panic!("expected hash literal, got {:?}", other),
        }
    }

    #[test]
    fn empty_hash_literal_parses() {
        let (program, errors) = parse("{}");
        assert!(errors.is_empty(), "{:?}", errors);
        match &program.statements[0] {
            Statement::Expression(HashLiteral(pairs)) => assert!(pairs.is_empty()),
            other => panic!("expected hash literal, got {:?}", other),
        }
    }

    #[test]
    fn block_terminates_on_closing_brace_not_paren() {
        // A block followed by more top-level statements must not swallow them.
        let (program, errors) = parse("if (true) { 1 } 2;");
        assert!(errors.is_empty(), "{:?}", errors);
        assert_eq!(program.statements.len(), 2);
    }

    #[test]
    fn function_literal_requires_parens_and_braces() {
        // A well-formed function literal must parse, not always error.
        let (_program, errors) = parse("fn(x) { return x; }");
        assert!(errors.is_empty(), "{:?}", errors);
    }
}
