//! Abstract syntax tree for the Lak language.
//!
//! Two closed families — [`Statement`] and [`Expression`] — plus a
//! [`Program`] root. Every variant implements [`std::fmt::Display`] with a
//! canonical textual form: prefix/infix expressions parenthesize
//! themselves so operator precedence survives the round trip through text.
//!
//! # See Also
//!
//! * [`crate::parser`] — builds these nodes
//! * [`crate::eval`] — walks these nodes to produce [`crate::object::Value`]s

use std::fmt;

/// An identifier expression, also reused as the binding name in `let` and
/// as a function parameter — both of those positions are always a bare
/// name, never an arbitrary expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub name: String,
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A `{ ... }` block: a list of statements, evaluated in order, whose
/// value for the purposes of `if`/function bodies is its last statement.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    pub statements: Vec<Statement>,
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stmt in &self.statements {
            write!(f, "{}", stmt)?;
        }
        Ok(())
    }
}

/// The closed set of statement forms.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Let { name: Identifier, value: Expression },
    Return { value: Expression },
    Expression(Expression),
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Let { name, value } => write!(f, "let {} = {};", name, value),
            Statement::Return { value } => write!(f, "return {};", value),
            Statement::Expression(expr) => write!(f, "{}", expr),
        }
    }
}

/// The closed set of expression forms.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Identifier(Identifier),
    IntegerLiteral(i64),
    StringLiteral(String),
    BooleanLiteral(bool),
    Prefix {
        operator: String,
        right: Box<Expression>,
    },
    Infix {
        operator: String,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    If {
        condition: Box<Expression>,
        consequence: Block,
        alternative: Option<Block>,
    },
    FunctionLiteral {
        params: Vec<Identifier>,
        body: Block,
    },
    Call {
        callee: Box<Expression>,
        args: Vec<Expression>,
    },
    ArrayLiteral(Vec<Expression>),
    Index {
        left: Box<Expression>,
        index: Box<Expression>,
    },
    HashLiteral(Vec<(Expression, Expression)>),
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Identifier(ident) => write!(f, "{}", ident),
            Expression::IntegerLiteral(value) => write!(f, "{}", value),
            Expression::StringLiteral(value) => write!(f, "{}", value),
            Expression::BooleanLiteral(value) => write!(f, "{}", value),
            Expression::Prefix { operator, right } => write!(f, "({}{})", operator, right),
            Expression::Infix {
                operator,
                left,
                right,
            } => write!(f, "({} {} {})", left, operator, right),
            Expression::If {
                condition,
                consequence,
                alternative,
            } => {
                write!(f, "if({}){}", condition, consequence)?;
                if let Some(alt) = alternative {
                    write!(f, "else{}", alt)?;
                }
                Ok(())
            }
            Expression::FunctionLiteral { params, body } => {
                let params = params
                    .iter()
                    .map(|p| p.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "fn({}){{ {} }}", params, body)
            }
            Expression::Call { callee, args } => {
                let args = args
                    .iter()
                    .map(|a| a.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "{}({})", callee, args)
            }
            Expression::ArrayLiteral(elements) => {
                let elements = elements
                    .iter()
                    .map(|e| e.to_string())
                    .collect::<Vec<_>>()
                    .join(",");
                write!(f, "[{}]", elements)
            }
            Expression::Index { left, index } => write!(f, "({}[{}])", left, index),
            Expression::HashLiteral(pairs) => {
                let pairs = pairs
                    .iter()
                    .map(|(k, v)| format!("{}:{}", k, v))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "{{{}}}", pairs)
            }
        }
    }
}

/// The root of a parsed program: a non-null (possibly empty) list of
/// statements.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub statements: Vec<Statement>,
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stmt in &self.statements {
            write!(f, "{}", stmt)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_and_infix_parenthesize() {
        let expr = Expression::Prefix {
            operator: "-".into(),
            right: Box::new(Expression::Identifier(Identifier { name: "a".into() })),
        };
        assert_eq!(expr.to_string(), "(-a)");

        let expr = Expression::Infix {
            operator: "+".into(),
            left: Box::new(Expression::Identifier(Identifier { name: "a".into() })),
            right: Box::new(Expression::Identifier(Identifier { name: "b".into() })),
        };
        assert_eq!(expr.to_string(), "(a + b)");
    }

    #[test]
    fn let_statement_display() {
        let stmt = Statement::Let {
            name: Identifier { name: "x".into() },
            value: Expression::IntegerLiteral(5),
        };
        assert_eq!(stmt.to_string(), "let x = 5;");
    }

    #[test]
    fn if_expression_display() {
        let expr = Expression::If {
            condition: Box::new(Expression::BooleanLiteral(true)),
            consequence: Block {
                statements: vec![Statement::Expression(Expression::IntegerLiteral(1))],
            },
            alternative: Some(Block {
                statements: vec![Statement::Expression(Expression::IntegerLiteral(2))],
            }),
        };
        assert_eq!(expr.to_string(), "if(true)1else2");
    }
}
