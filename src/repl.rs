//! The read-eval-print driver.
//!
//! It reads one line of text at a time, pipes it through the
//! lexer/parser/evaluator pipeline, and prints [`Value::inspect`]. It
//! carries no language semantics of its own — a parse error suppresses
//! evaluation for that line, and a persistent [`Environment`] is threaded
//! across lines so `let` bindings accumulate the way a real session
//! expects.
//!
//! # See Also
//!
//! * [`crate::lexer`], [`crate::parser`], [`crate::eval`] — the pipeline driven here

use crate::eval::eval_program;
use crate::lexer::Lexer;
use crate::object::{Environment, Value};
use crate::parser::Parser;
use std::io::{BufRead, Write};

const PROMPT: &str = ">>";

/// Runs the REPL loop over `input`/`output` until `input` is exhausted.
///
/// Each line is parsed independently, but evaluation shares one
/// environment across the whole session — this is what lets a later line
/// reference a `let` binding from an earlier one.
pub fn run(mut input: impl BufRead, mut output: impl Write) -> std::io::Result<()> {
    let env = Environment::new();
    let mut line = String::new();

    loop {
        write!(output, "{} ", PROMPT)?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Ok(());
        }

        let lexer = Lexer::new(&line);
        let mut parser = Parser::new(lexer);
        let program = parser.parse_program();

        if !parser.errors().is_empty() {
            for message in parser.errors() {
                writeln!(output, "\t{}", message)?;
            }
            continue;
        }

        let result = eval_program(&program, &env);
        if !matches!(result, Value::Null) {
            writeln!(output, "{}", result.inspect())?;
        }
    }
}
