//! The tree-walking evaluator.
//!
//! [`eval_program`] is the only entry point external callers need — it
//! dispatches on AST node variant and threads error propagation through
//! every composite evaluation: after each sub-evaluation, check
//! [`crate::object::Value::is_error`] and short-circuit with it.
//!
//! The one subtlety worth naming: a *program* unwraps a `ReturnValue` into
//! its inner value (that's what makes `return` at the top level behave
//! like a plain expression result), while a *block* propagates
//! `ReturnValue` unopened, so nested `return`s bubble all the way out to
//! the function call boundary that should unwrap them. Get this backwards
//! and `return` nested one level inside an `if` stops exiting the
//! enclosing function early.
//!
//! # See Also
//!
//! * [`crate::ast`] — the node types walked here
//! * [`crate::object`] — the [`Value`] and [`Environment`] produced/used here

use crate::ast::{Block, Expression, Identifier, Program, Statement};
use crate::object::{builtins, Environment, HashKey, HashPair, Value};
use std::cell::RefCell;
use std::rc::Rc;

type Env = Rc<RefCell<Environment>>;

/// Evaluates a whole program. Unwraps a top-level `return` into its inner
/// value and never hands back a `ReturnValue`.
pub fn eval_program(program: &Program, env: &Env) -> Value {
    let mut result = Value::Null;
    for stmt in &program.statements {
        result = eval_statement(stmt, env);
        match result {
            Value::ReturnValue(inner) => return *inner,
            Value::Error(_) => return result,
            _ => {}
        }
    }
    result
}

/// Evaluates a block, propagating `ReturnValue` and `Error` *without*
/// unwrapping — only [`eval_program`] and function application unwrap a
/// `ReturnValue`.
fn eval_block(block: &Block, env: &Env) -> Value {
    let mut result = Value::Null;
    for stmt in &block.statements {
        result = eval_statement(stmt, env);
        if matches!(result, Value::ReturnValue(_) | Value::Error(_)) {
            return result;
        }
    }
    result
}

fn eval_statement(stmt: &Statement, env: &Env) -> Value {
    match stmt {
        Statement::Let { name, value } => {
            let value = eval_expression(value, env);
            if value.is_error() {
                return value;
            }
            env.borrow_mut().set(name.name.clone(), value);
            Value::Null
        }
        Statement::Return { value } => {
            let value = eval_expression(value, env);
            if value.is_error() {
                return value;
            }
            Value::ReturnValue(Box::new(value))
        }
        Statement::Expression(expr) => eval_expression(expr, env),
    }
}

fn eval_expression(expr: &Expression, env: &Env) -> Value {
    match expr {
        Expression::IntegerLiteral(value) => Value::Integer(*value),
        Expression::StringLiteral(value) => Value::String(value.clone()),
        Expression::BooleanLiteral(value) => Value::Boolean(*value),
        Expression::Identifier(ident) => eval_identifier(ident, env),
        Expression::Prefix { operator, right } => {
            let right = eval_expression(right, env);
            if right.is_error() {
                return right;
            }
            eval_prefix_expression(operator, right)
        }
        Expression::Infix {
            operator,
            left,
            right,
        } => {
            let left = eval_expression(left, env);
            if left.is_error() {
                return left;
            }
            let right = eval_expression(right, env);
            if right.is_error() {
                return right;
            }
            eval_infix_expression(operator, left, right)
        }
        Expression::If {
            condition,
            consequence,
            alternative,
        } => eval_if_expression(condition, consequence, alternative.as_ref(), env),
        Expression::FunctionLiteral { params, body } => Value::Function {
            params: params.clone(),
            body: body.clone(),
            env: env.clone(),
        },
        Expression::Call { callee, args } => {
            let function = eval_expression(callee, env);
            if function.is_error() {
                return function;
            }
            let args = match eval_expressions(args, env) {
                Ok(args) => args,
                Err(err) => return err,
            };
            apply_function(function, &args)
        }
        Expression::ArrayLiteral(elements) => match eval_expressions(elements, env) {
            Ok(elements) => Value::Array(elements),
            Err(err) => err,
        },
        Expression::Index { left, index } => {
            let left = eval_expression(left, env);
            if left.is_error() {
                return left;
            }
            let index = eval_expression(index, env);
            if index.is_error() {
                return index;
            }
            eval_index_expression(left, index)
        }
        Expression::HashLiteral(pairs) => eval_hash_literal(pairs, env),
    }
}

fn eval_identifier(ident: &Identifier, env: &Env) -> Value {
    if let Some(value) = env.borrow().get(&ident.name) {
        return value;
    }
    if let Some(builtin) = builtins().get(ident.name.as_str()) {
        return builtin.clone();
    }
    Value::error(format!("identifier not found {}", ident.name))
}

/// Evaluates argument expressions left to right; if any produces an
/// `Error`, evaluation stops there and that error is returned (later
/// arguments are never evaluated).
fn eval_expressions(exprs: &[Expression], env: &Env) -> Result<Vec<Value>, Value> {
    let mut values = Vec::with_capacity(exprs.len());
    for expr in exprs {
        let value = eval_expression(expr, env);
        if value.is_error() {
            return Err(value);
        }
        values.push(value);
    }
    Ok(values)
}

fn eval_prefix_expression(operator: &str, right: Value) -> Value {
    match operator {
        "!" => Value::Boolean(!right.is_truthy()),
        "-" => match right {
            Value::Integer(i) => Value::Integer(i.wrapping_neg()),
            other => Value::error(format!("Unknown operator -{}", other.type_name())),
        },
        op => Value::error(format!("Unknown operator {}{}", op, right.type_name())),
    }
}

fn eval_infix_expression(operator: &str, left: Value, right: Value) -> Value {
    match (&left, &right) {
        (Value::Integer(l), Value::Integer(r)) => eval_integer_infix(operator, *l, *r),
        (Value::String(l), Value::String(r)) => eval_string_infix(operator, l, r),
        _ if operator == "==" => Value::Boolean(values_identical(&left, &right)),
        _ if operator == "!=" => Value::Boolean(!values_identical(&left, &right)),
        _ if left.type_name() != right.type_name() => Value::error(format!(
            "Operands are not of the same type : {} {} {}",
            left.type_name(),
            operator,
            right.type_name()
        )),
        _ => Value::error(format!(
            "Unknown Operator: {} {} {}",
            left.type_name(),
            operator,
            right.type_name()
        )),
    }
}

fn eval_integer_infix(operator: &str, left: i64, right: i64) -> Value {
    match operator {
        "+" => Value::Integer(left.wrapping_add(right)),
        "-" => Value::Integer(left.wrapping_sub(right)),
        "*" => Value::Integer(left.wrapping_mul(right)),
        "/" => {
            if right == 0 {
                Value::error("division by zero")
            } else {
                Value::Integer(left.wrapping_div(right))
            }
        }
        "<" => Value::Boolean(left < right),
        ">" => Value::Boolean(left > right),
        "==" => Value::Boolean(left == right),
        "!=" => Value::Boolean(left != right),
        op => Value::error(format!("Unknown Operator: INTEGER {} INTEGER", op)),
    }
}

fn eval_string_infix(operator: &str, left: &str, right: &str) -> Value {
    match operator {
        "+" => Value::String(format!("{}{}", left, right)),
        op => Value::error(format!("Unknown Operator: STRING {} STRING", op)),
    }
}

/// The `==`/`!=` fallback for non-integer, non-string operands. `Boolean`
/// and `Null` are interned singletons conceptually, so comparing them
/// structurally *is* comparing them by identity — there is
/// never more than one distinct `true`, `false`, or `null`. Composite
/// kinds (arrays, hashes, functions) have no defined `==` here and simply
/// never compare equal via this fallback.
fn values_identical(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Boolean(l), Value::Boolean(r)) => l == r,
        (Value::Null, Value::Null) => true,
        _ => false,
    }
}

fn eval_if_expression(
    condition: &Expression,
    consequence: &Block,
    alternative: Option<&Block>,
    env: &Env,
) -> Value {
    let condition = eval_expression(condition, env);
    if condition.is_error() {
        return condition;
    }
    if condition.is_truthy() {
        eval_block(consequence, env)
    } else if let Some(alt) = alternative {
        eval_block(alt, env)
    } else {
        Value::Null
    }
}

fn apply_function(function: Value, args: &[Value]) -> Value {
    match function {
        Value::Function { params, body, env } => {
            if params.len() != args.len() {
                return Value::error(format!(
                    "wrong number of arguments: want {}, got {}",
                    params.len(),
                    args.len()
                ));
            }
            let call_env = Environment::enclosed(env);
            for (param, arg) in params.iter().zip(args.iter()) {
                call_env.borrow_mut().set(param.name.clone(), arg.clone());
            }
            let evaluated = eval_block(&body, &call_env);
            match evaluated {
                Value::ReturnValue(inner) => *inner,
                other => other,
            }
        }
        Value::Builtin(native) => native(args),
        other => Value::error(format!("not a function {}", other.type_name())),
    }
}

fn eval_index_expression(left: Value, index: Value) -> Value {
    match (&left, &index) {
        (Value::Array(elements), Value::Integer(idx)) => {
            let max = elements.len() as i64 - 1;
            if *idx < 0 || *idx > max {
                Value::error(format!("Out of bound Error: {} greater than {}", idx, max))
            } else {
                elements[*idx as usize].clone()
            }
        }
        (Value::Hash(pairs), _) => match HashKey::from_value(&index) {
            Some(key) => pairs
                .get(&key)
                .map(|pair| pair.value.clone())
                .unwrap_or(Value::Null),
            None => Value::error(format!("Cannot use as HashKey {}", index.type_name())),
        },
        _ => Value::error("index Operator not supported"),
    }
}

fn eval_hash_literal(pairs: &[(Expression, Expression)], env: &Env) -> Value {
    let mut map = std::collections::HashMap::new();
    for (key_expr, value_expr) in pairs {
        let key = eval_expression(key_expr, env);
        if key.is_error() {
            return key;
        }
        let value = eval_expression(value_expr, env);
        if value.is_error() {
            return value;
        }
        let hash_key = match HashKey::from_value(&key) {
            Some(hash_key) => hash_key,
            None => return Value::error(format!("Cannot use as HashKey {}", key.type_name())),
        };
        map.insert(hash_key, HashPair { key, value });
    }
    Value::Hash(map)
}
