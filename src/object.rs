//! Runtime value model for the Lak language.
//!
//! [`Value`] is the closed set of things evaluation produces. [`HashKey`]
//! is a canonical projection used as the key type of a runtime [`Value::Hash`]
//! — it can only be constructed from the hashable value kinds
//! (`Integer`/`Boolean`/`String`), so attempting to key a hash with an
//! array or function is a compile-time impossibility to misuse and a
//! runtime error to attempt (see [`HashKey::from_value`]).
//!
//! [`Environment`] is a chain of lexical scopes, shared by reference
//! (`Rc<RefCell<_>>`) so a [`Value::Function`] can keep its defining scope
//! alive after the `fn` literal that created it goes out of scope.
//!
//! # See Also
//!
//! * [`crate::eval`] — produces and consumes these values
//! * [`crate::ast`] — `Function` stores a `Block`/params from this module

use crate::ast::{Block, Identifier};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use std::sync::OnceLock;

/// A canonical, equality-comparable projection of a hashable value.
///
/// Two values produce the same `HashKey` iff they are of the same kind and
/// carry the same payload, expressed as an ordinary derived `Eq`/`Hash` on
/// a closed enum.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HashKey {
    Integer(i64),
    Boolean(bool),
    String(String),
}

impl HashKey {
    /// Projects a [`Value`] to a [`HashKey`], or `None` if the value's kind
    /// isn't hashable (anything but `Integer`/`Boolean`/`String`).
    pub fn from_value(value: &Value) -> Option<HashKey> {
        match value {
            Value::Integer(i) => Some(HashKey::Integer(*i)),
            Value::Boolean(b) => Some(HashKey::Boolean(*b)),
            Value::String(s) => Some(HashKey::String(s.clone())),
            _ => None,
        }
    }
}

/// A hash entry: the original key value (for `inspect`) alongside the
/// value it maps to. The map itself is keyed by [`HashKey`], not by this
/// struct, so lookups don't need to re-derive a `HashKey` from a stored
/// `Value`.
#[derive(Debug, Clone)]
pub struct HashPair {
    pub key: Value,
    pub value: Value,
}

/// The signature of a builtin's native implementation.
pub type BuiltinFn = fn(&[Value]) -> Value;

/// The closed set of runtime values.
///
/// `ReturnValue` and `Error` are internal propagation markers — an
/// invariant upheld by [`crate::eval`] is that neither ever ends up inside
/// an `Array`, a `Hash`, or as the final value the top-level evaluator
/// hands back.
#[derive(Debug, Clone)]
pub enum Value {
    Integer(i64),
    Boolean(bool),
    String(String),
    Null,
    Array(Vec<Value>),
    Hash(HashMap<HashKey, HashPair>),
    Function {
        params: Vec<Identifier>,
        body: Block,
        env: Rc<RefCell<Environment>>,
    },
    Builtin(BuiltinFn),
    ReturnValue(Box<Value>),
    Error(String),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "INTEGER",
            Value::Boolean(_) => "BOOLEAN",
            Value::String(_) => "STRING",
            Value::Null => "NULL",
            Value::Array(_) => "ARRAY",
            Value::Hash(_) => "HASH",
            Value::Function { .. } => "FUNCTION",
            Value::Builtin(_) => "BUILTIN",
            Value::ReturnValue(_) => "RETURN_VALUE",
            Value::Error(_) => "ERROR",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    /// Only `false` and `null` are falsy; every other value — including
    /// `0`, `""`, and `[]` — is truthy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Boolean(false) | Value::Null)
    }

    pub fn error(message: impl Into<String>) -> Value {
        Value::Error(message.into())
    }

    /// Canonical textual form used by REPL display and by this crate's
    /// own golden-output tests.
    pub fn inspect(&self) -> String {
        match self {
            Value::Integer(i) => i.to_string(),
            Value::Boolean(b) => b.to_string(),
            Value::String(s) => s.clone(),
            Value::Null => "null".to_string(),
            Value::Array(elements) => {
                let elements = elements
                    .iter()
                    .map(|e| e.inspect())
                    .collect::<Vec<_>>()
                    .join(",");
                format!("[{}]", elements)
            }
            Value::Hash(pairs) => {
                let pairs = pairs
                    .values()
                    .map(|pair| format!("{}:{}", pair.key.inspect(), pair.value.inspect()))
                    .collect::<Vec<_>>()
                    .join(",");
                format!("{{{}}}", pairs)
            }
            Value::Function { params, body, .. } => {
                let params = params
                    .iter()
                    .map(|p| p.name.clone())
                    .collect::<Vec<_>>()
                    .join(",");
                format!("fn({}){{ {} }}", params, body)
            }
            Value::Builtin(_) => "builtin function".to_string(),
            Value::ReturnValue(inner) => inner.inspect(),
            Value::Error(message) => format!("Error: {}", message),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inspect())
    }
}

/// A frame mapping names to values, optionally chained to an outer frame.
///
/// Lookup walks the `outer` chain; insertion (`set`) always writes to the
/// innermost frame — `let` never reaches through to shadow an outer
/// binding, it only ever creates or overwrites one in the current scope.
#[derive(Debug, Default)]
pub struct Environment {
    store: HashMap<String, Value>,
    outer: Option<Rc<RefCell<Environment>>>,
}

impl Environment {
    pub fn new() -> Rc<RefCell<Environment>> {
        Rc::new(RefCell::new(Environment {
            store: HashMap::new(),
            outer: None,
        }))
    }

    /// Creates a new scope enclosed over `outer` — used both for block-less
    /// nested scoping points and, critically, for function calls: the new
    /// frame's `outer` is the function's *captured* environment, never the
    /// caller's, which is what makes closures and recursion both work.
    pub fn enclosed(outer: Rc<RefCell<Environment>>) -> Rc<RefCell<Environment>> {
        Rc::new(RefCell::new(Environment {
            store: HashMap::new(),
            outer: Some(outer),
        }))
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.store.get(name) {
            return Some(value.clone());
        }
        self.outer.as_ref().and_then(|outer| outer.borrow().get(name))
    }

    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.store.insert(name.into(), value);
    }
}

/// The process-wide builtin registry, initialized once and never mutated
/// by user code — identifier lookup consults it only after the lexical
/// environment chain misses.
pub fn builtins() -> &'static HashMap<&'static str, Value> {
    static BUILTINS: OnceLock<HashMap<&'static str, Value>> = OnceLock::new();
    BUILTINS.get_or_init(|| {
        let mut map: HashMap<&'static str, Value> = HashMap::new();
        map.insert("len", Value::Builtin(builtin_len));
        map.insert("first", Value::Builtin(builtin_first));
        map.insert("last", Value::Builtin(builtin_last));
        map.insert("rest", Value::Builtin(builtin_rest));
        map.insert("push", Value::Builtin(builtin_push));
        map.insert("print", Value::Builtin(builtin_print));
        map
    })
}

fn wrong_arity(want: usize, got: usize) -> Value {
    Value::error(format!("Wrong Number of args, want {}, got {}", want, got))
}

fn unsupported(name: &str, got: &Value) -> Value {
    Value::error(format!(
        "argument to '{}' not supported, got {}",
        name,
        got.type_name()
    ))
}

fn builtin_len(args: &[Value]) -> Value {
    if args.len() != 1 {
        return wrong_arity(1, args.len());
    }
    match &args[0] {
        Value::String(s) => Value::Integer(s.len() as i64),
        Value::Array(elements) => Value::Integer(elements.len() as i64),
        other => unsupported("len", other),
    }
}

fn builtin_first(args: &[Value]) -> Value {
    if args.len() != 1 {
        return wrong_arity(1, args.len());
    }
    match &args[0] {
        Value::Array(elements) => match elements.first() {
            Some(value) => value.clone(),
            None => unsupported("first", &Value::Array(Vec::new())),
        },
        other => unsupported("first", other),
    }
}

fn builtin_last(args: &[Value]) -> Value {
    if args.len() != 1 {
        return wrong_arity(1, args.len());
    }
    match &args[0] {
        Value::Array(elements) => match elements.last() {
            Some(value) => value.clone(),
            None => unsupported("last", &Value::Array(Vec::new())),
        },
        other => unsupported("last", other),
    }
}

fn builtin_rest(args: &[Value]) -> Value {
    if args.len() != 1 {
        return wrong_arity(1, args.len());
    }
    match &args[0] {
        Value::Array(elements) => {
            if elements.is_empty() {
                return unsupported("rest", &Value::Array(Vec::new()));
            }
            Value::Array(elements[1..].to_vec())
        }
        other => unsupported("rest", other),
    }
}

fn builtin_push(args: &[Value]) -> Value {
    if args.len() != 2 {
        return wrong_arity(2, args.len());
    }
    match &args[0] {
        Value::Array(elements) => {
            let mut new_elements = elements.clone();
            new_elements.push(args[1].clone());
            Value::Array(new_elements)
        }
        other => unsupported("push", other),
    }
}

fn builtin_print(args: &[Value]) -> Value {
    for arg in args {
        println!("{}", arg.inspect());
    }
    Value::Null
}
