//! Runtime values.

use crate::ast::{Exp, PrimOp, VarDecl};
use serde::Serialize;

/// A procedure value. It holds no environment: free references in `body`
/// are resolved at call time after renaming and substitution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Closure {
    pub params: Vec<VarDecl>,
    pub body: Vec<Exp>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Value {
    Number(f64),
    Bool(bool),
    Str(String),
    Symbol(String),
    /// The empty list `'()`
    Empty,
    Pair(Box<Value>, Box<Value>),
    Prim(PrimOp),
    Closure(Closure),
}

impl Value {
    /// Build a proper list from `items`.
    pub fn list(items: Vec<Value>) -> Value {
        items
            .into_iter()
            .rev()
            .fold(Value::Empty, |tail, head| Value::cons(head, tail))
    }

    pub fn cons(car: Value, cdr: Value) -> Value {
        Value::Pair(Box::new(car), Box::new(cdr))
    }

    pub fn symbol(name: impl Into<String>) -> Value {
        Value::Symbol(name.into())
    }

    /// Every value except `#f` counts as true.
    pub fn is_true(&self) -> bool {
        !matches!(self, Value::Bool(false))
    }

    /// True for `'()` and for pair chains ending in `'()`.
    pub fn is_list(&self) -> bool {
        let mut cur = self;
        loop {
            match cur {
                Value::Empty => return true,
                Value::Pair(_, cdr) => cur = cdr.as_ref(),
                _ => return false,
            }
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Bool(_) => "boolean",
            Value::Str(_) => "string",
            Value::Symbol(_) => "symbol",
            Value::Empty => "empty list",
            Value::Pair(..) => "pair",
            Value::Prim(_) => "primitive",
            Value::Closure(_) => "procedure",
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{n}"),
            Value::Bool(true) => write!(f, "#t"),
            Value::Bool(false) => write!(f, "#f"),
            Value::Str(s) => crate::unparse::write_str_literal(f, s),
            Value::Symbol(s) => write!(f, "{s}"),
            Value::Empty => write!(f, "()"),
            Value::Pair(car, cdr) => {
                write!(f, "({}", car)?;
                let mut rest = cdr.as_ref();
                loop {
                    match rest {
                        Value::Pair(a, d) => {
                            write!(f, " {}", a)?;
                            rest = d.as_ref();
                        }
                        Value::Empty => break,
                        other => {
                            write!(f, " . {}", other)?;
                            break;
                        }
                    }
                }
                write!(f, ")")
            }
            Value::Prim(op) => write!(f, "{}", op.keyword()),
            Value::Closure(c) => {
                let names: Vec<&str> = c.params.iter().map(|p| p.name.as_str()).collect();
                write!(f, "#<procedure ({})>", names.join(" "))
            }
        }
    }
}
