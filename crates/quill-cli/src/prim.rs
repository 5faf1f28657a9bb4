//! Primitive operations.

use crate::error::EvalError;
use quill_ast::{PrimOp, Value};

fn type_error(op: PrimOp, msg: impl Into<String>) -> EvalError {
    EvalError::PrimitiveTypeError {
        op: op.keyword().to_string(),
        msg: msg.into(),
    }
}

fn arity(op: PrimOp, expected: &str, found: usize) -> EvalError {
    EvalError::ArityMismatch {
        name: op.keyword().to_string(),
        expected: expected.to_string(),
        found,
    }
}

fn exactly<const N: usize>(op: PrimOp, args: &[Value]) -> Result<&[Value; N], EvalError> {
    args.try_into()
        .map_err(|_| arity(op, &N.to_string(), args.len()))
}

fn number(op: PrimOp, v: &Value) -> Result<f64, EvalError> {
    match v {
        Value::Number(n) => Ok(*n),
        other => Err(type_error(
            op,
            format!("expected number, found {}", other.type_name()),
        )),
    }
}

fn numbers(op: PrimOp, args: &[Value]) -> Result<Vec<f64>, EvalError> {
    args.iter().map(|a| number(op, a)).collect()
}

fn boolean(op: PrimOp, v: &Value) -> Result<bool, EvalError> {
    match v {
        Value::Bool(b) => Ok(*b),
        other => Err(type_error(
            op,
            format!("expected boolean, found {}", other.type_name()),
        )),
    }
}

/// `eq?` on atoms; pairs and procedures other than primitives are never eq.
fn is_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x == y,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Str(x), Value::Str(y)) => x == y,
        (Value::Symbol(x), Value::Symbol(y)) => x == y,
        (Value::Empty, Value::Empty) => true,
        (Value::Prim(x), Value::Prim(y)) => x == y,
        _ => false,
    }
}

pub fn apply_primitive(op: PrimOp, args: &[Value]) -> Result<Value, EvalError> {
    use PrimOp::*;

    match op {
        Add => Ok(Value::Number(numbers(op, args)?.iter().sum())),
        Mul => Ok(Value::Number(numbers(op, args)?.iter().product())),
        Sub => match numbers(op, args)?.as_slice() {
            [] => Err(arity(op, "at least 1", 0)),
            [n] => Ok(Value::Number(-n)),
            [first, rest @ ..] => Ok(Value::Number(rest.iter().fold(*first, |acc, n| acc - n))),
        },
        Div => {
            let ns = numbers(op, args)?;
            let [first, rest @ ..] = ns.as_slice() else {
                return Err(arity(op, "at least 2", 0));
            };
            if rest.is_empty() {
                return Err(arity(op, "at least 2", 1));
            }
            if rest.iter().any(|d| *d == 0.0) {
                return Err(type_error(op, "division by zero"));
            }
            Ok(Value::Number(rest.iter().fold(*first, |acc, n| acc / n)))
        }

        Lt | Gt | NumEq => {
            let [a, b] = exactly::<2>(op, args)?;
            let (a, b) = (number(op, a)?, number(op, b)?);
            Ok(Value::Bool(match op {
                Lt => a < b,
                Gt => a > b,
                _ => a == b,
            }))
        }

        Not => {
            let [a] = exactly::<1>(op, args)?;
            Ok(Value::Bool(!a.is_true()))
        }
        And | Or => {
            let [a, b] = exactly::<2>(op, args)?;
            let (a, b) = (boolean(op, a)?, boolean(op, b)?);
            Ok(Value::Bool(if op == And { a && b } else { a || b }))
        }

        Eq => {
            let [a, b] = exactly::<2>(op, args)?;
            Ok(Value::Bool(is_eq(a, b)))
        }
        StringEq => match exactly::<2>(op, args)? {
            [Value::Str(a), Value::Str(b)] => Ok(Value::Bool(a == b)),
            _ => Err(type_error(op, "expected two strings")),
        },

        Cons => {
            let [a, b] = exactly::<2>(op, args)?;
            Ok(Value::cons(a.clone(), b.clone()))
        }
        Car | Cdr => match exactly::<1>(op, args)? {
            [Value::Pair(car, cdr)] => Ok(if op == Car { (**car).clone() } else { (**cdr).clone() }),
            [other] => Err(type_error(
                op,
                format!("expected pair, found {}", other.type_name()),
            )),
        },
        List => Ok(Value::list(args.to_vec())),

        IsPair | IsList | IsNumber | IsBoolean | IsSymbol | IsString => {
            let [a] = exactly::<1>(op, args)?;
            let answer = match op {
                IsPair => matches!(a, Value::Pair(..)),
                IsList => a.is_list(),
                IsNumber => matches!(a, Value::Number(_)),
                IsBoolean => matches!(a, Value::Bool(_)),
                IsSymbol => matches!(a, Value::Symbol(_)),
                _ => matches!(a, Value::Str(_)),
            };
            Ok(Value::Bool(answer))
        }
    }
}
