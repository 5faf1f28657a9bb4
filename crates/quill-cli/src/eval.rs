//! Evaluator for Quill programs
//!
//! Applicative-order tree walker. Closures capture no environment: a call
//! renames the closure's bound variables, substitutes the argument values
//! into its body and evaluates the result. The environment only carries
//! top-level `define` bindings.

use quill_ast::{Closure, Exp, Program, Value};
use quill_scope::free_vars::all_names;
use quill_scope::{rename_exprs_with, substitute, VarGen};

use crate::env::Env;
use crate::error::EvalError;
use crate::prim::apply_primitive;

/// Evaluate a whole program in an empty environment.
pub fn eval_program(p: &Program) -> Result<Value, EvalError> {
    eval_sequence(&p.exps, &Env::empty())
}

/// Evaluate `exps` left to right and return the last value.
///
/// A leading `define` extends the environment seen by the rest of the
/// sequence. Values of other non-final expressions are discarded.
pub fn eval_sequence(exps: &[Exp], env: &Env) -> Result<Value, EvalError> {
    let mut env = env.clone();
    let mut rest = exps;
    loop {
        match rest {
            [] => return Err(EvalError::EmptySequence),
            [Exp::Define { var, val }, tail @ ..] => {
                let rhs = eval_exp(val, &env)?;
                tracing::trace!(name = %var.name, value = %rhs, "define");
                env = env.extend(var.name.clone(), rhs);
                rest = tail;
            }
            [last] => return eval_exp(last, &env),
            [first, tail @ ..] => {
                eval_exp(first, &env)?;
                rest = tail;
            }
        }
    }
}

/// Evaluate one expression
pub fn eval_exp(exp: &Exp, env: &Env) -> Result<Value, EvalError> {
    match exp {
        // Literals
        Exp::Num(n) => Ok(Value::Number(*n)),
        Exp::Bool(b) => Ok(Value::Bool(*b)),
        Exp::Str(s) => Ok(Value::Str(s.clone())),
        Exp::Lit(v) => Ok(v.clone()),
        Exp::Prim(op) => Ok(Value::Prim(*op)),

        Exp::Var(name) => env.lookup(name),

        Exp::If { test, then, alt } => {
            if eval_exp(test, env)?.is_true() {
                eval_exp(then, env)
            } else {
                eval_exp(alt, env)
            }
        }

        Exp::Proc { params, body } => Ok(Value::Closure(Closure {
            params: params.clone(),
            body: body.clone(),
        })),

        Exp::App { rator, rands } => {
            let proc = eval_exp(rator, env)?;
            let args = rands
                .iter()
                .map(|r| eval_exp(r, env))
                .collect::<Result<Vec<_>, _>>()?;
            apply_procedure(proc, args, env)
        }

        Exp::Let { .. } => Err(EvalError::MalformedExpression {
            msg: "let must be rewritten before evaluation".to_string(),
        }),
        Exp::Define { var, .. } => Err(EvalError::MalformedExpression {
            msg: format!("define of '{}' outside a sequence", var.name),
        }),
    }
}

fn apply_procedure(proc: Value, args: Vec<Value>, env: &Env) -> Result<Value, EvalError> {
    match proc {
        Value::Prim(op) => apply_primitive(op, &args),
        Value::Closure(c) => apply_closure(&c, args, env),
        other => Err(EvalError::NotAProcedure {
            value: other.to_string(),
        }),
    }
}

fn apply_closure(c: &Closure, args: Vec<Value>, env: &Env) -> Result<Value, EvalError> {
    if c.params.len() != args.len() {
        return Err(EvalError::ArityMismatch {
            name: Value::Closure(c.clone()).to_string(),
            expected: c.params.len().to_string(),
            found: args.len(),
        });
    }

    let lits: Vec<Exp> = args.into_iter().map(value_to_lit_exp).collect();

    // Fresh names must also avoid anything free in the arguments.
    let mut gen = VarGen::new();
    gen.reserve(all_names(&lits));
    let proc = Exp::Proc {
        params: c.params.clone(),
        body: c.body.clone(),
    };
    let Some(Exp::Proc { params, body }) = rename_exprs_with(&[proc], &mut gen).pop() else {
        return Err(EvalError::MalformedExpression {
            msg: "renaming did not produce a procedure".to_string(),
        });
    };

    let vars: Vec<String> = params.into_iter().map(|p| p.name).collect();
    tracing::debug!(arity = vars.len(), params = ?vars, "apply closure");
    eval_sequence(&substitute(&body, &vars, &lits), env)
}

/// The expression that evaluates to `v`.
pub fn value_to_lit_exp(v: Value) -> Exp {
    match v {
        Value::Number(n) => Exp::Num(n),
        Value::Bool(b) => Exp::Bool(b),
        Value::Str(s) => Exp::Str(s),
        Value::Prim(op) => Exp::Prim(op),
        Value::Closure(Closure { params, body }) => Exp::Proc { params, body },
        other => Exp::Lit(other),
    }
}
