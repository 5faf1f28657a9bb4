// Concrete syntax for expressions and programs.

use crate::ast::{Exp, Program};
use crate::value::Value;
use std::fmt;

/// A string literal the lexer reads back as `s`.
pub(crate) fn write_str_literal(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    write!(f, "\"")?;
    for c in s.chars() {
        match c {
            '"' => write!(f, "\\\"")?,
            '\\' => write!(f, "\\\\")?,
            '\n' => write!(f, "\\n")?,
            '\t' => write!(f, "\\t")?,
            c => write!(f, "{c}")?,
        }
    }
    write!(f, "\"")
}

fn write_seq(f: &mut fmt::Formatter<'_>, exps: &[Exp]) -> fmt::Result {
    for (i, e) in exps.iter().enumerate() {
        if i > 0 {
            write!(f, " ")?;
        }
        write!(f, "{}", e)?;
    }
    Ok(())
}

impl fmt::Display for Exp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Exp::Num(n) => write!(f, "{n}"),
            Exp::Bool(true) => write!(f, "#t"),
            Exp::Bool(false) => write!(f, "#f"),
            Exp::Str(s) => write_str_literal(f, s),
            Exp::Var(name) => write!(f, "{name}"),
            // Data that would read back as code needs a quote
            Exp::Lit(v @ (Value::Symbol(_) | Value::Empty | Value::Pair(..))) => write!(f, "'{v}"),
            Exp::Lit(v) => write!(f, "{v}"),
            Exp::Prim(op) => write!(f, "{}", op.keyword()),
            Exp::If { test, then, alt } => write!(f, "(if {test} {then} {alt})"),
            Exp::Proc { params, body } => {
                let names: Vec<&str> = params.iter().map(|p| p.name.as_str()).collect();
                write!(f, "(lambda ({}) ", names.join(" "))?;
                write_seq(f, body)?;
                write!(f, ")")
            }
            Exp::App { rator, rands } => {
                write!(f, "({rator}")?;
                for r in rands {
                    write!(f, " {r}")?;
                }
                write!(f, ")")
            }
            Exp::Let { bindings, body } => {
                write!(f, "(let (")?;
                for (i, b) in bindings.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "({} {})", b.var.name, b.val)?;
                }
                write!(f, ") ")?;
                write_seq(f, body)?;
                write!(f, ")")
            }
            Exp::Define { var, val } => write!(f, "(define {} {val})", var.name),
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.exps.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", e)?;
        }
        Ok(())
    }
}
