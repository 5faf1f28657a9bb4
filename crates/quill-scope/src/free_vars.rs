//! Queries over variable occurrences.

use quill_ast::Exp;
use std::collections::HashSet;

/// Does `v` occur free in `e`?
pub fn occurs_free(v: &str, e: &Exp) -> bool {
    match e {
        Exp::Var(name) => name == v,
        Exp::Num(_) | Exp::Bool(_) | Exp::Str(_) | Exp::Lit(_) | Exp::Prim(_) => false,
        Exp::If { test, then, alt } => {
            occurs_free(v, test) || occurs_free(v, then) || occurs_free(v, alt)
        }
        Exp::Proc { params, body } => {
            !params.iter().any(|p| p.name == v) && body.iter().any(|b| occurs_free(v, b))
        }
        Exp::App { rator, rands } => occurs_free(v, rator) || rands.iter().any(|r| occurs_free(v, r)),
        Exp::Let { bindings, body } => {
            bindings.iter().any(|b| occurs_free(v, &b.val))
                || (!bindings.iter().any(|b| b.var.name == v)
                    && body.iter().any(|b| occurs_free(v, b)))
        }
        Exp::Define { var, val } => var.name != v && occurs_free(v, val),
    }
}

/// Height of the tree; atoms have height 1.
pub fn height(e: &Exp) -> usize {
    1 + e.children().into_iter().map(height).max().unwrap_or(0)
}

/// Every name the tree mentions: references, parameters, let and define targets.
pub fn all_names(exps: &[Exp]) -> HashSet<String> {
    fn walk(e: &Exp, out: &mut HashSet<String>) {
        match e {
            Exp::Var(name) => {
                out.insert(name.clone());
            }
            Exp::Proc { params, .. } => out.extend(params.iter().map(|p| p.name.clone())),
            Exp::Let { bindings, .. } => out.extend(bindings.iter().map(|b| b.var.name.clone())),
            Exp::Define { var, .. } => {
                out.insert(var.name.clone());
            }
            _ => {}
        }
        for c in e.children() {
            walk(c, out);
        }
    }
    let mut out = HashSet::new();
    for e in exps {
        walk(e, &mut out);
    }
    out
}

/// Names declared by lambdas and lets, one entry per declaration.
pub fn bound_names(exps: &[Exp]) -> Vec<String> {
    fn walk(e: &Exp, out: &mut Vec<String>) {
        match e {
            Exp::Proc { params, .. } => out.extend(params.iter().map(|p| p.name.clone())),
            Exp::Let { bindings, .. } => out.extend(bindings.iter().map(|b| b.var.name.clone())),
            _ => {}
        }
        for c in e.children() {
            walk(c, out);
        }
    }
    let mut out = Vec::new();
    for e in exps {
        walk(e, &mut out);
    }
    out
}

/// Names referenced with no enclosing declaration.
pub fn free_names(exps: &[Exp]) -> HashSet<String> {
    fn walk(e: &Exp, bound: &mut Vec<String>, out: &mut HashSet<String>) {
        match e {
            Exp::Var(name) => {
                if !bound.contains(name) {
                    out.insert(name.clone());
                }
            }
            Exp::Proc { params, body } => {
                let mark = bound.len();
                bound.extend(params.iter().map(|p| p.name.clone()));
                for b in body {
                    walk(b, bound, out);
                }
                bound.truncate(mark);
            }
            Exp::Let { bindings, body } => {
                for b in bindings {
                    walk(&b.val, bound, out);
                }
                let mark = bound.len();
                bound.extend(bindings.iter().map(|b| b.var.name.clone()));
                for b in body {
                    walk(b, bound, out);
                }
                bound.truncate(mark);
            }
            other => {
                for c in other.children() {
                    walk(c, bound, out);
                }
            }
        }
    }
    let mut out = HashSet::new();
    for e in exps {
        walk(e, &mut Vec::new(), &mut out);
    }
    out
}
