//! Consistent renaming of bound variables.

use crate::free_vars::all_names;
use crate::substitute::substitute;
use quill_ast::{Binding, Exp, VarDecl};
use std::collections::HashSet;

/// Generator of fresh names of the form `name__N`.
///
/// One generator belongs to one renaming call. The counter and the set of
/// reserved names live here, so independent evaluations never share state.
#[derive(Debug, Clone)]
pub struct VarGen {
    next: usize,
    reserved: HashSet<String>,
}

impl Default for VarGen {
    fn default() -> Self {
        Self::new()
    }
}

impl VarGen {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    pub fn starting_at(start: usize) -> Self {
        Self {
            next: start,
            reserved: HashSet::new(),
        }
    }

    /// Mark names that generated names must never collide with.
    pub fn reserve<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reserved.extend(names.into_iter().map(Into::into));
    }

    pub fn fresh(&mut self, base: &str) -> String {
        loop {
            let candidate = format!("{}__{}", base, self.next);
            self.next += 1;
            if self.reserved.insert(candidate.clone()) {
                return candidate;
            }
        }
    }
}

/// Rename every bound variable in `exps` to a fresh name, numbering from 1.
///
/// Free variables are left alone. Names already present anywhere in `exps`
/// are reserved, so no generated name can coincide with a free reference.
pub fn rename_exprs(exps: &[Exp]) -> Vec<Exp> {
    let mut gen = VarGen::new();
    rename_exprs_with(exps, &mut gen)
}

/// Like [`rename_exprs`], drawing names from a caller-owned generator.
pub fn rename_exprs_with(exps: &[Exp], gen: &mut VarGen) -> Vec<Exp> {
    gen.reserve(all_names(exps));
    exps.iter().map(|e| rename(e, gen)).collect()
}

fn rename(e: &Exp, gen: &mut VarGen) -> Exp {
    match e {
        Exp::Proc { params, body } => {
            // Inner binders first: once they are unique, substituting the
            // outer parameters below cannot be captured by them.
            let body: Vec<Exp> = body.iter().map(|b| rename(b, gen)).collect();
            let (decls, body) = rebind(params, &body, gen);
            tracing::trace!(params = ?decls.iter().map(|d| &d.name).collect::<Vec<_>>(), "renamed contour");
            Exp::Proc {
                params: decls,
                body,
            }
        }
        Exp::Let { bindings, body } => {
            let vals: Vec<Exp> = bindings.iter().map(|b| rename(&b.val, gen)).collect();
            let body: Vec<Exp> = body.iter().map(|b| rename(b, gen)).collect();
            let old: Vec<VarDecl> = bindings.iter().map(|b| b.var.clone()).collect();
            let (decls, body) = rebind(&old, &body, gen);
            Exp::Let {
                bindings: decls
                    .into_iter()
                    .zip(vals)
                    .map(|(var, val)| Binding { var, val })
                    .collect(),
                body,
            }
        }
        other => other.map_children(|c| rename(c, gen)),
    }
}

/// Give each of `params` a fresh name and rewrite `body` to use it.
fn rebind(params: &[VarDecl], body: &[Exp], gen: &mut VarGen) -> (Vec<VarDecl>, Vec<Exp>) {
    let old: Vec<String> = params.iter().map(|p| p.name.clone()).collect();
    let new: Vec<String> = old.iter().map(|n| gen.fresh(n)).collect();
    let refs: Vec<Exp> = new.iter().map(|n| Exp::Var(n.clone())).collect();
    let body = substitute(body, &old, &refs);
    (new.into_iter().map(VarDecl::new).collect(), body)
}
