use quill_ast::{Binding, Exp, VarDecl};

/// Replace free occurrences of `vars[i]` in `body` with `replacements[i]`.
///
/// Parameters of a nested lambda (or names bound by a nested `let`) shadow
/// the substitution below that binder. This is NOT capture-avoiding: a
/// replacement with a free name equal to a nested binder would be captured.
/// Call it only on trees whose bound names were made unique by
/// [`rename_exprs`](crate::rename_exprs).
pub fn substitute(body: &[Exp], vars: &[String], replacements: &[Exp]) -> Vec<Exp> {
    debug_assert_eq!(
        vars.len(),
        replacements.len(),
        "substitute: vars and replacements differ in length"
    );
    body.iter().map(|e| sub(e, vars, replacements)).collect()
}

fn sub(e: &Exp, vars: &[String], replacements: &[Exp]) -> Exp {
    match e {
        Exp::Var(name) => match vars.iter().position(|v| v == name) {
            Some(i) => replacements[i].clone(),
            None => e.clone(),
        },
        Exp::Proc { params, body } => {
            let (vars, replacements) = unshadowed(vars, replacements, params);
            Exp::Proc {
                params: params.clone(),
                body: substitute(body, &vars, &replacements),
            }
        }
        Exp::Let { bindings, body } => {
            // binding values sit outside the let's own scope
            let bindings: Vec<Binding> = bindings
                .iter()
                .map(|b| Binding {
                    var: b.var.clone(),
                    val: sub(&b.val, vars, replacements),
                })
                .collect();
            let decls: Vec<VarDecl> = bindings.iter().map(|b| b.var.clone()).collect();
            let (vars, replacements) = unshadowed(vars, replacements, &decls);
            Exp::Let {
                body: substitute(body, &vars, &replacements),
                bindings,
            }
        }
        other => other.map_children(|c| sub(c, vars, replacements)),
    }
}

/// Drop every pair whose variable is redeclared by `decls`.
fn unshadowed(vars: &[String], replacements: &[Exp], decls: &[VarDecl]) -> (Vec<String>, Vec<Exp>) {
    vars.iter()
        .zip(replacements)
        .filter(|(v, _)| !decls.iter().any(|d| &d.name == *v))
        .map(|(v, r)| (v.clone(), r.clone()))
        .unzip()
}
