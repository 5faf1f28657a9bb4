//! `let` as sugar for lambda application.

use quill_ast::{Binding, Exp, Program};

/// `(let ((v e) ...) body...)` => `((lambda (v ...) body...) e ...)`
pub fn rewrite_let(bindings: &[Binding], body: &[Exp]) -> Exp {
    Exp::App {
        rator: Box::new(Exp::Proc {
            params: bindings.iter().map(|b| b.var.clone()).collect(),
            body: body.to_vec(),
        }),
        rands: bindings.iter().map(|b| b.val.clone()).collect(),
    }
}

/// Rewrite every `let` in the program, at any depth.
pub fn rewrite_all_let(p: &Program) -> Program {
    Program {
        exps: p.exps.iter().map(rewrite_all_let_exp).collect(),
    }
}

pub fn rewrite_all_let_exp(e: &Exp) -> Exp {
    match e {
        Exp::Let { bindings, body } => rewrite_all_let_exp(&rewrite_let(bindings, body)),
        other => other.map_children(rewrite_all_let_exp),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_ast::VarDecl;

    fn let1(name: &str, val: Exp, body: Exp) -> Exp {
        Exp::Let {
            bindings: vec![Binding {
                var: VarDecl::new(name),
                val,
            }],
            body: vec![body],
        }
    }

    #[test]
    fn rewrites_simple_let() {
        let out = rewrite_all_let_exp(&let1("x", Exp::Num(1.0), Exp::var("x")));
        assert_eq!(
            out,
            Exp::app(Exp::proc(&["x"], vec![Exp::var("x")]), vec![Exp::Num(1.0)])
        );
    }

    #[test]
    fn rewrites_nested_lets_in_values_and_bodies() {
        let inner = let1("y", Exp::Num(2.0), Exp::var("y"));
        let outer = let1("x", inner.clone(), inner);
        let out = rewrite_all_let_exp(&outer);
        assert_eq!(out.to_string(), "((lambda (x) ((lambda (y) y) 2)) ((lambda (y) y) 2))");
    }

    #[test]
    fn leaves_let_free_trees_unchanged() {
        let e = Exp::if_(Exp::Bool(true), Exp::Num(1.0), Exp::Num(2.0));
        assert_eq!(rewrite_all_let_exp(&e), e);
    }
}
