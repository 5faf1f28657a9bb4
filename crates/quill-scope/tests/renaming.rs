//! Properties of renaming, checked against the addressing pass.

use proptest::prelude::*;
use quill_ast::Exp;
use quill_scope::free_vars::{bound_names, free_names};
use quill_scope::lexical::LexAddress;
use quill_scope::{add_lexical_addresses, rename_exprs, substitute, LaExp};
use std::collections::HashSet;

const NAMES: [&str; 4] = ["a", "b", "c", "x"];

fn arb_exp() -> impl Strategy<Value = Exp> {
    let leaf = prop_oneof![
        (0i32..10).prop_map(|n| Exp::Num(n as f64)),
        prop::sample::select(NAMES.to_vec()).prop_map(|n| Exp::var(n)),
    ];
    leaf.prop_recursive(4, 32, 3, |inner| {
        prop_oneof![
            (
                prop::sample::subsequence(NAMES.to_vec(), 1..=3),
                prop::collection::vec(inner.clone(), 1..3)
            )
                .prop_map(|(ps, body)| Exp::proc(&ps, body)),
            (inner.clone(), prop::collection::vec(inner.clone(), 0..3))
                .prop_map(|(r, rs)| Exp::app(r, rs)),
            (inner.clone(), inner.clone(), inner).prop_map(|(t, a, b)| Exp::if_(t, a, b)),
        ]
    })
}

/// Scoping shape of a tree: free names, or (depth, pos) for bound references.
fn shape(e: &Exp) -> Vec<Result<(usize, usize), String>> {
    fn walk(e: &LaExp, out: &mut Vec<Result<(usize, usize), String>>) {
        match e {
            LaExp::Addr(LexAddress::Free { name }) => out.push(Err(name.clone())),
            LaExp::Addr(LexAddress::Bound(a)) => out.push(Ok((a.depth, a.pos))),
            LaExp::Proc { body, .. } => body.iter().for_each(|b| walk(b, out)),
            LaExp::If { test, then, alt } => {
                walk(test, out);
                walk(then, out);
                walk(alt, out);
            }
            LaExp::App { rator, rands } => {
                walk(rator, out);
                rands.iter().for_each(|r| walk(r, out));
            }
            _ => {}
        }
    }
    let la = add_lexical_addresses(&LaExp::from_exp(e).unwrap()).unwrap();
    let mut out = Vec::new();
    walk(&la, &mut out);
    out
}

proptest! {
    #[test]
    fn bound_names_become_distinct(e in arb_exp()) {
        let renamed = rename_exprs(std::slice::from_ref(&e));
        let bound = bound_names(&renamed);
        let unique: HashSet<&String> = bound.iter().collect();
        prop_assert_eq!(unique.len(), bound.len());

        let original_free = free_names(std::slice::from_ref(&e));
        prop_assert!(bound.iter().all(|b| !original_free.contains(b)));
    }

    #[test]
    fn free_names_survive_renaming(e in arb_exp()) {
        let renamed = rename_exprs(std::slice::from_ref(&e));
        prop_assert_eq!(free_names(&renamed), free_names(std::slice::from_ref(&e)));
    }

    #[test]
    fn renaming_preserves_lexical_addresses(e in arb_exp()) {
        let renamed = rename_exprs(std::slice::from_ref(&e));
        prop_assert_eq!(shape(&renamed[0]), shape(&e));
    }

    #[test]
    fn empty_substitution_is_identity(e in arb_exp()) {
        let body = vec![e];
        prop_assert_eq!(substitute(&body, &[], &[]), body);
    }
}
