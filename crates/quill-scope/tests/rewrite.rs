use quill_parse::parse_program;
use quill_scope::free_vars::{height, occurs_free};
use quill_scope::rewrite_all_let;

#[test]
fn let_becomes_lambda_application() {
    let p = parse_program("(let ((x 1) (y 2)) (+ x y))").unwrap();
    let out = rewrite_all_let(&p);
    assert_eq!(out.to_string(), "((lambda (x y) (+ x y)) 1 2)");
}

#[test]
fn rewriting_keeps_free_variable_status() {
    let p = parse_program("(let ((x z)) (f x))").unwrap();
    let out = rewrite_all_let(&p);
    for v in ["z", "f"] {
        assert!(occurs_free(v, &p.exps[0]));
        assert!(occurs_free(v, &out.exps[0]));
    }
    assert!(!occurs_free("x", &out.exps[0]));
}

#[test]
fn height_counts_nesting() {
    let p = parse_program("(lambda (x) (if x (f x) 0))").unwrap();
    assert_eq!(height(&p.exps[0]), 4);
}
