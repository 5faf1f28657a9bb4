use quill_parse::{parse_exp, parse_program};

#[test]
fn duplicate_lambda_parameters_rejected() {
    let err = parse_exp("(lambda (x x) x)").unwrap_err().to_string();
    assert!(err.contains("duplicate parameter"));
}

#[test]
fn duplicate_let_bindings_rejected() {
    let err = parse_exp("(let ((a 1) (a 2)) a)").unwrap_err().to_string();
    assert!(err.contains("duplicate parameter"));
}

#[test]
fn nested_define_rejected() {
    let err = parse_exp("(lambda (x) (define y x))").unwrap_err().to_string();
    assert!(err.contains("only allowed at top level"));
}

#[test]
fn malformed_if_rejected() {
    assert!(parse_exp("(if #t 1)").is_err());
}

#[test]
fn empty_lambda_body_rejected() {
    let err = parse_exp("(lambda (x))").unwrap_err().to_string();
    assert!(err.contains("at least one body expression"));
}

#[test]
fn unbalanced_parens_rejected() {
    assert!(parse_program("(+ 1 2").unwrap_err().to_string().contains("unclosed"));
    assert!(parse_program("1)").unwrap_err().to_string().contains("unexpected ')'"));
}

#[test]
fn empty_program_rejected() {
    assert!(parse_program("  ; nothing here\n").is_err());
}

#[test]
fn moderate_nesting_is_accepted() {
    let src = format!("{}1{}", "(list ".repeat(100), ")".repeat(100));
    assert!(parse_exp(&src).is_ok());
}

#[test]
fn primitive_names_cannot_be_bound() {
    for src in [
        "(lambda (car) (car 1))",
        "(let ((+ 5)) +)",
        "(lambda (x eq?) x)",
    ] {
        let err = parse_exp(src).unwrap_err().to_string();
        assert!(err.contains("cannot bind primitive"), "{}: {}", src, err);
    }
    let err = parse_program("(define list 1)\nlist").unwrap_err().to_string();
    assert!(err.contains("cannot bind primitive `list`"));
}

#[test]
fn names_that_only_contain_a_primitive_are_bindable() {
    assert!(parse_exp("(lambda (car-x list2) (car car-x))").is_ok());
}
