//! Lexical addressing.
//!
//! Annotates every variable reference with the contour that declares it:
//! `[x : depth pos]` when bound, `[x free]` otherwise. Depth counts the
//! lambda contours crossed going outward from the reference (0 = innermost);
//! pos is the index of the name in that contour's parameter list.
//!
//! The pass works on [`LaExp`], a tree without `define` or `let`. Lets are
//! rewritten to lambda applications first (see [`crate::rewrite`]).

use crate::error::ScopeError;
use crate::rewrite::rewrite_all_let_exp;
use quill_ast::{Exp, PrimOp, Program, Value, VarDecl};
use std::collections::HashSet;
use std::fmt;

/// A visible declaration, as seen from the current point of the walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub name: String,
    pub depth: usize,
    pub pos: usize,
}

impl Address {
    fn deeper(&self) -> Address {
        Address {
            name: self.name.clone(),
            depth: self.depth + 1,
            pos: self.pos,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexAddress {
    Free { name: String },
    Bound(Address),
}

/// Addressable expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum LaExp {
    Num(f64),
    Bool(bool),
    Str(String),
    Lit(Value),
    /// Reference not yet addressed
    Var(String),
    /// Reference after addressing
    Addr(LexAddress),
    Proc {
        params: Vec<VarDecl>,
        body: Vec<LaExp>,
    },
    If {
        test: Box<LaExp>,
        then: Box<LaExp>,
        alt: Box<LaExp>,
    },
    App {
        rator: Box<LaExp>,
        rands: Vec<LaExp>,
    },
}

impl LaExp {
    /// Convert a raw expression. Primitive operators become plain references
    /// to their keyword. No contour may declare a keyword, so these always
    /// address as free.
    pub fn from_exp(e: &Exp) -> Result<LaExp, ScopeError> {
        match e {
            Exp::Num(n) => Ok(LaExp::Num(*n)),
            Exp::Bool(b) => Ok(LaExp::Bool(*b)),
            Exp::Str(s) => Ok(LaExp::Str(s.clone())),
            Exp::Lit(v) => Ok(LaExp::Lit(v.clone())),
            Exp::Var(name) => Ok(LaExp::Var(name.clone())),
            Exp::Prim(op) => Ok(LaExp::Var(op.keyword().to_string())),
            Exp::If { test, then, alt } => Ok(LaExp::If {
                test: Box::new(LaExp::from_exp(test)?),
                then: Box::new(LaExp::from_exp(then)?),
                alt: Box::new(LaExp::from_exp(alt)?),
            }),
            Exp::Proc { params, body } => Ok(LaExp::Proc {
                params: params.clone(),
                body: body.iter().map(LaExp::from_exp).collect::<Result<_, _>>()?,
            }),
            Exp::App { rator, rands } => Ok(LaExp::App {
                rator: Box::new(LaExp::from_exp(rator)?),
                rands: rands.iter().map(LaExp::from_exp).collect::<Result<_, _>>()?,
            }),
            Exp::Let { .. } => Err(ScopeError::MalformedExpression {
                msg: "let must be rewritten before lexical addressing".to_string(),
            }),
            Exp::Define { var, .. } => Err(ScopeError::MalformedExpression {
                msg: format!("define of '{}' cannot be lexically addressed", var.name),
            }),
        }
    }
}

/// Position of `name` in a declaration list.
pub fn index_of_var(name: &str, decls: &[VarDecl]) -> Option<usize> {
    decls.iter().position(|d| d.name == name)
}

/// The addresses visible inside a lambda with parameters `decls`.
///
/// Existing entries move one contour deeper; the new parameters come first,
/// at depth 0, so they shadow outer declarations of the same name.
pub fn cross_contour(decls: &[VarDecl], addresses: &[Address]) -> Vec<Address> {
    decls
        .iter()
        .filter_map(|d| {
            index_of_var(&d.name, decls).map(|pos| Address {
                name: d.name.clone(),
                depth: 0,
                pos,
            })
        })
        .chain(addresses.iter().map(Address::deeper))
        .collect()
}

/// First visible declaration of `name`, or free.
pub fn get_lexical_address(name: &str, addresses: &[Address]) -> LexAddress {
    match addresses.iter().find(|a| a.name == name) {
        Some(a) => LexAddress::Bound(a.clone()),
        None => LexAddress::Free {
            name: name.to_string(),
        },
    }
}

/// Annotate every reference in `exp` with its lexical address.
///
/// Fails on a node that is already addressed: the pass runs exactly once per
/// raw subtree.
pub fn add_lexical_addresses(exp: &LaExp) -> Result<LaExp, ScopeError> {
    visit(exp, &[])
}

fn visit(exp: &LaExp, addresses: &[Address]) -> Result<LaExp, ScopeError> {
    match exp {
        LaExp::Num(_) | LaExp::Bool(_) | LaExp::Str(_) | LaExp::Lit(_) => Ok(exp.clone()),
        LaExp::Var(name) => Ok(LaExp::Addr(get_lexical_address(name, addresses))),
        LaExp::Addr(a) => Err(ScopeError::MalformedExpression {
            msg: format!("unexpected lexical address {}", render_address(a)),
        }),
        LaExp::If { test, then, alt } => Ok(LaExp::If {
            test: Box::new(visit(test, addresses)?),
            then: Box::new(visit(then, addresses)?),
            alt: Box::new(visit(alt, addresses)?),
        }),
        LaExp::Proc { params, body } => {
            let mut seen = HashSet::new();
            if let Some(dup) = params.iter().find(|p| !seen.insert(p.name.as_str())) {
                return Err(ScopeError::DuplicateParameter {
                    name: dup.name.clone(),
                });
            }
            if let Some(p) = params.iter().find(|p| PrimOp::from_keyword(&p.name).is_some()) {
                return Err(ScopeError::PrimitiveParameter {
                    name: p.name.clone(),
                });
            }
            let inner = cross_contour(params, addresses);
            Ok(LaExp::Proc {
                params: params.clone(),
                body: body
                    .iter()
                    .map(|b| visit(b, &inner))
                    .collect::<Result<_, _>>()?,
            })
        }
        LaExp::App { rator, rands } => Ok(LaExp::App {
            rator: Box::new(visit(rator, addresses)?),
            rands: rands
                .iter()
                .map(|r| visit(r, addresses))
                .collect::<Result<_, _>>()?,
        }),
    }
}

/// One top-level form of an addressed program.
#[derive(Debug, Clone, PartialEq)]
pub enum AddressedForm {
    Define { name: String, val: LaExp },
    Exp(LaExp),
}

/// Rewrite lets away and address every top-level form. A `define` is
/// addressed through its value; the defined name itself is not a contour.
pub fn address_program(p: &Program) -> Result<Vec<AddressedForm>, ScopeError> {
    let forms = p
        .exps
        .iter()
        .map(|e| match rewrite_all_let_exp(e) {
            Exp::Define { var, val } => Ok(AddressedForm::Define {
                name: var.name,
                val: add_lexical_addresses(&LaExp::from_exp(&val)?)?,
            }),
            other => Ok(AddressedForm::Exp(add_lexical_addresses(
                &LaExp::from_exp(&other)?,
            )?)),
        })
        .collect::<Result<Vec<_>, ScopeError>>()?;
    tracing::debug!(forms = forms.len(), "addressed program");
    Ok(forms)
}

fn render_address(a: &LexAddress) -> String {
    match a {
        LexAddress::Free { name } => format!("[{} free]", name),
        LexAddress::Bound(Address { name, depth, pos }) => format!("[{} : {} {}]", name, depth, pos),
    }
}

/// Concrete syntax for an addressed tree.
pub fn unparse_addressed(exp: &LaExp) -> String {
    exp.to_string()
}

impl fmt::Display for LaExp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LaExp::Num(n) => write!(f, "{n}"),
            LaExp::Bool(b) => write!(f, "{}", Exp::Bool(*b)),
            LaExp::Str(s) => write!(f, "{}", Exp::Str(s.clone())),
            LaExp::Lit(v) => write!(f, "{}", Exp::Lit(v.clone())),
            LaExp::Var(name) => write!(f, "{name}"),
            LaExp::Addr(a) => write!(f, "{}", render_address(a)),
            LaExp::Proc { params, body } => {
                let names: Vec<&str> = params.iter().map(|p| p.name.as_str()).collect();
                write!(f, "(lambda ({})", names.join(" "))?;
                for b in body {
                    write!(f, " {b}")?;
                }
                write!(f, ")")
            }
            LaExp::If { test, then, alt } => write!(f, "(if {test} {then} {alt})"),
            LaExp::App { rator, rands } => {
                write!(f, "({rator}")?;
                for r in rands {
                    write!(f, " {r}")?;
                }
                write!(f, ")")
            }
        }
    }
}

impl fmt::Display for AddressedForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressedForm::Define { name, val } => write!(f, "(define {name} {val})"),
            AddressedForm::Exp(e) => write!(f, "{e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn decls(ns: &[&str]) -> Vec<VarDecl> {
        ns.iter().map(|n| VarDecl::new(*n)).collect()
    }

    fn addr(name: &str, depth: usize, pos: usize) -> Address {
        Address {
            name: name.to_string(),
            depth,
            pos,
        }
    }

    #[test]
    fn cross_contour_prepends_and_deepens() {
        let outer = vec![addr("a", 0, 0), addr("c", 0, 1)];
        let inner = cross_contour(&decls(&["a", "b"]), &outer);
        assert_eq!(
            inner,
            vec![addr("a", 0, 0), addr("b", 0, 1), addr("a", 1, 0), addr("c", 1, 1)]
        );
    }

    #[test]
    fn first_match_wins() {
        let visible = vec![addr("a", 0, 0), addr("b", 0, 1), addr("a", 1, 1)];
        assert_eq!(
            get_lexical_address("a", &visible),
            LexAddress::Bound(addr("a", 0, 0))
        );
        assert_eq!(
            get_lexical_address("c", &visible),
            LexAddress::Free { name: "c".into() }
        );
    }

    #[test]
    fn index_of_var_finds_position() {
        assert_eq!(index_of_var("b", &decls(&["a", "b"])), Some(1));
        assert_eq!(index_of_var("c", &decls(&["a", "b"])), None);
    }

    #[test]
    fn duplicate_parameters_rejected() {
        let e = LaExp::Proc {
            params: decls(&["x", "x"]),
            body: vec![LaExp::Var("x".into())],
        };
        assert!(matches!(
            add_lexical_addresses(&e),
            Err(ScopeError::DuplicateParameter { name }) if name == "x"
        ));
    }

    #[test]
    fn primitive_parameters_rejected() {
        let e = LaExp::Proc {
            params: decls(&["car"]),
            body: vec![LaExp::Var("car".into())],
        };
        assert!(matches!(
            add_lexical_addresses(&e),
            Err(ScopeError::PrimitiveParameter { name }) if name == "car"
        ));
    }

    #[test]
    fn define_and_let_are_not_addressable() {
        assert!(matches!(
            LaExp::from_exp(&Exp::define("x", Exp::Num(1.0))),
            Err(ScopeError::MalformedExpression { .. })
        ));
    }
}
