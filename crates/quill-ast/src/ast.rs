//! Expression grammar shared by every pass.
//!
//! The parser produces these trees, the evaluator walks them, and the
//! static passes in `quill-scope` rebuild them. Trees are never mutated
//! in place: every transformation returns a new tree.

use crate::value::Value;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Program {
    pub exps: Vec<Exp>,
}

/// A variable declaration: a lambda parameter, a let binding or a define target.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct VarDecl {
    pub name: String,
}

impl VarDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Binding {
    pub var: VarDecl,
    pub val: Exp,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Exp {
    Num(f64),
    Bool(bool),
    Str(String),
    /// Variable reference
    Var(String),
    /// Quoted datum, or any value carried literally after substitution
    Lit(Value),
    Prim(PrimOp),
    If {
        test: Box<Exp>,
        then: Box<Exp>,
        alt: Box<Exp>,
    },
    Proc {
        params: Vec<VarDecl>,
        body: Vec<Exp>,
    },
    App {
        rator: Box<Exp>,
        rands: Vec<Exp>,
    },
    Let {
        bindings: Vec<Binding>,
        body: Vec<Exp>,
    },
    Define {
        var: VarDecl,
        val: Box<Exp>,
    },
}

impl Exp {
    pub fn var(name: impl Into<String>) -> Self {
        Exp::Var(name.into())
    }

    pub fn if_(test: Exp, then: Exp, alt: Exp) -> Self {
        Exp::If {
            test: Box::new(test),
            then: Box::new(then),
            alt: Box::new(alt),
        }
    }

    pub fn proc(params: &[&str], body: Vec<Exp>) -> Self {
        Exp::Proc {
            params: params.iter().map(|p| VarDecl::new(*p)).collect(),
            body,
        }
    }

    pub fn app(rator: Exp, rands: Vec<Exp>) -> Self {
        Exp::App {
            rator: Box::new(rator),
            rands,
        }
    }

    pub fn define(name: impl Into<String>, val: Exp) -> Self {
        Exp::Define {
            var: VarDecl::new(name),
            val: Box::new(val),
        }
    }

    /// Immediate sub-expressions, in evaluation order.
    pub fn children(&self) -> Vec<&Exp> {
        match self {
            Exp::If { test, then, alt } => vec![&**test, &**then, &**alt],
            Exp::Proc { body, .. } => body.iter().collect(),
            Exp::App { rator, rands } => std::iter::once(&**rator).chain(rands).collect(),
            Exp::Let { bindings, body } => bindings.iter().map(|b| &b.val).chain(body).collect(),
            Exp::Define { val, .. } => vec![&**val],
            _ => Vec::new(),
        }
    }

    /// Rebuild this node with `f` applied to each immediate sub-expression.
    ///
    /// Declarations are copied unchanged; atoms are cloned. Passes that only
    /// care about a few variants match those and delegate the rest here.
    pub fn map_children(&self, mut f: impl FnMut(&Exp) -> Exp) -> Exp {
        match self {
            Exp::If { test, then, alt } => Exp::If {
                test: Box::new(f(test)),
                then: Box::new(f(then)),
                alt: Box::new(f(alt)),
            },
            Exp::Proc { params, body } => Exp::Proc {
                params: params.clone(),
                body: body.iter().map(&mut f).collect(),
            },
            Exp::App { rator, rands } => {
                let rator = Box::new(f(rator));
                let rands = rands.iter().map(&mut f).collect();
                Exp::App { rator, rands }
            }
            Exp::Let { bindings, body } => {
                let bindings = bindings
                    .iter()
                    .map(|b| Binding {
                        var: b.var.clone(),
                        val: f(&b.val),
                    })
                    .collect();
                let body = body.iter().map(&mut f).collect();
                Exp::Let { bindings, body }
            }
            Exp::Define { var, val } => Exp::Define {
                var: var.clone(),
                val: Box::new(f(val)),
            },
            atom => atom.clone(),
        }
    }
}

/// Primitive operators known to the reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PrimOp {
    // arithmetic
    Add,
    Sub,
    Mul,
    Div,
    // relational
    Lt,
    Gt,
    NumEq,
    // logic
    Not,
    And,
    Or,
    // equality
    Eq,
    StringEq,
    // pairs and lists
    Cons,
    Car,
    Cdr,
    List,
    // predicates
    IsPair,
    IsList,
    IsNumber,
    IsBoolean,
    IsSymbol,
    IsString,
}

impl PrimOp {
    pub const ALL: [PrimOp; 22] = [
        PrimOp::Add,
        PrimOp::Sub,
        PrimOp::Mul,
        PrimOp::Div,
        PrimOp::Lt,
        PrimOp::Gt,
        PrimOp::NumEq,
        PrimOp::Not,
        PrimOp::And,
        PrimOp::Or,
        PrimOp::Eq,
        PrimOp::StringEq,
        PrimOp::Cons,
        PrimOp::Car,
        PrimOp::Cdr,
        PrimOp::List,
        PrimOp::IsPair,
        PrimOp::IsList,
        PrimOp::IsNumber,
        PrimOp::IsBoolean,
        PrimOp::IsSymbol,
        PrimOp::IsString,
    ];

    pub fn keyword(self) -> &'static str {
        match self {
            PrimOp::Add => "+",
            PrimOp::Sub => "-",
            PrimOp::Mul => "*",
            PrimOp::Div => "/",
            PrimOp::Lt => "<",
            PrimOp::Gt => ">",
            PrimOp::NumEq => "=",
            PrimOp::Not => "not",
            PrimOp::And => "and",
            PrimOp::Or => "or",
            PrimOp::Eq => "eq?",
            PrimOp::StringEq => "string=?",
            PrimOp::Cons => "cons",
            PrimOp::Car => "car",
            PrimOp::Cdr => "cdr",
            PrimOp::List => "list",
            PrimOp::IsPair => "pair?",
            PrimOp::IsList => "list?",
            PrimOp::IsNumber => "number?",
            PrimOp::IsBoolean => "boolean?",
            PrimOp::IsSymbol => "symbol?",
            PrimOp::IsString => "string?",
        }
    }

    pub fn from_keyword(s: &str) -> Option<PrimOp> {
        PrimOp::ALL.iter().copied().find(|op| op.keyword() == s)
    }
}
