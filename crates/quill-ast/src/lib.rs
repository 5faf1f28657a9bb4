#![forbid(unsafe_code)]
#![deny(unused_must_use)]
#![warn(clippy::dbg_macro, clippy::todo, clippy::unimplemented)]

pub mod ast;
mod unparse;
pub mod value;

pub use ast::{Binding, Exp, PrimOp, Program, VarDecl};
pub use value::{Closure, Value};
