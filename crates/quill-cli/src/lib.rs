pub mod env;
mod error;
pub mod eval;
pub mod prim;

pub use env::Env;
pub use error::EvalError;
pub use eval::{eval_program, eval_sequence};

use quill_ast::Value;

/// Parse, rewrite lets away and evaluate a program text.
pub fn run_source(src: &str) -> anyhow::Result<Value> {
    let program = quill_parse::parse_program(src)?;
    let program = quill_scope::rewrite_all_let(&program);
    Ok(eval_program(&program)?)
}
