#![deny(unused_must_use)]
#![warn(clippy::dbg_macro, clippy::todo, clippy::unimplemented)]
#![forbid(unsafe_code)]

mod error;
pub mod free_vars;
pub mod lexical;
mod rename;
pub mod rewrite;
mod substitute;

pub use error::ScopeError;
pub use lexical::{
    add_lexical_addresses, address_program, unparse_addressed, AddressedForm, LaExp, LexAddress,
};
pub use rename::{rename_exprs, rename_exprs_with, VarGen};
pub use rewrite::rewrite_all_let;
pub use substitute::substitute;
