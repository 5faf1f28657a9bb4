//! Persistent environment for top-level `define` bindings.
//!
//! Each extension allocates one frame pointing at its parent; frames are
//! shared between environments and never modified.

use crate::error::EvalError;
use quill_ast::Value;
use std::rc::Rc;

#[derive(Debug)]
struct Frame {
    name: String,
    value: Value,
    parent: Env,
}

#[derive(Debug, Clone, Default)]
pub struct Env {
    head: Option<Rc<Frame>>,
}

impl Env {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// A new environment with `name` bound in front of `self`.
    pub fn extend(&self, name: impl Into<String>, value: Value) -> Env {
        Env {
            head: Some(Rc::new(Frame {
                name: name.into(),
                value,
                parent: self.clone(),
            })),
        }
    }

    /// Innermost binding of `name`.
    pub fn lookup(&self, name: &str) -> Result<Value, EvalError> {
        let mut cur = self.head.as_deref();
        while let Some(frame) = cur {
            if frame.name == name {
                return Ok(frame.value.clone());
            }
            cur = frame.parent.head.as_deref();
        }
        Err(EvalError::UnboundVariable {
            name: name.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_finds_extension() {
        let env = Env::empty().extend("v", Value::Number(1.0));
        assert_eq!(env.lookup("v"), Ok(Value::Number(1.0)));
    }

    #[test]
    fn extension_leaves_other_names_alone() {
        let base = Env::empty().extend("a", Value::Bool(true));
        let env = base.extend("v", Value::Number(1.0));
        assert_eq!(env.lookup("a"), base.lookup("a"));
        assert_eq!(env.lookup("missing"), base.lookup("missing"));
    }

    #[test]
    fn empty_env_binds_nothing() {
        for name in ["x", "+", ""] {
            assert!(matches!(
                Env::empty().lookup(name),
                Err(EvalError::UnboundVariable { .. })
            ));
        }
    }

    #[test]
    fn inner_binding_shadows_outer() {
        let env = Env::empty()
            .extend("x", Value::Number(1.0))
            .extend("x", Value::Number(2.0));
        assert_eq!(env.lookup("x"), Ok(Value::Number(2.0)));
    }

    #[test]
    fn parent_is_unchanged_by_extension() {
        let base = Env::empty().extend("x", Value::Number(1.0));
        let _child = base.extend("x", Value::Number(2.0));
        assert_eq!(base.lookup("x"), Ok(Value::Number(1.0)));
        assert!(!base.is_empty());
        assert!(Env::empty().is_empty());
    }
}
