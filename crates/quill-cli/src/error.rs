use quill_scope::ScopeError;

/// Evaluation errors. Every failure aborts the enclosing evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum EvalError {
    /// Reference to a name with no binding in the environment
    UnboundVariable { name: String },
    /// Application of a value that is neither a primitive nor a closure
    NotAProcedure { value: String },
    /// Wrong number of arguments
    ArityMismatch {
        name: String,
        expected: String,
        found: usize,
    },
    /// Ill-typed argument to a primitive
    PrimitiveTypeError { op: String, msg: String },
    /// A node that cannot appear where it was found
    MalformedExpression { msg: String },
    /// A sequence with nothing left to evaluate
    EmptySequence,
}

impl std::fmt::Display for EvalError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            EvalError::UnboundVariable { name } => write!(f, "unbound variable '{}'", name),
            EvalError::NotAProcedure { value } => {
                write!(f, "cannot apply {}: not a procedure", value)
            }
            EvalError::ArityMismatch {
                name,
                expected,
                found,
            } => write!(
                f,
                "arity mismatch in {}: expected {} arguments, found {}",
                name, expected, found
            ),
            EvalError::PrimitiveTypeError { op, msg } => write!(f, "{}: {}", op, msg),
            EvalError::MalformedExpression { msg } => write!(f, "malformed expression: {}", msg),
            EvalError::EmptySequence => write!(f, "empty sequence"),
        }
    }
}

impl std::error::Error for EvalError {}

impl From<ScopeError> for EvalError {
    fn from(e: ScopeError) -> Self {
        match e {
            ScopeError::MalformedExpression { msg } => EvalError::MalformedExpression { msg },
            other => EvalError::MalformedExpression {
                msg: other.to_string(),
            },
        }
    }
}
