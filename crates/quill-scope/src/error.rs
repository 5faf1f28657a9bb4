/// Errors raised by the static passes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeError {
    /// A node the pass cannot accept in this position, e.g. an already
    /// addressed reference or a `define` inside an addressable tree
    MalformedExpression { msg: String },
    /// Two parameters of one contour share a name
    DuplicateParameter { name: String },
    /// A contour declares the keyword of a primitive operator
    PrimitiveParameter { name: String },
}

impl std::fmt::Display for ScopeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScopeError::MalformedExpression { msg } => write!(f, "malformed expression: {}", msg),
            ScopeError::DuplicateParameter { name } => {
                write!(f, "duplicate parameter '{}' in one declaration list", name)
            }
            ScopeError::PrimitiveParameter { name } => {
                write!(f, "primitive '{}' cannot be a parameter", name)
            }
        }
    }
}

impl std::error::Error for ScopeError {}
