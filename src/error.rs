use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    // Construction.
    /// A number node contains NaN.
    #[error("number nodes cannot contain NaN")]
    ContainsNaN,
    /// A symbol was given an empty name.
    #[error("symbol names cannot be empty")]
    EmptySymbolName,
    /// Tree contains no nodes.
    #[error("tree contains no nodes")]
    EmptyTree,
    /// Nodes are not in a valid topological order. Every node must appear
    /// after its inputs.
    #[error("nodes are not in a valid topological order")]
    WrongNodeOrder,

    // Composition.
    /// A combinator received an operand it cannot turn into an expression.
    #[error("operation not supported for operand {0}")]
    InvalidOperand(String),

    // Folds.
    /// The fold has no rule for this kind of node.
    #[error("no rule for {0} nodes")]
    UnsupportedVariant(&'static str),
    /// The exponent of a power depends on the differentiation variable.
    #[error("cannot differentiate a power whose exponent depends on '{0}'")]
    VariableExponent(String),

    // Evaluation.
    /// A symbol was not assigned a value before evaluating.
    #[error("symbol '{0}' has no value")]
    VariableNotFound(String),
    /// Something went wrong when trying to do interval arithmetic.
    #[error("invalid interval")]
    InvalidInterval,
}
