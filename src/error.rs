//! Error types for exchange addressing, evaluation and capture loading.
//!
//! Byte/bit reads inside a frame never fail (they return 0 when out of range).
//! Request and frame indices are strict: a missing request or frame is an
//! [`IndexError`] that aborts the current parameter only.

/// Strict-tier addressing failure: a request or frame index that does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IndexError {
    #[error("request index {index} out of range ({count} logged)")]
    Request { index: usize, count: usize },
    #[error("header frame index {index} out of range ({count} present)")]
    Header { index: usize, count: usize },
    #[error("data frame index {index} out of range ({count} present)")]
    Data { index: usize, count: usize },
}

/// Which kind of result record was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Literal,
    Numerical,
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordKind::Literal => f.write_str("literal"),
            RecordKind::Numerical => f.write_str("numerical"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvalError {
    #[error("Index: {0}")]
    Index(#[from] IndexError),
    #[error("Exchange has no data frames")]
    EmptyExchange,
    #[error("Empty property name on {0} record")]
    EmptyProperty(RecordKind),
    #[error("Script: {0}")]
    Script(String),
    #[error("Unknown parameter: {0}")]
    UnknownParameter(String),
}

impl EvalError {
    /// Shorthand for decoders reporting their own failures.
    pub fn script(msg: impl Into<String>) -> Self {
        EvalError::Script(msg.into())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("IO: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: response outside of a `param` block")]
    ResponseOutsideParameter { line: usize },
    #[error("line {line}: invalid hex token `{token}`")]
    InvalidHex { line: usize, token: String },
    #[error("line {line}: responses in one exchange must all have headers or all lack them")]
    MixedHeaders { line: usize },
    #[error("line {line}: unknown parse mode `{mode}`")]
    UnknownMode { line: usize, mode: String },
    #[error("line {line}: `param` requires a name")]
    MissingName { line: usize },
    #[error("line {line}: exchange has no responses")]
    EmptyExchange { line: usize },
    #[error("line {line}: response has no data bytes")]
    EmptyResponse { line: usize },
    #[error("line {line}: header before `:` has no bytes")]
    EmptyHeader { line: usize },
}
