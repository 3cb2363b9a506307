use thiserror::Error;

use crate::sink::{SinkError, SinkOperation};

/// Fatal rendering failures. Malformed or unknown nodes are never errors;
/// they degrade to empty text or are skipped.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("document sink failed during {operation}: {source}")]
    Sink {
        operation: SinkOperation,
        #[source]
        source: SinkError,
    },

    #[error("description nesting reached depth {depth}, over the limit of {limit}; the tree is cyclic or unbounded")]
    DepthExceeded { depth: usize, limit: usize },
}

impl RenderError {
    pub fn sink(operation: SinkOperation) -> impl FnOnce(SinkError) -> RenderError {
        move |source| RenderError::Sink { operation, source }
    }
}
