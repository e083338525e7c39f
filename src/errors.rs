use thiserror::Error;

/// Errors raised by structural tree operations.
///
/// Every variant is a synchronous precondition violation; the tree is left
/// unchanged whenever one is returned. Traversals and aggregations never fail.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    #[error("node not found: stale or foreign index")]
    NodeNotFound,

    #[error("node is already attached as a child")]
    AlreadyAttached,

    #[error("cannot attach a node to itself")]
    SelfAttachment,
}

pub type TreeResult<T> = Result<T, TreeError>;
