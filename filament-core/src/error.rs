//! Error types for the rendering engine.
//!
//! Only structural failures surface as errors: they indicate a malformed
//! fiber tree or misuse of the renderer, never bad user input. Recoverable
//! conditions (a text node asked to host children) are logged and contained
//! to the affected subtree instead.

use thiserror::Error;

use crate::fiber::FiberId;

/// Unified result type for the engine.
pub type Result<T> = std::result::Result<T, RenderError>;

/// Errors surfaced by the rendering engine.
///
/// Any of these aborts the in-flight render pass; the previously committed
/// tree is left untouched and the caller may retry with a fresh `render`.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A non-root fiber has no parent link. The fiber tree is malformed.
    #[error("fiber {0} is detached: only the render root may lack a parent")]
    DetachedFiber(FiberId),

    /// A fiber's parent exists but owns no host node, so there is nothing
    /// to attach into.
    #[error("parent of fiber {0} has no host node")]
    MissingParentHost(FiberId),

    /// `render` was called while a previous pass for the same root had not
    /// yet committed.
    #[error("a render pass is already in flight for this root")]
    RenderInFlight,
}
