//! Host Renderer Boundary
//!
//! The engine never touches platform APIs. Everything it needs from the
//! target platform is expressed through the [`HostRenderer`] trait: create
//! a node, sync its properties, attach it, detach it, and tell leaf nodes
//! from containers. A DOM adapter, a terminal adapter, and the in-memory
//! host in [`memory`] all implement the same six operations.
//!
//! Property updates cross the boundary as a pre-computed [`PropsPatch`]:
//! the engine owns the diffing algorithm, the host applies the patch
//! mechanically. Hosts should be lenient about unexpected platform state
//! (log, don't panic); the engine has already validated tree structure by
//! the time it calls out.

mod memory;

pub use memory::{HostStats, MemoryHost, MemoryNodeId};

use crate::element::AttrValue;

/// The capability the engine requires from a target platform.
///
/// Methods take `&mut self` so adapters may keep internal bookkeeping;
/// node handles must be cheap to clone since the engine stores one per
/// fiber and passes parents by handle.
pub trait HostRenderer {
    /// Handle to a platform node.
    type Node: Clone;

    /// Create a container node for the given tag. No children attached;
    /// attachment happens only during commit.
    fn create_container(&mut self, tag: &str) -> Self::Node;

    /// Create a leaf node carrying the given text.
    fn create_leaf(&mut self, text: &str) -> Self::Node;

    /// Apply a property patch to a node. Never called with an empty patch.
    fn set_properties(&mut self, node: &Self::Node, patch: &PropsPatch);

    /// Append `child` as the last child of `parent`.
    fn append_child(&mut self, parent: &Self::Node, child: &Self::Node);

    /// Detach `child` from `parent`.
    fn remove_child(&mut self, parent: &Self::Node, child: &Self::Node);

    /// Whether the node is a leaf (cannot host children).
    fn is_leaf(&self, node: &Self::Node) -> bool;
}

/// The computed difference between two renders' properties for one node.
///
/// Produced by the reconciler's property differ, consumed by
/// [`HostRenderer::set_properties`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropsPatch {
    /// Attributes to set, in the new props' declaration order. Covers both
    /// newly added attributes and changed values.
    pub set: Vec<(String, AttrValue)>,

    /// Attributes present in the previous render but absent now.
    pub remove: Vec<String>,

    /// Replacement text for a leaf node, present only when the text
    /// actually changed.
    pub text: Option<String>,
}

impl PropsPatch {
    /// Whether the patch would change nothing.
    pub fn is_empty(&self) -> bool {
        self.set.is_empty() && self.remove.is_empty() && self.text.is_none()
    }
}
