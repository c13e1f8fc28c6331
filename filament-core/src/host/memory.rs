//! In-Memory Host
//!
//! A complete [`HostRenderer`](crate::host::HostRenderer) backed by a plain
//! node store. It exists for headless rendering and for tests: every host
//! operation is counted in [`HostStats`], and the resulting tree can be
//! inspected node by node or dumped with [`MemoryHost::render_to_string`].
//!
//! Nodes are addressed by copyable ids. Removal detaches a subtree from
//! its parent but keeps the slots alive, so assertions can still look at
//! detached nodes; [`MemoryHost::contains`] answers whether a node is
//! still attached under a given root.

use indexmap::IndexMap;

use crate::element::AttrValue;
use crate::host::{HostRenderer, PropsPatch};

/// Handle to a node in a [`MemoryHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MemoryNodeId(u32);

/// Operation counters, one per host-boundary call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HostStats {
    /// Container nodes created.
    pub containers_created: usize,
    /// Leaf nodes created.
    pub leaves_created: usize,
    /// `append_child` calls.
    pub appends: usize,
    /// `remove_child` calls.
    pub removes: usize,
    /// `set_properties` calls.
    pub prop_syncs: usize,
}

impl HostStats {
    /// Total node creations of either kind.
    pub fn nodes_created(&self) -> usize {
        self.containers_created + self.leaves_created
    }

    /// Zero all counters. Typically called between renders so a test can
    /// assert what the next pass alone did.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

enum MemoryNode {
    Container {
        tag: String,
        attributes: IndexMap<String, AttrValue>,
        children: Vec<MemoryNodeId>,
    },
    Leaf {
        text: String,
    },
}

/// In-process host tree.
pub struct MemoryHost {
    nodes: Vec<MemoryNode>,
    /// Counters for every operation the engine performed.
    pub stats: HostStats,
}

impl MemoryHost {
    /// Create an empty host.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            stats: HostStats::default(),
        }
    }

    /// Create a detached container to render into. Does not count as an
    /// engine-created node.
    pub fn create_root(&mut self) -> MemoryNodeId {
        self.push(MemoryNode::Container {
            tag: "root".to_string(),
            attributes: IndexMap::new(),
            children: Vec::new(),
        })
    }

    /// The tag of a container node, or `None` for leaves.
    pub fn tag(&self, id: MemoryNodeId) -> Option<&str> {
        match self.node(id) {
            MemoryNode::Container { tag, .. } => Some(tag),
            MemoryNode::Leaf { .. } => None,
        }
    }

    /// The text of a leaf node, or `None` for containers.
    pub fn text(&self, id: MemoryNodeId) -> Option<&str> {
        match self.node(id) {
            MemoryNode::Leaf { text } => Some(text),
            MemoryNode::Container { .. } => None,
        }
    }

    /// An attribute value on a container node.
    pub fn attribute(&self, id: MemoryNodeId, name: &str) -> Option<&AttrValue> {
        match self.node(id) {
            MemoryNode::Container { attributes, .. } => attributes.get(name),
            MemoryNode::Leaf { .. } => None,
        }
    }

    /// The attached children of a container node, in order.
    pub fn children(&self, id: MemoryNodeId) -> &[MemoryNodeId] {
        match self.node(id) {
            MemoryNode::Container { children, .. } => children,
            MemoryNode::Leaf { .. } => &[],
        }
    }

    /// Whether `id` is `root` or attached somewhere beneath it.
    pub fn contains(&self, root: MemoryNodeId, id: MemoryNodeId) -> bool {
        if root == id {
            return true;
        }
        self.children(root)
            .iter()
            .any(|&child| self.contains(child, id))
    }

    /// Render the subtree under `id` as an HTML-like string, for test
    /// assertions. Attributes appear in insertion order.
    pub fn render_to_string(&self, id: MemoryNodeId) -> String {
        match self.node(id) {
            MemoryNode::Leaf { text } => text.clone(),
            MemoryNode::Container {
                tag,
                attributes,
                children,
            } => {
                let mut out = format!("<{tag}");
                for (name, value) in attributes {
                    match value {
                        AttrValue::String(s) => out.push_str(&format!(" {name}=\"{s}\"")),
                        other => out.push_str(&format!(" {name}={other}")),
                    }
                }
                out.push('>');
                for &child in children {
                    out.push_str(&self.render_to_string(child));
                }
                out.push_str(&format!("</{tag}>"));
                out
            }
        }
    }

    fn push(&mut self, node: MemoryNode) -> MemoryNodeId {
        self.nodes.push(node);
        MemoryNodeId(self.nodes.len() as u32 - 1)
    }

    fn node(&self, id: MemoryNodeId) -> &MemoryNode {
        &self.nodes[id.0 as usize]
    }

    fn node_mut(&mut self, id: MemoryNodeId) -> &mut MemoryNode {
        &mut self.nodes[id.0 as usize]
    }
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl HostRenderer for MemoryHost {
    type Node = MemoryNodeId;

    fn create_container(&mut self, tag: &str) -> MemoryNodeId {
        self.stats.containers_created += 1;
        self.push(MemoryNode::Container {
            tag: tag.to_string(),
            attributes: IndexMap::new(),
            children: Vec::new(),
        })
    }

    fn create_leaf(&mut self, text: &str) -> MemoryNodeId {
        self.stats.leaves_created += 1;
        self.push(MemoryNode::Leaf {
            text: text.to_string(),
        })
    }

    fn set_properties(&mut self, node: &MemoryNodeId, patch: &PropsPatch) {
        self.stats.prop_syncs += 1;
        match self.node_mut(*node) {
            MemoryNode::Container { attributes, .. } => {
                for name in &patch.remove {
                    attributes.shift_remove(name);
                }
                for (name, value) in &patch.set {
                    attributes.insert(name.clone(), value.clone());
                }
            }
            MemoryNode::Leaf { text } => {
                if let Some(new_text) = &patch.text {
                    *text = new_text.clone();
                }
            }
        }
    }

    fn append_child(&mut self, parent: &MemoryNodeId, child: &MemoryNodeId) {
        self.stats.appends += 1;
        if let MemoryNode::Container { children, .. } = self.node_mut(*parent) {
            children.push(*child);
        }
    }

    fn remove_child(&mut self, parent: &MemoryNodeId, child: &MemoryNodeId) {
        self.stats.removes += 1;
        if let MemoryNode::Container { children, .. } = self.node_mut(*parent) {
            children.retain(|c| c != child);
        }
    }

    fn is_leaf(&self, node: &MemoryNodeId) -> bool {
        matches!(self.node(*node), MemoryNode::Leaf { .. })
    }
}
