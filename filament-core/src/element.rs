//! Element Model
//!
//! Elements are the immutable input to the renderer: a declarative
//! description of the host tree that should exist after the next commit.
//! The engine never mutates an element; each render pass receives a fresh
//! tree and diffs it against the fibers produced by the previous pass.
//!
//! # Shape
//!
//! An element is a `{type, props}` pair. `props` carries an ordered
//! attribute map, the ordered child elements, and (for text elements only)
//! the raw string payload. Two element types are reserved:
//!
//! - [`TEXT_ELEMENT`] marks raw text content. Text elements carry their
//!   string in `node_value` and normally have no children.
//! - [`ROOT_ELEMENT`] is fabricated by the engine itself to wrap the
//!   user-supplied tree; it never appears in caller input.
//!
//! # Serialization
//!
//! Elements derive serde support so an embedder can hand the engine a
//! JSON tree directly:
//!
//! ```rust,ignore
//! let tree: Element = serde_json::from_str(r#"{
//!     "type": "div",
//!     "props": {
//!         "attributes": {"id": "app"},
//!         "children": [
//!             {"type": "#text", "props": {"nodeValue": "hi"}}
//!         ]
//!     }
//! }"#)?;
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Reserved element type for raw text content.
pub const TEXT_ELEMENT: &str = "#text";

/// Reserved element type for the synthetic root fiber that wraps each
/// render pass. Bound to the container node supplied to `render`.
pub const ROOT_ELEMENT: &str = "#root";

/// Attribute values are arbitrary JSON values.
pub type AttrValue = serde_json::Value;

/// An immutable description of one desired host node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Host tag name, or one of the reserved `#text` / `#root` markers.
    #[serde(rename = "type")]
    pub kind: String,

    /// Attributes, children, and (for text) the string payload.
    #[serde(default)]
    pub props: Props,
}

/// The properties of an element.
///
/// `attributes` never contains `children` or `nodeValue`; those live in
/// their own fields so the property differ can treat the attribute map
/// uniformly.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Props {
    /// Host-level attributes in declaration order.
    #[serde(default)]
    pub attributes: IndexMap<String, AttrValue>,

    /// Child elements in render order. Order is positionally significant.
    #[serde(default)]
    pub children: Vec<Element>,

    /// Text payload. Present exactly when the element is a text element.
    #[serde(default, rename = "nodeValue", skip_serializing_if = "Option::is_none")]
    pub node_value: Option<String>,
}

impl Element {
    /// Create a container element with the given children.
    pub fn new(kind: impl Into<String>, children: Vec<Element>) -> Self {
        Self {
            kind: kind.into(),
            props: Props {
                children,
                ..Props::default()
            },
        }
    }

    /// Create a text element carrying the given string.
    pub fn text(value: impl Into<String>) -> Self {
        Self {
            kind: TEXT_ELEMENT.to_string(),
            props: Props {
                node_value: Some(value.into()),
                ..Props::default()
            },
        }
    }

    /// Add an attribute, keeping declaration order. Consumes and returns
    /// the element so attributes chain off the constructor.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.props.attributes.insert(name.into(), value.into());
        self
    }

    /// Whether this is a text element.
    pub fn is_text(&self) -> bool {
        self.kind == TEXT_ELEMENT
    }

    /// The child elements in render order.
    pub fn children(&self) -> &[Element] {
        &self.props.children
    }

    /// The text payload, if this is a text element.
    pub fn node_value(&self) -> Option<&str> {
        self.props.node_value.as_deref()
    }
}
