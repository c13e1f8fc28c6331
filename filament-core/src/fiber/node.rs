//! Fiber Nodes
//!
//! This module defines the unit-of-work record and its identifier. One
//! fiber mirrors one element instance for the duration of a render pass;
//! across passes the `alternate` link threads a tree position's history.

use std::fmt;

use crate::element::Element;

/// Index of a fiber within its arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FiberId(u32);

impl FiberId {
    pub(crate) fn from_index(index: usize) -> Self {
        Self(index as u32)
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for FiberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The action a fiber's host node requires during commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectTag {
    /// Reuse the alternate's host node; sync properties that changed.
    Update,

    /// Freshly created host node that must be attached to its parent.
    Placement,

    /// Unmatched previous-pass fiber whose host subtree must be removed.
    Deletion,
}

/// One unit of work: the mutable record for a single tree position.
///
/// `N` is the host renderer's node handle. Link fields hold arena indices;
/// `parent` is a non-owning back-reference used only for upward traversal.
#[derive(Debug)]
pub struct Fiber<N> {
    /// The element this fiber currently represents.
    pub element: Element,

    /// The host node owned by this fiber, once realized by the work loop.
    pub host: Option<N>,

    /// Enclosing fiber. `None` only for the render root.
    pub parent: Option<FiberId>,

    /// First child in render order.
    pub child: Option<FiberId>,

    /// Next sibling in render order.
    pub sibling: Option<FiberId>,

    /// The fiber for the same tree position in the previous committed
    /// pass, if this position existed then.
    pub alternate: Option<FiberId>,

    /// What the commit phase must do for this fiber.
    pub effect: EffectTag,
}

impl<N> Fiber<N> {
    /// Create an unlinked fiber for the given element.
    ///
    /// New fibers default to [`EffectTag::Placement`]; the reconciler
    /// switches matched fibers to `Update` and unmatched old fibers to
    /// `Deletion`.
    pub fn new(element: Element) -> Self {
        Self {
            element,
            host: None,
            parent: None,
            child: None,
            sibling: None,
            alternate: None,
            effect: EffectTag::Placement,
        }
    }

    /// Whether this fiber represents raw text.
    pub fn is_text(&self) -> bool {
        self.element.is_text()
    }
}
