//! Child Reconciliation
//!
//! For one fiber being visited, turn the new desired children (from its
//! element) plus the previous render's children (from its alternate) into
//! a fresh child/sibling chain, deciding per position whether to reuse a
//! host node or create one, and collecting every previous child that was
//! not reused for deletion.
//!
//! # Algorithm
//!
//! 1. Collect the alternate's child fibers in order and group their
//!    positions by element type.
//!
//! 2. Walk the new child elements in order. Each claims the first
//!    not-yet-claimed previous fiber of the same type, if any:
//!    - claimed: the new fiber inherits the host node, records the old
//!      fiber as its alternate, and is tagged `Update`;
//!    - unclaimed: the new fiber starts without a host node and is tagged
//!      `Placement`.
//!    New fibers are linked into the chain in the new children's order.
//!
//! 3. Every previous fiber left unclaimed is tagged `Deletion` and pushed
//!    onto the pass's deletion set. Deleted fibers are not linked into the
//!    new chain; they are committed once from the deletion set and never
//!    traversed again.
//!
//! # Known limitation
//!
//! Matching is by element type only, first-available-wins. There is no
//! key- or distance-based matching, so reordering same-typed siblings
//! reuses host nodes in positional order rather than following the moved
//! content. This mirrors the engine's established behavior and is kept
//! for compatibility.

use std::collections::VecDeque;

use indexmap::IndexMap;
use smallvec::SmallVec;

use crate::element::Props;
use crate::fiber::{EffectTag, Fiber, FiberArena, FiberId};
use crate::host::PropsPatch;

/// Rebuild `fiber_id`'s child chain from its element's children, diffing
/// against its alternate's children. Unmatched previous fibers are tagged
/// and appended to `deletions`.
pub(crate) fn reconcile_children<N: Clone>(
    arena: &mut FiberArena<N>,
    fiber_id: FiberId,
    deletions: &mut Vec<FiberId>,
) {
    // Snapshot inputs before mutating the arena.
    let (new_children, old_head) = {
        let fiber = arena.get(fiber_id);
        let old_head = fiber.alternate.and_then(|alt| arena.get(alt).child);
        (fiber.element.props.children.clone(), old_head)
    };

    // Previous children in order, then grouped by type. Within one type
    // the queue preserves position order, so claims are first-match-wins.
    let mut old_fibers: SmallVec<[FiberId; 8]> = SmallVec::new();
    let mut cursor = old_head;
    while let Some(id) = cursor {
        old_fibers.push(id);
        cursor = arena.get(id).sibling;
    }

    let mut by_type: IndexMap<String, VecDeque<usize>> = IndexMap::new();
    for (position, &id) in old_fibers.iter().enumerate() {
        by_type
            .entry(arena.get(id).element.kind.clone())
            .or_default()
            .push_back(position);
    }
    let mut claimed = vec![false; old_fibers.len()];

    let mut previous_new: Option<FiberId> = None;
    for element in new_children {
        let claim = by_type
            .get_mut(&element.kind)
            .and_then(|queue| queue.pop_front());

        let mut fiber = Fiber::new(element);
        fiber.parent = Some(fiber_id);
        if let Some(position) = claim {
            claimed[position] = true;
            let old_id = old_fibers[position];
            fiber.host = arena.get(old_id).host.clone();
            fiber.alternate = Some(old_id);
            fiber.effect = EffectTag::Update;
        }
        let new_id = arena.alloc(fiber);

        match previous_new {
            None => arena.get_mut(fiber_id).child = Some(new_id),
            Some(prev) => arena.get_mut(prev).sibling = Some(new_id),
        }
        previous_new = Some(new_id);
    }

    for (position, &old_id) in old_fibers.iter().enumerate() {
        if !claimed[position] {
            arena.get_mut(old_id).effect = EffectTag::Deletion;
            deletions.push(old_id);
        }
    }
}

/// Compute the property patch taking a node from `old` to `new`.
///
/// Attributes present in `new` with a different (or no) previous value are
/// set in the new props' declaration order; attributes that vanished are
/// removed. The text payload is carried only when it changed; a vanished
/// value falls back to the empty string. `children` and the text payload
/// live outside the attribute map, so they can never leak into `set` or
/// `remove`.
pub(crate) fn diff_props(old: &Props, new: &Props) -> PropsPatch {
    let mut patch = PropsPatch::default();

    for (name, value) in &new.attributes {
        if old.attributes.get(name) != Some(value) {
            patch.set.push((name.clone(), value.clone()));
        }
    }
    for name in old.attributes.keys() {
        if !new.attributes.contains_key(name) {
            patch.remove.push(name.clone());
        }
    }
    if new.node_value != old.node_value {
        patch.text = Some(new.node_value.clone().unwrap_or_default());
    }

    patch
}
