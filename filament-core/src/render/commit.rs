//! Commit Phase
//!
//! Once a pass's walk has visited every fiber, the commit phase applies
//! the accumulated effects to the host tree in one synchronous sweep:
//! first the new tree in depth-first pre-order (a node's descendants
//! before its next sibling, so a freshly placed parent exists in the host
//! tree before its children attach into it), then the deletion set,
//! each entry removed children-before-node. Placements therefore land
//! before the nodes they replace are removed.
//!
//! The root fiber is the container boundary: it is never attached or
//! patched itself, and the walk starts at its first child. A fiber that
//! reaches commit without a host node (or whose parent lacks one) was
//! already handled during the walk and is skipped silently.

use tracing::debug;

use crate::fiber::{EffectTag, FiberArena, FiberId};
use crate::host::HostRenderer;
use crate::render::reconcile::diff_props;

/// What a commit did, for the log line and for tests inside the crate.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CommitStats {
    pub placed: usize,
    pub updated: usize,
    pub deleted: usize,
}

/// Apply every effect of the finished pass rooted at `root`, then the
/// deletion set. Clears `alternate` links along the way; the caller
/// publishes the root and sweeps the arena afterwards.
pub(crate) fn commit_pass<H: HostRenderer>(
    host: &mut H,
    arena: &mut FiberArena<H::Node>,
    root: FiberId,
    deletions: &[FiberId],
) -> CommitStats {
    let mut stats = CommitStats::default();

    if let Some(first_child) = arena.get(root).child {
        commit_work(host, arena, first_child, &mut stats);
    }
    arena.get_mut(root).alternate = None;

    for &fiber_id in deletions {
        commit_deletion(host, arena, fiber_id, &mut stats);
    }

    debug!(
        placed = stats.placed,
        updated = stats.updated,
        deleted = stats.deleted,
        "commit complete"
    );
    stats
}

/// Commit one fiber, then its descendants, then its sibling chain.
fn commit_work<H: HostRenderer>(
    host: &mut H,
    arena: &mut FiberArena<H::Node>,
    fiber_id: FiberId,
    stats: &mut CommitStats,
) {
    let effect = arena.get(fiber_id).effect;
    match effect {
        EffectTag::Placement => {
            let node = arena.get(fiber_id).host.clone();
            let parent_host = arena
                .get(fiber_id)
                .parent
                .and_then(|parent| arena.get(parent).host.clone());
            if let (Some(node), Some(parent_host)) = (node, parent_host) {
                host.append_child(&parent_host, &node);
                stats.placed += 1;
            }
        }
        EffectTag::Update => {
            let patch = arena.get(fiber_id).alternate.map(|alt| {
                diff_props(
                    &arena.get(alt).element.props,
                    &arena.get(fiber_id).element.props,
                )
            });
            if let (Some(patch), Some(node)) = (patch, arena.get(fiber_id).host.clone()) {
                if !patch.is_empty() {
                    host.set_properties(&node, &patch);
                    stats.updated += 1;
                }
            }
        }
        // Deleted fibers are never linked into the new tree; nothing to do
        // if one somehow shows up here.
        EffectTag::Deletion => {}
    }
    arena.get_mut(fiber_id).alternate = None;

    if let Some(child) = arena.get(fiber_id).child {
        commit_work(host, arena, child, stats);
    }
    if let Some(sibling) = arena.get(fiber_id).sibling {
        commit_work(host, arena, sibling, stats);
    }
}

/// Remove a deleted fiber's host subtree, children before the node
/// itself, then count it. The fibers themselves are reclaimed by the
/// post-commit sweep.
fn commit_deletion<H: HostRenderer>(
    host: &mut H,
    arena: &mut FiberArena<H::Node>,
    fiber_id: FiberId,
    stats: &mut CommitStats,
) {
    let mut cursor = arena.get(fiber_id).child;
    while let Some(child) = cursor {
        commit_deletion(host, arena, child, stats);
        cursor = arena.get(child).sibling;
    }

    let node = arena.get(fiber_id).host.clone();
    let parent_host = arena
        .get(fiber_id)
        .parent
        .and_then(|parent| arena.get(parent).host.clone());
    if let (Some(node), Some(parent_host)) = (node, parent_host) {
        host.remove_child(&parent_host, &node);
        stats.deleted += 1;
    }
}
