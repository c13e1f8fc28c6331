//! Renderer and Work-Loop Scheduler
//!
//! The renderer owns all per-root state: the fiber arena, the last
//! committed tree, the in-flight pass and its resumption point, and the
//! deletion set. One renderer serves one root; independent roots get
//! independent renderers and share nothing.
//!
//! # How a pass runs
//!
//! 1. [`Renderer::render`] wraps the element tree in a synthetic root
//!    fiber bound to the container, with the previously committed root as
//!    its alternate, and arms the traversal.
//!
//! 2. [`Renderer::work`] performs units of work, one fiber each, in
//!    depth-first pre-order: validate the fiber's container, realize its
//!    host node if missing, reconcile its children, then move to its
//!    child, else its sibling, else the nearest ancestor's sibling. After
//!    each unit the caller's [`WorkBudget`] decides whether to suspend;
//!    the traversal position survives suspension untouched, so a pass
//!    split across many idle slots visits the same fibers in the same
//!    order as an uninterrupted one.
//!
//! 3. When the traversal returns to the root, the commit phase applies
//!    every accumulated effect in one synchronous sweep and publishes the
//!    new tree as the baseline for the next pass.
//!
//! A second `render` call while a pass is in flight is rejected rather
//! than interleaved; a fatal structural error aborts the pass and sweeps
//! the arena back to the committed baseline.

use tracing::warn;

use crate::element::{Element, ROOT_ELEMENT};
use crate::error::{RenderError, Result};
use crate::fiber::{EffectTag, Fiber, FiberArena, FiberId};
use crate::host::HostRenderer;
use crate::render::budget::{Unbounded, WorkBudget};
use crate::render::commit::commit_pass;
use crate::render::reconcile::reconcile_children;

/// Outcome of a [`Renderer::work`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// The budget expired with fibers still to visit; call `work` again
    /// on the next idle slot.
    Yielded,

    /// The walk finished and the pass committed.
    Committed,

    /// No pass is in flight.
    Idle,
}

/// The rendering engine for a single root.
pub struct Renderer<H: HostRenderer> {
    host: H,
    arena: FiberArena<H::Node>,
    /// Root fiber of the most recently committed pass.
    committed: Option<FiberId>,
    /// Root fiber of the in-flight pass.
    wip_root: Option<FiberId>,
    /// Resumption point: the fiber the next unit of work will visit.
    next_unit: Option<FiberId>,
    /// Unmatched previous fibers accumulated by the in-flight pass.
    deletions: Vec<FiberId>,
    /// Units of work performed by the in-flight (or just-committed) pass.
    units: u64,
}

impl<H: HostRenderer> Renderer<H> {
    /// Create a renderer around a host adapter.
    pub fn new(host: H) -> Self {
        Self {
            host,
            arena: FiberArena::new(),
            committed: None,
            wip_root: None,
            next_unit: None,
            deletions: Vec::new(),
            units: 0,
        }
    }

    /// The host adapter.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The host adapter, mutably. Intended for adapter bookkeeping such as
    /// resetting counters, not for editing nodes the engine owns.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Whether a pass has started but not yet committed.
    pub fn is_rendering(&self) -> bool {
        self.wip_root.is_some()
    }

    /// Units of work performed by the current pass so far, or by the last
    /// pass once it commits.
    pub fn units_of_work(&self) -> u64 {
        self.units
    }

    /// Begin a render pass: `tree` becomes the desired content of
    /// `container`.
    ///
    /// The pass does no work until [`Renderer::work`] is called. Fails
    /// with [`RenderError::RenderInFlight`] if a previous pass has not
    /// committed; passes over one root never interleave.
    pub fn render(&mut self, container: H::Node, tree: Element) -> Result<()> {
        if self.wip_root.is_some() {
            return Err(RenderError::RenderInFlight);
        }

        let mut root = Fiber::new(Element::new(ROOT_ELEMENT, vec![tree]));
        root.host = Some(container);
        root.alternate = self.committed;
        root.effect = EffectTag::Update;
        let root_id = self.arena.alloc(root);

        self.wip_root = Some(root_id);
        self.next_unit = Some(root_id);
        self.units = 0;
        Ok(())
    }

    /// Run units of work until the budget yields or the pass commits.
    ///
    /// Fatal structural errors abort the pass entirely: no partial commit,
    /// the previously committed tree stays the baseline, and the error
    /// propagates to the caller.
    pub fn work(&mut self, budget: &mut impl WorkBudget) -> Result<Progress> {
        if self.wip_root.is_none() {
            return Ok(Progress::Idle);
        }

        while let Some(current) = self.next_unit {
            match self.perform_unit(current) {
                Ok(next) => {
                    self.next_unit = next;
                    self.units += 1;
                }
                Err(err) => {
                    self.abort_pass();
                    return Err(err);
                }
            }
            if self.next_unit.is_some() && budget.is_exhausted() {
                return Ok(Progress::Yielded);
            }
        }

        self.commit();
        Ok(Progress::Committed)
    }

    /// Begin a pass and drive it to commit without yielding.
    pub fn render_blocking(&mut self, container: H::Node, tree: Element) -> Result<()> {
        self.render(container, tree)?;
        self.work(&mut Unbounded).map(|_| ())
    }

    /// Process one fiber and return the next fiber to visit.
    fn perform_unit(&mut self, id: FiberId) -> Result<Option<FiberId>> {
        let is_root = self.wip_root == Some(id);
        if !is_root {
            let parent_id = self
                .arena
                .get(id)
                .parent
                .ok_or(RenderError::DetachedFiber(id))?;
            let parent_host = self
                .arena
                .get(parent_id)
                .host
                .clone()
                .ok_or(RenderError::MissingParentHost(id))?;
            if self.host.is_leaf(&parent_host) {
                warn!(fiber = %id, "parent host node cannot hold children; dropping subtree");
                self.unlink_from_parent(id, parent_id);
                return Ok(self.next_fiber(id));
            }
        }

        if self.arena.get(id).host.is_none() {
            let node = if self.arena.get(id).is_text() {
                let text = self
                    .arena
                    .get(id)
                    .element
                    .node_value()
                    .unwrap_or_default()
                    .to_string();
                self.host.create_leaf(&text)
            } else {
                let tag = self.arena.get(id).element.kind.clone();
                self.host.create_container(&tag)
            };
            self.arena.get_mut(id).host = Some(node);
        }

        reconcile_children(&mut self.arena, id, &mut self.deletions);

        Ok(self.next_fiber(id))
    }

    /// Depth-first pre-order successor: child, else sibling, else the
    /// nearest ancestor's sibling. `None` once the walk returns to the
    /// root.
    fn next_fiber(&self, id: FiberId) -> Option<FiberId> {
        if let Some(child) = self.arena.get(id).child {
            return Some(child);
        }
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            if self.wip_root == Some(current) {
                return None;
            }
            let fiber = self.arena.get(current);
            if let Some(sibling) = fiber.sibling {
                return Some(sibling);
            }
            cursor = fiber.parent;
        }
        None
    }

    /// Remove `id` from `parent`'s child chain so neither traversal nor
    /// commit sees it again. The fiber itself is reclaimed by the
    /// post-commit sweep.
    fn unlink_from_parent(&mut self, id: FiberId, parent_id: FiberId) {
        let next = self.arena.get(id).sibling;
        if self.arena.get(parent_id).child == Some(id) {
            self.arena.get_mut(parent_id).child = next;
            return;
        }
        let mut cursor = self.arena.get(parent_id).child;
        while let Some(current) = cursor {
            if self.arena.get(current).sibling == Some(id) {
                self.arena.get_mut(current).sibling = next;
                return;
            }
            cursor = self.arena.get(current).sibling;
        }
    }

    /// Apply every accumulated effect and publish the new baseline.
    fn commit(&mut self) {
        let root = match self.wip_root.take() {
            Some(root) => root,
            None => return,
        };

        commit_pass(&mut self.host, &mut self.arena, root, &self.deletions);

        // Publish: the finished tree becomes the next pass's baseline and
        // everything else in the arena is reclaimed.
        self.committed = Some(root);
        self.next_unit = None;
        self.deletions.clear();
        self.arena.sweep(root);
    }

    /// Discard the in-flight pass after a fatal error, restoring the
    /// committed baseline.
    fn abort_pass(&mut self) {
        self.wip_root = None;
        self.next_unit = None;
        self.deletions.clear();
        match self.committed {
            Some(root) => {
                self.arena.sweep(root);
            }
            None => self.arena.clear(),
        }
    }
}
