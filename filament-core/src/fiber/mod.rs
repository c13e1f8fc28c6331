//! Fiber Tree
//!
//! A fiber is the mutable per-render record for one tree position: the
//! element it currently represents, the host node it owns, links to its
//! kin, and the effect the commit phase must apply. Fibers form a tree in
//! left-child right-sibling encoding, held in an index-based arena.
//!
//! # Design Decisions
//!
//! 1. Fibers live in an arena and reference each other by [`FiberId`]
//!    rather than by owning pointers. The parent link is a plain index,
//!    which sidesteps the reference-cycle problem a parent back-pointer
//!    would otherwise create.
//!
//! 2. The `alternate` link points at the fiber that occupied the same
//!    tree position in the previously committed pass. Old fibers are never
//!    mutated while they serve as alternates; they are reclaimed wholesale
//!    by [`FiberArena::sweep`] once the next commit publishes.
//!
//! 3. Fibers tagged [`EffectTag::Deletion`] are tracked outside the new
//!    child chains, so they are committed exactly once and then never
//!    traversed again.

mod arena;
mod node;

pub use arena::FiberArena;
pub use node::{EffectTag, Fiber, FiberId};
