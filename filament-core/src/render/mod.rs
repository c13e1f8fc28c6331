//! Rendering Pipeline
//!
//! This module implements the three phases of a render pass and the
//! scheduler that drives them.
//!
//! # Overview
//!
//! A pass flows through:
//!
//! - the work loop ([`Renderer::work`]), which walks the fiber tree one
//!   unit of work at a time and yields to the embedder between units;
//! - the reconciler (`reconcile`), invoked per fiber to diff its new
//!   children against the previous render's and tag each with an effect;
//! - the commit phase (`commit`), which applies every accumulated effect
//!   to the host tree in one synchronous sweep and publishes the new
//!   baseline.
//!
//! # Design Decisions
//!
//! 1. Suspension happens only between units of work. Each unit (validate,
//!    realize host node, reconcile children) is atomic, so a resumed pass
//!    continues exactly where it stopped and visits every fiber once.
//!
//! 2. The commit phase runs only after the entire walk finishes. Partial
//!    trees are never committed; a fatal error mid-walk discards the
//!    work-in-progress tree and leaves the committed baseline untouched.
//!
//! 3. Yielding is expressed through caller-supplied [`WorkBudget`]s
//!    rather than a host idle-callback registration, so any scheduling
//!    primitive (or a test harness stepping synchronously) can drive the
//!    loop.

mod budget;
mod commit;
mod reconcile;
mod renderer;

pub use budget::{Deadline, StepBudget, Unbounded, WorkBudget};
pub use renderer::{Progress, Renderer};
