//! Filament Core
//!
//! This crate provides the core rendering engine for the Filament
//! incremental renderer. It implements:
//!
//! - An immutable element model describing the desired host tree
//! - Fiber bookkeeping: one mutable work record per tree position,
//!   held in an index-based arena
//! - Type-based child reconciliation with property diffing
//! - A cooperative work loop that walks the tree one unit of work at a
//!   time and yields between units
//! - A synchronous commit phase that applies the computed effects
//!   through a pluggable host-renderer boundary
//!
//! The engine is platform-agnostic: everything it needs from the target
//! platform goes through the [`host::HostRenderer`] trait, and an
//! in-memory implementation ships with the crate for headless use.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - `element`: the immutable element model and its serde support
//! - `fiber`: fiber records, effect tags, and the fiber arena
//! - `render`: reconciliation, the work-loop scheduler, and commit
//! - `host`: the host-renderer boundary and the in-memory host
//! - `error`: the engine's error taxonomy
//!
//! # Example
//!
//! ```rust,ignore
//! use filament_core::element::Element;
//! use filament_core::host::MemoryHost;
//! use filament_core::render::{Renderer, Unbounded};
//!
//! let mut renderer = Renderer::new(MemoryHost::new());
//! let container = renderer.host_mut().create_root();
//!
//! let tree = Element::new("div", vec![
//!     Element::new("span", vec![Element::text("hi")]),
//! ]);
//! renderer.render(container, tree)?;
//!
//! // Drive the pass from the embedder's idle loop; here, all at once.
//! renderer.work(&mut Unbounded)?;
//! ```

pub mod element;
pub mod error;
pub mod fiber;
pub mod host;
pub mod render;
