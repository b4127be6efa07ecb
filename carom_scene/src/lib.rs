// Copyright 2025 the Carom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Carom Scene: composite 2D shapes with bounce movement.
//!
//! Carom Scene is the data model for a small animated world: a fixed set of
//! shape variants that drift inside a rectangular boundary, bounce off its
//! edges, and can nest inside carrier shapes that translate their children's
//! coordinate space.
//!
//! - Shapes live in an arena owned by [`Scene`] and are addressed by
//!   generational [`ShapeId`]s; a child's parent link is a non-owning
//!   back-reference, so the hierarchy has no reference cycles.
//! - [`Scene::step`] advances one shape (and, for carriers, its whole
//!   subtree) by one tick of deterministic bounce physics.
//! - [`Scene::paint`] renders through the [`Painter`] capability; the crate
//!   itself never touches pixels. [`RecordingPainter`] captures the call
//!   sequence for tests and headless hosts.
//!
//! Structural change notification lives one layer up, in `carom_model`,
//! which mediates attach/detach so observers can mirror the hierarchy
//! incrementally.
//!
//! ## Minimal example
//!
//! ```rust
//! use carom_scene::{Bounds, RecordingPainter, Scene, ShapeKind, ShapeState};
//!
//! let mut scene = Scene::new();
//! let carrier = scene.insert(
//!     ShapeState {
//!         x: 10,
//!         y: 10,
//!         width: 200,
//!         height: 150,
//!         ..ShapeState::default()
//!     },
//!     ShapeKind::carrier(),
//! );
//! let oval = scene.insert(
//!     ShapeState {
//!         width: 30,
//!         height: 30,
//!         ..ShapeState::default()
//!     },
//!     ShapeKind::Oval,
//! );
//! scene.attach(carrier, oval)?;
//!
//! // One animation tick: move, then draw.
//! scene.step(carrier, Bounds::new(800, 600));
//! let mut painter = RecordingPainter::new();
//! scene.paint(carrier, &mut painter);
//! assert!(!painter.ops().is_empty());
//! # Ok::<(), carom_scene::SceneError>(())
//! ```
//!
//! ## Coordinate spaces
//!
//! Positions are integer pixels with a top-left origin. A top-level shape's
//! position is world-space; a child's position is relative to its carrier's
//! top-left corner, and the carrier's own interior is the boundary the child
//! bounces in. Painting translates the painter's origin on the way into each
//! carrier and back out on the way up.

mod error;
mod painter;
mod scene;
mod types;

pub use color::Rgba8;
pub use error::SceneError;
pub use painter::{
    DEFAULT_DRAW_COLOR, HEXAGON_DIAMOND_THRESHOLD, HEXAGON_EDGE_INSET, PaintOp, Painter,
    RecordingPainter,
};
pub use scene::Scene;
pub use types::{Bounds, ShapeId, ShapeKind, ShapeState};
