// Copyright 2025 the Carom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the shape scene: identifiers, bounds, per-shape state,
//! and the closed set of shape variants.

use color::Rgba8;

/// Identifier for a shape in the scene (generational).
///
/// Stale identifiers (whose slot has been freed or reused) are detected by a
/// generation mismatch: queries return `None`/`false`/`0` and movement is a
/// no-op, while structural mutations that need a result fail with
/// [`SceneError::StaleShape`](crate::SceneError::StaleShape).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ShapeId(pub(crate) u32, pub(crate) u32);

impl ShapeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// An enclosing rectangle with its origin at `(0, 0)`.
///
/// Used both for the outer world a top-level shape bounces in and for a
/// carrier's local interior, which bounds its children.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Bounds {
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

impl Bounds {
    /// Create bounds with the given width and height.
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Kinematic and display state shared by every shape variant.
///
/// Positions are integer pixels with a top-left origin. A child shape's
/// position is expressed in its carrier's local coordinate space.
///
/// Construct with struct-update syntax:
///
/// ```rust
/// use carom_scene::ShapeState;
///
/// let state = ShapeState {
///     x: 10,
///     y: 10,
///     delta_x: -3,
///     ..ShapeState::default()
/// };
/// assert_eq!(state.delta_y, 5);
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ShapeState {
    /// Horizontal position of the top-left corner.
    pub x: i32,
    /// Vertical position of the top-left corner.
    pub y: i32,
    /// Horizontal velocity in pixels per step (sign is direction).
    pub delta_x: i32,
    /// Vertical velocity in pixels per step (sign is direction).
    pub delta_y: i32,
    /// Width in pixels. Must be positive.
    pub width: i32,
    /// Height in pixels. Must be positive.
    pub height: i32,
    /// Optional label, drawn centered on the shape's bounding box.
    pub text: Option<String>,
}

impl Default for ShapeState {
    fn default() -> Self {
        Self {
            x: 0,
            y: 0,
            delta_x: 5,
            delta_y: 5,
            width: 25,
            height: 35,
            text: None,
        }
    }
}

impl ShapeState {
    /// True if any part of this shape's bounding box falls outside `bounds`.
    pub fn out_of_bounds(&self, bounds: Bounds) -> bool {
        self.x < 0
            || self.x + self.width > bounds.width
            || self.y < 0
            || self.y + self.height > bounds.height
    }
}

/// The closed set of shape variants.
///
/// Leaf variants differ only in how they draw themselves. [`ShapeKind::Dynamic`]
/// additionally couples its drawing style to bounce history, and
/// [`ShapeKind::Carrier`] owns an ordered sequence of child shapes expressed in
/// its local coordinate space.
#[derive(Clone, Debug, PartialEq)]
pub enum ShapeKind {
    /// A plain rectangle outline.
    Rectangle,
    /// An oval inscribed in the bounding box.
    Oval,
    /// A hexagon; degenerates to a diamond below a fixed width threshold.
    Hexagon,
    /// A rectangle that paints filled with `color` after a horizontal bounce
    /// and as an outline after a vertical one.
    Dynamic {
        /// Fill color used after a horizontal bounce.
        color: Rgba8,
        /// Whether the most recent bounce was off a left/right boundary.
        ///
        /// Updated by [`Scene::step`](crate::Scene::step); on a same-step
        /// corner bounce the vertical axis is evaluated last and clears it.
        last_bounce_horizontal: bool,
    },
    /// A container shape. Children bounce within its local rectangle and are
    /// painted relative to its top-left corner, in insertion order.
    Carrier {
        /// Ordered child sequence. Managed through
        /// [`Scene::attach`](crate::Scene::attach) and
        /// [`Scene::detach`](crate::Scene::detach); order defines paint order
        /// and the child index reported to observers.
        children: Vec<ShapeId>,
    },
}

impl ShapeKind {
    /// A dynamic shape with the given fill color and no bounce history.
    pub const fn dynamic(color: Rgba8) -> Self {
        Self::Dynamic {
            color,
            last_bounce_horizontal: false,
        }
    }

    /// An empty carrier.
    pub const fn carrier() -> Self {
        Self::Carrier {
            children: Vec::new(),
        }
    }

    /// True for [`ShapeKind::Carrier`].
    pub const fn is_carrier(&self) -> bool {
        matches!(self, Self::Carrier { .. })
    }
}
