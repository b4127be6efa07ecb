// Copyright 2025 the Carom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core scene implementation: shape storage, structure, movement, painting.

use smallvec::SmallVec;

use crate::error::SceneError;
use crate::painter::Painter;
use crate::types::{Bounds, ShapeId, ShapeKind, ShapeState};

/// A shape scene: the arena that owns every shape.
///
/// Shapes are created detached with [`Scene::insert`] and wired into a
/// hierarchy with [`Scene::attach`]. A carrier owns its children; the child's
/// parent link is a non-owning back-reference kept consistent with exactly one
/// carrier's child sequence. All structure edits go through
/// [`Scene::attach`]/[`Scene::detach`], which is what keeps that invariant.
///
/// Child positions are expressed in their carrier's local coordinate space,
/// with the origin at the carrier's top-left corner.
///
/// ## Example
///
/// ```rust
/// use carom_scene::{Bounds, Scene, ShapeKind, ShapeState};
///
/// let mut scene = Scene::new();
/// let carrier = scene.insert(
///     ShapeState {
///         width: 100,
///         height: 100,
///         ..ShapeState::default()
///     },
///     ShapeKind::carrier(),
/// );
/// let oval = scene.insert(ShapeState::default(), ShapeKind::Oval);
/// assert_eq!(scene.attach(carrier, oval), Ok(0));
///
/// // One step against the outer world; the oval bounces inside the carrier.
/// scene.step(carrier, Bounds::new(500, 500));
/// assert_eq!(scene.parent_of(oval), Some(carrier));
/// ```
pub struct Scene {
    /// slots
    nodes: Vec<Option<Node>>,
    /// last generation per slot (persists across frees)
    generations: Vec<u32>,
    free_list: Vec<usize>,
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        f.debug_struct("Scene")
            .field("shapes_total", &total)
            .field("shapes_alive", &alive)
            .field("free_list", &self.free_list.len())
            .finish()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Debug)]
struct Node {
    generation: u32,
    parent: Option<ShapeId>,
    state: ShapeState,
    kind: ShapeKind,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
        }
    }

    /// True if `id` refers to a live shape.
    pub fn is_alive(&self, id: ShapeId) -> bool {
        self.nodes
            .get(id.idx())
            .and_then(|slot| slot.as_ref())
            .is_some_and(|node| node.generation == id.1)
    }

    /// The number of live shapes.
    pub fn len(&self) -> usize {
        self.nodes.len() - self.free_list.len()
    }

    /// True if the scene holds no live shapes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Create a detached shape and return its identifier.
    ///
    /// The shape has no parent until it is passed to [`Scene::attach`].
    pub fn insert(&mut self, state: ShapeState, kind: ShapeKind) -> ShapeId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, state, kind));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "ShapeId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, state, kind)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "ShapeId uses 32-bit indices by design."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        ShapeId::new(idx, generation)
    }

    /// Append `child` to `parent`'s child sequence and return the index it
    /// was assigned.
    ///
    /// `child` must be detached and its bounding box must fit entirely inside
    /// the carrier's local `(0, 0)-(width, height)` rectangle. On failure
    /// neither shape is modified.
    pub fn attach(&mut self, parent: ShapeId, child: ShapeId) -> Result<usize, SceneError> {
        if !self.is_alive(parent) || !self.is_alive(child) {
            return Err(SceneError::StaleShape);
        }
        if !self.node(parent).kind.is_carrier() {
            return Err(SceneError::NotACarrier);
        }
        if self.node(child).parent.is_some() {
            return Err(SceneError::AlreadyAttached);
        }
        // Reject attaching a shape under itself or under its own descendant.
        let mut ancestor = Some(parent);
        while let Some(a) = ancestor {
            if a == child {
                return Err(SceneError::WouldCycle);
            }
            ancestor = self.node(a).parent;
        }
        let interior = {
            let state = &self.node(parent).state;
            Bounds::new(state.width, state.height)
        };
        if self.node(child).state.out_of_bounds(interior) {
            return Err(SceneError::DoesNotFit {
                width: interior.width,
                height: interior.height,
            });
        }
        let index = match &mut self.node_mut(parent).kind {
            ShapeKind::Carrier { children } => {
                children.push(child);
                children.len() - 1
            }
            _ => unreachable!("carrier kind checked above"),
        };
        self.node_mut(child).parent = Some(parent);
        log::debug!(parent:? = parent, child:? = child, index; "attached shape to carrier");
        Ok(index)
    }

    /// Remove `child` from `parent`'s child sequence and clear its parent
    /// link, returning the index it occupied.
    ///
    /// Returns `None` and changes nothing if `child` is not a child of
    /// `parent` (or either identifier is stale) — removal is idempotent, not
    /// an error.
    pub fn detach(&mut self, parent: ShapeId, child: ShapeId) -> Option<usize> {
        if !self.is_alive(parent) || !self.is_alive(child) {
            return None;
        }
        let index = match &mut self.node_mut(parent).kind {
            ShapeKind::Carrier { children } => {
                let index = children.iter().position(|c| *c == child)?;
                children.remove(index);
                index
            }
            _ => return None,
        };
        self.node_mut(child).parent = None;
        log::debug!(parent:? = parent, child:? = child, index; "detached shape from carrier");
        Some(index)
    }

    /// Free a shape and its whole subtree.
    ///
    /// Detaches the shape from its parent first if it is attached. Freed
    /// identifiers become stale; their slots are reused with a bumped
    /// generation. A stale `id` is a no-op.
    pub fn remove(&mut self, id: ShapeId) {
        if !self.is_alive(id) {
            return;
        }
        if let Some(parent) = self.node(id).parent {
            self.detach(parent, id);
        }
        self.free_subtree(id);
    }

    fn free_subtree(&mut self, id: ShapeId) {
        let children: Vec<ShapeId> = self.children_of(id).to_vec();
        for child in children {
            self.free_subtree(child);
        }
        self.nodes[id.idx()] = None;
        self.free_list.push(id.idx());
    }

    /// The parent carrier of a live shape, or `None` for detached shapes,
    /// roots, and stale identifiers.
    pub fn parent_of(&self, id: ShapeId) -> Option<ShapeId> {
        if !self.is_alive(id) {
            return None;
        }
        self.node(id).parent
    }

    /// The child sequence of a carrier, in insertion order.
    ///
    /// Empty for leaf shapes and stale identifiers.
    pub fn children_of(&self, id: ShapeId) -> &[ShapeId] {
        if !self.is_alive(id) {
            return &[];
        }
        match &self.node(id).kind {
            ShapeKind::Carrier { children } => children,
            _ => &[],
        }
    }

    /// True if `shape` is a direct child of `parent`.
    pub fn contains(&self, parent: ShapeId, shape: ShapeId) -> bool {
        self.children_of(parent).contains(&shape)
    }

    /// The number of direct children of `parent`. Zero for leaves.
    pub fn shape_count(&self, parent: ShapeId) -> usize {
        self.children_of(parent).len()
    }

    /// The child of `parent` at `index`.
    ///
    /// Fails with [`SceneError::IndexOutOfRange`] if `index` is not in
    /// `[0, shape_count)`.
    pub fn shape_at(&self, parent: ShapeId, index: usize) -> Result<ShapeId, SceneError> {
        let children = self.children_of(parent);
        children
            .get(index)
            .copied()
            .ok_or(SceneError::IndexOutOfRange {
                index,
                count: children.len(),
            })
    }

    /// The index of `shape` within `parent`'s child sequence, or `None` if it
    /// is not a child of `parent`.
    pub fn index_of(&self, parent: ShapeId, shape: ShapeId) -> Option<usize> {
        self.children_of(parent).iter().position(|c| *c == shape)
    }

    /// The ordered sequence of shapes from the ultimate root down to and
    /// including `id`.
    ///
    /// This is the structural address observers use to locate a shape in an
    /// external hierarchical view. Empty for stale identifiers.
    pub fn path(&self, id: ShapeId) -> SmallVec<[ShapeId; 8]> {
        let mut path = SmallVec::new();
        if !self.is_alive(id) {
            return path;
        }
        let mut current = Some(id);
        while let Some(shape) = current {
            path.push(shape);
            current = self.node(shape).parent;
        }
        path.reverse();
        path
    }

    /// The kinematic and display state of a live shape.
    pub fn state(&self, id: ShapeId) -> Option<&ShapeState> {
        if !self.is_alive(id) {
            return None;
        }
        Some(&self.node(id).state)
    }

    /// Mutable access to a live shape's state.
    ///
    /// Intended for velocity, text, and sizing tweaks. Resizing a carrier does
    /// not retroactively re-validate children already inside it; they clamp to
    /// the new interior on the next [`Scene::step`].
    pub fn state_mut(&mut self, id: ShapeId) -> Option<&mut ShapeState> {
        if !self.is_alive(id) {
            return None;
        }
        Some(&mut self.node_mut(id).state)
    }

    /// The variant of a live shape.
    pub fn kind(&self, id: ShapeId) -> Option<&ShapeKind> {
        if !self.is_alive(id) {
            return None;
        }
        Some(&self.node(id).kind)
    }

    /// True if `id` is a live carrier.
    pub fn is_carrier(&self, id: ShapeId) -> bool {
        self.kind(id).is_some_and(ShapeKind::is_carrier)
    }

    /// True if any part of the shape's bounding box falls outside `bounds`.
    ///
    /// This is the admission check [`Scene::attach`] applies against the
    /// target carrier's interior. `false` for stale identifiers.
    pub fn out_of_bounds(&self, id: ShapeId, bounds: Bounds) -> bool {
        self.state(id).is_some_and(|state| state.out_of_bounds(bounds))
    }

    /// Advance a shape one step within `bounds`, bouncing off the edges.
    ///
    /// Each axis is evaluated unconditionally and independently, x first and
    /// then y, so a corner step can bounce on both axes. A bounce clamps the
    /// position to the boundary and inverts that axis's velocity; after one
    /// step from any starting state the position lies within
    /// `[0, bounds - size]` on both axes.
    ///
    /// A carrier first moves itself against `bounds`, then steps every child
    /// against its own (just-updated) width and height: children bounce within
    /// the carrier's local rectangle, so a moving carrier constrains its
    /// children's bounce box without dragging their positions.
    ///
    /// A stale `id` is a no-op.
    pub fn step(&mut self, id: ShapeId, bounds: Bounds) {
        if !self.is_alive(id) {
            return;
        }
        {
            let node = self.node_mut(id);
            let (bounced_x, bounced_y) = bounce(&mut node.state, bounds);
            if let ShapeKind::Dynamic {
                last_bounce_horizontal,
                ..
            } = &mut node.kind
            {
                if bounced_x {
                    *last_bounce_horizontal = true;
                }
                // Evaluated after x: on a same-step corner bounce the
                // vertical axis wins and the shape paints as an outline.
                if bounced_y {
                    *last_bounce_horizontal = false;
                }
            }
        }
        let (children, interior) = match &self.node(id).kind {
            ShapeKind::Carrier { children } if !children.is_empty() => {
                let state = &self.node(id).state;
                (children.clone(), Bounds::new(state.width, state.height))
            }
            _ => return,
        };
        for child in children {
            self.step(child, interior);
        }
    }

    /// Paint a shape with the given painter.
    ///
    /// Always performs the variant-specific drawing first, then — if the
    /// shape carries a label — one centered-text call with the shape's
    /// bounding box. Carriers draw their own outline, shift the painter's
    /// origin to their top-left corner, paint every child in sequence order,
    /// and shift the origin back; the translate pair is exact regardless of
    /// child count.
    pub fn paint<P: Painter>(&self, id: ShapeId, painter: &mut P) {
        if !self.is_alive(id) {
            return;
        }
        let node = self.node(id);
        let s = &node.state;
        match &node.kind {
            ShapeKind::Rectangle => painter.draw_rect(s.x, s.y, s.width, s.height),
            ShapeKind::Oval => painter.draw_oval(s.x, s.y, s.width, s.height),
            ShapeKind::Hexagon => painter.draw_hexagon(s.x, s.y, s.width, s.height),
            ShapeKind::Dynamic {
                color,
                last_bounce_horizontal,
            } => {
                if *last_bounce_horizontal {
                    let previous = painter.color();
                    painter.set_color(*color);
                    painter.fill_rect(s.x, s.y, s.width, s.height);
                    painter.set_color(previous);
                } else {
                    painter.draw_rect(s.x, s.y, s.width, s.height);
                }
            }
            ShapeKind::Carrier { children } => {
                painter.draw_rect(s.x, s.y, s.width, s.height);
                painter.translate(s.x, s.y);
                for child in children {
                    self.paint(*child, painter);
                }
                painter.translate(-s.x, -s.y);
            }
        }
        if let Some(text) = &s.text {
            painter.draw_centered_text(text, s.x, s.y, s.width, s.height);
        }
    }

    /// Access a node; panics if `id` is stale.
    fn node(&self, id: ShapeId) -> &Node {
        self.nodes[id.idx()].as_ref().expect("dangling ShapeId")
    }

    /// Access a node mutably; panics if `id` is stale.
    fn node_mut(&mut self, id: ShapeId) -> &mut Node {
        self.nodes[id.idx()].as_mut().expect("dangling ShapeId")
    }
}

impl Node {
    fn new(generation: u32, state: ShapeState, kind: ShapeKind) -> Self {
        Self {
            generation,
            parent: None,
            state,
            kind,
        }
    }
}

/// One step of the bounce algorithm over a single shape's state.
///
/// Returns whether the shape bounced on the x and y axes respectively.
fn bounce(state: &mut ShapeState, bounds: Bounds) -> (bool, bool) {
    let mut bounced_x = false;
    let mut bounced_y = false;

    let mut next_x = state.x + state.delta_x;
    if next_x <= 0 {
        next_x = 0;
        state.delta_x = -state.delta_x;
        bounced_x = true;
    } else if next_x + state.width >= bounds.width {
        next_x = bounds.width - state.width;
        state.delta_x = -state.delta_x;
        bounced_x = true;
    }

    let mut next_y = state.y + state.delta_y;
    if next_y <= 0 {
        next_y = 0;
        state.delta_y = -state.delta_y;
        bounced_y = true;
    } else if next_y + state.height >= bounds.height {
        next_y = bounds.height - state.height;
        state.delta_y = -state.delta_y;
        bounced_y = true;
    }

    state.x = next_x;
    state.y = next_y;
    (bounced_x, bounced_y)
}
