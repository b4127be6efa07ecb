// Copyright 2025 the Carom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Carom Model: a root-holding shape model with incremental change events.
//!
//! [`ShapeModel`] wraps a [`Scene`] behind a mutation protocol: every
//! add/remove flows through the model, and every tick of movement is driven
//! by it, so registered [`ModelListener`]s observe each structural change as
//! a typed [`ModelEvent`] carrying the parent carrier, the child index, and
//! the operand shape. A downstream tree view can mirror the hierarchy with
//! insert-at/remove-at operations instead of re-scanning it.
//!
//! Delivery is synchronous and in registration order, before the mutating
//! call returns. Listeners must not mutate the model from inside a callback.
//!
//! ## Minimal example
//!
//! ```rust
//! use carom_model::{ModelEvent, ModelListener, ShapeModel};
//! use carom_scene::{Bounds, ShapeKind, ShapeState};
//!
//! struct Count(u32);
//! impl ModelListener for Count {
//!     fn model_changed(&mut self, _event: &ModelEvent) {
//!         self.0 += 1;
//!     }
//! }
//!
//! let mut model = ShapeModel::new(Bounds::new(500, 400));
//! model.add_listener(Count(0));
//!
//! let carrier = model.add_to_root(
//!     ShapeState {
//!         width: 100,
//!         height: 100,
//!         ..ShapeState::default()
//!     },
//!     ShapeKind::carrier(),
//! )?;
//! model.add(carrier, ShapeState::default(), ShapeKind::Oval)?;
//! assert_eq!(model.scene().shape_count(carrier), 1);
//!
//! // One animation tick: every live shape moves and reports a move event.
//! model.tick();
//! # Ok::<(), carom_scene::SceneError>(())
//! ```

mod event;

pub use event::{EventKind, ListenerId, ModelEvent, ModelListener};

use carom_scene::{Bounds, Painter, Scene, SceneError, ShapeId, ShapeKind, ShapeState};

/// The model object that owns the shape tree and keeps observers consistent.
///
/// The model holds a single root carrier sized to the world bounds. Top-level
/// shapes are the root's children; the root itself is scaffolding and is
/// neither moved as a shape nor painted.
///
/// Structure edits must go through [`ShapeModel::add`] and
/// [`ShapeModel::remove`] so that listeners see them. [`ShapeModel::scene_mut`]
/// is available for state tweaks (velocity, text, size); editing structure
/// through it bypasses notification and desynchronizes observers.
pub struct ShapeModel {
    scene: Scene,
    root: ShapeId,
    bounds: Bounds,
    listeners: Vec<(ListenerId, Box<dyn ModelListener>)>,
    next_listener: u64,
}

impl std::fmt::Debug for ShapeModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShapeModel")
            .field("scene", &self.scene)
            .field("root", &self.root)
            .field("bounds", &self.bounds)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl ShapeModel {
    /// Create a model whose world is `bounds`.
    pub fn new(bounds: Bounds) -> Self {
        let mut scene = Scene::new();
        let root = scene.insert(
            ShapeState {
                delta_x: 0,
                delta_y: 0,
                width: bounds.width,
                height: bounds.height,
                ..ShapeState::default()
            },
            ShapeKind::carrier(),
        );
        Self {
            scene,
            root,
            bounds,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    /// The root carrier. Always live, always a carrier.
    pub fn root(&self) -> ShapeId {
        self.root
    }

    /// The world bounds top-level shapes bounce in.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Read access to the underlying scene.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Mutable access to the underlying scene, for state tweaks.
    ///
    /// Do not attach or detach shapes through this; those edits are invisible
    /// to listeners. Use [`ShapeModel::add`] and [`ShapeModel::remove`].
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// Resize the world (for example after a host viewport resize).
    ///
    /// Shapes outside the shrunk world clamp back in on the next tick.
    pub fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = bounds;
        if let Some(state) = self.scene.state_mut(self.root) {
            state.width = bounds.width;
            state.height = bounds.height;
        }
    }

    /// Create a shape and attach it to `parent`, notifying listeners.
    ///
    /// On success, exactly one [`EventKind::ShapeAdded`] event with the
    /// assigned child index is delivered before this call returns. On failure
    /// the created shape is freed again and nothing is emitted.
    pub fn add(
        &mut self,
        parent: ShapeId,
        state: ShapeState,
        kind: ShapeKind,
    ) -> Result<ShapeId, SceneError> {
        let shape = self.scene.insert(state, kind);
        match self.scene.attach(parent, shape) {
            Ok(index) => {
                log::debug!(parent:? = parent, shape:? = shape, index; "shape added");
                self.emit(ModelEvent::added(parent, index, shape));
                Ok(shape)
            }
            Err(err) => {
                self.scene.remove(shape);
                Err(err)
            }
        }
    }

    /// Create a top-level shape: [`ShapeModel::add`] with the root as parent.
    pub fn add_to_root(
        &mut self,
        state: ShapeState,
        kind: ShapeKind,
    ) -> Result<ShapeId, SceneError> {
        self.add(self.root, state, kind)
    }

    /// Detach `shape` from `parent`, free its subtree, and notify listeners.
    ///
    /// Returns the child index the shape occupied before removal, delivered
    /// to listeners as an [`EventKind::ShapeRemoved`] event. Returns `None`
    /// (and emits nothing) if `shape` is not a child of `parent` — removal is
    /// idempotent.
    pub fn remove(&mut self, parent: ShapeId, shape: ShapeId) -> Option<usize> {
        let index = self.scene.detach(parent, shape)?;
        self.scene.remove(shape);
        log::debug!(parent:? = parent, shape:? = shape, index; "shape removed");
        self.emit(ModelEvent::removed(parent, index, shape));
        Some(index)
    }

    /// Register a listener; returns the handle that removes it.
    ///
    /// Listeners are notified in registration order. No deduplication is
    /// applied beyond the handle's identity.
    pub fn add_listener<L: ModelListener + 'static>(&mut self, listener: L) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Unregister a listener. Returns `false` if the handle is unknown.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    /// Advance the world by one tick.
    ///
    /// Steps every top-level shape against the world bounds (carriers recurse
    /// into their children), then delivers one [`EventKind::ShapeMoved`]
    /// event per live shape, depth-first in child order. Observers of tree
    /// structure are expected to skip move events cheaply; the model does not
    /// suppress them.
    pub fn tick(&mut self) {
        let top: Vec<ShapeId> = self.scene.children_of(self.root).to_vec();
        for shape in &top {
            self.scene.step(*shape, self.bounds);
        }

        let mut moved: Vec<ModelEvent> = Vec::new();
        for shape in top {
            self.collect_moved(shape, &mut moved);
        }
        log::trace!(shapes = moved.len(); "tick");
        for event in moved {
            self.emit(event);
        }
    }

    fn collect_moved(&self, shape: ShapeId, out: &mut Vec<ModelEvent>) {
        out.push(ModelEvent::moved(shape, self.scene.parent_of(shape)));
        for child in self.scene.children_of(shape) {
            self.collect_moved(*child, out);
        }
    }

    /// Paint every top-level shape, in child order, with the given painter.
    ///
    /// The root scaffolding carrier is not drawn.
    pub fn paint<P: Painter>(&self, painter: &mut P) {
        for shape in self.scene.children_of(self.root) {
            self.scene.paint(*shape, painter);
        }
    }

    fn emit(&mut self, event: ModelEvent) {
        for (_, listener) in &mut self.listeners {
            listener.model_changed(&event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carom_scene::{PaintOp, RecordingPainter};
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Listener that appends every event to a shared log.
    struct Recorder {
        events: Rc<RefCell<Vec<ModelEvent>>>,
    }

    impl ModelListener for Recorder {
        fn model_changed(&mut self, event: &ModelEvent) {
            self.events.borrow_mut().push(*event);
        }
    }

    fn recording_model(bounds: Bounds) -> (ShapeModel, Rc<RefCell<Vec<ModelEvent>>>) {
        let mut model = ShapeModel::new(bounds);
        let events = Rc::new(RefCell::new(Vec::new()));
        model.add_listener(Recorder {
            events: Rc::clone(&events),
        });
        (model, events)
    }

    fn small_rect(x: i32, y: i32) -> ShapeState {
        ShapeState {
            x,
            y,
            delta_x: 2,
            delta_y: 3,
            width: 20,
            height: 20,
            text: None,
        }
    }

    #[test]
    fn root_is_a_live_carrier_sized_to_the_world() {
        let model = ShapeModel::new(Bounds::new(500, 400));
        let root = model.root();
        assert!(model.scene().is_carrier(root));
        let state = model.scene().state(root).unwrap();
        assert_eq!((state.width, state.height), (500, 400));
        assert_eq!((state.delta_x, state.delta_y), (0, 0));
    }

    #[test]
    fn add_emits_one_added_event_with_the_appended_index() {
        let (mut model, events) = recording_model(Bounds::new(500, 400));
        let first = model
            .add_to_root(small_rect(0, 0), ShapeKind::Rectangle)
            .unwrap();
        let second = model
            .add_to_root(small_rect(30, 0), ShapeKind::Oval)
            .unwrap();

        let events = events.borrow();
        assert_eq!(
            events.as_slice(),
            &[
                ModelEvent::added(model.root(), 0, first),
                ModelEvent::added(model.root(), 1, second),
            ]
        );
    }

    #[test]
    fn failed_add_emits_nothing_and_frees_the_shape() {
        let (mut model, events) = recording_model(Bounds::new(500, 400));
        let live_before = model.scene().len();

        let result = model.add_to_root(
            ShapeState {
                width: 600,
                height: 20,
                ..ShapeState::default()
            },
            ShapeKind::Rectangle,
        );
        assert_eq!(
            result,
            Err(SceneError::DoesNotFit {
                width: 500,
                height: 400
            })
        );
        assert!(events.borrow().is_empty());
        assert_eq!(model.scene().len(), live_before, "shape was freed again");
    }

    #[test]
    fn remove_reports_the_index_occupied_before_removal() {
        let (mut model, events) = recording_model(Bounds::new(500, 400));
        let a = model
            .add_to_root(small_rect(0, 0), ShapeKind::Rectangle)
            .unwrap();
        let b = model
            .add_to_root(small_rect(30, 0), ShapeKind::Oval)
            .unwrap();
        let c = model
            .add_to_root(small_rect(60, 0), ShapeKind::Hexagon)
            .unwrap();
        events.borrow_mut().clear();

        assert_eq!(model.remove(model.root(), b), Some(1));
        assert_eq!(
            events.borrow().as_slice(),
            &[ModelEvent::removed(model.root(), 1, b)]
        );
        // The survivors close ranks in order.
        assert_eq!(model.scene().children_of(model.root()), &[a, c]);
        assert!(!model.scene().is_alive(b));
    }

    #[test]
    fn remove_frees_the_operand_subtree() {
        let (mut model, events) = recording_model(Bounds::new(500, 400));
        let carrier = model
            .add_to_root(
                ShapeState {
                    width: 200,
                    height: 200,
                    ..ShapeState::default()
                },
                ShapeKind::carrier(),
            )
            .unwrap();
        let inner = model
            .add(carrier, small_rect(0, 0), ShapeKind::Oval)
            .unwrap();
        events.borrow_mut().clear();

        assert_eq!(model.remove(model.root(), carrier), Some(0));
        assert!(!model.scene().is_alive(carrier));
        assert!(!model.scene().is_alive(inner));
        // Only the removal of the carrier itself is reported; the subtree
        // goes with it implicitly.
        assert_eq!(events.borrow().len(), 1);
    }

    #[test]
    fn removing_an_absent_shape_is_silent() {
        let (mut model, events) = recording_model(Bounds::new(500, 400));
        let carrier = model
            .add_to_root(
                ShapeState {
                    width: 200,
                    height: 200,
                    ..ShapeState::default()
                },
                ShapeKind::carrier(),
            )
            .unwrap();
        let shape = model
            .add_to_root(small_rect(0, 0), ShapeKind::Rectangle)
            .unwrap();
        events.borrow_mut().clear();

        // `shape` is a child of the root, not of `carrier`.
        assert_eq!(model.remove(carrier, shape), None);
        assert!(events.borrow().is_empty());
        assert!(model.scene().is_alive(shape));
    }

    #[test]
    fn listeners_run_in_registration_order() {
        struct Tag {
            tag: u8,
            order: Rc<RefCell<Vec<u8>>>,
        }
        impl ModelListener for Tag {
            fn model_changed(&mut self, _event: &ModelEvent) {
                self.order.borrow_mut().push(self.tag);
            }
        }

        let mut model = ShapeModel::new(Bounds::new(500, 400));
        let order = Rc::new(RefCell::new(Vec::new()));
        model.add_listener(Tag {
            tag: 1,
            order: Rc::clone(&order),
        });
        model.add_listener(Tag {
            tag: 2,
            order: Rc::clone(&order),
        });

        model
            .add_to_root(small_rect(0, 0), ShapeKind::Rectangle)
            .unwrap();
        assert_eq!(order.borrow().as_slice(), &[1, 2]);
    }

    #[test]
    fn removed_listeners_stop_receiving_events() {
        let (mut model, events) = recording_model(Bounds::new(500, 400));
        let extra = Rc::new(RefCell::new(Vec::new()));
        let handle = model.add_listener(Recorder {
            events: Rc::clone(&extra),
        });

        assert!(model.remove_listener(handle));
        assert!(!model.remove_listener(handle), "handle is spent");

        model
            .add_to_root(small_rect(0, 0), ShapeKind::Rectangle)
            .unwrap();
        assert!(extra.borrow().is_empty());
        assert_eq!(events.borrow().len(), 1, "remaining listener still runs");
    }

    #[test]
    fn tick_emits_one_move_per_live_shape_depth_first() {
        let (mut model, events) = recording_model(Bounds::new(500, 400));
        let rect = model
            .add_to_root(small_rect(0, 0), ShapeKind::Rectangle)
            .unwrap();
        let carrier = model
            .add_to_root(
                ShapeState {
                    x: 100,
                    y: 100,
                    delta_x: 1,
                    delta_y: 1,
                    width: 200,
                    height: 200,
                    text: None,
                },
                ShapeKind::carrier(),
            )
            .unwrap();
        let oval = model
            .add(carrier, small_rect(10, 10), ShapeKind::Oval)
            .unwrap();
        events.borrow_mut().clear();

        model.tick();
        assert_eq!(
            events.borrow().as_slice(),
            &[
                ModelEvent::moved(rect, Some(model.root())),
                ModelEvent::moved(carrier, Some(model.root())),
                ModelEvent::moved(oval, Some(carrier)),
            ]
        );
    }

    #[test]
    fn tick_applies_velocity() {
        let (mut model, _events) = recording_model(Bounds::new(500, 400));
        let shape = model
            .add_to_root(small_rect(10, 10), ShapeKind::Rectangle)
            .unwrap();
        model.tick();
        let state = model.scene().state(shape).unwrap();
        assert_eq!((state.x, state.y), (12, 13));
    }

    #[test]
    fn set_bounds_changes_the_bounce_boundary() {
        let (mut model, _events) = recording_model(Bounds::new(100, 100));
        let shape = model
            .add_to_root(
                ShapeState {
                    x: 50,
                    y: 0,
                    delta_x: 10,
                    delta_y: 0,
                    width: 40,
                    height: 40,
                    text: None,
                },
                ShapeKind::Rectangle,
            )
            .unwrap();

        model.set_bounds(Bounds::new(200, 100));
        model.tick();
        let state = model.scene().state(shape).unwrap();
        assert_eq!(state.x, 60, "no bounce against the widened world");
        assert_eq!(state.delta_x, 10);
    }

    #[test]
    fn paint_draws_top_level_shapes_in_child_order() {
        let (mut model, _events) = recording_model(Bounds::new(500, 400));
        model
            .add_to_root(small_rect(0, 0), ShapeKind::Rectangle)
            .unwrap();
        model
            .add_to_root(small_rect(30, 0), ShapeKind::Oval)
            .unwrap();

        let mut painter = RecordingPainter::new();
        model.paint(&mut painter);
        assert_eq!(
            painter.ops(),
            &[
                PaintOp::Rect {
                    x: 0,
                    y: 0,
                    width: 20,
                    height: 20
                },
                PaintOp::Oval {
                    x: 30,
                    y: 0,
                    width: 20,
                    height: 20
                },
            ]
        );
    }
}
