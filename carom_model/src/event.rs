// Copyright 2025 the Carom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Structural change events and the listener capability.

use carom_scene::ShapeId;

/// The kind of structural change an event describes.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum EventKind {
    /// A shape was appended to a carrier's child sequence.
    ShapeAdded,
    /// A shape was removed from a carrier's child sequence.
    ShapeRemoved,
    /// A shape moved during a tick. Carries no structural index; observers of
    /// tree structure are expected to ignore these cheaply.
    ShapeMoved,
}

/// An immutable record of one mutation to the shape tree.
///
/// Carries enough information for an observer to mirror the change
/// incrementally — insert or remove at a specific child index under a known
/// parent — without re-scanning the tree.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ModelEvent {
    /// What happened.
    pub kind: EventKind,
    /// The carrier whose child sequence changed, or the moved shape's parent.
    /// `None` only if the moved shape has no parent.
    pub parent: Option<ShapeId>,
    /// For [`EventKind::ShapeAdded`], the index the shape was assigned; for
    /// [`EventKind::ShapeRemoved`], the index it occupied immediately before
    /// removal; `None` for moves.
    pub index: Option<usize>,
    /// The shape that was added, removed, or moved.
    ///
    /// For removals the identifier is stale by the time listeners run — it is
    /// an address for bookkeeping, not a handle to query.
    pub operand: ShapeId,
}

impl ModelEvent {
    /// An event describing `operand` appended to `parent` at `index`.
    pub const fn added(parent: ShapeId, index: usize, operand: ShapeId) -> Self {
        Self {
            kind: EventKind::ShapeAdded,
            parent: Some(parent),
            index: Some(index),
            operand,
        }
    }

    /// An event describing `operand` removed from `parent`, where `index` is
    /// the position it occupied before removal.
    pub const fn removed(parent: ShapeId, index: usize, operand: ShapeId) -> Self {
        Self {
            kind: EventKind::ShapeRemoved,
            parent: Some(parent),
            index: Some(index),
            operand,
        }
    }

    /// An event describing `operand` having moved under `parent`.
    pub const fn moved(operand: ShapeId, parent: Option<ShapeId>) -> Self {
        Self {
            kind: EventKind::ShapeMoved,
            parent,
            index: None,
            operand,
        }
    }
}

/// Capability for observing structural changes to a
/// [`ShapeModel`](crate::ShapeModel).
///
/// Delivery is synchronous and in registration order: every registered
/// listener sees the event before the mutating call returns.
///
/// Re-entrancy contract: a listener must not mutate the model's structure
/// from inside its callback. The model is mid-mutation when listeners run and
/// makes no guarantees for that case.
pub trait ModelListener {
    /// Called once per structural change, in event order.
    fn model_changed(&mut self, event: &ModelEvent);
}

/// Handle identifying one listener registration.
///
/// Returned by [`ShapeModel::add_listener`](crate::ShapeModel::add_listener)
/// and accepted by
/// [`ShapeModel::remove_listener`](crate::ShapeModel::remove_listener).
/// Registering the same listener value twice yields two handles and two
/// deliveries per event.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ListenerId(pub(crate) u64);
