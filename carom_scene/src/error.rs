// Copyright 2025 the Carom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error type for scene mutation and queries.

use thiserror::Error;

/// Errors reported by structural mutation and indexed queries.
///
/// Invariant violations ([`SceneError::AlreadyAttached`],
/// [`SceneError::DoesNotFit`], [`SceneError::WouldCycle`],
/// [`SceneError::NotACarrier`]) and range violations
/// ([`SceneError::IndexOutOfRange`]) are programming errors on the caller's
/// side, not transient conditions; the scene is left unchanged when they are
/// raised. Absence is not an error: removal of a shape that is not present is
/// a no-op, and [`Scene::index_of`](crate::Scene::index_of) returns `None`.
#[derive(Copy, Clone, Debug, Error, Eq, PartialEq)]
pub enum SceneError {
    /// The shape is already attached to a carrier.
    #[error("shape is already attached to a carrier")]
    AlreadyAttached,
    /// The shape's bounding box does not fit inside the carrier's interior.
    #[error("shape does not fit inside the {width}x{height} carrier interior")]
    DoesNotFit {
        /// Width of the carrier's interior.
        width: i32,
        /// Height of the carrier's interior.
        height: i32,
    },
    /// Attaching would make a shape its own ancestor.
    #[error("attaching the shape here would create a cycle")]
    WouldCycle,
    /// The attach target is a leaf shape.
    #[error("target shape is not a carrier")]
    NotACarrier,
    /// A child index outside `[0, count)` was queried.
    #[error("child index {index} is out of range (carrier has {count} children)")]
    IndexOutOfRange {
        /// The index that was queried.
        index: usize,
        /// The number of children the carrier holds.
        count: usize,
    },
    /// The identifier refers to a freed (or reused) slot.
    #[error("stale shape id")]
    StaleShape,
}
