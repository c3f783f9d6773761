// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors returned by structural tree operations.

use crate::types::ElementId;

/// Failure of a structural change to the [`Tree`](crate::Tree).
///
/// A failed call leaves the tree exactly as it was.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// Attaching `element` under `parent` would make `element` its own ancestor.
    #[error("attaching {element:?} under {parent:?} would create a cycle")]
    CircularReference {
        /// The element being reparented.
        element: ElementId,
        /// The requested parent, which is `element` itself or one of its descendants.
        parent: ElementId,
    },
    /// The identifier does not refer to a live element.
    #[error("{0:?} does not refer to a live element")]
    StaleElement(ElementId),
}
