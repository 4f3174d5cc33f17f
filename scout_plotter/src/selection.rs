// Copyright 2025 the Scout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Selection state machine: compute highlight and decoration changes from picks.
//!
//! ## Usage
//!
//! 1) Resolve a pointer press with a [`PickResolver`](crate::resolver::PickResolver).
//! 2) Read the hit primitive's current color from the backend.
//! 3) Call [`Selection::update`] with the pick and that color to get the
//!    ordered [`SelectionChange`]s, then apply them to the backend.
//!
//! [`Selection`] itself never touches a backend, which makes every transition
//! testable on its own.
//!
//! ## Transitions
//!
//! - A miss without append clears the selection.
//! - A miss with append changes nothing.
//! - Hitting a node that is already selected changes nothing.
//! - A plain hit replaces the selection with the hit node. Faces get their
//!   control points decorated.
//! - An append hit on an edge changes nothing.
//! - An append hit on a face adds it without decoration and drops any
//!   selected edge.
//!
//! ## Minimal example
//!
//! ```
//! use scout_plotter::resolver::ResolvedPick;
//! use scout_plotter::selection::{Selection, SelectionChange, SelectionState};
//! use scout_scene::{Color, PrimitiveId};
//!
//! let mut sel: Selection<u32> = Selection::new();
//! let face = ResolvedPick {
//!     primitive: PrimitiveId::new(0, 1),
//!     node: 7,
//!     pardim: 2,
//!     strategy_index: 1,
//!     point: None,
//! };
//! let changes = sel.update(Some((face, Color::WHITE)), false);
//! assert_eq!(sel.state(), SelectionState::Single);
//! assert_eq!(changes.len(), 2);
//! assert_eq!(
//!     sel.update(None, false),
//!     vec![
//!         SelectionChange::Unhighlight { primitive: face.primitive, restore: Color::WHITE },
//!         SelectionChange::RemoveDecoration { primitive: face.primitive },
//!     ]
//! );
//! ```

use core::fmt::Debug;

use scout_scene::{Color, PrimitiveId};

use crate::resolver::ResolvedPick;

/// Coarse state of a [`Selection`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum SelectionState {
    /// Nothing is selected.
    #[default]
    Idle,
    /// One node, chosen by a plain pick.
    Single,
    /// One or more faces, accumulated by append picks.
    Multi,
}

/// One selected node.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Selected<K> {
    /// Primitive drawing the node.
    pub primitive: PrimitiveId,
    /// The node.
    pub node: K,
    /// Parametric dimension of the node.
    pub pardim: usize,
    /// Color of the primitive before it was highlighted.
    pub original_color: Color,
    /// Whether the node's control points are decorated.
    pub decorated: bool,
    /// Point index reported by a point pick.
    pub point: Option<usize>,
}

/// A change a [`Selection`] update asks the caller to apply.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SelectionChange<K> {
    /// Give `primitive` back its pre-selection color.
    Unhighlight {
        /// Primitive to recolor.
        primitive: PrimitiveId,
        /// Color to restore.
        restore: Color,
    },
    /// Remove the control point decoration of `primitive`.
    RemoveDecoration {
        /// Owner of the decoration.
        primitive: PrimitiveId,
    },
    /// Paint `primitive` in the highlight color.
    Highlight {
        /// Primitive to recolor.
        primitive: PrimitiveId,
    },
    /// Show the control points of `node`, drawn by `primitive`.
    Decorate {
        /// Owner of the decoration.
        primitive: PrimitiveId,
        /// The decorated node.
        node: K,
    },
}

/// Ordered set of selected nodes plus its [`SelectionState`].
#[derive(Clone, Debug, PartialEq)]
pub struct Selection<K> {
    entries: Vec<Selected<K>>,
    state: SelectionState,
}

impl<K> Default for Selection<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            state: SelectionState::Idle,
        }
    }
}

impl<K: Copy + Eq + Debug> Selection<K> {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> SelectionState {
        self.state
    }

    /// Selected entries, in selection order.
    pub fn entries(&self) -> &[Selected<K>] {
        &self.entries
    }

    /// True if `node` is selected.
    pub fn contains(&self, node: &K) -> bool {
        self.entries.iter().any(|e| e.node == *node)
    }

    /// Selected nodes, in selection order.
    pub fn current_selection(&self) -> Vec<K> {
        self.entries.iter().map(|e| e.node).collect()
    }

    /// Point index recorded when `node` was picked, if a point pick chose it.
    pub fn picked_point(&self, node: &K) -> Option<usize> {
        self.entries
            .iter()
            .find(|e| e.node == *node)
            .and_then(|e| e.point)
    }

    /// Drop every entry, returning the changes that undo their highlight and
    /// decoration, in selection order.
    pub fn clear(&mut self) -> Vec<SelectionChange<K>> {
        let mut out = Vec::new();
        for entry in self.entries.drain(..) {
            release(&entry, &mut out);
        }
        if self.state != SelectionState::Idle {
            log::debug!("selection: {:?} -> Idle", self.state);
        }
        self.state = SelectionState::Idle;
        out
    }

    /// Feed a pick result and return the changes needed to reflect it.
    ///
    /// `pick` is the resolved hit together with the primitive's current
    /// color, or `None` for a miss. `append` is the multi-select modifier.
    pub fn update(
        &mut self,
        pick: Option<(ResolvedPick<K>, Color)>,
        append: bool,
    ) -> Vec<SelectionChange<K>> {
        let Some((pick, color)) = pick else {
            return if append { Vec::new() } else { self.clear() };
        };
        if self.contains(&pick.node) {
            log::trace!("selection: {:?} is already selected", pick.node);
            return Vec::new();
        }

        let before = self.state;
        let mut out = Vec::new();
        let decorated = if append {
            if pick.pardim < 2 {
                log::trace!("selection: edges are not append-selectable");
                return Vec::new();
            }
            self.entries.retain(|entry| {
                let keep = entry.pardim >= 2;
                if !keep {
                    release(entry, &mut out);
                }
                keep
            });
            self.state = SelectionState::Multi;
            false
        } else {
            out = self.clear();
            self.state = SelectionState::Single;
            pick.pardim >= 2
        };

        self.entries.push(Selected {
            primitive: pick.primitive,
            node: pick.node,
            pardim: pick.pardim,
            original_color: color,
            decorated,
            point: pick.point,
        });
        out.push(SelectionChange::Highlight {
            primitive: pick.primitive,
        });
        if decorated {
            out.push(SelectionChange::Decorate {
                primitive: pick.primitive,
                node: pick.node,
            });
        }
        log::debug!(
            "selection: {before:?} -> {:?} with {:?} ({} selected)",
            self.state,
            pick.node,
            self.entries.len()
        );
        out
    }
}

fn release<K>(entry: &Selected<K>, out: &mut Vec<SelectionChange<K>>) {
    out.push(SelectionChange::Unhighlight {
        primitive: entry.primitive,
        restore: entry.original_color,
    });
    if entry.decorated {
        out.push(SelectionChange::RemoveDecoration {
            primitive: entry.primitive,
        });
    }
}
