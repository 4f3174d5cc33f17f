// Copyright 2025 the Scout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A minimal spline model that announces the nodes added to it.
//!
//! Real applications bring their own topology model and call
//! [`Plotter::tessellate_and_register`](crate::Plotter::tessellate_and_register)
//! directly. [`SplineModel`] is enough for demos, tests and simple importers:
//! [`add`](SplineModel::add) stores an object and queues a
//! [`ModelEvent::NodeAdded`], and
//! [`Plotter::sync_model`](crate::Plotter::sync_model) drains the queue.

use core::fmt;

use scout_spline::SplineObject;

/// Handle of a node in a [`SplineModel`].
///
/// Displays as `node-N`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct NodeKey(u32);

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node-{}", self.0)
    }
}

/// Change notification emitted by a [`SplineModel`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ModelEvent {
    /// A node was added.
    NodeAdded(NodeKey),
}

/// Append-only store of spline objects.
#[derive(Clone, Debug, Default)]
pub struct SplineModel {
    nodes: Vec<SplineObject>,
    pending: Vec<ModelEvent>,
}

impl SplineModel {
    /// Create an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `object` and queue a [`ModelEvent::NodeAdded`] for it.
    pub fn add(&mut self, object: SplineObject) -> NodeKey {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "a model never holds more than u32::MAX nodes."
        )]
        let key = NodeKey(self.nodes.len() as u32);
        self.nodes.push(object);
        self.pending.push(ModelEvent::NodeAdded(key));
        log::trace!("model: added {key}");
        key
    }

    /// Take the queued events, oldest first.
    pub fn drain_events(&mut self) -> Vec<ModelEvent> {
        core::mem::take(&mut self.pending)
    }

    /// Put `events` back in front of the queue, keeping their order.
    pub(crate) fn requeue(&mut self, events: impl IntoIterator<Item = ModelEvent>) {
        let mut queue: Vec<_> = events.into_iter().collect();
        queue.append(&mut self.pending);
        self.pending = queue;
    }

    /// The object stored under `key`.
    pub fn node(&self, key: NodeKey) -> Option<&SplineObject> {
        self.nodes.get(key.0 as usize)
    }

    /// Mutable access to the object stored under `key`.
    pub fn node_mut(&mut self, key: NodeKey) -> Option<&mut SplineObject> {
        self.nodes.get_mut(key.0 as usize)
    }

    /// Number of stored nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if the model holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
