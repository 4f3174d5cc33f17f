// Copyright 2025 the Scout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Actor registry: the bidirectional map between rendered primitives and model nodes.
//!
//! ## Overview
//!
//! Every tessellated node is drawn as exactly one primitive. The registry
//! remembers, for each live [`PrimitiveId`], which node it shows, the node's
//! parametric dimension and a snapshot of its control points (used to draw
//! the selection decoration without reaching back into the model).
//!
//! Lookups are by handle identity. Two primitives with identical geometry
//! ("twins") still carry distinct handles and so resolve to distinct nodes.
//!
//! ## Example
//!
//! ```
//! use scout_plotter::registry::{ActorEntry, ActorRegistry};
//! use scout_scene::PrimitiveId;
//!
//! let mut reg: ActorRegistry<u32> = ActorRegistry::new();
//! let id = PrimitiveId::new(0, 1);
//! reg.register(id, ActorEntry { node: 7, pardim: 2, control_points: vec![] })
//!     .unwrap();
//! assert_eq!(reg.lookup(id).map(|e| e.node), Some(7));
//! assert_eq!(reg.primitive_of(&7), Some(id));
//! ```

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

use scout_scene::PrimitiveId;

use crate::error::RegistryError;

/// What the registry knows about one registered primitive.
#[derive(Clone, Debug, PartialEq)]
pub struct ActorEntry<K> {
    /// The model node drawn by the primitive.
    pub node: K,
    /// Parametric dimension of the node: `1` for edges, `2` for faces.
    pub pardim: usize,
    /// Cartesian control points of the node at registration time.
    pub control_points: Vec<[f64; 3]>,
}

/// Map from primitives to nodes, and back.
#[derive(Clone, Debug)]
pub struct ActorRegistry<K> {
    entries: BTreeMap<PrimitiveId, ActorEntry<K>>,
    by_node: HashMap<K, PrimitiveId>,
}

impl<K> Default for ActorRegistry<K> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
            by_node: HashMap::new(),
        }
    }
}

impl<K: Copy + Eq + Hash> ActorRegistry<K> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `primitive` draws `entry.node`.
    ///
    /// Fails without changing anything if the primitive is already registered
    /// or the node already has a primitive.
    pub fn register(
        &mut self,
        primitive: PrimitiveId,
        entry: ActorEntry<K>,
    ) -> Result<(), RegistryError> {
        if self.entries.contains_key(&primitive) {
            return Err(RegistryError::DuplicatePrimitive(primitive));
        }
        if let Some(&existing) = self.by_node.get(&entry.node) {
            return Err(RegistryError::DuplicateNode(existing));
        }
        self.by_node.insert(entry.node, primitive);
        self.entries.insert(primitive, entry);
        Ok(())
    }

    /// Entry of a registered primitive.
    pub fn lookup(&self, primitive: PrimitiveId) -> Option<&ActorEntry<K>> {
        self.entries.get(&primitive)
    }

    /// Primitive currently drawing `node`.
    pub fn primitive_of(&self, node: &K) -> Option<PrimitiveId> {
        self.by_node.get(node).copied()
    }

    /// True if `primitive` is registered.
    pub fn contains(&self, primitive: PrimitiveId) -> bool {
        self.entries.contains_key(&primitive)
    }

    /// Number of registered primitives.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered primitives and their entries, ordered by handle.
    pub fn iter(&self) -> impl Iterator<Item = (PrimitiveId, &ActorEntry<K>)> + '_ {
        self.entries.iter().map(|(&id, entry)| (id, entry))
    }

    /// Forget everything, returning the handles that were registered.
    pub fn unregister_all(&mut self) -> Vec<PrimitiveId> {
        self.by_node.clear();
        core::mem::take(&mut self.entries).into_keys().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(node: u32) -> ActorEntry<u32> {
        ActorEntry {
            node,
            pardim: 2,
            control_points: vec![[0.0; 3]],
        }
    }

    #[test]
    fn twins_resolve_to_their_own_nodes() {
        let mut reg = ActorRegistry::new();
        let (a, b) = (PrimitiveId::new(0, 1), PrimitiveId::new(1, 1));
        reg.register(a, entry(10)).unwrap();
        reg.register(b, entry(11)).unwrap();
        assert_eq!(reg.lookup(a).unwrap().node, 10);
        assert_eq!(reg.lookup(b).unwrap().node, 11);
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn stale_generation_is_unknown() {
        let mut reg = ActorRegistry::new();
        reg.register(PrimitiveId::new(0, 1), entry(1)).unwrap();
        assert!(reg.lookup(PrimitiveId::new(0, 2)).is_none());
        assert!(!reg.contains(PrimitiveId::new(0, 2)));
    }

    #[test]
    fn duplicates_are_rejected_untouched() {
        let mut reg = ActorRegistry::new();
        let a = PrimitiveId::new(0, 1);
        reg.register(a, entry(1)).unwrap();
        assert_eq!(
            reg.register(a, entry(2)),
            Err(RegistryError::DuplicatePrimitive(a))
        );
        assert_eq!(
            reg.register(PrimitiveId::new(1, 1), entry(1)),
            Err(RegistryError::DuplicateNode(a))
        );
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.primitive_of(&2), None);
    }

    #[test]
    fn unregister_all_returns_every_handle() {
        let mut reg = ActorRegistry::new();
        let ids = [PrimitiveId::new(2, 1), PrimitiveId::new(0, 3)];
        for (node, &id) in ids.iter().enumerate() {
            #[allow(clippy::cast_possible_truncation, reason = "two nodes.")]
            reg.register(id, entry(node as u32)).unwrap();
        }
        let mut drained = reg.unregister_all();
        drained.sort();
        assert_eq!(drained, vec![ids[1], ids[0]]);
        assert!(reg.is_empty());
        assert_eq!(reg.primitive_of(&0), None);
    }
}
