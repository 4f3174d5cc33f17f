// Copyright 2025 the Scout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pick resolver: turn a screen position into a registered node.
//!
//! ## Overview
//!
//! A [`PickResolver`] holds an ordered list of [`PickStrategy`]s. For each
//! pointer event it asks the backend to run them one after another and stops
//! at the first strategy whose hit belongs to a registered primitive.
//!
//! ## Strategy Order
//!
//! - The default order is a point pick followed by a primitive pick.
//! - A strategy that misses, or that hits a primitive the registry does not
//!   know (a decoration, or anything drawn by someone else), is a miss for
//!   that strategy and the next one runs.
//! - Later strategies never run once an earlier one resolved.
//! - Backend failures abort the resolution and propagate.

use core::hash::Hash;

use kurbo::Point;
use scout_scene::{PickStrategy, PrimitiveId, RenderBackend, SceneError};

use crate::registry::ActorRegistry;

/// Radius of the default point pick, as a fraction of the viewport diagonal.
pub const DEFAULT_POINT_TOLERANCE: f64 = 0.025;

/// A pick that landed on a registered primitive.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ResolvedPick<K> {
    /// The picked primitive.
    pub primitive: PrimitiveId,
    /// The node it draws.
    pub node: K,
    /// Parametric dimension of the node.
    pub pardim: usize,
    /// Index of the strategy that produced the hit.
    pub strategy_index: usize,
    /// Picked point index, for point strategies.
    pub point: Option<usize>,
}

/// Ordered pick strategies.
#[derive(Clone, Debug, PartialEq)]
pub struct PickResolver {
    strategies: Vec<PickStrategy>,
}

impl Default for PickResolver {
    fn default() -> Self {
        Self::with_point_tolerance(DEFAULT_POINT_TOLERANCE)
    }
}

impl PickResolver {
    /// Resolver running `strategies` in the given order.
    pub fn new(strategies: Vec<PickStrategy>) -> Self {
        Self { strategies }
    }

    /// The default strategies, with a custom point pick radius.
    pub fn with_point_tolerance(tolerance: f64) -> Self {
        Self::new(vec![
            PickStrategy::Point { tolerance },
            PickStrategy::Primitive,
        ])
    }

    /// Current strategies, in order.
    pub fn strategies(&self) -> &[PickStrategy] {
        &self.strategies
    }

    /// Replace the strategies.
    pub fn set_strategies(&mut self, strategies: Vec<PickStrategy>) {
        self.strategies = strategies;
    }

    /// Append a strategy that runs after the existing ones.
    pub fn push(&mut self, strategy: PickStrategy) {
        self.strategies.push(strategy);
    }

    /// Run the strategies at `at` and return the first registered hit.
    pub fn resolve<K, B>(
        &self,
        at: Point,
        backend: &B,
        registry: &ActorRegistry<K>,
    ) -> Result<Option<ResolvedPick<K>>, SceneError>
    where
        K: Copy + Eq + Hash,
        B: RenderBackend + ?Sized,
    {
        for (strategy_index, strategy) in self.strategies.iter().enumerate() {
            let Some(hit) = backend.pick(strategy, at)? else {
                continue;
            };
            let Some(entry) = registry.lookup(hit.primitive) else {
                log::trace!(
                    "pick: strategy {strategy_index} hit unregistered primitive {}",
                    hit.primitive
                );
                continue;
            };
            return Ok(Some(ResolvedPick {
                primitive: hit.primitive,
                node: entry.node,
                pardim: entry.pardim,
                strategy_index,
                point: hit.point,
            }));
        }
        log::trace!("pick: nothing at ({}, {})", at.x, at.y);
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ActorEntry;
    use crate::testing::{ScriptedBackend, hit};
    use scout_scene::PickHit;

    fn registry_with(ids: &[PrimitiveId]) -> ActorRegistry<usize> {
        let mut reg = ActorRegistry::new();
        for (node, &id) in ids.iter().enumerate() {
            reg.register(
                id,
                ActorEntry {
                    node,
                    pardim: 2,
                    control_points: vec![],
                },
            )
            .unwrap();
        }
        reg
    }

    #[test]
    fn default_order_is_point_then_primitive() {
        assert_eq!(
            PickResolver::default().strategies(),
            &[
                PickStrategy::Point { tolerance: 0.025 },
                PickStrategy::Primitive
            ]
        );
    }

    #[test]
    fn first_registered_hit_short_circuits() {
        let a = PrimitiveId::new(0, 1);
        let reg = registry_with(&[a]);
        let backend = ScriptedBackend::default();
        backend.answer([
            Some(PickHit {
                primitive: a,
                point: Some(3),
                depth: 0.2,
            }),
            hit(a),
        ]);
        let pick = PickResolver::default()
            .resolve(Point::ORIGIN, &backend, &reg)
            .unwrap()
            .unwrap();
        assert_eq!(pick.strategy_index, 0);
        assert_eq!(pick.point, Some(3));
        assert_eq!(pick.node, 0);
        assert_eq!(backend.calls.borrow().len(), 1, "primitive pick never ran");
    }

    #[test]
    fn unregistered_hit_falls_through() {
        let (a, stray) = (PrimitiveId::new(0, 1), PrimitiveId::new(9, 1));
        let reg = registry_with(&[a]);
        let backend = ScriptedBackend::default();
        backend.answer([hit(stray), hit(a)]);
        let pick = PickResolver::default()
            .resolve(Point::ORIGIN, &backend, &reg)
            .unwrap()
            .unwrap();
        assert_eq!(pick.primitive, a);
        assert_eq!(pick.strategy_index, 1);
        assert_eq!(backend.calls.borrow().len(), 2);
    }

    #[test]
    fn all_misses_resolve_to_none() {
        let reg = registry_with(&[]);
        let backend = ScriptedBackend::default();
        backend.answer([None, hit(PrimitiveId::new(4, 2))]);
        let pick = PickResolver::default()
            .resolve(Point::ORIGIN, &backend, &reg)
            .unwrap();
        assert!(pick.is_none());
        assert_eq!(backend.calls.borrow().len(), 2);
    }

    #[test]
    fn backend_errors_propagate() {
        let reg = registry_with(&[]);
        let backend = ScriptedBackend::default();
        backend.fail_picks.set(true);
        let err = PickResolver::default()
            .resolve(Point::ORIGIN, &backend, &reg)
            .unwrap_err();
        assert_eq!(err, SceneError::Backend("device lost".into()));
    }

    #[test]
    fn empty_resolver_never_picks() {
        let a = PrimitiveId::new(0, 1);
        let reg = registry_with(&[a]);
        let backend = ScriptedBackend::default();
        backend.answer([hit(a)]);
        let resolver = PickResolver::new(vec![]);
        assert!(
            resolver
                .resolve(Point::ORIGIN, &backend, &reg)
                .unwrap()
                .is_none()
        );
        assert!(backend.calls.borrow().is_empty());
    }
}
