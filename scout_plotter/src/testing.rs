// Copyright 2025 the Scout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A render backend whose pick results are scripted, for unit tests.

use core::cell::{Cell, RefCell};
use std::collections::BTreeMap;

use kurbo::Point;
use scout_scene::{
    Color, PickHit, PickStrategy, Primitive, PrimitiveId, RenderBackend, SceneError,
};

#[derive(Debug, Default)]
pub(crate) struct ScriptedBackend {
    pub(crate) live: BTreeMap<PrimitiveId, Primitive>,
    next_slot: u32,
    /// Answers to successive `pick` calls; an exhausted script misses.
    pub(crate) script: RefCell<Vec<Option<PickHit>>>,
    /// Strategies `pick` was called with, in order.
    pub(crate) calls: RefCell<Vec<PickStrategy>>,
    pub(crate) fail_picks: Cell<bool>,
    pub(crate) camera_resets: usize,
}

impl ScriptedBackend {
    pub(crate) fn answer(&self, hits: impl IntoIterator<Item = Option<PickHit>>) {
        let mut script: Vec<_> = hits.into_iter().collect();
        script.reverse();
        *self.script.borrow_mut() = script;
        self.calls.borrow_mut().clear();
    }

    pub(crate) fn named(&self, name: &str) -> Option<&Primitive> {
        self.live
            .values()
            .find(|p| p.name.as_deref() == Some(name))
    }
}

pub(crate) fn hit(primitive: PrimitiveId) -> Option<PickHit> {
    Some(PickHit {
        primitive,
        point: None,
        depth: 0.5,
    })
}

impl RenderBackend for ScriptedBackend {
    fn submit(&mut self, primitive: Primitive) -> Result<PrimitiveId, SceneError> {
        if let Some(name) = primitive.name.as_deref() {
            self.remove_named(name)?;
        }
        let id = PrimitiveId::new(self.next_slot, 1);
        self.next_slot += 1;
        self.live.insert(id, primitive);
        Ok(id)
    }

    fn remove(&mut self, id: PrimitiveId) -> Result<bool, SceneError> {
        Ok(self.live.remove(&id).is_some())
    }

    fn remove_named(&mut self, name: &str) -> Result<bool, SceneError> {
        let found = self
            .live
            .iter()
            .find(|(_, p)| p.name.as_deref() == Some(name))
            .map(|(&id, _)| id);
        Ok(found.is_some_and(|id| self.live.remove(&id).is_some()))
    }

    fn color(&self, id: PrimitiveId) -> Result<Color, SceneError> {
        self.live
            .get(&id)
            .map(|p| p.style.color)
            .ok_or(SceneError::StalePrimitive(id))
    }

    fn set_color(&mut self, id: PrimitiveId, color: Color) -> Result<(), SceneError> {
        let prim = self
            .live
            .get_mut(&id)
            .ok_or(SceneError::StalePrimitive(id))?;
        prim.style.color = color;
        Ok(())
    }

    fn pick(&self, strategy: &PickStrategy, _at: Point) -> Result<Option<PickHit>, SceneError> {
        self.calls.borrow_mut().push(*strategy);
        if self.fail_picks.get() {
            return Err(SceneError::Backend("device lost".into()));
        }
        Ok(self.script.borrow_mut().pop().flatten())
    }

    fn reset_camera(&mut self) {
        self.camera_resets += 1;
    }
}
