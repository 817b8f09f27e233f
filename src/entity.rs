// Copyright 2024 Saptak Santra
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Entity identifiers and the registry that allocates, tracks and recycles them.

use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::mask::ComponentMask;

/// Default maximum number of live entities (`World::new`)
pub const DEFAULT_ENTITY_CAPACITY: usize = 4096;

/// Opaque entity identifier
///
/// A plain value, cheap to copy and safe to store inside components. Ids are
/// recycled after `collect_unused_entities`, so a held id can go stale.
/// Id 0 is the permanent null sentinel: it exists in every world, never holds
/// components and is never destroyed or recycled.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Debug)]
pub struct Entity(u32);

impl Entity {
    /// The reserved null sentinel.
    pub const NULL: Entity = Entity(0);

    pub(crate) const fn from_raw(id: u32) -> Self {
        Entity(id)
    }

    /// Raw integer id.
    pub fn id(self) -> u32 {
        self.0
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }

    /// True for the reserved null sentinel.
    pub fn is_null(self) -> bool {
        self.0 == 0
    }
}

/// Destroyed entity whose id is quarantined until the next collect pass.
#[derive(Debug)]
pub(crate) struct DestroyRecord {
    pub entity: Entity,
    /// Keys of the view caches that still referenced the entity when it died.
    pub views: SmallVec<[ComponentMask; 4]>,
}

/// Allocates entity ids, tracks liveness and component masks, and quarantines
/// destroyed ids until their view diffs have been flushed.
pub(crate) struct EntityRegistry {
    /// Live entities, null sentinel included. Destroys swap-remove from here.
    entities: Vec<Entity>,
    /// Component mask per entity id.
    masks: Vec<ComponentMask>,
    /// Recycled ids ready for reuse, most recently freed last.
    free: Vec<Entity>,
    /// Destroyed ids awaiting the collect pass.
    pending: Vec<DestroyRecord>,
    next_id: u32,
    capacity: usize,
}

impl EntityRegistry {
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity >= 2, "entity capacity must be at least 2");
        Self {
            entities: vec![Entity::NULL],
            masks: vec![ComponentMask::EMPTY; capacity],
            free: Vec::new(),
            pending: Vec::new(),
            next_id: 1,
            capacity,
        }
    }

    /// Hand out an id: a recycled one if the pool is non-empty, the next
    /// sequential one otherwise.
    pub fn allocate(&mut self) -> Entity {
        if let Some(entity) = self.free.pop() {
            debug_assert!(
                self.masks[entity.index()].is_empty(),
                "recycled entity {entity:?} still had a component mask"
            );
            self.entities.push(entity);
            return entity;
        }
        assert!(
            (self.next_id as usize) < self.capacity,
            "entity capacity exceeded ({})",
            self.capacity
        );
        let entity = Entity::from_raw(self.next_id);
        self.next_id += 1;
        self.entities.push(entity);
        entity
    }

    /// True if the id is currently live. Linear scan of the live list.
    pub fn contains(&self, entity: Entity) -> bool {
        self.entities.contains(&entity)
    }

    /// All live entities, null sentinel included. Order is creation order
    /// modulo the swap-removal each destroy performs.
    pub fn live_entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Live entities excluding the null sentinel.
    pub fn live_count(&self) -> usize {
        self.entities.len() - 1
    }

    pub fn mask(&self, entity: Entity) -> &ComponentMask {
        &self.masks[entity.index()]
    }

    pub fn mask_mut(&mut self, entity: Entity) -> &mut ComponentMask {
        &mut self.masks[entity.index()]
    }

    /// Pull the entity out of the live list, zero its mask and quarantine the
    /// id until the next collect pass flushes the listed view caches.
    pub fn schedule_destroy(&mut self, entity: Entity, views: SmallVec<[ComponentMask; 4]>) {
        debug_assert!(!entity.is_null(), "the null entity cannot be destroyed");
        let pos = self.entities.iter().position(|&e| e == entity);
        debug_assert!(pos.is_some(), "destroying entity {entity:?} that is not alive");
        let Some(pos) = pos else {
            warn!(
                entity = entity.id(),
                "ignoring destroy of an entity that is not alive"
            );
            return;
        };
        self.entities.swap_remove(pos);
        self.masks[entity.index()] = ComponentMask::EMPTY;
        debug!(
            entity = entity.id(),
            views = views.len(),
            "entity destroyed, id held until collect"
        );
        self.pending.push(DestroyRecord { entity, views });
    }

    /// Drain the destruction records accumulated since the last collect pass.
    pub fn take_pending(&mut self) -> Vec<DestroyRecord> {
        std::mem::take(&mut self.pending)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Return a collected id to the free pool.
    pub fn release(&mut self, entity: Entity) {
        debug_assert!(
            !self.free.contains(&entity),
            "entity {entity:?} released twice"
        );
        self.free.push(entity);
    }
}
