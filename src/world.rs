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

//! World: central entity, component and view storage.

use std::any::{type_name, Any, TypeId};

use ahash::AHashMap;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::{debug, warn};

#[cfg(feature = "profiling")]
use tracing::info_span;

use crate::component::{Active, Component, ComponentSet, ComponentTypeId};
use crate::entity::{Entity, EntityRegistry, DEFAULT_ENTITY_CAPACITY};
use crate::mask::{ComponentMask, MAX_COMPONENT_TYPES};
use crate::store::{AnyStore, ComponentStore};
use crate::system::{System, SystemId};
use crate::view::{DiffOp, ViewCache};

struct SystemSlot {
    id: SystemId,
    type_id: TypeId,
    name: &'static str,
    /// Vacated while the system's own hook runs.
    system: Option<Box<dyn System>>,
}

/// Central ECS world
/// Owns the entity registry, one dense store per component type, the view
/// cache table and the ordered system list.
pub struct World {
    /// Entity ids, liveness, masks and the deferred recycle pool.
    registry: EntityRegistry,
    /// One type-erased dense store per registered component type.
    stores: Vec<Box<dyn AnyStore>>,
    /// Component type to dense id.
    type_index: FxHashMap<TypeId, ComponentTypeId>,
    /// Materialized views keyed by component mask.
    views: AHashMap<ComponentMask, ViewCache>,
    /// Ordered system list.
    systems: Vec<SystemSlot>,
    next_system_id: u32,
    /// Bit for the `Active` marker, registered at construction.
    active_bit: usize,
}

impl World {
    /// World with the default entity capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_ENTITY_CAPACITY)
    }

    /// World that admits at most `capacity` entity ids, null sentinel
    /// included.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut world = Self {
            registry: EntityRegistry::with_capacity(capacity),
            stores: Vec::new(),
            type_index: FxHashMap::default(),
            views: AHashMap::new(),
            systems: Vec::new(),
            next_system_id: 0,
            active_bit: 0,
        };
        world.active_bit = world.register_component::<Active>().index();
        world
    }

    // ---- component types ----

    /// Assign `T` its dense type id, or return the existing one.
    ///
    /// Called implicitly by every write and view, so there is normally no
    /// reason to call it directly.
    pub fn register_component<T: Component>(&mut self) -> ComponentTypeId {
        let key = TypeId::of::<T>();
        if let Some(&id) = self.type_index.get(&key) {
            return id;
        }
        assert!(
            self.stores.len() < MAX_COMPONENT_TYPES,
            "component type capacity exceeded ({MAX_COMPONENT_TYPES})"
        );
        let id = ComponentTypeId(self.stores.len() as u8);
        self.type_index.insert(key, id);
        self.stores.push(Box::new(ComponentStore::<T>::new()));
        debug!(
            component = type_name::<T>(),
            id = id.index(),
            "registered component type"
        );
        id
    }

    /// Number of registered component types.
    pub fn component_type_count(&self) -> usize {
        self.stores.len()
    }

    /// Name and holder count of every registered component type, in
    /// registration order.
    pub fn component_counts(&self) -> Vec<(&'static str, usize)> {
        self.stores
            .iter()
            .map(|store| (store.type_name(), store.len()))
            .collect()
    }

    fn store<T: Component>(&self) -> Option<&ComponentStore<T>> {
        let id = self.type_index.get(&TypeId::of::<T>())?;
        self.stores[id.index()].as_any().downcast_ref()
    }

    fn store_mut<T: Component>(&mut self) -> Option<&mut ComponentStore<T>> {
        let id = *self.type_index.get(&TypeId::of::<T>())?;
        self.stores[id.index()].as_any_mut().downcast_mut()
    }

    /// Typed access to the dense store behind `T`, if `T` has been seen.
    pub fn storage<T: Component>(&self) -> Option<&ComponentStore<T>> {
        self.store::<T>()
    }

    // ---- entities ----

    /// Create an entity carrying the `Active` marker.
    pub fn create_entity(&mut self) -> Entity {
        let entity = self.registry.allocate();
        self.write(entity, Active);
        entity
    }

    /// Create an entity without the `Active` marker; default views skip it
    /// until `set_active(entity, true)`.
    pub fn create_inactive_entity(&mut self) -> Entity {
        self.registry.allocate()
    }

    /// Create an entity holding a copy of every component `src` holds,
    /// including its active state.
    pub fn create_entity_from(&mut self, src: Entity) -> Entity {
        let dst = self.create_inactive_entity();
        self.copy_entity(dst, src);
        dst
    }

    /// Destroy an entity: all components are removed immediately, but the id
    /// is only recycled once `collect_unused_entities` has flushed every view
    /// that referenced it. Destroying the null sentinel is fatal.
    pub fn destroy_entity(&mut self, entity: Entity) {
        assert!(!entity.is_null(), "the null entity cannot be destroyed");
        for store in &mut self.stores {
            store.remove(entity);
        }
        let mut views: SmallVec<[ComponentMask; 4]> = SmallVec::new();
        for (key, view) in self.views.iter_mut() {
            if view.contains_effective(entity) {
                view.queue(entity, DiffOp::Remove);
                views.push(*key);
            }
        }
        self.registry.schedule_destroy(entity, views);
    }

    /// Flush the views touched by destroyed entities, then return their ids
    /// to the free pool. Run once per frame, after update and draw.
    pub fn collect_unused_entities(&mut self) {
        #[cfg(feature = "profiling")]
        let span = info_span!("world.collect_unused_entities");
        #[cfg(feature = "profiling")]
        let _guard = span.enter();

        let records = self.registry.take_pending();
        if records.is_empty() {
            return;
        }
        let collected = records.len();
        for record in records {
            for key in &record.views {
                if let Some(view) = self.views.get_mut(key) {
                    view.apply_diffs();
                }
            }
            self.registry.release(record.entity);
        }
        debug!(collected, "recycled destroyed entity ids");
    }

    /// Copy every component `src` holds onto `dst`, overwriting values `dst`
    /// already has. Both entities must be alive.
    pub fn copy_entity(&mut self, dst: Entity, src: Entity) {
        debug_assert!(
            !dst.is_null() && !src.is_null(),
            "the null entity cannot take part in a copy"
        );
        debug_assert!(self.registry.contains(dst), "copy target {dst:?} is not alive");
        debug_assert!(self.registry.contains(src), "copy source {src:?} is not alive");
        if dst == src {
            return;
        }
        let mut gained = false;
        for index in 0..self.stores.len() {
            if !self.stores[index].contains(src) {
                continue;
            }
            if self.stores[index].copy(dst, src) {
                self.registry.mask_mut(dst).set(index);
                gained = true;
            }
        }
        if gained {
            let mask = *self.registry.mask(dst);
            for (key, view) in self.views.iter_mut() {
                if key.is_subset_of(&mask) && !view.contains_effective(dst) {
                    view.queue(dst, DiffOp::Add);
                }
            }
        }
    }

    /// All live entities, null sentinel and inactive entities included.
    /// Order is creation order modulo the swap-removal each destroy performs.
    pub fn entities(&self) -> &[Entity] {
        self.registry.live_entities()
    }

    /// Live entities, excluding the null sentinel.
    pub fn entity_count(&self) -> usize {
        self.registry.live_count()
    }

    /// True if the id is currently live. Linear scan.
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.registry.contains(entity)
    }

    /// Destroyed ids still waiting for the next collect pass.
    pub fn pending_recycle_count(&self) -> usize {
        self.registry.pending_count()
    }

    // ---- components ----

    /// Attach a component to an entity, or overwrite the one it already
    /// holds. Overwrites are O(1) and touch no view.
    pub fn write<T: Component>(&mut self, entity: Entity, value: T) -> &mut T {
        debug_assert!(!entity.is_null(), "the null entity cannot hold components");
        debug_assert!(
            self.registry.contains(entity),
            "writing {} to dead entity {entity:?}",
            type_name::<T>()
        );
        let type_id = self.register_component::<T>();
        if !self.registry.mask(entity).get(type_id.index()) {
            self.registry.mask_mut(entity).set(type_id.index());
            let mask = *self.registry.mask(entity);
            for (key, view) in self.views.iter_mut() {
                if key.is_subset_of(&mask) && !view.contains_effective(entity) {
                    view.queue(entity, DiffOp::Add);
                }
            }
        }
        let store = self.stores[type_id.index()]
            .as_any_mut()
            .downcast_mut::<ComponentStore<T>>()
            .unwrap();
        store.write(entity, value)
    }

    /// Borrow the `T` attached to `entity`. Panics if there is none.
    pub fn read<T: Component>(&self, entity: Entity) -> &T {
        match self.store::<T>() {
            Some(store) => store.read(entity),
            None => panic!("no {} has ever been written", type_name::<T>()),
        }
    }

    /// Mutably borrow the `T` attached to `entity`. Panics if there is none.
    ///
    /// Value mutation never changes view membership, so this is the cheap way
    /// to update a component every frame.
    pub fn read_mut<T: Component>(&mut self, entity: Entity) -> &mut T {
        match self.store_mut::<T>() {
            Some(store) => store.read_mut(entity),
            None => panic!("no {} has ever been written", type_name::<T>()),
        }
    }

    /// True if `entity` holds a `T`. False for types no entity has ever held.
    pub fn has<T: Component>(&self, entity: Entity) -> bool {
        self.store::<T>()
            .is_some_and(|store| store.contains(entity))
    }

    /// Detach the `T` attached to `entity`, if any.
    pub fn remove<T: Component>(&mut self, entity: Entity) {
        let type_id = self.type_index.get(&TypeId::of::<T>()).copied();
        debug_assert!(
            type_id.is_some(),
            "removing unregistered component type {}",
            type_name::<T>()
        );
        let Some(type_id) = type_id else {
            warn!(
                component = type_name::<T>(),
                "ignoring remove of an unregistered component type"
            );
            return;
        };
        if !self.registry.mask(entity).get(type_id.index()) {
            return;
        }
        let mut mask = *self.registry.mask(entity);
        mask.clear(type_id.index());
        for (key, view) in self.views.iter_mut() {
            if view.contains_effective(entity) && !key.is_subset_of(&mask) {
                view.queue(entity, DiffOp::Remove);
            }
        }
        *self.registry.mask_mut(entity) = mask;
        self.stores[type_id.index()].remove(entity);
    }

    /// Add or remove the `Active` marker.
    pub fn set_active(&mut self, entity: Entity, active: bool) {
        if active {
            self.write(entity, Active);
        } else {
            self.remove::<Active>(entity);
        }
    }

    pub fn is_active(&self, entity: Entity) -> bool {
        self.has::<Active>(entity)
    }

    // ---- views ----

    fn view_key<S: ComponentSet>(&mut self, include_inactive: bool) -> ComponentMask {
        let mut mask = ComponentMask::EMPTY;
        S::fill_mask(self, &mut mask);
        if !include_inactive {
            mask.set(self.active_bit);
        }
        mask
    }

    fn view_cache(&mut self, key: ComponentMask) -> &ViewCache {
        #[cfg(feature = "profiling")]
        let span = info_span!("world.view", ?key);
        #[cfg(feature = "profiling")]
        let _guard = span.enter();

        let registry = &self.registry;
        let view = self
            .views
            .entry(key)
            .or_insert_with(|| ViewCache::build(registry, &key));
        view.apply_diffs();
        view
    }

    /// Active entities holding every type in `S`. List order is insertion
    /// order modulo removal swaps: deterministic for a fixed operation
    /// history, but not sorted.
    ///
    /// The first request for a given shape scans the world once; afterwards
    /// the cached list is kept current by folding queued membership diffs, so
    /// repeat queries cost only the diff backlog (usually nothing).
    pub fn query<S: ComponentSet>(&mut self) -> Vec<Entity> {
        let key = self.view_key::<S>(false);
        self.view_cache(key).entities().to_vec()
    }

    /// Like [`query`](Self::query), but inactive entities match too.
    pub fn query_include_inactive<S: ComponentSet>(&mut self) -> Vec<Entity> {
        let key = self.view_key::<S>(true);
        self.view_cache(key).entities().to_vec()
    }

    /// First active entity holding every type in `S`.
    pub fn query_one<S: ComponentSet>(&mut self) -> Option<Entity> {
        let key = self.view_key::<S>(false);
        self.view_cache(key).entities().first().copied()
    }

    /// Like [`query_one`](Self::query_one), but inactive entities match too.
    pub fn query_one_include_inactive<S: ComponentSet>(&mut self) -> Option<Entity> {
        let key = self.view_key::<S>(true);
        self.view_cache(key).entities().first().copied()
    }

    /// Borrow the `T` of the first active entity holding one. Panics if no
    /// active entity does. The accessor for camera, player and similar
    /// one-of-a-kind components.
    pub fn read_any<T: Component>(&mut self) -> &T {
        match self.query_one::<(T,)>() {
            Some(entity) => self.read::<T>(entity),
            None => panic!("no active entity holds a {}", type_name::<T>()),
        }
    }

    /// Counters for the view cache table.
    pub fn query_cache_stats(&self) -> QueryCacheStats {
        QueryCacheStats {
            cached_views: self.views.len(),
            cached_entities: self.views.values().map(|v| v.entities().len()).sum(),
            pending_diffs: self.views.values().map(|v| v.pending_diffs()).sum(),
        }
    }

    // ---- systems ----

    /// Append a system to the list and run its `load` hook.
    pub fn add_system<S: System>(&mut self, system: S) -> SystemId {
        let index = self.systems.len();
        self.insert_system(index, Box::new(system), type_name::<S>(), TypeId::of::<S>())
    }

    /// Insert a system ahead of the first system of type `Target`, or append
    /// when no `Target` is in the list, then run its `load` hook.
    pub fn add_system_before<Target: System, S: System>(&mut self, system: S) -> SystemId {
        let target = TypeId::of::<Target>();
        let index = self
            .systems
            .iter()
            .position(|slot| slot.type_id == target)
            .unwrap_or(self.systems.len());
        self.insert_system(index, Box::new(system), type_name::<S>(), TypeId::of::<S>())
    }

    fn insert_system(
        &mut self,
        index: usize,
        system: Box<dyn System>,
        name: &'static str,
        type_id: TypeId,
    ) -> SystemId {
        let id = SystemId(self.next_system_id);
        self.next_system_id += 1;
        self.systems.insert(
            index,
            SystemSlot {
                id,
                type_id,
                name,
                system: Some(system),
            },
        );
        debug!(system = name, index, "system added");
        self.run_slot_hook(id, |system, world| system.load(world));
        id
    }

    /// Vacate one slot, run a hook on its system, then restore it by id.
    fn run_slot_hook(&mut self, id: SystemId, hook: impl FnOnce(&mut dyn System, &mut World)) {
        let Some(pos) = self.systems.iter().position(|slot| slot.id == id) else {
            return;
        };
        let Some(mut system) = self.systems[pos].system.take() else {
            return;
        };
        hook(system.as_mut(), self);
        if let Some(slot) = self.systems.iter_mut().find(|slot| slot.id == id) {
            slot.system = Some(system);
        }
    }

    /// First system of type `S`, if present and not currently running a hook.
    pub fn get_system<S: System>(&self) -> Option<&S> {
        let target = TypeId::of::<S>();
        self.systems
            .iter()
            .filter(|slot| slot.type_id == target)
            .find_map(|slot| {
                let system: &dyn Any = slot.system.as_deref()?;
                system.downcast_ref::<S>()
            })
    }

    /// Mutable variant of [`get_system`](Self::get_system).
    pub fn get_system_mut<S: System>(&mut self) -> Option<&mut S> {
        let target = TypeId::of::<S>();
        self.systems
            .iter_mut()
            .filter(|slot| slot.type_id == target)
            .find_map(|slot| {
                let system: &mut dyn Any = slot.system.as_deref_mut()?;
                system.downcast_mut::<S>()
            })
    }

    /// Run the system's `unload` hook and drop it, preserving list order.
    pub fn destroy_system(&mut self, id: SystemId) {
        let Some(pos) = self.systems.iter().position(|slot| slot.id == id) else {
            warn!("trying to destroy a system that is not in the world");
            return;
        };
        if self.systems[pos].system.is_none() {
            warn!(
                system = self.systems[pos].name,
                "cannot destroy a system while its own hook runs"
            );
            return;
        }
        let mut slot = self.systems.remove(pos);
        if let Some(mut system) = slot.system.take() {
            system.unload(self);
        }
        debug!(system = slot.name, "system destroyed");
    }

    /// Unload and drop every system, in list order.
    pub fn destroy_all_systems(&mut self) {
        while !self.systems.is_empty() {
            let mut slot = self.systems.remove(0);
            if let Some(mut system) = slot.system.take() {
                system.unload(self);
            }
        }
    }

    pub fn system_count(&self) -> usize {
        self.systems.len()
    }

    /// Run `update` on every system in list order. Systems appended during
    /// the pass run in the same frame; a system cannot destroy itself from
    /// its own hook.
    pub fn update(&mut self, dt: f32) {
        self.run_systems(|system, world| system.update(world, dt));
    }

    /// Run `draw` on every system in list order.
    pub fn draw(&mut self) {
        self.run_systems(|system, world| system.draw(world));
    }

    fn run_systems(&mut self, mut hook: impl FnMut(&mut dyn System, &mut World)) {
        let mut i = 0;
        while i < self.systems.len() {
            let id = self.systems[i].id;
            let Some(mut system) = self.systems[i].system.take() else {
                i += 1;
                continue;
            };
            hook(system.as_mut(), self);
            if let Some(pos) = self.systems.iter().position(|slot| slot.id == id) {
                self.systems[pos].system = Some(system);
                i = pos + 1;
            }
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Statistics about the view cache table
#[derive(Debug, Clone, Copy)]
pub struct QueryCacheStats {
    /// Number of distinct masks with a materialized view
    pub cached_views: usize,
    /// Total entities across all materialized views
    pub cached_entities: usize,
    /// Queued diffs not yet folded into their views
    pub pending_diffs: usize,
}
