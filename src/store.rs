//! Dense component storage.
//!
//! One store per component type: values live in a packed array with no gaps,
//! compacted by swap-with-last on removal. Two maps tie entities to slots in
//! both directions so lookup and compaction both stay O(1).

use std::any::{type_name, Any};

use ahash::AHashMap;

use crate::component::Component;
use crate::entity::Entity;

/// Packed array of `T` values keyed by entity.
pub struct ComponentStore<T: Component> {
    /// Component values, no gaps.
    dense: Vec<T>,
    /// Entity to dense slot.
    entity_to_slot: AHashMap<Entity, usize>,
    /// Dense slot back to entity; always the exact inverse of the map above.
    slot_to_entity: Vec<Entity>,
}

impl<T: Component> ComponentStore<T> {
    pub fn new() -> Self {
        Self {
            dense: Vec::new(),
            entity_to_slot: AHashMap::new(),
            slot_to_entity: Vec::new(),
        }
    }

    /// Attach a value to `entity`, or overwrite the one it already holds.
    ///
    /// The overwrite path replaces in place and moves nothing.
    pub fn write(&mut self, entity: Entity, value: T) -> &mut T {
        if let Some(&slot) = self.entity_to_slot.get(&entity) {
            self.dense[slot] = value;
            &mut self.dense[slot]
        } else {
            let slot = self.dense.len();
            self.entity_to_slot.insert(entity, slot);
            self.slot_to_entity.push(entity);
            self.dense.push(value);
            &mut self.dense[slot]
        }
    }

    /// Borrow the value `entity` holds. Panics if it holds none.
    pub fn read(&self, entity: Entity) -> &T {
        match self.entity_to_slot.get(&entity) {
            Some(&slot) => &self.dense[slot],
            None => panic!("entity {:?} has no {} component", entity, type_name::<T>()),
        }
    }

    /// Mutably borrow the value `entity` holds. Panics if it holds none.
    pub fn read_mut(&mut self, entity: Entity) -> &mut T {
        match self.entity_to_slot.get(&entity) {
            Some(&slot) => &mut self.dense[slot],
            None => panic!("entity {:?} has no {} component", entity, type_name::<T>()),
        }
    }

    /// Detach the value `entity` holds, if any.
    ///
    /// The last dense value is swapped into the vacated slot and its entity's
    /// mapping is updated, so the array keeps no gaps. Safe to call without an
    /// existence check; the type-erased destroy path relies on that.
    pub fn remove(&mut self, entity: Entity) {
        let Some(slot) = self.entity_to_slot.remove(&entity) else {
            return;
        };
        self.dense.swap_remove(slot);
        self.slot_to_entity.swap_remove(slot);
        if slot < self.slot_to_entity.len() {
            let moved = self.slot_to_entity[slot];
            self.entity_to_slot.insert(moved, slot);
        }
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.entity_to_slot.contains_key(&entity)
    }

    /// Number of entities holding a `T`.
    pub fn len(&self) -> usize {
        self.dense.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dense.is_empty()
    }

    /// The packed values, in slot order.
    pub fn components(&self) -> &[T] {
        &self.dense
    }

    /// The owning entities, in slot order.
    pub fn entities(&self) -> &[Entity] {
        &self.slot_to_entity
    }

    /// Iterate `(entity, value)` pairs in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (Entity, &T)> {
        self.slot_to_entity.iter().copied().zip(self.dense.iter())
    }
}

impl<T: Component> Default for ComponentStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Object-safe facade over a [`ComponentStore`]
///
/// The destroy and copy paths walk every store without knowing the component
/// types; they only need removal, cloning between entities and membership.
pub(crate) trait AnyStore {
    fn remove(&mut self, entity: Entity);

    /// Clone `src`'s value onto `dst`. Returns true when `dst` did not hold
    /// one before, so the caller knows whether its mask bit flipped.
    fn copy(&mut self, dst: Entity, src: Entity) -> bool;

    fn contains(&self, entity: Entity) -> bool;

    fn len(&self) -> usize;

    fn type_name(&self) -> &'static str;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Component> AnyStore for ComponentStore<T> {
    fn remove(&mut self, entity: Entity) {
        ComponentStore::remove(self, entity);
    }

    fn copy(&mut self, dst: Entity, src: Entity) -> bool {
        debug_assert!(
            self.contains(src),
            "copy source {:?} has no {} component",
            src,
            type_name::<T>()
        );
        let Some(&slot) = self.entity_to_slot.get(&src) else {
            return false;
        };
        let value = self.dense[slot].clone();
        let newly = !self.entity_to_slot.contains_key(&dst);
        self.write(dst, value);
        newly
    }

    fn contains(&self, entity: Entity) -> bool {
        ComponentStore::contains(self, entity)
    }

    fn len(&self) -> usize {
        ComponentStore::len(self)
    }

    fn type_name(&self) -> &'static str {
        type_name::<T>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
