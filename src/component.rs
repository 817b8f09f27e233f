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

//! Component traits and the marker component built into every world.
//!
//! Components are plain data attached to entities.
//! ComponentSet tuples shape views over them.

use crate::mask::ComponentMask;
use crate::world::World;

/// Marker trait for components
///
/// Components are plain value records: `Clone` (the entity copy path relies
/// on it) and `'static` (no borrowed data).
pub trait Component: Clone + 'static {}

/// Automatically implement Component for all valid types
impl<T: Clone + 'static> Component for T {}

/// Marker component that admits an entity to default views.
///
/// `create_entity` attaches it, `set_active` adds or removes it. Views built
/// without the `include_inactive` variants require it implicitly.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Active;

/// Dense id a world assigns to a component type the first time it is used.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ComponentTypeId(pub(crate) u8);

impl ComponentTypeId {
    /// Bit position in a [`ComponentMask`], index into the store table.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Tuple of component types used to shape a view
///
/// Built for tuples of 1 to 8 component types.
pub trait ComponentSet {
    /// Fold every member type's bit into `mask`, registering unseen types.
    fn fill_mask(world: &mut World, mask: &mut ComponentMask);
}

// DO NOT implement ComponentSet for T: Component
// This conflicts with the blanket Component impl
// Instead, implement only for tuples

macro_rules! impl_component_set {
    ($($T:ident),*) => {
        impl<$($T: Component),*> ComponentSet for ($($T,)*) {
            fn fill_mask(world: &mut World, mask: &mut ComponentMask) {
                $(mask.set(world.register_component::<$T>().index());)*
            }
        }
    };
}

// Implement for tuples of 1-8 component types
impl_component_set!(A);
impl_component_set!(A, B);
impl_component_set!(A, B, C);
impl_component_set!(A, B, C, D);
impl_component_set!(A, B, C, D, E);
impl_component_set!(A, B, C, D, E, F);
impl_component_set!(A, B, C, D, E, F, G);
impl_component_set!(A, B, C, D, E, F, G, H);

#[cfg(test)]
mod tests {
    #![allow(dead_code)]
    use super::*;

    #[derive(Clone, Copy)]
    struct Position {
        x: f32,
        y: f32,
    }

    #[derive(Clone, Copy)]
    struct Velocity {
        x: f32,
        y: f32,
    }

    #[test]
    fn test_single_type_mask() {
        let mut world = World::new();
        let mut mask = ComponentMask::EMPTY;
        <(Position,)>::fill_mask(&mut world, &mut mask);
        assert_eq!(mask.count(), 1);
    }

    #[test]
    fn test_distinct_types_get_distinct_bits() {
        let mut world = World::new();
        let mut mask = ComponentMask::EMPTY;
        <(Position, Velocity)>::fill_mask(&mut world, &mut mask);
        assert_eq!(mask.count(), 2);

        // Same types fold onto the same bits.
        let mut again = ComponentMask::EMPTY;
        <(Velocity, Position)>::fill_mask(&mut world, &mut again);
        assert_eq!(mask, again);
    }

    #[test]
    fn test_registration_is_stable() {
        let mut world = World::new();
        let first = world.register_component::<Position>();
        let second = world.register_component::<Position>();
        assert_eq!(first, second);
    }
}
