//! System trait and lifecycle hooks.

use std::any::Any;

use crate::world::World;

/// System ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SystemId(pub u32);

/// A pluggable unit of per-frame behavior
///
/// All hooks default to no-ops, so a system implements only the ones it
/// needs. `load` runs once when the system is added and `unload` once when it
/// is destroyed; `update` and `draw` run every frame in system list order.
/// While a hook runs the system's own slot is vacant, so destroying systems
/// from inside a hook is not supported.
pub trait System: Any {
    fn load(&mut self, _world: &mut World) {}

    fn update(&mut self, _world: &mut World, _dt: f32) {}

    fn draw(&mut self, _world: &mut World) {}

    fn unload(&mut self, _world: &mut World) {}
}
