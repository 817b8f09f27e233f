//! Convenient re-exports of commonly used types.
//!
//! The prelude can be imported with:
//! ```
//! use packed_ecs::prelude::*;
//! ```

pub use crate::app::App;
pub use crate::component::{Active, Component, ComponentSet};
pub use crate::debug::{WorldInspector, WorldSummary};
pub use crate::entity::Entity;
pub use crate::event::EventDispatcher;
pub use crate::mask::ComponentMask;
pub use crate::system::{System, SystemId};
pub use crate::time::FrameClock;
pub use crate::world::World;
