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

//! Packed ECS - Sparse-set Entity Component System
//!
//! Dense per-type component storage, bitmask-keyed cached queries and
//! deferred entity id recycling.

pub mod app;
pub mod component;
pub mod debug;
pub mod entity;
pub mod event;
pub mod mask;
pub mod prelude;
pub mod store;
pub mod system;
pub mod time;
mod view;
pub mod world;


pub use app::*;
pub use component::*;
pub use entity::*;
pub use event::*;
pub use mask::*;
pub use store::*;
pub use system::*;
pub use world::*;
