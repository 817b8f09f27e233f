//! Frame runner tying a world, an event dispatcher and a clock together.

use crate::event::EventDispatcher;
use crate::time::FrameClock;
use crate::world::World;

/// Owns the pieces of a running application and drives the frame cycle:
/// clock tick, system updates, system draws, then the recycle pass.
///
/// Window pumping and presentation stay with the embedding application;
/// `App` only sequences the world side of the frame.
pub struct App {
    world: World,
    events: EventDispatcher,
    clock: FrameClock,
}

impl App {
    pub fn new() -> Self {
        Self {
            world: World::new(),
            events: EventDispatcher::new(),
            clock: FrameClock::new(),
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn events(&self) -> &EventDispatcher {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut EventDispatcher {
        &mut self.events
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// Run one frame: update every system with the measured delta, draw, then
    /// flush destroyed entity ids back to the free pool.
    pub fn tick(&mut self) {
        let dt = self.clock.tick();
        self.world.update(dt);
        self.world.draw();
        self.world.collect_unused_entities();
    }

    /// Run a bounded number of frames.
    pub fn run_frames(&mut self, frames: u64) {
        for _ in 0..frames {
            self.tick();
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
