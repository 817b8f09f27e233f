//! Frame timing.

use std::time::Instant;

/// Wall-clock frame timer
///
/// Call [`tick`](FrameClock::tick) once at the top of every frame; it returns
/// the seconds elapsed since the previous tick, which is the `dt` handed to
/// [`World::update`](crate::world::World::update).
#[derive(Clone, Debug)]
pub struct FrameClock {
    /// Construction time
    started: Instant,
    /// Time of the last tick
    last: Instant,
    /// Delta returned by the last tick
    delta: f32,
    /// Frame counter
    frames: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            started: now,
            last: now,
            delta: 0.0,
            frames: 0,
        }
    }

    /// Advance the clock one frame and return the delta in seconds.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        self.delta = now.duration_since(self.last).as_secs_f32();
        self.last = now;
        self.frames += 1;
        self.delta
    }

    /// Delta returned by the last tick, 0.0 before the first.
    pub fn delta(&self) -> f32 {
        self.delta
    }

    /// Seconds since the clock was created.
    pub fn elapsed(&self) -> f32 {
        self.started.elapsed().as_secs_f32()
    }

    /// Number of ticks so far.
    pub fn frame_count(&self) -> u64 {
        self.frames
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_clock_starts_at_frame_zero() {
        let clock = FrameClock::new();
        assert_eq!(clock.frame_count(), 0);
        assert_eq!(clock.delta(), 0.0);
    }

    #[test]
    fn test_tick_advances_the_frame_counter() {
        let mut clock = FrameClock::new();
        clock.tick();
        clock.tick();
        assert_eq!(clock.frame_count(), 2);
    }

    #[test]
    fn test_tick_measures_elapsed_time() {
        let mut clock = FrameClock::new();
        std::thread::sleep(Duration::from_millis(5));
        let dt = clock.tick();
        assert!(dt > 0.0);
        assert_eq!(clock.delta(), dt);
        assert!(clock.elapsed() >= dt);
    }
}
