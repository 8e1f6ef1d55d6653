//! Fixed timestep accumulation.

/// Maximum fixed updates per frame (prevents a spiral of death).
const MAX_UPDATES_PER_FRAME: u32 = 10;

/// Maximum frame delta accepted, in seconds.
const MAX_FRAME_DT: f32 = 0.25;

/// Converts variable frame deltas into a count of fixed updates.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    fixed_dt: f32,
    accumulator: f32,
    ticks: u64,
}

impl FixedTimestep {
    /// Create a timestep running at `tick_rate` updates per second.
    #[must_use]
    pub fn new(tick_rate: u32) -> Self {
        Self {
            fixed_dt: 1.0 / tick_rate.max(1) as f32,
            accumulator: 0.0,
            ticks: 0,
        }
    }

    /// Seconds per fixed update.
    #[must_use]
    pub const fn fixed_dt(&self) -> f32 {
        self.fixed_dt
    }

    /// Fixed updates issued so far.
    #[must_use]
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Accumulate a frame delta.
    /// Returns the number of fixed updates that should be performed.
    pub fn accumulate(&mut self, dt: f32) -> u32 {
        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);
        let mut count = 0;

        // Small epsilon so a frame of exactly fixed_dt always yields one update
        while self.accumulator + 1e-6 >= self.fixed_dt && count < MAX_UPDATES_PER_FRAME {
            self.accumulator = (self.accumulator - self.fixed_dt).max(0.0);
            count += 1;
        }

        // Still behind: drop the backlog
        if self.accumulator > self.fixed_dt * 2.0 {
            self.accumulator = 0.0;
        }

        self.ticks += u64::from(count);
        count
    }
}
