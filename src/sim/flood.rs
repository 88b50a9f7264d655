//! Water level integration
//!
//! The water plane rises as a function of active leak count and the current
//! rise rate. Obstacle hits multiply the rate permanently for the session;
//! the compounding is deliberate and unbounded (see DESIGN notes).

#[derive(Debug, Clone, Copy)]
pub struct FloodModel {
    water_height: f32,
    max_water_height: f32,
    rate: f32,
    penalty_factor: f32,
    penalty_hits: u32,
}

impl FloodModel {
    pub fn new(rate: f32, max_water_height: f32, penalty_factor: f32) -> Self {
        Self {
            water_height: 0.0,
            max_water_height,
            rate,
            penalty_factor,
            penalty_hits: 0,
        }
    }

    /// Integrate the water level over `dt` and return the new height
    ///
    /// Monotone non-decreasing: zero leaks hold the level, they never drain it.
    pub fn advance(&mut self, dt: f32, active_leak_count: usize) -> f32 {
        if active_leak_count > 0 {
            self.water_height += self.rate * active_leak_count as f32 * dt;
        }
        self.water_height
    }

    /// Multiply the rise rate by the penalty factor (obstacle hit)
    ///
    /// Cumulative and permanent: two hits leave the rate at base * factor^2.
    pub fn apply_penalty(&mut self) {
        self.rate *= self.penalty_factor;
        self.penalty_hits += 1;
        log::info!(
            "flood penalty #{}: rise rate now {:.5}",
            self.penalty_hits,
            self.rate
        );
    }

    /// Lose condition: the water reached the top
    pub fn is_overflowed(&self) -> bool {
        self.water_height >= self.max_water_height
    }

    pub fn water_height(&self) -> f32 {
        self.water_height
    }

    pub fn rate(&self) -> f32 {
        self.rate
    }

    pub fn penalty_hits(&self) -> u32 {
        self.penalty_hits
    }
}
