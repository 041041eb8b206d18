//! Periodic spawn timers
//!
//! Two independent repeating timers request obstacles and bonuses. Each
//! fires once at phase 0 and then every `period` seconds. Timers only move
//! when advanced, so a frozen session freezes them too.

use serde::{Deserialize, Serialize};

use super::entity::Category;
use crate::consts::{MAX_FIRES_PER_ADVANCE, MIN_SPAWN_PERIOD};
use crate::settings::Settings;

/// A repeating run-then-wait timer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnTimer {
    category: Category,
    period: f32,
    /// Seconds since the last fire
    elapsed: f32,
    /// Whether the initial phase-0 fire has happened
    primed: bool,
    /// Total fires since creation
    fired: u32,
}

impl SpawnTimer {
    pub fn new(category: Category, period: f32) -> Self {
        Self {
            category,
            period: period.max(MIN_SPAWN_PERIOD),
            elapsed: 0.0,
            primed: false,
            fired: 0,
        }
    }

    /// Advance by `dt`, returning how many times the timer fired.
    ///
    /// A non-finite `dt` counts as zero. Catch-up fires beyond
    /// `MAX_FIRES_PER_ADVANCE` are dropped.
    pub fn advance(&mut self, dt: f32) -> u32 {
        let mut fires = 0;
        if !self.primed {
            self.primed = true;
            fires += 1;
        }
        if dt.is_finite() {
            self.elapsed = (self.elapsed + dt.max(0.0)).min(f32::MAX);
        }
        if self.elapsed >= self.period {
            let periods = (self.elapsed / self.period).floor();
            self.elapsed %= self.period;
            fires += periods.min(MAX_FIRES_PER_ADVANCE as f32) as u32;
        }
        self.fired = self.fired.saturating_add(fires);
        fires
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn period(&self) -> f32 {
        self.period
    }

    /// Seconds into the current period
    pub fn phase(&self) -> f32 {
        self.elapsed
    }

    pub fn fired(&self) -> u32 {
        self.fired
    }
}

/// The obstacle and bonus timers of one session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnScheduler {
    obstacle: SpawnTimer,
    bonus: SpawnTimer,
}

impl SpawnScheduler {
    pub fn new(obstacle_period: f32, bonus_period: f32) -> Self {
        Self {
            obstacle: SpawnTimer::new(Category::Obstacle, obstacle_period),
            bonus: SpawnTimer::new(Category::Bonus, bonus_period),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.obstacle_period, settings.bonus_period)
    }

    /// Advance both timers and list the spawn requests, obstacles first
    pub fn advance(&mut self, dt: f32) -> Vec<Category> {
        let obstacles = self.obstacle.advance(dt);
        let bonuses = self.bonus.advance(dt);

        let mut requests = Vec::with_capacity((obstacles + bonuses) as usize);
        requests.extend(std::iter::repeat_n(Category::Obstacle, obstacles as usize));
        requests.extend(std::iter::repeat_n(Category::Bonus, bonuses as usize));
        requests
    }

    pub fn obstacle_timer(&self) -> &SpawnTimer {
        &self.obstacle
    }

    pub fn bonus_timer(&self) -> &SpawnTimer {
        &self.bonus
    }

    /// True when neither timer has been advanced yet
    pub fn at_phase_zero(&self) -> bool {
        self.obstacle.fired == 0
            && self.bonus.fired == 0
            && self.obstacle.elapsed == 0.0
            && self.bonus.elapsed == 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_fires_at_phase_zero_then_every_period() {
        let mut timer = SpawnTimer::new(Category::Obstacle, 2.0);
        assert_eq!(timer.advance(0.5), 1);
        assert_eq!(timer.advance(1.0), 0);
        assert_eq!(timer.advance(0.5), 1);
        assert!(timer.phase().abs() < 1e-6);
        assert_eq!(timer.fired(), 2);
    }

    #[test]
    fn test_large_step_fires_multiple_times() {
        let mut timer = SpawnTimer::new(Category::Bonus, 6.0);
        assert_eq!(timer.advance(13.0), 3);
        assert!((timer.phase() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_zero_period_is_clamped() {
        let mut timer = SpawnTimer::new(Category::Obstacle, 0.0);
        assert_eq!(timer.period(), MIN_SPAWN_PERIOD);
        // Terminates and fires a bounded number of times
        assert!(timer.advance(1.0) <= 1 + (1.0 / MIN_SPAWN_PERIOD) as u32 + 1);
    }

    #[test]
    fn test_huge_step_is_bounded() {
        let mut timer = SpawnTimer::new(Category::Obstacle, 2.0);
        assert_eq!(timer.advance(1.0e8), 1 + MAX_FIRES_PER_ADVANCE);
        assert!(timer.phase() >= 0.0 && timer.phase() < timer.period());

        let mut fast = SpawnTimer::new(Category::Obstacle, MIN_SPAWN_PERIOD);
        fast.advance(0.0);
        for _ in 0..10 {
            assert_eq!(fast.advance(f32::MAX), MAX_FIRES_PER_ADVANCE);
        }
        assert_eq!(fast.fired(), 1 + 10 * MAX_FIRES_PER_ADVANCE);
    }

    #[test]
    fn test_non_finite_step_counts_as_zero() {
        let mut timer = SpawnTimer::new(Category::Bonus, 6.0);
        assert_eq!(timer.advance(f32::INFINITY), 1);
        assert_eq!(timer.advance(f32::NAN), 0);
        assert_eq!(timer.phase(), 0.0);
        assert_eq!(timer.advance(6.0), 1);
    }

    #[test]
    fn test_scheduler_independent_cadence() {
        let mut scheduler = SpawnScheduler::new(2.0, 6.0);
        assert!(scheduler.at_phase_zero());

        let first = scheduler.advance(0.0);
        assert_eq!(first, vec![Category::Obstacle, Category::Bonus]);
        assert!(!scheduler.at_phase_zero());

        let mut obstacles = 0;
        let mut bonuses = 0;
        // 12 more seconds in 0.5s steps
        for _ in 0..24 {
            for c in scheduler.advance(0.5) {
                match c {
                    Category::Obstacle => obstacles += 1,
                    Category::Bonus => bonuses += 1,
                    Category::Player => unreachable!(),
                }
            }
        }
        assert_eq!(obstacles, 6);
        assert_eq!(bonuses, 2);
    }
}
