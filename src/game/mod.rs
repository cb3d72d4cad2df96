use std::time::Duration;

use serde::{Deserialize, Serialize};

pub mod runner;
pub mod scram_game;
pub mod seek_game;

/// Largest length an edge of a generated scram sewer can have.
pub const MAX_EDGE_WEIGHT: u32 = 15;
/// Share of extra steps granted on top of the shortest way out.
pub const EXTRA_TIME_FACTOR: f64 = 0.3;
pub const MIN_BONUS: f64 = 1.0;
pub const MAX_BONUS: f64 = 1.3;
/// Seek runs taking this many times the optimal steps (on top of the
/// optimum) get no bonus.
pub const NO_BONUS_LENGTH: f64 = 3.0;
pub const SEEK_TIMEOUT: Duration = Duration::from_secs(10);
pub const SCRAM_TIMEOUT: Duration = Duration::from_secs(15);

/// Tuning knobs of one game. A `None` timeout runs the phase on the calling
/// thread without a watchdog.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub max_edge_weight: u32,
    pub extra_time_factor: f64,
    pub seek_timeout: Option<Duration>,
    pub scram_timeout: Option<Duration>,
    /// Fixed scram budget instead of the computed one.
    pub scram_budget: Option<u32>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            max_edge_weight: MAX_EDGE_WEIGHT,
            extra_time_factor: EXTRA_TIME_FACTOR,
            seek_timeout: Some(SEEK_TIMEOUT),
            scram_timeout: Some(SCRAM_TIMEOUT),
            scram_budget: None,
        }
    }
}

impl GameConfig {
    /// No watchdog threads, everything runs on the caller's thread.
    pub fn without_timeouts() -> Self {
        GameConfig {
            seek_timeout: None,
            scram_timeout: None,
            ..Default::default()
        }
    }

    /// Steps granted for scramming: the shortest way out plus an allowance
    /// proportional to the size of the sewer.
    pub fn scram_budget(&self, min_steps: u32, open_tiles: usize) -> u32 {
        if let Some(budget) = self.scram_budget {
            return budget;
        }
        let allowance =
            self.extra_time_factor * (self.max_edge_weight + 1) as f64 * open_tiles as f64 / 2.0;
        (min_steps as f64 + allowance) as u32
    }
}

/// Bonus multiplier earned in the seek phase: [`MAX_BONUS`] for an optimal
/// walk, falling linearly to [`MIN_BONUS`] as the walk grows longer.
pub fn bonus_factor(steps_taken: u32, min_steps: u32) -> f64 {
    if steps_taken <= min_steps {
        return MAX_BONUS;
    }
    let excess = (steps_taken - min_steps) as f64 / min_steps as f64;
    MIN_BONUS.max(MAX_BONUS - excess / NO_BONUS_LENGTH * (MAX_BONUS - MIN_BONUS))
}

pub fn score(bonus_factor: f64, coins: u64) -> u64 {
    (bonus_factor * coins as f64).floor() as u64
}

#[cfg(test)]
mod tests {
    use super::{bonus_factor, score, GameConfig, MAX_BONUS, MIN_BONUS};

    #[test]
    fn bonus_shrinks_with_detours() {
        assert_eq!(bonus_factor(10, 10), MAX_BONUS);
        assert_eq!(bonus_factor(7, 10), MAX_BONUS);
        assert!((bonus_factor(25, 10) - 1.15).abs() < 1e-9);
        assert_eq!(bonus_factor(40, 10), MIN_BONUS);
        assert_eq!(bonus_factor(1000, 10), MIN_BONUS);
        assert_eq!(bonus_factor(3, 0), MIN_BONUS);
    }

    #[test]
    fn score_rounds_down() {
        assert_eq!(score(1.3, 1001), 1301);
        assert_eq!(score(MIN_BONUS, 0), 0);
    }

    #[test]
    fn budget_allowance() {
        let config = GameConfig::default();
        // 0.3 * 16 * 10 / 2 = 24
        assert_eq!(config.scram_budget(7, 10), 31);

        let fixed = GameConfig {
            scram_budget: Some(5),
            ..GameConfig::default()
        };
        assert_eq!(fixed.scram_budget(7, 10), 5);
    }
}
