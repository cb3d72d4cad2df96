use std::{
    sync::{mpsc, Arc},
    thread,
    time::Duration,
};

use log::{info, warn};
use serde::{Deserialize, Serialize};

use super::{bonus_factor, scram_game::ScramGame, score, seek_game::SeekGame, GameConfig};
use crate::{
    diver::SewerDiver,
    error::{Error, Result},
    sewer::Sewer,
};

/// What became of a job run under [`run_with_deadline`].
#[derive(Debug)]
pub enum Watched<T> {
    Finished(T),
    TimedOut,
    Panicked,
}

/// Runs `job` and waits for it at most `deadline`.
///
/// With a deadline the job runs on its own thread. Once the deadline passes
/// the thread is detached and left to finish on its own; nothing is forcibly
/// stopped, so the job must not share state the caller keeps using. Without
/// a deadline the job runs on the calling thread.
pub fn run_with_deadline<T, F>(deadline: Option<Duration>, job: F) -> Watched<T>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    let Some(deadline) = deadline else {
        return Watched::Finished(job());
    };

    let (sender, receiver) = mpsc::channel();
    thread::spawn(move || {
        // The receiver is gone if the deadline already passed.
        let _ = sender.send(job());
    });

    match receiver.recv_timeout(deadline) {
        Ok(result) => Watched::Finished(result),
        Err(mpsc::RecvTimeoutError::Timeout) => Watched::TimedOut,
        Err(mpsc::RecvTimeoutError::Disconnected) => Watched::Panicked,
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhaseStatus {
    Succeeded,
    /// The strategy returned `Ok` away from its goal.
    WrongLocation,
    Failed { reason: String },
    TimedOut,
}

impl PhaseStatus {
    fn from_result(result: &Result<()>, arrived: bool) -> PhaseStatus {
        match result {
            Ok(()) if arrived => PhaseStatus::Succeeded,
            Ok(()) => PhaseStatus::WrongLocation,
            Err(error) => PhaseStatus::Failed {
                reason: error.to_string(),
            },
        }
    }

    pub fn succeeded(&self) -> bool {
        *self == PhaseStatus::Succeeded
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SeekReport {
    pub status: PhaseStatus,
    pub steps_taken: u32,
    pub min_steps: u32,
    /// Shortest remaining way to the ring where the diver stopped, if it
    /// did not succeed.
    pub distance_left: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScramReport {
    pub status: PhaseStatus,
    pub budget: u32,
    pub steps_left: u32,
    pub min_steps: u32,
    pub distance_left: Option<u32>,
    pub coins_collected: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameOutcome {
    pub seek: SeekReport,
    /// Only played after a successful seek.
    pub scram: Option<ScramReport>,
    pub coins: u64,
    pub bonus_factor: f64,
    pub score: u64,
}

/// A seek sewer and a scram sewer played back to back. The scram phase
/// starts on the scram sewer tile at the seek sewer's ring position.
pub struct Game {
    seek_sewer: Arc<Sewer>,
    scram_sewer: Arc<Sewer>,
    config: GameConfig,
}

impl Game {
    pub fn new(seek_sewer: Sewer, scram_sewer: Sewer, config: GameConfig) -> Game {
        Game {
            seek_sewer: Arc::new(seek_sewer),
            scram_sewer: Arc::new(scram_sewer),
            config,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Plays seek, then scram if seek succeeded. The diver is handed back
    /// unless a phase timed out or panicked while holding it.
    ///
    /// Fails only if the sewers themselves are unplayable: no way from the
    /// entrance to the ring, or no open scram tile under the ring.
    pub fn play<D>(&self, diver: D) -> Result<(GameOutcome, Option<D>)>
    where
        D: SewerDiver + Send + 'static,
    {
        let (seek, diver) = self.play_seek(diver)?;

        let (scram, diver) = match diver {
            Some(diver) if seek.status.succeeded() => {
                let (scram, diver) = self.play_scram(diver)?;
                (Some(scram), diver)
            }
            diver => (None, diver),
        };

        let coins = scram.as_ref().map_or(0, |scram| scram.coins_collected);
        let bonus = bonus_factor(seek.steps_taken, seek.min_steps);
        let outcome = GameOutcome {
            seek,
            scram,
            coins,
            bonus_factor: bonus,
            score: score(bonus, coins),
        };
        info!(
            "coins collected: {}, bonus multiplier: {:.2}, score: {}",
            outcome.coins, outcome.bonus_factor, outcome.score
        );
        Ok((outcome, diver))
    }

    fn play_seek<D>(&self, diver: D) -> Result<(SeekReport, Option<D>)>
    where
        D: SewerDiver + Send + 'static,
    {
        let sewer = &self.seek_sewer;
        let min_steps = sewer.min_path_length_to_ring(sewer.entrance())?;
        info!("seek phase on {}, ring is {} steps away", sewer.describe(), min_steps);

        let game = SeekGame::new(Arc::clone(sewer));
        let watched = run_with_deadline(self.config.seek_timeout, move || {
            let (mut game, mut diver) = (game, diver);
            let result = diver.seek(&mut game);
            (result, game, diver)
        });

        let (status, position, steps_taken, diver) = match watched {
            Watched::Finished((result, game, diver)) => {
                let status = PhaseStatus::from_result(&result, game.found_ring());
                (status, game.position(), game.steps_taken(), Some(diver))
            }
            Watched::TimedOut => (PhaseStatus::TimedOut, sewer.entrance(), 0, None),
            Watched::Panicked => (
                PhaseStatus::Failed {
                    reason: "seek panicked".to_string(),
                },
                sewer.entrance(),
                0,
                None,
            ),
        };

        let distance_left = if status.succeeded() {
            None
        } else {
            warn!("seek did not succeed: {:?}", status);
            sewer.min_path_length_to_ring(position).ok()
        };

        Ok((
            SeekReport {
                status,
                steps_taken,
                min_steps,
                distance_left,
            },
            diver,
        ))
    }

    fn play_scram<D>(&self, diver: D) -> Result<(ScramReport, Option<D>)>
    where
        D: SewerDiver + Send + 'static,
    {
        let ring = self
            .seek_sewer
            .tile(self.seek_sewer.ring())
            .ok_or_else(|| Error::unreachable(&self.seek_sewer.ring()))?;
        let sewer = &self.scram_sewer;
        let start = sewer.require_node(ring.row(), ring.col())?;
        let min_steps = sewer.min_path_length_to_ring(start)?;
        let budget = self
            .config
            .scram_budget(min_steps, sewer.open_tile_count());
        info!(
            "scram phase on {}, exit is {} steps away, budget is {}",
            sewer.describe(),
            min_steps,
            budget
        );

        let game = ScramGame::new(Arc::clone(sewer), start, budget)?;
        let watched = run_with_deadline(self.config.scram_timeout, move || {
            let (mut game, mut diver) = (game, diver);
            let result = diver.scram(&mut game);
            (result, game, diver)
        });

        let (status, position, steps_left, coins_collected, diver) = match watched {
            Watched::Finished((result, game, diver)) => {
                let status = PhaseStatus::from_result(&result, game.reached_exit());
                (
                    status,
                    game.position(),
                    game.steps_left(),
                    game.coins_collected(),
                    Some(diver),
                )
            }
            Watched::TimedOut => (PhaseStatus::TimedOut, start, budget, 0, None),
            Watched::Panicked => (
                PhaseStatus::Failed {
                    reason: "scram panicked".to_string(),
                },
                start,
                budget,
                0,
                None,
            ),
        };

        let distance_left = if status.succeeded() {
            None
        } else {
            warn!("scram did not succeed: {:?}", status);
            sewer.min_path_length_to_ring(position).ok()
        };

        Ok((
            ScramReport {
                status,
                budget,
                steps_left,
                min_steps,
                distance_left,
                coins_collected,
            },
            diver,
        ))
    }
}

#[cfg(test)]
mod tests {
    use std::{thread, time::Duration};

    use super::{run_with_deadline, Watched};

    #[test]
    fn inline_without_deadline() {
        let caller = thread::current().id();
        let result = run_with_deadline(None, move || thread::current().id() == caller);
        assert!(matches!(result, Watched::Finished(true)));
    }

    #[test]
    fn gives_up_after_deadline() {
        let result = run_with_deadline(Some(Duration::from_millis(20)), || {
            thread::sleep(Duration::from_secs(2));
            1
        });
        assert!(matches!(result, Watched::TimedOut));
    }

    #[test]
    fn finishes_within_deadline() {
        let result = run_with_deadline(Some(Duration::from_secs(5)), || 6 * 7);
        assert!(matches!(result, Watched::Finished(42)));
    }

    #[test]
    fn reports_panics() {
        let result: Watched<()> =
            run_with_deadline(Some(Duration::from_secs(5)), || panic!("diver gave up"));
        assert!(matches!(result, Watched::Panicked));
    }
}
