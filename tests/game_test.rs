use std::{thread, time::Duration};

use sewer_paths::{
    diver::{
        state::{NodeId, ScramState, SeekState},
        Diver, SewerDiver,
    },
    error::Result,
    game::{
        runner::{Game, PhaseStatus},
        GameConfig,
    },
    graphs::WeightedDigraph,
    sewer::Sewer,
};

fn seek_sewer() -> Sewer {
    Sewer::from_layout(&["#####", "#E.R#", "#####"], 1).unwrap()
}

fn scram_sewer() -> Sewer {
    Sewer::from_layout(&["#####", "#E4.#", "#####"], 1).unwrap()
}

/// Returns at once without moving, or sleeps first if asked to.
struct IdleDiver {
    delay: Duration,
}

impl SewerDiver for IdleDiver {
    fn seek<S: SeekState + ?Sized>(&mut self, _state: &mut S) -> Result<()> {
        thread::sleep(self.delay);
        Ok(())
    }

    fn scram<S>(&mut self, _state: &mut S) -> Result<()>
    where
        S: ScramState + ?Sized,
        S::Graph: WeightedDigraph<Vertex = NodeId>,
    {
        Ok(())
    }
}

#[test]
fn full_game() {
    let game = Game::new(seek_sewer(), scram_sewer(), GameConfig::without_timeouts());
    let (outcome, diver) = game.play(Diver::new()).unwrap();

    assert_eq!(outcome.seek.status, PhaseStatus::Succeeded);
    assert_eq!(outcome.seek.steps_taken, 2);
    assert_eq!(outcome.seek.min_steps, 2);

    let scram = outcome.scram.as_ref().unwrap();
    assert_eq!(scram.status, PhaseStatus::Succeeded);
    assert_eq!(scram.min_steps, 2);
    // 2 + 0.3 * 16 * 3 / 2
    assert_eq!(scram.budget, 9);
    assert_eq!(scram.steps_left, 7);
    assert_eq!(scram.distance_left, None);

    assert_eq!(outcome.coins, 400);
    assert_eq!(outcome.bonus_factor, 1.3);
    assert_eq!(outcome.score, 520);

    let diver = diver.unwrap();
    assert_eq!(diver.seek_log().route(), vec![6, 7, 8]);
    assert_eq!(diver.scram_log().route(), vec![8, 7, 6]);
}

#[test]
fn full_game_with_watchdog() {
    let game = Game::new(seek_sewer(), scram_sewer(), GameConfig::default());
    let (outcome, diver) = game.play(Diver::new()).unwrap();

    assert!(outcome.seek.status.succeeded());
    assert!(outcome.scram.unwrap().status.succeeded());
    assert_eq!(outcome.score, 520);
    assert!(diver.is_some());
}

#[test]
fn returning_early_is_wrong_location() {
    let game = Game::new(seek_sewer(), scram_sewer(), GameConfig::without_timeouts());
    let diver = IdleDiver {
        delay: Duration::ZERO,
    };
    let (outcome, diver) = game.play(diver).unwrap();

    assert_eq!(outcome.seek.status, PhaseStatus::WrongLocation);
    assert_eq!(outcome.seek.distance_left, Some(2));
    assert!(outcome.scram.is_none());
    assert_eq!(outcome.score, 0);
    assert!(diver.is_some());
}

#[test]
fn slow_seek_times_out() {
    let config = GameConfig {
        seek_timeout: Some(Duration::from_millis(50)),
        ..GameConfig::default()
    };
    let game = Game::new(seek_sewer(), scram_sewer(), config);
    let diver = IdleDiver {
        delay: Duration::from_secs(1),
    };
    let (outcome, diver) = game.play(diver).unwrap();

    assert_eq!(outcome.seek.status, PhaseStatus::TimedOut);
    assert!(outcome.scram.is_none());
    assert!(diver.is_none());
}

#[test]
fn outcome_serializes_to_json() {
    let game = Game::new(seek_sewer(), scram_sewer(), GameConfig::without_timeouts());
    let (outcome, _) = game.play(Diver::new()).unwrap();

    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["seek"]["status"], "Succeeded");
    assert_eq!(json["scram"]["coins_collected"], 400);
    assert_eq!(json["score"], 520);
}

#[test]
fn unplayable_sewers() {
    let cut_off = Sewer::from_layout(&["E#R"], 1).unwrap();
    let game = Game::new(cut_off, scram_sewer(), GameConfig::without_timeouts());
    assert!(game.play(Diver::new()).is_err());

    // No open scram tile under the ring.
    let walled = Sewer::from_layout(&["#####", "#E.##", "#####"], 1).unwrap();
    let game = Game::new(seek_sewer(), walled, GameConfig::without_timeouts());
    assert!(game.play(Diver::new()).is_err());
}
