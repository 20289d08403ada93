//! Rock-paper-scissors round flow: pick, shake, reveal.

use super::types::{
    Choice, RoundResult, RpsGame, Shake, REVEAL_AFTER, SHAKE_PULSES, SHAKE_PULSE_INTERVAL,
};
use crate::activities::{ActivityInput, ActivityOutcome};
use crate::feedback::{Feedback, FeedbackEvent};
use rand::seq::SliceRandom;
use rand::Rng;
use std::time::Duration;
use tracing::debug;

pub fn calculate_result(player: Choice, opponent: Choice) -> RoundResult {
    if player == opponent {
        RoundResult::Draw
    } else if player.beats() == opponent {
        RoundResult::Win
    } else {
        RoundResult::Lose
    }
}

/// Lock in the player's hand and start the shake. Ignored mid-round.
pub fn choose(game: &mut RpsGame, choice: Choice, feedback: &mut dyn Feedback) -> bool {
    if game.is_shaking() || game.result.is_some() {
        return false;
    }
    game.player_choice = Some(choice);
    game.opponent_choice = None;
    game.shake = Some(Shake {
        elapsed: Duration::ZERO,
        pulses: 0,
    });
    feedback.emit(FeedbackEvent::Select);
    true
}

/// Advance the shake. Returns true if a pulse fired or the round resolved.
pub fn tick<R: Rng>(
    game: &mut RpsGame,
    dt: Duration,
    rng: &mut R,
    feedback: &mut dyn Feedback,
) -> bool {
    let Some(mut shake) = game.shake else {
        return false;
    };

    shake.elapsed += dt;
    let mut changed = false;
    while shake.pulses < SHAKE_PULSES && shake.elapsed >= SHAKE_PULSE_INTERVAL * (shake.pulses + 1)
    {
        shake.pulses += 1;
        feedback.emit(FeedbackEvent::Shake);
        changed = true;
    }

    if shake.elapsed < REVEAL_AFTER {
        game.shake = Some(shake);
        return changed;
    }

    game.shake = None;
    reveal(game, rng, feedback);
    true
}

fn reveal<R: Rng>(game: &mut RpsGame, rng: &mut R, feedback: &mut dyn Feedback) {
    let Some(player) = game.player_choice else {
        return;
    };
    let opponent = Choice::ALL.choose(rng).copied().unwrap_or(Choice::Rock);
    let result = calculate_result(player, opponent);

    game.opponent_choice = Some(opponent);
    game.result = Some(result);
    match result {
        RoundResult::Win => {
            game.score.player += 1;
            feedback.emit(FeedbackEvent::RoundWon);
        }
        RoundResult::Lose => game.score.opponent += 1,
        RoundResult::Draw => {}
    }
    debug!(
        player = player.name(),
        opponent = opponent.name(),
        ?result,
        "rps round"
    );
}

/// Clear the hands for the next round. The score is kept.
pub fn reset_round(game: &mut RpsGame) {
    game.player_choice = None;
    game.opponent_choice = None;
    game.result = None;
    game.shake = None;
}

/// Process a key press. Returns `Close` when the player leaves.
pub fn process_input(
    game: &mut RpsGame,
    input: ActivityInput,
    feedback: &mut dyn Feedback,
) -> ActivityOutcome {
    match input {
        ActivityInput::Cancel => return ActivityOutcome::Close,
        _ if game.is_shaking() => {}
        ActivityInput::Left | ActivityInput::Up => game.move_cursor(-1),
        ActivityInput::Right | ActivityInput::Down => game.move_cursor(1),
        ActivityInput::Primary | ActivityInput::Reset if game.result.is_some() => {
            reset_round(game)
        }
        ActivityInput::Primary => {
            let choice = game.cursor_choice();
            choose(game, choice, feedback);
        }
        _ => {}
    }
    ActivityOutcome::Continue
}
