//! Bot player: difficulty-dependent move choice applied after a thinking delay.
//!
//! The delay is a tick-driven [`BotTask`] stored on the game. It is dropped by
//! reset, by disabling the bot and by closing the activity, and it carries the
//! ply it was scheduled at so a move can never land on a board that changed
//! underneath it.

use super::logic::finish_move;
use super::rules::{LegalMove, Rules};
use super::types::{BotDifficulty, ChessGame};
use crate::feedback::Feedback;
use rand::seq::SliceRandom;
use rand::Rng;
use shakmaty::Role;
use std::time::Duration;
use tracing::debug;

/// Thinking delay bounds, in milliseconds
pub const THINK_MIN_MS: u64 = 1000;
pub const THINK_MAX_MS: u64 = 2000;

/// Chance that Medium plays from its capture/check shortlist when one exists
pub const TACTICAL_BIAS: f64 = 0.7;

/// Chance that Hard plays its best-valued tactical move
pub const HARD_TACTICAL_BIAS: f64 = 0.85;

/// A scheduled bot move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BotTask {
    pub delay: Duration,
    pub elapsed: Duration,
    /// `Rules::ply` when the task was scheduled
    pub scheduled_ply: u32,
}

impl BotTask {
    pub fn new(delay: Duration, scheduled_ply: u32) -> Self {
        Self {
            delay,
            elapsed: Duration::ZERO,
            scheduled_ply,
        }
    }

    pub fn is_due(&self) -> bool {
        self.elapsed >= self.delay
    }

    /// Fraction of the delay that has passed, 0.0 to 1.0.
    pub fn progress(&self) -> f64 {
        if self.delay.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f64() / self.delay.as_secs_f64()).min(1.0)
    }
}

/// Draw a thinking delay uniformly from 1.0 to 2.0 seconds.
pub fn think_delay<R: Rng>(rng: &mut R) -> Duration {
    Duration::from_millis(rng.gen_range(THINK_MIN_MS..=THINK_MAX_MS))
}

/// Pick a move for the side to move. `None` only when there is no legal move.
pub fn choose_move<R: Rng>(
    rules: &Rules,
    difficulty: BotDifficulty,
    rng: &mut R,
) -> Option<LegalMove> {
    let moves = rules.legal_moves();
    if moves.is_empty() {
        return None;
    }

    match difficulty {
        BotDifficulty::Easy => moves.choose(rng).copied(),
        BotDifficulty::Medium => {
            let tactical = tactical_moves(rules, &moves);
            if !tactical.is_empty() && rng.gen::<f64>() < TACTICAL_BIAS {
                tactical.choose(rng).copied()
            } else {
                moves.choose(rng).copied()
            }
        }
        BotDifficulty::Hard => {
            if let Some(mate) = moves.iter().find(|m| rules.gives_mate(m)) {
                return Some(*mate);
            }
            let best = best_tactical_moves(rules, &moves);
            if !best.is_empty() && rng.gen::<f64>() < HARD_TACTICAL_BIAS {
                best.choose(rng).copied()
            } else {
                moves.choose(rng).copied()
            }
        }
    }
}

/// Captures and checks.
fn tactical_moves(rules: &Rules, moves: &[LegalMove]) -> Vec<LegalMove> {
    moves
        .iter()
        .filter(|m| m.is_capture() || rules.gives_check(m))
        .copied()
        .collect()
}

/// The tactical moves that win the most material. A check counts as a pawn.
fn best_tactical_moves(rules: &Rules, moves: &[LegalMove]) -> Vec<LegalMove> {
    let scored: Vec<(u32, LegalMove)> = tactical_moves(rules, moves)
        .into_iter()
        .map(|m| (tactical_value(rules, &m), m))
        .collect();
    let Some(top) = scored.iter().map(|(score, _)| *score).max() else {
        return Vec::new();
    };
    scored
        .into_iter()
        .filter(|(score, _)| *score == top)
        .map(|(_, m)| m)
        .collect()
}

fn tactical_value(rules: &Rules, m: &LegalMove) -> u32 {
    let capture = m.capture.map_or(0, piece_value);
    let promotion = m.promotion.map_or(0, |r| piece_value(r).saturating_sub(1));
    let check = if rules.gives_check(m) { 1 } else { 0 };
    capture + promotion + check
}

fn piece_value(role: Role) -> u32 {
    match role {
        Role::Pawn => 1,
        Role::Knight | Role::Bishop => 3,
        Role::Rook => 5,
        Role::Queen => 9,
        Role::King => 0,
    }
}

/// Whether a new bot turn should be scheduled now.
pub fn should_schedule(game: &ChessGame) -> bool {
    game.is_bot_turn()
        && game.game_over.is_none()
        && game.pending_promotion.is_none()
        && game.bot_task.is_none()
}

/// Schedule the bot's move if it is due one. Returns true if a task was created.
pub fn schedule<R: Rng>(game: &mut ChessGame, rng: &mut R) -> bool {
    if !should_schedule(game) {
        return false;
    }
    let delay = think_delay(rng);
    let ply = game.rules.ply();
    debug!(
        delay_ms = delay.as_millis() as u64,
        ply,
        difficulty = game.bot.difficulty.name(),
        "bot thinking"
    );
    game.bot_task = Some(BotTask::new(delay, ply));
    true
}

/// Drop any pending bot move.
pub fn cancel(game: &mut ChessGame) {
    if let Some(task) = game.bot_task.take() {
        debug!(ply = task.scheduled_ply, "bot move cancelled");
    }
}

/// Advance the bot by `dt`. Schedules a turn when one is due and plays it once
/// the delay has elapsed. Returns true if the bot applied a move.
pub fn advance<R: Rng>(
    game: &mut ChessGame,
    dt: Duration,
    rng: &mut R,
    feedback: &mut dyn Feedback,
) -> bool {
    if game.bot_task.is_none() {
        schedule(game, rng);
        return false;
    }

    let due = match game.bot_task.as_mut() {
        Some(task) => {
            task.elapsed += dt;
            task.is_due()
        }
        None => false,
    };
    if !due {
        return false;
    }

    let Some(task) = game.bot_task.take() else {
        return false;
    };

    let stale = task.scheduled_ply != game.rules.ply()
        || game.game_over.is_some()
        || !game.is_bot_turn();
    if stale {
        debug!(ply = task.scheduled_ply, "dropping stale bot move");
        return false;
    }

    let Some(chosen) = choose_move(&game.rules, game.bot.difficulty, rng) else {
        return false;
    };

    match finish_move(game, chosen, feedback) {
        Ok(()) => {
            debug!(from = %chosen.from, to = %chosen.to, "bot moved");
            true
        }
        Err(err) => {
            debug!(%err, "bot move rejected");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activities::chess::types::BotConfig;
    use crate::activities::HostContext;
    use crate::feedback::RecordedFeedback;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn bot_game(difficulty: BotDifficulty) -> ChessGame {
        ChessGame::new(HostContext::default(), BotConfig::enabled(difficulty))
    }

    #[test]
    fn test_think_delay_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..500 {
            let d = think_delay(&mut rng);
            assert!(d >= Duration::from_millis(THINK_MIN_MS));
            assert!(d <= Duration::from_millis(THINK_MAX_MS));
        }
    }

    #[test]
    fn test_every_difficulty_returns_legal_move() {
        let rules = Rules::new();
        let legal = rules.legal_moves();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for difficulty in BotDifficulty::ALL {
            let m = choose_move(&rules, difficulty, &mut rng).unwrap();
            assert!(legal.contains(&m), "{:?} made an illegal move", difficulty);
        }
    }

    #[test]
    fn test_no_move_when_mated() {
        let rules = Rules::from_fen(
            "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3",
        )
        .unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(choose_move(&rules, BotDifficulty::Easy, &mut rng).is_none());
    }

    #[test]
    fn test_medium_prefers_tactical_moves() {
        // Black to move: exd4 and Bb4+ are the only captures or checks among 31 moves
        let rules = Rules::from_fen(
            "rnbqkbnr/pppp1ppp/8/4p3/3P4/8/PPP1PPPP/RNBQKBNR b KQkq - 0 2",
        )
        .unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let trials = 2000;
        let tactical = (0..trials)
            .filter(|_| {
                choose_move(&rules, BotDifficulty::Medium, &mut rng)
                    .is_some_and(|m| m.is_capture() || rules.gives_check(&m))
            })
            .count();
        // 0.7 from the shortlist plus a sliver of uniform picks
        let share = tactical as f64 / trials as f64;
        assert!(share > 0.65 && share < 0.8, "tactical share {}", share);
    }

    #[test]
    fn test_hard_takes_free_queen() {
        // White queen on d5 hangs to both the e6 pawn and the f6 knight
        let rules = Rules::from_fen(
            "rnbqkb1r/pppp1ppp/4pn2/3Q4/8/8/PPPP1PPP/RNB1KBNR b KQkq - 0 3",
        )
        .unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let trials = 200;
        let queen_takes = (0..trials)
            .filter(|_| {
                choose_move(&rules, BotDifficulty::Hard, &mut rng)
                    .is_some_and(|m| m.capture == Some(Role::Queen))
            })
            .count();
        assert!(queen_takes as f64 / trials as f64 > 0.75);
    }

    #[test]
    fn test_hard_always_mates_in_one() {
        // Black to move can play Qh4#
        let rules =
            Rules::from_fen("rnbqkbnr/pppp1ppp/8/4p3/6P1/5P2/PPPPP2P/RNBQKBNR b KQkq - 0 2")
                .unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..20 {
            let m = choose_move(&rules, BotDifficulty::Hard, &mut rng).unwrap();
            assert!(rules.gives_mate(&m));
        }
    }

    #[test]
    fn test_schedule_only_on_bot_turn() {
        let mut game = bot_game(BotDifficulty::Easy);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        assert!(!schedule(&mut game, &mut rng));
        game.rules
            .apply("e2".parse().unwrap(), "e4".parse().unwrap(), None)
            .unwrap();
        assert!(schedule(&mut game, &mut rng));
        // Re-entrancy guard
        assert!(!schedule(&mut game, &mut rng));
    }

    #[test]
    fn test_advance_applies_after_delay() {
        let mut game = bot_game(BotDifficulty::Medium);
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut feedback = RecordedFeedback::new();
        game.rules
            .apply("e2".parse().unwrap(), "e4".parse().unwrap(), None)
            .unwrap();

        assert!(!advance(&mut game, Duration::ZERO, &mut rng, &mut feedback));
        assert!(game.is_bot_thinking());
        assert!(!advance(&mut game, Duration::from_millis(900), &mut rng, &mut feedback));
        assert_eq!(game.rules.ply(), 1);

        assert!(advance(&mut game, Duration::from_millis(1200), &mut rng, &mut feedback));
        assert_eq!(game.rules.ply(), 2);
        assert!(!game.is_bot_thinking());
        assert!(game.last_move.is_some());
        assert_eq!(game.move_history.len(), 1);
    }

    #[test]
    fn test_stale_task_is_dropped() {
        let mut game = bot_game(BotDifficulty::Easy);
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut feedback = RecordedFeedback::new();
        game.rules
            .apply("e2".parse().unwrap(), "e4".parse().unwrap(), None)
            .unwrap();
        schedule(&mut game, &mut rng);
        // Board changes under the pending task
        game.rules
            .apply("e7".parse().unwrap(), "e5".parse().unwrap(), None)
            .unwrap();
        game.rules
            .apply("g1".parse().unwrap(), "f3".parse().unwrap(), None)
            .unwrap();

        assert!(!advance(&mut game, Duration::from_secs(3), &mut rng, &mut feedback));
        assert_eq!(game.rules.ply(), 3);
        assert!(game.bot_task.is_none());
    }

    #[test]
    fn test_task_progress() {
        let mut task = BotTask::new(Duration::from_millis(1000), 0);
        assert_eq!(task.progress(), 0.0);
        task.elapsed = Duration::from_millis(500);
        assert!((task.progress() - 0.5).abs() < 1e-9);
        task.elapsed = Duration::from_millis(1500);
        assert!(task.is_due());
        assert_eq!(task.progress(), 1.0);
    }
}
