//! Chess move controller: square selection, promotion, reset and input handling.

use super::bot;
use super::rules::{LegalMove, RulesError};
use super::types::{BotDifficulty, ChessGame, GameOver, PendingPromotion};
use super::Square;
use crate::activities::{ActivityInput, ActivityOutcome};
use crate::feedback::{Feedback, FeedbackEvent};
use rand::Rng;
use shakmaty::Role;
use std::time::Duration;
use tracing::{debug, info};

/// What a square activation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Input is locked (game over, promotion pending, bot to move)
    Ignored,
    Selected,
    Deselected,
    AwaitingPromotion,
    Moved(LegalMove),
}

/// Activate a square: select a piece, move the selected piece, or deselect.
pub fn select_square(
    game: &mut ChessGame,
    square: Square,
    feedback: &mut dyn Feedback,
) -> SelectOutcome {
    if !game.accepts_input() {
        return SelectOutcome::Ignored;
    }

    if game.selection.is_some() {
        if let Some(m) = game.legal_moves.iter().find(|m| m.to == square).copied() {
            if m.is_promotion() {
                game.pending_promotion = Some(PendingPromotion::new(m.from, m.to));
                return SelectOutcome::AwaitingPromotion;
            }
            return match finish_move(game, m, feedback) {
                Ok(()) => SelectOutcome::Moved(m),
                Err(err) => {
                    debug!(%err, "move rejected");
                    game.clear_selection();
                    SelectOutcome::Deselected
                }
            };
        }
    }

    let own_piece = game
        .rules
        .piece_at(square)
        .is_some_and(|p| p.color == game.side_to_move());
    if own_piece {
        game.selection = Some(square);
        game.legal_moves = game.rules.legal_moves_from(square);
        feedback.emit(FeedbackEvent::Select);
        SelectOutcome::Selected
    } else {
        game.clear_selection();
        SelectOutcome::Deselected
    }
}

/// Complete the pending promotion with `role`. A rejected choice closes the
/// picker without moving.
pub fn choose_promotion(
    game: &mut ChessGame,
    role: Role,
    feedback: &mut dyn Feedback,
) -> Option<LegalMove> {
    let pending = game.pending_promotion?;
    let applied = game
        .rules
        .find_move(pending.from, pending.to, Some(role))
        .and_then(|m| finish_move(game, m, feedback).map(|()| m));
    match applied {
        Ok(m) => Some(m),
        Err(err) => {
            debug!(%err, "promotion rejected");
            cancel_promotion(game);
            None
        }
    }
}

/// Back out of the promotion picker without moving.
pub fn cancel_promotion(game: &mut ChessGame) {
    game.pending_promotion = None;
    game.clear_selection();
}

/// Apply a legal move and do the bookkeeping shared by human and bot moves.
pub(crate) fn finish_move(
    game: &mut ChessGame,
    m: LegalMove,
    feedback: &mut dyn Feedback,
) -> Result<(), RulesError> {
    let notation = game.rules.notation(&m);
    game.rules.play(m)?;
    debug!(%notation, ply = game.rules.ply(), "move applied");

    game.record_move(m.from, m.to, notation);
    game.clear_selection();
    game.pending_promotion = None;

    feedback.emit(if m.is_capture() {
        FeedbackEvent::Capture
    } else {
        FeedbackEvent::Move
    });
    refresh_game_over(game, feedback);
    Ok(())
}

/// Re-derive the game-over state from the position.
fn refresh_game_over(game: &mut ChessGame, feedback: &mut dyn Feedback) {
    if game.rules.is_checkmate() {
        let loser = game.side_to_move();
        let over = GameOver::Checkmate {
            winner: !loser,
            mated_king: game.rules.king_square(loser),
        };
        info!(message = %over.message(), plies = game.rules.ply(), "game over");
        game.game_over = Some(over);
        bot::cancel(game);
        feedback.emit(FeedbackEvent::Checkmate);
    } else if let Some(reason) = game.rules.draw_reason() {
        let over = GameOver::Draw(reason);
        info!(message = %over.message(), plies = game.rules.ply(), "game over");
        game.game_over = Some(over);
        bot::cancel(game);
    } else if game.rules.is_check() {
        feedback.emit(FeedbackEvent::Check);
    }
}

/// Restore the initial position and clear every transient field.
pub fn reset_game(game: &mut ChessGame) {
    bot::cancel(game);
    game.rules.reset();
    game.clear_selection();
    game.last_move = None;
    game.game_over = None;
    game.pending_promotion = None;
    game.move_history.clear();
    debug!("chess game reset");
}

/// Turn the bot on or off. Turning it off drops a pending bot move.
pub fn toggle_bot(game: &mut ChessGame) -> bool {
    if !game.host.can_start_games {
        return false;
    }
    game.bot.enabled = !game.bot.enabled;
    if !game.bot.enabled {
        bot::cancel(game);
    } else if game.is_bot_turn() {
        game.clear_selection();
    }
    debug!(enabled = game.bot.enabled, "bot toggled");
    true
}

pub fn set_bot_difficulty(game: &mut ChessGame, difficulty: BotDifficulty) {
    game.bot.difficulty = difficulty;
}

pub fn cycle_bot_difficulty(game: &mut ChessGame) {
    set_bot_difficulty(game, game.bot.difficulty.next());
}

/// Process a key press. Returns `Close` when the player leaves the board.
pub fn process_input(
    game: &mut ChessGame,
    input: ActivityInput,
    feedback: &mut dyn Feedback,
) -> ActivityOutcome {
    if let Some(pending) = game.pending_promotion.as_mut() {
        match input {
            ActivityInput::Left | ActivityInput::Up => pending.cycle(-1),
            ActivityInput::Right | ActivityInput::Down => pending.cycle(1),
            ActivityInput::Primary => {
                let role = pending.selected_role();
                choose_promotion(game, role, feedback);
            }
            ActivityInput::Cancel => cancel_promotion(game),
            _ => {}
        }
        return ActivityOutcome::Continue;
    }

    match input {
        ActivityInput::Up => game.move_cursor(0, 1),
        ActivityInput::Down => game.move_cursor(0, -1),
        ActivityInput::Left => game.move_cursor(-1, 0),
        ActivityInput::Right => game.move_cursor(1, 0),
        ActivityInput::Primary => {
            let square = game.cursor_square();
            select_square(game, square, feedback);
        }
        ActivityInput::Reset => reset_game(game),
        ActivityInput::ToggleBot => {
            toggle_bot(game);
        }
        ActivityInput::CycleDifficulty => cycle_bot_difficulty(game),
        ActivityInput::Cancel => {
            if game.selection.is_none() {
                return ActivityOutcome::Close;
            }
            game.clear_selection();
        }
        ActivityInput::Other => {}
    }
    ActivityOutcome::Continue
}

/// Advance timers. Returns true if the bot moved.
pub fn tick<R: Rng>(
    game: &mut ChessGame,
    dt: Duration,
    rng: &mut R,
    feedback: &mut dyn Feedback,
) -> bool {
    bot::advance(game, dt, rng, feedback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activities::chess::rules::DrawReason;
    use crate::activities::chess::types::BotConfig;
    use crate::activities::chess::view::{derive_view, Highlight};
    use crate::activities::chess::Side;
    use crate::activities::HostContext;
    use crate::feedback::RecordedFeedback;

    fn sq(name: &str) -> Square {
        name.parse().unwrap()
    }

    fn game() -> ChessGame {
        ChessGame::new(HostContext::default(), BotConfig::default())
    }

    fn play(game: &mut ChessGame, from: &str, to: &str, fb: &mut RecordedFeedback) {
        assert_eq!(select_square(game, sq(from), fb), SelectOutcome::Selected);
        assert!(matches!(
            select_square(game, sq(to), fb),
            SelectOutcome::Moved(_)
        ));
    }

    #[test]
    fn test_select_own_piece() {
        let mut game = game();
        let mut fb = RecordedFeedback::new();
        assert_eq!(
            select_square(&mut game, sq("g1"), &mut fb),
            SelectOutcome::Selected
        );
        assert_eq!(game.selection, Some(sq("g1")));
        assert_eq!(game.legal_moves.len(), 2);
        assert_eq!(fb.last(), Some(FeedbackEvent::Select));
    }

    #[test]
    fn test_select_opponent_piece_deselects() {
        let mut game = game();
        let mut fb = RecordedFeedback::new();
        select_square(&mut game, sq("e2"), &mut fb);
        assert_eq!(
            select_square(&mut game, sq("e7"), &mut fb),
            SelectOutcome::Deselected
        );
        assert!(game.selection.is_none());
        assert!(game.legal_moves.is_empty());
    }

    #[test]
    fn test_illegal_destination_deselects() {
        let mut game = game();
        let mut fb = RecordedFeedback::new();
        select_square(&mut game, sq("e2"), &mut fb);
        assert_eq!(
            select_square(&mut game, sq("e5"), &mut fb),
            SelectOutcome::Deselected
        );
        assert_eq!(game.rules.ply(), 0);
    }

    #[test]
    fn test_reselect_other_own_piece() {
        let mut game = game();
        let mut fb = RecordedFeedback::new();
        select_square(&mut game, sq("e2"), &mut fb);
        assert_eq!(
            select_square(&mut game, sq("d2"), &mut fb),
            SelectOutcome::Selected
        );
        assert_eq!(game.selection, Some(sq("d2")));
    }

    #[test]
    fn test_move_records_history_and_feedback() {
        let mut game = game();
        let mut fb = RecordedFeedback::new();
        play(&mut game, "g1", "f3", &mut fb);
        assert_eq!(game.move_history, vec!["Nf3"]);
        assert_eq!(fb.last(), Some(FeedbackEvent::Move));
        assert_eq!(game.side_to_move(), Side::Black);
        assert!(game.selection.is_none());
    }

    #[test]
    fn test_check_emits_check_cue() {
        let mut game = game();
        let mut fb = RecordedFeedback::new();
        play(&mut game, "e2", "e4", &mut fb);
        play(&mut game, "f7", "f6", &mut fb);
        play(&mut game, "d1", "h5", &mut fb);
        assert_eq!(fb.last(), Some(FeedbackEvent::Check));
        assert!(game.game_over.is_none());
    }

    #[test]
    fn test_promotion_waits_for_choice() {
        let mut game = ChessGame::from_fen(
            HostContext::default(),
            BotConfig::default(),
            "8/P7/8/8/8/8/p7/k6K w - - 0 1",
        )
        .unwrap();
        let mut fb = RecordedFeedback::new();
        select_square(&mut game, sq("a7"), &mut fb);
        assert_eq!(
            select_square(&mut game, sq("a8"), &mut fb),
            SelectOutcome::AwaitingPromotion
        );
        assert_eq!(game.rules.ply(), 0);
        assert!(!game.accepts_input());
        assert_eq!(
            select_square(&mut game, sq("h1"), &mut fb),
            SelectOutcome::Ignored
        );

        let m = choose_promotion(&mut game, Role::Knight, &mut fb).unwrap();
        assert_eq!(m.promotion, Some(Role::Knight));
        assert_eq!(game.rules.piece_at(sq("a8")).map(|p| p.role), Some(Role::Knight));
        assert!(game.pending_promotion.is_none());
        assert_eq!(game.move_history, vec!["a8=N"]);
    }

    #[test]
    fn test_cancel_promotion_keeps_position() {
        let mut game = ChessGame::from_fen(
            HostContext::default(),
            BotConfig::default(),
            "8/P7/8/8/8/8/p7/k6K w - - 0 1",
        )
        .unwrap();
        let mut fb = RecordedFeedback::new();
        select_square(&mut game, sq("a7"), &mut fb);
        select_square(&mut game, sq("a8"), &mut fb);
        cancel_promotion(&mut game);
        assert!(game.pending_promotion.is_none());
        assert!(game.selection.is_none());
        assert_eq!(game.rules.ply(), 0);
        assert!(game.accepts_input());
    }

    #[test]
    fn test_choose_promotion_without_pending_fails() {
        let mut game = game();
        let mut fb = RecordedFeedback::new();
        assert!(choose_promotion(&mut game, Role::Queen, &mut fb).is_none());
        assert_eq!(game.rules.ply(), 0);
    }

    #[test]
    fn test_stalemate_sets_draw() {
        let mut game = ChessGame::from_fen(
            HostContext::default(),
            BotConfig::default(),
            "7k/8/6K1/8/8/8/8/5Q2 w - - 0 1",
        )
        .unwrap();
        let mut fb = RecordedFeedback::new();
        play(&mut game, "f1", "f7", &mut fb);
        assert_eq!(
            game.game_over,
            Some(GameOver::Draw(DrawReason::Stalemate))
        );
        assert_eq!(fb.count(FeedbackEvent::Checkmate), 0);
    }

    #[test]
    fn test_guest_resets_but_cannot_toggle_bot() {
        let host = HostContext {
            can_start_games: false,
            ..HostContext::default()
        };
        let mut game = ChessGame::new(host, BotConfig::default());
        let mut fb = RecordedFeedback::new();
        play(&mut game, "e2", "e4", &mut fb);
        assert!(!toggle_bot(&mut game));
        assert!(!game.bot.enabled);
        reset_game(&mut game);
        assert_eq!(game.rules.ply(), 0);
    }

    #[test]
    fn test_enabling_bot_on_its_turn_clears_selection() {
        let mut game = game();
        let mut fb = RecordedFeedback::new();
        play(&mut game, "e2", "e4", &mut fb);
        select_square(&mut game, sq("g8"), &mut fb);
        assert_eq!(game.selection, Some(sq("g8")));
        assert!(!game.legal_moves.is_empty());

        assert!(toggle_bot(&mut game));
        assert!(game.selection.is_none());
        assert!(game.legal_moves.is_empty());
        let view = derive_view(&game);
        let stale = view.ranks.iter().flatten().any(|s| {
            matches!(
                s.highlight,
                Highlight::Selected | Highlight::LegalDestination { .. }
            )
        });
        assert!(!stale);
    }

    #[test]
    fn test_enabling_bot_off_turn_keeps_selection() {
        let mut game = game();
        let mut fb = RecordedFeedback::new();
        select_square(&mut game, sq("e2"), &mut fb);
        assert!(toggle_bot(&mut game));
        assert_eq!(game.selection, Some(sq("e2")));
    }

    #[test]
    fn test_toggle_bot_cancels_task() {
        let mut game = ChessGame::new(
            HostContext::default(),
            BotConfig::enabled(BotDifficulty::Easy),
        );
        let mut fb = RecordedFeedback::new();
        play(&mut game, "e2", "e4", &mut fb);
        game.bot_task = Some(bot::BotTask::new(Duration::from_secs(1), 1));
        assert!(toggle_bot(&mut game));
        assert!(!game.bot.enabled);
        assert!(game.bot_task.is_none());
        assert!(game.accepts_input());
    }

    #[test]
    fn test_cycle_difficulty() {
        let mut game = game();
        cycle_bot_difficulty(&mut game);
        assert_eq!(game.bot.difficulty, BotDifficulty::Hard);
        set_bot_difficulty(&mut game, BotDifficulty::Easy);
        assert_eq!(game.bot.difficulty, BotDifficulty::Easy);
    }

    #[test]
    fn test_process_input_cursor_and_select() {
        let mut game = game();
        let mut fb = RecordedFeedback::new();
        // cursor starts on e2
        process_input(&mut game, ActivityInput::Primary, &mut fb);
        assert_eq!(game.selection, Some(sq("e2")));
        process_input(&mut game, ActivityInput::Up, &mut fb);
        process_input(&mut game, ActivityInput::Up, &mut fb);
        process_input(&mut game, ActivityInput::Primary, &mut fb);
        assert_eq!(game.rules.piece_at(sq("e4")).map(|p| p.role), Some(Role::Pawn));
        assert_eq!(game.side_to_move(), Side::Black);
    }

    #[test]
    fn test_process_input_cancel_deselects_then_closes() {
        let mut game = game();
        let mut fb = RecordedFeedback::new();
        process_input(&mut game, ActivityInput::Primary, &mut fb);
        assert_eq!(
            process_input(&mut game, ActivityInput::Cancel, &mut fb),
            ActivityOutcome::Continue
        );
        assert!(game.selection.is_none());
        assert_eq!(
            process_input(&mut game, ActivityInput::Cancel, &mut fb),
            ActivityOutcome::Close
        );
    }

    #[test]
    fn test_process_input_promotion_picker() {
        let mut game = ChessGame::from_fen(
            HostContext::default(),
            BotConfig::default(),
            "8/P7/8/8/8/8/p7/k6K w - - 0 1",
        )
        .unwrap();
        let mut fb = RecordedFeedback::new();
        game.cursor = (0, 6);
        process_input(&mut game, ActivityInput::Primary, &mut fb);
        process_input(&mut game, ActivityInput::Up, &mut fb);
        process_input(&mut game, ActivityInput::Primary, &mut fb);
        assert!(game.pending_promotion.is_some());
        // picker: Queen -> Rook
        process_input(&mut game, ActivityInput::Right, &mut fb);
        process_input(&mut game, ActivityInput::Primary, &mut fb);
        assert_eq!(game.rules.piece_at(sq("a8")).map(|p| p.role), Some(Role::Rook));
    }
}
