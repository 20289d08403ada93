pub mod board_styles;
pub mod chess_scene;
pub mod game_common;
pub mod lobby_scene;
pub mod radio_scene;
pub mod rps_scene;

use duoroom::activities::Activity;
use duoroom::app::App;
use ratatui::Frame;

/// Draw the lobby or the mounted activity.
pub fn draw_ui(frame: &mut Frame, app: &App) {
    let area = frame.size();
    match app.room.activity() {
        None => lobby_scene::render_lobby(frame, area, app),
        Some(Activity::Chess(game)) => chess_scene::render_chess_scene(frame, area, game),
        Some(Activity::RockPaperScissors(game)) => {
            rps_scene::render_rps_scene(frame, area, game, app.room.theme)
        }
        Some(Activity::Radio(player)) => radio_scene::render_radio_scene(frame, area, player),
    }
}
