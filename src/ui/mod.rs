pub mod flappy_scene;
pub mod game_common;

use crate::game::FlappyGame;
use crate::scores::HighScores;
use ratatui::{layout::Rect, Frame};

pub use flappy_scene::{restart_button_rect, world_to_cells};
pub use game_common::{game_layout, GameLayout};

/// Draw the whole screen for the current frame.
pub fn draw_ui(frame: &mut Frame, game: &FlappyGame, scores: &HighScores, last_rank: Option<usize>) {
    let area = frame.size();
    flappy_scene::render_flappy(frame, area, game, scores, last_rank);
}

/// Screen position of the Restart button for a terminal of `size`.
pub fn restart_button_for(game: &FlappyGame, size: Rect) -> Rect {
    restart_button_rect(game, game_layout(size).content)
}
