//! UI rendering for the Flappy Heads game screen.

use super::game_common::{
    create_game_layout, render_button, render_game_over_banner, render_info_panel_frame,
    render_status_bar,
};
use crate::core::constants::*;
use crate::game::{Aabb, CrashCause, FlappyGame, Vec2};
use crate::scores::HighScores;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const RESTART_MIN_WIDTH: u16 = 13;
const RESTART_MIN_HEIGHT: u16 = 3;

/// Map a world-space box onto terminal cells inside `area`.
///
/// The world's `y` axis points up, the terminal's points down. Returns None
/// when the box lies entirely outside the visible world.
pub fn world_to_cells(bounds: &Aabb, world: Vec2, area: Rect) -> Option<Rect> {
    if area.width == 0 || area.height == 0 || world.x <= 0.0 || world.y <= 0.0 {
        return None;
    }
    let cols = area.width as f64;
    let rows = area.height as f64;
    let to_col = |x: f64| x * cols / world.x;
    let to_row = |y: f64| (world.y - y) * rows / world.y;

    let left = to_col(bounds.x).floor().max(0.0);
    let right = to_col(bounds.right()).ceil().min(cols);
    let top = to_row(bounds.top()).floor().max(0.0);
    let bottom = to_row(bounds.y).ceil().min(rows);

    if right <= left || bottom <= top {
        return None;
    }

    Some(Rect::new(
        area.x + left as u16,
        area.y + top as u16,
        (right - left) as u16,
        (bottom - top) as u16,
    ))
}

/// Where the Restart button sits: centred horizontally with its bottom edge
/// at half height, 30% x 10% of the world width in size.
pub fn restart_button_rect(game: &FlappyGame, content: Rect) -> Rect {
    let width = game.world_width * RESTART_BUTTON_WIDTH_FRACTION;
    let height = game.world_width * RESTART_BUTTON_HEIGHT_FRACTION;
    let bounds = Aabb::new(
        Vec2::new(
            game.world_width / 2.0 - width / 2.0,
            game.world_height / 2.0,
        ),
        width,
        height,
    );
    let world = Vec2::new(game.world_width, game.world_height);
    let mapped = world_to_cells(&bounds, world, content).unwrap_or(Rect::new(
        content.x + content.width / 2,
        content.y + content.height / 2,
        0,
        0,
    ));

    // Grow around the centre so the label always fits
    let w = mapped.width.max(RESTART_MIN_WIDTH).min(content.width);
    let h = mapped.height.max(RESTART_MIN_HEIGHT).min(content.height);
    let cx = mapped.x + mapped.width / 2;
    let cy = mapped.y + mapped.height / 2;
    let x = cx
        .saturating_sub(w / 2)
        .clamp(content.x, content.x + content.width - w);
    let y = cy
        .saturating_sub(h / 2)
        .clamp(content.y, content.y + content.height - h);
    Rect::new(x, y, w, h)
}

/// Render the full game screen.
pub fn render_flappy(
    frame: &mut Frame,
    area: Rect,
    game: &FlappyGame,
    scores: &HighScores,
    last_rank: Option<usize>,
) {
    let layout = create_game_layout(frame, area, &format!(" {} ", GAME_TITLE), Color::Cyan);

    render_play_area(frame, layout.content, game);
    render_status_bar_content(frame, layout.status_bar, game);
    render_info_panel(frame, layout.info_panel, game, scores);

    if game.is_over() {
        render_crash_overlay(frame, layout.content, game, scores, last_rank);
    }
}

/// Render the play area: title, obstacles and the player.
fn render_play_area(frame: &mut Frame, area: Rect, game: &FlappyGame) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let world = Vec2::new(game.world_width, game.world_height);

    // Title label at 80% of the world height
    let title_row = ((1.0 - TITLE_HEIGHT_FRACTION) * area.height as f64) as u16;
    if title_row < area.height {
        let title = Paragraph::new(Span::styled(
            GAME_TITLE,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center);
        frame.render_widget(
            title,
            Rect {
                y: area.y + title_row,
                height: 1,
                ..area
            },
        );
    }

    for obstacle in &game.obstacles {
        if let Some(cells) = world_to_cells(&obstacle.bounds(), world, area) {
            let (glyph, color) = obstacle_sprite(obstacle.variant);
            fill_cells(frame, cells, glyph, Style::default().fg(color));
        }
    }

    if let Some(cells) = world_to_cells(&game.player.bounds(), world, area) {
        let glyph = if game.player.velocity.y > 0.5 {
            "▲"
        } else if game.player.velocity.y < -2.0 {
            "▼"
        } else {
            "●"
        };
        let color = if game.is_over() {
            Color::Red
        } else {
            Color::Yellow
        };
        fill_cells(
            frame,
            cells,
            glyph,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        );
    }
}

/// Glyph and colour for each obstacle sprite variant.
fn obstacle_sprite(variant: u8) -> (&'static str, Color) {
    match variant {
        1 => ("█", Color::Magenta),
        2 => ("▓", Color::Green),
        3 => ("▒", Color::Blue),
        _ => ("░", Color::LightRed),
    }
}

fn fill_cells(frame: &mut Frame, cells: Rect, glyph: &str, style: Style) {
    let lines: Vec<Line> = (0..cells.height)
        .map(|_| Line::from(Span::styled(glyph.repeat(cells.width as usize), style)))
        .collect();
    frame.render_widget(Paragraph::new(lines), cells);
}

/// Render the status bar at the bottom.
fn render_status_bar_content(frame: &mut Frame, area: Rect, game: &FlappyGame) {
    const RUN_CONTROLS: &[(&str, &str)] = &[
        ("[Space/Click]", "Flap"),
        ("[P]", "Pause"),
        ("[Q]", "Quit"),
    ];

    if game.is_over() {
        render_status_bar(
            frame,
            area,
            &format!("Crashed with {} dodged", game.score),
            Color::Red,
            &[("[R/Enter/Click]", "Restart"), ("[Q]", "Quit")],
        );
    } else if game.waiting_to_start {
        render_status_bar(
            frame,
            area,
            "Press Space or click to fly!",
            Color::Yellow,
            RUN_CONTROLS,
        );
    } else if game.paused {
        render_status_bar(frame, area, "Paused", Color::Yellow, RUN_CONTROLS);
    } else {
        render_status_bar(
            frame,
            area,
            &format!("Dodged: {}", game.score),
            Color::Green,
            RUN_CONTROLS,
        );
    }
}

/// Render the info panel on the right.
fn render_info_panel(frame: &mut Frame, area: Rect, game: &FlappyGame, scores: &HighScores) {
    let inner = render_info_panel_frame(frame, area);
    if inner.height < 2 || inner.width < 4 {
        return;
    }

    let label = Style::default().fg(Color::DarkGray);
    let spawn_chance =
        SPAWN_ROLL_MAX.saturating_sub(game.spawn_threshold) as f64 / SPAWN_ROLL_MAX as f64 * 100.0;
    let seconds = game.tick_count as f64 * game.tick_ms as f64 / 1000.0;

    let lines = vec![
        Line::from(vec![
            Span::styled(" Dodged: ", label),
            Span::styled(
                game.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled(" Best: ", label),
            Span::styled(
                scores
                    .top_score()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "-".to_string()),
                Style::default().fg(Color::Yellow),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled(" Time: ", label),
            Span::styled(format!("{:.1}s", seconds), Style::default().fg(Color::Cyan)),
        ]),
        Line::from(vec![
            Span::styled(" Heads: ", label),
            Span::styled(
                game.obstacles.len().to_string(),
                Style::default().fg(Color::Magenta),
            ),
        ]),
        Line::from(vec![
            Span::styled(" Spawn: ", label),
            Span::styled(
                format!("{:.1}%/tick", spawn_chance),
                Style::default().fg(Color::Green),
            ),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Render the crash banner and the Restart button over the play area.
fn render_crash_overlay(
    frame: &mut Frame,
    area: Rect,
    game: &FlappyGame,
    scores: &HighScores,
    last_rank: Option<usize>,
) {
    let message = match game.game_result {
        Some(CrashCause::Obstacle) => format!("Hit a head after dodging {}.", game.score),
        Some(CrashCause::Ground) => format!("Fell out of the sky after dodging {}.", game.score),
        None => return,
    };
    let detail = match (last_rank, scores.top_score()) {
        (Some(1), _) => "New best score!".to_string(),
        (Some(rank), _) => format!("High score #{}", rank),
        (None, Some(best)) => format!("Best: {}", best),
        (None, None) => String::new(),
    };

    let button = restart_button_rect(game, area);
    render_game_over_banner(frame, area, button.y, "GAME OVER", &message, &detail);
    render_button(frame, button, "Restart", Color::Yellow);
}
