use iced::{
    alignment,
    keyboard::{self, Key},
    time::{self, Instant},
    widget::{button, column, container, row, text, Column, Row, Space},
    Border, Color, Element, Length, Subscription,
};

use crate::{
    app::Message,
    models::snake::{input::KEY_LEGEND, snake_game::SnakeGame, snake_player::PlayerId},
    view::View,
    view_model::ViewModel,
    view_models::snake::snake_view_model::SnakeViewModel,
};

use super::snake_mediator::SnakeMessage;

const BACKGROUND: Color = Color {
    r: 0.067,
    g: 0.067,
    b: 0.067,
    a: 1.0,
};
const GRID_LINE: Color = Color {
    r: 0.2,
    g: 0.2,
    b: 0.2,
    a: 1.0,
};
const FOOD: Color = Color {
    r: 1.0,
    g: 0.0,
    b: 0.0,
    a: 1.0,
};
/// Body segments are drawn with the head color at this opacity.
const BODY_ALPHA: f32 = 170.0 / 255.0;

#[derive(Clone, Debug)]
pub enum SnakeGameMessage {
    KeyPressed(Key),
    KeyReleased(Key),
    Frame(Instant),
    Exit,
    Reset,
}

/// Color of a player's snake, HUD line and selection button.
#[must_use]
pub fn player_color(player: PlayerId) -> Color {
    match player.number() {
        1 => Color::from_rgb8(0xef, 0x44, 0x44),
        2 => Color::from_rgb8(0x3b, 0x82, 0xf6),
        3 => Color::from_rgb8(0x22, 0xc5, 0x5e),
        4 => Color::from_rgb8(0xea, 0xb3, 0x08),
        _ => Color::from_rgb8(0x6b, 0x72, 0x80),
    }
}

/// Color of every cell, row by row. Dead snakes are not drawn.
#[must_use]
pub fn paint(game: &SnakeGame) -> Vec<Vec<Color>> {
    let grid = game.grid();
    let mut cells =
        vec![vec![BACKGROUND; usize::from(grid.width())]; usize::from(grid.height())];
    let mut set = |x: i32, y: i32, color: Color| {
        if let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) {
            if let Some(cell) = cells.get_mut(y).and_then(|r| r.get_mut(x)) {
                *cell = color;
            }
        }
    };

    let food = game.food().cell;
    set(food.x, food.y, FOOD);
    for snake in game.get_all_players().iter().filter(|s| s.is_alive()) {
        let head_color = player_color(snake.player);
        let body_color = Color {
            a: BODY_ALPHA,
            ..head_color
        };
        for (i, cell) in snake.body().iter().enumerate() {
            set(cell.x, cell.y, if i == 0 { head_color } else { body_color });
        }
    }
    cells
}

#[derive(Debug)]
pub struct SnakeGameScreen {
    view_model: SnakeViewModel,
}

impl SnakeGameScreen {
    #[must_use]
    pub fn new(view_model: SnakeViewModel) -> Self {
        Self { view_model }
    }

    fn status_line(&self) -> Element<'_, Message> {
        let game = self.view_model.get_game();
        if let Some(count) = self.view_model.countdown() {
            return text(count.to_string()).size(48).into();
        }
        if let Some(outcome) = game.outcome_text() {
            return column![
                text(outcome).size(32),
                text("Press ESC to return to menu").size(16),
            ]
            .align_x(alignment::Alignment::Center)
            .into();
        }
        text("SNAKE GAME").size(32).into()
    }

    fn scoreboard(&self) -> Element<'_, Message> {
        let game = self.view_model.get_game();
        let mut scores = Row::new().spacing(20);
        let mut legend = Row::new().spacing(20);
        for snake in game.get_all_players() {
            let color = player_color(snake.player);
            let dead = if snake.is_dead() { " (DEAD)" } else { "" };
            scores = scores.push(
                text(format!(
                    "P{}: {}/{}{dead}",
                    snake.player.number(),
                    snake.score(),
                    game.win_score()
                ))
                .color(color),
            );
            if let Some(keys) = KEY_LEGEND.get(snake.slot) {
                let keys = format!("P{}: {keys}", snake.player.number());
                legend = legend.push(text(keys).color(color));
            }
        }
        column![scores, legend]
            .spacing(10)
            .align_x(alignment::Alignment::Center)
            .into()
    }
}

impl View for SnakeGameScreen {
    fn update(&mut self, message: Message) -> Option<Message> {
        self.view_model.update(message)
    }

    fn view(&self) -> Element<'_, Message> {
        let cell_size = self.view_model.get_config().cell_size;
        let make_cell = |color: Color| {
            container(Space::new(cell_size, cell_size)).style(move |_: &_| container::Style {
                border: Border {
                    color: GRID_LINE,
                    width: 0.5,
                    ..Default::default()
                },
                background: Some(color.into()),
                ..container::Style::default()
            })
        };

        let mut grid_view = Column::new();
        for grid_row in paint(self.view_model.get_game()) {
            let mut row = Row::new();
            for color in grid_row {
                row = row.push(make_cell(color));
            }
            grid_view = grid_view.push(row);
        }

        let exit_button = button(text("Exit (ESC)"))
            .on_press(Message::Snake(SnakeMessage::SnakeGameMessage(
                SnakeGameMessage::Exit,
            )))
            .width(160)
            .height(40);
        let mut buttons = row![exit_button].spacing(10);
        if self.view_model.game_over() {
            buttons = buttons.push(
                button(text("Restart"))
                    .on_press(Message::Snake(SnakeMessage::SnakeGameMessage(
                        SnakeGameMessage::Reset,
                    )))
                    .width(80)
                    .height(40),
            );
        }

        container(
            column![buttons, self.status_line(), grid_view, self.scoreboard()]
                .spacing(10)
                .align_x(alignment::Alignment::Center),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center)
        .into()
    }

    fn subscription(&self) -> Subscription<Message> {
        let keyboard = Subscription::batch(vec![
            keyboard::on_key_press(|key, _| {
                Some(Message::Snake(SnakeMessage::SnakeGameMessage(
                    SnakeGameMessage::KeyPressed(key),
                )))
            }),
            keyboard::on_key_release(|key, _| {
                Some(Message::Snake(SnakeMessage::SnakeGameMessage(
                    SnakeGameMessage::KeyReleased(key),
                )))
            }),
        ]);
        if self.view_model.game_over() {
            // nothing left to drive once the game is decided
            return keyboard;
        }
        let frames = time::every(self.view_model.get_time_between_frames())
            .map(SnakeGameMessage::Frame)
            .map(SnakeMessage::SnakeGameMessage)
            .map(Message::Snake);
        Subscription::batch(vec![keyboard, frames])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paints_food_heads_and_bodies() {
        let view_model = SnakeViewModel::new(vec![PlayerId::ALL[1]]).unwrap();
        let game = view_model.get_game();
        let cells = paint(game);
        assert_eq!(cells.len(), 40);
        assert!(cells.iter().all(|r| r.len() == 40));

        let food = game.food().cell;
        assert_eq!(
            cells[usize::try_from(food.y).unwrap()][usize::try_from(food.x).unwrap()],
            FOOD
        );
        let blue = player_color(PlayerId::ALL[1]);
        assert_eq!(cells[10][10], blue);
        assert_eq!(cells[10][9], Color { a: BODY_ALPHA, ..blue });
        assert_eq!(cells[10][8], Color { a: BODY_ALPHA, ..blue });
        let painted = cells.iter().flatten().filter(|c| **c != BACKGROUND).count();
        assert_eq!(painted, 4);
    }

    #[test]
    fn player_colors_are_distinct() {
        assert_eq!(
            player_color(PlayerId::ALL[0]),
            Color::from_rgb8(0xef, 0x44, 0x44)
        );
        assert_ne!(player_color(PlayerId::ALL[2]), player_color(PlayerId::ALL[3]));
    }
}
