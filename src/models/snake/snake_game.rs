use std::fmt;

use log::{debug, info, warn};
use rand::Rng;

use super::{
    config::SnakeConfig,
    food::{spawn_food, Food},
    grid::{Cell, Grid},
    input::{resolve_direction, HeldKeys},
    snake_player::{DeathCause, PlayerId, SnakePlayer, Slot},
};

/// Time between two simulation ticks.
pub const MILLIS_BETWEEN_TICKS: u64 = 150;
/// Seconds counted down before the first tick.
pub const COUNTDOWN_START: u8 = 3;
/// Score that ends the game with a winner.
pub const WINNING_SCORE: u32 = 30;
/// Body length every snake starts with.
pub const INITIAL_SNAKE_LENGTH: usize = 3;

// Board sizes are u16 so they convert losslessly into cell coordinates.

/// Default side of the square arena.
pub const DEFAULT_GRID_SIZE: u16 = 40;
/// Max board side.
pub const MAX_BOARD_SIZE: u16 = 100;
/// Min board side. Four starting bodies must fit without touching.
pub const MIN_BOARD_SIZE: u16 = 10;
/// Max number of players sharing one keyboard.
pub const MAX_NUM_OF_PLAYERS: usize = 4;

pub type Result<T> = std::result::Result<T, SnakeError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnakeError {
    InvalidPlayerCount,
    DuplicatePlayer(PlayerId),
    InvalidBoardSize,
    InvalidTickInterval,
    InvalidSnakeLength,
    InvalidWinScore,
    NoRoomForFood,
}

impl fmt::Display for SnakeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnakeError::InvalidPlayerCount => {
                write!(f, "between 1 and {MAX_NUM_OF_PLAYERS} players must be selected")
            }
            SnakeError::DuplicatePlayer(player) => write!(f, "{player} was selected twice"),
            SnakeError::InvalidBoardSize => write!(
                f,
                "board sides must be between {MIN_BOARD_SIZE} and {MAX_BOARD_SIZE}"
            ),
            SnakeError::InvalidTickInterval => write!(f, "tick interval must be positive"),
            SnakeError::InvalidSnakeLength => {
                write!(f, "starting snakes must fit between their corner and the wall")
            }
            SnakeError::InvalidWinScore => write!(f, "winning score must be positive"),
            SnakeError::NoRoomForFood => write!(f, "no free cell left for food"),
        }
    }
}

impl std::error::Error for SnakeError {}

/// Snapshot of a running snake game.
///
/// Every tick produces a new snapshot through [`SnakeGame::step`]; the
/// previous one is never touched, so the screen can keep drawing it.
#[derive(Clone, Debug, PartialEq)]
pub struct SnakeGame {
    grid: Grid,
    snakes: Vec<SnakePlayer>,
    food: Food,
    win_score: u32,
    over: bool,
    winner: Option<Slot>,
}

impl SnakeGame {
    /// Places one snake per player in its starting corner and puts down the
    /// first food item.
    ///
    /// `players` is in slot order: the first entry plays slot 0.
    ///
    /// # Errors
    ///
    /// Returns a [`SnakeError`] if the config is invalid, if there are no
    /// players or more than [`MAX_NUM_OF_PLAYERS`], or if a player appears
    /// twice.
    pub fn new<R: Rng + ?Sized>(
        players: &[PlayerId],
        config: &SnakeConfig,
        rng: &mut R,
    ) -> Result<Self> {
        config.validate()?;
        if !(1..=MAX_NUM_OF_PLAYERS).contains(&players.len()) {
            return Err(SnakeError::InvalidPlayerCount);
        }
        for (i, player) in players.iter().enumerate() {
            if players[..i].contains(player) {
                return Err(SnakeError::DuplicatePlayer(*player));
            }
        }

        let grid = config.grid();
        let snakes: Vec<SnakePlayer> = players
            .iter()
            .enumerate()
            .map(|(slot, player)| SnakePlayer::spawn(*player, slot, &grid, config.initial_length))
            .collect();
        let food = spawn_food(&grid, &snakes, rng).ok_or(SnakeError::NoRoomForFood)?;
        debug!("New snake game for {players:?} on {grid:?}, food at {food:?}");

        Ok(Self {
            grid,
            snakes,
            food,
            win_score: config.win_score,
            over: false,
            winner: None,
        })
    }

    /// Ends the game if it is already decided: nobody left alive (no winner)
    /// or someone at the winning score (lowest such slot wins).
    ///
    /// Returns whether the game is over.
    fn finish_if_decided(&mut self) -> bool {
        if self.snakes.iter().all(SnakePlayer::is_dead) {
            info!("Game over. No snakes left alive");
            self.over = true;
            return true;
        }
        if let Some(winner) = self.snakes.iter().find(|s| s.score() >= self.win_score) {
            info!("Game over. {} won", winner.player);
            self.winner = Some(winner.slot);
            self.over = true;
            return true;
        }
        false
    }

    /// What `new_head` would hit, checked against the bodies as they were
    /// before anybody moved this tick.
    ///
    /// Snakes that were alive at the start of the tick still block with
    /// their old bodies even if they die during it. Two heads entering the
    /// same empty cell do not collide.
    fn collision(
        slot: Slot,
        new_head: Cell,
        grid: &Grid,
        before: &[SnakePlayer],
    ) -> Option<DeathCause> {
        if !grid.contains(new_head) {
            return Some(DeathCause::Wall);
        }
        if before[slot].occupies(new_head) {
            return Some(DeathCause::OwnBody);
        }
        before
            .iter()
            .filter(|other| other.slot != slot && other.is_alive())
            .find(|other| other.occupies(new_head))
            .map(|other| DeathCause::OtherSnake(other.slot))
    }

    /// Runs one tick and returns the resulting snapshot.
    ///
    /// Steps, in order: the end-of-game check, direction resolution from the
    /// held keys, head projection, wall/self/other collision against the
    /// pre-move bodies, movement with food consumption, and a food respawn
    /// if it was eaten. Only the first snake in slot order that reaches the
    /// food gets it. A finished game is returned unchanged.
    #[must_use]
    pub fn step<R: Rng + ?Sized>(&self, held: &HeldKeys, rng: &mut R) -> SnakeGame {
        let mut next = self.clone();
        if next.over || next.finish_if_decided() {
            return next;
        }

        for snake in next.snakes.iter_mut().filter(|s| s.is_alive()) {
            let direction = resolve_direction(snake.slot, snake.direction(), held);
            snake.set_direction(direction);
        }

        let before = next.snakes.clone();
        let mut moves: Vec<Option<Cell>> = vec![None; before.len()];
        for snake in before.iter().filter(|s| s.is_alive()) {
            let new_head = snake.head().neighbor(snake.direction());
            match Self::collision(snake.slot, new_head, &next.grid, &before) {
                Some(cause) => next.snakes[snake.slot].kill(cause),
                None => moves[snake.slot] = Some(new_head),
            }
        }

        let mut food_eaten = false;
        for (slot, new_head) in moves.into_iter().enumerate() {
            let Some(new_head) = new_head else {
                continue;
            };
            let ate = !food_eaten && new_head == next.food.cell;
            let snake = &mut next.snakes[slot];
            snake.advance(new_head, ate);
            if ate {
                food_eaten = true;
                snake.add_point();
                debug!("Snake {slot} ate food, score {}", snake.score());
            }
        }

        if food_eaten {
            match spawn_food(&next.grid, &next.snakes, rng) {
                Some(food) => next.food = food,
                None => warn!("Board is full. Food stays at {:?}", next.food.cell),
            }
        }
        next
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn food(&self) -> Food {
        self.food
    }

    #[must_use]
    pub fn win_score(&self) -> u32 {
        self.win_score
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.over
    }

    #[must_use]
    pub fn get_winner(&self) -> Option<Slot> {
        self.winner
    }

    /// Player number of the winning slot, if there is one.
    #[must_use]
    pub fn get_winning_player(&self) -> Option<PlayerId> {
        self.winner
            .and_then(|slot| self.snakes.get(slot))
            .map(|s| s.player)
    }

    /// Overlay text for a finished game.
    #[must_use]
    pub fn outcome_text(&self) -> Option<String> {
        if !self.over {
            return None;
        }
        Some(match self.get_winning_player() {
            Some(player) => format!("{player} WINS!"),
            None => "GAME OVER".to_string(),
        })
    }

    #[must_use]
    pub fn get_player(&self, slot: Slot) -> Option<&SnakePlayer> {
        self.snakes.get(slot)
    }

    #[must_use]
    pub fn get_all_players(&self) -> &[SnakePlayer] {
        &self.snakes
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::models::snake::{grid::Direction, input::GameKey};

    fn players(n: usize) -> Vec<PlayerId> {
        PlayerId::ALL[..n].to_vec()
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(1234)
    }

    fn game_with(snakes: Vec<SnakePlayer>, food: Cell) -> SnakeGame {
        SnakeGame {
            grid: Grid::new(40, 40),
            snakes,
            food: Food::new(food),
            win_score: WINNING_SCORE,
            over: false,
            winner: None,
        }
    }

    fn snake(slot: Slot, head: Cell, direction: Direction, length: usize) -> SnakePlayer {
        SnakePlayer::new(PlayerId::ALL[slot], slot, head, direction, length)
    }

    fn holding(keys: &[GameKey]) -> HeldKeys {
        let mut held = HeldKeys::new();
        for key in keys {
            held.press(*key);
        }
        held
    }

    #[test]
    fn new_places_players_in_corners() {
        let _ = env_logger::builder().is_test(true).try_init();
        let game = SnakeGame::new(&players(4), &SnakeConfig::default(), &mut rng()).unwrap();
        let heads: Vec<Cell> = game.get_all_players().iter().map(SnakePlayer::head).collect();
        assert_eq!(
            heads,
            vec![
                Cell::new(10, 10),
                Cell::new(30, 10),
                Cell::new(10, 30),
                Cell::new(30, 30)
            ]
        );
        for s in game.get_all_players() {
            assert_eq!(s.len(), 3);
            assert!(!s.occupies(game.food().cell));
        }
        assert!(!game.is_over());
    }

    #[test]
    fn new_rejects_bad_player_lists() {
        let config = SnakeConfig::default();
        assert_eq!(
            SnakeGame::new(&[], &config, &mut rng()),
            Err(SnakeError::InvalidPlayerCount)
        );
        let mut five = PlayerId::ALL.to_vec();
        five.push(PlayerId::ALL[0]);
        assert_eq!(
            SnakeGame::new(&five, &config, &mut rng()),
            Err(SnakeError::InvalidPlayerCount)
        );
        let twice = [PlayerId::ALL[1], PlayerId::ALL[1]];
        assert_eq!(
            SnakeGame::new(&twice, &config, &mut rng()),
            Err(SnakeError::DuplicatePlayer(PlayerId::ALL[1]))
        );
    }

    #[test]
    fn slot_follows_selection_order() {
        let picked = [PlayerId::ALL[3], PlayerId::ALL[0]];
        let game = SnakeGame::new(&picked, &SnakeConfig::default(), &mut rng()).unwrap();
        let first = game.get_player(0).unwrap();
        assert_eq!(first.player, PlayerId::ALL[3]);
        assert_eq!(first.head(), Cell::new(10, 10));
    }

    #[test]
    fn plain_move_keeps_length() {
        let game = game_with(
            vec![snake(0, Cell::new(10, 10), Direction::Right, 3)],
            Cell::new(0, 0),
        );
        let next = game.step(&HeldKeys::new(), &mut rng());
        let s = next.get_player(0).unwrap();
        assert_eq!(s.head(), Cell::new(11, 10));
        assert_eq!(s.len(), 3);
        assert_eq!(s.score(), 0);
        // the input snapshot is untouched
        assert_eq!(game.get_player(0).unwrap().head(), Cell::new(10, 10));
    }

    #[test]
    fn turning_up_onto_food_scores_and_grows() {
        let _ = env_logger::builder().is_test(true).try_init();
        let game = game_with(
            vec![
                snake(0, Cell::new(10, 10), Direction::Right, 3),
                snake(1, Cell::new(30, 30), Direction::Right, 3),
            ],
            Cell::new(10, 9),
        );
        let next = game.step(&holding(&[GameKey::Char('w')]), &mut rng());
        let s = next.get_player(0).unwrap();
        assert_eq!(s.head(), Cell::new(10, 9));
        assert_eq!(s.direction(), Direction::Up);
        assert_eq!(s.score(), 1);
        assert_eq!(s.len(), 4);

        let food = next.food().cell;
        assert_ne!(food, Cell::new(10, 9));
        assert!(next.grid().contains(food));
        assert!(next.get_all_players().iter().all(|p| !p.occupies(food)));
    }

    #[test]
    fn reversal_keeps_direction() {
        let game = game_with(
            vec![snake(0, Cell::new(10, 10), Direction::Right, 3)],
            Cell::new(0, 0),
        );
        let next = game.step(&holding(&[GameKey::Char('a')]), &mut rng());
        let s = next.get_player(0).unwrap();
        assert_eq!(s.direction(), Direction::Right);
        assert_eq!(s.head(), Cell::new(11, 10));
        assert!(s.is_alive());
    }

    #[test]
    fn wall_kills_and_freezes() {
        let game = game_with(
            vec![
                snake(0, Cell::new(39, 5), Direction::Right, 3),
                snake(1, Cell::new(10, 30), Direction::Right, 3),
            ],
            Cell::new(0, 0),
        );
        let next = game.step(&HeldKeys::new(), &mut rng());
        let s = next.get_player(0).unwrap();
        assert!(s.is_dead());
        assert_eq!(s.death_cause(), Some(DeathCause::Wall));
        assert_eq!(s.body(), game.get_player(0).unwrap().body());
        assert!(s.body().iter().all(|c| next.grid().contains(*c)));

        let later = next.step(&holding(&[GameKey::Char('s')]), &mut rng());
        assert_eq!(later.get_player(0), next.get_player(0));
    }

    /// Walks a snake of `length` heading right from (6,5) up and left, so
    /// its head ends at (5,4) facing left with (5,5) right below it.
    fn coiled(length: usize) -> SnakePlayer {
        let mut coiled = snake(0, Cell::new(6, 5), Direction::Right, length);
        coiled.advance(Cell::new(6, 4), false);
        coiled.set_direction(Direction::Up);
        coiled.advance(Cell::new(5, 4), false);
        coiled.set_direction(Direction::Left);
        coiled
    }

    #[test]
    fn running_into_own_body_kills() {
        // body (5,4) (6,4) (6,5) (5,5) (4,5): (5,5) is mid-body
        let game = game_with(
            vec![coiled(5), snake(1, Cell::new(30, 30), Direction::Right, 3)],
            Cell::new(0, 0),
        );
        let next = game.step(&holding(&[GameKey::Char('s')]), &mut rng());
        let s = next.get_player(0).unwrap();
        assert_eq!(s.death_cause(), Some(DeathCause::OwnBody));
        assert_eq!(s.body(), game.get_player(0).unwrap().body());
    }

    #[test]
    fn moving_into_own_tail_kills() {
        // body (5,4) (6,4) (6,5) (5,5): (5,5) is the tail about to move away
        let game = game_with(
            vec![coiled(4), snake(1, Cell::new(30, 30), Direction::Right, 3)],
            Cell::new(0, 0),
        );
        assert_eq!(game.get_player(0).unwrap().body().back(), Some(&Cell::new(5, 5)));
        let next = game.step(&holding(&[GameKey::Char('s')]), &mut rng());
        assert_eq!(
            next.get_player(0).unwrap().death_cause(),
            Some(DeathCause::OwnBody)
        );
    }

    #[test]
    fn dead_snake_does_not_block() {
        // slot 1 died on an earlier tick with its body across slot 0's path
        let mut wreck = snake(1, Cell::new(12, 12), Direction::Up, 4);
        wreck.kill(DeathCause::Wall);
        let game = game_with(
            vec![snake(0, Cell::new(12, 11), Direction::Down, 3), wreck],
            Cell::new(0, 0),
        );
        let next = game.step(&HeldKeys::new(), &mut rng());
        let s = next.get_player(0).unwrap();
        assert!(s.is_alive());
        assert_eq!(s.head(), Cell::new(12, 12));
        assert_eq!(next.get_player(1), game.get_player(1));
    }

    #[test]
    fn running_into_other_body_kills() {
        let game = game_with(
            vec![
                snake(0, Cell::new(10, 10), Direction::Right, 3),
                snake(1, Cell::new(12, 12), Direction::Up, 4),
            ],
            Cell::new(0, 0),
        );
        // slot 1 climbs column 12 while slot 0 crosses row 10
        let next = game.step(&HeldKeys::new(), &mut rng());
        assert!(next.get_all_players().iter().all(SnakePlayer::is_alive));
        // both heads enter (12,10) together
        let next = next.step(&HeldKeys::new(), &mut rng());
        assert!(next.get_all_players().iter().all(SnakePlayer::is_alive));
        let next = next.step(&holding(&[GameKey::Char('s')]), &mut rng());
        // slot 0 heads down from (12,10) to (12,11), which is slot 1's old body
        assert_eq!(
            next.get_player(0).unwrap().death_cause(),
            Some(DeathCause::OtherSnake(1))
        );
    }

    #[test]
    fn dying_snake_still_blocks_this_tick() {
        // slot 1 hits the wall, but its old body still kills slot 0
        let game = game_with(
            vec![
                snake(0, Cell::new(36, 1), Direction::Right, 3),
                snake(1, Cell::new(39, 1), Direction::Right, 3),
            ],
            Cell::new(0, 0),
        );
        let next = game.step(&HeldKeys::new(), &mut rng());
        assert_eq!(next.get_player(1).unwrap().death_cause(), Some(DeathCause::Wall));
        assert_eq!(
            next.get_player(0).unwrap().death_cause(),
            Some(DeathCause::OtherSnake(1))
        );
    }

    #[test]
    fn head_to_head_on_empty_cell_both_survive() {
        let game = game_with(
            vec![
                snake(0, Cell::new(10, 10), Direction::Right, 3),
                snake(1, Cell::new(12, 10), Direction::Left, 3),
            ],
            Cell::new(0, 0),
        );
        let next = game.step(&HeldKeys::new(), &mut rng());
        assert_eq!(next.get_player(0).unwrap().head(), Cell::new(11, 10));
        assert_eq!(next.get_player(1).unwrap().head(), Cell::new(11, 10));
        assert!(next.get_all_players().iter().all(SnakePlayer::is_alive));
    }

    #[test]
    fn shared_food_goes_to_lowest_slot() {
        let game = game_with(
            vec![
                snake(0, Cell::new(10, 10), Direction::Right, 3),
                snake(1, Cell::new(12, 10), Direction::Left, 3),
            ],
            Cell::new(11, 10),
        );
        let next = game.step(&HeldKeys::new(), &mut rng());
        let first = next.get_player(0).unwrap();
        let second = next.get_player(1).unwrap();
        assert_eq!((first.score(), first.len()), (1, 4));
        assert_eq!((second.score(), second.len()), (0, 3));
        assert_ne!(next.food().cell, Cell::new(11, 10));
    }

    #[test]
    fn all_dead_ends_without_winner_on_next_tick() {
        let game = game_with(
            vec![snake(0, Cell::new(0, 0), Direction::Left, 1)],
            Cell::new(5, 5),
        );
        let next = game.step(&HeldKeys::new(), &mut rng());
        assert!(next.get_player(0).unwrap().is_dead());
        assert!(!next.is_over());

        let last = next.step(&HeldKeys::new(), &mut rng());
        assert!(last.is_over());
        assert_eq!(last.get_winner(), None);
        assert_eq!(last.outcome_text().as_deref(), Some("GAME OVER"));
    }

    #[test]
    fn winning_score_ends_before_moving() {
        let mut champion = snake(1, Cell::new(10, 10), Direction::Right, 3);
        for _ in 0..WINNING_SCORE {
            champion.add_point();
        }
        let game = game_with(
            vec![snake(0, Cell::new(5, 30), Direction::Right, 3), champion],
            Cell::new(0, 0),
        );

        let next = game.step(&HeldKeys::new(), &mut rng());
        assert!(next.is_over());
        assert_eq!(next.get_winner(), Some(1));
        assert_eq!(next.get_winning_player(), Some(PlayerId::ALL[1]));
        assert_eq!(next.get_player(1).unwrap().head(), Cell::new(10, 10));
        assert_eq!(next.get_player(0).unwrap().head(), Cell::new(5, 30));
        assert_eq!(next.outcome_text().as_deref(), Some("PLAYER 2 WINS!"));

        let after = next.step(&holding(&[GameKey::Char('w')]), &mut rng());
        assert_eq!(after, next);
    }

    #[test]
    fn reaching_the_score_wins_on_the_following_tick() {
        let mut runner = snake(0, Cell::new(10, 10), Direction::Right, 3);
        for _ in 0..WINNING_SCORE - 1 {
            runner.add_point();
        }
        let game = game_with(vec![runner], Cell::new(11, 10));
        let next = game.step(&HeldKeys::new(), &mut rng());
        assert_eq!(next.get_player(0).unwrap().score(), WINNING_SCORE);
        assert!(!next.is_over());

        let last = next.step(&HeldKeys::new(), &mut rng());
        assert!(last.is_over());
        assert_eq!(last.get_winner(), Some(0));
        assert_eq!(last.get_player(0).unwrap().head(), Cell::new(11, 10));
    }

    #[test]
    fn long_random_play_keeps_invariants() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut rng = rng();
        let mut game = SnakeGame::new(&players(4), &SnakeConfig::default(), &mut rng).unwrap();
        let keys = [
            GameKey::Char('w'),
            GameKey::Char('d'),
            GameKey::Char('j'),
            GameKey::Char('k'),
            GameKey::ArrowUp,
            GameKey::ArrowLeft,
            GameKey::Char('6'),
            GameKey::Char('2'),
        ];
        for tick in 0..2_000usize {
            let mut held = HeldKeys::new();
            for (i, key) in keys.iter().enumerate() {
                if (tick / 7 + i) % 3 == 0 {
                    held.press(*key);
                }
            }
            let next = game.step(&held, &mut rng);
            for (old, new) in game.get_all_players().iter().zip(next.get_all_players()) {
                assert!(new.score() >= old.score());
                if new.is_alive() {
                    assert!(new.len() == old.len() || new.len() == old.len() + 1);
                    assert!(new.body().iter().all(|c| next.grid().contains(*c)));
                    if new.score() > old.score() {
                        assert_eq!(new.head(), game.food().cell);
                    }
                } else if old.is_dead() {
                    assert_eq!(old, new);
                }
            }
            game = next;
            if game.is_over() {
                break;
            }
        }
    }
}
