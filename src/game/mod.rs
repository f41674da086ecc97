mod clock;
mod direction;
mod food;
mod held;
mod popup;
mod snake;
use self::clock::PlayClock;
use self::direction::Direction;
use self::food::Food;
use self::held::HeldKeys;
use self::popup::Popup;
use self::snake::Snake;
use crate::app::Screen;
use crate::command::Command;
use crate::consts;
use crate::util::{center_rect, format_clock, get_display_area, spread, Bounds, Globals};
use crossterm::event::{poll, read, Event, KeyEventKind};
use rand::{rngs::ThreadRng, Rng};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Margin, Position, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Widget},
    Frame,
};
use std::time::{Duration, Instant};
use tracing::{debug, info};

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Game<R = ThreadRng> {
    rng: R,
    globals: Globals,
    bounds: Bounds,
    score: u32,
    snake: Snake,
    food: Option<Food>,
    state: GameState,
    clock: PlayClock,
    held: HeldKeys,

    /// Number of consecutive ticks for which the key for the snake's heading
    /// has been held down
    hold_ticks: u32,

    next_tick: Option<Instant>,
}

impl Game<ThreadRng> {
    pub(crate) fn new(globals: Globals) -> Self {
        Game::new_with_rng(globals, rand::rng())
    }
}

impl<R: Rng> Game<R> {
    pub(crate) fn new_with_rng(globals: Globals, mut rng: R) -> Game<R> {
        let config = globals.config;
        let bounds = config.bounds();
        let snake = Snake::new(bounds.center(), config.starting_length, config.base_speed);
        let food = Food::spawn(bounds, &snake.occupied(), &mut rng);
        Game {
            rng,
            globals,
            bounds,
            score: 0,
            snake,
            food,
            state: GameState::NotStarted,
            clock: PlayClock::new(),
            held: HeldKeys::new(globals.release_events),
            hold_ticks: 0,
            next_tick: None,
        }
    }

    pub(crate) fn process_input(&mut self) -> std::io::Result<Option<Screen>> {
        if self.running() {
            let now = Instant::now();
            let period = self.tick_period();
            let when = *self.next_tick.get_or_insert(now + period);
            let wait = when.saturating_duration_since(now);
            if wait.is_zero() || !poll(wait)? {
                self.tick(Instant::now());
                self.next_tick = None;
                Ok(None)
            } else {
                Ok(self.handle_event(read()?, Instant::now()))
            }
        } else {
            Ok(self.handle_event(read()?, Instant::now()))
        }
    }

    /// Run one step of the simulation
    fn tick(&mut self, now: Instant) {
        if !self.running() {
            return;
        }
        if self
            .snake
            .heading()
            .is_some_and(|d| self.held.is_held(d, now))
        {
            self.hold_ticks = self.hold_ticks.saturating_add(1);
        } else {
            self.hold_ticks = 0;
        }
        if !self.snake.advance(self.bounds) {
            self.finish(Ending::Crashed, now);
            return;
        }
        if self
            .food
            .is_some_and(|food| food.position == self.snake.head())
        {
            self.score += 1;
            self.snake.grow();
            debug!(score = self.score, "Snake ate food");
            let threshold = self.globals.config.acceleration_food_threshold;
            if threshold > 0 && self.score % threshold == 0 {
                self.snake.speed_up();
                info!(speed = self.snake.speed(), "Snake sped up");
            }
            self.food = Food::spawn(self.bounds, &self.snake.occupied(), &mut self.rng);
            if self.food.is_none() {
                self.finish(Ending::BoardFull, now);
            }
        }
    }
}

impl<R> Game<R> {
    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
    }

    fn handle_event(&mut self, event: Event, now: Instant) -> Option<Screen> {
        if event == Event::FocusLost {
            if self.running() {
                self.pause(now);
            }
            return None;
        }
        let key = event.as_key_event()?;
        let cmd = Command::from_key_event(key)?;
        let direction = command_direction(cmd);
        if let Some(d) = direction {
            self.held.record(d, key.kind, now);
        }
        if key.kind != KeyEventKind::Press {
            return None;
        }
        match (self.state, cmd) {
            (_, Command::Quit) | (GameState::Over(_), Command::Q) => {
                info!("Quitting");
                return Some(Screen::Quit);
            }
            (GameState::Over(_), Command::R) => {
                info!("Starting new game");
                return Some(Screen::Game(Game::new(self.globals)));
            }
            (GameState::Over(_), _) | (_, Command::Q | Command::R) => (),
            (GameState::Running, Command::Pause) => self.pause(now),
            (GameState::Paused, Command::Pause) => self.resume(now),
            (GameState::NotStarted, Command::Pause) => (),
            (_, Command::Up | Command::Down | Command::Left | Command::Right) => {
                if let Some(d) = direction {
                    self.steer(d, now);
                }
            }
        }
        None
    }

    fn steer(&mut self, direction: Direction, now: Instant) {
        if !self.snake.turn(direction) {
            return;
        }
        debug!(?direction, "Snake turned");
        if self.state == GameState::NotStarted {
            info!("Game started");
            self.state = GameState::Running;
            self.clock.start(now);
            self.next_tick = None;
        }
    }

    fn running(&self) -> bool {
        self.state == GameState::Running
    }

    fn pause(&mut self, now: Instant) {
        debug!("Game paused");
        self.state = GameState::Paused;
        self.clock.pause(now);
        self.hold_ticks = 0;
        self.next_tick = None;
    }

    fn resume(&mut self, now: Instant) {
        debug!("Game resumed");
        self.state = GameState::Running;
        self.clock.resume(now);
    }

    fn finish(&mut self, ending: Ending, now: Instant) {
        self.state = GameState::Over(ending);
        self.clock.stop(now);
        self.next_tick = None;
        info!(
            ?ending,
            score = self.score,
            time = %format_clock(self.clock.elapsed(now)),
            "Game over"
        );
    }

    /// The current speed in ticks per second, including any boost from
    /// holding down the key for the snake's heading
    fn effective_speed(&self) -> u32 {
        let config = &self.globals.config;
        if config.acceleration_enabled && self.hold_ticks > config.acceleration_hold_ticks {
            self.snake.speed().saturating_mul(config.acceleration_factor)
        } else {
            self.snake.speed()
        }
    }

    fn tick_period(&self) -> Duration {
        Duration::from_secs(1) / self.effective_speed().max(1)
    }

    fn popup(&self, now: Instant) -> Option<Popup> {
        match self.state {
            GameState::NotStarted | GameState::Running => None,
            GameState::Paused => Some(Popup::new(
                " PAUSED ",
                [Line::from_iter([
                    Span::raw("Press "),
                    Span::styled("Space", consts::KEY_STYLE),
                    Span::raw(" to continue"),
                ])],
            )),
            GameState::Over(ending) => {
                let title = match ending {
                    Ending::Crashed => " GAME OVER ",
                    Ending::BoardFull => " YOU WIN ",
                };
                Some(Popup::new(
                    title,
                    [
                        Line::from(format!("Score: {}", self.score)),
                        Line::from(format!("Time: {}", format_clock(self.clock.elapsed(now)))),
                        Line::default(),
                        Line::from_iter([
                            Span::raw("Quit ("),
                            Span::styled("q", consts::KEY_STYLE),
                            Span::raw(") — Retry ("),
                            Span::styled("r", consts::KEY_STYLE),
                            Span::raw(")"),
                        ]),
                    ],
                ))
            }
        }
    }

    fn hint(&self) -> Line<'static> {
        match self.state {
            GameState::NotStarted => Line::from(" Steer with the arrow keys or WASD to begin"),
            GameState::Running => Line::from_iter([
                Span::raw(" Pause ("),
                Span::styled("Space", consts::KEY_STYLE),
                Span::raw(") — Quit ("),
                Span::styled("Ctrl-C", consts::KEY_STYLE),
                Span::raw(")"),
            ]),
            GameState::Paused | GameState::Over(_) => Line::default(),
        }
    }
}

impl<R> Widget for &Game<R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let now = Instant::now();
        let display = get_display_area(area);
        let [status_area, board_area, hint_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(2),
        ])
        .areas(display);

        let time = if self.clock.started() {
            format_clock(self.clock.elapsed(now))
        } else {
            String::new()
        };
        Line::styled(
            spread(
                &format!(" Speed: {}", self.effective_speed()),
                &time,
                &format!("Score: {} ", self.score),
                usize::from(status_area.width),
            ),
            consts::STATUS_BAR_STYLE,
        )
        .render(status_area, buf);

        let mut block_size = self.bounds.grid_size();
        block_size.width = block_size.width.saturating_add(2);
        block_size.height = block_size.height.saturating_add(2);
        let block_area = center_rect(board_area, block_size);
        if self.bounds.wrap {
            DottedBorder.render(block_area, buf);
        } else {
            Block::bordered().render(block_area, buf);
        }

        let mut board = Canvas {
            area: block_area.inner(Margin::new(1, 1)),
            buf,
        };
        if let Some(food) = self.food {
            board.draw_cell(
                self.bounds.to_grid(food.position),
                consts::FOOD_SYMBOL,
                consts::FOOD_STYLE,
            );
        }
        let body = self.snake.body();
        for &p in body.range(..body.len().saturating_sub(1)) {
            board.draw_cell(
                self.bounds.to_grid(p),
                consts::SNAKE_BODY_SYMBOL,
                consts::SNAKE_STYLE,
            );
        }
        board.draw_cell(
            self.bounds.to_grid(self.snake.head()),
            self.snake.head_symbol(),
            consts::SNAKE_HEAD_STYLE,
        );
        if self.state == GameState::Over(Ending::Crashed) {
            if let Some(p) = self.snake.crash_site() {
                board.draw_cell(
                    self.bounds.to_grid(p),
                    consts::COLLISION_SYMBOL,
                    consts::COLLISION_STYLE,
                );
            }
        }

        self.hint().render(hint_area, buf);

        if let Some(popup) = self.popup(now) {
            popup.render(display, buf);
        }
    }
}

fn command_direction(cmd: Command) -> Option<Direction> {
    match cmd {
        Command::Up => Some(Direction::Up),
        Command::Down => Some(Direction::Down),
        Command::Left => Some(Direction::Left),
        Command::Right => Some(Direction::Right),
        _ => None,
    }
}

/// Draws on the board, addressing it by grid cell
#[derive(Debug, Eq, PartialEq)]
struct Canvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl Canvas<'_> {
    fn draw_char(&mut self, pos: Position, symbol: char) {
        let Some(x) = self.area.x.checked_add(pos.x) else {
            return;
        };
        let Some(y) = self.area.y.checked_add(pos.y) else {
            return;
        };
        if let Some(cell) = self.buf.cell_mut((x, y)) {
            cell.set_char(symbol);
        }
    }

    fn draw_cell(&mut self, pos: Position, symbol: char, style: Style) {
        let Some(x) = self.area.x.checked_add(pos.x) else {
            return;
        };
        let Some(y) = self.area.y.checked_add(pos.y) else {
            return;
        };
        if let Some(cell) = self.buf.cell_mut((x, y)) {
            cell.set_char(symbol);
            cell.set_style(Style::reset().patch(style));
        }
    }
}

/// Border drawn around a board whose edges wrap around
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct DottedBorder;

impl Widget for DottedBorder {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let max_x = area.width.saturating_sub(1);
        let max_y = area.height.saturating_sub(1);
        let mut canvas = Canvas { area, buf };
        for corner in [
            Position::ORIGIN,
            Position::new(max_x, 0),
            Position::new(max_x, max_y),
            Position::new(0, max_y),
        ] {
            canvas.draw_char(corner, '·');
        }
        for x in 1..max_x {
            canvas.draw_char(Position::new(x, 0), '⋯');
            canvas.draw_char(Position::new(x, max_y), '⋯');
        }
        for y in 1..max_y {
            canvas.draw_char(Position::new(0, y), '⋮');
            canvas.draw_char(Position::new(max_x, y), '⋮');
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum GameState {
    /// Waiting for the first turn
    NotStarted,
    Running,
    Paused,
    Over(Ending),
}

/// How a game came to an end
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Ending {
    /// The snake ran into itself or into the edge of the board
    Crashed,

    /// The snake filled the board, leaving nowhere to place food
    BoardFull,
}
