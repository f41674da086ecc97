//! Assorted constants & hard-coded configuration defaults
use ratatui::{
    layout::Size,
    style::{Color, Modifier, Style},
};
use std::time::Duration;

/// Default width of the board, in board units
pub(crate) const BOARD_WIDTH: u16 = 400;

/// Default height of the board, in board units
pub(crate) const BOARD_HEIGHT: u16 = 300;

/// Default edge length of one grid cell, in board units
pub(crate) const CELL_SIZE: u16 = 20;

/// Default number of ticks per second before any food has been eaten
pub(crate) const BASE_SPEED: u32 = 5;

/// Whether holding down the key for the snake's heading speeds it up by
/// default
pub(crate) const ACCELERATION_ENABLED: bool = true;

/// Default multiplier applied to the speed while the heading key is held
pub(crate) const ACCELERATION_FACTOR: u32 = 2;

/// By default, the snake's speed goes up by one every time this many food
/// items have been eaten.  Zero disables the speed-up.
pub(crate) const ACCELERATION_FOOD_THRESHOLD: u32 = 5;

/// Default number of consecutive ticks the heading key must be held before
/// acceleration kicks in; acceleration starts once the count exceeds this.
pub(crate) const ACCELERATION_HOLD_TICKS: u32 = 2;

/// Whether leaving the board ends the game by default (as opposed to
/// wrapping around to the opposite edge)
pub(crate) const GAME_OVER_ON_EDGE: bool = false;

/// Default maximum snake length before any food has been eaten
pub(crate) const STARTING_LENGTH: usize = 1;

/// How many cells the snake's length should increase by upon eating food
pub(crate) const SNAKE_GROWTH: usize = 1;

/// On terminals that do not report key releases, a direction key counts as
/// held for this long after its most recent press or auto-repeat.
pub(crate) const HELD_KEY_TIMEOUT: Duration = Duration::from_millis(500);

/// Draw everything inside a rectangle of this size in the center of the
/// terminal window.
///
/// Cf. [`crate::util::get_display_area()`]
pub(crate) const DISPLAY_SIZE: Size = Size {
    width: 80,
    height: 24,
};

/// The largest grid, in cells, that fits in the display alongside the
/// border, status bar, and hint lines
pub(crate) const MAX_GRID_SIZE: Size = Size {
    width: 78,
    height: 19,
};

/// Glyph for the snake's head before it has started moving
pub(crate) const SNAKE_HEAD_IDLE_SYMBOL: char = '@';

/// Glyph for the snake's head when it is moving up
pub(crate) const SNAKE_HEAD_UP_SYMBOL: char = 'v';

/// Glyph for the snake's head when it is moving down
pub(crate) const SNAKE_HEAD_DOWN_SYMBOL: char = '^';

/// Glyph for the snake's head when it is moving left
pub(crate) const SNAKE_HEAD_LEFT_SYMBOL: char = '>';

/// Glyph for the snake's head when it is moving right
pub(crate) const SNAKE_HEAD_RIGHT_SYMBOL: char = '<';

/// Glyph for the parts of the snake's body
pub(crate) const SNAKE_BODY_SYMBOL: char = '⚬';

/// Glyph for the food
pub(crate) const FOOD_SYMBOL: char = '●';

/// Glyph for the cell the snake crashed into
pub(crate) const COLLISION_SYMBOL: char = '×';

/// Style for the snake's body
pub(crate) const SNAKE_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);

/// Style for the snake's head
pub(crate) const SNAKE_HEAD_STYLE: Style = Style::new()
    .fg(Color::LightGreen)
    .add_modifier(Modifier::BOLD);

/// Style for the food
pub(crate) const FOOD_STYLE: Style = Style::new().fg(Color::LightRed);

/// Style for [`COLLISION_SYMBOL`]
pub(crate) const COLLISION_STYLE: Style = Style::new()
    .fg(Color::LightRed)
    .add_modifier(Modifier::REVERSED);

/// Style for key codes shown in the interface
pub(crate) const KEY_STYLE: Style = Style::new().fg(Color::Yellow);

/// Style for the status bar at the top of the game screen
pub(crate) const STATUS_BAR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);
