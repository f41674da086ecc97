use super::direction::Direction;
use crate::consts;
use crate::util::Bounds;
use ratatui::layout::Position;
use std::collections::{HashSet, VecDeque};

/// Snake state.  Snate.
///
/// All positions are in board units relative to the top-left corner of the
/// board.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) struct Snake {
    /// The position of the snake's head
    pub(super) head: Position,

    /// The positions of all of the cells in the snake's body, from tail to
    /// head.  The last entry is always `head`.
    pub(super) body: VecDeque<Position>,

    /// The maximum length of the body
    pub(super) max_len: usize,

    /// The direction in which the snake is moving, or `None` if it has yet to
    /// start
    pub(super) heading: Option<Direction>,

    /// Set once a turn has been accepted; cleared on the next move
    pub(super) turned: bool,

    /// Base speed in ticks per second
    pub(super) speed: u32,

    /// Where the snake crashed, if it has
    pub(super) crash: Option<Position>,
}

impl Snake {
    /// Create a new, motionless snake occupying the single cell `head`
    pub(super) fn new(head: Position, max_len: usize, speed: u32) -> Snake {
        Snake {
            head,
            body: VecDeque::from([head]),
            max_len,
            heading: None,
            turned: false,
            speed,
            crash: None,
        }
    }

    /// Return the position of the snake's head
    pub(super) fn head(&self) -> Position {
        self.head
    }

    pub(super) fn heading(&self) -> Option<Direction> {
        self.heading
    }

    pub(super) fn speed(&self) -> u32 {
        self.speed
    }

    /// Return the cell the snake crashed into, or the head's cell if it ran
    /// off a non-wrapping edge
    pub(super) fn crash_site(&self) -> Option<Position> {
        self.crash
    }

    /// Return the glyph to use for drawing the snake's head
    pub(super) fn head_symbol(&self) -> char {
        match self.heading {
            None => consts::SNAKE_HEAD_IDLE_SYMBOL,
            Some(Direction::Up) => consts::SNAKE_HEAD_UP_SYMBOL,
            Some(Direction::Down) => consts::SNAKE_HEAD_DOWN_SYMBOL,
            Some(Direction::Left) => consts::SNAKE_HEAD_LEFT_SYMBOL,
            Some(Direction::Right) => consts::SNAKE_HEAD_RIGHT_SYMBOL,
        }
    }

    /// Return the positions of the cells in the snake's body, head included
    pub(super) fn body(&self) -> &VecDeque<Position> {
        &self.body
    }

    /// Return the set of cells occupied by the snake
    pub(super) fn occupied(&self) -> HashSet<Position> {
        self.body.iter().copied().collect()
    }

    /// Try to change the snake's heading to `direction`.  Only one turn is
    /// accepted per move, and only onto the other axis: the snake cannot
    /// reverse into itself.  Returns `true` if the turn was accepted.
    pub(super) fn turn(&mut self, direction: Direction) -> bool {
        if self.turned
            || self
                .heading
                .is_some_and(|heading| heading.axis() == direction.axis())
        {
            return false;
        }
        self.heading = Some(direction);
        self.turned = true;
        true
    }

    /// Move the snake forwards one cell in its heading within `bounds`.
    /// Returns `false` if the snake crashed into itself or into a
    /// non-wraparound edge, in which case the snake is left where it was.
    ///
    /// A snake with no heading stays put.
    pub(super) fn advance(&mut self, bounds: Bounds) -> bool {
        self.turned = false;
        let Some(direction) = self.heading else {
            return true;
        };
        let Some(pos) = direction.advance(self.head, bounds) else {
            self.crash = Some(self.head);
            return false;
        };
        // The tail moves out of the way this tick unless the snake is growing
        let vacated = usize::from(self.body.len() >= self.max_len);
        if self.body.iter().skip(vacated).any(|&p| p == pos) {
            self.crash = Some(pos);
            return false;
        }
        self.body.push_back(pos);
        self.head = pos;
        while self.body.len() > self.max_len {
            let _ = self.body.pop_front();
        }
        true
    }

    /// Extend the snake's maximum length in response to eating
    pub(super) fn grow(&mut self) {
        self.max_len += consts::SNAKE_GROWTH;
    }

    /// Raise the snake's base speed by one tick per second
    pub(super) fn speed_up(&mut self) {
        self.speed = self.speed.saturating_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{seq::IndexedRandom, Rng, SeedableRng};
    use rand_chacha::ChaCha12Rng;
    use rstest::rstest;

    const BOUNDS: Bounds = Bounds {
        width: 400,
        height: 300,
        cell: 20,
        wrap: true,
    };

    /// Build a snake from its body cells, listed tail first
    fn snake_on(cells: &[(u16, u16)], heading: Direction, max_len: usize) -> Snake {
        let body = cells
            .iter()
            .map(|&(x, y)| Position::new(x, y))
            .collect::<VecDeque<_>>();
        Snake {
            head: *body.back().unwrap(),
            body,
            max_len,
            heading: Some(heading),
            turned: false,
            speed: 5,
            crash: None,
        }
    }

    fn positions(cells: &[(u16, u16)]) -> VecDeque<Position> {
        cells.iter().map(|&(x, y)| Position::new(x, y)).collect()
    }

    #[rstest]
    #[case(Direction::Up)]
    #[case(Direction::Down)]
    #[case(Direction::Left)]
    #[case(Direction::Right)]
    fn first_turn_accepted(#[case] d: Direction) {
        let mut snake = Snake::new(Position::new(200, 140), 1, 5);
        assert!(snake.turn(d));
        assert_eq!(snake.heading(), Some(d));
    }

    #[rstest]
    #[case(Direction::Left, Direction::Right, false)]
    #[case(Direction::Left, Direction::Left, false)]
    #[case(Direction::Left, Direction::Up, true)]
    #[case(Direction::Left, Direction::Down, true)]
    #[case(Direction::Up, Direction::Down, false)]
    #[case(Direction::Up, Direction::Up, false)]
    #[case(Direction::Up, Direction::Left, true)]
    #[case(Direction::Down, Direction::Right, true)]
    fn turn_only_across_axis(
        #[case] heading: Direction,
        #[case] request: Direction,
        #[case] accepted: bool,
    ) {
        let mut snake = snake_on(&[(200, 140)], heading, 1);
        assert_eq!(snake.turn(request), accepted);
        let expected = if accepted { request } else { heading };
        assert_eq!(snake.heading(), Some(expected));
    }

    #[test]
    fn one_turn_per_move() {
        let mut snake = Snake::new(Position::new(200, 140), 1, 5);
        assert!(snake.turn(Direction::Up));
        assert!(!snake.turn(Direction::Left));
        assert!(!snake.turn(Direction::Right));
        assert_eq!(snake.heading(), Some(Direction::Up));
        assert!(snake.advance(BOUNDS));
        assert!(snake.turn(Direction::Left));
        assert_eq!(snake.heading(), Some(Direction::Left));
    }

    #[test]
    fn idle_snake_stays_put() {
        let mut snake = Snake::new(Position::new(200, 140), 3, 5);
        assert!(snake.advance(BOUNDS));
        assert_eq!(snake.head(), Position::new(200, 140));
        assert_eq!(snake.body(), &positions(&[(200, 140)]));
    }

    #[test]
    fn advance_right() {
        let mut snake = snake_on(&[(40, 40)], Direction::Right, 1);
        assert!(snake.advance(BOUNDS));
        assert_eq!(snake.head(), Position::new(60, 40));
        assert_eq!(snake.body(), &positions(&[(60, 40)]));
    }

    #[test]
    fn body_capped_at_max_len() {
        let mut snake = snake_on(&[(40, 40)], Direction::Right, 3);
        assert!(snake.advance(BOUNDS));
        assert_eq!(snake.body(), &positions(&[(40, 40), (60, 40)]));
        assert!(snake.advance(BOUNDS));
        assert_eq!(snake.body(), &positions(&[(40, 40), (60, 40), (80, 40)]));
        assert!(snake.advance(BOUNDS));
        assert_eq!(snake.body(), &positions(&[(60, 40), (80, 40), (100, 40)]));
        snake.grow();
        assert!(snake.advance(BOUNDS));
        assert_eq!(
            snake.body(),
            &positions(&[(60, 40), (80, 40), (100, 40), (120, 40)])
        );
    }

    #[test]
    fn wraps_at_edge() {
        let mut snake = snake_on(&[(380, 40)], Direction::Right, 1);
        assert!(snake.advance(BOUNDS));
        assert_eq!(snake.head(), Position::new(0, 40));
        assert_eq!(snake.crash_site(), None);
    }

    #[test]
    fn crashes_at_fenced_edge() {
        let bounds = Bounds {
            wrap: false,
            ..BOUNDS
        };
        let mut snake = snake_on(&[(360, 40), (380, 40)], Direction::Right, 2);
        assert!(!snake.advance(bounds));
        assert_eq!(snake.head(), Position::new(380, 40));
        assert_eq!(snake.body(), &positions(&[(360, 40), (380, 40)]));
        assert_eq!(snake.crash_site(), Some(Position::new(380, 40)));
    }

    #[test]
    fn self_collision() {
        let mut snake = snake_on(
            &[(40, 40), (60, 40), (80, 40), (80, 60), (60, 60)],
            Direction::Left,
            5,
        );
        assert!(snake.turn(Direction::Up));
        assert!(!snake.advance(BOUNDS));
        assert_eq!(snake.head(), Position::new(60, 60));
        assert_eq!(snake.body().len(), 5);
        assert_eq!(snake.crash_site(), Some(Position::new(60, 40)));
    }

    #[test]
    fn chase_departing_tail() {
        let mut snake = snake_on(&[(40, 40), (60, 40), (60, 60), (40, 60)], Direction::Left, 4);
        assert!(snake.turn(Direction::Up));
        assert!(snake.advance(BOUNDS));
        assert_eq!(snake.head(), Position::new(40, 40));
        assert_eq!(
            snake.body(),
            &positions(&[(60, 40), (60, 60), (40, 60), (40, 40)])
        );
    }

    #[test]
    fn chase_tail_while_growing() {
        let mut snake = snake_on(&[(40, 40), (60, 40), (60, 60), (40, 60)], Direction::Left, 5);
        assert!(snake.turn(Direction::Up));
        assert!(!snake.advance(BOUNDS));
        assert_eq!(snake.crash_site(), Some(Position::new(40, 40)));
    }

    #[test]
    fn collision_after_wrapping() {
        let mut snake = snake_on(&[(0, 40), (380, 40)], Direction::Right, 3);
        assert!(!snake.advance(BOUNDS));
        assert_eq!(snake.crash_site(), Some(Position::new(0, 40)));
    }

    #[test]
    fn random_walk_keeps_invariants() {
        let mut rng = ChaCha12Rng::seed_from_u64(0x5EED_5EED);
        let directions = [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ];
        for _ in 0..50 {
            let mut snake = Snake::new(BOUNDS.center(), 1, 5);
            for _ in 0..200 {
                for _ in 0..rng.random_range(0..3) {
                    let _ = snake.turn(*directions.choose(&mut rng).unwrap());
                }
                if rng.random_bool(0.2) {
                    snake.grow();
                }
                if !snake.advance(BOUNDS) {
                    break;
                }
                assert!(snake.body().len() <= snake.max_len);
                assert_eq!(snake.body().back(), Some(&snake.head()));
                assert_eq!(snake.occupied().len(), snake.body().len());
            }
        }
    }
}
