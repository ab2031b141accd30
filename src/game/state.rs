use serde::Serialize;

use super::action::Heading;
use super::history::{PathHistory, TurnHistory};

/// A block-aligned position on the playfield.
///
/// Coordinates are in pixels and always multiples of the block size while
/// the cell is on the grid; a cell one step past an edge is how a wall hit
/// shows up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Cell shifted by a raw pixel delta
    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Cell one block away in the given heading
    pub fn stepped(&self, heading: Heading, block: i32) -> Self {
        let (dx, dy) = heading.delta();
        self.offset(dx * block, dy * block)
    }

    /// Euclidean distance to another cell, in pixels
    pub fn distance(&self, other: Cell) -> f32 {
        let dx = (self.x - other.x) as f32;
        let dy = (self.y - other.y) as f32;
        (dx * dx + dy * dy).sqrt()
    }
}

/// The snake: body cells with the head at index 0, plus its heading
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, head first
    pub body: Vec<Cell>,
    /// Current direction of movement
    pub heading: Heading,
}

impl Snake {
    /// Build a snake whose body extends opposite the heading, one block per
    /// segment behind the head.
    pub fn new(head: Cell, heading: Heading, length: usize, block: i32) -> Self {
        let (dx, dy) = heading.delta();
        let mut body = vec![head];
        for i in 1..length {
            body.push(head.offset(-dx * block * i as i32, -dy * block * i as i32));
        }
        Self { body, heading }
    }

    /// Head position
    pub fn head(&self) -> Cell {
        self.body[0]
    }

    /// Number of segments
    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// True if any segment, head included, occupies the cell
    pub fn contains(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// True if a non-head segment occupies the cell
    pub fn collides_with_body(&self, cell: Cell) -> bool {
        self.body[1..].contains(&cell)
    }

    /// Grow by inserting a new head
    pub fn push_head(&mut self, cell: Cell) {
        self.body.insert(0, cell);
    }

    /// Drop the tail segment
    pub fn pop_tail(&mut self) {
        self.body.pop();
    }
}

/// Concentric cells around the food at Chebyshev offsets of 1, 2 and 3
/// blocks. Kept as data for renderers or alternate reward schemes; the
/// active reward path never reads them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FoodRings {
    pub inner: Vec<Cell>,
    pub middle: Vec<Cell>,
    pub outer: Vec<Cell>,
}

impl FoodRings {
    pub fn around(food: Cell, block: i32) -> Self {
        Self {
            inner: ring(food, block, 1),
            middle: ring(food, block, 2),
            outer: ring(food, block, 3),
        }
    }
}

/// All cells at Chebyshev distance of exactly `radius` blocks
fn ring(center: Cell, block: i32, radius: i32) -> Vec<Cell> {
    let mut cells = Vec::new();
    for dx in -radius..=radius {
        for dy in -radius..=radius {
            if dx.abs().max(dy.abs()) == radius {
                cells.push(center.offset(dx * block, dy * block));
            }
        }
    }
    cells
}

/// Why an episode ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationCause {
    /// Frame budget of `timeout_factor * snake length` exhausted
    Timeout,
    /// Head left the playfield
    WallCollision,
    /// Head ran into the body
    SelfCollision,
}

/// Episode count and cumulative final score for one termination cause
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OutcomeTally {
    pub episodes: u32,
    pub total_score: u32,
}

/// How this engine's episodes have ended so far.
///
/// Engine-owned and never reset: an explicit aggregate instead of the
/// process-global counters a driving loop would otherwise hide somewhere.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EpisodeOutcomes {
    pub timeout: OutcomeTally,
    pub wall: OutcomeTally,
    pub self_collision: OutcomeTally,
}

impl EpisodeOutcomes {
    /// Record a finished episode under its cause
    pub fn record(&mut self, cause: TerminationCause, final_score: u32) {
        let tally = match cause {
            TerminationCause::Timeout => &mut self.timeout,
            TerminationCause::WallCollision => &mut self.wall,
            TerminationCause::SelfCollision => &mut self.self_collision,
        };
        tally.episodes += 1;
        tally.total_score += final_score;
    }

    /// Episodes finished under any cause
    pub fn episodes(&self) -> u32 {
        self.timeout.episodes + self.wall.episodes + self.self_collision.episodes
    }
}

/// Complete per-episode state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Cell,
    pub rings: FoodRings,
    pub score: u32,
    /// Frames since reset
    pub frame: u32,
    pub is_alive: bool,
    /// Recent action symbols, for the turn-pattern shaping
    pub turns: TurnHistory,
    /// Recent head cells and the explored set, for loop and novelty shaping
    pub path: PathHistory,
    /// Playfield width in pixels
    pub width: i32,
    /// Playfield height in pixels
    pub height: i32,
    /// Grid unit in pixels
    pub block: i32,
}

impl GameState {
    /// Create a fresh episode state around an already-built snake
    pub fn new(snake: Snake, food: Cell, width: i32, height: i32, block: i32) -> Self {
        Self {
            snake,
            rings: FoodRings::around(food, block),
            food,
            score: 0,
            frame: 0,
            is_alive: true,
            turns: TurnHistory::new(),
            path: PathHistory::new(),
            width,
            height,
            block,
        }
    }

    /// True if the cell lies fully inside the playfield
    pub fn is_in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0
            && cell.y >= 0
            && cell.x + self.block <= self.width
            && cell.y + self.block <= self.height
    }

    /// True if a snake at `cell` would be dead there: outside the bounds or
    /// on a non-head body segment.
    pub fn is_collision(&self, cell: Cell) -> bool {
        !self.is_in_bounds(cell) || self.snake.collides_with_body(cell)
    }

    /// Number of cells along the x axis
    pub fn cells_x(&self) -> i32 {
        self.width / self.block
    }

    /// Number of cells along the y axis
    pub fn cells_y(&self) -> i32 {
        self.height / self.block
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_offset() {
        let cell = Cell::new(100, 100);
        assert_eq!(cell.offset(20, 0), Cell::new(120, 100));
        assert_eq!(cell.offset(-20, 0), Cell::new(80, 100));
        assert_eq!(cell.offset(0, 20), Cell::new(100, 120));
        assert_eq!(cell.offset(0, -20), Cell::new(100, 80));
    }

    #[test]
    fn test_cell_stepped_scales_by_block() {
        let cell = Cell::new(100, 100);
        assert_eq!(cell.stepped(Heading::Right, 20), Cell::new(120, 100));
        assert_eq!(cell.stepped(Heading::Up, 20), Cell::new(100, 80));
    }

    #[test]
    fn test_cell_distance() {
        let a = Cell::new(0, 0);
        assert_eq!(a.distance(Cell::new(60, 0)), 60.0);
        assert_eq!(a.distance(Cell::new(0, 80)), 80.0);
        assert_eq!(a.distance(Cell::new(60, 80)), 100.0);
        assert_eq!(a.distance(a), 0.0);
    }

    #[test]
    fn test_snake_extends_opposite_heading() {
        let snake = Snake::new(Cell::new(320, 240), Heading::Right, 3, 20);
        assert_eq!(snake.body[0], Cell::new(320, 240));
        assert_eq!(snake.body[1], Cell::new(300, 240));
        assert_eq!(snake.body[2], Cell::new(280, 240));
    }

    #[test]
    fn test_snake_push_and_pop() {
        let mut snake = Snake::new(Cell::new(100, 100), Heading::Right, 3, 20);

        snake.push_head(Cell::new(120, 100));
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.head(), Cell::new(120, 100));

        snake.pop_tail();
        assert_eq!(snake.len(), 3);
        assert!(!snake.contains(Cell::new(60, 100)));
    }

    #[test]
    fn test_body_collision_excludes_head() {
        let snake = Snake::new(Cell::new(100, 100), Heading::Right, 3, 20);
        assert!(!snake.collides_with_body(Cell::new(100, 100)));
        assert!(snake.collides_with_body(Cell::new(80, 100)));
        assert!(snake.collides_with_body(Cell::new(60, 100)));
        assert!(!snake.collides_with_body(Cell::new(200, 200)));
    }

    #[test]
    fn test_ring_geometry() {
        let rings = FoodRings::around(Cell::new(100, 100), 20);
        assert_eq!(rings.inner.len(), 8);
        assert_eq!(rings.middle.len(), 16);
        assert_eq!(rings.outer.len(), 24);

        for (cells, radius) in [(&rings.inner, 20), (&rings.middle, 40), (&rings.outer, 60)] {
            for cell in cells.iter() {
                let dx = (cell.x - 100).abs();
                let dy = (cell.y - 100).abs();
                assert_eq!(dx.max(dy), radius);
            }
        }
    }

    #[test]
    fn test_bounds_are_block_aware() {
        let snake = Snake::new(Cell::new(100, 100), Heading::Right, 3, 20);
        let state = GameState::new(snake, Cell::new(0, 0), 200, 200, 20);

        assert!(state.is_in_bounds(Cell::new(0, 0)));
        assert!(state.is_in_bounds(Cell::new(180, 180)));
        assert!(!state.is_in_bounds(Cell::new(200, 0)));
        assert!(!state.is_in_bounds(Cell::new(0, 200)));
        assert!(!state.is_in_bounds(Cell::new(-20, 0)));
    }

    #[test]
    fn test_is_collision_contract() {
        let snake = Snake::new(Cell::new(100, 100), Heading::Right, 3, 20);
        let state = GameState::new(snake, Cell::new(0, 0), 200, 200, 20);

        // outside the playfield
        assert!(state.is_collision(Cell::new(-20, 100)));
        assert!(state.is_collision(Cell::new(200, 100)));
        // a non-head body cell
        assert!(state.is_collision(Cell::new(80, 100)));
        // the head itself does not count
        assert!(!state.is_collision(Cell::new(100, 100)));
        // free cell
        assert!(!state.is_collision(Cell::new(140, 140)));
    }

    #[test]
    fn test_outcome_ledger_records_by_cause() {
        let mut outcomes = EpisodeOutcomes::default();
        outcomes.record(TerminationCause::WallCollision, 3);
        outcomes.record(TerminationCause::WallCollision, 5);
        outcomes.record(TerminationCause::Timeout, 0);

        assert_eq!(outcomes.wall.episodes, 2);
        assert_eq!(outcomes.wall.total_score, 8);
        assert_eq!(outcomes.timeout.episodes, 1);
        assert_eq!(outcomes.self_collision.episodes, 0);
        assert_eq!(outcomes.episodes(), 3);
    }
}
