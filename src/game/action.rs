use std::error::Error;
use std::fmt;

/// Direction the snake is currently moving in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Heading {
    Right,
    Left,
    Up,
    Down,
}

impl Heading {
    /// Returns the delta (dx, dy) in grid units for this heading
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Heading::Right => (1, 0),
            Heading::Left => (-1, 0),
            Heading::Up => (0, -1),
            Heading::Down => (0, 1),
        }
    }

    /// Next heading on the clockwise cycle Right -> Down -> Left -> Up
    pub fn clockwise(&self) -> Heading {
        match self {
            Heading::Right => Heading::Down,
            Heading::Down => Heading::Left,
            Heading::Left => Heading::Up,
            Heading::Up => Heading::Right,
        }
    }

    /// Next heading on the counter-clockwise cycle Right -> Up -> Left -> Down
    pub fn counter_clockwise(&self) -> Heading {
        match self {
            Heading::Right => Heading::Up,
            Heading::Up => Heading::Left,
            Heading::Left => Heading::Down,
            Heading::Down => Heading::Right,
        }
    }

    /// Heading after applying an action relative to this heading
    pub fn turned(&self, action: Action) -> Heading {
        match action {
            Action::Straight => *self,
            Action::TurnRight => self.clockwise(),
            Action::TurnLeft => self.counter_clockwise(),
        }
    }
}

/// Action an agent can take, relative to the current heading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Keep the current heading
    Straight,
    /// Turn 90 degrees clockwise
    TurnRight,
    /// Turn 90 degrees counter-clockwise
    TurnLeft,
}

impl Action {
    /// All actions, in one-hot encoding order
    pub const ALL: [Action; 3] = [Action::Straight, Action::TurnRight, Action::TurnLeft];

    /// Decode a one-hot action vector as produced by an agent.
    ///
    /// Exactly one element must be hot. Anything else is rejected rather
    /// than silently mapped to a turn.
    pub fn from_one_hot(one_hot: [u8; 3]) -> Result<Action, ActionDecodeError> {
        match one_hot {
            [1, 0, 0] => Ok(Action::Straight),
            [0, 1, 0] => Ok(Action::TurnRight),
            [0, 0, 1] => Ok(Action::TurnLeft),
            _ => Err(ActionDecodeError { got: one_hot }),
        }
    }
}

/// Error returned when an action vector is not one-hot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionDecodeError {
    got: [u8; 3],
}

impl fmt::Display for ActionDecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected a one-hot action vector, got {:?}", self.got)
    }
}

impl Error for ActionDecodeError {}
