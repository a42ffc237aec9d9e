use std::fmt;
use std::ops::{Add, Sub};

use num_traits::{Float, Num, Signed};

/// Manhattan distance
pub fn manhattan_distance<T>(x1: T, y1: T, x2: T, y2: T) -> T
where
    T: Num + Copy + Signed,
{
    (x1 - x2).abs() + (y1 - y2).abs()
}

/// Euclidean distance
pub fn euclidean<T>(x1: T, y1: T, x2: T, y2: T) -> T
where
    T: Float,
{
    ((x1 - x2).powi(2) + (y1 - y2).powi(2)).sqrt()
}

/// 2D integer grid coordinate
/// Used as the map key for vertices; adding a grid instance's offset to a
/// local coordinate yields the coordinate in the shared global space
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct GridCoordinate {
    pub x: i32,
    pub y: i32,
}

impl GridCoordinate {
    /// Create a new coordinate
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another coordinate
    pub fn distance(self, other: GridCoordinate) -> f64 {
        euclidean(self.x as f64, self.y as f64, other.x as f64, other.y as f64)
    }
}

impl Add for GridCoordinate {
    type Output = GridCoordinate;

    fn add(self, other: GridCoordinate) -> GridCoordinate {
        GridCoordinate::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for GridCoordinate {
    type Output = GridCoordinate;

    fn sub(self, other: GridCoordinate) -> GridCoordinate {
        GridCoordinate::new(self.x - other.x, self.y - other.y)
    }
}

impl fmt::Display for GridCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The 8 compass directions of a square grid
/// Also indexes a vertex's connection slots
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

impl Direction {
    /// All 8 directions, in connection-slot order
    pub const ALL: [Direction; 8] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
        Direction::UpLeft,
        Direction::UpRight,
        Direction::DownLeft,
        Direction::DownRight,
    ];

    /// Resolve a direction from a coordinate delta (end - start)
    /// Returns None unless the delta is exactly one of the 8 unit steps,
    /// i.e. the two coordinates are neighbors
    pub fn from_delta(delta: GridCoordinate) -> Option<Direction> {
        match (delta.x, delta.y) {
            (0, 1) => Some(Direction::Up),
            (0, -1) => Some(Direction::Down),
            (-1, 0) => Some(Direction::Left),
            (1, 0) => Some(Direction::Right),
            (-1, 1) => Some(Direction::UpLeft),
            (1, 1) => Some(Direction::UpRight),
            (-1, -1) => Some(Direction::DownLeft),
            (1, -1) => Some(Direction::DownRight),
            _ => None,
        }
    }

    /// The unit-step delta this direction represents
    pub fn delta(self) -> GridCoordinate {
        match self {
            Direction::Up => GridCoordinate::new(0, 1),
            Direction::Down => GridCoordinate::new(0, -1),
            Direction::Left => GridCoordinate::new(-1, 0),
            Direction::Right => GridCoordinate::new(1, 0),
            Direction::UpLeft => GridCoordinate::new(-1, 1),
            Direction::UpRight => GridCoordinate::new(1, 1),
            Direction::DownLeft => GridCoordinate::new(-1, -1),
            Direction::DownRight => GridCoordinate::new(1, -1),
        }
    }

    /// The opposite direction, used when severing double edges
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::UpLeft => Direction::DownRight,
            Direction::UpRight => Direction::DownLeft,
            Direction::DownLeft => Direction::UpRight,
            Direction::DownRight => Direction::UpLeft,
        }
    }

    /// Slot index of this direction in a vertex's connection array
    pub(crate) fn index(self) -> usize {
        self as usize
    }
}
