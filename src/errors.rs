use std::error::Error;
use std::fmt;

use crate::geometry::{Direction, GridCoordinate};
use crate::grid::GridId;

#[derive(Debug, PartialEq)]
pub enum GridError {
    DuplicateVertex(GridCoordinate), // vertex already exists at this coordinate
    DuplicateGridId(GridId), // a grid with this ID is already registered
    GridNotFound(GridId), // no grid registered under this ID
    VertexNotFound(GridCoordinate), // no vertex at this coordinate
    NotAdjacent { start: GridCoordinate, end: GridCoordinate }, // global coordinates are not unit-step neighbors
    MissingConnection { coordinate: GridCoordinate, direction: Direction }, // direction slot holds no edge
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::DuplicateVertex(c) => {
                write!(f, "a vertex already exists at coordinate {}", c)
            }
            GridError::DuplicateGridId(id) => {
                write!(f, "a grid system with ID {} is already registered", id)
            }
            GridError::GridNotFound(id) => {
                write!(f, "no grid system registered under ID {}", id)
            }
            GridError::VertexNotFound(c) => {
                write!(f, "no vertex exists at coordinate {}", c)
            }
            GridError::NotAdjacent { start, end } => {
                write!(
                    f,
                    "global coordinates {} and {} are not neighbors, they cannot be connected",
                    start, end
                )
            }
            GridError::MissingConnection {
                coordinate,
                direction,
            } => {
                write!(
                    f,
                    "the vertex at {} has no {:?} connection",
                    coordinate, direction
                )
            }
        }
    }
}

impl Error for GridError {}
