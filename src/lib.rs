//! Grid graph and pathfinding modules.
//!
//! A typed-vertex, directional-edge grid graph that spans multiple grid
//! instances, each with its own coordinate offset into a shared global
//! space, plus A* shortest-path search across them:
//!
//! - [`geometry`]: integer grid coordinates and the 8 compass directions
//! - [`collections`]: the mutable-priority queue backing the A* open list
//! - [`grid`]: vertices, edges, grid instances and the instance registry
//! - [`graph_algos`]: the A* search engine
//!
//! All grid instances live in a [`grid::GridRegistry`], which owns them and
//! resolves cross-instance edges; [`grid::GridRegistry::find_shortest_path`]
//! is the pathfinding entry point.

pub mod collections;
pub mod errors;
pub mod geometry;
pub mod graph_algos;
pub mod grid;

pub use errors::GridError;
pub use geometry::{Direction, GridCoordinate};
pub use grid::{Edge, GridData, GridId, GridRegistry, SquareGridSystem, Vertex, VertexKey};
