use std::fmt::Debug;

use crate::collections::FxIndexMap;
use crate::errors::GridError;
use crate::geometry::{Direction, GridCoordinate};
use crate::graph_algos::a_star;

/// Unique ID of a grid instance, assigned by the caller
/// (e.g. the ID of the generator that built the grid)
pub type GridId = i32;

/// Capability bound for the payload stored in each vertex
pub trait GridData: Clone + Debug {}

impl GridData for () {}

/// Identity of a vertex: its local coordinate plus the owning grid instance
/// Edges and paths refer to vertices by key, resolved through the registry
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct VertexKey {
    pub coordinate: GridCoordinate,
    pub grid_id: GridId,
}

impl VertexKey {
    pub const fn new(coordinate: GridCoordinate, grid_id: GridId) -> Self {
        Self {
            coordinate,
            grid_id,
        }
    }
}

/// A directional, weighted link to another vertex
/// A "double" edge is two independent edges, one per direction
#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
    pub to: VertexKey,
    pub cost: f64,
}

/// A node in the grid graph
/// Owned by exactly one grid instance; carries a traversal cost charged on
/// entry, an opaque payload, and up to 8 directional connections
#[derive(Clone, Debug)]
pub struct Vertex<T> {
    coordinate: GridCoordinate,
    grid_id: GridId,
    cost: f64,
    data: T,
    // one slot per compass direction, indexed by Direction
    connections: [Option<Edge>; 8],
}

impl<T: GridData> Vertex<T> {
    fn new(grid_id: GridId, coordinate: GridCoordinate, cost: f64, data: T) -> Self {
        Self {
            coordinate,
            grid_id,
            cost,
            data,
            connections: Default::default(),
        }
    }

    pub fn coordinate(&self) -> GridCoordinate {
        self.coordinate
    }

    pub fn grid_id(&self) -> GridId {
        self.grid_id
    }

    pub fn key(&self) -> VertexKey {
        VertexKey::new(self.coordinate, self.grid_id)
    }

    pub fn cost(&self) -> f64 {
        self.cost
    }

    pub fn data(&self) -> &T {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut T {
        &mut self.data
    }

    /// The edge in the given direction, if one is present
    pub fn connection(&self, direction: Direction) -> Option<&Edge> {
        self.connections[direction.index()].as_ref()
    }

    /// All present edges with their directions, in slot order
    pub fn connections(&self) -> impl Iterator<Item = (Direction, &Edge)> {
        Direction::ALL
            .iter()
            .filter_map(|&d| self.connections[d.index()].as_ref().map(|e| (d, e)))
    }

    fn set_connection(&mut self, direction: Direction, edge: Edge) {
        self.connections[direction.index()] = Some(edge);
    }

    fn clear_connection(&mut self, direction: Direction) -> Option<Edge> {
        self.connections[direction.index()].take()
    }
}

/// One square-grid instance: a coordinate-to-vertex mapping plus the offset
/// that places its local coordinates into the shared global space
#[derive(Clone, Debug)]
pub struct SquareGridSystem<T> {
    id: GridId,
    global_offset: GridCoordinate,
    vertices: FxIndexMap<GridCoordinate, Vertex<T>>,
}

impl<T: GridData> SquareGridSystem<T> {
    /// Create an empty grid instance with the given ID and global offset
    pub fn new(id: GridId, global_offset: GridCoordinate) -> Self {
        Self {
            id,
            global_offset,
            vertices: FxIndexMap::default(),
        }
    }

    pub fn id(&self) -> GridId {
        self.id
    }

    pub fn global_offset(&self) -> GridCoordinate {
        self.global_offset
    }

    /// Move the whole instance in global space
    /// Generators linking adjacent maps set this after construction
    pub fn set_global_offset(&mut self, offset: GridCoordinate) {
        self.global_offset = offset;
    }

    /// Translate a local coordinate into the shared global space
    pub fn to_global(&self, local: GridCoordinate) -> GridCoordinate {
        local + self.global_offset
    }

    /// Add a new vertex to the grid
    /// Fails if a vertex already exists at the coordinate
    pub fn add_vertex(
        &mut self,
        coordinate: GridCoordinate,
        cost: f64,
        data: T,
    ) -> Result<(), GridError> {
        if self.vertices.contains_key(&coordinate) {
            return Err(GridError::DuplicateVertex(coordinate));
        }
        let vertex = Vertex::new(self.id, coordinate, cost, data);
        self.vertices.insert(coordinate, vertex);
        Ok(())
    }

    /// The vertex at the given coordinate, or None if there is none
    /// Vertex lookup is the one operation that signals absence with a
    /// sentinel instead of an error
    pub fn vertex(&self, coordinate: GridCoordinate) -> Option<&Vertex<T>> {
        self.vertices.get(&coordinate)
    }

    pub fn vertex_mut(&mut self, coordinate: GridCoordinate) -> Option<&mut Vertex<T>> {
        self.vertices.get_mut(&coordinate)
    }

    /// All vertices in the grid
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex<T>> {
        self.vertices.values()
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    fn remove(&mut self, coordinate: GridCoordinate) -> Option<Vertex<T>> {
        self.vertices.swap_remove(&coordinate)
    }
}

/// Registry of all live grid instances, keyed by grid ID
/// Owns the instances; cross-instance operations (edges between grids,
/// pathfinding) resolve vertices through it. Created and held by the
/// application rather than living in process-wide state, so its lifetime
/// and thread ownership are explicit.
#[derive(Clone, Debug)]
pub struct GridRegistry<T> {
    grids: FxIndexMap<GridId, SquareGridSystem<T>>,
}

impl<T: GridData> Default for GridRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: GridData> GridRegistry<T> {
    pub fn new() -> Self {
        Self {
            grids: FxIndexMap::default(),
        }
    }

    /// Register a grid instance
    /// Fails if another instance is already registered under the same ID
    pub fn register(&mut self, grid: SquareGridSystem<T>) -> Result<(), GridError> {
        if self.grids.contains_key(&grid.id()) {
            return Err(GridError::DuplicateGridId(grid.id()));
        }
        self.grids.insert(grid.id(), grid);
        Ok(())
    }

    pub fn grid(&self, id: GridId) -> Option<&SquareGridSystem<T>> {
        self.grids.get(&id)
    }

    pub fn grid_mut(&mut self, id: GridId) -> Option<&mut SquareGridSystem<T>> {
        self.grids.get_mut(&id)
    }

    /// All registered grid instances
    pub fn grids(&self) -> impl Iterator<Item = &SquareGridSystem<T>> {
        self.grids.values()
    }

    /// Resolve a vertex key to its vertex, if both grid and vertex exist
    pub fn vertex(&self, key: VertexKey) -> Option<&Vertex<T>> {
        self.grids.get(&key.grid_id)?.vertex(key.coordinate)
    }

    /// The global coordinate of a vertex key (local + owning grid's offset)
    pub fn global_coordinate(&self, key: VertexKey) -> Result<GridCoordinate, GridError> {
        let grid = self
            .grids
            .get(&key.grid_id)
            .ok_or(GridError::GridNotFound(key.grid_id))?;
        Ok(grid.to_global(key.coordinate))
    }

    /// Resolve the connection direction from start to end by comparing
    /// global coordinates; the two must differ by exactly one unit step
    fn resolve_direction(
        &self,
        start: GridCoordinate,
        start_grid_id: GridId,
        end: GridCoordinate,
        end_grid_id: GridId,
    ) -> Result<Direction, GridError> {
        let global_start = self.global_coordinate(VertexKey::new(start, start_grid_id))?;
        let global_end = self.global_coordinate(VertexKey::new(end, end_grid_id))?;

        Direction::from_delta(global_end - global_start).ok_or(GridError::NotAdjacent {
            start: global_start,
            end: global_end,
        })
    }

    /// Set (or overwrite) the edge from the start vertex to the end vertex
    /// The edge is unidirectional; both vertices must exist and their global
    /// coordinates must be unit-step neighbors
    pub fn set_edge(
        &mut self,
        start: GridCoordinate,
        start_grid_id: GridId,
        end: GridCoordinate,
        end_grid_id: GridId,
        weight: f64,
    ) -> Result<(), GridError> {
        let direction = self.resolve_direction(start, start_grid_id, end, end_grid_id)?;

        // the destination must exist before an edge may point at it
        let end_grid = self
            .grids
            .get(&end_grid_id)
            .ok_or(GridError::GridNotFound(end_grid_id))?;
        if end_grid.vertex(end).is_none() {
            return Err(GridError::VertexNotFound(end));
        }

        let start_grid = self
            .grids
            .get_mut(&start_grid_id)
            .ok_or(GridError::GridNotFound(start_grid_id))?;
        let start_vertex = start_grid
            .vertex_mut(start)
            .ok_or(GridError::VertexNotFound(start))?;

        start_vertex.set_connection(
            direction,
            Edge {
                to: VertexKey::new(end, end_grid_id),
                cost: weight,
            },
        );
        Ok(())
    }

    /// Set edges in both directions with the same weight
    /// Two independent edge writes, not a transaction: if the second write
    /// fails the first one stays applied
    pub fn set_double_edge(
        &mut self,
        coordinate1: GridCoordinate,
        start_grid_id: GridId,
        coordinate2: GridCoordinate,
        end_grid_id: GridId,
        weight: f64,
    ) -> Result<(), GridError> {
        self.set_edge(coordinate1, start_grid_id, coordinate2, end_grid_id, weight)?;
        self.set_edge(coordinate2, end_grid_id, coordinate1, start_grid_id, weight)?;
        Ok(())
    }

    /// Remove the edge from the start vertex to the end vertex
    /// Fails if the coordinates are not neighbors or the slot holds no edge
    pub fn remove_edge(
        &mut self,
        start: GridCoordinate,
        start_grid_id: GridId,
        end: GridCoordinate,
        end_grid_id: GridId,
    ) -> Result<(), GridError> {
        let direction = self.resolve_direction(start, start_grid_id, end, end_grid_id)?;

        let start_grid = self
            .grids
            .get_mut(&start_grid_id)
            .ok_or(GridError::GridNotFound(start_grid_id))?;
        let start_vertex = start_grid
            .vertex_mut(start)
            .ok_or(GridError::VertexNotFound(start))?;

        start_vertex
            .clear_connection(direction)
            .map(|_| ())
            .ok_or(GridError::MissingConnection {
                coordinate: start,
                direction,
            })
    }

    /// Remove the edges in both directions
    /// Same non-atomicity as [`GridRegistry::set_double_edge`]
    pub fn remove_double_edge(
        &mut self,
        coordinate1: GridCoordinate,
        start_grid_id: GridId,
        coordinate2: GridCoordinate,
        end_grid_id: GridId,
    ) -> Result<(), GridError> {
        self.remove_edge(coordinate1, start_grid_id, coordinate2, end_grid_id)?;
        self.remove_edge(coordinate2, end_grid_id, coordinate1, start_grid_id)?;
        Ok(())
    }

    /// The weight of the edge from the start vertex to the end vertex
    pub fn get_edge(
        &self,
        start: GridCoordinate,
        start_grid_id: GridId,
        end: GridCoordinate,
        end_grid_id: GridId,
    ) -> Result<f64, GridError> {
        let direction = self.resolve_direction(start, start_grid_id, end, end_grid_id)?;

        let start_vertex = self
            .vertex(VertexKey::new(start, start_grid_id))
            .ok_or(GridError::VertexNotFound(start))?;

        start_vertex
            .connection(direction)
            .map(|edge| edge.cost)
            .ok_or(GridError::MissingConnection {
                coordinate: start,
                direction,
            })
    }

    /// Remove a vertex, severing every edge between it and its neighbors
    /// The severs are attempted independently, best effort: one failing does
    /// not roll back the others, and the vertex is removed regardless, so no
    /// neighbor is left holding an edge to it
    pub fn remove_vertex(
        &mut self,
        grid_id: GridId,
        coordinate: GridCoordinate,
    ) -> Result<(), GridError> {
        let grid = self
            .grids
            .get(&grid_id)
            .ok_or(GridError::GridNotFound(grid_id))?;
        let vertex = grid
            .vertex(coordinate)
            .ok_or(GridError::VertexNotFound(coordinate))?;

        // follow each outgoing edge to its stored destination, which is
        // correct even for neighbors in other instances
        let neighbors: Vec<VertexKey> = vertex.connections().map(|(_, edge)| edge.to).collect();
        for neighbor in neighbors {
            let _ = self.remove_double_edge(
                coordinate,
                grid_id,
                neighbor.coordinate,
                neighbor.grid_id,
            );
        }

        let grid = self
            .grids
            .get_mut(&grid_id)
            .ok_or(GridError::GridNotFound(grid_id))?;
        grid.remove(coordinate);
        Ok(())
    }

    /// Find the shortest path from the start vertex to the end vertex
    /// Returns the vertices on the path, start and end inclusive, or None
    /// when the two lie in disconnected components; fails only when either
    /// endpoint vertex does not exist
    pub fn find_shortest_path(
        &self,
        start: GridCoordinate,
        start_grid_id: GridId,
        end: GridCoordinate,
        end_grid_id: GridId,
    ) -> Result<Option<Vec<VertexKey>>, GridError> {
        let start_key = VertexKey::new(start, start_grid_id);
        let end_key = VertexKey::new(end, end_grid_id);

        if self.vertex(start_key).is_none() {
            return Err(GridError::VertexNotFound(start));
        }
        if self.vertex(end_key).is_none() {
            return Err(GridError::VertexNotFound(end));
        }

        a_star::find_path(self, start_key, end_key)
    }
}
