//! A* Algorithm over one or more grid instances
//! https://en.wikipedia.org/wiki/A*_search_algorithm
//!
//! Nodes are addressed by (local coordinate, grid ID) keys and compared for
//! adjacency in the shared global coordinate space; the open queue and the
//! closed set are local to each call, so searches never interfere.

use crate::collections::{FxIndexMap, PriorityQueue};
use crate::errors::GridError;
use crate::geometry::GridCoordinate;
use crate::grid::{GridData, GridRegistry, VertexKey};

/// Frontier node: a vertex key plus its g/h/f costs and the path that
/// reached it (start vertex first)
#[derive(Clone, Debug)]
struct PathNode {
    key: VertexKey,
    g_cost: f64, // cost from the start vertex
    h_cost: f64, // heuristic estimate to the goal
    f_cost: f64, // g + h
    path: Vec<VertexKey>,
}

impl PathNode {
    fn new(key: VertexKey, g_cost: f64, h_cost: f64, path: Vec<VertexKey>) -> Self {
        Self {
            key,
            g_cost,
            h_cost,
            f_cost: g_cost + h_cost,
            path,
        }
    }
}

/// Frontier nodes are the same node iff they wrap the same vertex,
/// regardless of cost, so open-queue lookups find an already-open vertex
impl PartialEq for PathNode {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

/// Find the shortest path from start to end
/// Returns None when the open queue empties before the goal is reached;
/// [`GridRegistry::find_shortest_path`] is the usual entry point and checks
/// both endpoints up front
pub fn find_path<T: GridData>(
    registry: &GridRegistry<T>,
    start: VertexKey,
    end: VertexKey,
) -> Result<Option<Vec<VertexKey>>, GridError> {
    let end_global = registry.global_coordinate(end)?;
    let start_global = registry.global_coordinate(start)?;

    // open list: frontier nodes ordered by -f_cost so the smallest f pops first
    let mut open: PriorityQueue<PathNode> = PriorityQueue::new();
    // closed list: finalized vertices keyed by global coordinate, never re-expanded
    let mut closed: FxIndexMap<GridCoordinate, VertexKey> = FxIndexMap::default();

    let mut current = PathNode::new(
        start,
        0.0,
        start_global.distance(end_global),
        vec![start],
    );
    expand(registry, &current, end_global, &mut open, &closed)?;

    while current.key != end {
        // finalize the current vertex under its global coordinate
        let current_global = registry.global_coordinate(current.key)?;
        closed.insert(current_global, current.key);

        let Some(next) = open.pop() else {
            // frontier exhausted without reaching the goal
            return Ok(None);
        };
        current = next;

        expand(registry, &current, end_global, &mut open, &closed)?;
    }

    Ok(Some(current.path))
}

/// Relax every present edge of the current vertex into the open queue
fn expand<T: GridData>(
    registry: &GridRegistry<T>,
    current: &PathNode,
    end_global: GridCoordinate,
    open: &mut PriorityQueue<PathNode>,
    closed: &FxIndexMap<GridCoordinate, VertexKey>,
) -> Result<(), GridError> {
    let vertex = registry
        .vertex(current.key)
        .ok_or(GridError::VertexNotFound(current.key.coordinate))?;

    for (_, edge) in vertex.connections() {
        let to_global = registry.global_coordinate(edge.to)?;
        if closed.contains_key(&to_global) {
            continue;
        }
        let to_vertex = registry
            .vertex(edge.to)
            .ok_or(GridError::VertexNotFound(edge.to.coordinate))?;

        // entering a vertex costs the edge weight plus the vertex's own cost
        let g_cost = current.g_cost + edge.cost + to_vertex.cost();
        let h_cost = to_global.distance(end_global);

        // each frontier branch owns its path, copied from the parent
        let mut path = current.path.clone();
        path.push(edge.to);
        let candidate = PathNode::new(edge.to, g_cost, h_cost, path);

        let mut already_open = false;
        let mut improved = false;
        if let Some(existing) = open.get_mut(&candidate) {
            already_open = true;
            // replace the open entry only when the new route is strictly better
            if candidate.f_cost < existing.f_cost {
                existing.g_cost = candidate.g_cost;
                existing.h_cost = candidate.h_cost;
                existing.f_cost = candidate.f_cost;
                existing.path = candidate.path.clone();
                improved = true;
            }
        }

        if !already_open {
            let priority = -candidate.f_cost;
            open.push(candidate, priority);
        } else if improved {
            open.change_priority(&candidate, -candidate.f_cost);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::SquareGridSystem;

    fn single_grid(id: i32, offset: GridCoordinate) -> GridRegistry<()> {
        let mut registry = GridRegistry::new();
        registry.register(SquareGridSystem::new(id, offset)).unwrap();
        registry
    }

    fn add_vertex(registry: &mut GridRegistry<()>, id: i32, x: i32, y: i32, cost: f64) {
        registry
            .grid_mut(id)
            .unwrap()
            .add_vertex(GridCoordinate::new(x, y), cost, ())
            .unwrap();
    }

    fn key(x: i32, y: i32, id: i32) -> VertexKey {
        VertexKey::new(GridCoordinate::new(x, y), id)
    }

    // Cumulative path cost: edge weight + destination vertex cost per hop,
    // the start vertex's own cost excluded
    fn path_cost(registry: &GridRegistry<()>, path: &[VertexKey]) -> f64 {
        path.windows(2)
            .map(|pair| {
                let edge = registry
                    .get_edge(
                        pair[0].coordinate,
                        pair[0].grid_id,
                        pair[1].coordinate,
                        pair[1].grid_id,
                    )
                    .unwrap();
                edge + registry.vertex(pair[1]).unwrap().cost()
            })
            .sum()
    }

    #[test]
    fn test_single_hop_path() {
        let mut registry = single_grid(1, GridCoordinate::new(0, 0));
        add_vertex(&mut registry, 1, 0, 0, 0.0);
        add_vertex(&mut registry, 1, 1, 0, 0.0);
        registry
            .set_double_edge(GridCoordinate::new(0, 0), 1, GridCoordinate::new(1, 0), 1, 10.0)
            .unwrap();

        let path = registry
            .find_shortest_path(GridCoordinate::new(0, 0), 1, GridCoordinate::new(1, 0), 1)
            .unwrap()
            .unwrap();
        assert_eq!(path, vec![key(0, 0, 1), key(1, 0, 1)]);
    }

    #[test]
    fn test_three_vertex_line() {
        let mut registry = single_grid(1, GridCoordinate::new(0, 0));
        for x in 0..3 {
            add_vertex(&mut registry, 1, x, 0, 0.0);
        }
        for x in 0..2 {
            registry
                .set_double_edge(
                    GridCoordinate::new(x, 0),
                    1,
                    GridCoordinate::new(x + 1, 0),
                    1,
                    1.0,
                )
                .unwrap();
        }

        let path = registry
            .find_shortest_path(GridCoordinate::new(0, 0), 1, GridCoordinate::new(2, 0), 1)
            .unwrap()
            .unwrap();
        assert_eq!(path, vec![key(0, 0, 1), key(1, 0, 1), key(2, 0, 1)]);
        assert_eq!(path_cost(&registry, &path), 2.0);
    }

    #[test]
    fn test_start_equals_end_returns_single_vertex() {
        let mut registry = single_grid(1, GridCoordinate::new(0, 0));
        add_vertex(&mut registry, 1, 0, 0, 3.0);

        let path = registry
            .find_shortest_path(GridCoordinate::new(0, 0), 1, GridCoordinate::new(0, 0), 1)
            .unwrap()
            .unwrap();
        assert_eq!(path, vec![key(0, 0, 1)]);
    }

    #[test]
    fn test_no_path_between_disconnected_components() {
        let mut registry = single_grid(1, GridCoordinate::new(0, 0));
        add_vertex(&mut registry, 1, 0, 0, 0.0);
        add_vertex(&mut registry, 1, 1, 0, 0.0);
        add_vertex(&mut registry, 1, 3, 0, 0.0);
        registry
            .set_double_edge(GridCoordinate::new(0, 0), 1, GridCoordinate::new(1, 0), 1, 1.0)
            .unwrap();
        // (3,0) has no edges at all

        let result = registry
            .find_shortest_path(GridCoordinate::new(0, 0), 1, GridCoordinate::new(3, 0), 1)
            .unwrap();
        assert_eq!(result, None);
    }

    #[test]
    fn test_missing_endpoint_is_an_error() {
        let mut registry = single_grid(1, GridCoordinate::new(0, 0));
        add_vertex(&mut registry, 1, 0, 0, 0.0);

        let result = registry.find_shortest_path(
            GridCoordinate::new(0, 0),
            1,
            GridCoordinate::new(5, 5),
            1,
        );
        assert_eq!(
            result,
            Err(GridError::VertexNotFound(GridCoordinate::new(5, 5)))
        );
    }

    #[test]
    fn test_prefers_cheap_detour_over_expensive_direct_route() {
        let mut registry = single_grid(1, GridCoordinate::new(0, 0));
        add_vertex(&mut registry, 1, 0, 0, 0.0);
        add_vertex(&mut registry, 1, 1, 0, 0.0);
        add_vertex(&mut registry, 1, 1, 1, 0.0);
        add_vertex(&mut registry, 1, 2, 0, 0.0);

        // straight line is expensive, the diagonal detour is cheap
        let a = GridCoordinate::new(0, 0);
        let b = GridCoordinate::new(1, 0);
        let c = GridCoordinate::new(1, 1);
        let goal = GridCoordinate::new(2, 0);
        registry.set_double_edge(a, 1, b, 1, 10.0).unwrap();
        registry.set_double_edge(b, 1, goal, 1, 10.0).unwrap();
        registry.set_double_edge(a, 1, c, 1, 1.0).unwrap();
        registry.set_double_edge(c, 1, goal, 1, 1.0).unwrap();

        let path = registry
            .find_shortest_path(a, 1, goal, 1)
            .unwrap()
            .unwrap();
        assert_eq!(path, vec![key(0, 0, 1), key(1, 1, 1), key(2, 0, 1)]);
        assert_eq!(path_cost(&registry, &path), 2.0);
    }

    #[test]
    fn test_vertex_cost_is_charged_on_entry() {
        let mut registry = single_grid(1, GridCoordinate::new(0, 0));
        add_vertex(&mut registry, 1, 0, 0, 0.0);
        add_vertex(&mut registry, 1, 1, 0, 5.0); // expensive to stand on
        add_vertex(&mut registry, 1, 1, 1, 0.0);
        add_vertex(&mut registry, 1, 2, 0, 0.0);

        let a = GridCoordinate::new(0, 0);
        let b = GridCoordinate::new(1, 0);
        let c = GridCoordinate::new(1, 1);
        let goal = GridCoordinate::new(2, 0);
        // identical edge weights on both routes; only the vertex cost differs
        registry.set_double_edge(a, 1, b, 1, 1.0).unwrap();
        registry.set_double_edge(b, 1, goal, 1, 1.0).unwrap();
        registry.set_double_edge(a, 1, c, 1, 1.0).unwrap();
        registry.set_double_edge(c, 1, goal, 1, 1.0).unwrap();

        let path = registry
            .find_shortest_path(a, 1, goal, 1)
            .unwrap()
            .unwrap();
        assert_eq!(path, vec![key(0, 0, 1), key(1, 1, 1), key(2, 0, 1)]);
    }

    #[test]
    fn test_relaxation_updates_an_already_open_node() {
        let mut registry = single_grid(1, GridCoordinate::new(0, 0));
        add_vertex(&mut registry, 1, 0, 0, 0.0);
        add_vertex(&mut registry, 1, 1, 0, 0.0);
        add_vertex(&mut registry, 1, 1, 1, 0.0);

        let start = GridCoordinate::new(0, 0);
        let mid = GridCoordinate::new(1, 0);
        let goal = GridCoordinate::new(1, 1);
        // the goal enters the open queue via the expensive diagonal first,
        // then gets relaxed through the cheap two-step route
        registry.set_double_edge(start, 1, goal, 1, 10.0).unwrap();
        registry.set_double_edge(start, 1, mid, 1, 1.0).unwrap();
        registry.set_double_edge(mid, 1, goal, 1, 1.0).unwrap();

        let path = registry
            .find_shortest_path(start, 1, goal, 1)
            .unwrap()
            .unwrap();
        assert_eq!(path, vec![key(0, 0, 1), key(1, 0, 1), key(1, 1, 1)]);
        assert_eq!(path_cost(&registry, &path), 2.0);
    }

    #[test]
    fn test_path_spans_multiple_grid_instances() {
        let mut registry = single_grid(1, GridCoordinate::new(0, 0));
        registry
            .register(SquareGridSystem::new(2, GridCoordinate::new(1, 0)))
            .unwrap();
        add_vertex(&mut registry, 1, 0, 0, 0.0);
        add_vertex(&mut registry, 2, 0, 0, 0.0);
        add_vertex(&mut registry, 2, 1, 0, 0.0);

        let origin = GridCoordinate::new(0, 0);
        registry.set_double_edge(origin, 1, origin, 2, 1.0).unwrap();
        registry
            .set_double_edge(origin, 2, GridCoordinate::new(1, 0), 2, 1.0)
            .unwrap();

        let path = registry
            .find_shortest_path(origin, 1, GridCoordinate::new(1, 0), 2)
            .unwrap()
            .unwrap();
        assert_eq!(path, vec![key(0, 0, 1), key(0, 0, 2), key(1, 0, 2)]);
        assert_eq!(path_cost(&registry, &path), 2.0);
    }
}
