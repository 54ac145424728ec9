//! Longest-path grid engine.
//!
//! Ranks every node by the longest path from a source and lines nodes up in
//! input order within their rank. Used when the Sugiyama engine cannot
//! produce a layout; cyclic graphs collapse into a single rank.

use log::debug;
use petgraph::{algo::toposort, graph::DiGraph};

use artweave_core::geometry::Point;

use super::{LayeredEngine, LayeredGraph};

/// The grid baseline engine
pub struct Engine {
    horizontal_spacing: f32,
    vertical_spacing: f32,
}

impl Engine {
    pub fn new(horizontal_spacing: f32, vertical_spacing: f32) -> Self {
        Self {
            horizontal_spacing,
            vertical_spacing,
        }
    }

    fn ranks(&self, graph: &LayeredGraph) -> Vec<usize> {
        let mut digraph = DiGraph::<(), ()>::with_capacity(graph.node_count(), graph.edges().len());
        let indices: Vec<_> = (0..graph.node_count())
            .map(|_| digraph.add_node(()))
            .collect();
        for &(source, target) in graph.edges() {
            digraph.add_edge(indices[source as usize], indices[target as usize], ());
        }

        let mut ranks = vec![0usize; graph.node_count()];
        match toposort(&digraph, None) {
            Ok(order) => {
                for node in order {
                    let rank = ranks[node.index()];
                    for next in digraph.neighbors(node) {
                        ranks[next.index()] = ranks[next.index()].max(rank + 1);
                    }
                }
            }
            Err(cycle) => {
                debug!(node = cycle.node_id().index(); "Graph has a cycle, using a single rank");
            }
        }
        ranks
    }
}

impl LayeredEngine for Engine {
    fn positions(&self, graph: &LayeredGraph) -> Vec<Point> {
        let cell = graph.cell_size();
        let pitch_x = cell.width() + self.horizontal_spacing;
        let pitch_y = cell.height() + self.vertical_spacing;

        let ranks = self.ranks(graph);
        let mut next_column = vec![0usize; ranks.iter().copied().max().map_or(0, |r| r + 1)];

        ranks
            .iter()
            .map(|&rank| {
                let column = next_column[rank];
                next_column[rank] += 1;
                Point::new(column as f32 * pitch_x, rank as f32 * pitch_y)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use artweave_core::geometry::Size;

    fn graph(nodes: usize, edges: Vec<(u32, u32)>) -> LayeredGraph {
        LayeredGraph::new(vec![Size::new(100.0, 50.0); nodes], edges)
    }

    #[test]
    fn test_longest_path_ranks() {
        let engine = Engine::new(20.0, 30.0);
        let positions = engine.positions(&graph(4, vec![(0, 1), (1, 2), (0, 2), (0, 3)]));

        assert_approx_eq!(f32, positions[0].y(), 0.0);
        assert_approx_eq!(f32, positions[1].y(), 80.0);
        assert_approx_eq!(f32, positions[2].y(), 160.0);
        assert_approx_eq!(f32, positions[3].y(), 80.0);
        // Second node in rank 1 moves one column to the right.
        assert_approx_eq!(f32, positions[3].x(), 120.0);
    }

    #[test]
    fn test_cycle_collapses_to_one_rank() {
        let engine = Engine::new(20.0, 30.0);
        let positions = engine.positions(&graph(3, vec![(0, 1), (1, 2), (2, 0)]));

        assert!(positions.iter().all(|p| p.y() == 0.0));
        assert_approx_eq!(f32, positions[2].x(), 240.0);
    }

    #[test]
    fn test_empty_graph() {
        let engine = Engine::new(20.0, 30.0);
        assert!(engine.positions(&graph(0, Vec::new())).is_empty());
    }
}
