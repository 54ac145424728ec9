//! Layered baseline engines
//!
//! The layout engine only needs one capability from a layered-layout
//! implementation: given node footprints and directed edges, produce an
//! initial top-left position per node. [`LayeredEngine`] is that seam.

mod grid;
mod sugiyama;

pub use grid::Engine as GridEngine;
pub use sugiyama::Engine as SugiyamaEngine;

use artweave_core::geometry::{Point, Size};

/// Input of a layered baseline: node footprints in input order plus edges
/// between node indices. Edges are deduplicated and contain no self-loops.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayeredGraph {
    sizes: Vec<Size>,
    edges: Vec<(u32, u32)>,
}

impl LayeredGraph {
    pub fn new(sizes: Vec<Size>, edges: Vec<(u32, u32)>) -> Self {
        Self { sizes, edges }
    }

    /// Node footprints, indexed like the input nodes.
    pub fn sizes(&self) -> &[Size] {
        &self.sizes
    }

    pub fn edges(&self) -> &[(u32, u32)] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.sizes.len()
    }

    /// The largest footprint; every column and rank is this big.
    pub fn cell_size(&self) -> Size {
        self.sizes
            .iter()
            .copied()
            .fold(Size::default(), |acc, size| acc.max(size))
    }
}

/// Trait defining the interface for layered baseline engines.
///
/// Implementations must be deterministic and return exactly one position per
/// node, in input order.
pub trait LayeredEngine: Send + Sync {
    fn positions(&self, graph: &LayeredGraph) -> Vec<Point>;
}

/// Flips rank numbers when most edges point upwards, so sources sit on top.
fn orient_ranks(ranks: &mut [usize], edges: &[(u32, u32)]) {
    let (mut down, mut up) = (0usize, 0usize);
    for &(source, target) in edges {
        let (s, t) = (ranks[source as usize], ranks[target as usize]);
        if s < t {
            down += 1;
        } else if s > t {
            up += 1;
        }
    }
    if up > down {
        let max_rank = ranks.iter().copied().max().unwrap_or(0);
        for rank in ranks.iter_mut() {
            *rank = max_rank - *rank;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_size_is_largest_footprint() {
        let graph = LayeredGraph::new(
            vec![Size::new(220.0, 250.0), Size::new(200.0, 90.0)],
            Vec::new(),
        );
        assert_eq!(graph.cell_size(), Size::new(220.0, 250.0));
    }

    #[test]
    fn test_orient_ranks_flips_upward_graphs() {
        let mut ranks = vec![2, 1, 0];
        orient_ranks(&mut ranks, &[(0, 1), (1, 2)]);
        assert_eq!(ranks, [0, 1, 2]);

        let mut ranks = vec![0, 1, 2];
        orient_ranks(&mut ranks, &[(0, 1), (1, 2)]);
        assert_eq!(ranks, [0, 1, 2]);
    }
}
