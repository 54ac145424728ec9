//! Sugiyama baseline engine.
//!
//! Wraps `rust_sugiyama`, which returns one layout per weakly connected
//! component. Components are placed side by side in order of their smallest
//! node index; nodes without edges are appended on the first rank. When the
//! crate panics or yields nothing, the grid engine takes over.

use std::{collections::BTreeMap, panic};

use log::{debug, warn};
use rust_sugiyama::configure::Config;

use artweave_core::geometry::Point;

use super::{GridEngine, LayeredEngine, LayeredGraph, orient_ranks};

/// Raw coordinates of one node inside a component layout.
struct Placed {
    node: usize,
    x: f32,
    y: f32,
}

/// The Sugiyama baseline engine
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

    fn fallback(&self, graph: &LayeredGraph) -> Vec<Point> {
        GridEngine::new(self.horizontal_spacing, self.vertical_spacing).positions(graph)
    }

    /// Runs `rust_sugiyama`, returning placed nodes grouped by component.
    fn run(&self, graph: &LayeredGraph) -> Result<Vec<Vec<Placed>>, String> {
        let edges = graph.edges().to_vec();
        let layouts = panic::catch_unwind(move || {
            let config = Config {
                minimum_length: 1,
                vertex_spacing: 1.0,
                ..Default::default()
            };
            rust_sugiyama::from_edges(&edges, &config)
        });

        match layouts {
            Ok(results) if !results.is_empty() => {
                let components = results
                    .iter()
                    .map(|(coords, _, _)| {
                        coords
                            .iter()
                            .filter(|&&(id, _)| id < graph.node_count())
                            .map(|&(id, (x, y))| Placed {
                                node: id,
                                x: x as f32,
                                y: y as f32,
                            })
                            .collect::<Vec<_>>()
                    })
                    .filter(|component| !component.is_empty())
                    .collect::<Vec<_>>();
                if components.is_empty() {
                    Err("rust-sugiyama positions did not map to any node".to_string())
                } else {
                    Ok(components)
                }
            }
            Ok(_) => Err("rust-sugiyama returned empty layout results".to_string()),
            Err(err) => Err(match err.downcast_ref::<String>() {
                Some(message) => format!("rust-sugiyama panicked: {message}"),
                None => "rust-sugiyama panicked with unknown error".to_string(),
            }),
        }
    }
}

impl LayeredEngine for Engine {
    fn positions(&self, graph: &LayeredGraph) -> Vec<Point> {
        if graph.edges().is_empty() {
            debug!(nodes = graph.node_count(); "Graph has no edges, using grid baseline");
            return self.fallback(graph);
        }

        debug!(
            nodes = graph.node_count(),
            edges = graph.edges().len();
            "Applying Sugiyama algorithm",
        );
        let mut components = match self.run(graph) {
            Ok(components) => components,
            Err(message) => {
                warn!(reason = message.as_str(); "Sugiyama layout failed, using grid baseline");
                return self.fallback(graph);
            }
        };
        components.sort_by_key(|component| component.iter().map(|p| p.node).min());

        let cell = graph.cell_size();
        let pitch_x = cell.width() + self.horizontal_spacing;
        let pitch_y = cell.height() + self.vertical_spacing;

        // Distinct raw y values become ranks.
        let mut levels: Vec<f32> = components.iter().flatten().map(|p| p.y).collect();
        levels.sort_by(f32::total_cmp);
        levels.dedup_by(|a, b| (*a - *b).abs() < 1e-3);
        let rank_of = |y: f32| {
            levels
                .iter()
                .position(|level| (level - y).abs() < 1e-3)
                .unwrap_or(0)
        };

        let mut columns: Vec<Option<f32>> = vec![None; graph.node_count()];
        let mut ranks = vec![0usize; graph.node_count()];
        let mut offset = 0.0_f32;
        for component in &components {
            let min_x = component.iter().map(|p| p.x).fold(f32::INFINITY, f32::min);
            let max_x = component.iter().map(|p| p.x).fold(f32::NEG_INFINITY, f32::max);
            for placed in component {
                columns[placed.node] = Some(offset + (placed.x - min_x));
                ranks[placed.node] = rank_of(placed.y);
            }
            offset += (max_x - min_x).round() + 1.0;
        }
        orient_ranks(&mut ranks, graph.edges());

        // Nodes the crate never saw have no edges; they trail on rank 0.
        let mut lonely = BTreeMap::new();
        for (node, column) in columns.iter_mut().enumerate() {
            if column.is_none() {
                *column = Some(offset);
                lonely.insert(node, offset);
                offset += 1.0;
            }
        }
        if !lonely.is_empty() {
            debug!(count = lonely.len(); "Appended nodes without edges");
        }

        columns
            .into_iter()
            .zip(ranks)
            .map(|(column, rank)| {
                Point::new(
                    column.unwrap_or_default() * pitch_x,
                    rank as f32 * pitch_y,
                )
            })
            .collect()
    }
}
