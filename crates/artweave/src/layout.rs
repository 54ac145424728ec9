//! Deterministic diagram layout.
//!
//! Layout runs in three steps:
//!
//! 1. A layered baseline engine assigns an initial x to every node over the
//!    connected edges.
//! 2. Rows are recomputed from node levels. Anchors and the central node sit
//!    on row 0; everything else sits on `max(1, level - 1)`.
//! 3. The anchors are pinned to the canvas edges and the central node is
//!    centered between them.
//!
//! The result keeps the input node order.

mod engines;

pub use engines::{GridEngine, LayeredEngine, LayeredGraph, SugiyamaEngine};

use std::collections::HashSet;

use indexmap::{IndexMap, IndexSet};
use log::debug;

use artweave_core::{
    diagram::{ARTWORK_A_ID, ARTWORK_B_ID, DiagramEdge, DiagramNode, NodeType},
    geometry::{Point, Size},
};

use crate::config::LayoutConfig;

/// Lays out canonical nodes and edges.
pub struct LayoutEngine {
    config: LayoutConfig,
    layered: Box<dyn LayeredEngine>,
}

impl LayoutEngine {
    /// Creates a layout engine backed by the Sugiyama baseline.
    pub fn new(config: LayoutConfig) -> Self {
        let layered = Box::new(SugiyamaEngine::new(
            config.horizontal_spacing(),
            config.vertical_spacing(),
        ));
        Self { config, layered }
    }

    /// Replaces the baseline engine.
    pub fn with_layered_engine(mut self, layered: impl LayeredEngine + 'static) -> Self {
        self.layered = Box::new(layered);
        self
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Returns the footprint used for `node`.
    pub fn node_size(&self, node: &DiagramNode) -> Size {
        node_size(&self.config, node)
    }

    /// Computes coordinates for every node.
    ///
    /// Edges with a missing endpoint are ignored. Duplicate node ids resolve
    /// to their first occurrence.
    pub fn layout(&self, nodes: &[DiagramNode], edges: &[DiagramEdge]) -> Vec<DiagramNode> {
        if nodes.is_empty() {
            return Vec::new();
        }

        let mut index: IndexMap<&str, usize> = IndexMap::with_capacity(nodes.len());
        for (i, node) in nodes.iter().enumerate() {
            index.entry(node.id.as_str()).or_insert(i);
        }

        let mut pairs = IndexSet::new();
        for edge in edges {
            if let (Some(&source), Some(&target)) = (
                index.get(edge.source.as_str()),
                index.get(edge.target.as_str()),
            ) {
                if source != target {
                    pairs.insert((source as u32, target as u32));
                }
            }
        }

        let sizes = nodes.iter().map(|node| self.node_size(node)).collect();
        let graph = LayeredGraph::new(sizes, pairs.into_iter().collect());
        debug!(nodes = graph.node_count(), edges = graph.edges().len(); "Computing baseline layout");
        let baseline = self.layered.positions(&graph);

        let central = nodes.iter().position(DiagramNode::is_central_candidate);
        let mut laid_out: Vec<DiagramNode> = nodes
            .iter()
            .enumerate()
            .map(|(i, node)| {
                let x = baseline.get(i).map_or(0.0, |point| point.x());
                let row = Self::row(node, central == Some(i));
                let y = self.config.top_row_y() + row as f32 * self.config.row_spacing();
                node.clone().with_position(Point::new(self.config.padding() + x, y))
            })
            .collect();

        self.pin(&mut laid_out, central);
        laid_out
    }

    fn row(node: &DiagramNode, is_central: bool) -> u32 {
        if node.is_anchor() || is_central {
            0
        } else {
            node.level.saturating_sub(1).max(1)
        }
    }

    fn pin(&self, nodes: &mut [DiagramNode], central: Option<usize>) {
        let padding = self.config.padding();
        let mut a_x = None;
        let mut b_x = None;
        for node in nodes.iter_mut() {
            let x = match node.id.as_str() {
                ARTWORK_A_ID => padding,
                ARTWORK_B_ID => self.config.canvas_width() - self.node_size(node).width() - padding,
                _ => continue,
            };
            node.x = Some(x);
            if node.id == ARTWORK_A_ID {
                a_x.get_or_insert(x);
            } else {
                b_x.get_or_insert(x);
            }
        }

        if let (Some(i), Some(a_x), Some(b_x)) = (central, a_x, b_x) {
            let width = self.node_size(&nodes[i]).width();
            nodes[i].x = Some((a_x + b_x) / 2.0 - width / 2.0);
        }
    }
}

/// Footprint of `node`: artwork cards are larger than category boxes.
pub fn node_size(config: &LayoutConfig, node: &DiagramNode) -> Size {
    if node.is_anchor() || node.node_type == NodeType::Artwork {
        config.artwork_size()
    } else {
        config.category_size()
    }
}

/// Lays out `nodes` with the default configuration.
pub fn layout(nodes: &[DiagramNode], edges: &[DiagramEdge]) -> Vec<DiagramNode> {
    LayoutEngine::new(LayoutConfig::default()).layout(nodes, edges)
}

/// Returns the edges whose endpoints both exist in `nodes`.
pub fn connected_edges(nodes: &[DiagramNode], edges: &[DiagramEdge]) -> Vec<DiagramEdge> {
    let ids: HashSet<&str> = nodes.iter().map(|node| node.id.as_str()).collect();
    edges
        .iter()
        .filter(|edge| ids.contains(edge.source.as_str()) && ids.contains(edge.target.as_str()))
        .cloned()
        .collect()
}
