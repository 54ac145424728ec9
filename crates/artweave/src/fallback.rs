//! Fallback diagram synthesis.
//!
//! When the producer's diagram is missing, malformed or empty, the caller
//! still needs something to draw: both artwork anchors joined to a single
//! placeholder connection. Coordinates come from the layout constants, never
//! from the layout engine.

use artweave_core::{
    anchor::{AnchorSlot, ArtworkAnchors},
    diagram::{
        ARTWORK_A_ID, ARTWORK_B_ID, DiagramEdge, DiagramLayout, DiagramNode, DiagramPayload,
        EdgeKind, NodeType,
    },
    geometry::Point,
};

use crate::config::LayoutConfig;

/// Id of the synthetic connection node.
pub const PLACEHOLDER_ID: &str = "L1";

/// Label of the synthetic connection node.
pub const PLACEHOLDER_LABEL: &str = "Connection could not be structured";

/// Builds the fallback diagram with the default layout constants.
pub fn fallback_diagram(anchors: &ArtworkAnchors) -> DiagramPayload {
    fallback_diagram_with(anchors, &LayoutConfig::default())
}

/// Builds the fallback diagram: exactly three nodes and two edges.
///
/// The placeholder sits in the gap between the two anchor cards.
pub fn fallback_diagram_with(anchors: &ArtworkAnchors, config: &LayoutConfig) -> DiagramPayload {
    let top = config.top_row_y();
    let artwork_width = config.artwork_size().width();
    let left_x = config.padding();
    let right_x = config.canvas_width() - artwork_width - config.padding();
    let center_x = (left_x + artwork_width + right_x) / 2.0 - config.category_size().width() / 2.0;

    let anchor = |slot: AnchorSlot, x: f32| {
        DiagramNode::new(
            slot.node_id(),
            NodeType::Artwork,
            anchors.get(slot).card_label(slot),
            0,
        )
        .with_position(Point::new(x, top))
    };

    let nodes = vec![
        anchor(AnchorSlot::A, left_x),
        anchor(AnchorSlot::B, right_x),
        DiagramNode::new(PLACEHOLDER_ID, NodeType::NicheConnection, PLACEHOLDER_LABEL, 1)
            .with_position(Point::new(center_x, top)),
    ];
    let edges = [ARTWORK_A_ID, ARTWORK_B_ID]
        .into_iter()
        .map(|source| {
            DiagramEdge::new(
                format!("edge-{source}-{PLACEHOLDER_ID}"),
                source,
                PLACEHOLDER_ID,
                EdgeKind::Direct,
            )
        })
        .collect();

    DiagramPayload {
        nodes,
        edges,
        layout: Some(DiagramLayout::default()),
    }
}
