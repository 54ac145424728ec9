//! ArtWeave - compare two artworks and draw how they connect.
//!
//! A comparison is generated asynchronously by a remote service. This crate
//! polls that job, turns whatever diagram payload it produces into one
//! canonical graph, lays the graph out deterministically and renders it.
//! A malformed or missing diagram never fails a comparison; it degrades to a
//! fixed fallback graph.

pub mod client;
pub mod config;
pub mod export;
pub mod fallback;
pub mod layout;
pub mod normalize;
pub mod summary;

mod error;

pub use artweave_core::{anchor, category, color, diagram, geometry, label};

pub use error::ArtweaveError;

use log::{debug, info, warn};
use serde_json::Value;

use artweave_core::{anchor::ArtworkAnchors, diagram::DiagramPayload};

use config::LayoutConfig;
use export::Exporter;
use layout::LayoutEngine;

/// Builder for normalizing, laying out and rendering comparison diagrams.
///
/// # Examples
///
/// ```
/// use artweave::{DiagramBuilder, anchor::ArtworkAnchors, config::LayoutConfig};
/// use serde_json::json;
///
/// let builder = DiagramBuilder::new(LayoutConfig::default());
///
/// let raw = json!({
///     "nodes": [
///         {"id": "artworkA", "type": "artwork", "label": "A", "level": 0},
///         {"id": "artworkB", "type": "artwork", "label": "B", "level": 0},
///         {"id": "L1", "type": "niche_connection", "label": "Shared river", "level": 1}
///     ],
///     "edges": [
///         {"id": "e1", "source": "artworkA", "target": "L1", "kind": "direct"},
///         {"id": "e2", "source": "artworkB", "target": "L1", "kind": "direct"}
///     ]
/// });
/// let diagram = builder.build(Some(&raw)).expect("canonical payload");
/// assert!(diagram.nodes.iter().all(|node| node.position().is_some()));
///
/// // Anything unusable falls back to the fixed three-node graph.
/// let fallback = builder.build_or_fallback(None, &ArtworkAnchors::default());
/// assert_eq!(fallback.nodes.len(), 3);
/// ```
pub struct DiagramBuilder {
    layout: LayoutEngine,
}

impl Default for DiagramBuilder {
    fn default() -> Self {
        Self::new(LayoutConfig::default())
    }
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given layout constants.
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            layout: LayoutEngine::new(config),
        }
    }

    /// Create a diagram builder around a custom layout engine.
    pub fn with_layout_engine(layout: LayoutEngine) -> Self {
        Self { layout }
    }

    pub fn layout_config(&self) -> &LayoutConfig {
        self.layout.config()
    }

    /// Normalize and lay out a raw producer payload.
    ///
    /// Returns `None` when the payload is missing, unrecognised or has no
    /// nodes. Edges with a missing endpoint are dropped from the result.
    pub fn build(&self, raw: Option<&Value>) -> Option<DiagramPayload> {
        let payload = normalize::normalize(raw)?;
        if payload.is_empty() {
            debug!("Normalized diagram has no nodes");
            return None;
        }

        let edges = layout::connected_edges(&payload.nodes, &payload.edges);
        let nodes = self.layout.layout(&payload.nodes, &edges);
        info!(nodes = nodes.len(), edges = edges.len(); "Diagram laid out");

        Some(DiagramPayload {
            nodes,
            edges,
            layout: payload.layout,
        })
    }

    /// Like [`build`](Self::build), but substitutes the fallback graph for
    /// anything unusable.
    pub fn build_or_fallback(
        &self,
        raw: Option<&Value>,
        anchors: &ArtworkAnchors,
    ) -> DiagramPayload {
        self.build(raw).unwrap_or_else(|| {
            warn!("Diagram payload unusable, using fallback graph");
            fallback::fallback_diagram_with(anchors, self.layout.config())
        })
    }

    /// Render a laid-out diagram to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns `ArtweaveError::Export` if the diagram has no coordinates.
    pub fn render_svg(&self, diagram: &DiagramPayload) -> Result<String, ArtweaveError> {
        let doc = export::svg::Svg::new(self.layout.config().clone()).render(diagram)?;
        info!("SVG rendered successfully");
        Ok(doc.to_string())
    }

    /// Render a diagram as an indented text outline.
    pub fn render_outline(&self, diagram: &DiagramPayload) -> String {
        export::outline::Outline.render(diagram)
    }

    /// Returns the exporter for `format`.
    pub fn exporter(&self, format: ExportFormat) -> Box<dyn Exporter> {
        match format {
            ExportFormat::Svg => Box::new(export::svg::Svg::new(self.layout.config().clone())),
            ExportFormat::Json => Box::new(export::Json),
            ExportFormat::Outline => Box::new(export::outline::Outline),
        }
    }
}

/// Output formats supported by [`DiagramBuilder::exporter`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Svg,
    Json,
    Outline,
}
