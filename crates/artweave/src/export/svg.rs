//! SVG rendering of laid-out diagrams.
//!
//! Anchors are drawn as white artwork cards, every other node as a rounded
//! box coloured by its category. Edges are straight arrows between node
//! centres; the stroke pattern encodes the edge kind.

use std::io::Write;

use log::debug;
use svg::{
    Document,
    node::{Text as SvgText, element as svg_element},
};

use artweave_core::{
    category::classify,
    color::Color,
    diagram::{DiagramEdge, DiagramNode, DiagramPayload, EdgeKind},
    geometry::{Point, Size},
    label::truncate_label,
};

use super::{Error, Exporter};
use crate::{config::LayoutConfig, layout::node_size};

const FONT_FAMILY: &str = "Inter, Helvetica, Arial, sans-serif";
const FONT_SIZE: f32 = 14.0;
const LINE_HEIGHT: f32 = 18.0;
const EDGE_LABEL_FONT_SIZE: f32 = 12.0;
const EDGE_COLOR: &str = "#6b7280";
const CARD_FILL: &str = "#ffffff";
const CARD_BORDER: &str = "#111827";
const MARKER_ID: &str = "arrow-right";

/// SVG export backend.
#[derive(Debug, Clone, Default)]
pub struct Svg {
    config: LayoutConfig,
}

impl Svg {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    /// Renders `diagram` into an SVG document.
    ///
    /// Nodes without coordinates are skipped, as are edges touching them.
    pub fn render(&self, diagram: &DiagramPayload) -> Result<Document, Error> {
        let placed: Vec<(&DiagramNode, Point, Size)> = diagram
            .nodes
            .iter()
            .filter_map(|node| {
                let position = node.position()?;
                Some((node, position, node_size(&self.config, node)))
            })
            .collect();
        if placed.is_empty() && !diagram.nodes.is_empty() {
            return Err(Error::Render("diagram has not been laid out".to_string()));
        }

        let size = self.document_size(&placed);
        debug!(width = size.width(), height = size.height(); "Rendering SVG document");

        let mut doc = Document::new()
            .set("viewBox", format!("0 0 {} {}", size.width(), size.height()))
            .set("width", size.width())
            .set("height", size.height())
            .add(Self::marker_definitions());

        let mut edges = svg_element::Group::new().set("class", "edges");
        for edge in &diagram.edges {
            let source = placed.iter().find(|(node, _, _)| node.id == edge.source);
            let target = placed.iter().find(|(node, _, _)| node.id == edge.target);
            if let (Some(&(_, from, from_size)), Some(&(_, to, to_size))) = (source, target) {
                edges = edges.add(Self::render_edge(
                    edge,
                    from_size.center_from(from),
                    to_size.center_from(to),
                ));
            }
        }
        doc = doc.add(edges);

        let mut nodes = svg_element::Group::new().set("class", "nodes");
        for &(node, position, size) in &placed {
            nodes = nodes.add(Self::render_node(node, position, size)?);
        }
        Ok(doc.add(nodes))
    }

    fn document_size(&self, placed: &[(&DiagramNode, Point, Size)]) -> Size {
        let padding = self.config.padding();
        placed.iter().fold(
            Size::new(self.config.canvas_width(), 0.0),
            |acc, &(_, position, size)| {
                acc.max(Size::new(
                    position.x() + size.width() + padding,
                    position.y() + size.height() + padding,
                ))
            },
        )
    }

    fn marker_definitions() -> svg_element::Definitions {
        let marker = svg_element::Marker::new()
            .set("id", MARKER_ID)
            .set("viewBox", "0 0 10 10")
            .set("refX", 9)
            .set("refY", 5)
            .set("markerWidth", 6)
            .set("markerHeight", 6)
            .set("orient", "auto")
            .add(
                svg_element::Path::new()
                    .set("d", "M 0 0 L 10 5 L 0 10 z")
                    .set("fill", EDGE_COLOR),
            );
        svg_element::Definitions::new().add(marker)
    }

    fn dash_pattern(kind: EdgeKind) -> Option<&'static str> {
        match kind {
            EdgeKind::Direct => None,
            EdgeKind::Contextual => Some("6 4"),
            EdgeKind::Interpretive => Some("2 4"),
        }
    }

    fn render_edge(edge: &DiagramEdge, from: Point, to: Point) -> svg_element::Group {
        let mut path = svg_element::Path::new()
            .set("d", format!("M {} {} L {} {}", from.x(), from.y(), to.x(), to.y()))
            .set("fill", "none")
            .set("stroke", EDGE_COLOR)
            .set("stroke-width", 1.5)
            .set("marker-end", format!("url(#{MARKER_ID})"));
        if let Some(pattern) = Self::dash_pattern(edge.kind) {
            path = path.set("stroke-dasharray", pattern);
        }

        let mut group = svg_element::Group::new()
            .set("id", edge.id.as_str())
            .add(path);
        if let Some(label) = edge.label.as_deref().filter(|l| !l.trim().is_empty()) {
            let mid = from.midpoint(to);
            group = group.add(
                svg_element::Text::new("")
                    .set("x", mid.x())
                    .set("y", mid.y())
                    .set("text-anchor", "middle")
                    .set("font-family", FONT_FAMILY)
                    .set("font-size", EDGE_LABEL_FONT_SIZE)
                    .set("fill", EDGE_COLOR)
                    .add(SvgText::new(label)),
            );
        }
        group
    }

    fn render_node(
        node: &DiagramNode,
        position: Point,
        size: Size,
    ) -> Result<svg_element::Group, Error> {
        let (fill, border, text) = if node.is_anchor() {
            let parse = |css: &str| Color::new(css).map_err(Error::Render);
            (parse(CARD_FILL)?, parse(CARD_BORDER)?, parse(CARD_BORDER)?)
        } else {
            let palette = classify(node).palette();
            (
                palette.background_color(),
                palette.border_color(),
                palette.text_color(),
            )
        };

        let rect = svg_element::Rectangle::new()
            .set("x", position.x())
            .set("y", position.y())
            .set("width", size.width())
            .set("height", size.height())
            .set("rx", 8.0)
            .set("fill", &fill)
            .set("stroke", &border)
            .set("stroke-width", if node.is_anchor() { 2.0 } else { 1.5 });

        let label = truncate_label(&node.label);
        let lines: Vec<&str> = label.lines().collect();
        let center = size.center_from(position);
        // Anchor captions sit at the bottom of the card, category labels are centred.
        let first_baseline = if node.is_anchor() {
            position.y() + size.height() - LINE_HEIGHT * lines.len() as f32
        } else {
            center.y() - LINE_HEIGHT * (lines.len() as f32 - 1.0) / 2.0
        };

        let mut caption = svg_element::Text::new("")
            .set("x", center.x())
            .set("y", first_baseline)
            .set("text-anchor", "middle")
            .set("dominant-baseline", "central")
            .set("font-family", FONT_FAMILY)
            .set("font-size", FONT_SIZE)
            .set("fill", &text);
        for (i, line) in lines.into_iter().enumerate() {
            caption = caption.add(
                svg_element::TSpan::new("")
                    .set("x", center.x())
                    .set("dy", if i == 0 { 0.0 } else { LINE_HEIGHT })
                    .add(SvgText::new(line)),
            );
        }

        Ok(svg_element::Group::new()
            .set("id", node.id.as_str())
            .set("class", node.node_type.as_str())
            .add(rect)
            .add(caption))
    }
}

impl Exporter for Svg {
    fn export(&self, diagram: &DiagramPayload, out: &mut dyn Write) -> Result<(), Error> {
        let doc = self.render(diagram)?;
        write!(out, "{doc}")?;
        Ok(())
    }
}
