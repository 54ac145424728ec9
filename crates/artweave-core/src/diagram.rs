//! Canonical diagram model.
//!
//! Every producer payload shape is normalised into [`DiagramPayload`] before
//! anything downstream looks at it. Node coordinates are absent until the
//! layout engine fills them in.

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// Node id reserved for the left-hand artwork anchor.
pub const ARTWORK_A_ID: &str = "artworkA";

/// Node id reserved for the right-hand artwork anchor.
pub const ARTWORK_B_ID: &str = "artworkB";

/// Semantic type of a diagram node.
///
/// Unknown type strings coming from a producer deserialize as [`NodeType::Other`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeType {
    Artwork,
    NicheConnection,
    Artist,
    Teacher,
    Movement,
    Theme,
    Context,
    #[default]
    #[serde(other)]
    Other,
}

impl NodeType {
    /// Returns the wire name of this node type.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Artwork => "artwork",
            Self::NicheConnection => "niche_connection",
            Self::Artist => "artist",
            Self::Teacher => "teacher",
            Self::Movement => "movement",
            Self::Theme => "theme",
            Self::Context => "context",
            Self::Other => "other",
        }
    }
}

/// How strongly an edge ties its endpoints together.
///
/// Unknown kinds deserialize as [`EdgeKind::Contextual`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    Direct,
    Interpretive,
    #[default]
    #[serde(other)]
    Contextual,
}

/// A node of the canonical diagram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagramNode {
    pub id: String,
    #[serde(rename = "type", default)]
    pub node_type: NodeType,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub level: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f32>,
}

impl DiagramNode {
    /// Creates a node without coordinates.
    pub fn new(
        id: impl Into<String>,
        node_type: NodeType,
        label: impl Into<String>,
        level: u32,
    ) -> Self {
        Self {
            id: id.into(),
            node_type,
            label: label.into(),
            level,
            x: None,
            y: None,
        }
    }

    /// Sets the node's coordinates (builder style).
    pub fn with_position(mut self, position: Point) -> Self {
        self.set_position(position);
        self
    }

    /// Sets the node's coordinates.
    pub fn set_position(&mut self, position: Point) {
        self.x = Some(position.x());
        self.y = Some(position.y());
    }

    /// Returns the position if the node has been laid out.
    pub fn position(&self) -> Option<Point> {
        Some(Point::new(self.x?, self.y?))
    }

    /// Returns true for the two artwork anchor nodes.
    pub fn is_anchor(&self) -> bool {
        self.id == ARTWORK_A_ID || self.id == ARTWORK_B_ID
    }

    /// Returns true if this node may serve as the central hub between the anchors.
    pub fn is_central_candidate(&self) -> bool {
        !self.is_anchor() && (self.node_type == NodeType::NicheConnection || self.level == 1)
    }
}

/// A directed edge of the canonical diagram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagramEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub kind: EdgeKind,
    #[serde(default)]
    pub label: Option<String>,
}

impl DiagramEdge {
    /// Creates an unlabeled edge.
    pub fn new(
        id: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
        kind: EdgeKind,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            kind,
            label: None,
        }
    }

    /// Sets the edge label (builder style).
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Producer layout hint. Only top-to-bottom is ever emitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagramLayout {
    #[serde(default = "default_direction")]
    pub direction: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint_text: Option<String>,
}

fn default_direction() -> String {
    "TB".to_string()
}

impl Default for DiagramLayout {
    fn default() -> Self {
        Self {
            direction: default_direction(),
            hint_text: None,
        }
    }
}

/// The canonical `{nodes, edges, layout?}` graph consumed by layout and rendering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiagramPayload {
    pub nodes: Vec<DiagramNode>,
    pub edges: Vec<DiagramEdge>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<DiagramLayout>,
}

impl DiagramPayload {
    /// Creates a payload without a layout hint.
    pub fn new(nodes: Vec<DiagramNode>, edges: Vec<DiagramEdge>) -> Self {
        Self {
            nodes,
            edges,
            layout: None,
        }
    }

    /// Looks up a node by id.
    pub fn node(&self, id: &str) -> Option<&DiagramNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// Returns true when the payload has no nodes at all.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the first node, in input order, that qualifies as the central hub.
    pub fn central_node(&self) -> Option<&DiagramNode> {
        self.nodes.iter().find(|node| node.is_central_candidate())
    }
}
