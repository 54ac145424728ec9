//! Diagram normalization.
//!
//! Producers emit either the canonical `{nodes, edges, layout?}` shape or a
//! legacy shape wrapping element data under `elements`. [`RawDiagram`] is the
//! single place that detects which one arrived; [`normalize`] turns either
//! into a [`DiagramPayload`] or gives up with `None`.

use log::{debug, warn};
use serde::Deserialize;
use serde_json::{Map, Value};

use artweave_core::diagram::{DiagramEdge, DiagramNode, DiagramPayload, EdgeKind, NodeType};

/// A producer payload after shape detection.
#[derive(Debug, Clone, PartialEq)]
pub enum RawDiagram {
    /// Already canonical, passed through as-is.
    Canonical(DiagramPayload),
    /// Legacy element lists, mapped lossily.
    Legacy(LegacyElements),
}

/// The `elements` object of a legacy payload.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LegacyElements {
    #[serde(default)]
    nodes: Vec<LegacyElement>,
    #[serde(default)]
    edges: Vec<LegacyElement>,
}

/// One legacy node or edge; everything of interest lives under `data`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
struct LegacyElement {
    #[serde(default)]
    data: Map<String, Value>,
}

impl RawDiagram {
    /// Detects the payload shape.
    ///
    /// Returns `None` when neither shape is present or the detected shape
    /// does not deserialize.
    pub fn detect(raw: &Value) -> Option<Self> {
        if has_array(raw, "nodes") && has_array(raw, "edges") {
            return match serde_json::from_value::<DiagramPayload>(raw.clone()) {
                Ok(payload) => Some(Self::Canonical(payload)),
                Err(err) => {
                    warn!(err:err; "Canonical diagram payload is malformed");
                    None
                }
            };
        }

        let elements = raw.get("elements")?;
        if has_array(elements, "nodes") && has_array(elements, "edges") {
            return match serde_json::from_value::<LegacyElements>(elements.clone()) {
                Ok(elements) => Some(Self::Legacy(elements)),
                Err(err) => {
                    warn!(err:err; "Legacy diagram payload is malformed");
                    None
                }
            };
        }

        None
    }

    /// Converts the detected shape into the canonical model.
    pub fn into_payload(self) -> DiagramPayload {
        match self {
            Self::Canonical(payload) => payload,
            Self::Legacy(elements) => elements.into_payload(),
        }
    }
}

impl LegacyElements {
    fn into_payload(self) -> DiagramPayload {
        let nodes = self
            .nodes
            .iter()
            .enumerate()
            .map(|(index, element)| {
                let id = string_field(&element.data, "id")
                    .unwrap_or_else(|| format!("node-{index}"));
                let label = string_field(&element.data, "label")
                    .or_else(|| string_field(&element.data, "name"))
                    .unwrap_or_else(|| id.clone());
                DiagramNode::new(id, NodeType::NicheConnection, label, 1)
            })
            .collect();

        let edges = self
            .edges
            .iter()
            .enumerate()
            .map(|(index, element)| {
                let id = string_field(&element.data, "id")
                    .unwrap_or_else(|| format!("edge-{index}"));
                let source = string_field(&element.data, "source").unwrap_or_default();
                let target = string_field(&element.data, "target").unwrap_or_default();
                DiagramEdge {
                    id,
                    source,
                    target,
                    kind: EdgeKind::Contextual,
                    label: string_field(&element.data, "label"),
                }
            })
            .collect();

        DiagramPayload::new(nodes, edges)
    }
}

/// Normalizes a raw producer payload.
///
/// Never fails loudly: absent, unrecognised or malformed input yields `None`
/// and the caller decides how to fall back.
///
/// # Examples
///
/// ```
/// use artweave::normalize::normalize;
/// use serde_json::json;
///
/// let raw = json!({"elements": {"nodes": [{"data": {"name": "Seine"}}], "edges": []}});
/// let payload = normalize(Some(&raw)).unwrap();
/// assert_eq!(payload.nodes[0].id, "node-0");
/// assert_eq!(payload.nodes[0].label, "Seine");
///
/// assert!(normalize(Some(&json!({"graph": []}))).is_none());
/// assert!(normalize(None).is_none());
/// ```
pub fn normalize(raw: Option<&Value>) -> Option<DiagramPayload> {
    let raw = raw?;
    let detected = RawDiagram::detect(raw);
    match &detected {
        Some(RawDiagram::Canonical(_)) => debug!("Detected canonical diagram payload"),
        Some(RawDiagram::Legacy(_)) => debug!("Detected legacy diagram payload"),
        None => debug!("Diagram payload has no recognised shape"),
    }
    detected.map(RawDiagram::into_payload)
}

fn has_array(value: &Value, key: &str) -> bool {
    value.get(key).is_some_and(Value::is_array)
}

/// Reads a field as a string; numbers are accepted and rendered, empty strings are not.
fn string_field(data: &Map<String, Value>, key: &str) -> Option<String> {
    match data.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use artweave_core::diagram::{ARTWORK_A_ID, ARTWORK_B_ID, DiagramLayout};

    fn canonical() -> DiagramPayload {
        DiagramPayload {
            nodes: vec![
                DiagramNode::new(ARTWORK_A_ID, NodeType::Artwork, "Artwork A — Test A", 0),
                DiagramNode::new(ARTWORK_B_ID, NodeType::Artwork, "Artwork B — Test B", 0),
                DiagramNode::new("L1", NodeType::NicheConnection, "Shared river setting", 1),
            ],
            edges: vec![
                DiagramEdge::new("edge-1", ARTWORK_A_ID, "L1", EdgeKind::Direct)
                    .with_label("Both set along the Seine"),
                DiagramEdge::new("edge-2", ARTWORK_B_ID, "L1", EdgeKind::Direct),
            ],
            layout: Some(DiagramLayout {
                direction: "TB".to_string(),
                hint_text: Some("hub on top".to_string()),
            }),
        }
    }

    #[test]
    fn test_canonical_passes_through_unchanged() {
        let payload = canonical();
        let raw = serde_json::to_value(&payload).unwrap();
        assert_eq!(normalize(Some(&raw)), Some(payload));
    }

    #[test]
    fn test_canonical_with_empty_lists() {
        let raw = json!({"nodes": [], "edges": []});
        let payload = normalize(Some(&raw)).unwrap();
        assert!(payload.is_empty());
    }

    #[test]
    fn test_canonical_takes_precedence_over_elements() {
        let raw = json!({
            "nodes": [{"id": "x", "type": "theme", "label": "X", "level": 2}],
            "edges": [],
            "elements": {"nodes": [{"data": {"id": "y"}}], "edges": []}
        });
        let payload = normalize(Some(&raw)).unwrap();
        assert_eq!(payload.nodes.len(), 1);
        assert_eq!(payload.nodes[0].node_type, NodeType::Theme);
    }

    #[test]
    fn test_legacy_mapping() {
        let raw = json!({
            "elements": {
                "nodes": [
                    {"data": {"id": "A", "label": "Artwork A"}},
                    {"data": {"name": "Named only"}},
                    {"data": {}},
                ],
                "edges": [
                    {"data": {"id": "A->node-1", "source": "A", "target": "node-1", "label": "links"}},
                    {"data": {"source": "node-1", "target": "node-2"}},
                ]
            }
        });
        let payload = normalize(Some(&raw)).unwrap();

        let ids: Vec<_> = payload.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, ["A", "node-1", "node-2"]);
        let labels: Vec<_> = payload.nodes.iter().map(|n| n.label.as_str()).collect();
        assert_eq!(labels, ["Artwork A", "Named only", "node-2"]);
        assert!(payload
            .nodes
            .iter()
            .all(|n| n.node_type == NodeType::NicheConnection && n.level == 1));

        assert!(payload.edges.iter().all(|e| e.kind == EdgeKind::Contextual));
        assert_eq!(payload.edges[0].label.as_deref(), Some("links"));
        assert_eq!(payload.edges[1].id, "edge-1");
        assert_eq!(payload.edges[1].label, None);
    }

    #[test]
    fn test_unrecognised_shapes_return_none() {
        for raw in [
            json!(null),
            json!("diagram"),
            json!([1, 2, 3]),
            json!({"nodes": []}),
            json!({"nodes": {}, "edges": []}),
            json!({"elements": {"nodes": []}}),
            json!({"elements": []}),
        ] {
            assert_eq!(normalize(Some(&raw)), None, "expected None for {raw}");
        }
    }

    #[test]
    fn test_malformed_canonical_returns_none() {
        let raw = json!({"nodes": [{"label": "no id"}], "edges": []});
        assert_eq!(normalize(Some(&raw)), None);

        let raw = json!({"nodes": [{"id": "n", "level": -1}], "edges": []});
        assert_eq!(normalize(Some(&raw)), None);
    }

    #[test]
    fn test_detect_reports_shape() {
        let legacy = json!({"elements": {"nodes": [], "edges": []}});
        assert!(matches!(RawDiagram::detect(&legacy), Some(RawDiagram::Legacy(_))));

        let canonical = json!({"nodes": [], "edges": []});
        assert!(matches!(
            RawDiagram::detect(&canonical),
            Some(RawDiagram::Canonical(_))
        ));
    }
}
