//! Integration tests for the DiagramBuilder API

use serde_json::json;

use artweave::{
    DiagramBuilder, ExportFormat,
    anchor::{ArtworkAnchor, ArtworkAnchors},
    config::LayoutConfig,
    diagram::{ARTWORK_A_ID, ARTWORK_B_ID},
    fallback::PLACEHOLDER_ID,
};

fn anchors() -> ArtworkAnchors {
    let anchor = |title: &str| ArtworkAnchor {
        title: title.to_string(),
        artist: "Gustave Caillebotte".to_string(),
        year: 1877,
        ..Default::default()
    };
    ArtworkAnchors::new(anchor("Paris Street; Rainy Day"), anchor("The Floor Scrapers"))
}

#[test]
fn test_build_drops_dangling_edges() {
    let raw = json!({
        "nodes": [
            {"id": "artworkA", "type": "artwork", "label": "A", "level": 0},
            {"id": "artworkB", "type": "artwork", "label": "B", "level": 0},
            {"id": "t", "type": "teacher", "label": "Léon Bonnat", "level": 1}
        ],
        "edges": [
            {"id": "e1", "source": "artworkA", "target": "t", "kind": "direct"},
            {"id": "e2", "source": "artworkB", "target": "gone", "kind": "direct"}
        ]
    });

    let diagram = DiagramBuilder::default().build(Some(&raw)).unwrap();

    assert_eq!(diagram.edges.len(), 1);
    assert_eq!(diagram.edges[0].id, "e1");
    assert_eq!(diagram.nodes.len(), 3);
}

#[test]
fn test_empty_payload_falls_back() {
    let raw = json!({"nodes": [], "edges": []});
    let builder = DiagramBuilder::default();

    assert_eq!(builder.build(Some(&raw)), None);

    let diagram = builder.build_or_fallback(Some(&raw), &anchors());
    let ids: Vec<_> = diagram.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, [ARTWORK_A_ID, ARTWORK_B_ID, PLACEHOLDER_ID]);
}

#[test]
fn test_render_svg_and_outline() {
    let builder = DiagramBuilder::new(LayoutConfig::default());
    let diagram = builder.build_or_fallback(None, &anchors());

    let svg = builder.render_svg(&diagram).unwrap();
    assert!(svg.contains("<svg"), "Output should contain SVG tag");
    assert!(svg.contains("</svg>"), "Output should be complete SVG");

    let outline = builder.render_outline(&diagram);
    assert!(outline.starts_with("Connection could not be structured\n"));
}

#[test]
fn test_exporters_by_format() {
    let builder = DiagramBuilder::default();
    let diagram = builder.build_or_fallback(None, &anchors());

    for format in [ExportFormat::Svg, ExportFormat::Json, ExportFormat::Outline] {
        let mut out = Vec::new();
        builder.exporter(format).export(&diagram, &mut out).unwrap();
        assert!(!out.is_empty(), "{format:?} export should not be empty");
    }
}
