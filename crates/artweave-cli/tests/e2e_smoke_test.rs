use std::{fs, path::PathBuf};

use serde_json::Value;
use tempfile::tempdir;

use artweave::{ArtweaveError, client::CompareError};
use artweave_cli::{Args, Command, CompareArgs, Format, OutputArgs, RenderArgs, run};

fn fixture(name: &str) -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
        .to_string_lossy()
        .to_string()
}

fn render_args(input: String, output: &PathBuf, format: Format) -> Args {
    Args {
        config: None,
        log_level: "off".to_string(),
        command: Command::Render(RenderArgs {
            input,
            title_a: Some("Paris Street; Rainy Day".to_string()),
            title_b: None,
            output: OutputArgs {
                output: Some(output.to_string_lossy().to_string()),
                format,
            },
        }),
    }
}

#[test]
fn e2e_smoke_test_fixtures_render_to_svg() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let mut failed = Vec::new();
    for name in ["canonical.json", "legacy.json", "poll_response.json", "malformed.json"] {
        let output = temp_dir.path().join(format!("{name}.svg"));
        let args = render_args(fixture(name), &output, Format::Svg);

        match run(&args) {
            Ok(()) => {
                let svg = fs::read_to_string(&output).unwrap();
                if !svg.starts_with("<svg") || !svg.contains("</svg>") {
                    failed.push(format!("{name}: incomplete SVG"));
                }
            }
            Err(err) => failed.push(format!("{name}: {err}")),
        }
    }

    assert!(failed.is_empty(), "Failed fixtures:\n{}", failed.join("\n"));
}

#[test]
fn e2e_malformed_payload_renders_fallback() {
    let temp_dir = tempdir().unwrap();
    let output = temp_dir.path().join("out.json");

    run(&render_args(fixture("malformed.json"), &output, Format::Json)).unwrap();

    let diagram: Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    let ids: Vec<_> = diagram["nodes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|node| node["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids, ["artworkA", "artworkB", "L1"]);
    assert_eq!(
        diagram["nodes"][0]["label"],
        "Artwork A — Paris Street; Rainy Day, Unknown artist, 0"
    );
}

#[test]
fn e2e_poll_response_diagram_is_used() {
    let temp_dir = tempdir().unwrap();
    let output = temp_dir.path().join("outline.txt");

    run(&render_args(fixture("poll_response.json"), &output, Format::Outline)).unwrap();

    let outline = fs::read_to_string(&output).unwrap();
    assert!(outline.starts_with("Shared garden\n"));
}

#[test]
fn e2e_canonical_layout_pins_anchors() {
    let temp_dir = tempdir().unwrap();
    let output = temp_dir.path().join("out.json");

    run(&render_args(fixture("canonical.json"), &output, Format::Json)).unwrap();

    let diagram: Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    let node = |id: &str| {
        diagram["nodes"]
            .as_array()
            .unwrap()
            .iter()
            .find(|node| node["id"] == id)
            .cloned()
            .unwrap()
    };
    assert_eq!(node("artworkA")["x"], 80.0);
    assert_eq!(node("artworkB")["x"], 620.0);
    assert_eq!(node("L1")["y"], 20.0);
    assert_eq!(node("theme")["y"], 540.0);
    assert_eq!(diagram["edges"].as_array().unwrap().len(), 5);
}

#[test]
fn e2e_invalid_json_is_an_error() {
    let temp_dir = tempdir().unwrap();
    let input = temp_dir.path().join("broken.json");
    fs::write(&input, "{not json").unwrap();
    let output = temp_dir.path().join("out.svg");

    let result = run(&render_args(input.to_string_lossy().to_string(), &output, Format::Svg));
    assert!(matches!(result, Err(ArtweaveError::Json(_))));
}

#[test]
fn e2e_compare_validates_before_network() {
    let args = Args {
        config: None,
        log_level: "off".to_string(),
        command: Command::Compare(CompareArgs {
            set: "A".to_string(),
            left: "a1".to_string(),
            right: String::new(),
            // Nothing listens here; validation must fail first.
            base_url: Some("http://127.0.0.1:9".to_string()),
            output: OutputArgs {
                output: None,
                format: Format::Svg,
            },
        }),
    };

    let result = run(&args);
    assert!(matches!(
        result,
        Err(ArtweaveError::Compare(CompareError::Validation(_)))
    ));
}
