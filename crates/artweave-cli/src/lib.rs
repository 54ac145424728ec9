//! ArtWeave CLI library
//!
//! This module contains the core CLI logic for the ArtWeave comparison tool.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, Command, CompareArgs, Format, OutputArgs, RenderArgs};
pub use error_adapter::ErrorAdapter;

use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
};

use log::{info, warn};
use serde_json::Value;

use artweave::{
    ArtweaveError, DiagramBuilder,
    anchor::{ArtworkAnchor, ArtworkAnchors},
    client::{
        CompareContext, CompareError, CompareOutcome, CompareView, HttpTransport, Orchestrator,
        StartRequest,
    },
    config::AppConfig,
    diagram::DiagramPayload,
};

/// Run the ArtWeave CLI application
///
/// # Errors
///
/// Returns `ArtweaveError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Invalid input JSON
/// - Comparison validation, fetch and timeout errors
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), ArtweaveError> {
    let app_config = config::load_config(args.config.as_ref())?;

    match &args.command {
        Command::Compare(compare) => run_compare(compare, app_config),
        Command::Render(render) => run_render(render, &app_config),
    }
}

fn run_render(args: &RenderArgs, app_config: &AppConfig) -> Result<(), ArtweaveError> {
    info!(input_path = args.input; "Rendering diagram payload");

    let source = fs::read_to_string(&args.input)?;
    let raw: Value = serde_json::from_str(&source)?;
    // A saved poll response carries the payload under `diagram`.
    let payload = match raw.get("diagram") {
        Some(diagram) if raw.get("nodes").is_none() && raw.get("elements").is_none() => diagram,
        _ => &raw,
    };

    let titled = |title: &Option<String>| ArtworkAnchor {
        title: title.clone().unwrap_or_default(),
        ..ArtworkAnchor::default()
    };
    let anchors = ArtworkAnchors::new(titled(&args.title_a), titled(&args.title_b));

    let builder = DiagramBuilder::new(app_config.layout().clone());
    let diagram = builder.build_or_fallback(Some(payload), &anchors);
    write_diagram(&builder, &diagram, &args.output)
}

fn run_compare(args: &CompareArgs, app_config: AppConfig) -> Result<(), ArtweaveError> {
    let app_config = match &args.base_url {
        Some(base_url) => app_config.with_base_url(base_url),
        None => app_config,
    };
    app_config.validate().map_err(ArtweaveError::Config)?;

    let request = StartRequest::new(&args.set, &args.left, &args.right);
    request.validate()?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(compare(args, &app_config, request))
}

async fn compare(
    args: &CompareArgs,
    app_config: &AppConfig,
    request: StartRequest,
) -> Result<(), ArtweaveError> {
    let transport = HttpTransport::new(app_config.client())?;
    let paintings = transport.paintings(&args.set).await?;
    let anchors = resolve_anchors(&paintings, &args.set, &args.left, &args.right)?;
    info!(
        left = anchors.a().display_title(),
        right = anchors.b().display_title();
        "Resolved artworks",
    );

    let orchestrator = Orchestrator::new(transport, app_config);
    let context = CompareContext::new();
    let builder = DiagramBuilder::new(app_config.layout().clone());

    match orchestrator.start(&context, request, &anchors).await {
        Ok(CompareOutcome::Finished(result)) => {
            if result.is_fallback {
                warn!(job = result.job_id; "Service returned no usable diagram");
            }
            print_summary(result.summary.as_deref(), &args.output)?;
            write_diagram(&builder, &result.diagram, &args.output)
        }
        Ok(CompareOutcome::Superseded) => Ok(()),
        Err(err) => {
            if let Some((summary, diagram)) = salvage(&err, &context.view(), &anchors) {
                print_summary(summary.as_deref(), &args.output)?;
                write_diagram(&builder, &diagram, &args.output)?;
            }
            Err(err.into())
        }
    }
}

/// Summary and diagram still worth writing after a started comparison fails.
///
/// Timeouts and fetch failures of a running job keep whatever arrived so far,
/// or the fallback graph. Failures before a job exists produce nothing.
fn salvage(
    err: &CompareError,
    view: &CompareView,
    anchors: &ArtworkAnchors,
) -> Option<(Option<String>, DiagramPayload)> {
    match err {
        CompareError::Timeout(_) => {}
        CompareError::Fetch(_) if view.job_id.is_some() => {}
        CompareError::Fetch(_) | CompareError::Validation(_) => return None,
    }
    Some((view.summary.clone(), view.renderable_diagram(anchors)))
}

fn resolve_anchors(
    paintings: &[ArtworkAnchor],
    set: &str,
    left: &str,
    right: &str,
) -> Result<ArtworkAnchors, CompareError> {
    let find = |id: &str| {
        paintings
            .iter()
            .find(|painting| painting.id == id)
            .cloned()
            .ok_or_else(|| CompareError::Validation(format!("Artwork {id} is not in set {set}.")))
    };
    Ok(ArtworkAnchors::new(find(left)?, find(right)?))
}

/// Prints the summary on stdout, or on stderr when stdout carries the diagram.
fn print_summary(summary: Option<&str>, output: &OutputArgs) -> Result<(), ArtweaveError> {
    let Some(summary) = summary.filter(|s| !s.is_empty()) else {
        return Ok(());
    };
    if output.output.is_some() {
        writeln!(io::stdout().lock(), "{summary}")?;
    } else {
        writeln!(io::stderr().lock(), "{summary}\n")?;
    }
    Ok(())
}

fn write_diagram(
    builder: &DiagramBuilder,
    diagram: &DiagramPayload,
    output: &OutputArgs,
) -> Result<(), ArtweaveError> {
    let exporter = builder.exporter(output.format.into());
    match &output.output {
        Some(path) => {
            let mut file = BufWriter::new(File::create(path)?);
            exporter.export(diagram, &mut file)?;
            file.flush()?;
            info!(output_file = path, format:? = output.format; "Diagram exported successfully");
        }
        None => {
            let mut stdout = io::stdout().lock();
            exporter.export(diagram, &mut stdout)?;
            stdout.flush()?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use artweave::client::TimeoutKind;

    use super::*;

    fn painting(id: &str) -> ArtworkAnchor {
        ArtworkAnchor {
            id: id.to_string(),
            title: format!("Title {id}"),
            ..ArtworkAnchor::default()
        }
    }

    #[test]
    fn test_resolve_anchors() {
        let paintings = [painting("a1"), painting("b1")];
        let anchors = resolve_anchors(&paintings, "A", "b1", "a1").unwrap();

        assert_eq!(anchors.a().id, "b1");
        assert_eq!(anchors.b().id, "a1");
    }

    fn started_view() -> CompareView {
        CompareView {
            job_id: Some("job-1".to_string()),
            summary: Some("Both paint water.".to_string()),
            ..CompareView::default()
        }
    }

    #[test]
    fn test_salvage_job_failure_writes_fallback() {
        let anchors = ArtworkAnchors::new(painting("a1"), painting("b1"));
        let err = CompareError::fetch("Model overloaded");

        let (summary, diagram) = salvage(&err, &started_view(), &anchors).unwrap();

        assert_eq!(summary.as_deref(), Some("Both paint water."));
        assert_eq!(diagram, artweave::fallback::fallback_diagram(&anchors));
    }

    #[test]
    fn test_salvage_keeps_published_diagram() {
        let anchors = ArtworkAnchors::default();
        let published = DiagramBuilder::default().build_or_fallback(None, &anchors);
        let view = CompareView {
            diagram: Some(published.clone()),
            ..started_view()
        };

        let (_, diagram) =
            salvage(&CompareError::Timeout(TimeoutKind::PollBudget), &view, &anchors).unwrap();

        assert_eq!(diagram, published);
    }

    #[test]
    fn test_salvage_skips_failures_before_start() {
        let anchors = ArtworkAnchors::default();
        let idle = CompareView::default();

        assert!(salvage(&CompareError::fetch(""), &idle, &anchors).is_none());
        assert!(
            salvage(
                &CompareError::Validation("Select a painting set first.".to_string()),
                &started_view(),
                &anchors
            )
            .is_none()
        );
    }

    #[test]
    fn test_resolve_unknown_artwork() {
        let paintings = [painting("a1")];
        let err = resolve_anchors(&paintings, "B", "a1", "zz").unwrap_err();

        assert_eq!(
            err,
            CompareError::Validation("Artwork zz is not in set B.".to_string())
        );
    }
}
