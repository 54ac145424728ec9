//! Export of laid-out diagrams.
//!
//! Every backend implements [`Exporter`] and writes one diagram to any
//! [`Write`] sink.
//!
//! # Available Backends
//!
//! - [`svg::Svg`] - SVG drawing with palette-coloured boxes
//! - [`Json`] - the canonical payload, pretty-printed
//! - [`outline::Outline`] - indented text outline

pub mod outline;
pub mod svg;

use std::io::{self, Write};

use thiserror::Error;

use artweave_core::diagram::DiagramPayload;

/// Abstraction for diagram export backends.
pub trait Exporter {
    /// Writes `diagram` to `out` in the backend's format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the diagram cannot be converted, or
    /// [`Error::Io`] if writing fails.
    fn export(&self, diagram: &DiagramPayload, out: &mut dyn Write) -> Result<(), Error>;
}

/// Errors that can occur during diagram export.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Render error: {0}")]
    Render(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Writes the canonical JSON payload.
#[derive(Debug, Default, Clone, Copy)]
pub struct Json;

impl Exporter for Json {
    fn export(&self, diagram: &DiagramPayload, out: &mut dyn Write) -> Result<(), Error> {
        serde_json::to_writer_pretty(&mut *out, diagram)
            .map_err(|err| Error::Render(err.to_string()))?;
        writeln!(out)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use artweave_core::diagram::{DiagramNode, NodeType};

    #[test]
    fn test_json_export() {
        let diagram = DiagramPayload::new(
            vec![DiagramNode::new("L1", NodeType::Theme, "Water", 2)],
            Vec::new(),
        );
        let mut out = Vec::new();
        Json.export(&diagram, &mut out).unwrap();

        let parsed: DiagramPayload = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed, diagram);
        assert!(out.ends_with(b"\n"));
    }
}
