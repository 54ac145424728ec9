//! Error adapter for converting ArtweaveError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use artweave::{
    ArtweaveError,
    client::{CompareError, TimeoutKind},
};

/// Adapter giving every [`ArtweaveError`] a stable code and a help line.
pub struct ErrorAdapter<'a>(pub &'a ArtweaveError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            ArtweaveError::Compare(err) => f.write_str(&err.user_message()),
            err => fmt::Display::fmt(err, f),
        }
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self.0 {
            ArtweaveError::Io(_) => "artweave::io",
            ArtweaveError::Json(_) => "artweave::json",
            ArtweaveError::Config(_) => "artweave::config",
            ArtweaveError::Compare(CompareError::Validation(_)) => "artweave::validation",
            ArtweaveError::Compare(CompareError::Fetch(_)) => "artweave::fetch",
            ArtweaveError::Compare(CompareError::Timeout(_)) => "artweave::timeout",
            ArtweaveError::Export(_) => "artweave::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match self.0 {
            ArtweaveError::Json(_) => "the input file must contain a JSON diagram payload",
            ArtweaveError::Config(_) => "check the configuration file passed with --config",
            ArtweaveError::Compare(CompareError::Validation(_)) => {
                "pass a painting set and two artwork ids from that set"
            }
            ArtweaveError::Compare(CompareError::Fetch(_)) => {
                "check that the comparison service is reachable at the configured base_url"
            }
            ArtweaveError::Compare(CompareError::Timeout(TimeoutKind::PollBudget)) => {
                "the job is still running on the service; try the same comparison again"
            }
            ArtweaveError::Compare(CompareError::Timeout(TimeoutKind::Deadline)) => {
                "raise client.overall_timeout_ms if the service is slow"
            }
            ArtweaveError::Io(_) | ArtweaveError::Export(_) => return None,
        };
        Some(Box::new(help))
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(err: &ArtweaveError) -> String {
        ErrorAdapter(err).code().unwrap().to_string()
    }

    #[test]
    fn test_compare_errors_have_distinct_codes() {
        let validation = ArtweaveError::from(CompareError::Validation("x".to_string()));
        let fetch = ArtweaveError::from(CompareError::fetch(""));
        let timeout = ArtweaveError::from(CompareError::Timeout(TimeoutKind::Deadline));

        assert_eq!(code(&validation), "artweave::validation");
        assert_eq!(code(&fetch), "artweave::fetch");
        assert_eq!(code(&timeout), "artweave::timeout");
    }

    #[test]
    fn test_display_uses_user_message() {
        let err = ArtweaveError::from(CompareError::fetch(""));
        assert_eq!(ErrorAdapter(&err).to_string(), "Failed to fetch comparison.");

        let err = ArtweaveError::Config("bad".to_string());
        assert_eq!(ErrorAdapter(&err).to_string(), "Configuration error: bad");
        assert!(ErrorAdapter(&err).help().is_some());
    }

    #[test]
    fn test_report_renders() {
        let err = ArtweaveError::from(CompareError::Timeout(TimeoutKind::PollBudget));
        let mut out = String::new();
        miette::GraphicalReportHandler::new()
            .render_report(&mut out, &ErrorAdapter(&err))
            .unwrap();

        assert!(out.contains("artweave::timeout"));
        assert!(out.contains("taking longer"));
    }
}
