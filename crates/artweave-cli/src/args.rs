//! Command-line argument definitions for the ArtWeave CLI.
//!
//! Global options select the configuration file and log level; each
//! subcommand carries its own inputs and an output destination.

use clap::{Parser, Subcommand, ValueEnum};

use artweave::ExportFormat;

/// Command-line arguments for the ArtWeave tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compare two artworks through the generation service
    Compare(CompareArgs),
    /// Lay out and render a saved diagram payload offline
    Render(RenderArgs),
}

#[derive(clap::Args, Debug)]
pub struct CompareArgs {
    /// Painting set both artworks belong to
    #[arg(long)]
    pub set: String,

    /// Id of the first artwork
    #[arg(long)]
    pub left: String,

    /// Id of the second artwork
    #[arg(long)]
    pub right: String,

    /// Overrides the service base URL from the configuration
    #[arg(long)]
    pub base_url: Option<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(clap::Args, Debug)]
pub struct RenderArgs {
    /// Path to a JSON diagram payload or poll response
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Title shown on the first artwork card
    #[arg(long)]
    pub title_a: Option<String>,

    /// Title shown on the second artwork card
    #[arg(long)]
    pub title_b: Option<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(clap::Args, Debug)]
pub struct OutputArgs {
    /// Output file; standard output when omitted
    #[arg(short, long)]
    pub output: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Svg)]
    pub format: Format,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Svg,
    Json,
    Outline,
}

impl From<Format> for ExportFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Svg => ExportFormat::Svg,
            Format::Json => ExportFormat::Json,
            Format::Outline => ExportFormat::Outline,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_compare() {
        let args = Args::try_parse_from([
            "artweave", "compare", "--set", "A", "--left", "a1", "--right", "b2", "-f", "outline",
        ])
        .unwrap();

        assert_eq!(args.log_level, "info");
        let Command::Compare(compare) = args.command else {
            panic!("expected compare");
        };
        assert_eq!(compare.set, "A");
        assert_eq!(compare.output.format, Format::Outline);
        assert_eq!(compare.output.output, None);
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let args = Args::try_parse_from([
            "artweave",
            "render",
            "payload.json",
            "--log-level",
            "debug",
            "--config",
            "custom.toml",
        ])
        .unwrap();

        assert_eq!(args.log_level, "debug");
        assert_eq!(args.config.as_deref(), Some("custom.toml"));
        let Command::Render(render) = args.command else {
            panic!("expected render");
        };
        assert_eq!(render.output.format, Format::Svg);
    }

    #[test]
    fn test_compare_requires_selection() {
        assert!(Args::try_parse_from(["artweave", "compare", "--set", "A"]).is_err());
    }
}
