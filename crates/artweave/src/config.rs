//! Configuration types for ArtWeave.
//!
//! All types implement [`serde::Deserialize`] and every field has a default,
//! so a configuration file only needs to mention what it overrides.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining client and layout settings.
//! - [`ClientConfig`] - Where the comparison service lives and how it is polled.
//! - [`LayoutConfig`] - Canvas, row and node-size constants used by the layout engine.
//!
//! # Example
//!
//! ```
//! # use artweave::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.client().max_attempts(), 20);
//! assert!(config.layout().validate().is_ok());
//! ```

use std::time::Duration;

use serde::Deserialize;

use artweave_core::geometry::Size;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Comparison service section.
    #[serde(default)]
    client: ClientConfig,

    /// Layout section.
    #[serde(default)]
    layout: LayoutConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified sections.
    pub fn new(client: ClientConfig, layout: LayoutConfig) -> Self {
        Self { client, layout }
    }

    /// Returns the client configuration.
    pub fn client(&self) -> &ClientConfig {
        &self.client
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Replaces the service base URL (builder style).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.client.base_url = base_url.into();
        self
    }

    /// Checks cross-field constraints that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns a description of the first violated constraint.
    pub fn validate(&self) -> Result<(), String> {
        self.client.validate()?;
        self.layout.validate()
    }
}

/// Comparison service and polling settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    base_url: String,
    poll_interval_ms: u64,
    max_attempts: u32,
    overall_timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            poll_interval_ms: 900,
            max_attempts: 20,
            overall_timeout_ms: 25_000,
        }
    }
}

impl ClientConfig {
    /// Base URL of the comparison service, without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Delay between two status requests.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Maximum number of status requests per job.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Wall-clock budget for the whole start-and-poll sequence.
    pub fn overall_timeout(&self) -> Duration {
        Duration::from_millis(self.overall_timeout_ms)
    }

    /// Sets the delay between status requests (builder style).
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval_ms = interval.as_millis() as u64;
        self
    }

    /// Sets the poll attempt budget (builder style).
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Sets the overall deadline (builder style).
    pub fn with_overall_timeout(mut self, timeout: Duration) -> Self {
        self.overall_timeout_ms = timeout.as_millis() as u64;
        self
    }

    fn validate(&self) -> Result<(), String> {
        if self.base_url.trim().is_empty() {
            return Err("client.base_url must not be empty".to_string());
        }
        if self.max_attempts == 0 {
            return Err("client.max_attempts must be at least 1".to_string());
        }
        Ok(())
    }
}

/// Layout constants.
///
/// Rows are placed at `top_row_y + row * row_spacing`; anchors are pinned
/// `padding` away from the canvas edges.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    canvas_width: f32,
    padding: f32,
    top_row_y: f32,
    row_spacing: f32,
    artwork_width: f32,
    artwork_height: f32,
    category_width: f32,
    category_height: f32,
    horizontal_spacing: f32,
    vertical_spacing: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            canvas_width: 920.0,
            padding: 80.0,
            top_row_y: 20.0,
            row_spacing: 260.0,
            artwork_width: 220.0,
            artwork_height: 250.0,
            category_width: 200.0,
            category_height: 90.0,
            horizontal_spacing: 40.0,
            vertical_spacing: 120.0,
        }
    }
}

impl LayoutConfig {
    pub fn canvas_width(&self) -> f32 {
        self.canvas_width
    }

    pub fn padding(&self) -> f32 {
        self.padding
    }

    pub fn top_row_y(&self) -> f32 {
        self.top_row_y
    }

    pub fn row_spacing(&self) -> f32 {
        self.row_spacing
    }

    /// Footprint of an artwork anchor card.
    pub fn artwork_size(&self) -> Size {
        Size::new(self.artwork_width, self.artwork_height)
    }

    /// Footprint of every other node.
    pub fn category_size(&self) -> Size {
        Size::new(self.category_width, self.category_height)
    }

    /// Horizontal gap between neighbouring nodes in the layered baseline.
    pub fn horizontal_spacing(&self) -> f32 {
        self.horizontal_spacing
    }

    /// Vertical gap between ranks in the layered baseline.
    pub fn vertical_spacing(&self) -> f32 {
        self.vertical_spacing
    }

    /// Sets the canvas width (builder style).
    pub fn with_canvas_width(mut self, canvas_width: f32) -> Self {
        self.canvas_width = canvas_width;
        self
    }

    /// Sets the anchor padding (builder style).
    pub fn with_padding(mut self, padding: f32) -> Self {
        self.padding = padding;
        self
    }

    /// Checks that anchor B can be pinned strictly to the right of anchor A.
    ///
    /// # Errors
    ///
    /// Returns a message when the canvas is too narrow or a size is not positive.
    pub fn validate(&self) -> Result<(), String> {
        let sizes = [
            self.artwork_width,
            self.artwork_height,
            self.category_width,
            self.category_height,
        ];
        if sizes.iter().any(|size| size.is_nan() || *size <= 0.0) {
            return Err("layout node sizes must be positive".to_string());
        }
        if self.padding < 0.0 || self.row_spacing <= 0.0 {
            return Err("layout.padding must be >= 0 and layout.row_spacing > 0".to_string());
        }
        if self.canvas_width <= self.artwork_width + 2.0 * self.padding {
            return Err(format!(
                "layout.canvas_width ({}) must exceed artwork_width + 2 * padding ({})",
                self.canvas_width,
                self.artwork_width + 2.0 * self.padding
            ));
        }
        Ok(())
    }
}
