//! The parameter record describing one badge.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::{BadgeError, Result};
use crate::geometry::{CanvasGeometry, require_non_negative};
use crate::layout::effective_font_px;

/// Everything needed to draw and save a single badge.
///
/// A spec is plain data: it is built once (usually by expanding a
/// [`BadgeCatalog`](crate::BadgeCatalog)) and never mutated by rendering.
///
/// # Example
///
/// ```
/// use badge_renderer::{BadgeSpec, Color};
///
/// let spec = BadgeSpec::new("S", 136.0, 25.0, 100.0, Color::rgb(168, 189, 71), "s-05.png")
///     .with_secondary("05");
/// assert_eq!(spec.number_color(), Color::BLACK);
/// assert!(spec.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeSpec {
    /// Top (or only) label.
    pub primary_text: String,

    /// Optional bottom label, stacked under the primary one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_text: Option<String>,

    pub circle_radius: f32,
    pub stroke_width: f32,

    /// Nominal font size before the weight compensation bump.
    pub font_size: f32,

    #[serde(default = "default_text_color")]
    pub text_color: Color,

    /// Color of the secondary label. Falls back to `text_color`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_color: Option<Color>,

    pub ring_color: Color,

    #[serde(default = "default_background")]
    pub background_color: Color,

    pub output_path: PathBuf,

    /// Empty margin between the circle's bounding box and the canvas edge.
    #[serde(default)]
    pub padding: f32,
}

fn default_text_color() -> Color {
    Color::BLACK
}

fn default_background() -> Color {
    Color::TRANSPARENT
}

impl BadgeSpec {
    /// Creates a single-label spec with black text, no padding and a
    /// transparent background.
    pub fn new(
        primary_text: impl Into<String>,
        circle_radius: f32,
        stroke_width: f32,
        font_size: f32,
        ring_color: Color,
        output_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            primary_text: primary_text.into(),
            secondary_text: None,
            circle_radius,
            stroke_width,
            font_size,
            text_color: default_text_color(),
            number_color: None,
            ring_color,
            background_color: default_background(),
            output_path: output_path.into(),
            padding: 0.0,
        }
    }

    /// Adds a bottom label, switching the badge to two-label mode.
    pub fn with_secondary(mut self, text: impl Into<String>) -> Self {
        self.secondary_text = Some(text.into());
        self
    }

    pub fn with_padding(mut self, padding: f32) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_text_color(mut self, color: Color) -> Self {
        self.text_color = color;
        self
    }

    pub fn with_number_color(mut self, color: Color) -> Self {
        self.number_color = Some(color);
        self
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    /// Color used for the secondary label.
    pub fn number_color(&self) -> Color {
        self.number_color.unwrap_or(self.text_color)
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Returns true when a secondary label is present.
    pub fn is_two_label(&self) -> bool {
        self.secondary_text.is_some()
    }

    /// Checks labels and dimensions without rendering anything.
    ///
    /// Blank labels are rejected because measuring them yields an empty
    /// box that cannot be centered.
    pub fn validate(&self) -> Result<()> {
        CanvasGeometry::for_spec(self)?;
        require_non_negative("font size", self.font_size)?;
        if effective_font_px(self.font_size) < 1.0 {
            return Err(BadgeError::InvalidGeometry(format!(
                "font size {} is too small to render",
                self.font_size
            )));
        }

        if self.primary_text.trim().is_empty() {
            return Err(BadgeError::InvalidLabel(
                "primary text must not be empty".into(),
            ));
        }
        if let Some(secondary) = &self.secondary_text {
            if secondary.trim().is_empty() {
                return Err(BadgeError::InvalidLabel(
                    "secondary text, when present, must not be empty".into(),
                ));
            }
        }
        Ok(())
    }
}
