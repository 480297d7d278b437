//! badge-renderer: circular transit badge icons
//!
//! This crate draws small round badges (a colored ring around a white disc
//! with one or two centered labels) and saves each as a transparent PNG.
//! Line badges carry a single code such as `S`; station badges stack the
//! line code over a two-digit station number.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use badge_renderer::{BadgeCatalog, BadgeRenderer, BatchDriver};
//!
//! let specs = BadgeCatalog::builtin().expand(Path::new("icons"))?;
//! let driver = BatchDriver::new(BadgeRenderer::with_system_font(None)?);
//! driver.run(&specs)?;
//! # Ok::<(), badge_renderer::BadgeError>(())
//! ```
//!
//! # Rendering a single badge
//!
//! ```no_run
//! use badge_renderer::{BadgeRenderer, BadgeSpec, Color};
//!
//! let renderer = BadgeRenderer::with_system_font(None)?;
//! let spec = BadgeSpec::new("S", 136.0, 25.0, 100.0, Color::rgb(168, 189, 71), "s-05.png")
//!     .with_secondary("05");
//! renderer.render_to_file(&spec)?;
//! # Ok::<(), badge_renderer::BadgeError>(())
//! ```

mod badge;
mod batch;
mod catalog;
mod color;
mod composite;
mod error;
mod geometry;
mod layout;
mod output;
mod render;
mod text;

pub use badge::BadgeSpec;
pub use batch::{BadgeFailure, BatchDriver, BatchReport, FailurePolicy};
pub use catalog::{BadgeCatalog, LineBadge, MAX_STATION_NUMBER, StationSeries, station_number};
pub use color::Color;
pub use error::{BadgeError, Result};
pub use geometry::{CanvasGeometry, Extent, MAX_CANVAS_SIDE, PointPx, RectPx, SizePx};
pub use layout::{
    FONT_SCALE, GROUP_BIAS_PX, LabelLayout, SINGLE_LABEL_BIAS_PX, effective_font_px, layout_labels,
};
pub use output::save_png;
pub use render::{BadgeRenderer, RenderedBadge};
pub use text::{DEFAULT_FONT_PATHS, FONT_ENV, GlyphFont, TextRasterizer, font_candidates};
