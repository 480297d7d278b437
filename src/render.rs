//! The badge renderer: ring, backing disc and centered labels.

use std::path::PathBuf;

use image::RgbaImage;
use resvg::tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Stroke, Transform};

use crate::badge::BadgeSpec;
use crate::color::Color;
use crate::composite::{composite_over, pixmap_to_rgba_image};
use crate::error::{BadgeError, Result};
use crate::geometry::{CanvasGeometry, SizePx};
use crate::layout::{LabelLayout, effective_font_px, layout_labels};
use crate::output::save_png;
use crate::text::{GlyphFont, TextRasterizer};

/// What [`BadgeRenderer::render_to_file`] wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedBadge {
    pub path: PathBuf,
    pub size: SizePx,
}

/// Draws badges with a fixed text rasterizer.
///
/// The renderer is stateless between calls; every render allocates its own
/// buffer, so the same spec always produces the same pixels.
///
/// # Example
///
/// ```no_run
/// use badge_renderer::{BadgeRenderer, BadgeSpec, Color};
///
/// let renderer = BadgeRenderer::with_system_font(None)?;
/// let spec = BadgeSpec::new("S", 136.0, 64.0, 130.0, Color::rgb(168, 189, 71), "S.png")
///     .with_padding(13.0);
/// let image = renderer.render(&spec)?;
/// assert_eq!(image.dimensions(), (298, 298));
/// # Ok::<(), badge_renderer::BadgeError>(())
/// ```
#[derive(Debug)]
pub struct BadgeRenderer<T = GlyphFont> {
    text: T,
}

impl BadgeRenderer<GlyphFont> {
    /// Creates a renderer using [`GlyphFont::discover`].
    pub fn with_system_font(explicit: Option<&std::path::Path>) -> Result<Self> {
        let font = GlyphFont::discover(explicit)?;
        log::info!("loaded font {}", font.origin());
        Ok(Self::new(font))
    }
}

impl<T: TextRasterizer> BadgeRenderer<T> {
    pub fn new(text: T) -> Self {
        Self { text }
    }

    pub fn text(&self) -> &T {
        &self.text
    }

    /// Renders `spec` into a new RGBA buffer without touching the filesystem.
    pub fn render(&self, spec: &BadgeSpec) -> Result<RgbaImage> {
        spec.validate()?;
        let geometry = CanvasGeometry::for_spec(spec)?;

        let mut canvas = RgbaImage::from_pixel(
            geometry.size.width,
            geometry.size.height,
            spec.background_color.to_pixel(),
        );

        let shapes = rasterize_shapes(&geometry, spec.ring_color)?;
        composite_over(&mut canvas, &shapes, 0, 0);

        let px = effective_font_px(spec.font_size);
        let layout = self.layout(spec, &geometry, px);

        self.text
            .draw(&mut canvas, &spec.primary_text, px, layout.primary.origin(), spec.text_color);
        if let (Some(text), Some(rect)) = (&spec.secondary_text, layout.secondary) {
            self.text
                .draw(&mut canvas, text, px, rect.origin(), spec.number_color());
        }

        Ok(canvas)
    }

    /// Measures the labels of `spec` and places them on its canvas.
    pub fn layout(&self, spec: &BadgeSpec, geometry: &CanvasGeometry, px: f32) -> LabelLayout {
        let primary = self.text.measure(&spec.primary_text, px);
        let secondary = spec
            .secondary_text
            .as_deref()
            .map(|text| self.text.measure(text, px));
        layout_labels(geometry.center, primary, secondary)
    }

    /// Renders `spec` and writes it to its output path as a PNG.
    pub fn render_to_file(&self, spec: &BadgeSpec) -> Result<RenderedBadge> {
        let image = self.render(spec)?;
        save_png(&image, &spec.output_path)?;

        let size = SizePx::new(image.width(), image.height());
        log::debug!(
            "wrote {} ({}x{})",
            spec.output_path.display(),
            size.width,
            size.height
        );
        Ok(RenderedBadge {
            path: spec.output_path.clone(),
            size,
        })
    }
}

/// Draws the white backing disc and the ring on a transparent pixmap.
///
/// The ring stroke is centered on the disc edge, so half of it lies
/// outside the disc.
fn rasterize_shapes(geometry: &CanvasGeometry, ring_color: Color) -> Result<RgbaImage> {
    let SizePx { width, height } = geometry.size;
    let mut pixmap = Pixmap::new(width, height).ok_or_else(|| {
        BadgeError::InvalidGeometry(format!("cannot allocate a {width}x{height} canvas"))
    })?;

    let circle = PathBuilder::from_circle(geometry.center.x, geometry.center.y, geometry.radius)
        .ok_or_else(|| {
            let radius = geometry.radius;
            BadgeError::InvalidGeometry(format!("cannot build circle of radius {radius}"))
        })?;

    let mut disc = Paint::default();
    disc.set_color_rgba8(255, 255, 255, 255);
    disc.anti_alias = true;
    pixmap.fill_path(&circle, &disc, FillRule::Winding, Transform::identity(), None);

    if geometry.stroke_width > 0.0 {
        let mut ring = Paint::default();
        ring.set_color_rgba8(ring_color.r, ring_color.g, ring_color.b, ring_color.a);
        ring.anti_alias = true;
        let stroke = Stroke {
            width: geometry.stroke_width,
            ..Stroke::default()
        };
        pixmap.stroke_path(&circle, &ring, &stroke, Transform::identity(), None);
    }

    Ok(pixmap_to_rgba_image(&pixmap))
}

// ============================================================================
// Tests
// ============================================================================
