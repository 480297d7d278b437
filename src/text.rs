//! Text measurement and rasterization.
//!
//! The renderer only needs two things from a typeface: the pixel box a
//! string occupies, and a way to paint the string so that exactly that box
//! lands at a chosen position. [`TextRasterizer`] captures that contract;
//! [`GlyphFont`] implements it with `ab_glyph`.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use ab_glyph::{Font, FontVec, OutlinedGlyph, PxScale, Rect, ScaleFont, point};
use image::RgbaImage;

use crate::color::Color;
use crate::composite::{blend_at, with_coverage};
use crate::error::{BadgeError, Result};
use crate::geometry::{Extent, PointPx};

/// Environment variable naming the bold typeface file to use.
pub const FONT_ENV: &str = "BADGEGEN_FONT";

/// Bold sans-serif faces tried, in order, when no font is configured.
pub const DEFAULT_FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Bold.ttf",
    "/usr/share/fonts/truetype/msttcorefonts/Arial_Bold.ttf",
    "/Library/Fonts/Arial Bold.ttf",
    "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
    "C:\\Windows\\Fonts\\arialbd.ttf",
    "arialbd.ttf",
];

// ============================================================================
// TextRasterizer
// ============================================================================

/// Measures and paints single-line labels.
///
/// Implementations must agree with themselves: drawing `text` at `origin`
/// covers the box `origin .. origin + measure(text)` (to within a pixel of
/// grid snapping), so centering math done on measured boxes holds for the
/// painted result.
pub trait TextRasterizer {
    /// Returns the ink extent of `text` at `px` pixels per em.
    fn measure(&self, text: &str, px: f32) -> Extent;

    /// Paints `text` so that its ink box's top-left corner is at `origin`.
    fn draw(&self, canvas: &mut RgbaImage, text: &str, px: f32, origin: PointPx, color: Color);
}

// ============================================================================
// GlyphFont
// ============================================================================

/// A TrueType/OpenType face loaded into memory.
pub struct GlyphFont {
    font: FontVec,
    origin: String,
}

impl std::fmt::Debug for GlyphFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlyphFont").field("origin", &self.origin).finish()
    }
}

impl GlyphFont {
    /// Parses font data. `origin` is only used in error and log messages.
    pub fn from_bytes(data: Vec<u8>, origin: impl Into<String>) -> Result<Self> {
        let origin = origin.into();
        let font = FontVec::try_from_vec(data).map_err(|e| BadgeError::FontLoad {
            origin: origin.clone(),
            reason: e.to_string(),
        })?;
        Ok(Self { font, origin })
    }

    /// Reads and parses a font file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read(path).map_err(|e| BadgeError::FontLoad {
            origin: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_bytes(data, path.display().to_string())
    }

    /// Loads the configured typeface.
    ///
    /// An explicit path wins, then [`FONT_ENV`], then the first readable
    /// entry of [`DEFAULT_FONT_PATHS`]. A configured path that fails is an
    /// error; it does not fall through to the defaults.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        let env = std::env::var_os(FONT_ENV);
        let candidates = font_candidates(explicit, env.as_deref());

        if explicit.is_some() || env.is_some() {
            return Self::from_path(&candidates[0]);
        }

        for candidate in candidates.iter().filter(|p| p.is_file()) {
            match Self::from_path(candidate) {
                Ok(font) => {
                    log::debug!("using font {}", candidate.display());
                    return Ok(font);
                }
                Err(e) => log::warn!("skipping unusable font: {e}"),
            }
        }

        Err(BadgeError::FontLoad {
            origin: "system font search".into(),
            reason: format!(
                "no bold sans-serif face found; set {FONT_ENV} or pass a font path"
            ),
        })
    }

    /// Where the font was loaded from.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Lays out `text` on one line and returns the outlined glyphs.
    fn outline(&self, text: &str, px: f32) -> Vec<OutlinedGlyph> {
        let scale = PxScale::from(px);
        let scaled = self.font.as_scaled(scale);

        let mut caret = 0.0;
        let mut previous = None;
        let mut outlined = Vec::with_capacity(text.len());

        for ch in text.chars() {
            let id = scaled.glyph_id(ch);
            if let Some(prev) = previous {
                caret += scaled.kern(prev, id);
            }
            let glyph = id.with_scale_and_position(scale, point(caret, scaled.ascent()));
            caret += scaled.h_advance(id);
            previous = Some(id);

            if let Some(og) = self.font.outline_glyph(glyph) {
                outlined.push(og);
            }
        }

        outlined
    }
}

/// Union of the whole-pixel bounds of every glyph.
fn ink_bounds(glyphs: &[OutlinedGlyph]) -> Option<Rect> {
    glyphs.iter().map(OutlinedGlyph::px_bounds).reduce(|a, b| Rect {
        min: point(a.min.x.min(b.min.x), a.min.y.min(b.min.y)),
        max: point(a.max.x.max(b.max.x), a.max.y.max(b.max.y)),
    })
}

impl TextRasterizer for GlyphFont {
    fn measure(&self, text: &str, px: f32) -> Extent {
        match ink_bounds(&self.outline(text, px)) {
            Some(ink) => Extent::new(ink.width(), ink.height()),
            None => Extent::default(),
        }
    }

    fn draw(&self, canvas: &mut RgbaImage, text: &str, px: f32, origin: PointPx, color: Color) {
        let glyphs = self.outline(text, px);
        let Some(ink) = ink_bounds(&glyphs) else {
            return;
        };

        // Snap the shift to whole pixels so glyph coverage stays aligned.
        let dx = (origin.x - ink.min.x).round();
        let dy = (origin.y - ink.min.y).round();
        let paint = color.to_pixel();

        for glyph in &glyphs {
            let bounds = glyph.px_bounds();
            let left = (bounds.min.x + dx) as i32;
            let top = (bounds.min.y + dy) as i32;
            glyph.draw(|x, y, coverage| {
                blend_at(canvas, left + x as i32, top + y as i32, with_coverage(paint, coverage));
            });
        }
    }
}

/// Paths to try for the typeface, most specific first.
pub fn font_candidates(explicit: Option<&Path>, env: Option<&OsStr>) -> Vec<PathBuf> {
    if let Some(path) = explicit {
        return vec![path.to_path_buf()];
    }
    if let Some(value) = env {
        return vec![PathBuf::from(value)];
    }
    DEFAULT_FONT_PATHS.iter().map(PathBuf::from).collect()
}

// ============================================================================
// Test rasterizer
// ============================================================================


#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn explicit_path_wins() {
        let explicit = Path::new("/fonts/custom.ttf");
        let candidates = font_candidates(Some(explicit), Some(OsStr::new("/env/font.ttf")));
        assert_eq!(candidates, vec![PathBuf::from("/fonts/custom.ttf")]);
    }

    #[test]
    fn env_beats_defaults() {
        let candidates = font_candidates(None, Some(OsStr::new("/env/font.ttf")));
        assert_eq!(candidates, vec![PathBuf::from("/env/font.ttf")]);
    }

    #[test]
    fn defaults_are_tried_in_order() {
        let candidates = font_candidates(None, None);
        assert_eq!(candidates.len(), DEFAULT_FONT_PATHS.len());
        assert_eq!(candidates[0], PathBuf::from(DEFAULT_FONT_PATHS[0]));
    }

    #[test]
    fn missing_font_file_is_font_load_error() {
        let err = GlyphFont::from_path("/definitely/not/here/bold.ttf").unwrap_err();
        assert!(matches!(err, BadgeError::FontLoad { .. }));
    }

    #[test]
    fn garbage_font_data_is_font_load_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"this is not a font").unwrap();

        let err = GlyphFont::from_path(file.path()).unwrap_err();
        match err {
            BadgeError::FontLoad { origin, .. } => {
                assert_eq!(origin, file.path().display().to_string())
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn block_font_fills_exactly_its_box() {
        use block::BlockFont;

        let mut canvas = RgbaImage::new(20, 20);
        BlockFont.draw(&mut canvas, "AB", 10.0, PointPx::new(2.0, 3.0), Color::BLACK);

        // 12 x 7 block starting at (2, 3)
        assert_eq!(canvas.get_pixel(2, 3).0, [0, 0, 0, 255]);
        assert_eq!(canvas.get_pixel(13, 9).0, [0, 0, 0, 255]);
        assert_eq!(canvas.get_pixel(14, 9).0, [0, 0, 0, 0]);
        assert_eq!(canvas.get_pixel(13, 10).0, [0, 0, 0, 0]);
    }

    #[test]
    #[ignore = "needs a bold font via BADGEGEN_FONT or a system default"]
    fn glyph_font_paints_inside_measured_box() {
        let font = GlyphFont::discover(None).expect("no bold font found");

        let px = 143.0;
        let extent = font.measure("S", px);
        assert!(extent.width > 0.0 && extent.height > 0.0);
        assert!(font.measure("SA", px).width > extent.width);

        let mut canvas = RgbaImage::from_pixel(300, 300, image::Rgba([255, 255, 255, 255]));
        let origin = PointPx::new(50.0, 60.0);
        font.draw(&mut canvas, "S", px, origin, Color::BLACK);

        let inked: Vec<(u32, u32)> = canvas
            .enumerate_pixels()
            .filter(|(_, _, p)| p[0] < 255)
            .map(|(x, y, _)| (x, y))
            .collect();
        assert!(!inked.is_empty());

        let min_x = inked.iter().map(|p| p.0).min().unwrap() as f32;
        let max_x = inked.iter().map(|p| p.0).max().unwrap() as f32 + 1.0;
        let min_y = inked.iter().map(|p| p.1).min().unwrap() as f32;
        let max_y = inked.iter().map(|p| p.1).max().unwrap() as f32 + 1.0;

        assert!(min_x >= origin.x - 1.0 && max_x <= origin.x + extent.width + 1.0);
        assert!(min_y >= origin.y - 1.0 && max_y <= origin.y + extent.height + 1.0);
        assert!(max_x - min_x >= extent.width - 2.0);
        assert!(max_y - min_y >= extent.height - 2.0);
    }
}
