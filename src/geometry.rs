//! Pixel geometry for badge canvases and label boxes.

use crate::badge::BadgeSpec;
use crate::error::{BadgeError, Result};

/// A 2D size in whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SizePx {
    pub width: u32,
    pub height: u32,
}

impl SizePx {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns true if width equals height.
    pub fn is_square(&self) -> bool {
        self.width == self.height
    }
}

/// A point in canvas coordinates (origin top-left, y down).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointPx {
    pub x: f32,
    pub y: f32,
}

impl PointPx {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// The measured extent of a line of text.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Extent {
    pub width: f32,
    pub height: f32,
}

impl Extent {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle in sub-pixel canvas coordinates.
///
/// Used for label placement, where positions come out of centering math
/// and are only snapped to the pixel grid by the rasterizer.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RectPx {
    /// X offset from the left edge of the canvas
    pub x: f32,
    /// Y offset from the top edge of the canvas
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl RectPx {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Creates a rectangle of the given extent with its top-left at `origin`.
    pub fn from_origin(origin: PointPx, extent: Extent) -> Self {
        Self::new(origin.x, origin.y, extent.width, extent.height)
    }

    pub fn origin(&self) -> PointPx {
        PointPx::new(self.x, self.y)
    }

    /// Returns the right edge coordinate (x + width).
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Returns the bottom edge coordinate (y + height).
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> PointPx {
        PointPx::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Smallest rectangle containing both.
    pub fn union(&self, other: &Self) -> Self {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Self::new(x, y, self.right().max(other.right()) - x, self.bottom().max(other.bottom()) - y)
    }
}

// ============================================================================
// CanvasGeometry
// ============================================================================

/// Largest canvas side, in pixels, a badge may have.
pub const MAX_CANVAS_SIDE: u32 = 16_384;

/// Derived pixel geometry for one badge.
///
/// The canvas is square with side `2 × (radius + padding)`; the disc and
/// the ring share `center` and `radius`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasGeometry {
    pub size: SizePx,
    pub center: PointPx,
    pub radius: f32,
    pub stroke_width: f32,
}

impl CanvasGeometry {
    /// Validates the numeric fields of `spec` and derives its geometry.
    pub fn for_spec(spec: &BadgeSpec) -> Result<Self> {
        Self::new(spec.circle_radius, spec.stroke_width, spec.padding)
    }

    /// Derives geometry from raw dimensions.
    ///
    /// Fails with [`BadgeError::InvalidGeometry`] if the radius is not
    /// strictly positive, if stroke or padding are negative or non-finite,
    /// or if the canvas side would exceed [`MAX_CANVAS_SIDE`].
    pub fn new(radius: f32, stroke_width: f32, padding: f32) -> Result<Self> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(BadgeError::InvalidGeometry(format!(
                "circle radius must be positive, got {radius}"
            )));
        }
        require_non_negative("stroke width", stroke_width)?;
        require_non_negative("padding", padding)?;

        let half = radius + padding;
        let side = (2.0 * half).ceil();
        if side > MAX_CANVAS_SIDE as f32 {
            return Err(BadgeError::InvalidGeometry(format!(
                "canvas side {side} exceeds the {MAX_CANVAS_SIDE}px limit"
            )));
        }
        let side = side as u32;

        Ok(Self {
            size: SizePx::new(side, side),
            center: PointPx::new(half, half),
            radius,
            stroke_width,
        })
    }
}

pub(crate) fn require_non_negative(what: &str, value: f32) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(BadgeError::InvalidGeometry(format!(
            "{what} must be a non-negative number, got {value}"
        )))
    }
}
