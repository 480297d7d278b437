//! Label placement inside the badge circle.
//!
//! Labels are centered horizontally on the circle center. Vertically, a
//! single label is centered on its own while two labels are centered as one
//! stacked group. Both cases are then nudged upward by a fixed bias so that
//! capitals and numerals look centered rather than sitting low.

use crate::geometry::{Extent, PointPx, RectPx};

/// Multiplier applied to the nominal font size; the bold face reads smaller
/// than the requested size without it.
pub const FONT_SCALE: f32 = 1.1;

/// Upward shift of a lone label, in pixels.
pub const SINGLE_LABEL_BIAS_PX: f32 = 10.0;

/// Upward shift of a stacked label pair, in pixels.
pub const GROUP_BIAS_PX: f32 = 10.0;

/// Pixel size the typeface is rasterized at: `round(font_size × 1.1)`.
pub fn effective_font_px(font_size: f32) -> f32 {
    (font_size * FONT_SCALE).round()
}

/// Where each label's box goes on the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelLayout {
    pub primary: RectPx,
    pub secondary: Option<RectPx>,
}

impl LabelLayout {
    /// The box enclosing every placed label.
    pub fn bounds(&self) -> RectPx {
        match &self.secondary {
            Some(secondary) => self.primary.union(secondary),
            None => self.primary,
        }
    }
}

/// Places one or two measured labels around `center`.
///
/// With a secondary label, the pair is stacked with no gap: the secondary
/// box starts exactly at the primary box's bottom edge.
pub fn layout_labels(center: PointPx, primary: Extent, secondary: Option<Extent>) -> LabelLayout {
    match secondary {
        None => {
            let origin = PointPx::new(
                center.x - primary.width / 2.0,
                center.y - primary.height / 2.0 - SINGLE_LABEL_BIAS_PX,
            );
            LabelLayout {
                primary: RectPx::from_origin(origin, primary),
                secondary: None,
            }
        }
        Some(secondary) => {
            let total_height = primary.height + secondary.height;
            let group_top = center.y - total_height / 2.0 - GROUP_BIAS_PX;

            let primary_rect = RectPx::from_origin(
                PointPx::new(center.x - primary.width / 2.0, group_top),
                primary,
            );
            let secondary_rect = RectPx::from_origin(
                PointPx::new(center.x - secondary.width / 2.0, group_top + primary.height),
                secondary,
            );
            LabelLayout {
                primary: primary_rect,
                secondary: Some(secondary_rect),
            }
        }
    }
}
