//! Pixel compositing between tiny-skia pixmaps and `image` buffers.

use image::{Rgba, RgbaImage};
use resvg::tiny_skia::Pixmap;

// ============================================================================
// Conversion
// ============================================================================

/// Copies a premultiplied tiny-skia pixmap into a straight-alpha buffer.
pub fn pixmap_to_rgba_image(pixmap: &Pixmap) -> RgbaImage {
    let mut img = RgbaImage::new(pixmap.width(), pixmap.height());
    for (dst, src) in img.pixels_mut().zip(pixmap.pixels()) {
        let c = src.demultiply();
        *dst = Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
    }
    img
}

// ============================================================================
// Compositing
// ============================================================================

/// Composites `src` onto `dest` with its top-left corner at `(x, y)`.
///
/// Fully transparent source pixels leave the destination untouched, so a
/// transparent-but-colored background survives around the badge.
pub fn composite_over(dest: &mut RgbaImage, src: &RgbaImage, x: i32, y: i32) {
    for (sx, sy, src_pixel) in src.enumerate_pixels() {
        blend_at(dest, x + sx as i32, y + sy as i32, *src_pixel);
    }
}

/// Blends one pixel source-over at `(x, y)`, ignoring out-of-bounds writes.
pub fn blend_at(dest: &mut RgbaImage, x: i32, y: i32, src: Rgba<u8>) {
    if src[3] == 0 || x < 0 || y < 0 || x >= dest.width() as i32 || y >= dest.height() as i32 {
        return;
    }
    let dst = dest.get_pixel_mut(x as u32, y as u32);
    *dst = alpha_blend(src, *dst);
}

/// Source-over for straight (non-premultiplied) RGBA pixels.
pub fn alpha_blend(src: Rgba<u8>, dst: Rgba<u8>) -> Rgba<u8> {
    if src[3] == 255 || dst[3] == 0 {
        return src;
    }

    let sa = f32::from(src[3]) / 255.0;
    // Weight of the destination that still shows through.
    let keep = f32::from(dst[3]) / 255.0 * (1.0 - sa);
    let out_a = sa + keep;
    let mix = |s: u8, d: u8| ((f32::from(s) * sa + f32::from(d) * keep) / out_a).round() as u8;

    Rgba([
        mix(src[0], dst[0]),
        mix(src[1], dst[1]),
        mix(src[2], dst[2]),
        (out_a * 255.0).round() as u8,
    ])
}

/// Scales a color's alpha by a coverage value in `0.0..=1.0`.
pub fn with_coverage(color: Rgba<u8>, coverage: f32) -> Rgba<u8> {
    let a = (color[3] as f32 * coverage.clamp(0.0, 1.0)).round() as u8;
    Rgba([color[0], color[1], color[2], a])
}
