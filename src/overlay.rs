//! Frame annotation: boundary rectangle, centroid marker, state captions.
//!
//! All drawing is plain per-pixel writes on the owned frame, clipped to the
//! frame bounds. Text uses a built-in 5x7 bitmap font that covers exactly
//! the glyphs the captions need.

use crate::classify::Classification;
use crate::config::TrackerConfig;
use image::{Rgb, RgbImage};

const BOUNDARY_COLOR: Rgb<u8> = Rgb([255, 255, 255]);
const MARKER_COLOR: Rgb<u8> = Rgb([0, 0, 255]);
const DANGER_CAPTION_COLOR: Rgb<u8> = Rgb([255, 0, 0]);

const LABEL_POS: (i32, i32) = (20, 40);
const DANGER_CAPTION_POS: (i32, i32) = (120, 80);
const MARKER_RADIUS: i32 = 10;

/// Draw the full per-frame overlay: boundary outline, centroid marker when a
/// hand was found, the state label, and the DANGER caption when flagged.
pub fn annotate(
    frame: &mut RgbImage,
    cfg: &TrackerConfig,
    centroid: Option<(i32, i32)>,
    classification: &Classification,
) {
    draw_rect_outline(frame, cfg.boundary_min, cfg.boundary_max, 2, BOUNDARY_COLOR);

    if let Some((hx, hy)) = centroid {
        draw_filled_circle(frame, (hx, hy), MARKER_RADIUS, MARKER_COLOR);
    }

    draw_text(
        frame,
        classification.state.label(),
        LABEL_POS,
        4,
        false,
        classification.color,
    );

    if classification.danger_overlay {
        draw_text(
            frame,
            "DANGER DANGER",
            DANGER_CAPTION_POS,
            4,
            true,
            DANGER_CAPTION_COLOR,
        );
    }
}

fn put_pixel_clipped(frame: &mut RgbImage, x: i32, y: i32, color: Rgb<u8>) {
    if x >= 0 && y >= 0 && (x as u32) < frame.width() && (y as u32) < frame.height() {
        frame.put_pixel(x as u32, y as u32, color);
    }
}

/// Rectangle outline with the given stroke thickness, drawn inward-out
/// around the nominal edges.
pub fn draw_rect_outline(
    frame: &mut RgbImage,
    min: (i32, i32),
    max: (i32, i32),
    thickness: i32,
    color: Rgb<u8>,
) {
    for t in 0..thickness {
        for x in min.0 - t..=max.0 + t {
            put_pixel_clipped(frame, x, min.1 - t, color);
            put_pixel_clipped(frame, x, max.1 + t, color);
        }
        for y in min.1 - t..=max.1 + t {
            put_pixel_clipped(frame, min.0 - t, y, color);
            put_pixel_clipped(frame, max.0 + t, y, color);
        }
    }
}

pub fn draw_filled_circle(frame: &mut RgbImage, center: (i32, i32), radius: i32, color: Rgb<u8>) {
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy <= radius * radius {
                put_pixel_clipped(frame, center.0 + dx, center.1 + dy, color);
            }
        }
    }
}

/// 5x7 glyphs, one u8 per row, low 5 bits used.
fn glyph(c: char) -> [u8; 7] {
    match c {
        'A' => [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'D' => [0x1E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1E],
        'E' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F],
        'F' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10],
        'G' => [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0E],
        'I' => [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E],
        'N' => [0x11, 0x19, 0x15, 0x13, 0x11, 0x11, 0x11],
        'R' => [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11],
        'S' => [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E],
        'W' => [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0A],
        _ => [0; 7],
    }
}

/// Draw `text` with its top-left corner at `pos`. Each font pixel becomes a
/// `scale` x `scale` block; `bold` thickens the stroke by one extra pixel.
pub fn draw_text(
    frame: &mut RgbImage,
    text: &str,
    pos: (i32, i32),
    scale: i32,
    bold: bool,
    color: Rgb<u8>,
) {
    let bleed = if bold { 1 } else { 0 };
    let mut pen_x = pos.0;

    for c in text.chars() {
        let rows = glyph(c);
        for (row, bits) in rows.iter().enumerate() {
            let bits = *bits as i32;
            for col in 0..5 {
                if bits & (0x10 >> col) == 0 {
                    continue;
                }
                let x0 = pen_x + col * scale;
                let y0 = pos.1 + row as i32 * scale;
                for dy in -bleed..scale + bleed {
                    for dx in -bleed..scale + bleed {
                        put_pixel_clipped(frame, x0 + dx, y0 + dy, color);
                    }
                }
            }
        }
        pen_x += 6 * scale;
    }
}
