mod blobs;
mod mask;

pub use blobs::{find_blobs, largest_blob, Blob};
pub use mask::{clean_skin_mask, rgb_to_hsv, skin_mask};

use crate::config::TrackerConfig;
use image::{GrayImage, RgbImage};

/// Per-frame detector output. The mask is always produced, even when no
/// hand qualifies, so it can be inspected for diagnostics.
pub struct Detection {
    pub centroid: Option<(i32, i32)>,
    pub mask: GrayImage,
}

/// Detect the hand in a single frame via skin-color segmentation.
///
/// The largest skin-colored blob is assumed to be the hand; anything below
/// the configured minimum area is treated as noise. Absence of a hand is a
/// normal result, not an error.
pub fn detect(frame: &RgbImage, cfg: &TrackerConfig) -> Detection {
    let mask = mask::clean_skin_mask(frame, cfg);

    let blobs = blobs::find_blobs(&mask);
    if blobs.is_empty() {
        return Detection {
            centroid: None,
            mask,
        };
    }

    let hand = match blobs::largest_blob(&blobs) {
        Some(blob) if blob.area >= cfg.min_blob_area => blob,
        _ => {
            return Detection {
                centroid: None,
                mask,
            }
        }
    };

    Detection {
        centroid: hand.centroid(),
        mask,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    // RGB that lands inside the default skin HSV range (H~9, S~119, V=150).
    const SKIN: Rgb<u8> = Rgb([150, 100, 80]);
    // Saturated blue, far outside the skin hue band.
    const BACKGROUND: Rgb<u8> = Rgb([0, 80, 200]);

    fn frame_with_disk(w: u32, h: u32, cx: i32, cy: i32, radius: i32) -> RgbImage {
        RgbImage::from_fn(w, h, |x, y| {
            let dx = x as i32 - cx;
            let dy = y as i32 - cy;
            if dx * dx + dy * dy <= radius * radius {
                SKIN
            } else {
                BACKGROUND
            }
        })
    }

    #[test]
    fn no_skin_pixels_yields_no_centroid() {
        let frame = RgbImage::from_pixel(320, 240, BACKGROUND);
        let cfg = TrackerConfig::default();

        let detection = detect(&frame, &cfg);
        assert!(detection.centroid.is_none());
        assert_eq!(detection.mask.dimensions(), (320, 240));
    }

    #[test]
    fn solid_disk_centroid_is_near_disk_center() {
        // Radius 30 disk: ~2800 px, comfortably above the 1000 px floor
        // even after erosion.
        let frame = frame_with_disk(640, 480, 300, 200, 30);
        let cfg = TrackerConfig::default();

        let detection = detect(&frame, &cfg);
        let (cx, cy) = detection.centroid.expect("disk should be detected");
        assert!((cx - 300).abs() <= 3, "cx = {}", cx);
        assert!((cy - 200).abs() <= 3, "cy = {}", cy);
    }

    #[test]
    fn sub_threshold_blob_is_noise() {
        // Radius 12 disk: ~450 px, below the 1000 px minimum area.
        let frame = frame_with_disk(640, 480, 100, 100, 12);
        let cfg = TrackerConfig::default();

        let detection = detect(&frame, &cfg);
        assert!(detection.centroid.is_none());
    }

    #[test]
    fn largest_blob_wins_over_smaller_ones() {
        let mut frame = frame_with_disk(640, 480, 400, 300, 40);
        // Paint a second, smaller (but still qualifying) disk.
        for y in 0..480u32 {
            for x in 0..640u32 {
                let dx = x as i32 - 100;
                let dy = y as i32 - 100;
                if dx * dx + dy * dy <= 25 * 25 {
                    frame.put_pixel(x, y, SKIN);
                }
            }
        }
        let cfg = TrackerConfig::default();

        let detection = detect(&frame, &cfg);
        let (cx, cy) = detection.centroid.expect("larger disk should win");
        assert!((cx - 400).abs() <= 3, "cx = {}", cx);
        assert!((cy - 300).abs() <= 3, "cy = {}", cy);
    }

    #[test]
    fn centroid_lies_within_frame_bounds() {
        let frame = frame_with_disk(320, 240, 20, 20, 25);
        let cfg = TrackerConfig::default();

        if let Some((cx, cy)) = detect(&frame, &cfg).centroid {
            assert!((0..320).contains(&cx));
            assert!((0..240).contains(&cy));
        }
    }
}
