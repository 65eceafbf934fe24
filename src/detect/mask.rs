use crate::config::TrackerConfig;
use image::{GrayImage, Luma, RgbImage};

/// Convert one RGB pixel to 8-bit HSV using the OpenCV convention:
/// H in [0,180] (degrees halved), S and V in [0,255].
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> [u8; 3] {
    let (rf, gf, bf) = (r as f32, g as f32, b as f32);
    let max = rf.max(gf).max(bf);
    let min = rf.min(gf).min(bf);
    let delta = max - min;

    let v = max;
    let s = if max > 0.0 { 255.0 * delta / max } else { 0.0 };

    let h_deg = if delta == 0.0 {
        0.0
    } else if max == rf {
        60.0 * (gf - bf) / delta
    } else if max == gf {
        120.0 + 60.0 * (bf - rf) / delta
    } else {
        240.0 + 60.0 * (rf - gf) / delta
    };
    let h_deg = if h_deg < 0.0 { h_deg + 360.0 } else { h_deg };

    [
        (h_deg / 2.0).round().clamp(0.0, 180.0) as u8,
        s.round().clamp(0.0, 255.0) as u8,
        v.round().clamp(0.0, 255.0) as u8,
    ]
}

/// Threshold the frame against the configured skin-tone HSV range.
/// Both bounds are inclusive; hits become 255, everything else 0.
pub fn skin_mask(frame: &RgbImage, cfg: &TrackerConfig) -> GrayImage {
    let lower = cfg.skin_lower;
    let upper = cfg.skin_upper;

    GrayImage::from_fn(frame.width(), frame.height(), |x, y| {
        let p = frame.get_pixel(x, y);
        let hsv = rgb_to_hsv(p[0], p[1], p[2]);
        let hit = (0..3).all(|c| lower[c] <= hsv[c] && hsv[c] <= upper[c]);
        Luma([if hit { 255 } else { 0 }])
    })
}

/// Separable Gaussian blur with sigma derived from the kernel size the
/// same way OpenCV does when none is given.
pub fn gaussian_blur(mask: &GrayImage, kernel_size: u32) -> GrayImage {
    let k = kernel_size.max(1) | 1; // force odd
    let radius = (k / 2) as i32;
    let sigma = 0.3 * ((k as f32 - 1.0) * 0.5 - 1.0) + 0.8;

    let kernel: Vec<f32> = (-radius..=radius)
        .map(|i| (-(i * i) as f32 / (2.0 * sigma * sigma)).exp())
        .collect();
    let sum: f32 = kernel.iter().sum();
    let kernel: Vec<f32> = kernel.iter().map(|w| w / sum).collect();

    let (width, height) = mask.dimensions();
    let clamp_x = |x: i32| x.clamp(0, width as i32 - 1) as u32;
    let clamp_y = |y: i32| y.clamp(0, height as i32 - 1) as u32;

    // Horizontal pass
    let horizontal = GrayImage::from_fn(width, height, |x, y| {
        let mut acc = 0.0;
        for (i, w) in kernel.iter().enumerate() {
            let sx = clamp_x(x as i32 + i as i32 - radius);
            acc += *w * mask.get_pixel(sx, y)[0] as f32;
        }
        Luma([acc.round().clamp(0.0, 255.0) as u8])
    });

    // Vertical pass
    GrayImage::from_fn(width, height, |x, y| {
        let mut acc = 0.0;
        for (i, w) in kernel.iter().enumerate() {
            let sy = clamp_y(y as i32 + i as i32 - radius);
            acc += *w * horizontal.get_pixel(x, sy)[0] as f32;
        }
        Luma([acc.round().clamp(0.0, 255.0) as u8])
    })
}

/// Grayscale erosion: minimum over the 3x3 neighborhood, repeated
/// `iterations` times. Out-of-bounds neighbors are ignored.
pub fn erode(mask: &GrayImage, iterations: u32) -> GrayImage {
    morph(mask, iterations, |acc, v| acc.min(v))
}

/// Grayscale dilation: maximum over the 3x3 neighborhood, repeated
/// `iterations` times.
pub fn dilate(mask: &GrayImage, iterations: u32) -> GrayImage {
    morph(mask, iterations, |acc, v| acc.max(v))
}

fn morph(mask: &GrayImage, iterations: u32, fold: impl Fn(u8, u8) -> u8) -> GrayImage {
    let (width, height) = mask.dimensions();
    let mut current = mask.clone();

    for _ in 0..iterations {
        current = GrayImage::from_fn(width, height, |x, y| {
            let mut acc = current.get_pixel(x, y)[0];
            for dy in -1i32..=1 {
                for dx in -1i32..=1 {
                    let nx = x as i32 + dx;
                    let ny = y as i32 + dy;
                    if nx >= 0 && ny >= 0 && nx < width as i32 && ny < height as i32 {
                        acc = fold(acc, current.get_pixel(nx as u32, ny as u32)[0]);
                    }
                }
            }
            Luma([acc])
        });
    }

    current
}

/// Full mask pipeline: threshold, blur, erode, matched dilate.
pub fn clean_skin_mask(frame: &RgbImage, cfg: &TrackerConfig) -> GrayImage {
    let mask = skin_mask(frame, cfg);
    let mask = gaussian_blur(&mask, cfg.blur_kernel);
    let mask = erode(&mask, cfg.morph_iterations);
    dilate(&mask, cfg.morph_iterations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn hsv_matches_opencv_convention() {
        // Pure red: H=0, S=255, V=255
        assert_eq!(rgb_to_hsv(255, 0, 0), [0, 255, 255]);
        // Pure green: 120 degrees -> H=60
        assert_eq!(rgb_to_hsv(0, 255, 0), [60, 255, 255]);
        // Pure blue: 240 degrees -> H=120
        assert_eq!(rgb_to_hsv(0, 0, 255), [120, 255, 255]);
        // Gray: zero saturation, hue collapses to 0
        assert_eq!(rgb_to_hsv(128, 128, 128), [0, 0, 128]);
        // Black
        assert_eq!(rgb_to_hsv(0, 0, 0), [0, 0, 0]);
    }

    #[test]
    fn skin_mask_hits_skin_and_rejects_background() {
        let cfg = TrackerConfig::default();
        // H ~ 9, S ~ 119, V = 150: inside the configured skin range
        let skin = Rgb([150u8, 100, 80]);
        // Saturated blue: hue far outside the range
        let sky = Rgb([0u8, 80, 200]);

        let mut frame = RgbImage::from_pixel(8, 8, sky);
        frame.put_pixel(3, 4, skin);

        let mask = skin_mask(&frame, &cfg);
        assert_eq!(mask.get_pixel(3, 4)[0], 255);
        assert_eq!(mask.get_pixel(0, 0)[0], 0);
        assert_eq!(mask.get_pixel(7, 7)[0], 0);
    }

    #[test]
    fn erosion_removes_isolated_pixels() {
        let mut mask = GrayImage::from_pixel(9, 9, Luma([0]));
        mask.put_pixel(4, 4, Luma([255]));

        let eroded = erode(&mask, 1);
        assert!(eroded.pixels().all(|p| p[0] == 0));
    }

    #[test]
    fn dilation_restores_a_surviving_region() {
        // 5x5 solid block survives one erosion as 3x3 and grows back.
        let mut mask = GrayImage::from_pixel(11, 11, Luma([0]));
        for y in 3..8 {
            for x in 3..8 {
                mask.put_pixel(x, y, Luma([255]));
            }
        }

        let eroded = erode(&mask, 1);
        assert_eq!(eroded.get_pixel(5, 5)[0], 255);
        assert_eq!(eroded.get_pixel(3, 3)[0], 0);

        let restored = dilate(&eroded, 1);
        assert_eq!(restored.get_pixel(3, 3)[0], 255);
    }

    #[test]
    fn blur_preserves_flat_regions() {
        let mask = GrayImage::from_pixel(16, 16, Luma([255]));
        let blurred = gaussian_blur(&mask, 7);
        assert!(blurred.pixels().all(|p| p[0] == 255));
    }
}
