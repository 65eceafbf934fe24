use image::GrayImage;

/// A connected foreground region of the mask, aggregated down to the raw
/// spatial moments the detector needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Blob {
    /// Zeroth moment: pixel count.
    pub area: u32,
    /// First-order moments: sums of x and y over the blob's pixels.
    pub sum_x: u64,
    pub sum_y: u64,
}

impl Blob {
    /// Area-weighted center, truncated to integer pixel coordinates.
    /// None for a degenerate (empty) blob.
    pub fn centroid(&self) -> Option<(i32, i32)> {
        if self.area == 0 {
            return None;
        }
        let cx = (self.sum_x / self.area as u64) as i32;
        let cy = (self.sum_y / self.area as u64) as i32;
        Some((cx, cy))
    }
}

/// Find all 8-connected foreground blobs in the mask. Any nonzero pixel is
/// foreground. Blobs are emitted in the order their first pixel appears in
/// row-major scan order.
pub fn find_blobs(mask: &GrayImage) -> Vec<Blob> {
    let (width, height) = mask.dimensions();
    let mut visited = vec![false; (width * height) as usize];
    let mut blobs = Vec::new();
    let mut stack = Vec::new();

    for y in 0..height {
        for x in 0..width {
            let idx = (y * width + x) as usize;
            if visited[idx] || mask.get_pixel(x, y)[0] == 0 {
                continue;
            }

            // Grow a new blob from this seed pixel.
            let mut blob = Blob {
                area: 0,
                sum_x: 0,
                sum_y: 0,
            };
            visited[idx] = true;
            stack.push((x, y));

            while let Some((px, py)) = stack.pop() {
                blob.area += 1;
                blob.sum_x += px as u64;
                blob.sum_y += py as u64;

                for dy in -1i32..=1 {
                    for dx in -1i32..=1 {
                        if dx == 0 && dy == 0 {
                            continue;
                        }
                        let nx = px as i32 + dx;
                        let ny = py as i32 + dy;
                        if nx < 0 || ny < 0 || nx >= width as i32 || ny >= height as i32 {
                            continue;
                        }
                        let (nx, ny) = (nx as u32, ny as u32);
                        let nidx = (ny * width + nx) as usize;
                        if !visited[nidx] && mask.get_pixel(nx, ny)[0] != 0 {
                            visited[nidx] = true;
                            stack.push((nx, ny));
                        }
                    }
                }
            }

            blobs.push(blob);
        }
    }

    blobs
}

/// The blob with the largest area; ties go to the first encountered in
/// scan order.
pub fn largest_blob(blobs: &[Blob]) -> Option<Blob> {
    let mut best: Option<Blob> = None;
    for blob in blobs {
        match best {
            Some(b) if blob.area > b.area => best = Some(*blob),
            None => best = Some(*blob),
            _ => {}
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn mask_with_block(w: u32, h: u32, x0: u32, y0: u32, bw: u32, bh: u32) -> GrayImage {
        let mut mask = GrayImage::from_pixel(w, h, Luma([0]));
        for y in y0..y0 + bh {
            for x in x0..x0 + bw {
                mask.put_pixel(x, y, Luma([255]));
            }
        }
        mask
    }

    #[test]
    fn empty_mask_has_no_blobs() {
        let mask = GrayImage::from_pixel(20, 20, Luma([0]));
        assert!(find_blobs(&mask).is_empty());
        assert!(largest_blob(&[]).is_none());
    }

    #[test]
    fn single_block_area_and_centroid() {
        let mask = mask_with_block(40, 40, 10, 12, 6, 4);
        let blobs = find_blobs(&mask);
        assert_eq!(blobs.len(), 1);
        assert_eq!(blobs[0].area, 24);
        // x spans 10..=15 (mean 12.5, truncated 12), y spans 12..=15 (13.5 -> 13)
        assert_eq!(blobs[0].centroid(), Some((12, 13)));
    }

    #[test]
    fn diagonal_pixels_connect() {
        let mut mask = GrayImage::from_pixel(10, 10, Luma([0]));
        mask.put_pixel(2, 2, Luma([255]));
        mask.put_pixel(3, 3, Luma([255]));
        mask.put_pixel(4, 4, Luma([255]));
        let blobs = find_blobs(&mask);
        assert_eq!(blobs.len(), 1);
        assert_eq!(blobs[0].area, 3);
    }

    #[test]
    fn separate_regions_are_separate_blobs() {
        let mut mask = mask_with_block(40, 40, 2, 2, 4, 4);
        for y in 20..30 {
            for x in 20..30 {
                mask.put_pixel(x, y, Luma([255]));
            }
        }
        let blobs = find_blobs(&mask);
        assert_eq!(blobs.len(), 2);

        let largest = largest_blob(&blobs).unwrap();
        assert_eq!(largest.area, 100);
        assert_eq!(largest.centroid(), Some((24, 24)));
    }

    #[test]
    fn equal_area_tie_keeps_first_in_scan_order() {
        let mut mask = mask_with_block(40, 40, 30, 1, 3, 3);
        for y in 10..13 {
            for x in 2..5 {
                mask.put_pixel(x, y, Luma([255]));
            }
        }
        let blobs = find_blobs(&mask);
        assert_eq!(blobs.len(), 2);
        assert_eq!(blobs[0].area, blobs[1].area);

        // The block at y=1 is encountered first and wins the tie.
        let winner = largest_blob(&blobs).unwrap();
        assert_eq!(winner.centroid(), Some((31, 2)));
    }

    #[test]
    fn degenerate_blob_has_no_centroid() {
        let blob = Blob {
            area: 0,
            sum_x: 0,
            sum_y: 0,
        };
        assert!(blob.centroid().is_none());
    }
}
