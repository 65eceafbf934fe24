/// Fixed geometry and thresholds for the proximity monitor.
///
/// Built once at startup and passed by reference into the detector and
/// classifier. Nothing in here changes for the lifetime of the process.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Virtual boundary rectangle, top-left corner.
    pub boundary_min: (i32, i32),
    /// Virtual boundary rectangle, bottom-right corner.
    pub boundary_max: (i32, i32),

    /// Distance (to the rectangle center) above which the hand is SAFE.
    pub safe_dist: i32,
    /// Distance below which the hand is in the WARNING band.
    pub warning_dist: i32,
    /// Distance at or below which the hand is in DANGER.
    pub danger_dist: i32,

    /// Inclusive lower HSV bound for skin tones (H in [0,180], S/V in [0,255]).
    pub skin_lower: [u8; 3],
    /// Inclusive upper HSV bound for skin tones.
    pub skin_upper: [u8; 3],

    /// Blobs smaller than this many pixels are treated as noise.
    pub min_blob_area: u32,
    /// Gaussian blur kernel size (odd).
    pub blur_kernel: u32,
    /// Erode and dilate iteration count (3x3 structuring element each pass).
    pub morph_iterations: u32,
}

impl TrackerConfig {
    /// Center of the boundary rectangle, integer-truncated midpoints.
    pub fn boundary_center(&self) -> (i32, i32) {
        (
            (self.boundary_min.0 + self.boundary_max.0) / 2,
            (self.boundary_min.1 + self.boundary_max.1) / 2,
        )
    }

    /// Whether a point lies strictly inside the open boundary rectangle.
    /// Points on an edge do not count.
    pub fn strictly_inside_boundary(&self, x: i32, y: i32) -> bool {
        self.boundary_min.0 < x
            && x < self.boundary_max.0
            && self.boundary_min.1 < y
            && y < self.boundary_max.1
    }
}

impl Default for TrackerConfig {
    /// Constants tuned empirically for typical indoor lighting.
    fn default() -> Self {
        Self {
            boundary_min: (200, 100),
            boundary_max: (450, 350),
            safe_dist: 200,
            warning_dist: 120,
            danger_dist: 60,
            skin_lower: [0, 30, 60],
            skin_upper: [20, 150, 255],
            min_blob_area: 1000,
            blur_kernel: 7,
            morph_iterations: 2,
        }
    }
}
