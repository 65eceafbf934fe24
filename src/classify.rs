use crate::config::TrackerConfig;
use image::Rgb;

/// Discrete proximity state, recomputed fresh for every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneState {
    Safe,
    Warning,
    Danger,
}

impl ZoneState {
    pub fn label(&self) -> &'static str {
        match self {
            ZoneState::Safe => "SAFE",
            ZoneState::Warning => "WARNING",
            ZoneState::Danger => "DANGER",
        }
    }

    pub fn color(&self) -> Rgb<u8> {
        match self {
            ZoneState::Safe => Rgb([0, 255, 0]),
            ZoneState::Warning => Rgb([255, 255, 0]),
            ZoneState::Danger => Rgb([255, 0, 0]),
        }
    }
}

/// Classifier output for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub state: ZoneState,
    pub color: Rgb<u8>,
    /// Set only when the DANGER override fired; gates the warning caption.
    pub danger_overlay: bool,
    /// Distance from the centroid to the boundary center, when a centroid
    /// was present.
    pub distance: Option<i32>,
}

/// Euclidean distance from (px, py) to the boundary rectangle's center,
/// truncated to an integer.
pub fn distance_to_boundary_center(px: i32, py: i32, cfg: &TrackerConfig) -> i32 {
    let (cx, cy) = cfg.boundary_center();
    let dx = (px - cx) as f64;
    let dy = (py - cy) as f64;
    (dx * dx + dy * dy).sqrt() as i32
}

/// Classify the hand position against the boundary and thresholds.
///
/// Pure function of its inputs; no state is carried between frames. With no
/// centroid the state defaults to SAFE.
///
/// Quirk, kept deliberately: a distance at or below `warning_dist` that
/// does not trip the DANGER override falls through to the SAFE default
/// rather than WARNING. With the default geometry that region lies entirely
/// inside the rectangle, so the override always fires there; it is
/// observable only under non-default configs.
pub fn classify(centroid: Option<(i32, i32)>, cfg: &TrackerConfig) -> Classification {
    let mut state = ZoneState::Safe;
    let mut danger_overlay = false;
    let mut distance = None;

    if let Some((hx, hy)) = centroid {
        let d = distance_to_boundary_center(hx, hy, cfg);
        distance = Some(d);

        if d > cfg.safe_dist {
            state = ZoneState::Safe;
        } else if cfg.warning_dist < d && d <= cfg.safe_dist {
            state = ZoneState::Warning;
        }

        // Independent override: inside the open rectangle, or very close.
        if cfg.strictly_inside_boundary(hx, hy) || d <= cfg.danger_dist {
            state = ZoneState::Danger;
            danger_overlay = true;
        }
    }

    Classification {
        state,
        color: state.color(),
        danger_overlay,
        distance,
    }
}
