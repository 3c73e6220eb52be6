// Track outline derived from a reference lap centerline

use egui::{Pos2, Rect};
use serde::{Deserialize, Serialize};

use crate::errors::ReplayError;

pub const DEFAULT_TRACK_WIDTH: f64 = 200.0;

/// Reference lap positions in world coordinates
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct ReferenceLap {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

/// Axis aligned bounds in world coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldBounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl WorldBounds {
    fn empty() -> Self {
        Self {
            x_min: f64::INFINITY,
            x_max: f64::NEG_INFINITY,
            y_min: f64::INFINITY,
            y_max: f64::NEG_INFINITY,
        }
    }

    fn include(&mut self, xs: &[f64], ys: &[f64]) {
        for (x, y) in xs.iter().zip(ys) {
            self.x_min = self.x_min.min(*x);
            self.x_max = self.x_max.max(*x);
            self.y_min = self.y_min.min(*y);
            self.y_max = self.y_max.max(*y);
        }
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    pub fn center(&self) -> (f64, f64) {
        (
            (self.x_min + self.x_max) / 2.0,
            (self.y_min + self.y_max) / 2.0,
        )
    }
}

/// Centerline of the track plus its inner and outer edges.
///
/// Both edges sit exactly `track_width / 2` away from the centerline along the
/// local unit normal.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackGeometry {
    pub x_ref: Vec<f64>,
    pub y_ref: Vec<f64>,
    pub x_inner: Vec<f64>,
    pub y_inner: Vec<f64>,
    pub x_outer: Vec<f64>,
    pub y_outer: Vec<f64>,
    pub bounds: WorldBounds,
}

/// Builds the track edges by offsetting the reference lap along its left-hand normal.
pub fn build_track_from_example_lap(
    lap: &ReferenceLap,
    track_width: f64,
) -> Result<TrackGeometry, ReplayError> {
    if lap.x.len() != lap.y.len() {
        return Err(ReplayError::TrackGeometryError {
            reason: format!(
                "reference lap has {} x samples and {} y samples",
                lap.x.len(),
                lap.y.len()
            ),
        });
    }
    if lap.x.is_empty() {
        return Err(ReplayError::TrackGeometryError {
            reason: "reference lap is empty".to_string(),
        });
    }

    let dx = gradient(&lap.x);
    let dy = gradient(&lap.y);
    let half_width = track_width / 2.0;

    let n = lap.x.len();
    let mut x_inner = Vec::with_capacity(n);
    let mut y_inner = Vec::with_capacity(n);
    let mut x_outer = Vec::with_capacity(n);
    let mut y_outer = Vec::with_capacity(n);

    for i in 0..n {
        let mut norm = (dx[i] * dx[i] + dy[i] * dy[i]).sqrt();
        if norm == 0.0 {
            norm = 1.0;
        }
        // left hand normal of the unit tangent
        let nx = -dy[i] / norm;
        let ny = dx[i] / norm;

        x_outer.push(lap.x[i] + nx * half_width);
        y_outer.push(lap.y[i] + ny * half_width);
        x_inner.push(lap.x[i] - nx * half_width);
        y_inner.push(lap.y[i] - ny * half_width);
    }

    let mut bounds = WorldBounds::empty();
    bounds.include(&lap.x, &lap.y);
    bounds.include(&x_inner, &y_inner);
    bounds.include(&x_outer, &y_outer);

    Ok(TrackGeometry {
        x_ref: lap.x.clone(),
        y_ref: lap.y.clone(),
        x_inner,
        y_inner,
        x_outer,
        y_outer,
        bounds,
    })
}

/// Discrete derivative: central differences in the interior, one-sided at the ends.
fn gradient(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    if n < 2 {
        return vec![0.0; n];
    }
    (0..n)
        .map(|i| match i {
            0 => values[1] - values[0],
            i if i == n - 1 => values[n - 1] - values[n - 2],
            i => (values[i + 1] - values[i - 1]) / 2.0,
        })
        .collect()
}

/// Maps world coordinates onto a screen rectangle, rotating the circuit about the
/// center of its bounds and preserving the aspect ratio.
#[derive(Debug, Clone, Copy)]
pub struct TrackTransform {
    center: (f64, f64),
    cos: f64,
    sin: f64,
    scale: f64,
    screen_center: Pos2,
}

impl TrackTransform {
    pub fn fit(bounds: &WorldBounds, rotation_deg: f64, screen: Rect, padding: f32) -> Self {
        let (sin, cos) = rotation_deg.to_radians().sin_cos();
        let center = bounds.center();

        // rotated extent of the bounds corners
        let corners = [
            (bounds.x_min, bounds.y_min),
            (bounds.x_min, bounds.y_max),
            (bounds.x_max, bounds.y_min),
            (bounds.x_max, bounds.y_max),
        ];
        let (mut half_w, mut half_h) = (0.0f64, 0.0f64);
        for (x, y) in corners {
            let (rx, ry) = rotate(x - center.0, y - center.1, cos, sin);
            half_w = half_w.max(rx.abs());
            half_h = half_h.max(ry.abs());
        }

        let usable_w = (screen.width() - 2.0 * padding).max(1.0) as f64;
        let usable_h = (screen.height() - 2.0 * padding).max(1.0) as f64;
        let scale_x = if half_w > 0.0 { usable_w / (2.0 * half_w) } else { f64::INFINITY };
        let scale_y = if half_h > 0.0 { usable_h / (2.0 * half_h) } else { f64::INFINITY };
        let mut scale = scale_x.min(scale_y);
        if !scale.is_finite() {
            scale = 1.0;
        }

        Self {
            center,
            cos,
            sin,
            scale,
            screen_center: screen.center(),
        }
    }

    pub fn world_to_screen(&self, x: f64, y: f64) -> Pos2 {
        let (rx, ry) = rotate(x - self.center.0, y - self.center.1, self.cos, self.sin);
        Pos2::new(
            self.screen_center.x + (rx * self.scale) as f32,
            // world y points up, screen y points down
            self.screen_center.y - (ry * self.scale) as f32,
        )
    }

    pub fn polyline(&self, xs: &[f64], ys: &[f64]) -> Vec<Pos2> {
        xs.iter()
            .zip(ys)
            .map(|(x, y)| self.world_to_screen(*x, *y))
            .collect()
    }
}

fn rotate(x: f64, y: f64, cos: f64, sin: f64) -> (f64, f64) {
    (x * cos - y * sin, x * sin + y * cos)
}
