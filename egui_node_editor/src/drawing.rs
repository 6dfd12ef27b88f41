//! Drawing utilities for the node editor.

use egui::{Color32, Pos2, Rect, Stroke, Vec2};

const BEZIER_SEGMENTS: usize = 20;

/// Draw a background grid.
pub fn draw_grid(painter: &egui::Painter, rect: Rect, pan: Vec2, color: Color32, spacing: f32) {
    if spacing < 4.0 {
        return;
    }
    let mut x = rect.min.x + pan.x.rem_euclid(spacing);
    while x < rect.max.x {
        painter.line_segment(
            [Pos2::new(x, rect.min.y), Pos2::new(x, rect.max.y)],
            Stroke::new(1.0, color),
        );
        x += spacing;
    }

    let mut y = rect.min.y + pan.y.rem_euclid(spacing);
    while y < rect.max.y {
        painter.line_segment(
            [Pos2::new(rect.min.x, y), Pos2::new(rect.max.x, y)],
            Stroke::new(1.0, color),
        );
        y += spacing;
    }
}

/// Sample the horizontal cubic bezier used for connections.
pub fn bezier_points(from: Pos2, to: Pos2) -> Vec<Pos2> {
    let dx = (to.x - from.x).abs() * 0.5;
    let cp1 = Pos2::new(from.x + dx, from.y);
    let cp2 = Pos2::new(to.x - dx, to.y);

    (0..=BEZIER_SEGMENTS)
        .map(|i| {
            let t = i as f32 / BEZIER_SEGMENTS as f32;
            let mt = 1.0 - t;
            let a = mt * mt * mt;
            let b = 3.0 * mt * mt * t;
            let c = 3.0 * mt * t * t;
            let d = t * t * t;
            Pos2::new(
                a * from.x + b * cp1.x + c * cp2.x + d * to.x,
                a * from.y + b * cp1.y + c * cp2.y + d * to.y,
            )
        })
        .collect()
}

/// Draw a polyline produced by [`bezier_points`].
pub fn draw_polyline(painter: &egui::Painter, points: &[Pos2], width: f32, color: Color32) {
    for window in points.windows(2) {
        painter.line_segment([window[0], window[1]], Stroke::new(width, color));
    }
}

/// Shortest distance from `pos` to any segment of `points`.
pub fn distance_to_polyline(points: &[Pos2], pos: Pos2) -> f32 {
    points
        .windows(2)
        .map(|w| distance_to_segment(w[0], w[1], pos))
        .fold(f32::INFINITY, f32::min)
}

fn distance_to_segment(a: Pos2, b: Pos2, p: Pos2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_sq();
    if len_sq == 0.0 {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bezier_starts_and_ends_at_endpoints() {
        let from = Pos2::new(0.0, 0.0);
        let to = Pos2::new(100.0, 40.0);
        let points = bezier_points(from, to);
        assert_eq!(points.len(), BEZIER_SEGMENTS + 1);
        assert_eq!(points[0], from);
        assert!(points[BEZIER_SEGMENTS].distance(to) < 1e-3);
    }

    #[test]
    fn distance_to_straight_line() {
        let points = [Pos2::new(0.0, 0.0), Pos2::new(10.0, 0.0)];
        assert_eq!(distance_to_polyline(&points, Pos2::new(5.0, 3.0)), 3.0);
        assert_eq!(distance_to_polyline(&points, Pos2::new(13.0, 4.0)), 5.0);
    }
}
