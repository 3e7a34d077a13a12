//! 2D obstacle geometry on the (x, z) plane.
//!
//! Closest-point queries drive hull contacts; ray casts drive the sonar.

use bathy_core::components::ObstacleShape;
use bathy_core::types::DVec2;

const PARALLEL_EPSILON: f64 = 1e-12;

/// Closest point on (or inside) `shape` to `p`. Returns `p` itself when `p`
/// lies inside the shape.
pub fn closest_point(shape: &ObstacleShape, p: DVec2) -> DVec2 {
    match *shape {
        ObstacleShape::Point { position, size } => closest_on_disc(position, size, p),
        ObstacleShape::Line {
            start,
            end,
            thickness,
        } => {
            let axis = closest_on_segment(start, end, p);
            closest_on_disc(axis, thickness * 0.5, p)
        }
        ObstacleShape::Rectangle {
            center,
            dimensions,
            rotation_deg,
        } => {
            let angle = rotation_deg.to_radians();
            let local = DVec2::from_angle(-angle).rotate(p - center);
            let half = dimensions * 0.5;
            let clamped = local.clamp(-half, half);
            center + DVec2::from_angle(angle).rotate(clamped)
        }
    }
}

/// Reference point of a shape, used when a contact point is degenerate.
pub fn shape_center(shape: &ObstacleShape) -> DVec2 {
    match *shape {
        ObstacleShape::Point { position, .. } => position,
        ObstacleShape::Line { start, end, .. } => (start + end) * 0.5,
        ObstacleShape::Rectangle { center, .. } => center,
    }
}

/// If a circle at `center` with `radius` touches `shape`, the unit normal
/// pointing from the circle into the shape.
///
/// When the circle's centre sits exactly on the shape's middle there is no
/// geometric direction, and `fallback` is returned instead.
pub fn contact_normal(
    shape: &ObstacleShape,
    center: DVec2,
    radius: f64,
    fallback: DVec2,
) -> Option<DVec2> {
    let closest = closest_point(shape, center);
    let offset = closest - center;
    if offset.length() > radius {
        return None;
    }
    let normal = offset.normalize_or_zero();
    if normal != DVec2::ZERO {
        return Some(normal);
    }
    // Centre is inside the shape: push toward the shape's middle.
    let inward = (shape_center(shape) - center).normalize_or_zero();
    if inward != DVec2::ZERO {
        Some(inward)
    } else {
        Some(fallback)
    }
}

/// Whether a circle overlaps `shape`.
pub fn overlaps(shape: &ObstacleShape, center: DVec2, radius: f64) -> bool {
    closest_point(shape, center).distance(center) <= radius
}

/// Distance along a ray of length `range` to the first hit on a line or
/// rectangle outline. Point obstacles are handled by the sonar's beam test.
pub fn ray_cast(shape: &ObstacleShape, origin: DVec2, dir: DVec2, range: f64) -> Option<f64> {
    match *shape {
        ObstacleShape::Point { .. } => None,
        ObstacleShape::Line { start, end, .. } => ray_segment(origin, dir, range, start, end),
        ObstacleShape::Rectangle { .. } => rectangle_corners(shape)
            .and_then(|corners| {
                (0..4)
                    .filter_map(|i| {
                        ray_segment(origin, dir, range, corners[i], corners[(i + 1) % 4])
                    })
                    .min_by(f64::total_cmp)
            }),
    }
}

/// Corners of a rectangle in winding order.
pub fn rectangle_corners(shape: &ObstacleShape) -> Option<[DVec2; 4]> {
    let ObstacleShape::Rectangle {
        center,
        dimensions,
        rotation_deg,
    } = *shape
    else {
        return None;
    };
    let rot = DVec2::from_angle(rotation_deg.to_radians());
    let h = dimensions * 0.5;
    Some([
        center + rot.rotate(DVec2::new(-h.x, -h.y)),
        center + rot.rotate(DVec2::new(h.x, -h.y)),
        center + rot.rotate(DVec2::new(h.x, h.y)),
        center + rot.rotate(DVec2::new(-h.x, h.y)),
    ])
}

fn closest_on_disc(center: DVec2, radius: f64, p: DVec2) -> DVec2 {
    let offset = p - center;
    let dist = offset.length();
    if dist <= radius {
        p
    } else {
        center + offset / dist * radius
    }
}

fn closest_on_segment(a: DVec2, b: DVec2, p: DVec2) -> DVec2 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq == 0.0 {
        return a;
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    a + ab * t
}

/// Ray (origin, unit dir, range) against segment [a, b].
fn ray_segment(origin: DVec2, dir: DVec2, range: f64, a: DVec2, b: DVec2) -> Option<f64> {
    let r = dir * range;
    let s = b - a;
    let denom = r.perp_dot(s);
    if denom.abs() < PARALLEL_EPSILON {
        return None;
    }
    let ao = a - origin;
    let t = ao.perp_dot(s) / denom;
    let u = ao.perp_dot(r) / denom;
    if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
        Some(t * range)
    } else {
        None
    }
}
