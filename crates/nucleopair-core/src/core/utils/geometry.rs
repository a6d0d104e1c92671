use nalgebra::{Point3, Rotation3, Unit, Vector3};

const DEGENERATE_NORM: f64 = 1.0e-9;

pub fn unit_between(from: &Point3<f64>, to: &Point3<f64>) -> Option<Unit<Vector3<f64>>> {
    let v = to - from;
    if v.norm() < DEGENERATE_NORM {
        None
    } else {
        Some(Unit::new_normalize(v))
    }
}

pub fn rotate_about(axis: &Vector3<f64>, angle_degrees: f64, v: &Vector3<f64>) -> Vector3<f64> {
    Rotation3::from_axis_angle(&Unit::new_normalize(*axis), angle_degrees.to_radians()) * v
}

pub fn project_onto_plane(v: &Vector3<f64>, normal: &Vector3<f64>) -> Vector3<f64> {
    v - normal * v.dot(normal)
}

pub fn angle_between_degrees(a: &Vector3<f64>, b: &Vector3<f64>) -> f64 {
    let denom = a.norm() * b.norm();
    if denom < DEGENERATE_NORM {
        return 0.0;
    }
    (a.dot(b) / denom).clamp(-1.0, 1.0).acos().to_degrees()
}

/// Angle between two plane normals, folded into [0, 90] degrees.
pub fn plane_angle_degrees(n1: &Vector3<f64>, n2: &Vector3<f64>) -> f64 {
    let angle = angle_between_degrees(n1, n2);
    angle.min(180.0 - angle)
}

/// Signed angle from `from` to `to` about `axis`, in degrees.
pub fn signed_angle_about(axis: &Vector3<f64>, from: &Vector3<f64>, to: &Vector3<f64>) -> f64 {
    let angle = angle_between_degrees(from, to);
    if from.cross(to).dot(axis) < 0.0 {
        -angle
    } else {
        angle
    }
}

/// Any unit vector perpendicular to `v`, preferring the direction of `seed`.
pub fn perpendicular_to(v: &Vector3<f64>, seed: &Vector3<f64>) -> Unit<Vector3<f64>> {
    let projected = project_onto_plane(seed, &v.normalize());
    if projected.norm() > DEGENERATE_NORM {
        return Unit::new_normalize(projected);
    }
    let fallback = if v.x.abs() < 0.9 {
        Vector3::x()
    } else {
        Vector3::y()
    };
    Unit::new_normalize(project_onto_plane(&fallback, &v.normalize()))
}

/// Projects 3D points onto the plane through `origin` with the given `normal`,
/// returning 2D coordinates in an orthonormal in-plane basis.
pub fn project_to_plane_2d(
    points: &[Point3<f64>],
    origin: &Point3<f64>,
    normal: &Vector3<f64>,
) -> Vec<[f64; 2]> {
    let n = normal.normalize();
    let u = perpendicular_to(&n, &Vector3::x());
    let v = n.cross(&u);
    points
        .iter()
        .map(|p| {
            let d = p - origin;
            [d.dot(&u), d.dot(&v)]
        })
        .collect()
}

fn signed_area(polygon: &[[f64; 2]]) -> f64 {
    let n = polygon.len();
    let mut area = 0.0;
    for i in 0..n {
        let [x1, y1] = polygon[i];
        let [x2, y2] = polygon[(i + 1) % n];
        area += x1 * y2 - x2 * y1;
    }
    area / 2.0
}

pub fn polygon_area(polygon: &[[f64; 2]]) -> f64 {
    if polygon.len() < 3 {
        return 0.0;
    }
    signed_area(polygon).abs()
}

fn ensure_ccw(polygon: &mut Vec<[f64; 2]>) {
    if signed_area(polygon) < 0.0 {
        polygon.reverse();
    }
}

fn is_inside(p: &[f64; 2], a: &[f64; 2], b: &[f64; 2]) -> bool {
    (b[0] - a[0]) * (p[1] - a[1]) - (b[1] - a[1]) * (p[0] - a[0]) >= 0.0
}

fn intersection(p1: &[f64; 2], p2: &[f64; 2], a: &[f64; 2], b: &[f64; 2]) -> [f64; 2] {
    let dx1 = p2[0] - p1[0];
    let dy1 = p2[1] - p1[1];
    let dx2 = b[0] - a[0];
    let dy2 = b[1] - a[1];
    let denom = dx1 * dy2 - dy1 * dx2;
    if denom.abs() < DEGENERATE_NORM {
        return *p2;
    }
    let t = ((a[0] - p1[0]) * dy2 - (a[1] - p1[1]) * dx2) / denom;
    [p1[0] + t * dx1, p1[1] + t * dy1]
}

/// Area of the intersection of two convex polygons (Sutherland-Hodgman clip
/// followed by the shoelace formula). Orientation of the inputs is normalized
/// internally.
pub fn convex_overlap_area(subject: &[[f64; 2]], clip: &[[f64; 2]]) -> f64 {
    if subject.len() < 3 || clip.len() < 3 {
        return 0.0;
    }
    let mut output: Vec<[f64; 2]> = subject.to_vec();
    ensure_ccw(&mut output);
    let mut clipper: Vec<[f64; 2]> = clip.to_vec();
    ensure_ccw(&mut clipper);

    let m = clipper.len();
    for i in 0..m {
        if output.is_empty() {
            return 0.0;
        }
        let a = clipper[i];
        let b = clipper[(i + 1) % m];
        let input = std::mem::take(&mut output);
        let n = input.len();
        for j in 0..n {
            let current = input[j];
            let previous = input[(j + n - 1) % n];
            let current_in = is_inside(&current, &a, &b);
            let previous_in = is_inside(&previous, &a, &b);
            if current_in {
                if !previous_in {
                    output.push(intersection(&previous, &current, &a, &b));
                }
                output.push(current);
            } else if previous_in {
                output.push(intersection(&previous, &current, &a, &b));
            }
        }
    }
    polygon_area(&output)
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNIT_SQUARE: [[f64; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

    #[test]
    fn plane_angle_folds_into_first_quadrant() {
        let n1 = Vector3::z();
        let n2 = -Vector3::z();
        assert!(plane_angle_degrees(&n1, &n2) < 1e-9);

        let tilted = rotate_about(&Vector3::x(), 100.0, &Vector3::z());
        assert!((plane_angle_degrees(&n1, &tilted) - 80.0).abs() < 1e-9);
    }

    #[test]
    fn signed_angle_respects_axis_orientation() {
        let angle = signed_angle_about(&Vector3::z(), &Vector3::x(), &Vector3::y());
        assert!((angle - 90.0).abs() < 1e-9);
        let angle = signed_angle_about(&Vector3::z(), &Vector3::y(), &Vector3::x());
        assert!((angle + 90.0).abs() < 1e-9);
    }

    #[test]
    fn overlap_of_identical_squares_is_full_area() {
        assert!((convex_overlap_area(&UNIT_SQUARE, &UNIT_SQUARE) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn overlap_of_disjoint_squares_is_zero() {
        let shifted: Vec<[f64; 2]> = UNIT_SQUARE.iter().map(|p| [p[0] + 3.0, p[1]]).collect();
        assert!(convex_overlap_area(&UNIT_SQUARE, &shifted) < 1e-12);
    }

    #[test]
    fn overlap_of_half_shifted_squares_is_half() {
        let shifted: Vec<[f64; 2]> = UNIT_SQUARE.iter().map(|p| [p[0] + 0.5, p[1]]).collect();
        assert!((convex_overlap_area(&UNIT_SQUARE, &shifted) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn overlap_handles_clockwise_input() {
        let mut cw = UNIT_SQUARE.to_vec();
        cw.reverse();
        assert!((convex_overlap_area(&cw, &UNIT_SQUARE) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn projection_preserves_in_plane_distances() {
        let points = [Point3::new(1.0, 0.0, 5.0), Point3::new(0.0, 2.0, 5.0)];
        let projected = project_to_plane_2d(&points, &Point3::new(0.0, 0.0, 5.0), &Vector3::z());
        let dx = projected[0][0] - projected[1][0];
        let dy = projected[0][1] - projected[1][1];
        assert!(((dx * dx + dy * dy).sqrt() - 5.0f64.sqrt()).abs() < 1e-9);
    }
}
