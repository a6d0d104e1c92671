use crate::core::models::frame::ReferenceFrame;
use nalgebra::{Matrix3, Point3, Vector3};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum FitError {
    #[error("need at least 3 paired atoms for frame fitting, got {found}")]
    InsufficientAtoms { found: usize },

    #[error("template and experimental point counts differ: {template} vs {experimental}")]
    LengthMismatch { template: usize, experimental: usize },
}

fn centroid(points: &[Point3<f64>]) -> Point3<f64> {
    let sum = points
        .iter()
        .fold(Vector3::zeros(), |acc, p| acc + p.coords);
    Point3::from(sum / points.len() as f64)
}

/// Computes the rigid rotation + translation minimizing the mean squared
/// deviation between template and experimental coordinates (SVD-based optimal
/// rotation after centroid centering), plus the RMS residual.
///
/// The returned rotation maps template coordinates into the experimental
/// (global) frame; the origin is `experimental_centroid - R * template_centroid`.
/// The fitter itself never rejects on fit quality; comparing the RMS against
/// an acceptance threshold is a caller concern.
pub fn fit(
    template: &[Point3<f64>],
    experimental: &[Point3<f64>],
) -> Result<ReferenceFrame, FitError> {
    if template.len() != experimental.len() {
        return Err(FitError::LengthMismatch {
            template: template.len(),
            experimental: experimental.len(),
        });
    }
    let n = template.len();
    if n < 3 {
        return Err(FitError::InsufficientAtoms { found: n });
    }

    let t_centroid = centroid(template);
    let e_centroid = centroid(experimental);

    // Cross-covariance H = sum of t_i * e_i^T over centered coordinates.
    let mut h = Matrix3::zeros();
    for i in 0..n {
        let t = template[i] - t_centroid;
        let e = experimental[i] - e_centroid;
        h += t * e.transpose();
    }

    let svd = h.svd(true, true);
    let u = svd.u.expect("SVD of a 3x3 matrix always yields U");
    let v_t = svd.v_t.expect("SVD of a 3x3 matrix always yields V^T");

    let mut v = v_t.transpose();
    let mut rotation = v * u.transpose();
    if rotation.determinant() < 0.0 {
        // Reflection fix: negate the column of V for the smallest singular value.
        let flipped = -v.column(2).into_owned();
        v.set_column(2, &flipped);
        rotation = v * u.transpose();
    }

    let origin = Point3::from(e_centroid.coords - rotation * t_centroid.coords);

    let mut squared_sum = 0.0;
    for i in 0..n {
        let mapped = rotation * (template[i] - t_centroid);
        let residual = (experimental[i] - e_centroid) - mapped;
        squared_sum += residual.norm_squared();
    }
    let rms = (squared_sum / n as f64).sqrt();

    Ok(ReferenceFrame::new(rotation, origin, rms))
}
