use nalgebra::{Matrix3, Point3, Vector3};

/// The local coordinate system of one base.
///
/// An orthonormal 3x3 rotation (columns are the base x/y/z axes expressed in
/// global coordinates) plus a 3D origin. Created once per residue by the frame
/// fitter; a later recalculation pass fully replaces the previous value
/// (latest wins, no versioning).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceFrame {
    pub rotation: Matrix3<f64>,
    pub origin: Point3<f64>,
    /// RMS residual of the template fit that produced this frame.
    pub rms: f64,
}

impl ReferenceFrame {
    pub fn new(rotation: Matrix3<f64>, origin: Point3<f64>, rms: f64) -> Self {
        Self {
            rotation,
            origin,
            rms,
        }
    }

    pub fn x_axis(&self) -> Vector3<f64> {
        self.rotation.column(0).into_owned()
    }

    pub fn y_axis(&self) -> Vector3<f64> {
        self.rotation.column(1).into_owned()
    }

    /// The base-plane normal (z axis of the frame).
    pub fn normal(&self) -> Vector3<f64> {
        self.rotation.column(2).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axes_are_rotation_columns() {
        let frame = ReferenceFrame::new(Matrix3::identity(), Point3::new(1.0, 2.0, 3.0), 0.0);
        assert_eq!(frame.x_axis(), Vector3::x());
        assert_eq!(frame.y_axis(), Vector3::y());
        assert_eq!(frame.normal(), Vector3::z());
        assert_eq!(frame.origin, Point3::new(1.0, 2.0, 3.0));
    }
}
