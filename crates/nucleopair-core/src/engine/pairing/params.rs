use crate::core::models::frame::ReferenceFrame;
use crate::core::utils::geometry;
use nalgebra::{Matrix3, Rotation3, Unit, Vector3};

const DEGENERATE_NORM: f64 = 1.0e-9;

/// The six rigid-body parameters relating two base frames, computed with the
/// symmetric hinge decomposition: translations along and rotations about the
/// axes of the mid-frame between the two bases.
///
/// For a base pair the same six numbers are conventionally read as
/// shear/stretch/stagger and buckle/propeller/opening.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairParameters {
    pub shift: f64,
    pub slide: f64,
    pub rise: f64,
    pub tilt: f64,
    pub roll: f64,
    pub twist: f64,
}

fn column(m: &Matrix3<f64>, i: usize) -> Vector3<f64> {
    m.column(i).into_owned()
}

/// Computes the six parameters for a base pair.
///
/// The second frame is flipped (y and z axes negated) when the two base
/// normals are anti-parallel, which is the usual situation for paired bases,
/// so that the hinge decomposition operates on co-oriented frames.
pub fn pair_parameters(frame_i: &ReferenceFrame, frame_j: &ReferenceFrame) -> PairParameters {
    let r1 = frame_i.rotation;
    let mut r2 = frame_j.rotation;
    if column(&r1, 2).dot(&column(&r2, 2)) < 0.0 {
        let y = -column(&r2, 1);
        let z = -column(&r2, 2);
        r2.set_column(1, &y);
        r2.set_column(2, &z);
    }

    let z1 = column(&r1, 2);
    let z2 = column(&r2, 2);
    let x1 = column(&r1, 0);
    let x2 = column(&r2, 0);

    let rolltilt = geometry::angle_between_degrees(&z1, &z2);
    let hinge = z1.cross(&z2);

    // Rotate each frame halfway about the hinge so both normals coincide at
    // the mid-frame; degenerate hinge means the normals already agree.
    let (x1m, x2m, z1m, z2m, hinge_dir) = if hinge.norm() < DEGENERATE_NORM {
        (x1, x2, z1, z2, None)
    } else {
        let axis = Unit::new_normalize(hinge);
        let half = (rolltilt / 2.0).to_radians();
        let forward = Rotation3::from_axis_angle(&axis, half);
        let backward = Rotation3::from_axis_angle(&axis, -half);
        (
            forward * x1,
            backward * x2,
            forward * z1,
            backward * z2,
            Some(axis),
        )
    };

    let mz = (z1m + z2m).normalize();
    let mx = Unit::new_normalize(geometry::project_onto_plane(&(x1m + x2m), &mz)).into_inner();
    let my = mz.cross(&mx);

    let d = frame_j.origin - frame_i.origin;
    let twist = geometry::signed_angle_about(&mz, &x1m, &x2m);

    let (tilt, roll) = match hinge_dir {
        Some(axis) => {
            let phi = geometry::signed_angle_about(&mz, &axis, &my).to_radians();
            (rolltilt * phi.sin(), rolltilt * phi.cos())
        }
        None => (0.0, 0.0),
    };

    PairParameters {
        shift: d.dot(&mx),
        slide: d.dot(&my),
        rise: d.dot(&mz),
        tilt,
        roll,
        twist,
    }
}
