use super::params::{self, PairParameters};
use crate::core::models::ids::ResidueIndex;
use crate::core::models::pair::{BasePairKind, HydrogenBond};
use crate::core::models::residue::BaseClass;
use crate::core::models::structure::Structure;
use crate::core::tables::bases;
use crate::core::utils::geometry;
use crate::engine::config::{PairConfig, ParameterCompat};
use crate::engine::hbond::optimizer;
use nalgebra::{Point3, Vector3};
use tracing::trace;

const WC_SHEAR_MAX: f64 = 2.0;
const WC_STRETCH_MAX: f64 = 2.0;
const WOBBLE_SHEAR_MAX: f64 = 3.0;
const MAX_OPENING: f64 = 60.0;

/// Geometric descriptors of one candidate pair, computed from the two frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairGeometry {
    pub origin_distance: f64,
    pub vertical_distance: f64,
    pub plane_angle: f64,
    pub nn_distance: f64,
    pub overlap_area: f64,
}

/// A candidate pair that passed every geometric gate, ready for selection.
#[derive(Debug, Clone, PartialEq)]
pub struct PairCandidate {
    pub kind: BasePairKind,
    pub hbonds: Vec<HydrogenBond>,
    /// Lower is better; meaningful only while selection runs.
    pub quality: f64,
    pub geometry: PairGeometry,
}

fn glycosidic_position(structure: &Structure, residue: ResidueIndex) -> Option<Point3<f64>> {
    let idx = structure.residue(residue)?.glycosidic_nitrogen()?;
    structure.atom(idx).map(|a| a.position)
}

/// Ring perimeter of a residue projected onto the shared mid-plane, as a 2D
/// polygon in the plane's basis. Missing perimeter atoms are skipped.
fn projected_ring(
    structure: &Structure,
    residue: ResidueIndex,
    origin: &Point3<f64>,
    normal: &Vector3<f64>,
) -> Vec<[f64; 2]> {
    let Some(res) = structure.residue(residue) else {
        return Vec::new();
    };
    let perimeter: &[&str] = match res.base_class {
        BaseClass::Purine => &bases::PURINE_PERIMETER,
        _ => &bases::PYRIMIDINE_PERIMETER,
    };
    let points: Vec<Point3<f64>> = perimeter
        .iter()
        .filter_map(|name| structure.atom_position(residue, name))
        .collect();
    geometry::project_to_plane_2d(&points, origin, normal)
}

/// Classifies a candidate by canonical type from its six pair parameters and
/// accepted hydrogen bonds.
///
/// `compat` selects which parameter indices feed the shear/stretch checks:
/// `Legacy` reads shift/slide, reproducing the historical defect, `Corrected`
/// reads slide/rise. A non-canonical pair bonded through a purine N7 is
/// reported as Hoogsteen.
fn classify(
    identity_i: char,
    identity_j: char,
    params: &PairParameters,
    compat: ParameterCompat,
    hbonds: &[HydrogenBond],
) -> BasePairKind {
    let (shear, stretch) = match compat {
        ParameterCompat::Legacy => (params.shift, params.slide),
        ParameterCompat::Corrected => (params.slide, params.rise),
    };
    let opening = params.twist;

    if stretch.abs() <= WC_STRETCH_MAX && opening.abs() <= MAX_OPENING {
        if shear.abs() <= WC_SHEAR_MAX && bases::is_watson_crick_code(identity_i, identity_j) {
            return BasePairKind::WatsonCrick;
        }
        if shear.abs() <= WOBBLE_SHEAR_MAX && bases::is_wobble_code(identity_i, identity_j) {
            return BasePairKind::Wobble;
        }
    }

    let through_n7 = hbonds
        .iter()
        .any(|b| b.donor_atom == "N7" || b.acceptor_atom == "N7");
    if through_n7 {
        BasePairKind::Hoogsteen
    } else {
        BasePairKind::Unknown
    }
}

/// Evaluates one directed residue pair against every geometric gate.
///
/// A failed gate is a normal negative outcome and yields `None`, never an
/// error. Residues without frames are invisible here.
pub fn validate(
    structure: &Structure,
    res_i: ResidueIndex,
    res_j: ResidueIndex,
    config: &PairConfig,
) -> Option<PairCandidate> {
    let frame_i = *structure.frame(res_i)?;
    let frame_j = *structure.frame(res_j)?;

    let d = frame_j.origin - frame_i.origin;
    let origin_distance = d.norm();
    if origin_distance > config.max_origin_distance {
        trace!(i = %res_i, j = %res_j, origin_distance, "origin distance gate");
        return None;
    }

    let n1 = frame_i.normal();
    let mut n2 = frame_j.normal();
    if n1.dot(&n2) < 0.0 {
        n2 = -n2;
    }
    let mean_normal = (n1 + n2).normalize();

    let vertical_distance = d.dot(&mean_normal).abs();
    if vertical_distance > config.max_vertical_distance {
        trace!(i = %res_i, j = %res_j, vertical_distance, "vertical distance gate");
        return None;
    }

    let plane_angle = geometry::plane_angle_degrees(&frame_i.normal(), &frame_j.normal());
    if plane_angle > config.max_plane_angle {
        trace!(i = %res_i, j = %res_j, plane_angle, "plane angle gate");
        return None;
    }

    let nn_distance =
        match (glycosidic_position(structure, res_i), glycosidic_position(structure, res_j)) {
            (Some(a), Some(b)) => (b - a).norm(),
            _ => {
                trace!(i = %res_i, j = %res_j, "glycosidic nitrogen missing");
                return None;
            }
        };
    if nn_distance < config.min_nn_distance || nn_distance > config.max_nn_distance {
        trace!(i = %res_i, j = %res_j, nn_distance, "ring nitrogen distance gate");
        return None;
    }

    let mid = Point3::from((frame_i.origin.coords + frame_j.origin.coords) / 2.0);
    let ring_i = projected_ring(structure, res_i, &mid, &mean_normal);
    let ring_j = projected_ring(structure, res_j, &mid, &mean_normal);
    let overlap_area = geometry::convex_overlap_area(&ring_i, &ring_j);
    if overlap_area > config.max_overlap_area {
        trace!(i = %res_i, j = %res_j, overlap_area, "stacked, not paired");
        return None;
    }

    let hbonds = optimizer::optimize_pair(structure, res_i, res_j, config);
    if hbonds.len() < config.min_hbond_count {
        trace!(i = %res_i, j = %res_j, count = hbonds.len(), "hydrogen bond count gate");
        return None;
    }

    let identity_i = bases::effective_identity(structure.residue(res_i)?)?;
    let identity_j = bases::effective_identity(structure.residue(res_j)?)?;

    let params = params::pair_parameters(&frame_i, &frame_j);
    let kind = classify(identity_i, identity_j, &params, config.parameter_compat, &hbonds);

    let ideal = hbonds
        .iter()
        .filter(|b| b.distance >= config.hbond_ideal_min && b.distance <= config.hbond_ideal_max)
        .count();
    let hbond_adjustment = if ideal >= 2 { 3.0 } else { ideal as f64 };

    let mut quality =
        origin_distance + 2.0 * vertical_distance + plane_angle / 20.0 - hbond_adjustment;
    if kind == BasePairKind::WatsonCrick {
        quality -= config.wc_quality_bonus;
    }

    Some(PairCandidate {
        kind,
        hbonds,
        quality,
        geometry: PairGeometry {
            origin_distance,
            vertical_distance,
            plane_angle,
            nn_distance,
            overlap_area,
        },
    })
}
