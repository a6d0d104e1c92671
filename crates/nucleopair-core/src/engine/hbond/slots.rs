use crate::core::models::ids::ResidueIndex;
use crate::core::models::structure::Structure;
use crate::core::tables::bases;
use crate::core::tables::hbond::{self, Hybridization};
use crate::core::utils::geometry;
use nalgebra::{Point3, Unit, Vector3};

const TETRAHEDRAL_ANGLE: f64 = 109.47;

/// One predicted donor or acceptor site direction with its bond budget.
///
/// Scoped to a single pair evaluation; consumed directions accumulate so the
/// bifurcation-angle constraint can be checked against every bond already
/// assigned to this slot.
#[derive(Debug, Clone)]
pub struct Slot {
    pub direction: Unit<Vector3<f64>>,
    pub capacity: u8,
    assigned: Vec<Unit<Vector3<f64>>>,
}

impl Slot {
    fn new(direction: Unit<Vector3<f64>>, capacity: u8) -> Self {
        Self {
            direction,
            capacity,
            assigned: Vec::new(),
        }
    }

    pub fn assigned_count(&self) -> usize {
        self.assigned.len()
    }

    /// Whether a bond along `direction` still fits: remaining capacity, and at
    /// least `min_bifurcation_angle` degrees away from every bond already here.
    pub fn can_accept(&self, direction: &Unit<Vector3<f64>>, min_bifurcation_angle: f64) -> bool {
        if self.assigned.len() >= self.capacity as usize {
            return false;
        }
        self.assigned.iter().all(|existing| {
            geometry::angle_between_degrees(existing, direction) >= min_bifurcation_angle
        })
    }

    pub fn consume(&mut self, direction: Unit<Vector3<f64>>) {
        self.assigned.push(direction);
    }
}

/// All predicted slots of one polar atom, plus what the simplified
/// distance-only mode needs: bare donor/acceptor bond budgets.
#[derive(Debug, Clone)]
pub struct AtomSites {
    pub atom_name: String,
    pub position: Point3<f64>,
    pub h_slots: Vec<Slot>,
    pub lp_slots: Vec<Slot>,
    /// Total donor bonds this atom may form regardless of slot geometry.
    pub donor_capacity: u8,
    /// Total acceptor bonds this atom may form regardless of slot geometry.
    pub acceptor_capacity: u8,
}

impl AtomSites {
    pub fn is_donor(&self) -> bool {
        self.donor_capacity > 0
    }

    pub fn is_acceptor(&self) -> bool {
        self.acceptor_capacity > 0
    }
}

fn neighbor_positions(
    structure: &Structure,
    residue: ResidueIndex,
    names: &[&str],
) -> Option<Vec<Point3<f64>>> {
    names
        .iter()
        .map(|name| structure.atom_position(residue, name))
        .collect()
}

/// Unit vector opposite the average of the bond directions from `atom` to its
/// neighbors, projected into the base plane. This is the in-plane "outward"
/// direction shared by imino H slots and ring-nitrogen lone pairs.
fn outward_in_plane(
    atom: &Point3<f64>,
    neighbors: &[Point3<f64>],
    normal: &Vector3<f64>,
) -> Option<Unit<Vector3<f64>>> {
    let mut sum = Vector3::zeros();
    for n in neighbors {
        sum += (n - atom).normalize();
    }
    let projected = geometry::project_onto_plane(&(-sum), normal);
    if projected.norm() < 1.0e-9 {
        return None;
    }
    Some(Unit::new_normalize(projected))
}

fn predict_slots(
    class: Hybridization,
    atom: &Point3<f64>,
    neighbors: &[Point3<f64>],
    normal: &Vector3<f64>,
) -> (Vec<Slot>, Vec<Slot>) {
    match class {
        // Two in-plane N-H directions at +-120 degrees from the N-C bond.
        Hybridization::Amino => {
            let Some(axis) = geometry::unit_between(atom, &neighbors[0]) else {
                return (Vec::new(), Vec::new());
            };
            let h = [120.0, -120.0]
                .iter()
                .map(|&angle| {
                    Slot::new(
                        Unit::new_normalize(geometry::rotate_about(normal, angle, &axis)),
                        1,
                    )
                })
                .collect();
            (h, Vec::new())
        }
        Hybridization::Imino => {
            let Some(dir) = outward_in_plane(atom, neighbors, normal) else {
                return (Vec::new(), Vec::new());
            };
            (vec![Slot::new(dir, 2)], Vec::new())
        }
        // Two in-plane lone pairs at +-120 degrees from the C=O axis.
        Hybridization::Carbonyl => {
            let Some(axis) = geometry::unit_between(atom, &neighbors[0]) else {
                return (Vec::new(), Vec::new());
            };
            let lp = [120.0, -120.0]
                .iter()
                .map(|&angle| {
                    Slot::new(
                        Unit::new_normalize(geometry::rotate_about(normal, angle, &axis)),
                        1,
                    )
                })
                .collect();
            (Vec::new(), lp)
        }
        Hybridization::RingNitrogen => {
            let Some(dir) = outward_in_plane(atom, neighbors, normal) else {
                return (Vec::new(), Vec::new());
            };
            (Vec::new(), vec![Slot::new(dir, 2)])
        }
        // Tetrahedral heuristic for the 2'-hydroxyl: three directions at the
        // tetrahedral angle from the O-C bond, 120 degrees apart in azimuth.
        // One is treated as the hydrogen, the other two as lone pairs.
        Hybridization::Hydroxyl => {
            let Some(to_carbon) = geometry::unit_between(atom, &neighbors[0]) else {
                return (Vec::new(), Vec::new());
            };
            let tilt_axis = geometry::perpendicular_to(&to_carbon, normal);
            let first =
                geometry::rotate_about(&tilt_axis, TETRAHEDRAL_ANGLE, &to_carbon);
            let h = Slot::new(Unit::new_normalize(first), 1);
            let lp = [120.0, 240.0]
                .iter()
                .map(|&azimuth| {
                    Slot::new(
                        Unit::new_normalize(geometry::rotate_about(
                            &to_carbon, azimuth, &first,
                        )),
                        1,
                    )
                })
                .collect();
            (vec![h], lp)
        }
    }
}

/// Predicts donor/acceptor slot geometry for every polar site of a residue.
///
/// Atoms without an entry in the polar-site table are skipped; sites whose
/// required bonded neighbors are missing contribute an entry with empty slot
/// lists but intact bare capacities, so the distance-only mode still sees them.
pub fn predict_sites(
    structure: &Structure,
    residue: ResidueIndex,
    normal: &Vector3<f64>,
) -> Vec<AtomSites> {
    let Some(res) = structure.residue(residue) else {
        return Vec::new();
    };
    let Some(identity) = bases::effective_identity(res) else {
        return Vec::new();
    };

    let mut sites = Vec::new();
    for &atom_idx in res.atoms() {
        let Some(atom) = structure.atom(atom_idx) else {
            continue;
        };
        let Some(spec) = hbond::site_spec(identity, &atom.name) else {
            continue;
        };

        let donor_capacity = total_capacity(spec.class, spec.h_slots);
        let acceptor_capacity = total_capacity(spec.class, spec.lp_slots);

        let (h_slots, lp_slots) = match hbond::site_neighbors(identity, &atom.name)
            .and_then(|names| neighbor_positions(structure, residue, names))
        {
            Some(neighbors) => predict_slots(spec.class, &atom.position, &neighbors, normal),
            None => (Vec::new(), Vec::new()),
        };

        sites.push(AtomSites {
            atom_name: atom.name.clone(),
            position: atom.position,
            h_slots,
            lp_slots,
            donor_capacity,
            acceptor_capacity,
        });
    }
    sites
}

fn total_capacity(class: Hybridization, slots: u8) -> u8 {
    if slots == 0 {
        return 0;
    }
    match class {
        // One slot carrying up to two bifurcated bonds.
        Hybridization::Imino | Hybridization::RingNitrogen => 2,
        // One bond per slot.
        Hybridization::Amino | Hybridization::Carbonyl | Hybridization::Hydroxyl => slots,
    }
}
