use super::slots::{AtomSites, predict_sites};
use crate::core::models::ids::ResidueIndex;
use crate::core::models::pair::HydrogenBond;
use crate::core::models::structure::Structure;
use crate::core::utils::geometry;
use crate::engine::config::{HBondMode, PairConfig};
use nalgebra::Unit;
use std::cmp::Ordering;
use tracing::trace;

/// One donor-acceptor contact under consideration. `donor_side` is 0 when the
/// first residue donates, 1 when the second does; `donor`/`acceptor` index
/// into the respective residue's site list.
#[derive(Debug, Clone)]
struct Candidate {
    donor_side: usize,
    donor: usize,
    acceptor: usize,
    distance: f64,
    score: f64,
}

fn atom_is_on_base(name: &str) -> bool {
    !name.contains('\'') && !name.contains('*')
}

/// Best combined slot alignment for a contact: max over all (H-slot, LP-slot)
/// combinations of the two dot products against the contact axis. `None` when
/// either side has no usable slot geometry.
fn best_alignment(donor: &AtomSites, acceptor: &AtomSites) -> Option<f64> {
    let da = geometry::unit_between(&donor.position, &acceptor.position)?;
    let ad = Unit::new_normalize(-da.into_inner());
    let mut best: Option<f64> = None;
    for h in &donor.h_slots {
        for lp in &acceptor.lp_slots {
            let score = h.direction.dot(&da) + lp.direction.dot(&ad);
            best = Some(match best {
                Some(b) if b >= score => b,
                _ => score,
            });
        }
    }
    best
}

fn sort_candidates(candidates: &mut [Candidate]) {
    candidates.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then(a.distance.partial_cmp(&b.distance).unwrap_or(Ordering::Equal))
    });
}

/// Finds the maximum-quality non-conflicting hydrogen-bond assignment between
/// two residues.
///
/// Requires both residues to carry reference frames (the base normals anchor
/// slot geometry); returns an empty list otherwise. Zero accepted bonds is a
/// normal outcome, not an error. All slot state is local to this call.
pub fn optimize_pair(
    structure: &Structure,
    res_i: ResidueIndex,
    res_j: ResidueIndex,
    config: &PairConfig,
) -> Vec<HydrogenBond> {
    let (Some(frame_i), Some(frame_j)) = (structure.frame(res_i), structure.frame(res_j)) else {
        return Vec::new();
    };
    let sites = [
        predict_sites(structure, res_i, &frame_i.normal()),
        predict_sites(structure, res_j, &frame_j.normal()),
    ];

    match config.hbond_mode {
        HBondMode::Geometric => optimize_geometric(sites, config),
        HBondMode::DistanceOnly => optimize_distance_only(sites, config),
    }
}

fn optimize_geometric(mut sites: [Vec<AtomSites>; 2], config: &PairConfig) -> Vec<HydrogenBond> {
    let mut candidates = Vec::new();
    for donor_side in 0..2 {
        let (donors, acceptors) = (&sites[donor_side], &sites[1 - donor_side]);
        for (di, donor) in donors.iter().enumerate() {
            if donor.h_slots.is_empty() {
                continue;
            }
            for (ai, acceptor) in acceptors.iter().enumerate() {
                if acceptor.lp_slots.is_empty() {
                    continue;
                }
                let distance = (donor.position - acceptor.position).norm();
                if distance > config.hbond_dist_max {
                    continue;
                }
                let Some(score) = best_alignment(donor, acceptor) else {
                    continue;
                };
                candidates.push(Candidate {
                    donor_side,
                    donor: di,
                    acceptor: ai,
                    distance,
                    score,
                });
            }
        }
    }
    sort_candidates(&mut candidates);

    let mut bonds = Vec::new();
    let mut bonded_atom_pairs: Vec<(usize, usize, usize)> = Vec::new();
    for candidate in candidates {
        // Very close contacts bypass the alignment gate.
        if candidate.distance >= config.hbond_short_dist
            && candidate.score < config.min_alignment_score
        {
            trace!(
                score = candidate.score,
                distance = candidate.distance,
                "candidate below alignment gate"
            );
            continue;
        }

        // One bond per unordered atom pair.
        let pair_key = if candidate.donor_side == 0 {
            (0, candidate.donor, candidate.acceptor)
        } else {
            (0, candidate.acceptor, candidate.donor)
        };
        if bonded_atom_pairs.contains(&pair_key) {
            continue;
        }

        let [sites_i, sites_j] = &mut sites;
        let (donor, acceptor) = if candidate.donor_side == 0 {
            (&mut sites_i[candidate.donor], &mut sites_j[candidate.acceptor])
        } else {
            (&mut sites_j[candidate.donor], &mut sites_i[candidate.acceptor])
        };

        let Some(da) = geometry::unit_between(&donor.position, &acceptor.position) else {
            continue;
        };
        let ad = Unit::new_normalize(-da.into_inner());

        // All slot combinations for this atom pair, best-scoring first, taking
        // the first one that survives capacity and bifurcation constraints.
        let mut combos: Vec<(usize, usize, f64)> = Vec::new();
        for (hi, h) in donor.h_slots.iter().enumerate() {
            for (li, lp) in acceptor.lp_slots.iter().enumerate() {
                combos.push((hi, li, h.direction.dot(&da) + lp.direction.dot(&ad)));
            }
        }
        combos.sort_by(|a, b| b.2.partial_cmp(&a.2).unwrap_or(Ordering::Equal));

        let chosen = combos.into_iter().find(|&(hi, li, _)| {
            donor.h_slots[hi].can_accept(&da, config.min_bifurcation_angle)
                && acceptor.lp_slots[li].can_accept(&ad, config.min_bifurcation_angle)
        });
        let Some((hi, li, _)) = chosen else {
            continue;
        };

        donor.h_slots[hi].consume(da);
        acceptor.lp_slots[li].consume(ad);
        bonded_atom_pairs.push(pair_key);
        bonds.push(HydrogenBond {
            donor_atom: donor.atom_name.clone(),
            acceptor_atom: acceptor.atom_name.clone(),
            distance: candidate.distance,
            standard: atom_is_on_base(&donor.atom_name) && atom_is_on_base(&acceptor.atom_name),
        });
    }
    bonds
}

/// Simplified baseline: distance cutoff plus bare per-atom bond budgets, no
/// slot geometry. Kept selectable for legacy-parity scoring.
fn optimize_distance_only(sites: [Vec<AtomSites>; 2], config: &PairConfig) -> Vec<HydrogenBond> {
    let mut candidates = Vec::new();
    for donor_side in 0..2 {
        let (donors, acceptors) = (&sites[donor_side], &sites[1 - donor_side]);
        for (di, donor) in donors.iter().enumerate() {
            if !donor.is_donor() {
                continue;
            }
            for (ai, acceptor) in acceptors.iter().enumerate() {
                if !acceptor.is_acceptor() {
                    continue;
                }
                let distance = (donor.position - acceptor.position).norm();
                if distance > config.hbond_dist_max {
                    continue;
                }
                candidates.push(Candidate {
                    donor_side,
                    donor: di,
                    acceptor: ai,
                    distance,
                    score: 0.0,
                });
            }
        }
    }
    candidates.sort_by(|a, b| a.distance.partial_cmp(&b.distance).unwrap_or(Ordering::Equal));

    let mut donor_budget: [Vec<u8>; 2] = [
        sites[0].iter().map(|s| s.donor_capacity).collect(),
        sites[1].iter().map(|s| s.donor_capacity).collect(),
    ];
    let mut acceptor_budget: [Vec<u8>; 2] = [
        sites[0].iter().map(|s| s.acceptor_capacity).collect(),
        sites[1].iter().map(|s| s.acceptor_capacity).collect(),
    ];

    let mut bonds = Vec::new();
    let mut bonded_atom_pairs: Vec<(usize, usize, usize)> = Vec::new();
    for candidate in candidates {
        let donor_side = candidate.donor_side;
        let acceptor_side = 1 - donor_side;
        if donor_budget[donor_side][candidate.donor] == 0
            || acceptor_budget[acceptor_side][candidate.acceptor] == 0
        {
            continue;
        }
        let pair_key = if donor_side == 0 {
            (0, candidate.donor, candidate.acceptor)
        } else {
            (0, candidate.acceptor, candidate.donor)
        };
        if bonded_atom_pairs.contains(&pair_key) {
            continue;
        }
        donor_budget[donor_side][candidate.donor] -= 1;
        acceptor_budget[acceptor_side][candidate.acceptor] -= 1;
        bonded_atom_pairs.push(pair_key);

        let donor = &sites[donor_side][candidate.donor];
        let acceptor = &sites[acceptor_side][candidate.acceptor];
        bonds.push(HydrogenBond {
            donor_atom: donor.atom_name.clone(),
            acceptor_atom: acceptor.atom_name.clone(),
            distance: candidate.distance,
            standard: atom_is_on_base(&donor.atom_name) && atom_is_on_base(&acceptor.atom_name),
        });
    }
    bonds
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::frame::ReferenceFrame;
    use crate::core::tables::bases;
    use nalgebra::{Matrix3, Point3, Vector3};

    fn identity_frame() -> ReferenceFrame {
        ReferenceFrame::new(Matrix3::identity(), Point3::origin(), 0.0)
    }

    fn flipped_frame() -> ReferenceFrame {
        // Rotation flipping y and z: the frame of a base paired across the
        // pseudo-dyad in standard reference coordinates.
        ReferenceFrame::new(
            Matrix3::from_diagonal(&Vector3::new(1.0, -1.0, -1.0)),
            Point3::origin(),
            0.0,
        )
    }

    /// Adenine at its standard-frame template plus thymine flipped across the
    /// x axis, which places the two bases in canonical Watson-Crick contact.
    fn watson_crick_at() -> (Structure, ResidueIndex, ResidueIndex) {
        let mut structure = Structure::new();
        let a = structure.add_residue("ADE", 1, 'A', None);
        for atom in bases::template_atoms('A').unwrap() {
            structure.add_atom(a, atom.name, atom.position());
        }
        let t = structure.add_residue("THY", 2, 'B', None);
        for atom in bases::template_atoms('T').unwrap() {
            let p = atom.position();
            structure.add_atom(t, atom.name, Point3::new(p.x, -p.y, -p.z));
        }
        structure.set_frame(a, identity_frame());
        structure.set_frame(t, flipped_frame());
        (structure, a, t)
    }

    #[test]
    fn watson_crick_at_yields_two_standard_bonds() {
        let (structure, a, t) = watson_crick_at();
        let bonds = optimize_pair(&structure, a, t, &PairConfig::default());
        assert_eq!(bonds.len(), 2);
        assert!(bonds.iter().all(|b| b.standard));
        assert!(
            bonds
                .iter()
                .any(|b| b.donor_atom == "N6" && b.acceptor_atom == "O4")
        );
        assert!(
            bonds
                .iter()
                .any(|b| b.donor_atom == "N3" && b.acceptor_atom == "N1")
        );
        for bond in &bonds {
            assert!(bond.distance > 2.8 && bond.distance < 3.2);
        }
    }

    #[test]
    fn missing_frames_yield_no_bonds() {
        let (mut structure, _, _) = watson_crick_at();
        let a = structure.add_residue("ADE", 3, 'C', None);
        let b = structure.add_residue("URA", 4, 'C', None);
        assert!(optimize_pair(&structure, a, b, &PairConfig::default()).is_empty());
    }

    /// An imino donor facing two acceptors whose contact directions differ by
    /// well under the bifurcation angle: only the better-aligned one sticks.
    fn bifurcation_fixture() -> (Structure, ResidueIndex, ResidueIndex) {
        let mut structure = Structure::new();
        let donor = structure.add_residue("URA", 1, 'A', None);
        structure.add_atom(donor, "N3", Point3::origin());
        structure.add_atom(donor, "C2", Point3::new(-1.2, -0.7, 0.0));
        structure.add_atom(donor, "C4", Point3::new(1.2, -0.7, 0.0));

        let acceptor = structure.add_residue("CYT", 2, 'B', None);
        structure.add_atom(acceptor, "O2", Point3::new(0.3, 2.9, 0.0));
        structure.add_atom(acceptor, "C2", Point3::new(0.3, 4.3, 0.0));
        structure.add_atom(acceptor, "N3", Point3::new(-0.4, 3.0, 0.0));
        structure.add_atom(acceptor, "C4", Point3::new(-1.6, 3.6, 0.0));

        structure.set_frame(donor, identity_frame());
        structure.set_frame(acceptor, identity_frame());
        (structure, donor, acceptor)
    }

    #[test]
    fn bifurcated_donor_keeps_only_the_better_aligned_bond() {
        let (structure, donor, acceptor) = bifurcation_fixture();
        let bonds = optimize_pair(&structure, donor, acceptor, &PairConfig::default());
        assert_eq!(bonds.len(), 1);
        assert_eq!(bonds[0].donor_atom, "N3");
        assert_eq!(bonds[0].acceptor_atom, "N3");
    }

    #[test]
    fn wide_bifurcation_angle_admits_both_bonds() {
        let (structure, donor, acceptor) = bifurcation_fixture();
        let config = PairConfig {
            min_bifurcation_angle: 10.0,
            ..PairConfig::default()
        };
        let bonds = optimize_pair(&structure, donor, acceptor, &config);
        assert_eq!(bonds.len(), 2);
    }

    #[test]
    fn distance_only_mode_ignores_slot_geometry() {
        let (structure, donor, acceptor) = bifurcation_fixture();
        let config = PairConfig {
            hbond_mode: HBondMode::DistanceOnly,
            ..PairConfig::default()
        };
        let bonds = optimize_pair(&structure, donor, acceptor, &config);
        // The imino nitrogen's bare budget of two bonds admits both contacts,
        // nearest first.
        assert_eq!(bonds.len(), 2);
        assert_eq!(bonds[0].acceptor_atom, "O2");
        assert_eq!(bonds[1].acceptor_atom, "N3");
    }

    #[test]
    fn contacts_beyond_the_distance_cutoff_are_never_candidates() {
        let (structure, donor, acceptor) = bifurcation_fixture();
        let config = PairConfig {
            hbond_dist_max: 2.0,
            ..PairConfig::default()
        };
        assert!(optimize_pair(&structure, donor, acceptor, &config).is_empty());
    }

    #[test]
    fn poorly_aligned_long_contact_is_gated_but_short_contact_passes() {
        // Donor H slot points +y; acceptor placed along -y so alignment is
        // strongly negative.
        let mut structure = Structure::new();
        let donor = structure.add_residue("URA", 1, 'A', None);
        structure.add_atom(donor, "N3", Point3::origin());
        structure.add_atom(donor, "C2", Point3::new(-1.2, 0.7, 0.0));
        structure.add_atom(donor, "C4", Point3::new(1.2, 0.7, 0.0));
        let acceptor = structure.add_residue("CYT", 2, 'B', None);
        structure.add_atom(acceptor, "O2", Point3::new(0.0, 3.0, 0.0));
        structure.add_atom(acceptor, "C2", Point3::new(0.0, 4.4, 0.0));
        structure.set_frame(donor, identity_frame());
        structure.set_frame(acceptor, identity_frame());

        let bonds = optimize_pair(&structure, donor, acceptor, &PairConfig::default());
        assert!(bonds.is_empty());

        // The same geometry inside the short-contact distance skips the gate.
        let close = PairConfig {
            hbond_short_dist: 3.5,
            ..PairConfig::default()
        };
        let bonds = optimize_pair(&structure, donor, acceptor, &close);
        assert_eq!(bonds.len(), 1);
    }
}
