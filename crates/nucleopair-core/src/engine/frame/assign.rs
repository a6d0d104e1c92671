use super::{fitter, matcher};
use crate::core::models::frame::ReferenceFrame;
use crate::core::models::ids::ResidueIndex;
use crate::core::models::residue::BaseClass;
use crate::core::models::structure::Structure;
use crate::engine::config::PairConfig;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, instrument, trace};

/// Computes the frame for a single residue, applying the two-try policy:
/// a true purine is first fit on its full nine-atom ring; if the residual
/// exceeds the tolerance, the fit is retried on the six-membered ring alone.
/// A frame is produced only when the accepted fit meets the tolerance.
fn fit_residue(
    structure: &Structure,
    residue: ResidueIndex,
    config: &PairConfig,
) -> Option<ReferenceFrame> {
    let include_purine = matcher::is_true_purine(structure, residue);
    let set = matcher::match_ring_atoms(structure, residue, include_purine);
    let first = fitter::fit(&set.template, &set.experimental);

    match first {
        Ok(frame) if frame.rms <= config.frame_rms_tolerance => {
            trace!(residue = %residue, rms = frame.rms, "frame accepted");
            return Some(frame);
        }
        Ok(frame) if set.purine_included => {
            trace!(
                residue = %residue,
                rms = frame.rms,
                "nine-atom fit above tolerance, retrying on six-membered ring"
            );
        }
        Ok(frame) => {
            debug!(residue = %residue, rms = frame.rms, "frame rejected");
            return None;
        }
        Err(e) => {
            debug!(residue = %residue, error = %e, "frame fit failed");
            if !set.purine_included {
                return None;
            }
        }
    }

    let retry = matcher::match_ring_atoms(structure, residue, false);
    match fitter::fit(&retry.template, &retry.experimental) {
        Ok(frame) if frame.rms <= config.frame_rms_tolerance => {
            trace!(residue = %residue, rms = frame.rms, "six-ring frame accepted");
            Some(frame)
        }
        Ok(frame) => {
            debug!(residue = %residue, rms = frame.rms, "six-ring frame rejected");
            None
        }
        Err(e) => {
            debug!(residue = %residue, error = %e, "six-ring frame fit failed");
            None
        }
    }
}

/// Assigns reference frames to every pairable residue of the structure.
///
/// Residues classified [`BaseClass::Other`] are skipped. Fits run independently
/// per residue (in parallel under the `parallel` feature); the write-back is
/// always sequential in ordinal order, so the result is deterministic either
/// way. Residues whose fit fails or exceeds the tolerance keep no frame and
/// are invisible to the pairing stage.
#[instrument(skip_all)]
pub fn assign_frames(structure: &mut Structure, config: &PairConfig) {
    let candidates: Vec<ResidueIndex> = structure
        .residue_indices()
        .filter(|&idx| {
            structure
                .residue(idx)
                .is_some_and(|r| r.base_class != BaseClass::Other)
        })
        .collect();

    #[cfg(feature = "parallel")]
    let fitted: Vec<(ResidueIndex, Option<ReferenceFrame>)> = candidates
        .par_iter()
        .map(|&idx| (idx, fit_residue(structure, idx, config)))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let fitted: Vec<(ResidueIndex, Option<ReferenceFrame>)> = candidates
        .iter()
        .map(|&idx| (idx, fit_residue(structure, idx, config)))
        .collect();

    let mut assigned = 0usize;
    for (idx, frame) in fitted {
        if let Some(frame) = frame {
            structure.set_frame(idx, frame);
            assigned += 1;
        }
    }
    debug!(
        candidates = candidates.len(),
        assigned, "reference frame assignment finished"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tables::bases;
    use nalgebra::{Point3, Rotation3, Unit, Vector3};

    fn add_template_residue(
        structure: &mut Structure,
        name: &str,
        identity: char,
        seq: isize,
    ) -> ResidueIndex {
        let res = structure.add_residue(name, seq, 'A', None);
        for atom in bases::template_atoms(identity).unwrap() {
            structure.add_atom(res, atom.name, atom.position());
        }
        res
    }

    #[test]
    fn clean_template_residues_all_get_frames() {
        let mut structure = Structure::new();
        let a = add_template_residue(&mut structure, "ADE", 'A', 1);
        let u = add_template_residue(&mut structure, "URA", 'U', 2);
        assign_frames(&mut structure, &PairConfig::default());
        assert!(structure.frame(a).is_some());
        assert!(structure.frame(u).is_some());
        assert!(structure.frame(a).unwrap().rms < 1e-9);
    }

    #[test]
    fn transformed_residue_frame_recovers_the_transform() {
        let mut structure = Structure::new();
        let res = structure.add_residue("GUA", 1, 'A', None);
        let rotation = Rotation3::from_axis_angle(
            &Unit::new_normalize(Vector3::new(0.3, -1.0, 0.7)),
            1.1,
        );
        let shift = Vector3::new(10.0, -4.0, 6.0);
        for atom in bases::template_atoms('G').unwrap() {
            structure.add_atom(res, atom.name, rotation * atom.position() + shift);
        }
        assign_frames(&mut structure, &PairConfig::default());
        let frame = structure.frame(res).unwrap();
        assert!((frame.origin.coords - shift).norm() < 1e-9);
        assert!((frame.rotation - rotation.into_inner()).norm() < 1e-9);
    }

    #[test]
    fn distorted_imidazole_falls_back_to_six_ring() {
        let mut structure = Structure::new();
        let res = structure.add_residue("ADE", 1, 'A', None);
        for atom in bases::template_atoms('A').unwrap() {
            // Push the five-membered ring atoms far off the template while
            // keeping the six-membered ring pristine.
            let mut p = atom.position();
            if matches!(atom.name, "N9" | "C8" | "N7") {
                p.z += 1.5;
            }
            structure.add_atom(res, atom.name, p);
        }
        assign_frames(&mut structure, &PairConfig::default());
        let frame = structure.frame(res).unwrap();
        assert!(frame.rms < 1e-9);
    }

    #[test]
    fn hopelessly_distorted_residue_gets_no_frame() {
        let mut structure = Structure::new();
        let res = structure.add_residue("URA", 1, 'A', None);
        for (i, atom) in bases::template_atoms('U').unwrap().iter().enumerate() {
            let mut p = atom.position();
            p.z += (i as f64) * 0.9;
            structure.add_atom(res, atom.name, p);
        }
        assign_frames(&mut structure, &PairConfig::default());
        assert!(structure.frame(res).is_none());
    }

    #[test]
    fn non_base_residues_are_skipped() {
        let mut structure = Structure::new();
        let res = structure.add_residue("HOH", 1, 'W', None);
        structure.add_atom(res, "O", Point3::origin());
        assign_frames(&mut structure, &PairConfig::default());
        assert!(structure.frame(res).is_none());
    }

    #[test]
    fn residue_with_too_few_ring_atoms_gets_no_frame() {
        let mut structure = Structure::new();
        let res = structure.add_residue("URA", 1, 'A', None);
        structure.add_atom(res, "N1", Point3::origin());
        structure.add_atom(res, "C2", Point3::new(1.4, 0.0, 0.0));
        assign_frames(&mut structure, &PairConfig::default());
        assert!(structure.frame(res).is_none());
    }
}
