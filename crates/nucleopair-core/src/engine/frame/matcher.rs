use crate::core::models::ids::ResidueIndex;
use crate::core::models::structure::Structure;
use crate::core::tables::bases;
use nalgebra::Point3;

/// The named ring atoms actually present and matched for one residue:
/// template and experimental coordinates paired by canonical name.
#[derive(Debug, Clone, PartialEq)]
pub struct RingAtomSet {
    pub names: Vec<&'static str>,
    pub template: Vec<Point3<f64>>,
    pub experimental: Vec<Point3<f64>>,
    /// Whether purine-specific atoms were part of the match.
    pub purine_included: bool,
}

impl RingAtomSet {
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// True-purine test: purine-specific atoms are trusted only when both members
/// of the defining pair are present. A modified pyrimidine carrying a
/// side-chain atom that happens to be named like a purine ring atom fails
/// this test and is matched on the six-membered ring.
pub fn is_true_purine(structure: &Structure, residue: ResidueIndex) -> bool {
    structure
        .residue(residue)
        .is_some_and(bases::has_purine_pair)
}

/// Matches a residue's atoms onto its standard-base template ring.
///
/// With `include_purine` the full 9-atom purine ring is used; otherwise only
/// the six atoms shared with the pyrimidine ring, taken from the same base's
/// template so a purine can still be fit on its six-membered ring.
pub fn match_ring_atoms(
    structure: &Structure,
    residue: ResidueIndex,
    include_purine: bool,
) -> RingAtomSet {
    let mut set = RingAtomSet {
        names: Vec::new(),
        template: Vec::new(),
        experimental: Vec::new(),
        purine_included: include_purine,
    };

    let Some(res) = structure.residue(residue) else {
        return set;
    };
    let Some(identity) = bases::effective_identity(res) else {
        return set;
    };
    let Some(template) = bases::template_atoms(identity) else {
        return set;
    };

    let ring_names: &[&str] = if include_purine {
        &bases::PURINE_RING
    } else {
        &bases::PYRIMIDINE_RING
    };

    for &name in ring_names {
        let Some(tpl) = template.iter().find(|a| a.name == name) else {
            continue;
        };
        let Some(position) = structure.atom_position(residue, name) else {
            continue;
        };
        set.names.push(name);
        set.template.push(tpl.position());
        set.experimental.push(position);
    }
    set
}

#[cfg(test)]
mod tests {
    use super::*;

    fn structure_with_template(name: &str, identity: char) -> (Structure, ResidueIndex) {
        let mut structure = Structure::new();
        let res = structure.add_residue(name, 1, 'A', None);
        for atom in bases::template_atoms(identity).unwrap() {
            structure.add_atom(res, atom.name, atom.position());
        }
        (structure, res)
    }

    #[test]
    fn purine_matches_all_nine_ring_atoms() {
        let (structure, res) = structure_with_template("ADE", 'A');
        assert!(is_true_purine(&structure, res));
        let set = match_ring_atoms(&structure, res, true);
        assert_eq!(set.len(), 9);
        assert!(set.purine_included);
    }

    #[test]
    fn pyrimidine_matches_six_ring_atoms() {
        let (structure, res) = structure_with_template("URA", 'U');
        assert!(!is_true_purine(&structure, res));
        let set = match_ring_atoms(&structure, res, false);
        assert_eq!(set.len(), 6);
        assert_eq!(set.names, bases::PYRIMIDINE_RING);
    }

    #[test]
    fn stray_purine_named_atom_without_partner_fails_true_purine_test() {
        let (mut structure, res) = structure_with_template("URA", 'U');
        // Side-chain atom on a modified base reusing a purine ring name.
        structure.add_atom(res, "C8", Point3::new(4.0, 6.0, 0.5));
        assert!(!is_true_purine(&structure, res));
        let set = match_ring_atoms(&structure, res, false);
        assert_eq!(set.len(), 6);
        assert!(!set.names.contains(&"C8"));
    }

    #[test]
    fn purine_restricted_to_six_ring_uses_own_template() {
        let (structure, res) = structure_with_template("GUA", 'G');
        let set = match_ring_atoms(&structure, res, false);
        assert_eq!(set.len(), 6);
        // Template coordinates come from guanine, not a generic pyrimidine.
        let n1 = bases::template_atoms('G')
            .unwrap()
            .iter()
            .find(|a| a.name == "N1")
            .unwrap();
        let pos = set.template[set.names.iter().position(|&n| n == "N1").unwrap()];
        assert_eq!(pos, n1.position());
    }

    #[test]
    fn missing_atoms_are_skipped_not_errors() {
        let mut structure = Structure::new();
        let res = structure.add_residue("URA", 1, 'A', None);
        structure.add_atom(res, "N1", Point3::origin());
        structure.add_atom(res, "C2", Point3::new(1.3, 0.0, 0.0));
        let set = match_ring_atoms(&structure, res, false);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn unclassified_residue_yields_empty_set() {
        let mut structure = Structure::new();
        let res = structure.add_residue("HOH", 1, 'W', None);
        structure.add_atom(res, "O", Point3::origin());
        assert!(match_ring_atoms(&structure, res, false).is_empty());
    }
}
