use super::atom::Atom;
use super::frame::ReferenceFrame;
use super::ids::{AtomIndex, ResidueIndex};
use super::residue::{BaseClass, Residue};
use crate::core::tables::bases;
use nalgebra::Point3;

/// A complete nucleic acid structure: flat arenas of residues and atoms.
///
/// Residues and atoms are stored in the order they arrive from the parser,
/// which must be original file order. Their vector positions are the stable
/// ordinals ([`ResidueIndex`], [`AtomIndex`]) used for all cross-references
/// and for every deterministic iteration downstream.
#[derive(Debug, Clone, Default)]
pub struct Structure {
    atoms: Vec<Atom>,
    residues: Vec<Residue>,
}

impl Structure {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a residue, classifying its base from the name registry.
    ///
    /// Names unknown to the registry start out as [`BaseClass::Other`]; call
    /// [`Structure::infer_base_classes`] once all atoms are present to upgrade
    /// modified residues by ring-atom content.
    pub fn add_residue(
        &mut self,
        name: &str,
        seq_num: isize,
        chain_id: char,
        icode: Option<char>,
    ) -> ResidueIndex {
        let base_class = bases::classify(name);
        let index = ResidueIndex(self.residues.len());
        self.residues
            .push(Residue::new(name, seq_num, chain_id, icode, base_class));
        index
    }

    /// Appends an atom to an existing residue.
    ///
    /// Returns `None` if the residue ordinal is out of range.
    pub fn add_atom(
        &mut self,
        residue: ResidueIndex,
        name: &str,
        position: Point3<f64>,
    ) -> Option<AtomIndex> {
        if residue.0 >= self.residues.len() {
            return None;
        }
        let atom = Atom::new(name, residue, position);
        let index = AtomIndex(self.atoms.len());
        self.residues[residue.0].add_atom(&atom.name, index);
        self.atoms.push(atom);
        Some(index)
    }

    pub fn atom(&self, index: AtomIndex) -> Option<&Atom> {
        self.atoms.get(index.0)
    }

    pub fn residue(&self, index: ResidueIndex) -> Option<&Residue> {
        self.residues.get(index.0)
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn residues(&self) -> &[Residue] {
        &self.residues
    }

    pub fn residue_count(&self) -> usize {
        self.residues.len()
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }

    /// Residue ordinals in canonical (file) order.
    pub fn residue_indices(&self) -> impl Iterator<Item = ResidueIndex> + use<> {
        (0..self.residues.len()).map(ResidueIndex)
    }

    /// Position of a named atom in a residue, if present.
    pub fn atom_position(&self, residue: ResidueIndex, name: &str) -> Option<Point3<f64>> {
        let idx = self.residue(residue)?.atom_by_name(name)?;
        self.atom(idx).map(|a| a.position)
    }

    /// Attaches (or replaces) the reference frame of a residue. Latest wins.
    pub fn set_frame(&mut self, residue: ResidueIndex, frame: ReferenceFrame) {
        if let Some(r) = self.residues.get_mut(residue.0) {
            r.frame = Some(frame);
        }
    }

    pub fn frame(&self, residue: ResidueIndex) -> Option<&ReferenceFrame> {
        self.residue(residue)?.frame()
    }

    /// Upgrades residues the name registry did not recognize, using ring-atom
    /// presence: a full six-membered ring makes a pyrimidine, and the purine
    /// defining pair on top of that makes a purine. Modified bases with exotic
    /// names become pairable this way; everything else stays [`BaseClass::Other`].
    pub fn infer_base_classes(&mut self) {
        for residue in &mut self.residues {
            if residue.base_class != BaseClass::Other {
                continue;
            }
            let has_six_ring = bases::PYRIMIDINE_RING
                .iter()
                .all(|name| residue.has_atom(name));
            if !has_six_ring {
                continue;
            }
            residue.base_class = if bases::has_purine_pair(residue) {
                BaseClass::Purine
            } else {
                BaseClass::Pyrimidine
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template_structure() -> Structure {
        let mut structure = Structure::new();
        let res = structure.add_residue("ADE", 1, 'A', None);
        for atom in bases::template_atoms('A').unwrap() {
            structure.add_atom(res, atom.name, atom.position());
        }
        structure
    }

    #[test]
    fn add_residue_classifies_by_registry() {
        let mut structure = Structure::new();
        let a = structure.add_residue("DA", 1, 'A', None);
        let u = structure.add_residue("URA", 2, 'A', None);
        let x = structure.add_residue("XYZ", 3, 'A', None);
        assert_eq!(structure.residue(a).unwrap().base_class, BaseClass::Purine);
        assert_eq!(
            structure.residue(u).unwrap().base_class,
            BaseClass::Pyrimidine
        );
        assert_eq!(structure.residue(x).unwrap().base_class, BaseClass::Other);
    }

    #[test]
    fn ordinals_reflect_insertion_order() {
        let mut structure = Structure::new();
        let r0 = structure.add_residue("ADE", 5, 'A', None);
        let r1 = structure.add_residue("URA", 2, 'B', None);
        assert_eq!(r0, ResidueIndex(0));
        assert_eq!(r1, ResidueIndex(1));

        let a0 = structure.add_atom(r1, "N1", Point3::origin()).unwrap();
        let a1 = structure.add_atom(r0, "N9", Point3::origin()).unwrap();
        assert_eq!(a0, AtomIndex(0));
        assert_eq!(a1, AtomIndex(1));
        assert_eq!(structure.atom(a1).unwrap().residue, r0);
    }

    #[test]
    fn add_atom_rejects_unknown_residue() {
        let mut structure = Structure::new();
        assert!(
            structure
                .add_atom(ResidueIndex(0), "N1", Point3::origin())
                .is_none()
        );
    }

    #[test]
    fn atom_position_resolves_by_name() {
        let structure = template_structure();
        let n9 = structure.atom_position(ResidueIndex(0), "N9").unwrap();
        assert!((n9.x - (-1.291)).abs() < 1e-9);
        assert!(structure.atom_position(ResidueIndex(0), "XX").is_none());
    }

    #[test]
    fn set_frame_replaces_previous_value() {
        let mut structure = template_structure();
        let res = ResidueIndex(0);
        let first = ReferenceFrame::new(
            nalgebra::Matrix3::identity(),
            Point3::new(1.0, 0.0, 0.0),
            0.1,
        );
        let second = ReferenceFrame::new(
            nalgebra::Matrix3::identity(),
            Point3::new(2.0, 0.0, 0.0),
            0.2,
        );
        structure.set_frame(res, first);
        structure.set_frame(res, second);
        assert_eq!(structure.frame(res).unwrap().origin.x, 2.0);
    }

    #[test]
    fn infer_base_classes_upgrades_modified_residues() {
        let mut structure = Structure::new();
        let res = structure.add_residue("5XU", 1, 'A', None);
        assert_eq!(structure.residue(res).unwrap().base_class, BaseClass::Other);
        for atom in bases::template_atoms('U').unwrap() {
            structure.add_atom(res, atom.name, atom.position());
        }
        structure.infer_base_classes();
        assert_eq!(
            structure.residue(res).unwrap().base_class,
            BaseClass::Pyrimidine
        );
    }

    #[test]
    fn infer_base_classes_ignores_residues_without_full_ring() {
        let mut structure = Structure::new();
        let res = structure.add_residue("LIG", 1, 'A', None);
        structure.add_atom(res, "N1", Point3::origin());
        structure.add_atom(res, "C2", Point3::origin());
        structure.infer_base_classes();
        assert_eq!(structure.residue(res).unwrap().base_class, BaseClass::Other);
    }
}
