use super::frame::ReferenceFrame;
use super::ids::AtomIndex;
use std::collections::HashMap;

/// Chemical class of a residue's base, assigned once at construction from the
/// name registry (with an atom-presence fallback for modified residues) and
/// never recomputed per use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseClass {
    /// Fused two-ring base (adenine, guanine, inosine, ...): 9 ring atoms.
    Purine,
    /// Single six-membered ring base (cytosine, thymine, uracil, ...): 6 ring atoms.
    Pyrimidine,
    /// Not a recognizable nucleic acid base; excluded from pairing.
    Other,
}

/// A residue: immutable identity plus its atom membership and an optional
/// computed reference frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Residue {
    /// Residue name from the source file (e.g., "DA", "URA").
    pub name: String,
    /// Residue sequence number from the source file.
    pub seq_num: isize,
    /// Chain identifier.
    pub chain_id: char,
    /// Insertion code, if any.
    pub icode: Option<char>,
    /// Base classification; see [`BaseClass`].
    pub base_class: BaseClass,
    pub(crate) atoms: Vec<AtomIndex>,
    atom_name_map: HashMap<String, AtomIndex>,
    pub(crate) frame: Option<ReferenceFrame>,
}

impl Residue {
    pub(crate) fn new(
        name: &str,
        seq_num: isize,
        chain_id: char,
        icode: Option<char>,
        base_class: BaseClass,
    ) -> Self {
        Self {
            name: name.to_string(),
            seq_num,
            chain_id,
            icode,
            base_class,
            atoms: Vec::new(),
            atom_name_map: HashMap::new(),
            frame: None,
        }
    }

    pub(crate) fn add_atom(&mut self, atom_name: &str, atom_index: AtomIndex) {
        self.atoms.push(atom_index);
        self.atom_name_map.insert(atom_name.to_string(), atom_index);
    }

    /// Atom ordinals in file order.
    pub fn atoms(&self) -> &[AtomIndex] {
        &self.atoms
    }

    pub fn atom_by_name(&self, name: &str) -> Option<AtomIndex> {
        self.atom_name_map.get(name).copied()
    }

    pub fn has_atom(&self, name: &str) -> bool {
        self.atom_name_map.contains_key(name)
    }

    /// The computed reference frame, if fitting succeeded for this residue.
    pub fn frame(&self) -> Option<&ReferenceFrame> {
        self.frame.as_ref()
    }

    /// Name of the glycosidic ring nitrogen: N9 for purines when present,
    /// otherwise N1.
    pub fn glycosidic_nitrogen(&self) -> Option<AtomIndex> {
        if self.base_class == BaseClass::Purine {
            if let Some(idx) = self.atom_by_name("N9") {
                return Some(idx);
            }
        }
        self.atom_by_name("N1")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_residue_initializes_fields_correctly() {
        let residue = Residue::new("URA", 12, 'A', None, BaseClass::Pyrimidine);
        assert_eq!(residue.name, "URA");
        assert_eq!(residue.seq_num, 12);
        assert_eq!(residue.chain_id, 'A');
        assert_eq!(residue.base_class, BaseClass::Pyrimidine);
        assert!(residue.atoms().is_empty());
        assert!(residue.frame().is_none());
        assert!(residue.atom_by_name("N1").is_none());
    }

    #[test]
    fn add_atom_registers_atom_and_name() {
        let mut residue = Residue::new("ADE", 1, 'A', None, BaseClass::Purine);
        residue.add_atom("N9", AtomIndex(7));
        assert_eq!(residue.atoms(), &[AtomIndex(7)]);
        assert_eq!(residue.atom_by_name("N9"), Some(AtomIndex(7)));
        assert!(residue.has_atom("N9"));
        assert!(!residue.has_atom("C8"));
    }

    #[test]
    fn glycosidic_nitrogen_prefers_n9_for_purines() {
        let mut purine = Residue::new("ADE", 1, 'A', None, BaseClass::Purine);
        purine.add_atom("N1", AtomIndex(0));
        purine.add_atom("N9", AtomIndex(1));
        assert_eq!(purine.glycosidic_nitrogen(), Some(AtomIndex(1)));

        let mut pyrimidine = Residue::new("URA", 2, 'A', None, BaseClass::Pyrimidine);
        pyrimidine.add_atom("N1", AtomIndex(5));
        assert_eq!(pyrimidine.glycosidic_nitrogen(), Some(AtomIndex(5)));
    }

    #[test]
    fn glycosidic_nitrogen_falls_back_to_n1_when_n9_missing() {
        let mut purine = Residue::new("ADE", 1, 'A', None, BaseClass::Purine);
        purine.add_atom("N1", AtomIndex(0));
        assert_eq!(purine.glycosidic_nitrogen(), Some(AtomIndex(0)));
    }
}
