use super::ids::ResidueIndex;
use nalgebra::Point3;

/// Coarse element classification derived from the atom name.
///
/// Only nitrogen and oxygen matter for hydrogen-bond capacity; everything else
/// is lumped together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Carbon,
    Nitrogen,
    Oxygen,
    Other,
}

/// An atom in a nucleic acid structure.
///
/// Immutable once parsed: name, 3D position, and the ordinal of the owning
/// residue. Atoms never own anything; the [`super::structure::Structure`] arena
/// does.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// The name of the atom (e.g., "N1", "C2", "O2'").
    pub name: String,
    /// The 3D coordinates of the atom in Angstroms.
    pub position: Point3<f64>,
    /// Ordinal of the parent residue.
    pub residue: ResidueIndex,
}

impl Atom {
    pub fn new(name: &str, residue: ResidueIndex, position: Point3<f64>) -> Self {
        Self {
            name: name.trim().to_string(),
            position,
            residue,
        }
    }

    /// Element kind from the leading letter of the atom name.
    pub fn element(&self) -> ElementKind {
        match self.name.chars().next().map(|c| c.to_ascii_uppercase()) {
            Some('C') => ElementKind::Carbon,
            Some('N') => ElementKind::Nitrogen,
            Some('O') => ElementKind::Oxygen,
            _ => ElementKind::Other,
        }
    }

    /// Whether this atom belongs to the base moiety, as opposed to the sugar
    /// (primed names) or the phosphate group.
    pub fn is_base_atom(&self) -> bool {
        if self.name.contains('\'') || self.name.contains('*') {
            return false;
        }
        !matches!(self.name.as_str(), "P" | "OP1" | "OP2" | "OP3" | "O1P" | "O2P" | "O3P")
    }

    /// Nitrogen or oxygen; the only elements that can donate or accept
    /// hydrogen bonds in this model.
    pub fn is_polar(&self) -> bool {
        matches!(self.element(), ElementKind::Nitrogen | ElementKind::Oxygen)
    }
}
