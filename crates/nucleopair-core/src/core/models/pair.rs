use super::frame::ReferenceFrame;
use super::ids::ResidueIndex;
use std::fmt;

/// Canonical classification of an accepted base pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BasePairKind {
    WatsonCrick,
    Wobble,
    Hoogsteen,
    Unknown,
}

impl fmt::Display for BasePairKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                BasePairKind::WatsonCrick => "Watson-Crick",
                BasePairKind::Wobble => "Wobble",
                BasePairKind::Hoogsteen => "Hoogsteen",
                BasePairKind::Unknown => "Unknown",
            }
        )
    }
}

/// An accepted hydrogen bond between two paired residues.
#[derive(Debug, Clone, PartialEq)]
pub struct HydrogenBond {
    /// Name of the donor heavy atom.
    pub donor_atom: String,
    /// Name of the acceptor heavy atom.
    pub acceptor_atom: String,
    /// Donor-acceptor distance in Angstroms.
    pub distance: f64,
    /// True when both partners are base nitrogen/oxygen atoms; false for
    /// sugar-mediated or otherwise non-standard contacts.
    pub standard: bool,
}

/// A selected base pair.
///
/// Residue order is normalized so `first < second`, but `swapped` records
/// whether the original matching direction ran the other way, because
/// downstream frame-selection logic depends on the original direction.
/// The frames are copied at pairing time; the quality score is meaningful
/// only during selection.
#[derive(Debug, Clone, PartialEq)]
pub struct BasePair {
    pub first: ResidueIndex,
    pub second: ResidueIndex,
    pub swapped: bool,
    pub kind: BasePairKind,
    pub frame_first: ReferenceFrame,
    pub frame_second: ReferenceFrame,
    pub hbonds: Vec<HydrogenBond>,
    pub quality: f64,
}

impl BasePair {
    /// Builds a pair from the original matching direction `(i, j)`,
    /// normalizing residue order and recording the swap.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        i: ResidueIndex,
        j: ResidueIndex,
        kind: BasePairKind,
        frame_i: ReferenceFrame,
        frame_j: ReferenceFrame,
        hbonds: Vec<HydrogenBond>,
        quality: f64,
    ) -> Self {
        if i <= j {
            Self {
                first: i,
                second: j,
                swapped: false,
                kind,
                frame_first: frame_i,
                frame_second: frame_j,
                hbonds,
                quality,
            }
        } else {
            Self {
                first: j,
                second: i,
                swapped: true,
                kind,
                frame_first: frame_j,
                frame_second: frame_i,
                hbonds,
                quality,
            }
        }
    }

    pub fn contains(&self, residue: ResidueIndex) -> bool {
        self.first == residue || self.second == residue
    }
}
