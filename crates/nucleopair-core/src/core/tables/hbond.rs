use phf::{Map, phf_map};

/// Hybridization class of a polar base atom, driving slot geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hybridization {
    /// Exocyclic NH2: two in-plane donor hydrogens.
    Amino,
    /// Ring NH: one in-plane donor hydrogen opposite the ring bonds.
    Imino,
    /// sp2 carbonyl oxygen: two in-plane lone pairs flanking the C=O axis.
    Carbonyl,
    /// sp2 ring nitrogen acceptor: one in-plane lone pair opposite the ring bonds.
    RingNitrogen,
    /// sp3 sugar hydroxyl: heuristic tetrahedral slots.
    Hydroxyl,
}

/// Donor/acceptor site description: hybridization class plus slot counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SiteSpec {
    pub class: Hybridization,
    /// Number of hydrogen (donor) slots.
    pub h_slots: u8,
    /// Number of lone-pair (acceptor) slots.
    pub lp_slots: u8,
}

const fn site(class: Hybridization, h_slots: u8, lp_slots: u8) -> SiteSpec {
    SiteSpec {
        class,
        h_slots,
        lp_slots,
    }
}

/// Polar-site table keyed by `identity:atom`. Atoms absent from this table
/// have zero donor and acceptor capacity.
static SITES: Map<&'static str, SiteSpec> = phf_map! {
    // Adenine
    "A:N6" => site(Hybridization::Amino, 2, 0),
    "A:N1" => site(Hybridization::RingNitrogen, 0, 1),
    "A:N3" => site(Hybridization::RingNitrogen, 0, 1),
    "A:N7" => site(Hybridization::RingNitrogen, 0, 1),
    // Guanine
    "G:N1" => site(Hybridization::Imino, 1, 0),
    "G:N2" => site(Hybridization::Amino, 2, 0),
    "G:O6" => site(Hybridization::Carbonyl, 0, 2),
    "G:N3" => site(Hybridization::RingNitrogen, 0, 1),
    "G:N7" => site(Hybridization::RingNitrogen, 0, 1),
    // Inosine (guanine without the 2-amino group)
    "I:N1" => site(Hybridization::Imino, 1, 0),
    "I:O6" => site(Hybridization::Carbonyl, 0, 2),
    "I:N3" => site(Hybridization::RingNitrogen, 0, 1),
    "I:N7" => site(Hybridization::RingNitrogen, 0, 1),
    // Cytosine
    "C:N4" => site(Hybridization::Amino, 2, 0),
    "C:N3" => site(Hybridization::RingNitrogen, 0, 1),
    "C:O2" => site(Hybridization::Carbonyl, 0, 2),
    // Thymine
    "T:N3" => site(Hybridization::Imino, 1, 0),
    "T:O2" => site(Hybridization::Carbonyl, 0, 2),
    "T:O4" => site(Hybridization::Carbonyl, 0, 2),
    // Uracil
    "U:N3" => site(Hybridization::Imino, 1, 0),
    "U:O2" => site(Hybridization::Carbonyl, 0, 2),
    "U:O4" => site(Hybridization::Carbonyl, 0, 2),
};

/// Bonded heavy neighbors of each polar site, keyed like [`SITES`]. Slot
/// geometry is undefined when any listed neighbor is missing from the residue.
static NEIGHBORS: Map<&'static str, &'static [&'static str]> = phf_map! {
    "A:N6" => &["C6"],
    "A:N1" => &["C2", "C6"],
    "A:N3" => &["C2", "C4"],
    "A:N7" => &["C5", "C8"],
    "G:N1" => &["C2", "C6"],
    "G:N2" => &["C2"],
    "G:O6" => &["C6"],
    "G:N3" => &["C2", "C4"],
    "G:N7" => &["C5", "C8"],
    "I:N1" => &["C2", "C6"],
    "I:O6" => &["C6"],
    "I:N3" => &["C2", "C4"],
    "I:N7" => &["C5", "C8"],
    "C:N4" => &["C4"],
    "C:N3" => &["C2", "C4"],
    "C:O2" => &["C2"],
    "T:N3" => &["C2", "C4"],
    "T:O2" => &["C2"],
    "T:O4" => &["C4"],
    "U:N3" => &["C2", "C4"],
    "U:O2" => &["C2"],
    "U:O4" => &["C4"],
};

const HYDROXYL_SITE: SiteSpec = site(Hybridization::Hydroxyl, 1, 2);
const HYDROXYL_NEIGHBORS: &[&str] = &["C2'"];

fn is_ribose_hydroxyl(atom_name: &str) -> bool {
    matches!(atom_name, "O2'" | "O2*")
}

/// Looks up the donor/acceptor site description for an atom of a base with
/// the given standard identity. Returns `None` for atoms with zero capacity.
pub fn site_spec(identity: char, atom_name: &str) -> Option<SiteSpec> {
    if is_ribose_hydroxyl(atom_name) {
        return Some(HYDROXYL_SITE);
    }
    let key = format!("{identity}:{atom_name}");
    SITES.get(key.as_str()).copied()
}

/// Bonded heavy neighbors required to construct slot directions for a site.
pub fn site_neighbors(identity: char, atom_name: &str) -> Option<&'static [&'static str]> {
    if is_ribose_hydroxyl(atom_name) {
        return Some(HYDROXYL_NEIGHBORS);
    }
    let key = format!("{identity}:{atom_name}");
    NEIGHBORS.get(key.as_str()).copied()
}
