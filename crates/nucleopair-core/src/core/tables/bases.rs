use crate::core::models::residue::{BaseClass, Residue};
use nalgebra::Point3;
use phf::{Map, Set, phf_map, phf_set};

/// Residue names recognized as purines.
static PURINE_NAMES: Set<&'static str> = phf_set! {
    "A", "ADE", "DA", "RA", "A3", "A5",
    "G", "GUA", "DG", "RG", "G3", "G5",
    "I", "DI", "INO",
    "1MA", "2MG", "7MG", "M2G", "OMG",
};

/// Residue names recognized as pyrimidines.
static PYRIMIDINE_NAMES: Set<&'static str> = phf_set! {
    "C", "CYT", "DC", "RC", "C3", "C5",
    "T", "THY", "DT", "RT", "5MU",
    "U", "URA", "DU", "RU", "U3", "U5",
    "PSU", "5MC", "OMC", "OMU", "4SU", "H2U",
};

/// Standard-base identity for template lookup and pair naming.
static STANDARD_IDENTITY: Map<&'static str, char> = phf_map! {
    "A" => 'A', "ADE" => 'A', "DA" => 'A', "RA" => 'A', "A3" => 'A', "A5" => 'A', "1MA" => 'A',
    "G" => 'G', "GUA" => 'G', "DG" => 'G', "RG" => 'G', "G3" => 'G', "G5" => 'G',
    "2MG" => 'G', "7MG" => 'G', "M2G" => 'G', "OMG" => 'G',
    "I" => 'I', "DI" => 'I', "INO" => 'I',
    "C" => 'C', "CYT" => 'C', "DC" => 'C', "RC" => 'C', "C3" => 'C', "C5" => 'C',
    "5MC" => 'C', "OMC" => 'C',
    "T" => 'T', "THY" => 'T', "DT" => 'T', "RT" => 'T', "5MU" => 'T',
    "U" => 'U', "URA" => 'U', "DU" => 'U', "RU" => 'U', "U3" => 'U', "U5" => 'U',
    "PSU" => 'U', "OMU" => 'U', "4SU" => 'U', "H2U" => 'U',
};

/// The nine canonical purine ring atoms, in template order. The first six are
/// shared with the pyrimidine ring.
pub const PURINE_RING: [&str; 9] = ["N1", "C2", "N3", "C4", "C5", "C6", "N7", "C8", "N9"];

/// The six canonical pyrimidine ring atoms, in template order.
pub const PYRIMIDINE_RING: [&str; 6] = ["N1", "C2", "N3", "C4", "C5", "C6"];

/// Purine-specific ring atoms: two ring nitrogens plus the extra carbon.
pub const PURINE_ONLY_ATOMS: [&str; 3] = ["N7", "C8", "N9"];

/// The defining pair for the true-purine test: purine-specific atoms are
/// matched only when *both* of these are present, so a stray side-chain atom
/// that reuses a purine ring name cannot force the 9-atom template.
pub const PURINE_DEFINING_PAIR: (&str, &str) = ("N7", "C8");

/// Ring perimeter vertex order for projected-overlap polygons. The purine
/// order walks the outer boundary of the fused bicycle.
pub const PURINE_PERIMETER: [&str; 9] = ["N1", "C2", "N3", "C4", "N9", "C8", "N7", "C5", "C6"];
pub const PYRIMIDINE_PERIMETER: [&str; 6] = PYRIMIDINE_RING;

/// Canonical Watson-Crick pair codes (identity of residue i followed by j).
static WATSON_CRICK_PAIRS: Set<&'static str> = phf_set! {
    "AT", "TA", "AU", "UA", "GC", "CG", "IC", "CI",
};

/// Wobble pair codes.
static WOBBLE_PAIRS: Set<&'static str> = phf_set! {
    "GT", "TG", "GU", "UG", "IU", "UI",
};

/// A heavy atom of a standard base in the standard reference frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemplateAtom {
    pub name: &'static str,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl TemplateAtom {
    pub fn position(&self) -> Point3<f64> {
        Point3::new(self.x, self.y, self.z)
    }
}

const fn tpl(name: &'static str, x: f64, y: f64, z: f64) -> TemplateAtom {
    TemplateAtom { name, x, y, z }
}

static ADENINE_TEMPLATE: [TemplateAtom; 10] = [
    tpl("N9", -1.291, 4.498, 0.000),
    tpl("C8", 0.024, 4.897, 0.000),
    tpl("N7", 0.877, 3.902, 0.000),
    tpl("C5", 0.071, 2.771, 0.000),
    tpl("C6", 0.369, 1.398, 0.000),
    tpl("N6", 1.611, 0.909, 0.000),
    tpl("N1", -0.668, 0.532, 0.000),
    tpl("C2", -1.912, 1.023, 0.000),
    tpl("N3", -2.320, 2.290, 0.000),
    tpl("C4", -1.267, 3.124, 0.000),
];

static GUANINE_TEMPLATE: [TemplateAtom; 11] = [
    tpl("N9", -1.289, 4.551, 0.000),
    tpl("C8", 0.023, 4.962, 0.000),
    tpl("N7", 0.870, 3.969, 0.000),
    tpl("C5", 0.071, 2.833, 0.000),
    tpl("C6", 0.424, 1.460, 0.000),
    tpl("O6", 1.554, 0.955, 0.000),
    tpl("N1", -0.700, 0.641, 0.000),
    tpl("C2", -1.999, 1.087, 0.000),
    tpl("N2", -2.949, 0.139, -0.008),
    tpl("N3", -2.342, 2.364, 0.001),
    tpl("C4", -1.265, 3.177, 0.000),
];

static INOSINE_TEMPLATE: [TemplateAtom; 10] = [
    tpl("N9", -1.289, 4.551, 0.000),
    tpl("C8", 0.023, 4.962, 0.000),
    tpl("N7", 0.870, 3.969, 0.000),
    tpl("C5", 0.071, 2.833, 0.000),
    tpl("C6", 0.424, 1.460, 0.000),
    tpl("O6", 1.554, 0.955, 0.000),
    tpl("N1", -0.700, 0.641, 0.000),
    tpl("C2", -1.999, 1.087, 0.000),
    tpl("N3", -2.342, 2.364, 0.001),
    tpl("C4", -1.265, 3.177, 0.000),
];

static CYTOSINE_TEMPLATE: [TemplateAtom; 8] = [
    tpl("N1", -1.285, 4.542, 0.000),
    tpl("C2", -1.472, 3.158, 0.000),
    tpl("O2", -2.628, 2.709, 0.001),
    tpl("N3", -0.391, 2.344, 0.000),
    tpl("C4", 0.837, 2.868, 0.000),
    tpl("N4", 1.875, 2.027, 0.001),
    tpl("C5", 1.056, 4.275, 0.000),
    tpl("C6", -0.023, 5.068, 0.000),
];

static THYMINE_TEMPLATE: [TemplateAtom; 9] = [
    tpl("N1", -1.284, 4.500, 0.000),
    tpl("C2", -1.462, 3.135, 0.000),
    tpl("O2", -2.562, 2.608, 0.000),
    tpl("N3", -0.298, 2.407, 0.000),
    tpl("C4", 0.994, 2.897, 0.000),
    tpl("O4", 1.944, 2.119, 0.000),
    tpl("C5", 1.106, 4.338, 0.000),
    tpl("C7", 2.466, 4.961, 0.001),
    tpl("C6", -0.024, 5.057, 0.000),
];

static URACIL_TEMPLATE: [TemplateAtom; 8] = [
    tpl("N1", -1.284, 4.500, 0.000),
    tpl("C2", -1.462, 3.131, 0.000),
    tpl("O2", -2.563, 2.608, 0.000),
    tpl("N3", -0.302, 2.397, 0.000),
    tpl("C4", 0.989, 2.884, 0.000),
    tpl("O4", 1.935, 2.094, -0.001),
    tpl("C5", 1.089, 4.311, 0.000),
    tpl("C6", -0.024, 5.053, 0.000),
];

/// Classifies a residue name into purine/pyrimidine/other via the registry.
pub fn classify(name: &str) -> BaseClass {
    let trimmed = name.trim();
    if PURINE_NAMES.contains(trimmed) {
        BaseClass::Purine
    } else if PYRIMIDINE_NAMES.contains(trimmed) {
        BaseClass::Pyrimidine
    } else {
        BaseClass::Other
    }
}

/// Standard-base identity letter for a residue name, if known.
pub fn standard_identity(name: &str) -> Option<char> {
    STANDARD_IDENTITY.get(name.trim()).copied()
}

/// Identity used for template and site lookups: the registry identity when
/// known, otherwise a generic purine (adenine) or pyrimidine (uracil)
/// stand-in based on the residue's class.
pub fn effective_identity(residue: &Residue) -> Option<char> {
    standard_identity(&residue.name).or(match residue.base_class {
        BaseClass::Purine => Some('A'),
        BaseClass::Pyrimidine => Some('U'),
        BaseClass::Other => None,
    })
}

/// Heavy-atom template of a standard base in the standard reference frame.
pub fn template_atoms(identity: char) -> Option<&'static [TemplateAtom]> {
    match identity {
        'A' => Some(&ADENINE_TEMPLATE),
        'G' => Some(&GUANINE_TEMPLATE),
        'I' => Some(&INOSINE_TEMPLATE),
        'C' => Some(&CYTOSINE_TEMPLATE),
        'T' => Some(&THYMINE_TEMPLATE),
        'U' => Some(&URACIL_TEMPLATE),
        _ => None,
    }
}

/// True when the residue carries both members of the purine defining pair.
pub fn has_purine_pair(residue: &Residue) -> bool {
    residue.has_atom(PURINE_DEFINING_PAIR.0) && residue.has_atom(PURINE_DEFINING_PAIR.1)
}

pub fn is_watson_crick_code(identity_i: char, identity_j: char) -> bool {
    let code = [identity_i, identity_j].iter().collect::<String>();
    WATSON_CRICK_PAIRS.contains(code.as_str())
}

pub fn is_wobble_code(identity_i: char, identity_j: char) -> bool {
    let code = [identity_i, identity_j].iter().collect::<String>();
    WOBBLE_PAIRS.contains(code.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_recognizes_standard_names() {
        assert_eq!(classify("A"), BaseClass::Purine);
        assert_eq!(classify("DG"), BaseClass::Purine);
        assert_eq!(classify("URA"), BaseClass::Pyrimidine);
        assert_eq!(classify("DT"), BaseClass::Pyrimidine);
        assert_eq!(classify("HOH"), BaseClass::Other);
    }

    #[test]
    fn classify_trims_whitespace() {
        assert_eq!(classify(" DA "), BaseClass::Purine);
    }

    #[test]
    fn standard_identity_maps_aliases() {
        assert_eq!(standard_identity("ADE"), Some('A'));
        assert_eq!(standard_identity("PSU"), Some('U'));
        assert_eq!(standard_identity("5MU"), Some('T'));
        assert_eq!(standard_identity("LIG"), None);
    }

    #[test]
    fn templates_contain_all_ring_atoms() {
        for identity in ['A', 'G', 'I'] {
            let template = template_atoms(identity).unwrap();
            for ring_name in PURINE_RING {
                assert!(
                    template.iter().any(|a| a.name == ring_name),
                    "{identity} template missing {ring_name}"
                );
            }
        }
        for identity in ['C', 'T', 'U'] {
            let template = template_atoms(identity).unwrap();
            for ring_name in PYRIMIDINE_RING {
                assert!(
                    template.iter().any(|a| a.name == ring_name),
                    "{identity} template missing {ring_name}"
                );
            }
        }
    }

    #[test]
    fn templates_are_planar() {
        for identity in ['A', 'G', 'C', 'T', 'U', 'I'] {
            for atom in template_atoms(identity).unwrap() {
                assert!(atom.z.abs() < 0.05, "{identity}:{} off-plane", atom.name);
            }
        }
    }

    #[test]
    fn watson_crick_codes_cover_both_orientations() {
        assert!(is_watson_crick_code('A', 'T'));
        assert!(is_watson_crick_code('T', 'A'));
        assert!(is_watson_crick_code('G', 'C'));
        assert!(is_watson_crick_code('I', 'C'));
        assert!(!is_watson_crick_code('G', 'U'));
    }

    #[test]
    fn wobble_codes_are_distinct_from_watson_crick() {
        assert!(is_wobble_code('G', 'U'));
        assert!(is_wobble_code('U', 'G'));
        assert!(!is_wobble_code('A', 'T'));
    }
}
