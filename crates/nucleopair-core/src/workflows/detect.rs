use crate::core::models::pair::BasePair;
use crate::core::models::structure::Structure;
use crate::engine::config::PairConfig;
use crate::engine::error::EngineError;
use crate::engine::frame::assign;
use crate::engine::pairing::selector;
use tracing::{info, instrument};

/// Runs the full base-pair detection pipeline over one structure.
///
/// Reference frames are written back onto the residues, so they remain
/// queryable afterward regardless of pairing outcome. A structure that yields
/// zero pairs is a valid, silent result; only an empty residue list or an
/// invalid configuration is an error.
#[instrument(skip_all, name = "detection_workflow")]
pub fn run(structure: &mut Structure, config: &PairConfig) -> Result<Vec<BasePair>, EngineError> {
    config.validate()?;
    if structure.is_empty() {
        return Err(EngineError::EmptyStructure);
    }
    info!(
        residues = structure.residue_count(),
        atoms = structure.atom_count(),
        "Starting base-pair detection."
    );

    // === Phase 1: Base classification ===
    structure.infer_base_classes();

    // === Phase 2: Reference frames ===
    assign::assign_frames(structure, config);

    // === Phase 3: Validation and selection ===
    let pairs = selector::select(structure, config);

    info!(pairs = pairs.len(), "Detection complete.");
    Ok(pairs)
}
