use super::validator::{self, PairCandidate};
use crate::core::models::ids::ResidueIndex;
use crate::core::models::pair::BasePair;
use crate::core::models::structure::Structure;
use crate::engine::config::PairConfig;
use std::collections::HashMap;
use tracing::{debug, instrument, trace};

/// Per-residue pairing state. `Rejected` residues found no mutual partner on
/// their own turn but remain available as partners for later residues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PairingState {
    Unpaired,
    Paired,
    Rejected,
}

/// Validation results are direction-independent, so they are cached under the
/// normalized ordinal pair to avoid re-running the optimizer.
struct CandidateCache {
    entries: HashMap<(ResidueIndex, ResidueIndex), Option<PairCandidate>>,
}

impl CandidateCache {
    fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    fn get(
        &mut self,
        structure: &Structure,
        a: ResidueIndex,
        b: ResidueIndex,
        config: &PairConfig,
    ) -> Option<PairCandidate> {
        let key = (a.min(b), a.max(b));
        self.entries
            .entry(key)
            .or_insert_with(|| validator::validate(structure, key.0, key.1, config))
            .clone()
    }
}

/// Best valid partner for `residue` among all residues not yet paired,
/// scanned in ordinal order. Equal scores keep the first partner encountered;
/// the comparison is a strict less-than on purpose.
fn best_partner(
    structure: &Structure,
    residue: ResidueIndex,
    states: &[PairingState],
    cache: &mut CandidateCache,
    config: &PairConfig,
) -> Option<(ResidueIndex, PairCandidate)> {
    let mut best: Option<(ResidueIndex, PairCandidate)> = None;
    for other in structure.residue_indices() {
        if other == residue || states[other.0] == PairingState::Paired {
            continue;
        }
        let Some(candidate) = cache.get(structure, residue, other, config) else {
            continue;
        };
        match &best {
            Some((_, incumbent)) if candidate.quality >= incumbent.quality => {}
            _ => best = Some((other, candidate)),
        }
    }
    best
}

/// Greedy mutual-best-match selection over all residue pairs.
///
/// Residues are processed in their file-derived ordinal order, which is a
/// correctness requirement: tie-breaking on equal quality scores is implicit
/// in this iteration order. A pair is accepted only when each side's best
/// valid partner is the other; this is a single greedy sweep, not a stable
/// matching. Zero accepted pairs is a valid, silent result.
#[instrument(skip_all)]
pub fn select(structure: &Structure, config: &PairConfig) -> Vec<BasePair> {
    let mut states = vec![PairingState::Unpaired; structure.residue_count()];
    let mut cache = CandidateCache::new();
    let mut pairs = Vec::new();

    for i in structure.residue_indices() {
        if states[i.0] != PairingState::Unpaired {
            continue;
        }

        let Some((j, candidate)) = best_partner(structure, i, &states, &mut cache, config) else {
            states[i.0] = PairingState::Rejected;
            continue;
        };
        let mutual = best_partner(structure, j, &states, &mut cache, config)
            .is_some_and(|(back, _)| back == i);
        if !mutual {
            trace!(i = %i, j = %j, "best partner not mutual");
            states[i.0] = PairingState::Rejected;
            continue;
        }

        let (Some(frame_i), Some(frame_j)) = (structure.frame(i), structure.frame(j)) else {
            states[i.0] = PairingState::Rejected;
            continue;
        };
        trace!(i = %i, j = %j, quality = candidate.quality, kind = %candidate.kind, "pair accepted");
        pairs.push(BasePair::new(
            i,
            j,
            candidate.kind,
            *frame_i,
            *frame_j,
            candidate.hbonds,
            candidate.quality,
        ));
        states[i.0] = PairingState::Paired;
        states[j.0] = PairingState::Paired;
    }

    debug!(pairs = pairs.len(), "pair selection finished");
    pairs
}
