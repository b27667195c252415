//! Distance-weighted nearest-neighbour inference over the synthetic corpus.
//!
//! A live query is turned into a [`Sample`] from its location indices, then
//! normalized and compared against every training case. The `k` closest cases
//! vote on scope and damage with weight `1 / (distance + smoothing)` and
//! contribute a weighted average depth score.

use serde::Serialize;

use hazardwise_core::{DamageClass, Hazard, LocationContext, ScopeClass, StructureType};

use crate::corpus::{Corpus, Sample};
use crate::features::{FeatureVector, euclidean};

/// Bounds of the inferred depth score.
pub const DEPTH_RANGE: (f64, f64) = (0.45, 0.96);
/// Bounds of the evidence strength.
pub const EVIDENCE_RANGE: (f64, f64) = (0.45, 0.95);

pub const SEVERITY_RANGE: (f64, f64) = (30.0, 95.0);
pub const AFFECTED_AREA_RANGE: (f64, f64) = (15.0, 70.0);

/// One training case that took part in the vote.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Neighbor {
    pub case_index: usize,
    pub distance: f64,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InferenceResult {
    pub location: LocationContext,
    pub sample: Sample,
    pub predicted_scope: ScopeClass,
    pub predicted_damage: DamageClass,
    pub depth_score: f64,
    /// Confidence: how close the query sits to its neighbours.
    pub evidence_strength: f64,
    /// Ordered nearest first.
    pub neighbors: Vec<Neighbor>,
}

/// Affected-area base per structure type; larger footprints start higher.
fn area_base(structure_type: StructureType) -> f64 {
    match structure_type {
        StructureType::MasonryHouse => 22.0,
        StructureType::RcFrame => 26.0,
        StructureType::SchoolBlock => 34.0,
        StructureType::BridgeApproach => 32.0,
    }
}

/// Derive the query's severity and affected area from the location indices.
pub fn synthesize_query(
    location: &LocationContext,
    hazard: Hazard,
    structure_type: StructureType,
) -> Sample {
    let p = &location.province_profile;
    let exposure = location.city_indices.exposure_bias;

    let severity = match hazard {
        Hazard::Flood => 30.0 + (p.flood_risk + p.monsoon_index) * 24.0 + exposure * 12.0,
        Hazard::Earthquake => {
            28.0 + (p.seismic_zone / 5.0 + p.soil_instability) * 26.0 + exposure * 12.0
        }
    };
    let affected_area =
        area_base(structure_type) + p.hazard_intensity(hazard) * 16.0 + exposure * 10.0;

    Sample {
        structure_type,
        hazard,
        severity: severity.clamp(SEVERITY_RANGE.0, SEVERITY_RANGE.1),
        affected_area: affected_area.clamp(AFFECTED_AREA_RANGE.0, AFFECTED_AREA_RANGE.1),
        province: *p,
        city: location.city_indices,
    }
}

/// The `k` training vectors closest to `query`, nearest first.
///
/// Equal distances are ordered by training-case index.
pub fn nearest(
    query: &FeatureVector,
    training: &[FeatureVector],
    k: usize,
    smoothing: f64,
) -> Vec<Neighbor> {
    let mut scored: Vec<(usize, f64)> = training
        .iter()
        .enumerate()
        .map(|(i, v)| (i, euclidean(query, v)))
        .collect();

    scored.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));

    scored
        .into_iter()
        .take(k)
        .map(|(case_index, distance)| Neighbor {
            case_index,
            distance,
            weight: 1.0 / (distance + smoothing),
        })
        .collect()
}

/// Weighted vote over three ordinal labels.
///
/// Returns the ordinal with the highest summed weight. An exact tie goes to
/// the label whose lowest contributing case index is smallest.
pub fn weighted_vote(neighbors: &[Neighbor], label_of: impl Fn(usize) -> usize) -> usize {
    let mut tally = [0.0f64; 3];
    let mut first_case = [usize::MAX; 3];

    for n in neighbors {
        let label = label_of(n.case_index);
        tally[label] += n.weight;
        first_case[label] = first_case[label].min(n.case_index);
    }

    let mut best = 0;
    for label in 1..3 {
        let better = match tally[label].total_cmp(&tally[best]) {
            std::cmp::Ordering::Greater => true,
            std::cmp::Ordering::Equal => first_case[label] < first_case[best],
            std::cmp::Ordering::Less => false,
        };
        if better {
            best = label;
        }
    }
    best
}

/// Weighted mean of `value_of` over the neighbours; `0` if all weights vanish.
pub fn weighted_mean(neighbors: &[Neighbor], value_of: impl Fn(&Neighbor) -> f64) -> f64 {
    let total: f64 = neighbors.iter().map(|n| n.weight).sum();
    if total <= 0.0 {
        return 0.0;
    }
    let weighted: f64 = neighbors.iter().map(|n| n.weight * value_of(n)).sum();
    weighted / total
}

/// Turn the selected neighbours into class predictions and scores.
pub fn predict(
    corpus: &Corpus,
    location: LocationContext,
    sample: Sample,
    neighbors: Vec<Neighbor>,
) -> InferenceResult {
    let cases = corpus.cases();

    let scope = weighted_vote(&neighbors, |i| cases[i].predicted_scope.ordinal());
    let damage = weighted_vote(&neighbors, |i| cases[i].predicted_damage.ordinal());

    let depth = weighted_mean(&neighbors, |n| cases[n.case_index].depth_score);
    let mean_distance = weighted_mean(&neighbors, |n| n.distance);

    InferenceResult {
        location,
        sample,
        predicted_scope: ScopeClass::ALL[scope],
        predicted_damage: DamageClass::ALL[damage],
        depth_score: depth.clamp(DEPTH_RANGE.0, DEPTH_RANGE.1),
        evidence_strength: (1.0 - mean_distance).clamp(EVIDENCE_RANGE.0, EVIDENCE_RANGE.1),
        neighbors,
    }
}
