//! Synthetic training corpus.
//!
//! One labelled case per `(city, structure type, hazard, severity band)`.
//! Labels come from a stress index that weights severity, affected area,
//! regional hazard intensity, and soil instability.

use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, StringArray, UInt32Array};
use arrow::record_batch::RecordBatch;
use serde::Serialize;

use hazardwise_core::schema::corpus::training_case_schema;
use hazardwise_core::{
    CityIndices, DamageClass, Hazard, Province, ProvinceProfile, ReferenceData, ScopeClass,
    StructureType,
};

use crate::features::FeatureVector;

/// Severity bands, paired positionally with [`AFFECTED_AREA_BANDS`].
pub const SEVERITY_BANDS: [f64; 5] = [34.0, 46.0, 58.0, 71.0, 84.0];
pub const AFFECTED_AREA_BANDS: [f64; 5] = [18.0, 26.0, 34.0, 43.0, 54.0];

/// `(severity, affected_area)` pairs, one per band.
fn bands() -> impl Iterator<Item = (f64, f64)> {
    SEVERITY_BANDS.into_iter().zip(AFFECTED_AREA_BANDS)
}

/// Corpus-level depth score bounds.
pub const CORPUS_DEPTH_RANGE: (f64, f64) = (0.35, 0.97);

/// The raw (unnormalized) inputs of one case or query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Sample {
    pub structure_type: StructureType,
    pub hazard: Hazard,
    pub severity: f64,
    pub affected_area: f64,
    pub province: ProvinceProfile,
    pub city: CityIndices,
}

impl Sample {
    /// Feature order: structure code, hazard code, severity, affected area,
    /// the five province indices, the three city indices.
    pub fn features(&self) -> FeatureVector {
        let p = &self.province;
        let c = &self.city;
        [
            self.structure_type.code(),
            self.hazard.code(),
            self.severity,
            self.affected_area,
            p.seismic_zone,
            p.flood_risk,
            p.monsoon_index,
            p.soil_instability,
            p.logistics,
            c.labor_index,
            c.material_index,
            c.exposure_bias,
        ]
    }

    pub fn stress_index(&self) -> f64 {
        self.severity / 100.0 * 0.45
            + self.affected_area / 100.0 * 0.25
            + self.province.hazard_intensity(self.hazard) * 0.2
            + self.province.soil_instability * 0.1
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingCase {
    /// Row position; the final tie-break in neighbour ordering and voting.
    pub index: usize,
    pub city: String,
    pub province: Province,
    pub sample: Sample,
    pub stress_index: f64,
    pub predicted_scope: ScopeClass,
    pub predicted_damage: DamageClass,
    pub depth_score: f64,
}

impl TrainingCase {
    fn label(index: usize, city: &str, province: Province, sample: Sample) -> Self {
        let stress = sample.stress_index();
        let (lo, hi) = CORPUS_DEPTH_RANGE;
        Self {
            index,
            city: city.to_string(),
            province,
            sample,
            stress_index: stress,
            predicted_scope: ScopeClass::from_stress(stress),
            predicted_damage: DamageClass::from_stress(stress),
            depth_score: (0.32 + stress).clamp(lo, hi),
        }
    }
}

/// Count of cases per label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelHistogram {
    pub basic: usize,
    pub standard: usize,
    pub comprehensive: usize,
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

/// Immutable table of labelled cases.
#[derive(Debug, Clone)]
pub struct Corpus {
    cases: Vec<TrainingCase>,
}

impl Corpus {
    /// Enumerate every city × structure × hazard × band combination.
    ///
    /// Structure types are taken from the reference structure table, so a
    /// custom table with fewer profiles yields a smaller corpus.
    pub fn build(reference: &ReferenceData) -> Self {
        let structures: Vec<StructureType> = reference.structures.keys().copied().collect();
        let mut cases = Vec::with_capacity(
            reference.cities.len() * structures.len() * Hazard::ALL.len() * SEVERITY_BANDS.len(),
        );

        for city in &reference.cities {
            let province = reference.province(city.province);
            for &structure_type in &structures {
                for hazard in Hazard::ALL {
                    for (severity, affected_area) in bands() {
                        let sample = Sample {
                            structure_type,
                            hazard,
                            severity,
                            affected_area,
                            province,
                            city: city.indices,
                        };
                        let index = cases.len();
                        let case = TrainingCase::label(index, &city.name, city.province, sample);
                        cases.push(case);
                    }
                }
            }
        }

        Self { cases }
    }

    pub fn cases(&self) -> &[TrainingCase] {
        &self.cases
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    pub fn label_histogram(&self) -> LabelHistogram {
        let mut h = LabelHistogram::default();
        for case in &self.cases {
            match case.predicted_scope {
                ScopeClass::Basic => h.basic += 1,
                ScopeClass::Standard => h.standard += 1,
                ScopeClass::Comprehensive => h.comprehensive += 1,
            }
            match case.predicted_damage {
                DamageClass::Low => h.low += 1,
                DamageClass::Medium => h.medium += 1,
                DamageClass::High => h.high += 1,
            }
        }
        h
    }

    /// Render the corpus as a single Arrow batch (see
    /// [`training_case_schema`]).
    pub fn to_record_batch(&self) -> Result<RecordBatch, arrow::error::ArrowError> {
        let cases = &self.cases;
        let f64_col = |value: fn(&TrainingCase) -> f64| -> ArrayRef {
            Arc::new(Float64Array::from_iter_values(cases.iter().map(value)))
        };
        let str_col = |value: fn(&TrainingCase) -> &str| -> ArrayRef {
            Arc::new(StringArray::from_iter_values(cases.iter().map(value)))
        };
        let feature_col = |dim: usize| -> ArrayRef {
            let values = cases.iter().map(|c| c.sample.features()[dim]);
            Arc::new(Float64Array::from_iter_values(values))
        };

        let columns: Vec<ArrayRef> = vec![
            Arc::new(UInt32Array::from_iter_values(cases.iter().map(|c| c.index as u32))),
            str_col(|c| c.city.as_str()),
            str_col(|c| c.province.as_str()),
            str_col(|c| c.sample.structure_type.as_str()),
            str_col(|c| c.sample.hazard.as_str()),
            feature_col(2),
            feature_col(3),
            feature_col(4),
            feature_col(5),
            feature_col(6),
            feature_col(7),
            feature_col(8),
            feature_col(9),
            feature_col(10),
            feature_col(11),
            f64_col(|c| c.stress_index),
            str_col(|c| c.predicted_scope.as_str()),
            str_col(|c| c.predicted_damage.as_str()),
            f64_col(|c| c.depth_score),
        ];

        RecordBatch::try_new(Arc::new(training_case_schema()), columns)
    }
}
